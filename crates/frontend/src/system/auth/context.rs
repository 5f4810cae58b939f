use contracts::system::auth::UserInfo;
use leptos::prelude::*;
use leptos::task::spawn_local;

use super::{api, storage};
use crate::shared::api_error::ApiError;

#[derive(Clone, Debug, Default)]
pub struct AuthState {
    pub access_token: Option<String>,
    pub user_info: Option<UserInfo>,
    /// False until the stored session has been checked on startup
    pub restored: bool,
}

impl AuthState {
    pub fn is_authenticated(&self) -> bool {
        self.access_token.is_some()
    }
}

async fn restore_session() -> Option<(String, UserInfo)> {
    let access_token = storage::get_access_token()?;
    if let Ok(user_info) = api::get_current_user(&access_token).await {
        return Some((access_token, user_info));
    }

    // Token expired, try refresh
    let refresh_token = storage::get_refresh_token()?;
    match api::refresh_token(refresh_token).await {
        Ok(response) => {
            storage::save_refreshed(&response.access, response.refresh.as_deref());
            let user_info = api::get_current_user(&response.access).await.ok()?;
            Some((response.access, user_info))
        }
        Err(e) => {
            log::info!("auth: stored session could not be refreshed: {}", e);
            None
        }
    }
}

/// Auth context provider component
#[component]
pub fn AuthProvider(children: ChildrenFn) -> impl IntoView {
    let auth_state = RwSignal::new(AuthState::default());

    // Try to restore session from browser storage on mount
    Effect::new(move |_| {
        spawn_local(async move {
            match restore_session().await {
                Some((access_token, user_info)) => {
                    log::info!("auth: session restored for {}", user_info.email);
                    auth_state.set(AuthState {
                        access_token: Some(access_token),
                        user_info: Some(user_info),
                        restored: true,
                    });
                }
                None => {
                    storage::clear_tokens();
                    auth_state.set(AuthState {
                        restored: true,
                        ..Default::default()
                    });
                }
            }
        });
    });

    provide_context(auth_state);

    children()
}

/// Hook to access auth state
pub fn use_auth() -> RwSignal<AuthState> {
    use_context::<RwSignal<AuthState>>().expect("AuthProvider not found in component tree")
}

/// Helper: Perform login. Errors are returned to the form for inline display.
pub async fn do_login(
    auth_state: RwSignal<AuthState>,
    email: String,
    password: String,
    remember_me: bool,
) -> Result<(), ApiError> {
    let response = api::login(email, password).await?;

    storage::save_login(&response.access, &response.refresh, remember_me);
    log::info!("auth: logged in as {}", response.user.email);

    auth_state.set(AuthState {
        access_token: Some(response.access),
        user_info: Some(response.user),
        restored: true,
    });

    Ok(())
}

/// Helper: Perform logout. Local tokens are cleared even if the server call fails.
pub async fn do_logout(auth_state: RwSignal<AuthState>) {
    if let Some(refresh_token) = storage::get_refresh_token() {
        if let Err(e) = api::logout(storage::get_access_token(), refresh_token).await {
            log::warn!("auth: logout request failed: {}", e);
        }
    }

    storage::clear_tokens();

    auth_state.set(AuthState {
        restored: true,
        ..Default::default()
    });
}
