use leptos::prelude::*;
use leptos_router::components::Redirect;

use super::context::use_auth;

/// Renders children only for an authenticated session.
/// Sends the user to `/login` once the stored session turned out to be absent.
#[component]
pub fn RequireAuth(children: ChildrenFn) -> impl IntoView {
    let auth_state = use_auth();
    let children = StoredValue::new(children);

    view! {
        {move || {
            let state = auth_state.get();
            if state.is_authenticated() {
                children.with_value(|c| c()).into_any()
            } else if state.restored {
                view! { <Redirect path="/login" /> }.into_any()
            } else {
                view! {
                    <div class="page__loading">
                        <thaw::Spinner label="Carregando sessão..." />
                    </div>
                }
                .into_any()
            }
        }}
    }
}
