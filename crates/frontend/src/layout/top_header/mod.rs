//! Application top bar: brand, signed-in user and logout.

use crate::shared::config::app_config;
use crate::shared::icons::icon;
use crate::system::auth::context::{do_logout, use_auth};
use leptos::prelude::*;
use leptos::task::spawn_local;

#[component]
pub fn TopHeader() -> impl IntoView {
    let auth_state = use_auth();
    let app_name = app_config().app_name;

    let logout = move |_| {
        spawn_local(async move {
            do_logout(auth_state).await;
        });
    };

    view! {
        <div class="top-header">
            <div class="top-header__brand">
                <span class="top-header__title">{app_name}</span>
                <nav class="top-header__nav">
                    <a href="/contas-pagar" class="top-header__link">"Contas a pagar"</a>
                </nav>
            </div>

            <div class="top-header__actions">
                <div class="top-header__user">
                    {icon("user")}
                    <span>
                        {move || auth_state.get().user_info
                            .map(|u| u.display_name())
                            .unwrap_or_else(|| "Visitante".to_string())}
                    </span>
                </div>

                <button class="top-header__icon-btn" on:click=logout title="Sair">
                    {icon("logout")}
                </button>
            </div>
        </div>
    }
}
