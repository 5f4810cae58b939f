use crate::routes::routes::AppRoutes;
use crate::shared::notifications::{NotificationService, Toaster};
use crate::system::auth::context::AuthProvider;
use leptos::prelude::*;

#[component]
pub fn App() -> impl IntoView {
    // Toasts are raised from hooks, dialogs and the login page alike.
    provide_context(NotificationService::new());

    view! {
        <AuthProvider>
            <AppRoutes />
        </AuthProvider>
        <Toaster />
    }
}
