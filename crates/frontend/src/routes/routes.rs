use crate::domain::a001_payable::ui::list::PayableList;
use crate::layout::Shell;
use crate::system::auth::guard::RequireAuth;
use crate::system::pages::login::LoginPage;
use leptos::prelude::*;
use leptos_router::components::{Redirect, Route, Router, Routes};
use leptos_router::path;

#[component]
fn PayablesPage() -> impl IntoView {
    view! {
        <RequireAuth>
            <Shell>
                <PayableList />
            </Shell>
        </RequireAuth>
    }
}

#[component]
pub fn AppRoutes() -> impl IntoView {
    view! {
        <Router>
            <Routes fallback=|| view! { <Redirect path="/contas-pagar" /> }>
                <Route path=path!("/login") view=LoginPage />
                <Route path=path!("/contas-pagar") view=PayablesPage />
                <Route path=path!("/") view=|| view! { <Redirect path="/contas-pagar" /> } />
            </Routes>
        </Router>
    }
}
