//! Root application component with routing and context providers.

use leptos::prelude::*;
use leptos_meta::{Title, provide_meta_context};
use leptos_router::{
    StaticSegment,
    components::{Route, Router, Routes},
};

use crate::config::{AuthConfig, SearchConfig};
use crate::pages::{
    competitors::CompetitorsPage, dashboard::DashboardPage, login::LoginPage, plan::PlanPage,
    pricing::PricingPage, register::RegisterPage, settings::SettingsPage,
};
use crate::services::auth::AuthService;
use crate::services::session::SessionStore;
use crate::services::usage::UsageLedger;
use crate::services::users::LocalUserRepository;
use crate::state::auth::AuthState;

/// Account service wired into the running app.
pub type AppAuthService = AuthService<LocalUserRepository>;

/// Root application component.
///
/// Provides all shared state contexts, restores the stored session once and
/// sets up client-side routing.
#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    let auth_config = AuthConfig::from_env();
    let auth = RwSignal::new(AuthState::default());

    provide_context(auth);
    provide_context(AuthService::new(LocalUserRepository::browser(), auth_config.clone()));
    provide_context(auth_config);
    provide_context(SearchConfig::from_env());
    provide_context(UsageLedger::browser());

    Effect::new(move || {
        auth.update(|state| state.initialize(&SessionStore::browser()));
    });

    view! {
        <Title text="セラーナビ"/>

        <Router>
            <Routes fallback=|| "ページが見つかりません".into_view()>
                <Route path=StaticSegment("") view=PricingPage/>
                <Route path=StaticSegment("pricing") view=PricingPage/>
                <Route path=StaticSegment("login") view=LoginPage/>
                <Route path=StaticSegment("register") view=RegisterPage/>
                <Route path=StaticSegment("dashboard") view=DashboardPage/>
                <Route path=StaticSegment("competitors") view=CompetitorsPage/>
                <Route path=(StaticSegment("account"), StaticSegment("plan")) view=PlanPage/>
                <Route path=(StaticSegment("account"), StaticSegment("settings")) view=SettingsPage/>
            </Routes>
        </Router>
    }
}
