//! Main App Component

use leptos::prelude::*;
use leptos_router::{components::*, path};

use crate::pages::{LoginPage, PaymentPage, PricingPage};

/// Root application component
#[component]
pub fn App() -> impl IntoView {
    view! {
        <Router>
            <main class="app">
                <Routes fallback=|| view! { <p>"Page not found"</p> }>
                    <Route path=path!("/") view=PricingPage />
                    <Route path=path!("/login") view=LoginPage />
                    <Route path=path!("/payment") view=PaymentPage />
                </Routes>
            </main>
        </Router>
    }
}
