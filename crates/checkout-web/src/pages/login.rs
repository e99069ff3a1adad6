//! Login Page
//!
//! Stores whatever token is entered; the checkout only checks presence.

use leptos::prelude::*;
use leptos_router::hooks::use_navigate;

use crate::session::BrowserSession;

#[component]
pub fn LoginPage() -> impl IntoView {
    let navigate = use_navigate();
    let (token, set_token) = signal(String::new());
    let (error, set_error) = signal(None::<&'static str>);

    let sign_in = move |_| {
        let value = token.get();
        if value.trim().is_empty() {
            set_error.set(Some("Enter an access token"));
            return;
        }
        if BrowserSession::sign_in(value.trim()) {
            navigate("/", Default::default());
        } else {
            set_error.set(Some("Browser storage is unavailable"));
        }
    };

    view! {
        <div class="login">
            <h1>"Sign in"</h1>
            <div class="field">
                <label>"Access Token"</label>
                <input
                    type="password"
                    prop:value=move || token.get()
                    on:input=move |ev| set_token.set(event_target_value(&ev))
                />
            </div>
            <Show when=move || error.get().is_some()>
                <p class="error">{move || error.get().unwrap_or_default()}</p>
            </Show>
            <button class="btn btn-primary" on:click=sign_in>"Sign in"</button>
        </div>
    }
}
