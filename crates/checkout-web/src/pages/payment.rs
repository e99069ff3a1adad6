//! Payment Page
//!
//! Demo checkout: plan review, card entry, confirmation. Nothing is charged.

use checkout_core::{
    CardDetails, CheckoutPhase, CheckoutQuery, MountStep, PaymentView, ViewLifetime, resolve_plan,
};
use leptos::prelude::*;
use leptos_router::hooks::{use_navigate, use_query_map};

use crate::api;
use crate::components::PlanCard;
use crate::session::BrowserSession;

#[component]
pub fn PaymentPage() -> impl IntoView {
    let navigate = use_navigate();
    let query = use_query_map().get_untracked();
    let plan_id = query.get("planId").map(|v| v.to_string());
    let billing = query.get("billing").map(|v| v.to_string());
    let checkout_query = CheckoutQuery::new(plan_id.as_deref(), billing.as_deref());

    let state = RwSignal::new(PaymentView::new(checkout_query));
    let (card_number, set_card_number) = signal(String::new());
    let (expiry, set_expiry) = signal(String::new());
    let (cvc, set_cvc) = signal(String::new());

    // Session check and plan fetch, once per mount
    Effect::new(move |_| {
        let step = state.try_update(|view| view.begin_mount(&BrowserSession));
        let plan_id = match step {
            Some(MountStep::Fetch(plan_id)) => plan_id,
            Some(MountStep::Redirect(target)) => {
                navigate(target, Default::default());
                return;
            }
            Some(MountStep::Done) | None => return,
        };

        let mut lifetime = ViewLifetime::new();
        let load = lifetime.bind(async move {
            let directory = api::catalog_directory()?;
            resolve_plan(&directory, &plan_id).await
        });
        let canceller = lifetime.canceller();
        on_cleanup(move || canceller.cancel());

        leptos::task::spawn_local(async move {
            if let Some(outcome) = load.await {
                state.update(|view| view.finish_loading(outcome));
            }
            drop(lifetime);
        });
    });

    let start_payment = move |_| {
        if let Err(e) = transition(state, PaymentView::start_payment) {
            notify(e.user_message());
        }
    };

    let complete_payment = move |_| {
        let card = CardDetails::new(card_number.get(), expiry.get(), cvc.get());
        if let Err(e) = transition(state, |view| view.complete_payment(&card)) {
            notify(e.user_message());
        }
    };

    let body = move || {
        state.with(|view| match view.phase() {
            CheckoutPhase::Loading => {
                view! { <div class="loading">"Loading plan..."</div> }.into_any()
            }
            CheckoutPhase::Error(failure) => {
                view! { <p class="error">{failure.message()}</p> }.into_any()
            }
            CheckoutPhase::PlanReview(plan) => view! {
                <PlanCard plan=plan.clone() billing=view.billing()>
                    <button class="btn btn-primary" on:click=start_payment>"Pay Now (Demo)"</button>
                </PlanCard>
            }
            .into_any(),
            CheckoutPhase::CardEntry(_) => view! {
                <div class="gateway">
                    <h2>"💳 Payment Gateway (Demo)"</h2>
                    <input
                        type="text"
                        class="card-number"
                        placeholder="Card Number"
                        prop:value=move || card_number.get()
                        on:input=move |ev| set_card_number.set(event_target_value(&ev))
                    />
                    <input
                        type="text"
                        class="expiry"
                        placeholder="MM/YY"
                        prop:value=move || expiry.get()
                        on:input=move |ev| set_expiry.set(event_target_value(&ev))
                    />
                    <input
                        type="text"
                        class="cvc"
                        placeholder="CVC"
                        prop:value=move || cvc.get()
                        on:input=move |ev| set_cvc.set(event_target_value(&ev))
                    />
                    <button class="btn btn-primary" on:click=complete_payment>
                        "Complete Payment"
                    </button>
                </div>
            }
            .into_any(),
            CheckoutPhase::Success(_) => view! {
                <div class="success">
                    "🎉 Payment Successful!"
                    <br />
                    {view.success_message()}
                </div>
            }
            .into_any(),
        })
    };

    let show_header = move || state.with(|view| view.phase().plan().is_some());

    view! {
        <div class="checkout">
            <Show when=show_header>
                <header class="checkout-header">
                    <h1>"Payment Details"</h1>
                    <p>"Review your plan & complete payment"</p>
                </header>
            </Show>
            <section class="checkout-body">{body}</section>
        </div>
    }
}

/// Apply `action` to a copy of the view and publish it only on success, so
/// rejected actions leave the page untouched.
fn transition<F>(state: RwSignal<PaymentView>, action: F) -> checkout_core::Result<()>
where
    F: FnOnce(&mut PaymentView) -> checkout_core::Result<()>,
{
    let mut next = state.get_untracked();
    action(&mut next)?;
    state.set(next);
    Ok(())
}

/// Blocking notice
fn notify(message: &str) {
    if let Some(window) = web_sys::window() {
        let _ = window.alert_with_message(message);
    }
}
