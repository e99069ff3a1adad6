//! Pricing Page
//!
//! Lists the live catalog and links each plan to the checkout page.

use checkout_core::{BillingCycle, Plan};
use leptos::prelude::*;

use crate::api;
use crate::components::PlanCard;

/// Checkout link for a plan and billing cycle
pub fn checkout_href(plan: &Plan, billing: BillingCycle) -> String {
    format!("/payment?planId={}&billing={}", plan.id, billing)
}

#[component]
pub fn PricingPage() -> impl IntoView {
    let (billing, set_billing) = signal(BillingCycle::Monthly);
    let catalog = RwSignal::new(None::<Result<Vec<Plan>, String>>);

    Effect::new(move |_| {
        leptos::task::spawn_local(async move {
            catalog.set(Some(api::fetch_catalog().await));
        });
    });

    let plans = move || {
        let billing = billing.get();
        catalog.with(|catalog| match catalog {
            None => view! { <div class="loading">"Loading plans..."</div> }.into_any(),
            Some(Err(message)) => view! { <p class="error">{message.clone()}</p> }.into_any(),
            Some(Ok(plans)) => plans
                .iter()
                .map(|plan| {
                    let href = checkout_href(plan, billing);
                    view! {
                        <PlanCard plan=plan.clone() billing=billing>
                            <a href=href class="btn btn-primary">"Choose"</a>
                        </PlanCard>
                    }
                })
                .collect_view()
                .into_any(),
        })
    };

    view! {
        <div class="pricing">
            <h1>"Pricing"</h1>
            <div class="billing-toggle">
                <button
                    class:active=move || billing.get() == BillingCycle::Monthly
                    on:click=move |_| set_billing.set(BillingCycle::Monthly)
                >
                    "Monthly"
                </button>
                <button
                    class:active=move || billing.get() == BillingCycle::Yearly
                    on:click=move |_| set_billing.set(BillingCycle::Yearly)
                >
                    "Yearly"
                </button>
            </div>
            <div class="plans">{plans}</div>
        </div>
    }
}
