//! UI Components

use checkout_core::{BillingCycle, Plan};
use leptos::prelude::*;

/// Plan summary card: name, duration, price and features
#[component]
pub fn PlanCard(plan: Plan, billing: BillingCycle, children: Children) -> impl IntoView {
    let price = plan.price_label(billing);
    let features = plan.visible_features().map(<[String]>::to_vec);

    view! {
        <div class="plan-card">
            <h2>{plan.name}</h2>
            <p class="duration">"Duration: "<strong>{billing.duration_label()}</strong></p>
            <p class="price">{price}</p>
            {features.map(|features| view! { <FeatureList features=features /> })}
            {children()}
        </div>
    }
}

/// Feature bullet list; callers omit it when there is nothing to show
#[component]
pub fn FeatureList(features: Vec<String>) -> impl IntoView {
    view! {
        <ul class="features">
            {features
                .into_iter()
                .map(|feature| view! { <li>"✅ " {feature}</li> })
                .collect_view()}
        </ul>
    }
}
