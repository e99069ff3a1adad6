//! Plan Catalog Model
//!
//! Subscription plans as served by the catalog endpoint, plus the billing
//! cycle selected on the checkout page.

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};

/// Currency symbol prefixed to every displayed price
pub const CURRENCY_SYMBOL: &str = "£";

/// A subscription plan from the catalog
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Plan {
    /// Unique within the catalog
    pub id: i64,

    /// Display name
    pub name: String,

    /// Monthly price
    #[serde(
        default,
        with = "rust_decimal::serde::float_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub price_monthly: Option<Decimal>,

    /// Yearly price
    #[serde(
        default,
        with = "rust_decimal::serde::float_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub price_yearly: Option<Decimal>,

    /// Ordered feature list
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub features: Option<Vec<String>>,
}

impl Plan {
    pub fn new(id: i64, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            price_monthly: None,
            price_yearly: None,
            features: None,
        }
    }

    pub fn with_prices(mut self, monthly: Decimal, yearly: Decimal) -> Self {
        self.price_monthly = Some(monthly);
        self.price_yearly = Some(yearly);
        self
    }

    pub fn with_features<I, S>(mut self, features: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.features = Some(features.into_iter().map(Into::into).collect());
        self
    }

    /// Price for the given billing cycle
    pub fn price_for(&self, billing: BillingCycle) -> Option<Decimal> {
        match billing {
            BillingCycle::Monthly => self.price_monthly,
            BillingCycle::Yearly => self.price_yearly,
        }
    }

    /// Formatted price, e.g. `£100/yr`
    pub fn price_label(&self, billing: BillingCycle) -> String {
        match self.price_for(billing) {
            Some(price) => format!(
                "{}{}/{}",
                CURRENCY_SYMBOL,
                price.normalize(),
                billing.unit_suffix()
            ),
            None => "Price unavailable".into(),
        }
    }

    /// Features to render; `None` when the section should be omitted
    pub fn visible_features(&self) -> Option<&[String]> {
        self.features.as_deref().filter(|f| !f.is_empty())
    }
}

/// Billing cycle selected through the `billing` query parameter
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BillingCycle {
    #[default]
    Monthly,
    Yearly,
}

impl BillingCycle {
    /// Parse the query value. Only an exact `yearly` selects yearly billing.
    pub fn from_query(value: Option<&str>) -> Self {
        match value {
            Some("yearly") => BillingCycle::Yearly,
            _ => BillingCycle::Monthly,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            BillingCycle::Monthly => "monthly",
            BillingCycle::Yearly => "yearly",
        }
    }

    /// Human-readable duration, e.g. `1 Year`
    pub fn duration_label(&self) -> &'static str {
        match self {
            BillingCycle::Monthly => "1 Month",
            BillingCycle::Yearly => "1 Year",
        }
    }

    fn unit_suffix(self) -> &'static str {
        match self {
            BillingCycle::Monthly => "mo",
            BillingCycle::Yearly => "yr",
        }
    }
}

impl std::fmt::Display for BillingCycle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Numeric value of a `planId` query parameter.
///
/// Accepts integers and integral decimals (`"3.0"`). Everything else yields
/// `None`, which never matches a catalog entry.
pub fn parse_plan_id(raw: &str) -> Option<i64> {
    let trimmed = raw.trim();
    if let Ok(id) = trimmed.parse::<i64>() {
        return Some(id);
    }
    let decimal: Decimal = trimmed.parse().ok()?;
    if decimal.fract().is_zero() {
        decimal.to_i64()
    } else {
        None
    }
}

/// Linear scan of the catalog; first match wins
pub fn find_plan(catalog: &[Plan], plan_id: &str) -> Option<Plan> {
    let id = parse_plan_id(plan_id)?;
    catalog.iter().find(|plan| plan.id == id).cloned()
}
