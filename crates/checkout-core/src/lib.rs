//! # checkout-core
//!
//! Plan lookup, session guard and the demo payment flow behind the
//! plan-checkout page.
//!
//! ## Flow
//!
//! ```text
//! ┌──────────────┐  token   ┌──────────────┐  GET catalog  ┌──────────────────┐
//! │ SessionGuard │────────▶ │ PaymentView  │─────────────▶ │  PlanDirectory   │
//! │ (authToken)  │          │   (phases)   │◀───────────── │ (HTTP / static)  │
//! └──────────────┘          └──────────────┘   Vec<Plan>   └──────────────────┘
//!        │ no token
//!        ▼
//!     /login
//! ```
//!
//! The card gateway is a demo: fields are checked for presence only and no
//! transaction is created.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use checkout_core::{
//!     CardDetails, CheckoutConfig, CheckoutQuery, HttpPlanDirectory, MemorySessionStore,
//!     PaymentView,
//! };
//!
//! let config = CheckoutConfig::from_lookup(|key| std::env::var(key).ok())?;
//! let directory = HttpPlanDirectory::new(&config);
//! let session = MemorySessionStore::with_token("token");
//! let mut view = PaymentView::new(CheckoutQuery::new(Some("3"), Some("yearly")));
//!
//! view.mount(&session, &directory).await;
//! view.start_payment()?;
//! view.complete_payment(&CardDetails::new("4242 4242 4242 4242", "12/30", "123"))?;
//! ```

pub mod config;
pub mod directory;
pub mod error;
pub mod lifetime;
pub mod plan;
pub mod session;
pub mod view;

pub use config::CheckoutConfig;
pub use directory::{HttpPlanDirectory, PlanDirectory, StaticPlanDirectory};
pub use error::{CheckoutError, Result};
pub use lifetime::{Canceller, ViewLifetime};
pub use plan::{BillingCycle, Plan, find_plan, parse_plan_id};
pub use session::{
    AUTH_TOKEN_KEY, LOGIN_ROUTE, MemorySessionStore, SessionGuard, SessionOutcome, SessionStore,
};
pub use view::{
    CardDetails, CheckoutPhase, CheckoutQuery, LoadFailure, MountStep, PaymentView, resolve_plan,
};
