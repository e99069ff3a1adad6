//! Payment View
//!
//! The checkout flow as an explicit phase machine:
//!
//! ```text
//!            ┌──────────┐  match   ┌────────────┐  start   ┌───────────┐  complete  ┌─────────┐
//!  mount ──▶ │ Loading  │────────▶ │ PlanReview │────────▶ │ CardEntry │──────────▶ │ Success │
//!            └──────────┘          └────────────┘          └───────────┘            └─────────┘
//!                 │ missing id / fetch failed / no match         │  ▲
//!                 ▼                                              └──┘ incomplete card form
//!            ┌──────────┐
//!            │  Error   │
//!            └──────────┘
//! ```
//!
//! `Error` and `Success` are absorbing. Card fields are only checked for
//! presence; no payment is ever created.

use serde::{Deserialize, Serialize};

use crate::directory::PlanDirectory;
use crate::error::{CheckoutError, Result};
use crate::plan::{BillingCycle, Plan, find_plan};
use crate::session::{SessionGuard, SessionOutcome, SessionStore};

/// Query parameters the checkout page is opened with
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckoutQuery {
    /// Raw `planId` value; `None` when absent or empty
    pub plan_id: Option<String>,

    /// Selected billing cycle
    pub billing: BillingCycle,
}

impl CheckoutQuery {
    pub fn new(plan_id: Option<&str>, billing: Option<&str>) -> Self {
        Self {
            plan_id: plan_id.filter(|id| !id.is_empty()).map(str::to_string),
            billing: BillingCycle::from_query(billing),
        }
    }

    /// Build from decoded query pairs; the first occurrence of a key wins
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut plan_id = None;
        let mut billing = None;
        for (key, value) in pairs {
            match key.as_ref() {
                "planId" if plan_id.is_none() => plan_id = Some(value.as_ref().to_string()),
                "billing" if billing.is_none() => billing = Some(value.as_ref().to_string()),
                _ => {}
            }
        }
        Self::new(plan_id.as_deref(), billing.as_deref())
    }
}

/// Terminal load failure shown as a static message
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum LoadFailure {
    InvalidPlan,
    LoadFailed,
    PlanNotFound,
}

impl LoadFailure {
    pub fn message(self) -> &'static str {
        match self {
            LoadFailure::InvalidPlan => "Invalid plan selected",
            LoadFailure::LoadFailed => "Failed to load plan",
            LoadFailure::PlanNotFound => "Plan not found",
        }
    }
}

impl std::fmt::Display for LoadFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.message())
    }
}

/// Card fields entered in the demo gateway. Held in memory only.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct CardDetails {
    pub card_number: String,
    pub expiry: String,
    pub cvc: String,
}

impl CardDetails {
    pub fn new(
        card_number: impl Into<String>,
        expiry: impl Into<String>,
        cvc: impl Into<String>,
    ) -> Self {
        Self {
            card_number: card_number.into(),
            expiry: expiry.into(),
            cvc: cvc.into(),
        }
    }

    /// Presence check only; content is never inspected
    pub fn is_complete(&self) -> bool {
        !self.card_number.is_empty() && !self.expiry.is_empty() && !self.cvc.is_empty()
    }
}

impl std::fmt::Debug for CardDetails {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CardDetails")
            .field("card_number", &"<redacted>")
            .field("expiry", &"<redacted>")
            .field("cvc", &"<redacted>")
            .finish()
    }
}

/// Current phase of the checkout flow
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CheckoutPhase {
    Loading,
    Error(LoadFailure),
    PlanReview(Plan),
    CardEntry(Plan),
    Success(Plan),
}

impl CheckoutPhase {
    pub fn name(&self) -> &'static str {
        match self {
            CheckoutPhase::Loading => "loading",
            CheckoutPhase::Error(_) => "error",
            CheckoutPhase::PlanReview(_) => "plan review",
            CheckoutPhase::CardEntry(_) => "card entry",
            CheckoutPhase::Success(_) => "success",
        }
    }

    /// Plan on display, if any
    pub fn plan(&self) -> Option<&Plan> {
        match self {
            CheckoutPhase::PlanReview(plan)
            | CheckoutPhase::CardEntry(plan)
            | CheckoutPhase::Success(plan) => Some(plan),
            CheckoutPhase::Loading | CheckoutPhase::Error(_) => None,
        }
    }

    /// No transition leaves this phase
    pub fn is_terminal(&self) -> bool {
        matches!(self, CheckoutPhase::Error(_) | CheckoutPhase::Success(_))
    }
}

/// What the page has to do after the session check
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MountStep {
    /// Leave for this route; nothing else runs
    Redirect(&'static str),
    /// Fetch the catalog and resolve this `planId`
    Fetch(String),
    /// Nothing left to load
    Done,
}

/// State of one checkout page visit
#[derive(Clone, Debug)]
pub struct PaymentView {
    query: CheckoutQuery,
    phase: CheckoutPhase,
}

impl PaymentView {
    pub fn new(query: CheckoutQuery) -> Self {
        Self {
            query,
            phase: CheckoutPhase::Loading,
        }
    }

    pub fn query(&self) -> &CheckoutQuery {
        &self.query
    }

    pub fn billing(&self) -> BillingCycle {
        self.query.billing
    }

    pub fn phase(&self) -> &CheckoutPhase {
        &self.phase
    }

    /// Message for the error phase
    pub fn error_message(&self) -> Option<&'static str> {
        match self.phase {
            CheckoutPhase::Error(failure) => Some(failure.message()),
            _ => None,
        }
    }

    /// Price of the displayed plan for the selected billing cycle
    pub fn price_label(&self) -> Option<String> {
        self.phase.plan().map(|plan| plan.price_label(self.billing()))
    }

    pub fn duration_label(&self) -> &'static str {
        self.billing().duration_label()
    }

    /// Confirmation text for the success phase
    pub fn success_message(&self) -> Option<String> {
        match &self.phase {
            CheckoutPhase::Success(plan) => Some(format!(
                "You are now subscribed to {} for {}.",
                plan.name,
                self.duration_label()
            )),
            _ => None,
        }
    }

    /// First half of mounting: run the session guard and decide what to load.
    ///
    /// A redirect leaves the view loading and asks for no work. A missing
    /// `planId` fails right here without a fetch.
    pub fn begin_mount<S: SessionStore + ?Sized>(&mut self, store: &S) -> MountStep {
        if let Some(target) = SessionGuard::resolve(store).redirect_target() {
            return MountStep::Redirect(target);
        }
        match self.query.plan_id.clone() {
            Some(plan_id) => MountStep::Fetch(plan_id),
            None => {
                self.finish_loading(Err(CheckoutError::MissingParameter));
                MountStep::Done
            }
        }
    }

    /// Mount the view: session check, then the plan load if allowed.
    pub async fn mount<S, D>(&mut self, store: &S, directory: &D) -> SessionOutcome
    where
        S: SessionStore + ?Sized,
        D: PlanDirectory + ?Sized,
    {
        match self.begin_mount(store) {
            MountStep::Redirect(_) => SessionOutcome::RedirectToLogin,
            MountStep::Done => SessionOutcome::Authenticated,
            MountStep::Fetch(plan_id) => {
                let outcome = resolve_plan(directory, &plan_id).await;
                self.finish_loading(outcome);
                SessionOutcome::Authenticated
            }
        }
    }

    /// Load the requested plan from `directory`.
    ///
    /// A missing `planId` fails without touching the directory. Failures are
    /// terminal; nothing is retried.
    pub async fn load_plan<D: PlanDirectory + ?Sized>(&mut self, directory: &D) {
        let outcome = match self.query.plan_id.clone() {
            Some(plan_id) => resolve_plan(directory, &plan_id).await,
            None => Err(CheckoutError::MissingParameter),
        };
        self.finish_loading(outcome);
    }

    /// Apply the outcome of a plan lookup started elsewhere.
    ///
    /// Ignored unless the view is still loading.
    pub fn finish_loading(&mut self, outcome: Result<Plan>) {
        if self.phase != CheckoutPhase::Loading {
            tracing::debug!(phase = self.phase.name(), "Ignoring late plan load result");
            return;
        }

        self.phase = match outcome {
            Ok(plan) => {
                tracing::info!(
                    plan_id = plan.id,
                    plan = %plan.name,
                    billing = %self.billing(),
                    "Plan loaded"
                );
                CheckoutPhase::PlanReview(plan)
            }
            Err(e) => {
                let failure = e.failure().unwrap_or(LoadFailure::LoadFailed);
                match failure {
                    LoadFailure::LoadFailed => tracing::warn!(error = %e, "Failed to load plan"),
                    _ => tracing::info!(error = %e, "Plan unavailable"),
                }
                CheckoutPhase::Error(failure)
            }
        };
    }

    /// Open the demo card gateway
    pub fn start_payment(&mut self) -> Result<()> {
        match std::mem::replace(&mut self.phase, CheckoutPhase::Loading) {
            CheckoutPhase::PlanReview(plan) => {
                tracing::debug!(plan_id = plan.id, "Opening card entry");
                self.phase = CheckoutPhase::CardEntry(plan);
                Ok(())
            }
            other => {
                let phase = other.name();
                self.phase = other;
                Err(CheckoutError::InvalidTransition {
                    action: "start payment",
                    phase,
                })
            }
        }
    }

    /// Finish the demo payment.
    ///
    /// Any empty field rejects the attempt and leaves the view in card entry.
    pub fn complete_payment(&mut self, card: &CardDetails) -> Result<()> {
        if !matches!(self.phase, CheckoutPhase::CardEntry(_)) {
            return Err(CheckoutError::InvalidTransition {
                action: "complete payment",
                phase: self.phase.name(),
            });
        }
        if !card.is_complete() {
            tracing::debug!("Card form incomplete");
            return Err(CheckoutError::IncompleteCardForm);
        }

        let previous = std::mem::replace(&mut self.phase, CheckoutPhase::Loading);
        if let CheckoutPhase::CardEntry(plan) = previous {
            tracing::info!(
                plan_id = plan.id,
                billing = %self.billing(),
                "Demo payment completed"
            );
            self.phase = CheckoutPhase::Success(plan);
        }
        Ok(())
    }
}

/// Fetch the catalog and pick the plan matching `plan_id`
pub async fn resolve_plan<D>(directory: &D, plan_id: &str) -> Result<Plan>
where
    D: PlanDirectory + ?Sized,
{
    let catalog = directory.fetch_catalog().await?;
    find_plan(&catalog, plan_id)
        .ok_or_else(|| CheckoutError::PlanNotFound(plan_id.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::directory::StaticPlanDirectory;
    use crate::lifetime::ViewLifetime;
    use crate::session::MemorySessionStore;
    use rust_decimal_macros::dec;

    fn pro_catalog() -> StaticPlanDirectory {
        StaticPlanDirectory::new(vec![
            Plan::new(3, "Pro")
                .with_prices(dec!(10), dec!(100))
                .with_features(["A", "B"]),
        ])
    }

    async fn loaded(plan_id: Option<&str>, billing: Option<&str>) -> PaymentView {
        let mut view = PaymentView::new(CheckoutQuery::new(plan_id, billing));
        view.load_plan(&pro_catalog()).await;
        view
    }

    async fn at_card_entry() -> PaymentView {
        let mut view = loaded(Some("3"), None).await;
        view.start_payment().unwrap();
        view
    }

    #[test]
    fn test_query_from_pairs() {
        let query = CheckoutQuery::from_pairs([("billing", "yearly"), ("planId", "3")]);
        assert_eq!(query.plan_id.as_deref(), Some("3"));
        assert_eq!(query.billing, BillingCycle::Yearly);

        let query = CheckoutQuery::from_pairs([("planId", ""), ("billing", "weekly")]);
        assert!(query.plan_id.is_none());
        assert_eq!(query.billing, BillingCycle::Monthly);
    }

    #[tokio::test]
    async fn test_mount_without_session_does_no_further_work() {
        let directory = StaticPlanDirectory::demo();
        let mut view = PaymentView::new(CheckoutQuery::new(Some("3"), Some("yearly")));

        let outcome = view.mount(&MemorySessionStore::new(), &directory).await;

        assert_eq!(outcome, SessionOutcome::RedirectToLogin);
        assert_eq!(directory.fetch_count(), 0);
        assert_eq!(view.phase(), &CheckoutPhase::Loading);
    }

    #[tokio::test]
    async fn test_mount_with_session_loads_plan() {
        let directory = StaticPlanDirectory::demo();
        let store = MemorySessionStore::with_token("abc");
        let mut view = PaymentView::new(CheckoutQuery::new(Some("3"), Some("yearly")));

        let outcome = view.mount(&store, &directory).await;

        assert_eq!(outcome, SessionOutcome::Authenticated);
        assert_eq!(directory.fetch_count(), 1);
        assert!(matches!(view.phase(), CheckoutPhase::PlanReview(_)));
        assert_eq!(view.price_label().as_deref(), Some("£100/yr"));
    }

    #[test]
    fn test_begin_mount_steps() {
        let mut redirected = PaymentView::new(CheckoutQuery::new(None, None));
        assert_eq!(
            redirected.begin_mount(&MemorySessionStore::new()),
            MountStep::Redirect("/login")
        );
        assert_eq!(redirected.phase(), &CheckoutPhase::Loading);

        let store = MemorySessionStore::with_token("abc");
        let mut missing = PaymentView::new(CheckoutQuery::new(None, None));
        assert_eq!(missing.begin_mount(&store), MountStep::Done);
        assert_eq!(missing.error_message(), Some("Invalid plan selected"));

        let mut ready = PaymentView::new(CheckoutQuery::new(Some("7"), None));
        assert_eq!(ready.begin_mount(&store), MountStep::Fetch("7".into()));
    }

    #[tokio::test]
    async fn test_missing_plan_id_never_fetches() {
        let directory = pro_catalog();
        let mut view = PaymentView::new(CheckoutQuery::new(None, None));
        view.load_plan(&directory).await;

        assert_eq!(view.phase(), &CheckoutPhase::Error(LoadFailure::InvalidPlan));
        assert_eq!(view.error_message(), Some("Invalid plan selected"));
        assert_eq!(directory.fetch_count(), 0);
    }

    #[tokio::test]
    async fn test_fetch_failure() {
        let mut view = PaymentView::new(CheckoutQuery::new(Some("3"), None));
        view.load_plan(&StaticPlanDirectory::failing("HTTP 500")).await;
        assert_eq!(view.error_message(), Some("Failed to load plan"));
    }

    #[tokio::test]
    async fn test_unknown_plan() {
        let view = loaded(Some("4"), None).await;
        assert_eq!(view.error_message(), Some("Plan not found"));
    }

    #[tokio::test]
    async fn test_non_numeric_plan_id_is_not_found() {
        let view = loaded(Some("abc"), None).await;
        assert_eq!(view.error_message(), Some("Plan not found"));
    }

    #[tokio::test]
    async fn test_yearly_plan_review() {
        let view = loaded(Some("3"), Some("yearly")).await;

        let plan = view.phase().plan().unwrap();
        assert!(matches!(view.phase(), CheckoutPhase::PlanReview(_)));
        assert_eq!(plan.name, "Pro");
        assert_eq!(view.price_label().as_deref(), Some("£100/yr"));
        assert_eq!(view.duration_label(), "1 Year");
        assert_eq!(plan.visible_features().map(<[String]>::len), Some(2));
    }

    #[tokio::test]
    async fn test_monthly_is_default_billing() {
        let view = loaded(Some("3"), Some("fortnightly")).await;
        assert_eq!(view.price_label().as_deref(), Some("£10/mo"));
        assert_eq!(view.duration_label(), "1 Month");
    }

    #[tokio::test]
    async fn test_incomplete_card_form_is_rejected() {
        let mut view = at_card_entry().await;
        let partial = [
            CardDetails::new("", "12/30", "123"),
            CardDetails::new("4242424242424242", "", "123"),
            CardDetails::new("4242424242424242", "12/30", ""),
            CardDetails::default(),
        ];

        for card in &partial {
            let err = view.complete_payment(card).unwrap_err();
            assert!(matches!(err, CheckoutError::IncompleteCardForm));
            assert!(matches!(view.phase(), CheckoutPhase::CardEntry(_)));
        }
    }

    #[tokio::test]
    async fn test_any_non_empty_card_succeeds() {
        let mut view = at_card_entry().await;
        view.complete_payment(&CardDetails::new("not a card", "whenever", "x"))
            .unwrap();

        assert!(matches!(view.phase(), CheckoutPhase::Success(_)));
        assert_eq!(
            view.success_message().as_deref(),
            Some("You are now subscribed to Pro for 1 Month.")
        );
    }

    #[tokio::test]
    async fn test_out_of_order_actions_are_rejected() {
        let mut view = PaymentView::new(CheckoutQuery::new(Some("3"), None));
        assert!(view.start_payment().is_err());
        assert_eq!(view.phase(), &CheckoutPhase::Loading);

        let card = CardDetails::new("1", "2", "3");
        let mut review = loaded(Some("3"), None).await;
        assert!(review.complete_payment(&card).is_err());
        assert!(matches!(review.phase(), CheckoutPhase::PlanReview(_)));
    }

    #[tokio::test]
    async fn test_terminal_phases_absorb() {
        let mut failed = loaded(Some("99"), None).await;
        assert!(failed.phase().is_terminal());
        assert!(failed.start_payment().is_err());
        failed.finish_loading(Ok(Plan::new(99, "Late")));
        assert_eq!(failed.error_message(), Some("Plan not found"));

        let mut done = at_card_entry().await;
        done.complete_payment(&CardDetails::new("1", "2", "3")).unwrap();
        assert!(done.start_payment().is_err());
        assert!(done.complete_payment(&CardDetails::new("1", "2", "3")).is_err());
        assert!(matches!(done.phase(), CheckoutPhase::Success(_)));
    }

    #[tokio::test]
    async fn test_cancelled_load_leaves_view_untouched() {
        let directory = pro_catalog();
        let mut view = PaymentView::new(CheckoutQuery::new(Some("3"), None));
        let mut lifetime = ViewLifetime::new();

        let load = lifetime.bind(resolve_plan(&directory, "3"));
        lifetime.cancel();

        if let Some(outcome) = load.await {
            view.finish_loading(outcome);
        }
        assert_eq!(view.phase(), &CheckoutPhase::Loading);
    }

    #[test]
    fn test_card_details_debug_is_redacted() {
        let card = CardDetails::new("4242424242424242", "12/30", "123");
        let rendered = format!("{card:?}");
        assert!(!rendered.contains("4242"));
        assert!(!rendered.contains("123"));
    }
}
