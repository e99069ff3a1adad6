//! Checkout Error Types

use thiserror::Error;

use crate::view::LoadFailure;

/// Result type alias
pub type Result<T> = std::result::Result<T, CheckoutError>;

/// Checkout-related errors
#[derive(Error, Debug)]
pub enum CheckoutError {
    /// `planId` query parameter absent or empty
    #[error("Missing plan identifier")]
    MissingParameter,

    /// No catalog entry matches the requested identifier
    #[error("Plan not found: {0}")]
    PlanNotFound(String),

    /// Catalog endpoint answered but the response was unusable
    #[error("Catalog fetch failed: {0}")]
    FetchFailure(String),

    /// Transport-level failure talking to the catalog endpoint
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// One or more card fields left empty
    #[error("Card details incomplete")]
    IncompleteCardForm,

    /// Action not allowed in the current phase
    #[error("Cannot {action} while {phase}")]
    InvalidTransition {
        action: &'static str,
        phase: &'static str,
    },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl CheckoutError {
    /// Terminal failure this error puts the view into, if any
    pub fn failure(&self) -> Option<LoadFailure> {
        match self {
            CheckoutError::MissingParameter => Some(LoadFailure::InvalidPlan),
            CheckoutError::PlanNotFound(_) => Some(LoadFailure::PlanNotFound),
            CheckoutError::FetchFailure(_) | CheckoutError::Network(_) => {
                Some(LoadFailure::LoadFailed)
            }
            _ => None,
        }
    }

    /// Get user-friendly message
    pub fn user_message(&self) -> &str {
        match self {
            CheckoutError::IncompleteCardForm => "Please fill in all card details (demo)",
            CheckoutError::InvalidTransition { .. } => "That action is not available right now.",
            CheckoutError::Config(_) => "Service configuration error.",
            other => other
                .failure()
                .map_or("An error occurred processing your request.", LoadFailure::message),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_errors_map_to_static_messages() {
        assert_eq!(
            CheckoutError::MissingParameter.user_message(),
            "Invalid plan selected"
        );
        assert_eq!(
            CheckoutError::PlanNotFound("7".into()).user_message(),
            "Plan not found"
        );
        assert_eq!(
            CheckoutError::FetchFailure("HTTP 502".into()).user_message(),
            "Failed to load plan"
        );
    }

    #[test]
    fn test_card_form_error_is_not_terminal() {
        assert!(CheckoutError::IncompleteCardForm.failure().is_none());
    }
}
