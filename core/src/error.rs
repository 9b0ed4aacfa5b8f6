// ornament_pricing/src/error.rs
use anyhow::Error as AnyhowError;
use chrono::NaiveDate;
use thiserror::Error;

/// Faults raised by the step pipeline itself rather than by a step's handler.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PipelineError {
  #[error("Handler missing for non-optional step: {step_name}")]
  HandlerMissing { step_name: String },
}

/// Which of the assembler's required selections was absent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MissingSelection {
  Buyer,
  LineItems,
  Shipping,
  Payment,
}

#[derive(Debug, Error)]
pub enum PricingError {
  #[error("Invalid checkout input: {reason}")]
  InvalidInputKind { reason: String },

  #[error("Unknown shipping method '{token}'. Please select a valid option.")]
  UnknownShippingMethod { token: String },

  #[error("Unknown payment method '{token}'. Please select a valid option.")]
  UnknownPaymentMethod { token: String },

  #[error("Order amount too large to price: {what}")]
  AmountOverflow { what: String },

  #[error("Rental end date {end} precedes start date {start}")]
  InvalidDateRange { start: NaiveDate, end: NaiveDate },

  // The checkout screen shows this text verbatim, whichever selection is missing.
  #[error("Please select payment and shipping methods.")]
  MissingRequiredSelection { missing: MissingSelection },

  #[error(transparent)]
  Pipeline(#[from] PipelineError),

  #[error("Checkout hook failed: {source}")]
  Hook {
    #[source]
    source: AnyhowError,
  },

  #[error("Order assembly halted at step '{step}'")]
  Halted { step: String },
}

impl PricingError {
  pub(crate) fn invalid_input(reason: impl Into<String>) -> Self {
    PricingError::InvalidInputKind { reason: reason.into() }
  }

  pub(crate) fn overflow(what: impl Into<String>) -> Self {
    PricingError::AmountOverflow { what: what.into() }
  }
}

// Hooks registered by callers usually return anyhow::Result.
impl From<AnyhowError> for PricingError {
  fn from(err: AnyhowError) -> Self {
    match err.downcast::<PricingError>() {
      Ok(pricing_err) => pricing_err,
      Err(err) => PricingError::Hook { source: err },
    }
  }
}

pub type PricingResult<T, E = PricingError> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn missing_selection_message_is_user_facing() {
    let err = PricingError::MissingRequiredSelection {
      missing: MissingSelection::Payment,
    };
    assert_eq!(err.to_string(), "Please select payment and shipping methods.");
  }

  #[test]
  fn anyhow_wrapping_a_pricing_error_is_unwrapped() {
    let wrapped = anyhow::Error::new(PricingError::UnknownPaymentMethod { token: "card".into() });
    match PricingError::from(wrapped) {
      PricingError::UnknownPaymentMethod { token } => assert_eq!(token, "card"),
      other => panic!("Expected UnknownPaymentMethod, got {:?}", other),
    }
  }

  #[test]
  fn foreign_anyhow_error_becomes_hook_error() {
    let err = PricingError::from(anyhow::anyhow!("audit log unavailable"));
    assert!(matches!(err, PricingError::Hook { .. }));
    assert_eq!(err.to_string(), "Checkout hook failed: audit log unavailable");
  }
}
