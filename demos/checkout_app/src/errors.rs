// demos/checkout_app/src/errors.rs

use ornament_pricing::PricingError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
  #[error("Validation Error: {0}")]
  Validation(String),

  #[error(transparent)]
  Pricing(#[from] PricingError),

  #[error("Order Submission Failed: {0}")]
  Gateway(String),

  #[error("Configuration Error: {0}")]
  Config(String),

  #[error("Serialization Error: {0}")]
  Serialization(#[from] serde_json::Error),

  #[error("Internal Error: {0}")]
  Internal(String),
}

impl AppError {
  /// Text for the checkout screen. Pricing and validation messages are shown as-is;
  /// anything else collapses to a generic retry hint.
  pub fn user_message(&self) -> String {
    match self {
      AppError::Pricing(e) => e.to_string(),
      AppError::Validation(m) => m.clone(),
      AppError::Gateway(_) => "We could not place your order. Please try again.".to_string(),
      _ => "Something went wrong. Please try again later.".to_string(),
    }
  }
}

// Handlers written against anyhow still land in AppError.
impl From<anyhow::Error> for AppError {
  fn from(err: anyhow::Error) -> Self {
    match err.downcast::<PricingError>() {
      Ok(pricing_err) => AppError::Pricing(pricing_err),
      Err(err) => AppError::Internal(err.to_string()),
    }
  }
}

pub type Result<T, E = AppError> = std::result::Result<T, E>;
