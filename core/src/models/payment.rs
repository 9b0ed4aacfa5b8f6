// ornament_pricing/src/models/payment.rs

use crate::error::PricingError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// The radio-button token the buyer picked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentOption {
  Cod,
  Esewa,
  Khalti,
}

/// Canonical method name the order service stores.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentMethod {
  CashOnDelivery,
  Esewa,
  Khalti,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentStatus {
  Pending,
  Paid,
}

/// The `payment` block of an order payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedPayment {
  pub method: PaymentMethod,
  pub status: PaymentStatus,
}

impl ResolvedPayment {
  /// Wallet payments are settled before the order is created.
  pub fn is_prepaid(&self) -> bool {
    self.status == PaymentStatus::Paid
  }
}

impl PaymentOption {
  pub fn token(&self) -> &'static str {
    match self {
      PaymentOption::Cod => "cod",
      PaymentOption::Esewa => "esewa",
      PaymentOption::Khalti => "khalti",
    }
  }

  pub fn resolve(&self) -> ResolvedPayment {
    let (method, status) = match self {
      PaymentOption::Cod => (PaymentMethod::CashOnDelivery, PaymentStatus::Pending),
      PaymentOption::Esewa => (PaymentMethod::Esewa, PaymentStatus::Paid),
      PaymentOption::Khalti => (PaymentMethod::Khalti, PaymentStatus::Paid),
    };
    ResolvedPayment { method, status }
  }
}

impl FromStr for PaymentOption {
  type Err = PricingError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s {
      "cod" => Ok(PaymentOption::Cod),
      "esewa" => Ok(PaymentOption::Esewa),
      "khalti" => Ok(PaymentOption::Khalti),
      other => Err(PricingError::UnknownPaymentMethod { token: other.to_string() }),
    }
  }
}
