// ornament_pricing/src/models/shipping.rs

use crate::error::PricingError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Delivery method chosen at checkout. Each maps to a fixed fee in `PricingConfig`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ShippingMethod {
  InsideTheValley,
  OutsideTheValley,
  InStorePickup,
}

impl ShippingMethod {
  pub const ALL: [ShippingMethod; 3] = [
    ShippingMethod::InsideTheValley,
    ShippingMethod::OutsideTheValley,
    ShippingMethod::InStorePickup,
  ];

  pub fn token(&self) -> &'static str {
    match self {
      ShippingMethod::InsideTheValley => "INSIDE_THE_VALLEY",
      ShippingMethod::OutsideTheValley => "OUTSIDE_THE_VALLEY",
      ShippingMethod::InStorePickup => "IN_STORE_PICKUP",
    }
  }

  /// Text shown next to the radio button.
  pub fn label(&self) -> String {
    self.token().replace('_', " ")
  }
}

impl FromStr for ShippingMethod {
  type Err = PricingError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    Self::ALL
      .into_iter()
      .find(|m| m.token() == s)
      .ok_or_else(|| PricingError::UnknownShippingMethod { token: s.to_string() })
  }
}

impl fmt::Display for ShippingMethod {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.token())
  }
}
