// ornament_pricing/src/models/buyer.rs

use serde::{Deserialize, Serialize};

/// Billing form fields, passed through to the order's shipping block unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BuyerDetails {
  pub first_name: String,
  pub last_name: String,
  pub country: String,
  pub address: String,
  pub city: String,
  pub province: String,
  pub phone: String,
  pub email: String,
}

impl BuyerDetails {
  pub fn full_name(&self) -> String {
    format!("{} {}", self.first_name, self.last_name).trim().to_string()
  }
}
