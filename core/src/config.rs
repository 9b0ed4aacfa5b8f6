// ornament_pricing/src/config.rs

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Fee schedule the calculator prices against.
///
/// `Default` carries the shop's current rates: 100 inside the valley, 300 outside,
/// free in-store pickup, and rentals charged 50 per extra 5-day block once they run
/// past 5 days.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PricingConfig {
  pub inside_valley_fee: Decimal,
  pub outside_valley_fee: Decimal,
  pub store_pickup_fee: Decimal,
  /// Rentals up to this many days carry no overage.
  pub rental_free_days: u32,
  pub rental_block_days: u32,
  pub rental_block_fee: Decimal,
}

impl Default for PricingConfig {
  fn default() -> Self {
    Self {
      inside_valley_fee: Decimal::from(100),
      outside_valley_fee: Decimal::from(300),
      store_pickup_fee: Decimal::ZERO,
      rental_free_days: 5,
      rental_block_days: 5,
      rental_block_fee: Decimal::from(50),
    }
  }
}
