// demos/checkout_app/src/config.rs

use crate::errors::{AppError, Result};
use dotenvy::dotenv;
use ornament_pricing::PricingConfig;
use rust_decimal::Decimal;
use std::env;
use std::str::FromStr;

#[derive(Debug, Clone)]
pub struct AppConfig {
  pub inside_valley_fee: Decimal,
  pub outside_valley_fee: Decimal,
  pub store_pickup_fee: Decimal,
  pub rental_free_days: u32,
  pub rental_block_days: u32,
  pub rental_block_fee: Decimal,

  // Buyer the demo run checks out as
  pub demo_buyer_id: String,

  // Mock order service rejects submissions with exactly this total
  pub mock_gateway_fail_total: Option<Decimal>,
}

impl AppConfig {
  pub fn from_env() -> Result<Self> {
    dotenv().ok(); // Load .env file if present
    Self::from_lookup(|name| env::var(name).ok())
  }

  pub(crate) fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
    let defaults = PricingConfig::default();

    let inside_valley_fee = read_or(&lookup, "SHIPPING_FEE_INSIDE_VALLEY", defaults.inside_valley_fee)?;
    let outside_valley_fee = read_or(&lookup, "SHIPPING_FEE_OUTSIDE_VALLEY", defaults.outside_valley_fee)?;
    let store_pickup_fee = read_or(&lookup, "SHIPPING_FEE_STORE_PICKUP", defaults.store_pickup_fee)?;
    let rental_free_days = read_or(&lookup, "RENTAL_FREE_DAYS", defaults.rental_free_days)?;
    let rental_block_days = read_or(&lookup, "RENTAL_BLOCK_DAYS", defaults.rental_block_days)?;
    let rental_block_fee = read_or(&lookup, "RENTAL_BLOCK_FEE", defaults.rental_block_fee)?;

    if rental_block_days == 0 {
      return Err(AppError::Config("RENTAL_BLOCK_DAYS must be at least 1".to_string()));
    }

    let demo_buyer_id = lookup("DEMO_BUYER_ID").unwrap_or_else(|| "demo-buyer".to_string());
    let mock_gateway_fail_total = lookup("MOCK_GATEWAY_FAIL_TOTAL")
      .map(|raw| parse_value("MOCK_GATEWAY_FAIL_TOTAL", &raw))
      .transpose()?;

    tracing::info!("Application configuration loaded successfully.");

    Ok(Self {
      inside_valley_fee,
      outside_valley_fee,
      store_pickup_fee,
      rental_free_days,
      rental_block_days,
      rental_block_fee,
      demo_buyer_id,
      mock_gateway_fail_total,
    })
  }

  pub fn pricing_config(&self) -> PricingConfig {
    PricingConfig {
      inside_valley_fee: self.inside_valley_fee,
      outside_valley_fee: self.outside_valley_fee,
      store_pickup_fee: self.store_pickup_fee,
      rental_free_days: self.rental_free_days,
      rental_block_days: self.rental_block_days,
      rental_block_fee: self.rental_block_fee,
    }
  }
}

fn read_or<T>(lookup: &impl Fn(&str) -> Option<String>, name: &str, default: T) -> Result<T>
where
  T: FromStr,
  T::Err: std::fmt::Display,
{
  match lookup(name) {
    Some(raw) => parse_value(name, &raw),
    None => Ok(default),
  }
}

fn parse_value<T>(name: &str, raw: &str) -> Result<T>
where
  T: FromStr,
  T::Err: std::fmt::Display,
{
  raw
    .trim()
    .parse::<T>()
    .map_err(|e| AppError::Config(format!("Invalid {} value '{}': {}", name, raw, e)))
}

#[cfg(test)]
mod tests {
  use super::*;
  use std::collections::HashMap;

  fn config_from(vars: &[(&str, &str)]) -> Result<AppConfig> {
    let vars: HashMap<String, String> = vars.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
    AppConfig::from_lookup(|name| vars.get(name).cloned())
  }

  #[test]
  fn empty_environment_yields_shop_defaults() {
    let cfg = config_from(&[]).unwrap();
    assert_eq!(cfg.pricing_config(), PricingConfig::default());
    assert_eq!(cfg.demo_buyer_id, "demo-buyer");
    assert!(cfg.mock_gateway_fail_total.is_none());
  }

  #[test]
  fn overrides_are_applied() {
    let cfg = config_from(&[
      ("SHIPPING_FEE_OUTSIDE_VALLEY", "350"),
      ("RENTAL_BLOCK_FEE", "75.50"),
      ("MOCK_GATEWAY_FAIL_TOTAL", "1200"),
    ])
    .unwrap();
    assert_eq!(cfg.outside_valley_fee, Decimal::from(350));
    assert_eq!(cfg.rental_block_fee, Decimal::new(7550, 2));
    assert_eq!(cfg.mock_gateway_fail_total, Some(Decimal::from(1200)));
  }

  #[test]
  fn malformed_values_are_config_errors() {
    match config_from(&[("RENTAL_FREE_DAYS", "five")]) {
      Err(AppError::Config(msg)) => assert!(msg.contains("RENTAL_FREE_DAYS")),
      other => panic!("Expected AppError::Config, got {:?}", other),
    }
    assert!(matches!(config_from(&[("RENTAL_BLOCK_DAYS", "0")]), Err(AppError::Config(_))));
  }
}
