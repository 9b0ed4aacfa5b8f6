// ornament_pricing/src/models/item.rs

use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::str::FromStr;

/// A catalog product (ornament or bundle) as the catalog/cart service returns it.
///
/// The engine never mutates these; it only reads the price.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderableItem {
  #[serde(alias = "_id", default)]
  pub id: String,
  #[serde(default)]
  pub title: String,
  /// `None` when the catalog record had no usable price.
  #[serde(default, deserialize_with = "lenient_price")]
  pub price: Option<Decimal>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub image: Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub weight: Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub category: Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub duration: Option<String>,
}

impl OrderableItem {
  pub fn new(id: impl Into<String>, title: impl Into<String>, price: Decimal) -> Self {
    Self {
      id: id.into(),
      title: title.into(),
      price: Some(price),
      image: None,
      weight: None,
      category: None,
      duration: None,
    }
  }

  /// Price used for totals. Unpriced and negative records count as zero.
  pub fn unit_price(&self) -> Decimal {
    match self.price {
      Some(p) if p.is_sign_positive() => p,
      _ => Decimal::ZERO,
    }
  }

  pub fn has_identifier(&self) -> bool {
    !self.id.trim().is_empty()
  }
}

// Partially loaded catalog data may carry prices as strings, null or garbage.
fn lenient_price<'de, D>(deserializer: D) -> Result<Option<Decimal>, D::Error>
where
  D: Deserializer<'de>,
{
  let raw = Option::<Value>::deserialize(deserializer)?;
  Ok(raw.as_ref().and_then(decimal_from_json))
}

pub(crate) fn decimal_from_json(value: &Value) -> Option<Decimal> {
  match value {
    Value::Number(n) => {
      let text = n.to_string();
      Decimal::from_str(&text)
        .or_else(|_| Decimal::from_scientific(&text))
        .ok()
    }
    Value::String(s) => Decimal::from_str(s.trim()).ok(),
    _ => None,
  }
}
