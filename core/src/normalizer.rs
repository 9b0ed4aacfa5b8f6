// ornament_pricing/src/normalizer.rs

//! Turns the three shapes a checkout can start from into one ordered list of
//! [`LineItem`]s.
//!
//! - a single item ("buy now" on a detail page), quantity 1;
//! - a bundle: items that may each carry their own quantity;
//! - the persisted cart: `{ornament, quantity}` entries.

use crate::error::{PricingError, PricingResult};
use crate::models::item::OrderableItem;
use crate::models::line_item::LineItem;
use serde_json::{Map, Value};
use tracing::debug;

#[derive(Debug, Clone, PartialEq)]
pub struct BundleEntry {
  pub item: OrderableItem,
  pub quantity: Option<u32>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CartEntry {
  pub item: OrderableItem,
  pub quantity: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub enum OrderInput {
  Single(OrderableItem),
  Bundle(Vec<BundleEntry>),
  Cart(Vec<CartEntry>),
}

impl OrderInput {
  /// Classifies checkout state as the screens hand it over.
  ///
  /// Recognised: `{"ornament": item}`, a bare item object, `{"bundle": [item..]}`,
  /// `{"cart": [entry..]}`, and bare arrays of either items (bundle) or
  /// `{"ornament", "quantity"}` entries (cart).
  pub fn from_json(value: &Value) -> PricingResult<Self> {
    match value {
      Value::Object(map) => {
        if let Some(bundle) = map.get("bundle") {
          return bundle_from_json(bundle);
        }
        if let Some(cart) = map.get("cart") {
          return cart_from_json(cart);
        }
        if let Some(item) = nested_item(map) {
          return Ok(OrderInput::Single(item_from_json(item, 0)?));
        }
        if map.contains_key("id") || map.contains_key("_id") {
          return Ok(OrderInput::Single(item_from_json(value, 0)?));
        }
        Err(PricingError::invalid_input(
          "object is neither an item, a bundle nor a cart",
        ))
      }
      Value::Array(entries) => {
        let is_cart = !entries.is_empty()
          && entries
            .iter()
            .all(|e| e.as_object().and_then(nested_item).is_some());
        if is_cart {
          cart_from_json(value)
        } else {
          bundle_from_json(value)
        }
      }
      other => Err(PricingError::invalid_input(format!(
        "expected an object or an array, got {}",
        json_kind(other)
      ))),
    }
  }

  /// Cart cleanup only applies to orders built from the persisted cart.
  pub fn is_from_cart(&self) -> bool {
    matches!(self, OrderInput::Cart(_))
  }

  pub fn normalize(&self) -> PricingResult<Vec<LineItem>> {
    normalize(self)
  }
}

/// Produces the canonical line items, preserving input order. A missing or zero
/// quantity becomes 1.
pub fn normalize(input: &OrderInput) -> PricingResult<Vec<LineItem>> {
  let lines = match input {
    OrderInput::Single(item) => vec![line_item(item, 1, 0)?],
    OrderInput::Bundle(entries) => entries
      .iter()
      .enumerate()
      .map(|(pos, e)| line_item(&e.item, e.quantity.unwrap_or(1), pos))
      .collect::<PricingResult<Vec<_>>>()?,
    OrderInput::Cart(entries) => entries
      .iter()
      .enumerate()
      .map(|(pos, e)| line_item(&e.item, e.quantity, pos))
      .collect::<PricingResult<Vec<_>>>()?,
  };
  debug!(line_count = lines.len(), from_cart = input.is_from_cart(), "Normalized line items.");
  Ok(lines)
}

fn line_item(item: &OrderableItem, quantity: u32, position: usize) -> PricingResult<LineItem> {
  if !item.has_identifier() {
    return Err(PricingError::invalid_input(format!(
      "item at position {} lacks an identifier",
      position
    )));
  }
  LineItem::new(item.clone(), quantity.max(1))
}

fn nested_item(map: &Map<String, Value>) -> Option<&Value> {
  map
    .get("ornament")
    .or_else(|| map.get("item"))
    .filter(|v| v.is_object())
}

fn bundle_from_json(value: &Value) -> PricingResult<OrderInput> {
  let entries = value
    .as_array()
    .ok_or_else(|| PricingError::invalid_input("bundle must be an array of items"))?;
  let entries = entries
    .iter()
    .enumerate()
    .map(|(pos, entry)| -> PricingResult<BundleEntry> {
      Ok(BundleEntry {
        item: item_from_json(entry, pos)?,
        quantity: quantity_from_json(entry.get("quantity"), pos)?,
      })
    })
    .collect::<PricingResult<Vec<_>>>()?;
  Ok(OrderInput::Bundle(entries))
}

fn cart_from_json(value: &Value) -> PricingResult<OrderInput> {
  let entries = value
    .as_array()
    .ok_or_else(|| PricingError::invalid_input("cart must be an array of entries"))?;
  let entries = entries
    .iter()
    .enumerate()
    .map(|(pos, entry)| -> PricingResult<CartEntry> {
      let item = entry
        .as_object()
        .and_then(nested_item)
        .ok_or_else(|| PricingError::invalid_input(format!("cart entry {} has no item", pos)))?;
      Ok(CartEntry {
        item: item_from_json(item, pos)?,
        quantity: quantity_from_json(entry.get("quantity"), pos)?.unwrap_or(1),
      })
    })
    .collect::<PricingResult<Vec<_>>>()?;
  Ok(OrderInput::Cart(entries))
}

fn item_from_json(value: &Value, position: usize) -> PricingResult<OrderableItem> {
  if !value.is_object() {
    return Err(PricingError::invalid_input(format!(
      "item at position {} is {}, not an object",
      position,
      json_kind(value)
    )));
  }
  serde_json::from_value(value.clone())
    .map_err(|e| PricingError::invalid_input(format!("item at position {}: {}", position, e)))
}

fn quantity_from_json(value: Option<&Value>, position: usize) -> PricingResult<Option<u32>> {
  let invalid = |v: &Value| {
    PricingError::invalid_input(format!(
      "quantity {} at position {} is not a positive whole number",
      v, position
    ))
  };
  let v = match value {
    None | Some(Value::Null) => return Ok(None),
    Some(v) => v,
  };
  let n = match v {
    Value::Number(n) => n,
    _ => return Err(invalid(v)),
  };
  if let Some(q) = n.as_u64() {
    return u32::try_from(q).map(Some).map_err(|_| invalid(v));
  }
  match n.as_f64() {
    Some(f) if f >= 0.0 && f.fract() == 0.0 && f <= f64::from(u32::MAX) => Ok(Some(f as u32)),
    _ => Err(invalid(v)),
  }
}

fn json_kind(value: &Value) -> &'static str {
  match value {
    Value::Null => "null",
    Value::Bool(_) => "a boolean",
    Value::Number(_) => "a number",
    Value::String(_) => "a string",
    Value::Array(_) => "an array",
    Value::Object(_) => "an object",
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use rust_decimal_macros::dec;
  use serde_json::json;

  fn necklace_json() -> Value {
    json!({"_id": "orn-1", "title": "Rani Haar", "price": 500})
  }

  #[test]
  fn single_item_gets_quantity_one() {
    let input = OrderInput::from_json(&json!({"ornament": necklace_json()})).unwrap();
    let lines = input.normalize().unwrap();
    assert_eq!(lines.len(), 1);
    assert_eq!(lines[0].quantity(), 1);
    assert_eq!(lines[0].item().unit_price(), dec!(500));
    assert!(!input.is_from_cart());
  }

  #[test]
  fn bare_item_object_is_a_single_item() {
    let input = OrderInput::from_json(&necklace_json()).unwrap();
    assert!(matches!(input, OrderInput::Single(_)));
  }

  #[test]
  fn bundle_preserves_order_and_defaults_quantity() {
    let input = OrderInput::from_json(&json!({"bundle": [
      {"_id": "b", "title": "Bangle", "price": 300, "quantity": 2},
      {"_id": "a", "title": "Earring", "price": 150},
      {"_id": "c", "title": "Ring", "price": 90, "quantity": 0}
    ]}))
    .unwrap();
    let lines = input.normalize().unwrap();
    let summary: Vec<(&str, u32)> = lines.iter().map(|l| (l.item().id.as_str(), l.quantity())).collect();
    assert_eq!(summary, vec![("b", 2), ("a", 1), ("c", 1)]);
  }

  #[test]
  fn array_of_cart_entries_is_a_cart() {
    let input = OrderInput::from_json(&json!([
      {"_id": "cart-1", "ornament": necklace_json(), "quantity": 3}
    ]))
    .unwrap();
    assert!(input.is_from_cart());
    assert_eq!(input.normalize().unwrap()[0].quantity(), 3);
  }

  #[test]
  fn array_of_items_is_a_bundle() {
    let input = OrderInput::from_json(&json!([necklace_json()])).unwrap();
    assert!(matches!(input, OrderInput::Bundle(ref e) if e.len() == 1));
  }

  #[test]
  fn unrecognised_shapes_are_rejected() {
    for value in [json!("orn-1"), json!(42), json!(null), json!({"wishlist": []}), json!({"bundle": {}})] {
      assert!(
        matches!(OrderInput::from_json(&value), Err(PricingError::InvalidInputKind { .. })),
        "accepted {}",
        value
      );
    }
  }

  #[test]
  fn item_without_identifier_is_rejected() {
    let input = OrderInput::from_json(&json!({"bundle": [necklace_json(), {"title": "Ghost", "price": 5}]})).unwrap();
    match input.normalize() {
      Err(PricingError::InvalidInputKind { reason }) => assert!(reason.contains("position 1")),
      other => panic!("Expected InvalidInputKind, got {:?}", other),
    }
  }

  #[test]
  fn negative_or_fractional_quantities_are_rejected() {
    for quantity in [json!(-1), json!(1.5), json!("2")] {
      let value = json!({"cart": [{"ornament": necklace_json(), "quantity": quantity}]});
      assert!(matches!(
        OrderInput::from_json(&value),
        Err(PricingError::InvalidInputKind { .. })
      ));
    }
  }

  #[test]
  fn whole_float_quantity_is_accepted() {
    let value = json!({"cart": [{"ornament": necklace_json(), "quantity": 2.0}]});
    assert_eq!(OrderInput::from_json(&value).unwrap().normalize().unwrap()[0].quantity(), 2);
  }
}
