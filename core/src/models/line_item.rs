// ornament_pricing/src/models/line_item.rs

use super::item::OrderableItem;
use crate::error::{PricingError, PricingResult};
use rust_decimal::Decimal;
use serde::Serialize;

/// An item paired with the quantity the buyer asked for. The item always has an
/// identifier and the quantity is always at least 1.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LineItem {
  item: OrderableItem,
  quantity: u32,
}

impl LineItem {
  pub fn new(item: OrderableItem, quantity: u32) -> PricingResult<Self> {
    if !item.has_identifier() {
      return Err(PricingError::invalid_input(format!(
        "item '{}' lacks an identifier",
        item.title
      )));
    }
    if quantity == 0 {
      return Err(PricingError::invalid_input(format!(
        "quantity for item '{}' must be at least 1",
        item.id
      )));
    }
    Ok(Self { item, quantity })
  }

  pub fn single(item: OrderableItem) -> PricingResult<Self> {
    Self::new(item, 1)
  }

  pub fn item(&self) -> &OrderableItem {
    &self.item
  }

  pub fn quantity(&self) -> u32 {
    self.quantity
  }

  /// Fails with `AmountOverflow` when price × quantity leaves the decimal range.
  pub fn line_total(&self) -> PricingResult<Decimal> {
    self
      .item
      .unit_price()
      .checked_mul(Decimal::from(self.quantity))
      .ok_or_else(|| PricingError::overflow(format!("line total for item '{}'", self.item.id)))
  }

  /// Applies a +/- change from the cart screen. Returns `false` and leaves the
  /// quantity alone if the result would drop below 1.
  pub fn adjust_quantity(&mut self, delta: i64) -> bool {
    let next = i64::from(self.quantity) + delta;
    match u32::try_from(next) {
      Ok(q) if q >= 1 => {
        self.quantity = q;
        true
      }
      _ => false,
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use rust_decimal_macros::dec;

  fn bangle() -> OrderableItem {
    OrderableItem::new("orn-7", "Gold bangle", dec!(300))
  }

  #[test]
  fn zero_quantity_is_rejected() {
    assert!(matches!(
      LineItem::new(bangle(), 0),
      Err(PricingError::InvalidInputKind { .. })
    ));
  }

  #[test]
  fn line_total_multiplies_price_by_quantity() {
    assert_eq!(LineItem::new(bangle(), 2).unwrap().line_total().unwrap(), dec!(600));
  }

  #[test]
  fn blank_identifier_is_rejected() {
    let nameless = OrderableItem::new("  ", "Nameless", dec!(5));
    assert!(matches!(
      LineItem::new(nameless.clone(), 1),
      Err(PricingError::InvalidInputKind { .. })
    ));
    assert!(LineItem::single(nameless).is_err());
  }

  #[test]
  fn line_total_overflow_is_an_error() {
    let priciest = OrderableItem::new("orn-max", "Crown", Decimal::MAX);
    let line = LineItem::new(priciest, 2).unwrap();
    assert!(matches!(line.line_total(), Err(PricingError::AmountOverflow { .. })));
  }

  #[test]
  fn adjust_quantity_never_goes_below_one() {
    let mut line = LineItem::single(bangle()).unwrap();
    assert!(line.adjust_quantity(2));
    assert_eq!(line.quantity(), 3);
    assert!(!line.adjust_quantity(-3));
    assert_eq!(line.quantity(), 3);
    assert!(line.adjust_quantity(-2));
    assert_eq!(line.quantity(), 1);
  }
}
