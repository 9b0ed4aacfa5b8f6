// ornament_pricing/src/models/order.rs

use super::buyer::BuyerDetails;
use super::line_item::LineItem;
use super::payment::ResolvedPayment;
use super::rental::RentalTerms;
use super::shipping::ShippingMethod;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Order lifecycle as the order service tracks it. The engine only emits `Pending`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
  Pending,
  Confirmed,
  Processing,
  Shipped,
  Delivered,
  Cancelled,
}

impl OrderStatus {
  /// Position on the order-history progress tracker; 0 when the order left the track.
  pub fn progress_step(&self) -> u8 {
    match self {
      OrderStatus::Pending => 1,
      OrderStatus::Confirmed => 2,
      OrderStatus::Processing => 3,
      OrderStatus::Shipped => 4,
      OrderStatus::Delivered => 5,
      OrderStatus::Cancelled => 0,
    }
  }

  pub fn is_cancellable(&self) -> bool {
    *self == OrderStatus::Pending
  }
}

/// One entry of the payload's `items` array.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderLine {
  pub ornament_id: String,
  pub title: String,
  pub quantity: u32,
  pub unit_price: Decimal,
}

impl From<&LineItem> for OrderLine {
  fn from(line: &LineItem) -> Self {
    Self {
      ornament_id: line.item().id.clone(),
      title: line.item().title.clone(),
      quantity: line.quantity(),
      unit_price: line.item().unit_price(),
    }
  }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ShippingDetails {
  pub method: ShippingMethod,
  pub cost: Decimal,
  #[serde(flatten)]
  pub buyer: BuyerDetails,
}

/// A priced checkout, ready for the order-creation endpoint.
///
/// Built only by `OrderAssembler`; there are no setters. A new submission
/// produces a new payload.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderPayload {
  user_id: String,
  items: Vec<OrderLine>,
  shipping: ShippingDetails,
  payment: ResolvedPayment,
  subtotal: Decimal,
  shipping_cost: Decimal,
  extra_cost: Decimal,
  total: Decimal,
  status: OrderStatus,
  order_date: DateTime<Utc>,
  #[serde(flatten)]
  rental: Option<RentalTerms>,
}

pub(crate) struct OrderPayloadParts {
  pub user_id: String,
  pub items: Vec<OrderLine>,
  pub shipping: ShippingDetails,
  pub payment: ResolvedPayment,
  pub subtotal: Decimal,
  pub extra_cost: Decimal,
  pub total: Decimal,
  pub order_date: DateTime<Utc>,
  pub rental: Option<RentalTerms>,
}

impl OrderPayload {
  pub(crate) fn from_parts(parts: OrderPayloadParts) -> Self {
    Self {
      user_id: parts.user_id,
      items: parts.items,
      shipping_cost: parts.shipping.cost,
      shipping: parts.shipping,
      payment: parts.payment,
      subtotal: parts.subtotal,
      extra_cost: parts.extra_cost,
      total: parts.total,
      status: OrderStatus::Pending,
      order_date: parts.order_date,
      rental: parts.rental,
    }
  }

  pub fn user_id(&self) -> &str {
    &self.user_id
  }

  pub fn items(&self) -> &[OrderLine] {
    &self.items
  }

  pub fn shipping(&self) -> &ShippingDetails {
    &self.shipping
  }

  pub fn payment(&self) -> ResolvedPayment {
    self.payment
  }

  pub fn subtotal(&self) -> Decimal {
    self.subtotal
  }

  pub fn shipping_cost(&self) -> Decimal {
    self.shipping_cost
  }

  /// Rental overage; zero for purchases.
  pub fn extra_cost(&self) -> Decimal {
    self.extra_cost
  }

  pub fn total(&self) -> Decimal {
    self.total
  }

  pub fn status(&self) -> OrderStatus {
    self.status
  }

  pub fn order_date(&self) -> DateTime<Utc> {
    self.order_date
  }

  pub fn rental(&self) -> Option<&RentalTerms> {
    self.rental.as_ref()
  }

  pub fn is_rental(&self) -> bool {
    self.rental.is_some()
  }

  /// Ids to submit for cart removal once the order service accepted the payload.
  pub fn consumed_item_ids(&self) -> impl Iterator<Item = &str> {
    self.items.iter().map(|line| line.ornament_id.as_str())
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn progress_steps_follow_lifecycle() {
    let forward = [
      OrderStatus::Pending,
      OrderStatus::Confirmed,
      OrderStatus::Processing,
      OrderStatus::Shipped,
      OrderStatus::Delivered,
    ];
    let steps: Vec<u8> = forward.iter().map(OrderStatus::progress_step).collect();
    assert_eq!(steps, vec![1, 2, 3, 4, 5]);
    assert_eq!(OrderStatus::Cancelled.progress_step(), 0);
  }

  #[test]
  fn only_pending_orders_can_be_cancelled() {
    assert!(OrderStatus::Pending.is_cancellable());
    assert!(!OrderStatus::Shipped.is_cancellable());
    assert!(!OrderStatus::Cancelled.is_cancellable());
  }

  #[test]
  fn status_uses_screaming_case_on_the_wire() {
    assert_eq!(serde_json::to_string(&OrderStatus::Processing).unwrap(), "\"PROCESSING\"");
  }
}
