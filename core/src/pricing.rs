// ornament_pricing/src/pricing.rs

//! Subtotal, shipping tiers and rental overage.

use crate::config::PricingConfig;
use crate::error::{PricingError, PricingResult};
use crate::models::line_item::LineItem;
use crate::models::rental::RentalWindow;
use crate::models::shipping::ShippingMethod;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use tracing::{debug, instrument};

/// Σ(unit price × quantity). Unpriced items contribute nothing; callers that need
/// every price present should check the catalog data before pricing.
///
/// Fails with `AmountOverflow` instead of wrapping or panicking on huge catalog prices.
pub fn compute_subtotal(lines: &[LineItem]) -> PricingResult<Decimal> {
  lines.iter().try_fold(Decimal::ZERO, |acc, line| {
    acc
      .checked_add(line.line_total()?)
      .ok_or_else(|| PricingError::overflow("subtotal"))
  })
}

pub fn compute_grand_total(subtotal: Decimal, shipping_cost: Decimal, overage: Decimal) -> PricingResult<Decimal> {
  subtotal
    .checked_add(shipping_cost)
    .and_then(|sum| sum.checked_add(overage))
    .ok_or_else(|| PricingError::overflow("grand total"))
}

#[derive(Debug, Clone, Default)]
pub struct PricingCalculator {
  config: PricingConfig,
}

impl PricingCalculator {
  pub fn new(config: PricingConfig) -> Self {
    Self { config }
  }

  pub fn config(&self) -> &PricingConfig {
    &self.config
  }

  pub fn compute_subtotal(&self, lines: &[LineItem]) -> PricingResult<Decimal> {
    compute_subtotal(lines)
  }

  pub fn compute_shipping_cost(&self, method: ShippingMethod) -> Decimal {
    match method {
      ShippingMethod::InsideTheValley => self.config.inside_valley_fee,
      ShippingMethod::OutsideTheValley => self.config.outside_valley_fee,
      ShippingMethod::InStorePickup => self.config.store_pickup_fee,
    }
  }

  /// Fails with `UnknownShippingMethod` for anything outside the closed set.
  pub fn shipping_cost_for_token(&self, token: &str) -> PricingResult<Decimal> {
    Ok(self.compute_shipping_cost(token.parse()?))
  }

  /// `floor((days - 1) / block_days) * block_fee` once `days` exceeds the free
  /// allowance. `days` is the billable count [`RentalWindow::rental_days`]
  /// (`end - start`), NOT the calendar span [`RentalWindow::span_days`].
  ///
  /// The shop's rate card counts rentals in calendar dates, i.e. `span_days()`:
  /// a span of 6 bills 5 days and is free, a span of 11 bills 10 days (one block),
  /// a span of 16 bills 15 days (two blocks). Passing `span_days()` here would
  /// shift every boundary by one day.
  pub fn overage_for_days(&self, days: u32) -> PricingResult<Decimal> {
    if days <= self.config.rental_free_days || days == 0 {
      return Ok(Decimal::ZERO);
    }
    let blocks = (days - 1) / self.config.rental_block_days.max(1);
    Decimal::from(blocks)
      .checked_mul(self.config.rental_block_fee)
      .ok_or_else(|| PricingError::overflow("rental overage"))
  }

  #[instrument(level = "debug", skip(self), fields(start = %window.start(), end = %window.end()))]
  pub fn compute_rental_overage(&self, window: &RentalWindow) -> PricingResult<Decimal> {
    let days = window.rental_days();
    let overage = self.overage_for_days(days)?;
    debug!(days, span = window.span_days(), %overage, "Computed rental overage.");
    Ok(overage)
  }

  /// Fails with `InvalidDateRange` when `end` precedes `start`.
  pub fn compute_rental_overage_between(&self, start: NaiveDate, end: NaiveDate) -> PricingResult<Decimal> {
    self.compute_rental_overage(&RentalWindow::new(start, end)?)
  }

  pub fn compute_grand_total(
    &self,
    subtotal: Decimal,
    shipping_cost: Decimal,
    overage: Decimal,
  ) -> PricingResult<Decimal> {
    compute_grand_total(subtotal, shipping_cost, overage)
  }
}
