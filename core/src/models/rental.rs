// ornament_pricing/src/models/rental.rs

use crate::error::{PricingError, PricingResult};
use chrono::NaiveDate;
use serde::Serialize;

/// Calendar dates a rental runs between. `end` is never before `start`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RentalWindow {
  start: NaiveDate,
  end: NaiveDate,
}

impl RentalWindow {
  pub fn new(start: NaiveDate, end: NaiveDate) -> PricingResult<Self> {
    if end < start {
      return Err(PricingError::InvalidDateRange { start, end });
    }
    Ok(Self { start, end })
  }

  pub fn start(&self) -> NaiveDate {
    self.start
  }

  pub fn end(&self) -> NaiveDate {
    self.end
  }

  /// Billable day count: `ceil((end - start) / 1 day)`. Whole dates make the ceiling exact.
  pub fn rental_days(&self) -> u32 {
    let days = (self.end - self.start).num_days();
    u32::try_from(days).unwrap_or(u32::MAX)
  }

  /// Number of calendar dates the window covers, both ends included.
  pub fn span_days(&self) -> u32 {
    self.rental_days().saturating_add(1)
  }
}

/// Rental fields carried on a rental order payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RentalTerms {
  pub rent_start_date: NaiveDate,
  pub rent_end_date: NaiveDate,
  pub rental_days: u32,
}

impl From<&RentalWindow> for RentalTerms {
  fn from(window: &RentalWindow) -> Self {
    Self {
      rent_start_date: window.start(),
      rent_end_date: window.end(),
      rental_days: window.rental_days(),
    }
  }
}
