// ornament_pricing/src/resolver.rs

use crate::error::PricingResult;
use crate::models::payment::{PaymentOption, ResolvedPayment};

/// Maps a payment token to the (method, initial status) pair the order service stores.
///
/// | token    | method             | status    |
/// |----------|--------------------|-----------|
/// | `cod`    | `CASH_ON_DELIVERY` | `PENDING` |
/// | `esewa`  | `ESEWA`            | `PAID`    |
/// | `khalti` | `KHALTI`           | `PAID`    |
///
/// Anything else fails with `UnknownPaymentMethod`; there is no fallback method.
pub fn resolve_payment(token: &str) -> PricingResult<ResolvedPayment> {
  Ok(token.parse::<PaymentOption>()?.resolve())
}
