// src/lib.rs

//! Ornament pricing: turns a checkout selection into a priced order payload.
//!
//! The engine is synchronous and pure. It covers:
//!  - Normalizing a single item, a bundle or the persisted cart into line items.
//!  - Subtotal, tiered shipping fees and rental overage fees.
//!  - Resolving the chosen payment option to a canonical method and status.
//!  - Assembling an immutable order payload, with required selections checked first.
//!
//! Submitting the payload and cleaning up the cart afterwards belong to the caller.

pub mod assembler;
pub mod config;
pub mod error;
pub mod models;
pub mod normalizer;
pub mod pipeline;
pub mod pricing;
pub mod resolver;

// --- Re-exports for the Public API ---

pub use crate::assembler::{steps, CheckoutContext, CheckoutItems, CheckoutRequest, OrderAssembler};
pub use crate::config::PricingConfig;
pub use crate::error::{MissingSelection, PipelineError, PricingError, PricingResult};
pub use crate::models::{
  BuyerDetails, LineItem, OrderLine, OrderPayload, OrderStatus, OrderableItem, PaymentMethod, PaymentOption,
  PaymentStatus, RentalTerms, RentalWindow, ResolvedPayment, ShippingDetails, ShippingMethod,
};
pub use crate::normalizer::{normalize, BundleEntry, CartEntry, OrderInput};
pub use crate::pipeline::{Pipeline, PipelineControl, PipelineResult, SkipCondition};
pub use crate::pricing::{compute_grand_total, compute_subtotal, PricingCalculator};
pub use crate::resolver::resolve_payment;

/*
    Typical checkout:
    1. Build an `OrderInput` from what the screen holds (`OrderInput::from_json` for raw state).
    2. Wrap it in a `CheckoutRequest` with the buyer id, the shipping and payment tokens,
       the billing form and, for rentals, a `RentalWindow`.
    3. `OrderAssembler::assemble(&request)` returns the `OrderPayload` or a `PricingError`
       whose Display text is meant for the buyer.
    4. Submit the payload. Only after the order service accepts it, remove
       `payload.consumed_item_ids()` from the cart when `request.is_from_cart()`.
*/
