// ornament_pricing/src/assembler.rs

//! Builds an [`OrderPayload`] from a checkout request.
//!
//! The work runs as a [`Pipeline`] over a fresh [`CheckoutContext`] per call:
//!
//! 1. `validate_selections`: buyer id, shipping and payment must be present.
//! 2. `normalize_line_items`: at least one line item.
//! 3. `compute_subtotal`
//! 4. `compute_shipping`: parses the shipping token.
//! 5. `compute_rental_overage`: skipped for purchases.
//! 6. `resolve_payment`: parses the payment token.
//! 7. `finalize_totals`
//!
//! Callers may attach their own hooks through [`OrderAssembler::pipeline_mut`].

use crate::config::PricingConfig;
use crate::error::{MissingSelection, PricingError, PricingResult};
use crate::models::buyer::BuyerDetails;
use crate::models::line_item::LineItem;
use crate::models::order::{OrderLine, OrderPayload, OrderPayloadParts, ShippingDetails};
use crate::models::payment::ResolvedPayment;
use crate::models::rental::{RentalTerms, RentalWindow};
use crate::models::shipping::ShippingMethod;
use crate::normalizer::OrderInput;
use crate::pipeline::{Pipeline, PipelineControl, PipelineResult, SkipCondition};
use crate::pricing::PricingCalculator;
use crate::resolver::resolve_payment;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use std::sync::Arc;
use tracing::{info, instrument};

/// Step names of the assembly pipeline, for callers attaching hooks.
pub mod steps {
  pub const VALIDATE_SELECTIONS: &str = "validate_selections";
  pub const NORMALIZE_LINE_ITEMS: &str = "normalize_line_items";
  pub const COMPUTE_SUBTOTAL: &str = "compute_subtotal";
  pub const COMPUTE_SHIPPING: &str = "compute_shipping";
  pub const COMPUTE_RENTAL_OVERAGE: &str = "compute_rental_overage";
  pub const RESOLVE_PAYMENT: &str = "resolve_payment";
  pub const FINALIZE_TOTALS: &str = "finalize_totals";
}

/// Items a checkout starts from: raw screen input, or lines already normalized.
#[derive(Debug, Clone, PartialEq)]
pub enum CheckoutItems {
  Input(OrderInput),
  Lines(Vec<LineItem>),
}

impl From<OrderInput> for CheckoutItems {
  fn from(input: OrderInput) -> Self {
    CheckoutItems::Input(input)
  }
}

impl From<Vec<LineItem>> for CheckoutItems {
  fn from(lines: Vec<LineItem>) -> Self {
    CheckoutItems::Lines(lines)
  }
}

/// Everything the checkout screen collected. Selections are raw tokens; an empty
/// token counts as "not selected".
#[derive(Debug, Clone, PartialEq)]
pub struct CheckoutRequest {
  pub buyer_id: String,
  pub items: CheckoutItems,
  pub shipping: Option<String>,
  pub payment: Option<String>,
  pub buyer: BuyerDetails,
  pub rental: Option<RentalWindow>,
}

impl CheckoutRequest {
  pub fn new(buyer_id: impl Into<String>, items: impl Into<CheckoutItems>) -> Self {
    Self {
      buyer_id: buyer_id.into(),
      items: items.into(),
      shipping: None,
      payment: None,
      buyer: BuyerDetails::default(),
      rental: None,
    }
  }

  pub fn with_shipping(mut self, token: impl Into<String>) -> Self {
    self.shipping = Some(token.into());
    self
  }

  pub fn with_payment(mut self, token: impl Into<String>) -> Self {
    self.payment = Some(token.into());
    self
  }

  pub fn with_buyer(mut self, buyer: BuyerDetails) -> Self {
    self.buyer = buyer;
    self
  }

  pub fn with_rental(mut self, window: RentalWindow) -> Self {
    self.rental = Some(window);
    self
  }

  pub fn is_from_cart(&self) -> bool {
    matches!(&self.items, CheckoutItems::Input(input) if input.is_from_cart())
  }
}

/// Working state of one assembly run. Hooks see and may adjust it.
#[derive(Debug, Clone)]
pub struct CheckoutContext {
  pub request: CheckoutRequest,
  pub lines: Vec<LineItem>,
  pub subtotal: Decimal,
  pub shipping_method: Option<ShippingMethod>,
  pub shipping_cost: Decimal,
  pub overage: Decimal,
  pub payment: Option<ResolvedPayment>,
  pub total: Decimal,
}

impl CheckoutContext {
  fn new(request: CheckoutRequest) -> Self {
    Self {
      request,
      lines: Vec::new(),
      subtotal: Decimal::ZERO,
      shipping_method: None,
      shipping_cost: Decimal::ZERO,
      overage: Decimal::ZERO,
      payment: None,
      total: Decimal::ZERO,
    }
  }
}

fn selected(token: &Option<String>) -> Option<&str> {
  token.as_deref().map(str::trim).filter(|t| !t.is_empty())
}

fn missing(what: MissingSelection) -> PricingError {
  PricingError::MissingRequiredSelection { missing: what }
}

pub struct OrderAssembler {
  calculator: Arc<PricingCalculator>,
  pipeline: Pipeline<CheckoutContext, PricingError>,
}

impl Default for OrderAssembler {
  fn default() -> Self {
    Self::new(PricingConfig::default())
  }
}

impl OrderAssembler {
  pub fn new(config: PricingConfig) -> Self {
    let calculator = Arc::new(PricingCalculator::new(config));
    let pipeline = build_pipeline(&calculator);
    Self { calculator, pipeline }
  }

  pub fn calculator(&self) -> &PricingCalculator {
    &self.calculator
  }

  pub fn pipeline(&self) -> &Pipeline<CheckoutContext, PricingError> {
    &self.pipeline
  }

  pub fn pipeline_mut(&mut self) -> &mut Pipeline<CheckoutContext, PricingError> {
    &mut self.pipeline
  }

  /// Assembles the payload stamped with the current time.
  pub fn assemble(&self, request: &CheckoutRequest) -> PricingResult<OrderPayload> {
    self.assemble_at(request, Utc::now())
  }

  #[instrument(name = "OrderAssembler::assemble", skip_all, fields(buyer_id = %request.buyer_id), err(Display))]
  pub fn assemble_at(&self, request: &CheckoutRequest, order_date: DateTime<Utc>) -> PricingResult<OrderPayload> {
    let mut ctx = CheckoutContext::new(request.clone());
    if let PipelineResult::Stopped { step } = self.pipeline.run(&mut ctx)? {
      return Err(PricingError::Halted { step });
    }

    let method = ctx.shipping_method.ok_or_else(|| missing(MissingSelection::Shipping))?;
    let payment = ctx.payment.ok_or_else(|| missing(MissingSelection::Payment))?;
    let payload = OrderPayload::from_parts(OrderPayloadParts {
      user_id: ctx.request.buyer_id.clone(),
      items: ctx.lines.iter().map(OrderLine::from).collect(),
      shipping: ShippingDetails {
        method,
        cost: ctx.shipping_cost,
        buyer: ctx.request.buyer.clone(),
      },
      payment,
      subtotal: ctx.subtotal,
      extra_cost: ctx.overage,
      total: ctx.total,
      order_date,
      rental: ctx.request.rental.as_ref().map(RentalTerms::from),
    });

    info!(
      lines = payload.items().len(),
      subtotal = %payload.subtotal(),
      shipping_cost = %payload.shipping_cost(),
      extra_cost = %payload.extra_cost(),
      total = %payload.total(),
      rental = payload.is_rental(),
      "Order payload assembled."
    );
    Ok(payload)
  }
}

fn build_pipeline(calculator: &Arc<PricingCalculator>) -> Pipeline<CheckoutContext, PricingError> {
  let no_rental: SkipCondition<CheckoutContext> = Arc::new(|ctx: &CheckoutContext| ctx.request.rental.is_none());

  let mut p = Pipeline::<CheckoutContext, PricingError>::new(&[
    (steps::VALIDATE_SELECTIONS, false, None),
    (steps::NORMALIZE_LINE_ITEMS, false, None),
    (steps::COMPUTE_SUBTOTAL, false, None),
    (steps::COMPUTE_SHIPPING, false, None),
    (steps::COMPUTE_RENTAL_OVERAGE, false, Some(no_rental)),
    (steps::RESOLVE_PAYMENT, false, None),
    (steps::FINALIZE_TOTALS, false, None),
  ]);

  p.on_step(steps::VALIDATE_SELECTIONS, |ctx: &mut CheckoutContext| -> PricingResult<PipelineControl> {
    let req = &ctx.request;
    if req.buyer_id.trim().is_empty() {
      return Err(missing(MissingSelection::Buyer));
    }
    if selected(&req.shipping).is_none() {
      return Err(missing(MissingSelection::Shipping));
    }
    if selected(&req.payment).is_none() {
      return Err(missing(MissingSelection::Payment));
    }
    Ok(PipelineControl::Continue)
  });

  p.on_step(steps::NORMALIZE_LINE_ITEMS, |ctx: &mut CheckoutContext| -> PricingResult<PipelineControl> {
    ctx.lines = match &ctx.request.items {
      CheckoutItems::Input(input) => input.normalize()?,
      CheckoutItems::Lines(lines) => lines.clone(),
    };
    if ctx.lines.is_empty() {
      return Err(missing(MissingSelection::LineItems));
    }
    Ok(PipelineControl::Continue)
  });

  let calc = Arc::clone(calculator);
  p.on_step(steps::COMPUTE_SUBTOTAL, move |ctx: &mut CheckoutContext| -> PricingResult<PipelineControl> {
    ctx.subtotal = calc.compute_subtotal(&ctx.lines)?;
    Ok(PipelineControl::Continue)
  });

  let calc = Arc::clone(calculator);
  p.on_step(steps::COMPUTE_SHIPPING, move |ctx: &mut CheckoutContext| -> PricingResult<PipelineControl> {
    let token = selected(&ctx.request.shipping).ok_or_else(|| missing(MissingSelection::Shipping))?;
    let method: ShippingMethod = token.parse()?;
    ctx.shipping_cost = calc.compute_shipping_cost(method);
    ctx.shipping_method = Some(method);
    Ok(PipelineControl::Continue)
  });

  let calc = Arc::clone(calculator);
  p.on_step(steps::COMPUTE_RENTAL_OVERAGE, move |ctx: &mut CheckoutContext| -> PricingResult<PipelineControl> {
    if let Some(window) = &ctx.request.rental {
      ctx.overage = calc.compute_rental_overage(window)?;
    }
    Ok(PipelineControl::Continue)
  });

  p.on_step(steps::RESOLVE_PAYMENT, |ctx: &mut CheckoutContext| -> PricingResult<PipelineControl> {
    let token = selected(&ctx.request.payment).ok_or_else(|| missing(MissingSelection::Payment))?;
    ctx.payment = Some(resolve_payment(token)?);
    Ok(PipelineControl::Continue)
  });

  let calc = Arc::clone(calculator);
  p.on_step(steps::FINALIZE_TOTALS, move |ctx: &mut CheckoutContext| -> PricingResult<PipelineControl> {
    ctx.total = calc.compute_grand_total(ctx.subtotal, ctx.shipping_cost, ctx.overage)?;
    Ok(PipelineControl::Continue)
  });

  p
}
