// ornament_pricing/examples/purchase_checkout.rs

use ornament_pricing::{CheckoutRequest, OrderAssembler, OrderInput, PricingError};
use serde_json::json;
use tracing::{info, warn};

fn main() -> Result<(), PricingError> {
  tracing_subscriber::fmt().with_max_level(tracing::Level::INFO).init();
  info!("--- Purchase Checkout Example ---");

  // 1. Cart state as the cart screen holds it
  let cart = json!([
    { "ornament": { "_id": "orn-tilhari", "title": "Gold Tilhari", "price": 500 }, "quantity": 1 },
    { "ornament": { "_id": "orn-jhumka", "title": "Jhumka Pair", "price": "300" }, "quantity": 2 }
  ]);
  let input = OrderInput::from_json(&cart)?;

  // 2. Nothing selected yet: the buyer sees the validation message
  let assembler = OrderAssembler::default();
  let incomplete = CheckoutRequest::new("buyer-42", input.clone());
  if let Err(e) = assembler.assemble(&incomplete) {
    warn!("Checkout rejected: {}", e);
  }

  // 3. Selections made
  let request = CheckoutRequest::new("buyer-42", input)
    .with_shipping("INSIDE_THE_VALLEY")
    .with_payment("esewa");
  let payload = assembler.assemble(&request)?;

  info!(
    "Subtotal {} + shipping {} = total {} ({:?})",
    payload.subtotal(),
    payload.shipping_cost(),
    payload.total(),
    payload.payment()
  );
  if request.is_from_cart() {
    let ids: Vec<&str> = payload.consumed_item_ids().collect();
    info!("Remove from cart after submission: {:?}", ids);
  }
  Ok(())
}
