// ornament_pricing/examples/rental_checkout.rs

use chrono::NaiveDate;
use ornament_pricing::{
  steps, BundleEntry, CheckoutContext, CheckoutRequest, OrderAssembler, OrderInput, OrderableItem, PipelineControl,
  RentalWindow,
};
use rust_decimal::Decimal;
use tracing::info;

fn main() -> anyhow::Result<()> {
  tracing_subscriber::fmt().with_max_level(tracing::Level::DEBUG).init();
  info!("--- Rental Checkout Example ---");

  let bundle = OrderInput::Bundle(vec![BundleEntry {
    item: OrderableItem::new("bundle-bridal", "Bridal Set", Decimal::from(800)),
    quantity: None,
  }]);

  let start = NaiveDate::from_ymd_opt(2024, 4, 1).ok_or_else(|| anyhow::anyhow!("bad start date"))?;
  let end = NaiveDate::from_ymd_opt(2024, 4, 11).ok_or_else(|| anyhow::anyhow!("bad end date"))?;
  let window = RentalWindow::new(start, end)?;

  // A caller-side hook that only observes the context.
  let mut assembler = OrderAssembler::default();
  assembler
    .pipeline_mut()
    .after_step(steps::COMPUTE_RENTAL_OVERAGE, |ctx: &mut CheckoutContext| -> anyhow::Result<PipelineControl> {
      info!("Overage after {} billable days: {}", ctx.request.rental.map(|w| w.rental_days()).unwrap_or(0), ctx.overage);
      Ok(PipelineControl::Continue)
    });

  let request = CheckoutRequest::new("buyer-7", bundle)
    .with_shipping("OUTSIDE_THE_VALLEY")
    .with_payment("cod")
    .with_rental(window);
  let payload = assembler.assemble(&request)?;

  println!("{}", serde_json::to_string_pretty(&payload)?);
  Ok(())
}
