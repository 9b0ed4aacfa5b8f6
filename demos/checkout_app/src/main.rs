// demos/checkout_app/src/main.rs

mod config;
mod errors;
mod services;
mod state;

use crate::config::AppConfig;
use crate::errors::Result as AppResult;
use crate::services::cart_repository::CartRepository;
use crate::services::checkout_service::CheckoutService;
use crate::services::wishlist_repository::{move_to_cart, WishlistRepository};
use crate::state::AppState;

use chrono::{Duration, Utc};
use ornament_pricing::{BundleEntry, BuyerDetails, CheckoutRequest, OrderInput, OrderableItem, RentalWindow};
use rust_decimal::Decimal;
use tracing::Level;
use tracing_subscriber::fmt::format::FmtSpan;

#[tokio::main]
async fn main() -> AppResult<()> {
  tracing_subscriber::fmt()
    .with_max_level(Level::INFO)
    .with_env_filter(tracing_subscriber::EnvFilter::from_default_env()) // Allow RUST_LOG override
    .with_span_events(FmtSpan::CLOSE)
    .init();

  tracing::info!("Starting checkout demo...");

  let app_config = match AppConfig::from_env() {
    Ok(cfg) => cfg,
    Err(e) => {
      tracing::error!(error = %e, "Failed to load application configuration.");
      return Err(e);
    }
  };
  let buyer_id = app_config.demo_buyer_id.clone();
  let app_state = AppState::new(app_config);
  let checkout = CheckoutService::new(&app_state);
  let buyer = demo_buyer();

  // Purchase: the buyer's cart
  app_state
    .carts
    .add(&buyer_id, OrderableItem::new("orn-tilhari", "Gold Tilhari", Decimal::from(500)), 1)
    .await?;

  // The second ornament was saved to the wishlist first, then moved over.
  let jhumka = OrderableItem::new("orn-jhumka", "Jhumka Pair", Decimal::from(300));
  app_state.wishlists.toggle(&buyer_id, jhumka.clone()).await?;
  move_to_cart(app_state.wishlists.as_ref(), app_state.carts.as_ref(), &buyer_id, "orn-jhumka").await?;
  app_state.carts.add(&buyer_id, jhumka, 1).await?;

  match checkout
    .checkout_cart(&buyer_id, Some("INSIDE_THE_VALLEY"), Some("esewa"), buyer.clone())
    .await
  {
    Ok(placed) => {
      tracing::info!(order_id = %placed.receipt.order_id, "Purchase placed.");
      println!("{}", serde_json::to_string_pretty(&placed.payload)?);
    }
    Err(e) => tracing::error!(error = %e, "Purchase failed: {}", e.user_message()),
  }

  // Rental: a bundle for eleven calendar days starting next week
  let start = Utc::now().date_naive() + Duration::days(7);
  let window = RentalWindow::new(start, start + Duration::days(10))?;
  let bundle = OrderInput::Bundle(vec![BundleEntry {
    item: OrderableItem::new("bundle-bridal", "Bridal Set", Decimal::from(800)),
    quantity: None,
  }]);
  let rental = CheckoutRequest::new(buyer_id.as_str(), bundle)
    .with_shipping("OUTSIDE_THE_VALLEY")
    .with_payment("cod")
    .with_buyer(buyer)
    .with_rental(window);

  match checkout.place_order(&rental).await {
    Ok(placed) => {
      tracing::info!(order_id = %placed.receipt.order_id, "Rental placed.");
      println!("{}", serde_json::to_string_pretty(&placed.payload)?);
    }
    Err(e) => tracing::error!(error = %e, "Rental failed: {}", e.user_message()),
  }

  tracing::info!(config = ?app_state.config.pricing_config(), "Checkout demo finished.");
  Ok(())
}

fn demo_buyer() -> BuyerDetails {
  BuyerDetails {
    first_name: "Sita".into(),
    last_name: "Shrestha".into(),
    country: "Nepal".into(),
    address: "Jhamsikhel".into(),
    city: "Lalitpur".into(),
    province: "Bagmati".into(),
    phone: "9800000000".into(),
    email: "sita@example.com".into(),
  }
}
