// demos/checkout_app/src/state.rs
use crate::config::AppConfig;
use crate::services::cart_repository::{CartRepository, InMemoryCartRepository};
use crate::services::order_gateway::{MockOrderGateway, OrderGateway};
use crate::services::wishlist_repository::{InMemoryWishlistRepository, WishlistRepository};
use ornament_pricing::OrderAssembler;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
  pub config: Arc<AppConfig>,
  pub assembler: Arc<OrderAssembler>,
  pub carts: Arc<dyn CartRepository>,
  pub wishlists: Arc<dyn WishlistRepository>,
  pub orders: Arc<dyn OrderGateway>,
}

impl AppState {
  /// Wires the in-memory cart and wishlist and the mock order service.
  pub fn new(config: AppConfig) -> Self {
    let assembler = OrderAssembler::new(config.pricing_config());
    let orders = MockOrderGateway::new(config.mock_gateway_fail_total);
    Self {
      config: Arc::new(config),
      assembler: Arc::new(assembler),
      carts: Arc::new(InMemoryCartRepository::new()),
      wishlists: Arc::new(InMemoryWishlistRepository::new()),
      orders: Arc::new(orders),
    }
  }
}
