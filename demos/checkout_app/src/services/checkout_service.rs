// demos/checkout_app/src/services/checkout_service.rs
use crate::errors::Result as AppResult;
use crate::services::cart_repository::CartRepository;
use crate::services::order_gateway::{OrderGateway, OrderReceipt};
use crate::state::AppState;
use futures_util::future::join_all;
use ornament_pricing::{BuyerDetails, CheckoutRequest, OrderAssembler, OrderInput, OrderPayload};
use std::sync::Arc;
use tracing::{info, instrument, warn};

#[derive(Debug, Clone)]
pub struct PlacedOrder {
  pub receipt: OrderReceipt,
  pub payload: OrderPayload,
  pub removed_from_cart: usize,
}

/// Checkout as the screens drive it: price, submit, then clean up the cart.
pub struct CheckoutService {
  assembler: Arc<OrderAssembler>,
  carts: Arc<dyn CartRepository>,
  orders: Arc<dyn OrderGateway>,
}

impl CheckoutService {
  pub fn new(state: &AppState) -> Self {
    Self {
      assembler: state.assembler.clone(),
      carts: state.carts.clone(),
      orders: state.orders.clone(),
    }
  }

  /// Checks out the buyer's whole persisted cart.
  pub async fn checkout_cart(
    &self,
    buyer_id: &str,
    shipping: Option<&str>,
    payment: Option<&str>,
    buyer: BuyerDetails,
  ) -> AppResult<PlacedOrder> {
    let entries = self.carts.load(buyer_id).await?;
    let mut request = CheckoutRequest::new(buyer_id, OrderInput::Cart(entries)).with_buyer(buyer);
    request.shipping = shipping.map(str::to_string);
    request.payment = payment.map(str::to_string);
    self.place_order(&request).await
  }

  /// Assembles, serializes and submits the order. Cart entries are removed only
  /// after the order service accepted it, and only for cart-originated orders.
  ///
  /// A rejected submission leaves the cart untouched. Once the order is accepted,
  /// each removal is independent: a failing one is logged and leaves that entry in
  /// the cart, the others still apply, and the placed order is still returned.
  #[instrument(skip_all, fields(buyer_id = %request.buyer_id, from_cart = request.is_from_cart()))]
  pub async fn place_order(&self, request: &CheckoutRequest) -> AppResult<PlacedOrder> {
    let payload = self.assembler.assemble(request)?;
    let body = serde_json::to_value(&payload)?;

    let receipt = self.orders.submit(&body).await.map_err(|e| {
      warn!(error = %e, "Order submission failed; cart left untouched.");
      e
    })?;

    let removed_from_cart = if request.is_from_cart() {
      let removals = payload
        .consumed_item_ids()
        .map(|id| async move { (id, self.carts.remove(&request.buyer_id, id).await) });
      join_all(removals)
        .await
        .into_iter()
        .filter(|(id, outcome)| match outcome {
          Ok(removed) => *removed,
          Err(e) => {
            warn!(item_id = %id, error = %e, "Cart cleanup failed for item; entry kept.");
            false
          }
        })
        .count()
    } else {
      0
    };

    info!(order_id = %receipt.order_id, removed_from_cart, "Order placed.");
    Ok(PlacedOrder {
      receipt,
      payload,
      removed_from_cart,
    })
  }
}
