// demos/checkout_app/src/services/cart_repository.rs
use crate::errors::{AppError, Result as AppResult};
use async_trait::async_trait;
use ornament_pricing::{CartEntry, OrderableItem};
use parking_lot::RwLock;
use std::collections::HashMap;
use tracing::{debug, instrument};

/// Persisted per-buyer cart. The pricing engine never reads it directly; the
/// checkout caller loads entries and hands them over as plain data.
#[async_trait]
pub trait CartRepository: Send + Sync {
  async fn load(&self, buyer_id: &str) -> AppResult<Vec<CartEntry>>;

  /// Adds `quantity` of the item, merging with an existing entry for the same id.
  async fn add(&self, buyer_id: &str, item: OrderableItem, quantity: u32) -> AppResult<()>;

  /// Returns whether an entry was removed.
  async fn remove(&self, buyer_id: &str, item_id: &str) -> AppResult<bool>;
}

#[derive(Debug, Default)]
pub struct InMemoryCartRepository {
  carts: RwLock<HashMap<String, Vec<CartEntry>>>,
}

impl InMemoryCartRepository {
  pub fn new() -> Self {
    Self::default()
  }
}

#[async_trait]
impl CartRepository for InMemoryCartRepository {
  async fn load(&self, buyer_id: &str) -> AppResult<Vec<CartEntry>> {
    Ok(self.carts.read().get(buyer_id).cloned().unwrap_or_default())
  }

  #[instrument(skip(self, item), fields(item_id = %item.id))]
  async fn add(&self, buyer_id: &str, item: OrderableItem, quantity: u32) -> AppResult<()> {
    if quantity == 0 {
      return Err(AppError::Validation("Quantity must be at least 1.".to_string()));
    }
    if !item.has_identifier() {
      return Err(AppError::Validation("Item has no identifier.".to_string()));
    }

    let mut carts = self.carts.write();
    let entries = carts.entry(buyer_id.to_string()).or_default();
    match entries.iter_mut().find(|e| e.item.id == item.id) {
      Some(existing) => existing.quantity = existing.quantity.saturating_add(quantity),
      None => entries.push(CartEntry { item, quantity }),
    }
    debug!(entries = entries.len(), "Cart updated.");
    Ok(())
  }

  async fn remove(&self, buyer_id: &str, item_id: &str) -> AppResult<bool> {
    let mut carts = self.carts.write();
    let Some(entries) = carts.get_mut(buyer_id) else {
      return Ok(false);
    };
    let before = entries.len();
    entries.retain(|e| e.item.id != item_id);
    Ok(entries.len() != before)
  }
}
