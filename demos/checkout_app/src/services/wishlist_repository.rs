// demos/checkout_app/src/services/wishlist_repository.rs
use crate::errors::{AppError, Result as AppResult};
use crate::services::cart_repository::CartRepository;
use async_trait::async_trait;
use ornament_pricing::OrderableItem;
use parking_lot::RwLock;
use std::collections::HashMap;
use tracing::{debug, info, instrument};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq)]
pub struct WishlistEntry {
  pub id: Uuid,
  pub ornament: OrderableItem,
}

impl WishlistEntry {
  /// Wishlist screens address an entry either by its own id or by the ornament's.
  pub fn matches(&self, key: &str) -> bool {
    self.ornament.id == key || self.id.to_string() == key
  }
}

/// Persisted per-buyer wishlist, injected next to the cart.
#[async_trait]
pub trait WishlistRepository: Send + Sync {
  async fn load(&self, buyer_id: &str) -> AppResult<Vec<WishlistEntry>>;

  /// Adds the ornament unless already present; returns the (new or existing) entry.
  async fn add(&self, buyer_id: &str, ornament: OrderableItem) -> AppResult<WishlistEntry>;

  /// `key` is an entry id or an ornament id. Returns whether an entry was removed.
  async fn remove(&self, buyer_id: &str, key: &str) -> AppResult<bool>;

  /// Removes the ornament if wishlisted, adds it otherwise. Returns whether it is
  /// wishlisted afterwards.
  async fn toggle(&self, buyer_id: &str, ornament: OrderableItem) -> AppResult<bool>;
}

#[derive(Debug, Default)]
pub struct InMemoryWishlistRepository {
  lists: RwLock<HashMap<String, Vec<WishlistEntry>>>,
}

impl InMemoryWishlistRepository {
  pub fn new() -> Self {
    Self::default()
  }
}

fn ensure_identified(ornament: &OrderableItem) -> AppResult<()> {
  if ornament.has_identifier() {
    Ok(())
  } else {
    Err(AppError::Validation("Item has no identifier.".to_string()))
  }
}

#[async_trait]
impl WishlistRepository for InMemoryWishlistRepository {
  async fn load(&self, buyer_id: &str) -> AppResult<Vec<WishlistEntry>> {
    Ok(self.lists.read().get(buyer_id).cloned().unwrap_or_default())
  }

  async fn add(&self, buyer_id: &str, ornament: OrderableItem) -> AppResult<WishlistEntry> {
    ensure_identified(&ornament)?;
    let mut lists = self.lists.write();
    let entries = lists.entry(buyer_id.to_string()).or_default();
    if let Some(existing) = entries.iter().find(|e| e.ornament.id == ornament.id) {
      return Ok(existing.clone());
    }
    let entry = WishlistEntry {
      id: Uuid::new_v4(),
      ornament,
    };
    entries.push(entry.clone());
    Ok(entry)
  }

  async fn remove(&self, buyer_id: &str, key: &str) -> AppResult<bool> {
    let mut lists = self.lists.write();
    let Some(entries) = lists.get_mut(buyer_id) else {
      return Ok(false);
    };
    let before = entries.len();
    entries.retain(|e| !e.matches(key));
    Ok(entries.len() != before)
  }

  #[instrument(skip(self, ornament), fields(ornament_id = %ornament.id))]
  async fn toggle(&self, buyer_id: &str, ornament: OrderableItem) -> AppResult<bool> {
    ensure_identified(&ornament)?;
    // One write lock so a double click cannot add the same ornament twice.
    let mut lists = self.lists.write();
    let entries = lists.entry(buyer_id.to_string()).or_default();
    let before = entries.len();
    entries.retain(|e| !e.matches(&ornament.id));
    let wishlisted = if entries.len() == before {
      entries.push(WishlistEntry {
        id: Uuid::new_v4(),
        ornament,
      });
      true
    } else {
      false
    };
    debug!(wishlisted, entries = entries.len(), "Wishlist toggled.");
    Ok(wishlisted)
  }
}

/// Moves a wishlisted ornament into the cart with quantity 1. The wishlist entry is
/// dropped only once the cart accepted the item. Returns `false` when `key` names
/// nothing on the wishlist.
#[instrument(skip(wishlist, carts))]
pub async fn move_to_cart(
  wishlist: &dyn WishlistRepository,
  carts: &dyn CartRepository,
  buyer_id: &str,
  key: &str,
) -> AppResult<bool> {
  let entries = wishlist.load(buyer_id).await?;
  let Some(entry) = entries.into_iter().find(|e| e.matches(key)) else {
    return Ok(false);
  };
  carts.add(buyer_id, entry.ornament.clone(), 1).await?;
  wishlist.remove(buyer_id, &entry.id.to_string()).await?;
  info!(ornament_id = %entry.ornament.id, "Moved wishlist item to cart.");
  Ok(true)
}
