// demos/checkout_app/src/services/order_gateway.rs
use crate::errors::{AppError, Result as AppResult};
use async_trait::async_trait;
use parking_lot::Mutex;
use rust_decimal::Decimal;
use serde_json::Value;
use std::str::FromStr;
use std::time::Duration;
use tracing::{info, instrument, warn};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq)]
pub struct OrderReceipt {
  pub order_id: Uuid,
  pub status: String,
}

/// The order-creation endpoint. Receives the serialized payload body.
#[async_trait]
pub trait OrderGateway: Send + Sync {
  async fn submit(&self, body: &Value) -> AppResult<OrderReceipt>;
}

/// Stands in for the order service. Accepts everything except a configured total.
#[derive(Debug)]
pub struct MockOrderGateway {
  fail_total: Option<Decimal>,
  latency: Duration,
  accepted: Mutex<Vec<Value>>,
}

impl MockOrderGateway {
  pub fn new(fail_total: Option<Decimal>) -> Self {
    Self {
      fail_total,
      latency: Duration::from_millis(50),
      accepted: Mutex::new(Vec::new()),
    }
  }

  pub fn with_latency(mut self, latency: Duration) -> Self {
    self.latency = latency;
    self
  }

  pub fn accepted(&self) -> Vec<Value> {
    self.accepted.lock().clone()
  }
}

#[async_trait]
impl OrderGateway for MockOrderGateway {
  #[instrument(skip_all, fields(user_id = %body["userId"], total = %body["total"]))]
  async fn submit(&self, body: &Value) -> AppResult<OrderReceipt> {
    info!("Simulating order submission.");
    tokio::time::sleep(self.latency).await; // Simulate network latency

    let total = body["total"]
      .as_number()
      .and_then(|n| Decimal::from_str(&n.to_string()).ok())
      .ok_or_else(|| AppError::Gateway("payload has no numeric total".to_string()))?;
    if self.fail_total == Some(total) {
      warn!("Mock order service REJECTED the submission.");
      return Err(AppError::Gateway(format!("order service rejected total {}", total)));
    }

    self.accepted.lock().push(body.clone());
    let receipt = OrderReceipt {
      order_id: Uuid::new_v4(),
      status: body["status"].as_str().unwrap_or("PENDING").to_string(),
    };
    info!(order_id = %receipt.order_id, "Mock order service accepted the submission.");
    Ok(receipt)
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use serde_json::json;

  #[tokio::test]
  async fn accepts_and_records_submissions() {
    let gateway = MockOrderGateway::new(None).with_latency(Duration::ZERO);
    let receipt = gateway.submit(&json!({ "userId": "b1", "total": 1200.0, "status": "PENDING" })).await.unwrap();
    assert_eq!(receipt.status, "PENDING");
    assert_eq!(gateway.accepted().len(), 1);
  }

  #[tokio::test]
  async fn rejects_the_configured_total() {
    let gateway = MockOrderGateway::new(Some(Decimal::from(1200))).with_latency(Duration::ZERO);
    let result = gateway.submit(&json!({ "userId": "b1", "total": 1200.0 })).await;
    assert!(matches!(result, Err(AppError::Gateway(_))));
    assert!(gateway.accepted().is_empty());
  }

  #[tokio::test]
  async fn fractional_totals_compare_as_decimals() {
    let gateway = MockOrderGateway::new(Some(Decimal::new(11505, 1))).with_latency(Duration::ZERO);
    assert!(gateway.submit(&json!({ "userId": "b1", "total": 1150.5 })).await.is_err());
    assert!(gateway.submit(&json!({ "userId": "b1", "total": 1150.51 })).await.is_ok());
    assert!(gateway.submit(&json!({ "userId": "b1", "total": 1150 })).await.is_ok());
  }

  #[tokio::test]
  async fn rejects_bodies_without_total() {
    let gateway = MockOrderGateway::new(None).with_latency(Duration::ZERO);
    assert!(gateway.submit(&json!({ "userId": "b1" })).await.is_err());
  }
}
