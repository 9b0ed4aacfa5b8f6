// tests/common/mod.rs
#![allow(dead_code)] // Not every test file uses every helper

use chrono::{DateTime, Duration, NaiveDate, TimeZone, Utc};
use ornament_pricing::{BuyerDetails, OrderableItem, PipelineControl, PipelineError, RentalWindow};
use rust_decimal::Decimal;
use std::sync::{
  atomic::{AtomicUsize, Ordering},
  Arc,
};
use tracing::Level;

// --- Contexts for pipeline tests ---
#[derive(Clone, Debug, Default)]
pub struct TestContext {
  pub counter: i32,
  pub message: String,
  pub steps_executed: Vec<String>,
  pub should_stop_at: Option<String>,
}

#[derive(Debug, thiserror::Error, Clone, PartialEq, Eq)]
pub enum TestError {
  #[error("Pipeline framework error: {0}")]
  Pipeline(String),

  #[error("Test handler failed: {0}")]
  Handler(String),
}

impl From<PipelineError> for TestError {
  fn from(pe: PipelineError) -> Self {
    TestError::Pipeline(format!("{:?}", pe))
  }
}

pub type TestHandler = Box<dyn Fn(&mut TestContext) -> Result<PipelineControl, TestError> + Send + Sync>;

pub fn create_simple_handler(step_name: &'static str, message_to_append: &'static str) -> TestHandler {
  Box::new(move |ctx: &mut TestContext| {
    ctx.counter += 1;
    ctx.message.push_str(message_to_append);
    ctx.steps_executed.push(step_name.to_string());
    HANDLER_EXEC_COUNTER.fetch_add(1, Ordering::SeqCst);
    tracing::debug!(target: "test_handlers", step = %step_name, "executed, counter: {}", ctx.counter);
    if ctx.should_stop_at.as_deref() == Some(step_name) {
      return Ok(PipelineControl::Stop);
    }
    Ok(PipelineControl::Continue)
  })
}

pub fn create_failing_handler(step_name: &'static str, error_message: &'static str) -> TestHandler {
  Box::new(move |ctx: &mut TestContext| {
    ctx.steps_executed.push(step_name.to_string());
    Err(TestError::Handler(error_message.to_string()))
  })
}

// --- Tracing, once per test binary ---
use once_cell::sync::Lazy;
static TRACING_INIT: Lazy<()> = Lazy::new(|| {
  tracing_subscriber::fmt()
    .with_max_level(Level::DEBUG)
    .with_test_writer()
    .try_init()
    .ok();
});

pub fn setup_tracing() {
  Lazy::force(&TRACING_INIT);
}

pub static HANDLER_EXEC_COUNTER: Lazy<Arc<AtomicUsize>> = Lazy::new(|| Arc::new(AtomicUsize::new(0)));

pub fn reset_counters() {
  HANDLER_EXEC_COUNTER.store(0, Ordering::SeqCst);
}

// --- Checkout fixtures ---
pub fn ornament(id: &str, title: &str, price: i64) -> OrderableItem {
  OrderableItem::new(id, title, Decimal::from(price))
}

pub fn buyer() -> BuyerDetails {
  BuyerDetails {
    first_name: "Sita".into(),
    last_name: "Shrestha".into(),
    country: "Nepal".into(),
    address: "Jhamsikhel".into(),
    city: "Lalitpur".into(),
    province: "Province 3".into(),
    phone: "9800000000".into(),
    email: "sita@example.com".into(),
  }
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
  NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// A window covering `span` calendar dates, starting 2024-04-01.
pub fn window_spanning(span: u32) -> RentalWindow {
  let start = date(2024, 4, 1);
  let end = start + Duration::days(i64::from(span) - 1);
  RentalWindow::new(start, end).unwrap()
}

pub fn fixed_now() -> DateTime<Utc> {
  Utc.with_ymd_and_hms(2024, 4, 1, 9, 30, 0).unwrap()
}
