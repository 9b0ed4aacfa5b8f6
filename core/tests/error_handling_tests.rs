// tests/error_handling_tests.rs
mod common;
use common::*;
use ornament_pricing::{
  steps, CheckoutRequest, MissingSelection, OrderAssembler, OrderInput, Pipeline, PipelineControl, PipelineError,
  PricingError, PricingResult,
};
use serial_test::serial;

#[test]
#[serial]
fn test_pipeline_run_catches_handler_missing() {
  setup_tracing();
  let pipeline = Pipeline::<TestContext, TestError>::new(&[("missing", false, None)]);
  let mut ctx = TestContext::default();
  match pipeline.run(&mut ctx) {
    Err(TestError::Pipeline(s)) => {
      assert!(s.contains("HandlerMissing"));
      assert!(s.contains("missing"));
    }
    other => panic!("Expected TestError::Pipeline(HandlerMissing), got {:?}", other),
  }
}

// A pipeline whose error type IS PricingError.
#[test]
#[serial]
fn test_pipeline_with_pricing_error_type() {
  setup_tracing();
  let mut pipeline = Pipeline::<TestContext, PricingError>::new(&[("task", false, None)]);
  pipeline.on_step("task", |ctx: &mut TestContext| -> PricingResult<PipelineControl> {
    ctx.counter = 1;
    Ok(PipelineControl::Continue)
  });
  let mut ctx = TestContext::default();
  assert!(pipeline.run(&mut ctx).is_ok());
  assert_eq!(ctx.counter, 1);

  let unconfigured = Pipeline::<TestContext, PricingError>::new(&[("lonely", false, None)]);
  match unconfigured.run(&mut TestContext::default()) {
    Err(PricingError::Pipeline(PipelineError::HandlerMissing { step_name })) => assert_eq!(step_name, "lonely"),
    other => panic!("Expected PricingError::Pipeline, got {:?}", other),
  }
}

fn valid_request() -> CheckoutRequest {
  CheckoutRequest::new("buyer-1", OrderInput::Single(ornament("orn-1", "Tilhari", 500)))
    .with_shipping("INSIDE_THE_VALLEY")
    .with_payment("cod")
    .with_buyer(buyer())
}

#[test]
#[serial]
fn test_anyhow_hook_failure_becomes_hook_error() {
  setup_tracing();
  let mut assembler = OrderAssembler::default();
  assembler
    .pipeline_mut()
    .after_step(steps::FINALIZE_TOTALS, |_ctx| -> anyhow::Result<PipelineControl> {
      anyhow::bail!("audit sink offline")
    });

  match assembler.assemble_at(&valid_request(), fixed_now()) {
    Err(err @ PricingError::Hook { .. }) => assert_eq!(err.to_string(), "Checkout hook failed: audit sink offline"),
    other => panic!("Expected PricingError::Hook, got {:?}", other),
  }
}

#[test]
#[serial]
fn test_hook_returning_stop_halts_assembly() {
  setup_tracing();
  let mut assembler = OrderAssembler::default();
  assembler
    .pipeline_mut()
    .before_step(steps::RESOLVE_PAYMENT, |_ctx| -> PricingResult<PipelineControl> {
      Ok(PipelineControl::Stop)
    });

  match assembler.assemble_at(&valid_request(), fixed_now()) {
    Err(PricingError::Halted { step }) => assert_eq!(step, steps::RESOLVE_PAYMENT),
    other => panic!("Expected PricingError::Halted, got {:?}", other),
  }
}

#[test]
#[serial]
fn test_removing_a_required_step_is_reported() {
  setup_tracing();
  let mut assembler = OrderAssembler::default();
  assembler.pipeline_mut().remove_step(steps::RESOLVE_PAYMENT);

  match assembler.assemble_at(&valid_request(), fixed_now()) {
    Err(PricingError::MissingRequiredSelection { missing }) => assert_eq!(missing, MissingSelection::Payment),
    other => panic!("Expected MissingRequiredSelection, got {:?}", other),
  }
}
