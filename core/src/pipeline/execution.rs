// ornament_pricing/src/pipeline/execution.rs

//! `Pipeline::run()`: walks the steps in order and executes their handlers.

use crate::error::PipelineError;
use crate::pipeline::control::{PipelineControl, PipelineResult};
use crate::pipeline::definition::{Handler, Pipeline};
use tracing::{event, instrument, span, Level};

impl<TData, Err> Pipeline<TData, Err>
where
  TData: 'static,
  Err: std::error::Error + From<PipelineError> + Send + Sync + 'static,
{
  /// Executes every step against `ctx`.
  ///
  /// Per step: evaluate `skip_if`, then run `before`, `on` and `after` handlers in
  /// registration order. The first error aborts the run; the first `Stop` ends it
  /// with `PipelineResult::Stopped`. A non-optional step with no handlers at all
  /// fails with `PipelineError::HandlerMissing`.
  #[instrument(
    name = "Pipeline::run",
    skip_all,
    fields(
      pipeline_context_type = %std::any::type_name::<TData>(),
      num_steps = self.steps.len(),
    ),
    err(Display)
  )]
  pub fn run(&self, ctx: &mut TData) -> Result<PipelineResult, Err> {
    event!(Level::DEBUG, "Pipeline execution starting.");

    for (step_idx, step_def) in self.steps.iter().enumerate() {
      let step_name = step_def.name.as_str();
      let step_span = span!(
        Level::DEBUG,
        "pipeline_step",
        step_name = step_name,
        step_index = step_idx,
        optional = step_def.optional
      );
      let _step_guard = step_span.enter();

      if let Some(skip_if) = &step_def.skip_if {
        if skip_if(ctx) {
          event!(Level::DEBUG, "Step skipped due to 'skip_if' condition.");
          continue;
        }
      }

      if self.handler_count(step_name) == 0 {
        if step_def.optional {
          event!(Level::DEBUG, "Optional step has no handlers, skipping.");
          continue;
        }
        event!(Level::ERROR, "Non-optional step has no handlers.");
        return Err(Err::from(PipelineError::HandlerMissing {
          step_name: step_def.name.clone(),
        }));
      }

      for (phase, handlers) in [("before", &self.before), ("on", &self.on), ("after", &self.after)] {
        if let Some(handlers) = handlers.get(step_name) {
          if run_phase(phase, handlers, ctx)? == PipelineControl::Stop {
            event!(Level::INFO, phase, "Pipeline stopped by a handler.");
            return Ok(PipelineResult::Stopped {
              step: step_def.name.clone(),
            });
          }
        }
      }
      event!(Level::TRACE, "Step finished.");
    }

    event!(Level::DEBUG, "Pipeline execution completed.");
    Ok(PipelineResult::Completed)
  }
}

fn run_phase<TData, Err>(
  phase: &'static str,
  handlers: &[Handler<TData, Err>],
  ctx: &mut TData,
) -> Result<PipelineControl, Err>
where
  Err: std::error::Error,
{
  for (handler_idx, handler_fn) in handlers.iter().enumerate() {
    match handler_fn(ctx) {
      Ok(PipelineControl::Continue) => {}
      Ok(PipelineControl::Stop) => return Ok(PipelineControl::Stop),
      Err(e) => {
        event!(Level::WARN, phase, handler_index = handler_idx, error = %e, "Handler failed.");
        return Err(e);
      }
    }
  }
  Ok(PipelineControl::Continue)
}
