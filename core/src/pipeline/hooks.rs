// ornament_pricing/src/pipeline/hooks.rs

//! Registration of `before`, `on` and `after` handlers for pipeline steps.

use crate::error::PipelineError;
use crate::pipeline::control::PipelineControl;
use crate::pipeline::definition::{Handler, Pipeline};

impl<TData, Err> Pipeline<TData, Err>
where
  TData: 'static,
  Err: std::error::Error + From<PipelineError> + Send + Sync + 'static,
{
  /// Registers a `before` handler for `step_name`.
  ///
  /// The handler may fail with any error convertible into the pipeline's `Err`,
  /// so callers can bring `anyhow::Result` closures to a pipeline whose error is
  /// a domain enum.
  ///
  /// # Panics
  /// If the step does not exist.
  pub fn before_step<UserErr>(
    &mut self,
    step_name: &str,
    handler_fn: impl Fn(&mut TData) -> Result<PipelineControl, UserErr> + Send + Sync + 'static,
  ) where
    UserErr: Into<Err> + 'static,
  {
    self.ensure_step_exists(step_name);
    let handler = wrap(handler_fn);
    self.before.entry(step_name.to_string()).or_default().push(handler);
  }

  /// Registers an `on` handler for `step_name`. See [`Pipeline::before_step`].
  pub fn on_step<UserErr>(
    &mut self,
    step_name: &str,
    handler_fn: impl Fn(&mut TData) -> Result<PipelineControl, UserErr> + Send + Sync + 'static,
  ) where
    UserErr: Into<Err> + 'static,
  {
    self.ensure_step_exists(step_name);
    let handler = wrap(handler_fn);
    self.on.entry(step_name.to_string()).or_default().push(handler);
  }

  /// Registers an `after` handler for `step_name`. See [`Pipeline::before_step`].
  pub fn after_step<UserErr>(
    &mut self,
    step_name: &str,
    handler_fn: impl Fn(&mut TData) -> Result<PipelineControl, UserErr> + Send + Sync + 'static,
  ) where
    UserErr: Into<Err> + 'static,
  {
    self.ensure_step_exists(step_name);
    let handler = wrap(handler_fn);
    self.after.entry(step_name.to_string()).or_default().push(handler);
  }

  pub fn handler_count(&self, step_name: &str) -> usize {
    [&self.before, &self.on, &self.after]
      .iter()
      .map(|phase| phase.get(step_name).map_or(0, Vec::len))
      .sum()
  }
}

fn wrap<TData, Err, UserErr>(
  handler_fn: impl Fn(&mut TData) -> Result<PipelineControl, UserErr> + Send + Sync + 'static,
) -> Handler<TData, Err>
where
  TData: 'static,
  Err: 'static,
  UserErr: Into<Err> + 'static,
{
  Box::new(move |ctx: &mut TData| handler_fn(ctx).map_err(Into::into))
}
