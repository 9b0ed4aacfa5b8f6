// ornament_pricing/src/pipeline/definition.rs

//! The `Pipeline<TData, Err>` struct, its construction and structural edits.

use crate::error::PipelineError;
use crate::pipeline::control::PipelineControl;
use crate::pipeline::step::{SkipCondition, StepDef};
use std::collections::HashMap;

/// A step handler. Runs synchronously against the context.
pub type Handler<TData, Err> = Box<dyn Fn(&mut TData) -> Result<PipelineControl, Err> + Send + Sync>;

/// Ordered named steps over a context `TData`, with handlers returning `Err`.
///
/// `Err` must absorb [`PipelineError`] so framework faults (a required step with
/// no handler) surface through the same error type as handler failures.
pub struct Pipeline<TData, Err>
where
  TData: 'static,
  Err: std::error::Error + From<PipelineError> + Send + Sync + 'static,
{
  pub(crate) steps: Vec<StepDef<TData>>,
  pub(crate) before: HashMap<String, Vec<Handler<TData, Err>>>,
  pub(crate) on: HashMap<String, Vec<Handler<TData, Err>>>,
  pub(crate) after: HashMap<String, Vec<Handler<TData, Err>>>,
}

impl<TData, Err> Pipeline<TData, Err>
where
  TData: 'static,
  Err: std::error::Error + From<PipelineError> + Send + Sync + 'static,
{
  /// Creates a pipeline from `(name, optional, skip_if)` triples, in run order.
  pub fn new(step_defs: &[(&str, bool, Option<SkipCondition<TData>>)]) -> Self {
    let steps = step_defs
      .iter()
      .map(|(name, optional, skip_if)| StepDef {
        name: (*name).to_string(),
        optional: *optional,
        skip_if: skip_if.clone(),
      })
      .collect();

    Self {
      steps,
      before: HashMap::new(),
      on: HashMap::new(),
      after: HashMap::new(),
    }
  }

  pub fn step_names(&self) -> Vec<&str> {
    self.steps.iter().map(|s| s.name.as_str()).collect()
  }

  pub fn has_step(&self, step_name: &str) -> bool {
    self.steps.iter().any(|s| s.name == step_name)
  }

  // A typo in a step name is a setup bug, not a runtime condition.
  fn position_of(&self, step_name: &str) -> usize {
    match self.steps.iter().position(|s| s.name == step_name) {
      Some(idx) => idx,
      None => panic!("Pipeline setup error: step '{}' not found in pipeline definition.", step_name),
    }
  }

  pub(crate) fn ensure_step_exists(&self, step_name: &str) {
    self.position_of(step_name);
  }

  fn ensure_step_not_exists(&self, step_name: &str) {
    if self.has_step(step_name) {
      panic!("Pipeline setup error: step '{}' already exists in pipeline definition.", step_name);
    }
  }

  /// # Panics
  /// If `existing_step_name` is unknown or `new_step_name` is already taken.
  pub fn insert_before_step<S: Into<String>>(
    &mut self,
    existing_step_name: &str,
    new_step_name: S,
    optional: bool,
    skip_if: Option<SkipCondition<TData>>,
  ) {
    let idx = self.position_of(existing_step_name);
    let name: String = new_step_name.into();
    self.ensure_step_not_exists(&name);
    self.steps.insert(idx, StepDef { name, optional, skip_if });
  }

  /// # Panics
  /// If `existing_step_name` is unknown or `new_step_name` is already taken.
  pub fn insert_after_step<S: Into<String>>(
    &mut self,
    existing_step_name: &str,
    new_step_name: S,
    optional: bool,
    skip_if: Option<SkipCondition<TData>>,
  ) {
    let idx = self.position_of(existing_step_name);
    let name: String = new_step_name.into();
    self.ensure_step_not_exists(&name);
    self.steps.insert(idx + 1, StepDef { name, optional, skip_if });
  }

  /// Removes a step and its handlers. Unknown names are a no-op.
  pub fn remove_step(&mut self, step_name: &str) {
    if let Some(idx) = self.steps.iter().position(|s| s.name == step_name) {
      self.steps.remove(idx);
      self.before.remove(step_name);
      self.on.remove(step_name);
      self.after.remove(step_name);
    }
  }

  pub fn set_optional(&mut self, step_name: &str, optional: bool) {
    let idx = self.position_of(step_name);
    self.steps[idx].optional = optional;
  }

  pub fn set_skip_condition(&mut self, step_name: &str, skip_if: Option<SkipCondition<TData>>) {
    let idx = self.position_of(step_name);
    self.steps[idx].skip_if = skip_if;
  }
}
