// ornament_pricing/src/pipeline/mod.rs

//! A synchronous, named-step pipeline over a mutable context.
//!
//! Each step may carry `before`, `on` and `after` handlers. Handlers receive the
//! context by `&mut` and answer with a [`PipelineControl`]. The order assembler
//! runs its pricing steps on this.

pub mod control;
pub mod definition;
pub mod execution;
pub mod hooks;
pub mod step;

pub use control::{PipelineControl, PipelineResult};
pub use definition::{Handler, Pipeline};
pub use step::{SkipCondition, StepDef};
