//! Dependency-aware lifecycle orchestration.

mod core;
mod lifecycle;

pub use core::{Orchestrator, PlannedOp};
