//! # convoy
//!
//! Define and run multi-instance applications against a remote
//! virtualization/container control plane, from a compose-style manifest.
//!
//! ## Features
//!
//! - **Dependency-aware ordering**: services declare `depends_on`; create
//!   runs dependencies first, destroy runs the exact reverse
//! - **Deterministic sequencing**: unconstrained resources are ordered
//!   lexicographically, so plans and dry runs are reproducible
//! - **Partial-failure aggregation**: a failed resource never blocks its
//!   siblings; every failure is reported at the end of the batch
//! - **Multi-remote resolution**: `remote:name` qualified resources bind to
//!   their own control-plane endpoint
//! - **Cancellation**: interrupting a run stops new operations without
//!   rolling back completed ones
//!
//! ## Quick Start
//!
//! ```no_run
//! use convoy::config::{Overrides, Parser, Stack};
//! use convoy::orchestrator::Orchestrator;
//!
//! # async fn example() -> Result<(), convoy::Error> {
//! let parser = Parser::new();
//! let manifest = parser.load_manifest("convoy.yaml")?;
//! let stack = Stack::from_manifest(manifest, &Overrides::default());
//!
//! let orchestrator = Orchestrator::from_stack(stack)?;
//! orchestrator.apply_create().await?;
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod dependency;
pub mod error;
pub mod orchestrator;
pub mod output;
pub mod remote;

// Re-export commonly used types
pub use config::{Manifest, Overrides, Parser, Stack};
pub use dependency::Graph;
pub use error::{Aggregate, Error, ResourceKind, Result};
pub use orchestrator::Orchestrator;
pub use remote::{ControlPlane, Resolver};
