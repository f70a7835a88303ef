//! Manifest parsing and the application model.
//!
//! - `types` - Raw manifest and the finalized [`Stack`] model
//! - `service` - Service declarations (`Service`, `DependsOn`)
//! - `network` - Network declarations and default precedence
//! - `parser` - YAML manifest loading

mod network;
mod parser;
mod service;
mod types;

pub use network::*;
pub use parser::*;
pub use service::*;
pub use types::*;
