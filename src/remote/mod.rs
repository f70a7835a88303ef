//! Remote control-plane access: client verbs and endpoint resolution.

mod client;
mod error;
mod resolver;

pub use client::{CliClient, ControlPlane, InstanceSpec, NetworkSpec, DEFAULT_REMOTE_TIMEOUT};
pub use error::RemoteError;
pub use resolver::{Resolved, Resolver};
