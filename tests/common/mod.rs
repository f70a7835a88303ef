//! Shared test double for the remote control plane.
#![allow(dead_code)]

use async_trait::async_trait;
use convoy::remote::{ControlPlane, InstanceSpec, NetworkSpec, RemoteError};
use parking_lot::Mutex;
use tokio_util::sync::CancellationToken;

/// Records every verb issued against it; individual calls can be made to
/// fail by name to exercise partial-failure paths, or to trip a
/// cancellation token mid-batch.
#[derive(Default)]
pub struct RecordingPlane {
    calls: Mutex<Vec<String>>,
    fail_on: Mutex<Vec<String>>,
    cancel_on: Mutex<Option<(String, CancellationToken)>>,
}

impl RecordingPlane {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make the call whose rendered form starts with `prefix` fail.
    pub fn fail_on(&self, prefix: &str) {
        self.fail_on.lock().push(prefix.to_string());
    }

    /// Cancel `token` while serving the call whose rendered form starts
    /// with `prefix`. The call itself still succeeds.
    pub fn cancel_on(&self, prefix: &str, token: CancellationToken) {
        *self.cancel_on.lock() = Some((prefix.to_string(), token));
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().clone()
    }

    fn record(&self, call: String) -> Result<(), RemoteError> {
        let failing = self
            .fail_on
            .lock()
            .iter()
            .any(|prefix| call.starts_with(prefix.as_str()));
        if let Some((prefix, token)) = &*self.cancel_on.lock() {
            if call.starts_with(prefix.as_str()) {
                token.cancel();
            }
        }
        self.calls.lock().push(call.clone());
        if failing {
            Err(RemoteError::message(format!("injected failure for {}", call)))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl ControlPlane for RecordingPlane {
    async fn create_network(&self, spec: &NetworkSpec) -> Result<(), RemoteError> {
        let mut call = format!("create-network {} type={}", spec.name, spec.kind);
        for (key, value) in &spec.config {
            call.push_str(&format!(" {}={}", key, value));
        }
        self.record(call)
    }

    async fn delete_network(&self, name: &str) -> Result<(), RemoteError> {
        self.record(format!("delete-network {}", name))
    }

    async fn create_instance(&self, spec: &InstanceSpec) -> Result<(), RemoteError> {
        self.record(format!("create-instance {} image={}", spec.name, spec.image))
    }

    async fn delete_instance(&self, name: &str) -> Result<(), RemoteError> {
        self.record(format!("delete-instance {}", name))
    }
}
