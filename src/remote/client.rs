//! Centralized control-plane CLI client.
//!
//! All control-plane interactions go through [`ControlPlane`] implementations.
//! The default [`CliClient`] shells out to the control-plane CLI (`incus`)
//! with consistent timeout handling and error mapping to [`RemoteError`],
//! keeping `Command::new(..)` construction in a single place.

use super::RemoteError;
use async_trait::async_trait;
use std::collections::BTreeMap;
use std::process::Output;
use std::time::Duration;

/// Default timeout for one remote create/delete round trip.
pub const DEFAULT_REMOTE_TIMEOUT: Duration = Duration::from_secs(120);

/// Wire-level description of a network to create.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NetworkSpec {
    pub name: String,
    /// Network driver type, e.g. `bridge` or `ovn`.
    pub kind: String,
    /// Driver config keys. OVN networks carry `network=<uplink>` here.
    pub config: BTreeMap<String, String>,
}

impl NetworkSpec {
    pub fn new(name: impl Into<String>, kind: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: kind.into(),
            config: BTreeMap::new(),
        }
    }

    /// The uplink network, if one was configured (OVN only).
    pub fn uplink(&self) -> Option<&str> {
        self.config.get("network").map(String::as_str)
    }
}

/// Wire-level description of an instance to create.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstanceSpec {
    pub name: String,
    /// Image reference, e.g. `images:debian/12`.
    pub image: String,
    /// Networks the instance attaches to.
    pub networks: Vec<String>,
}

/// Synchronous verbs exposed by the remote control plane.
///
/// Each call is one blocking round trip; the orchestrator awaits it before
/// touching any resource that depends on the current one. Implementations
/// must not retry internally — failure handling is the orchestrator's job.
#[async_trait]
pub trait ControlPlane: Send + Sync {
    async fn create_network(&self, spec: &NetworkSpec) -> Result<(), RemoteError>;
    async fn delete_network(&self, name: &str) -> Result<(), RemoteError>;
    async fn create_instance(&self, spec: &InstanceSpec) -> Result<(), RemoteError>;
    async fn delete_instance(&self, name: &str) -> Result<(), RemoteError>;
}

/// Control-plane client that drives the `incus` CLI for one remote.
///
/// Construct one per remote endpoint and thread it through the resolver —
/// the struct is cheap to clone.
#[derive(Debug, Clone)]
pub struct CliClient {
    remote: String,
    project: Option<String>,
    timeout: Duration,
}

impl CliClient {
    pub fn new(remote: impl Into<String>, project: Option<String>) -> Self {
        Self {
            remote: remote.into(),
            project,
            timeout: DEFAULT_REMOTE_TIMEOUT,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn remote(&self) -> &str {
        &self.remote
    }

    /// Qualify a resource name with this client's remote.
    fn qualified(&self, name: &str) -> String {
        format!("{}:{}", self.remote, name)
    }

    /// Run a control-plane command with a timeout, returning raw Output.
    async fn run(&self, args: &[String]) -> Result<Output, RemoteError> {
        let mut full_args: Vec<String> = args.to_vec();
        if let Some(project) = &self.project {
            full_args.push("--project".to_string());
            full_args.push(project.clone());
        }

        let cmd_str = format!("incus {}", full_args.join(" "));

        let result = tokio::time::timeout(
            self.timeout,
            tokio::process::Command::new("incus")
                .args(&full_args)
                .output(),
        )
        .await;

        match result {
            Ok(Ok(output)) => Ok(output),
            Ok(Err(e)) => Err(RemoteError::exec_failed(cmd_str, e)),
            Err(_) => Err(RemoteError::timeout(cmd_str, self.timeout)),
        }
    }

    /// Run a control-plane command, returning Ok only on exit 0.
    async fn run_success(&self, args: &[String]) -> Result<(), RemoteError> {
        let output = self.run(args).await?;
        if output.status.success() {
            Ok(())
        } else {
            let cmd_str = format!("incus {}", args.join(" "));
            Err(RemoteError::failed(cmd_str, &output))
        }
    }
}

#[async_trait]
impl ControlPlane for CliClient {
    async fn create_network(&self, spec: &NetworkSpec) -> Result<(), RemoteError> {
        let mut args = vec![
            "network".to_string(),
            "create".to_string(),
            self.qualified(&spec.name),
            format!("--type={}", spec.kind),
        ];
        for (key, value) in &spec.config {
            args.push(format!("{}={}", key, value));
        }
        self.run_success(&args).await
    }

    async fn delete_network(&self, name: &str) -> Result<(), RemoteError> {
        let args = vec![
            "network".to_string(),
            "delete".to_string(),
            self.qualified(name),
        ];
        self.run_success(&args).await
    }

    async fn create_instance(&self, spec: &InstanceSpec) -> Result<(), RemoteError> {
        let mut args = vec![
            "launch".to_string(),
            spec.image.clone(),
            self.qualified(&spec.name),
        ];
        for network in &spec.networks {
            args.push("--network".to_string());
            args.push(network.clone());
        }
        self.run_success(&args).await
    }

    async fn delete_instance(&self, name: &str) -> Result<(), RemoteError> {
        let args = vec![
            "delete".to_string(),
            self.qualified(name),
            "--force".to_string(),
        ];
        self.run_success(&args).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn network_spec_exposes_uplink_from_config() {
        let mut spec = NetworkSpec::new("net-b", "ovn");
        spec.config.insert("network".to_string(), "up0".to_string());
        assert_eq!(spec.uplink(), Some("up0"));

        let plain = NetworkSpec::new("net-a", "bridge");
        assert_eq!(plain.uplink(), None);
    }

    #[test]
    fn cli_client_qualifies_names_with_remote() {
        let client = CliClient::new("prod", None);
        assert_eq!(client.qualified("db"), "prod:db");
    }
}
