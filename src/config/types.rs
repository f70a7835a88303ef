//! Core application-model types.
//!
//! The raw [`Manifest`] mirrors `convoy.yaml`; [`Stack`] is the finalized,
//! read-only model handed to the orchestrator after CLI/env overrides have
//! been applied. Ordered maps keep every walk over services and networks
//! deterministic.

use super::{Network, NetworkDefaults, Service};
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Root structure of `convoy.yaml`.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Manifest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Default target remote for every resource without a qualifier.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remote: Option<String>,

    /// Control-plane project to operate in.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project: Option<String>,

    /// Run-level network defaults.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub network: Option<NetworkDefaults>,

    #[serde(default)]
    pub services: BTreeMap<String, Service>,

    #[serde(default)]
    pub networks: BTreeMap<String, Network>,
}

/// Values resolved upstream of the model (flags and environment) that
/// override what the manifest declares.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub remote: Option<String>,
    pub network_type: Option<String>,
    pub network_uplink: Option<String>,
    pub project: Option<String>,
}

/// The finalized application model, immutable for the rest of the run.
#[derive(Debug, Clone)]
pub struct Stack {
    pub name: String,
    pub services: BTreeMap<String, Service>,
    pub networks: BTreeMap<String, Network>,
    pub network_defaults: NetworkDefaults,
    pub remote: String,
    pub project: Option<String>,
}

impl Stack {
    /// Finalize a parsed manifest: apply overrides, fill defaults.
    ///
    /// Precedence for remote, project, and network defaults:
    /// flag/env override > manifest value > built-in default.
    pub fn from_manifest(manifest: Manifest, overrides: &Overrides) -> Self {
        let mut network_defaults = manifest.network.unwrap_or_default();
        if let Some(kind) = &overrides.network_type {
            network_defaults.kind = kind.clone();
        }
        if let Some(uplink) = &overrides.network_uplink {
            network_defaults.uplink = uplink.clone();
        }

        let remote = overrides
            .remote
            .clone()
            .or(manifest.remote)
            .unwrap_or_else(|| "local".to_string());

        let project = overrides.project.clone().or(manifest.project);

        Stack {
            name: manifest.name.unwrap_or_else(|| "convoy".to_string()),
            services: manifest.services,
            networks: manifest.networks,
            network_defaults,
            remote,
            project,
        }
    }

    /// Structural checks beyond what serde enforces.
    ///
    /// Dependency references are checked by the graph builder, which reports
    /// the offending edge; this covers the rest.
    pub fn validate(&self) -> Result<()> {
        for (name, service) in &self.services {
            if service.image.is_empty() {
                return Err(Error::Validation(format!(
                    "service '{}' has no image",
                    name
                )));
            }
            for attachment in &service.networks {
                let bare = attachment.split_once(':').map_or(attachment.as_str(), |(_, n)| n);
                if !self.networks.contains_key(attachment)
                    && !self.networks.contains_key(bare)
                {
                    return Err(Error::Validation(format!(
                        "service '{}' attaches to undeclared network '{}'",
                        name, attachment
                    )));
                }
            }
        }

        for (name, network) in &self.networks {
            if network.external {
                continue;
            }
            let kind = network.effective_type(&self.network_defaults);
            if kind == "ovn" && network.effective_uplink(&self.network_defaults).is_empty() {
                return Err(Error::Validation(format!(
                    "ovn network '{}' has no uplink (set x-uplink or --network-uplink)",
                    name
                )));
            }
        }

        Ok(())
    }
}
