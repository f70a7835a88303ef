//! Network declarations from the manifest.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Extension key overriding the network driver type for one network.
pub const EXT_TYPE: &str = "x-type";
/// Extension key overriding the OVN uplink for one network.
pub const EXT_UPLINK: &str = "x-uplink";

/// A declared shared connectivity resource that services attach to.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Network {
    /// Pre-existing network, not owned by this tool. Skipped on both
    /// create and destroy.
    #[serde(default)]
    pub external: bool,

    /// Unrecognized `x-*` keys. Per-network overrides such as
    /// [`EXT_TYPE`] and [`EXT_UPLINK`] live here.
    #[serde(flatten)]
    pub extensions: BTreeMap<String, serde_yaml::Value>,
}

/// Run-level network defaults, overridable per network via extensions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NetworkDefaults {
    /// Network driver type (`bridge` or `ovn`).
    #[serde(rename = "type", default = "default_network_type")]
    pub kind: String,

    /// Uplink for OVN networks.
    #[serde(default)]
    pub uplink: String,
}

fn default_network_type() -> String {
    "bridge".to_string()
}

impl Default for NetworkDefaults {
    fn default() -> Self {
        Self {
            kind: default_network_type(),
            uplink: String::new(),
        }
    }
}

impl Network {
    /// Look up a string-valued extension key.
    fn ext_str(&self, key: &str) -> Option<&str> {
        self.extensions.get(key).and_then(serde_yaml::Value::as_str)
    }

    /// Effective driver type: the per-network extension wins, otherwise the
    /// run-level default applies.
    pub fn effective_type<'a>(&'a self, defaults: &'a NetworkDefaults) -> &'a str {
        self.ext_str(EXT_TYPE).unwrap_or(&defaults.kind)
    }

    /// Effective uplink, same precedence rule as [`Network::effective_type`].
    pub fn effective_uplink<'a>(&'a self, defaults: &'a NetworkDefaults) -> &'a str {
        self.ext_str(EXT_UPLINK).unwrap_or(&defaults.uplink)
    }
}
