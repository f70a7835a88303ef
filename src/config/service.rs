//! Service declarations from the manifest.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A declared unit of the application, mapped to one remote instance.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Service {
    /// Image reference, e.g. `images:debian/12`.
    #[serde(default)]
    pub image: String,

    #[serde(default, skip_serializing_if = "DependsOn::is_empty")]
    pub depends_on: DependsOn,

    /// Networks this service's instance attaches to.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub networks: Vec<String>,
}

impl Service {
    /// Names of the services this one depends on.
    pub fn dependency_names(&self) -> Vec<String> {
        self.depends_on.names()
    }
}

/// `depends_on` accepts both the short list form and the long map form:
///
/// ```yaml
/// depends_on: [db, cache]
/// # or
/// depends_on:
///   db:
///     condition: service_started
/// ```
///
/// Conditions are accepted for manifest compatibility but not interpreted;
/// only the declared names feed the dependency graph.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DependsOn {
    List(Vec<String>),
    Map(BTreeMap<String, DependsOnDetail>),
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct DependsOnDetail {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub condition: Option<String>,
}

impl Default for DependsOn {
    fn default() -> Self {
        DependsOn::List(Vec::new())
    }
}

impl DependsOn {
    pub fn is_empty(&self) -> bool {
        match self {
            DependsOn::List(names) => names.is_empty(),
            DependsOn::Map(map) => map.is_empty(),
        }
    }

    pub fn names(&self) -> Vec<String> {
        match self {
            DependsOn::List(names) => names.clone(),
            DependsOn::Map(map) => map.keys().cloned().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_list_form() {
        let service: Service = serde_yaml::from_str(
            r#"
image: images:debian/12
depends_on: [db, cache]
"#,
        )
        .unwrap();
        assert_eq!(service.dependency_names(), vec!["db", "cache"]);
    }

    #[test]
    fn parses_map_form() {
        let service: Service = serde_yaml::from_str(
            r#"
image: images:debian/12
depends_on:
  db:
    condition: service_started
  cache: {}
"#,
        )
        .unwrap();
        assert_eq!(service.dependency_names(), vec!["cache", "db"]);
    }

    #[test]
    fn missing_depends_on_is_empty() {
        let service: Service = serde_yaml::from_str("image: images:debian/12").unwrap();
        assert!(service.depends_on.is_empty());
    }
}
