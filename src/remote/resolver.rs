//! Maps logical resource names to remote endpoint handles.
//!
//! A logical name is either bare (`frontend`, bound to the run's default
//! remote) or qualified (`edge:frontend`, bound to the named remote). The
//! resolver is a pure function of the application model: it holds one client
//! handle per configured remote and never issues remote calls itself.

use crate::config::Stack;
use crate::error::{Error, Result};
use crate::remote::{CliClient, ControlPlane};
use std::collections::BTreeMap;
use std::sync::Arc;

/// One endpoint binding for a logical resource name.
#[derive(Clone)]
pub struct Resolved {
    pub client: Arc<dyn ControlPlane>,
    /// The remote-side resource name (qualifier stripped).
    pub name: String,
    pub remote: String,
}

pub struct Resolver {
    default_remote: String,
    clients: BTreeMap<String, Arc<dyn ControlPlane>>,
}

impl Resolver {
    /// Create a resolver with no registered endpoints.
    pub fn new(default_remote: impl Into<String>) -> Self {
        Self {
            default_remote: default_remote.into(),
            clients: BTreeMap::new(),
        }
    }

    /// Register a client handle for a remote. Used by tests to inject doubles
    /// and by [`Resolver::from_stack`] for real endpoints.
    pub fn register(&mut self, remote: impl Into<String>, client: Arc<dyn ControlPlane>) {
        self.clients.insert(remote.into(), client);
    }

    /// Build a resolver for every remote the model references.
    ///
    /// That is the run's default remote plus the qualifier of any
    /// `remote:name` resource declared in the manifest.
    pub fn from_stack(stack: &Stack) -> Result<Self> {
        if stack.remote.is_empty() {
            return Err(Error::Resolution(
                "no target remote configured (set remote: in convoy.yaml, --remote, or CONVOY_REMOTE)"
                    .to_string(),
            ));
        }

        let mut resolver = Resolver::new(stack.remote.clone());
        let mut remotes = vec![stack.remote.clone()];
        for name in stack.services.keys().chain(stack.networks.keys()) {
            if let Some((remote, _)) = name.split_once(':') {
                remotes.push(remote.to_string());
            }
        }

        for remote in remotes {
            if !resolver.clients.contains_key(&remote) {
                let client = CliClient::new(remote.clone(), stack.project.clone());
                resolver.register(remote, Arc::new(client));
            }
        }

        Ok(resolver)
    }

    pub fn default_remote(&self) -> &str {
        &self.default_remote
    }

    /// Resolve a logical resource name to its endpoint bindings.
    ///
    /// Bare names bind to the default remote; qualified names bind to the
    /// named remote. Today each name resolves to exactly one endpoint, but
    /// callers must treat the result as a sequence — single-target operations
    /// take the first element.
    pub fn resolve(&self, logical: &str) -> Result<Vec<Resolved>> {
        let (remote, name) = match logical.split_once(':') {
            Some((remote, name)) => (remote, name),
            None => (self.default_remote.as_str(), logical),
        };

        let client = self.clients.get(remote).ok_or_else(|| {
            Error::Resolution(format!(
                "'{}' references unknown remote '{}'",
                logical, remote
            ))
        })?;

        Ok(vec![Resolved {
            client: Arc::clone(client),
            name: name.to_string(),
            remote: remote.to_string(),
        }])
    }

    /// Resolve to exactly one endpoint (the first binding).
    pub fn resolve_first(&self, logical: &str) -> Result<Resolved> {
        let mut bindings = self.resolve(logical)?;
        if bindings.is_empty() {
            return Err(Error::Resolution(format!(
                "'{}' resolved to no remote endpoint",
                logical
            )));
        }
        Ok(bindings.remove(0))
    }
}
