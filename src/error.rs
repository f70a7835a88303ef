use miette::Diagnostic;
use std::io;
use thiserror::Error;

use crate::remote::RemoteError;

/// The kind of remote resource an operation acted on.
///
/// Used to key per-resource log lines and error messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceKind {
    Network,
    Instance,
}

impl std::fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ResourceKind::Network => write!(f, "network"),
            ResourceKind::Instance => write!(f, "instance"),
        }
    }
}

#[derive(Error, Diagnostic, Debug)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Service '{service}' depends on unknown service '{missing}'")]
    #[diagnostic(
        code(convoy::dependency::unknown),
        help("Every name in depends_on must be declared under services: in convoy.yaml")
    )]
    UnknownDependency { service: String, missing: String },

    #[error("Circular dependency detected: {}", .0.join(" -> "))]
    #[diagnostic(
        code(convoy::dependency::circular),
        help("Services cannot depend on each other in a cycle. Review the depends_on fields")
    )]
    CircularDependency(Vec<String>),

    #[error("Resolution error: {0}")]
    #[diagnostic(
        code(convoy::remote::resolution),
        help("Check the remote name in convoy.yaml, --remote, or CONVOY_REMOTE")
    )]
    Resolution(String),

    #[error("Failed to {verb} {kind} '{name}': {source}")]
    #[diagnostic(code(convoy::remote::operation))]
    RemoteOperation {
        verb: &'static str,
        kind: ResourceKind,
        name: String,
        source: RemoteError,
    },

    #[error("Operation cancelled before {kind} '{name}' was attempted")]
    Cancelled { kind: ResourceKind, name: String },

    #[error("Multiple errors occurred:\n{}", .0.iter().map(|e| format!("  - {}", e)).collect::<Vec<_>>().join("\n"))]
    Multiple(Vec<Error>),

    #[error("Invalid manifest: {0}")]
    #[diagnostic(
        code(convoy::config::validation),
        help("Run `convoy validate` for detailed validation errors")
    )]
    Validation(String),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Returns a helpful suggestion for resolving this error, if available.
    pub fn suggestion(&self) -> Option<String> {
        match self {
            Error::UnknownDependency { service, missing } => Some(format!(
                "Declare a service named '{}' or remove it from the depends_on list of '{}'.",
                missing, service
            )),
            Error::CircularDependency(path) => Some(format!(
                "Services cannot depend on each other in a cycle. Review the depends_on fields for: {}",
                path.join(", ")
            )),
            Error::Resolution(_) => Some(
                "List configured remotes in convoy.yaml, or pass --remote / set CONVOY_REMOTE."
                    .to_string(),
            ),
            Error::RemoteOperation { kind, name, .. } => Some(format!(
                "The {} '{}' was left untouched; completed resources were not rolled back. Fix the cause and re-run.",
                kind, name
            )),
            Error::Config(msg) if msg.contains("Could not find") => None,
            Error::Config(_) | Error::Validation(_) => {
                Some("Validate your manifest with: convoy validate".to_string())
            }
            _ => None,
        }
    }
}

/// Accumulator that joins independent failures into one reportable error.
///
/// An empty accumulator is success. Batch operations push each failure as it
/// happens and keep going, so sibling resources are still attempted.
#[derive(Debug, Default)]
pub struct Aggregate {
    errors: Vec<Error>,
}

impl Aggregate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, err: Error) {
        self.errors.push(err);
    }

    /// Record the outcome of one operation, keeping only failures.
    pub fn record(&mut self, result: Result<()>) {
        if let Err(err) = result {
            self.errors.push(err);
        }
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// Merge another accumulator into this one.
    pub fn extend(&mut self, other: Aggregate) {
        self.errors.extend(other.errors);
    }

    /// Fold the accumulated failures into a single result.
    ///
    /// A single failure is returned as-is; two or more become
    /// [`Error::Multiple`] so no individual cause is lost.
    pub fn into_result(mut self) -> Result<()> {
        match self.errors.len() {
            0 => Ok(()),
            1 => Err(self.errors.remove(0)),
            _ => Err(Error::Multiple(self.errors)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_aggregate_is_success() {
        let agg = Aggregate::new();
        assert!(agg.is_empty());
        assert!(agg.into_result().is_ok());
    }

    #[test]
    fn single_error_is_returned_unwrapped() {
        let mut agg = Aggregate::new();
        agg.push(Error::Config("boom".to_string()));

        match agg.into_result() {
            Err(Error::Config(msg)) => assert_eq!(msg, "boom"),
            other => panic!("expected Config error, got {:?}", other),
        }
    }

    #[test]
    fn multiple_errors_keep_every_cause() {
        let mut agg = Aggregate::new();
        agg.push(Error::Config("first".to_string()));
        agg.record(Err(Error::Resolution("second".to_string())));
        agg.record(Ok(()));

        match agg.into_result() {
            Err(Error::Multiple(errors)) => {
                assert_eq!(errors.len(), 2);
                let rendered = errors.iter().map(|e| e.to_string()).collect::<Vec<_>>();
                assert!(rendered[0].contains("first"));
                assert!(rendered[1].contains("second"));
            }
            other => panic!("expected Multiple, got {:?}", other),
        }
    }

    #[test]
    fn unknown_dependency_names_both_services() {
        let err = Error::UnknownDependency {
            service: "x".to_string(),
            missing: "ghost".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("'x'"));
        assert!(msg.contains("'ghost'"));
    }
}
