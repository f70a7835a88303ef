use crate::config::Stack;
use crate::dependency::Graph;
use crate::error::{ResourceKind, Result};
use crate::remote::Resolver;
use tokio_util::sync::CancellationToken;

/// One row of a dry-run plan. Derived from the same sequencer output the
/// real batches walk, so plan output and execution order always agree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedOp {
    pub verb: &'static str,
    pub kind: ResourceKind,
    pub name: String,
    pub detail: String,
}

impl std::fmt::Display for PlannedOp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.detail.is_empty() {
            write!(f, "{} {} {}", self.verb, self.kind, self.name)
        } else {
            write!(f, "{} {} {} ({})", self.verb, self.kind, self.name, self.detail)
        }
    }
}

/// Walks the declared topology in dependency order and drives the remote
/// control plane to match it.
///
/// The model and graph are immutable after construction; the only mutable
/// state during a batch is the error accumulator. A [`CancellationToken`]
/// stops the batch between resources — operations already issued stand and
/// are never rolled back.
pub struct Orchestrator {
    pub(super) stack: Stack,
    pub(super) graph: Graph,
    pub(super) resolver: Resolver,
    pub(super) cancel: CancellationToken,
}

impl Orchestrator {
    /// Build an orchestrator over a finalized model with an explicit
    /// resolver. The dependency graph is validated here, before any remote
    /// call can be issued.
    pub fn new(stack: Stack, resolver: Resolver) -> Result<Self> {
        let graph = Graph::build(&stack.services)?;
        Ok(Self {
            stack,
            graph,
            resolver,
            cancel: CancellationToken::new(),
        })
    }

    /// Build an orchestrator with real control-plane clients derived from
    /// the model's remote configuration.
    pub fn from_stack(stack: Stack) -> Result<Self> {
        let resolver = Resolver::from_stack(&stack)?;
        Self::new(stack, resolver)
    }

    pub fn stack(&self) -> &Stack {
        &self.stack
    }

    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    /// Token observed between resources; clone it to wire up Ctrl-C.
    pub fn cancellation_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    /// Stop issuing new resource operations. In-flight and completed
    /// operations are unaffected.
    pub fn cancel_operations(&self) {
        self.cancel.cancel();
    }

    /// The operations `apply_create` would issue, in order.
    pub fn create_plan(&self) -> Result<Vec<PlannedOp>> {
        let mut plan = Vec::new();

        for (name, network) in &self.stack.networks {
            if network.external {
                continue;
            }
            let kind = network.effective_type(&self.stack.network_defaults);
            let uplink = network.effective_uplink(&self.stack.network_defaults);
            let detail = if kind == "ovn" {
                format!("type={} uplink={}", kind, uplink)
            } else {
                format!("type={}", kind)
            };
            plan.push(PlannedOp {
                verb: "create",
                kind: ResourceKind::Network,
                name: name.clone(),
                detail,
            });
        }

        for name in self.graph.create_order()? {
            let Some(service) = self.stack.services.get(&name) else {
                continue;
            };
            let deps = self.graph.dependencies_of(&name);
            let detail = if deps.is_empty() {
                format!("image={}", service.image)
            } else {
                format!("image={} after {}", service.image, deps.join(", "))
            };
            plan.push(PlannedOp {
                verb: "create",
                kind: ResourceKind::Instance,
                name,
                detail,
            });
        }

        Ok(plan)
    }

    /// The operations `apply_destroy` would issue, in order.
    pub fn destroy_plan(&self) -> Result<Vec<PlannedOp>> {
        let mut plan = Vec::new();

        for name in self.graph.destroy_order()? {
            if !self.stack.services.contains_key(&name) {
                continue;
            }
            plan.push(PlannedOp {
                verb: "delete",
                kind: ResourceKind::Instance,
                name,
                detail: String::new(),
            });
        }

        for (name, network) in self.stack.networks.iter().rev() {
            if network.external {
                continue;
            }
            plan.push(PlannedOp {
                verb: "delete",
                kind: ResourceKind::Network,
                name: name.clone(),
                detail: String::new(),
            });
        }

        Ok(plan)
    }
}
