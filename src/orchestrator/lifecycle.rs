//! Create and destroy batches.
//!
//! Each batch walks the sequencer's order, issues exactly one remote call
//! per non-external resource, and folds failures into an [`Aggregate`]
//! instead of aborting — independent resources must not block on each
//! other's failure. A non-empty aggregate makes the whole batch a partial
//! failure even though some resources succeeded.

use super::Orchestrator;
use crate::config::{Network, Service};
use crate::error::{Aggregate, Error, ResourceKind, Result};
use crate::remote::{InstanceSpec, NetworkSpec};

impl Orchestrator {
    /// Bring the declared topology up: networks first (instances attach to
    /// them), then instances in creation order.
    pub async fn apply_create(&self) -> Result<()> {
        let mut agg = Aggregate::new();

        tracing::info!("Creating networks");
        for (name, network) in &self.stack.networks {
            if self.check_cancelled(ResourceKind::Network, name, &mut agg) {
                return agg.into_result();
            }
            if network.external {
                tracing::debug!(network = %name, "external network, skipping");
                continue;
            }
            self.record_outcome(&mut agg, self.create_network(name, network).await);
        }

        tracing::info!("Creating instances");
        let order = match self.graph.create_order() {
            Ok(order) => order,
            Err(e) => {
                agg.push(e);
                return agg.into_result();
            }
        };
        for name in order {
            if self.check_cancelled(ResourceKind::Instance, &name, &mut agg) {
                return agg.into_result();
            }
            let Some(service) = self.stack.services.get(&name) else {
                continue;
            };
            self.record_outcome(&mut agg, self.create_instance(&name, service).await);
        }

        agg.into_result()
    }

    /// Tear the topology down: instances in destruction order (the reverse
    /// of creation order), then networks. Destroys as much as possible —
    /// a failed delete never stops the batch.
    pub async fn apply_destroy(&self) -> Result<()> {
        let mut agg = Aggregate::new();

        tracing::info!("Destroying instances");
        let order = match self.graph.destroy_order() {
            Ok(order) => order,
            Err(e) => {
                agg.push(e);
                return agg.into_result();
            }
        };
        for name in order {
            if self.check_cancelled(ResourceKind::Instance, &name, &mut agg) {
                return agg.into_result();
            }
            if !self.stack.services.contains_key(&name) {
                continue;
            }
            self.record_outcome(&mut agg, self.delete_instance(&name).await);
        }

        tracing::info!("Destroying networks");
        for (name, network) in self.stack.networks.iter().rev() {
            if self.check_cancelled(ResourceKind::Network, name, &mut agg) {
                return agg.into_result();
            }
            if network.external {
                tracing::debug!(network = %name, "external network, skipping");
                continue;
            }
            self.record_outcome(&mut agg, self.delete_network(name).await);
        }

        agg.into_result()
    }

    /// Fold one operation's outcome into the aggregate, logging failures
    /// as they happen. The batch keeps going either way.
    fn record_outcome(&self, agg: &mut Aggregate, result: Result<()>) {
        if let Err(err) = &result {
            tracing::error!("{}", err);
        }
        agg.record(result);
    }

    /// True when the run was interrupted; records the cut point so the
    /// caller sees the batch as a partial failure.
    fn check_cancelled(&self, kind: ResourceKind, name: &str, agg: &mut Aggregate) -> bool {
        if self.cancel.is_cancelled() {
            tracing::warn!(kind = %kind, name = %name, "cancelled, no further operations issued");
            agg.push(Error::Cancelled {
                kind,
                name: name.to_string(),
            });
            true
        } else {
            false
        }
    }

    async fn create_network(&self, name: &str, network: &Network) -> Result<()> {
        let kind = network.effective_type(&self.stack.network_defaults);
        let uplink = network.effective_uplink(&self.stack.network_defaults);

        let binding = self.resolver.resolve_first(name)?;
        let mut spec = NetworkSpec::new(binding.name.clone(), kind);
        if kind == "ovn" {
            spec.config
                .insert("network".to_string(), uplink.to_string());
        }

        tracing::info!(
            network = %name,
            remote = %binding.remote,
            net_type = %kind,
            uplink = %uplink,
            "Creating network"
        );

        binding
            .client
            .create_network(&spec)
            .await
            .map_err(|source| Error::RemoteOperation {
                verb: "create",
                kind: ResourceKind::Network,
                name: name.to_string(),
                source,
            })?;

        tracing::info!(network = %name, "Network created");
        Ok(())
    }

    async fn delete_network(&self, name: &str) -> Result<()> {
        let binding = self.resolver.resolve_first(name)?;

        tracing::info!(network = %name, remote = %binding.remote, "Destroying network");

        binding
            .client
            .delete_network(&binding.name)
            .await
            .map_err(|source| Error::RemoteOperation {
                verb: "delete",
                kind: ResourceKind::Network,
                name: name.to_string(),
                source,
            })?;

        tracing::info!(network = %name, "Network destroyed");
        Ok(())
    }

    async fn create_instance(&self, name: &str, service: &Service) -> Result<()> {
        let binding = self.resolver.resolve_first(name)?;
        let spec = InstanceSpec {
            name: binding.name.clone(),
            image: service.image.clone(),
            networks: service
                .networks
                .iter()
                .map(|n| n.split_once(':').map_or(n.as_str(), |(_, bare)| bare).to_string())
                .collect(),
        };

        tracing::info!(
            instance = %name,
            remote = %binding.remote,
            image = %service.image,
            "Creating instance"
        );

        binding
            .client
            .create_instance(&spec)
            .await
            .map_err(|source| Error::RemoteOperation {
                verb: "create",
                kind: ResourceKind::Instance,
                name: name.to_string(),
                source,
            })?;

        tracing::info!(instance = %name, "Instance created");
        Ok(())
    }

    async fn delete_instance(&self, name: &str) -> Result<()> {
        let binding = self.resolver.resolve_first(name)?;

        tracing::info!(instance = %name, remote = %binding.remote, "Destroying instance");

        binding
            .client
            .delete_instance(&binding.name)
            .await
            .map_err(|source| Error::RemoteOperation {
                verb: "delete",
                kind: ResourceKind::Instance,
                name: name.to_string(),
                source,
            })?;

        tracing::info!(instance = %name, "Instance destroyed");
        Ok(())
    }
}
