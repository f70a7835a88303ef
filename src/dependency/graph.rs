use crate::config::Service;
use crate::error::{Error, Result};
use std::collections::BTreeMap;

/// Dependency graph over the declared service set.
///
/// Built once per invocation from the finalized model and immutable
/// afterward. Construction validates every edge: an edge to an undeclared
/// service or an edge closing a cycle is a hard error, so a successfully
/// built graph always yields a valid order.
#[derive(Debug, Clone)]
pub struct Graph {
    /// `edges[A] = [B, C]` means A depends on B and C. Sorted adjacency in
    /// an ordered map keeps every traversal deterministic.
    edges: BTreeMap<String, Vec<String>>,
}

#[derive(Clone, Copy, PartialEq)]
enum Mark {
    InProgress,
    Done,
}

impl Graph {
    /// Build the graph from the declared services.
    ///
    /// One vertex per service, one edge per declared dependency. Fails with
    /// [`Error::UnknownDependency`] when a dependency names no declared
    /// service and with [`Error::CircularDependency`] when the edges close a
    /// cycle; no partial graph escapes either way.
    pub fn build(services: &BTreeMap<String, Service>) -> Result<Self> {
        let mut edges = BTreeMap::new();

        for (name, service) in services {
            let mut deps = service.dependency_names();
            deps.sort();
            deps.dedup();

            for dep in &deps {
                if !services.contains_key(dep) {
                    return Err(Error::UnknownDependency {
                        service: name.clone(),
                        missing: dep.clone(),
                    });
                }
            }

            edges.insert(name.clone(), deps);
        }

        let graph = Self { edges };
        // Acyclicity is a construction invariant, not a runtime concern.
        graph.create_order()?;
        Ok(graph)
    }

    /// All vertices, lexicographically ordered.
    pub fn nodes(&self) -> impl Iterator<Item = &str> {
        self.edges.keys().map(String::as_str)
    }

    /// Direct dependencies of a vertex, sorted.
    pub fn dependencies_of(&self, node: &str) -> &[String] {
        self.edges.get(node).map_or(&[], Vec::as_slice)
    }

    /// Creation order: every dependency strictly before its dependents.
    ///
    /// Depth-first traversal with a three-color visited set; a vertex found
    /// in-progress on re-entry means the edges close a cycle. Vertices with
    /// no ordering constraint between them come out lexicographically, so
    /// repeated runs over the same model produce the same sequence.
    pub fn create_order(&self) -> Result<Vec<String>> {
        let mut marks: BTreeMap<&str, Mark> = BTreeMap::new();
        let mut path: Vec<&str> = Vec::new();
        let mut order = Vec::with_capacity(self.edges.len());

        for node in self.edges.keys() {
            self.visit(node, &mut marks, &mut path, &mut order)?;
        }

        Ok(order)
    }

    /// Destruction order: the exact reverse of the creation order, so a
    /// service is torn down only after everything depending on it is gone.
    pub fn destroy_order(&self) -> Result<Vec<String>> {
        let mut order = self.create_order()?;
        order.reverse();
        Ok(order)
    }

    fn visit<'a>(
        &'a self,
        node: &'a str,
        marks: &mut BTreeMap<&'a str, Mark>,
        path: &mut Vec<&'a str>,
        order: &mut Vec<String>,
    ) -> Result<()> {
        match marks.get(node) {
            Some(Mark::Done) => return Ok(()),
            Some(Mark::InProgress) => {
                // Re-entering an in-progress vertex: the current path from
                // its first occurrence is the cycle.
                let start = path.iter().position(|n| *n == node).unwrap_or(0);
                let mut cycle: Vec<String> =
                    path[start..].iter().map(|n| n.to_string()).collect();
                cycle.push(node.to_string());
                return Err(Error::CircularDependency(cycle));
            }
            None => {}
        }

        marks.insert(node, Mark::InProgress);
        path.push(node);

        if let Some(deps) = self.edges.get(node) {
            for dep in deps {
                self.visit(dep, marks, path, order)?;
            }
        }

        path.pop();
        marks.insert(node, Mark::Done);
        order.push(node.to_string());

        Ok(())
    }
}
