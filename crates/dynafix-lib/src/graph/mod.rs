//! Dependency graph resolution with deterministic ordering and cycle detection
//!
//! Nodes are opaque identifiers; an edge records that one node must run after
//! another. Resolution is a depth-first post-order walk: a node is emitted only
//! after all of its dependencies, dependencies are visited in the order they
//! were declared, and roots are taken in registration order. The same graph
//! therefore always resolves to the same plan.

use petgraph::algo::is_cyclic_directed;
use petgraph::graph::{DiGraph, EdgeIndex, NodeIndex};
use petgraph::visit::EdgeRef;
use std::collections::{HashMap, HashSet};
use std::fmt;
use std::hash::Hash;
use thiserror::Error;
use tracing::{debug, trace};

use crate::primitives::FixtureKey;

/// Errors that can occur while building or resolving a graph
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GraphError {
    #[error("Node not found: {node}")]
    UnknownNode { node: String },

    #[error("Circular dependency detected: {node} > {dependency}")]
    CircularDependency { node: String, dependency: String },
}

/// Directed dependency graph over node identifiers of type `N`
pub struct DependencyGraph<N = FixtureKey> {
    /// Edges point from a node to the node it depends on
    graph: DiGraph<N, ()>,
    node_map: HashMap<N, NodeIndex>,
}

/// One level of the explicit depth-first stack
struct Frame {
    node: NodeIndex,
    dependencies: Vec<NodeIndex>,
    cursor: usize,
}

impl<N> DependencyGraph<N>
where
    N: Clone + Eq + Hash + fmt::Display,
{
    /// Create a new empty dependency graph
    pub fn new() -> Self {
        Self {
            graph: DiGraph::new(),
            node_map: HashMap::new(),
        }
    }

    /// Register a node (idempotent - keeps the position of the first registration)
    pub fn add_node(&mut self, node: N) -> NodeIndex {
        if let Some(&idx) = self.node_map.get(&node) {
            trace!("Node already registered: {}", node);
            return idx;
        }

        let idx = self.graph.add_node(node.clone());
        self.node_map.insert(node, idx);
        idx
    }

    /// Record that `node` depends on `dependency`
    ///
    /// Both ends must already be registered. Dependencies of a node are
    /// resolved in the order they are added here.
    pub fn add_dependency(&mut self, node: &N, dependency: &N) -> Result<(), GraphError> {
        let node_idx = self.index_of(node)?;
        let dependency_idx = self.index_of(dependency)?;

        self.graph.add_edge(node_idx, dependency_idx, ());
        Ok(())
    }

    /// Resolve the whole graph, taking every node as a root in registration order
    pub fn resolve(&self) -> Result<Vec<N>, GraphError> {
        let mut resolution = Resolution::default();
        for root in self.graph.node_indices() {
            self.resolve_from(root, &mut resolution)?;
        }

        debug!("Resolved {} nodes", resolution.order.len());
        Ok(self.collect_nodes(resolution))
    }

    /// Resolve a single node together with everything it depends on
    pub fn resolve_node(&self, node: &N) -> Result<Vec<N>, GraphError> {
        let root = self.index_of(node)?;
        let mut resolution = Resolution::default();
        self.resolve_from(root, &mut resolution)?;
        Ok(self.collect_nodes(resolution))
    }

    /// Resolve the given nodes plus their transitive dependencies
    ///
    /// Requested nodes are processed in the given order; each one only adds
    /// what earlier requests did not already pull in.
    pub fn resolve_subset(&self, nodes: &[N]) -> Result<Vec<N>, GraphError> {
        if nodes.is_empty() {
            return Ok(Vec::new());
        }

        let mut resolution = Resolution::default();
        for node in nodes {
            let root = self.index_of(node)?;
            self.resolve_from(root, &mut resolution)?;
        }

        debug!(
            requested = nodes.len(),
            resolved = resolution.order.len(),
            "Resolved node subset"
        );
        Ok(self.collect_nodes(resolution))
    }

    /// Depth-first post-order walk from `root`, appending into `resolution`
    fn resolve_from(&self, root: NodeIndex, resolution: &mut Resolution) -> Result<(), GraphError> {
        if resolution.done.contains(&root) {
            return Ok(());
        }

        // Nodes on the current path; meeting one again closes a cycle.
        let mut seen: HashSet<NodeIndex> = HashSet::from([root]);
        let mut stack = vec![Frame {
            node: root,
            dependencies: self.dependency_indices(root),
            cursor: 0,
        }];

        while let Some(frame) = stack.last_mut() {
            let node = frame.node;
            let next = frame.dependencies.get(frame.cursor).copied();
            frame.cursor += 1;

            match next {
                Some(dependency) => {
                    if resolution.done.contains(&dependency) {
                        continue;
                    }
                    if seen.contains(&dependency) {
                        return Err(GraphError::CircularDependency {
                            node: self.graph[node].to_string(),
                            dependency: self.graph[dependency].to_string(),
                        });
                    }

                    seen.insert(dependency);
                    stack.push(Frame {
                        node: dependency,
                        dependencies: self.dependency_indices(dependency),
                        cursor: 0,
                    });
                }
                None => {
                    stack.pop();
                    seen.remove(&node);
                    resolution.done.insert(node);
                    resolution.order.push(node);
                }
            }
        }

        Ok(())
    }

    /// Direct dependencies of a node in declaration order
    fn dependency_indices(&self, node: NodeIndex) -> Vec<NodeIndex> {
        let mut edges: Vec<(EdgeIndex, NodeIndex)> = self
            .graph
            .edges(node)
            .map(|edge| (edge.id(), edge.target()))
            .collect();
        // petgraph lists outgoing edges newest first; edge indices follow insertion.
        edges.sort_by_key(|(id, _)| *id);
        edges.into_iter().map(|(_, target)| target).collect()
    }

    fn index_of(&self, node: &N) -> Result<NodeIndex, GraphError> {
        self.node_map
            .get(node)
            .copied()
            .ok_or_else(|| GraphError::UnknownNode {
                node: node.to_string(),
            })
    }

    fn collect_nodes(&self, resolution: Resolution) -> Vec<N> {
        resolution
            .order
            .into_iter()
            .map(|idx| self.graph[idx].clone())
            .collect()
    }

    /// Direct dependencies of `node` in declaration order
    pub fn dependencies(&self, node: &N) -> Option<Vec<&N>> {
        let idx = self.node_map.get(node)?;
        Some(
            self.dependency_indices(*idx)
                .into_iter()
                .map(|dep| &self.graph[dep])
                .collect(),
        )
    }

    /// Check if the graph contains cycles anywhere
    pub fn has_cycles(&self) -> bool {
        is_cyclic_directed(&self.graph)
    }

    /// Check if a node is registered
    pub fn contains(&self, node: &N) -> bool {
        self.node_map.contains_key(node)
    }

    /// Get the number of nodes in the graph
    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Get the number of edges in the graph
    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Iterate over all nodes in registration order
    pub fn nodes(&self) -> impl Iterator<Item = &N> {
        self.graph.node_weights()
    }
}

impl<N> Default for DependencyGraph<N>
where
    N: Clone + Eq + Hash + fmt::Display,
{
    fn default() -> Self {
        Self::new()
    }
}

/// Accumulated output of one resolution request
#[derive(Default)]
struct Resolution {
    order: Vec<NodeIndex>,
    done: HashSet<NodeIndex>,
}

#[cfg(test)]
mod tests {
    include!("mod.test.rs");
}

#[cfg(test)]
mod cycle_tests {
    include!("cycle_detection.test.rs");
}
