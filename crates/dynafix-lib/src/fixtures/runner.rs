//! Plan resolution and sequential execution of fixture units
//!
//! The runner owns the catalog for a single run. The dependency graph is built
//! from the catalog on first use: every key is registered before any edge is
//! added, so a fixture may depend on any other fixture regardless of the order
//! they were discovered in.

use std::time::{Duration, Instant};

use thiserror::Error;
use tracing::{debug, info, warn};

use super::transaction::{ScopeOutcome, TransactionError, TransactionScope};
use super::Catalog;
use crate::graph::{DependencyGraph, GraphError};
use crate::primitives::{FixtureKey, LogContext};

#[derive(Debug, Error)]
pub enum RunnerError {
    #[error(transparent)]
    Graph(#[from] GraphError),

    #[error("Fixture {node} depends on {dependency}, which is not in the catalog")]
    UnknownDependency {
        node: FixtureKey,
        dependency: FixtureKey,
    },

    #[error("Fixture with prefix '{prefix}' not found in namespace '{namespace}'")]
    FixtureNotFound { namespace: String, prefix: String },

    #[error(
        "The following fixtures with prefix '{prefix}' are found in namespace '{namespace}': {}",
        .matches.join(", ")
    )]
    MultipleFixturesFound {
        namespace: String,
        prefix: String,
        matches: Vec<String>,
    },

    #[error("Invalid run configuration: {reason}")]
    Configuration { reason: String },

    #[error("Fixture {node} failed to load: {source}")]
    LoadFailed {
        node: FixtureKey,
        source: anyhow::Error,
    },

    #[error("Progress reporting failed: {source}")]
    Progress { source: anyhow::Error },

    #[error(transparent)]
    Transaction(#[from] TransactionError),
}

/// Progress notifications emitted while a plan executes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProgressEvent<'a> {
    LoadStart {
        node: &'a FixtureKey,
    },
    LoadSuccess {
        node: &'a FixtureKey,
        elapsed: Duration,
    },
}

impl ProgressEvent<'_> {
    /// Event name as reported to listeners that key on strings
    pub fn action(&self) -> &'static str {
        match self {
            ProgressEvent::LoadStart { .. } => "load_start",
            ProgressEvent::LoadSuccess { .. } => "load_success",
        }
    }

    pub fn node(&self) -> &FixtureKey {
        match self {
            ProgressEvent::LoadStart { node } | ProgressEvent::LoadSuccess { node, .. } => node,
        }
    }
}

/// Callback invoked for every progress event; an error aborts the run
pub type ProgressCallback<'a> = &'a mut dyn FnMut(&ProgressEvent<'_>) -> anyhow::Result<()>;

/// Plans and executes the fixtures of one catalog
pub struct FixtureRunner {
    catalog: Catalog,
    graph: Option<DependencyGraph<FixtureKey>>,
}

impl FixtureRunner {
    pub fn new(catalog: Catalog) -> Self {
        Self {
            catalog,
            graph: None,
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Dependency graph of the catalog, built on first access
    pub fn graph(&mut self) -> Result<&DependencyGraph<FixtureKey>, RunnerError> {
        let graph = match self.graph.take() {
            Some(graph) => graph,
            None => self.build_graph()?,
        };
        Ok(self.graph.insert(graph))
    }

    fn build_graph(&self) -> Result<DependencyGraph<FixtureKey>, RunnerError> {
        let mut graph = DependencyGraph::new();

        for key in self.catalog.keys() {
            graph.add_node(key.clone());
        }

        for (key, unit) in self.catalog.iter() {
            for dependency in unit.dependencies() {
                if !self.catalog.contains(dependency) {
                    return Err(RunnerError::UnknownDependency {
                        node: key.clone(),
                        dependency: dependency.clone(),
                    });
                }
                graph.add_dependency(key, dependency)?;
            }
        }

        debug!(
            nodes = graph.node_count(),
            edges = graph.edge_count(),
            "Built fixture dependency graph"
        );
        Ok(graph)
    }

    /// All fixtures of a namespace, in graph order
    pub fn filter_by_namespace(&mut self, namespace: &str) -> Result<Vec<FixtureKey>, RunnerError> {
        Ok(self
            .graph()?
            .nodes()
            .filter(|key| key.in_namespace(namespace))
            .cloned()
            .collect())
    }

    /// The single fixture of a namespace whose name starts with `prefix`
    ///
    /// Ambiguous prefixes are rejected rather than guessed.
    pub fn filter_by_prefix(
        &mut self,
        namespace: &str,
        prefix: &str,
    ) -> Result<Vec<FixtureKey>, RunnerError> {
        let matches: Vec<FixtureKey> = self
            .filter_by_namespace(namespace)?
            .into_iter()
            .filter(|key| key.name.starts_with(prefix))
            .collect();

        match matches.len() {
            0 => Err(RunnerError::FixtureNotFound {
                namespace: namespace.to_string(),
                prefix: prefix.to_string(),
            }),
            1 => Ok(matches),
            _ => Err(RunnerError::MultipleFixturesFound {
                namespace: namespace.to_string(),
                prefix: prefix.to_string(),
                matches: matches.into_iter().map(|key| key.name).collect(),
            }),
        }
    }

    /// Ordered plan for the given fixtures, or for the whole catalog when none are given
    pub fn plan(&mut self, nodes: Option<&[FixtureKey]>) -> Result<Vec<FixtureKey>, RunnerError> {
        let graph = self.graph()?;
        let plan = match nodes {
            Some(nodes) if !nodes.is_empty() => graph.resolve_subset(nodes)?,
            _ => graph.resolve()?,
        };
        Ok(plan)
    }

    /// Load every fixture of `plan` in order inside one scope
    ///
    /// Returns the number of fixtures in the plan. The first failure rolls the
    /// scope back and is returned; a dry run rolls back after full success.
    pub fn execute(
        &self,
        plan: &[FixtureKey],
        scope: &dyn TransactionScope,
        mut progress: Option<ProgressCallback<'_>>,
        dry_run: bool,
    ) -> Result<usize, RunnerError> {
        if let Some(missing) = plan.iter().find(|key| !self.catalog.contains(key)) {
            return Err(RunnerError::Configuration {
                reason: format!("plan references unknown fixture {missing}"),
            });
        }

        scope.begin()?;

        let mut context = LogContext::with_progress("load_fixtures", plan.len() as u64);
        for (position, node) in plan.iter().enumerate() {
            context.set_progress(position as u64 + 1);
            if let Err(err) = self.load_one(node, &mut progress, &context) {
                rollback_after_failure(scope);
                return Err(err);
            }
        }

        let outcome = if dry_run {
            ScopeOutcome::Rollback
        } else {
            ScopeOutcome::Commit
        };
        scope.finish(outcome)?;

        info!(
            fixtures = plan.len(),
            dry_run,
            "Fixture run finished"
        );
        Ok(plan.len())
    }

    fn load_one(
        &self,
        node: &FixtureKey,
        progress: &mut Option<ProgressCallback<'_>>,
        context: &LogContext,
    ) -> Result<(), RunnerError> {
        let unit = self
            .catalog
            .get(node)
            .ok_or_else(|| RunnerError::Configuration {
                reason: format!("plan references unknown fixture {node}"),
            })?;

        emit(progress, ProgressEvent::LoadStart { node })?;

        debug!(
            operation = %context.operation,
            current = context.current_item,
            total = context.total_items,
            "Loading fixture {}",
            node
        );
        let started = Instant::now();
        unit.load().map_err(|source| RunnerError::LoadFailed {
            node: node.clone(),
            source,
        })?;
        let elapsed = started.elapsed();

        emit(progress, ProgressEvent::LoadSuccess { node, elapsed })
    }
}

fn emit(
    progress: &mut Option<ProgressCallback<'_>>,
    event: ProgressEvent<'_>,
) -> Result<(), RunnerError> {
    match progress.as_deref_mut() {
        Some(callback) => callback(&event).map_err(|source| RunnerError::Progress { source }),
        None => Ok(()),
    }
}

/// Close a failed run; the original error is what the caller sees
fn rollback_after_failure(scope: &dyn TransactionScope) {
    if let Err(err) = scope.finish(ScopeOutcome::Rollback) {
        warn!("Rollback after failed fixture run also failed: {}", err);
    }
}

#[cfg(test)]
mod tests {
    include!("runner.test.rs");
}
