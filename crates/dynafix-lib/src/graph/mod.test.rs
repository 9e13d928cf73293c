// Tests for dependency graph resolution

use super::*;

// ============================================================================
// Test Utilities
// ============================================================================

/// Graph with the following dependencies:
///
/// a -> d, b
/// b -> c, e
/// c -> d, e
fn diamond_graph() -> DependencyGraph<&'static str> {
    let mut graph = DependencyGraph::new();
    for node in ["a", "b", "c", "d", "e"] {
        graph.add_node(node);
    }

    for (node, dependency) in [
        ("a", "d"),
        ("a", "b"),
        ("b", "c"),
        ("b", "e"),
        ("c", "d"),
        ("c", "e"),
    ] {
        graph.add_dependency(&node, &dependency).unwrap();
    }
    graph
}

/// Deterministic pseudo-random DAG: node i may only depend on nodes j < i
fn generated_dag(seed: u64, size: usize) -> (DependencyGraph<String>, Vec<(String, String)>) {
    let mut state = seed.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
    let mut next = move || {
        state = state
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        (state >> 33) as usize
    };

    let names: Vec<String> = (0..size).map(|i| format!("n{i:02}")).collect();

    // Register in a shuffled order so registration order differs from the DAG order
    let mut registration = names.clone();
    for i in (1..registration.len()).rev() {
        registration.swap(i, next() % (i + 1));
    }

    let mut graph = DependencyGraph::new();
    for name in &registration {
        graph.add_node(name.clone());
    }

    let mut edges = Vec::new();
    for i in 1..size {
        for _ in 0..(next() % 4) {
            let j = next() % i;
            graph.add_dependency(&names[i], &names[j]).unwrap();
            edges.push((names[i].clone(), names[j].clone()));
        }
    }

    (graph, edges)
}

fn position<N: PartialEq>(order: &[N], node: &N) -> usize {
    order
        .iter()
        .position(|n| n == node)
        .expect("node should be present in the resolution")
}

// ============================================================================
// Basic Graph Operations
// ============================================================================

#[test]
fn test_new_graph_is_empty() {
    let graph: DependencyGraph<&str> = DependencyGraph::new();
    assert_eq!(graph.node_count(), 0);
    assert_eq!(graph.edge_count(), 0);
    assert_eq!(graph.resolve().unwrap(), Vec::<&str>::new());
}

#[test]
fn test_add_duplicate_node_is_idempotent() {
    let mut graph = DependencyGraph::new();
    let first = graph.add_node("a");
    graph.add_node("b");
    let second = graph.add_node("a");

    assert_eq!(first, second);
    assert_eq!(graph.node_count(), 2);
    assert_eq!(graph.nodes().copied().collect::<Vec<_>>(), vec!["a", "b"]);
}

#[test]
fn test_add_dependency_to_unknown_node() {
    let mut graph = DependencyGraph::new();
    graph.add_node("a");

    let result = graph.add_dependency(&"a", &"missing");
    assert_eq!(
        result,
        Err(GraphError::UnknownNode {
            node: "missing".to_string()
        })
    );

    let result = graph.add_dependency(&"missing", &"a");
    assert!(matches!(result, Err(GraphError::UnknownNode { .. })));
    assert_eq!(graph.edge_count(), 0);
}

#[test]
fn test_dependencies_keep_declaration_order() {
    let graph = diamond_graph();
    assert_eq!(graph.dependencies(&"a"), Some(vec![&"d", &"b"]));
    assert_eq!(graph.dependencies(&"c"), Some(vec![&"d", &"e"]));
    assert_eq!(graph.dependencies(&"e"), Some(vec![]));
    assert_eq!(graph.dependencies(&"zzz"), None);
}

// ============================================================================
// Resolution
// ============================================================================

#[test]
fn test_resolve_full_graph() {
    let graph = diamond_graph();
    assert_eq!(graph.resolve().unwrap(), vec!["d", "e", "c", "b", "a"]);
}

#[test]
fn test_resolve_single_node() {
    let graph = diamond_graph();
    assert_eq!(
        graph.resolve_node(&"a").unwrap(),
        vec!["d", "e", "c", "b", "a"]
    );
    assert_eq!(graph.resolve_node(&"c").unwrap(), vec!["d", "e", "c"]);
    assert_eq!(graph.resolve_node(&"e").unwrap(), vec!["e"]);
}

#[test]
fn test_resolve_subset_pulls_in_dependencies() {
    let graph = diamond_graph();
    assert_eq!(graph.resolve_subset(&["c"]).unwrap(), vec!["d", "e", "c"]);
}

#[test]
fn test_resolve_subset_skips_already_resolved() {
    let graph = diamond_graph();
    assert_eq!(
        graph.resolve_subset(&["e", "c", "d"]).unwrap(),
        vec!["e", "d", "c"]
    );
}

#[test]
fn test_resolve_empty_subset() {
    let graph = diamond_graph();
    assert!(graph.resolve_subset(&[]).unwrap().is_empty());
}

#[test]
fn test_resolve_subset_with_unknown_node() {
    let graph = diamond_graph();
    assert!(matches!(
        graph.resolve_subset(&["c", "nope"]),
        Err(GraphError::UnknownNode { .. })
    ));
}

#[test]
fn test_roots_follow_registration_order() {
    let mut graph = DependencyGraph::new();
    for node in ["z", "y", "x"] {
        graph.add_node(node);
    }
    assert_eq!(graph.resolve().unwrap(), vec!["z", "y", "x"]);
}

#[test]
fn test_siblings_follow_declared_order() {
    let mut graph = DependencyGraph::new();
    for node in ["root", "b", "a", "c"] {
        graph.add_node(node);
    }
    graph.add_dependency(&"root", &"c").unwrap();
    graph.add_dependency(&"root", &"a").unwrap();
    graph.add_dependency(&"root", &"b").unwrap();

    assert_eq!(graph.resolve_node(&"root").unwrap(), vec!["c", "a", "b", "root"]);
}

#[test]
fn test_duplicate_edges_are_harmless() {
    let mut graph = DependencyGraph::new();
    graph.add_node("a");
    graph.add_node("b");
    graph.add_dependency(&"a", &"b").unwrap();
    graph.add_dependency(&"a", &"b").unwrap();

    assert_eq!(graph.edge_count(), 2);
    assert_eq!(graph.resolve().unwrap(), vec!["b", "a"]);
}

#[test]
fn test_resolve_is_deterministic() {
    let graph = diamond_graph();
    let first = graph.resolve().unwrap();
    for _ in 0..10 {
        assert_eq!(graph.resolve().unwrap(), first);
    }
}

#[test]
fn test_deep_chain_does_not_overflow() {
    let mut graph = DependencyGraph::new();
    let names: Vec<String> = (0..50_000).map(|i| format!("node-{i}")).collect();
    for name in &names {
        graph.add_node(name.clone());
    }
    for pair in names.windows(2) {
        graph.add_dependency(&pair[0], &pair[1]).unwrap();
    }

    let order = graph.resolve_node(&names[0]).unwrap();
    assert_eq!(order.len(), names.len());
    assert_eq!(order.first(), names.last());
    assert_eq!(order.last(), names.first());
}

// ============================================================================
// Generated graphs
// ============================================================================

#[test]
fn test_generated_graphs_respect_every_edge() {
    for seed in 0..64 {
        let (graph, edges) = generated_dag(seed, 24);
        let order = graph.resolve().unwrap();

        assert_eq!(order.len(), graph.node_count(), "seed {seed}");
        let unique: HashSet<&String> = order.iter().collect();
        assert_eq!(unique.len(), order.len(), "seed {seed}: duplicates");

        for (node, dependency) in &edges {
            assert!(
                position(&order, dependency) < position(&order, node),
                "seed {seed}: {dependency} must precede {node}"
            );
        }
    }
}

#[test]
fn test_generated_subsets_contain_their_closure() {
    for seed in 0..32 {
        let (graph, _) = generated_dag(seed, 20);
        let full = graph.resolve().unwrap();
        let requested: Vec<String> = full.iter().rev().step_by(3).cloned().collect();

        let subset = graph.resolve_subset(&requested).unwrap();

        let unique: HashSet<&String> = subset.iter().collect();
        assert_eq!(unique.len(), subset.len(), "seed {seed}: duplicates");

        for node in &subset {
            for dependency in graph.dependencies(node).unwrap() {
                assert!(
                    position(&subset, dependency) < position(&subset, node),
                    "seed {seed}: closure of {node} is incomplete or misordered"
                );
            }
        }
        for node in &requested {
            assert!(subset.contains(node), "seed {seed}: {node} missing");
        }
    }
}
