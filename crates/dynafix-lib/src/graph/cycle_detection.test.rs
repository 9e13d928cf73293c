// Tests for dependency cycle detection

use super::*;

fn graph_with(nodes: &[&'static str], edges: &[(&'static str, &'static str)]) -> DependencyGraph<&'static str> {
    let mut graph = DependencyGraph::new();
    for node in nodes {
        graph.add_node(*node);
    }
    for (node, dependency) in edges {
        graph.add_dependency(node, dependency).unwrap();
    }
    graph
}

#[test]
fn test_detect_simple_cycle_two_nodes() {
    let graph = graph_with(&["a", "b"], &[("a", "b"), ("b", "a")]);

    assert!(graph.has_cycles());
    assert_eq!(
        graph.resolve(),
        Err(GraphError::CircularDependency {
            node: "b".to_string(),
            dependency: "a".to_string(),
        })
    );
}

#[test]
fn test_detect_self_dependency() {
    let graph = graph_with(&["a"], &[("a", "a")]);

    assert_eq!(
        graph.resolve_node(&"a"),
        Err(GraphError::CircularDependency {
            node: "a".to_string(),
            dependency: "a".to_string(),
        })
    );
}

#[test]
fn test_cycle_closed_by_added_edge_names_both_ends() {
    let graph = graph_with(
        &["a", "b", "c", "d", "e"],
        &[
            ("a", "d"),
            ("a", "b"),
            ("b", "c"),
            ("b", "e"),
            ("c", "d"),
            ("c", "e"),
            ("c", "a"),
        ],
    );

    let err = graph.resolve().unwrap_err();
    assert_eq!(
        err,
        GraphError::CircularDependency {
            node: "c".to_string(),
            dependency: "a".to_string(),
        }
    );
    assert_eq!(err.to_string(), "Circular dependency detected: c > a");
}

#[test]
fn test_cycle_detected_from_subset_root() {
    let graph = graph_with(
        &["x", "y", "z", "free"],
        &[("x", "y"), ("y", "z"), ("z", "y")],
    );

    assert!(matches!(
        graph.resolve_subset(&["x"]),
        Err(GraphError::CircularDependency { .. })
    ));
}

#[test]
fn test_unreachable_cycle_does_not_affect_subset() {
    let graph = graph_with(
        &["x", "y", "free", "leaf"],
        &[("x", "y"), ("y", "x"), ("free", "leaf")],
    );

    assert_eq!(graph.resolve_subset(&["free"]).unwrap(), vec!["leaf", "free"]);
    assert!(graph.resolve().is_err());
}

#[test]
fn test_shared_dependency_is_not_a_cycle() {
    let graph = graph_with(
        &["top", "left", "right", "base"],
        &[
            ("top", "left"),
            ("top", "right"),
            ("left", "base"),
            ("right", "base"),
        ],
    );

    assert!(!graph.has_cycles());
    assert_eq!(
        graph.resolve().unwrap(),
        vec!["base", "left", "right", "top"]
    );
}

#[test]
fn test_long_cycle_reports_closing_edge() {
    let graph = graph_with(
        &["a", "b", "c", "d"],
        &[("a", "b"), ("b", "c"), ("c", "d"), ("d", "b")],
    );

    assert_eq!(
        graph.resolve(),
        Err(GraphError::CircularDependency {
            node: "d".to_string(),
            dependency: "b".to_string(),
        })
    );
}
