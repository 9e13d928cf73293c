// Tests for fixture planning and execution

use super::*;
use crate::fixtures::NoopScope;
use crate::testing::{Journal, MockFixture, MockScope, ScopeCall};

// ============================================================================
// Test Utilities
// ============================================================================

fn key(namespace: &str, name: &str) -> FixtureKey {
    FixtureKey::new(namespace, name)
}

fn catalog_of(units: Vec<(FixtureKey, MockFixture)>) -> Catalog {
    let mut catalog = Catalog::new();
    for (key, unit) in units {
        catalog.insert(key, Box::new(unit));
    }
    catalog
}

/// Three fixtures across two namespaces; shop.products needs accounts.users
fn shop_runner(journal: &Journal) -> FixtureRunner {
    FixtureRunner::new(catalog_of(vec![
        (
            key("accounts", "0001_users"),
            MockFixture::new("accounts.0001_users", journal),
        ),
        (
            key("accounts", "0002_groups"),
            MockFixture::new("accounts.0002_groups", journal)
                .with_dependencies(vec![key("accounts", "0001_users")]),
        ),
        (
            key("shop", "0001_products"),
            MockFixture::new("shop.0001_products", journal)
                .with_dependencies(vec![key("accounts", "0001_users")]),
        ),
    ]))
}

#[derive(Debug, PartialEq)]
enum Recorded {
    Start(String),
    Success(String),
}

fn record(events: &mut Vec<Recorded>, event: &ProgressEvent<'_>) -> anyhow::Result<()> {
    events.push(match event {
        ProgressEvent::LoadStart { node } => Recorded::Start(node.to_string()),
        ProgressEvent::LoadSuccess { node, .. } => Recorded::Success(node.to_string()),
    });
    Ok(())
}

// ============================================================================
// Graph construction
// ============================================================================

#[test]
fn test_graph_is_built_from_catalog_dependencies() {
    let journal = Journal::new();
    let mut runner = shop_runner(&journal);

    let graph = runner.graph().unwrap();
    assert_eq!(graph.node_count(), 3);
    assert_eq!(graph.edge_count(), 2);
    assert_eq!(
        graph.dependencies(&key("shop", "0001_products")),
        Some(vec![&key("accounts", "0001_users")])
    );
}

#[test]
fn test_graph_is_cached_between_calls() {
    let journal = Journal::new();
    let mut runner = shop_runner(&journal);

    let first = runner.graph().unwrap() as *const DependencyGraph;
    let second = runner.graph().unwrap() as *const DependencyGraph;
    assert_eq!(first, second);
}

#[test]
fn test_dependency_outside_catalog_is_rejected() {
    let journal = Journal::new();
    let mut runner = FixtureRunner::new(catalog_of(vec![(
        key("shop", "0001_products"),
        MockFixture::new("shop.0001_products", &journal)
            .with_dependencies(vec![key("accounts", "9999_missing")]),
    )]));

    match runner.graph() {
        Err(RunnerError::UnknownDependency { node, dependency }) => {
            assert_eq!(node, key("shop", "0001_products"));
            assert_eq!(dependency, key("accounts", "9999_missing"));
        }
        Err(other) => panic!("unexpected error: {other}"),
        Ok(_) => panic!("graph should not build"),
    }
}

// ============================================================================
// Filters
// ============================================================================

#[test]
fn test_filter_by_namespace() {
    let journal = Journal::new();
    let mut runner = shop_runner(&journal);

    assert_eq!(
        runner.filter_by_namespace("accounts").unwrap(),
        vec![key("accounts", "0001_users"), key("accounts", "0002_groups")]
    );
    assert!(runner.filter_by_namespace("unknown").unwrap().is_empty());
}

#[test]
fn test_filter_by_prefix_single_match() {
    let journal = Journal::new();
    let mut runner = shop_runner(&journal);

    assert_eq!(
        runner.filter_by_prefix("accounts", "0001").unwrap(),
        vec![key("accounts", "0001_users")]
    );
}

#[test]
fn test_filter_by_prefix_no_match() {
    let journal = Journal::new();
    let mut runner = shop_runner(&journal);

    let err = runner.filter_by_prefix("accounts", "0006").unwrap_err();
    assert!(matches!(err, RunnerError::FixtureNotFound { .. }));
    assert_eq!(
        err.to_string(),
        "Fixture with prefix '0006' not found in namespace 'accounts'"
    );
}

#[test]
fn test_filter_by_prefix_multiple_matches() {
    let journal = Journal::new();
    let mut runner = shop_runner(&journal);

    match runner.filter_by_prefix("accounts", "000") {
        Err(RunnerError::MultipleFixturesFound { matches, .. }) => {
            assert_eq!(matches, vec!["0001_users", "0002_groups"]);
        }
        other => panic!("expected ambiguity error, got {other:?}"),
    }
}

// ============================================================================
// Planning
// ============================================================================

#[test]
fn test_plan_without_nodes_resolves_everything() {
    let journal = Journal::new();
    let mut runner = shop_runner(&journal);

    assert_eq!(
        runner.plan(None).unwrap(),
        vec![
            key("accounts", "0001_users"),
            key("accounts", "0002_groups"),
            key("shop", "0001_products"),
        ]
    );
}

#[test]
fn test_plan_with_empty_nodes_resolves_everything() {
    let journal = Journal::new();
    let mut runner = shop_runner(&journal);

    assert_eq!(runner.plan(Some(&[])).unwrap().len(), 3);
}

#[test]
fn test_plan_with_subset_includes_dependencies() {
    let journal = Journal::new();
    let mut runner = shop_runner(&journal);

    let nodes = runner.filter_by_namespace("shop").unwrap();
    assert_eq!(
        runner.plan(Some(&nodes)).unwrap(),
        vec![key("accounts", "0001_users"), key("shop", "0001_products")]
    );
}

#[test]
fn test_plan_reports_cycles() {
    let journal = Journal::new();
    let mut runner = FixtureRunner::new(catalog_of(vec![
        (
            key("a", "one"),
            MockFixture::new("a.one", &journal).with_dependencies(vec![key("a", "two")]),
        ),
        (
            key("a", "two"),
            MockFixture::new("a.two", &journal).with_dependencies(vec![key("a", "one")]),
        ),
    ]));

    assert!(matches!(
        runner.plan(None),
        Err(RunnerError::Graph(GraphError::CircularDependency { .. }))
    ));
}

// ============================================================================
// Execution
// ============================================================================

#[test]
fn test_execute_loads_in_plan_order_and_commits() {
    let journal = Journal::new();
    let mut runner = shop_runner(&journal);
    let scope = MockScope::new();
    let mut events = Vec::new();

    let plan = runner.plan(None).unwrap();
    let mut callback = |event: &ProgressEvent<'_>| record(&mut events, event);
    let count = runner
        .execute(&plan, &scope, Some(&mut callback), false)
        .unwrap();
    drop(callback);

    assert_eq!(count, 3);
    assert_eq!(
        journal.entries(),
        vec!["accounts.0001_users", "accounts.0002_groups", "shop.0001_products"]
    );
    assert_eq!(
        events,
        vec![
            Recorded::Start("accounts.0001_users".into()),
            Recorded::Success("accounts.0001_users".into()),
            Recorded::Start("accounts.0002_groups".into()),
            Recorded::Success("accounts.0002_groups".into()),
            Recorded::Start("shop.0001_products".into()),
            Recorded::Success("shop.0001_products".into()),
        ]
    );
    assert_eq!(scope.calls(), vec![ScopeCall::Begin, ScopeCall::Commit]);
}

#[test]
fn test_execute_without_callback() {
    let journal = Journal::new();
    let mut runner = shop_runner(&journal);

    let plan = runner.plan(None).unwrap();
    let count = runner.execute(&plan, &NoopScope, None, false).unwrap();

    assert_eq!(count, 3);
    assert_eq!(journal.entries().len(), 3);
}

#[test]
fn test_failure_in_second_step_rolls_back_and_stops() {
    let journal = Journal::new();
    let runner = FixtureRunner::new(catalog_of(vec![
        (key("app", "first"), MockFixture::new("app.first", &journal)),
        (
            key("app", "second"),
            MockFixture::new("app.second", &journal).failing("database is gone"),
        ),
        (key("app", "third"), MockFixture::new("app.third", &journal)),
    ]));
    let scope = MockScope::new();
    let mut events = Vec::new();

    let plan = vec![key("app", "first"), key("app", "second"), key("app", "third")];
    let mut callback = |event: &ProgressEvent<'_>| record(&mut events, event);
    let err = runner
        .execute(&plan, &scope, Some(&mut callback), false)
        .unwrap_err();
    drop(callback);

    match &err {
        RunnerError::LoadFailed { node, source } => {
            assert_eq!(node, &key("app", "second"));
            assert_eq!(source.to_string(), "database is gone");
        }
        other => panic!("unexpected error: {other}"),
    }
    assert_eq!(
        events,
        vec![
            Recorded::Start("app.first".into()),
            Recorded::Success("app.first".into()),
            Recorded::Start("app.second".into()),
        ]
    );
    assert_eq!(journal.entries(), vec!["app.first", "app.second"]);
    assert_eq!(scope.calls(), vec![ScopeCall::Begin, ScopeCall::Rollback]);
}

#[test]
fn test_dry_run_executes_everything_then_rolls_back() {
    let journal = Journal::new();
    let mut runner = shop_runner(&journal);
    let scope = MockScope::new();
    let mut successes = 0;

    let plan = runner.plan(None).unwrap();
    let mut callback = |event: &ProgressEvent<'_>| -> anyhow::Result<()> {
        if event.action() == "load_success" {
            successes += 1;
        }
        Ok(())
    };
    let count = runner
        .execute(&plan, &scope, Some(&mut callback), true)
        .unwrap();

    assert_eq!(count, plan.len());
    assert_eq!(successes, 3);
    assert_eq!(journal.entries().len(), 3);
    assert!(scope.rolled_back());
    assert!(!scope.committed());
}

#[test]
fn test_callback_error_aborts_like_a_failed_step() {
    let journal = Journal::new();
    let mut runner = shop_runner(&journal);
    let scope = MockScope::new();

    let plan = runner.plan(None).unwrap();
    let mut callback = |event: &ProgressEvent<'_>| -> anyhow::Result<()> {
        if event.node().name == "0002_groups" {
            anyhow::bail!("terminal closed");
        }
        Ok(())
    };
    let err = runner
        .execute(&plan, &scope, Some(&mut callback), false)
        .unwrap_err();

    assert!(matches!(err, RunnerError::Progress { .. }));
    assert_eq!(journal.entries(), vec!["accounts.0001_users"]);
    assert!(scope.rolled_back());
}

#[test]
fn test_unknown_plan_entry_is_rejected_before_begin() {
    let journal = Journal::new();
    let runner = shop_runner(&journal);
    let scope = MockScope::new();

    let plan = vec![key("accounts", "0001_users"), key("ghost", "0001")];
    let err = runner.execute(&plan, &scope, None, false).unwrap_err();

    assert!(matches!(err, RunnerError::Configuration { .. }));
    assert!(scope.calls().is_empty());
    assert!(journal.entries().is_empty());
}

#[test]
fn test_begin_failure_prevents_any_load() {
    let journal = Journal::new();
    let mut runner = shop_runner(&journal);
    let scope = MockScope::failing_begin();

    let plan = runner.plan(None).unwrap();
    let err = runner.execute(&plan, &scope, None, false).unwrap_err();

    assert!(matches!(err, RunnerError::Transaction(_)));
    assert!(journal.entries().is_empty());
}

#[test]
fn test_failed_rollback_keeps_original_error() {
    let journal = Journal::new();
    let runner = FixtureRunner::new(catalog_of(vec![(
        key("app", "broken"),
        MockFixture::new("app.broken", &journal).failing("boom"),
    )]));
    let scope = MockScope::failing_finish();

    let err = runner
        .execute(&[key("app", "broken")], &scope, None, false)
        .unwrap_err();

    assert!(matches!(err, RunnerError::LoadFailed { .. }));
    assert_eq!(scope.calls(), vec![ScopeCall::Begin, ScopeCall::Rollback]);
}

#[test]
fn test_empty_plan_still_opens_and_closes_scope() {
    let journal = Journal::new();
    let runner = shop_runner(&journal);
    let scope = MockScope::new();

    assert_eq!(runner.execute(&[], &scope, None, false).unwrap(), 0);
    assert_eq!(scope.calls(), vec![ScopeCall::Begin, ScopeCall::Commit]);
}

#[test]
fn test_catalog_units_expose_descriptions() {
    let journal = Journal::new();
    let runner = shop_runner(&journal);

    let unit = runner.catalog().get(&key("shop", "0001_products")).unwrap();
    assert_eq!(unit.description(), Some("mock fixture"));
}
