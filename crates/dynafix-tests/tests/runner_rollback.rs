//! Runner behavior with manifest fixtures mixed with failing units

use anyhow::Result;
use dynafix_lib::fixtures::{Catalog, FixtureRunner, ManifestFixture, ProgressEvent, RunnerError};
use dynafix_lib::primitives::FixtureKey;
use dynafix_lib::store::JsonStore;
use dynafix_lib::testing::{Journal, MockFixture};
use dynafix_tests::fixtures::{PRODUCTS, USERS};
use std::sync::Arc;
use tempfile::TempDir;

fn manifest(key: &FixtureKey, source: &str, store: &Arc<JsonStore>) -> Result<Box<ManifestFixture>> {
    Ok(Box::new(ManifestFixture::parse(
        key.clone(),
        source,
        Arc::clone(store),
    )?))
}

#[test]
fn failing_unit_rolls_back_earlier_writes() -> Result<()> {
    let dir = TempDir::new()?;
    let store = Arc::new(JsonStore::open(dir.path().join("store.json"))?);
    let journal = Journal::new();

    let users = FixtureKey::new("accounts", "0001_users");
    let products = FixtureKey::new("shop", "0001_products");
    let audit = FixtureKey::new("shop", "0002_audit");

    let mut catalog = Catalog::new();
    catalog.insert(users.clone(), manifest(&users, USERS, &store)?);
    catalog.insert(products.clone(), manifest(&products, PRODUCTS, &store)?);
    catalog.insert(
        audit.clone(),
        Box::new(
            MockFixture::new("audit", &journal)
                .with_dependencies(vec![products.clone()])
                .failing("audit backend unavailable"),
        ),
    );

    let mut runner = FixtureRunner::new(catalog);
    let plan = runner.plan(None)?;
    assert_eq!(plan, vec![users.clone(), products.clone(), audit.clone()]);

    let mut started = Vec::new();
    let mut on_progress = |event: &ProgressEvent<'_>| -> anyhow::Result<()> {
        if let ProgressEvent::LoadStart { node } = event {
            started.push(node.to_string());
        }
        Ok(())
    };
    let err = runner
        .execute(&plan, &*store, Some(&mut on_progress), false)
        .unwrap_err();

    match err {
        RunnerError::LoadFailed { node, source } => {
            assert_eq!(node, audit);
            assert_eq!(source.to_string(), "audit backend unavailable");
        }
        other => panic!("unexpected error: {other}"),
    }
    assert_eq!(
        started,
        vec!["accounts.0001_users", "shop.0001_products", "shop.0002_audit"]
    );
    assert_eq!(journal.entries(), vec!["audit"]);
    assert!(store.records("users")?.is_empty());
    assert!(!store.in_transaction());
    assert!(!dir.path().join("store.json").exists());
    Ok(())
}

#[test]
fn successful_run_persists_through_shared_store() -> Result<()> {
    let dir = TempDir::new()?;
    let store = Arc::new(JsonStore::open(dir.path().join("store.json"))?);

    let users = FixtureKey::new("accounts", "0001_users");
    let mut catalog = Catalog::new();
    catalog.insert(users.clone(), manifest(&users, USERS, &store)?);

    let mut runner = FixtureRunner::new(catalog);
    let plan = runner.plan(Some(&[users]))?;
    let count = runner.execute(&plan, &*store, None, false)?;

    assert_eq!(count, 1);
    let reopened = JsonStore::open(dir.path().join("store.json"))?;
    assert_eq!(reopened.records("users")?.len(), 2);
    Ok(())
}
