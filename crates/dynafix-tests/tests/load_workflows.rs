//! End-to-end load workflows against real manifest trees

use anyhow::Result;
use dynafix_lib::application::Commands;
use dynafix_tests::fixtures::BROKEN_TOML;
use dynafix_tests::{TestEnvironment, load_command};
use serde_json::json;

#[test]
fn load_all_fixtures_commits_every_collection() -> Result<()> {
    let env = TestEnvironment::shop()?;

    env.run(load_command(None, None, false))?;

    assert_eq!(env.stored("users")?.len(), 2);
    assert_eq!(env.stored("groups")?, vec![json!({"name": "staff", "members": ["alice"]})]);
    assert_eq!(env.stored("products")?.len(), 2);
    assert_eq!(env.stored("orders")?[0]["customer"], "bob");
    Ok(())
}

#[test]
fn reloading_replaces_keyed_records() -> Result<()> {
    let env = TestEnvironment::shop()?;
    env.run(load_command(None, None, false))?;

    env.with_fixture(
        "shop",
        "0001_products",
        r#"
[[records]]
collection = "products"
key = "sku"
data = { sku = "A-1", price = 15.0 }
"#,
    )?;
    env.run(load_command(Some("shop"), Some("0001"), false))?;

    let products = env.stored("products")?;
    assert_eq!(products.len(), 2);
    assert_eq!(products[0], json!({"sku": "A-1", "price": 15.0}));
    Ok(())
}

#[test]
fn namespace_load_pulls_cross_namespace_dependencies() -> Result<()> {
    let env = TestEnvironment::shop()?;

    env.run(load_command(Some("shop"), None, false))?;

    assert_eq!(env.stored("users")?.len(), 2);
    assert_eq!(env.stored("orders")?.len(), 1);
    assert!(env.stored("groups")?.is_empty());
    Ok(())
}

#[test]
fn prefix_load_selects_single_fixture() -> Result<()> {
    let env = TestEnvironment::shop()?;

    env.run(load_command(Some("accounts"), Some("0002"), false))?;

    assert_eq!(env.stored("users")?.len(), 2);
    assert_eq!(env.stored("groups")?.len(), 1);
    assert!(env.stored("products")?.is_empty());
    Ok(())
}

#[test]
fn unknown_prefix_reports_not_found() -> Result<()> {
    let env = TestEnvironment::shop()?;

    let err = env
        .run(load_command(Some("shop"), Some("9999"), false))
        .unwrap_err();

    assert_eq!(
        err.to_string(),
        "Fixture with prefix '9999' not found in namespace 'shop'"
    );
    assert!(!env.store_exists()?);
    Ok(())
}

#[test]
fn dry_run_rolls_back() -> Result<()> {
    let env = TestEnvironment::shop()?;

    env.run(load_command(None, None, true))?;

    assert!(!env.store_exists()?);
    Ok(())
}

#[test]
fn dry_run_keeps_previous_data() -> Result<()> {
    let env = TestEnvironment::shop()?;
    env.run(load_command(Some("accounts"), Some("0001"), false))?;

    env.run(load_command(None, None, true))?;

    assert_eq!(env.stored("users")?.len(), 2);
    assert!(env.stored("orders")?.is_empty());
    Ok(())
}

#[test]
fn dependency_cycle_aborts_before_loading() -> Result<()> {
    let env = TestEnvironment::shop()?;
    env.with_fixture(
        "accounts",
        "0001_users",
        r#"dependencies = ["accounts.0002_groups"]"#,
    )?;

    let err = env.run(load_command(None, None, false)).unwrap_err();

    assert!(err.to_string().starts_with("Circular dependency detected:"));
    assert!(!env.store_exists()?);
    Ok(())
}

#[test]
fn broken_manifest_aborts_load() -> Result<()> {
    let env = TestEnvironment::shop()?;
    env.with_fixture("shop", "0003_broken", BROKEN_TOML)?;

    let err = env.run(load_command(None, None, false)).unwrap_err();

    assert!(format!("{err:#}").contains("shop.0003_broken"));
    Ok(())
}

#[test]
fn plan_listing_leaves_store_alone() -> Result<()> {
    let env = TestEnvironment::shop()?;

    env.run(Commands::Load {
        namespace: Some("shop".to_string()),
        name_prefix: None,
        dry_run: false,
        list: true,
    })?;

    assert!(!env.store_exists()?);
    Ok(())
}
