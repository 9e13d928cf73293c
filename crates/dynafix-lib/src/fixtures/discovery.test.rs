use super::*;
use crate::testing::TempDirFixture;

const USERS: &str = r#"
description = "Staff accounts"

[[records]]
collection = "users"
key = "username"
data = { username = "alice", staff = true }

[[records]]
collection = "users"
key = "username"
data = { username = "bob", staff = false }
"#;

const GROUPS: &str = r#"
dependencies = ["accounts.0001_users"]

[[records]]
collection = "groups"
key = "name"
data = { name = "staff", members = ["alice"] }
"#;

const PRODUCTS: &str = r#"
dependencies = ["accounts.0001_users"]

[[records]]
collection = "products"
data = { sku = "A-1", price = 12.5 }
"#;

fn workdir() -> TempDirFixture {
    let fixture = TempDirFixture::new().unwrap();
    fixture.write_manifest("accounts", "0001_users", USERS).unwrap();
    fixture.write_manifest("accounts", "0002_groups", GROUPS).unwrap();
    fixture.write_manifest("shop", "0001_products", PRODUCTS).unwrap();
    fixture
}

fn store_for(fixture: &TempDirFixture) -> Arc<JsonStore> {
    Arc::new(JsonStore::open(fixture.path().join("store.json")).unwrap())
}

fn keys(report: &DiscoveryReport) -> Vec<String> {
    report.catalog.keys().map(|key| key.to_string()).collect()
}

#[test]
fn test_discovers_manifests_in_sorted_order() {
    let fixture = workdir();
    let report = Loader::new(fixture.path(), store_for(&fixture))
        .discover()
        .unwrap();

    assert_eq!(
        keys(&report),
        vec!["accounts.0001_users", "accounts.0002_groups", "shop.0001_products"]
    );
    assert_eq!(report.namespaces_searched, vec!["accounts", "shop"]);
    assert!(report.skipped.is_empty());
}

#[test]
fn test_manifest_fields_are_exposed() {
    let fixture = workdir();
    let report = Loader::new(fixture.path(), store_for(&fixture))
        .discover()
        .unwrap();

    let users = report
        .catalog
        .get(&FixtureKey::new("accounts", "0001_users"))
        .unwrap();
    assert_eq!(users.description(), Some("Staff accounts"));
    assert!(users.dependencies().is_empty());

    let groups = report
        .catalog
        .get(&FixtureKey::new("accounts", "0002_groups"))
        .unwrap();
    assert_eq!(groups.description(), None);
    assert_eq!(
        groups.dependencies(),
        &[FixtureKey::new("accounts", "0001_users")]
    );
}

#[test]
fn test_skips_private_and_foreign_files() {
    let fixture = workdir();
    fixture.write_manifest("accounts", "_shared", USERS).unwrap();
    fixture.write_manifest("accounts", "~draft", USERS).unwrap();
    fixture.write_file("accounts/fixtures/.hidden.toml", USERS).unwrap();
    fixture.write_file("accounts/fixtures/README.md", "notes").unwrap();
    fixture.create_dir("accounts/fixtures/nested.toml").unwrap();

    let report = Loader::new(fixture.path(), store_for(&fixture))
        .discover()
        .unwrap();

    assert_eq!(report.catalog.len(), 3);
}

#[test]
fn test_namespace_without_fixtures_dir_is_skipped() {
    let fixture = workdir();
    fixture.create_dir("billing/migrations").unwrap();
    fixture.create_dir(".git/fixtures").unwrap();
    fixture.write_file("notes.txt", "not a namespace").unwrap();

    let report = Loader::new(fixture.path(), store_for(&fixture))
        .discover()
        .unwrap();

    assert_eq!(report.namespaces_searched, vec!["accounts", "shop"]);
}

#[test]
fn test_strict_policy_rejects_invalid_toml() {
    let fixture = workdir();
    fixture
        .write_manifest("shop", "0002_broken", "dependencies = [")
        .unwrap();

    let err = Loader::new(fixture.path(), store_for(&fixture))
        .discover()
        .unwrap_err();

    match err {
        DiscoveryError::BadFixtureUnit { key, .. } => {
            assert_eq!(key, FixtureKey::new("shop", "0002_broken"));
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_lenient_policy_skips_invalid_units() {
    let fixture = workdir();
    fixture
        .write_manifest("shop", "0002_broken", r#"dependencies = ["nodot"]"#)
        .unwrap();

    let report = Loader::new(fixture.path(), store_for(&fixture))
        .with_policy(DiscoveryPolicy::Lenient)
        .discover()
        .unwrap();

    assert_eq!(report.catalog.len(), 3);
    assert_eq!(report.skipped.len(), 1);
    assert!(report.skipped[0].to_string().contains("shop.0002_broken"));
    assert!(report.skipped[0].to_string().contains("nodot"));
}

#[test]
fn test_unknown_manifest_field_is_rejected() {
    let store = Arc::new(JsonStore::open("unused.json").unwrap());
    let result = ManifestFixture::parse(
        FixtureKey::new("shop", "0003"),
        "dependecies = [\"accounts.0001_users\"]",
        store,
    );

    assert!(matches!(result, Err(DiscoveryError::BadFixtureUnit { .. })));
}

#[test]
fn test_record_data_must_be_a_table() {
    let store = Arc::new(JsonStore::open("unused.json").unwrap());
    let result = ManifestFixture::parse(
        FixtureKey::new("shop", "0003"),
        "[[records]]\ncollection = \"products\"\ndata = 5\n",
        store,
    );

    let err = result.unwrap_err();
    assert!(err.to_string().contains("must have a table as data"));
}

#[test]
fn test_missing_workdir_is_io_error() {
    let fixture = TempDirFixture::new().unwrap();
    let store = store_for(&fixture);

    let err = Loader::new(fixture.path().join("missing"), store)
        .discover()
        .unwrap_err();

    assert!(matches!(err, DiscoveryError::Io { .. }));
}

#[test]
fn test_load_upserts_records_idempotently() {
    let fixture = workdir();
    let store = store_for(&fixture);
    let report = Loader::new(fixture.path(), Arc::clone(&store))
        .discover()
        .unwrap();

    let users = report
        .catalog
        .get(&FixtureKey::new("accounts", "0001_users"))
        .unwrap();
    users.load().unwrap();
    users.load().unwrap();

    let records = store.records("users").unwrap();
    assert_eq!(records.len(), 2);
    assert_eq!(records[0]["username"], "alice");
    assert_eq!(records[0]["staff"], true);
    assert_eq!(records[1]["username"], "bob");
}

#[test]
fn test_records_without_key_are_appended() {
    let fixture = workdir();
    let store = store_for(&fixture);
    let report = Loader::new(fixture.path(), Arc::clone(&store))
        .discover()
        .unwrap();

    let products = report
        .catalog
        .get(&FixtureKey::new("shop", "0001_products"))
        .unwrap();
    products.load().unwrap();
    products.load().unwrap();

    assert_eq!(store.records("products").unwrap().len(), 2);
}

#[test]
fn test_lenient_policy_keeps_dependents_of_skipped_units() {
    let fixture = TempDirFixture::new().unwrap();
    fixture
        .write_manifest("shop", "0001_base", "bogus = 1\n")
        .unwrap();
    fixture
        .write_manifest("shop", "0002_items", r#"dependencies = ["shop.0001_base"]"#)
        .unwrap();

    let report = Loader::new(fixture.path(), store_for(&fixture))
        .with_policy(DiscoveryPolicy::Lenient)
        .discover()
        .unwrap();

    assert_eq!(keys(&report), vec!["shop.0002_items"]);
    assert_eq!(report.skipped.len(), 1);
    let reason = report.skipped[0].to_string();
    assert!(reason.contains("shop.0001_base"));
    assert!(reason.contains("bogus"));
}
