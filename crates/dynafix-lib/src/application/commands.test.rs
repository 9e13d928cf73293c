use super::*;
use crate::display::StyleManager;
use crate::testing::TempDirFixture;
use serde_json::json;

const USERS: &str = r#"
description = "Staff accounts"

[[records]]
collection = "users"
key = "username"
data = { username = "alice" }
"#;

const GROUPS: &str = r#"
dependencies = ["accounts.0001_users"]

[[records]]
collection = "groups"
key = "name"
data = { name = "staff" }
"#;

const PRODUCTS: &str = r#"
dependencies = ["accounts.0001_users"]

[[records]]
collection = "products"
key = "sku"
data = { sku = "A-1" }
"#;

fn workdir() -> TempDirFixture {
    let fixture = TempDirFixture::new().unwrap();
    fixture.write_manifest("accounts", "0001_users", USERS).unwrap();
    fixture.write_manifest("accounts", "0002_groups", GROUPS).unwrap();
    fixture.write_manifest("shop", "0001_products", PRODUCTS).unwrap();
    fixture
}

fn config_for(fixture: &TempDirFixture) -> AppConfig {
    let mut config = AppConfig {
        workdir: Some(fixture.path().to_path_buf()),
        ..AppConfig::default()
    };
    config.validate().unwrap();
    config
}

fn display() -> Display {
    Display::with_styling(StyleManager::plain())
}

fn load(namespace: Option<&str>, name_prefix: Option<&str>, dry_run: bool) -> Commands {
    Commands::Load {
        namespace: namespace.map(str::to_string),
        name_prefix: name_prefix.map(str::to_string),
        dry_run,
        list: false,
    }
}

fn stored(config: &AppConfig, collection: &str) -> Vec<serde_json::Value> {
    JsonStore::open(config.store_path())
        .unwrap()
        .records(collection)
        .unwrap()
}

#[test]
fn test_load_everything_commits_to_store() {
    let fixture = workdir();
    let config = config_for(&fixture);

    execute_command_with_display(load(None, None, false), &config, &display()).unwrap();

    assert_eq!(stored(&config, "users"), vec![json!({"username": "alice"})]);
    assert_eq!(stored(&config, "groups"), vec![json!({"name": "staff"})]);
    assert_eq!(stored(&config, "products"), vec![json!({"sku": "A-1"})]);
}

#[test]
fn test_load_twice_is_idempotent() {
    let fixture = workdir();
    let config = config_for(&fixture);

    execute_command_with_display(load(None, None, false), &config, &display()).unwrap();
    execute_command_with_display(load(None, None, false), &config, &display()).unwrap();

    assert_eq!(stored(&config, "users").len(), 1);
}

#[test]
fn test_dry_run_leaves_store_untouched() {
    let fixture = workdir();
    let config = config_for(&fixture);

    execute_command_with_display(load(None, None, true), &config, &display()).unwrap();

    assert!(!config.store_path().exists());
}

#[test]
fn test_load_namespace_pulls_in_dependencies() {
    let fixture = workdir();
    let config = config_for(&fixture);

    execute_command_with_display(load(Some("shop"), None, false), &config, &display()).unwrap();

    assert_eq!(stored(&config, "users").len(), 1);
    assert_eq!(stored(&config, "products").len(), 1);
    assert!(stored(&config, "groups").is_empty());
}

#[test]
fn test_load_by_prefix() {
    let fixture = workdir();
    let config = config_for(&fixture);

    execute_command_with_display(load(Some("accounts"), Some("0001"), false), &config, &display())
        .unwrap();

    assert_eq!(stored(&config, "users").len(), 1);
    assert!(stored(&config, "groups").is_empty());
}

#[test]
fn test_ambiguous_prefix_is_rejected() {
    let fixture = workdir();
    let config = config_for(&fixture);

    let err = execute_command_with_display(load(Some("accounts"), Some("000"), false), &config, &display())
        .unwrap_err();

    assert_eq!(
        err.to_string(),
        "The following fixtures with prefix '000' are found in namespace 'accounts': 0001_users, 0002_groups"
    );
}

#[test]
fn test_unknown_namespace_is_rejected() {
    let fixture = workdir();
    let config = config_for(&fixture);

    let err = execute_command_with_display(load(Some("billing"), None, false), &config, &display())
        .unwrap_err();

    assert!(err.to_string().contains("billing"));
    assert!(!config.store_path().exists());
}

#[test]
fn test_list_only_does_not_execute() {
    let fixture = workdir();
    let config = config_for(&fixture);
    let command = Commands::Load {
        namespace: None,
        name_prefix: None,
        dry_run: false,
        list: true,
    };

    execute_command_with_display(command, &config, &display()).unwrap();

    assert!(!config.store_path().exists());
}

#[test]
fn test_load_rejects_invalid_manifest() {
    let fixture = workdir();
    fixture
        .write_manifest("shop", "0002_broken", "dependencies = [")
        .unwrap();
    let config = config_for(&fixture);

    let err = execute_command_with_display(load(None, None, false), &config, &display())
        .unwrap_err();

    assert!(format!("{err:#}").contains("shop.0002_broken"));
}

#[test]
fn test_list_is_lenient_by_default() {
    let fixture = workdir();
    fixture
        .write_manifest("shop", "0002_broken", "dependencies = [")
        .unwrap();
    let config = config_for(&fixture);

    let list = Commands::List { format: ListFormat::Text };
    execute_command_with_display(list, &config, &display()).unwrap();

    let strict = AppConfig {
        strict: true,
        ..config.clone()
    };
    let list = Commands::List { format: ListFormat::Json };
    assert!(execute_command_with_display(list, &strict, &display()).is_err());
}

#[test]
fn test_list_explains_dependency_on_skipped_manifest() {
    let fixture = TempDirFixture::new().unwrap();
    fixture
        .write_manifest("shop", "0001_base", "bogus = 1\n")
        .unwrap();
    fixture
        .write_manifest("shop", "0002_items", r#"dependencies = ["shop.0001_base"]"#)
        .unwrap();
    let config = config_for(&fixture);

    let list = Commands::List { format: ListFormat::Text };
    let err = execute_command_with_display(list, &config, &display()).unwrap_err();

    let message = format!("{err:#}");
    assert!(message.contains("skipping 1 invalid manifests"));
    assert!(message.contains("Fixture shop.0002_items depends on shop.0001_base"));
    assert!(matches!(
        err.downcast_ref::<RunnerError>(),
        Some(RunnerError::UnknownDependency { .. })
    ));
}

#[test]
fn test_missing_dependency_fails_before_loading() {
    let fixture = workdir();
    fixture
        .write_manifest("shop", "0002_orders", r#"dependencies = ["billing.0001_invoices"]"#)
        .unwrap();
    let config = config_for(&fixture);

    let err = execute_command_with_display(load(None, None, false), &config, &display())
        .unwrap_err();

    assert!(err.to_string().contains("billing.0001_invoices"));
    assert!(!config.store_path().exists());
}

#[test]
fn test_listed_fixture_serializes() {
    let fixture = workdir();
    let config = config_for(&fixture);
    let store = open_store(&config).unwrap();
    let report = Loader::new(fixture.path(), store).discover().unwrap();
    let runner = FixtureRunner::new(report.catalog);
    let key = FixtureKey::new("accounts", "0002_groups");

    let listed = listed_fixture(&runner, &key).unwrap();
    assert_eq!(
        serde_json::to_value(&listed).unwrap(),
        json!({
            "key": "accounts.0002_groups",
            "namespace": "accounts",
            "name": "0002_groups",
            "description": null,
            "dependencies": ["accounts.0001_users"],
        })
    );
}

#[test]
fn test_version_command() {
    let config = AppConfig::default();
    execute_command_with_display(Commands::Version, &config, &display()).unwrap();
}
