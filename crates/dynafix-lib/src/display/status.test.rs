use super::*;

fn key(namespace: &str, name: &str) -> FixtureKey {
    FixtureKey::new(namespace, name)
}

#[test]
fn test_fixture_entry_pads_key() {
    let styling = StyleManager::plain();
    let status = StatusDisplay::new(&styling);

    let line = status.format_fixture_entry(&key("accounts", "0001_users"), Some("Staff accounts"));
    assert_eq!(line, " * accounts.0001_users       Staff accounts");
}

#[test]
fn test_fixture_entry_without_description() {
    let styling = StyleManager::plain();
    let status = StatusDisplay::new(&styling);

    let line = status.format_fixture_entry(&key("shop", "0001_products"), None);
    assert_eq!(line, " * shop.0001_products");
}

#[test]
fn test_fixture_loaded_line() {
    let styling = StyleManager::plain();
    let status = StatusDisplay::new(&styling);

    let line = status.format_fixture_loaded(&key("accounts", "0001_users"), Duration::from_millis(12));
    assert_eq!(line, "Loading fixture accounts.0001_users... SUCCESS (12ms)");
}

#[test]
fn test_join_details() {
    assert_eq!(join_details("store", ""), "store");
    assert_eq!(join_details("store", "store.json"), "store: store.json");
}

#[test]
fn test_status_output_does_not_panic() {
    let styling = StyleManager::new(true, true);
    let status = StatusDisplay::new(&styling);

    status.success("store", "store.json");
    status.error("accounts.0001_users", "");
    status.warning("skipped 1 fixture");
    status.info("dry run");
    status.message("plain");
    status.subtle("subtle");
    status.section("Fixtures");
    status.list(&["a", "b"]);
    status.fixture_failed(&key("a", "b"));
}
