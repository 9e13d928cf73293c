use super::*;
use crate::testing::{Journal, MockFixture};

#[test]
fn test_catalog_iterates_in_key_order() {
    let journal = Journal::new();
    let mut catalog = Catalog::new();
    for (namespace, name) in [("shop", "0001"), ("accounts", "0002"), ("accounts", "0001")] {
        let unit = MockFixture::new(format!("{namespace}.{name}"), &journal);
        catalog.insert(FixtureKey::new(namespace, name), Box::new(unit));
    }

    let keys: Vec<String> = catalog.keys().map(|key| key.to_string()).collect();
    assert_eq!(keys, vec!["accounts.0001", "accounts.0002", "shop.0001"]);
    assert_eq!(catalog.iter().count(), 3);
    assert_eq!(catalog.len(), 3);
}

#[test]
fn test_catalog_insert_replaces_existing_unit() {
    let journal = Journal::new();
    let key = FixtureKey::new("accounts", "0001");
    let mut catalog = Catalog::new();

    assert!(catalog
        .insert(key.clone(), Box::new(MockFixture::new("first", &journal)))
        .is_none());
    let previous = catalog.insert(key.clone(), Box::new(MockFixture::new("second", &journal)));
    assert!(previous.is_some());

    catalog.get(&key).unwrap().load().unwrap();
    assert_eq!(journal.entries(), vec!["second"]);
}

#[test]
fn test_empty_catalog() {
    let catalog = Catalog::new();
    assert!(catalog.is_empty());
    assert!(!catalog.contains(&FixtureKey::new("a", "b")));
    assert!(catalog.get(&FixtureKey::new("a", "b")).is_none());
    assert_eq!(format!("{catalog:?}"), "[]");
}
