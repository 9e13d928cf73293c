// Tests for fixture identifiers

#[test]
fn test_display_joins_with_dot() {
    let key = FixtureKey::new("accounts", "0001_users");
    assert_eq!(key.to_string(), "accounts.0001_users");
}

#[test]
fn test_parse_splits_on_first_dot() {
    let key: FixtureKey = "accounts.0001_users.v2".parse().unwrap();
    assert_eq!(key.namespace, "accounts");
    assert_eq!(key.name, "0001_users.v2");
}

#[test]
fn test_parse_rejects_missing_separator() {
    let result: Result<FixtureKey, _> = "accounts".parse();
    assert!(matches!(
        result,
        Err(FixtureKeyError::MissingSeparator { .. })
    ));
}

#[test]
fn test_parse_rejects_empty_components() {
    for input in [".users", "accounts.", "."] {
        let result: Result<FixtureKey, _> = input.parse();
        assert!(
            matches!(result, Err(FixtureKeyError::EmptyComponent { .. })),
            "'{}' should be rejected",
            input
        );
    }
}

#[test]
fn test_ordering_is_namespace_then_name() {
    let mut keys = vec![
        FixtureKey::new("b", "a"),
        FixtureKey::new("a", "z"),
        FixtureKey::new("a", "b"),
    ];
    keys.sort();
    assert_eq!(
        keys,
        vec![
            FixtureKey::new("a", "b"),
            FixtureKey::new("a", "z"),
            FixtureKey::new("b", "a"),
        ]
    );
}

#[test]
fn test_from_tuple() {
    let key: FixtureKey = ("shop", "products").into();
    assert!(key.in_namespace("shop"));
    assert!(!key.in_namespace("accounts"));
}
