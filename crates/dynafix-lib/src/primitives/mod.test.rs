use super::*;

// =============================================================================
// VALUE ENUM COVERAGE
// =============================================================================

macro_rules! test_enum_completeness {
    ($enum_type:ty, $test_name:ident) => {
        #[test]
        fn $test_name() {
            for variant in <$enum_type>::value_variants() {
                let possible_value = variant
                    .to_possible_value()
                    .expect("PossibleValue should exist for all variants");

                let primary_name = possible_value.get_name();
                let parsed: $enum_type = primary_name
                    .parse()
                    .unwrap_or_else(|_| panic!("'{}' should parse", primary_name));
                assert_eq!(parsed, *variant, "Round-trip should preserve variant");
            }
        }
    };
}

macro_rules! test_fromstr_aliases {
    ($enum_type:ty, $test_name:ident, $expected_mappings:expr) => {
        #[test]
        fn $test_name() {
            let mappings: &[(&str, $enum_type)] = &$expected_mappings;

            for (input, expected) in mappings {
                let parsed: Result<$enum_type, _> = input.parse();
                assert_eq!(
                    parsed.ok(),
                    Some(*expected),
                    "Wrong variant for input '{}'",
                    input
                );
            }
        }
    };
}

test_enum_completeness!(LogLevel, test_log_level_completeness);
test_enum_completeness!(LogFormat, test_log_format_completeness);
test_enum_completeness!(LogOutput, test_log_output_completeness);
test_enum_completeness!(ColorIntent, test_color_intent_completeness);

test_fromstr_aliases!(
    LogLevel,
    test_log_level_aliases,
    [
        ("error", LogLevel::Error),
        ("fatal", LogLevel::Error),
        ("warning", LogLevel::Warning),
        ("information", LogLevel::Info),
        ("debugging", LogLevel::Debug),
        ("verbose", LogLevel::Trace),
    ]
);

test_fromstr_aliases!(
    LogFormat,
    test_log_format_aliases,
    [
        ("txt", LogFormat::Text),
        ("plain", LogFormat::Text),
        ("JSON", LogFormat::Json),
        ("yml", LogFormat::Yaml),
    ]
);

test_fromstr_aliases!(
    ColorIntent,
    test_color_intent_aliases,
    [
        ("detect", ColorIntent::Auto),
        ("force", ColorIntent::Always),
        ("off", ColorIntent::Never),
    ]
);

#[test]
fn test_invalid_value_reports_parse_error() {
    let err = "loud".parse::<LogLevel>().unwrap_err();
    match err {
        ConfigError::ParseError { value, reason } => {
            assert_eq!(value, "loud");
            assert_eq!(reason, "invalid log level");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

// =============================================================================
// LOG LEVEL BEHAVIOUR
// =============================================================================

#[test]
fn test_from_verbosity_saturates_at_trace() {
    assert_eq!(LogLevel::from_verbosity(0), LogLevel::Error);
    assert_eq!(LogLevel::from_verbosity(2), LogLevel::Info);
    assert_eq!(LogLevel::from_verbosity(4), LogLevel::Trace);
    assert_eq!(LogLevel::from_verbosity(200), LogLevel::Trace);
}

#[test]
fn test_should_log_respects_ordering() {
    assert!(LogLevel::Error.should_log(LogLevel::Info));
    assert!(LogLevel::Info.should_log(LogLevel::Info));
    assert!(!LogLevel::Debug.should_log(LogLevel::Info));
}

#[test]
fn test_directive_names() {
    assert_eq!(LogLevel::Warning.as_directive(), "warn");
    assert_eq!(LogLevel::Trace.as_directive(), "trace");
}

#[test]
fn test_color_intent_never_disables_console_colors() {
    assert!(!ColorIntent::Never.resolve());
}
