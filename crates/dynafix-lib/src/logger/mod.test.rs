use super::*;

#[test]
fn test_log_context_with_progress() {
    let mut context = LogContext::with_progress("load_fixtures", 12);
    assert_eq!(context.operation, "load_fixtures");
    assert_eq!(context.total_items, Some(12));
    assert_eq!(context.current_item, None);

    context.set_progress(3);
    assert_eq!(context.current_item, Some(3));
}

#[test]
fn test_filter_directives_follow_level() {
    assert_eq!(
        filter_directives(LogLevel::Debug),
        "dynafix=debug,dynafix_lib=debug,warn"
    );
    assert_eq!(
        filter_directives(LogLevel::Error),
        "dynafix=error,dynafix_lib=error,error"
    );
}

#[test]
fn test_filter_directives_parse() {
    for level in [
        LogLevel::Error,
        LogLevel::Warning,
        LogLevel::Info,
        LogLevel::Debug,
        LogLevel::Trace,
    ] {
        assert!(EnvFilter::try_new(filter_directives(level)).is_ok());
    }
}

#[test]
fn test_global_is_consistent_with_initialized_flag() {
    assert_eq!(Logger::is_initialized(), Logger::global().is_some());
}
