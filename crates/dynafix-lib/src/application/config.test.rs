use super::*;
use tempfile::TempDir;

#[test]
fn test_config_defaults() {
    let config = AppConfig::default();
    assert_eq!(config.log_level, 0);
    assert_eq!(config.log_format, LogFormat::Text);
    assert_eq!(config.log_output, LogOutput::Stderr);
    assert_eq!(config.color, ColorIntent::Auto);
    assert!(!config.strict);
    assert_eq!(config.listing_policy(), DiscoveryPolicy::Lenient);
}

#[test]
fn test_config_merging() {
    let base = AppConfig {
        store: Some(PathBuf::from("base.json")),
        log_level: 2,
        ..AppConfig::default()
    };
    let override_config = AppConfig {
        log_format: LogFormat::Json,
        color: ColorIntent::Never,
        strict: true,
        ..AppConfig::default()
    };

    let merged = base.merge_with(override_config);
    assert_eq!(merged.store, Some(PathBuf::from("base.json")));
    assert_eq!(merged.log_level, 2);
    assert_eq!(merged.log_format, LogFormat::Json);
    assert_eq!(merged.color, ColorIntent::Never);
    assert!(merged.strict);
    assert_eq!(merged.listing_policy(), DiscoveryPolicy::Strict);
}

#[test]
fn test_validate_resolves_store_against_workdir() {
    let dir = TempDir::new().unwrap();
    let mut config = AppConfig {
        workdir: Some(dir.path().to_path_buf()),
        ..AppConfig::default()
    };

    config.validate().unwrap();

    assert_eq!(config.workdir_path(), dir.path());
    assert_eq!(config.store_path(), dir.path().join(defaults::STORE));
}

#[test]
fn test_validate_keeps_absolute_store() {
    let dir = TempDir::new().unwrap();
    let store = dir.path().join("elsewhere/store.json");
    let mut config = AppConfig {
        workdir: Some(dir.path().to_path_buf()),
        store: Some(store.clone()),
        ..AppConfig::default()
    };

    config.validate().unwrap();
    assert_eq!(config.store_path(), store);
}

#[test]
fn test_validate_rejects_missing_workdir() {
    let dir = TempDir::new().unwrap();
    let mut config = AppConfig {
        workdir: Some(dir.path().join("missing")),
        ..AppConfig::default()
    };

    assert!(matches!(
        config.validate(),
        Err(ConfigError::InvalidWorkDir { .. })
    ));
}

#[test]
fn test_validate_rejects_empty_store() {
    let dir = TempDir::new().unwrap();
    let mut config = AppConfig {
        workdir: Some(dir.path().to_path_buf()),
        store: Some(PathBuf::new()),
        ..AppConfig::default()
    };

    assert!(matches!(
        config.validate(),
        Err(ConfigError::ValidationFailed { .. })
    ));
}

#[test]
fn test_from_file_missing_is_none() {
    let dir = TempDir::new().unwrap();
    assert!(AppConfig::from_file(&dir.path().join(defaults::CONFIG_FILE))
        .unwrap()
        .is_none());
}

#[test]
fn test_from_file_reads_values() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join(defaults::CONFIG_FILE);
    std::fs::write(
        &path,
        "store = \"data/store.json\"\nstrict = true\nlog_level = 3\nlog_format = \"json\"\ncolor = \"never\"\n",
    )
    .unwrap();

    let config = AppConfig::from_file(&path).unwrap().unwrap();
    assert_eq!(config.store, Some(PathBuf::from("data/store.json")));
    assert!(config.strict);
    assert_eq!(config.log_level, 3);
    assert_eq!(config.log_format, LogFormat::Json);
    assert_eq!(config.log_output, LogOutput::Stderr);
    assert_eq!(config.color, ColorIntent::Never);
}

#[test]
fn test_from_file_rejects_unknown_keys() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join(defaults::CONFIG_FILE);
    std::fs::write(&path, "verbose = true\n").unwrap();

    assert!(matches!(
        AppConfig::from_file(&path),
        Err(ConfigError::ConfigFileParse { .. })
    ));
}

#[test]
fn test_to_logger_config() {
    let config = AppConfig {
        log_level: 3,
        log_output: LogOutput::Stdout,
        ..AppConfig::default()
    };

    let logger_config = config.to_logger_config(true);
    assert_eq!(logger_config.level, LogLevel::Debug);
    assert_eq!(logger_config.format, LogFormat::Text);
    assert_eq!(logger_config.output, LogOutput::Stdout);
    assert!(logger_config.color);
}
