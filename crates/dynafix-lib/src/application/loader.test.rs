use super::*;
use crate::primitives::{ColorIntent, LogFormat};
use tempfile::TempDir;

fn cli_for(dir: &TempDir) -> AppConfig {
    AppConfig {
        workdir: Some(dir.path().to_path_buf()),
        ..AppConfig::default()
    }
}

#[test]
fn test_layered_without_file_uses_defaults() {
    let dir = TempDir::new().unwrap();

    let config = AppConfig::load_layered(cli_for(&dir), &EnvironmentConfig::default()).unwrap();

    assert_eq!(config.log_level, 0);
    assert_eq!(config.store_path(), dir.path().join(defaults::STORE));
}

#[test]
fn test_file_values_sit_below_cli() {
    let dir = TempDir::new().unwrap();
    std::fs::write(
        dir.path().join(defaults::CONFIG_FILE),
        "store = \"seed.json\"\nlog_level = 3\nlog_format = \"json\"\n",
    )
    .unwrap();

    let cli = AppConfig {
        log_level: 1,
        ..cli_for(&dir)
    };
    let config = AppConfig::load_layered(cli, &EnvironmentConfig::default()).unwrap();

    assert_eq!(config.log_level, 1);
    assert_eq!(config.log_format, LogFormat::Json);
    assert_eq!(config.store_path(), dir.path().join("seed.json"));
}

#[test]
fn test_color_environment_sits_below_cli() {
    let dir = TempDir::new().unwrap();
    let env_config = EnvironmentConfig {
        no_color: Some("1".to_string()),
        ..EnvironmentConfig::default()
    };

    let config = AppConfig::load_layered(cli_for(&dir), &env_config).unwrap();
    assert_eq!(config.color, ColorIntent::Never);

    let cli = AppConfig {
        color: ColorIntent::Always,
        ..cli_for(&dir)
    };
    let config = AppConfig::load_layered(cli, &env_config).unwrap();
    assert_eq!(config.color, ColorIntent::Always);
}

#[test]
fn test_file_cannot_set_workdir() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join(defaults::CONFIG_FILE), "workdir = \"/tmp\"\n").unwrap();

    let result = AppConfig::load_layered(cli_for(&dir), &EnvironmentConfig::default());
    assert!(matches!(result, Err(ConfigError::ValidationFailed { .. })));
}

#[test]
fn test_invalid_file_is_reported() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join(defaults::CONFIG_FILE), "log_level = [").unwrap();

    let result = AppConfig::load_layered(cli_for(&dir), &EnvironmentConfig::default());
    assert!(matches!(result, Err(ConfigError::ConfigFileParse { .. })));
}

#[test]
fn test_missing_env_files_are_ignored() {
    // The crate directory has no .env files
    assert!(load_env_files().is_ok());
}
