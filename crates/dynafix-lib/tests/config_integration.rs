use clap::Parser;
use dynafix_lib::application::config::{AppConfig, defaults};
use dynafix_lib::application::{Cli, EnvironmentConfig};
use dynafix_lib::fixtures::DiscoveryPolicy;
use dynafix_lib::primitives::{ColorIntent, LogFormat, LogLevel};
use std::fs;
use tempfile::TempDir;

fn parse(args: &[&str]) -> Cli {
    let mut argv = vec!["dynafix"];
    argv.extend_from_slice(args);
    Cli::try_parse_from(argv).unwrap()
}

#[test]
fn test_config_default_creation() {
    let config = AppConfig::default();

    assert!(config.log_level <= 4);
    assert_eq!(config.color, ColorIntent::Auto);
    assert!(config.store.is_none());
}

#[test]
fn test_parsed_arguments_layer_over_file() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join(defaults::CONFIG_FILE),
        "strict = true\nlog_level = 2\nlog_format = \"yaml\"\n",
    )
    .unwrap();
    let workdir = dir.path().to_str().unwrap();

    let cli = parse(&["--workdir", workdir, "--log-level", "4", "list"]);
    let config = AppConfig::load_layered(cli.config, &EnvironmentConfig::default()).unwrap();

    assert_eq!(config.log_level, 4);
    assert_eq!(config.log_format, LogFormat::Yaml);
    assert_eq!(config.listing_policy(), DiscoveryPolicy::Strict);
    assert_eq!(config.to_logger_config(false).level, LogLevel::Trace);
}

#[test]
fn test_store_argument_relative_to_workdir() {
    let dir = TempDir::new().unwrap();
    let workdir = dir.path().to_str().unwrap();

    let cli = parse(&["--workdir", workdir, "--store", "seed/out.json", "load"]);
    let config = AppConfig::load_layered(cli.config, &EnvironmentConfig::default()).unwrap();

    assert_eq!(config.store_path(), dir.path().join("seed/out.json"));
}

#[test]
fn test_ci_disables_color_unless_forced_on_command_line() {
    let dir = TempDir::new().unwrap();
    let workdir = dir.path().to_str().unwrap();
    let env_config = EnvironmentConfig::from_vars([("CI", "true")]).unwrap();

    let cli = parse(&["--workdir", workdir, "version"]);
    let config = AppConfig::load_layered(cli.config, &env_config).unwrap();
    assert_eq!(config.color, ColorIntent::Never);

    let cli = parse(&["--workdir", workdir, "--color", "always", "version"]);
    let config = AppConfig::load_layered(cli.config, &env_config).unwrap();
    assert_eq!(config.color, ColorIntent::Always);
}
