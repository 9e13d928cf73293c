use super::*;
use crate::primitives::{ColorIntent, LogFormat};
use clap::CommandFactory;
use std::path::PathBuf;

#[test]
fn test_cli_definition_is_consistent() {
    Cli::command().debug_assert();
}

#[test]
fn test_parse_load_with_filters() {
    let cli = Cli::try_parse_from([
        "dynafix", "--workdir", "seed", "load", "accounts", "0001", "--dry-run",
    ])
    .unwrap();

    assert_eq!(cli.config.workdir, Some(PathBuf::from("seed")));
    assert_eq!(
        cli.command,
        Some(Commands::Load {
            namespace: Some("accounts".to_string()),
            name_prefix: Some("0001".to_string()),
            dry_run: true,
            list: false,
        })
    );
}

#[test]
fn test_global_options_after_subcommand() {
    let cli = Cli::try_parse_from([
        "dynafix", "list", "--format", "json", "--color", "never", "--log-format", "json",
    ])
    .unwrap();

    assert_eq!(cli.command, Some(Commands::List { format: ListFormat::Json }));
    assert_eq!(cli.config.color, ColorIntent::Never);
    assert_eq!(cli.config.log_format, LogFormat::Json);
}

#[test]
fn test_list_defaults_to_text() {
    let cli = Cli::try_parse_from(["dynafix", "list"]).unwrap();
    assert_eq!(cli.command, Some(Commands::List { format: ListFormat::Text }));
}

#[test]
fn test_log_level_out_of_range_is_rejected() {
    assert!(Cli::try_parse_from(["dynafix", "--log-level", "9", "version"]).is_err());
}

#[test]
fn test_no_command_is_allowed() {
    let cli = Cli::try_parse_from(["dynafix"]).unwrap();
    assert!(cli.command.is_none());
}

#[test]
fn test_requires_discovery() {
    assert!(Commands::List { format: ListFormat::Text }.requires_discovery());
    assert!(!Commands::Version.requires_discovery());
}
