//! End-to-end behavior of the list command

use anyhow::Result;
use dynafix_lib::application::{AppConfig, Commands, ListFormat};
use dynafix_tests::TestEnvironment;
use dynafix_tests::fixtures::BROKEN_TOML;

fn list(format: ListFormat) -> Commands {
    Commands::List { format }
}

#[test]
fn list_never_writes_the_store() -> Result<()> {
    let env = TestEnvironment::shop()?;

    env.run(list(ListFormat::Text))?;
    env.run(list(ListFormat::Json))?;

    assert!(!env.store_exists()?);
    Ok(())
}

#[test]
fn list_skips_broken_manifests_unless_strict() -> Result<()> {
    let env = TestEnvironment::shop()?;
    env.with_fixture("shop", "0003_broken", BROKEN_TOML)?;

    env.run(list(ListFormat::Text))?;

    let strict = AppConfig {
        strict: true,
        ..env.config()?
    };
    let err = env.run_with(list(ListFormat::Text), strict).unwrap_err();
    assert!(format!("{err:#}").contains("shop.0003_broken"));
    Ok(())
}

#[test]
fn list_reports_cycles() -> Result<()> {
    let env = TestEnvironment::shop()?;
    env.with_fixture(
        "shop",
        "0001_products",
        r#"dependencies = ["shop.0002_orders"]"#,
    )?;

    let err = env.run(list(ListFormat::Text)).unwrap_err();
    assert!(err.to_string().contains("Circular dependency detected"));
    Ok(())
}

#[test]
fn list_on_empty_workdir_succeeds() -> Result<()> {
    let env = TestEnvironment::new()?;

    env.run(list(ListFormat::Text))?;
    Ok(())
}
