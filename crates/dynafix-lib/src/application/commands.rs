//! Command execution handlers
//!
//! Each handler discovers the fixtures of the configured working directory,
//! asks the runner for a plan and reports through [`Display`].

use crate::application::{AppConfig, CliConfig, Commands, ListFormat};
use crate::display::Display;
use crate::fixtures::{
    DiscoveryPolicy, DiscoveryReport, FixtureRunner, Loader, ProgressEvent, RunnerError,
};
use crate::primitives::FixtureKey;
use crate::store::JsonStore;
use anyhow::{Context, Result, bail};
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, info};

/// One entry of `list --format json`
#[derive(Debug, Serialize)]
struct ListedFixture<'a> {
    key: String,
    namespace: &'a str,
    name: &'a str,
    description: Option<&'a str>,
    dependencies: Vec<String>,
}

/// Execute a parsed command line
pub fn execute_command(config: CliConfig) -> Result<()> {
    let color = config.app_config.color.resolve();
    let display = Display::new(color);

    let command = match config.command {
        Some(cmd) => cmd,
        None => {
            display
                .status()
                .message("dynafix - dependency-aware data fixtures");
            display
                .status()
                .subtle("Run 'dynafix --help' for usage information");
            return Ok(());
        }
    };

    execute_command_with_display(command, &config.app_config, &display)
}

/// Execute a specific command with a provided display (for testing)
pub fn execute_command_with_display(
    command: Commands,
    config: &AppConfig,
    display: &Display,
) -> Result<()> {
    if command.requires_discovery() {
        debug!(
            workdir = %config.workdir_path().display(),
            store = %config.store_path().display(),
            "Resolved fixture locations"
        );
    }

    match command {
        Commands::List { format } => handle_list(config, display, format),
        Commands::Load {
            namespace,
            name_prefix,
            dry_run,
            list,
        } => handle_load(config, display, namespace, name_prefix, dry_run, list),
        Commands::Version => handle_version(display),
    }
}

fn handle_version(display: &Display) -> Result<()> {
    let status = display.status();
    status.message(&format!("dynafix {}", env!("CARGO_PKG_VERSION")));
    status.subtle(&format!(
        "{} on {}",
        std::env::consts::ARCH,
        std::env::consts::OS
    ));
    Ok(())
}

fn handle_list(config: &AppConfig, display: &Display, format: ListFormat) -> Result<()> {
    let store = open_store(config)?;
    let report = discover(config, display, store, config.listing_policy())?;
    let namespaces_searched = report.namespaces_searched.len();
    let skipped: Vec<String> = report.skipped.iter().map(|err| err.to_string()).collect();

    let mut runner = FixtureRunner::new(report.catalog);
    let plan = match runner.plan(None) {
        Ok(plan) => plan,
        Err(err) if !skipped.is_empty() => {
            let status = display.status();
            for reason in &skipped {
                status.warning(&format!("Skipped {reason}"));
            }
            return Err(err).with_context(|| {
                format!(
                    "Cannot order fixtures after skipping {} invalid manifests",
                    skipped.len()
                )
            });
        }
        Err(err) => return Err(err.into()),
    };

    match format {
        ListFormat::Json => {
            let listed = plan
                .iter()
                .map(|key| listed_fixture(&runner, key))
                .collect::<Result<Vec<_>>>()?;
            let json = serde_json::to_string_pretty(&listed)
                .context("Failed to serialize fixture listing")?;
            display.status().message(&json);
        }
        ListFormat::Text => {
            let status = display.status();
            status.message(&format!("Searched {namespaces_searched} namespaces."));
            for reason in &skipped {
                status.warning(&format!("Skipped {reason}"));
            }

            status.section("All dynamic fixtures in the order they would be loaded:");
            for key in &plan {
                let description = runner.catalog().get(key).and_then(|unit| unit.description());
                status.fixture_entry(key, description);
            }
            status.message("");
            status.message(&format!("Found {} dynamic fixtures.", plan.len()));
        }
    }

    Ok(())
}

fn handle_load(
    config: &AppConfig,
    display: &Display,
    namespace: Option<String>,
    name_prefix: Option<String>,
    dry_run: bool,
    list_only: bool,
) -> Result<()> {
    let store = open_store(config)?;
    let report = discover(config, display, Arc::clone(&store), DiscoveryPolicy::Strict)?;
    let mut runner = FixtureRunner::new(report.catalog);

    let nodes = match (namespace, name_prefix) {
        (None, _) => None,
        (Some(namespace), None) => {
            let nodes = runner.filter_by_namespace(&namespace)?;
            if nodes.is_empty() {
                bail!("No fixtures found in namespace '{namespace}'");
            }
            Some(nodes)
        }
        (Some(namespace), Some(prefix)) => Some(runner.filter_by_prefix(&namespace, &prefix)?),
    };
    let plan = runner.plan(nodes.as_deref())?;

    let status = display.status();
    if list_only {
        for key in &plan {
            let description = runner.catalog().get(key).and_then(|unit| unit.description());
            status.fixture_entry(key, description);
        }
        status.message(&format!("{} fixtures would be loaded.", plan.len()));
        return Ok(());
    }

    let tracker = display.progress().bar(plan.len() as u64);
    let mut on_progress = |event: &ProgressEvent<'_>| -> anyhow::Result<()> {
        match event {
            ProgressEvent::LoadStart { node } => tracker.set_message(&node.to_string()),
            ProgressEvent::LoadSuccess { node, elapsed } => {
                tracker.suspend(|| status.fixture_loaded(node, *elapsed));
                tracker.inc();
            }
        }
        Ok(())
    };

    let result = runner.execute(&plan, &*store, Some(&mut on_progress), dry_run);
    tracker.finish_clear();

    match result {
        Ok(count) if dry_run => {
            status.message(&format!("Dry run: {count} fixtures loaded and rolled back"));
        }
        Ok(count) => {
            info!(store = %store.path().display(), "Committed {} fixtures", count);
            status.message(&format!("Loaded {count} fixtures"));
        }
        Err(err) => {
            if let RunnerError::LoadFailed { node, .. } = &err {
                status.fixture_failed(node);
            }
            return Err(err.into());
        }
    }

    Ok(())
}

fn open_store(config: &AppConfig) -> Result<Arc<JsonStore>> {
    Ok(Arc::new(JsonStore::open(config.store_path())?))
}

fn discover(
    config: &AppConfig,
    display: &Display,
    store: Arc<JsonStore>,
    policy: DiscoveryPolicy,
) -> Result<DiscoveryReport> {
    let workdir = config.workdir_path();
    let spinner = display.progress().spinner("Discovering fixtures");
    let report = Loader::new(&workdir, store).with_policy(policy).discover();
    spinner.finish_clear();

    let report = report
        .with_context(|| format!("Fixture discovery failed in {}", workdir.display()))?;
    debug!(
        fixtures = report.catalog.len(),
        ?policy,
        "Discovered fixtures"
    );
    Ok(report)
}

fn listed_fixture<'a>(runner: &'a FixtureRunner, key: &'a FixtureKey) -> Result<ListedFixture<'a>> {
    let unit = runner
        .catalog()
        .get(key)
        .with_context(|| format!("Fixture {key} is missing from the catalog"))?;

    Ok(ListedFixture {
        key: key.to_string(),
        namespace: &key.namespace,
        name: &key.name,
        description: unit.description(),
        dependencies: unit
            .dependencies()
            .iter()
            .map(|dependency| dependency.to_string())
            .collect(),
    })
}

#[cfg(test)]
mod tests {
    include!("commands.test.rs");
}
