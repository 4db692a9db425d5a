//! # CLI Layer
//!
//! The only place in the workspace that:
//! - installs the tracing subscriber
//! - reads the working directory and resolves configuration
//! - prints results
//! - turns failed checks into an error (and so into exit code 1)

use super::render::{format_backups, format_types, print_messages};
use super::setup::{Cli, Commands, ConfigCommands};
use anyhow::{bail, Result};
use clap::Parser;
use std::path::Path;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use ugh::api::UghApi;
use ugh::config::{global_config_dir, UghConfig};

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose)?;

    let cwd = std::env::current_dir()?;
    let project_dir = cli.config_dir.clone().unwrap_or_else(|| cwd.clone());
    let config = resolve_config(&cli, &cwd, &project_dir, global_config_dir().as_deref())?;
    tracing::debug!(project_dir = %project_dir.display(), ruleset = ?config.ruleset, "context resolved");

    // Config must work even when the configured ruleset is broken.
    if let Commands::Config { action } = &cli.command {
        return handle_config_command(action.as_ref(), &config);
    }

    let api = UghApi::from_config(config, &project_dir)?;
    dispatch(&api, cli.command)
}

/// `RUST_LOG` applies as usual; the `ugh` crate logs warnings by default and
/// everything from debug up with `-v`.
fn init_logging(verbose: bool) -> Result<()> {
    let level = if verbose { "ugh=debug" } else { "ugh=warn" };
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::from_default_env().add_directive(level.parse()?))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
    Ok(())
}

fn resolve_config(
    cli: &Cli,
    cwd: &Path,
    project_dir: &Path,
    global_dir: Option<&Path>,
) -> Result<UghConfig> {
    let mut config = UghConfig::load(Some(project_dir), global_dir)?;
    if let Some(ruleset) = &cli.ruleset {
        // Flags are relative to where the user stands, not to the config dir.
        config.ruleset = Some(cwd.join(ruleset));
    }
    Ok(config)
}

fn dispatch(api: &UghApi, command: Commands) -> Result<()> {
    match command {
        Commands::Types { kind } => {
            let result = api.list_types(kind.map(Into::into))?;
            print!("{}", format_types(&result.listed_types));
            print_messages(&result.messages);
        }
        Commands::Check { document } => {
            let result = api.check_document(&document)?;
            print_messages(&result.messages);
            if result.has_errors() {
                bail!(
                    "{} failed validation with {} issue(s)",
                    document.display(),
                    result.error_count()
                );
            }
        }
        Commands::Files { document } => {
            let result = api.describe_files(&document)?;
            if let Some(text) = &result.text {
                print!("{}", text);
            }
            print_messages(&result.messages);
        }
        Commands::Scaffold { type_name, format } => {
            let result = api.scaffold(&type_name, format.into())?;
            if let Some(text) = &result.text {
                print!("{}", text);
                if !text.ends_with('\n') {
                    println!();
                }
            }
            print_messages(&result.messages);
        }
        Commands::Backup { folder, ids } => {
            let result = api.validate_backups(folder.as_deref(), ids.as_slice())?;
            print!("{}", format_backups(&result.backups));
            print_messages(&result.messages);
            if result.has_errors() {
                bail!("{} of {} backup(s) failed", result.error_count(), ids.len());
            }
        }
        Commands::Config { action } => handle_config_command(action.as_ref(), api.config())?,
    }
    Ok(())
}

/// Bare `ugh config` prints resolved values, `ugh config gen` a template.
fn handle_config_command(action: Option<&ConfigCommands>, config: &UghConfig) -> Result<()> {
    match action {
        None => {
            let value = serde_json::to_value(config)?;
            if let serde_json::Value::Object(map) = value {
                for (key, value) in &map {
                    println!("{} = {}", key, format_value(value));
                }
            }
        }
        Some(ConfigCommands::Gen) => print!("{}", UghConfig::template()),
    }
    Ok(())
}

fn format_value(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::Null => "(unset)".to_string(),
        serde_json::Value::String(s) => format!("\"{}\"", s),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::PathBuf;
    use tempfile::TempDir;

    #[test]
    fn config_values_are_quoted() {
        assert_eq!(format_value(&serde_json::json!("en")), "\"en\"");
        assert_eq!(format_value(&serde_json::Value::Null), "(unset)");
    }

    #[test]
    fn ruleset_flag_is_relative_to_cwd() {
        let cli = Cli::try_parse_from(["ugh", "types", "--ruleset", "rules.yaml"]).unwrap();
        let project = TempDir::new().unwrap();
        fs::write(project.path().join("ugh.toml"), "ruleset = \"other.yaml\"\n").unwrap();
        let config = resolve_config(&cli, Path::new("/work"), project.path(), None).unwrap();
        assert_eq!(config.ruleset, Some(PathBuf::from("/work/rules.yaml")));
    }
}
