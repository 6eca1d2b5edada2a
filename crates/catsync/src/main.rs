// SPDX-FileCopyrightText: 2026 Catsync Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! catsync - incremental CatalogIQ to BigCommerce catalog synchronizer.
//!
//! This is the binary entry point. Every external client is built here from
//! configuration and injected into the sync step.

mod commands;
mod serve;
mod shutdown;
mod wiring;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing::error;

/// catsync - incremental catalog synchronizer.
#[derive(Parser, Debug)]
#[command(name = "catsync", version, about, long_about = None)]
struct Cli {
    /// Configuration file to load instead of the default search path.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Serve the Pub/Sub push endpoint.
    Serve,
    /// Run one sync step for a cursor and publish its continuation.
    Step {
        #[arg(long)]
        offset: u64,
    },
    /// Publish a cursor message, starting or resuming a run.
    Trigger {
        #[arg(long, default_value_t = 0)]
        offset: u64,
    },
    /// Run a whole sync in process, without Pub/Sub.
    Run {
        #[arg(long, default_value_t = 0)]
        from: u64,
    },
    /// Print the effective configuration with credentials redacted.
    Config,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let loaded = match &cli.config {
        Some(path) => catsync_config::load_and_validate_path(path),
        None => catsync_config::load_and_validate(),
    };
    let config = match loaded {
        Ok(config) => config,
        Err(errors) => {
            catsync_config::render_errors(&errors);
            return ExitCode::FAILURE;
        }
    };

    init_tracing(&config.sync.log_level);
    catsync_config::warn_placeholder_credentials(&config);

    let result = match cli.command {
        Commands::Serve => serve::run_serve(config).await,
        Commands::Step { offset } => commands::run_step(&config, offset).await,
        Commands::Trigger { offset } => commands::run_trigger(&config, offset).await,
        Commands::Run { from } => commands::run_local(&config, from).await,
        Commands::Config => commands::show_config(&config),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "catsync failed");
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

/// Installs the global fmt subscriber. `RUST_LOG` overrides the configured level.
fn init_tracing(log_level: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter(log_level)));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_names(false)
        .init();
}

fn default_filter(log_level: &str) -> String {
    format!("catsync={log_level},warn")
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn trigger_defaults_to_offset_zero() {
        let cli = Cli::try_parse_from(["catsync", "trigger"]).unwrap();
        assert!(matches!(cli.command, Commands::Trigger { offset: 0 }));
    }

    #[test]
    fn step_requires_an_offset() {
        assert!(Cli::try_parse_from(["catsync", "step"]).is_err());
        let cli = Cli::try_parse_from(["catsync", "step", "--offset", "41"]).unwrap();
        assert!(matches!(cli.command, Commands::Step { offset: 41 }));
    }

    #[test]
    fn negative_offsets_are_rejected() {
        assert!(Cli::try_parse_from(["catsync", "run", "--from", "-1"]).is_err());
    }

    #[test]
    fn config_path_is_global() {
        let cli = Cli::try_parse_from(["catsync", "run", "--config", "/tmp/c.toml"]).unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("/tmp/c.toml")));
    }

    #[test]
    fn default_filter_scopes_level_to_catsync() {
        assert_eq!(default_filter("debug"), "catsync=debug,warn");
    }
}
