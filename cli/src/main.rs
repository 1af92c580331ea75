// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

//! # Canopy CLI
//!
//! The `canopy` binary runs the provisioning API and talks to it.
//!
//! ## Commands
//!
//! - `canopy serve` - Run the HTTP API
//! - `canopy organization create` - Provision an organization hierarchy
//! - `canopy seed generate|init|templates|org-members` - Demo data
//! - `canopy config show|validate|generate` - Configuration management

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use std::path::PathBuf;

use canopy_cli::commands::{self, ConfigCommand, OrganizationCommand, SeedCommand};
use canopy_cli::output::{LogFormat, OutputFormat};
use canopy_cli::server;

/// Canopy - Tenant hierarchy provisioner
#[derive(Parser)]
#[command(name = "canopy")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Path to configuration file (overrides discovery)
    #[arg(
        short,
        long,
        global = true,
        env = "CANOPY_CONFIG_PATH",
        value_name = "FILE"
    )]
    config: Option<PathBuf>,

    /// Canopy API base URL
    #[arg(long, global = true, env = "CANOPY_HOST", default_value = "http://localhost:17610")]
    host: String,

    /// Directory service base URL
    #[arg(
        long,
        global = true,
        env = "CANOPY_DIRECTORY_HOST",
        default_value = "http://localhost:17608"
    )]
    directory_host: String,

    /// Bearer token for the directory service and the Canopy API
    #[arg(long, global = true, env = "CANOPY_TOKEN", hide_env_values = true)]
    token: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, global = true, env = "CANOPY_LOG_LEVEL", default_value = "info")]
    log_level: String,

    /// Log formatter
    #[arg(long, global = true, value_enum, default_value_t = LogFormat::Compact)]
    log_format: LogFormat,

    /// Result rendering
    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Table)]
    output: OutputFormat,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the provisioning HTTP API
    #[command(name = "serve")]
    Serve {
        /// Listen port (overrides configuration)
        #[arg(long)]
        port: Option<u16>,
    },

    /// Organization operations
    #[command(name = "organization")]
    Organization {
        #[command(subcommand)]
        command: OrganizationCommand,
    },

    /// Demo data seeding
    #[command(name = "seed")]
    Seed {
        #[command(subcommand)]
        command: SeedCommand,
    },

    /// Configuration management
    #[command(name = "config")]
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(&cli.log_level, cli.log_format)?;

    match cli.command {
        Some(Commands::Serve { port }) => server::start_server(cli.config, port).await,
        Some(Commands::Organization { command }) => {
            commands::organization::handle_command(command, &cli.host, cli.token, cli.output).await
        }
        Some(Commands::Seed { command }) => {
            commands::seed::handle_command(command, &cli.directory_host, cli.token, cli.output).await
        }
        Some(Commands::Config { command }) => commands::config::handle_command(command, cli.config).await,
        None => {
            eprintln!("{}", "No command specified. Use --help for usage.".yellow());
            std::process::exit(1);
        }
    }
}

/// Initialize tracing subscriber for logging
fn init_logging(level: &str, format: LogFormat) -> Result<()> {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .or_else(|_| tracing_subscriber::EnvFilter::try_new(level))
        .context("Failed to create log filter")?;

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false);

    match format {
        LogFormat::Compact => builder.compact().init(),
        LogFormat::Json => builder.json().init(),
    }

    Ok(())
}
