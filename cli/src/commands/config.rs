// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

//! Configuration management commands
//!
//! Commands: show, validate, generate

use anyhow::{Context, Result};
use clap::Subcommand;
use colored::Colorize;
use std::path::PathBuf;

use canopy_core::domain::config::{ServiceConfig, CONFIG_PATH_ENV};

pub const MINIMAL_TEMPLATE: &str = include_str!("../../templates/config-minimal.yaml");
pub const EXAMPLES_TEMPLATE: &str = include_str!("../../templates/config-with-examples.yaml");

#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration
    Show {
        /// Show config file paths checked
        #[arg(long)]
        paths: bool,
    },

    /// Validate configuration file
    Validate {
        /// Path to config file (default: discover)
        #[arg(value_name = "FILE")]
        file: Option<PathBuf>,
    },

    /// Generate sample configuration
    Generate {
        /// Output path (default: ./canopy-config.yaml)
        #[arg(short = 'p', long = "path", default_value = "./canopy-config.yaml")]
        output: PathBuf,

        /// Include examples and comments
        #[arg(long)]
        examples: bool,
    },
}

pub async fn handle_command(command: ConfigCommand, config_override: Option<PathBuf>) -> Result<()> {
    match command {
        ConfigCommand::Show { paths } => show(config_override, paths).await,
        ConfigCommand::Validate { file } => validate(file.or(config_override)).await,
        ConfigCommand::Generate { output, examples } => generate(output, examples).await,
    }
}

async fn show(config_override: Option<PathBuf>, show_paths: bool) -> Result<()> {
    let config = ServiceConfig::load_or_default(config_override.clone()).context("Failed to load configuration")?;

    if show_paths {
        println!("{}", "Configuration discovery paths:".bold());
        if let Some(path) = &config_override {
            println!("  1. --config flag: {}", path.display());
        } else {
            println!("  1. --config flag: {}", "(not set)".dimmed());
        }
        println!(
            "  2. {}: {}",
            CONFIG_PATH_ENV,
            std::env::var(CONFIG_PATH_ENV)
                .unwrap_or_else(|_| "(not set)".to_string())
                .dimmed()
        );
        println!("  3. ./canopy-config.yaml");
        println!("  4. ~/.canopy/config.yaml");
        println!("  5. /etc/canopy/config.yaml");
        println!();
    }

    println!("{}", "Current configuration:".bold());
    println!();

    println!("{}", "Server:".bold());
    println!("  Listen: {}", config.server.listen_address());
    match config.server.request_timeout() {
        Some(timeout) => println!("  Request timeout: {}s", timeout.as_secs()),
        None => println!("  Request timeout: {}", "(disabled)".dimmed()),
    }
    println!();

    println!("{}", "Directory:".bold());
    println!("  Backend: {:?}", config.directory.backend);
    println!("  Endpoint: {}", config.directory.endpoint);
    println!(
        "  Token: {}",
        if config.directory.resolved_token().is_some() {
            "(set)".green()
        } else {
            "(not set)".yellow()
        }
    );
    println!("  Timeout: {}s", config.directory.timeout_secs);
    println!();

    println!("{}", "Hierarchy defaults:".bold());
    println!("  Environments: {}", config.hierarchy.environments.join(", "));
    println!("  Buckets: {}", config.hierarchy.buckets.join(", "));
    println!("  Relationships: {}", config.hierarchy.relationships.join(", "));
    println!();

    Ok(())
}

async fn validate(config_path: Option<PathBuf>) -> Result<()> {
    println!("Validating configuration...");

    let config = ServiceConfig::load_or_default(config_path).context("Failed to load configuration")?;

    config.validate().context("Configuration validation failed")?;

    println!("{}", "✓ Configuration is valid".green());

    Ok(())
}

async fn generate(output: PathBuf, with_examples: bool) -> Result<()> {
    let sample = if with_examples { EXAMPLES_TEMPLATE } else { MINIMAL_TEMPLATE };

    std::fs::write(&output, sample).with_context(|| format!("Failed to write config to {:?}", output))?;

    println!(
        "{}",
        format!("✓ Configuration generated: {}", output.display()).green()
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use canopy_core::domain::config::DirectoryBackend;
    use canopy_core::domain::hierarchy::DefaultLevels;

    #[test]
    fn test_templates_parse() {
        for template in [MINIMAL_TEMPLATE, EXAMPLES_TEMPLATE] {
            let config = ServiceConfig::from_yaml_str(template).unwrap();
            assert_eq!(config.server.port, 17610);
            assert_eq!(config.directory.backend, DirectoryBackend::GraphQL);
            assert_eq!(config.directory.token.as_deref(), Some("env:CANOPY_DIRECTORY_TOKEN"));
            assert_eq!(config.hierarchy, DefaultLevels::default());
        }
    }

    #[tokio::test]
    async fn test_generate_writes_file() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("canopy-config.yaml");

        generate(output.clone(), true).await.unwrap();

        let written = std::fs::read_to_string(&output).unwrap();
        assert_eq!(written, EXAMPLES_TEMPLATE);
    }

    #[tokio::test]
    async fn test_validate_rejects_memory_config_with_empty_lists() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.yaml");
        std::fs::write(
            &path,
            "directory:\n  backend: memory\nhierarchy:\n  environments: []\n  buckets: [assets]\n  relationships: [vendors]\n",
        )
        .unwrap();

        let err = validate(Some(path)).await.unwrap_err();
        assert!(format!("{:#}", err).contains("hierarchy.environments cannot be empty"));
    }
}
