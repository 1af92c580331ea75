// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

//! Organization commands
//!
//! Commands: create

use anyhow::{Context, Result};
use clap::{ArgAction, Args, Subcommand};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

use canopy_core::domain::organization::OrganizationRequest;
use canopy_sdk::CanopyClient;

use crate::output::{self, OutputFormat};
use crate::prompts;

#[derive(Subcommand)]
pub enum OrganizationCommand {
    /// Provision an organization with its environments, buckets and relationships
    Create(CreateArgs),
}

#[derive(Args, Debug, Clone)]
pub struct CreateArgs {
    /// Name of the organization
    #[arg(short, long)]
    pub name: Option<String>,

    /// Description of the organization
    #[arg(short, long)]
    pub description: Option<String>,

    /// Domains associated with the organization
    #[arg(long, value_delimiter = ',')]
    pub domains: Vec<String>,

    /// Environments to create (server defaults when empty)
    #[arg(long, value_delimiter = ',')]
    pub environments: Vec<String>,

    /// Buckets created in every environment
    #[arg(long, value_delimiter = ',')]
    pub buckets: Vec<String>,

    /// Relationships created under the `relationships` bucket
    #[arg(long, value_delimiter = ',')]
    pub relationships: Vec<String>,

    /// Prompt for missing values; set to false to disable
    #[arg(short, long, default_value_t = true, action = ArgAction::Set)]
    pub interactive: bool,
}

impl CreateArgs {
    pub fn to_request(&self) -> OrganizationRequest {
        OrganizationRequest {
            name: self.name.clone().unwrap_or_default(),
            description: self.description.clone().unwrap_or_default(),
            domains: self.domains.clone(),
            environments: self.environments.clone(),
            buckets: self.buckets.clone(),
            relationships: self.relationships.clone(),
        }
    }
}

pub async fn handle_command(
    command: OrganizationCommand,
    host: &str,
    token: Option<String>,
    format: OutputFormat,
) -> Result<()> {
    match command {
        OrganizationCommand::Create(args) => create(args, host, token, format).await,
    }
}

async fn create(args: CreateArgs, host: &str, token: Option<String>, format: OutputFormat) -> Result<()> {
    let mut request = args.to_request();

    if args.interactive {
        if request.name.is_empty() {
            request.name = prompts::name()?;
        }
        if args.description.is_none() {
            request.description = prompts::description()?;
        }
        if request.domains.is_empty() {
            request.domains = prompts::domains()?;
        }
        if request.environments.is_empty() {
            request.environments = prompts::environments()?;
            println!("Environments: {}", request.environments.join(", "));
        }
    }

    let mut client = CanopyClient::new(host);
    if let Some(token) = token {
        client = client.with_api_key(token);
    }

    println!();
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(ProgressStyle::with_template("{spinner:.green} {msg} [{elapsed}]")?);
    spinner.set_message("creating organization...");
    spinner.enable_steady_tick(Duration::from_millis(100));

    let result = client.create_organization(&request).await;
    spinner.finish_and_clear();

    match result {
        Ok(reply) => {
            if format == OutputFormat::Table {
                println!("{}", "✓ Organization provisioned".green());
                println!();
            }
            output::print_organization(&reply, format)
        }
        Err(e) => {
            if let Some(partial) = e.error_reply().and_then(|reply| reply.partial) {
                eprintln!("{}", "Partially created hierarchy:".yellow());
                eprintln!("{}", output::render_organization(&partial).dimmed());
            }
            Err(e).context(format!("Failed to create organization '{}'", request.name))
        }
    }
}
