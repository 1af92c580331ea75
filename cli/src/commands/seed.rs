// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

//! Demo-data seeding commands
//!
//! Commands: generate, init, templates, org-members

use anyhow::{Context, Result};
use clap::Subcommand;
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use serde_json::json;
use std::path::PathBuf;

use canopy_seed::{SeedClient, SeedConfig};

use crate::output::{print_json, print_table, OutputFormat};

#[derive(Subcommand)]
pub enum SeedCommand {
    /// Generate random CSV data for a seeded environment with a single root organization
    Generate {
        /// Directory to save generated data
        #[arg(short, long, default_value = "demodata")]
        directory: PathBuf,

        /// Number of users to generate
        #[arg(long, default_value_t = 10)]
        users: usize,

        /// Approximate number of groups to generate
        #[arg(long, default_value_t = 10)]
        groups: usize,

        /// Number of invites to generate
        #[arg(long, default_value_t = 5)]
        invites: usize,

        /// Number of subscribers to generate
        #[arg(long, default_value_t = 30)]
        subscribers: usize,
    },

    /// Load generated data into the directory service
    Init {
        /// Directory holding generated data
        #[arg(short, long, default_value = "demodata")]
        directory: PathBuf,

        /// Personal access token ID to authorize the new root organization
        #[arg(short = 't', long = "patid")]
        pat_id: Option<String>,
    },

    /// Add the embedded templates to an existing environment
    Templates,

    /// Register generated users and add them to an existing organization
    OrgMembers {
        /// Organization to add users to
        #[arg(short, long)]
        organization_id: String,

        /// Directory to save generated data
        #[arg(short, long, default_value = "demodata")]
        directory: PathBuf,

        /// Number of users to generate
        #[arg(long, default_value_t = 10)]
        users: usize,
    },
}

pub async fn handle_command(
    command: SeedCommand,
    directory_host: &str,
    token: Option<String>,
    format: OutputFormat,
) -> Result<()> {
    match command {
        SeedCommand::Generate {
            directory,
            users,
            groups,
            invites,
            subscribers,
        } => {
            let config = SeedConfig {
                directory,
                num_users: users,
                num_groups: groups,
                num_invites: invites,
                num_subscribers: subscribers,
                ..SeedConfig::default()
            };
            generate(&config)
        }
        SeedCommand::Init { directory, pat_id } => {
            let config = client_config(directory, directory_host, token);
            init(config, pat_id, format).await
        }
        SeedCommand::Templates => {
            let config = client_config(SeedConfig::default().directory, directory_host, token);
            load_templates(config, format).await
        }
        SeedCommand::OrgMembers {
            organization_id,
            directory,
            users,
        } => {
            let mut config = client_config(directory, directory_host, token);
            config.num_users = users;
            org_members(config, &organization_id, format).await
        }
    }
}

fn client_config(directory: PathBuf, directory_host: &str, token: Option<String>) -> SeedConfig {
    SeedConfig {
        directory,
        directory_host: directory_host.to_string(),
        token: token.unwrap_or_default(),
        ..SeedConfig::default()
    }
}

fn generate(config: &SeedConfig) -> Result<()> {
    config
        .generate()
        .with_context(|| format!("Failed to generate seed data in {}", config.directory.display()))?;

    println!(
        "{}",
        format!("✓ Seed data generated: {}", config.directory.display()).green()
    );
    Ok(())
}

/// Step-per-stage progress bar.
fn progress(steps: u64) -> Result<ProgressBar> {
    let bar = ProgressBar::new(steps);
    bar.set_style(
        ProgressStyle::with_template("{msg:<32} [{bar:15.green}] {pos}/{len} [{elapsed}]")?.progress_chars("=> "),
    );
    Ok(bar)
}

fn step(bar: &ProgressBar, message: &str) {
    bar.set_message(format!("> {}...", message));
    bar.inc(1);
}

async fn init(config: SeedConfig, pat_id: Option<String>, format: OutputFormat) -> Result<()> {
    let mut client = SeedClient::new(config).context("Failed to create seed client")?;

    let bar = progress(8)?;

    step(&bar, "creating organizations");
    let root = client.load_organizations().await.context("Failed to create organizations")?;

    if let (Some(root), Some(pat_id)) = (root.as_deref(), pat_id.as_deref()) {
        client
            .authorize_organization_on_pat(root, pat_id)
            .await
            .context("Failed to authorize organization on personal access token")?;
        client
            .generate_seed_api_token(root)
            .await
            .context("Failed to create seed API token")?;
    }

    step(&bar, "registering users");
    let user_ids = client.register_users().await.context("Failed to register users")?;

    step(&bar, "adding org members");
    client.load_org_members(&user_ids).await.context("Failed to add org members")?;

    step(&bar, "creating groups");
    client.load_groups().await.context("Failed to create groups")?;

    step(&bar, "creating invites");
    client.load_invites().await.context("Failed to create invites")?;

    step(&bar, "creating subscribers");
    client.load_subscribers().await.context("Failed to create subscribers")?;

    step(&bar, "creating templates");
    client.load_templates().await.context("Failed to create templates")?;

    step(&bar, "seeded environment created");
    bar.finish();

    print_environment(&client, format).await
}

async fn print_environment(client: &SeedClient, format: OutputFormat) -> Result<()> {
    let organizations = client.organizations().await.context("Failed to list organizations")?;
    let groups = client.groups().await.context("Failed to list groups")?;
    let invites = client.invites().await.context("Failed to list invites")?;
    let subscribers = client.subscribers().await.context("Failed to list subscribers")?;
    let templates = client.templates().await.context("Failed to list templates")?;

    if format == OutputFormat::Json {
        return print_json(&json!({
            "organizations": organizations,
            "groups": groups,
            "invites": invites,
            "subscribers": subscribers,
            "templates": templates,
        }));
    }

    println!();
    println!("{}", "✓ Seeded environment created".green());

    print_table(
        "Organizations",
        &["ID", "Name", "Description", "PersonalOrg", "Children", "Members"],
        &organizations
            .iter()
            .map(|o| {
                vec![
                    o.id.clone(),
                    o.display_name.clone(),
                    o.description.clone(),
                    o.personal_org.to_string(),
                    o.children.to_string(),
                    o.members.to_string(),
                ]
            })
            .collect::<Vec<_>>(),
    );

    print_table(
        "Groups",
        &["ID", "Name", "Description", "Visibility", "Members"],
        &groups
            .iter()
            .map(|g| {
                vec![
                    g.id.clone(),
                    g.name.clone(),
                    g.description.clone(),
                    g.visibility.clone(),
                    g.members.to_string(),
                ]
            })
            .collect::<Vec<_>>(),
    );

    print_table(
        "Invites",
        &["ID", "Recipient", "Role", "Status"],
        &invites
            .iter()
            .map(|i| vec![i.id.clone(), i.recipient.clone(), i.role.clone(), i.status.clone()])
            .collect::<Vec<_>>(),
    );

    print_table(
        "Subscribers",
        &["ID", "Email", "Active", "Verified"],
        &subscribers
            .iter()
            .map(|s| {
                vec![
                    s.id.clone(),
                    s.email.clone(),
                    s.active.to_string(),
                    s.verified_email.to_string(),
                ]
            })
            .collect::<Vec<_>>(),
    );

    print_templates(&templates);
    Ok(())
}

fn print_templates(templates: &[canopy_seed::client::TemplateSummary]) {
    print_table(
        "Templates",
        &["ID", "Name"],
        &templates
            .iter()
            .map(|t| vec![t.id.clone(), t.name.clone()])
            .collect::<Vec<_>>(),
    );
}

async fn load_templates(config: SeedConfig, format: OutputFormat) -> Result<()> {
    let client = SeedClient::new(config).context("Failed to create seed client")?;

    let bar = progress(2)?;
    step(&bar, "creating templates");
    client.load_templates().await.context("Failed to create templates")?;
    step(&bar, "templates created");
    bar.finish();

    let templates = client.templates().await.context("Failed to list templates")?;
    match format {
        OutputFormat::Json => print_json(&templates),
        OutputFormat::Table => {
            print_templates(&templates);
            Ok(())
        }
    }
}

async fn org_members(config: SeedConfig, organization_id: &str, format: OutputFormat) -> Result<()> {
    let client = SeedClient::new(config).context("Failed to create seed client")?;

    client
        .config()
        .generate_users()
        .context("Failed to generate user data")?;

    let bar = progress(3)?;
    step(&bar, "registering users");
    let user_ids = client.register_users().await.context("Failed to register users")?;

    step(&bar, "adding org members");
    client.load_org_members(&user_ids).await.context("Failed to add org members")?;

    step(&bar, "org members created");
    bar.finish();

    let members = client
        .org_members(organization_id)
        .await
        .context("Failed to list org members")?;

    match format {
        OutputFormat::Json => print_json(&members),
        OutputFormat::Table => {
            print_table(
                "OrgMembers",
                &["ID", "Email", "Role"],
                &members
                    .iter()
                    .map(|m| vec![m.id.clone(), m.email.clone(), m.role.clone()])
                    .collect::<Vec<_>>(),
            );
            Ok(())
        }
    }
}
