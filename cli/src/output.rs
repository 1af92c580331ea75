// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

//! Terminal rendering for command results.

use anyhow::{Context, Result};
use clap::ValueEnum;
use colored::Colorize;
use serde::Serialize;

use canopy_core::domain::organization::OrganizationReply;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Table,
    Json,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    Compact,
    Json,
}

pub fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value).context("Failed to serialize output")?;
    println!("{}", json);
    Ok(())
}

/// Plain-text outline of a provisioned organization.
pub fn render_organization(reply: &OrganizationReply) -> String {
    let mut lines = vec![
        format!("ID: {}", reply.id),
        format!("New Organization Created: {}", reply.name),
    ];

    if !reply.description.is_empty() {
        lines.push(format!("Description: {}", reply.description));
    }

    if !reply.domains.is_empty() {
        lines.push(format!("Domains: {}", reply.domains.join(",")));
    }

    for env in &reply.environments {
        lines.push(String::new());
        lines.push(format!("--> Environment: {}", env.name));

        for bucket in &env.buckets {
            lines.push(format!("-----> Bucket: {}", bucket.name));

            for relationship in &bucket.relationships {
                lines.push(format!("--------> Relation: {}", relationship.name));
            }
        }
    }

    lines.join("\n")
}

pub fn print_organization(reply: &OrganizationReply, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => print_json(reply),
        OutputFormat::Table => {
            println!("{}", render_organization(reply));
            Ok(())
        }
    }
}

/// Left-aligned columns sized to the widest cell.
pub fn render_table(headers: &[&str], rows: &[Vec<String>]) -> Vec<String> {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in rows {
        for (i, cell) in row.iter().enumerate().take(widths.len()) {
            widths[i] = widths[i].max(cell.chars().count());
        }
    }

    let line = |cells: Vec<&str>| -> String {
        cells
            .iter()
            .zip(&widths)
            .map(|(cell, width)| format!("{:<width$}", cell, width = *width))
            .collect::<Vec<_>>()
            .join("  ")
            .trim_end()
            .to_string()
    };

    let mut out = Vec::with_capacity(rows.len() + 1);
    out.push(line(headers.to_vec()));
    for row in rows {
        out.push(line(row.iter().map(String::as_str).collect()));
    }
    out
}

pub fn print_table(title: &str, headers: &[&str], rows: &[Vec<String>]) {
    println!();
    println!("{}", title.bold());

    if rows.is_empty() {
        println!("{}", "  (none)".dimmed());
        return;
    }

    let mut lines = render_table(headers, rows).into_iter();
    if let Some(header) = lines.next() {
        println!("{}", header.bold());
    }
    for line in lines {
        println!("{}", line);
    }
}
