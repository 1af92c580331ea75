// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

//! Interactive prompts for `canopy organization create`.

use anyhow::{Context, Result};
use dialoguer::{Input, Select};

/// Named environment selections offered when none were given on the command line.
pub struct EnvironmentPreset {
    pub name: &'static str,
    pub values: &'static [&'static str],
}

pub static ENVIRONMENT_PRESETS: [EnvironmentPreset; 3] = [
    EnvironmentPreset {
        name: "Production & Testing",
        values: &["production", "testing"],
    },
    EnvironmentPreset {
        name: "Production Only",
        values: &["production"],
    },
    EnvironmentPreset {
        name: "Testing Only",
        values: &["testing"],
    },
];

/// Environments for a preset index; out-of-range falls back to the first preset.
pub fn preset_environments(index: usize) -> Vec<String> {
    let preset = ENVIRONMENT_PRESETS.get(index).unwrap_or(&ENVIRONMENT_PRESETS[0]);
    preset.values.iter().map(|v| v.to_string()).collect()
}

/// Split a comma separated answer, dropping blanks.
pub fn split_list(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

pub fn name() -> Result<String> {
    Input::<String>::new()
        .with_prompt("Name")
        .validate_with(|input: &String| -> Result<(), &str> {
            if input.trim().is_empty() {
                Err("missing required field: name")
            } else {
                Ok(())
            }
        })
        .interact_text()
        .context("Failed to read organization name")
}

pub fn description() -> Result<String> {
    Input::<String>::new()
        .with_prompt("Description (optional)")
        .allow_empty(true)
        .interact_text()
        .context("Failed to read description")
}

pub fn domains() -> Result<Vec<String>> {
    let answer = Input::<String>::new()
        .with_prompt("Domains, comma separated (optional)")
        .allow_empty(true)
        .interact_text()
        .context("Failed to read domains")?;

    Ok(split_list(&answer))
}

pub fn environments() -> Result<Vec<String>> {
    let labels: Vec<&str> = ENVIRONMENT_PRESETS.iter().map(|p| p.name).collect();

    let index = Select::new()
        .with_prompt("Environments")
        .items(&labels)
        .default(0)
        .interact()
        .context("Failed to read environment selection")?;

    Ok(preset_environments(index))
}
