// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

//! JSON schema templates compiled into the binary.
//!
//! File names follow `<prefix>.<name>.json`; the middle part becomes the
//! template name.

use crate::error::SeedError;
use serde_json::Value;

const TEMPLATE_NAME_PARTS: usize = 3;

const EMBEDDED: &[(&str, &str)] = &[
    ("canopy.contact.json", include_str!("../templates/jsonschemas/canopy.contact.json")),
    ("canopy.customer.json", include_str!("../templates/jsonschemas/canopy.customer.json")),
    ("canopy.vendor.json", include_str!("../templates/jsonschemas/canopy.vendor.json")),
];

#[derive(Debug, Clone, PartialEq)]
pub struct Template {
    pub name: String,
    pub json_config: Value,
}

/// Every embedded template, in file name order.
pub fn templates() -> Result<Vec<Template>, SeedError> {
    parse_templates(EMBEDDED)
}

fn parse_templates(files: &[(&str, &str)]) -> Result<Vec<Template>, SeedError> {
    files
        .iter()
        .map(|(file_name, content)| {
            let parts: Vec<&str> = file_name.split('.').collect();
            if parts.len() != TEMPLATE_NAME_PARTS {
                return Err(SeedError::InvalidTemplateName(file_name.to_string()));
            }

            let json_config = serde_json::from_str(content)
                .map_err(|_| SeedError::InvalidTemplateName(format!("{} is not valid JSON", file_name)))?;

            Ok(Template {
                name: parts[1].to_string(),
                json_config,
            })
        })
        .collect()
}
