// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

//! Hierarchy Spec Builder
//!
//! Turns a raw [`OrganizationRequest`] into a [`HierarchySpec`]. Pure: no I/O,
//! no remote calls.

use crate::domain::error::ValidationError;
use crate::domain::hierarchy::{DefaultLevels, HierarchySpec};
use crate::domain::organization::OrganizationRequest;

pub struct HierarchySpecBuilder {
    defaults: DefaultLevels,
}

impl HierarchySpecBuilder {
    pub fn new(defaults: DefaultLevels) -> Self {
        Self { defaults }
    }

    pub fn defaults(&self) -> &DefaultLevels {
        &self.defaults
    }

    /// Validate the request and substitute defaults for empty levels.
    ///
    /// A non-empty list is used verbatim, duplicates included; it is never
    /// merged with the defaults.
    pub fn build(&self, request: &OrganizationRequest) -> Result<HierarchySpec, ValidationError> {
        if request.name.is_empty() {
            return Err(ValidationError::MissingField("name".to_string()));
        }

        let description = Some(request.description.clone()).filter(|d| !d.is_empty());

        Ok(HierarchySpec {
            root_name: request.name.clone(),
            description,
            domains: request.domains.clone(),
            environment_names: or_default(&request.environments, &self.defaults.environments),
            bucket_names: or_default(&request.buckets, &self.defaults.buckets),
            relationship_names: or_default(&request.relationships, &self.defaults.relationships),
        })
    }
}

impl Default for HierarchySpecBuilder {
    fn default() -> Self {
        Self::new(DefaultLevels::default())
    }
}

fn or_default(given: &[String], default: &[String]) -> Vec<String> {
    if given.is_empty() {
        default.to_vec()
    } else {
        given.to_vec()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_name_is_rejected() {
        let builder = HierarchySpecBuilder::default();
        let err = builder.build(&OrganizationRequest::named("")).unwrap_err();
        assert_eq!(err, ValidationError::MissingField("name".to_string()));
    }

    #[test]
    fn test_empty_lists_take_defaults() {
        let builder = HierarchySpecBuilder::default();
        let spec = builder.build(&OrganizationRequest::named("Acme")).unwrap();

        assert_eq!(spec.environment_names, vec!["production", "testing"]);
        assert_eq!(spec.bucket_names.len(), 5);
        assert_eq!(spec.relationship_names.len(), 5);
        assert_eq!(spec.description, None);
    }

    #[test]
    fn test_given_lists_are_used_verbatim() {
        let builder = HierarchySpecBuilder::default();
        let request = OrganizationRequest {
            name: "Acme".to_string(),
            description: "Widgets".to_string(),
            environments: vec!["prod".to_string(), "prod".to_string()],
            buckets: vec!["Zeta".to_string(), "alpha".to_string()],
            ..Default::default()
        };

        let spec = builder.build(&request).unwrap();
        assert_eq!(spec.environment_names, vec!["prod", "prod"]);
        assert_eq!(spec.bucket_names, vec!["Zeta", "alpha"]);
        assert_eq!(spec.relationship_names, DefaultLevels::default().relationships);
        assert_eq!(spec.description.as_deref(), Some("Widgets"));
    }

    #[test]
    fn test_injected_defaults() {
        let builder = HierarchySpecBuilder::new(DefaultLevels {
            environments: vec!["staging".to_string()],
            buckets: vec!["relationships".to_string()],
            relationships: vec!["vendors".to_string()],
        });

        let spec = builder.build(&OrganizationRequest::named("Acme")).unwrap();
        assert_eq!(spec.expected_node_count(), 4);
    }

    #[test]
    fn test_build_is_idempotent() {
        let builder = HierarchySpecBuilder::default();
        let request = OrganizationRequest {
            name: "Acme".to_string(),
            buckets: vec!["orders".to_string()],
            ..Default::default()
        };

        assert_eq!(builder.build(&request).unwrap(), builder.build(&request).unwrap());
    }
}
