// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! Organization wire contract
//!
//! Request and reply bodies of `POST /v1/organization`, shared by the HTTP API
//! and the SDK client.

use serde::{Deserialize, Serialize};

/// Inbound request for creating an organization hierarchy
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrganizationRequest {
    #[serde(default)]
    pub name: String,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub domains: Vec<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub environments: Vec<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub buckets: Vec<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub relationships: Vec<String>,
}

impl OrganizationRequest {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }
}

/// Reply mirroring the created tree
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrganizationReply {
    pub success: bool,
    pub id: String,
    pub name: String,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub domains: Vec<String>,

    #[serde(default)]
    pub environments: Vec<EnvironmentReply>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnvironmentReply {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub buckets: Vec<BucketReply>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BucketReply {
    pub id: String,
    pub name: String,
    /// Always present; empty for buckets other than `relationships`
    #[serde(default, rename = "relations")]
    pub relationships: Vec<RelationshipReply>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelationshipReply {
    pub id: String,
    pub name: String,
}

/// Error body returned by the API
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorReply {
    pub success: bool,
    pub error: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,

    /// Projection of what was created before the failure
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub partial: Option<OrganizationReply>,
}

impl ErrorReply {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            success: false,
            error: error.into(),
            code: None,
            partial: None,
        }
    }

    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = Some(code.into());
        self
    }

    pub fn with_partial(mut self, partial: Option<OrganizationReply>) -> Self {
        self.partial = partial;
        self
    }
}
