// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! Directory Service Domain Interface (Anti-Corruption Layer)
//!
//! The remote directory durably creates and stores organizations. The engine
//! only ever calls [`DirectoryClient::create_node`] and treats every error as
//! terminal for the current expansion.
//!
//! Implementations live in `crate::infrastructure::directory`.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Domain interface for the remote directory service
#[async_trait]
pub trait DirectoryClient: Send + Sync {
    /// Create one organization and return the identity assigned to it
    async fn create_node(&self, request: CreateNodeRequest) -> Result<DirectoryNode, DirectoryError>;
}

/// Parameters of a single create call
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateNodeRequest {
    /// Globally unique qualified name (dotted, lowercase)
    pub name: String,

    pub display_name: String,

    /// Parent organization, `None` for the root
    pub parent_id: Option<String>,

    pub tags: Vec<String>,

    /// Only sent for the root
    pub description: Option<String>,

    /// Only sent for the root
    pub domains: Vec<String>,
}

impl CreateNodeRequest {
    pub fn child(name: String, display_name: String, parent_id: String, tags: Vec<String>) -> Self {
        Self {
            name,
            display_name,
            parent_id: Some(parent_id),
            tags,
            description: None,
            domains: Vec::new(),
        }
    }
}

/// What the directory returns for a created organization
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirectoryNode {
    pub id: String,
    pub display_name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub domains: Vec<String>,
}

/// Errors that can occur while talking to the directory
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DirectoryError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Authentication failed: {0}")]
    Authentication(String),

    #[error("Rejected by directory: {0}")]
    Rejected(String),

    #[error("Provider error: {0}")]
    Provider(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}
