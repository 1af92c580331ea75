// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! Provisioning Errors
//!
//! | Kind | Raised by | Remote calls made |
//! |------|-----------|-------------------|
//! | `ValidationError` | spec builder | none |
//! | `ProvisionError::RemoteCreation` | expansion engine | up to and including the failing one |
//! | `ProvisionError::Cancelled` | expansion engine | none after cancellation was observed |
//!
//! Nothing is rolled back. A [`ProvisioningFailure`] hands whatever was created
//! before the failure back to the caller, who decides whether it needs manual
//! cleanup.

use crate::domain::directory::DirectoryError;
use crate::domain::hierarchy::{HierarchyTree, Level};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("missing required field: {0}")]
    MissingField(String),
}

#[derive(Debug, Error)]
pub enum ProvisionError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("failed to create {level} '{name}': {source}")]
    RemoteCreation {
        level: Level,
        name: String,
        #[source]
        source: DirectoryError,
    },

    #[error("provisioning cancelled before {level} '{name}' was created")]
    Cancelled { level: Level, name: String },
}

impl ProvisionError {
    /// Level and source name the engine was working on, if any.
    pub fn location(&self) -> Option<(Level, &str)> {
        match self {
            ProvisionError::Validation(_) => None,
            ProvisionError::RemoteCreation { level, name, .. }
            | ProvisionError::Cancelled { level, name } => Some((*level, name.as_str())),
        }
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, ProvisionError::Validation(_))
    }
}

/// A failed provisioning call plus the nodes that were created before it.
///
/// `partial` is `None` when nothing exists remotely (validation failure or a
/// failed root creation).
#[derive(Debug, Error)]
#[error("{error}")]
pub struct ProvisioningFailure {
    #[source]
    pub error: ProvisionError,
    pub partial: Option<HierarchyTree>,
}

impl ProvisioningFailure {
    pub fn new(error: ProvisionError) -> Self {
        Self {
            error,
            partial: None,
        }
    }

    pub fn with_partial(error: ProvisionError, partial: HierarchyTree) -> Self {
        Self {
            error,
            partial: Some(partial),
        }
    }

    /// Nodes left behind on the directory by this call.
    pub fn created_nodes(&self) -> usize {
        self.partial.as_ref().map_or(0, HierarchyTree::node_count)
    }
}

impl From<ValidationError> for ProvisioningFailure {
    fn from(error: ValidationError) -> Self {
        Self::new(error.into())
    }
}
