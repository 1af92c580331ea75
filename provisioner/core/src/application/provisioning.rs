// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

//! Provisioning Use Case
//!
//! Application service for creating an organization hierarchy.
//!
//! # DDD Pattern: Application Service
//!
//! - **Layer:** Application
//! - **Responsibility:** Sequence spec building, tree expansion and reply projection
//! - **Collaborators:**
//!   - Application: HierarchySpecBuilder, TreeExpansionEngine, projector
//!   - Domain: DirectoryClient (through the engine)

use crate::application::expansion::TreeExpansionEngine;
use crate::application::projector::project;
use crate::application::spec_builder::HierarchySpecBuilder;
use crate::domain::directory::DirectoryClient;
use crate::domain::error::{ProvisionError, ProvisioningFailure};
use crate::domain::hierarchy::DefaultLevels;
use crate::domain::organization::{OrganizationReply, OrganizationRequest};
use async_trait::async_trait;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};

/// Provisioning Use Case
#[async_trait]
pub trait ProvisioningService: Send + Sync {
    /// Create the full tree described by `request`
    ///
    /// # Errors
    ///
    /// - Validation: the request is unusable, no remote call was made
    /// - RemoteCreation: a create call failed, `partial` holds what exists
    /// - Cancelled: `cancel` fired, `partial` holds what exists
    async fn provision(
        &self,
        request: OrganizationRequest,
        cancel: CancellationToken,
    ) -> Result<OrganizationReply, ProvisioningFailure>;
}

/// Standard implementation of ProvisioningService
pub struct StandardProvisioningService {
    builder: HierarchySpecBuilder,
    engine: TreeExpansionEngine,
}

impl StandardProvisioningService {
    pub fn new(directory: Arc<dyn DirectoryClient>, defaults: DefaultLevels) -> Self {
        Self {
            builder: HierarchySpecBuilder::new(defaults),
            engine: TreeExpansionEngine::new(directory),
        }
    }
}

#[async_trait]
impl ProvisioningService for StandardProvisioningService {
    async fn provision(
        &self,
        request: OrganizationRequest,
        cancel: CancellationToken,
    ) -> Result<OrganizationReply, ProvisioningFailure> {
        let spec = match self.builder.build(&request) {
            Ok(spec) => spec,
            Err(e) => {
                warn!("Rejected provisioning request: {}", e);
                record_outcome("invalid");
                return Err(e.into());
            }
        };

        info!(
            root = %spec.root_name,
            expected_nodes = spec.expected_node_count(),
            "Provisioning organization hierarchy"
        );

        match self.engine.expand(&spec, &cancel).await {
            Ok(tree) => {
                info!(
                    root = %spec.root_name,
                    id = %tree.root.id,
                    nodes = tree.node_count(),
                    "Organization hierarchy provisioned"
                );
                record_outcome("success");
                Ok(project(&tree))
            }
            Err(failure) => {
                let outcome = match failure.error {
                    ProvisionError::Cancelled { .. } => "cancelled",
                    _ => "failed",
                };
                error!(
                    root = %spec.root_name,
                    created_nodes = failure.created_nodes(),
                    "Provisioning stopped: {}",
                    failure.error
                );
                record_outcome(outcome);
                Err(failure)
            }
        }
    }
}

fn record_outcome(outcome: &'static str) {
    metrics::counter!("canopy_provisioning_requests_total", "outcome" => outcome).increment(1);
}
