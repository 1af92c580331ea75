// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

//! Tree Expansion Engine
//!
//! Walks a [`HierarchySpec`] level by level and issues one
//! [`DirectoryClient::create_node`] call per node, in strict level order:
//!
//! 1. the root
//! 2. every environment, in input order
//! 3. every bucket of every environment (environments in creation order)
//! 4. every relationship under every `relationships` bucket
//!
//! Calls are awaited one at a time. The first failure stops the walk and the
//! nodes created so far are returned inside the [`ProvisioningFailure`]. There
//! are no compensating deletes.
//!
//! | Level | Qualified name | Tags |
//! |-------|----------------|------|
//! | root | `root` | none |
//! | environment | `root.env` | none |
//! | bucket | `root.env.bucket` | `{env}` |
//! | relationship | `root.env.relationships.rel` | `{env, relationships}` |

use crate::domain::directory::{CreateNodeRequest, DirectoryClient, DirectoryError, DirectoryNode};
use crate::domain::error::{ProvisionError, ProvisioningFailure};
use crate::domain::hierarchy::{
    qualified_name, BucketBranch, BucketKind, EnvironmentBranch, HierarchySpec, HierarchyTree, Level,
    OrgNode, RELATIONSHIPS_BUCKET,
};
use std::collections::BTreeSet;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

pub struct TreeExpansionEngine {
    directory: Arc<dyn DirectoryClient>,
}

impl TreeExpansionEngine {
    pub fn new(directory: Arc<dyn DirectoryClient>) -> Self {
        Self { directory }
    }

    pub async fn expand(
        &self,
        spec: &HierarchySpec,
        cancel: &CancellationToken,
    ) -> Result<HierarchyTree, ProvisioningFailure> {
        let root_name = spec.root_name.as_str();

        // Root: nothing exists remotely if this fails.
        let root_qualified = qualified_name(&[root_name]);
        let root_request = CreateNodeRequest {
            name: root_qualified.clone(),
            display_name: spec.root_name.clone(),
            parent_id: None,
            tags: Vec::new(),
            description: spec.description.clone(),
            domains: spec.domains.clone(),
        };
        let created = self
            .create(Level::Root, root_name, root_request, cancel)
            .await
            .map_err(ProvisioningFailure::new)?;

        let description = created.description.clone().or_else(|| spec.description.clone());
        let domains = if created.domains.is_empty() {
            spec.domains.clone()
        } else {
            created.domains.clone()
        };
        let root = org_node(created, root_qualified, BTreeSet::new(), None);
        let mut tree = HierarchyTree::new(root, description, domains);

        // Environments
        for env_name in &spec.environment_names {
            let parent_id = tree.root.id.clone();
            let qualified = qualified_name(&[root_name, env_name]);
            let request = CreateNodeRequest::child(qualified.clone(), env_name.clone(), parent_id.clone(), Vec::new());

            match self.create(Level::Environment, env_name, request, cancel).await {
                Ok(created) => {
                    let node = org_node(created, qualified, BTreeSet::new(), Some(parent_id));
                    tree.environments.push(EnvironmentBranch::new(node));
                }
                Err(error) => return Err(ProvisioningFailure::with_partial(error, tree)),
            }
        }

        // Buckets, cloned under every environment
        for env_index in 0..tree.environments.len() {
            let env_name = spec.environment_names[env_index].as_str();
            let parent_id = tree.environments[env_index].node.id.clone();

            for bucket_name in &spec.bucket_names {
                let qualified = qualified_name(&[root_name, env_name, bucket_name]);
                let tags = tag_set(&[env_name]);
                let request = CreateNodeRequest::child(
                    qualified.clone(),
                    bucket_name.clone(),
                    parent_id.clone(),
                    tags.iter().cloned().collect(),
                );

                match self.create(Level::Bucket, bucket_name, request, cancel).await {
                    Ok(created) => {
                        let node = org_node(created, qualified, tags, Some(parent_id.clone()));
                        tree.environments[env_index].buckets.push(BucketBranch {
                            node,
                            kind: BucketKind::for_name(bucket_name),
                        });
                    }
                    Err(error) => return Err(ProvisioningFailure::with_partial(error, tree)),
                }
            }
        }

        // Relationships, only under the reserved bucket
        for env_index in 0..tree.environments.len() {
            let env_name = spec.environment_names[env_index].as_str();

            for bucket_index in 0..tree.environments[env_index].buckets.len() {
                let bucket = &tree.environments[env_index].buckets[bucket_index];
                if !bucket.kind.is_container() {
                    continue;
                }
                let parent_id = bucket.node.id.clone();

                for relationship_name in &spec.relationship_names {
                    let qualified = qualified_name(&[root_name, env_name, RELATIONSHIPS_BUCKET, relationship_name]);
                    let tags = tag_set(&[env_name, RELATIONSHIPS_BUCKET]);
                    let request = CreateNodeRequest::child(
                        qualified.clone(),
                        relationship_name.clone(),
                        parent_id.clone(),
                        tags.iter().cloned().collect(),
                    );

                    let created = match self.create(Level::Relationship, relationship_name, request, cancel).await {
                        Ok(created) => created,
                        Err(error) => return Err(ProvisioningFailure::with_partial(error, tree)),
                    };

                    let node = org_node(created, qualified, tags, Some(parent_id.clone()));
                    if let BucketKind::RelationshipContainer { relationships } =
                        &mut tree.environments[env_index].buckets[bucket_index].kind
                    {
                        relationships.push(node);
                    }
                }
            }
        }

        Ok(tree)
    }

    /// Issue one create call unless cancellation has been observed.
    ///
    /// An in-flight call is abandoned when the token fires; the directory may
    /// still complete it.
    async fn create(
        &self,
        level: Level,
        name: &str,
        request: CreateNodeRequest,
        cancel: &CancellationToken,
    ) -> Result<DirectoryNode, ProvisionError> {
        let cancelled = || ProvisionError::Cancelled {
            level,
            name: name.to_string(),
        };

        if cancel.is_cancelled() {
            return Err(cancelled());
        }

        debug!(
            level = level.as_str(),
            name,
            qualified_name = %request.name,
            "Creating organization"
        );

        let result = tokio::select! {
            biased;
            _ = cancel.cancelled() => return Err(cancelled()),
            result = self.directory.create_node(request) => result,
        };

        let node = result
            .and_then(|node| {
                if node.id.is_empty() {
                    Err(DirectoryError::InvalidResponse("directory returned an empty id".to_string()))
                } else {
                    Ok(node)
                }
            })
            .map_err(|source| {
                warn!(level = level.as_str(), name, error = %source, "Organization creation failed");
                ProvisionError::RemoteCreation {
                    level,
                    name: name.to_string(),
                    source,
                }
            })?;

        metrics::counter!("canopy_nodes_created_total", "level" => level.as_str()).increment(1);
        Ok(node)
    }
}

fn org_node(created: DirectoryNode, qualified_name: String, tags: BTreeSet<String>, parent_id: Option<String>) -> OrgNode {
    OrgNode {
        id: created.id,
        display_name: created.display_name,
        qualified_name,
        tags,
        parent_id,
    }
}

fn tag_set(tags: &[&str]) -> BTreeSet<String> {
    tags.iter().map(|tag| tag.to_string()).collect()
}
