// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

//! Reply Projector
//!
//! Maps a [`HierarchyTree`] onto the nested [`OrganizationReply`] shape, one
//! entry per node, in creation order. Total over partial trees.

use crate::domain::hierarchy::{HierarchyTree, OrgNode};
use crate::domain::organization::{BucketReply, EnvironmentReply, OrganizationReply, RelationshipReply};

pub fn project(tree: &HierarchyTree) -> OrganizationReply {
    OrganizationReply {
        success: true,
        id: tree.root.id.clone(),
        name: tree.root.display_name.clone(),
        description: tree.description.clone().unwrap_or_default(),
        domains: tree.domains.clone(),
        environments: tree
            .environments
            .iter()
            .map(|env| EnvironmentReply {
                id: env.node.id.clone(),
                name: env.node.display_name.clone(),
                buckets: env
                    .buckets
                    .iter()
                    .map(|bucket| BucketReply {
                        id: bucket.node.id.clone(),
                        name: bucket.node.display_name.clone(),
                        relationships: bucket.kind.relationships().iter().map(relationship).collect(),
                    })
                    .collect(),
            })
            .collect(),
    }
}

fn relationship(node: &OrgNode) -> RelationshipReply {
    RelationshipReply {
        id: node.id.clone(),
        name: node.display_name.clone(),
    }
}
