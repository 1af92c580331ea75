// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! # Tenant Hierarchy Model
//!
//! | Type | Description |
//! |------|-------------|
//! | `HierarchySpec` | Normalized provisioning request (defaults applied) |
//! | `DefaultLevels` | Built-in name lists substituted for omitted levels |
//! | `OrgNode` | One organization created on the directory |
//! | `HierarchyTree` | Root + environments + buckets + relationships |
//! | `BucketKind` | Plain bucket or the reserved relationship container |
//!
//! Qualified names are the dotted, lowercase path from the root, e.g.
//! `acme.prod.relationships.vendors`.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// Bucket name that triggers the relationship sub-level.
pub const RELATIONSHIPS_BUCKET: &str = "relationships";

pub const DEFAULT_ENVIRONMENTS: &[&str] = &["production", "testing"];

pub const DEFAULT_BUCKETS: &[&str] = &["assets", "customers", "orders", "relationships", "sales"];

pub const DEFAULT_RELATIONSHIPS: &[&str] = &[
    "internal_users",
    "marketing_subscribers",
    "marketplaces",
    "partners",
    "vendors",
];

/// Level of the tree a node lives on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    Root,
    Environment,
    Bucket,
    Relationship,
}

impl Level {
    pub fn as_str(&self) -> &'static str {
        match self {
            Level::Root => "root",
            Level::Environment => "environment",
            Level::Bucket => "bucket",
            Level::Relationship => "relationship",
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Name lists used when a request leaves a level empty.
///
/// Injected into `HierarchySpecBuilder`; configurable per deployment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DefaultLevels {
    pub environments: Vec<String>,
    pub buckets: Vec<String>,
    pub relationships: Vec<String>,
}

impl Default for DefaultLevels {
    fn default() -> Self {
        Self {
            environments: to_owned_list(DEFAULT_ENVIRONMENTS),
            buckets: to_owned_list(DEFAULT_BUCKETS),
            relationships: to_owned_list(DEFAULT_RELATIONSHIPS),
        }
    }
}

fn to_owned_list(names: &[&str]) -> Vec<String> {
    names.iter().map(|name| name.to_string()).collect()
}

/// Normalized provisioning request. Every name list is non-empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HierarchySpec {
    pub root_name: String,
    pub description: Option<String>,
    pub domains: Vec<String>,
    pub environment_names: Vec<String>,
    pub bucket_names: Vec<String>,
    pub relationship_names: Vec<String>,
}

impl HierarchySpec {
    /// Number of create calls a full expansion issues.
    pub fn expected_node_count(&self) -> usize {
        let containers = self
            .bucket_names
            .iter()
            .filter(|name| BucketKind::for_name(name).is_container())
            .count();
        let envs = self.environment_names.len();

        1 + envs + envs * self.bucket_names.len() + envs * containers * self.relationship_names.len()
    }
}

/// Builds the dotted lowercase name for a path of source names.
pub fn qualified_name(segments: &[&str]) -> String {
    segments.join(".").to_lowercase()
}

/// A single organization created on the directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrgNode {
    pub id: String,
    pub display_name: String,
    pub qualified_name: String,
    pub tags: BTreeSet<String>,
    pub parent_id: Option<String>,
}

/// Bucket variant, decided at expansion time from the bucket's input name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BucketKind {
    Plain,
    RelationshipContainer { relationships: Vec<OrgNode> },
}

impl BucketKind {
    /// Exact, case-sensitive match against [`RELATIONSHIPS_BUCKET`].
    pub fn for_name(name: &str) -> Self {
        if name == RELATIONSHIPS_BUCKET {
            BucketKind::RelationshipContainer {
                relationships: Vec::new(),
            }
        } else {
            BucketKind::Plain
        }
    }

    pub fn is_container(&self) -> bool {
        matches!(self, BucketKind::RelationshipContainer { .. })
    }

    pub fn relationships(&self) -> &[OrgNode] {
        match self {
            BucketKind::Plain => &[],
            BucketKind::RelationshipContainer { relationships } => relationships,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BucketBranch {
    pub node: OrgNode,
    pub kind: BucketKind,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnvironmentBranch {
    pub node: OrgNode,
    pub buckets: Vec<BucketBranch>,
}

impl EnvironmentBranch {
    pub fn new(node: OrgNode) -> Self {
        Self {
            node,
            buckets: Vec::new(),
        }
    }
}

/// Result of one provisioning call. May be partial when carried by a failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HierarchyTree {
    pub root: OrgNode,
    /// Description echoed back by the directory for the root.
    pub description: Option<String>,
    /// Domains echoed back by the directory for the root.
    pub domains: Vec<String>,
    pub environments: Vec<EnvironmentBranch>,
}

impl HierarchyTree {
    pub fn new(root: OrgNode, description: Option<String>, domains: Vec<String>) -> Self {
        Self {
            root,
            description,
            domains,
            environments: Vec::new(),
        }
    }

    /// Total number of created nodes in the tree, root included.
    pub fn node_count(&self) -> usize {
        let buckets: usize = self.environments.iter().map(|env| env.buckets.len()).sum();
        let relationships: usize = self
            .environments
            .iter()
            .flat_map(|env| env.buckets.iter())
            .map(|bucket| bucket.kind.relationships().len())
            .sum();

        1 + self.environments.len() + buckets + relationships
    }

    /// Every node in creation order.
    pub fn nodes(&self) -> Vec<&OrgNode> {
        let mut nodes = vec![&self.root];
        nodes.extend(self.environments.iter().map(|env| &env.node));
        nodes.extend(
            self.environments
                .iter()
                .flat_map(|env| env.buckets.iter().map(|bucket| &bucket.node)),
        );
        nodes.extend(
            self.environments
                .iter()
                .flat_map(|env| env.buckets.iter())
                .flat_map(|bucket| bucket.kind.relationships().iter()),
        );
        nodes
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn node(id: &str, qualified: &str) -> OrgNode {
        OrgNode {
            id: id.to_string(),
            display_name: qualified.rsplit('.').next().unwrap_or_default().to_string(),
            qualified_name: qualified.to_string(),
            tags: BTreeSet::new(),
            parent_id: None,
        }
    }

    #[test]
    fn test_qualified_name_is_lowercase_dotted_path() {
        assert_eq!(qualified_name(&["Acme"]), "acme");
        assert_eq!(qualified_name(&["Acme", "Prod", "Assets"]), "acme.prod.assets");
    }

    #[test]
    fn test_bucket_kind_matches_reserved_token_exactly() {
        assert!(BucketKind::for_name("relationships").is_container());
        assert!(!BucketKind::for_name("Relationships").is_container());
        assert!(!BucketKind::for_name("relationships ").is_container());
        assert!(BucketKind::for_name("assets").relationships().is_empty());
    }

    #[test]
    fn test_expected_node_count_with_defaults() {
        let defaults = DefaultLevels::default();
        let spec = HierarchySpec {
            root_name: "Acme".to_string(),
            description: None,
            domains: vec![],
            environment_names: defaults.environments,
            bucket_names: defaults.buckets,
            relationship_names: defaults.relationships,
        };

        // 1 root + 2 envs + 2*5 buckets + 2*1*5 relationships
        assert_eq!(spec.expected_node_count(), 23);
    }

    #[test]
    fn test_tree_nodes_follow_level_order() {
        let mut tree = HierarchyTree::new(node("1", "acme"), None, vec![]);
        let mut prod = EnvironmentBranch::new(node("2", "acme.prod"));
        let mut test = EnvironmentBranch::new(node("3", "acme.test"));
        prod.buckets.push(BucketBranch {
            node: node("4", "acme.prod.relationships"),
            kind: BucketKind::RelationshipContainer {
                relationships: vec![node("6", "acme.prod.relationships.vendors")],
            },
        });
        test.buckets.push(BucketBranch {
            node: node("5", "acme.test.assets"),
            kind: BucketKind::Plain,
        });
        tree.environments.push(prod);
        tree.environments.push(test);

        let ids: Vec<&str> = tree.nodes().iter().map(|n| n.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "2", "3", "4", "5", "6"]);
        assert_eq!(tree.node_count(), 6);
    }
}
