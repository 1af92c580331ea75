// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub const ORGANIZATIONS_FILE: &str = "orgs.csv";
pub const GROUPS_FILE: &str = "groups.csv";
pub const USERS_FILE: &str = "users.csv";
pub const INVITES_FILE: &str = "invites.csv";
pub const SUBSCRIBERS_FILE: &str = "subscribers.csv";

/// Seeding parameters. A count of zero skips that file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SeedConfig {
    /// Where generated CSV files are written and read from
    pub directory: PathBuf,

    /// Base URL of the directory service
    pub directory_host: String,

    /// Bearer token for the directory service
    pub token: String,

    pub num_organizations: usize,
    pub num_users: usize,
    pub num_groups: usize,
    pub num_invites: usize,
    pub num_subscribers: usize,

    pub generate_templates: bool,
}

impl Default for SeedConfig {
    fn default() -> Self {
        Self {
            directory: PathBuf::from("demodata"),
            directory_host: "http://localhost:17608".to_string(),
            token: String::new(),
            num_organizations: 1,
            num_users: 10,
            num_groups: 10,
            num_invites: 5,
            num_subscribers: 30,
            generate_templates: true,
        }
    }
}

impl SeedConfig {
    pub fn organizations_file(&self) -> PathBuf {
        self.directory.join(ORGANIZATIONS_FILE)
    }

    pub fn groups_file(&self) -> PathBuf {
        self.directory.join(GROUPS_FILE)
    }

    pub fn users_file(&self) -> PathBuf {
        self.directory.join(USERS_FILE)
    }

    pub fn invites_file(&self) -> PathBuf {
        self.directory.join(INVITES_FILE)
    }

    pub fn subscribers_file(&self) -> PathBuf {
        self.directory.join(SUBSCRIBERS_FILE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = SeedConfig::default();
        assert_eq!(config.directory, PathBuf::from("demodata"));
        assert_eq!(config.directory_host, "http://localhost:17608");
        assert!(config.token.is_empty());
        assert_eq!(
            (config.num_organizations, config.num_users, config.num_groups, config.num_invites, config.num_subscribers),
            (1, 10, 10, 5, 30)
        );
        assert!(config.generate_templates);
        assert_eq!(config.users_file(), PathBuf::from("demodata/users.csv"));
    }
}
