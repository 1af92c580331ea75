// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

// Service Configuration Types
//
// Defines the configuration schema for the Canopy API server, including:
// - HTTP listener settings and the per-request deadline
// - Directory backend selection (GraphQL or in-memory) and credentials
// - Default level names injected into the hierarchy spec builder

use crate::domain::hierarchy::DefaultLevels;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const CONFIG_PATH_ENV: &str = "CANOPY_CONFIG_PATH";
const CONFIG_FILE_NAME: &str = "canopy-config.yaml";

/// Top-level service configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ServiceConfig {
    #[serde(default)]
    pub server: ServerSettings,

    #[serde(default)]
    pub directory: DirectorySettings,

    /// Names used when a request omits a level
    #[serde(default)]
    pub hierarchy: DefaultLevels,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerSettings {
    #[serde(default = "default_bind_address")]
    pub bind_address: String,

    #[serde(default = "default_api_port")]
    pub port: u16,

    /// Deadline for one provisioning request; 0 disables it
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
}

/// Which directory implementation backs the engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DirectoryBackend {
    GraphQL,
    Memory,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DirectorySettings {
    #[serde(default = "default_backend")]
    pub backend: DirectoryBackend,

    /// Base URL of the directory service
    #[serde(default = "default_directory_endpoint")]
    pub endpoint: String,

    /// Bearer token (supports "env:VAR_NAME")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,

    #[serde(default = "default_directory_timeout")]
    pub timeout_secs: u64,
}

fn default_bind_address() -> String {
    "127.0.0.1".to_string()
}

fn default_api_port() -> u16 {
    17610
}

fn default_request_timeout() -> u64 {
    120
}

fn default_backend() -> DirectoryBackend {
    DirectoryBackend::GraphQL
}

fn default_directory_endpoint() -> String {
    "http://localhost:17608".to_string()
}

fn default_directory_timeout() -> u64 {
    30
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            bind_address: default_bind_address(),
            port: default_api_port(),
            request_timeout_secs: default_request_timeout(),
        }
    }
}

impl Default for DirectorySettings {
    fn default() -> Self {
        Self {
            backend: default_backend(),
            endpoint: default_directory_endpoint(),
            token: None,
            timeout_secs: default_directory_timeout(),
        }
    }
}

impl ServerSettings {
    pub fn request_timeout(&self) -> Option<Duration> {
        (self.request_timeout_secs > 0).then(|| Duration::from_secs(self.request_timeout_secs))
    }

    pub fn listen_address(&self) -> String {
        format!("{}:{}", self.bind_address, self.port)
    }
}

impl DirectorySettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Token with any `env:VAR_NAME` indirection resolved
    pub fn resolved_token(&self) -> Option<String> {
        self.token.as_deref().and_then(resolve_secret).filter(|t| !t.is_empty())
    }
}

/// Resolves `env:VAR_NAME` references; other values are returned as-is.
pub fn resolve_secret(value: &str) -> Option<String> {
    match value.strip_prefix("env:") {
        Some(var) => std::env::var(var).ok(),
        None => Some(value.to_string()),
    }
}

impl ServiceConfig {
    /// Load configuration from YAML file
    pub fn from_yaml_file(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config = serde_yaml::from_str(&content)?;
        Ok(config)
    }

    /// Save configuration to YAML file
    pub fn to_yaml_file(&self, path: impl AsRef<Path>) -> anyhow::Result<()> {
        let yaml = serde_yaml::to_string(self)?;
        std::fs::write(path, yaml)?;
        Ok(())
    }

    pub fn from_yaml_str(yaml: &str) -> anyhow::Result<Self> {
        let config = serde_yaml::from_str(yaml)?;
        Ok(config)
    }

    /// Discover configuration file using precedence order
    /// 1. CANOPY_CONFIG_PATH environment variable
    /// 2. ./canopy-config.yaml (working directory)
    /// 3. ~/.canopy/config.yaml (user home)
    /// 4. /etc/canopy/config.yaml (Unix) or C:\ProgramData\Canopy\config.yaml (Windows)
    pub fn discover_config() -> Option<PathBuf> {
        if let Ok(path) = std::env::var(CONFIG_PATH_ENV) {
            let path = PathBuf::from(path);
            if path.exists() {
                return Some(path);
            }
        }

        let cwd = PathBuf::from(format!("./{}", CONFIG_FILE_NAME));
        if cwd.exists() {
            return Some(cwd);
        }

        if let Some(home) = dirs::home_dir() {
            let user_config = home.join(".canopy").join("config.yaml");
            if user_config.exists() {
                return Some(user_config);
            }
        }

        #[cfg(unix)]
        let system_config = PathBuf::from("/etc/canopy/config.yaml");
        #[cfg(windows)]
        let system_config = PathBuf::from("C:\\ProgramData\\Canopy\\config.yaml");

        if system_config.exists() {
            return Some(system_config);
        }

        None
    }

    /// Load configuration with discovery, fallback to default
    pub fn load_or_default(cli_path: Option<PathBuf>) -> anyhow::Result<Self> {
        if let Some(path) = cli_path {
            tracing::info!("Loading configuration from explicit path: {:?}", path);
            let mut config = Self::from_yaml_file(&path)
                .map_err(|e| anyhow::anyhow!("Failed to load config at {:?}: {}", path, e))?;
            config.apply_env_overrides();
            return Ok(config);
        }

        let mut config = match Self::discover_config() {
            Some(config_path) => {
                tracing::info!("Loading configuration from discovered path: {:?}", config_path);
                Self::from_yaml_file(config_path)?
            }
            None => {
                tracing::warn!("No configuration file found in standard locations. Using defaults.");
                Self::default()
            }
        };
        config.apply_env_overrides();
        Ok(config)
    }

    /// Apply environment variable overrides to configuration
    pub fn apply_env_overrides(&mut self) {
        if let Ok(endpoint) = std::env::var("CANOPY_DIRECTORY_ENDPOINT") {
            tracing::info!("Environment override: CANOPY_DIRECTORY_ENDPOINT={}", endpoint);
            self.directory.endpoint = endpoint;
        }

        if let Ok(token) = std::env::var("CANOPY_DIRECTORY_TOKEN") {
            tracing::info!("Environment override: CANOPY_DIRECTORY_TOKEN=<redacted>");
            self.directory.token = Some(token);
        }

        if let Ok(val) = std::env::var("CANOPY_PORT") {
            match val.parse::<u16>() {
                Ok(port) => {
                    tracing::info!("Environment override: CANOPY_PORT={}", port);
                    self.server.port = port;
                }
                Err(_) => {
                    tracing::warn!("Invalid value for CANOPY_PORT: '{}'. Ignoring.", val);
                }
            }
        }
    }

    /// Validate configuration
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.server.port == 0 {
            anyhow::bail!("server.port cannot be 0");
        }

        if self.directory.endpoint.trim().is_empty() {
            anyhow::bail!("directory.endpoint cannot be empty");
        }

        if self.directory.backend == DirectoryBackend::GraphQL && self.directory.resolved_token().is_none() {
            anyhow::bail!("directory.token is required for the graphql backend");
        }

        let levels = [
            ("hierarchy.environments", &self.hierarchy.environments),
            ("hierarchy.buckets", &self.hierarchy.buckets),
            ("hierarchy.relationships", &self.hierarchy.relationships),
        ];
        for (field, names) in levels {
            if names.is_empty() {
                anyhow::bail!("{} cannot be empty", field);
            }
            if names.iter().any(|name| name.trim().is_empty()) {
                anyhow::bail!("{} cannot contain empty names", field);
            }
        }

        Ok(())
    }
}
