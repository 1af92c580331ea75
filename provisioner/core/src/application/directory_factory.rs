// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! Directory Client Factory - Application Layer
//!
//! Creates the concrete [`DirectoryClient`] for the configured backend so the
//! domain layer stays free of transport details.

use crate::domain::config::{DirectoryBackend, DirectorySettings};
use crate::domain::directory::{DirectoryClient, DirectoryError};
use crate::infrastructure::directory::{GraphQLDirectoryClient, InMemoryDirectoryClient};
use crate::infrastructure::graphql::GraphQLClient;
use std::sync::Arc;

/// Creates a DirectoryClient implementation based on the configured backend
pub fn create_directory_client(settings: &DirectorySettings) -> Result<Arc<dyn DirectoryClient>, DirectoryError> {
    match settings.backend {
        DirectoryBackend::Memory => {
            tracing::warn!("Using the in-memory directory backend; nothing is persisted");
            Ok(Arc::new(InMemoryDirectoryClient::new()))
        }
        DirectoryBackend::GraphQL => {
            let token = settings
                .resolved_token()
                .ok_or_else(|| DirectoryError::Authentication("directory token is not configured".to_string()))?;
            let client = GraphQLClient::new(&settings.endpoint, Some(token), settings.timeout())?;
            Ok(Arc::new(GraphQLDirectoryClient::new(client)))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_graphql_backend_requires_token() {
        let settings = DirectorySettings::default();
        let err = create_directory_client(&settings).err().unwrap();
        assert!(matches!(err, DirectoryError::Authentication(_)));
    }

    #[test]
    fn test_memory_backend() {
        let settings = DirectorySettings {
            backend: DirectoryBackend::Memory,
            ..Default::default()
        };
        assert!(create_directory_client(&settings).is_ok());
    }
}
