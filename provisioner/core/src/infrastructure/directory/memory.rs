// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

// In-Memory Directory
//
// Records every create call and assigns UUID ids. Backs the `memory` backend
// for dry runs and the engine tests.

use crate::domain::directory::{CreateNodeRequest, DirectoryClient, DirectoryError, DirectoryNode};
use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::HashSet;
use std::sync::Arc;
use uuid::Uuid;

#[derive(Default)]
struct DirectoryState {
    calls: Vec<CreateNodeRequest>,
    names: HashSet<String>,
}

#[derive(Clone, Default)]
pub struct InMemoryDirectoryClient {
    state: Arc<Mutex<DirectoryState>>,
    fail_at: Option<(usize, DirectoryError)>,
    reject_duplicates: bool,
}

impl InMemoryDirectoryClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fail the `call`-th create call (1-based) with `error`.
    pub fn failing_at(mut self, call: usize, error: DirectoryError) -> Self {
        self.fail_at = Some((call, error));
        self
    }

    /// Reject a create whose qualified name was already created.
    pub fn rejecting_duplicates(mut self) -> Self {
        self.reject_duplicates = true;
        self
    }

    /// Every request received, failed ones included.
    pub fn calls(&self) -> Vec<CreateNodeRequest> {
        self.state.lock().calls.clone()
    }

    pub fn call_count(&self) -> usize {
        self.state.lock().calls.len()
    }
}

#[async_trait]
impl DirectoryClient for InMemoryDirectoryClient {
    async fn create_node(&self, request: CreateNodeRequest) -> Result<DirectoryNode, DirectoryError> {
        let mut state = self.state.lock();
        state.calls.push(request.clone());

        if let Some((call, error)) = &self.fail_at {
            if state.calls.len() == *call {
                return Err(error.clone());
            }
        }

        if self.reject_duplicates && state.names.contains(&request.name) {
            return Err(DirectoryError::Rejected(format!(
                "organization '{}' already exists",
                request.name
            )));
        }
        state.names.insert(request.name);

        Ok(DirectoryNode {
            id: Uuid::new_v4().to_string(),
            display_name: request.display_name,
            description: request.description,
            domains: request.domains,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(name: &str) -> CreateNodeRequest {
        CreateNodeRequest::child(name.to_string(), name.to_string(), "parent".to_string(), vec![])
    }

    #[tokio::test]
    async fn test_assigns_unique_ids() {
        let directory = InMemoryDirectoryClient::new();
        let a = directory.create_node(request("a")).await.unwrap();
        let b = directory.create_node(request("b")).await.unwrap();

        assert_ne!(a.id, b.id);
        assert_eq!(directory.call_count(), 2);
    }

    #[tokio::test]
    async fn test_failure_injection_records_the_failing_call() {
        let directory = InMemoryDirectoryClient::new().failing_at(2, DirectoryError::Network("down".to_string()));

        directory.create_node(request("a")).await.unwrap();
        let err = directory.create_node(request("b")).await.unwrap_err();
        assert_eq!(err, DirectoryError::Network("down".to_string()));
        directory.create_node(request("c")).await.unwrap();

        let names: Vec<String> = directory.calls().into_iter().map(|c| c.name).collect();
        assert_eq!(names, vec!["a", "b", "c"]);
    }

    #[tokio::test]
    async fn test_duplicate_policy() {
        let accepting = InMemoryDirectoryClient::new();
        accepting.create_node(request("a")).await.unwrap();
        accepting.create_node(request("a")).await.unwrap();

        let rejecting = InMemoryDirectoryClient::new().rejecting_duplicates();
        rejecting.create_node(request("a")).await.unwrap();
        let err = rejecting.create_node(request("a")).await.unwrap_err();
        assert!(matches!(err, DirectoryError::Rejected(_)));
    }
}
