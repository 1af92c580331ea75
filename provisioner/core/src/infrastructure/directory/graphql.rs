// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

// GraphQL Directory Adapter
//
// Anti-Corruption Layer for the directory's `createOrganization` mutation.

use crate::domain::directory::{CreateNodeRequest, DirectoryClient, DirectoryError, DirectoryNode};
use crate::infrastructure::graphql::{GraphQLClient, GraphQLError};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::json;

const CREATE_ORGANIZATION: &str = r#"mutation CreateOrganization($input: CreateOrganizationInput!) {
  createOrganization(input: $input) {
    organization {
      id
      displayName
      description
      setting {
        domains
      }
    }
  }
}"#;

pub struct GraphQLDirectoryClient {
    client: GraphQLClient,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CreateOrganizationInput {
    name: String,
    display_name: String,
    #[serde(rename = "parentID", skip_serializing_if = "Option::is_none")]
    parent_id: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    tags: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    create_org_settings: Option<OrganizationSettingInput>,
}

#[derive(Serialize)]
struct OrganizationSettingInput {
    domains: Vec<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct CreateOrganizationData {
    create_organization: CreateOrganizationPayload,
}

#[derive(Deserialize)]
struct CreateOrganizationPayload {
    organization: Organization,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct Organization {
    id: String,
    display_name: String,
    description: Option<String>,
    setting: Option<OrganizationSetting>,
}

#[derive(Deserialize)]
struct OrganizationSetting {
    #[serde(default)]
    domains: Vec<String>,
}

impl GraphQLDirectoryClient {
    pub fn new(client: GraphQLClient) -> Self {
        Self { client }
    }
}

impl From<CreateNodeRequest> for CreateOrganizationInput {
    fn from(request: CreateNodeRequest) -> Self {
        let create_org_settings = if request.domains.is_empty() {
            None
        } else {
            Some(OrganizationSettingInput {
                domains: request.domains,
            })
        };

        Self {
            name: request.name,
            display_name: request.display_name,
            parent_id: request.parent_id,
            tags: request.tags,
            description: request.description,
            create_org_settings,
        }
    }
}

impl From<GraphQLError> for DirectoryError {
    fn from(error: GraphQLError) -> Self {
        match error {
            GraphQLError::Network(msg) => DirectoryError::Network(msg),
            GraphQLError::Authentication(msg) => DirectoryError::Authentication(msg),
            GraphQLError::Http { status, body } => DirectoryError::Provider(format!("HTTP {}: {}", status, body)),
            GraphQLError::Query(msg) => DirectoryError::Rejected(msg),
            GraphQLError::MissingData => DirectoryError::InvalidResponse("response contained no data".to_string()),
            GraphQLError::Decode(msg) => DirectoryError::InvalidResponse(msg),
        }
    }
}

#[async_trait]
impl DirectoryClient for GraphQLDirectoryClient {
    async fn create_node(&self, request: CreateNodeRequest) -> Result<DirectoryNode, DirectoryError> {
        let input = CreateOrganizationInput::from(request);

        let data: CreateOrganizationData = self
            .client
            .execute(CREATE_ORGANIZATION, json!({ "input": input }))
            .await?;

        let organization = data.create_organization.organization;
        Ok(DirectoryNode {
            id: organization.id,
            display_name: organization.display_name,
            description: organization.description,
            domains: organization.setting.map(|s| s.domains).unwrap_or_default(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Matcher;
    use std::time::Duration;

    fn adapter(url: &str) -> GraphQLDirectoryClient {
        let client = GraphQLClient::new(url, Some("tola_test".to_string()), Duration::from_secs(5)).unwrap();
        GraphQLDirectoryClient::new(client)
    }

    #[tokio::test]
    async fn test_root_creation_sends_description_and_domains() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/query")
            .match_body(Matcher::PartialJson(json!({
                "variables": { "input": {
                    "name": "acme",
                    "displayName": "Acme",
                    "description": "Widgets",
                    "createOrgSettings": { "domains": ["acme.io"] }
                }}
            })))
            .with_status(200)
            .with_body(
                r#"{"data":{"createOrganization":{"organization":{
                    "id":"01HROOT","displayName":"Acme","description":"Widgets",
                    "setting":{"domains":["acme.io"]}}}}}"#,
            )
            .create_async()
            .await;

        let node = adapter(&server.url())
            .create_node(CreateNodeRequest {
                name: "acme".to_string(),
                display_name: "Acme".to_string(),
                parent_id: None,
                tags: vec![],
                description: Some("Widgets".to_string()),
                domains: vec!["acme.io".to_string()],
            })
            .await
            .unwrap();

        assert_eq!(node.id, "01HROOT");
        assert_eq!(node.domains, vec!["acme.io"]);
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_child_creation_sends_parent_and_tags() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/query")
            .match_body(Matcher::PartialJson(json!({
                "variables": { "input": {
                    "name": "acme.prod.assets",
                    "parentID": "01HENV",
                    "tags": ["prod"]
                }}
            })))
            .with_status(200)
            .with_body(r#"{"data":{"createOrganization":{"organization":{"id":"01HBUCKET","displayName":"assets"}}}}"#)
            .create_async()
            .await;

        let request = CreateNodeRequest::child(
            "acme.prod.assets".to_string(),
            "assets".to_string(),
            "01HENV".to_string(),
            vec!["prod".to_string()],
        );
        let node = adapter(&server.url()).create_node(request).await.unwrap();

        assert_eq!(node.id, "01HBUCKET");
        assert_eq!(node.description, None);
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_error_mapping() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/query")
            .with_status(200)
            .with_body(r#"{"errors":[{"message":"organization already exists"}]}"#)
            .create_async()
            .await;

        let request = CreateNodeRequest::child("a.b".to_string(), "b".to_string(), "p".to_string(), vec![]);
        let err = adapter(&server.url()).create_node(request.clone()).await.unwrap_err();
        assert_eq!(err, DirectoryError::Rejected("organization already exists".to_string()));

        let mut server = mockito::Server::new_async().await;
        server.mock("POST", "/query").with_status(500).with_body("boom").create_async().await;
        let err = adapter(&server.url()).create_node(request).await.unwrap_err();
        assert_eq!(err, DirectoryError::Provider("HTTP 500: boom".to_string()));
    }
}
