// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

// Seed Client
//
// Bulk-loads generated CSV files into the directory service. GraphQL
// operations go through the shared transport in canopy-core; user
// registration and e-mail verification use the REST endpoints.

use crate::config::SeedConfig;
use crate::error::SeedError;
use crate::file::{column_index, load_csv_upload, read_csv_file};
use crate::templates::templates;
use canopy_core::infrastructure::graphql::{GraphQLClient, GraphQLError};
use chrono::{Duration as ChronoDuration, SecondsFormat, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::path::Path;
use std::time::Duration;
use tracing::{debug, info};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);
const VERIFY_DELAY: Duration = Duration::from_millis(100);
const UPLOAD_PATH: &str = "variables.input";

const CREATE_BULK_CSV_ORGANIZATION: &str = r#"mutation CreateBulkCSVOrganization($input: Upload!) {
  createBulkCSVOrganization(input: $input) { organizations { id } }
}"#;

const CREATE_BULK_CSV_GROUP: &str = r#"mutation CreateBulkCSVGroup($input: Upload!) {
  createBulkCSVGroup(input: $input) { groups { id } }
}"#;

const CREATE_BULK_CSV_INVITE: &str = r#"mutation CreateBulkCSVInvite($input: Upload!) {
  createBulkCSVInvite(input: $input) { invites { id } }
}"#;

const CREATE_BULK_CSV_SUBSCRIBER: &str = r#"mutation CreateBulkCSVSubscriber($input: Upload!) {
  createBulkCSVSubscriber(input: $input) { subscribers { id } }
}"#;

const CREATE_BULK_TEMPLATE: &str = r#"mutation CreateBulkTemplate($input: [CreateTemplateInput!]) {
  createBulkTemplate(input: $input) { templates { id } }
}"#;

const ADD_USER_TO_ORG: &str = r#"mutation AddUserToOrgWithRole($input: CreateOrgMembershipInput!) {
  createOrgMembership(input: $input) { orgMembership { id } }
}"#;

const CREATE_API_TOKEN: &str = r#"mutation CreateAPIToken($input: CreateAPITokenInput!) {
  createAPIToken(input: $input) { apiToken { token } }
}"#;

const UPDATE_PERSONAL_ACCESS_TOKEN: &str = r#"mutation UpdatePersonalAccessToken($id: ID!, $input: UpdatePersonalAccessTokenInput!) {
  updatePersonalAccessToken(id: $id, input: $input) { personalAccessToken { id } }
}"#;

const GET_ALL_ORGANIZATIONS: &str = r#"query GetAllOrganizations {
  organizations {
    edges { node { id displayName description personalOrg children { edges { node { id } } } members { id } } }
  }
}"#;

const GET_ALL_GROUPS: &str = r#"query GetAllGroups {
  groups { edges { node { id name description setting { visibility } members { id } } } }
}"#;

const GET_ALL_INVITES: &str = r#"query GetAllInvites {
  invites { edges { node { id recipient role status } } }
}"#;

const GET_ALL_SUBSCRIBERS: &str = r#"query GetAllSubscribers {
  subscribers { edges { node { id email active verifiedEmail } } }
}"#;

const GET_ALL_TEMPLATES: &str = r#"query GetAllTemplates {
  templates { edges { node { id name } } }
}"#;

const GET_ORG_MEMBERS: &str = r#"query GetOrgMembersByOrgID($where: OrgMembershipWhereInput) {
  orgMemberships(where: $where) { edges { node { id role user { email } } } }
}"#;

#[derive(Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
struct Connection<T> {
    #[serde(default)]
    edges: Vec<Edge<T>>,
}

#[derive(Deserialize)]
struct Edge<T> {
    node: T,
}

impl<T> Connection<T> {
    fn into_nodes(self) -> Vec<T> {
        self.edges.into_iter().map(|edge| edge.node).collect()
    }
}

#[derive(Deserialize)]
struct IdNode {
    id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OrganizationSummary {
    pub id: String,
    pub display_name: String,
    pub description: String,
    pub personal_org: bool,
    pub children: usize,
    pub members: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GroupSummary {
    pub id: String,
    pub name: String,
    pub description: String,
    pub visibility: String,
    pub members: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InviteSummary {
    pub id: String,
    pub recipient: String,
    pub role: String,
    pub status: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubscriberSummary {
    pub id: String,
    pub email: String,
    pub active: bool,
    pub verified_email: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemplateSummary {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OrgMemberSummary {
    pub id: String,
    pub email: String,
    pub role: String,
}

#[derive(Serialize)]
struct RegisterRequest {
    first_name: String,
    last_name: String,
    email: String,
    password: String,
}

#[derive(Deserialize)]
struct RegisterReply {
    id: String,
    #[serde(default)]
    token: String,
}

pub struct SeedClient {
    graphql: GraphQLClient,
    http: reqwest::Client,
    config: SeedConfig,
}

impl SeedClient {
    /// Fails before any remote call when no token is configured.
    pub fn new(config: SeedConfig) -> Result<Self, SeedError> {
        if config.token.is_empty() {
            return Err(SeedError::TokenMissing);
        }

        let graphql = GraphQLClient::new(&config.directory_host, Some(config.token.clone()), REQUEST_TIMEOUT)?;
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| SeedError::Network(e.to_string()))?;

        Ok(Self { graphql, http, config })
    }

    pub fn config(&self) -> &SeedConfig {
        &self.config
    }

    /// Bulk-create organizations from `orgs.csv`; returns the first id.
    pub async fn load_organizations(&self) -> Result<Option<String>, SeedError> {
        let data: Value = self
            .upload_csv(CREATE_BULK_CSV_ORGANIZATION, &self.config.organizations_file())
            .await?;
        let ids = created_ids(&data, "createBulkCSVOrganization", "organizations");
        info!(count = ids.len(), "Organizations created");
        Ok(ids.into_iter().next())
    }

    pub async fn load_groups(&self) -> Result<usize, SeedError> {
        let data: Value = self.upload_csv(CREATE_BULK_CSV_GROUP, &self.config.groups_file()).await?;
        let count = created_ids(&data, "createBulkCSVGroup", "groups").len();
        info!(count, "Groups created");
        Ok(count)
    }

    pub async fn load_invites(&self) -> Result<usize, SeedError> {
        let data: Value = self.upload_csv(CREATE_BULK_CSV_INVITE, &self.config.invites_file()).await?;
        let count = created_ids(&data, "createBulkCSVInvite", "invites").len();
        info!(count, "Invites created");
        Ok(count)
    }

    pub async fn load_subscribers(&self) -> Result<usize, SeedError> {
        let data: Value = self
            .upload_csv(CREATE_BULK_CSV_SUBSCRIBER, &self.config.subscribers_file())
            .await?;
        let count = created_ids(&data, "createBulkCSVSubscriber", "subscribers").len();
        info!(count, "Subscribers created");
        Ok(count)
    }

    /// Register every user in `users.csv` and verify the ones marked
    /// `Verified = true`. Returns the new user ids in file order.
    pub async fn register_users(&self) -> Result<Vec<String>, SeedError> {
        let records = read_csv_file(self.config.users_file())?;
        let Some((headers, rows)) = records.split_first() else {
            return Ok(Vec::new());
        };

        let column = |name: &str| column_index(headers, name).ok_or_else(|| SeedError::ColumnNotFound(name.to_string()));
        let first_name = column("First Name")?;
        let last_name = column("Last Name")?;
        let email = column("Email")?;
        let password = column("Password")?;
        let verified = column("Verified")?;

        let mut user_ids = Vec::with_capacity(rows.len());
        for row in rows {
            let request = RegisterRequest {
                first_name: field(row, first_name),
                last_name: field(row, last_name),
                email: field(row, email),
                password: field(row, password),
            };
            let reply: RegisterReply = self.post_rest("v1/register", &request).await?;
            debug!(user_id = %reply.id, "Registered user");

            if field(row, verified) == "true" {
                tokio::time::sleep(VERIFY_DELAY).await;
                self.verify_email(&reply.token).await?;
            }

            user_ids.push(reply.id);
        }

        info!(count = user_ids.len(), "Users registered");
        Ok(user_ids)
    }

    pub async fn load_org_members(&self, user_ids: &[String]) -> Result<(), SeedError> {
        for user_id in user_ids {
            let _: Value = self
                .graphql
                .execute(ADD_USER_TO_ORG, json!({ "input": { "userID": user_id } }))
                .await?;
        }
        info!(count = user_ids.len(), "Organization members added");
        Ok(())
    }

    /// Bulk-create the embedded templates. No-op when templates are disabled.
    pub async fn load_templates(&self) -> Result<usize, SeedError> {
        if !self.config.generate_templates {
            return Ok(0);
        }

        let input: Vec<Value> = templates()?
            .into_iter()
            .map(|template| {
                json!({
                    "name": template.name,
                    "jsonconfig": template.json_config,
                    "templateType": "ROOTTEMPLATE",
                })
            })
            .collect();

        let data: Value = self.graphql.execute(CREATE_BULK_TEMPLATE, json!({ "input": input })).await?;
        let count = created_ids(&data, "createBulkTemplate", "templates").len();
        info!(count, "Templates created");
        Ok(count)
    }

    /// Create a one-hour API token owned by `organization_id` and use it for
    /// every following request.
    pub async fn generate_seed_api_token(&mut self, organization_id: &str) -> Result<(), SeedError> {
        let expires_at = (Utc::now() + ChronoDuration::hours(1)).to_rfc3339_opts(SecondsFormat::Secs, true);
        let input = json!({
            "name": format!("seed token {}", organization_id),
            "ownerID": organization_id,
            "expiresAt": expires_at,
            "scopes": ["read", "write"],
        });

        let data: Value = self.graphql.execute(CREATE_API_TOKEN, json!({ "input": input })).await?;
        let token = data["createAPIToken"]["apiToken"]["token"]
            .as_str()
            .filter(|token| !token.is_empty())
            .ok_or(SeedError::GraphQL(GraphQLError::MissingData))?
            .to_string();

        self.graphql = self.graphql.with_token(token.clone());
        self.config.token = token;
        info!(organization_id, "Authenticated with seed API token");
        Ok(())
    }

    pub async fn authorize_organization_on_pat(&self, organization_id: &str, pat_id: &str) -> Result<(), SeedError> {
        let variables = json!({
            "id": pat_id,
            "input": { "addOrganizationIDs": [organization_id] },
        });
        let _: Value = self.graphql.execute(UPDATE_PERSONAL_ACCESS_TOKEN, variables).await?;
        Ok(())
    }

    pub async fn organizations(&self) -> Result<Vec<OrganizationSummary>, SeedError> {
        #[derive(Deserialize)]
        #[serde(rename_all = "camelCase")]
        struct Node {
            id: String,
            display_name: String,
            description: Option<String>,
            personal_org: Option<bool>,
            children: Option<Connection<IdNode>>,
            #[serde(default)]
            members: Vec<IdNode>,
        }

        #[derive(Deserialize)]
        struct Data {
            organizations: Connection<Node>,
        }

        let data: Data = self.query(GET_ALL_ORGANIZATIONS, json!({})).await?;
        Ok(data
            .organizations
            .into_nodes()
            .into_iter()
            .map(|node| OrganizationSummary {
                id: node.id,
                display_name: node.display_name,
                description: node.description.unwrap_or_default(),
                personal_org: node.personal_org.unwrap_or_default(),
                children: node.children.map_or(0, |c| c.edges.len()),
                members: node.members.len(),
            })
            .collect())
    }

    pub async fn groups(&self) -> Result<Vec<GroupSummary>, SeedError> {
        #[derive(Deserialize)]
        struct Setting {
            visibility: String,
        }

        #[derive(Deserialize)]
        struct Node {
            id: String,
            name: String,
            description: Option<String>,
            setting: Option<Setting>,
            #[serde(default)]
            members: Vec<IdNode>,
        }

        #[derive(Deserialize)]
        struct Data {
            groups: Connection<Node>,
        }

        let data: Data = self.query(GET_ALL_GROUPS, json!({})).await?;
        Ok(data
            .groups
            .into_nodes()
            .into_iter()
            .map(|node| GroupSummary {
                id: node.id,
                name: node.name,
                description: node.description.unwrap_or_default(),
                visibility: node.setting.map(|s| s.visibility).unwrap_or_default(),
                members: node.members.len(),
            })
            .collect())
    }

    pub async fn invites(&self) -> Result<Vec<InviteSummary>, SeedError> {
        #[derive(Deserialize)]
        struct Data {
            invites: Connection<InviteSummary>,
        }

        let data: Data = self.query(GET_ALL_INVITES, json!({})).await?;
        Ok(data.invites.into_nodes())
    }

    pub async fn subscribers(&self) -> Result<Vec<SubscriberSummary>, SeedError> {
        #[derive(Deserialize)]
        struct Data {
            subscribers: Connection<SubscriberSummary>,
        }

        let data: Data = self.query(GET_ALL_SUBSCRIBERS, json!({})).await?;
        Ok(data.subscribers.into_nodes())
    }

    pub async fn templates(&self) -> Result<Vec<TemplateSummary>, SeedError> {
        #[derive(Deserialize)]
        struct Data {
            templates: Connection<TemplateSummary>,
        }

        let data: Data = self.query(GET_ALL_TEMPLATES, json!({})).await?;
        Ok(data.templates.into_nodes())
    }

    pub async fn org_members(&self, organization_id: &str) -> Result<Vec<OrgMemberSummary>, SeedError> {
        #[derive(Deserialize)]
        struct User {
            email: String,
        }

        #[derive(Deserialize)]
        struct Node {
            id: String,
            role: String,
            user: User,
        }

        #[derive(Deserialize)]
        #[serde(rename_all = "camelCase")]
        struct Data {
            org_memberships: Connection<Node>,
        }

        let variables = json!({ "where": { "organizationID": organization_id } });
        let data: Data = self.query(GET_ORG_MEMBERS, variables).await?;
        Ok(data
            .org_memberships
            .into_nodes()
            .into_iter()
            .map(|node| OrgMemberSummary {
                id: node.id,
                email: node.user.email,
                role: node.role,
            })
            .collect())
    }

    async fn query<T: DeserializeOwned>(&self, query: &str, variables: Value) -> Result<T, SeedError> {
        Ok(self.graphql.execute(query, variables).await?)
    }

    async fn upload_csv<T: DeserializeOwned>(&self, mutation: &str, path: &Path) -> Result<T, SeedError> {
        let upload = load_csv_upload(path)?;
        debug!(file = %path.display(), "Uploading CSV");
        Ok(self
            .graphql
            .upload(mutation, json!({ "input": null }), UPLOAD_PATH, upload)
            .await?)
    }

    async fn verify_email(&self, token: &str) -> Result<(), SeedError> {
        let response = self
            .http
            .get(self.rest_url("v1/verify"))
            .query(&[("token", token)])
            .send()
            .await
            .map_err(|e| SeedError::Network(e.to_string()))?;

        check_status(response).await.map(|_| ())
    }

    async fn post_rest<B: Serialize, T: DeserializeOwned>(&self, path: &str, body: &B) -> Result<T, SeedError> {
        let response = self
            .http
            .post(self.rest_url(path))
            .json(body)
            .send()
            .await
            .map_err(|e| SeedError::Network(e.to_string()))?;

        check_status(response)
            .await?
            .json()
            .await
            .map_err(|e| SeedError::Network(format!("Failed to parse response: {}", e)))
    }

    fn rest_url(&self, path: &str) -> String {
        format!("{}/{}", self.config.directory_host.trim_end_matches('/'), path)
    }
}

async fn check_status(response: reqwest::Response) -> Result<reqwest::Response, SeedError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    Err(SeedError::Request {
        status: status.as_u16(),
        body: body.trim().to_lowercase(),
    })
}

fn field(row: &[String], index: usize) -> String {
    row.get(index).cloned().unwrap_or_default()
}

/// Ids under `data.<operation>.<collection>[].id`.
fn created_ids(data: &Value, operation: &str, collection: &str) -> Vec<String> {
    data[operation][collection]
        .as_array()
        .map(|items| {
            items
                .iter()
                .filter_map(|item| item["id"].as_str().map(str::to_string))
                .collect()
        })
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Matcher;

    fn config(host: &str, directory: &Path) -> SeedConfig {
        SeedConfig {
            directory: directory.to_path_buf(),
            directory_host: host.to_string(),
            token: "tola_seed".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_missing_token_is_rejected() {
        let err = SeedClient::new(SeedConfig::default()).err().unwrap();
        assert!(matches!(err, SeedError::TokenMissing));
    }

    #[tokio::test]
    async fn test_load_organizations_returns_first_id() {
        let dir = tempfile::tempdir().unwrap();
        let mut server = mockito::Server::new_async().await;
        let config = config(&server.url(), dir.path());
        std::fs::write(config.organizations_file(), "Name\nAcme\nGlobex\n").unwrap();

        let mock = server
            .mock("POST", "/query")
            .match_header("authorization", "Bearer tola_seed")
            .match_body(Matcher::Regex("createBulkCSVOrganization".to_string()))
            .with_status(200)
            .with_body(r#"{"data":{"createBulkCSVOrganization":{"organizations":[{"id":"01HORG1"},{"id":"01HORG2"}]}}}"#)
            .create_async()
            .await;

        let client = SeedClient::new(config).unwrap();
        assert_eq!(client.load_organizations().await.unwrap(), Some("01HORG1".to_string()));
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_register_users_verifies_only_verified_rows() {
        let dir = tempfile::tempdir().unwrap();
        let mut server = mockito::Server::new_async().await;
        let config = config(&server.url(), dir.path());
        std::fs::write(
            config.users_file(),
            "First Name,Last Name,Email,Password,AuthProvider,OrganizationIDs,Verified\n\
             Ada,Lovelace,ada.lovelace@example.com,secret!,CREDENTIALS,[ORGANIZATION_ID],true\n\
             Alan,Kay,alan.kay@example.com,secret!,CREDENTIALS,[ORGANIZATION_ID],false\n",
        )
        .unwrap();

        let register = server
            .mock("POST", "/v1/register")
            .with_status(201)
            .with_body(r#"{"id":"01HUSER","token":"verify-me"}"#)
            .expect(2)
            .create_async()
            .await;
        let verify = server
            .mock("GET", "/v1/verify")
            .match_query(Matcher::UrlEncoded("token".to_string(), "verify-me".to_string()))
            .with_status(200)
            .with_body("{}")
            .expect(1)
            .create_async()
            .await;

        let client = SeedClient::new(config).unwrap();
        let ids = client.register_users().await.unwrap();

        assert_eq!(ids.len(), 2);
        register.assert_async().await;
        verify.assert_async().await;
    }

    #[tokio::test]
    async fn test_register_failure_lowercases_body() {
        let dir = tempfile::tempdir().unwrap();
        let mut server = mockito::Server::new_async().await;
        let config = config(&server.url(), dir.path());
        std::fs::write(
            config.users_file(),
            "First Name,Last Name,Email,Password,AuthProvider,OrganizationIDs,Verified\nAda,L,a@example.com,p!,CREDENTIALS,x,false\n",
        )
        .unwrap();

        server
            .mock("POST", "/v1/register")
            .with_status(409)
            .with_body("User Already Exists")
            .create_async()
            .await;

        let err = SeedClient::new(config).unwrap().register_users().await.unwrap_err();
        assert_eq!(err.to_string(), "unable to process request (status 409): user already exists");
    }

    #[tokio::test]
    async fn test_seed_token_replaces_credentials() {
        let dir = tempfile::tempdir().unwrap();
        let mut server = mockito::Server::new_async().await;

        server
            .mock("POST", "/query")
            .match_header("authorization", "Bearer tola_seed")
            .match_body(Matcher::Regex("createAPIToken".to_string()))
            .with_status(200)
            .with_body(r#"{"data":{"createAPIToken":{"apiToken":{"token":"tola_org"}}}}"#)
            .create_async()
            .await;
        let templates = server
            .mock("POST", "/query")
            .match_header("authorization", "Bearer tola_org")
            .match_body(Matcher::Regex("createBulkTemplate".to_string()))
            .with_status(200)
            .with_body(r#"{"data":{"createBulkTemplate":{"templates":[{"id":"t1"},{"id":"t2"},{"id":"t3"}]}}}"#)
            .create_async()
            .await;

        let mut client = SeedClient::new(config(&server.url(), dir.path())).unwrap();
        client.generate_seed_api_token("01HORG").await.unwrap();
        assert_eq!(client.config().token, "tola_org");
        assert_eq!(client.load_templates().await.unwrap(), 3);
        templates.assert_async().await;
    }

    #[tokio::test]
    async fn test_templates_disabled_makes_no_call() {
        let dir = tempfile::tempdir().unwrap();
        let config = SeedConfig {
            generate_templates: false,
            ..config("http://127.0.0.1:9", dir.path())
        };

        assert_eq!(SeedClient::new(config).unwrap().load_templates().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_list_organizations() {
        let dir = tempfile::tempdir().unwrap();
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/query")
            .with_status(200)
            .with_body(
                r#"{"data":{"organizations":{"edges":[{"node":{
                    "id":"01HORG","displayName":"Acme","description":"Widgets","personalOrg":false,
                    "children":{"edges":[{"node":{"id":"c1"}},{"node":{"id":"c2"}}]},
                    "members":[{"id":"m1"}]}}]}}}"#,
            )
            .create_async()
            .await;

        let client = SeedClient::new(config(&server.url(), dir.path())).unwrap();
        let orgs = client.organizations().await.unwrap();

        assert_eq!(
            orgs,
            vec![OrganizationSummary {
                id: "01HORG".to_string(),
                display_name: "Acme".to_string(),
                description: "Widgets".to_string(),
                personal_org: false,
                children: 2,
                members: 1,
            }]
        );
    }

    async fn query_server(body: &str) -> (mockito::ServerGuard, mockito::Mock) {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/query")
            .match_header("authorization", "Bearer tola_seed")
            .with_status(200)
            .with_body(body)
            .create_async()
            .await;
        (server, mock)
    }

    #[tokio::test]
    async fn test_list_groups() {
        let dir = tempfile::tempdir().unwrap();
        let (server, mock) = query_server(
            r#"{"data":{"groups":{"edges":[
                {"node":{"id":"g1","name":"engineering","description":"Builders","setting":{"visibility":"PUBLIC"},"members":[{"id":"m1"},{"id":"m2"}]}},
                {"node":{"id":"g2","name":"ops","description":null,"setting":null}}]}}}"#,
        )
        .await;

        let client = SeedClient::new(config(&server.url(), dir.path())).unwrap();
        let groups = client.groups().await.unwrap();

        assert_eq!(
            groups,
            vec![
                GroupSummary {
                    id: "g1".to_string(),
                    name: "engineering".to_string(),
                    description: "Builders".to_string(),
                    visibility: "PUBLIC".to_string(),
                    members: 2,
                },
                GroupSummary {
                    id: "g2".to_string(),
                    name: "ops".to_string(),
                    description: String::new(),
                    visibility: String::new(),
                    members: 0,
                },
            ]
        );
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_connection_without_edges_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let (server, _mock) = query_server(r#"{"data":{"groups":{}}}"#).await;

        let client = SeedClient::new(config(&server.url(), dir.path())).unwrap();
        assert!(client.groups().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_organization_children_without_edges() {
        let dir = tempfile::tempdir().unwrap();
        let (server, _mock) = query_server(
            r#"{"data":{"organizations":{"edges":[{"node":{"id":"o1","displayName":"Acme","children":{}}}]}}}"#,
        )
        .await;

        let client = SeedClient::new(config(&server.url(), dir.path())).unwrap();
        let orgs = client.organizations().await.unwrap();

        assert_eq!(orgs.len(), 1);
        assert_eq!(orgs[0].children, 0);
        assert_eq!(orgs[0].members, 0);
        assert!(!orgs[0].personal_org);
    }

    #[tokio::test]
    async fn test_list_invites() {
        let dir = tempfile::tempdir().unwrap();
        let (server, mock) = query_server(
            r#"{"data":{"invites":{"edges":[{"node":{"id":"i1","recipient":"ada@example.com","role":"ADMIN","status":"INVITATION_SENT"}}]}}}"#,
        )
        .await;

        let client = SeedClient::new(config(&server.url(), dir.path())).unwrap();
        let invites = client.invites().await.unwrap();

        assert_eq!(
            invites,
            vec![InviteSummary {
                id: "i1".to_string(),
                recipient: "ada@example.com".to_string(),
                role: "ADMIN".to_string(),
                status: "INVITATION_SENT".to_string(),
            }]
        );
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_list_subscribers() {
        let dir = tempfile::tempdir().unwrap();
        let (server, mock) = query_server(
            r#"{"data":{"subscribers":{"edges":[{"node":{"id":"s1","email":"alan@example.com","active":true,"verifiedEmail":false}}]}}}"#,
        )
        .await;

        let client = SeedClient::new(config(&server.url(), dir.path())).unwrap();
        let subscribers = client.subscribers().await.unwrap();

        assert_eq!(
            subscribers,
            vec![SubscriberSummary {
                id: "s1".to_string(),
                email: "alan@example.com".to_string(),
                active: true,
                verified_email: false,
            }]
        );
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_list_templates() {
        let dir = tempfile::tempdir().unwrap();
        let (server, mock) = query_server(
            r#"{"data":{"templates":{"edges":[{"node":{"id":"t1","name":"Vendor Questionnaire"}},{"node":{"id":"t2","name":"Asset Inventory"}}]}}}"#,
        )
        .await;

        let client = SeedClient::new(config(&server.url(), dir.path())).unwrap();
        let templates = client.templates().await.unwrap();

        assert_eq!(templates.len(), 2);
        assert_eq!(templates[1].name, "Asset Inventory");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_list_org_members_filters_by_organization() {
        let dir = tempfile::tempdir().unwrap();
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/query")
            .match_body(Matcher::PartialJson(
                json!({ "variables": { "where": { "organizationID": "01HORG" } } }),
            ))
            .with_status(200)
            .with_body(
                r#"{"data":{"orgMemberships":{"edges":[{"node":{"id":"om1","role":"OWNER","user":{"email":"ada@example.com"}}}]}}}"#,
            )
            .create_async()
            .await;

        let client = SeedClient::new(config(&server.url(), dir.path())).unwrap();
        let members = client.org_members("01HORG").await.unwrap();

        assert_eq!(
            members,
            vec![OrgMemberSummary {
                id: "om1".to_string(),
                email: "ada@example.com".to_string(),
                role: "OWNER".to_string(),
            }]
        );
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_bulk_loads_count_created_records() {
        let dir = tempfile::tempdir().unwrap();
        let mut server = mockito::Server::new_async().await;
        let config = config(&server.url(), dir.path());
        std::fs::write(config.groups_file(), "Name,Description\nengineering,Builders\nops,Runners\n").unwrap();
        std::fs::write(config.invites_file(), "Recipient,Role\nada@example.com,ADMIN\n").unwrap();
        std::fs::write(config.subscribers_file(), "Email\na@example.com\nb@example.com\nc@example.com\n").unwrap();

        let groups = server
            .mock("POST", "/query")
            .match_body(Matcher::Regex("createBulkCSVGroup".to_string()))
            .with_status(200)
            .with_body(r#"{"data":{"createBulkCSVGroup":{"groups":[{"id":"g1"},{"id":"g2"}]}}}"#)
            .expect(1)
            .create_async()
            .await;
        let invites = server
            .mock("POST", "/query")
            .match_body(Matcher::Regex("createBulkCSVInvite".to_string()))
            .with_status(200)
            .with_body(r#"{"data":{"createBulkCSVInvite":{"invites":[{"id":"i1"}]}}}"#)
            .expect(1)
            .create_async()
            .await;
        let subscribers = server
            .mock("POST", "/query")
            .match_body(Matcher::Regex("createBulkCSVSubscriber".to_string()))
            .with_status(200)
            .with_body(r#"{"data":{"createBulkCSVSubscriber":{"subscribers":[{"id":"s1"},{"id":"s2"},{"id":"s3"}]}}}"#)
            .expect(1)
            .create_async()
            .await;

        let client = SeedClient::new(config).unwrap();
        assert_eq!(client.load_groups().await.unwrap(), 2);
        assert_eq!(client.load_invites().await.unwrap(), 1);
        assert_eq!(client.load_subscribers().await.unwrap(), 3);

        groups.assert_async().await;
        invites.assert_async().await;
        subscribers.assert_async().await;
    }

    #[tokio::test]
    async fn test_bulk_load_missing_file_makes_no_call() {
        let dir = tempfile::tempdir().unwrap();
        let mut server = mockito::Server::new_async().await;
        let mock = server.mock("POST", "/query").expect(0).create_async().await;

        let client = SeedClient::new(config(&server.url(), dir.path())).unwrap();
        assert!(client.load_groups().await.is_err());
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_load_org_members_adds_each_user() {
        let dir = tempfile::tempdir().unwrap();
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/query")
            .match_body(Matcher::Regex("createOrgMembership".to_string()))
            .with_status(200)
            .with_body(r#"{"data":{"createOrgMembership":{"orgMembership":{"id":"om1"}}}}"#)
            .expect(3)
            .create_async()
            .await;

        let client = SeedClient::new(config(&server.url(), dir.path())).unwrap();
        let users = vec!["u1".to_string(), "u2".to_string(), "u3".to_string()];
        client.load_org_members(&users).await.unwrap();

        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_authorize_organization_on_pat() {
        let dir = tempfile::tempdir().unwrap();
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/query")
            .match_body(Matcher::PartialJson(json!({
                "variables": { "id": "01HPAT", "input": { "addOrganizationIDs": ["01HORG"] } }
            })))
            .with_status(200)
            .with_body(r#"{"data":{"updatePersonalAccessToken":{"personalAccessToken":{"id":"01HPAT"}}}}"#)
            .expect(1)
            .create_async()
            .await;

        let client = SeedClient::new(config(&server.url(), dir.path())).unwrap();
        client.authorize_organization_on_pat("01HORG", "01HPAT").await.unwrap();

        mock.assert_async().await;
    }
}
