// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

// GraphQL Transport
//
// Thin HTTP client for the directory's `/query` endpoint. Used by the directory
// adapter and by the seeding client. File uploads follow the GraphQL multipart
// request convention (`operations`, `map`, then one part per file).

use reqwest::multipart::{Form, Part};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{json, Value};
use std::time::Duration;
use thiserror::Error;

const QUERY_PATH: &str = "query";

#[derive(Debug, Error)]
pub enum GraphQLError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Authentication failed: {0}")]
    Authentication(String),

    #[error("HTTP {status}: {body}")]
    Http { status: u16, body: String },

    #[error("{0}")]
    Query(String),

    #[error("response contained no data")]
    MissingData,

    #[error("Failed to parse response: {0}")]
    Decode(String),
}

/// A file sent as one part of a multipart operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Upload {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

#[derive(Deserialize)]
struct GraphQLResponse<T> {
    data: Option<T>,
    #[serde(default)]
    errors: Vec<GraphQLErrorMessage>,
}

#[derive(Deserialize)]
struct GraphQLErrorMessage {
    message: String,
}

#[derive(Clone)]
pub struct GraphQLClient {
    client: reqwest::Client,
    endpoint: String,
    token: Option<String>,
}

impl GraphQLClient {
    pub fn new(base_url: &str, token: Option<String>, timeout: Duration) -> Result<Self, GraphQLError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| GraphQLError::Network(e.to_string()))?;

        Ok(Self {
            client,
            endpoint: format!("{}/{}", base_url.trim_end_matches('/'), QUERY_PATH),
            token,
        })
    }

    /// Same connection pool, different credentials
    pub fn with_token(&self, token: impl Into<String>) -> Self {
        Self {
            client: self.client.clone(),
            endpoint: self.endpoint.clone(),
            token: Some(token.into()),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub async fn execute<T: DeserializeOwned>(&self, query: &str, variables: Value) -> Result<T, GraphQLError> {
        let body = json!({ "query": query, "variables": variables });
        let request = self.client.post(&self.endpoint).json(&body);
        self.send(request).await
    }

    /// Run a mutation with a single file bound at `variable_path`
    /// (e.g. `variables.input`).
    pub async fn upload<T: DeserializeOwned>(
        &self,
        query: &str,
        variables: Value,
        variable_path: &str,
        upload: Upload,
    ) -> Result<T, GraphQLError> {
        let operations = json!({ "query": query, "variables": variables });
        let map = json!({ "0": [variable_path] });

        let part = Part::bytes(upload.bytes)
            .file_name(upload.file_name)
            .mime_str(&upload.content_type)
            .map_err(|e| GraphQLError::Network(e.to_string()))?;

        let form = Form::new()
            .text("operations", operations.to_string())
            .text("map", map.to_string())
            .part("0", part);

        let request = self.client.post(&self.endpoint).multipart(form);
        self.send(request).await
    }

    async fn send<T: DeserializeOwned>(&self, request: reqwest::RequestBuilder) -> Result<T, GraphQLError> {
        let request = match &self.token {
            Some(token) => request.bearer_auth(token),
            None => request,
        };

        let response = request
            .send()
            .await
            .map_err(|e| GraphQLError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(if status == 401 || status == 403 {
                GraphQLError::Authentication(body)
            } else {
                GraphQLError::Http {
                    status: status.as_u16(),
                    body,
                }
            });
        }

        let envelope: GraphQLResponse<T> = response
            .json()
            .await
            .map_err(|e| GraphQLError::Decode(e.to_string()))?;

        if !envelope.errors.is_empty() {
            let messages: Vec<String> = envelope.errors.into_iter().map(|e| e.message).collect();
            return Err(GraphQLError::Query(messages.join("; ")));
        }

        envelope.data.ok_or(GraphQLError::MissingData)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Matcher;

    #[derive(Debug, Deserialize)]
    struct Ping {
        ping: String,
    }

    fn client(url: &str) -> GraphQLClient {
        GraphQLClient::new(url, Some("tola_test".to_string()), Duration::from_secs(5)).unwrap()
    }

    #[tokio::test]
    async fn test_execute_sends_bearer_and_decodes_data() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/query")
            .match_header("authorization", "Bearer tola_test")
            .match_body(Matcher::PartialJson(json!({ "variables": { "x": 1 } })))
            .with_status(200)
            .with_body(r#"{"data":{"ping":"pong"}}"#)
            .create_async()
            .await;

        let data: Ping = client(&server.url()).execute("query { ping }", json!({ "x": 1 })).await.unwrap();
        assert_eq!(data.ping, "pong");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_graphql_errors_are_surfaced() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/query")
            .with_status(200)
            .with_body(r#"{"data":null,"errors":[{"message":"name already exists"}]}"#)
            .create_async()
            .await;

        let err = client(&server.url())
            .execute::<Ping>("query { ping }", json!({}))
            .await
            .unwrap_err();
        assert!(matches!(err, GraphQLError::Query(msg) if msg == "name already exists"));
    }

    #[tokio::test]
    async fn test_status_mapping() {
        let mut server = mockito::Server::new_async().await;
        server.mock("POST", "/query").with_status(401).with_body("bad token").create_async().await;

        let err = client(&server.url()).execute::<Ping>("q", json!({})).await.unwrap_err();
        assert!(matches!(err, GraphQLError::Authentication(_)));
    }

    #[tokio::test]
    async fn test_upload_uses_multipart_form() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/query")
            .match_header("content-type", Matcher::Regex("multipart/form-data".to_string()))
            .match_body(Matcher::Regex(r#"name="map""#.to_string()))
            .with_status(200)
            .with_body(r#"{"data":{"ping":"uploaded"}}"#)
            .create_async()
            .await;

        let upload = Upload {
            file_name: "orgs.csv".to_string(),
            content_type: "text/csv".to_string(),
            bytes: b"Name\nacme\n".to_vec(),
        };
        let data: Ping = client(&server.url())
            .upload("mutation($input: Upload!) { ping }", json!({ "input": null }), "variables.input", upload)
            .await
            .unwrap();

        assert_eq!(data.ping, "uploaded");
        mock.assert_async().await;
    }
}
