// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

use canopy_core::domain::organization::{ErrorReply, OrganizationReply, OrganizationRequest};
use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
    /// Non-2xx reply from the API
    #[error("unable to process request (status {status}){}", request_body(.body))]
    Request { status: u16, body: String },

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Failed to parse response: {0}")]
    Decode(String),
}

fn request_body(body: &str) -> String {
    let body = body.trim();
    if body.is_empty() {
        String::new()
    } else {
        format!(": {}", body.to_lowercase())
    }
}

impl ClientError {
    /// The structured error body, when the API sent one.
    pub fn error_reply(&self) -> Option<ErrorReply> {
        match self {
            ClientError::Request { body, .. } => serde_json::from_str(body).ok(),
            _ => None,
        }
    }
}

/// Client for interacting with the Canopy API.
pub struct CanopyClient {
    base_url: String,
    client: Client,
    api_key: Option<String>,
}

impl CanopyClient {
    /// Create a new Canopy client.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client: Client::new(),
            api_key: None,
        }
    }

    /// Set the API key for authentication.
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Provision an organization hierarchy.
    pub async fn create_organization(&self, request: &OrganizationRequest) -> Result<OrganizationReply, ClientError> {
        let url = format!("{}/v1/organization", self.base_url);
        tracing::debug!("POST {}", url);

        let response = self.authorized(self.client.post(&url).json(request)).send().await?;
        decode(response).await
    }

    /// Check that the API is up.
    pub async fn health(&self) -> Result<(), ClientError> {
        let url = format!("{}/livez", self.base_url);
        let response = self.client.get(&url).send().await?;
        check_status(response).await.map(|_| ())
    }

    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.api_key {
            Some(key) => request.header("Authorization", format!("Bearer {}", key)),
            None => request,
        }
    }
}

async fn check_status(response: Response) -> Result<Response, ClientError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    Err(ClientError::Request {
        status: status.as_u16(),
        body,
    })
}

async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ClientError> {
    let bytes = check_status(response).await?.bytes().await?;
    serde_json::from_slice(&bytes).map_err(|e| ClientError::Decode(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Matcher;
    use serde_json::json;

    #[tokio::test]
    async fn test_create_organization() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/v1/organization")
            .match_header("authorization", "Bearer tola_key")
            .match_body(Matcher::Json(json!({ "name": "Acme", "environments": ["prod"] })))
            .with_status(200)
            .with_body(
                r#"{"success":true,"id":"01HROOT","name":"Acme","environments":[
                    {"id":"01HENV","name":"prod","buckets":[{"id":"01HB","name":"assets","relations":[]}]}]}"#,
            )
            .create_async()
            .await;

        let client = CanopyClient::new(server.url()).with_api_key("tola_key");
        let request = OrganizationRequest {
            environments: vec!["prod".to_string()],
            ..OrganizationRequest::named("Acme")
        };
        let reply = client.create_organization(&request).await.unwrap();

        assert_eq!(reply.id, "01HROOT");
        assert_eq!(reply.environments[0].buckets[0].name, "assets");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_request_error_message() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/v1/organization")
            .with_status(400)
            .with_body(r#"{"success":false,"error":"Missing Required Field: name","code":"INVALID_INPUT"}"#)
            .create_async()
            .await;

        let err = CanopyClient::new(server.url())
            .create_organization(&OrganizationRequest::default())
            .await
            .unwrap_err();

        assert_eq!(
            err.to_string(),
            r#"unable to process request (status 400): {"success":false,"error":"missing required field: name","code":"invalid_input"}"#
        );
        assert_eq!(err.error_reply().unwrap().code.as_deref(), Some("INVALID_INPUT"));
    }

    #[test]
    fn test_request_error_without_body() {
        let err = ClientError::Request {
            status: 502,
            body: String::new(),
        };
        assert_eq!(err.to_string(), "unable to process request (status 502)");
    }

    #[tokio::test]
    async fn test_health() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/livez")
            .with_status(200)
            .with_body(r#"{"status":"UP"}"#)
            .create_async()
            .await;

        CanopyClient::new(server.url()).health().await.unwrap();
    }
}
