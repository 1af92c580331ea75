// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

use crate::application::projector::project;
use crate::application::provisioning::ProvisioningService;
use crate::domain::error::{ProvisionError, ProvisioningFailure};
use crate::domain::organization::{ErrorReply, OrganizationReply, OrganizationRequest};
use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use metrics_exporter_prometheus::PrometheusHandle;
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tower_http::trace::TraceLayer;

pub const INVALID_INPUT: &str = "INVALID_INPUT";

pub struct AppState {
    pub provisioning: Arc<dyn ProvisioningService>,
    pub metrics: Option<PrometheusHandle>,
    /// Deadline for a single provisioning request
    pub request_timeout: Option<Duration>,
}

pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/livez", get(health))
        .route("/readyz", get(health))
        .route("/metrics", get(render_metrics))
        .route("/v1/organization", post(create_organization))
        .layer(TraceLayer::new_for_http())
        .with_state(Arc::new(state))
}

async fn health() -> impl IntoResponse {
    Json(json!({ "status": "UP" }))
}

async fn render_metrics(State(state): State<Arc<AppState>>) -> Response {
    match &state.metrics {
        Some(handle) => handle.render().into_response(),
        None => (StatusCode::NOT_FOUND, "metrics recorder not installed").into_response(),
    }
}

async fn create_organization(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<OrganizationRequest>, JsonRejection>,
) -> Response {
    let Json(request) = match payload {
        Ok(payload) => payload,
        Err(rejection) => {
            tracing::debug!("Rejected organization payload: {}", rejection.body_text());
            let reply = ErrorReply::new(rejection.body_text()).with_code(INVALID_INPUT);
            return (StatusCode::BAD_REQUEST, Json(reply)).into_response();
        }
    };

    let cancel = CancellationToken::new();
    // Cancels in-flight creation if the client goes away.
    let _guard = cancel.clone().drop_guard();

    let provision = state.provisioning.provision(request, cancel.clone());
    tokio::pin!(provision);

    let result = match state.request_timeout {
        Some(timeout) => tokio::select! {
            result = &mut provision => result,
            _ = tokio::time::sleep(timeout) => {
                cancel.cancel();
                provision.await
            }
        },
        None => provision.await,
    };

    match result {
        Ok(reply) => (StatusCode::OK, Json(reply)).into_response(),
        Err(failure) => failure_response(failure),
    }
}

fn failure_response(failure: ProvisioningFailure) -> Response {
    let status = match &failure.error {
        ProvisionError::Validation(_) => StatusCode::BAD_REQUEST,
        ProvisionError::RemoteCreation { .. } => StatusCode::BAD_REQUEST,
        ProvisionError::Cancelled { .. } => StatusCode::GATEWAY_TIMEOUT,
    };

    let mut reply = ErrorReply::new(failure.error.to_string());
    if failure.error.is_validation() {
        reply = reply.with_code(INVALID_INPUT);
    }
    // The partial tree is not a successful provisioning.
    let partial = failure.partial.as_ref().map(|tree| OrganizationReply {
        success: false,
        ..project(tree)
    });
    let reply = reply.with_partial(partial);

    (status, Json(reply)).into_response()
}
