// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Health HTTP handlers.

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde::Serialize;
use utoipa::ToSchema;

use crate::api::AppState;

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
	pub status: String,
	pub timestamp: String,
	pub duration_ms: u64,
	pub components: HealthComponents,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct HealthComponents {
	pub database: String,
}

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "System is healthy", body = HealthResponse),
        (status = 503, description = "System is unhealthy", body = HealthResponse)
    ),
    tag = "health"
)]
/// GET /health - Health check endpoint.
pub async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
	let started = tokio::time::Instant::now();

	let database = match sqlx::query("SELECT 1").execute(&state.pool).await {
		Ok(_) => "healthy".to_string(),
		Err(e) => {
			tracing::error!(error = %e, "database health check failed");
			"unhealthy".to_string()
		}
	};

	let healthy = database == "healthy";
	let response = HealthResponse {
		status: if healthy { "healthy" } else { "unhealthy" }.to_string(),
		timestamp: chrono::Utc::now().to_rfc3339(),
		duration_ms: started.elapsed().as_millis() as u64,
		components: HealthComponents { database },
	};

	let http_status = if healthy {
		StatusCode::OK
	} else {
		StatusCode::SERVICE_UNAVAILABLE
	};

	(http_status, Json(response))
}
