// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Access-logging middleware.
//!
//! Wraps every request: filters excluded paths, times the downstream
//! handler, buffers the response body to measure and summarize it, then
//! replays the bytes to the client unchanged. The completed entry goes to
//! the queue-fronted access log service so the client never waits on the
//! database write.

use std::time::Instant;

use axum::{
	body::Body,
	extract::{Request, State},
	http::{header::CONTENT_TYPE, StatusCode},
	middleware::Next,
	response::{IntoResponse, Response},
};
use praxis_server_access::{generate_data_summary, AccessLogEntry};

use crate::{api::AppState, client_info};

/// Paths matching any configured fragment bypass logging entirely. The
/// access-log endpoints themselves are excluded to avoid recursive logging.
pub fn should_skip_logging(path: &str, excluded_paths: &[String]) -> bool {
	let path = path.to_lowercase();
	excluded_paths
		.iter()
		.any(|fragment| path.contains(&fragment.to_lowercase()))
}

pub async fn access_log_middleware(
	State(state): State<AppState>,
	request: Request,
	next: Next,
) -> Response {
	let path = request.uri().path().to_string();
	if should_skip_logging(&path, &state.excluded_paths) {
		return next.run(request).await;
	}

	let method = request.method().to_string();
	let ip_address = client_info::client_ip(&request);
	let builder = AccessLogEntry::builder(&method, &path)
		.ip_address(Some(ip_address.clone()))
		.user_agent(client_info::user_agent(&request))
		.query_string(request.uri().query().map(str::to_string))
		.session_id(client_info::session_id(&request));

	let started = Instant::now();
	let response = next.run(request).await;
	let elapsed_ms = started.elapsed().as_millis() as i64;

	let (parts, body) = response.into_parts();
	let bytes = match axum::body::to_bytes(body, usize::MAX).await {
		Ok(bytes) => bytes,
		Err(e) => {
			tracing::error!(error = %e, %method, %path, "failed to buffer response body");
			return StatusCode::INTERNAL_SERVER_ERROR.into_response();
		}
	};

	let status = parts.status.as_u16();
	let content_type = parts
		.headers
		.get(CONTENT_TYPE)
		.and_then(|value| value.to_str().ok());
	let summary = generate_data_summary(&method, &path, status, content_type, &bytes);

	let entry = builder
		.status_code(status)
		.response_time_ms(elapsed_ms)
		.response_size(bytes.len() as i64)
		.data_summary(summary)
		.build();

	state.access_log.record(entry);

	tracing::info!(
		method = %method,
		path = %path,
		status = status,
		duration_ms = elapsed_ms,
		ip = %ip_address,
		"API access"
	);

	Response::from_parts(parts, Body::from(bytes))
}

#[cfg(test)]
mod tests {
	use super::*;

	fn excluded() -> Vec<String> {
		[
			"/swagger",
			"/health",
			"/favicon",
			"/_framework",
			"/api/accesslog",
		]
		.iter()
		.map(|s| s.to_string())
		.collect()
	}

	#[test]
	fn test_skips_configured_fragments() {
		let excluded = excluded();
		assert!(should_skip_logging("/health", &excluded));
		assert!(should_skip_logging("/swagger-ui/index.html", &excluded));
		assert!(should_skip_logging("/favicon.ico", &excluded));
		assert!(should_skip_logging("/_framework/blazor.js", &excluded));
		assert!(should_skip_logging("/api/accesslog/all", &excluded));
	}

	#[test]
	fn test_skip_is_case_insensitive() {
		let excluded = excluded();
		assert!(should_skip_logging("/Health", &excluded));
		assert!(should_skip_logging("/API/AccessLog/recent", &excluded));
	}

	#[test]
	fn test_entity_paths_are_logged() {
		let excluded = excluded();
		assert!(!should_skip_logging("/api/patient", &excluded));
		assert!(!should_skip_logging("/api/therapist/42", &excluded));
	}
}
