// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Server-level error type mapping to HTTP responses.
//!
//! Handlers return `Result<_, ServerError>` and let the conversion from
//! `DbError` pick the status: missing rows become 404, dangling references
//! become 400, everything else an opaque 500 with the detail logged
//! server-side only.

use axum::{
	http::StatusCode,
	response::{IntoResponse, Response},
};
use praxis_server_db::DbError;

#[derive(Debug, thiserror::Error)]
pub enum ServerError {
	#[error("{0}")]
	NotFound(String),

	#[error("{0}")]
	BadRequest(String),

	#[error("Internal: {0}")]
	Internal(String),
}

impl ServerError {
	pub fn not_found(message: impl Into<String>) -> Self {
		Self::NotFound(message.into())
	}

	pub fn bad_request(message: impl Into<String>) -> Self {
		Self::BadRequest(message.into())
	}
}

impl From<DbError> for ServerError {
	fn from(e: DbError) -> Self {
		match e {
			DbError::NotFound(msg) => ServerError::NotFound(msg),
			DbError::InvalidReference(msg) => ServerError::BadRequest(msg),
			other => ServerError::Internal(other.to_string()),
		}
	}
}

impl IntoResponse for ServerError {
	fn into_response(self) -> Response {
		match self {
			ServerError::NotFound(message) => (StatusCode::NOT_FOUND, message).into_response(),
			ServerError::BadRequest(message) => (StatusCode::BAD_REQUEST, message).into_response(),
			ServerError::Internal(detail) => {
				tracing::error!(error = %detail, "internal server error");
				(
					StatusCode::INTERNAL_SERVER_ERROR,
					"Internal server error".to_string(),
				)
					.into_response()
			}
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_db_not_found_maps_to_404() {
		let err: ServerError = DbError::NotFound("patient x".to_string()).into();
		assert!(matches!(err, ServerError::NotFound(_)));
	}

	#[test]
	fn test_db_invalid_reference_maps_to_400() {
		let err: ServerError = DbError::InvalidReference("Practice x".to_string()).into();
		assert!(matches!(err, ServerError::BadRequest(_)));
	}

	#[test]
	fn test_db_internal_maps_to_500() {
		let err: ServerError = DbError::Internal("boom".to_string()).into();
		assert!(matches!(err, ServerError::Internal(_)));
	}

	#[test]
	fn test_internal_response_is_opaque() {
		let response = ServerError::Internal("secret detail".to_string()).into_response();
		assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
	}
}
