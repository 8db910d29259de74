// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! The access log record and its builder.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One recorded HTTP request/response pair.
///
/// Created once per non-excluded request, persisted asynchronously after the
/// response has been sent, and never mutated afterwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccessLogEntry {
	pub id: String,
	/// UTC instant of request start.
	pub timestamp: DateTime<Utc>,
	pub ip_address: Option<String>,
	pub user_agent: Option<String>,
	pub http_method: String,
	pub request_path: String,
	pub query_string: Option<String>,
	pub status_code: u16,
	pub response_time_ms: i64,
	/// Byte length of the buffered response body.
	pub response_size: Option<i64>,
	/// Brief description of what data was accessed.
	pub data_summary: Option<String>,
	/// Reserved for a future authentication layer; never populated today.
	pub user_id: Option<String>,
	pub session_id: Option<String>,
}

impl AccessLogEntry {
	pub fn builder(http_method: impl Into<String>, request_path: impl Into<String>) -> Builder {
		Builder::new(http_method, request_path)
	}

	/// Whether the response status falls in the [200, 400) success window.
	pub fn is_successful(&self) -> bool {
		(200..400).contains(&self.status_code)
	}
}

/// Builder for [`AccessLogEntry`].
///
/// `id` and `timestamp` are fixed at construction so the timestamp reflects
/// request start, not the moment the response was observed.
#[derive(Debug)]
pub struct Builder {
	entry: AccessLogEntry,
}

impl Builder {
	fn new(http_method: impl Into<String>, request_path: impl Into<String>) -> Self {
		Self {
			entry: AccessLogEntry {
				id: Uuid::new_v4().to_string(),
				timestamp: Utc::now(),
				ip_address: None,
				user_agent: None,
				http_method: http_method.into(),
				request_path: request_path.into(),
				query_string: None,
				status_code: 0,
				response_time_ms: 0,
				response_size: None,
				data_summary: None,
				user_id: None,
				session_id: None,
			},
		}
	}

	pub fn ip_address(mut self, ip: Option<String>) -> Self {
		self.entry.ip_address = ip;
		self
	}

	pub fn user_agent(mut self, user_agent: Option<String>) -> Self {
		self.entry.user_agent = user_agent;
		self
	}

	pub fn query_string(mut self, query: Option<String>) -> Self {
		self.entry.query_string = query;
		self
	}

	pub fn status_code(mut self, status: u16) -> Self {
		self.entry.status_code = status;
		self
	}

	pub fn response_time_ms(mut self, millis: i64) -> Self {
		self.entry.response_time_ms = millis;
		self
	}

	pub fn response_size(mut self, size: i64) -> Self {
		self.entry.response_size = Some(size);
		self
	}

	pub fn data_summary(mut self, summary: impl Into<String>) -> Self {
		self.entry.data_summary = Some(summary.into());
		self
	}

	pub fn session_id(mut self, session_id: Option<String>) -> Self {
		self.entry.session_id = session_id;
		self
	}

	pub fn build(self) -> AccessLogEntry {
		self.entry
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_builder_defaults() {
		let entry = AccessLogEntry::builder("GET", "/api/patient").build();
		assert_eq!(entry.http_method, "GET");
		assert_eq!(entry.request_path, "/api/patient");
		assert!(entry.ip_address.is_none());
		assert!(entry.user_id.is_none());
		assert!(!entry.id.is_empty());
	}

	#[test]
	fn test_is_successful_window() {
		let entry = |status| {
			AccessLogEntry::builder("GET", "/")
				.status_code(status)
				.build()
		};
		assert!(entry(200).is_successful());
		assert!(entry(201).is_successful());
		assert!(entry(399).is_successful());
		assert!(!entry(199).is_successful());
		assert!(!entry(400).is_successful());
		assert!(!entry(500).is_successful());
	}

	#[test]
	fn test_builder_distinct_ids() {
		let a = AccessLogEntry::builder("GET", "/").build();
		let b = AccessLogEntry::builder("GET", "/").build();
		assert_ne!(a.id, b.id);
	}
}
