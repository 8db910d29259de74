// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Human-readable summaries of response payloads.
//!
//! A summary is a one-line description of what a request touched, derived
//! from the response body when it is JSON and the request succeeded.

/// Entity kinds recognized in request paths, checked in order.
const ENTITY_TYPES: [&str; 6] = [
	"patient",
	"therapist",
	"practice",
	"appointment",
	"specialization",
	"workshift",
];

/// Derive the entity kind from a request path by substring match.
///
/// Paths under `/api/appointmenttype` classify as "appointment"; that is the
/// established summary wording and consumers rely on it.
pub fn entity_type_from_path(path: &str) -> &'static str {
	let path = path.to_lowercase();
	ENTITY_TYPES
		.iter()
		.find(|entity| path.contains(*entity))
		.copied()
		.unwrap_or("unknown")
}

/// Build the data summary for a completed request.
///
/// Non-success statuses get a status marker; successful JSON responses are
/// parsed to count records; anything unparsable falls back to method + path.
pub fn generate_data_summary(
	method: &str,
	path: &str,
	status: u16,
	content_type: Option<&str>,
	body: &[u8],
) -> String {
	let path_lower = path.to_lowercase();
	let method = method.to_uppercase();

	if !(200..400).contains(&status) {
		return format!("{method} {path_lower} - Status: {status}");
	}

	let is_json = content_type
		.map(|ct| ct.contains("application/json"))
		.unwrap_or(false);

	if is_json && !body.is_empty() {
		if let Ok(root) = serde_json::from_slice::<serde_json::Value>(body) {
			let entity = entity_type_from_path(&path_lower);
			if let Some(items) = root.as_array() {
				return format!("Retrieved {} {entity} records", items.len());
			}
			if root.as_object().is_some_and(|obj| obj.contains_key("id")) {
				return format!("Retrieved single {entity} record");
			}
		}
	}

	format!("{method} {path_lower}")
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_entity_type_matches() {
		assert_eq!(entity_type_from_path("/api/patient/42"), "patient");
		assert_eq!(entity_type_from_path("/api/therapist/all"), "therapist");
		assert_eq!(entity_type_from_path("/api/practice"), "practice");
		assert_eq!(entity_type_from_path("/api/specialization/1"), "specialization");
		assert_eq!(entity_type_from_path("/api/workshift"), "workshift");
		assert_eq!(entity_type_from_path("/api/unknown-thing"), "unknown");
	}

	#[test]
	fn test_entity_type_appointment_type_classifies_as_appointment() {
		assert_eq!(entity_type_from_path("/api/appointmenttype/all"), "appointment");
	}

	#[test]
	fn test_entity_type_case_insensitive() {
		assert_eq!(entity_type_from_path("/API/Patient/42"), "patient");
	}

	#[test]
	fn test_summary_for_error_status() {
		let summary = generate_data_summary("GET", "/api/patient/42", 404, None, b"");
		assert_eq!(summary, "GET /api/patient/42 - Status: 404");
	}

	#[test]
	fn test_summary_counts_array_records() {
		let body = br#"[{"id":"1"},{"id":"2"},{"id":"3"},{"id":"4"},{"id":"5"}]"#;
		let summary = generate_data_summary(
			"GET",
			"/api/patient",
			200,
			Some("application/json"),
			body,
		);
		assert_eq!(summary, "Retrieved 5 patient records");
	}

	#[test]
	fn test_summary_single_record_with_id() {
		let body = br#"{"id":"abc","name":"Fysio One"}"#;
		let summary = generate_data_summary(
			"GET",
			"/api/practice/abc",
			200,
			Some("application/json; charset=utf-8"),
			body,
		);
		assert_eq!(summary, "Retrieved single practice record");
	}

	#[test]
	fn test_summary_object_without_id_falls_back() {
		let body = br#"{"message":"ok"}"#;
		let summary =
			generate_data_summary("POST", "/api/patient", 200, Some("application/json"), body);
		assert_eq!(summary, "POST /api/patient");
	}

	#[test]
	fn test_summary_unparsable_json_falls_back() {
		let summary = generate_data_summary(
			"GET",
			"/api/patient",
			200,
			Some("application/json"),
			b"not json at all",
		);
		assert_eq!(summary, "GET /api/patient");
	}

	#[test]
	fn test_summary_non_json_content_type() {
		let summary =
			generate_data_summary("GET", "/api/patient", 200, Some("text/plain"), b"[1,2,3]");
		assert_eq!(summary, "GET /api/patient");
	}

	#[test]
	fn test_summary_lowercases_path_and_uppercases_method() {
		let summary = generate_data_summary("get", "/API/Patient", 500, None, b"");
		assert_eq!(summary, "GET /api/patient - Status: 500");
	}
}
