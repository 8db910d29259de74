// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! HTTP route handlers, one module per resource.

pub mod access_logs;
pub mod appointment_types;
pub mod appointments;
pub mod health;
pub mod patients;
pub mod practices;
pub mod specializations;
pub mod therapists;
pub mod workshifts;

/// Treat empty and whitespace-only strings as absent, matching the
/// presence-check validation rules.
pub(crate) fn non_empty(value: Option<String>) -> Option<String> {
	value.filter(|s| !s.trim().is_empty())
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_non_empty() {
		assert_eq!(non_empty(None), None);
		assert_eq!(non_empty(Some("".to_string())), None);
		assert_eq!(non_empty(Some("   ".to_string())), None);
		assert_eq!(non_empty(Some("x".to_string())), Some("x".to_string()));
	}
}
