// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! The mergeable top-level configuration layer.

use serde::Deserialize;

use crate::sections::{
	AccessConfigLayer, DatabaseConfigLayer, HttpConfigLayer, LoggingConfigLayer, SeedConfigLayer,
};

/// Partial server configuration, one instance per source, merged by precedence.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ServerConfigLayer {
	#[serde(default)]
	pub http: Option<HttpConfigLayer>,
	#[serde(default)]
	pub database: Option<DatabaseConfigLayer>,
	#[serde(default)]
	pub logging: Option<LoggingConfigLayer>,
	#[serde(default)]
	pub access: Option<AccessConfigLayer>,
	#[serde(default)]
	pub seed: Option<SeedConfigLayer>,
}

impl ServerConfigLayer {
	/// Merge a higher-precedence layer into this one, field by field.
	pub fn merge(&mut self, other: ServerConfigLayer) {
		merge_section(&mut self.http, other.http, HttpConfigLayer::merge);
		merge_section(&mut self.database, other.database, DatabaseConfigLayer::merge);
		merge_section(&mut self.logging, other.logging, LoggingConfigLayer::merge);
		merge_section(&mut self.access, other.access, AccessConfigLayer::merge);
		merge_section(&mut self.seed, other.seed, SeedConfigLayer::merge);
	}
}

fn merge_section<T>(base: &mut Option<T>, overlay: Option<T>, merge: impl Fn(&mut T, T)) {
	match (base.as_mut(), overlay) {
		(Some(b), Some(o)) => merge(b, o),
		(None, Some(o)) => *base = Some(o),
		_ => {}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_merge_overlay_wins() {
		let mut base = ServerConfigLayer {
			http: Some(HttpConfigLayer {
				host: Some("127.0.0.1".to_string()),
				port: Some(8080),
			}),
			..Default::default()
		};
		base.merge(ServerConfigLayer {
			http: Some(HttpConfigLayer {
				host: None,
				port: Some(9000),
			}),
			..Default::default()
		});

		let http = base.http.unwrap();
		assert_eq!(http.host, Some("127.0.0.1".to_string()));
		assert_eq!(http.port, Some(9000));
	}

	#[test]
	fn test_merge_fills_missing_section() {
		let mut base = ServerConfigLayer::default();
		base.merge(ServerConfigLayer {
			database: Some(DatabaseConfigLayer {
				url: Some("sqlite::memory:".to_string()),
			}),
			..Default::default()
		});
		assert_eq!(
			base.database.unwrap().url,
			Some("sqlite::memory:".to_string())
		);
	}
}
