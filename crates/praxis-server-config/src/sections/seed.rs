// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Startup seeding configuration.

use serde::Deserialize;

/// Seeding configuration (runtime, fully resolved).
#[derive(Debug, Clone)]
pub struct SeedConfig {
	/// Whether baseline reference and demo data is inserted on startup.
	pub enabled: bool,
}

impl Default for SeedConfig {
	fn default() -> Self {
		Self { enabled: true }
	}
}

/// Seeding configuration layer (partial, for merging).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SeedConfigLayer {
	#[serde(default)]
	pub enabled: Option<bool>,
}

impl SeedConfigLayer {
	pub fn merge(&mut self, other: SeedConfigLayer) {
		if other.enabled.is_some() {
			self.enabled = other.enabled;
		}
	}

	pub fn finalize(self) -> SeedConfig {
		SeedConfig {
			enabled: self.enabled.unwrap_or(true),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_enabled_by_default() {
		assert!(SeedConfigLayer::default().finalize().enabled);
	}

	#[test]
	fn test_disable() {
		let layer = SeedConfigLayer {
			enabled: Some(false),
		};
		assert!(!layer.finalize().enabled);
	}
}
