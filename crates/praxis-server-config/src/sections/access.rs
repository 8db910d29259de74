// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Access logging configuration section.

use serde::Deserialize;

/// Minimum permitted retention before bulk cleanup may touch a row.
pub const MIN_RETENTION_DAYS: u32 = 7;

fn default_excluded_paths() -> Vec<String> {
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

/// Access logging configuration (runtime, fully resolved).
#[derive(Debug, Clone)]
pub struct AccessConfig {
	/// Capacity of the bounded queue feeding the persistence worker.
	pub queue_capacity: usize,
	/// Age in days beyond which the retention job deletes entries.
	pub retention_days: u32,
	/// Request path fragments that bypass access logging entirely.
	pub excluded_paths: Vec<String>,
}

impl Default for AccessConfig {
	fn default() -> Self {
		Self {
			queue_capacity: 10_000,
			retention_days: 90,
			excluded_paths: default_excluded_paths(),
		}
	}
}

/// Access logging configuration layer (partial, for merging).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AccessConfigLayer {
	#[serde(default)]
	pub queue_capacity: Option<usize>,
	#[serde(default)]
	pub retention_days: Option<u32>,
	#[serde(default)]
	pub excluded_paths: Option<Vec<String>>,
}

impl AccessConfigLayer {
	pub fn merge(&mut self, other: AccessConfigLayer) {
		if other.queue_capacity.is_some() {
			self.queue_capacity = other.queue_capacity;
		}
		if other.retention_days.is_some() {
			self.retention_days = other.retention_days;
		}
		if other.excluded_paths.is_some() {
			self.excluded_paths = other.excluded_paths;
		}
	}

	pub fn finalize(self) -> AccessConfig {
		AccessConfig {
			queue_capacity: self.queue_capacity.unwrap_or(10_000),
			retention_days: self.retention_days.unwrap_or(90),
			excluded_paths: self.excluded_paths.unwrap_or_else(default_excluded_paths),
		}
	}
}
