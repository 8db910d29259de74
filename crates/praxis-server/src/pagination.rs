// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Shared pagination utilities for API handlers.

#[derive(Debug, Clone, Default, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageParams {
	pub page: Option<i64>,
	pub page_size: Option<i64>,
}

impl PageParams {
	pub fn page_or_default(&self) -> i64 {
		self.page.unwrap_or(1).max(1)
	}

	pub fn page_size_clamped(&self, default: i64, max: i64) -> i64 {
		self.page_size.unwrap_or(default).min(max).max(1)
	}
}

/// Total pages for a row count at the given page size.
pub fn total_pages(total_count: i64, page_size: i64) -> i64 {
	if total_count == 0 {
		0
	} else {
		(total_count + page_size - 1) / page_size
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_defaults() {
		let params = PageParams::default();
		assert_eq!(params.page_or_default(), 1);
		assert_eq!(params.page_size_clamped(50, 1000), 50);
	}

	#[test]
	fn test_clamping() {
		let params = PageParams {
			page: Some(0),
			page_size: Some(2000),
		};
		assert_eq!(params.page_or_default(), 1);
		assert_eq!(params.page_size_clamped(50, 1000), 1000);

		let params = PageParams {
			page: Some(3),
			page_size: Some(0),
		};
		assert_eq!(params.page_or_default(), 3);
		assert_eq!(params.page_size_clamped(50, 1000), 1);
	}

	#[test]
	fn test_total_pages() {
		assert_eq!(total_pages(0, 50), 0);
		assert_eq!(total_pages(1, 50), 1);
		assert_eq!(total_pages(50, 50), 1);
		assert_eq!(total_pages(51, 50), 2);
	}
}
