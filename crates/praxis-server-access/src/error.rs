// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

#[derive(Debug, thiserror::Error)]
pub enum AccessLogSinkError {
	/// The sink may succeed on a later entry (pool exhaustion, lock contention).
	#[error("transient sink error: {0}")]
	Transient(String),

	/// The entry can never be written (serialization, constraint violation).
	#[error("permanent sink error: {0}")]
	Permanent(String),
}
