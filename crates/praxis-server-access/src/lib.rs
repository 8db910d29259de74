// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Access logging pipeline for the Praxis server.
//!
//! Provides the [`AccessLogEntry`] record, summary generation for response
//! payloads, and the queue-fronted [`AccessLogService`] that persists entries
//! off the request path.

pub mod entry;
pub mod error;
pub mod service;
pub mod summary;

pub use entry::AccessLogEntry;
pub use error::AccessLogSinkError;
pub use service::{AccessLogService, AccessLogSink, SqliteAccessLogSink};
pub use summary::{entity_type_from_path, generate_data_summary};
