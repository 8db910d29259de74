// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Asynchronous persistence of access log entries.
//!
//! Entries are handed to a bounded queue and drained by a single background
//! worker that owns its own database handle, so request handling never waits
//! on the write and request-scoped resources are never touched after the
//! response has been sent. A full queue drops the newest entry.

use std::sync::Arc;

use async_trait::async_trait;
use sqlx::SqlitePool;
use tokio::sync::mpsc;
use tracing::{instrument, warn};

use crate::entry::AccessLogEntry;
use crate::error::AccessLogSinkError;

/// Destination for access log entries.
#[async_trait]
pub trait AccessLogSink: Send + Sync {
	fn name(&self) -> &str;

	async fn persist(&self, entry: &AccessLogEntry) -> Result<(), AccessLogSinkError>;
}

/// Queue-fronted access logging service.
pub struct AccessLogService {
	tx: mpsc::Sender<AccessLogEntry>,
}

impl AccessLogService {
	pub fn new(sink: Arc<dyn AccessLogSink>, queue_capacity: usize) -> Self {
		let (tx, rx) = mpsc::channel(queue_capacity);

		tokio::spawn(Self::worker(rx, sink));

		Self { tx }
	}

	async fn worker(mut rx: mpsc::Receiver<AccessLogEntry>, sink: Arc<dyn AccessLogSink>) {
		while let Some(entry) = rx.recv().await {
			if let Err(e) = sink.persist(&entry).await {
				warn!(
					sink = sink.name(),
					entry_id = %entry.id,
					error = %e,
					"failed to persist access log entry"
				);
			}
		}
	}

	/// Enqueue an entry for background persistence.
	///
	/// Returns `true` if queued, `false` if the queue was full and the entry
	/// was dropped.
	#[instrument(skip(self, entry), fields(method = %entry.http_method, path = %entry.request_path))]
	pub fn record(&self, entry: AccessLogEntry) -> bool {
		let queued = self.tx.try_send(entry).is_ok();
		if !queued {
			warn!("access log queue full, dropping entry");
		}
		queued
	}
}

/// SQLite sink backed by its own connection pool handle.
pub struct SqliteAccessLogSink {
	pool: SqlitePool,
	name: String,
}

impl SqliteAccessLogSink {
	pub fn new(pool: SqlitePool) -> Self {
		Self {
			pool,
			name: "sqlite".to_string(),
		}
	}
}

#[async_trait]
impl AccessLogSink for SqliteAccessLogSink {
	fn name(&self) -> &str {
		&self.name
	}

	async fn persist(&self, entry: &AccessLogEntry) -> Result<(), AccessLogSinkError> {
		let now = chrono::Utc::now();

		sqlx::query(
			r#"
			INSERT INTO access_logs (
				id, timestamp, ip_address, user_agent, http_method, request_path,
				query_string, status_code, response_time_ms, response_size,
				data_summary, user_id, session_id, created_at
			) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
			"#,
		)
		.bind(&entry.id)
		.bind(entry.timestamp.to_rfc3339())
		.bind(&entry.ip_address)
		.bind(&entry.user_agent)
		.bind(&entry.http_method)
		.bind(&entry.request_path)
		.bind(&entry.query_string)
		.bind(entry.status_code as i64)
		.bind(entry.response_time_ms)
		.bind(entry.response_size)
		.bind(&entry.data_summary)
		.bind(&entry.user_id)
		.bind(&entry.session_id)
		.bind(now.to_rfc3339())
		.execute(&self.pool)
		.await
		.map_err(|e| {
			if is_transient_error(&e) {
				AccessLogSinkError::Transient(format!("database error: {e}"))
			} else {
				AccessLogSinkError::Permanent(format!("database error: {e}"))
			}
		})?;

		Ok(())
	}
}

fn is_transient_error(e: &sqlx::Error) -> bool {
	match e {
		sqlx::Error::Io(_) => true,
		sqlx::Error::PoolTimedOut => true,
		sqlx::Error::PoolClosed => true,
		sqlx::Error::Database(db_err) => {
			let msg = db_err.message().to_lowercase();
			msg.contains("busy") || msg.contains("locked") || msg.contains("timeout")
		}
		_ => false,
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use std::sync::atomic::{AtomicUsize, Ordering};
	use tokio::time::{sleep, Duration};

	struct CountingSink {
		persisted: Arc<AtomicUsize>,
	}

	impl CountingSink {
		fn new() -> Self {
			Self {
				persisted: Arc::new(AtomicUsize::new(0)),
			}
		}

		fn count(&self) -> usize {
			self.persisted.load(Ordering::SeqCst)
		}
	}

	#[async_trait]
	impl AccessLogSink for CountingSink {
		fn name(&self) -> &str {
			"counting"
		}

		async fn persist(&self, _entry: &AccessLogEntry) -> Result<(), AccessLogSinkError> {
			self.persisted.fetch_add(1, Ordering::SeqCst);
			Ok(())
		}
	}

	struct FailingSink;

	#[async_trait]
	impl AccessLogSink for FailingSink {
		fn name(&self) -> &str {
			"failing"
		}

		async fn persist(&self, _entry: &AccessLogEntry) -> Result<(), AccessLogSinkError> {
			Err(AccessLogSinkError::Transient("test error".to_string()))
		}
	}

	struct SlowSink;

	#[async_trait]
	impl AccessLogSink for SlowSink {
		fn name(&self) -> &str {
			"slow"
		}

		async fn persist(&self, _entry: &AccessLogEntry) -> Result<(), AccessLogSinkError> {
			sleep(Duration::from_secs(60)).await;
			Ok(())
		}
	}

	fn sample_entry() -> AccessLogEntry {
		AccessLogEntry::builder("GET", "/api/patient")
			.status_code(200)
			.response_time_ms(5)
			.build()
	}

	#[tokio::test]
	async fn test_record_drains_to_sink() {
		let sink = Arc::new(CountingSink::new());
		let service = AccessLogService::new(Arc::clone(&sink) as Arc<dyn AccessLogSink>, 100);

		assert!(service.record(sample_entry()));
		assert!(service.record(sample_entry()));

		sleep(Duration::from_millis(50)).await;
		assert_eq!(sink.count(), 2);
	}

	#[tokio::test]
	async fn test_sink_failure_is_swallowed() {
		let service = AccessLogService::new(Arc::new(FailingSink), 100);

		assert!(service.record(sample_entry()));
		sleep(Duration::from_millis(50)).await;
		// The worker stays alive after a failed persist.
		assert!(service.record(sample_entry()));
	}

	#[tokio::test]
	async fn test_full_queue_drops_newest() {
		// Capacity 1 with a sink that never completes: the first entry is
		// pulled into the worker, the second fills the queue slot, the third
		// has nowhere to go.
		let service = AccessLogService::new(Arc::new(SlowSink), 1);

		service.record(sample_entry());
		sleep(Duration::from_millis(20)).await;
		service.record(sample_entry());
		assert!(!service.record(sample_entry()));
	}
}
