// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Periodic access log retention cleanup.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use praxis_server_config::MIN_RETENTION_DAYS;
use praxis_server_db::{AccessLogRepository, DbError};
use tokio::sync::broadcast;
use tokio::task::JoinHandle;

pub struct RetentionJob {
	repository: Arc<AccessLogRepository>,
	retention_days: u32,
}

impl RetentionJob {
	pub fn new(repository: Arc<AccessLogRepository>, retention_days: u32) -> Self {
		Self {
			repository,
			// The 7-day floor holds even if configuration validation is bypassed.
			retention_days: retention_days.max(MIN_RETENTION_DAYS),
		}
	}

	/// Delete entries older than the retention window; returns the count.
	#[tracing::instrument(skip(self))]
	pub async fn run_once(&self) -> Result<u64, DbError> {
		let cutoff = Utc::now() - chrono::Duration::days(i64::from(self.retention_days));
		let deleted = self.repository.delete_older_than(cutoff).await?;

		tracing::info!(
			deleted = deleted,
			retention_days = self.retention_days,
			"access log retention cleanup completed"
		);

		Ok(deleted)
	}

	/// Run the cleanup on `interval` until the shutdown channel fires.
	pub fn spawn(
		self,
		interval: Duration,
		mut shutdown_rx: broadcast::Receiver<()>,
	) -> JoinHandle<()> {
		tokio::spawn(async move {
			loop {
				tokio::select! {
					_ = tokio::time::sleep(interval) => {
						if let Err(e) = self.run_once().await {
							tracing::error!(error = %e, "access log retention cleanup failed");
						}
					}
					_ = shutdown_rx.recv() => {
						tracing::info!("shutting down retention job");
						break;
					}
				}
			}
		})
	}
}
