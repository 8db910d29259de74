// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePool, SqliteSynchronous};
use std::str::FromStr;

use crate::error::DbError;

/// Create a SqlitePool with WAL mode and common settings.
///
/// # Arguments
/// * `database_url` - SQLite connection string (e.g., "sqlite:./praxis.db")
///
/// # Errors
/// Returns `DbError::Internal` if the URL is invalid or connection fails.
#[tracing::instrument(skip(database_url))]
pub async fn create_pool(database_url: &str) -> Result<SqlitePool, DbError> {
	let options = SqliteConnectOptions::from_str(database_url)
		.map_err(|e| DbError::Internal(format!("Invalid database URL: {e}")))?
		.journal_mode(SqliteJournalMode::Wal)
		.synchronous(SqliteSynchronous::Normal)
		.create_if_missing(true);

	let pool = SqlitePool::connect_with(options).await?;

	tracing::debug!("database pool created");
	Ok(pool)
}

/// Create all tables and indexes if they do not exist yet.
///
/// Statements are idempotent, so running migrations on every startup is safe.
#[tracing::instrument(skip(pool))]
pub async fn run_migrations(pool: &SqlitePool) -> Result<(), DbError> {
	let statements = [
		r#"
		CREATE TABLE IF NOT EXISTS practices (
			id TEXT PRIMARY KEY,
			name TEXT NOT NULL,
			address TEXT,
			postal_code TEXT,
			city TEXT,
			country TEXT,
			phone_number TEXT,
			email TEXT,
			website TEXT,
			color TEXT,
			created_at TEXT NOT NULL
		)
		"#,
		r#"
		CREATE TABLE IF NOT EXISTS patients (
			id TEXT PRIMARY KEY,
			first_name TEXT NOT NULL,
			last_name TEXT NOT NULL,
			initials TEXT,
			date_of_birth TEXT,
			email TEXT,
			phone_number TEXT,
			address TEXT,
			postal_code TEXT,
			city TEXT,
			country TEXT,
			created_at TEXT NOT NULL
		)
		"#,
		r#"
		CREATE TABLE IF NOT EXISTS specializations (
			id TEXT PRIMARY KEY,
			name TEXT NOT NULL,
			description TEXT,
			created_at TEXT NOT NULL
		)
		"#,
		r#"
		CREATE TABLE IF NOT EXISTS appointment_types (
			id TEXT PRIMARY KEY,
			name TEXT NOT NULL,
			description TEXT,
			color TEXT,
			created_at TEXT NOT NULL
		)
		"#,
		r#"
		CREATE TABLE IF NOT EXISTS therapists (
			id TEXT PRIMARY KEY,
			name TEXT NOT NULL,
			phone_number TEXT,
			email TEXT,
			created_at TEXT NOT NULL
		)
		"#,
		r#"
		CREATE TABLE IF NOT EXISTS therapist_specializations (
			therapist_id TEXT NOT NULL REFERENCES therapists(id) ON DELETE CASCADE,
			specialization_id TEXT NOT NULL REFERENCES specializations(id) ON DELETE CASCADE,
			PRIMARY KEY (therapist_id, specialization_id)
		)
		"#,
		r#"
		CREATE TABLE IF NOT EXISTS therapist_practices (
			therapist_id TEXT NOT NULL REFERENCES therapists(id) ON DELETE CASCADE,
			practice_id TEXT NOT NULL REFERENCES practices(id) ON DELETE CASCADE,
			PRIMARY KEY (therapist_id, practice_id)
		)
		"#,
		r#"
		CREATE TABLE IF NOT EXISTS workshifts (
			id TEXT PRIMARY KEY,
			therapist_id TEXT NOT NULL REFERENCES therapists(id),
			practice_id TEXT NOT NULL REFERENCES practices(id),
			start_time TEXT NOT NULL,
			end_time TEXT NOT NULL,
			created_at TEXT NOT NULL
		)
		"#,
		r#"
		CREATE TABLE IF NOT EXISTS appointments (
			id TEXT PRIMARY KEY,
			patient_id TEXT NOT NULL REFERENCES patients(id),
			therapist_id TEXT NOT NULL REFERENCES therapists(id),
			practice_id TEXT NOT NULL REFERENCES practices(id),
			appointment_type_id TEXT NOT NULL REFERENCES appointment_types(id),
			start_time TEXT NOT NULL,
			end_time TEXT NOT NULL,
			notes TEXT,
			created_at TEXT NOT NULL
		)
		"#,
		r#"
		CREATE TABLE IF NOT EXISTS access_logs (
			id TEXT PRIMARY KEY,
			timestamp TEXT NOT NULL,
			ip_address TEXT,
			user_agent TEXT,
			http_method TEXT NOT NULL,
			request_path TEXT NOT NULL,
			query_string TEXT,
			status_code INTEGER NOT NULL,
			response_time_ms INTEGER NOT NULL,
			response_size INTEGER,
			data_summary TEXT,
			user_id TEXT,
			session_id TEXT,
			created_at TEXT NOT NULL
		)
		"#,
		"CREATE INDEX IF NOT EXISTS idx_access_logs_timestamp ON access_logs(timestamp)",
		"CREATE INDEX IF NOT EXISTS idx_workshifts_therapist ON workshifts(therapist_id)",
		"CREATE INDEX IF NOT EXISTS idx_workshifts_practice ON workshifts(practice_id)",
		"CREATE INDEX IF NOT EXISTS idx_appointments_therapist ON appointments(therapist_id)",
		"CREATE INDEX IF NOT EXISTS idx_appointments_patient ON appointments(patient_id)",
	];

	for statement in statements {
		sqlx::query(statement).execute(pool).await?;
	}

	tracing::debug!("database migrations applied");
	Ok(())
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::testing::create_test_pool;

	#[tokio::test]
	async fn test_migrations_are_idempotent() {
		let pool = create_test_pool().await;
		run_migrations(&pool).await.unwrap();
		run_migrations(&pool).await.unwrap();
	}

	#[tokio::test]
	async fn test_migrations_create_expected_tables() {
		let pool = create_test_pool().await;
		run_migrations(&pool).await.unwrap();

		for table in [
			"practices",
			"patients",
			"specializations",
			"appointment_types",
			"therapists",
			"therapist_specializations",
			"therapist_practices",
			"workshifts",
			"appointments",
			"access_logs",
		] {
			let count: i64 = sqlx::query_scalar(
				"SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = ?",
			)
			.bind(table)
			.fetch_one(&pool)
			.await
			.unwrap();
			assert_eq!(count, 1, "missing table {table}");
		}
	}

	#[tokio::test]
	async fn test_create_pool_with_file() {
		let dir = tempfile::tempdir().unwrap();
		let db_path = dir.path().join("test.db");
		let url = format!("sqlite:{}?mode=rwc", db_path.display());
		let pool = create_pool(&url).await.unwrap();
		run_migrations(&pool).await.unwrap();
	}
}
