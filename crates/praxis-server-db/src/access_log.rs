// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Access log repository: the read/cleanup side of the access log store.
//!
//! Writes happen through the access pipeline's sink; this repository serves
//! the query endpoints and the retention cleanup.

use chrono::{DateTime, Utc};
use praxis_server_access::AccessLogEntry;
use sqlx::{sqlite::SqlitePool, sqlite::SqliteRow, Row};

use crate::error::Result;
use crate::workshift::parse_timestamp;

/// Aggregated request statistics for one (method, path) pair.
#[derive(Debug, Clone)]
pub struct AccessLogStats {
	pub http_method: String,
	pub request_path: String,
	pub count: i64,
	pub avg_response_time_ms: f64,
	/// Percentage of requests with status in [200, 400).
	pub success_rate: f64,
}

const ENTRY_COLUMNS: &str = "id, timestamp, ip_address, user_agent, http_method, request_path, \
	 query_string, status_code, response_time_ms, response_size, data_summary, user_id, session_id";

fn entry_from_row(row: &SqliteRow) -> AccessLogEntry {
	let status_code: i64 = row.get("status_code");
	AccessLogEntry {
		id: row.get("id"),
		timestamp: parse_timestamp(row.get("timestamp")),
		ip_address: row.get("ip_address"),
		user_agent: row.get("user_agent"),
		http_method: row.get("http_method"),
		request_path: row.get("request_path"),
		query_string: row.get("query_string"),
		status_code: status_code as u16,
		response_time_ms: row.get("response_time_ms"),
		response_size: row.get("response_size"),
		data_summary: row.get("data_summary"),
		user_id: row.get("user_id"),
		session_id: row.get("session_id"),
	}
}

#[derive(Clone)]
pub struct AccessLogRepository {
	pool: SqlitePool,
}

impl AccessLogRepository {
	pub fn new(pool: SqlitePool) -> Self {
		Self { pool }
	}

	/// One page of entries, newest first, plus the total row count.
	#[tracing::instrument(skip(self))]
	pub async fn list_page(&self, page: i64, page_size: i64) -> Result<(Vec<AccessLogEntry>, i64)> {
		let offset = (page - 1) * page_size;

		let rows = sqlx::query(&format!(
			"SELECT {ENTRY_COLUMNS} FROM access_logs ORDER BY timestamp DESC LIMIT ? OFFSET ?"
		))
		.bind(page_size)
		.bind(offset)
		.fetch_all(&self.pool)
		.await?;

		let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM access_logs")
			.fetch_one(&self.pool)
			.await?;

		Ok((rows.iter().map(entry_from_row).collect(), total))
	}

	#[tracing::instrument(skip(self))]
	pub async fn get(&self, id: &str) -> Result<Option<AccessLogEntry>> {
		let row = sqlx::query(&format!(
			"SELECT {ENTRY_COLUMNS} FROM access_logs WHERE id = ?"
		))
		.bind(id)
		.fetch_optional(&self.pool)
		.await?;

		Ok(row.as_ref().map(entry_from_row))
	}

	/// Entries at or after `since`, newest first, capped at `limit`.
	#[tracing::instrument(skip(self))]
	pub async fn list_since(
		&self,
		since: DateTime<Utc>,
		limit: i64,
	) -> Result<Vec<AccessLogEntry>> {
		let rows = sqlx::query(&format!(
			"SELECT {ENTRY_COLUMNS} FROM access_logs WHERE timestamp >= ? \
			 ORDER BY timestamp DESC LIMIT ?"
		))
		.bind(since.to_rfc3339())
		.bind(limit)
		.fetch_all(&self.pool)
		.await?;

		Ok(rows.iter().map(entry_from_row).collect())
	}

	/// Per-(method, path) counts, mean latency and success rate since `since`,
	/// busiest endpoints first.
	#[tracing::instrument(skip(self))]
	pub async fn stats_since(&self, since: DateTime<Utc>) -> Result<Vec<AccessLogStats>> {
		let rows = sqlx::query(
			r#"
			SELECT http_method, request_path,
				COUNT(*) AS cnt,
				AVG(response_time_ms) AS avg_response_time_ms,
				AVG(CASE WHEN status_code >= 200 AND status_code < 400 THEN 100.0 ELSE 0.0 END)
					AS success_rate
			FROM access_logs
			WHERE timestamp >= ?
			GROUP BY http_method, request_path
			ORDER BY cnt DESC
			"#,
		)
		.bind(since.to_rfc3339())
		.fetch_all(&self.pool)
		.await?;

		Ok(rows
			.iter()
			.map(|row| AccessLogStats {
				http_method: row.get("http_method"),
				request_path: row.get("request_path"),
				count: row.get("cnt"),
				avg_response_time_ms: row.get("avg_response_time_ms"),
				success_rate: row.get("success_rate"),
			})
			.collect())
	}

	/// Filtered search: ip/path by substring, method by case-insensitive
	/// equality, all within the `since` window, newest first.
	#[tracing::instrument(skip(self))]
	pub async fn search(
		&self,
		ip: Option<&str>,
		path: Option<&str>,
		method: Option<&str>,
		since: DateTime<Utc>,
		limit: i64,
	) -> Result<Vec<AccessLogEntry>> {
		let mut conditions = vec!["timestamp >= ?".to_string()];
		if ip.is_some() {
			conditions.push("ip_address LIKE '%' || ? || '%'".to_string());
		}
		if path.is_some() {
			conditions.push("request_path LIKE '%' || ? || '%'".to_string());
		}
		if method.is_some() {
			conditions.push("LOWER(http_method) = LOWER(?)".to_string());
		}
		let where_clause = conditions.join(" AND ");

		let sql = format!(
			"SELECT {ENTRY_COLUMNS} FROM access_logs WHERE {where_clause} \
			 ORDER BY timestamp DESC LIMIT ?"
		);
		let mut query = sqlx::query(&sql).bind(since.to_rfc3339());
		if let Some(v) = ip {
			query = query.bind(v);
		}
		if let Some(v) = path {
			query = query.bind(v);
		}
		if let Some(v) = method {
			query = query.bind(v);
		}
		query = query.bind(limit);

		let rows = query.fetch_all(&self.pool).await?;
		Ok(rows.iter().map(entry_from_row).collect())
	}

	/// Delete entries strictly older than `cutoff`; returns the number of
	/// deleted rows.
	#[tracing::instrument(skip(self))]
	pub async fn delete_older_than(&self, cutoff: DateTime<Utc>) -> Result<u64> {
		let result = sqlx::query("DELETE FROM access_logs WHERE timestamp < ?")
			.bind(cutoff.to_rfc3339())
			.execute(&self.pool)
			.await?;

		Ok(result.rows_affected())
	}

	#[tracing::instrument(skip(self))]
	pub async fn count(&self) -> Result<i64> {
		let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM access_logs")
			.fetch_one(&self.pool)
			.await?;
		Ok(count)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::testing::create_migrated_test_pool;
	use chrono::Duration;
	use uuid::Uuid;

	async fn insert_entry(
		pool: &SqlitePool,
		timestamp: DateTime<Utc>,
		method: &str,
		path: &str,
		status: i64,
		response_time_ms: i64,
		ip: Option<&str>,
	) -> String {
		let id = Uuid::new_v4().to_string();
		sqlx::query(
			"INSERT INTO access_logs (id, timestamp, ip_address, http_method, request_path, \
			 status_code, response_time_ms, created_at) VALUES (?, ?, ?, ?, ?, ?, ?, ?)",
		)
		.bind(&id)
		.bind(timestamp.to_rfc3339())
		.bind(ip)
		.bind(method)
		.bind(path)
		.bind(status)
		.bind(response_time_ms)
		.bind(Utc::now().to_rfc3339())
		.execute(pool)
		.await
		.unwrap();
		id
	}

	#[tokio::test]
	async fn test_list_page_orders_newest_first() {
		let pool = create_migrated_test_pool().await;
		let repo = AccessLogRepository::new(pool.clone());

		let now = Utc::now();
		for i in 0..5 {
			insert_entry(
				&pool,
				now - Duration::minutes(i),
				"GET",
				"/api/patient",
				200,
				5,
				None,
			)
			.await;
		}

		let (page, total) = repo.list_page(1, 2).await.unwrap();
		assert_eq!(page.len(), 2);
		assert_eq!(total, 5);
		assert!(page[0].timestamp >= page[1].timestamp);

		let (page3, _) = repo.list_page(3, 2).await.unwrap();
		assert_eq!(page3.len(), 1);
	}

	#[tokio::test]
	async fn test_get_by_id() {
		let pool = create_migrated_test_pool().await;
		let repo = AccessLogRepository::new(pool.clone());

		let id = insert_entry(&pool, Utc::now(), "GET", "/api/patient", 200, 7, None).await;

		let entry = repo.get(&id).await.unwrap().unwrap();
		assert_eq!(entry.http_method, "GET");
		assert_eq!(entry.status_code, 200);
		assert_eq!(entry.response_time_ms, 7);

		assert!(repo.get("missing").await.unwrap().is_none());
	}

	#[tokio::test]
	async fn test_list_since_respects_window_and_limit() {
		let pool = create_migrated_test_pool().await;
		let repo = AccessLogRepository::new(pool.clone());

		let now = Utc::now();
		insert_entry(&pool, now, "GET", "/api/patient", 200, 5, None).await;
		insert_entry(
			&pool,
			now - Duration::hours(2),
			"GET",
			"/api/patient",
			200,
			5,
			None,
		)
		.await;
		insert_entry(
			&pool,
			now - Duration::hours(30),
			"GET",
			"/api/patient",
			200,
			5,
			None,
		)
		.await;

		let recent = repo
			.list_since(now - Duration::hours(24), 100)
			.await
			.unwrap();
		assert_eq!(recent.len(), 2);

		let limited = repo.list_since(now - Duration::hours(24), 1).await.unwrap();
		assert_eq!(limited.len(), 1);
	}

	#[tokio::test]
	async fn test_stats_groups_and_rates() {
		let pool = create_migrated_test_pool().await;
		let repo = AccessLogRepository::new(pool.clone());

		let now = Utc::now();
		insert_entry(&pool, now, "GET", "/api/patient", 200, 10, None).await;
		insert_entry(&pool, now, "GET", "/api/patient", 404, 30, None).await;
		insert_entry(&pool, now, "POST", "/api/patient", 201, 20, None).await;

		let stats = repo.stats_since(now - Duration::hours(1)).await.unwrap();
		assert_eq!(stats.len(), 2);

		// Busiest first.
		assert_eq!(stats[0].http_method, "GET");
		assert_eq!(stats[0].count, 2);
		assert!((stats[0].avg_response_time_ms - 20.0).abs() < f64::EPSILON);
		assert!((stats[0].success_rate - 50.0).abs() < f64::EPSILON);

		assert_eq!(stats[1].http_method, "POST");
		assert!((stats[1].success_rate - 100.0).abs() < f64::EPSILON);
	}

	#[tokio::test]
	async fn test_search_filters() {
		let pool = create_migrated_test_pool().await;
		let repo = AccessLogRepository::new(pool.clone());

		let now = Utc::now();
		insert_entry(&pool, now, "GET", "/api/patient", 200, 5, Some("1.2.3.4")).await;
		insert_entry(&pool, now, "POST", "/api/therapist", 201, 5, Some("5.6.7.8")).await;

		let since = now - Duration::hours(1);

		let by_ip = repo
			.search(Some("1.2.3"), None, None, since, 500)
			.await
			.unwrap();
		assert_eq!(by_ip.len(), 1);
		assert_eq!(by_ip[0].request_path, "/api/patient");

		let by_path = repo
			.search(None, Some("therapist"), None, since, 500)
			.await
			.unwrap();
		assert_eq!(by_path.len(), 1);

		let by_method = repo
			.search(None, None, Some("post"), since, 500)
			.await
			.unwrap();
		assert_eq!(by_method.len(), 1);
		assert_eq!(by_method[0].http_method, "POST");

		let none = repo
			.search(Some("9.9.9"), None, None, since, 500)
			.await
			.unwrap();
		assert!(none.is_empty());
	}

	#[tokio::test]
	async fn test_delete_older_than_cutoff() {
		let pool = create_migrated_test_pool().await;
		let repo = AccessLogRepository::new(pool.clone());

		let now = Utc::now();
		insert_entry(&pool, now, "GET", "/api/patient", 200, 5, None).await;
		insert_entry(
			&pool,
			now - Duration::days(40),
			"GET",
			"/api/patient",
			200,
			5,
			None,
		)
		.await;
		insert_entry(
			&pool,
			now - Duration::days(50),
			"GET",
			"/api/patient",
			200,
			5,
			None,
		)
		.await;

		let deleted = repo
			.delete_older_than(now - Duration::days(30))
			.await
			.unwrap();
		assert_eq!(deleted, 2);
		assert_eq!(repo.count().await.unwrap(), 1);
	}
}
