// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Workshift repository for database operations.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{sqlite::SqlitePool, sqlite::SqliteRow, Row};
use uuid::Uuid;

use crate::error::{DbError, Result};
use crate::practice::{practice_from_prefixed_row, Practice};
use crate::therapist::{therapist_from_prefixed_row, Therapist};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Workshift {
	pub id: String,
	pub therapist_id: String,
	pub practice_id: String,
	pub start_time: DateTime<Utc>,
	pub end_time: DateTime<Utc>,
}

/// A workshift with its referenced rows resolved, for flattened wire
/// projections.
#[derive(Debug, Clone)]
pub struct WorkshiftDetail {
	pub id: String,
	pub start_time: DateTime<Utc>,
	pub end_time: DateTime<Utc>,
	pub therapist: Therapist,
	pub practice: Practice,
}

#[derive(Debug, Clone)]
pub struct NewWorkshift {
	pub therapist_id: String,
	pub practice_id: String,
	pub start_time: DateTime<Utc>,
	pub end_time: DateTime<Utc>,
}

#[derive(Debug, Clone, Default)]
pub struct WorkshiftUpdate {
	pub therapist_id: Option<String>,
	pub practice_id: Option<String>,
	pub start_time: Option<DateTime<Utc>>,
	pub end_time: Option<DateTime<Utc>>,
}

/// Conjunctive filters for the timespan query endpoint.
#[derive(Debug, Clone, Default)]
pub struct WorkshiftFilter {
	pub therapist_id: Option<String>,
	pub practice_id: Option<String>,
	pub start: Option<DateTime<Utc>>,
	pub end: Option<DateTime<Utc>>,
}

pub(crate) fn parse_timestamp(value: String) -> DateTime<Utc> {
	DateTime::parse_from_rfc3339(&value)
		.map(|dt| dt.with_timezone(&Utc))
		.unwrap_or_else(|_| Utc::now())
}

const DETAIL_COLUMNS: &str = "w.id, w.start_time, w.end_time, \
	 t.id AS t_id, t.name AS t_name, t.phone_number AS t_phone_number, t.email AS t_email, \
	 p.id AS p_id, p.name AS p_name, p.address AS p_address, p.postal_code AS p_postal_code, \
	 p.city AS p_city, p.country AS p_country, p.phone_number AS p_phone_number, \
	 p.email AS p_email, p.website AS p_website, p.color AS p_color";

const DETAIL_JOINS: &str = "FROM workshifts w \
	 JOIN therapists t ON t.id = w.therapist_id \
	 JOIN practices p ON p.id = w.practice_id";

fn detail_from_row(row: &SqliteRow) -> WorkshiftDetail {
	WorkshiftDetail {
		id: row.get("id"),
		start_time: parse_timestamp(row.get("start_time")),
		end_time: parse_timestamp(row.get("end_time")),
		therapist: therapist_from_prefixed_row(row, "t_"),
		practice: practice_from_prefixed_row(row, "p_"),
	}
}

fn workshift_from_row(row: &SqliteRow) -> Workshift {
	Workshift {
		id: row.get("id"),
		therapist_id: row.get("therapist_id"),
		practice_id: row.get("practice_id"),
		start_time: parse_timestamp(row.get("start_time")),
		end_time: parse_timestamp(row.get("end_time")),
	}
}

#[derive(Clone)]
pub struct WorkshiftRepository {
	pool: SqlitePool,
}

impl WorkshiftRepository {
	pub fn new(pool: SqlitePool) -> Self {
		Self { pool }
	}

	#[tracing::instrument(skip(self))]
	pub async fn list(&self) -> Result<Vec<WorkshiftDetail>> {
		let rows = sqlx::query(&format!(
			"SELECT {DETAIL_COLUMNS} {DETAIL_JOINS} ORDER BY w.start_time"
		))
		.fetch_all(&self.pool)
		.await?;

		Ok(rows.iter().map(detail_from_row).collect())
	}

	#[tracing::instrument(skip(self))]
	pub async fn get(&self, id: &str) -> Result<Option<Workshift>> {
		let row = sqlx::query(
			"SELECT id, therapist_id, practice_id, start_time, end_time \
			 FROM workshifts WHERE id = ?",
		)
		.bind(id)
		.fetch_optional(&self.pool)
		.await?;

		Ok(row.as_ref().map(workshift_from_row))
	}

	#[tracing::instrument(skip(self))]
	pub async fn get_detail(&self, id: &str) -> Result<Option<WorkshiftDetail>> {
		let row = sqlx::query(&format!(
			"SELECT {DETAIL_COLUMNS} {DETAIL_JOINS} WHERE w.id = ?"
		))
		.bind(id)
		.fetch_optional(&self.pool)
		.await?;

		Ok(row.as_ref().map(detail_from_row))
	}

	/// Workshifts matching the optional, conjunctive filters.
	#[tracing::instrument(skip(self, filter))]
	pub async fn query(&self, filter: WorkshiftFilter) -> Result<Vec<WorkshiftDetail>> {
		let mut conditions = vec!["1=1".to_string()];
		if filter.therapist_id.is_some() {
			conditions.push("w.therapist_id = ?".to_string());
		}
		if filter.practice_id.is_some() {
			conditions.push("w.practice_id = ?".to_string());
		}
		if filter.start.is_some() {
			conditions.push("w.start_time >= ?".to_string());
		}
		if filter.end.is_some() {
			conditions.push("w.end_time <= ?".to_string());
		}
		let where_clause = conditions.join(" AND ");

		let sql = format!(
			"SELECT {DETAIL_COLUMNS} {DETAIL_JOINS} WHERE {where_clause} ORDER BY w.start_time"
		);
		let mut query = sqlx::query(&sql);
		if let Some(v) = &filter.therapist_id {
			query = query.bind(v);
		}
		if let Some(v) = &filter.practice_id {
			query = query.bind(v);
		}
		if let Some(v) = filter.start {
			query = query.bind(v.to_rfc3339());
		}
		if let Some(v) = filter.end {
			query = query.bind(v.to_rfc3339());
		}

		let rows = query.fetch_all(&self.pool).await?;
		Ok(rows.iter().map(detail_from_row).collect())
	}

	#[tracing::instrument(skip(self, new))]
	pub async fn create(&self, new: NewWorkshift) -> Result<WorkshiftDetail> {
		self
			.verify_references(&new.therapist_id, &new.practice_id)
			.await?;

		let id = Uuid::new_v4().to_string();

		sqlx::query(
			"INSERT INTO workshifts (id, therapist_id, practice_id, start_time, end_time, created_at) \
			 VALUES (?, ?, ?, ?, ?, ?)",
		)
		.bind(&id)
		.bind(&new.therapist_id)
		.bind(&new.practice_id)
		.bind(new.start_time.to_rfc3339())
		.bind(new.end_time.to_rfc3339())
		.bind(Utc::now().to_rfc3339())
		.execute(&self.pool)
		.await?;

		self
			.get_detail(&id)
			.await?
			.ok_or_else(|| DbError::Internal(format!("workshift {id} missing after insert")))
	}

	#[tracing::instrument(skip(self, update))]
	pub async fn update(&self, id: &str, update: WorkshiftUpdate) -> Result<WorkshiftDetail> {
		let mut workshift = self
			.get(id)
			.await?
			.ok_or_else(|| DbError::NotFound(format!("Workshift with ID {id} not found")))?;

		if let Some(therapist_id) = update.therapist_id {
			workshift.therapist_id = therapist_id;
		}
		if let Some(practice_id) = update.practice_id {
			workshift.practice_id = practice_id;
		}
		if let Some(start_time) = update.start_time {
			workshift.start_time = start_time;
		}
		if let Some(end_time) = update.end_time {
			workshift.end_time = end_time;
		}

		self
			.verify_references(&workshift.therapist_id, &workshift.practice_id)
			.await?;

		sqlx::query(
			"UPDATE workshifts SET therapist_id = ?, practice_id = ?, start_time = ?, end_time = ? \
			 WHERE id = ?",
		)
		.bind(&workshift.therapist_id)
		.bind(&workshift.practice_id)
		.bind(workshift.start_time.to_rfc3339())
		.bind(workshift.end_time.to_rfc3339())
		.bind(id)
		.execute(&self.pool)
		.await?;

		self
			.get_detail(id)
			.await?
			.ok_or_else(|| DbError::Internal(format!("workshift {id} missing after update")))
	}

	#[tracing::instrument(skip(self))]
	pub async fn delete(&self, id: &str) -> Result<WorkshiftDetail> {
		let detail = self
			.get_detail(id)
			.await?
			.ok_or_else(|| DbError::NotFound(format!("Workshift with ID {id} not found")))?;

		sqlx::query("DELETE FROM workshifts WHERE id = ?")
			.bind(id)
			.execute(&self.pool)
			.await?;

		Ok(detail)
	}

	async fn verify_references(&self, therapist_id: &str, practice_id: &str) -> Result<()> {
		let therapist_exists: i64 =
			sqlx::query_scalar("SELECT COUNT(*) FROM therapists WHERE id = ?")
				.bind(therapist_id)
				.fetch_one(&self.pool)
				.await?;
		if therapist_exists == 0 {
			return Err(DbError::InvalidReference(format!(
				"Therapist with ID {therapist_id} not found"
			)));
		}

		let practice_exists: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM practices WHERE id = ?")
			.bind(practice_id)
			.fetch_one(&self.pool)
			.await?;
		if practice_exists == 0 {
			return Err(DbError::InvalidReference(format!(
				"Practice with ID {practice_id} not found"
			)));
		}

		Ok(())
	}
}
