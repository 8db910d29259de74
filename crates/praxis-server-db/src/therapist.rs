// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Therapist repository for database operations.
//!
//! Therapists link to specializations and practices through join tables;
//! the repository validates referenced ids on write and exposes the id
//! lists the flattened wire representation needs.

use std::collections::HashSet;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use sqlx::{sqlite::SqlitePool, sqlite::SqliteRow, Row};
use uuid::Uuid;

use crate::error::{DbError, Result};
use crate::practice::{apply, practice_from_row, Practice, PRACTICE_COLUMNS};
use crate::specialization::{specialization_from_row, Specialization};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Therapist {
	pub id: String,
	pub name: String,
	pub phone_number: Option<String>,
	pub email: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct NewTherapist {
	pub name: String,
	pub phone_number: Option<String>,
	pub email: Option<String>,
	pub specialization_ids: Vec<String>,
	pub practice_ids: Vec<String>,
}

#[derive(Debug, Clone, Default)]
pub struct TherapistUpdate {
	pub name: Option<String>,
	pub phone_number: Option<String>,
	pub email: Option<String>,
	/// Replaces the full specialization link set when present.
	pub specialization_ids: Option<Vec<String>>,
	/// Replaces the full practice link set when present.
	pub practice_ids: Option<Vec<String>>,
}

pub(crate) const THERAPIST_COLUMNS: &str = "t.id, t.name, t.phone_number, t.email";

pub(crate) fn therapist_from_row(row: &SqliteRow) -> Therapist {
	Therapist {
		id: row.get("id"),
		name: row.get("name"),
		phone_number: row.get("phone_number"),
		email: row.get("email"),
	}
}

pub(crate) fn therapist_from_prefixed_row(row: &SqliteRow, prefix: &str) -> Therapist {
	let col = |name: &str| format!("{prefix}{name}");
	Therapist {
		id: row.get(col("id").as_str()),
		name: row.get(col("name").as_str()),
		phone_number: row.get(col("phone_number").as_str()),
		email: row.get(col("email").as_str()),
	}
}

#[derive(Clone)]
pub struct TherapistRepository {
	pool: SqlitePool,
}

impl TherapistRepository {
	pub fn new(pool: SqlitePool) -> Self {
		Self { pool }
	}

	#[tracing::instrument(skip(self))]
	pub async fn list(&self) -> Result<Vec<Therapist>> {
		let rows = sqlx::query(&format!(
			"SELECT {THERAPIST_COLUMNS} FROM therapists t ORDER BY t.name"
		))
		.fetch_all(&self.pool)
		.await?;

		Ok(rows.iter().map(therapist_from_row).collect())
	}

	#[tracing::instrument(skip(self))]
	pub async fn get(&self, id: &str) -> Result<Option<Therapist>> {
		let row = sqlx::query(&format!(
			"SELECT {THERAPIST_COLUMNS} FROM therapists t WHERE t.id = ?"
		))
		.bind(id)
		.fetch_optional(&self.pool)
		.await?;

		Ok(row.as_ref().map(therapist_from_row))
	}

	#[tracing::instrument(skip(self, new))]
	pub async fn create(&self, new: NewTherapist) -> Result<Therapist> {
		self
			.verify_references(&new.specialization_ids, &new.practice_ids)
			.await?;

		let therapist = Therapist {
			id: Uuid::new_v4().to_string(),
			name: new.name,
			phone_number: new.phone_number,
			email: new.email,
		};

		let mut tx = self.pool.begin().await?;

		sqlx::query(
			"INSERT INTO therapists (id, name, phone_number, email, created_at) \
			 VALUES (?, ?, ?, ?, ?)",
		)
		.bind(&therapist.id)
		.bind(&therapist.name)
		.bind(&therapist.phone_number)
		.bind(&therapist.email)
		.bind(Utc::now().to_rfc3339())
		.execute(&mut *tx)
		.await?;

		for specialization_id in &new.specialization_ids {
			sqlx::query(
				"INSERT INTO therapist_specializations (therapist_id, specialization_id) \
				 VALUES (?, ?)",
			)
			.bind(&therapist.id)
			.bind(specialization_id)
			.execute(&mut *tx)
			.await?;
		}

		for practice_id in &new.practice_ids {
			sqlx::query(
				"INSERT INTO therapist_practices (therapist_id, practice_id) VALUES (?, ?)",
			)
			.bind(&therapist.id)
			.bind(practice_id)
			.execute(&mut *tx)
			.await?;
		}

		tx.commit().await?;

		Ok(therapist)
	}

	/// Apply a partial update; id lists, when present, replace the link sets.
	#[tracing::instrument(skip(self, update))]
	pub async fn update(&self, id: &str, update: TherapistUpdate) -> Result<Therapist> {
		let mut therapist = self
			.get(id)
			.await?
			.ok_or_else(|| DbError::NotFound(format!("Therapist with ID {id} not found")))?;

		let specialization_ids = update.specialization_ids.clone().unwrap_or_default();
		let practice_ids = update.practice_ids.clone().unwrap_or_default();
		self
			.verify_references(&specialization_ids, &practice_ids)
			.await?;

		if let Some(name) = update.name {
			therapist.name = name;
		}
		apply(&mut therapist.phone_number, update.phone_number);
		apply(&mut therapist.email, update.email);

		let mut tx = self.pool.begin().await?;

		sqlx::query("UPDATE therapists SET name = ?, phone_number = ?, email = ? WHERE id = ?")
			.bind(&therapist.name)
			.bind(&therapist.phone_number)
			.bind(&therapist.email)
			.bind(id)
			.execute(&mut *tx)
			.await?;

		if update.specialization_ids.is_some() {
			sqlx::query("DELETE FROM therapist_specializations WHERE therapist_id = ?")
				.bind(id)
				.execute(&mut *tx)
				.await?;
			for specialization_id in &specialization_ids {
				sqlx::query(
					"INSERT INTO therapist_specializations (therapist_id, specialization_id) \
					 VALUES (?, ?)",
				)
				.bind(id)
				.bind(specialization_id)
				.execute(&mut *tx)
				.await?;
			}
		}

		if update.practice_ids.is_some() {
			sqlx::query("DELETE FROM therapist_practices WHERE therapist_id = ?")
				.bind(id)
				.execute(&mut *tx)
				.await?;
			for practice_id in &practice_ids {
				sqlx::query(
					"INSERT INTO therapist_practices (therapist_id, practice_id) VALUES (?, ?)",
				)
				.bind(id)
				.bind(practice_id)
				.execute(&mut *tx)
				.await?;
			}
		}

		tx.commit().await?;

		Ok(therapist)
	}

	#[tracing::instrument(skip(self))]
	pub async fn delete(&self, id: &str) -> Result<Therapist> {
		let therapist = self
			.get(id)
			.await?
			.ok_or_else(|| DbError::NotFound(format!("Therapist with ID {id} not found")))?;

		let mut tx = self.pool.begin().await?;
		sqlx::query("DELETE FROM therapist_specializations WHERE therapist_id = ?")
			.bind(id)
			.execute(&mut *tx)
			.await?;
		sqlx::query("DELETE FROM therapist_practices WHERE therapist_id = ?")
			.bind(id)
			.execute(&mut *tx)
			.await?;
		sqlx::query("DELETE FROM therapists WHERE id = ?")
			.bind(id)
			.execute(&mut *tx)
			.await?;
		tx.commit().await?;

		Ok(therapist)
	}

	#[tracing::instrument(skip(self))]
	pub async fn specialization_ids_for(&self, id: &str) -> Result<Vec<String>> {
		let rows = sqlx::query(
			"SELECT specialization_id FROM therapist_specializations WHERE therapist_id = ? \
			 ORDER BY specialization_id",
		)
		.bind(id)
		.fetch_all(&self.pool)
		.await?;

		Ok(rows.iter().map(|r| r.get("specialization_id")).collect())
	}

	#[tracing::instrument(skip(self))]
	pub async fn practice_ids_for(&self, id: &str) -> Result<Vec<String>> {
		let rows = sqlx::query(
			"SELECT practice_id FROM therapist_practices WHERE therapist_id = ? \
			 ORDER BY practice_id",
		)
		.bind(id)
		.fetch_all(&self.pool)
		.await?;

		Ok(rows.iter().map(|r| r.get("practice_id")).collect())
	}

	#[tracing::instrument(skip(self))]
	pub async fn specializations_for(&self, id: &str) -> Result<Vec<Specialization>> {
		let rows = sqlx::query(
			"SELECT s.id, s.name, s.description FROM specializations s \
			 JOIN therapist_specializations ts ON ts.specialization_id = s.id \
			 WHERE ts.therapist_id = ? ORDER BY s.name",
		)
		.bind(id)
		.fetch_all(&self.pool)
		.await?;

		Ok(rows.iter().map(specialization_from_row).collect())
	}

	#[tracing::instrument(skip(self))]
	pub async fn practices_for(&self, id: &str) -> Result<Vec<Practice>> {
		let columns = PRACTICE_COLUMNS
			.split(", ")
			.map(|c| format!("p.{c}"))
			.collect::<Vec<_>>()
			.join(", ");
		let rows = sqlx::query(&format!(
			"SELECT {columns} FROM practices p \
			 JOIN therapist_practices tp ON tp.practice_id = p.id \
			 WHERE tp.therapist_id = ? ORDER BY p.name"
		))
		.bind(id)
		.fetch_all(&self.pool)
		.await?;

		Ok(rows.iter().map(practice_from_row).collect())
	}

	#[tracing::instrument(skip(self))]
	pub async fn count(&self) -> Result<i64> {
		let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM therapists")
			.fetch_one(&self.pool)
			.await?;
		Ok(count)
	}

	async fn verify_references(
		&self,
		specialization_ids: &[String],
		practice_ids: &[String],
	) -> Result<()> {
		let missing = self
			.missing_ids("specializations", specialization_ids)
			.await?;
		if !missing.is_empty() {
			return Err(DbError::InvalidReference(format!(
				"Specialization(s) not found: {}",
				missing.join(", ")
			)));
		}

		let missing = self.missing_ids("practices", practice_ids).await?;
		if !missing.is_empty() {
			return Err(DbError::InvalidReference(format!(
				"Practice(s) not found: {}",
				missing.join(", ")
			)));
		}

		Ok(())
	}

	async fn missing_ids(&self, table: &str, ids: &[String]) -> Result<Vec<String>> {
		if ids.is_empty() {
			return Ok(Vec::new());
		}

		let placeholders = vec!["?"; ids.len()].join(", ");
		let sql = format!("SELECT id FROM {table} WHERE id IN ({placeholders})");
		let mut query = sqlx::query(&sql);
		for id in ids {
			query = query.bind(id);
		}

		let rows = query.fetch_all(&self.pool).await?;
		let found: HashSet<String> = rows.iter().map(|r| r.get("id")).collect();

		Ok(ids
			.iter()
			.filter(|id| !found.contains(*id))
			.cloned()
			.collect())
	}
}
