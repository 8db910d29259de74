// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Practice repository for database operations.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use sqlx::{sqlite::SqlitePool, sqlite::SqliteRow, Row};
use uuid::Uuid;

use crate::error::{DbError, Result};

/// A physiotherapy practice location.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Practice {
	pub id: String,
	pub name: String,
	pub address: Option<String>,
	pub postal_code: Option<String>,
	pub city: Option<String>,
	pub country: Option<String>,
	pub phone_number: Option<String>,
	pub email: Option<String>,
	pub website: Option<String>,
	pub color: Option<String>,
}

/// Fields for creating a practice; the id is generated by the repository.
#[derive(Debug, Clone, Default)]
pub struct NewPractice {
	pub name: String,
	pub address: Option<String>,
	pub postal_code: Option<String>,
	pub city: Option<String>,
	pub country: Option<String>,
	pub phone_number: Option<String>,
	pub email: Option<String>,
	pub website: Option<String>,
	pub color: Option<String>,
}

/// Partial update; only provided fields overwrite existing values.
#[derive(Debug, Clone, Default)]
pub struct PracticeUpdate {
	pub name: Option<String>,
	pub address: Option<String>,
	pub postal_code: Option<String>,
	pub city: Option<String>,
	pub country: Option<String>,
	pub phone_number: Option<String>,
	pub email: Option<String>,
	pub website: Option<String>,
	pub color: Option<String>,
}

pub(crate) fn practice_from_row(row: &SqliteRow) -> Practice {
	Practice {
		id: row.get("id"),
		name: row.get("name"),
		address: row.get("address"),
		postal_code: row.get("postal_code"),
		city: row.get("city"),
		country: row.get("country"),
		phone_number: row.get("phone_number"),
		email: row.get("email"),
		website: row.get("website"),
		color: row.get("color"),
	}
}

pub(crate) fn practice_from_prefixed_row(row: &SqliteRow, prefix: &str) -> Practice {
	let col = |name: &str| format!("{prefix}{name}");
	Practice {
		id: row.get(col("id").as_str()),
		name: row.get(col("name").as_str()),
		address: row.get(col("address").as_str()),
		postal_code: row.get(col("postal_code").as_str()),
		city: row.get(col("city").as_str()),
		country: row.get(col("country").as_str()),
		phone_number: row.get(col("phone_number").as_str()),
		email: row.get(col("email").as_str()),
		website: row.get(col("website").as_str()),
		color: row.get(col("color").as_str()),
	}
}

pub(crate) const PRACTICE_COLUMNS: &str =
	"id, name, address, postal_code, city, country, phone_number, email, website, color";

#[derive(Clone)]
pub struct PracticeRepository {
	pool: SqlitePool,
}

impl PracticeRepository {
	pub fn new(pool: SqlitePool) -> Self {
		Self { pool }
	}

	#[tracing::instrument(skip(self))]
	pub async fn list(&self) -> Result<Vec<Practice>> {
		let rows = sqlx::query(&format!(
			"SELECT {PRACTICE_COLUMNS} FROM practices ORDER BY name"
		))
		.fetch_all(&self.pool)
		.await?;

		Ok(rows.iter().map(practice_from_row).collect())
	}

	#[tracing::instrument(skip(self))]
	pub async fn get(&self, id: &str) -> Result<Option<Practice>> {
		let row = sqlx::query(&format!(
			"SELECT {PRACTICE_COLUMNS} FROM practices WHERE id = ?"
		))
		.bind(id)
		.fetch_optional(&self.pool)
		.await?;

		Ok(row.as_ref().map(practice_from_row))
	}

	#[tracing::instrument(skip(self, new))]
	pub async fn create(&self, new: NewPractice) -> Result<Practice> {
		let practice = Practice {
			id: Uuid::new_v4().to_string(),
			name: new.name,
			address: new.address,
			postal_code: new.postal_code,
			city: new.city,
			country: new.country,
			phone_number: new.phone_number,
			email: new.email,
			website: new.website,
			color: new.color,
		};

		sqlx::query(
			r#"
			INSERT INTO practices (
				id, name, address, postal_code, city, country,
				phone_number, email, website, color, created_at
			) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
			"#,
		)
		.bind(&practice.id)
		.bind(&practice.name)
		.bind(&practice.address)
		.bind(&practice.postal_code)
		.bind(&practice.city)
		.bind(&practice.country)
		.bind(&practice.phone_number)
		.bind(&practice.email)
		.bind(&practice.website)
		.bind(&practice.color)
		.bind(Utc::now().to_rfc3339())
		.execute(&self.pool)
		.await?;

		Ok(practice)
	}

	/// Apply a partial update, returning the updated row or `NotFound`.
	#[tracing::instrument(skip(self, update))]
	pub async fn update(&self, id: &str, update: PracticeUpdate) -> Result<Practice> {
		let mut practice = self
			.get(id)
			.await?
			.ok_or_else(|| DbError::NotFound(format!("Practice with ID {id} not found")))?;

		if let Some(name) = update.name {
			practice.name = name;
		}
		apply(&mut practice.address, update.address);
		apply(&mut practice.postal_code, update.postal_code);
		apply(&mut practice.city, update.city);
		apply(&mut practice.country, update.country);
		apply(&mut practice.phone_number, update.phone_number);
		apply(&mut practice.email, update.email);
		apply(&mut practice.website, update.website);
		apply(&mut practice.color, update.color);

		sqlx::query(
			r#"
			UPDATE practices SET
				name = ?, address = ?, postal_code = ?, city = ?, country = ?,
				phone_number = ?, email = ?, website = ?, color = ?
			WHERE id = ?
			"#,
		)
		.bind(&practice.name)
		.bind(&practice.address)
		.bind(&practice.postal_code)
		.bind(&practice.city)
		.bind(&practice.country)
		.bind(&practice.phone_number)
		.bind(&practice.email)
		.bind(&practice.website)
		.bind(&practice.color)
		.bind(id)
		.execute(&self.pool)
		.await?;

		Ok(practice)
	}

	/// Delete a practice, returning the deleted row or `NotFound`.
	#[tracing::instrument(skip(self))]
	pub async fn delete(&self, id: &str) -> Result<Practice> {
		let practice = self
			.get(id)
			.await?
			.ok_or_else(|| DbError::NotFound(format!("Practice with ID {id} not found")))?;

		sqlx::query("DELETE FROM practices WHERE id = ?")
			.bind(id)
			.execute(&self.pool)
			.await?;

		Ok(practice)
	}

	#[tracing::instrument(skip(self))]
	pub async fn count(&self) -> Result<i64> {
		let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM practices")
			.fetch_one(&self.pool)
			.await?;
		Ok(count)
	}
}

pub(crate) fn apply(target: &mut Option<String>, value: Option<String>) {
	if value.is_some() {
		*target = value;
	}
}
