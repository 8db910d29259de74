// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Appointment type repository for database operations.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use sqlx::{sqlite::SqlitePool, sqlite::SqliteRow, Row};
use uuid::Uuid;

use crate::error::{DbError, Result};
use crate::practice::apply;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppointmentType {
	pub id: String,
	pub name: String,
	pub description: Option<String>,
	pub color: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct NewAppointmentType {
	pub name: String,
	pub description: Option<String>,
	pub color: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct AppointmentTypeUpdate {
	pub name: Option<String>,
	pub description: Option<String>,
	pub color: Option<String>,
}

pub(crate) fn appointment_type_from_row(row: &SqliteRow) -> AppointmentType {
	AppointmentType {
		id: row.get("id"),
		name: row.get("name"),
		description: row.get("description"),
		color: row.get("color"),
	}
}

pub(crate) fn appointment_type_from_prefixed_row(row: &SqliteRow, prefix: &str) -> AppointmentType {
	let col = |name: &str| format!("{prefix}{name}");
	AppointmentType {
		id: row.get(col("id").as_str()),
		name: row.get(col("name").as_str()),
		description: row.get(col("description").as_str()),
		color: row.get(col("color").as_str()),
	}
}

#[derive(Clone)]
pub struct AppointmentTypeRepository {
	pool: SqlitePool,
}

impl AppointmentTypeRepository {
	pub fn new(pool: SqlitePool) -> Self {
		Self { pool }
	}

	#[tracing::instrument(skip(self))]
	pub async fn list(&self) -> Result<Vec<AppointmentType>> {
		let rows =
			sqlx::query("SELECT id, name, description, color FROM appointment_types ORDER BY name")
				.fetch_all(&self.pool)
				.await?;

		Ok(rows.iter().map(appointment_type_from_row).collect())
	}

	#[tracing::instrument(skip(self))]
	pub async fn get(&self, id: &str) -> Result<Option<AppointmentType>> {
		let row =
			sqlx::query("SELECT id, name, description, color FROM appointment_types WHERE id = ?")
				.bind(id)
				.fetch_optional(&self.pool)
				.await?;

		Ok(row.as_ref().map(appointment_type_from_row))
	}

	#[tracing::instrument(skip(self, new))]
	pub async fn create(&self, new: NewAppointmentType) -> Result<AppointmentType> {
		let appointment_type = AppointmentType {
			id: Uuid::new_v4().to_string(),
			name: new.name,
			description: new.description,
			color: new.color,
		};

		sqlx::query(
			"INSERT INTO appointment_types (id, name, description, color, created_at) \
			 VALUES (?, ?, ?, ?, ?)",
		)
		.bind(&appointment_type.id)
		.bind(&appointment_type.name)
		.bind(&appointment_type.description)
		.bind(&appointment_type.color)
		.bind(Utc::now().to_rfc3339())
		.execute(&self.pool)
		.await?;

		Ok(appointment_type)
	}

	#[tracing::instrument(skip(self, update))]
	pub async fn update(&self, id: &str, update: AppointmentTypeUpdate) -> Result<AppointmentType> {
		let mut appointment_type = self
			.get(id)
			.await?
			.ok_or_else(|| DbError::NotFound(format!("Appointment type with ID {id} not found")))?;

		if let Some(name) = update.name {
			appointment_type.name = name;
		}
		apply(&mut appointment_type.description, update.description);
		apply(&mut appointment_type.color, update.color);

		sqlx::query("UPDATE appointment_types SET name = ?, description = ?, color = ? WHERE id = ?")
			.bind(&appointment_type.name)
			.bind(&appointment_type.description)
			.bind(&appointment_type.color)
			.bind(id)
			.execute(&self.pool)
			.await?;

		Ok(appointment_type)
	}

	#[tracing::instrument(skip(self))]
	pub async fn delete(&self, id: &str) -> Result<AppointmentType> {
		let appointment_type = self
			.get(id)
			.await?
			.ok_or_else(|| DbError::NotFound(format!("Appointment type with ID {id} not found")))?;

		sqlx::query("DELETE FROM appointment_types WHERE id = ?")
			.bind(id)
			.execute(&self.pool)
			.await?;

		Ok(appointment_type)
	}

	#[tracing::instrument(skip(self))]
	pub async fn count(&self) -> Result<i64> {
		let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM appointment_types")
			.fetch_one(&self.pool)
			.await?;
		Ok(count)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::testing::create_migrated_test_pool;

	#[tokio::test]
	async fn test_crud_roundtrip() {
		let pool = create_migrated_test_pool().await;
		let repo = AppointmentTypeRepository::new(pool);

		let created = repo
			.create(NewAppointmentType {
				name: "Intake".to_string(),
				description: Some("First consultation".to_string()),
				color: Some("#3366FF".to_string()),
			})
			.await
			.unwrap();

		let fetched = repo.get(&created.id).await.unwrap().unwrap();
		assert_eq!(fetched.name, "Intake");

		let updated = repo
			.update(
				&created.id,
				AppointmentTypeUpdate {
					color: Some("#FF6633".to_string()),
					..Default::default()
				},
			)
			.await
			.unwrap();
		assert_eq!(updated.color.as_deref(), Some("#FF6633"));
		assert_eq!(updated.description.as_deref(), Some("First consultation"));

		repo.delete(&created.id).await.unwrap();
		assert_eq!(repo.count().await.unwrap(), 0);
	}
}
