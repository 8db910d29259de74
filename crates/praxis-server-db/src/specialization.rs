// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Specialization repository for database operations.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use sqlx::{sqlite::SqlitePool, sqlite::SqliteRow, Row};
use uuid::Uuid;

use crate::error::{DbError, Result};
use crate::practice::apply;
use crate::therapist::{therapist_from_row, Therapist, THERAPIST_COLUMNS};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Specialization {
	pub id: String,
	pub name: String,
	pub description: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct NewSpecialization {
	pub name: String,
	pub description: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct SpecializationUpdate {
	pub name: Option<String>,
	pub description: Option<String>,
}

pub(crate) fn specialization_from_row(row: &SqliteRow) -> Specialization {
	Specialization {
		id: row.get("id"),
		name: row.get("name"),
		description: row.get("description"),
	}
}

#[derive(Clone)]
pub struct SpecializationRepository {
	pool: SqlitePool,
}

impl SpecializationRepository {
	pub fn new(pool: SqlitePool) -> Self {
		Self { pool }
	}

	#[tracing::instrument(skip(self))]
	pub async fn list(&self) -> Result<Vec<Specialization>> {
		let rows = sqlx::query("SELECT id, name, description FROM specializations ORDER BY name")
			.fetch_all(&self.pool)
			.await?;

		Ok(rows.iter().map(specialization_from_row).collect())
	}

	#[tracing::instrument(skip(self))]
	pub async fn get(&self, id: &str) -> Result<Option<Specialization>> {
		let row = sqlx::query("SELECT id, name, description FROM specializations WHERE id = ?")
			.bind(id)
			.fetch_optional(&self.pool)
			.await?;

		Ok(row.as_ref().map(specialization_from_row))
	}

	/// Therapists holding this specialization, via the join table.
	#[tracing::instrument(skip(self))]
	pub async fn therapists_for(&self, id: &str) -> Result<Vec<Therapist>> {
		let rows = sqlx::query(&format!(
			"SELECT {THERAPIST_COLUMNS} FROM therapists t \
			 JOIN therapist_specializations ts ON ts.therapist_id = t.id \
			 WHERE ts.specialization_id = ? ORDER BY t.name"
		))
		.bind(id)
		.fetch_all(&self.pool)
		.await?;

		Ok(rows.iter().map(therapist_from_row).collect())
	}

	#[tracing::instrument(skip(self, new))]
	pub async fn create(&self, new: NewSpecialization) -> Result<Specialization> {
		let specialization = Specialization {
			id: Uuid::new_v4().to_string(),
			name: new.name,
			description: new.description,
		};

		sqlx::query(
			"INSERT INTO specializations (id, name, description, created_at) VALUES (?, ?, ?, ?)",
		)
		.bind(&specialization.id)
		.bind(&specialization.name)
		.bind(&specialization.description)
		.bind(Utc::now().to_rfc3339())
		.execute(&self.pool)
		.await?;

		Ok(specialization)
	}

	#[tracing::instrument(skip(self, update))]
	pub async fn update(&self, id: &str, update: SpecializationUpdate) -> Result<Specialization> {
		let mut specialization = self
			.get(id)
			.await?
			.ok_or_else(|| DbError::NotFound(format!("Specialization with ID {id} not found")))?;

		if let Some(name) = update.name {
			specialization.name = name;
		}
		apply(&mut specialization.description, update.description);

		sqlx::query("UPDATE specializations SET name = ?, description = ? WHERE id = ?")
			.bind(&specialization.name)
			.bind(&specialization.description)
			.bind(id)
			.execute(&self.pool)
			.await?;

		Ok(specialization)
	}

	#[tracing::instrument(skip(self))]
	pub async fn delete(&self, id: &str) -> Result<Specialization> {
		let specialization = self
			.get(id)
			.await?
			.ok_or_else(|| DbError::NotFound(format!("Specialization with ID {id} not found")))?;

		sqlx::query("DELETE FROM specializations WHERE id = ?")
			.bind(id)
			.execute(&self.pool)
			.await?;

		Ok(specialization)
	}

	#[tracing::instrument(skip(self))]
	pub async fn count(&self) -> Result<i64> {
		let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM specializations")
			.fetch_one(&self.pool)
			.await?;
		Ok(count)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::testing::create_migrated_test_pool;
	use crate::therapist::{NewTherapist, TherapistRepository};

	#[tokio::test]
	async fn test_crud_roundtrip() {
		let pool = create_migrated_test_pool().await;
		let repo = SpecializationRepository::new(pool);

		let created = repo
			.create(NewSpecialization {
				name: "Manual Therapy".to_string(),
				description: Some("Joint mobilization".to_string()),
			})
			.await
			.unwrap();

		let updated = repo
			.update(
				&created.id,
				SpecializationUpdate {
					description: Some("Joint and spine mobilization".to_string()),
					..Default::default()
				},
			)
			.await
			.unwrap();
		assert_eq!(updated.name, "Manual Therapy");
		assert_eq!(
			updated.description.as_deref(),
			Some("Joint and spine mobilization")
		);

		repo.delete(&created.id).await.unwrap();
		assert!(repo.get(&created.id).await.unwrap().is_none());
	}

	#[tokio::test]
	async fn test_therapists_for_specialization() {
		let pool = create_migrated_test_pool().await;
		let spec_repo = SpecializationRepository::new(pool.clone());
		let therapist_repo = TherapistRepository::new(pool);

		let spec = spec_repo
			.create(NewSpecialization {
				name: "Sports Rehabilitation".to_string(),
				description: None,
			})
			.await
			.unwrap();

		therapist_repo
			.create(NewTherapist {
				name: "Anna de Vries".to_string(),
				specialization_ids: vec![spec.id.clone()],
				..Default::default()
			})
			.await
			.unwrap();
		therapist_repo
			.create(NewTherapist {
				name: "Bram Jansen".to_string(),
				..Default::default()
			})
			.await
			.unwrap();

		let holders = spec_repo.therapists_for(&spec.id).await.unwrap();
		assert_eq!(holders.len(), 1);
		assert_eq!(holders[0].name, "Anna de Vries");
	}
}
