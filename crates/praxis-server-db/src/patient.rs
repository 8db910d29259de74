// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Patient repository for database operations.

use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{sqlite::SqlitePool, sqlite::SqliteRow, Row};
use uuid::Uuid;

use crate::error::{DbError, Result};
use crate::practice::apply;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Patient {
	pub id: String,
	pub first_name: String,
	pub last_name: String,
	pub initials: Option<String>,
	pub date_of_birth: Option<NaiveDate>,
	pub email: Option<String>,
	pub phone_number: Option<String>,
	pub address: Option<String>,
	pub postal_code: Option<String>,
	pub city: Option<String>,
	pub country: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct NewPatient {
	pub first_name: String,
	pub last_name: String,
	pub initials: Option<String>,
	pub date_of_birth: Option<NaiveDate>,
	pub email: Option<String>,
	pub phone_number: Option<String>,
	pub address: Option<String>,
	pub postal_code: Option<String>,
	pub city: Option<String>,
	pub country: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct PatientUpdate {
	pub first_name: Option<String>,
	pub last_name: Option<String>,
	pub initials: Option<String>,
	pub date_of_birth: Option<NaiveDate>,
	pub email: Option<String>,
	pub phone_number: Option<String>,
	pub address: Option<String>,
	pub postal_code: Option<String>,
	pub city: Option<String>,
	pub country: Option<String>,
}

pub(crate) const PATIENT_COLUMNS: &str = "id, first_name, last_name, initials, date_of_birth, \
	 email, phone_number, address, postal_code, city, country";

pub(crate) fn patient_from_row(row: &SqliteRow) -> Patient {
	let dob: Option<String> = row.get("date_of_birth");
	Patient {
		id: row.get("id"),
		first_name: row.get("first_name"),
		last_name: row.get("last_name"),
		initials: row.get("initials"),
		date_of_birth: dob.and_then(|s| NaiveDate::parse_from_str(&s, "%Y-%m-%d").ok()),
		email: row.get("email"),
		phone_number: row.get("phone_number"),
		address: row.get("address"),
		postal_code: row.get("postal_code"),
		city: row.get("city"),
		country: row.get("country"),
	}
}

pub(crate) fn patient_from_prefixed_row(row: &SqliteRow, prefix: &str) -> Patient {
	let col = |name: &str| format!("{prefix}{name}");
	let dob: Option<String> = row.get(col("date_of_birth").as_str());
	Patient {
		id: row.get(col("id").as_str()),
		first_name: row.get(col("first_name").as_str()),
		last_name: row.get(col("last_name").as_str()),
		initials: row.get(col("initials").as_str()),
		date_of_birth: dob.and_then(|s| NaiveDate::parse_from_str(&s, "%Y-%m-%d").ok()),
		email: row.get(col("email").as_str()),
		phone_number: row.get(col("phone_number").as_str()),
		address: row.get(col("address").as_str()),
		postal_code: row.get(col("postal_code").as_str()),
		city: row.get(col("city").as_str()),
		country: row.get(col("country").as_str()),
	}
}

#[derive(Clone)]
pub struct PatientRepository {
	pool: SqlitePool,
}

impl PatientRepository {
	pub fn new(pool: SqlitePool) -> Self {
		Self { pool }
	}

	#[tracing::instrument(skip(self))]
	pub async fn list(&self) -> Result<Vec<Patient>> {
		let rows = sqlx::query(&format!(
			"SELECT {PATIENT_COLUMNS} FROM patients ORDER BY last_name, first_name"
		))
		.fetch_all(&self.pool)
		.await?;

		Ok(rows.iter().map(patient_from_row).collect())
	}

	#[tracing::instrument(skip(self))]
	pub async fn get(&self, id: &str) -> Result<Option<Patient>> {
		let row = sqlx::query(&format!(
			"SELECT {PATIENT_COLUMNS} FROM patients WHERE id = ?"
		))
		.bind(id)
		.fetch_optional(&self.pool)
		.await?;

		Ok(row.as_ref().map(patient_from_row))
	}

	#[tracing::instrument(skip(self, new))]
	pub async fn create(&self, new: NewPatient) -> Result<Patient> {
		let patient = Patient {
			id: Uuid::new_v4().to_string(),
			first_name: new.first_name,
			last_name: new.last_name,
			initials: new.initials,
			date_of_birth: new.date_of_birth,
			email: new.email,
			phone_number: new.phone_number,
			address: new.address,
			postal_code: new.postal_code,
			city: new.city,
			country: new.country,
		};

		sqlx::query(
			r#"
			INSERT INTO patients (
				id, first_name, last_name, initials, date_of_birth, email,
				phone_number, address, postal_code, city, country, created_at
			) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
			"#,
		)
		.bind(&patient.id)
		.bind(&patient.first_name)
		.bind(&patient.last_name)
		.bind(&patient.initials)
		.bind(patient.date_of_birth.map(|d| d.to_string()))
		.bind(&patient.email)
		.bind(&patient.phone_number)
		.bind(&patient.address)
		.bind(&patient.postal_code)
		.bind(&patient.city)
		.bind(&patient.country)
		.bind(Utc::now().to_rfc3339())
		.execute(&self.pool)
		.await?;

		Ok(patient)
	}

	/// Apply a partial update, returning the updated row or `NotFound`.
	#[tracing::instrument(skip(self, update))]
	pub async fn update(&self, id: &str, update: PatientUpdate) -> Result<Patient> {
		let mut patient = self
			.get(id)
			.await?
			.ok_or_else(|| DbError::NotFound(format!("Patient with ID {id} not found")))?;

		if let Some(first_name) = update.first_name {
			patient.first_name = first_name;
		}
		if let Some(last_name) = update.last_name {
			patient.last_name = last_name;
		}
		apply(&mut patient.initials, update.initials);
		if update.date_of_birth.is_some() {
			patient.date_of_birth = update.date_of_birth;
		}
		apply(&mut patient.email, update.email);
		apply(&mut patient.phone_number, update.phone_number);
		apply(&mut patient.address, update.address);
		apply(&mut patient.postal_code, update.postal_code);
		apply(&mut patient.city, update.city);
		apply(&mut patient.country, update.country);

		sqlx::query(
			r#"
			UPDATE patients SET
				first_name = ?, last_name = ?, initials = ?, date_of_birth = ?,
				email = ?, phone_number = ?, address = ?, postal_code = ?,
				city = ?, country = ?
			WHERE id = ?
			"#,
		)
		.bind(&patient.first_name)
		.bind(&patient.last_name)
		.bind(&patient.initials)
		.bind(patient.date_of_birth.map(|d| d.to_string()))
		.bind(&patient.email)
		.bind(&patient.phone_number)
		.bind(&patient.address)
		.bind(&patient.postal_code)
		.bind(&patient.city)
		.bind(&patient.country)
		.bind(id)
		.execute(&self.pool)
		.await?;

		Ok(patient)
	}

	/// Delete a patient, returning the deleted row or `NotFound`.
	#[tracing::instrument(skip(self))]
	pub async fn delete(&self, id: &str) -> Result<Patient> {
		let patient = self
			.get(id)
			.await?
			.ok_or_else(|| DbError::NotFound(format!("Patient with ID {id} not found")))?;

		sqlx::query("DELETE FROM patients WHERE id = ?")
			.bind(id)
			.execute(&self.pool)
			.await?;

		Ok(patient)
	}

	#[tracing::instrument(skip(self))]
	pub async fn count(&self) -> Result<i64> {
		let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM patients")
			.fetch_one(&self.pool)
			.await?;
		Ok(count)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::testing::create_migrated_test_pool;

	fn sample_patient() -> NewPatient {
		NewPatient {
			first_name: "John".to_string(),
			last_name: "Doe".to_string(),
			initials: Some("J.D.".to_string()),
			date_of_birth: NaiveDate::from_ymd_opt(1990, 1, 1),
			email: Some("john.doe@email.com".to_string()),
			phone_number: Some("0612345678".to_string()),
			address: Some("Patient St 1".to_string()),
			postal_code: Some("1234AB".to_string()),
			city: Some("Amsterdam".to_string()),
			country: Some("Netherlands".to_string()),
		}
	}

	#[tokio::test]
	async fn test_create_and_get_roundtrips_date() {
		let pool = create_migrated_test_pool().await;
		let repo = PatientRepository::new(pool);

		let created = repo.create(sample_patient()).await.unwrap();
		let fetched = repo.get(&created.id).await.unwrap().unwrap();

		assert_eq!(fetched.first_name, "John");
		assert_eq!(fetched.date_of_birth, NaiveDate::from_ymd_opt(1990, 1, 1));
	}

	#[tokio::test]
	async fn test_update_is_partial() {
		let pool = create_migrated_test_pool().await;
		let repo = PatientRepository::new(pool);

		let created = repo.create(sample_patient()).await.unwrap();
		let updated = repo
			.update(
				&created.id,
				PatientUpdate {
					last_name: Some("Smith".to_string()),
					..Default::default()
				},
			)
			.await
			.unwrap();

		assert_eq!(updated.last_name, "Smith");
		assert_eq!(updated.first_name, "John");
		assert_eq!(updated.email.as_deref(), Some("john.doe@email.com"));
	}

	#[tokio::test]
	async fn test_delete_missing_is_not_found() {
		let pool = create_migrated_test_pool().await;
		let repo = PatientRepository::new(pool);
		assert!(matches!(
			repo.delete("nope").await,
			Err(DbError::NotFound(_))
		));
	}
}
