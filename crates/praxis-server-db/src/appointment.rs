// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Appointment repository for database operations.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{sqlite::SqlitePool, sqlite::SqliteRow, Row};
use uuid::Uuid;

use crate::appointment_type::{appointment_type_from_prefixed_row, AppointmentType};
use crate::error::{DbError, Result};
use crate::patient::{patient_from_prefixed_row, Patient};
use crate::practice::{practice_from_prefixed_row, Practice};
use crate::therapist::{therapist_from_prefixed_row, Therapist};
use crate::workshift::parse_timestamp;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Appointment {
	pub id: String,
	pub patient_id: String,
	pub therapist_id: String,
	pub practice_id: String,
	pub appointment_type_id: String,
	pub start_time: DateTime<Utc>,
	pub end_time: DateTime<Utc>,
	pub notes: Option<String>,
}

/// An appointment with every referenced row resolved, for flattened wire
/// projections.
#[derive(Debug, Clone)]
pub struct AppointmentDetail {
	pub id: String,
	pub start_time: DateTime<Utc>,
	pub end_time: DateTime<Utc>,
	pub notes: Option<String>,
	pub patient: Patient,
	pub therapist: Therapist,
	pub practice: Practice,
	pub appointment_type: AppointmentType,
}

#[derive(Debug, Clone)]
pub struct NewAppointment {
	pub patient_id: String,
	pub therapist_id: String,
	pub practice_id: String,
	pub appointment_type_id: String,
	pub start_time: DateTime<Utc>,
	pub end_time: DateTime<Utc>,
	pub notes: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct AppointmentUpdate {
	pub patient_id: Option<String>,
	pub therapist_id: Option<String>,
	pub practice_id: Option<String>,
	pub appointment_type_id: Option<String>,
	pub start_time: Option<DateTime<Utc>>,
	pub end_time: Option<DateTime<Utc>>,
	pub notes: Option<String>,
}

/// Conjunctive filters for the timespan query endpoint.
#[derive(Debug, Clone, Default)]
pub struct AppointmentFilter {
	pub therapist_id: Option<String>,
	pub start: Option<DateTime<Utc>>,
	pub end: Option<DateTime<Utc>>,
}

const DETAIL_COLUMNS: &str = "a.id, a.start_time, a.end_time, a.notes, \
	 pa.id AS pa_id, pa.first_name AS pa_first_name, pa.last_name AS pa_last_name, \
	 pa.initials AS pa_initials, pa.date_of_birth AS pa_date_of_birth, pa.email AS pa_email, \
	 pa.phone_number AS pa_phone_number, pa.address AS pa_address, \
	 pa.postal_code AS pa_postal_code, pa.city AS pa_city, pa.country AS pa_country, \
	 t.id AS t_id, t.name AS t_name, t.phone_number AS t_phone_number, t.email AS t_email, \
	 p.id AS p_id, p.name AS p_name, p.address AS p_address, p.postal_code AS p_postal_code, \
	 p.city AS p_city, p.country AS p_country, p.phone_number AS p_phone_number, \
	 p.email AS p_email, p.website AS p_website, p.color AS p_color, \
	 at.id AS at_id, at.name AS at_name, at.description AS at_description, at.color AS at_color";

const DETAIL_JOINS: &str = "FROM appointments a \
	 JOIN patients pa ON pa.id = a.patient_id \
	 JOIN therapists t ON t.id = a.therapist_id \
	 JOIN practices p ON p.id = a.practice_id \
	 JOIN appointment_types at ON at.id = a.appointment_type_id";

fn detail_from_row(row: &SqliteRow) -> AppointmentDetail {
	AppointmentDetail {
		id: row.get("id"),
		start_time: parse_timestamp(row.get("start_time")),
		end_time: parse_timestamp(row.get("end_time")),
		notes: row.get("notes"),
		patient: patient_from_prefixed_row(row, "pa_"),
		therapist: therapist_from_prefixed_row(row, "t_"),
		practice: practice_from_prefixed_row(row, "p_"),
		appointment_type: appointment_type_from_prefixed_row(row, "at_"),
	}
}

fn appointment_from_row(row: &SqliteRow) -> Appointment {
	Appointment {
		id: row.get("id"),
		patient_id: row.get("patient_id"),
		therapist_id: row.get("therapist_id"),
		practice_id: row.get("practice_id"),
		appointment_type_id: row.get("appointment_type_id"),
		start_time: parse_timestamp(row.get("start_time")),
		end_time: parse_timestamp(row.get("end_time")),
		notes: row.get("notes"),
	}
}

#[derive(Clone)]
pub struct AppointmentRepository {
	pool: SqlitePool,
}

impl AppointmentRepository {
	pub fn new(pool: SqlitePool) -> Self {
		Self { pool }
	}

	#[tracing::instrument(skip(self))]
	pub async fn list(&self) -> Result<Vec<AppointmentDetail>> {
		let rows = sqlx::query(&format!(
			"SELECT {DETAIL_COLUMNS} {DETAIL_JOINS} ORDER BY a.start_time"
		))
		.fetch_all(&self.pool)
		.await?;

		Ok(rows.iter().map(detail_from_row).collect())
	}

	#[tracing::instrument(skip(self))]
	pub async fn get(&self, id: &str) -> Result<Option<Appointment>> {
		let row = sqlx::query(
			"SELECT id, patient_id, therapist_id, practice_id, appointment_type_id, \
			 start_time, end_time, notes FROM appointments WHERE id = ?",
		)
		.bind(id)
		.fetch_optional(&self.pool)
		.await?;

		Ok(row.as_ref().map(appointment_from_row))
	}

	#[tracing::instrument(skip(self))]
	pub async fn get_detail(&self, id: &str) -> Result<Option<AppointmentDetail>> {
		let row = sqlx::query(&format!(
			"SELECT {DETAIL_COLUMNS} {DETAIL_JOINS} WHERE a.id = ?"
		))
		.bind(id)
		.fetch_optional(&self.pool)
		.await?;

		Ok(row.as_ref().map(detail_from_row))
	}

	/// Appointments matching the optional, conjunctive filters.
	#[tracing::instrument(skip(self, filter))]
	pub async fn query(&self, filter: AppointmentFilter) -> Result<Vec<AppointmentDetail>> {
		let mut conditions = vec!["1=1".to_string()];
		if filter.therapist_id.is_some() {
			conditions.push("a.therapist_id = ?".to_string());
		}
		if filter.start.is_some() {
			conditions.push("a.start_time >= ?".to_string());
		}
		if filter.end.is_some() {
			conditions.push("a.start_time <= ?".to_string());
		}
		let where_clause = conditions.join(" AND ");

		let sql = format!(
			"SELECT {DETAIL_COLUMNS} {DETAIL_JOINS} WHERE {where_clause} ORDER BY a.start_time"
		);
		let mut query = sqlx::query(&sql);
		if let Some(v) = &filter.therapist_id {
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
	pub async fn create(&self, new: NewAppointment) -> Result<AppointmentDetail> {
		self
			.verify_reference("patients", "Patient", &new.patient_id)
			.await?;
		self
			.verify_reference("therapists", "Therapist", &new.therapist_id)
			.await?;
		self
			.verify_reference("practices", "Practice", &new.practice_id)
			.await?;
		self
			.verify_reference("appointment_types", "Appointment type", &new.appointment_type_id)
			.await?;

		let id = Uuid::new_v4().to_string();

		sqlx::query(
			"INSERT INTO appointments (id, patient_id, therapist_id, practice_id, \
			 appointment_type_id, start_time, end_time, notes, created_at) \
			 VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)",
		)
		.bind(&id)
		.bind(&new.patient_id)
		.bind(&new.therapist_id)
		.bind(&new.practice_id)
		.bind(&new.appointment_type_id)
		.bind(new.start_time.to_rfc3339())
		.bind(new.end_time.to_rfc3339())
		.bind(&new.notes)
		.bind(Utc::now().to_rfc3339())
		.execute(&self.pool)
		.await?;

		self
			.get_detail(&id)
			.await?
			.ok_or_else(|| DbError::Internal(format!("appointment {id} missing after insert")))
	}

	#[tracing::instrument(skip(self, update))]
	pub async fn update(&self, id: &str, update: AppointmentUpdate) -> Result<AppointmentDetail> {
		let mut appointment = self
			.get(id)
			.await?
			.ok_or_else(|| DbError::NotFound(format!("Appointment with ID {id} not found")))?;

		if let Some(patient_id) = update.patient_id {
			appointment.patient_id = patient_id;
		}
		if let Some(therapist_id) = update.therapist_id {
			appointment.therapist_id = therapist_id;
		}
		if let Some(practice_id) = update.practice_id {
			appointment.practice_id = practice_id;
		}
		if let Some(appointment_type_id) = update.appointment_type_id {
			appointment.appointment_type_id = appointment_type_id;
		}
		if let Some(start_time) = update.start_time {
			appointment.start_time = start_time;
		}
		if let Some(end_time) = update.end_time {
			appointment.end_time = end_time;
		}
		if update.notes.is_some() {
			appointment.notes = update.notes;
		}

		self
			.verify_reference("patients", "Patient", &appointment.patient_id)
			.await?;
		self
			.verify_reference("therapists", "Therapist", &appointment.therapist_id)
			.await?;
		self
			.verify_reference("practices", "Practice", &appointment.practice_id)
			.await?;
		self
			.verify_reference(
				"appointment_types",
				"Appointment type",
				&appointment.appointment_type_id,
			)
			.await?;

		sqlx::query(
			"UPDATE appointments SET patient_id = ?, therapist_id = ?, practice_id = ?, \
			 appointment_type_id = ?, start_time = ?, end_time = ?, notes = ? WHERE id = ?",
		)
		.bind(&appointment.patient_id)
		.bind(&appointment.therapist_id)
		.bind(&appointment.practice_id)
		.bind(&appointment.appointment_type_id)
		.bind(appointment.start_time.to_rfc3339())
		.bind(appointment.end_time.to_rfc3339())
		.bind(&appointment.notes)
		.bind(id)
		.execute(&self.pool)
		.await?;

		self
			.get_detail(id)
			.await?
			.ok_or_else(|| DbError::Internal(format!("appointment {id} missing after update")))
	}

	#[tracing::instrument(skip(self))]
	pub async fn delete(&self, id: &str) -> Result<AppointmentDetail> {
		let detail = self
			.get_detail(id)
			.await?
			.ok_or_else(|| DbError::NotFound(format!("Appointment with ID {id} not found")))?;

		sqlx::query("DELETE FROM appointments WHERE id = ?")
			.bind(id)
			.execute(&self.pool)
			.await?;

		Ok(detail)
	}

	async fn verify_reference(&self, table: &str, kind: &str, id: &str) -> Result<()> {
		let sql = format!("SELECT COUNT(*) FROM {table} WHERE id = ?");
		let exists: i64 = sqlx::query_scalar(&sql)
			.bind(id)
			.fetch_one(&self.pool)
			.await?;

		if exists == 0 {
			return Err(DbError::InvalidReference(format!(
				"{kind} with ID {id} not found"
			)));
		}
		Ok(())
	}
}
