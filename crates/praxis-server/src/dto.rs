// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Wire representations.
//!
//! The entity graph is cyclic (therapist ↔ practice ↔ workshift ↔
//! appointment), so every traversal direction gets an explicit projection:
//! id lists on the therapist, embedded summary records on workshifts and
//! appointments. Field names are camelCase on the wire.

use chrono::{DateTime, NaiveDate, Utc};
use praxis_server_access::AccessLogEntry;
use praxis_server_db::{
	AccessLogStats, AppointmentDetail, AppointmentType, Patient, Practice, Specialization,
	Therapist, WorkshiftDetail,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PracticeDto {
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

impl From<Practice> for PracticeDto {
	fn from(practice: Practice) -> Self {
		Self {
			id: practice.id,
			name: practice.name,
			address: practice.address,
			postal_code: practice.postal_code,
			city: practice.city,
			country: practice.country,
			phone_number: practice.phone_number,
			email: practice.email,
			website: practice.website,
			color: practice.color,
		}
	}
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PatientDto {
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

impl From<Patient> for PatientDto {
	fn from(patient: Patient) -> Self {
		Self {
			id: patient.id,
			first_name: patient.first_name,
			last_name: patient.last_name,
			initials: patient.initials,
			date_of_birth: patient.date_of_birth,
			email: patient.email,
			phone_number: patient.phone_number,
			address: patient.address,
			postal_code: patient.postal_code,
			city: patient.city,
			country: patient.country,
		}
	}
}

/// Patient projection embedded in appointment responses.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PatientSummaryDto {
	pub id: String,
	pub first_name: String,
	pub last_name: String,
	pub initials: Option<String>,
	pub date_of_birth: Option<NaiveDate>,
	pub email: Option<String>,
	pub phone_number: Option<String>,
}

impl From<Patient> for PatientSummaryDto {
	fn from(patient: Patient) -> Self {
		Self {
			id: patient.id,
			first_name: patient.first_name,
			last_name: patient.last_name,
			initials: patient.initials,
			date_of_birth: patient.date_of_birth,
			email: patient.email,
			phone_number: patient.phone_number,
		}
	}
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SpecializationDto {
	pub id: String,
	pub name: String,
	pub description: Option<String>,
}

impl From<Specialization> for SpecializationDto {
	fn from(specialization: Specialization) -> Self {
		Self {
			id: specialization.id,
			name: specialization.name,
			description: specialization.description,
		}
	}
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AppointmentTypeDto {
	pub id: String,
	pub name: String,
	pub description: Option<String>,
	pub color: Option<String>,
}

impl From<AppointmentType> for AppointmentTypeDto {
	fn from(appointment_type: AppointmentType) -> Self {
		Self {
			id: appointment_type.id,
			name: appointment_type.name,
			description: appointment_type.description,
			color: appointment_type.color,
		}
	}
}

/// Therapist with link sets flattened to id lists.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TherapistDto {
	pub id: String,
	pub name: String,
	pub phone_number: Option<String>,
	pub email: Option<String>,
	pub specialization_ids: Vec<String>,
	pub practice_ids: Vec<String>,
}

impl TherapistDto {
	pub fn from_parts(
		therapist: Therapist,
		specialization_ids: Vec<String>,
		practice_ids: Vec<String>,
	) -> Self {
		Self {
			id: therapist.id,
			name: therapist.name,
			phone_number: therapist.phone_number,
			email: therapist.email,
			specialization_ids,
			practice_ids,
		}
	}
}

/// Therapist projection embedded in workshift and appointment responses.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TherapistSummaryDto {
	pub id: String,
	pub name: String,
	pub phone_number: Option<String>,
	pub email: Option<String>,
}

impl From<Therapist> for TherapistSummaryDto {
	fn from(therapist: Therapist) -> Self {
		Self {
			id: therapist.id,
			name: therapist.name,
			phone_number: therapist.phone_number,
			email: therapist.email,
		}
	}
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct WorkshiftDto {
	pub id: String,
	pub start_time: DateTime<Utc>,
	pub end_time: DateTime<Utc>,
	pub therapist: TherapistSummaryDto,
	pub practice: PracticeDto,
}

impl From<WorkshiftDetail> for WorkshiftDto {
	fn from(detail: WorkshiftDetail) -> Self {
		Self {
			id: detail.id,
			start_time: detail.start_time,
			end_time: detail.end_time,
			therapist: detail.therapist.into(),
			practice: detail.practice.into(),
		}
	}
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AppointmentDto {
	pub id: String,
	pub start_time: DateTime<Utc>,
	pub end_time: DateTime<Utc>,
	pub notes: Option<String>,
	pub patient: PatientSummaryDto,
	pub therapist: TherapistSummaryDto,
	pub practice: PracticeDto,
	pub appointment_type: AppointmentTypeDto,
}

impl From<AppointmentDetail> for AppointmentDto {
	fn from(detail: AppointmentDetail) -> Self {
		Self {
			id: detail.id,
			start_time: detail.start_time,
			end_time: detail.end_time,
			notes: detail.notes,
			patient: detail.patient.into(),
			therapist: detail.therapist.into(),
			practice: detail.practice.into(),
			appointment_type: detail.appointment_type.into(),
		}
	}
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AccessLogDto {
	pub id: String,
	pub timestamp: DateTime<Utc>,
	pub ip_address: Option<String>,
	pub user_agent: Option<String>,
	pub http_method: String,
	pub request_path: String,
	pub query_string: Option<String>,
	pub status_code: u16,
	pub response_time_ms: i64,
	pub response_size: Option<i64>,
	pub data_summary: Option<String>,
	pub user_id: Option<String>,
	pub session_id: Option<String>,
	pub is_successful: bool,
}

impl From<AccessLogEntry> for AccessLogDto {
	fn from(entry: AccessLogEntry) -> Self {
		let is_successful = entry.is_successful();
		Self {
			id: entry.id,
			timestamp: entry.timestamp,
			ip_address: entry.ip_address,
			user_agent: entry.user_agent,
			http_method: entry.http_method,
			request_path: entry.request_path,
			query_string: entry.query_string,
			status_code: entry.status_code,
			response_time_ms: entry.response_time_ms,
			response_size: entry.response_size,
			data_summary: entry.data_summary,
			user_id: entry.user_id,
			session_id: entry.session_id,
			is_successful,
		}
	}
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AccessLogStatsDto {
	pub method: String,
	pub path: String,
	pub count: i64,
	pub avg_response_time: f64,
	pub success_rate: f64,
}

impl From<AccessLogStats> for AccessLogStatsDto {
	fn from(stats: AccessLogStats) -> Self {
		Self {
			method: stats.http_method,
			path: stats.request_path,
			count: stats.count,
			avg_response_time: stats.avg_response_time_ms,
			success_rate: stats.success_rate,
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_camel_case_field_names() {
		let dto = PracticeDto {
			id: "p1".to_string(),
			name: "Fysio One".to_string(),
			address: None,
			postal_code: Some("1000AA".to_string()),
			city: None,
			country: None,
			phone_number: None,
			email: None,
			website: None,
			color: None,
		};
		let json = serde_json::to_string(&dto).unwrap();
		assert!(json.contains("\"postalCode\":\"1000AA\""));
		assert!(!json.contains("postal_code"));
	}

	#[test]
	fn test_access_log_dto_derives_success() {
		let entry = AccessLogEntry::builder("GET", "/api/patient")
			.status_code(201)
			.build();
		let dto: AccessLogDto = entry.into();
		assert!(dto.is_successful);

		let entry = AccessLogEntry::builder("GET", "/api/patient")
			.status_code(404)
			.build();
		let dto: AccessLogDto = entry.into();
		assert!(!dto.is_successful);
	}
}
