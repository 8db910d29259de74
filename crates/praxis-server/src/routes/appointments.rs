// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Appointment HTTP handlers.

use axum::{
	extract::{Path, Query, State},
	http::{header, StatusCode},
	response::IntoResponse,
	Json,
};
use chrono::{DateTime, Utc};
use praxis_server_db::{AppointmentFilter, AppointmentUpdate, NewAppointment};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{
	api::AppState,
	dto::{AppointmentDto, PatientSummaryDto, PracticeDto, TherapistSummaryDto},
	error::ServerError,
	routes::non_empty,
};

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AppointmentRequest {
	pub patient_id: Option<String>,
	pub therapist_id: Option<String>,
	pub practice_id: Option<String>,
	pub appointment_type_id: Option<String>,
	pub start_time: Option<DateTime<Utc>>,
	pub end_time: Option<DateTime<Utc>>,
	pub notes: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppointmentQueryParams {
	pub therapist_id: Option<String>,
	pub start: Option<DateTime<Utc>>,
	pub end: Option<DateTime<Utc>>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AppointmentMutationResponse {
	pub message: String,
	pub appointment: AppointmentDto,
}

#[utoipa::path(
    get,
    path = "/api/appointment/all",
    responses((status = 200, description = "All appointments", body = [AppointmentDto])),
    tag = "appointment"
)]
/// GET /api/appointment/all - List all appointments.
#[tracing::instrument(skip(state))]
pub async fn get_all(
	State(state): State<AppState>,
) -> Result<Json<Vec<AppointmentDto>>, ServerError> {
	let appointments = state.appointment_repo.list().await?;
	Ok(Json(
		appointments.into_iter().map(AppointmentDto::from).collect(),
	))
}

#[utoipa::path(
    get,
    path = "/api/appointment",
    params(
        ("therapistId" = Option<String>, Query, description = "Filter by therapist"),
        ("start" = Option<String>, Query, description = "Appointments starting at or after this instant"),
        ("end" = Option<String>, Query, description = "Appointments starting at or before this instant")
    ),
    responses((status = 200, description = "Matching appointments", body = [AppointmentDto])),
    tag = "appointment"
)]
/// GET /api/appointment - Appointments matching optional filters.
#[tracing::instrument(skip(state))]
pub async fn query(
	State(state): State<AppState>,
	Query(params): Query<AppointmentQueryParams>,
) -> Result<Json<Vec<AppointmentDto>>, ServerError> {
	let appointments = state
		.appointment_repo
		.query(AppointmentFilter {
			therapist_id: non_empty(params.therapist_id),
			start: params.start,
			end: params.end,
		})
		.await?;

	Ok(Json(
		appointments.into_iter().map(AppointmentDto::from).collect(),
	))
}

async fn require_detail(
	state: &AppState,
	id: &str,
) -> Result<praxis_server_db::AppointmentDetail, ServerError> {
	state
		.appointment_repo
		.get_detail(id)
		.await?
		.ok_or_else(|| ServerError::not_found(format!("Appointment with ID {id} not found")))
}

#[utoipa::path(
    get,
    path = "/api/appointment/{id}",
    params(("id" = String, Path, description = "Appointment id")),
    responses(
        (status = 200, description = "The appointment", body = AppointmentDto),
        (status = 404, description = "No appointment with this id")
    ),
    tag = "appointment"
)]
/// GET /api/appointment/{id} - Single appointment by id.
#[tracing::instrument(skip(state))]
pub async fn get(
	State(state): State<AppState>,
	Path(id): Path<String>,
) -> Result<Json<AppointmentDto>, ServerError> {
	let appointment = require_detail(&state, &id).await?;
	Ok(Json(appointment.into()))
}

#[utoipa::path(
    get,
    path = "/api/appointment/{id}/patient",
    params(("id" = String, Path, description = "Appointment id")),
    responses(
        (status = 200, description = "Patient of this appointment", body = PatientSummaryDto),
        (status = 404, description = "No appointment with this id")
    ),
    tag = "appointment"
)]
/// GET /api/appointment/{id}/patient - The patient of an appointment.
#[tracing::instrument(skip(state))]
pub async fn get_patient(
	State(state): State<AppState>,
	Path(id): Path<String>,
) -> Result<Json<PatientSummaryDto>, ServerError> {
	let appointment = require_detail(&state, &id).await?;
	Ok(Json(appointment.patient.into()))
}

#[utoipa::path(
    get,
    path = "/api/appointment/{id}/therapist",
    params(("id" = String, Path, description = "Appointment id")),
    responses(
        (status = 200, description = "Therapist of this appointment", body = TherapistSummaryDto),
        (status = 404, description = "No appointment with this id")
    ),
    tag = "appointment"
)]
/// GET /api/appointment/{id}/therapist - The therapist of an appointment.
#[tracing::instrument(skip(state))]
pub async fn get_therapist(
	State(state): State<AppState>,
	Path(id): Path<String>,
) -> Result<Json<TherapistSummaryDto>, ServerError> {
	let appointment = require_detail(&state, &id).await?;
	Ok(Json(appointment.therapist.into()))
}

#[utoipa::path(
    get,
    path = "/api/appointment/{id}/practice",
    params(("id" = String, Path, description = "Appointment id")),
    responses(
        (status = 200, description = "Practice of this appointment", body = PracticeDto),
        (status = 404, description = "No appointment with this id")
    ),
    tag = "appointment"
)]
/// GET /api/appointment/{id}/practice - The practice of an appointment.
#[tracing::instrument(skip(state))]
pub async fn get_practice(
	State(state): State<AppState>,
	Path(id): Path<String>,
) -> Result<Json<PracticeDto>, ServerError> {
	let appointment = require_detail(&state, &id).await?;
	Ok(Json(appointment.practice.into()))
}

#[utoipa::path(
    post,
    path = "/api/appointment",
    request_body = AppointmentRequest,
    responses(
        (status = 201, description = "Appointment created", body = AppointmentDto),
        (status = 400, description = "Missing required fields or unknown references")
    ),
    tag = "appointment"
)]
/// POST /api/appointment - Create an appointment.
#[tracing::instrument(skip(state, request))]
pub async fn create(
	State(state): State<AppState>,
	Json(request): Json<AppointmentRequest>,
) -> Result<impl IntoResponse, ServerError> {
	let patient_id = non_empty(request.patient_id)
		.ok_or_else(|| ServerError::bad_request("Appointment patientId is required"))?;
	let therapist_id = non_empty(request.therapist_id)
		.ok_or_else(|| ServerError::bad_request("Appointment therapistId is required"))?;
	let practice_id = non_empty(request.practice_id)
		.ok_or_else(|| ServerError::bad_request("Appointment practiceId is required"))?;
	let appointment_type_id = non_empty(request.appointment_type_id)
		.ok_or_else(|| ServerError::bad_request("Appointment appointmentTypeId is required"))?;
	let start_time = request
		.start_time
		.ok_or_else(|| ServerError::bad_request("Appointment startTime is required"))?;
	let end_time = request
		.end_time
		.ok_or_else(|| ServerError::bad_request("Appointment endTime is required"))?;

	let appointment = state
		.appointment_repo
		.create(NewAppointment {
			patient_id,
			therapist_id,
			practice_id,
			appointment_type_id,
			start_time,
			end_time,
			notes: request.notes,
		})
		.await?;

	tracing::info!(id = %appointment.id, "created appointment");

	let location = format!("/api/appointment/{}", appointment.id);
	Ok((
		StatusCode::CREATED,
		[(header::LOCATION, location)],
		Json(AppointmentDto::from(appointment)),
	))
}

#[utoipa::path(
    put,
    path = "/api/appointment/{id}",
    params(("id" = String, Path, description = "Appointment id")),
    request_body = AppointmentRequest,
    responses(
        (status = 200, description = "Appointment updated", body = AppointmentMutationResponse),
        (status = 400, description = "Unknown references"),
        (status = 404, description = "No appointment with this id")
    ),
    tag = "appointment"
)]
/// PUT /api/appointment/{id} - Partial update.
#[tracing::instrument(skip(state, request))]
pub async fn update(
	State(state): State<AppState>,
	Path(id): Path<String>,
	Json(request): Json<AppointmentRequest>,
) -> Result<Json<AppointmentMutationResponse>, ServerError> {
	let appointment = state
		.appointment_repo
		.update(
			&id,
			AppointmentUpdate {
				patient_id: non_empty(request.patient_id),
				therapist_id: non_empty(request.therapist_id),
				practice_id: non_empty(request.practice_id),
				appointment_type_id: non_empty(request.appointment_type_id),
				start_time: request.start_time,
				end_time: request.end_time,
				notes: request.notes,
			},
		)
		.await?;

	tracing::info!(%id, "updated appointment");

	Ok(Json(AppointmentMutationResponse {
		message: "Appointment updated successfully".to_string(),
		appointment: appointment.into(),
	}))
}

#[utoipa::path(
    delete,
    path = "/api/appointment/{id}",
    params(("id" = String, Path, description = "Appointment id")),
    responses(
        (status = 200, description = "Appointment deleted", body = AppointmentMutationResponse),
        (status = 404, description = "No appointment with this id")
    ),
    tag = "appointment"
)]
/// DELETE /api/appointment/{id} - Delete an appointment.
#[tracing::instrument(skip(state))]
pub async fn delete(
	State(state): State<AppState>,
	Path(id): Path<String>,
) -> Result<Json<AppointmentMutationResponse>, ServerError> {
	let appointment = state.appointment_repo.delete(&id).await?;

	tracing::info!(%id, "deleted appointment");

	Ok(Json(AppointmentMutationResponse {
		message: "Appointment deleted successfully".to_string(),
		appointment: appointment.into(),
	}))
}
