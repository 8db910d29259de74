// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Patient HTTP handlers.

use axum::{
	extract::{Path, State},
	http::{header, StatusCode},
	response::IntoResponse,
	Json,
};
use chrono::NaiveDate;
use praxis_server_db::{NewPatient, PatientUpdate};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{api::AppState, dto::PatientDto, error::ServerError, routes::non_empty};

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PatientRequest {
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

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PatientMutationResponse {
	pub message: String,
	pub patient: PatientDto,
}

#[utoipa::path(
    get,
    path = "/api/patient",
    responses((status = 200, description = "All patients", body = [PatientDto])),
    tag = "patient"
)]
/// GET /api/patient - List all patients.
#[tracing::instrument(skip(state))]
pub async fn get_all(State(state): State<AppState>) -> Result<Json<Vec<PatientDto>>, ServerError> {
	let patients = state.patient_repo.list().await?;
	Ok(Json(patients.into_iter().map(PatientDto::from).collect()))
}

#[utoipa::path(
    get,
    path = "/api/patient/{id}",
    params(("id" = String, Path, description = "Patient id")),
    responses(
        (status = 200, description = "The patient", body = PatientDto),
        (status = 404, description = "No patient with this id")
    ),
    tag = "patient"
)]
/// GET /api/patient/{id} - Single patient by id.
#[tracing::instrument(skip(state))]
pub async fn get(
	State(state): State<AppState>,
	Path(id): Path<String>,
) -> Result<Json<PatientDto>, ServerError> {
	let patient = state
		.patient_repo
		.get(&id)
		.await?
		.ok_or_else(|| ServerError::not_found(format!("Patient with ID {id} not found")))?;

	Ok(Json(patient.into()))
}

#[utoipa::path(
    post,
    path = "/api/patient",
    request_body = PatientRequest,
    responses(
        (status = 201, description = "Patient created", body = PatientDto),
        (status = 400, description = "Missing required fields")
    ),
    tag = "patient"
)]
/// POST /api/patient - Create a patient.
#[tracing::instrument(skip(state, request))]
pub async fn create(
	State(state): State<AppState>,
	Json(request): Json<PatientRequest>,
) -> Result<impl IntoResponse, ServerError> {
	let first_name = non_empty(request.first_name)
		.ok_or_else(|| ServerError::bad_request("Patient first name is required"))?;
	let last_name = non_empty(request.last_name)
		.ok_or_else(|| ServerError::bad_request("Patient last name is required"))?;

	let patient = state
		.patient_repo
		.create(NewPatient {
			first_name,
			last_name,
			initials: request.initials,
			date_of_birth: request.date_of_birth,
			email: request.email,
			phone_number: request.phone_number,
			address: request.address,
			postal_code: request.postal_code,
			city: request.city,
			country: request.country,
		})
		.await?;

	tracing::info!(id = %patient.id, "created patient");

	let location = format!("/api/patient/{}", patient.id);
	Ok((
		StatusCode::CREATED,
		[(header::LOCATION, location)],
		Json(PatientDto::from(patient)),
	))
}

#[utoipa::path(
    put,
    path = "/api/patient/{id}",
    params(("id" = String, Path, description = "Patient id")),
    request_body = PatientRequest,
    responses(
        (status = 200, description = "Patient updated", body = PatientMutationResponse),
        (status = 404, description = "No patient with this id")
    ),
    tag = "patient"
)]
/// PUT /api/patient/{id} - Partial update; empty fields are ignored.
#[tracing::instrument(skip(state, request))]
pub async fn update(
	State(state): State<AppState>,
	Path(id): Path<String>,
	Json(request): Json<PatientRequest>,
) -> Result<Json<PatientMutationResponse>, ServerError> {
	let patient = state
		.patient_repo
		.update(
			&id,
			PatientUpdate {
				first_name: non_empty(request.first_name),
				last_name: non_empty(request.last_name),
				initials: non_empty(request.initials),
				date_of_birth: request.date_of_birth,
				email: non_empty(request.email),
				phone_number: non_empty(request.phone_number),
				address: non_empty(request.address),
				postal_code: non_empty(request.postal_code),
				city: non_empty(request.city),
				country: non_empty(request.country),
			},
		)
		.await?;

	tracing::info!(%id, "updated patient");

	Ok(Json(PatientMutationResponse {
		message: "Patient updated successfully".to_string(),
		patient: patient.into(),
	}))
}

#[utoipa::path(
    delete,
    path = "/api/patient/{id}",
    params(("id" = String, Path, description = "Patient id")),
    responses(
        (status = 200, description = "Patient deleted", body = PatientMutationResponse),
        (status = 404, description = "No patient with this id")
    ),
    tag = "patient"
)]
/// DELETE /api/patient/{id} - Delete a patient.
#[tracing::instrument(skip(state))]
pub async fn delete(
	State(state): State<AppState>,
	Path(id): Path<String>,
) -> Result<Json<PatientMutationResponse>, ServerError> {
	let patient = state.patient_repo.delete(&id).await?;

	tracing::info!(%id, "deleted patient");

	Ok(Json(PatientMutationResponse {
		message: "Patient deleted successfully".to_string(),
		patient: patient.into(),
	}))
}
