// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Therapist HTTP handlers, including relationship traversal endpoints.

use axum::{
	extract::{Path, State},
	http::{header, StatusCode},
	response::IntoResponse,
	Json,
};
use praxis_server_db::{AppointmentFilter, NewTherapist, Therapist, TherapistUpdate, WorkshiftFilter};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{
	api::AppState,
	dto::{AppointmentDto, PracticeDto, SpecializationDto, TherapistDto, WorkshiftDto},
	error::ServerError,
	routes::non_empty,
};

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TherapistRequest {
	pub name: Option<String>,
	pub phone_number: Option<String>,
	pub email: Option<String>,
	pub specialization_ids: Option<Vec<String>>,
	pub practice_ids: Option<Vec<String>>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TherapistMutationResponse {
	pub message: String,
	pub therapist: TherapistDto,
}

async fn to_dto(state: &AppState, therapist: Therapist) -> Result<TherapistDto, ServerError> {
	let specialization_ids = state
		.therapist_repo
		.specialization_ids_for(&therapist.id)
		.await?;
	let practice_ids = state.therapist_repo.practice_ids_for(&therapist.id).await?;
	Ok(TherapistDto::from_parts(
		therapist,
		specialization_ids,
		practice_ids,
	))
}

async fn require_therapist(state: &AppState, id: &str) -> Result<Therapist, ServerError> {
	state
		.therapist_repo
		.get(id)
		.await?
		.ok_or_else(|| ServerError::not_found(format!("Therapist with ID {id} not found")))
}

#[utoipa::path(
    get,
    path = "/api/therapist/all",
    responses((status = 200, description = "All therapists", body = [TherapistDto])),
    tag = "therapist"
)]
/// GET /api/therapist/all - List all therapists with their id lists.
#[tracing::instrument(skip(state))]
pub async fn get_all(
	State(state): State<AppState>,
) -> Result<Json<Vec<TherapistDto>>, ServerError> {
	let therapists = state.therapist_repo.list().await?;

	let mut dtos = Vec::with_capacity(therapists.len());
	for therapist in therapists {
		dtos.push(to_dto(&state, therapist).await?);
	}

	Ok(Json(dtos))
}

#[utoipa::path(
    get,
    path = "/api/therapist/{id}",
    params(("id" = String, Path, description = "Therapist id")),
    responses(
        (status = 200, description = "The therapist", body = TherapistDto),
        (status = 404, description = "No therapist with this id")
    ),
    tag = "therapist"
)]
/// GET /api/therapist/{id} - Single therapist by id.
#[tracing::instrument(skip(state))]
pub async fn get(
	State(state): State<AppState>,
	Path(id): Path<String>,
) -> Result<Json<TherapistDto>, ServerError> {
	let therapist = require_therapist(&state, &id).await?;
	Ok(Json(to_dto(&state, therapist).await?))
}

#[utoipa::path(
    get,
    path = "/api/therapist/{id}/workshifts",
    params(("id" = String, Path, description = "Therapist id")),
    responses(
        (status = 200, description = "Workshifts of this therapist", body = [WorkshiftDto]),
        (status = 404, description = "No therapist with this id")
    ),
    tag = "therapist"
)]
/// GET /api/therapist/{id}/workshifts - Workshifts of a therapist.
#[tracing::instrument(skip(state))]
pub async fn get_workshifts(
	State(state): State<AppState>,
	Path(id): Path<String>,
) -> Result<Json<Vec<WorkshiftDto>>, ServerError> {
	require_therapist(&state, &id).await?;

	let workshifts = state
		.workshift_repo
		.query(WorkshiftFilter {
			therapist_id: Some(id),
			..Default::default()
		})
		.await?;

	Ok(Json(workshifts.into_iter().map(WorkshiftDto::from).collect()))
}

#[utoipa::path(
    get,
    path = "/api/therapist/{id}/practices",
    params(("id" = String, Path, description = "Therapist id")),
    responses(
        (status = 200, description = "Practices of this therapist", body = [PracticeDto]),
        (status = 404, description = "No therapist with this id")
    ),
    tag = "therapist"
)]
/// GET /api/therapist/{id}/practices - Practices a therapist works at.
#[tracing::instrument(skip(state))]
pub async fn get_practices(
	State(state): State<AppState>,
	Path(id): Path<String>,
) -> Result<Json<Vec<PracticeDto>>, ServerError> {
	require_therapist(&state, &id).await?;

	let practices = state.therapist_repo.practices_for(&id).await?;

	Ok(Json(practices.into_iter().map(PracticeDto::from).collect()))
}

#[utoipa::path(
    get,
    path = "/api/therapist/{id}/specializations",
    params(("id" = String, Path, description = "Therapist id")),
    responses(
        (status = 200, description = "Specializations of this therapist", body = [SpecializationDto]),
        (status = 404, description = "No therapist with this id")
    ),
    tag = "therapist"
)]
/// GET /api/therapist/{id}/specializations - Specializations of a therapist.
#[tracing::instrument(skip(state))]
pub async fn get_specializations(
	State(state): State<AppState>,
	Path(id): Path<String>,
) -> Result<Json<Vec<SpecializationDto>>, ServerError> {
	require_therapist(&state, &id).await?;

	let specializations = state.therapist_repo.specializations_for(&id).await?;

	Ok(Json(
		specializations
			.into_iter()
			.map(SpecializationDto::from)
			.collect(),
	))
}

#[utoipa::path(
    get,
    path = "/api/therapist/{id}/appointments",
    params(("id" = String, Path, description = "Therapist id")),
    responses(
        (status = 200, description = "Appointments of this therapist", body = [AppointmentDto]),
        (status = 404, description = "No therapist with this id")
    ),
    tag = "therapist"
)]
/// GET /api/therapist/{id}/appointments - Appointments of a therapist.
#[tracing::instrument(skip(state))]
pub async fn get_appointments(
	State(state): State<AppState>,
	Path(id): Path<String>,
) -> Result<Json<Vec<AppointmentDto>>, ServerError> {
	require_therapist(&state, &id).await?;

	let appointments = state
		.appointment_repo
		.query(AppointmentFilter {
			therapist_id: Some(id),
			..Default::default()
		})
		.await?;

	Ok(Json(
		appointments.into_iter().map(AppointmentDto::from).collect(),
	))
}

#[utoipa::path(
    post,
    path = "/api/therapist",
    request_body = TherapistRequest,
    responses(
        (status = 201, description = "Therapist created", body = TherapistDto),
        (status = 400, description = "Missing required fields or unknown references")
    ),
    tag = "therapist"
)]
/// POST /api/therapist - Create a therapist with optional link sets.
#[tracing::instrument(skip(state, request))]
pub async fn create(
	State(state): State<AppState>,
	Json(request): Json<TherapistRequest>,
) -> Result<impl IntoResponse, ServerError> {
	let name = non_empty(request.name)
		.ok_or_else(|| ServerError::bad_request("Therapist name is required"))?;

	let therapist = state
		.therapist_repo
		.create(NewTherapist {
			name,
			phone_number: request.phone_number,
			email: request.email,
			specialization_ids: request.specialization_ids.unwrap_or_default(),
			practice_ids: request.practice_ids.unwrap_or_default(),
		})
		.await?;

	tracing::info!(id = %therapist.id, "created therapist");

	let location = format!("/api/therapist/{}", therapist.id);
	let dto = to_dto(&state, therapist).await?;
	Ok((
		StatusCode::CREATED,
		[(header::LOCATION, location)],
		Json(dto),
	))
}

#[utoipa::path(
    put,
    path = "/api/therapist/{id}",
    params(("id" = String, Path, description = "Therapist id")),
    request_body = TherapistRequest,
    responses(
        (status = 200, description = "Therapist updated", body = TherapistMutationResponse),
        (status = 400, description = "Unknown references"),
        (status = 404, description = "No therapist with this id")
    ),
    tag = "therapist"
)]
/// PUT /api/therapist/{id} - Partial update; id lists replace the link sets.
#[tracing::instrument(skip(state, request))]
pub async fn update(
	State(state): State<AppState>,
	Path(id): Path<String>,
	Json(request): Json<TherapistRequest>,
) -> Result<Json<TherapistMutationResponse>, ServerError> {
	let therapist = state
		.therapist_repo
		.update(
			&id,
			TherapistUpdate {
				name: non_empty(request.name),
				phone_number: non_empty(request.phone_number),
				email: non_empty(request.email),
				specialization_ids: request.specialization_ids,
				practice_ids: request.practice_ids,
			},
		)
		.await?;

	tracing::info!(%id, "updated therapist");

	let dto = to_dto(&state, therapist).await?;
	Ok(Json(TherapistMutationResponse {
		message: "Therapist updated successfully".to_string(),
		therapist: dto,
	}))
}

#[utoipa::path(
    delete,
    path = "/api/therapist/{id}",
    params(("id" = String, Path, description = "Therapist id")),
    responses(
        (status = 200, description = "Therapist deleted", body = TherapistMutationResponse),
        (status = 404, description = "No therapist with this id")
    ),
    tag = "therapist"
)]
/// DELETE /api/therapist/{id} - Delete a therapist and its links.
#[tracing::instrument(skip(state))]
pub async fn delete(
	State(state): State<AppState>,
	Path(id): Path<String>,
) -> Result<Json<TherapistMutationResponse>, ServerError> {
	let therapist = state.therapist_repo.delete(&id).await?;

	tracing::info!(%id, "deleted therapist");

	Ok(Json(TherapistMutationResponse {
		message: "Therapist deleted successfully".to_string(),
		therapist: TherapistDto::from_parts(therapist, Vec::new(), Vec::new()),
	}))
}
