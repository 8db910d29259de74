// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Specialization HTTP handlers.

use axum::{
	extract::{Path, State},
	http::{header, StatusCode},
	response::IntoResponse,
	Json,
};
use praxis_server_db::{NewSpecialization, SpecializationUpdate};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{
	api::AppState,
	dto::{SpecializationDto, TherapistSummaryDto},
	error::ServerError,
	routes::non_empty,
};

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SpecializationRequest {
	pub name: Option<String>,
	pub description: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SpecializationMutationResponse {
	pub message: String,
	pub specialization: SpecializationDto,
}

#[utoipa::path(
    get,
    path = "/api/specialization/all",
    responses((status = 200, description = "All specializations", body = [SpecializationDto])),
    tag = "specialization"
)]
/// GET /api/specialization/all - List all specializations.
#[tracing::instrument(skip(state))]
pub async fn get_all(
	State(state): State<AppState>,
) -> Result<Json<Vec<SpecializationDto>>, ServerError> {
	let specializations = state.specialization_repo.list().await?;
	Ok(Json(
		specializations
			.into_iter()
			.map(SpecializationDto::from)
			.collect(),
	))
}

#[utoipa::path(
    get,
    path = "/api/specialization/{id}",
    params(("id" = String, Path, description = "Specialization id")),
    responses(
        (status = 200, description = "The specialization", body = SpecializationDto),
        (status = 404, description = "No specialization with this id")
    ),
    tag = "specialization"
)]
/// GET /api/specialization/{id} - Single specialization by id.
#[tracing::instrument(skip(state))]
pub async fn get(
	State(state): State<AppState>,
	Path(id): Path<String>,
) -> Result<Json<SpecializationDto>, ServerError> {
	let specialization = state
		.specialization_repo
		.get(&id)
		.await?
		.ok_or_else(|| ServerError::not_found(format!("Specialization with ID {id} not found")))?;

	Ok(Json(specialization.into()))
}

#[utoipa::path(
    get,
    path = "/api/specialization/{id}/therapists",
    params(("id" = String, Path, description = "Specialization id")),
    responses(
        (status = 200, description = "Therapists holding this specialization", body = [TherapistSummaryDto]),
        (status = 404, description = "No specialization with this id")
    ),
    tag = "specialization"
)]
/// GET /api/specialization/{id}/therapists - Therapists with this specialization.
#[tracing::instrument(skip(state))]
pub async fn get_therapists(
	State(state): State<AppState>,
	Path(id): Path<String>,
) -> Result<Json<Vec<TherapistSummaryDto>>, ServerError> {
	state
		.specialization_repo
		.get(&id)
		.await?
		.ok_or_else(|| ServerError::not_found(format!("Specialization with ID {id} not found")))?;

	let therapists = state.specialization_repo.therapists_for(&id).await?;

	Ok(Json(
		therapists
			.into_iter()
			.map(TherapistSummaryDto::from)
			.collect(),
	))
}

#[utoipa::path(
    post,
    path = "/api/specialization",
    request_body = SpecializationRequest,
    responses(
        (status = 201, description = "Specialization created", body = SpecializationDto),
        (status = 400, description = "Missing required fields")
    ),
    tag = "specialization"
)]
/// POST /api/specialization - Create a specialization.
#[tracing::instrument(skip(state, request))]
pub async fn create(
	State(state): State<AppState>,
	Json(request): Json<SpecializationRequest>,
) -> Result<impl IntoResponse, ServerError> {
	let name = non_empty(request.name)
		.ok_or_else(|| ServerError::bad_request("Specialization name is required"))?;

	let specialization = state
		.specialization_repo
		.create(NewSpecialization {
			name,
			description: request.description,
		})
		.await?;

	tracing::info!(id = %specialization.id, "created specialization");

	let location = format!("/api/specialization/{}", specialization.id);
	Ok((
		StatusCode::CREATED,
		[(header::LOCATION, location)],
		Json(SpecializationDto::from(specialization)),
	))
}

#[utoipa::path(
    put,
    path = "/api/specialization/{id}",
    params(("id" = String, Path, description = "Specialization id")),
    request_body = SpecializationRequest,
    responses(
        (status = 200, description = "Specialization updated", body = SpecializationMutationResponse),
        (status = 404, description = "No specialization with this id")
    ),
    tag = "specialization"
)]
/// PUT /api/specialization/{id} - Partial update; empty fields are ignored.
#[tracing::instrument(skip(state, request))]
pub async fn update(
	State(state): State<AppState>,
	Path(id): Path<String>,
	Json(request): Json<SpecializationRequest>,
) -> Result<Json<SpecializationMutationResponse>, ServerError> {
	let specialization = state
		.specialization_repo
		.update(
			&id,
			SpecializationUpdate {
				name: non_empty(request.name),
				description: non_empty(request.description),
			},
		)
		.await?;

	tracing::info!(%id, "updated specialization");

	Ok(Json(SpecializationMutationResponse {
		message: "Specialization updated successfully".to_string(),
		specialization: specialization.into(),
	}))
}

#[utoipa::path(
    delete,
    path = "/api/specialization/{id}",
    params(("id" = String, Path, description = "Specialization id")),
    responses(
        (status = 200, description = "Specialization deleted", body = SpecializationMutationResponse),
        (status = 404, description = "No specialization with this id")
    ),
    tag = "specialization"
)]
/// DELETE /api/specialization/{id} - Delete a specialization.
#[tracing::instrument(skip(state))]
pub async fn delete(
	State(state): State<AppState>,
	Path(id): Path<String>,
) -> Result<Json<SpecializationMutationResponse>, ServerError> {
	let specialization = state.specialization_repo.delete(&id).await?;

	tracing::info!(%id, "deleted specialization");

	Ok(Json(SpecializationMutationResponse {
		message: "Specialization deleted successfully".to_string(),
		specialization: specialization.into(),
	}))
}
