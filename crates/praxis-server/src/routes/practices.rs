// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Practice HTTP handlers.

use axum::{
	extract::{Path, State},
	http::{header, StatusCode},
	response::IntoResponse,
	Json,
};
use praxis_server_db::{NewPractice, PracticeUpdate};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{api::AppState, dto::PracticeDto, error::ServerError, routes::non_empty};

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PracticeRequest {
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

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PracticeMutationResponse {
	pub message: String,
	pub practice: PracticeDto,
}

#[utoipa::path(
    get,
    path = "/api/practice",
    responses((status = 200, description = "All practices", body = [PracticeDto])),
    tag = "practice"
)]
/// GET /api/practice - List all practices.
#[tracing::instrument(skip(state))]
pub async fn get_all(
	State(state): State<AppState>,
) -> Result<Json<Vec<PracticeDto>>, ServerError> {
	let practices = state.practice_repo.list().await?;
	Ok(Json(practices.into_iter().map(PracticeDto::from).collect()))
}

#[utoipa::path(
    get,
    path = "/api/practice/{id}",
    params(("id" = String, Path, description = "Practice id")),
    responses(
        (status = 200, description = "The practice", body = PracticeDto),
        (status = 404, description = "No practice with this id")
    ),
    tag = "practice"
)]
/// GET /api/practice/{id} - Single practice by id.
#[tracing::instrument(skip(state))]
pub async fn get(
	State(state): State<AppState>,
	Path(id): Path<String>,
) -> Result<Json<PracticeDto>, ServerError> {
	let practice = state
		.practice_repo
		.get(&id)
		.await?
		.ok_or_else(|| ServerError::not_found(format!("Practice with ID {id} not found")))?;

	Ok(Json(practice.into()))
}

#[utoipa::path(
    post,
    path = "/api/practice",
    request_body = PracticeRequest,
    responses(
        (status = 201, description = "Practice created", body = PracticeDto),
        (status = 400, description = "Missing required fields")
    ),
    tag = "practice"
)]
/// POST /api/practice - Create a practice.
#[tracing::instrument(skip(state, request))]
pub async fn create(
	State(state): State<AppState>,
	Json(request): Json<PracticeRequest>,
) -> Result<impl IntoResponse, ServerError> {
	let name = non_empty(request.name)
		.ok_or_else(|| ServerError::bad_request("Practice name is required"))?;

	let practice = state
		.practice_repo
		.create(NewPractice {
			name,
			address: request.address,
			postal_code: request.postal_code,
			city: request.city,
			country: request.country,
			phone_number: request.phone_number,
			email: request.email,
			website: request.website,
			color: request.color,
		})
		.await?;

	tracing::info!(id = %practice.id, "created practice");

	let location = format!("/api/practice/{}", practice.id);
	Ok((
		StatusCode::CREATED,
		[(header::LOCATION, location)],
		Json(PracticeDto::from(practice)),
	))
}

#[utoipa::path(
    put,
    path = "/api/practice/{id}",
    params(("id" = String, Path, description = "Practice id")),
    request_body = PracticeRequest,
    responses(
        (status = 200, description = "Practice updated", body = PracticeMutationResponse),
        (status = 404, description = "No practice with this id")
    ),
    tag = "practice"
)]
/// PUT /api/practice/{id} - Partial update; empty fields are ignored.
#[tracing::instrument(skip(state, request))]
pub async fn update(
	State(state): State<AppState>,
	Path(id): Path<String>,
	Json(request): Json<PracticeRequest>,
) -> Result<Json<PracticeMutationResponse>, ServerError> {
	let practice = state
		.practice_repo
		.update(
			&id,
			PracticeUpdate {
				name: non_empty(request.name),
				address: non_empty(request.address),
				postal_code: non_empty(request.postal_code),
				city: non_empty(request.city),
				country: non_empty(request.country),
				phone_number: non_empty(request.phone_number),
				email: non_empty(request.email),
				website: non_empty(request.website),
				color: non_empty(request.color),
			},
		)
		.await?;

	tracing::info!(%id, "updated practice");

	Ok(Json(PracticeMutationResponse {
		message: "Practice updated successfully".to_string(),
		practice: practice.into(),
	}))
}

#[utoipa::path(
    delete,
    path = "/api/practice/{id}",
    params(("id" = String, Path, description = "Practice id")),
    responses(
        (status = 200, description = "Practice deleted", body = PracticeMutationResponse),
        (status = 404, description = "No practice with this id")
    ),
    tag = "practice"
)]
/// DELETE /api/practice/{id} - Delete a practice.
#[tracing::instrument(skip(state))]
pub async fn delete(
	State(state): State<AppState>,
	Path(id): Path<String>,
) -> Result<Json<PracticeMutationResponse>, ServerError> {
	let practice = state.practice_repo.delete(&id).await?;

	tracing::info!(%id, "deleted practice");

	Ok(Json(PracticeMutationResponse {
		message: "Practice deleted successfully".to_string(),
		practice: practice.into(),
	}))
}
