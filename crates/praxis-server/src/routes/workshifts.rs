// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Workshift HTTP handlers.

use axum::{
	extract::{Path, Query, State},
	http::{header, StatusCode},
	response::IntoResponse,
	Json,
};
use chrono::{DateTime, Utc};
use praxis_server_db::{NewWorkshift, WorkshiftFilter, WorkshiftUpdate};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{
	api::AppState,
	dto::{PracticeDto, TherapistSummaryDto, WorkshiftDto},
	error::ServerError,
	routes::non_empty,
};

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct WorkshiftRequest {
	pub therapist_id: Option<String>,
	pub practice_id: Option<String>,
	pub start_time: Option<DateTime<Utc>>,
	pub end_time: Option<DateTime<Utc>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkshiftQueryParams {
	pub therapist_id: Option<String>,
	pub practice_id: Option<String>,
	pub start: Option<DateTime<Utc>>,
	pub end: Option<DateTime<Utc>>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct WorkshiftMutationResponse {
	pub message: String,
	pub workshift: WorkshiftDto,
}

#[utoipa::path(
    get,
    path = "/api/workshift/all",
    responses((status = 200, description = "All workshifts", body = [WorkshiftDto])),
    tag = "workshift"
)]
/// GET /api/workshift/all - List all workshifts.
#[tracing::instrument(skip(state))]
pub async fn get_all(
	State(state): State<AppState>,
) -> Result<Json<Vec<WorkshiftDto>>, ServerError> {
	let workshifts = state.workshift_repo.list().await?;
	Ok(Json(workshifts.into_iter().map(WorkshiftDto::from).collect()))
}

#[utoipa::path(
    get,
    path = "/api/workshift",
    params(
        ("therapistId" = Option<String>, Query, description = "Filter by therapist"),
        ("practiceId" = Option<String>, Query, description = "Filter by practice"),
        ("start" = Option<String>, Query, description = "Shifts starting at or after this instant"),
        ("end" = Option<String>, Query, description = "Shifts ending at or before this instant")
    ),
    responses((status = 200, description = "Matching workshifts", body = [WorkshiftDto])),
    tag = "workshift"
)]
/// GET /api/workshift - Workshifts matching optional filters.
#[tracing::instrument(skip(state))]
pub async fn query(
	State(state): State<AppState>,
	Query(params): Query<WorkshiftQueryParams>,
) -> Result<Json<Vec<WorkshiftDto>>, ServerError> {
	let workshifts = state
		.workshift_repo
		.query(WorkshiftFilter {
			therapist_id: non_empty(params.therapist_id),
			practice_id: non_empty(params.practice_id),
			start: params.start,
			end: params.end,
		})
		.await?;

	Ok(Json(workshifts.into_iter().map(WorkshiftDto::from).collect()))
}

#[utoipa::path(
    get,
    path = "/api/workshift/{id}",
    params(("id" = String, Path, description = "Workshift id")),
    responses(
        (status = 200, description = "The workshift", body = WorkshiftDto),
        (status = 404, description = "No workshift with this id")
    ),
    tag = "workshift"
)]
/// GET /api/workshift/{id} - Single workshift by id.
#[tracing::instrument(skip(state))]
pub async fn get(
	State(state): State<AppState>,
	Path(id): Path<String>,
) -> Result<Json<WorkshiftDto>, ServerError> {
	let workshift = state
		.workshift_repo
		.get_detail(&id)
		.await?
		.ok_or_else(|| ServerError::not_found(format!("Workshift with ID {id} not found")))?;

	Ok(Json(workshift.into()))
}

#[utoipa::path(
    get,
    path = "/api/workshift/{id}/therapist",
    params(("id" = String, Path, description = "Workshift id")),
    responses(
        (status = 200, description = "Therapist of this workshift", body = TherapistSummaryDto),
        (status = 404, description = "No workshift with this id")
    ),
    tag = "workshift"
)]
/// GET /api/workshift/{id}/therapist - The therapist working this shift.
#[tracing::instrument(skip(state))]
pub async fn get_therapist(
	State(state): State<AppState>,
	Path(id): Path<String>,
) -> Result<Json<TherapistSummaryDto>, ServerError> {
	let workshift = state
		.workshift_repo
		.get_detail(&id)
		.await?
		.ok_or_else(|| ServerError::not_found(format!("Workshift with ID {id} not found")))?;

	Ok(Json(workshift.therapist.into()))
}

#[utoipa::path(
    get,
    path = "/api/workshift/{id}/practice",
    params(("id" = String, Path, description = "Workshift id")),
    responses(
        (status = 200, description = "Practice of this workshift", body = PracticeDto),
        (status = 404, description = "No workshift with this id")
    ),
    tag = "workshift"
)]
/// GET /api/workshift/{id}/practice - The practice this shift is at.
#[tracing::instrument(skip(state))]
pub async fn get_practice(
	State(state): State<AppState>,
	Path(id): Path<String>,
) -> Result<Json<PracticeDto>, ServerError> {
	let workshift = state
		.workshift_repo
		.get_detail(&id)
		.await?
		.ok_or_else(|| ServerError::not_found(format!("Workshift with ID {id} not found")))?;

	Ok(Json(workshift.practice.into()))
}

#[utoipa::path(
    post,
    path = "/api/workshift",
    request_body = WorkshiftRequest,
    responses(
        (status = 201, description = "Workshift created", body = WorkshiftDto),
        (status = 400, description = "Missing required fields or unknown references")
    ),
    tag = "workshift"
)]
/// POST /api/workshift - Create a workshift.
#[tracing::instrument(skip(state, request))]
pub async fn create(
	State(state): State<AppState>,
	Json(request): Json<WorkshiftRequest>,
) -> Result<impl IntoResponse, ServerError> {
	let therapist_id = non_empty(request.therapist_id)
		.ok_or_else(|| ServerError::bad_request("Workshift therapistId is required"))?;
	let practice_id = non_empty(request.practice_id)
		.ok_or_else(|| ServerError::bad_request("Workshift practiceId is required"))?;
	let start_time = request
		.start_time
		.ok_or_else(|| ServerError::bad_request("Workshift startTime is required"))?;
	let end_time = request
		.end_time
		.ok_or_else(|| ServerError::bad_request("Workshift endTime is required"))?;

	let workshift = state
		.workshift_repo
		.create(NewWorkshift {
			therapist_id,
			practice_id,
			start_time,
			end_time,
		})
		.await?;

	tracing::info!(id = %workshift.id, "created workshift");

	let location = format!("/api/workshift/{}", workshift.id);
	Ok((
		StatusCode::CREATED,
		[(header::LOCATION, location)],
		Json(WorkshiftDto::from(workshift)),
	))
}

#[utoipa::path(
    put,
    path = "/api/workshift/{id}",
    params(("id" = String, Path, description = "Workshift id")),
    request_body = WorkshiftRequest,
    responses(
        (status = 200, description = "Workshift updated", body = WorkshiftMutationResponse),
        (status = 400, description = "Unknown references"),
        (status = 404, description = "No workshift with this id")
    ),
    tag = "workshift"
)]
/// PUT /api/workshift/{id} - Partial update.
#[tracing::instrument(skip(state, request))]
pub async fn update(
	State(state): State<AppState>,
	Path(id): Path<String>,
	Json(request): Json<WorkshiftRequest>,
) -> Result<Json<WorkshiftMutationResponse>, ServerError> {
	let workshift = state
		.workshift_repo
		.update(
			&id,
			WorkshiftUpdate {
				therapist_id: non_empty(request.therapist_id),
				practice_id: non_empty(request.practice_id),
				start_time: request.start_time,
				end_time: request.end_time,
			},
		)
		.await?;

	tracing::info!(%id, "updated workshift");

	Ok(Json(WorkshiftMutationResponse {
		message: "Workshift updated successfully".to_string(),
		workshift: workshift.into(),
	}))
}

#[utoipa::path(
    delete,
    path = "/api/workshift/{id}",
    params(("id" = String, Path, description = "Workshift id")),
    responses(
        (status = 200, description = "Workshift deleted", body = WorkshiftMutationResponse),
        (status = 404, description = "No workshift with this id")
    ),
    tag = "workshift"
)]
/// DELETE /api/workshift/{id} - Delete a workshift.
#[tracing::instrument(skip(state))]
pub async fn delete(
	State(state): State<AppState>,
	Path(id): Path<String>,
) -> Result<Json<WorkshiftMutationResponse>, ServerError> {
	let workshift = state.workshift_repo.delete(&id).await?;

	tracing::info!(%id, "deleted workshift");

	Ok(Json(WorkshiftMutationResponse {
		message: "Workshift deleted successfully".to_string(),
		workshift: workshift.into(),
	}))
}
