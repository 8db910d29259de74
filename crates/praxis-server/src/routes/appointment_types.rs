// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Appointment type HTTP handlers.

use axum::{
	extract::{Path, State},
	http::{header, StatusCode},
	response::IntoResponse,
	Json,
};
use praxis_server_db::{AppointmentTypeUpdate, NewAppointmentType};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{api::AppState, dto::AppointmentTypeDto, error::ServerError, routes::non_empty};

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AppointmentTypeRequest {
	pub name: Option<String>,
	pub description: Option<String>,
	pub color: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AppointmentTypeMutationResponse {
	pub message: String,
	pub appointment_type: AppointmentTypeDto,
}

#[utoipa::path(
    get,
    path = "/api/appointmenttype/all",
    responses((status = 200, description = "All appointment types", body = [AppointmentTypeDto])),
    tag = "appointmenttype"
)]
/// GET /api/appointmenttype/all - List all appointment types.
#[tracing::instrument(skip(state))]
pub async fn get_all(
	State(state): State<AppState>,
) -> Result<Json<Vec<AppointmentTypeDto>>, ServerError> {
	let types = state.appointment_type_repo.list().await?;
	Ok(Json(types.into_iter().map(AppointmentTypeDto::from).collect()))
}

#[utoipa::path(
    get,
    path = "/api/appointmenttype/{id}",
    params(("id" = String, Path, description = "Appointment type id")),
    responses(
        (status = 200, description = "The appointment type", body = AppointmentTypeDto),
        (status = 404, description = "No appointment type with this id")
    ),
    tag = "appointmenttype"
)]
/// GET /api/appointmenttype/{id} - Single appointment type by id.
#[tracing::instrument(skip(state))]
pub async fn get(
	State(state): State<AppState>,
	Path(id): Path<String>,
) -> Result<Json<AppointmentTypeDto>, ServerError> {
	let appointment_type = state
		.appointment_type_repo
		.get(&id)
		.await?
		.ok_or_else(|| ServerError::not_found(format!("Appointment type with ID {id} not found")))?;

	Ok(Json(appointment_type.into()))
}

#[utoipa::path(
    post,
    path = "/api/appointmenttype",
    request_body = AppointmentTypeRequest,
    responses(
        (status = 201, description = "Appointment type created", body = AppointmentTypeDto),
        (status = 400, description = "Missing required fields")
    ),
    tag = "appointmenttype"
)]
/// POST /api/appointmenttype - Create an appointment type.
#[tracing::instrument(skip(state, request))]
pub async fn create(
	State(state): State<AppState>,
	Json(request): Json<AppointmentTypeRequest>,
) -> Result<impl IntoResponse, ServerError> {
	let name = non_empty(request.name)
		.ok_or_else(|| ServerError::bad_request("Appointment type name is required"))?;

	let appointment_type = state
		.appointment_type_repo
		.create(NewAppointmentType {
			name,
			description: request.description,
			color: request.color,
		})
		.await?;

	tracing::info!(id = %appointment_type.id, "created appointment type");

	let location = format!("/api/appointmenttype/{}", appointment_type.id);
	Ok((
		StatusCode::CREATED,
		[(header::LOCATION, location)],
		Json(AppointmentTypeDto::from(appointment_type)),
	))
}

#[utoipa::path(
    put,
    path = "/api/appointmenttype/{id}",
    params(("id" = String, Path, description = "Appointment type id")),
    request_body = AppointmentTypeRequest,
    responses(
        (status = 200, description = "Appointment type updated", body = AppointmentTypeMutationResponse),
        (status = 404, description = "No appointment type with this id")
    ),
    tag = "appointmenttype"
)]
/// PUT /api/appointmenttype/{id} - Partial update; empty fields are ignored.
#[tracing::instrument(skip(state, request))]
pub async fn update(
	State(state): State<AppState>,
	Path(id): Path<String>,
	Json(request): Json<AppointmentTypeRequest>,
) -> Result<Json<AppointmentTypeMutationResponse>, ServerError> {
	let appointment_type = state
		.appointment_type_repo
		.update(
			&id,
			AppointmentTypeUpdate {
				name: non_empty(request.name),
				description: non_empty(request.description),
				color: non_empty(request.color),
			},
		)
		.await?;

	tracing::info!(%id, "updated appointment type");

	Ok(Json(AppointmentTypeMutationResponse {
		message: "Appointment type updated successfully".to_string(),
		appointment_type: appointment_type.into(),
	}))
}

#[utoipa::path(
    delete,
    path = "/api/appointmenttype/{id}",
    params(("id" = String, Path, description = "Appointment type id")),
    responses(
        (status = 200, description = "Appointment type deleted", body = AppointmentTypeMutationResponse),
        (status = 404, description = "No appointment type with this id")
    ),
    tag = "appointmenttype"
)]
/// DELETE /api/appointmenttype/{id} - Delete an appointment type.
#[tracing::instrument(skip(state))]
pub async fn delete(
	State(state): State<AppState>,
	Path(id): Path<String>,
) -> Result<Json<AppointmentTypeMutationResponse>, ServerError> {
	let appointment_type = state.appointment_type_repo.delete(&id).await?;

	tracing::info!(%id, "deleted appointment type");

	Ok(Json(AppointmentTypeMutationResponse {
		message: "Appointment type deleted successfully".to_string(),
		appointment_type: appointment_type.into(),
	}))
}
