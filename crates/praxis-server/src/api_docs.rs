// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! OpenAPI documentation aggregation.

use utoipa::OpenApi;

use crate::{dto, routes};

#[derive(OpenApi)]
#[openapi(
	info(
		title = "Praxis API",
		description = "Practice-management API for physiotherapy practices"
	),
	paths(
		routes::health::health_check,
		routes::practices::get_all,
		routes::practices::get,
		routes::practices::create,
		routes::practices::update,
		routes::practices::delete,
		routes::patients::get_all,
		routes::patients::get,
		routes::patients::create,
		routes::patients::update,
		routes::patients::delete,
		routes::specializations::get_all,
		routes::specializations::get,
		routes::specializations::get_therapists,
		routes::specializations::create,
		routes::specializations::update,
		routes::specializations::delete,
		routes::appointment_types::get_all,
		routes::appointment_types::get,
		routes::appointment_types::create,
		routes::appointment_types::update,
		routes::appointment_types::delete,
		routes::therapists::get_all,
		routes::therapists::get,
		routes::therapists::get_workshifts,
		routes::therapists::get_practices,
		routes::therapists::get_specializations,
		routes::therapists::get_appointments,
		routes::therapists::create,
		routes::therapists::update,
		routes::therapists::delete,
		routes::workshifts::get_all,
		routes::workshifts::query,
		routes::workshifts::get,
		routes::workshifts::get_therapist,
		routes::workshifts::get_practice,
		routes::workshifts::create,
		routes::workshifts::update,
		routes::workshifts::delete,
		routes::appointments::get_all,
		routes::appointments::query,
		routes::appointments::get,
		routes::appointments::get_patient,
		routes::appointments::get_therapist,
		routes::appointments::get_practice,
		routes::appointments::create,
		routes::appointments::update,
		routes::appointments::delete,
		routes::access_logs::get_all,
		routes::access_logs::get_by_id,
		routes::access_logs::get_recent,
		routes::access_logs::get_stats,
		routes::access_logs::search,
		routes::access_logs::cleanup,
	),
	components(schemas(
		dto::PracticeDto,
		dto::PatientDto,
		dto::PatientSummaryDto,
		dto::SpecializationDto,
		dto::AppointmentTypeDto,
		dto::TherapistDto,
		dto::TherapistSummaryDto,
		dto::WorkshiftDto,
		dto::AppointmentDto,
		dto::AccessLogDto,
		dto::AccessLogStatsDto,
		routes::health::HealthResponse,
		routes::health::HealthComponents,
		routes::practices::PracticeRequest,
		routes::practices::PracticeMutationResponse,
		routes::patients::PatientRequest,
		routes::patients::PatientMutationResponse,
		routes::specializations::SpecializationRequest,
		routes::specializations::SpecializationMutationResponse,
		routes::appointment_types::AppointmentTypeRequest,
		routes::appointment_types::AppointmentTypeMutationResponse,
		routes::therapists::TherapistRequest,
		routes::therapists::TherapistMutationResponse,
		routes::workshifts::WorkshiftRequest,
		routes::workshifts::WorkshiftMutationResponse,
		routes::appointments::AppointmentRequest,
		routes::appointments::AppointmentMutationResponse,
		routes::access_logs::AccessLogPage,
		routes::access_logs::CleanupResponse,
	)),
	tags(
		(name = "health", description = "Liveness and readiness"),
		(name = "practice", description = "Practice management"),
		(name = "patient", description = "Patient management"),
		(name = "specialization", description = "Specialization catalog"),
		(name = "appointmenttype", description = "Appointment type catalog"),
		(name = "therapist", description = "Therapist management"),
		(name = "workshift", description = "Workshift scheduling"),
		(name = "appointment", description = "Appointment scheduling"),
		(name = "accesslog", description = "Access log queries and cleanup"),
	)
)]
pub struct ApiDoc;
