// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! HTTP API routes and application state.

use std::sync::Arc;

use axum::routing::{delete, get, post};
use axum::{middleware, Router};
use praxis_server_access::{AccessLogService, SqliteAccessLogSink};
use praxis_server_config::ServerConfig;
use praxis_server_db::{
	AccessLogRepository, AppointmentRepository, AppointmentTypeRepository, PatientRepository,
	PracticeRepository, SpecializationRepository, TherapistRepository, WorkshiftRepository,
};
use sqlx::SqlitePool;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::{access_middleware::access_log_middleware, api_docs::ApiDoc, routes};

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
	pub practice_repo: Arc<PracticeRepository>,
	pub patient_repo: Arc<PatientRepository>,
	pub specialization_repo: Arc<SpecializationRepository>,
	pub appointment_type_repo: Arc<AppointmentTypeRepository>,
	pub therapist_repo: Arc<TherapistRepository>,
	pub workshift_repo: Arc<WorkshiftRepository>,
	pub appointment_repo: Arc<AppointmentRepository>,
	pub access_log_repo: Arc<AccessLogRepository>,
	pub access_log: Arc<AccessLogService>,
	pub excluded_paths: Arc<Vec<String>>,
	pub pool: SqlitePool,
}

/// Creates the application state.
///
/// The access log service gets its own clone of the pool: the background
/// worker must never depend on request-scoped resources.
pub fn create_app_state(pool: SqlitePool, config: &ServerConfig) -> AppState {
	let sink = Arc::new(SqliteAccessLogSink::new(pool.clone()));
	let access_log = Arc::new(AccessLogService::new(sink, config.access.queue_capacity));

	AppState {
		practice_repo: Arc::new(PracticeRepository::new(pool.clone())),
		patient_repo: Arc::new(PatientRepository::new(pool.clone())),
		specialization_repo: Arc::new(SpecializationRepository::new(pool.clone())),
		appointment_type_repo: Arc::new(AppointmentTypeRepository::new(pool.clone())),
		therapist_repo: Arc::new(TherapistRepository::new(pool.clone())),
		workshift_repo: Arc::new(WorkshiftRepository::new(pool.clone())),
		appointment_repo: Arc::new(AppointmentRepository::new(pool.clone())),
		access_log_repo: Arc::new(AccessLogRepository::new(pool.clone())),
		access_log,
		excluded_paths: Arc::new(config.access.excluded_paths.clone()),
		pool,
	}
}

/// All API routes, without the access-logging layer.
pub fn api_routes() -> Router<AppState> {
	Router::new()
		// Health
		.route("/health", get(routes::health::health_check))
		// Practices
		.route(
			"/api/practice",
			get(routes::practices::get_all).post(routes::practices::create),
		)
		.route(
			"/api/practice/{id}",
			get(routes::practices::get)
				.put(routes::practices::update)
				.delete(routes::practices::delete),
		)
		// Patients
		.route(
			"/api/patient",
			get(routes::patients::get_all).post(routes::patients::create),
		)
		.route(
			"/api/patient/{id}",
			get(routes::patients::get)
				.put(routes::patients::update)
				.delete(routes::patients::delete),
		)
		// Specializations
		.route(
			"/api/specialization/all",
			get(routes::specializations::get_all),
		)
		.route("/api/specialization", post(routes::specializations::create))
		.route(
			"/api/specialization/{id}",
			get(routes::specializations::get)
				.put(routes::specializations::update)
				.delete(routes::specializations::delete),
		)
		.route(
			"/api/specialization/{id}/therapists",
			get(routes::specializations::get_therapists),
		)
		// Appointment types
		.route(
			"/api/appointmenttype/all",
			get(routes::appointment_types::get_all),
		)
		.route(
			"/api/appointmenttype",
			post(routes::appointment_types::create),
		)
		.route(
			"/api/appointmenttype/{id}",
			get(routes::appointment_types::get)
				.put(routes::appointment_types::update)
				.delete(routes::appointment_types::delete),
		)
		// Therapists
		.route("/api/therapist/all", get(routes::therapists::get_all))
		.route("/api/therapist", post(routes::therapists::create))
		.route(
			"/api/therapist/{id}",
			get(routes::therapists::get)
				.put(routes::therapists::update)
				.delete(routes::therapists::delete),
		)
		.route(
			"/api/therapist/{id}/workshifts",
			get(routes::therapists::get_workshifts),
		)
		.route(
			"/api/therapist/{id}/practices",
			get(routes::therapists::get_practices),
		)
		.route(
			"/api/therapist/{id}/specializations",
			get(routes::therapists::get_specializations),
		)
		.route(
			"/api/therapist/{id}/appointments",
			get(routes::therapists::get_appointments),
		)
		// Workshifts
		.route("/api/workshift/all", get(routes::workshifts::get_all))
		.route(
			"/api/workshift",
			get(routes::workshifts::query).post(routes::workshifts::create),
		)
		.route(
			"/api/workshift/{id}",
			get(routes::workshifts::get)
				.put(routes::workshifts::update)
				.delete(routes::workshifts::delete),
		)
		.route(
			"/api/workshift/{id}/therapist",
			get(routes::workshifts::get_therapist),
		)
		.route(
			"/api/workshift/{id}/practice",
			get(routes::workshifts::get_practice),
		)
		// Appointments
		.route("/api/appointment/all", get(routes::appointments::get_all))
		.route(
			"/api/appointment",
			get(routes::appointments::query).post(routes::appointments::create),
		)
		.route(
			"/api/appointment/{id}",
			get(routes::appointments::get)
				.put(routes::appointments::update)
				.delete(routes::appointments::delete),
		)
		.route(
			"/api/appointment/{id}/patient",
			get(routes::appointments::get_patient),
		)
		.route(
			"/api/appointment/{id}/therapist",
			get(routes::appointments::get_therapist),
		)
		.route(
			"/api/appointment/{id}/practice",
			get(routes::appointments::get_practice),
		)
		// Access logs
		.route("/api/accesslog/all", get(routes::access_logs::get_all))
		.route("/api/accesslog/recent", get(routes::access_logs::get_recent))
		.route("/api/accesslog/stats", get(routes::access_logs::get_stats))
		.route("/api/accesslog/search", get(routes::access_logs::search))
		.route("/api/accesslog/cleanup", delete(routes::access_logs::cleanup))
		.route("/api/accesslog/{id}", get(routes::access_logs::get_by_id))
}

/// The full router: API routes, Swagger UI, and the access-logging layer.
pub fn create_router(state: AppState) -> Router {
	api_routes()
		.merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
		.layer(middleware::from_fn_with_state(
			state.clone(),
			access_log_middleware,
		))
		.with_state(state)
}

#[cfg(test)]
pub(crate) mod testing {
	use super::*;

	pub async fn create_test_state() -> (AppState, tempfile::TempDir) {
		let dir = tempfile::tempdir().unwrap();
		let db_path = dir.path().join("test.db");
		let db_url = format!("sqlite:{}?mode=rwc", db_path.display());
		let pool = praxis_server_db::create_pool(&db_url).await.unwrap();
		praxis_server_db::run_migrations(&pool).await.unwrap();

		let config = ServerConfig::default();
		(create_app_state(pool, &config), dir)
	}

	pub async fn create_test_app() -> (Router, AppState, tempfile::TempDir) {
		let (state, dir) = create_test_state().await;
		(create_router(state.clone()), state, dir)
	}
}

#[cfg(test)]
mod tests {
	use super::testing::{create_test_app, create_test_state};
	use super::*;

	use axum::{
		body::Body,
		extract::ConnectInfo,
		http::{Request, StatusCode},
	};
	use chrono::{Duration as ChronoDuration, Utc};
	use std::net::SocketAddr;
	use tokio::time::{sleep, Duration};
	use tower::ServiceExt;

	async fn body_json(response: axum::response::Response) -> serde_json::Value {
		let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
			.await
			.unwrap();
		serde_json::from_slice(&bytes).unwrap()
	}

	async fn wait_for_entry_count(state: &AppState, expected: i64) -> bool {
		for _ in 0..200 {
			if state.access_log_repo.count().await.unwrap() == expected {
				return true;
			}
			sleep(Duration::from_millis(10)).await;
		}
		false
	}

	async fn insert_aged_entry(pool: &SqlitePool, age_days: i64) {
		sqlx::query(
			"INSERT INTO access_logs (id, timestamp, http_method, request_path, status_code, \
			 response_time_ms, created_at) VALUES (?, ?, 'GET', '/api/patient', 200, 5, ?)",
		)
		.bind(uuid::Uuid::new_v4().to_string())
		.bind((Utc::now() - ChronoDuration::days(age_days)).to_rfc3339())
		.bind(Utc::now().to_rfc3339())
		.execute(pool)
		.await
		.unwrap();
	}

	#[tokio::test]
	async fn test_health_check() {
		let (app, _state, _dir) = create_test_app().await;

		let response = app
			.oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
			.await
			.unwrap();

		assert_eq!(response.status(), StatusCode::OK);
		let health = body_json(response).await;
		assert_eq!(health["status"], "healthy");
		assert_eq!(health["components"]["database"], "healthy");
	}

	#[tokio::test]
	async fn test_excluded_path_creates_no_entry() {
		let (app, state, _dir) = create_test_app().await;

		for uri in ["/health", "/api/accesslog/all", "/swagger-ui"] {
			let _ = app
				.clone()
				.oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
				.await
				.unwrap();
		}

		sleep(Duration::from_millis(100)).await;
		assert_eq!(state.access_log_repo.count().await.unwrap(), 0);
	}

	#[tokio::test]
	async fn test_logged_request_persists_exactly_one_entry() {
		let (app, state, _dir) = create_test_app().await;

		let response = app
			.oneshot(
				Request::builder()
					.uri("/api/patient")
					.body(Body::empty())
					.unwrap(),
			)
			.await
			.unwrap();
		assert_eq!(response.status(), StatusCode::OK);

		assert!(wait_for_entry_count(&state, 1).await);

		let (entries, _) = state.access_log_repo.list_page(1, 10).await.unwrap();
		let entry = &entries[0];
		assert_eq!(entry.http_method, "GET");
		assert_eq!(entry.request_path, "/api/patient");
		assert_eq!(entry.status_code, 200);
		assert!(entry.response_time_ms >= 0);
		assert!(entry.is_successful());
	}

	#[tokio::test]
	async fn test_entry_status_matches_response_status() {
		let (app, state, _dir) = create_test_app().await;

		let response = app
			.oneshot(
				Request::builder()
					.uri("/api/patient/nonexistent")
					.body(Body::empty())
					.unwrap(),
			)
			.await
			.unwrap();
		assert_eq!(response.status(), StatusCode::NOT_FOUND);

		assert!(wait_for_entry_count(&state, 1).await);
		let (entries, _) = state.access_log_repo.list_page(1, 10).await.unwrap();
		assert_eq!(entries[0].status_code, 404);
		assert!(!entries[0].is_successful());
		assert_eq!(
			entries[0].data_summary.as_deref(),
			Some("GET /api/patient/nonexistent - Status: 404")
		);
	}

	#[tokio::test]
	async fn test_logging_is_transparent() {
		let (state, _dir) = create_test_state().await;
		crate::seed::seed_database(&state).await.unwrap();

		let logged = create_router(state.clone());
		let bare = api_routes().with_state(state.clone());

		for uri in ["/api/patient", "/api/practice", "/api/therapist/all"] {
			let logged_response = logged
				.clone()
				.oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
				.await
				.unwrap();
			let bare_response = bare
				.clone()
				.oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
				.await
				.unwrap();

			assert_eq!(logged_response.status(), bare_response.status());
			let logged_bytes = axum::body::to_bytes(logged_response.into_body(), usize::MAX)
				.await
				.unwrap();
			let bare_bytes = axum::body::to_bytes(bare_response.into_body(), usize::MAX)
				.await
				.unwrap();
			assert_eq!(logged_bytes, bare_bytes, "bytes differ for {uri}");
		}
	}

	#[tokio::test]
	async fn test_client_ip_prefers_forwarded_for() {
		let (app, state, _dir) = create_test_app().await;

		let response = app
			.oneshot(
				Request::builder()
					.uri("/api/patient")
					.header("X-Forwarded-For", "1.2.3.4, 5.6.7.8")
					.header("X-Real-IP", "9.9.9.9")
					.body(Body::empty())
					.unwrap(),
			)
			.await
			.unwrap();
		assert_eq!(response.status(), StatusCode::OK);

		assert!(wait_for_entry_count(&state, 1).await);
		let (entries, _) = state.access_log_repo.list_page(1, 10).await.unwrap();
		assert_eq!(entries[0].ip_address.as_deref(), Some("1.2.3.4"));
	}

	#[tokio::test]
	async fn test_client_ip_falls_back_to_real_ip_then_peer() {
		let (app, state, _dir) = create_test_app().await;

		let response = app
			.clone()
			.oneshot(
				Request::builder()
					.uri("/api/patient")
					.header("X-Real-IP", "9.9.9.9")
					.body(Body::empty())
					.unwrap(),
			)
			.await
			.unwrap();
		assert_eq!(response.status(), StatusCode::OK);
		assert!(wait_for_entry_count(&state, 1).await);

		let peer: SocketAddr = "10.0.0.7:40000".parse().unwrap();
		let response = app
			.oneshot(
				Request::builder()
					.uri("/api/patient")
					.extension(ConnectInfo(peer))
					.body(Body::empty())
					.unwrap(),
			)
			.await
			.unwrap();
		assert_eq!(response.status(), StatusCode::OK);
		assert!(wait_for_entry_count(&state, 2).await);

		let (entries, _) = state.access_log_repo.list_page(1, 10).await.unwrap();
		let ips: Vec<_> = entries
			.iter()
			.map(|e| e.ip_address.clone().unwrap())
			.collect();
		assert!(ips.contains(&"9.9.9.9".to_string()));
		assert!(ips.contains(&"10.0.0.7".to_string()));
	}

	#[tokio::test]
	async fn test_patient_list_summary_counts_records() {
		let (app, state, _dir) = create_test_app().await;

		for i in 0..5 {
			state
				.patient_repo
				.create(praxis_server_db::NewPatient {
					first_name: format!("Patient{i}"),
					last_name: "Test".to_string(),
					..Default::default()
				})
				.await
				.unwrap();
		}

		let response = app
			.oneshot(
				Request::builder()
					.uri("/api/patient")
					.body(Body::empty())
					.unwrap(),
			)
			.await
			.unwrap();
		assert_eq!(response.status(), StatusCode::OK);

		assert!(wait_for_entry_count(&state, 1).await);
		let (entries, _) = state.access_log_repo.list_page(1, 10).await.unwrap();
		assert_eq!(
			entries[0].data_summary.as_deref(),
			Some("Retrieved 5 patient records")
		);
	}

	#[tokio::test]
	async fn test_single_record_summary() {
		let (app, state, _dir) = create_test_app().await;

		let practice = state
			.practice_repo
			.create(praxis_server_db::NewPractice {
				name: "Fysio One".to_string(),
				..Default::default()
			})
			.await
			.unwrap();

		let response = app
			.oneshot(
				Request::builder()
					.uri(format!("/api/practice/{}", practice.id))
					.body(Body::empty())
					.unwrap(),
			)
			.await
			.unwrap();
		assert_eq!(response.status(), StatusCode::OK);

		assert!(wait_for_entry_count(&state, 1).await);
		let (entries, _) = state.access_log_repo.list_page(1, 10).await.unwrap();
		assert_eq!(
			entries[0].data_summary.as_deref(),
			Some("Retrieved single practice record")
		);
	}

	#[tokio::test]
	async fn test_accesslog_page_size_clamped() {
		let (app, _state, _dir) = create_test_app().await;

		let response = app
			.oneshot(
				Request::builder()
					.uri("/api/accesslog/all?page=1&pageSize=2000")
					.body(Body::empty())
					.unwrap(),
			)
			.await
			.unwrap();
		assert_eq!(response.status(), StatusCode::OK);

		let body = body_json(response).await;
		assert_eq!(body["pageSize"], 1000);
		assert_eq!(body["page"], 1);
	}

	#[tokio::test]
	async fn test_cleanup_below_floor_is_rejected() {
		let (app, state, _dir) = create_test_app().await;
		insert_aged_entry(&state.pool, 100).await;

		let response = app
			.oneshot(
				Request::builder()
					.method("DELETE")
					.uri("/api/accesslog/cleanup?olderThanDays=3")
					.body(Body::empty())
					.unwrap(),
			)
			.await
			.unwrap();

		assert_eq!(response.status(), StatusCode::BAD_REQUEST);
		assert_eq!(state.access_log_repo.count().await.unwrap(), 1);
	}

	#[tokio::test]
	async fn test_cleanup_deletes_only_expired_entries() {
		let (app, state, _dir) = create_test_app().await;
		insert_aged_entry(&state.pool, 40).await;
		insert_aged_entry(&state.pool, 50).await;
		insert_aged_entry(&state.pool, 1).await;

		let response = app
			.oneshot(
				Request::builder()
					.method("DELETE")
					.uri("/api/accesslog/cleanup?olderThanDays=30")
					.body(Body::empty())
					.unwrap(),
			)
			.await
			.unwrap();
		assert_eq!(response.status(), StatusCode::OK);

		let body = body_json(response).await;
		assert_eq!(body["deletedCount"], 2);
		assert!(body["cutoffDate"].is_string());

		assert_eq!(state.access_log_repo.count().await.unwrap(), 1);
	}

	#[tokio::test]
	async fn test_accesslog_stats_groups_by_endpoint() {
		let (app, state, _dir) = create_test_app().await;

		// Two requests to the same endpoint, one of them a miss.
		for uri in ["/api/patient", "/api/patient", "/api/patient/missing"] {
			let _ = app
				.clone()
				.oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
				.await
				.unwrap();
		}
		assert!(wait_for_entry_count(&state, 3).await);

		let response = app
			.oneshot(
				Request::builder()
					.uri("/api/accesslog/stats?hours=1")
					.body(Body::empty())
					.unwrap(),
			)
			.await
			.unwrap();
		assert_eq!(response.status(), StatusCode::OK);

		let stats = body_json(response).await;
		let stats = stats.as_array().unwrap();
		assert_eq!(stats.len(), 2);
		assert_eq!(stats[0]["method"], "GET");
		assert_eq!(stats[0]["path"], "/api/patient");
		assert_eq!(stats[0]["count"], 2);
		assert_eq!(stats[0]["successRate"], 100.0);
	}

	#[tokio::test]
	async fn test_accesslog_search_by_method() {
		let (app, state, _dir) = create_test_app().await;

		let _ = app
			.clone()
			.oneshot(
				Request::builder()
					.uri("/api/patient")
					.body(Body::empty())
					.unwrap(),
			)
			.await
			.unwrap();
		let _ = app
			.clone()
			.oneshot(
				Request::builder()
					.method("POST")
					.uri("/api/practice")
					.header("Content-Type", "application/json")
					.body(Body::from(r#"{"name":"Fysio One"}"#))
					.unwrap(),
			)
			.await
			.unwrap();
		assert!(wait_for_entry_count(&state, 2).await);

		let response = app
			.oneshot(
				Request::builder()
					.uri("/api/accesslog/search?method=post")
					.body(Body::empty())
					.unwrap(),
			)
			.await
			.unwrap();
		assert_eq!(response.status(), StatusCode::OK);

		let results = body_json(response).await;
		let results = results.as_array().unwrap();
		assert_eq!(results.len(), 1);
		assert_eq!(results[0]["httpMethod"], "POST");
		assert_eq!(results[0]["statusCode"], 201);
	}

	#[tokio::test]
	async fn test_accesslog_get_by_id_and_missing() {
		let (app, state, _dir) = create_test_app().await;

		let _ = app
			.clone()
			.oneshot(
				Request::builder()
					.uri("/api/patient")
					.body(Body::empty())
					.unwrap(),
			)
			.await
			.unwrap();
		assert!(wait_for_entry_count(&state, 1).await);

		let (entries, _) = state.access_log_repo.list_page(1, 1).await.unwrap();
		let id = entries[0].id.clone();

		let response = app
			.clone()
			.oneshot(
				Request::builder()
					.uri(format!("/api/accesslog/{id}"))
					.body(Body::empty())
					.unwrap(),
			)
			.await
			.unwrap();
		assert_eq!(response.status(), StatusCode::OK);
		let body = body_json(response).await;
		assert_eq!(body["id"], id.as_str());
		assert_eq!(body["isSuccessful"], true);

		let response = app
			.oneshot(
				Request::builder()
					.uri("/api/accesslog/not-an-id")
					.body(Body::empty())
					.unwrap(),
			)
			.await
			.unwrap();
		assert_eq!(response.status(), StatusCode::NOT_FOUND);
	}

	#[tokio::test]
	async fn test_patient_crud_flow() {
		let (app, _state, _dir) = create_test_app().await;

		// Create
		let response = app
			.clone()
			.oneshot(
				Request::builder()
					.method("POST")
					.uri("/api/patient")
					.header("Content-Type", "application/json")
					.body(Body::from(
						r#"{"firstName":"Jane","lastName":"Doe","city":"Amsterdam"}"#,
					))
					.unwrap(),
			)
			.await
			.unwrap();
		assert_eq!(response.status(), StatusCode::CREATED);
		let location = response
			.headers()
			.get("location")
			.unwrap()
			.to_str()
			.unwrap()
			.to_string();
		let created = body_json(response).await;
		let id = created["id"].as_str().unwrap().to_string();
		assert_eq!(location, format!("/api/patient/{id}"));

		// Get
		let response = app
			.clone()
			.oneshot(Request::builder().uri(location.as_str()).body(Body::empty()).unwrap())
			.await
			.unwrap();
		assert_eq!(response.status(), StatusCode::OK);
		let fetched = body_json(response).await;
		assert_eq!(fetched["firstName"], "Jane");

		// Update (partial)
		let response = app
			.clone()
			.oneshot(
				Request::builder()
					.method("PUT")
					.uri(location.as_str())
					.header("Content-Type", "application/json")
					.body(Body::from(r#"{"lastName":"Smith"}"#))
					.unwrap(),
			)
			.await
			.unwrap();
		assert_eq!(response.status(), StatusCode::OK);
		let updated = body_json(response).await;
		assert_eq!(updated["message"], "Patient updated successfully");
		assert_eq!(updated["patient"]["lastName"], "Smith");
		assert_eq!(updated["patient"]["firstName"], "Jane");

		// Delete
		let response = app
			.clone()
			.oneshot(
				Request::builder()
					.method("DELETE")
					.uri(location.as_str())
					.body(Body::empty())
					.unwrap(),
			)
			.await
			.unwrap();
		assert_eq!(response.status(), StatusCode::OK);

		// Gone
		let response = app
			.oneshot(Request::builder().uri(location.as_str()).body(Body::empty()).unwrap())
			.await
			.unwrap();
		assert_eq!(response.status(), StatusCode::NOT_FOUND);
	}

	#[tokio::test]
	async fn test_create_patient_requires_names() {
		let (app, _state, _dir) = create_test_app().await;

		let response = app
			.oneshot(
				Request::builder()
					.method("POST")
					.uri("/api/patient")
					.header("Content-Type", "application/json")
					.body(Body::from(r#"{"firstName":"  "}"#))
					.unwrap(),
			)
			.await
			.unwrap();
		assert_eq!(response.status(), StatusCode::BAD_REQUEST);
	}

	#[tokio::test]
	async fn test_therapist_with_unknown_specialization_is_rejected() {
		let (app, _state, _dir) = create_test_app().await;

		let response = app
			.oneshot(
				Request::builder()
					.method("POST")
					.uri("/api/therapist")
					.header("Content-Type", "application/json")
					.body(Body::from(
						r#"{"name":"Anna","specializationIds":["ghost-spec"]}"#,
					))
					.unwrap(),
			)
			.await
			.unwrap();
		assert_eq!(response.status(), StatusCode::BAD_REQUEST);

		let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
			.await
			.unwrap();
		let message = String::from_utf8(bytes.to_vec()).unwrap();
		assert!(message.contains("ghost-spec"));
	}

	#[tokio::test]
	async fn test_therapist_traversals() {
		let (app, state, _dir) = create_test_app().await;
		crate::seed::seed_database(&state).await.unwrap();

		let practice = state.practice_repo.list().await.unwrap().remove(0);
		let spec = state.specialization_repo.list().await.unwrap().remove(0);

		let therapist = state
			.therapist_repo
			.create(praxis_server_db::NewTherapist {
				name: "Anna de Vries".to_string(),
				specialization_ids: vec![spec.id.clone()],
				practice_ids: vec![practice.id.clone()],
				..Default::default()
			})
			.await
			.unwrap();

		let response = app
			.clone()
			.oneshot(
				Request::builder()
					.uri(format!("/api/therapist/{}/practices", therapist.id))
					.body(Body::empty())
					.unwrap(),
			)
			.await
			.unwrap();
		assert_eq!(response.status(), StatusCode::OK);
		let practices = body_json(response).await;
		assert_eq!(practices.as_array().unwrap().len(), 1);

		let response = app
			.clone()
			.oneshot(
				Request::builder()
					.uri(format!("/api/therapist/{}", therapist.id))
					.body(Body::empty())
					.unwrap(),
			)
			.await
			.unwrap();
		let dto = body_json(response).await;
		assert_eq!(dto["specializationIds"][0], spec.id.as_str());
		assert_eq!(dto["practiceIds"][0], practice.id.as_str());

		let response = app
			.oneshot(
				Request::builder()
					.uri("/api/therapist/ghost/practices")
					.body(Body::empty())
					.unwrap(),
			)
			.await
			.unwrap();
		assert_eq!(response.status(), StatusCode::NOT_FOUND);
	}

	#[tokio::test]
	async fn test_workshift_create_and_filter() {
		let (app, state, _dir) = create_test_app().await;
		crate::seed::seed_database(&state).await.unwrap();

		let practice = state.practice_repo.list().await.unwrap().remove(0);
		let therapist = state
			.therapist_repo
			.create(praxis_server_db::NewTherapist {
				name: "Anna de Vries".to_string(),
				..Default::default()
			})
			.await
			.unwrap();

		let body = serde_json::json!({
			"therapistId": therapist.id.as_str(),
			"practiceId": practice.id.as_str(),
			"startTime": "2026-08-06T08:00:00Z",
			"endTime": "2026-08-06T16:00:00Z",
		});
		let response = app
			.clone()
			.oneshot(
				Request::builder()
					.method("POST")
					.uri("/api/workshift")
					.header("Content-Type", "application/json")
					.body(Body::from(body.to_string()))
					.unwrap(),
			)
			.await
			.unwrap();
		assert_eq!(response.status(), StatusCode::CREATED);
		let created = body_json(response).await;
		assert_eq!(created["therapist"]["name"], "Anna de Vries");

		let response = app
			.oneshot(
				Request::builder()
					.uri(format!("/api/workshift?therapistId={}", therapist.id))
					.body(Body::empty())
					.unwrap(),
			)
			.await
			.unwrap();
		assert_eq!(response.status(), StatusCode::OK);
		let shifts = body_json(response).await;
		assert_eq!(shifts.as_array().unwrap().len(), 1);
	}

	#[tokio::test]
	async fn test_appointment_crud_with_references() {
		let (app, state, _dir) = create_test_app().await;
		crate::seed::seed_database(&state).await.unwrap();

		let practice = state.practice_repo.list().await.unwrap().remove(0);
		let patient = state.patient_repo.list().await.unwrap().remove(0);
		let appointment_type = state.appointment_type_repo.list().await.unwrap().remove(0);
		let therapist = state
			.therapist_repo
			.create(praxis_server_db::NewTherapist {
				name: "Anna de Vries".to_string(),
				..Default::default()
			})
			.await
			.unwrap();

		let body = serde_json::json!({
			"patientId": patient.id.as_str(),
			"therapistId": therapist.id.as_str(),
			"practiceId": practice.id.as_str(),
			"appointmentTypeId": appointment_type.id.as_str(),
			"startTime": "2026-08-06T09:00:00Z",
			"endTime": "2026-08-06T09:30:00Z",
			"notes": "Knee follow-up",
		});
		let response = app
			.clone()
			.oneshot(
				Request::builder()
					.method("POST")
					.uri("/api/appointment")
					.header("Content-Type", "application/json")
					.body(Body::from(body.to_string()))
					.unwrap(),
			)
			.await
			.unwrap();
		assert_eq!(response.status(), StatusCode::CREATED);
		let created = body_json(response).await;
		let id = created["id"].as_str().unwrap().to_string();
		assert_eq!(created["appointmentType"]["name"], appointment_type.name);

		let response = app
			.clone()
			.oneshot(
				Request::builder()
					.uri(format!("/api/appointment/{id}/patient"))
					.body(Body::empty())
					.unwrap(),
			)
			.await
			.unwrap();
		assert_eq!(response.status(), StatusCode::OK);
		let got_patient = body_json(response).await;
		assert_eq!(got_patient["id"], patient.id.as_str());

		// Unknown reference on create is a bad request.
		let body = serde_json::json!({
			"patientId": "ghost",
			"therapistId": therapist.id.as_str(),
			"practiceId": practice.id.as_str(),
			"appointmentTypeId": appointment_type.id.as_str(),
			"startTime": "2026-08-06T09:00:00Z",
			"endTime": "2026-08-06T09:30:00Z",
		});
		let response = app
			.oneshot(
				Request::builder()
					.method("POST")
					.uri("/api/appointment")
					.header("Content-Type", "application/json")
					.body(Body::from(body.to_string()))
					.unwrap(),
			)
			.await
			.unwrap();
		assert_eq!(response.status(), StatusCode::BAD_REQUEST);
	}
}
