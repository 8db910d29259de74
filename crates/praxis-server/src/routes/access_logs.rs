// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Access log query and cleanup HTTP handlers.

use axum::{
	extract::{Path, Query, State},
	Json,
};
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{
	api::AppState,
	dto::{AccessLogDto, AccessLogStatsDto},
	error::ServerError,
	pagination::{total_pages, PageParams},
};

const MAX_PAGE_SIZE: i64 = 1000;
const MAX_RECENT_LIMIT: i64 = 1000;
const MAX_SEARCH_RESULTS: i64 = 500;
const MIN_CLEANUP_DAYS: i64 = 7;

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AccessLogPage {
	pub data: Vec<AccessLogDto>,
	pub page: i64,
	pub page_size: i64,
	pub total_count: i64,
	pub total_pages: i64,
}

#[utoipa::path(
    get,
    path = "/api/accesslog/all",
    params(
        ("page" = Option<i64>, Query, description = "1-based page number"),
        ("pageSize" = Option<i64>, Query, description = "Page size, capped at 1000")
    ),
    responses(
        (status = 200, description = "One page of access logs", body = AccessLogPage)
    ),
    tag = "accesslog"
)]
/// GET /api/accesslog/all - Paginated access logs, newest first.
#[tracing::instrument(skip(state))]
pub async fn get_all(
	State(state): State<AppState>,
	Query(params): Query<PageParams>,
) -> Result<Json<AccessLogPage>, ServerError> {
	let page = params.page_or_default();
	let page_size = params.page_size_clamped(50, MAX_PAGE_SIZE);

	let (entries, total_count) = state.access_log_repo.list_page(page, page_size).await?;

	Ok(Json(AccessLogPage {
		data: entries.into_iter().map(AccessLogDto::from).collect(),
		page,
		page_size,
		total_count,
		total_pages: total_pages(total_count, page_size),
	}))
}

#[utoipa::path(
    get,
    path = "/api/accesslog/{id}",
    params(("id" = String, Path, description = "Access log entry id")),
    responses(
        (status = 200, description = "The access log entry", body = AccessLogDto),
        (status = 404, description = "No entry with this id")
    ),
    tag = "accesslog"
)]
/// GET /api/accesslog/{id} - Single entry by id.
#[tracing::instrument(skip(state))]
pub async fn get_by_id(
	State(state): State<AppState>,
	Path(id): Path<String>,
) -> Result<Json<AccessLogDto>, ServerError> {
	let entry = state
		.access_log_repo
		.get(&id)
		.await?
		.ok_or_else(|| ServerError::not_found(format!("Access log with id {id} not found")))?;

	Ok(Json(entry.into()))
}

#[derive(Debug, Deserialize)]
pub struct RecentParams {
	pub hours: Option<i64>,
	pub limit: Option<i64>,
}

#[utoipa::path(
    get,
    path = "/api/accesslog/recent",
    params(
        ("hours" = Option<i64>, Query, description = "Window in hours, default 24"),
        ("limit" = Option<i64>, Query, description = "Maximum results, capped at 1000")
    ),
    responses(
        (status = 200, description = "Entries within the window", body = [AccessLogDto])
    ),
    tag = "accesslog"
)]
/// GET /api/accesslog/recent - Entries within the last N hours.
#[tracing::instrument(skip(state))]
pub async fn get_recent(
	State(state): State<AppState>,
	Query(params): Query<RecentParams>,
) -> Result<Json<Vec<AccessLogDto>>, ServerError> {
	let limit = params.limit.unwrap_or(100).min(MAX_RECENT_LIMIT).max(1);
	let since = since_hours(params.hours);

	let entries = state.access_log_repo.list_since(since, limit).await?;

	Ok(Json(entries.into_iter().map(AccessLogDto::from).collect()))
}

#[derive(Debug, Deserialize)]
pub struct StatsParams {
	pub hours: Option<i64>,
}

#[utoipa::path(
    get,
    path = "/api/accesslog/stats",
    params(("hours" = Option<i64>, Query, description = "Window in hours, default 24")),
    responses(
        (status = 200, description = "Stats grouped by method and path", body = [AccessLogStatsDto])
    ),
    tag = "accesslog"
)]
/// GET /api/accesslog/stats - Per-endpoint request statistics.
#[tracing::instrument(skip(state))]
pub async fn get_stats(
	State(state): State<AppState>,
	Query(params): Query<StatsParams>,
) -> Result<Json<Vec<AccessLogStatsDto>>, ServerError> {
	let since = since_hours(params.hours);

	let stats = state.access_log_repo.stats_since(since).await?;

	Ok(Json(stats.into_iter().map(AccessLogStatsDto::from).collect()))
}

#[derive(Debug, Deserialize)]
pub struct SearchParams {
	pub ip: Option<String>,
	pub path: Option<String>,
	pub method: Option<String>,
	pub hours: Option<i64>,
}

#[utoipa::path(
    get,
    path = "/api/accesslog/search",
    params(
        ("ip" = Option<String>, Query, description = "Substring match on the client IP"),
        ("path" = Option<String>, Query, description = "Substring match on the request path"),
        ("method" = Option<String>, Query, description = "Case-insensitive HTTP method match"),
        ("hours" = Option<i64>, Query, description = "Window in hours, default 24")
    ),
    responses(
        (status = 200, description = "Matching entries, capped at 500", body = [AccessLogDto])
    ),
    tag = "accesslog"
)]
/// GET /api/accesslog/search - Filtered search over recent entries.
#[tracing::instrument(skip(state))]
pub async fn search(
	State(state): State<AppState>,
	Query(params): Query<SearchParams>,
) -> Result<Json<Vec<AccessLogDto>>, ServerError> {
	let since = since_hours(params.hours);

	let entries = state
		.access_log_repo
		.search(
			params.ip.as_deref().filter(|s| !s.is_empty()),
			params.path.as_deref().filter(|s| !s.is_empty()),
			params.method.as_deref().filter(|s| !s.is_empty()),
			since,
			MAX_SEARCH_RESULTS,
		)
		.await?;

	Ok(Json(entries.into_iter().map(AccessLogDto::from).collect()))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CleanupParams {
	pub older_than_days: Option<i64>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CleanupResponse {
	pub deleted_count: u64,
	pub cutoff_date: DateTime<Utc>,
}

#[utoipa::path(
    delete,
    path = "/api/accesslog/cleanup",
    params(("olderThanDays" = Option<i64>, Query, description = "Retention age in days, default 90, minimum 7")),
    responses(
        (status = 200, description = "Deleted row count and cutoff", body = CleanupResponse),
        (status = 400, description = "Retention below the 7-day floor")
    ),
    tag = "accesslog"
)]
/// DELETE /api/accesslog/cleanup - Bulk retention cleanup.
#[tracing::instrument(skip(state))]
pub async fn cleanup(
	State(state): State<AppState>,
	Query(params): Query<CleanupParams>,
) -> Result<Json<CleanupResponse>, ServerError> {
	let older_than_days = params.older_than_days.unwrap_or(90);
	if older_than_days < MIN_CLEANUP_DAYS {
		return Err(ServerError::bad_request(
			"Cannot delete logs newer than 7 days",
		));
	}

	let cutoff_date = Utc::now() - Duration::days(older_than_days);
	let deleted_count = state.access_log_repo.delete_older_than(cutoff_date).await?;

	tracing::info!(
		deleted = deleted_count,
		days = older_than_days,
		"cleaned up access logs"
	);

	Ok(Json(CleanupResponse {
		deleted_count,
		cutoff_date,
	}))
}

fn since_hours(hours: Option<i64>) -> DateTime<Utc> {
	Utc::now() - Duration::hours(hours.unwrap_or(24).abs())
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_since_hours_uses_absolute_value() {
		let now = Utc::now();
		let since = since_hours(Some(-48));
		let delta = now - since;
		assert!(delta >= Duration::hours(47) && delta <= Duration::hours(49));
	}

	#[test]
	fn test_since_hours_default_is_24() {
		let now = Utc::now();
		let since = since_hours(None);
		let delta = now - since;
		assert!(delta >= Duration::hours(23) && delta <= Duration::hours(25));
	}
}
