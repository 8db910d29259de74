// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Praxis practice-management server.
//!
//! This crate provides an HTTP server for a physiotherapy practice:
//! patients, therapists, practices, appointments and workshifts over a
//! SQLite database, with an access log recorded for every API request.

pub mod access_middleware;
pub mod api;
pub mod api_docs;
pub mod client_info;
pub mod dto;
pub mod error;
pub mod pagination;
pub mod retention;
pub mod routes;
pub mod seed;

pub use api::{create_app_state, create_router, AppState};
pub use api_docs::ApiDoc;
pub use error::ServerError;
pub use praxis_server_config::ServerConfig;
pub use retention::RetentionJob;
