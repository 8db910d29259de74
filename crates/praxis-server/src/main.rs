// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Praxis practice-management server binary.

use std::sync::Arc;
use std::time::Duration;

use clap::{Parser, Subcommand};
use praxis_server::{create_app_state, create_router, RetentionJob};
use tokio::sync::broadcast;
use tower_http::{
	cors::{Any, CorsLayer},
	trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Praxis server - HTTP server for the practice-management API.
#[derive(Parser, Debug)]
#[command(name = "praxis-server", about = "Praxis practice-management server", version)]
struct Args {
	/// Subcommands for praxis-server (e.g., `version`)
	#[command(subcommand)]
	command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
	/// Show version information
	Version,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
	// Parse CLI arguments
	let args = Args::parse();

	if let Some(Command::Version) = args.command {
		println!("praxis-server {}", env!("CARGO_PKG_VERSION"));
		return Ok(());
	}

	// Load .env file if present
	dotenvy::dotenv().ok();

	// Load configuration
	let config = praxis_server_config::load_config()?;

	// Setup tracing
	tracing_subscriber::registry()
		.with(
			tracing_subscriber::EnvFilter::try_from_default_env()
				.unwrap_or_else(|_| config.logging.level.clone().into()),
		)
		.with(tracing_subscriber::fmt::layer())
		.init();

	tracing::info!(
		host = %config.http.host,
		port = config.http.port,
		database = %config.database.url,
		"starting praxis-server"
	);

	// Create database pool and run migrations
	let pool = praxis_server_db::create_pool(&config.database.url).await?;
	praxis_server_db::run_migrations(&pool).await?;

	let state = create_app_state(pool, &config);

	// Seed baseline reference and demo data
	if config.seed.enabled {
		praxis_server::seed::seed_database(&state).await?;
	}

	// Register the daily access log retention job
	let (shutdown_tx, _) = broadcast::channel(1);
	let retention_handle = RetentionJob::new(
		Arc::clone(&state.access_log_repo),
		config.access.retention_days,
	)
	.spawn(Duration::from_secs(24 * 60 * 60), shutdown_tx.subscribe());

	let app = create_router(state)
		.layer(TraceLayer::new_for_http())
		.layer(
			CorsLayer::new()
				.allow_origin(Any)
				.allow_methods(Any)
				.allow_headers(Any),
		);

	// Start server
	let addr = config.socket_addr();
	tracing::info!("listening on {}", addr);

	let listener = tokio::net::TcpListener::bind(&addr).await?;

	// Run server with graceful shutdown; connect info feeds the client IP
	// fallback in the access log.
	tokio::select! {
		result = axum::serve(
			listener,
			app.into_make_service_with_connect_info::<std::net::SocketAddr>(),
		) => {
			if let Err(e) = result {
				tracing::error!(error = %e, "Server error");
			}
		}
		_ = tokio::signal::ctrl_c() => {
			tracing::info!("Received shutdown signal");
			let _ = shutdown_tx.send(());
			let _ = retention_handle.await;
		}
	}

	tracing::info!("Server shutdown complete");
	Ok(())
}
