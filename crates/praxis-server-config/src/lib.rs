// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Centralized configuration management for the Praxis server.
//!
//! This crate provides:
//! - Layered configuration from multiple sources (defaults, TOML file, environment)
//! - Type-safe configuration with validation
//! - Consistent environment variable naming (`PRAXIS_SERVER_*`)
//!
//! # Usage
//!
//! ```ignore
//! use praxis_server_config::load_config;
//!
//! let config = load_config()?;
//! println!("Server listening on {}:{}", config.http.host, config.http.port);
//! ```

pub mod error;
pub mod layer;
pub mod sections;
pub mod sources;

pub use error::ConfigError;
pub use layer::ServerConfigLayer;
pub use sections::*;
pub use sources::{ConfigSource, DefaultsSource, EnvSource, Precedence, TomlSource};

use tracing::{debug, info};

/// Fully resolved server configuration.
#[derive(Debug, Clone, Default)]
pub struct ServerConfig {
	pub http: HttpConfig,
	pub database: DatabaseConfig,
	pub logging: LoggingConfig,
	pub access: AccessConfig,
	pub seed: SeedConfig,
}

impl ServerConfig {
	/// Get the socket address string for binding.
	pub fn socket_addr(&self) -> String {
		format!("{}:{}", self.http.host, self.http.port)
	}
}

/// Load configuration from all sources with standard precedence.
///
/// Precedence (highest to lowest):
/// 1. Environment variables (`PRAXIS_SERVER_*`)
/// 2. Config file (`/etc/praxis/server.toml`)
/// 3. Built-in defaults
pub fn load_config() -> Result<ServerConfig, ConfigError> {
	load_from_sources(vec![
		Box::new(DefaultsSource),
		Box::new(TomlSource::system()),
		Box::new(EnvSource),
	])
}

/// Load configuration from environment only (for testing or simple deployments).
pub fn load_config_from_env() -> Result<ServerConfig, ConfigError> {
	let mut merged = ServerConfigLayer::default();
	merged.merge(EnvSource.load()?);
	finalize(merged)
}

/// Load configuration with a custom config file path.
pub fn load_config_with_file(
	config_path: impl Into<std::path::PathBuf>,
) -> Result<ServerConfig, ConfigError> {
	load_from_sources(vec![
		Box::new(DefaultsSource),
		Box::new(TomlSource::new(config_path)),
		Box::new(EnvSource),
	])
}

fn load_from_sources(mut sources: Vec<Box<dyn ConfigSource>>) -> Result<ServerConfig, ConfigError> {
	sources.sort_by_key(|s| s.precedence());

	let mut merged = ServerConfigLayer::default();
	for source in sources {
		debug!(source = source.name(), "loading configuration source");
		let layer = source.load()?;
		merged.merge(layer);
	}

	finalize(merged)
}

/// Finalize configuration layer into resolved config.
fn finalize(layer: ServerConfigLayer) -> Result<ServerConfig, ConfigError> {
	let http = layer.http.unwrap_or_default().finalize();
	let database = layer.database.unwrap_or_default().finalize();
	let logging = layer.logging.unwrap_or_default().finalize();
	let access = layer.access.unwrap_or_default().finalize();
	let seed = layer.seed.unwrap_or_default().finalize();

	validate_config(&access)?;

	info!(
		host = %http.host,
		port = http.port,
		database = %database.url,
		access_queue_capacity = access.queue_capacity,
		access_retention_days = access.retention_days,
		seed_enabled = seed.enabled,
		"Server configuration loaded"
	);

	Ok(ServerConfig {
		http,
		database,
		logging,
		access,
		seed,
	})
}

/// Validate cross-field configuration rules.
fn validate_config(access: &AccessConfig) -> Result<(), ConfigError> {
	if access.retention_days < MIN_RETENTION_DAYS {
		return Err(ConfigError::Validation(format!(
			"PRAXIS_SERVER_ACCESS_RETENTION_DAYS must be at least {MIN_RETENTION_DAYS} \
			 (got {})",
			access.retention_days
		)));
	}

	if access.queue_capacity == 0 {
		return Err(ConfigError::Validation(
			"PRAXIS_SERVER_ACCESS_QUEUE_CAPACITY must be greater than zero".to_string(),
		));
	}

	Ok(())
}
