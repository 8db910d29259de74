// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Configuration sections, each with a resolved struct and a partial layer.

mod access;
mod database;
mod http;
mod logging;
mod seed;

pub use access::{AccessConfig, AccessConfigLayer, MIN_RETENTION_DAYS};
pub use database::{DatabaseConfig, DatabaseConfigLayer};
pub use http::{HttpConfig, HttpConfigLayer};
pub use logging::{LoggingConfig, LoggingConfigLayer};
pub use seed::{SeedConfig, SeedConfigLayer};
