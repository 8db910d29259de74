// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Client metadata extraction from request headers.

use std::net::SocketAddr;

use axum::extract::ConnectInfo;
use axum::http::{HeaderMap, Request};

/// Resolve the client IP with proxy-header fallback.
///
/// Order: first `X-Forwarded-For` value, then `X-Real-IP`, then the
/// transport peer address, then the literal "Unknown".
pub fn client_ip<B>(request: &Request<B>) -> String {
	if let Some(forwarded_for) = header_str(request.headers(), "x-forwarded-for") {
		if let Some(first) = forwarded_for.split(',').next() {
			let first = first.trim();
			if !first.is_empty() {
				return first.to_string();
			}
		}
	}

	if let Some(real_ip) = header_str(request.headers(), "x-real-ip") {
		return real_ip.to_string();
	}

	if let Some(ConnectInfo(addr)) = request.extensions().get::<ConnectInfo<SocketAddr>>() {
		return addr.ip().to_string();
	}

	"Unknown".to_string()
}

pub fn user_agent<B>(request: &Request<B>) -> Option<String> {
	header_str(request.headers(), "user-agent").map(str::to_string)
}

pub fn session_id<B>(request: &Request<B>) -> Option<String> {
	header_str(request.headers(), "x-session-id").map(str::to_string)
}

fn header_str<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
	headers
		.get(name)
		.and_then(|value| value.to_str().ok())
		.filter(|value| !value.is_empty())
}
