// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Waitlist Gate Contributors

//! Request gate middleware.
//!
//! Every API request passes through here before reaching a handler:
//!
//! 1. Non-public paths must carry the anti-forgery marker header
//!    (`X-Requested-With: XMLHttpRequest`), a lightweight same-origin
//!    signal. Absence or mismatch is a 403.
//! 2. The client identifier (forwarded-for / real-ip, else "anonymous")
//!    is counted against the rate limit; rejection is a 429.
//! 3. If the session cookie resolves to a known user, the response gains
//!    an `x-user-id` header. Best effort only.
//!
//! Gated responses carry `X-RateLimit-Limit` and `X-RateLimit-Remaining`.

pub mod rate_limit;
pub mod session;

pub use rate_limit::{RateLimitExceeded, RateLimiter, RateLimitStatus};
pub use session::SessionStore;

use axum::{
    extract::{Request, State},
    http::{header, HeaderName, HeaderValue},
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::config::{PUBLIC_ROUTES, REQUESTED_WITH_HEADER, REQUESTED_WITH_VALUE, SESSION_COOKIE};
use crate::error::ApiError;
use crate::state::AppState;

static RATE_LIMIT_LIMIT: HeaderName = HeaderName::from_static("x-ratelimit-limit");
static RATE_LIMIT_REMAINING: HeaderName = HeaderName::from_static("x-ratelimit-remaining");
static USER_ID: HeaderName = HeaderName::from_static("x-user-id");

/// Derive the rate-limit identifier for a request.
///
/// First of `x-forwarded-for`, `x-real-ip`; otherwise every unattributed
/// client shares the "anonymous" bucket.
fn client_identifier(request: &Request) -> String {
    for name in ["x-forwarded-for", "x-real-ip"] {
        if let Some(value) = request.headers().get(name).and_then(|v| v.to_str().ok()) {
            return value.to_string();
        }
    }
    "anonymous".to_string()
}

/// Axum middleware enforcing the header and rate checks.
///
/// A request failing either check never reaches its handler.
pub async fn request_gate(State(state): State<AppState>, request: Request, next: Next) -> Response {
    let path = request.uri().path();
    let is_public = PUBLIC_ROUTES.iter().any(|route| path.starts_with(route));

    if !is_public {
        let marker = request
            .headers()
            .get(REQUESTED_WITH_HEADER)
            .and_then(|v| v.to_str().ok());
        if marker != Some(REQUESTED_WITH_VALUE) {
            return ApiError::forbidden("Invalid request").into_response();
        }
    }

    let identifier = client_identifier(&request);
    let status = match state.limiter.check(&identifier, state.rate_limit) {
        Ok(status) => status,
        Err(RateLimitExceeded) => {
            tracing::warn!(identifier = %identifier, "rate limit exceeded");
            return ApiError::too_many_requests("Too many requests").into_response();
        }
    };

    // Resolve the session before the request (and its headers) move on.
    let user_id = request
        .headers()
        .get(header::COOKIE)
        .and_then(|v| v.to_str().ok())
        .and_then(|cookies| session::cookie_value(cookies, SESSION_COOKIE))
        .and_then(|token| state.sessions.resolve(token));

    let mut response = next.run(request).await;

    let headers = response.headers_mut();
    headers.insert(&RATE_LIMIT_LIMIT, HeaderValue::from(status.limit));
    headers.insert(&RATE_LIMIT_REMAINING, HeaderValue::from(status.remaining));
    if let Some(user_id) = user_id {
        if let Ok(value) = HeaderValue::from_str(&user_id) {
            headers.insert(&USER_ID, value);
        }
    }

    response
}
