// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Waitlist Gate Contributors

use axum::{extract::State, http::header, response::IntoResponse, Json};

use crate::error::ApiError;
use crate::models::CountResponse;
use crate::state::AppState;

/// Number of waitlist registrations.
///
/// Public endpoint backing the live counter display. The value is live,
/// so intermediaries are told not to cache it.
#[utoipa::path(
    get,
    path = "/count",
    tag = "Waitlist",
    responses(
        (status = 200, description = "Current registration count", body = CountResponse),
        (status = 500, description = "Count unavailable")
    )
)]
pub async fn get_count(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let count = state.db.count().map_err(|e| {
        tracing::error!(error = %e, "failed to count registrations");
        ApiError::internal("Failed to fetch records")
    })?;

    Ok((
        [(header::CACHE_CONTROL, "no-store")],
        Json(CountResponse { count }),
    ))
}
