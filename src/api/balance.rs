// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Waitlist Gate Contributors

use axum::{extract::State, Json};

use crate::chain::ChainError;
use crate::error::ApiError;
use crate::models::{BalanceRequest, BalanceResponse};
use crate::state::AppState;

/// Query the lamport balance of a wallet address.
///
/// The admission threshold is applied by the caller; a low balance is not
/// an error here.
#[utoipa::path(
    post,
    path = "/get-balance",
    tag = "Waitlist",
    request_body = BalanceRequest,
    responses(
        (status = 200, description = "Balance in lamports", body = BalanceResponse),
        (status = 400, description = "Missing or malformed wallet address"),
        (status = 403, description = "Missing anti-forgery header"),
        (status = 429, description = "Rate limit exceeded"),
        (status = 500, description = "Balance query failed")
    )
)]
pub async fn get_balance(
    State(state): State<AppState>,
    Json(request): Json<BalanceRequest>,
) -> Result<Json<BalanceResponse>, ApiError> {
    let address = request
        .address
        .as_deref()
        .map(str::trim)
        .filter(|a| !a.is_empty())
        .ok_or_else(|| ApiError::bad_request("Wallet address is required"))?;

    let balance = state.chain.get_balance(address).await.map_err(|e| match e {
        ChainError::InvalidAddress => ApiError::bad_request("Invalid wallet address"),
        ChainError::UpstreamStatus(status) => {
            tracing::warn!(status, "balance RPC returned non-success status");
            ApiError::upstream(status, "RPC error")
        }
        other => {
            tracing::error!(error = %other, "balance query failed");
            ApiError::internal("Server error")
        }
    })?;

    Ok(Json(BalanceResponse { balance }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    #[tokio::test]
    async fn missing_address_is_bad_request() {
        let state = AppState::for_tests();
        let err = get_balance(State(state), Json(BalanceRequest { address: None }))
            .await
            .unwrap_err();
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
        assert_eq!(err.message, "Wallet address is required");
    }

    #[tokio::test]
    async fn blank_address_is_bad_request() {
        let state = AppState::for_tests();
        let err = get_balance(
            State(state),
            Json(BalanceRequest {
                address: Some("   ".to_string()),
            }),
        )
        .await
        .unwrap_err();
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn malformed_address_is_bad_request_without_rpc() {
        // The test state's RPC endpoint is unreachable, so a 400 here
        // proves the validation ran before any network call.
        let state = AppState::for_tests();
        let err = get_balance(
            State(state),
            Json(BalanceRequest {
                address: Some("not-a-wallet".to_string()),
            }),
        )
        .await
        .unwrap_err();
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
        assert_eq!(err.message, "Invalid wallet address");
    }
}
