// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Waitlist Gate Contributors

use axum::{extract::State, Json};

use crate::error::ApiError;
use crate::models::{RegisterRequest, RegisterResponse, RegisteredEntry};
use crate::registration::{RegistrationError, RegistrationService};
use crate::state::AppState;

/// Register a verified wallet and its email on the waitlist.
#[utoipa::path(
    post,
    path = "/register",
    tag = "Waitlist",
    request_body = RegisterRequest,
    responses(
        (status = 200, description = "Registered", body = RegisterResponse),
        (status = 400, description = "Missing or malformed fields"),
        (status = 403, description = "Missing anti-forgery header"),
        (status = 409, description = "Wallet or email already registered"),
        (status = 429, description = "Rate limit exceeded"),
        (status = 500, description = "Registration failed")
    )
)]
pub async fn register(
    State(state): State<AppState>,
    Json(request): Json<RegisterRequest>,
) -> Result<Json<RegisterResponse>, ApiError> {
    let (Some(wallet_address), Some(email)) = (request.wallet_address, request.email) else {
        return Err(ApiError::bad_request(
            "Wallet address and email are required",
        ));
    };

    let service = RegistrationService::new(&state.db);
    let registration = service
        .register(&wallet_address, &email)
        .map_err(|e| match e {
            RegistrationError::InvalidWallet => ApiError::bad_request("Invalid wallet address"),
            RegistrationError::InvalidEmail => ApiError::bad_request("Invalid email address"),
            RegistrationError::WalletTaken => {
                ApiError::conflict("Wallet address already registered")
            }
            RegistrationError::EmailTaken => ApiError::conflict("Email already registered"),
            RegistrationError::Store(e) => {
                tracing::error!(error = %e, "registration store fault");
                ApiError::internal("Failed to register user")
            }
        })?;

    Ok(Json(RegisterResponse {
        success: true,
        data: RegisteredEntry {
            wallet_address: registration.wallet_address,
            created_at: registration.created_at,
        },
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    const WALLET: &str = "11111111111111111111111111111111";

    fn request(wallet: Option<&str>, email: Option<&str>) -> Json<RegisterRequest> {
        Json(RegisterRequest {
            wallet_address: wallet.map(String::from),
            email: email.map(String::from),
        })
    }

    #[tokio::test]
    async fn missing_fields_are_bad_request() {
        let state = AppState::for_tests();

        let err = register(State(state.clone()), request(Some(WALLET), None))
            .await
            .unwrap_err();
        assert_eq!(err.status, StatusCode::BAD_REQUEST);

        let err = register(State(state), request(None, Some("a@b.com")))
            .await
            .unwrap_err();
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn successful_registration_echoes_stored_record() {
        let state = AppState::for_tests();

        let Json(response) = register(State(state.clone()), request(Some(WALLET), Some("a@b.com")))
            .await
            .unwrap();

        assert!(response.success);
        assert_eq!(response.data.wallet_address, WALLET);

        let stored = state.db.get_by_wallet(WALLET).unwrap().unwrap();
        assert_eq!(stored.created_at, response.data.created_at);
        assert_eq!(stored.email, "a@b.com");
    }

    #[tokio::test]
    async fn duplicate_wallet_is_conflict() {
        let state = AppState::for_tests();
        register(State(state.clone()), request(Some(WALLET), Some("a@b.com")))
            .await
            .unwrap();

        let err = register(State(state), request(Some(WALLET), Some("x@y.com")))
            .await
            .unwrap_err();
        assert_eq!(err.status, StatusCode::CONFLICT);
        assert_eq!(err.message, "Wallet address already registered");
    }

    #[tokio::test]
    async fn duplicate_email_is_conflict() {
        let state = AppState::for_tests();
        register(State(state.clone()), request(Some(WALLET), Some("a@b.com")))
            .await
            .unwrap();

        let err = register(
            State(state),
            request(Some("22222222222222222222222222222222"), Some("a@b.com")),
        )
        .await
        .unwrap_err();
        assert_eq!(err.status, StatusCode::CONFLICT);
        assert_eq!(err.message, "Email already registered");
    }

    #[tokio::test]
    async fn invalid_email_is_bad_request() {
        let state = AppState::for_tests();
        let err = register(State(state), request(Some(WALLET), Some("nope")))
            .await
            .unwrap_err();
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
        assert_eq!(err.message, "Invalid email address");
    }
}
