// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Waitlist Gate Contributors

//! Wire and storage models for the waitlist API.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// A waitlist registration as persisted in the store.
///
/// Records are append-only: created once by the registration service after
/// a successful balance verification, never mutated or deleted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Registration {
    /// Base58 wallet address, unique across all records.
    pub wallet_address: String,
    /// Lowercased email, unique across all records.
    pub email: String,
    /// Server-assigned creation timestamp.
    pub created_at: DateTime<Utc>,
}

/// Request body for `POST /get-balance`.
///
/// Fields are optional so a missing address maps to a 400 with a clear
/// message rather than a deserialization rejection. Clients may send an
/// extra `timestamp` field; unknown fields are ignored.
#[derive(Debug, Deserialize, ToSchema)]
pub struct BalanceRequest {
    pub address: Option<String>,
}

/// Response body for `POST /get-balance`.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct BalanceResponse {
    /// Balance in lamports (smallest native unit).
    pub balance: u64,
}

/// Request body for `POST /register`.
#[derive(Debug, Deserialize, ToSchema)]
pub struct RegisterRequest {
    pub wallet_address: Option<String>,
    pub email: Option<String>,
}

/// Response body for a successful `POST /register`.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct RegisterResponse {
    pub success: bool,
    pub data: RegisteredEntry,
}

/// The subset of the stored record echoed back to the registrant.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct RegisteredEntry {
    pub wallet_address: String,
    pub created_at: DateTime<Utc>,
}

/// Response body for `GET /count`.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CountResponse {
    pub count: u64,
}

/// Response body for `GET /health`.
#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    pub status: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn balance_request_ignores_extra_timestamp_field() {
        let req: BalanceRequest =
            serde_json::from_str(r#"{"address":"abc","timestamp":1700000000000}"#).unwrap();
        assert_eq!(req.address.as_deref(), Some("abc"));
    }

    #[test]
    fn balance_request_tolerates_missing_address() {
        let req: BalanceRequest = serde_json::from_str("{}").unwrap();
        assert!(req.address.is_none());
    }

    #[test]
    fn register_response_shape() {
        let resp = RegisterResponse {
            success: true,
            data: RegisteredEntry {
                wallet_address: "11111111111111111111111111111111".to_string(),
                created_at: Utc::now(),
            },
        };
        let json = serde_json::to_value(&resp).unwrap();
        assert_eq!(json["success"], true);
        assert_eq!(
            json["data"]["wallet_address"],
            "11111111111111111111111111111111"
        );
        assert!(json["data"]["created_at"].is_string());
    }
}
