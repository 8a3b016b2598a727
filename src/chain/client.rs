// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Waitlist Gate Contributors

//! Solana JSON-RPC client for balance queries.

use serde::Deserialize;
use serde_json::json;
use url::Url;

use super::is_valid_wallet_address;

#[derive(Debug, thiserror::Error)]
pub enum ChainError {
    #[error("invalid wallet address")]
    InvalidAddress,

    #[error("balance RPC returned status {0}")]
    UpstreamStatus(u16),

    #[error("balance RPC error {code}: {message}")]
    Rpc { code: i64, message: String },

    #[error("malformed balance RPC response")]
    MalformedResponse,

    #[error("balance RPC transport error: {0}")]
    Transport(#[from] reqwest::Error),
}

/// `getBalance` response envelope (JSON-RPC 2.0).
#[derive(Debug, Deserialize)]
struct RpcResponse {
    result: Option<RpcResult>,
    error: Option<RpcErrorObject>,
}

#[derive(Debug, Deserialize)]
struct RpcResult {
    value: u64,
}

#[derive(Debug, Deserialize)]
struct RpcErrorObject {
    code: i64,
    message: String,
}

/// Stateless Solana JSON-RPC client.
///
/// Pure request/response; holds only the endpoint URL and a pooled HTTP
/// client with an explicit per-request timeout.
pub struct SolanaClient {
    http: reqwest::Client,
    rpc_url: Url,
}

impl SolanaClient {
    /// Create a client for the given RPC endpoint.
    pub fn new(rpc_url: Url, timeout: std::time::Duration) -> Result<Self, ChainError> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self { http, rpc_url })
    }

    /// Query the lamport balance of a wallet address.
    ///
    /// A syntactically malformed address fails with `InvalidAddress`
    /// before any network traffic.
    pub async fn get_balance(&self, address: &str) -> Result<u64, ChainError> {
        if !is_valid_wallet_address(address) {
            return Err(ChainError::InvalidAddress);
        }

        let request = json!({
            "jsonrpc": "2.0",
            "id": 1,
            "method": "getBalance",
            "params": [address],
        });

        let response = self
            .http
            .post(self.rpc_url.clone())
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ChainError::UpstreamStatus(status.as_u16()));
        }

        let body: RpcResponse = response.json().await?;
        if let Some(err) = body.error {
            return Err(ChainError::Rpc {
                code: err.code,
                message: err.message,
            });
        }

        body.result
            .map(|r| r.value)
            .ok_or(ChainError::MalformedResponse)
    }
}
