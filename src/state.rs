// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Waitlist Gate Contributors

use std::sync::Arc;

use crate::chain::SolanaClient;
use crate::config::{RATE_LIMIT_INTERVAL, RATE_LIMIT_MAX_IDENTIFIERS, RATE_LIMIT_PER_INTERVAL};
use crate::gate::{RateLimiter, SessionStore};
use crate::storage::WaitlistDb;

/// Shared application state.
///
/// The database and rate-limit table are the only mutable state shared
/// across requests.
#[derive(Clone)]
pub struct AppState {
    pub db: Arc<WaitlistDb>,
    pub chain: Arc<SolanaClient>,
    pub limiter: Arc<RateLimiter>,
    pub sessions: Arc<SessionStore>,
    /// Requests allowed per identifier per window.
    pub rate_limit: u32,
}

impl AppState {
    pub fn new(db: WaitlistDb, chain: SolanaClient) -> Self {
        Self {
            db: Arc::new(db),
            chain: Arc::new(chain),
            limiter: Arc::new(RateLimiter::new(
                RATE_LIMIT_MAX_IDENTIFIERS,
                RATE_LIMIT_INTERVAL,
            )),
            sessions: Arc::new(SessionStore::new()),
            rate_limit: RATE_LIMIT_PER_INTERVAL,
        }
    }

    /// Override the per-window request limit.
    pub fn with_rate_limit(mut self, limit: u32) -> Self {
        self.rate_limit = limit;
        self
    }
}

#[cfg(test)]
impl AppState {
    /// State over a throwaway database and an unreachable RPC endpoint.
    pub fn for_tests() -> Self {
        use crate::config::RPC_TIMEOUT;

        let path =
            std::env::temp_dir().join(format!("test-state-{}.redb", uuid::Uuid::new_v4()));
        let db = WaitlistDb::open(&path).expect("open test db");
        let rpc_url = url::Url::parse("http://127.0.0.1:1/").unwrap();
        let chain = SolanaClient::new(rpc_url, RPC_TIMEOUT).unwrap();
        Self::new(db, chain)
    }

    /// Point the state's chain client at a test RPC endpoint.
    pub fn with_rpc(mut self, rpc_url: url::Url) -> Self {
        use std::time::Duration;
        self.chain = Arc::new(SolanaClient::new(rpc_url, Duration::from_secs(2)).unwrap());
        self
    }
}
