// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Waitlist Gate Contributors

//! # Runtime Configuration Constants
//!
//! This module defines environment variable names and default values used
//! throughout the application. Configuration is loaded from the environment
//! at startup.
//!
//! ## Environment Variables
//!
//! | Variable | Description | Default |
//! |----------|-------------|---------|
//! | `DATA_DIR` | Root directory for the embedded database | `./data` |
//! | `HOST` | Server bind address | `0.0.0.0` |
//! | `PORT` | Server bind port | `8080` |
//! | `SOLANA_RPC_URL` | Solana JSON-RPC endpoint for balance queries | mainnet-beta |
//! | `LOG_FORMAT` | Logging format (`json` or `pretty`) | `pretty` |
//! | `RUST_LOG` | Log level filter | `info,tower_http=debug` |

use std::time::Duration;

/// Environment variable name for the data directory path.
///
/// The embedded registration database lives here as `waitlist.redb`.
pub const DATA_DIR_ENV: &str = "DATA_DIR";

/// Default data directory when `DATA_DIR` is unset.
pub const DEFAULT_DATA_DIR: &str = "./data";

/// Environment variable name for the Solana JSON-RPC endpoint.
pub const RPC_URL_ENV: &str = "SOLANA_RPC_URL";

/// Default Solana JSON-RPC endpoint (mainnet-beta).
pub const DEFAULT_RPC_URL: &str = "https://api.mainnet-beta.solana.com";

/// Explicit timeout applied to every balance RPC call.
///
/// The upstream provider specifies no timeout of its own; this bounds
/// worst-case handler latency.
pub const RPC_TIMEOUT: Duration = Duration::from_secs(10);

/// Minimum whole-SOL balance required to join the waitlist.
///
/// The original deployment's UI copy said 500 SOL while the enforced
/// check was 250; the numeric check is the integration contract and is
/// preserved here.
pub const MIN_BALANCE_SOL: u64 = 250;

/// Lamports per SOL (smallest native unit).
pub const LAMPORTS_PER_SOL: u64 = 1_000_000_000;

/// Rate-limit window length.
pub const RATE_LIMIT_INTERVAL: Duration = Duration::from_millis(60_000);

/// Maximum distinct client identifiers tracked at once.
///
/// The identifier table is LRU-evicted beyond this.
pub const RATE_LIMIT_MAX_IDENTIFIERS: usize = 500;

/// Requests allowed per identifier per window.
pub const RATE_LIMIT_PER_INTERVAL: u32 = 100;

/// Anti-forgery marker header required on non-public API calls.
pub const REQUESTED_WITH_HEADER: &str = "x-requested-with";

/// Expected value of the anti-forgery marker header.
pub const REQUESTED_WITH_VALUE: &str = "XMLHttpRequest";

/// Session cookie name resolved by the request gate (best effort).
pub const SESSION_COOKIE: &str = "waitlist_session";

/// Paths exempt from the anti-forgery header check.
///
/// Rate limiting still applies to these; only the header requirement is
/// skipped.
pub const PUBLIC_ROUTES: &[&str] = &["/count", "/health"];

/// Client-side verification attempts allowed before local throttling.
pub const MAX_VERIFY_ATTEMPTS: u32 = 5;

/// Interval between registrant-count polls.
pub const COUNT_POLL_INTERVAL: Duration = Duration::from_secs(5);
