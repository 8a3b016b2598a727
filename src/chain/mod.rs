// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Waitlist Gate Contributors

//! Solana chain integration: address validation, unit conversion, and the
//! JSON-RPC balance client.

pub mod client;

pub use client::{ChainError, SolanaClient};

use crate::config::{LAMPORTS_PER_SOL, MIN_BALANCE_SOL};

/// Syntactic check for a base58 Solana wallet address.
///
/// Base58 alphabet (no `0`, `O`, `I`, `l`), 32 to 44 characters. Checked
/// before any network call so malformed input fails fast.
pub fn is_valid_wallet_address(address: &str) -> bool {
    (32..=44).contains(&address.len())
        && address
            .chars()
            .all(|c| c.is_ascii_alphanumeric() && !matches!(c, '0' | 'O' | 'I' | 'l'))
}

/// Convert lamports to whole SOL.
pub fn lamports_to_sol(lamports: u64) -> f64 {
    lamports as f64 / LAMPORTS_PER_SOL as f64
}

/// Whether a lamport balance meets the waitlist admission threshold.
///
/// Compared in lamports so the boundary is exact: 250 SOL admits,
/// 249.999999999 SOL does not.
pub fn meets_threshold(lamports: u64) -> bool {
    lamports >= MIN_BALANCE_SOL * LAMPORTS_PER_SOL
}
