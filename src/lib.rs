// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Waitlist Gate Contributors

//! Waitlist Gate - Balance-Gated Waitlist Service
//!
//! This crate provides a waitlist signup service gated behind an on-chain
//! Solana balance check: wallets holding at least the configured SOL
//! threshold may register an email, and a public counter exposes the
//! number of registrants.
//!
//! ## Modules
//!
//! - `api` - HTTP API handlers (Axum)
//! - `gate` - Request gate middleware (anti-forgery header, rate limit, session)
//! - `chain` - Solana JSON-RPC balance client
//! - `registration` - Validation, uniqueness, and persistence of signups
//! - `flow` - Client-facing verification state machine
//! - `storage` - Embedded registration database (redb)
//! - `poller` - Background reader of the public count

pub mod api;
pub mod chain;
pub mod config;
pub mod error;
pub mod flow;
pub mod gate;
pub mod models;
pub mod poller;
pub mod registration;
pub mod state;
pub mod storage;
