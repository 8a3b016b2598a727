// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Waitlist Gate Contributors

//! # Persistent Storage Module
//!
//! Registrations are held in an embedded redb database (pure Rust, ACID).
//! The write transaction is the authoritative uniqueness guarantee for
//! both the wallet address and the email; any advisory existence checks
//! performed above this layer are a fast path for friendly error
//! messages, not a correctness mechanism.

pub mod registrations;

pub use registrations::{StoreError, StoreResult, WaitlistDb};
