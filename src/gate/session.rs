// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Waitlist Gate Contributors

//! Session-cookie collaborator for the request gate.
//!
//! The gate attaches an authenticated identity to responses when the
//! session cookie resolves to a known user. This is strictly best effort;
//! an absent or unknown cookie is not an error.

use std::collections::HashMap;
use std::sync::RwLock;

/// In-memory session token → user id lookup.
pub struct SessionStore {
    sessions: RwLock<HashMap<String, String>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
        }
    }

    /// Register a session token for a user.
    pub fn insert(&self, token: impl Into<String>, user_id: impl Into<String>) {
        if let Ok(mut sessions) = self.sessions.write() {
            sessions.insert(token.into(), user_id.into());
        }
    }

    /// Resolve a session token to a user id, if known.
    pub fn resolve(&self, token: &str) -> Option<String> {
        self.sessions.read().ok()?.get(token).cloned()
    }
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new()
    }
}

/// Extract a named cookie's value from a `Cookie` header string.
pub fn cookie_value<'a>(header: &'a str, name: &str) -> Option<&'a str> {
    header.split(';').find_map(|pair| {
        let (key, value) = pair.trim().split_once('=')?;
        (key == name).then_some(value)
    })
}
