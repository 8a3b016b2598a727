// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Waitlist Gate Contributors

//! Fixed-capacity, time-windowed request counter keyed by client
//! identifier.
//!
//! Backed by an in-process LRU map: at most `capacity` identifiers are
//! tracked, the least recently used evicted when full. Each identifier
//! carries a counter scoped to a window of `interval` length; a window
//! that has lapsed is replaced by a fresh one on the next request. State
//! is not persisted; it resets on process restart.

use std::num::NonZeroUsize;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use lru::LruCache;

/// Per-identifier counter window.
struct WindowEntry {
    count: u32,
    window_started: Instant,
}

/// Quota metadata attached to gated responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimitStatus {
    pub limit: u32,
    pub remaining: u32,
}

#[derive(Debug, thiserror::Error)]
#[error("rate limit exceeded")]
pub struct RateLimitExceeded;

/// In-process sliding-window rate limiter.
///
/// An explicit, injectable component owned by the request gate; callers
/// hold it behind an `Arc`. The internal mutex makes per-identifier
/// increments atomic with respect to concurrent requests.
pub struct RateLimiter {
    cache: Mutex<LruCache<String, WindowEntry>>,
    interval: Duration,
}

impl RateLimiter {
    /// Create a limiter tracking up to `capacity` identifiers with the
    /// given window length.
    pub fn new(capacity: usize, interval: Duration) -> Self {
        Self {
            cache: Mutex::new(LruCache::new(
                NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN),
            )),
            interval,
        }
    }

    /// Count one request for `identifier` against `limit`.
    ///
    /// The first request in a window sets the count to 1. A request that
    /// would push the count past `limit` fails and does not increment.
    pub fn check(
        &self,
        identifier: &str,
        limit: u32,
    ) -> Result<RateLimitStatus, RateLimitExceeded> {
        let mut cache = match self.cache.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };

        match cache.get_mut(identifier) {
            Some(entry) if entry.window_started.elapsed() < self.interval => {
                if entry.count >= limit {
                    return Err(RateLimitExceeded);
                }
                entry.count += 1;
                Ok(RateLimitStatus {
                    limit,
                    remaining: limit - entry.count,
                })
            }
            // Unknown identifier, or its window lapsed: start fresh.
            _ => {
                cache.put(
                    identifier.to_string(),
                    WindowEntry {
                        count: 1,
                        window_started: Instant::now(),
                    },
                );
                Ok(RateLimitStatus {
                    limit,
                    remaining: limit.saturating_sub(1),
                })
            }
        }
    }

    /// Current count for an identifier without touching recency order.
    ///
    /// Returns `None` if the identifier is untracked or its window lapsed.
    pub fn peek(&self, identifier: &str) -> Option<u32> {
        let cache = match self.cache.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        cache
            .peek(identifier)
            .filter(|entry| entry.window_started.elapsed() < self.interval)
            .map(|entry| entry.count)
    }
}
