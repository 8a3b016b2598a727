// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Waitlist Gate Contributors

//! # Registrant Count Poller
//!
//! Background task that periodically fetches the public `/count` endpoint
//! and publishes the latest value through a watch channel, backing a live
//! counter display.
//!
//! ## Strategy
//!
//! Every `poll_interval` (default 5 s) the poller spawns one fetch. The
//! fetch runs detached, so a slow or hung response never delays the next
//! tick; overlapping in-flight requests are tolerated and the channel
//! simply carries whichever result lands last.
//!
//! ## Shutdown
//!
//! Uses `tokio_util::sync::CancellationToken`; cancellation stops the
//! tick loop immediately regardless of in-flight fetches.

use std::time::Duration;

use tokio::sync::watch;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};
use url::Url;

use crate::config::COUNT_POLL_INTERVAL;
use crate::models::CountResponse;

/// Periodic reader of the public registration counter.
pub struct CountPoller {
    http: reqwest::Client,
    count_url: Url,
    poll_interval: Duration,
    tx: watch::Sender<Option<u64>>,
}

impl CountPoller {
    /// Create a poller for the given `/count` URL.
    ///
    /// The receiver starts at `None` and carries the most recently
    /// fetched count thereafter.
    pub fn new(count_url: Url) -> (Self, watch::Receiver<Option<u64>>) {
        let (tx, rx) = watch::channel(None);
        (
            Self {
                http: reqwest::Client::new(),
                count_url,
                poll_interval: COUNT_POLL_INTERVAL,
                tx,
            },
            rx,
        )
    }

    /// Override the polling interval.
    pub fn with_interval(mut self, poll_interval: Duration) -> Self {
        self.poll_interval = poll_interval;
        self
    }

    /// Run the poll loop until the cancellation token is triggered.
    ///
    /// Should be spawned as a background task:
    /// ```rust,ignore
    /// tokio::spawn(poller.run(shutdown.clone()));
    /// ```
    pub async fn run(self, shutdown: CancellationToken) {
        info!(
            interval_secs = self.poll_interval.as_secs_f64(),
            "count poller starting"
        );

        loop {
            if shutdown.is_cancelled() {
                info!("count poller shutting down");
                return;
            }

            // Detach the fetch so the tick cadence is independent of
            // response latency.
            let http = self.http.clone();
            let url = self.count_url.clone();
            let tx = self.tx.clone();
            tokio::spawn(async move {
                match fetch_count(&http, url).await {
                    Ok(count) => {
                        let _ = tx.send(Some(count));
                    }
                    Err(e) => warn!(error = %e, "count poll failed"),
                }
            });

            tokio::select! {
                _ = tokio::time::sleep(self.poll_interval) => {}
                _ = shutdown.cancelled() => {
                    info!("count poller shutting down");
                    return;
                }
            }
        }
    }
}

async fn fetch_count(http: &reqwest::Client, url: Url) -> Result<u64, reqwest::Error> {
    let response: CountResponse = http
        .get(url)
        .send()
        .await?
        .error_for_status()?
        .json()
        .await?;
    Ok(response.count)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::router;
    use crate::models::Registration;
    use crate::state::AppState;
    use chrono::Utc;

    async fn serve(state: AppState) -> Url {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router(state)).await.unwrap();
        });
        Url::parse(&format!("http://{addr}/count")).unwrap()
    }

    #[tokio::test]
    async fn publishes_live_count_and_stops_on_cancel() {
        let state = AppState::for_tests();
        let url = serve(state.clone()).await;

        let (poller, mut rx) = CountPoller::new(url);
        let poller = poller.with_interval(Duration::from_millis(25));
        let shutdown = CancellationToken::new();
        let handle = tokio::spawn(poller.run(shutdown.clone()));

        tokio::time::timeout(Duration::from_secs(2), rx.changed())
            .await
            .expect("first poll")
            .unwrap();
        assert_eq!(*rx.borrow(), Some(0));

        state
            .db
            .insert(&Registration {
                wallet_address: "11111111111111111111111111111111".to_string(),
                email: "a@b.com".to_string(),
                created_at: Utc::now(),
            })
            .unwrap();

        tokio::time::timeout(Duration::from_secs(2), async {
            loop {
                rx.changed().await.unwrap();
                if *rx.borrow() == Some(1) {
                    break;
                }
            }
        })
        .await
        .expect("count should reach 1");

        shutdown.cancel();
        tokio::time::timeout(Duration::from_secs(2), handle)
            .await
            .expect("poller should stop promptly")
            .unwrap();
    }

    #[tokio::test]
    async fn slow_endpoint_does_not_block_shutdown() {
        use axum::{routing::get, Router};

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let app = Router::new().route(
            "/count",
            get(|| async {
                tokio::time::sleep(Duration::from_secs(30)).await;
                "never"
            }),
        );
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        let url = Url::parse(&format!("http://{addr}/count")).unwrap();
        let (poller, _rx) = CountPoller::new(url);
        let poller = poller.with_interval(Duration::from_millis(25));
        let shutdown = CancellationToken::new();
        let handle = tokio::spawn(poller.run(shutdown.clone()));

        // Let at least one fetch get stuck in flight.
        tokio::time::sleep(Duration::from_millis(60)).await;

        shutdown.cancel();
        tokio::time::timeout(Duration::from_secs(1), handle)
            .await
            .expect("poller should stop despite in-flight fetch")
            .unwrap();
    }
}
