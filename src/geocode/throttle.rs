//! Minimum spacing between outbound geocoder requests

use std::time::{Duration, Instant};

/// Tracks the last request and enforces a minimum interval before the next
#[derive(Debug, Clone)]
pub struct Throttle {
    min_interval: Duration,
    last_request: Option<Instant>,
}

impl Throttle {
    pub fn new(min_interval: Duration) -> Self {
        Self {
            min_interval,
            last_request: None,
        }
    }

    /// Returns None if a request can go out at `now`, or the residual wait
    pub fn time_until_ready(&self, now: Instant) -> Option<Duration> {
        let last = self.last_request?;
        let elapsed = now.saturating_duration_since(last);
        if elapsed < self.min_interval {
            Some(self.min_interval - elapsed)
        } else {
            None
        }
    }

    /// Sleeps out the residual interval, then stamps the new request time
    pub async fn wait(&mut self) {
        if let Some(wait) = self.time_until_ready(Instant::now()) {
            tracing::trace!("Throttling geocoder for {:?}", wait);
            tokio::time::sleep(wait).await;
        }
        self.last_request = Some(Instant::now());
    }
}
