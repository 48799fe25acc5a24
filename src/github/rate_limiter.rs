use std::sync::Mutex;
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use reqwest::Response;
use tokio::time::sleep;

const WINDOW: Duration = Duration::from_secs(60);
const SOFT_LIMIT_PER_WINDOW: u32 = 30;

/// Paces outgoing GitHub requests: honors the `x-ratelimit-*` headers when
/// the hard quota runs out and keeps a soft ceiling of 30 requests per
/// minute otherwise.
pub struct RateLimiter {
    state: Mutex<LimiterState>,
}

struct LimiterState {
    remaining: u32,
    reset_at: Option<Instant>,
    window_start: Instant,
    calls_in_window: u32,
}

impl LimiterState {
    /// Returns how long the caller must sleep before sending, or `None`
    /// when the request may go out now. Granting registers the call.
    fn next_delay(&mut self) -> Option<Duration> {
        if self.remaining == 0 {
            if let Some(reset_at) = self.reset_at.take() {
                let now = Instant::now();
                if reset_at > now {
                    // Allow a probe request once the quota resets.
                    self.remaining = 1;
                    return Some(reset_at - now);
                }
            }
            self.remaining = 1;
        }

        let elapsed = self.window_start.elapsed();
        if elapsed >= WINDOW {
            self.window_start = Instant::now();
            self.calls_in_window = 0;
        } else if self.calls_in_window >= SOFT_LIMIT_PER_WINDOW {
            return Some(WINDOW - elapsed);
        }

        self.calls_in_window += 1;
        None
    }
}

impl RateLimiter {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(LimiterState {
                remaining: 5000,
                reset_at: None,
                window_start: Instant::now(),
                calls_in_window: 0,
            }),
        }
    }

    /// Blocks until the next request may be sent. The delay is computed
    /// under the lock; sleeping happens outside it.
    pub async fn throttle(&self) {
        loop {
            let delay = self.state.lock().unwrap().next_delay();
            match delay {
                Some(wait) => {
                    tracing::debug!("Rate limit pacing, waiting {:?}", wait);
                    sleep(wait).await;
                }
                None => return,
            }
        }
    }

    /// Records the `x-ratelimit-remaining` / `x-ratelimit-reset` headers of
    /// a completed response.
    pub fn record_response(&self, response: &Response) {
        let Some(remaining) = header_number(response, "x-ratelimit-remaining") else {
            return;
        };

        let mut state = self.state.lock().unwrap();
        state.remaining = remaining as u32;

        if remaining == 0 {
            if let Some(reset_timestamp) = header_number(response, "x-ratelimit-reset") {
                let now = SystemTime::now()
                    .duration_since(UNIX_EPOCH)
                    .unwrap()
                    .as_secs();
                if reset_timestamp > now {
                    state.reset_at =
                        Some(Instant::now() + Duration::from_secs(reset_timestamp - now));
                }
            }
        }
    }
}

fn header_number(response: &Response, name: &str) -> Option<u64> {
    response
        .headers()
        .get(name)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.parse().ok())
}

impl Default for RateLimiter {
    fn default() -> Self {
        Self::new()
    }
}
