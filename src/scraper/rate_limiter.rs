//! Request pacing using a token bucket.
//!
//! The pipeline is strictly sequential, so the limiter's job is politeness:
//! keep the request rate under the configured budget and jitter the delay so
//! the traffic does not look machine-regular to anti-scraping defenses.

use std::sync::Arc;
use tokio::sync::Mutex;
use tokio::time::{Duration, Instant};

use crate::config::HttpConfig;

/// Token bucket rate limiter
pub struct RateLimiter {
    state: Arc<Mutex<RateLimiterState>>,
}

struct RateLimiterState {
    tokens: f64,
    last_update: Instant,
    max_tokens: f64,
    refill_rate: f64, // tokens per second
    min_delay: Duration,
    max_delay: Duration,
}

impl RateLimiter {
    /// Create a new rate limiter
    ///
    /// # Arguments
    /// * `requests_per_minute` - Maximum requests per minute
    /// * `min_delay_secs` - Minimum delay between requests
    /// * `max_delay_secs` - Maximum delay between requests
    pub fn new(requests_per_minute: u32, min_delay_secs: f64, max_delay_secs: f64) -> Self {
        let max_tokens = requests_per_minute as f64;
        let refill_rate = requests_per_minute as f64 / 60.0;

        // Tolerate inverted or negative configured bounds.
        let min_delay = Duration::from_secs_f64(min_delay_secs.max(0.0));
        let max_delay = Duration::from_secs_f64(max_delay_secs.max(0.0)).max(min_delay);

        Self {
            state: Arc::new(Mutex::new(RateLimiterState {
                tokens: max_tokens,
                last_update: Instant::now(),
                max_tokens,
                refill_rate,
                min_delay,
                max_delay,
            })),
        }
    }

    pub fn from_config(config: &HttpConfig) -> Self {
        Self::new(
            config.requests_per_minute,
            config.min_delay_secs,
            config.max_delay_secs,
        )
    }

    /// Acquire a token, waiting if necessary
    pub async fn acquire(&self) {
        let delay = {
            let mut state = self.state.lock().await;

            // Refill tokens
            let now = Instant::now();
            let elapsed = now.duration_since(state.last_update).as_secs_f64();
            state.tokens = (state.tokens + elapsed * state.refill_rate).min(state.max_tokens);
            state.last_update = now;

            if state.tokens >= 1.0 {
                state.tokens -= 1.0;
                // Random delay between min and max
                let delay_range = state.max_delay - state.min_delay;
                state.min_delay + delay_range.mul_f64(rand_delay())
            } else {
                // Wait for a token to become available
                let wait_time = (1.0 - state.tokens) / state.refill_rate;
                state.tokens = 0.0;
                Duration::from_secs_f64(wait_time) + state.min_delay
            }
        };

        tokio::time::sleep(delay).await;
    }
}

/// Generate a pseudo-random delay factor (0.0 - 1.0)
fn rand_delay() -> f64 {
    use std::time::SystemTime;
    let nanos = SystemTime::now()
        .duration_since(SystemTime::UNIX_EPOCH)
        .unwrap()
        .subsec_nanos();
    (nanos % 1000) as f64 / 1000.0
}
