use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use axum::body::Body;
use axum::extract::State;
use axum::http::{header, HeaderValue, Request, StatusCode};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use serde_json::json;

#[derive(Debug)]
struct WindowState {
    start: Instant,
    count: u32,
}

/// Fixed one-second window shared by every request routed through a group.
#[derive(Clone, Debug)]
pub struct RateLimiter {
    rps: u32,
    window: Duration,
    state: Arc<Mutex<WindowState>>,
}

impl RateLimiter {
    pub fn new(rps: u32) -> Self {
        Self::with_window(rps, Duration::from_secs(1))
    }

    pub fn with_window(rps: u32, window: Duration) -> Self {
        Self {
            rps: rps.max(1),
            window,
            state: Arc::new(Mutex::new(WindowState {
                start: Instant::now(),
                count: 0,
            })),
        }
    }

    /// Returns the time left in the window when the request is refused.
    fn check(&self) -> Result<(), Duration> {
        let mut guard = match self.state.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        let now = Instant::now();
        let elapsed = now.duration_since(guard.start);
        if elapsed >= self.window {
            guard.start = now;
            guard.count = 0;
        }
        if guard.count < self.rps {
            guard.count += 1;
            Ok(())
        } else {
            Err(self.window.saturating_sub(now.duration_since(guard.start)))
        }
    }
}

pub async fn rps_middleware(
    State(limiter): State<RateLimiter>,
    req: Request<Body>,
    next: Next,
) -> Response {
    if let Err(retry_in) = limiter.check() {
        tracing::warn!(path = %req.uri().path(), "rate limit exceeded");
        let retry_secs = retry_in.as_secs().max(1).to_string();
        let mut response = (
            StatusCode::TOO_MANY_REQUESTS,
            axum::Json(json!({ "error": "rate_limit_exceeded" })),
        )
            .into_response();
        if let Ok(value) = HeaderValue::from_str(&retry_secs) {
            response.headers_mut().insert(header::RETRY_AFTER, value);
        }
        return response;
    }
    next.run(req).await
}
