//! Wall clock and simulated-latency timers.
//!
//! TRADE-OFFS
//! ==========
//! Every backend call in this client is a fixed delay. In the browser the
//! delay is a `gloo-timers` future; natively it is a tokio timer so tests can
//! drive the same async code. A zero duration resolves immediately.

use std::time::Duration;

/// Current time in milliseconds since the Unix epoch.
#[must_use]
pub fn now_ms() -> i64 {
    #[cfg(feature = "csr")]
    {
        #[allow(clippy::cast_possible_truncation)]
        let now = js_sys::Date::now() as i64;
        now
    }
    #[cfg(not(feature = "csr"))]
    {
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map_or(0, |elapsed| i64::try_from(elapsed.as_millis()).unwrap_or(i64::MAX))
    }
}

/// Wait for `duration` without blocking the event loop.
pub async fn sleep(duration: Duration) {
    if duration.is_zero() {
        return;
    }
    #[cfg(feature = "csr")]
    gloo_timers::future::sleep(duration).await;
    #[cfg(all(not(feature = "csr"), not(target_arch = "wasm32")))]
    tokio::time::sleep(duration).await;
}
