// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Backoff for rate-limited translation requests.

use std::time::Duration;

use reqwest::StatusCode;
use reqwest::header::HeaderMap;
use tokio::time::sleep;
use tracing::warn;

pub(crate) const RATE_LIMIT_MAX_RETRIES: usize = 4;
pub(crate) const RATE_LIMIT_BASE_DELAY: Duration = Duration::from_secs(2);
const RATE_LIMIT_MAX_DELAY: Duration = Duration::from_secs(30);

/// Whether a failed response is worth retrying after a pause.
pub(crate) fn is_rate_limited(status: StatusCode, body: &str) -> bool {
    if status == StatusCode::TOO_MANY_REQUESTS || status == StatusCode::SERVICE_UNAVAILABLE {
        return true;
    }
    let lower = body.to_lowercase();
    lower.contains("resource_exhausted") || lower.contains("overloaded")
}

/// Server-requested pause, in whole seconds.
pub(crate) fn retry_after(headers: &HeaderMap) -> Option<Duration> {
    let value = headers.get("retry-after")?.to_str().ok()?.trim();
    value.parse::<u64>().ok().map(Duration::from_secs)
}

/// Sleep before the next attempt and return the delay to use after it.
pub(crate) async fn wait_with_backoff(
    attempt: usize,
    delay: Duration,
    retry_after: Option<Duration>,
) -> Duration {
    let wait = retry_after.map_or(delay, |requested| requested.max(delay));
    warn!(
        attempt,
        max = RATE_LIMIT_MAX_RETRIES,
        wait_secs = wait.as_secs_f32(),
        "Translation service rate limited, retrying"
    );
    sleep(wait).await;
    next_delay(delay)
}

fn next_delay(current: Duration) -> Duration {
    (current * 2).clamp(RATE_LIMIT_BASE_DELAY, RATE_LIMIT_MAX_DELAY)
}

#[cfg(test)]
mod tests {
    use reqwest::header::HeaderValue;

    use super::*;

    #[test]
    fn rate_limit_detection() {
        assert!(is_rate_limited(StatusCode::TOO_MANY_REQUESTS, ""));
        assert!(is_rate_limited(
            StatusCode::BAD_REQUEST,
            r#"{"error":{"status":"RESOURCE_EXHAUSTED"}}"#
        ));
        assert!(!is_rate_limited(StatusCode::UNAUTHORIZED, "invalid key"));
    }

    #[test]
    fn delay_doubles_up_to_cap() {
        assert_eq!(next_delay(Duration::from_secs(2)), Duration::from_secs(4));
        assert_eq!(next_delay(Duration::from_secs(20)), RATE_LIMIT_MAX_DELAY);
    }

    #[test]
    fn retry_after_reads_seconds() {
        let mut headers = HeaderMap::new();
        assert_eq!(retry_after(&headers), None);
        headers.insert("retry-after", HeaderValue::from_static("7"));
        assert_eq!(retry_after(&headers), Some(Duration::from_secs(7)));
    }
}
