//! Helpers for waiting on rendered page state

use chromiumoxide::page::Page;
use std::future::Future;
use tokio::time::{Duration, Instant};
use tracing::{debug, trace};

const POLL_INTERVAL: Duration = Duration::from_millis(200);

/// Poll until `selector` matches an element or `timeout` elapses.
///
/// Returns `false` on timeout. `find_element` errors are treated as "not
/// there yet", since the DOM may still be loading.
pub async fn wait_for_selector(page: &Page, selector: &str, timeout: Duration) -> bool {
    let found = poll_until(|| page.find_element(selector), timeout).await;
    if found {
        debug!("'{selector}' appeared");
    } else {
        trace!("'{selector}' never appeared within {}s", timeout.as_secs());
    }
    found
}

/// Re-run `check` every `POLL_INTERVAL` until it succeeds or `timeout` elapses.
///
/// Each check is bounded by the time left, so a stalled call cannot stretch
/// the wait past the deadline.
pub(crate) async fn poll_until<F, Fut, T, E>(mut check: F, timeout: Duration) -> bool
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: std::fmt::Display,
{
    let start = Instant::now();

    loop {
        let remaining = timeout.saturating_sub(start.elapsed());
        if remaining.is_zero() {
            return false;
        }

        match tokio::time::timeout(remaining, check()).await {
            Ok(Ok(_)) => return true,
            Ok(Err(e)) => {
                trace!("Condition not met yet: {e}");
                tokio::time::sleep(POLL_INTERVAL.min(remaining)).await;
            }
            Err(_) => return false,
        }
    }
}

/// Current page URL for log lines, `about:blank` when unavailable
pub async fn current_url(page: &Page) -> String {
    match page.url().await {
        Ok(Some(url)) => url,
        Ok(None) => "about:blank".to_string(),
        Err(e) => {
            trace!("Failed to read page URL: {e}");
            "about:blank".to_string()
        }
    }
}
