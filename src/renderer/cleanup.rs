//! Browser shutdown and profile directory removal

use chromiumoxide::Browser;
use log::{debug, warn};
use std::path::Path;

/// Outcome of a shutdown sequence
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CleanupResult {
    Success,
    /// Steps that failed, in order; later steps still ran
    PartialFailure(Vec<String>),
}

impl CleanupResult {
    fn from_errors(errors: Vec<String>) -> Self {
        if errors.is_empty() {
            Self::Success
        } else {
            Self::PartialFailure(errors)
        }
    }
}

/// Close the browser, wait for the process to exit, then remove its profile.
///
/// Every step runs even if an earlier one failed.
pub async fn shutdown_browser(browser: &mut Browser, profile_dir: Option<&Path>) -> CleanupResult {
    let mut errors = Vec::new();

    debug!(target: "restaurant_scrape::cleanup", "Closing browser");
    if let Err(e) = browser.close().await {
        warn!(target: "restaurant_scrape::cleanup", "Failed to close browser: {e}");
        errors.push(format!("Browser close failed: {e}"));
    }

    // Chrome must release its file handles before the profile can be removed
    if let Err(e) = browser.wait().await {
        warn!(target: "restaurant_scrape::cleanup", "Failed to wait for browser exit: {e}");
        errors.push(format!("Browser wait failed: {e}"));
    }

    if let Some(dir) = profile_dir {
        errors.extend(remove_profile_dir(dir));
    }

    CleanupResult::from_errors(errors)
}

/// Remove a Chrome profile directory; a missing directory is not an error
pub fn remove_profile_dir(dir: &Path) -> Option<String> {
    match std::fs::remove_dir_all(dir) {
        Ok(()) => {
            debug!(target: "restaurant_scrape::cleanup", "Removed profile {}", dir.display());
            None
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => None,
        Err(e) => {
            warn!(
                target: "restaurant_scrape::cleanup",
                "Failed to remove profile {}: {e}",
                dir.display()
            );
            Some(format!("Directory cleanup failed: {e}"))
        }
    }
}
