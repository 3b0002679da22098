//! Chromium-backed renderer
//!
//! One browser process per scrape job, with its own throwaway profile
//! directory so concurrent jobs never contend for a profile lock.

use anyhow::{Context, Result};
use async_trait::async_trait;
use chromiumoxide::browser::{Browser, BrowserConfigBuilder, HeadlessMode};
use chromiumoxide::page::Page;
use futures::StreamExt;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::task::{self, JoinHandle};
use tracing::{debug, error, info, trace, warn};
use uuid::Uuid;

use super::cleanup::{CleanupResult, remove_profile_dir, shutdown_browser};
use super::discovery::resolve_browser_executable;
use super::page_helpers::{current_url, wait_for_selector};
use super::page_timeout::with_page_timeout;
use super::{PageRenderer, RendererFactory, WaitSpec};
use crate::scrape_engine::{ScrapeError, ScrapeResult};
use crate::utils::{BROWSER_WINDOW_SIZE, CHROME_USER_AGENT};

/// Browser plus its CDP event handler task
///
/// The handler is aborted on drop. The profile directory is removed by
/// `shutdown`, or by `Drop` as a fallback when shutdown never ran.
pub struct BrowserWrapper {
    browser: Browser,
    handler: JoinHandle<()>,
    user_data_dir: Option<PathBuf>,
}

impl BrowserWrapper {
    pub(crate) fn new(browser: Browser, handler: JoinHandle<()>, user_data_dir: PathBuf) -> Self {
        Self {
            browser,
            handler,
            user_data_dir: Some(user_data_dir),
        }
    }

    pub(crate) fn browser(&self) -> &Browser {
        &self.browser
    }

    #[must_use]
    pub fn user_data_dir(&self) -> Option<&Path> {
        self.user_data_dir.as_deref()
    }

    /// Close the browser, wait for it to exit and remove the profile
    pub async fn shutdown(mut self) -> CleanupResult {
        let profile = self.user_data_dir.take();
        shutdown_browser(&mut self.browser, profile.as_deref()).await
    }
}

impl Drop for BrowserWrapper {
    fn drop(&mut self) {
        self.handler.abort();

        if let Some(dir) = self.user_data_dir.take() {
            warn!("BrowserWrapper dropped without shutdown - removing profile in Drop");
            remove_profile_dir(&dir);
        }
    }
}

/// Launch Chromium with a fresh profile under `profile_root`
pub async fn launch_browser(headless: bool, profile_root: &Path) -> Result<BrowserWrapper> {
    let chrome_path = resolve_browser_executable().await?;

    let user_data_dir = profile_root.join(format!("restaurant_scrape_chrome_{}", Uuid::new_v4()));
    std::fs::create_dir_all(&user_data_dir).context("Failed to create user data directory")?;

    let (width, height) = BROWSER_WINDOW_SIZE;
    let mut config_builder = BrowserConfigBuilder::default()
        .request_timeout(Duration::from_secs(30))
        .window_size(width, height)
        .user_data_dir(user_data_dir.clone())
        .chrome_executable(chrome_path);

    config_builder = if headless {
        config_builder.headless_mode(HeadlessMode::default())
    } else {
        config_builder.with_head()
    };

    let browser_config = config_builder
        .arg(format!("--user-agent={CHROME_USER_AGENT}"))
        .arg("--no-sandbox")
        .arg("--disable-dev-shm-usage")
        .arg("--no-first-run")
        .arg("--no-default-browser-check")
        .build()
        .map_err(|e| anyhow::anyhow!("Failed to build browser config: {e}"))?;

    info!(headless, profile = %user_data_dir.display(), "Launching browser");
    let (browser, mut handler) = match Browser::launch(browser_config).await {
        Ok(launched) => launched,
        Err(e) => {
            remove_profile_dir(&user_data_dir);
            return Err(anyhow::Error::new(e).context("Failed to launch browser"));
        }
    };

    let handler_task = task::spawn(async move {
        while let Some(event) = handler.next().await {
            if let Err(e) = event {
                let msg = e.to_string();
                // chromiumoxide cannot decode every CDP event Chrome emits
                if msg.contains("data did not match any variant of untagged enum Message")
                    || msg.contains("Failed to deserialize WS response")
                {
                    trace!("Suppressed benign CDP serialization error: {msg}");
                } else {
                    error!("Browser handler error: {e:?}");
                }
            }
        }
        debug!("Browser handler task completed");
    });

    Ok(BrowserWrapper::new(browser, handler_task, user_data_dir))
}

/// `RendererFactory` that launches a real Chromium per job
#[derive(Debug, Clone, Default)]
pub struct ChromiumRendererFactory {
    profile_root: Option<PathBuf>,
}

impl ChromiumRendererFactory {
    /// `profile_root` holds the per-job profiles; system temp dir when `None`
    #[must_use]
    pub fn new(profile_root: Option<PathBuf>) -> Self {
        Self { profile_root }
    }
}

#[async_trait]
impl RendererFactory for ChromiumRendererFactory {
    async fn launch(&self, headless: bool) -> ScrapeResult<Box<dyn PageRenderer>> {
        let root = self
            .profile_root
            .clone()
            .unwrap_or_else(std::env::temp_dir);

        let wrapper = launch_browser(headless, &root)
            .await
            .map_err(|e| ScrapeError::Browser(format!("{e:#}")))?;

        Ok(Box::new(ChromiumRenderer {
            wrapper,
            page: None,
        }))
    }
}

/// A running browser with at most one open tab, reused across pages
pub struct ChromiumRenderer {
    wrapper: BrowserWrapper,
    page: Option<Page>,
}

impl ChromiumRenderer {
    async fn navigate(&mut self, url: &str, timeout_secs: u64) -> Result<&Page> {
        match self.page {
            Some(ref page) => {
                with_page_timeout(
                    async { page.goto(url).await.map(|_| ()).context("goto failed") },
                    timeout_secs,
                    "page.goto()",
                )
                .await?;
            }
            None => {
                let browser = self.wrapper.browser();
                let page = with_page_timeout(
                    async { browser.new_page(url).await.context("new_page failed") },
                    timeout_secs,
                    "browser.new_page()",
                )
                .await?;
                self.page = Some(page);
            }
        }

        self.page
            .as_ref()
            .ok_or_else(|| anyhow::anyhow!("page missing after navigation"))
    }
}

#[async_trait]
impl PageRenderer for ChromiumRenderer {
    async fn render(&mut self, url: &str, wait: &WaitSpec<'_>) -> ScrapeResult<String> {
        let page = self
            .navigate(url, wait.navigation_timeout.as_secs())
            .await
            .map_err(|e| ScrapeError::Navigation {
                url: url.to_string(),
                reason: format!("{e:#}"),
            })?;

        if !wait_for_selector(page, wait.selector, wait.timeout).await {
            let landed = current_url(page).await;
            warn!(url, landed = %landed, "Structured data never appeared");
            return Err(ScrapeError::RenderTimeout {
                url: url.to_string(),
                timeout_secs: wait.timeout.as_secs(),
            });
        }

        page.content()
            .await
            .map_err(|e| ScrapeError::Browser(format!("Failed to read page content: {e}")))
    }

    async fn close(self: Box<Self>) {
        let Self { wrapper, page } = *self;

        if let Some(page) = page
            && let Err(e) = page.close().await
        {
            debug!("Failed to close tab before shutdown: {e}");
        }

        if let CleanupResult::PartialFailure(errors) = wrapper.shutdown().await {
            warn!("Browser shutdown incomplete: {}", errors.join("; "));
        }
    }
}
