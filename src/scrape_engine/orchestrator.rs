//! Page loop for a single scrape job
//!
//! Launches one renderer, walks `1..=pages` sequentially, extracts and tags
//! records, and always closes the renderer before returning.

use tracing::{info, warn};

use super::delay::pause;
use super::progress::{NoOpProgress, ProgressReporter};
use super::scrape_types::{PageProgress, ScrapeError, ScrapeRequest, ScrapeResult};
use crate::config::ScrapeConfig;
use crate::page_extractor::{ExtractedRecord, extract_listings_with_base};
use crate::renderer::{PageRenderer, RendererFactory, WaitSpec};
use crate::utils::{LD_JSON_SELECTOR, listing_url};

/// Scrape every requested page of one city.
///
/// A render failure on any page aborts the job; records gathered from earlier
/// pages are discarded with it.
pub async fn scrape_city(
    factory: &dyn RendererFactory,
    config: &ScrapeConfig,
    request: &ScrapeRequest,
) -> ScrapeResult<Vec<ExtractedRecord>> {
    scrape_city_with_progress(factory, config, request, &NoOpProgress).await
}

/// `scrape_city` with lifecycle events sent to `progress`
pub async fn scrape_city_with_progress(
    factory: &dyn RendererFactory,
    config: &ScrapeConfig,
    request: &ScrapeRequest,
    progress: &dyn ProgressReporter,
) -> ScrapeResult<Vec<ExtractedRecord>> {
    request.validate(config.max_pages())?;

    let mut renderer = match factory.launch(request.headless).await {
        Ok(renderer) => renderer,
        Err(e) => {
            progress.report_error(&e.to_string());
            return Err(e);
        }
    };
    progress.report_browser_launched();

    let outcome = scrape_pages(renderer.as_mut(), config, request, progress).await;
    renderer.close().await;

    match outcome {
        Ok(records) => {
            info!(
                city = %request.city,
                pages = request.pages,
                "Scrape finished with {} restaurants",
                records.len()
            );
            progress.report_completed(records.len());
            Ok(records)
        }
        Err(e) => {
            warn!(city = %request.city, "Scrape aborted: {e}");
            progress.report_error(&e.to_string());
            Err(e)
        }
    }
}

async fn scrape_pages(
    renderer: &mut dyn PageRenderer,
    config: &ScrapeConfig,
    request: &ScrapeRequest,
    progress: &dyn ProgressReporter,
) -> ScrapeResult<Vec<ExtractedRecord>> {
    let origin = config.origin();
    let wait = WaitSpec {
        selector: LD_JSON_SELECTOR,
        timeout: config.wait_timeout(),
        navigation_timeout: std::time::Duration::from_secs(config.navigation_timeout_secs()),
    };
    // Hard cap on one render, whatever the renderer does internally
    let render_deadline = wait.navigation_timeout + wait.timeout;

    let mut records = Vec::new();

    for page in 1..=request.pages {
        let url = listing_url(config.base_url(), &request.city, page)?;
        progress.report_page_started(page, &url);

        let rendered = tokio::time::timeout(render_deadline, renderer.render(&url, &wait)).await;
        let html = match rendered {
            Ok(html) => html?,
            Err(_) => {
                return Err(ScrapeError::RenderTimeout {
                    url,
                    timeout_secs: render_deadline.as_secs(),
                });
            }
        };
        pause(config.settle_delay()).await;

        let listings = extract_listings_with_base(&html, Some(&origin));
        let found = listings.len();
        info!("Page {page}: found {found} restaurants");

        records.extend(
            listings
                .into_iter()
                .map(|candidate| ExtractedRecord::from_candidate(candidate, &request.city, page)),
        );

        progress.report_page_scraped(&PageProgress {
            page,
            pages: request.pages,
            url,
            found,
        });

        if page < request.pages {
            pause(config.page_delay()).await;
        }
    }

    Ok(records)
}
