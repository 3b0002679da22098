//! HTTP server configuration
//!
//! Parsed once in `main` from command-line flags with environment fallbacks,
//! then handed to `server::build_router`. Nothing reads configuration from
//! process-wide state after startup.

use clap::Parser;
use std::net::SocketAddr;
use std::path::PathBuf;

use super::types::ScrapeConfig;
use crate::utils::{
    DEFAULT_BASE_URL, DEFAULT_BACKGROUND_PAGES, DEFAULT_CITY, DEFAULT_JOB_RETENTION_SECS,
    DEFAULT_MAX_PAGES, DEFAULT_SYNC_PAGES, DEFAULT_WAIT_TIMEOUT_SECS, is_valid_city_slug,
};

#[derive(Parser, Debug, Clone)]
#[command(
    name = "restaurant-scrape",
    about = "HTTP API that scrapes restaurant listings from ld+json metadata into per-city CSV tables"
)]
pub struct ServerArgs {
    /// Address to bind the HTTP server to (host:port).
    #[arg(long, env = "SCRAPER_BIND", default_value = "0.0.0.0:5000")]
    pub bind: SocketAddr,

    /// Directory holding the per-city CSV tables.
    #[arg(long, env = "SCRAPER_DATA_DIR", default_value = "data")]
    pub data_dir: PathBuf,

    /// Origin of the listing site.
    #[arg(long, env = "SCRAPER_BASE_URL", default_value = DEFAULT_BASE_URL)]
    pub base_url: String,

    /// City used when a request omits one.
    #[arg(long, env = "SCRAPER_DEFAULT_CITY", default_value = DEFAULT_CITY)]
    pub default_city: String,

    /// Largest page count a single job may request.
    #[arg(long, env = "SCRAPER_MAX_PAGES", default_value_t = DEFAULT_MAX_PAGES)]
    pub max_pages: u32,

    /// Seconds to wait for ld+json blocks on each page before failing the job.
    #[arg(long, env = "SCRAPER_WAIT_TIMEOUT_SECS", default_value_t = DEFAULT_WAIT_TIMEOUT_SECS)]
    pub wait_timeout_secs: u64,

    /// Root for per-job Chrome profiles (system temp dir when unset).
    #[arg(long, env = "SCRAPER_CHROME_DATA_DIR")]
    pub chrome_data_dir: Option<PathBuf>,

    /// Seconds finished jobs stay listed under /jobs.
    #[arg(long, env = "SCRAPER_JOB_RETENTION_SECS", default_value_t = DEFAULT_JOB_RETENTION_SECS)]
    pub job_retention_secs: u64,
}

/// Explicit server configuration passed to route registration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub bind: SocketAddr,
    pub default_city: String,
    pub default_background_pages: u32,
    pub default_sync_pages: u32,
    pub job_retention_secs: u64,
    pub scrape: ScrapeConfig,
}

impl ServerConfig {
    /// Build from parsed arguments, validating the scrape section
    pub fn from_args(args: ServerArgs) -> anyhow::Result<Self> {
        if !is_valid_city_slug(&args.default_city) {
            anyhow::bail!("default city '{}' is not a valid slug", args.default_city);
        }

        let mut builder = ScrapeConfig::builder()
            .data_dir(args.data_dir)
            .base_url(args.base_url)
            .max_pages(args.max_pages)
            .wait_timeout_secs(args.wait_timeout_secs);
        if let Some(dir) = args.chrome_data_dir {
            builder = builder.chrome_data_dir(dir);
        }
        let scrape = builder.build()?;

        Ok(Self {
            bind: args.bind,
            default_city: args.default_city,
            default_background_pages: DEFAULT_BACKGROUND_PAGES,
            default_sync_pages: DEFAULT_SYNC_PAGES,
            job_retention_secs: args.job_retention_secs,
            scrape,
        })
    }

    /// Configuration around an existing `ScrapeConfig`, with default request
    /// values and an unspecified bind address
    #[must_use]
    pub fn with_scrape_config(scrape: ScrapeConfig) -> Self {
        Self {
            bind: SocketAddr::from(([127, 0, 0, 1], 0)),
            default_city: DEFAULT_CITY.to_string(),
            default_background_pages: DEFAULT_BACKGROUND_PAGES,
            default_sync_pages: DEFAULT_SYNC_PAGES,
            job_retention_secs: DEFAULT_JOB_RETENTION_SECS,
            scrape,
        }
    }
}
