//! Shared configuration constants for the listing scraper
//!
//! Default values used by `ScrapeConfig`, the HTTP layer and the browser
//! launcher, kept in one place to avoid magic numbers.

/// Origin of the listing site. Relative listing URLs are joined onto this.
pub const DEFAULT_BASE_URL: &str = "https://www.zomato.com";

/// City slug used when a request does not name one
pub const DEFAULT_CITY: &str = "hyderabad";

/// Page count for background jobs triggered without `pages`
pub const DEFAULT_BACKGROUND_PAGES: u32 = 2;

/// Page count for synchronous jobs triggered without `pages`
pub const DEFAULT_SYNC_PAGES: u32 = 1;

/// Upper bound on `pages` accepted by the HTTP layer
pub const DEFAULT_MAX_PAGES: u32 = 50;

/// Maximum time to wait for ld+json blocks to appear in a rendered page (seconds)
pub const DEFAULT_WAIT_TIMEOUT_SECS: u64 = 20;

/// Timeout for `page.goto()` before the ld+json wait starts (seconds)
pub const DEFAULT_NAVIGATION_TIMEOUT_SECS: u64 = 60;

/// Randomized pause after the ld+json blocks show up, in milliseconds.
///
/// Gives client-side scripts a moment to finish populating the listing.
pub const DEFAULT_SETTLE_DELAY_MS: (u64, u64) = (1_500, 3_000);

/// Randomized pause between page fetches, in milliseconds
pub const DEFAULT_PAGE_DELAY_MS: (u64, u64) = (2_000, 4_000);

/// CSS selector for linked-data script blocks
pub const LD_JSON_SELECTOR: &str = r#"script[type="application/ld+json"]"#;

/// Longest city slug accepted when building URLs and file names
pub const MAX_CITY_SLUG_LEN: usize = 64;

/// Fixed column order of the persisted table
pub const CSV_COLUMNS: [&str; 7] = [
    "city",
    "page",
    "name",
    "url",
    "address",
    "rating",
    "reviewCount",
];

/// How long finished jobs stay visible in the job table (seconds)
pub const DEFAULT_JOB_RETENTION_SECS: u64 = 60 * 60;

/// Browser window size handed to Chromium
pub const BROWSER_WINDOW_SIZE: (u32, u32) = (1366, 768);

/// Chrome user agent string
///
/// Updated: 2025-08 to Chrome 139 (current stable at the time).
pub const CHROME_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/139.0.0.0 Safari/537.36";
