pub mod config;
pub mod content_saver;
pub mod jobs;
pub mod page_extractor;
pub mod renderer;
pub mod scrape_engine;
pub mod server;
pub mod utils;

pub use config::{ScrapeConfig, ServerArgs, ServerConfig};
pub use content_saver::CsvStore;
pub use jobs::{JobKind, JobManager, JobRunner, JobStatus, ScrapeJob};
pub use page_extractor::{
    ExtractedRecord, LdShape, ListingCandidate, extract_listings, extract_listings_with_base,
};
pub use renderer::{ChromiumRendererFactory, PageRenderer, RendererFactory, WaitSpec};
pub use scrape_engine::{
    ScrapeError, ScrapeRequest, ScrapeResult, scrape_city, scrape_city_with_progress,
};
pub use server::{AppState, build_router};
