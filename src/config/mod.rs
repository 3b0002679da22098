//! Configuration module
//!
//! `ScrapeConfig` (with its typestate builder) configures scrape jobs;
//! `ServerConfig` wraps it with the HTTP-facing settings.

// Sub-modules
pub mod builder;
pub mod getters;
pub mod server;
pub mod types;

// Re-exports for public API
pub use builder::{ScrapeConfigBuilder, WithDataDir};
pub use server::{ServerArgs, ServerConfig};
pub use types::{DelayRange, ScrapeConfig};
