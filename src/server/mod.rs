//! HTTP job API

pub mod app;
pub mod error;
pub mod routes;

pub use app::{AppState, build_router};
pub use error::ApiError;
