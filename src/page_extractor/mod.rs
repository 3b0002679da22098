//! Listing extraction from ld+json metadata.
//!
//! Turns one page's rendered HTML into deduplicated listing candidates.
//! City/page tagging happens in the orchestrator.

// Sub-modules
pub mod extractors;
pub mod ld_json;
pub mod schema;

// Re-exports for public API
pub use extractors::{extract_listings, extract_listings_with_base};
pub use ld_json::{LdShape, places_from_object};
pub use schema::{ExtractedRecord, ListingCandidate, Place, PlaceType};
