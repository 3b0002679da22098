//! Listing extraction from rendered page markup
//!
//! Locates every `<script type="application/ld+json">` block, decodes each
//! into listing shapes, and returns the deduplicated candidates in document
//! order. Malformed blocks are skipped; nothing here returns an error.

use scraper::{Html, Selector};
use serde_json::Value;
use std::collections::HashSet;
use std::sync::LazyLock;
use tracing::debug;

use super::ld_json::places_from_object;
use super::schema::{ListingCandidate, Place};
use crate::utils::{LD_JSON_SELECTOR, absolutize_url};

// Hardcoded selectors should NEVER fail to parse - if they do, it's a compile-time bug.
static LD_JSON: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse(LD_JSON_SELECTOR).expect("BUG: hardcoded ld+json selector is invalid")
});

/// Extract listing candidates from one page's HTML.
///
/// Deduplicates on `(name, url)` exactly as the URLs appear in the markup.
#[must_use]
pub fn extract_listings(html: &str) -> Vec<ListingCandidate> {
    extract_listings_with_base(html, None)
}

/// Extract listing candidates, rewriting path-relative URLs onto `origin`
/// first when one is given, so `/r/a` and `https://site/r/a` collapse into one
/// listing.
#[must_use]
pub fn extract_listings_with_base(html: &str, origin: Option<&str>) -> Vec<ListingCandidate> {
    let mut places = Vec::new();
    for payload in ld_json_payloads(html) {
        match payload {
            Value::Array(parts) => {
                for part in &parts {
                    places.extend(places_from_object(part));
                }
            }
            other => places.extend(places_from_object(&other)),
        }
    }

    if let Some(origin) = origin {
        for place in &mut places {
            if let Some(url) = place.url.as_mut() {
                *url = absolutize_url(origin, url);
            }
        }
    }

    dedup_places(places)
}

/// Parsed JSON of every non-empty, well-formed ld+json block, in document order
fn ld_json_payloads(html: &str) -> Vec<Value> {
    let document = Html::parse_document(html);

    document
        .select(&LD_JSON)
        .enumerate()
        .filter_map(|(index, element)| {
            let text = element.text().collect::<String>();
            let text = text.trim();
            if text.is_empty() {
                return None;
            }
            match serde_json::from_str::<Value>(text) {
                Ok(value) => Some(value),
                Err(e) => {
                    debug!("Skipping malformed ld+json block #{index}: {e}");
                    None
                }
            }
        })
        .collect()
}

/// First occurrence of each `(name, url)` wins; nameless places are dropped
fn dedup_places(places: Vec<Place>) -> Vec<ListingCandidate> {
    let mut seen: HashSet<(String, Option<String>)> = HashSet::with_capacity(places.len());
    let mut unique = Vec::with_capacity(places.len());

    for candidate in places.into_iter().filter_map(ListingCandidate::from_place) {
        let (name, url) = candidate.identity();
        if seen.insert((name.to_owned(), url.map(str::to_owned))) {
            unique.push(candidate);
        }
    }

    unique
}
