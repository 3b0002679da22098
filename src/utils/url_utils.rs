//! URL and slug helpers.
//!
//! Builds listing page URLs, rewrites relative listing links onto the site
//! origin, and validates the city slugs that end up in URLs and file names.

use anyhow::Result;
use url::Url;

use super::constants::MAX_CITY_SLUG_LEN;

/// Build the listing URL for one page of a city, e.g.
/// `https://www.zomato.com/hyderabad/restaurants?page=2`
pub fn listing_url(base_url: &str, city: &str, page: u32) -> Result<String> {
    let mut url = Url::parse(base_url)
        .map_err(|e| anyhow::anyhow!("Failed to parse base URL '{base_url}': {e}"))?;

    url.path_segments_mut()
        .map_err(|()| anyhow::anyhow!("Base URL '{base_url}' cannot carry a path"))?
        .pop_if_empty()
        .push(city)
        .push("restaurants");
    url.query_pairs_mut().append_pair("page", &page.to_string());

    Ok(url.to_string())
}

/// Scheme + host (+ port) of a URL, without a trailing slash
pub fn origin_of(base_url: &str) -> Option<String> {
    let url = Url::parse(base_url).ok()?;
    match url.origin() {
        origin @ url::Origin::Tuple(..) => Some(origin.ascii_serialization()),
        url::Origin::Opaque(_) => None,
    }
}

/// Prefix `origin` onto a path-relative URL; anything else passes through.
#[must_use]
pub fn absolutize_url(origin: &str, url: &str) -> String {
    if url.starts_with('/') {
        format!("{}{url}", origin.trim_end_matches('/'))
    } else {
        url.to_string()
    }
}

/// Check if a URL is valid
#[must_use]
pub fn is_valid_url(url: &str) -> bool {
    if url.is_empty() {
        return false;
    }

    match Url::parse(url) {
        Ok(parsed) => {
            matches!(parsed.scheme(), "http" | "https")
        }
        Err(_) => false,
    }
}

/// City slugs are lowercase ASCII letters, digits, `-` and `_`.
///
/// The slug is spliced into both the listing URL path and the CSV file name,
/// so anything that could escape either is rejected.
#[must_use]
pub fn is_valid_city_slug(city: &str) -> bool {
    !city.is_empty()
        && city.len() <= MAX_CITY_SLUG_LEN
        && city
            .bytes()
            .all(|b| b.is_ascii_lowercase() || b.is_ascii_digit() || b == b'-' || b == b'_')
}
