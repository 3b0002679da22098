pub mod constants;
pub mod url_utils;

pub use constants::*;
pub use url_utils::{absolutize_url, is_valid_city_slug, is_valid_url, listing_url, origin_of};
