use serde::{Deserialize, Serialize};

/// `@type` tags accepted for items inside an `itemListElement` container
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaceType {
    Restaurant,
    LocalBusiness,
    Place,
}

impl PlaceType {
    /// Exact, case-sensitive match on the schema.org type name
    #[must_use]
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "Restaurant" => Some(Self::Restaurant),
            "LocalBusiness" => Some(Self::LocalBusiness),
            "Place" => Some(Self::Place),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Restaurant => "Restaurant",
            Self::LocalBusiness => "LocalBusiness",
            Self::Place => "Place",
        }
    }
}

/// A place-of-business object mapped out of one ld+json object.
///
/// Every field is optional here; scalars (strings, numbers, booleans) are kept
/// as text, anything else counts as "no value". A name of `false` or zero is
/// treated as absent.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Place {
    pub name: Option<String>,
    pub url: Option<String>,
    pub address: Option<String>,
    pub rating: Option<String>,
    pub review_count: Option<String>,
}

/// A listing that survived extraction: it has a non-empty name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListingCandidate {
    pub name: String,
    pub url: Option<String>,
    pub address: Option<String>,
    pub rating: Option<String>,
    #[serde(rename = "reviewCount")]
    pub review_count: Option<String>,
}

impl ListingCandidate {
    /// `None` when the place has no usable name
    #[must_use]
    pub fn from_place(place: Place) -> Option<Self> {
        let name = place.name.filter(|n| !n.is_empty())?;
        Some(Self {
            name,
            url: place.url,
            address: place.address,
            rating: place.rating,
            review_count: place.review_count,
        })
    }

    /// Identity key used for deduplication
    #[must_use]
    pub fn identity(&self) -> (&str, Option<&str>) {
        (&self.name, self.url.as_deref())
    }
}

/// A listing tagged with the city and page it was scraped from. This is the
/// unit persisted to the CSV table and returned by the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractedRecord {
    pub city: String,
    pub page: u32,
    pub name: String,
    pub url: Option<String>,
    pub address: Option<String>,
    pub rating: Option<String>,
    #[serde(rename = "reviewCount")]
    pub review_count: Option<String>,
}

impl ExtractedRecord {
    #[must_use]
    pub fn from_candidate(candidate: ListingCandidate, city: &str, page: u32) -> Self {
        Self {
            city: city.to_string(),
            page,
            name: candidate.name,
            url: candidate.url,
            address: candidate.address,
            rating: candidate.rating,
            review_count: candidate.review_count,
        }
    }
}
