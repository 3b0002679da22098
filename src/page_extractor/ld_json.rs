//! Decoding of ld+json objects into listing shapes
//!
//! An ld+json object is checked against two independent shapes:
//!
//! - **Container**: `itemListElement` is an array whose entries carry an
//!   `item` object tagged `Restaurant`, `LocalBusiness` or `Place`.
//! - **Standalone restaurant**: the object itself is tagged `Restaurant`.
//!
//! An object can match both. Anything shaped unexpectedly at any depth simply
//! does not match; decoding never fails.

use serde_json::{Map, Value};

use super::schema::{Place, PlaceType};

const TYPE_KEY: &str = "@type";
const ITEM_LIST_KEY: &str = "itemListElement";
const ITEM_KEY: &str = "item";

/// Shape of one ld+json object
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LdShape {
    /// `itemListElement` container with the recognized items it holds
    Container(Vec<Place>),
    /// Object tagged `@type: "Restaurant"`
    StandaloneRestaurant(Place),
    /// Matches neither shape
    Unrecognized,
}

impl LdShape {
    /// Every shape `value` satisfies, container first.
    ///
    /// Returns `[Unrecognized]` when nothing matches, including for
    /// non-object values.
    #[must_use]
    pub fn classify(value: &Value) -> Vec<Self> {
        let Some(obj) = value.as_object() else {
            return vec![Self::Unrecognized];
        };

        let mut shapes = Vec::with_capacity(2);

        if let Some(Value::Array(elements)) = obj.get(ITEM_LIST_KEY) {
            let places = elements.iter().filter_map(container_item).collect();
            shapes.push(Self::Container(places));
        }

        if type_tag(obj) == Some(PlaceType::Restaurant.as_str()) {
            shapes.push(Self::StandaloneRestaurant(map_place(obj)));
        }

        if shapes.is_empty() {
            shapes.push(Self::Unrecognized);
        }
        shapes
    }

    /// Places this shape contributes, in document order
    #[must_use]
    pub fn into_places(self) -> Vec<Place> {
        match self {
            Self::Container(places) => places,
            Self::StandaloneRestaurant(place) => vec![place],
            Self::Unrecognized => Vec::new(),
        }
    }
}

/// All places one ld+json object yields across both shapes
#[must_use]
pub fn places_from_object(value: &Value) -> Vec<Place> {
    LdShape::classify(value)
        .into_iter()
        .flat_map(LdShape::into_places)
        .collect()
}

/// `itemListElement[i].item` when it is an object with a recognized type
fn container_item(element: &Value) -> Option<Place> {
    let item = element.as_object()?.get(ITEM_KEY)?.as_object()?;
    PlaceType::from_tag(type_tag(item)?).map(|_| map_place(item))
}

fn type_tag(obj: &Map<String, Value>) -> Option<&str> {
    obj.get(TYPE_KEY).and_then(Value::as_str)
}

fn map_place(obj: &Map<String, Value>) -> Place {
    let address = match obj.get("address") {
        Some(Value::Object(address)) => address.get("streetAddress").and_then(scalar_text),
        Some(other) => scalar_text(other),
        None => None,
    };

    let rating = obj.get("aggregateRating").and_then(Value::as_object);

    Place {
        name: obj.get("name").and_then(name_text),
        url: obj.get("url").and_then(scalar_text),
        address,
        rating: rating.and_then(|r| r.get("ratingValue")).and_then(scalar_text),
        review_count: rating
            .and_then(|r| r.get("reviewCount"))
            .and_then(scalar_text),
    }
}

/// Like `scalar_text`, but `false` and zero do not count as a name
fn name_text(value: &Value) -> Option<String> {
    match value {
        Value::Bool(false) => None,
        Value::Number(n) if n.as_f64() == Some(0.0) => None,
        other => scalar_text(other),
    }
}

/// Text form of a JSON scalar; `null`, arrays and objects carry no value
fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}
