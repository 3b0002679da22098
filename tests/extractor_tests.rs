//! Listing extraction from ld+json blocks

use restaurant_scrape::page_extractor::{ListingCandidate, extract_listings, extract_listings_with_base};

mod common;
use common::{container_block, listing_page};

fn names(listings: &[ListingCandidate]) -> Vec<&str> {
    listings.iter().map(|l| l.name.as_str()).collect()
}

#[test]
fn standalone_restaurant_maps_every_field() {
    let html = listing_page(&[r#"{"@type":"Restaurant","name":"A","url":"/r/a","address":{"streetAddress":"1 Main St"},"aggregateRating":{"ratingValue":"4.2","reviewCount":"10"}}"#]);

    let listings = extract_listings(&html);

    assert_eq!(
        listings,
        vec![ListingCandidate {
            name: "A".to_string(),
            url: Some("/r/a".to_string()),
            address: Some("1 Main St".to_string()),
            rating: Some("4.2".to_string()),
            review_count: Some("10".to_string()),
        }]
    );
}

#[test]
fn page_without_ld_json_yields_nothing() {
    let html = "<html><head><script>var x = 1;</script></head><body><p>hi</p></body></html>";
    assert!(extract_listings(html).is_empty());
    assert!(extract_listings("").is_empty());
}

#[test]
fn names_are_never_empty() {
    let html = listing_page(&[
        r#"{"@type":"Restaurant","name":"","url":"/r/empty"}"#,
        r#"{"@type":"Restaurant","url":"/r/missing"}"#,
        r#"{"@type":"Restaurant","name":null,"url":"/r/null"}"#,
        r#"{"@type":"Restaurant","name":"Kept","url":"/r/kept"}"#,
    ]);

    let listings = extract_listings(&html);

    assert_eq!(names(&listings), vec!["Kept"]);
    assert!(listings.iter().all(|l| !l.name.is_empty()));
}

#[test]
fn duplicates_keep_first_in_document_order() {
    let html = listing_page(&[
        r#"{"@type":"Restaurant","name":"A","url":"/r/a","address":"first"}"#,
        r#"{"@type":"Restaurant","name":"B","url":"/r/b"}"#,
        r#"{"@type":"Restaurant","name":"A","url":"/r/a","address":"second"}"#,
    ]);

    let listings = extract_listings(&html);

    assert_eq!(names(&listings), vec!["A", "B"]);
    assert_eq!(listings[0].address.as_deref(), Some("first"));
}

#[test]
fn same_name_with_different_url_is_distinct() {
    let html = listing_page(&[
        r#"{"@type":"Restaurant","name":"Chain","url":"/r/chain-1"}"#,
        r#"{"@type":"Restaurant","name":"Chain","url":"/r/chain-2"}"#,
        r#"{"@type":"Restaurant","name":"Chain"}"#,
    ]);

    assert_eq!(extract_listings(&html).len(), 3);
}

#[test]
fn malformed_block_does_not_hide_valid_ones() {
    let html = listing_page(&[
        r#"{"@type":"Restaurant","name":"Before""#,
        "   ",
        r#"{"@type":"Restaurant","name":"After","url":"/r/after"}"#,
    ]);

    assert_eq!(names(&extract_listings(&html)), vec!["After"]);
}

#[test]
fn unrecognized_objects_yield_nothing() {
    let html = listing_page(&[
        r#"{"@type":"WebSite","name":"Listing Site","url":"https://listings.test"}"#,
        r#"{"@type":"BreadcrumbList","itemListElement":"not-a-list"}"#,
        r#"42"#,
        r#""Restaurant""#,
    ]);

    assert!(extract_listings(&html).is_empty());
}

#[test]
fn container_keeps_only_recognized_item_types() {
    let html = listing_page(&[r#"{
        "@type": "ItemList",
        "itemListElement": [
            {"item": {"@type": "Restaurant", "name": "Diner", "url": "/r/diner"}},
            {"item": {"@type": "Review", "name": "Great food", "url": "/review/1"}}
        ]
    }"#]);

    assert_eq!(names(&extract_listings(&html)), vec!["Diner"]);
}

#[test]
fn container_accepts_local_business_and_place() {
    let html = listing_page(&[r#"{
        "itemListElement": [
            {"item": {"@type": "LocalBusiness", "name": "Bakery"}},
            {"item": {"@type": "Place", "name": "Food Court"}},
            {"item": {"@type": "Organization", "name": "Nope"}}
        ]
    }"#]);

    assert_eq!(names(&extract_listings(&html)), vec!["Bakery", "Food Court"]);
}

#[test]
fn top_level_arrays_are_flattened() {
    let html = listing_page(&[r#"[
        {"@type":"Restaurant","name":"One"},
        {"@type":"WebPage","name":"ignored"},
        {"@type":"Restaurant","name":"Two"}
    ]"#]);

    assert_eq!(names(&extract_listings(&html)), vec!["One", "Two"]);
}

#[test]
fn numeric_fields_become_text_and_missing_fields_stay_empty() {
    let html = listing_page(&[
        r#"{"@type":"Restaurant","name":"Numbers","aggregateRating":{"ratingValue":4.5,"reviewCount":1200}}"#,
        r#"{"@type":"Restaurant","name":"Bare"}"#,
    ]);

    let listings = extract_listings(&html);

    assert_eq!(listings[0].rating.as_deref(), Some("4.5"));
    assert_eq!(listings[0].review_count.as_deref(), Some("1200"));
    assert_eq!(listings[1].url, None);
    assert_eq!(listings[1].address, None);
    assert_eq!(listings[1].rating, None);
    assert_eq!(listings[1].review_count, None);
}

#[test]
fn container_and_standalone_on_one_object_both_count() {
    let html = listing_page(&[r#"{
        "@type": "Restaurant",
        "name": "Food Hall",
        "url": "/r/hall",
        "itemListElement": [{"item": {"@type": "Restaurant", "name": "Stall", "url": "/r/stall"}}]
    }"#]);

    assert_eq!(names(&extract_listings(&html)), vec!["Stall", "Food Hall"]);
}

#[test]
fn relative_and_absolute_urls_collapse_when_origin_given() {
    let html = listing_page(&[
        container_block(&[("A", "/r/a")]).as_str(),
        r#"{"@type":"Restaurant","name":"A","url":"https://listings.test/r/a"}"#,
    ]);

    // without an origin the two spellings are different listings
    assert_eq!(extract_listings(&html).len(), 2);

    let listings = extract_listings_with_base(&html, Some("https://listings.test"));
    assert_eq!(listings.len(), 1);
    assert_eq!(listings[0].url.as_deref(), Some("https://listings.test/r/a"));
}

#[test]
fn absolute_urls_are_left_alone() {
    let html = listing_page(&[r#"{"@type":"Restaurant","name":"Elsewhere","url":"https://other.test/r/x"}"#]);

    let listings = extract_listings_with_base(&html, Some("https://listings.test"));

    assert_eq!(listings[0].url.as_deref(), Some("https://other.test/r/x"));
}
