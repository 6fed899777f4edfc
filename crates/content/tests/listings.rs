//! Listing builders over seeded collections.

mod common;

use serde_json::json;

use common::FlakyStore;
use gallery_content::Gallery;
use gallery_content::view::policy::PLACEHOLDER_IMAGE;

fn event(store: &FlakyStore, collection: &str, id: &str, year: Option<i32>, extra: serde_json::Value) {
    let mut body = extra;
    if let Some(year) = year {
        body["dates"] = json!([{"date": format!("{}-05-01", year), "time": "19:00"}]);
    }
    store.seed(collection, id, body);
}

// ============================================================================
// Highlights
// ============================================================================

#[tokio::test]
async fn test_highlights_filters_featured_and_orders_by_recency() {
    let store = FlakyStore::new();
    event(&store, "events", "e2020", Some(2020), json!({"name": "A", "isFeatured": true}));
    event(&store, "events", "eNone", None, json!({"name": "B", "isFeatured": "TRUE"}));
    event(&store, "events", "e2023", Some(2023), json!({"name": "C", "isFeatured": "true"}));
    event(&store, "events", "e2019", Some(2019), json!({"name": "D", "isFeatured": true}));
    event(&store, "events", "off1", Some(2024), json!({"name": "E", "isFeatured": "false"}));
    event(&store, "events", "off2", Some(2024), json!({"name": "F", "isFeatured": 1}));
    event(&store, "events", "off3", Some(2024), json!({"name": "G", "isFeatured": null}));
    event(&store, "events", "off4", Some(2024), json!({"name": "H"}));

    let listing = Gallery::new(store).highlights().await;
    assert!(listing.error.is_none());

    let years: Vec<_> = listing.items.iter().map(|e| e.year).collect();
    assert_eq!(years, vec![Some(2023), Some(2020), Some(2019), None]);

    let ids: Vec<_> = listing.items.iter().map(|e| e.id.as_str()).collect();
    assert_eq!(ids, vec!["e2023", "e2020", "e2019", "eNone"]);
    assert_eq!(listing.items[3].dates[0].date, "TBD");
}

#[tokio::test]
async fn test_highlights_degrades_on_store_failure() {
    let store = FlakyStore::new();
    store.fail_collection("events");

    let listing = Gallery::new(store).highlights().await;
    assert!(listing.items.is_empty());
    assert_eq!(listing.error.as_deref(), Some("Unable to load events right now."));
}

// ============================================================================
// Performances
// ============================================================================

#[tokio::test]
async fn test_performances_merge_tagged_events_without_duplicates() {
    let store = FlakyStore::new();
    event(&store, "performances", "p1", Some(2021), json!({"title": "Breath"}));
    event(&store, "performances", "shared", Some(2018), json!({"title": "Dedicated"}));
    event(&store, "events", "shared", Some(2018), json!({"title": "Duplicate", "event_type": "performance"}));
    event(&store, "events", "e1", Some(2022), json!({"name": "Live", "eventType": "Talk, PERFORMANCE"}));
    event(&store, "events", "e2", Some(2023), json!({"name": "Talk only", "type": ["talk"]}));

    let listing = Gallery::new(store).performances().await;
    let ids: Vec<_> = listing.items.iter().map(|e| e.id.as_str()).collect();
    assert_eq!(ids, vec!["e1", "p1", "shared"]);
    assert_eq!(listing.items[2].title, "Dedicated");
}

#[tokio::test]
async fn test_performances_survive_event_failure() {
    let store = FlakyStore::new();
    event(&store, "performances", "p1", Some(2021), json!({"title": "Breath"}));
    store.fail_collection("events");

    let listing = Gallery::new(store).performances().await;
    let ids: Vec<_> = listing.items.iter().map(|e| e.id.as_str()).collect();
    assert_eq!(ids, vec!["p1"]);
    assert_eq!(listing.error.as_deref(), Some("Unable to load events right now."));
}

#[tokio::test]
async fn test_performances_degrade_when_every_source_fails() {
    let store = FlakyStore::new();
    event(&store, "performances", "p1", Some(2021), json!({"title": "Breath"}));
    store.fail_collection("events");
    store.fail_collection("performances");

    let listing = Gallery::new(store).performances().await;
    assert!(listing.items.is_empty());
    assert_eq!(
        listing.error.as_deref(),
        Some("Unable to load performances right now.")
    );
}

#[tokio::test]
async fn test_performance_without_images_uses_placeholder() {
    let store = FlakyStore::new();
    store.seed(
        "performances",
        "p1",
        json!({"title": "Bare", "slug": "bare", "gallery": []}),
    );
    let gallery = Gallery::new(store);

    let listing = gallery.performances().await;
    assert_eq!(listing.items[0].image, PLACEHOLDER_IMAGE);

    let detail = gallery.performance("bare").await.unwrap().unwrap();
    assert_eq!(detail.image, PLACEHOLDER_IMAGE);
    assert_eq!(detail.title, "Bare");
}

#[tokio::test]
async fn test_performance_detail_falls_back_to_events() {
    let store = FlakyStore::new();
    store.seed("events", "e1", json!({"name": "Opening night", "slug": "opening"}));
    let gallery = Gallery::new(store);

    let detail = gallery.performance("opening").await.unwrap().unwrap();
    assert_eq!(detail.id, "e1");
    assert!(gallery.performance("missing").await.unwrap().is_none());
}

// ============================================================================
// Exhibitions and headquarters
// ============================================================================

#[tokio::test]
async fn test_exhibitions_carry_headquarters_address() {
    let store = FlakyStore::new();
    store.seed("exhibitions", "x1", json!({"name": "Salt", "openingDate": "2021-02-01"}));
    store.seed("exhibitions", "x2", json!({"name": "Glass", "openingDate": {"seconds": 1_700_000_000}}));
    store.seed("exhibitions", "x3", json!({"name": "Undated"}));
    store.seed("headquarters", "hq1", json!({"address": "1 Rue A", "exhibitions": ["x2", "x1"]}));

    let listing = Gallery::new(store).exhibitions().await;
    let names: Vec<_> = listing.items.iter().map(|x| x.name.as_str()).collect();
    assert_eq!(names, vec!["Glass", "Salt", "Undated"]);
    assert_eq!(listing.items[0].address.as_deref(), Some("1 Rue A"));
    assert_eq!(listing.items[2].address, None);
}

#[tokio::test]
async fn test_exhibitions_survive_headquarters_failure() {
    let store = FlakyStore::new();
    store.seed("exhibitions", "x1", json!({"name": "Salt"}));
    store.fail_collection("headquarters");

    let listing = Gallery::new(store).exhibitions().await;
    assert!(listing.error.is_none());
    assert_eq!(listing.items.len(), 1);
    assert_eq!(listing.items[0].address, None);
}

#[tokio::test]
async fn test_headquarters_resolve_exhibitions_in_order() {
    let store = FlakyStore::new();
    store.seed("exhibitions", "x1", json!({"name": "Salt"}));
    store.seed("exhibitions", "x2", json!({"name": "Glass"}));
    store.seed("headquarters", "hq1", json!({"address": "1 Rue A", "exhibitions": ["x2", "gone", "x1"]}));
    store.seed("headquarters", "hq2", json!({"address": "2 Rue B"}));

    let listing = Gallery::new(store).headquarters().await;
    assert_eq!(listing.items.len(), 2);

    let hq1 = &listing.items[0];
    let names: Vec<_> = hq1.exhibitions.iter().map(|x| x.name.as_str()).collect();
    assert_eq!(names, vec!["Glass", "Salt"]);
    assert_eq!(hq1.exhibitions[0].address.as_deref(), Some("1 Rue A"));
    assert!(listing.items[1].exhibitions.is_empty());
}

// ============================================================================
// Artists and team
// ============================================================================

#[tokio::test]
async fn test_artists_are_alphabetical_ignoring_case() {
    let store = FlakyStore::new();
    store.seed("artists", "a1", json!({"name": "zoe Park", "slug": "zoe"}));
    store.seed("artists", "a2", json!({"name": "Adam Ek"}));
    store.seed("artists", "a3", json!({"name": "bea Ruiz", "slug": "bea"}));

    let listing = Gallery::new(store).artists().await;
    let names: Vec<_> = listing.items.iter().map(|a| a.name.as_str()).collect();
    assert_eq!(names, vec!["Adam Ek", "bea Ruiz", "zoe Park"]);
    assert_eq!(listing.items[0].slug, "a2");
}

#[tokio::test]
async fn test_team_only_lists_flagged_members() {
    let store = FlakyStore::new();
    store.seed("members", "m1", json!({"name": "Olga", "team": true, "roles": ["Director"]}));
    store.seed("members", "m2", json!({"name": "Ben", "team": true}));
    store.seed("members", "m3", json!({"name": "Guest", "team": false}));
    store.seed("members", "m4", json!({"name": "Friend", "team": "true"}));

    let listing = Gallery::new(store).team().await;
    let names: Vec<_> = listing.items.iter().map(|m| m.name.as_str()).collect();
    assert_eq!(names, vec!["Ben", "Olga"]);
    assert_eq!(listing.items[1].roles, vec!["Director"]);
}

#[tokio::test]
async fn test_empty_store_gives_empty_listings() {
    let gallery = Gallery::new(FlakyStore::new());
    assert!(gallery.artists().await.items.is_empty());
    assert!(gallery.team().await.items.is_empty());
    assert!(gallery.exhibitions().await.items.is_empty());
    assert!(gallery.headquarters().await.error.is_none());
}
