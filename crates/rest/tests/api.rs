//! HTTP behavior of the gallery API.
//!
//! - Listing shapes and degraded listings
//! - Detail pages and 404s
//! - Inquiry status codes
//! - Health endpoints

mod common;

use std::sync::Arc;

use axum::http::StatusCode;
use gallery_persistence::DocumentStore;
use gallery_persistence::backends::sqlite::SqliteStore;
use serde_json::{Value, json};

use common::{DownStore, RecordingRelay, catalogue, server};

fn inquiry() -> Value {
    json!({
        "fullName": "Ana Ruiz",
        "email": "ana@example.com",
        "country": "Spain",
        "city": "Madrid",
        "artworkTitle": "Dune",
        "artistName": "Lina Ayoub"
    })
}

// =============================================================================
// Listings
// =============================================================================

mod listings {
    use super::*;

    #[tokio::test]
    async fn test_artists_listing() {
        let server = server(catalogue(), Arc::new(RecordingRelay::new()));

        let response = server.get("/api/artists").await;
        response.assert_status_ok();

        let body: Value = response.json();
        let names: Vec<_> = body["items"]
            .as_array()
            .unwrap()
            .iter()
            .map(|a| a["name"].as_str().unwrap().to_string())
            .collect();
        assert_eq!(names, vec!["bruno Vidal", "Lina Ayoub"]);
        assert!(body.get("error").is_none() || body["error"].is_null());
    }

    #[tokio::test]
    async fn test_highlights_and_performances_share_tagged_event() {
        let server = server(catalogue(), Arc::new(RecordingRelay::new()));

        let highlights: Value = server.get("/api/highlights").await.json();
        assert_eq!(highlights["items"][0]["id"], "e1");

        let performances: Value = server.get("/api/performances").await.json();
        assert_eq!(performances["items"][0]["id"], "e1");
    }

    #[tokio::test]
    async fn test_exhibitions_and_headquarters() {
        let server = server(catalogue(), Arc::new(RecordingRelay::new()));

        let exhibitions: Value = server.get("/api/exhibitions").await.json();
        assert_eq!(exhibitions["items"][0]["address"], "1 Rue A");

        let headquarters: Value = server.get("/api/headquarters").await.json();
        assert_eq!(headquarters["items"][0]["exhibitions"][0]["name"], "Salt");
    }

    #[tokio::test]
    async fn test_team_listing() {
        let server = server(catalogue(), Arc::new(RecordingRelay::new()));

        let team: Value = server.get("/api/team").await.json();
        assert_eq!(team["items"].as_array().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_listing_degrades_with_200_when_store_is_down() {
        let server = server(DownStore, Arc::new(RecordingRelay::new()));

        let response = server.get("/api/highlights").await;
        response.assert_status_ok();

        let body: Value = response.json();
        assert_eq!(body["items"], json!([]));
        assert_eq!(body["error"], "Unable to load events right now.");
    }
}

// =============================================================================
// Detail pages
// =============================================================================

mod details {
    use super::*;

    #[tokio::test]
    async fn test_artist_detail_omits_dangling_artworks() {
        let server = server(catalogue(), Arc::new(RecordingRelay::new()));

        let response = server.get("/api/artists/lina-ayoub").await;
        response.assert_status_ok();

        let body: Value = response.json();
        assert_eq!(body["name"], "Lina Ayoub");
        assert_eq!(body["artworks"].as_array().unwrap().len(), 1);
        assert_eq!(body["artworks"][0]["title"], "Dune");
        assert_eq!(body["missingArtworks"], json!(["w-gone"]));
    }

    #[tokio::test]
    async fn test_artwork_detail_includes_owner() {
        let server = server(catalogue(), Arc::new(RecordingRelay::new()));

        let body: Value = server.get("/api/artworks/dune").await.json();
        assert_eq!(body["artwork"]["price"], 1200);
        assert_eq!(body["artist"]["slug"], "lina-ayoub");
    }

    #[tokio::test]
    async fn test_unknown_slug_is_404() {
        let server = server(catalogue(), Arc::new(RecordingRelay::new()));

        for path in [
            "/api/artists/nobody",
            "/api/artworks/nothing",
            "/api/exhibitions/nowhere",
            "/api/performances/never",
        ] {
            let response = server.get(path).await;
            response.assert_status(StatusCode::NOT_FOUND);
            let body: Value = response.json();
            assert_eq!(body["ok"], false);
            assert_eq!(body["error"], "not-found");
        }
    }

    #[tokio::test]
    async fn test_detail_store_failure_is_500() {
        let server = server(DownStore, Arc::new(RecordingRelay::new()));

        let response = server.get("/api/artists/lina-ayoub").await;
        response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
        let body: Value = response.json();
        assert_eq!(body["ok"], false);
    }

    #[tokio::test]
    async fn test_detail_from_sqlite_file() {
        let dir = tempfile::tempdir().unwrap();
        let store = SqliteStore::open(dir.path().join("gallery.db")).unwrap();
        store.init_schema().unwrap();
        store
            .put(
                "exhibitions",
                common::doc("x1", json!({"name": "Salt", "slug": "salt"})),
            )
            .await
            .unwrap();

        let server = server(store, Arc::new(RecordingRelay::new()));
        let body: Value = server.get("/api/exhibitions/salt").await.json();
        assert_eq!(body["name"], "Salt");
    }
}

// =============================================================================
// Inquiries
// =============================================================================

mod inquiries {
    use super::*;

    #[tokio::test]
    async fn test_valid_inquiry_returns_ok() {
        let relay = Arc::new(RecordingRelay::new());
        let server = server(catalogue(), Arc::clone(&relay));

        let response = server.post("/api/inquiries").json(&inquiry()).await;
        response.assert_status_ok();

        let body: Value = response.json();
        assert_eq!(body["ok"], true);

        let sent = relay.sent();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].reply_to, "ana@example.com");
        assert_eq!(sent[0].to, vec!["sales@example.com"]);
    }

    #[tokio::test]
    async fn test_missing_field_returns_400_without_relaying() {
        let relay = Arc::new(RecordingRelay::new());
        let server = server(catalogue(), Arc::clone(&relay));

        let mut payload = inquiry();
        payload["artistName"] = json!("   ");

        let response = server.post("/api/inquiries").json(&payload).await;
        response.assert_status(StatusCode::BAD_REQUEST);

        let body: Value = response.json();
        assert_eq!(body["ok"], false);
        assert_eq!(body["error"], "validation");
        assert_eq!(body["field"], "artistName");
        assert!(relay.sent().is_empty());
    }

    #[tokio::test]
    async fn test_malformed_body_returns_400() {
        let relay = Arc::new(RecordingRelay::new());
        let server = server(catalogue(), Arc::clone(&relay));

        let response = server
            .post("/api/inquiries")
            .text("{not json")
            .content_type("application/json")
            .await;
        response.assert_status(StatusCode::BAD_REQUEST);
        assert!(relay.sent().is_empty());
    }

    #[tokio::test]
    async fn test_relay_failure_returns_500() {
        let relay = Arc::new(RecordingRelay::failing());
        let server = server(catalogue(), Arc::clone(&relay));

        let response = server.post("/api/inquiries").json(&inquiry()).await;
        response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);

        let body: Value = response.json();
        assert_eq!(body["ok"], false);
        assert_eq!(body["error"], "relay");
        assert_eq!(relay.sent().len(), 1);
    }
}

// =============================================================================
// Health
// =============================================================================

mod health {
    use super::*;

    #[tokio::test]
    async fn test_health_reports_backend() {
        let server = server(catalogue(), Arc::new(RecordingRelay::new()));

        let body: Value = server.get("/health").await.json();
        assert_eq!(body["status"], "healthy");
        assert_eq!(body["backend"], "memory");
        assert_eq!(body["relay"], "recording");

        server.get("/_liveness").await.assert_status_ok();
        server.get("/_readiness").await.assert_status_ok();
    }

    #[tokio::test]
    async fn test_readiness_fails_when_store_is_down() {
        let server = server(DownStore, Arc::new(RecordingRelay::new()));

        server.get("/_liveness").await.assert_status_ok();
        server
            .get("/_readiness")
            .await
            .assert_status(StatusCode::SERVICE_UNAVAILABLE);
    }
}
