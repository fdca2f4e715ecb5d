//! End-to-end router tests against a preloaded catalog.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use tower::ServiceExt;

use bookdesk_app::modules::books::{
    self,
    cache::CatalogCache,
    models::{Book, Catalog},
};
use bookdesk_app::modules::schedule::{self, store::ScheduleStore};
use bookdesk_kernel::settings::Settings;
use bookdesk_kernel::ModuleRegistry;

fn test_router() -> Router {
    let catalog = Catalog::new(vec![
        Book {
            id: 1,
            title: "The Hobbit".to_string(),
            authors: "J. R. R. Tolkien".to_string(),
            edition_number: Some("OL7320356M".to_string()),
            publish_year: Some(1937),
            genre: vec!["fantasy".to_string()],
        },
        Book {
            id: 2,
            title: "Three Men in a Boat".to_string(),
            authors: "Jerome K. Jerome".to_string(),
            edition_number: None,
            publish_year: Some(1889),
            genre: vec!["humor".to_string(), "literature".to_string()],
        },
    ]);

    let cache = Arc::new(CatalogCache::preloaded(catalog));
    let store = Arc::new(ScheduleStore::new());

    let mut registry = ModuleRegistry::new();
    registry.register(books::create_module(cache.clone()));
    registry.register(schedule::create_module(cache, store));

    bookdesk_http::build_router(&registry, &Settings::default())
}

async fn get(router: &Router, uri: &str) -> Response {
    router
        .clone()
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap()
}

async fn post_json(router: &Router, uri: &str, body: Value) -> Response {
    router
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(uri)
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap()
}

async fn body_json(response: Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn healthz_responds_ok() {
    let router = test_router();
    let response = get(&router, "/healthz").await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn genre_listing_returns_the_vocabulary_in_order() {
    let router = test_router();
    let response = get(&router, "/api/books/genres").await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body, json!({"genres": ["humor", "fantasy", "literature"]}));
}

#[tokio::test]
async fn book_listing_echoes_filters_and_narrows() {
    let router = test_router();
    let response = get(&router, "/api/books?genre=fantasy&author=Tolkien").await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["genre"], "fantasy");
    assert_eq!(body["author"], "Tolkien");
    assert_eq!(body["title"], "all");
    assert_eq!(body["books"].as_array().unwrap().len(), 1);
    assert_eq!(body["books"][0]["id"], 1);
    assert_eq!(body["books"][0]["title"], "The Hobbit");
}

#[tokio::test]
async fn unfiltered_listing_returns_the_whole_catalog() {
    let router = test_router();
    let body = body_json(get(&router, "/api/books").await).await;

    assert_eq!(body["genre"], "all");
    assert_eq!(body["books"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn empty_filter_values_behave_like_omitted_ones() {
    let router = test_router();
    let body = body_json(get(&router, "/api/books?genre=&author=").await).await;

    assert_eq!(body["books"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn booking_then_listing_round_trip() {
    let router = test_router();

    let response = post_json(
        &router,
        "/api/schedule",
        json!({"book_id": 1, "time": "2099-12-31 12:00:00"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let created = body_json(response).await;
    assert_eq!(created["book_id"], 1);
    assert_eq!(created["book_title"], "The Hobbit");
    assert_eq!(created["book_publish_year"], 1937);
    assert_eq!(created["pickup_time"], "2099-12-31 12:00:00");
    assert!(created["id"].as_str().is_some());

    let listed = body_json(get(&router, "/api/schedule").await).await;
    let schedules = listed["schedules"].as_array().unwrap();
    assert_eq!(schedules.len(), 1);
    assert_eq!(schedules[0]["id"], created["id"]);
}

#[tokio::test]
async fn booking_failures_map_to_distinct_codes() {
    let router = test_router();

    let cases = [
        (json!({}), StatusCode::BAD_REQUEST, "invalid_payload"),
        (
            json!({"book_id": 1, "time": "not-a-date"}),
            StatusCode::BAD_REQUEST,
            "invalid_date_format",
        ),
        (
            json!({"book_id": 1, "time": "2020-01-01 00:00:00"}),
            StatusCode::BAD_REQUEST,
            "past_date",
        ),
        (
            json!({"book_id": 99999, "time": "2099-01-01 00:00:00"}),
            StatusCode::NOT_FOUND,
            "book_not_found",
        ),
    ];

    for (payload, expected_status, expected_code) in cases {
        let response = post_json(&router, "/api/schedule", payload.clone()).await;
        assert_eq!(response.status(), expected_status, "payload: {payload}");

        let body = body_json(response).await;
        assert_eq!(body["error"]["code"], expected_code, "payload: {payload}");
        assert!(body["error"]["trace_id"].as_str().is_some());
        assert!(body["error"]["timestamp"].as_str().is_some());
    }
}

#[tokio::test]
async fn failed_bookings_do_not_appear_in_the_schedule() {
    let router = test_router();

    let _ = post_json(
        &router,
        "/api/schedule",
        json!({"book_id": 99999, "time": "2099-01-01 00:00:00"}),
    )
    .await;

    let listed = body_json(get(&router, "/api/schedule").await).await;
    assert_eq!(listed["schedules"].as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn openapi_spec_covers_module_routes() {
    let router = test_router();
    let body = body_json(get(&router, "/docs/openapi.json").await).await;

    assert!(body["paths"].get("/api/books/genres").is_some());
    assert!(body["paths"].get("/api/schedule/").is_some());
    assert!(body["components"]["schemas"].get("ErrorResponse").is_some());
}
