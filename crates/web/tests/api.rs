use std::sync::Arc;

use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Request, StatusCode, header},
};
use serde_json::{Value, json};
use storage::{DataStore, MemoryStore};
use tower::ServiceExt;
use web::{build_router, middleware::auth::ApiKeys, state::AppState};

const API_KEY: &str = "test-key";

fn app() -> Router {
    let store: Arc<dyn DataStore> = Arc::new(MemoryStore::from_seed().unwrap());
    build_router(
        AppState::new(store, false),
        ApiKeys::from_comma_separated(API_KEY),
    )
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, body)
}

fn get(uri: &str) -> Request<Body> {
    Request::get(uri).body(Body::empty()).unwrap()
}

fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::post(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn authorized(mut request: Request<Body>) -> Request<Body> {
    request.headers_mut().insert(
        header::AUTHORIZATION,
        format!("Bearer {}", API_KEY).parse().unwrap(),
    );
    request
}

#[tokio::test]
async fn test_list_funding_is_paginated() {
    let app = app();
    let (status, body) = send(&app, get("/api/funding?page=1&page_size=5")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"].as_array().unwrap().len(), 5);
    assert_eq!(body["pagination"]["page_size"], 5);
    assert!(body["pagination"]["total_items"].as_i64().unwrap() > 5);
}

#[tokio::test]
async fn test_funding_category_filter() {
    let app = app();
    let (status, body) = send(&app, get("/api/funding?category=public&page_size=100")).await;

    assert_eq!(status, StatusCode::OK);
    let data = body["data"].as_array().unwrap();
    assert!(!data.is_empty());
    assert!(data.iter().any(|o| o["id"] == "wbso"));
    assert!(data.iter().all(|o| o["id"] != "rubio-impact"));
}

#[tokio::test]
async fn test_page_far_past_the_end_is_empty() {
    let app = app();
    let (status, body) = send(&app, get("/api/funding?page=50000000&page_size=100")).await;

    assert_eq!(status, StatusCode::OK);
    assert!(body["data"].as_array().unwrap().is_empty());
    assert!(body["pagination"]["total_items"].as_i64().unwrap() > 0);
}

#[tokio::test]
async fn test_invalid_page_size_is_bad_request() {
    let app = app();
    let (status, _) = send(&app, get("/api/funding?page_size=0")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_category_counts_cover_every_category() {
    let app = app();
    let (status, body) = send(&app, get("/api/funding/categories")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 8);
}

#[tokio::test]
async fn test_unknown_investor_is_not_found() {
    let app = app();
    let (status, body) = send(&app, get("/api/investors/inv-999")).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Resource not found");
}

#[tokio::test]
async fn test_opportunity_investors_lists_every_investor() {
    let app = app();
    let (status, body) = send(&app, get("/api/funding/rockstart/investors")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["opportunity_id"], "rockstart");
    assert_eq!(body["investors"].as_array().unwrap().len(), 10);
}

#[tokio::test]
async fn test_progress_created_on_first_access() {
    let app = app();
    let (status, body) = send(&app, get("/api/users/alice/progress")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["xp_points"], 0);
    assert_eq!(body["level"], 1);
    assert_eq!(body["xp_to_next_level"], 100);
}

#[tokio::test]
async fn test_locked_stage_submission_is_conflict() {
    let app = app();
    let request = post_json(
        "/api/users/bob/pitches",
        json!({
            "stage": 3,
            "title": "Growth plan",
            "content": { "market_expansion": "Benelux first, then DACH region" }
        }),
    );
    let (status, body) = send(&app, request).await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["accepted"], false);
}

#[tokio::test]
async fn test_empty_pitch_content_is_rejected() {
    let app = app();
    let request = post_json(
        "/api/users/bob/pitches",
        json!({ "stage": 0, "title": "Idea", "content": {} }),
    );
    let (status, body) = send(&app, request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Validation failed");
}

#[tokio::test]
async fn test_accepted_pitch_is_readable_by_stage() {
    let app = app();
    let request = post_json(
        "/api/users/carol/pitches",
        json!({
            "stage": 0,
            "title": "Idea",
            "content": { "value_proposition": "Affordable soil sensors for small farms" }
        }),
    );
    let (status, body) = send(&app, request).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["accepted"], true);

    let (status, pitch) = send(&app, get("/api/users/carol/pitches/0")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(pitch["title"], "Idea");

    let (status, _) = send(&app, get("/api/users/carol/pitches/1")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(&app, get("/api/users/carol/pitches/9")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_protected_routes_require_api_key() {
    let app = app();
    let unlock = || {
        Request::post("/api/users/dave/achievements/first-pitch")
            .body(Body::empty())
            .unwrap()
    };

    let (status, _) = send(&app, unlock()).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, body) = send(&app, authorized(unlock())).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["unlocked"], true);

    let (_, progress) = send(&app, get("/api/users/dave/progress")).await;
    assert_eq!(progress["xp_points"], 25);
}

#[tokio::test]
async fn test_unknown_achievement_is_not_found() {
    let app = app();
    let request = authorized(
        Request::post("/api/users/dave/achievements/not-a-thing")
            .body(Body::empty())
            .unwrap(),
    );
    let (status, _) = send(&app, request).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_feedback_on_missing_pitch_is_not_found() {
    let app = app();
    let request = authorized(post_json(
        "/api/pitches/00000000-0000-0000-0000-000000000000/feedback",
        json!({
            "reviewer_id": "inv-001",
            "reviewer_name": "Startup Amsterdam",
            "message": "Sharpen the target market"
        }),
    ));
    let (status, _) = send(&app, request).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_saving_twice_is_conflict() {
    let app = app();
    let save = || post_json("/api/users/erin/saved", json!({ "opportunity_id": "wbso" }));

    let (status, saved) = send(&app, save()).await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = send(&app, save()).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"], "Opportunity already saved");

    let (status, body) = send(&app, get("/api/users/erin/saved/wbso")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["saved"], true);
    assert_eq!(body["id"], saved["id"]);

    let (_, list) = send(&app, get("/api/users/erin/saved")).await;
    assert_eq!(list[0]["opportunity"]["id"], "wbso");
}

#[tokio::test]
async fn test_saving_unknown_opportunity_is_not_found() {
    let app = app();
    let request = post_json("/api/users/erin/saved", json!({ "opportunity_id": "nope" }));
    let (status, _) = send(&app, request).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_discovery_unlocks_and_notifies() {
    let app = app();
    let (status, body) = send(
        &app,
        post_json("/api/users/frank/discoveries/wbso-2025", json!({})),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["first_discovery"], true);
    assert_eq!(body["newly_unlocked"], json!(["discover-2025"]));

    let (status, notifications) = send(&app, get("/api/users/frank/notifications")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(notifications.as_array().unwrap().len(), 1);

    let (status, body) = send(
        &app,
        post_json("/api/users/frank/notifications/read-all", json!({})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["updated"], 1);

    let (_, unread) = send(&app, get("/api/users/frank/notifications")).await;
    assert!(unread.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_openapi_document_is_served() {
    let app = app();
    let (status, body) = send(&app, get("/api-docs/openapi.json")).await;

    assert_eq!(status, StatusCode::OK);
    assert!(body["paths"]["/api/funding"].is_object());
}

fn put_json(uri: &str, body: Value) -> Request<Body> {
    Request::put(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

#[tokio::test]
async fn test_connection_request_notifies_recipient() {
    let app = app();
    let (status, created) = send(
        &app,
        post_json(
            "/api/users/anna/connections",
            json!({ "recipient_id": "bram", "message": "Samen naar de demo day?" }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["status"], "pending");

    let (_, notifications) = send(&app, get("/api/users/bram/notifications")).await;
    let notifications = notifications.as_array().unwrap();
    assert_eq!(notifications.len(), 1);
    assert_eq!(notifications[0]["kind"], "connection_request");
    assert_eq!(notifications[0]["related_entity_id"], created["id"]);

    let (status, pending) = send(&app, get("/api/users/bram/connections/pending")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(pending[0]["connected_user_id"], "anna");
    assert_eq!(pending[0]["is_requester"], false);

    let (_, sent) = send(&app, get("/api/users/anna/connections/pending")).await;
    assert!(sent.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_connection_lifecycle() {
    let app = app();
    let (_, status_before) = send(&app, get("/api/users/anna/connections/bram/status")).await;
    assert_eq!(status_before["status"], "none");

    let (_, created) = send(
        &app,
        post_json("/api/users/anna/connections", json!({ "recipient_id": "bram" })),
    )
    .await;
    let id = created["id"].as_str().unwrap().to_string();

    let (status, answered) = send(
        &app,
        put_json(&format!("/api/connections/{}", id), json!({ "status": "accepted" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(answered["status"], "accepted");

    let (_, reverse) = send(&app, get("/api/users/bram/connections/anna/status")).await;
    assert_eq!(reverse["status"], "accepted");

    let (_, notifications) = send(&app, get("/api/users/anna/notifications")).await;
    assert_eq!(notifications[0]["kind"], "connection_accepted");

    let (status, _) = send(
        &app,
        put_json(&format!("/api/connections/{}", id), json!({ "status": "rejected" })),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, _) = send(
        &app,
        Request::delete(format!("/api/connections/{}", id))
            .body(Body::empty())
            .unwrap(),
    )
    .await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (_, listed) = send(&app, get("/api/users/anna/connections")).await;
    assert!(listed.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_duplicate_connection_in_either_direction_is_conflict() {
    let app = app();
    let (status, _) = send(
        &app,
        post_json("/api/users/anna/connections", json!({ "recipient_id": "bram" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, _) = send(
        &app,
        post_json("/api/users/anna/connections", json!({ "recipient_id": "bram" })),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, _) = send(
        &app,
        post_json("/api/users/bram/connections", json!({ "recipient_id": "anna" })),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_connecting_with_yourself_is_bad_request() {
    let app = app();
    let (status, _) = send(
        &app,
        post_json("/api/users/anna/connections", json!({ "recipient_id": "anna" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_pending_is_not_a_valid_answer() {
    let app = app();
    let (status, _) = send(
        &app,
        put_json(
            &format!("/api/connections/{}", uuid::Uuid::new_v4()),
            json!({ "status": "pending" }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}
