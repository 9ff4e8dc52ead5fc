mod common;

use axum::Router;
use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use common::{BRAND, INFLUENCER};
use dealflow::application::engine::DealEngine;
use dealflow::infrastructure::in_memory::InMemoryDealStore;
use dealflow::interfaces::http::router;
use http_body_util::BodyExt;
use serde_json::{Value, json};
use std::sync::Arc;
use tower::ServiceExt;

enum As {
    Brand,
    Influencer,
    Anonymous,
}

fn app() -> Router {
    router(Arc::new(DealEngine::new(Box::new(InMemoryDealStore::new()))))
}

async fn send(app: &Router, method: Method, uri: &str, who: As, body: Option<Value>) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    match who {
        As::Brand => {
            builder = builder.header("x-user-id", BRAND).header("x-user-role", "brand");
        }
        As::Influencer => {
            builder = builder
                .header("x-user-id", INFLUENCER)
                .header("x-user-role", "influencer");
        }
        As::Anonymous => {}
    }
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, json)
}

fn connect_request() -> Value {
    json!({
        "influencerId": INFLUENCER,
        "description": "Summer collection launch",
        "contentRequirements": { "reels": 2, "posts": 0, "stories": 0, "lives": 0 },
        "fixedPricing": { "reelPrice": 1000 }
    })
}

async fn create_deal(app: &Router) -> String {
    let (status, body) = send(app, Method::POST, "/deals", As::Brand, Some(connect_request())).await;
    assert_eq!(status, StatusCode::CREATED);
    body["deal"]["id"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn test_health() {
    let (status, body) = send(&app(), Method::GET, "/health", As::Anonymous, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn test_full_deal_over_http() {
    let app = app();

    let (status, body) = send(&app, Method::POST, "/deals", As::Brand, Some(connect_request())).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["success"], true);
    assert_eq!(body["deal"]["status"], "requested");
    assert_eq!(body["deal"]["totalAmount"], "2000");
    let id = body["deal"]["id"].as_str().unwrap().to_string();

    let (status, body) = send(
        &app,
        Method::POST,
        &format!("/deals/{id}/counter-offer"),
        As::Influencer,
        Some(json!({ "counterOffer": 1500 })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["deal"]["status"], "counter-offered");
    assert_eq!(body["deal"]["influencers"][0]["counterOffer"], "1500");

    let (_, body) = send(&app, Method::POST, &format!("/deals/{id}/accept"), As::Brand, None).await;
    assert_eq!(body["deal"]["status"], "accepted");

    let (_, body) = send(&app, Method::POST, &format!("/deals/{id}/pay"), As::Brand, None).await;
    assert_eq!(body["deal"]["status"], "ongoing");
    assert_eq!(body["deal"]["paymentStatus"], "paid");

    let (status, body) = send(
        &app,
        Method::POST,
        &format!("/deals/{id}/submit"),
        As::Influencer,
        Some(json!({ "contentType": "reel", "contentUrl": "https://instagram.com/reel/1" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["deal"]["submittedContent"][0]["status"], "pending");
    let content_id = body["deal"]["submittedContent"][0]["id"]
        .as_str()
        .unwrap()
        .to_string();

    let (_, body) = send(
        &app,
        Method::POST,
        &format!("/deals/{id}/content/{content_id}/approve"),
        As::Brand,
        None,
    )
    .await;
    assert_eq!(body["deal"]["status"], "content_approved");
    assert_eq!(body["deal"]["contentPublished"], true);

    let (_, body) = send(
        &app,
        Method::POST,
        &format!("/deals/{id}/release-payment"),
        As::Brand,
        None,
    )
    .await;
    assert_eq!(body["deal"]["status"], "completed");
    assert_eq!(body["deal"]["paymentReleased"], true);
}

#[tokio::test]
async fn test_list_is_scoped_and_filtered() {
    let app = app();
    let first = create_deal(&app).await;
    create_deal(&app).await;
    send(&app, Method::POST, &format!("/deals/{first}/accept"), As::Influencer, None).await;

    let (status, body) = send(&app, Method::GET, "/deals", As::Influencer, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["count"], 2);

    let (_, body) = send(&app, Method::GET, "/deals?status=accepted", As::Brand, None).await;
    assert_eq!(body["count"], 1);
    assert_eq!(body["deals"][0]["id"], first.as_str());

    let (status, body) = send(&app, Method::GET, "/deals?status=bogus", As::Brand, None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
}

#[tokio::test]
async fn test_state_conflict_is_reported() {
    let app = app();
    let id = create_deal(&app).await;
    send(&app, Method::POST, &format!("/deals/{id}/reject"), As::Influencer, None).await;

    let (status, body) = send(&app, Method::POST, &format!("/deals/{id}/accept"), As::Influencer, None).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["success"], false);
    assert_eq!(body["error"], "Cannot accept a deal that is cancelled");
}

#[tokio::test]
async fn test_counter_offer_out_of_range() {
    let app = app();
    let id = create_deal(&app).await;

    for amount in [0, 100000, -5] {
        let (status, body) = send(
            &app,
            Method::POST,
            &format!("/deals/{id}/counter-offer"),
            As::Influencer,
            Some(json!({ "counterOffer": amount })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["success"], false);
    }

    let (_, body) = send(&app, Method::GET, &format!("/deals/{id}"), As::Brand, None).await;
    assert_eq!(body["deal"]["status"], "requested");
}

#[tokio::test]
async fn test_identity_and_roles() {
    let app = app();

    let (status, body) = send(&app, Method::GET, "/deals", As::Anonymous, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["success"], false);

    let (status, _) = send(&app, Method::POST, "/deals", As::Influencer, Some(connect_request())).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let id = create_deal(&app).await;
    let (status, _) = send(&app, Method::POST, &format!("/deals/{id}/pay"), As::Influencer, None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_bad_input() {
    let app = app();

    let (status, body) = send(&app, Method::GET, "/deals/not-a-uuid", As::Brand, None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);

    let (status, _) = send(
        &app,
        Method::GET,
        "/deals/7f0c1a52-8c3e-4c1e-9d43-2b1f0f7e9a10",
        As::Brand,
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, body) = send(
        &app,
        Method::POST,
        "/deals",
        As::Brand,
        Some(json!({ "influencerId": INFLUENCER })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Validation error: A pricing option must be selected");
}

#[tokio::test]
async fn test_out_of_range_fixed_prices_are_rejected() {
    let app = app();

    let (status, body) = send(
        &app,
        Method::POST,
        "/deals",
        As::Brand,
        Some(json!({
            "influencerId": INFLUENCER,
            "contentRequirements": { "reels": 9 },
            "fixedPricing": { "reelPrice": "79228162514264337593543950335" }
        })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
    assert_eq!(body["error"], "Validation error: Fixed pricing total is out of range");

    let (status, body) = send(
        &app,
        Method::POST,
        "/deals",
        As::Brand,
        Some(json!({
            "influencerId": INFLUENCER,
            "contentRequirements": { "reels": 1, "posts": 1 },
            "fixedPricing": { "reelPrice": -1000, "postPrice": 1500 }
        })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
}

#[tokio::test]
async fn test_content_rejection_requires_comment() {
    let app = app();
    let id = create_deal(&app).await;
    send(&app, Method::POST, &format!("/deals/{id}/accept"), As::Influencer, None).await;
    send(&app, Method::POST, &format!("/deals/{id}/pay"), As::Brand, None).await;
    let (_, body) = send(
        &app,
        Method::POST,
        &format!("/deals/{id}/submit"),
        As::Influencer,
        Some(json!({ "contentType": "story", "contentUrl": "https://instagram.com/s/1" })),
    )
    .await;
    let content_id = body["deal"]["submittedContent"][0]["id"]
        .as_str()
        .unwrap()
        .to_string();

    let uri = format!("/deals/{id}/content/{content_id}/reject");
    let (status, _) = send(&app, Method::POST, &uri, As::Brand, Some(json!({}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = send(
        &app,
        Method::POST,
        &uri,
        As::Brand,
        Some(json!({ "comment": "Please tag the brand" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["deal"]["status"], "ongoing");
    assert_eq!(body["deal"]["submittedContent"][0]["status"], "rejected");
    assert_eq!(
        body["deal"]["submittedContent"][0]["comment"],
        "Please tag the brand"
    );
}
