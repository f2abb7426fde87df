//! Server API tests

use super::*;
use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use http_body_util::BodyExt;
use tower::ServiceExt;

fn setup_test_app() -> Router {
    let config = ServerConfig {
        require_auth: false,
        ..Default::default()
    };
    create_router(config, Some(VisionClient::mock()), None)
}

async fn get_body_json(response: axum::response::Response) -> serde_json::Value {
    let body = response.into_body();
    let bytes = body.collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

fn json_post(uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_string(&body).unwrap()))
        .unwrap()
}

// ========== Health ==========

#[tokio::test]
async fn test_health_reports_vision_backend() {
    let app = setup_test_app();

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let json = get_body_json(response).await;
    assert_eq!(json["status"], "ok");
    assert_eq!(json["vision"]["configured"], true);
    assert_eq!(json["vision"]["healthy"], true);
    assert_eq!(json["vision"]["model"], "mock");
}

// ========== Receipt analysis ==========

#[tokio::test]
async fn test_analyze_receipt_with_mock_backend() {
    let app = setup_test_app();

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/receipts/analyze")
                .header("content-type", "application/octet-stream")
                .body(Body::from(&b"fake image bytes"[..]))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let json = get_body_json(response).await;
    assert_eq!(json["store_name"], "Mock Diner");
    assert_eq!(json["needs_review"], false);
    // quantity 2 fans out into two billable sub-items
    assert_eq!(json["items"][0]["quantity"], 2);
    assert_eq!(json["items"][0]["subitems"][0]["name"], "Cheeseburger (1)");
    assert_eq!(json["items"][0]["subitems"][1]["name"], "Cheeseburger (2)");
}

#[tokio::test]
async fn test_analyze_receipt_rejects_empty_body() {
    let app = setup_test_app();

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/receipts/analyze")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_analyze_receipt_unavailable_without_vision() {
    let config = ServerConfig {
        require_auth: false,
        ..Default::default()
    };
    let app = create_router(config, None, None);

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/receipts/analyze")
                .body(Body::from(&b"img"[..]))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
}

#[tokio::test]
async fn test_reconcile_saved_response() {
    let app = setup_test_app();

    let raw_text = r#"Sure! {"store_name": "Deli", "items": [{"name": "Burger", "price": "7.70", "quantity": "2"}], "subtotal": "7.70", "tax_amount": "0.76", "tax_rate": "9.875%", "total_amount": "8.46"}"#;
    let response = app
        .oneshot(json_post(
            "/api/receipts/reconcile",
            serde_json::json!({ "raw_text": raw_text }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let json = get_body_json(response).await;
    assert_eq!(json["store_name"], "Deli");
    assert_eq!(json["items"][0]["total_line_price"], "7.70");
    assert_eq!(json["items"][0]["price"], "3.85");
    assert!(json.get("raw_response").is_none());
}

#[tokio::test]
async fn test_reconcile_garbage_returns_sentinel_not_error() {
    let app = setup_test_app();

    let response = app
        .oneshot(json_post(
            "/api/receipts/reconcile",
            serde_json::json!({ "raw_text": "the image was too blurry" }),
        ))
        .await
        .unwrap();

    // Malformed model output is a business condition, not an HTTP error
    assert_eq!(response.status(), StatusCode::OK);

    let json = get_body_json(response).await;
    assert_eq!(json["store_name"], "N/A");
    assert_eq!(json["raw_response"], "the image was too blurry");
    assert_eq!(json["items"].as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn test_reconcile_rejects_empty_text() {
    let app = setup_test_app();

    let response = app
        .oneshot(json_post(
            "/api/receipts/reconcile",
            serde_json::json!({ "raw_text": "   " }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// ========== Availability ==========

#[tokio::test]
async fn test_common_availability_intersection() {
    let app = setup_test_app();

    let body = serde_json::json!({
        "members": [
            { "name": "alice", "availability": { "monday": { "14": true, "15": true } } },
            { "name": "bob", "availability": { "monday": { "14": true } } }
        ],
        "events": []
    });

    let response = app
        .oneshot(json_post("/api/availability/common", body))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let json = get_body_json(response).await;
    let days = json.as_array().unwrap();
    assert_eq!(days.len(), 1);
    assert_eq!(days[0]["day"], "Monday");
    assert_eq!(days[0]["availableSlots"][0], "14");
    assert_eq!(days[0]["hourCount"], 1);
    assert_eq!(days[0]["totalSlots"], 24);
    assert_eq!(days[0]["timeSlots"][0]["timeRange"], "2:00 PM - 3:00 PM");
}

#[tokio::test]
async fn test_common_availability_event_blocks_slot() {
    let app = setup_test_app();

    let body = serde_json::json!({
        "members": [
            { "availability": { "friday": { "18": true, "19": true } } }
        ],
        "events": [
            {
                "name": "dinner",
                "scheduledTime": { "day": "friday", "startTime": "6:00 PM", "endTime": "7:00 PM" }
            }
        ]
    });

    let response = app
        .oneshot(json_post("/api/availability/common", body))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let json = get_body_json(response).await;
    assert_eq!(json[0]["availableSlots"].as_array().unwrap().len(), 1);
    assert_eq!(json[0]["availableSlots"][0], "19");
}

#[tokio::test]
async fn test_common_availability_requires_members() {
    let app = setup_test_app();

    let response = app
        .oneshot(json_post(
            "/api/availability/common",
            serde_json::json!({ "members": [], "events": [] }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// ========== Billing ==========

#[tokio::test]
async fn test_split_bill_per_member_amounts() {
    let app = setup_test_app();

    // Analyze first, then split the resulting receipt
    let analyze = app
        .clone()
        .oneshot(json_post(
            "/api/receipts/reconcile",
            serde_json::json!({
                "raw_text": r#"{"items": [{"name": "Burger", "price": "7.70", "quantity": "2"}], "subtotal": "7.70", "gratuity": "2.00"}"#
            }),
        ))
        .await
        .unwrap();
    let receipt = get_body_json(analyze).await;

    let body = serde_json::json!({
        "receipt": receipt,
        "assignments": {
            "alice": [ { "item_index": 0, "subitem_index": 0 } ],
            "bob": [ { "item_index": 0, "subitem_index": 1 } ]
        }
    });

    let response = app
        .oneshot(json_post("/api/billing/split", body))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let json = get_body_json(response).await;
    let amounts = json.as_array().unwrap();
    assert_eq!(amounts.len(), 2);
    assert_eq!(amounts[0]["name"], "alice");
    assert_eq!(amounts[0]["item_total"], "3.85");
    // Equal assigned value means the tip splits evenly
    assert_eq!(amounts[0]["gratuity_share"], "1.00");
    assert_eq!(amounts[1]["gratuity_share"], "1.00");
}

#[tokio::test]
async fn test_split_bill_requires_assignments() {
    let app = setup_test_app();

    let reconcile = app
        .clone()
        .oneshot(json_post(
            "/api/receipts/reconcile",
            serde_json::json!({ "raw_text": r#"{"items": []}"# }),
        ))
        .await
        .unwrap();
    let receipt = get_body_json(reconcile).await;

    let response = app
        .oneshot(json_post(
            "/api/billing/split",
            serde_json::json!({ "receipt": receipt, "assignments": {} }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// ========== Payments ==========

#[tokio::test]
async fn test_payments_unavailable_when_unconfigured() {
    let app = setup_test_app();

    let response = app
        .oneshot(json_post(
            "/api/payments/orders",
            serde_json::json!({ "value": "12.69" }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
}

// ========== Auth ==========

#[tokio::test]
async fn test_auth_required_by_default() {
    let config = ServerConfig {
        api_keys: vec!["test-key-1234".to_string()],
        ..Default::default()
    };
    let app = create_router(config, Some(VisionClient::mock()), None);

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_auth_accepts_valid_api_key() {
    let config = ServerConfig {
        api_keys: vec!["test-key-1234".to_string()],
        ..Default::default()
    };
    let app = create_router(config, Some(VisionClient::mock()), None);

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/health")
                .header("authorization", "Bearer test-key-1234")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_auth_rejects_wrong_api_key() {
    let config = ServerConfig {
        api_keys: vec!["test-key-1234".to_string()],
        ..Default::default()
    };
    let app = create_router(config, Some(VisionClient::mock()), None);

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/health")
                .header("authorization", "Bearer wrong-key-5678")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[test]
fn test_validate_api_key_constant_time() {
    let keys = vec!["abcd1234".to_string()];
    assert!(validate_api_key("abcd1234", &keys));
    assert!(!validate_api_key("abcd1235", &keys));
    // Length mismatch short-circuits without comparison
    assert!(!validate_api_key("abcd", &keys));
    assert!(!validate_api_key("abcd1234", &[]));
}
