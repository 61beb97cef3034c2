use axum::{Router, body::Body, response::Response};
use fedem_adapters::{HashMapTrackingStore, HashMapUserStore, JwtConfig, MockEmailClient};
use fedem_core::Email;
use fedem_service_lib::{FedemService, ServiceConfig};
use http::{Request, StatusCode, header};
use http_body_util::BodyExt;
use secrecy::Secret;
use serde_json::{Value, json};
use tower::ServiceExt;

const ADMIN_EMAIL: &str = "admin@fedem.example";

fn test_app() -> Router {
    let config = ServiceConfig {
        jwt: JwtConfig {
            secret: Secret::from("test-secret".to_string()),
            ttl_seconds: 900,
            issuer: "SlimPath".to_string(),
            audience: "user".to_string(),
        },
        admin_email: ADMIN_EMAIL.to_string(),
        reset_link_base: "https://app.fedem.example".to_string(),
        operator: Email::try_from(Secret::from("operator@fedem.example".to_string())).unwrap(),
    };

    FedemService::new(
        HashMapUserStore::new(),
        HashMapTrackingStore::new(),
        MockEmailClient::new(),
        config,
    )
    .as_nested_router(None)
}

fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn authed_json_request(method: &str, uri: &str, token: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .header(header::AUTHORIZATION, format!("Bearer {token}"))
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn authed_request(method: &str, uri: &str, token: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::AUTHORIZATION, format!("Bearer {token}"))
        .body(Body::empty())
        .unwrap()
}

async fn body_json(response: Response<Body>) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

fn register_body(username: &str, email: &str) -> Value {
    json!({
        "username": username,
        "email": email,
        "password": "Abcdef1!",
    })
}

async fn register(app: &Router, username: &str, email: &str) -> Value {
    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/auth/register",
            register_body(username, email),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await
}

#[tokio::test]
async fn register_returns_user_summary_and_both_tokens() {
    let app = test_app();

    let body = register(&app, "alice", "alice@example.com").await;

    assert_eq!(body["username"], "alice");
    assert_eq!(body["email"], "alice@example.com");
    assert_eq!(body["isAdmin"], false);
    assert_eq!(body["isAuthorized"], false);
    assert!(body["userId"].is_string());
    assert!(body["accessToken"].is_string());
    assert_eq!(body["refreshToken"].as_str().unwrap().len(), 80);
}

#[tokio::test]
async fn register_with_the_admin_address_is_case_insensitive() {
    let app = test_app();

    let body = register(&app, "boss", "Admin@Fedem.Example").await;

    assert_eq!(body["isAdmin"], true);
}

#[tokio::test]
async fn register_rejects_bad_input_with_400() {
    let app = test_app();

    for body in [
        json!({"username": "alice", "email": "not-an-email", "password": "Abcdef1!"}),
        json!({"username": "alice", "email": "alice@example.com", "password": "weak"}),
        json!({"username": "  ", "email": "alice@example.com", "password": "Abcdef1!"}),
        // Missing fields fail deserialization, not domain validation.
        json!({"email": "alice@example.com", "password": "Abcdef1!"}),
        json!({"username": "alice", "password": "Abcdef1!"}),
        json!({"username": "alice", "email": "alice@example.com"}),
    ] {
        let response = app
            .clone()
            .oneshot(json_request("POST", "/auth/register", body))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}

#[tokio::test]
async fn duplicate_registration_conflicts() {
    let app = test_app();
    register(&app, "alice", "alice@example.com").await;

    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/auth/register",
            register_body("alice2", "alice@example.com"),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CONFLICT);
    let body = body_json(response).await;
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn login_updates_last_login_and_returns_tokens() {
    let app = test_app();
    register(&app, "alice", "alice@example.com").await;

    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/auth/login",
            json!({"email": "alice@example.com", "password": "Abcdef1!"}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert!(body["lastLogin"].is_string());
    assert!(body["accessToken"].is_string());
    assert!(body["refreshToken"].is_string());
}

#[tokio::test]
async fn login_rejections_are_uniform() {
    let app = test_app();
    register(&app, "alice", "alice@example.com").await;

    let unknown = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/auth/login",
            json!({"email": "nobody@example.com", "password": "Abcdef1!"}),
        ))
        .await
        .unwrap();
    let wrong_password = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/auth/login",
            json!({"email": "alice@example.com", "password": "Wrong1!aa"}),
        ))
        .await
        .unwrap();

    assert_eq!(unknown.status(), StatusCode::BAD_REQUEST);
    assert_eq!(wrong_password.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        body_json(unknown).await["error"],
        body_json(wrong_password).await["error"]
    );
}

#[tokio::test]
async fn refresh_rotates_and_invalidates_the_previous_token() {
    let app = test_app();
    let registered = register(&app, "alice", "alice@example.com").await;
    let first_token = registered["refreshToken"].as_str().unwrap().to_string();

    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/auth/refresh-token",
            json!({"refreshToken": first_token}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    let second_token = body["refreshToken"].as_str().unwrap();
    assert_ne!(second_token, first_token);

    // The rotated-out token no longer works.
    let replay = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/auth/refresh-token",
            json!({"refreshToken": first_token}),
        ))
        .await
        .unwrap();
    assert_eq!(replay.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn logout_is_idempotent_and_kills_the_refresh_token() {
    let app = test_app();
    let registered = register(&app, "alice", "alice@example.com").await;
    let access = registered["accessToken"].as_str().unwrap().to_string();
    let refresh = registered["refreshToken"].as_str().unwrap().to_string();

    let first = app
        .clone()
        .oneshot(authed_request("POST", "/auth/logout", &access))
        .await
        .unwrap();
    assert_eq!(first.status(), StatusCode::OK);

    let second = app
        .clone()
        .oneshot(authed_request("POST", "/auth/logout", &access))
        .await
        .unwrap();
    assert_eq!(second.status(), StatusCode::OK);

    let refresh_attempt = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/auth/refresh-token",
            json!({"refreshToken": refresh}),
        ))
        .await
        .unwrap();
    assert_eq!(refresh_attempt.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn bearer_routes_reject_missing_and_garbage_tokens() {
    let app = test_app();

    let missing = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/auth/logout")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(missing.status(), StatusCode::BAD_REQUEST);

    let garbage = app
        .clone()
        .oneshot(authed_request("POST", "/auth/logout", "not-a-jwt"))
        .await
        .unwrap();
    assert_eq!(garbage.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn authorize_flips_the_flag_and_404s_on_unknown_users() {
    let app = test_app();
    let registered = register(&app, "alice", "alice@example.com").await;
    let access = registered["accessToken"].as_str().unwrap().to_string();

    let response = app
        .clone()
        .oneshot(authed_json_request(
            "POST",
            "/auth/authorize",
            &access,
            json!({"email": "alice@example.com", "isAuthorized": true}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["isAuthorized"], true);

    let unknown = app
        .clone()
        .oneshot(authed_json_request(
            "POST",
            "/auth/authorize",
            &access,
            json!({"email": "nobody@example.com", "isAuthorized": true}),
        ))
        .await
        .unwrap();
    assert_eq!(unknown.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn users_listing_never_exposes_credentials() {
    let app = test_app();
    register(&app, "alice", "alice@example.com").await;
    register(&app, "bob", "bob@example.com").await;

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("GET")
                .uri("/auth/users")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    let users = body["users"].as_array().unwrap();
    assert_eq!(users.len(), 2);
    for user in users {
        assert!(user.get("password").is_none());
        assert!(user.get("refreshToken").is_none());
        assert!(user["username"].is_string());
    }
}

#[tokio::test]
async fn reset_link_reports_unknown_addresses() {
    let app = test_app();

    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/auth/reset-link",
            json!({"email": "nobody@example.com"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn reset_with_a_bogus_token_is_a_generic_400() {
    let app = test_app();

    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/auth/reset",
            json!({"token": "deadbeef", "newPassword": "Abcdef1!"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["error"], "Invalid or expired reset token");
}

#[tokio::test]
async fn delete_account_succeeds_even_when_repeated() {
    let app = test_app();
    let registered = register(&app, "alice", "alice@example.com").await;
    let access = registered["accessToken"].as_str().unwrap().to_string();

    let first = app
        .clone()
        .oneshot(authed_request("DELETE", "/auth/delete", &access))
        .await
        .unwrap();
    assert_eq!(first.status(), StatusCode::OK);

    // Token still validates; the second delete finds nothing and stays 200.
    let second = app
        .clone()
        .oneshot(authed_request("DELETE", "/auth/delete", &access))
        .await
        .unwrap();
    assert_eq!(second.status(), StatusCode::OK);
}

#[tokio::test]
async fn payment_request_404s_for_unknown_users() {
    let app = test_app();

    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/auth/payment/details",
            json!({
                "email": "nobody@example.com",
                "totalPrice": "49.90",
                "country": "DE",
                "weight": "2kg",
                "shipmentType": "express",
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn tracking_lifecycle_create_get_update() {
    let app = test_app();
    let registered = register(&app, "alice", "alice@example.com").await;
    let access = registered["accessToken"].as_str().unwrap().to_string();

    let created = app
        .clone()
        .oneshot(authed_json_request(
            "POST",
            "/tracking/create",
            &access,
            json!({
                "email": "alice@example.com",
                "country": "DE",
                "weight": "2kg",
                "shipmentType": "express",
                "totalPrice": "49.90",
            }),
        ))
        .await
        .unwrap();
    assert_eq!(created.status(), StatusCode::CREATED);
    let created = body_json(created).await;

    let tracking_id = created["trackingId"].as_str().unwrap().to_string();
    assert!(tracking_id.starts_with("FEDEM-"));
    assert_eq!(tracking_id.len(), "FEDEM-".len() + 8 + 1 + 8);

    let details = &created["trackingDetails"];
    assert_eq!(details["currentStage"], 1);
    let stages = details["trackingStages"].as_array().unwrap();
    assert_eq!(stages.len(), 1);
    assert_eq!(stages[0]["location"], "Processing Center");
    assert_eq!(stages[0]["status"], "Order Placed");

    let fetched = app
        .clone()
        .oneshot(authed_request(
            "GET",
            &format!("/tracking/{tracking_id}"),
            &access,
        ))
        .await
        .unwrap();
    assert_eq!(fetched.status(), StatusCode::OK);
    assert_eq!(
        body_json(fetched).await["trackingStages"]
            .as_array()
            .unwrap()
            .len(),
        1
    );

    let updated = app
        .clone()
        .oneshot(authed_json_request(
            "PUT",
            &format!("/tracking/update/{tracking_id}"),
            &access,
            json!({"stage": 2, "location": "Transit Hub", "status": "In Transit"}),
        ))
        .await
        .unwrap();
    assert_eq!(updated.status(), StatusCode::OK);
    let updated = body_json(updated).await;
    assert_eq!(updated["currentStage"], 2);
    assert_eq!(updated["trackingStages"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn tracking_routes_404_on_unknown_ids() {
    let app = test_app();
    let registered = register(&app, "alice", "alice@example.com").await;
    let access = registered["accessToken"].as_str().unwrap().to_string();

    let fetched = app
        .clone()
        .oneshot(authed_request(
            "GET",
            "/tracking/FEDEM-20260830-00000000",
            &access,
        ))
        .await
        .unwrap();
    assert_eq!(fetched.status(), StatusCode::NOT_FOUND);

    let updated = app
        .clone()
        .oneshot(authed_json_request(
            "PUT",
            "/tracking/update/FEDEM-20260830-00000000",
            &access,
            json!({"stage": 2, "location": "Transit Hub", "status": "In Transit"}),
        ))
        .await
        .unwrap();
    assert_eq!(updated.status(), StatusCode::NOT_FOUND);
}
