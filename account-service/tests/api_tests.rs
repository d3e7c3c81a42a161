mod common;

use common::expired_token;
use common::TestApp;
use common::TEST_SECRET;
use credential::TokenValidator;
use reqwest::StatusCode;
use serde_json::json;

#[tokio::test]
async fn test_register_success() {
    let app = TestApp::spawn().await;

    let response = app
        .post("/api/register")
        .json(&json!({
            "email": "nicola@example.com",
            "password": "pass_word!"
        }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::CREATED);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert!(body["data"]["id"].is_string());
    assert!(!body["data"]["id"].as_str().unwrap().is_empty());
    assert_eq!(body["data"]["email"], "nicola@example.com");
    assert!(body["data"]["created_at"].is_string());
}

#[tokio::test]
async fn test_register_duplicate_email() {
    let app = TestApp::spawn().await;

    app.post("/api/register")
        .json(&json!({
            "email": "nicola@example.com",
            "password": "pass_word!"
        }))
        .send()
        .await
        .expect("Failed to execute request");

    let response = app
        .post("/api/register")
        .json(&json!({
            "email": "nicola@example.com",
            "password": "other_password"
        }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::CONFLICT);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert!(body["data"]["message"]
        .as_str()
        .unwrap()
        .contains("already registered"));
}

#[tokio::test]
async fn test_register_email_is_case_insensitive() {
    let app = TestApp::spawn().await;

    app.post("/api/register")
        .json(&json!({
            "email": "Nicola@Example.com",
            "password": "pass_word!"
        }))
        .send()
        .await
        .expect("Failed to execute request");

    let response = app
        .post("/api/register")
        .json(&json!({
            "email": "nicola@example.com",
            "password": "pass_word!"
        }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_register_invalid_email() {
    let app = TestApp::spawn().await;

    let response = app
        .post("/api/register")
        .json(&json!({
            "email": "not-an-email",
            "password": "pass_word!"
        }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert!(body["data"]["message"]
        .as_str()
        .unwrap()
        .to_lowercase()
        .contains("email"));
}

#[tokio::test]
async fn test_register_short_password() {
    let app = TestApp::spawn().await;

    let response = app
        .post("/api/register")
        .json(&json!({
            "email": "nicola@example.com",
            "password": "short"
        }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert!(body["data"]["message"]
        .as_str()
        .unwrap()
        .contains("too short"));
}

#[tokio::test]
async fn test_concurrent_duplicate_registration() {
    let app = TestApp::spawn().await;

    let body = json!({
        "email": "race@example.com",
        "password": "pass_word!"
    });

    let (first, second) = tokio::join!(
        app.post("/api/register").json(&body).send(),
        app.post("/api/register").json(&body).send(),
    );

    let mut statuses = vec![
        first.expect("Failed to execute request").status(),
        second.expect("Failed to execute request").status(),
    ];
    statuses.sort();

    assert_eq!(statuses, vec![StatusCode::CREATED, StatusCode::CONFLICT]);
}

#[tokio::test]
async fn test_login_success() {
    let app = TestApp::spawn().await;

    let register_response = app
        .post("/api/register")
        .json(&json!({
            "email": "nicola@example.com",
            "password": "pass_word!"
        }))
        .send()
        .await
        .expect("Failed to execute request");
    let registered: serde_json::Value = register_response
        .json()
        .await
        .expect("Failed to parse response");
    let account_id = registered["data"]["id"].as_str().unwrap().to_string();

    let response = app
        .post("/api/login")
        .json(&json!({
            "email": "nicola@example.com",
            "password": "pass_word!"
        }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::OK);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    let token = body["data"]["token"].as_str().unwrap();
    assert!(!token.is_empty());

    // The token must assert the registered account.
    let validator = TokenValidator::new(TEST_SECRET).expect("Failed to build validator");
    let claims = validator.validate(token).expect("Token did not validate");
    assert_eq!(claims.sub, account_id);
    assert_eq!(claims.email(), Some("nicola@example.com".to_string()));
}

#[tokio::test]
async fn test_login_invalid_email_shape() {
    let app = TestApp::spawn().await;

    let response = app
        .post("/api/login")
        .json(&json!({
            "email": "not-an-email",
            "password": "pass_word!"
        }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_login_failures_are_uniform() {
    let app = TestApp::spawn().await;

    app.post("/api/register")
        .json(&json!({
            "email": "nicola@example.com",
            "password": "pass_word!"
        }))
        .send()
        .await
        .expect("Failed to execute request");

    let wrong_password = app
        .post("/api/login")
        .json(&json!({
            "email": "nicola@example.com",
            "password": "wrong_password"
        }))
        .send()
        .await
        .expect("Failed to execute request");

    let unknown_account = app
        .post("/api/login")
        .json(&json!({
            "email": "nobody@example.com",
            "password": "pass_word!"
        }))
        .send()
        .await
        .expect("Failed to execute request");

    // Same status, byte-identical body: no enumeration hint.
    assert_eq!(wrong_password.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(unknown_account.status(), StatusCode::UNAUTHORIZED);

    let wrong_password_body = wrong_password.text().await.expect("Failed to read body");
    let unknown_account_body = unknown_account.text().await.expect("Failed to read body");
    assert_eq!(wrong_password_body, unknown_account_body);
}

#[tokio::test]
async fn test_register_login_me_scenario() {
    let app = TestApp::spawn().await;

    let register_response = app
        .post("/api/register")
        .json(&json!({
            "email": "a@x.com",
            "password": "longpassword1"
        }))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(register_response.status(), StatusCode::CREATED);
    let registered: serde_json::Value = register_response
        .json()
        .await
        .expect("Failed to parse response");
    let account_id = registered["data"]["id"].as_str().unwrap().to_string();

    let login_response = app
        .post("/api/login")
        .json(&json!({
            "email": "a@x.com",
            "password": "longpassword1"
        }))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(login_response.status(), StatusCode::OK);
    let login_body: serde_json::Value = login_response
        .json()
        .await
        .expect("Failed to parse response");
    let token = login_body["data"]["token"].as_str().unwrap().to_string();

    let me_response = app
        .get("/api/me")
        .header("Authorization", format!("Bearer {}", token))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(me_response.status(), StatusCode::OK);
    let me_body: serde_json::Value = me_response.json().await.expect("Failed to parse response");
    assert_eq!(me_body["data"]["account_id"], account_id.as_str());
    assert_eq!(me_body["data"]["email"], "a@x.com");
}

#[tokio::test]
async fn test_me_without_token() {
    let app = TestApp::spawn().await;

    let response = app
        .get("/api/me")
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_me_with_wrong_scheme() {
    let app = TestApp::spawn().await;

    let response = app
        .get("/api/me")
        .header("Authorization", "Token abc")
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["error"], "invalid authorization header format");
}

#[tokio::test]
async fn test_me_with_expired_token() {
    let app = TestApp::spawn().await;

    let token = expired_token("b7b2f8d0-0c83-4b8a-b4a2-0f12f0b6b1aa");
    let response = app
        .get("/api/me")
        .header("Authorization", format!("Bearer {}", token))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    // The response does not say the token was expired.
    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["error"], "invalid token");
}

#[tokio::test]
async fn test_me_with_tampered_token() {
    let app = TestApp::spawn().await;

    app.post("/api/register")
        .json(&json!({
            "email": "nicola@example.com",
            "password": "pass_word!"
        }))
        .send()
        .await
        .expect("Failed to execute request");

    let login_response = app
        .post("/api/login")
        .json(&json!({
            "email": "nicola@example.com",
            "password": "pass_word!"
        }))
        .send()
        .await
        .expect("Failed to execute request");
    let login_body: serde_json::Value = login_response
        .json()
        .await
        .expect("Failed to parse response");
    let token = login_body["data"]["token"].as_str().unwrap().to_string();

    // Swap the claims segment for an expired token's claims.
    let other = expired_token("b7b2f8d0-0c83-4b8a-b4a2-0f12f0b6b1aa");
    let signature = token.rsplit('.').next().unwrap();
    let header = token.split('.').next().unwrap();
    let claims = other.split('.').nth(1).unwrap();
    let tampered = format!("{}.{}.{}", header, claims, signature);

    let response = app
        .get("/api/me")
        .header("Authorization", format!("Bearer {}", tampered))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["error"], "invalid token");
}
