mod common;

use axum::http::StatusCode;
use common::TestServer;
use serde_json::json;

#[tokio::test]
async fn health_and_anonymous_surface() {
    let server = TestServer::new().await;

    let (status, body) = server.get("/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");

    let (status, body) = server.get("/api/me", None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "unauthenticated");

    let (status, body) = server.get("/api/categories", None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.as_array().unwrap().is_empty());

    for uri in ["/api/nope", "/api/offers/1/unknown"] {
        let (status, _) = server.get(uri, None).await;
        assert_eq!(status, StatusCode::NOT_FOUND, "{}", uri);
    }
}

#[tokio::test]
async fn public_listing_shows_active_offers_newest_first() {
    let server = TestServer::new().await;
    let employer = server.signup_as("acme", "employer").await;

    let older = server.publish(&employer, json!({ "title": "Older" })).await;
    let paused = server.publish(&employer, json!({ "title": "Paused" })).await;
    let newer = server
        .publish(&employer, json!({ "title": "Newer", "is_inclusion": true }))
        .await;
    server
        .post(
            &format!("/api/offers/{}/status", paused),
            Some(&employer),
            json!({ "status": "paused" }),
        )
        .await;

    let (status, body) = server.get("/api/public/offers", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["count"], 2);
    assert_eq!(body["offers"][0]["id"], newer);
    assert_eq!(body["offers"][0]["is_inclusion"], true);
    assert_eq!(body["offers"][1]["id"], older);
    assert!(body["offers"][0].get("salary").is_none());

    let (_, body) = server.get("/api/public/offers?limit=1", None).await;
    assert_eq!(body["count"], 1);

    let (status, body) = server
        .get(&format!("/api/public/offers/{}", newer), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["title"], "Newer");
    assert!(body.get("salary").is_none());

    for missing in [paused, 9999] {
        let (status, body) = server
            .get(&format!("/api/public/offers/{}", missing), None)
            .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "not_found");
    }
}

#[tokio::test]
async fn registration_login_and_me() {
    let server = TestServer::new().await;
    let token = server.signup("camila").await;

    let (status, body) = server.get("/api/me", Some(&token)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["user"]["username"], "camila");
    assert_eq!(body["profile"]["role"], "pending");
    assert!(body["user"].get("password_hash").is_none());

    let (status, body) = server
        .post(
            "/api/auth/register",
            None,
            json!({
                "username": "camila",
                "email": "other@example.com",
                "password": "s3cret-password"
            }),
        )
        .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"], "conflict");

    let (status, _) = server
        .post(
            "/api/auth/login",
            None,
            json!({ "username": "camila", "password": "wrong-password" }),
        )
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn only_staff_create_categories() {
    let server = TestServer::new().await;
    let regular = server.signup("regular").await;
    server.signup("boss").await;
    sqlx::query("UPDATE users SET is_staff = 1 WHERE username = 'boss'")
        .execute(&server.pool)
        .await
        .unwrap();
    let staff = server.login("boss").await;

    let (status, _) = server
        .post("/api/categories", Some(&regular), json!({ "name": "Tecnología" }))
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, body) = server
        .post("/api/categories", Some(&staff), json!({ "name": "Tecnología" }))
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["name"], "Tecnología");

    let (status, _) = server
        .post("/api/categories", Some(&staff), json!({ "name": "Tecnología" }))
        .await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (_, home) = server.get("/api/home", Some(&staff)).await;
    assert_eq!(home["view"], "admin");

    let (_, listed) = server.get("/api/categories", None).await;
    assert_eq!(listed.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn public_listing_filters_by_category_text_and_inclusion() {
    let server = TestServer::new().await;
    server.signup("boss").await;
    sqlx::query("UPDATE users SET is_staff = 1 WHERE username = 'boss'")
        .execute(&server.pool)
        .await
        .unwrap();
    let staff = server.login("boss").await;
    let (_, category) = server
        .post("/api/categories", Some(&staff), json!({ "name": "Salud" }))
        .await;
    let category_id = category["id"].as_i64().unwrap();

    let employer = server.signup_as("clinica", "employer").await;
    let nurse = server
        .publish(
            &employer,
            json!({ "title": "Enfermera", "category_id": category_id, "is_inclusion": true }),
        )
        .await;
    let dev = server
        .publish(&employer, json!({ "title": "Dev", "description": "Rust y SQL" }))
        .await;

    let (_, body) = server
        .get(&format!("/api/public/offers?category={}", category_id), None)
        .await;
    assert_eq!(body["count"], 1);
    assert_eq!(body["offers"][0]["id"], nurse);
    assert_eq!(body["offers"][0]["category"], "Salud");

    let (_, body) = server.get("/api/public/offers?q=Rust", None).await;
    assert_eq!(body["count"], 1);
    assert_eq!(body["offers"][0]["id"], dev);

    let (_, body) = server.get("/api/public/offers?inclusion=true", None).await;
    assert_eq!(body["count"], 1);
    assert_eq!(body["offers"][0]["id"], nurse);
}

#[tokio::test]
async fn search_text_matches_wildcard_characters_literally() {
    let server = TestServer::new().await;
    let employer = server.signup_as("acme", "employer").await;
    server.publish(&employer, json!({ "title": "Backend" })).await;
    let bonus = server
        .publish(&employer, json!({ "title": "Bono 50% extra" }))
        .await;

    let (status, body) = server.get("/api/public/offers?q=%25", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["count"], 1);
    assert_eq!(body["offers"][0]["id"], bonus);

    let (_, body) = server.get("/api/public/offers?q=50%25", None).await;
    assert_eq!(body["count"], 1);

    let (_, body) = server.get("/api/public/offers?q=_", None).await;
    assert_eq!(body["count"], 0);
}
