#![allow(dead_code)]

use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    Router,
};
use jobswipe_backend::{
    config::Config,
    database::pool::{create_memory_pool, run_migrations},
    routes, AppState,
};
use serde_json::{json, Value as JsonValue};
use sqlx::SqlitePool;
use tower::ServiceExt;

pub fn test_config(indicators_url: &str) -> Config {
    Config {
        server_address: "127.0.0.1:0".into(),
        database_url: "sqlite::memory:".into(),
        jwt_secret: "test_secret_key".into(),
        jwt_ttl_hours: 1,
        api_rps: 1000,
        public_rps: 1000,
        indicators_url: indicators_url.into(),
        indicators_timeout_secs: 2,
        cors_origins: Vec::new(),
    }
}

pub struct TestServer {
    pub app: Router,
    pub pool: SqlitePool,
}

impl TestServer {
    pub async fn new() -> Self {
        Self::with_indicators("http://127.0.0.1:9").await
    }

    pub async fn with_indicators(indicators_url: &str) -> Self {
        let pool = tokio_test::assert_ok!(create_memory_pool().await);
        tokio_test::assert_ok!(run_migrations(&pool).await);
        let config = test_config(indicators_url);
        let state = AppState::new(pool.clone(), &config);
        Self {
            app: routes::router(state, &config),
            pool,
        }
    }

    pub async fn send(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<JsonValue>,
    ) -> (StatusCode, JsonValue) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }
        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = self.app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let value = if bytes.is_empty() {
            JsonValue::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(JsonValue::Null)
        };
        (status, value)
    }

    pub async fn get(&self, uri: &str, token: Option<&str>) -> (StatusCode, JsonValue) {
        self.send(Method::GET, uri, token, None).await
    }

    pub async fn post(&self, uri: &str, token: Option<&str>, body: JsonValue) -> (StatusCode, JsonValue) {
        self.send(Method::POST, uri, token, Some(body)).await
    }

    /// Registers, logs in and returns the bearer token.
    pub async fn signup(&self, username: &str) -> String {
        let (status, _) = self
            .post(
                "/api/auth/register",
                None,
                json!({
                    "username": username,
                    "email": format!("{}@example.com", username),
                    "first_name": username,
                    "last_name": "Tester",
                    "password": "s3cret-password"
                }),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED);
        self.login(username).await
    }

    pub async fn login(&self, username: &str) -> String {
        let (status, body) = self
            .post(
                "/api/auth/login",
                None,
                json!({ "username": username, "password": "s3cret-password" }),
            )
            .await;
        assert_eq!(status, StatusCode::OK, "login failed: {}", body);
        body["token"].as_str().unwrap().to_string()
    }

    pub async fn signup_as(&self, username: &str, role: &str) -> String {
        let token = self.signup(username).await;
        let (status, body) = self
            .post("/api/profile/role", Some(&token), json!({ "role": role }))
            .await;
        assert_eq!(status, StatusCode::OK, "choose role failed: {}", body);
        token
    }

    pub async fn publish(&self, token: &str, body: JsonValue) -> i64 {
        let (status, offer) = self.post("/api/offers", Some(token), body).await;
        assert_eq!(status, StatusCode::CREATED, "publish failed: {}", offer);
        offer["id"].as_i64().unwrap()
    }
}
