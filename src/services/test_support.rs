use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;

use chrono::{DateTime, Duration, TimeZone, Utc};
use sqlx::SqlitePool;
use uuid::Uuid;

use crate::config::Config;
use crate::database::pool::{create_memory_pool, run_migrations};
use crate::middleware::auth::Identity;
use crate::models::profile::ProfileRole;
use crate::utils::time::{MockClock, SharedClock};
use crate::AppState;

pub(crate) fn base_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 3, 1, 9, 0, 0).unwrap()
}

/// Clock that advances one minute on every reading.
pub(crate) fn stepping_clock() -> SharedClock {
    let tick = Arc::new(AtomicI64::new(0));
    let mut clock = MockClock::new();
    clock
        .expect_now()
        .returning(move || base_time() + Duration::minutes(tick.fetch_add(1, Ordering::SeqCst)));
    Arc::new(clock)
}

pub(crate) fn test_config() -> Config {
    Config {
        server_address: "127.0.0.1:0".into(),
        database_url: "sqlite::memory:".into(),
        jwt_secret: "unit_test_secret".into(),
        jwt_ttl_hours: 1,
        api_rps: 1000,
        public_rps: 1000,
        indicators_url: "http://127.0.0.1:9".into(),
        indicators_timeout_secs: 1,
        cors_origins: Vec::new(),
    }
}

pub(crate) struct TestApp {
    pub pool: SqlitePool,
    pub state: AppState,
}

impl TestApp {
    pub async fn new() -> Self {
        let pool = create_memory_pool().await.expect("memory pool");
        run_migrations(&pool).await.expect("migrations");
        let state = AppState::with_clock(pool.clone(), &test_config(), stepping_clock());
        Self { pool, state }
    }
}

async fn insert_bare_user(pool: &SqlitePool, username: &str, is_staff: bool) -> Uuid {
    let id = Uuid::new_v4();
    sqlx::query(
        "INSERT INTO users (id, username, email, first_name, last_name, password_hash, is_staff, created_at)
         VALUES (?, ?, ?, ?, ?, 'not-a-hash', ?, ?)",
    )
    .bind(id)
    .bind(username)
    .bind(format!("{}@example.com", username))
    .bind(username.to_uppercase())
    .bind("Test")
    .bind(is_staff)
    .bind(base_time())
    .execute(pool)
    .await
    .expect("seed user");
    id
}

/// User with a profile already in `role`, skipping password hashing.
pub(crate) async fn insert_user(pool: &SqlitePool, username: &str, role: ProfileRole) -> Identity {
    let id = insert_bare_user(pool, username, false).await;
    sqlx::query("INSERT INTO profiles (user_id, role, created_at, updated_at) VALUES (?, ?, ?, ?)")
        .bind(id)
        .bind(role)
        .bind(base_time())
        .bind(base_time())
        .execute(pool)
        .await
        .expect("seed profile");
    Identity::new(id, false)
}

/// Staff accounts carry no profile.
pub(crate) async fn insert_staff(pool: &SqlitePool, username: &str) -> Identity {
    let id = insert_bare_user(pool, username, true).await;
    Identity::new(id, true)
}

pub(crate) async fn set_inclusion(pool: &SqlitePool, identity: &Identity, value: bool) {
    sqlx::query("UPDATE profiles SET is_inclusion = ? WHERE user_id = ?")
        .bind(value)
        .bind(identity.user_id)
        .execute(pool)
        .await
        .expect("set inclusion");
}
