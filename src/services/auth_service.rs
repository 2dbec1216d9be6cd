use sqlx::SqlitePool;
use uuid::Uuid;

use crate::dto::auth_dto::{LoginPayload, RegisterPayload};
use crate::error::{is_unique_violation, Error, Result};
use crate::models::profile::Profile;
use crate::models::user::User;
use crate::services::profile_service::ProfileService;
use crate::utils::crypto::{hash_password, verify_password};
use crate::utils::time::SharedClock;
use crate::utils::token::issue_token;

const USER_COLUMNS: &str =
    "id, username, email, first_name, last_name, password_hash, is_staff, created_at";

pub struct IssuedToken {
    pub token: String,
    pub user: User,
}

#[derive(Clone)]
pub struct AuthService {
    pool: SqlitePool,
    clock: SharedClock,
    jwt_secret: String,
    jwt_ttl_hours: i64,
}

impl AuthService {
    pub fn new(pool: SqlitePool, clock: SharedClock, jwt_secret: String, jwt_ttl_hours: i64) -> Self {
        Self {
            pool,
            clock,
            jwt_secret,
            jwt_ttl_hours,
        }
    }

    /// Creates the user together with an empty `pending` profile.
    pub async fn register(&self, payload: RegisterPayload) -> Result<(User, Profile)> {
        let username = payload.username.trim().to_string();
        let password = payload.password;
        let password_hash = tokio::task::spawn_blocking(move || hash_password(&password))
            .await
            .map_err(|e| Error::Internal(format!("password hashing task failed: {}", e)))??;

        let mut tx = self.pool.begin().await?;
        let user = sqlx::query_as::<_, User>(&format!(
            r#"
            INSERT INTO users (id, username, email, first_name, last_name, password_hash, is_staff, created_at)
            VALUES (?, ?, ?, ?, ?, ?, 0, ?)
            RETURNING {}
            "#,
            USER_COLUMNS
        ))
        .bind(Uuid::new_v4())
        .bind(&username)
        .bind(payload.email.trim())
        .bind(payload.first_name.trim())
        .bind(payload.last_name.trim())
        .bind(password_hash)
        .bind(self.clock.now())
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                Error::Conflict("Username is already taken".into())
            } else {
                Error::from(e)
            }
        })?;

        let profile = ProfileService::create_pending(&mut *tx, user.id, &self.clock).await?;
        tx.commit().await?;

        tracing::info!(user_id = %user.id, username = %user.username, "user registered");
        Ok((user, profile))
    }

    pub async fn login(&self, payload: LoginPayload) -> Result<IssuedToken> {
        let user = self.find_by_username(payload.username.trim()).await?;
        let user = match user {
            Some(user) if verify_password(&payload.password, &user.password_hash) => user,
            _ => {
                tracing::warn!(username = %payload.username, "failed login attempt");
                return Err(Error::Unauthenticated("Invalid username or password".into()));
            }
        };

        let token = self.issue(&user)?;
        Ok(IssuedToken { token, user })
    }

    pub fn issue(&self, user: &User) -> Result<String> {
        issue_token(user.id, user.is_staff, &self.jwt_secret, self.jwt_ttl_hours)
    }

    pub async fn get_user(&self, id: Uuid) -> Result<User> {
        sqlx::query_as::<_, User>(&format!("SELECT {} FROM users WHERE id = ?", USER_COLUMNS))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| Error::NotFound("User not found".into()))
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {} FROM users WHERE username = ?",
            USER_COLUMNS
        ))
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;
        Ok(user)
    }
}
