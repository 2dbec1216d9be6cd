use serde::Serialize;
use sqlx::{FromRow, SqliteConnection, SqlitePool};
use uuid::Uuid;

use crate::dto::profile_dto::UpdateProfilePayload;
use crate::error::{Error, Result};
use crate::middleware::auth::Identity;
use crate::models::profile::{Profile, ProfileRole};
use crate::models::user::display_name;
use crate::utils::time::SharedClock;

const PROFILE_COLUMNS: &str = "id, user_id, role, is_inclusion, phone, professional_summary, skills, experience, created_at, updated_at";

/// What an employer sees about an applicant while reviewing the queue.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct CandidateCard {
    pub user_id: Uuid,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub is_inclusion: bool,
    pub professional_summary: Option<String>,
    pub skills: Option<String>,
    pub experience: Option<String>,
}

impl CandidateCard {
    pub fn display_name(&self) -> String {
        display_name(&self.first_name, &self.last_name, &self.username)
    }
}

#[derive(Clone)]
pub struct ProfileService {
    pool: SqlitePool,
    clock: SharedClock,
}

impl ProfileService {
    pub fn new(pool: SqlitePool, clock: SharedClock) -> Self {
        Self { pool, clock }
    }

    pub async fn lookup_profile(&self, user_id: Uuid) -> Result<Option<Profile>> {
        let profile = sqlx::query_as::<_, Profile>(&format!(
            "SELECT {} FROM profiles WHERE user_id = ?",
            PROFILE_COLUMNS
        ))
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(profile)
    }

    /// Profile of the acting identity, provided it holds `role`.
    pub async fn require_role(
        &self,
        identity: &Identity,
        role: ProfileRole,
        action: &str,
    ) -> Result<Profile> {
        let profile = self
            .lookup_profile(identity.user_id)
            .await?
            .ok_or_else(|| Error::Unauthorized(format!("A profile is required to {}", action)))?;

        if profile.role != role {
            return Err(Error::Unauthorized(format!(
                "Only {}s can {}",
                role.as_str(),
                action
            )));
        }
        Ok(profile)
    }

    pub(crate) async fn create_pending(
        conn: &mut SqliteConnection,
        user_id: Uuid,
        clock: &SharedClock,
    ) -> Result<Profile> {
        let now = clock.now();
        let profile = sqlx::query_as::<_, Profile>(&format!(
            "INSERT INTO profiles (user_id, role, created_at, updated_at) VALUES (?, ?, ?, ?) RETURNING {}",
            PROFILE_COLUMNS
        ))
        .bind(user_id)
        .bind(ProfileRole::Pending)
        .bind(now)
        .bind(now)
        .fetch_one(conn)
        .await?;
        Ok(profile)
    }

    pub async fn choose_role(&self, identity: &Identity, role: ProfileRole) -> Result<Profile> {
        if role == ProfileRole::Pending {
            return Err(Error::BadRequest(
                "Please choose either candidate or employer".into(),
            ));
        }

        let current = self
            .lookup_profile(identity.user_id)
            .await?
            .ok_or_else(|| Error::NotFound("Profile not found".into()))?;
        if !current.role.can_become(role) {
            return Err(Error::InvalidState(format!(
                "Profile is already configured as {}",
                current.role.as_str()
            )));
        }

        let updated = sqlx::query_as::<_, Profile>(&format!(
            "UPDATE profiles SET role = ?, updated_at = ? WHERE user_id = ? AND role = ? RETURNING {}",
            PROFILE_COLUMNS
        ))
        .bind(role)
        .bind(self.clock.now())
        .bind(identity.user_id)
        .bind(ProfileRole::Pending)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| Error::InvalidState("Profile role has already been chosen".into()))?;

        tracing::info!(user_id = %identity.user_id, role = role.as_str(), "profile role chosen");
        Ok(updated)
    }

    pub async fn update(&self, identity: &Identity, payload: UpdateProfilePayload) -> Result<Profile> {
        let updated = sqlx::query_as::<_, Profile>(&format!(
            r#"
            UPDATE profiles
            SET
                phone = COALESCE(?, phone),
                professional_summary = COALESCE(?, professional_summary),
                skills = COALESCE(?, skills),
                experience = COALESCE(?, experience),
                is_inclusion = COALESCE(?, is_inclusion),
                updated_at = ?
            WHERE user_id = ?
            RETURNING {}
            "#,
            PROFILE_COLUMNS
        ))
        .bind(payload.phone)
        .bind(payload.professional_summary)
        .bind(payload.skills)
        .bind(payload.experience)
        .bind(payload.is_inclusion)
        .bind(self.clock.now())
        .bind(identity.user_id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| Error::NotFound("Profile not found".into()))?;

        Ok(updated)
    }

    pub async fn candidate_card(&self, user_id: Uuid) -> Result<Option<CandidateCard>> {
        let card = sqlx::query_as::<_, CandidateCard>(
            r#"
            SELECT u.id AS user_id, u.username, u.first_name, u.last_name,
                   p.is_inclusion, p.professional_summary, p.skills, p.experience
            FROM users u
            JOIN profiles p ON p.user_id = u.id
            WHERE u.id = ?
            "#,
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(card)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::test_support::{insert_staff, insert_user, TestApp};

    #[tokio::test]
    async fn missing_profile_is_none_not_an_error() {
        let app = TestApp::new().await;
        let staff = insert_staff(&app.pool, "admin").await;
        let found = app.state.profile_service.lookup_profile(staff.user_id).await.unwrap();
        assert!(found.is_none());

        let err = app
            .state
            .profile_service
            .require_role(&staff, ProfileRole::Candidate, "apply to offers")
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Unauthorized(_)));
    }

    #[tokio::test]
    async fn role_is_chosen_once() {
        let app = TestApp::new().await;
        let user = insert_user(&app.pool, "nuevo", ProfileRole::Pending).await;
        let profiles = &app.state.profile_service;

        let err = profiles.choose_role(&user, ProfileRole::Pending).await.unwrap_err();
        assert!(matches!(err, Error::BadRequest(_)));

        let profile = profiles.choose_role(&user, ProfileRole::Employer).await.unwrap();
        assert_eq!(profile.role, ProfileRole::Employer);

        let err = profiles.choose_role(&user, ProfileRole::Candidate).await.unwrap_err();
        assert!(matches!(err, Error::InvalidState(_)));
        let profile = profiles.lookup_profile(user.user_id).await.unwrap().unwrap();
        assert_eq!(profile.role, ProfileRole::Employer);
    }

    #[tokio::test]
    async fn update_keeps_unspecified_fields() {
        let app = TestApp::new().await;
        let user = insert_user(&app.pool, "ana", ProfileRole::Candidate).await;
        let profiles = &app.state.profile_service;

        profiles
            .update(
                &user,
                UpdateProfilePayload {
                    phone: Some("+56 9 1234 5678".into()),
                    skills: Some("rust, sql ,".into()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        let profile = profiles
            .update(
                &user,
                UpdateProfilePayload {
                    is_inclusion: Some(true),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(profile.phone.as_deref(), Some("+56 9 1234 5678"));
        assert_eq!(profile.skill_list(), vec!["rust", "sql"]);
        assert!(profile.is_inclusion);
    }
}
