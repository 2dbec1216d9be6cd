use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::models::profile::{Profile, ProfileRole};

#[derive(Debug, Clone, Deserialize)]
pub struct ChooseRolePayload {
    pub role: ProfileRole,
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateProfilePayload {
    #[validate(length(max = 32))]
    pub phone: Option<String>,
    #[validate(length(max = 2000))]
    pub professional_summary: Option<String>,
    #[validate(length(max = 1000))]
    pub skills: Option<String>,
    #[validate(length(max = 4000))]
    pub experience: Option<String>,
    pub is_inclusion: Option<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileResponse {
    pub id: i64,
    pub user_id: Uuid,
    pub role: ProfileRole,
    pub is_inclusion: bool,
    pub phone: Option<String>,
    pub professional_summary: Option<String>,
    pub skills: Vec<String>,
    pub experience: Option<String>,
    pub updated_at: DateTime<Utc>,
}

impl From<Profile> for ProfileResponse {
    fn from(profile: Profile) -> Self {
        Self {
            skills: profile.skill_list(),
            id: profile.id,
            user_id: profile.user_id,
            role: profile.role,
            is_inclusion: profile.is_inclusion,
            phone: profile.phone,
            professional_summary: profile.professional_summary,
            experience: profile.experience,
            updated_at: profile.updated_at,
        }
    }
}
