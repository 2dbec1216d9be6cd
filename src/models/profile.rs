use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(rename_all = "lowercase")]
pub enum ProfileRole {
    Pending,
    Candidate,
    Employer,
}

impl ProfileRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProfileRole::Pending => "pending",
            ProfileRole::Candidate => "candidate",
            ProfileRole::Employer => "employer",
        }
    }

    /// Onboarding is one-way: only a pending profile may pick a role, and
    /// only a concrete one.
    pub fn can_become(&self, next: ProfileRole) -> bool {
        matches!(
            (self, next),
            (ProfileRole::Pending, ProfileRole::Candidate)
                | (ProfileRole::Pending, ProfileRole::Employer)
        )
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Profile {
    pub id: i64,
    pub user_id: Uuid,
    pub role: ProfileRole,
    pub is_inclusion: bool,
    pub phone: Option<String>,
    pub professional_summary: Option<String>,
    pub skills: Option<String>,
    pub experience: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Profile {
    /// Comma separated skills, trimmed, blanks dropped.
    pub fn skill_list(&self) -> Vec<String> {
        self.skills
            .as_deref()
            .unwrap_or_default()
            .split(',')
            .map(str::trim)
            .filter(|skill| !skill.is_empty())
            .map(str::to_string)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_transitions_only_leave_pending() {
        assert!(ProfileRole::Pending.can_become(ProfileRole::Candidate));
        assert!(ProfileRole::Pending.can_become(ProfileRole::Employer));
        assert!(!ProfileRole::Pending.can_become(ProfileRole::Pending));
        assert!(!ProfileRole::Candidate.can_become(ProfileRole::Employer));
        assert!(!ProfileRole::Employer.can_become(ProfileRole::Candidate));
        assert!(!ProfileRole::Candidate.can_become(ProfileRole::Pending));
    }
}
