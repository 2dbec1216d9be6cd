use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(rename_all = "lowercase")]
pub enum ApplicationStatus {
    Pending,
    Accepted,
    Rejected,
}

impl ApplicationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ApplicationStatus::Pending => "pending",
            ApplicationStatus::Accepted => "accepted",
            ApplicationStatus::Rejected => "rejected",
        }
    }

    pub fn is_terminal(&self) -> bool {
        !matches!(self, ApplicationStatus::Pending)
    }
}

/// Employer verdict on a pending application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Decision {
    Accept,
    Reject,
}

impl Decision {
    pub fn target_status(&self) -> ApplicationStatus {
        match self {
            Decision::Accept => ApplicationStatus::Accepted,
            Decision::Reject => ApplicationStatus::Rejected,
        }
    }
}

/// Application row joined with the user id owning the referenced offer.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Application {
    pub id: i64,
    pub offer_id: i64,
    pub candidate_id: Uuid,
    pub employer_id: Uuid,
    pub status: ApplicationStatus,
    pub created_at: DateTime<Utc>,
    pub decided_at: Option<DateTime<Utc>>,
}

impl Application {
    pub fn is_party(&self, user_id: Uuid) -> bool {
        self.candidate_id == user_id || self.employer_id == user_id
    }

    /// The other side of the conversation, or `None` for outsiders.
    pub fn counterpart(&self, user_id: Uuid) -> Option<Uuid> {
        if self.candidate_id == user_id {
            Some(self.employer_id)
        } else if self.employer_id == user_id {
            Some(self.candidate_id)
        } else {
            None
        }
    }

    pub fn is_match(&self) -> bool {
        self.status == ApplicationStatus::Accepted
    }
}

pub(crate) const APPLICATION_SELECT: &str = r#"
    SELECT a.id, a.offer_id, a.candidate_id, p.user_id AS employer_id, a.status,
           a.created_at, a.decided_at
    FROM applications a
    JOIN offers o ON o.id = a.offer_id
    JOIN profiles p ON p.id = o.employer_profile_id
"#;
