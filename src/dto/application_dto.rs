use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::application::{Application, ApplicationStatus};
use crate::services::profile_service::CandidateCard;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplicationResponse {
    pub id: i64,
    pub offer_id: i64,
    pub candidate_id: Uuid,
    pub status: ApplicationStatus,
    pub created_at: DateTime<Utc>,
    pub decided_at: Option<DateTime<Utc>>,
}

impl From<Application> for ApplicationResponse {
    fn from(application: Application) -> Self {
        Self {
            id: application.id,
            offer_id: application.offer_id,
            candidate_id: application.candidate_id,
            status: application.status,
            created_at: application.created_at,
            decided_at: application.decided_at,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ReviewCandidate {
    pub user_id: Uuid,
    pub display_name: String,
    pub is_inclusion: bool,
    pub professional_summary: Option<String>,
    pub skills: Option<String>,
    pub experience: Option<String>,
}

impl From<CandidateCard> for ReviewCandidate {
    fn from(card: CandidateCard) -> Self {
        Self {
            display_name: card.display_name(),
            user_id: card.user_id,
            is_inclusion: card.is_inclusion,
            professional_summary: card.professional_summary,
            skills: card.skills,
            experience: card.experience,
        }
    }
}

/// Next application waiting for the employer's decision, if any.
#[derive(Debug, Clone, Serialize)]
pub struct ReviewResponse {
    pub offer_id: i64,
    pub pending: i64,
    pub application: Option<ApplicationResponse>,
    pub candidate: Option<ReviewCandidate>,
}
