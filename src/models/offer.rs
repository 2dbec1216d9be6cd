use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(rename_all = "lowercase")]
pub enum OfferStatus {
    Active,
    Paused,
    Closed,
}

impl OfferStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            OfferStatus::Active => "active",
            OfferStatus::Paused => "paused",
            OfferStatus::Closed => "closed",
        }
    }
}

/// Offer row joined with its owner's user id and its category name.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Offer {
    pub id: i64,
    pub employer_profile_id: i64,
    pub employer_id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub category_id: Option<i64>,
    pub category_name: Option<String>,
    pub status: OfferStatus,
    pub is_inclusion: bool,
    pub salary: Option<i64>,
    pub currency: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Offer {
    pub fn is_owned_by(&self, user_id: Uuid) -> bool {
        self.employer_id == user_id
    }
}

pub(crate) const OFFER_SELECT: &str = r#"
    SELECT o.id, o.employer_profile_id, p.user_id AS employer_id, o.title, o.description,
           o.category_id, c.name AS category_name, o.status, o.is_inclusion, o.salary,
           o.currency, o.created_at
    FROM offers o
    JOIN profiles p ON p.id = o.employer_profile_id
    LEFT JOIN categories c ON c.id = o.category_id
"#;
