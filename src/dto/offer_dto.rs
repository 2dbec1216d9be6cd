use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::offer::{Offer, OfferStatus};
use crate::services::indicator_service::EconomicIndicators;

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateOfferPayload {
    #[validate(length(min = 1, max = 200))]
    pub title: String,
    #[validate(length(max = 5000))]
    pub description: Option<String>,
    pub category_id: Option<i64>,
    #[serde(default)]
    pub is_inclusion: bool,
    #[validate(range(min = 0))]
    pub salary: Option<i64>,
    pub currency: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UpdateOfferStatusPayload {
    pub status: OfferStatus,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OfferResponse {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    pub category_id: Option<i64>,
    pub category_name: Option<String>,
    pub status: OfferStatus,
    pub is_inclusion: bool,
    pub salary: Option<i64>,
    pub currency: Option<String>,
    /// Salary converted with the current indicators, when both are known.
    pub salary_clp: Option<i64>,
    pub created_at: DateTime<Utc>,
}

impl OfferResponse {
    pub fn from_offer(offer: Offer, indicators: Option<&EconomicIndicators>) -> Self {
        let salary_clp = match (offer.salary, offer.currency.as_deref(), indicators) {
            (Some(amount), Some(currency), Some(rates)) => rates.convert_to_clp(amount, currency),
            (Some(amount), Some("CLP"), None) => Some(amount),
            _ => None,
        };
        Self {
            id: offer.id,
            title: offer.title,
            description: offer.description,
            category_id: offer.category_id,
            category_name: offer.category_name,
            status: offer.status,
            is_inclusion: offer.is_inclusion,
            salary: offer.salary,
            currency: offer.currency,
            salary_clp,
            created_at: offer.created_at,
        }
    }
}

impl From<Offer> for OfferResponse {
    fn from(offer: Offer) -> Self {
        Self::from_offer(offer, None)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedResponse {
    pub offers: Vec<OfferResponse>,
    pub indicators: Option<EconomicIndicators>,
}

impl FeedResponse {
    pub fn new(offers: Vec<Offer>, indicators: Option<EconomicIndicators>) -> Self {
        Self {
            offers: offers
                .into_iter()
                .map(|offer| OfferResponse::from_offer(offer, indicators.as_ref()))
                .collect(),
            indicators,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PublicOfferQuery {
    pub limit: Option<i64>,
    pub category: Option<i64>,
    pub q: Option<String>,
    pub inclusion: Option<bool>,
}

/// Reduced shape served to unauthenticated callers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PublicOfferSummary {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    pub category: Option<String>,
    pub is_inclusion: bool,
    pub published_at: DateTime<Utc>,
}

impl From<Offer> for PublicOfferSummary {
    fn from(offer: Offer) -> Self {
        Self {
            id: offer.id,
            title: offer.title,
            description: offer.description,
            category: offer.category_name,
            is_inclusion: offer.is_inclusion,
            published_at: offer.created_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PublicOfferListResponse {
    pub count: usize,
    pub offers: Vec<PublicOfferSummary>,
}

impl From<Vec<Offer>> for PublicOfferListResponse {
    fn from(offers: Vec<Offer>) -> Self {
        let offers: Vec<PublicOfferSummary> = offers.into_iter().map(Into::into).collect();
        Self {
            count: offers.len(),
            offers,
        }
    }
}
