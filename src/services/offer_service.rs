use sqlx::SqlitePool;

use crate::dto::offer_dto::{CreateOfferPayload, PublicOfferQuery};
use crate::error::{Error, Result};
use crate::middleware::auth::Identity;
use crate::models::offer::{Offer, OfferStatus, OFFER_SELECT};
use crate::models::profile::ProfileRole;
use crate::services::category_service::CategoryService;
use crate::services::offer_query::OfferFilter;
use crate::services::profile_service::ProfileService;
use crate::utils::time::SharedClock;

pub const SUPPORTED_CURRENCIES: [&str; 4] = ["CLP", "USD", "EUR", "UF"];

/// Upper-cases and checks the currency code; a salary without one is CLP.
pub fn normalize_currency(salary: Option<i64>, currency: Option<&str>) -> Result<Option<String>> {
    let code = match currency.map(str::trim).filter(|c| !c.is_empty()) {
        Some(code) => code.to_uppercase(),
        None if salary.is_some() => "CLP".to_string(),
        None => return Ok(None),
    };
    if !SUPPORTED_CURRENCIES.contains(&code.as_str()) {
        return Err(Error::BadRequest(format!("Unsupported currency: {}", code)));
    }
    Ok(Some(code))
}

#[derive(Clone)]
pub struct OfferService {
    pool: SqlitePool,
    clock: SharedClock,
    profiles: ProfileService,
    categories: CategoryService,
}

impl OfferService {
    pub fn new(
        pool: SqlitePool,
        clock: SharedClock,
        profiles: ProfileService,
        categories: CategoryService,
    ) -> Self {
        Self {
            pool,
            clock,
            profiles,
            categories,
        }
    }

    pub async fn create(&self, identity: &Identity, payload: CreateOfferPayload) -> Result<Offer> {
        let profile = self
            .profiles
            .require_role(identity, ProfileRole::Employer, "publish offers")
            .await?;

        if let Some(category_id) = payload.category_id {
            if !self.categories.exists(category_id).await? {
                return Err(Error::BadRequest(format!("Unknown category {}", category_id)));
            }
        }
        let currency = normalize_currency(payload.salary, payload.currency.as_deref())?;

        let id: i64 = sqlx::query_scalar(
            r#"
            INSERT INTO offers (
                employer_profile_id, title, description, category_id, status,
                is_inclusion, salary, currency, created_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
            RETURNING id
            "#,
        )
        .bind(profile.id)
        .bind(payload.title.trim())
        .bind(payload.description)
        .bind(payload.category_id)
        .bind(OfferStatus::Active)
        .bind(payload.is_inclusion)
        .bind(payload.salary)
        .bind(currency)
        .bind(self.clock.now())
        .fetch_one(&self.pool)
        .await?;

        tracing::info!(offer_id = id, employer_id = %identity.user_id, "offer published");
        self.get_by_id(id).await
    }

    pub async fn get_by_id(&self, id: i64) -> Result<Offer> {
        sqlx::query_as::<_, Offer>(&format!("{} WHERE o.id = ?", OFFER_SELECT))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| Error::NotFound(format!("Offer {} not found", id)))
    }

    pub async fn query(&self, filter: &OfferFilter) -> Result<Vec<Offer>> {
        let mut query = filter.to_query();
        let items = query
            .build_query_as::<Offer>()
            .fetch_all(&self.pool)
            .await?;
        Ok(items)
    }

    pub async fn list_own(&self, identity: &Identity) -> Result<Vec<Offer>> {
        let profile = self
            .profiles
            .require_role(identity, ProfileRole::Employer, "manage offers")
            .await?;
        self.query(&OfferFilter::default().owned_by_profile(profile.id))
            .await
    }

    /// Loads an offer and checks the identity owns it.
    pub async fn get_owned(&self, identity: &Identity, id: i64) -> Result<Offer> {
        let offer = self.get_by_id(id).await?;
        if !offer.is_owned_by(identity.user_id) {
            return Err(Error::Unauthorized(
                "Only the employer who published this offer can do that".into(),
            ));
        }
        Ok(offer)
    }

    pub async fn set_status(&self, identity: &Identity, id: i64, status: OfferStatus) -> Result<Offer> {
        let offer = self.get_owned(identity, id).await?;
        if offer.status == status {
            return Ok(offer);
        }

        sqlx::query("UPDATE offers SET status = ? WHERE id = ?")
            .bind(status)
            .bind(id)
            .execute(&self.pool)
            .await?;

        tracing::info!(
            offer_id = id,
            from = offer.status.as_str(),
            to = status.as_str(),
            "offer status changed"
        );
        self.get_by_id(id).await
    }

    /// Removes the offer; its applications and their chats go with it.
    pub async fn delete(&self, identity: &Identity, id: i64) -> Result<()> {
        self.get_owned(identity, id).await?;
        sqlx::query("DELETE FROM offers WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;
        tracing::info!(offer_id = id, employer_id = %identity.user_id, "offer deleted");
        Ok(())
    }

    /// Anonymous detail: anything but an active offer reads as missing.
    pub async fn get_public(&self, id: i64) -> Result<Offer> {
        let offer = self.get_by_id(id).await?;
        if offer.status != OfferStatus::Active {
            return Err(Error::NotFound(format!("Offer {} not found", id)));
        }
        Ok(offer)
    }

    /// Anonymous listing: active offers only, newest first, at most 100.
    pub async fn list_public(&self, params: &PublicOfferQuery) -> Result<Vec<Offer>> {
        let mut filter = OfferFilter::active().limit(params.limit.unwrap_or(20).clamp(1, 100));
        if let Some(category_id) = params.category {
            filter = filter.in_category(category_id);
        }
        if let Some(search) = &params.q {
            filter = filter.matching(search.as_str());
        }
        if params.inclusion.unwrap_or(false) {
            filter = filter.inclusion_only();
        }
        self.query(&filter).await
    }
}
