use sqlx::SqlitePool;

use crate::error::{is_unique_violation, Error, Result};
use crate::middleware::auth::Identity;
use crate::models::application::{Application, ApplicationStatus, Decision, APPLICATION_SELECT};
use crate::models::offer::OfferStatus;
use crate::models::profile::ProfileRole;
use crate::services::offer_service::OfferService;
use crate::services::profile_service::ProfileService;
use crate::utils::time::SharedClock;

#[derive(Clone)]
pub struct ApplicationService {
    pool: SqlitePool,
    clock: SharedClock,
    profiles: ProfileService,
    offers: OfferService,
}

impl ApplicationService {
    pub fn new(
        pool: SqlitePool,
        clock: SharedClock,
        profiles: ProfileService,
        offers: OfferService,
    ) -> Self {
        Self {
            pool,
            clock,
            profiles,
            offers,
        }
    }

    /// Candidate postulation. The (offer, candidate) unique index decides
    /// races: the first insert wins, the second sees `DuplicateApplication`.
    pub async fn submit(&self, identity: &Identity, offer_id: i64) -> Result<Application> {
        self.profiles
            .require_role(identity, ProfileRole::Candidate, "apply to offers")
            .await?;
        let offer = self.offers.get_by_id(offer_id).await?;
        if offer.status != OfferStatus::Active {
            return Err(Error::InvalidState(format!(
                "Offer is {} and not accepting applications",
                offer.status.as_str()
            )));
        }

        let id: i64 = sqlx::query_scalar(
            r#"
            INSERT INTO applications (offer_id, candidate_id, status, created_at)
            VALUES (?, ?, ?, ?)
            RETURNING id
            "#,
        )
        .bind(offer_id)
        .bind(identity.user_id)
        .bind(ApplicationStatus::Pending)
        .bind(self.clock.now())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                tracing::warn!(offer_id, candidate_id = %identity.user_id, "duplicate application");
                Error::DuplicateApplication
            } else {
                Error::from(e)
            }
        })?;

        tracing::info!(application_id = id, offer_id, candidate_id = %identity.user_id, "application submitted");
        self.get(id).await
    }

    pub async fn get(&self, id: i64) -> Result<Application> {
        sqlx::query_as::<_, Application>(&format!("{} WHERE a.id = ?", APPLICATION_SELECT))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| Error::NotFound(format!("Application {} not found", id)))
    }

    /// Moves a pending application to accepted or rejected. The update is
    /// conditional on the row still being pending, so the first decision wins
    /// and any later one fails with `InvalidState`.
    pub async fn decide(
        &self,
        identity: &Identity,
        application_id: i64,
        decision: Decision,
    ) -> Result<Application> {
        let application = self.get(application_id).await?;
        if application.employer_id != identity.user_id {
            return Err(Error::Unauthorized(
                "Only the employer who published the offer can review this application".into(),
            ));
        }
        if application.status.is_terminal() {
            return Err(Error::InvalidState(format!(
                "Application has already been {}",
                application.status.as_str()
            )));
        }

        let target = decision.target_status();
        let updated = sqlx::query(
            "UPDATE applications SET status = ?, decided_at = ? WHERE id = ? AND status = ?",
        )
        .bind(target)
        .bind(self.clock.now())
        .bind(application_id)
        .bind(ApplicationStatus::Pending)
        .execute(&self.pool)
        .await?;

        if updated.rows_affected() == 0 {
            return Err(Error::InvalidState(
                "Application was decided by another request".into(),
            ));
        }

        tracing::info!(
            application_id,
            offer_id = application.offer_id,
            status = target.as_str(),
            "application decided"
        );
        self.get(application_id).await
    }

    /// Oldest pending application on the offer, for one-at-a-time review.
    pub async fn next_pending(&self, identity: &Identity, offer_id: i64) -> Result<Option<Application>> {
        self.offers.get_owned(identity, offer_id).await?;
        let next = sqlx::query_as::<_, Application>(&format!(
            "{} WHERE a.offer_id = ? AND a.status = ? ORDER BY a.created_at ASC, a.id ASC LIMIT 1",
            APPLICATION_SELECT
        ))
        .bind(offer_id)
        .bind(ApplicationStatus::Pending)
        .fetch_optional(&self.pool)
        .await?;
        Ok(next)
    }

    pub async fn applied_offer_ids(&self, identity: &Identity) -> Result<Vec<i64>> {
        let ids = sqlx::query_scalar::<_, i64>(
            "SELECT offer_id FROM applications WHERE candidate_id = ? ORDER BY created_at DESC, id DESC",
        )
        .bind(identity.user_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(ids)
    }

    pub async fn pending_count(&self, offer_id: i64) -> Result<i64> {
        let count = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM applications WHERE offer_id = ? AND status = ?",
        )
        .bind(offer_id)
        .bind(ApplicationStatus::Pending)
        .fetch_one(&self.pool)
        .await?;
        Ok(count)
    }
}
