use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::{FromRow, SqlitePool};
use uuid::Uuid;

use crate::error::Result;
use crate::middleware::auth::Identity;
use crate::models::application::ApplicationStatus;
use crate::models::user::display_name;

#[derive(Debug, Clone, FromRow)]
struct MatchRow {
    application_id: i64,
    offer_id: i64,
    offer_title: String,
    candidate_id: Uuid,
    candidate_username: String,
    candidate_first_name: String,
    candidate_last_name: String,
    employer_id: Uuid,
    employer_username: String,
    employer_first_name: String,
    employer_last_name: String,
    created_at: DateTime<Utc>,
    decided_at: Option<DateTime<Utc>>,
    unread_count: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchSide {
    Candidate,
    Employer,
}

/// An accepted application as seen by one of its two parties.
#[derive(Debug, Clone, Serialize)]
pub struct Match {
    pub application_id: i64,
    pub offer_id: i64,
    pub offer_title: String,
    pub candidate_id: Uuid,
    pub candidate_name: String,
    pub employer_id: Uuid,
    pub employer_name: String,
    pub my_side: MatchSide,
    pub counterpart_id: Uuid,
    pub counterpart_name: String,
    pub applied_at: DateTime<Utc>,
    pub matched_at: Option<DateTime<Utc>>,
    pub unread_count: i64,
}

impl Match {
    fn from_row(row: MatchRow, viewer: Uuid) -> Self {
        let candidate_name = display_name(
            &row.candidate_first_name,
            &row.candidate_last_name,
            &row.candidate_username,
        );
        let employer_name = display_name(
            &row.employer_first_name,
            &row.employer_last_name,
            &row.employer_username,
        );
        let (my_side, counterpart_id, counterpart_name) = if row.candidate_id == viewer {
            (MatchSide::Candidate, row.employer_id, employer_name.clone())
        } else {
            (MatchSide::Employer, row.candidate_id, candidate_name.clone())
        };

        Self {
            application_id: row.application_id,
            offer_id: row.offer_id,
            offer_title: row.offer_title,
            candidate_id: row.candidate_id,
            candidate_name,
            employer_id: row.employer_id,
            employer_name,
            my_side,
            counterpart_id,
            counterpart_name,
            applied_at: row.created_at,
            matched_at: row.decided_at,
            unread_count: row.unread_count,
        }
    }
}

#[derive(Clone)]
pub struct MatchService {
    pool: SqlitePool,
}

impl MatchService {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Accepted applications where the identity is the candidate or the
    /// employer owning the offer, most recent application first.
    pub async fn matches_for(&self, identity: &Identity) -> Result<Vec<Match>> {
        let rows = sqlx::query_as::<_, MatchRow>(
            r#"
            SELECT a.id AS application_id, a.offer_id, o.title AS offer_title,
                   a.candidate_id, cu.username AS candidate_username,
                   cu.first_name AS candidate_first_name, cu.last_name AS candidate_last_name,
                   p.user_id AS employer_id, eu.username AS employer_username,
                   eu.first_name AS employer_first_name, eu.last_name AS employer_last_name,
                   a.created_at, a.decided_at,
                   (SELECT COUNT(*) FROM messages m
                     WHERE m.application_id = a.id AND m.recipient_id = ? AND m.is_read = 0
                   ) AS unread_count
            FROM applications a
            JOIN offers o ON o.id = a.offer_id
            JOIN profiles p ON p.id = o.employer_profile_id
            JOIN users cu ON cu.id = a.candidate_id
            JOIN users eu ON eu.id = p.user_id
            WHERE a.status = ?
              AND (a.candidate_id = ? OR p.user_id = ?)
            ORDER BY a.created_at DESC, a.id DESC
            "#,
        )
        .bind(identity.user_id)
        .bind(ApplicationStatus::Accepted)
        .bind(identity.user_id)
        .bind(identity.user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|row| Match::from_row(row, identity.user_id))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dto::offer_dto::CreateOfferPayload;
    use crate::models::application::Decision;
    use crate::models::profile::ProfileRole;
    use crate::services::test_support::{insert_user, TestApp};

    #[tokio::test]
    async fn only_accepted_applications_touching_identity() {
        let app = TestApp::new().await;
        let state = &app.state;
        let acme = insert_user(&app.pool, "acme", ProfileRole::Employer).await;
        let globex = insert_user(&app.pool, "globex", ProfileRole::Employer).await;
        let ana = insert_user(&app.pool, "ana", ProfileRole::Candidate).await;
        let beto = insert_user(&app.pool, "beto", ProfileRole::Candidate).await;

        let mut offers = Vec::new();
        for (owner, title) in [(&acme, "Backend"), (&acme, "Frontend"), (&globex, "Data")] {
            let offer = state
                .offer_service
                .create(
                    owner,
                    CreateOfferPayload {
                        title: title.into(),
                        description: None,
                        category_id: None,
                        is_inclusion: false,
                        salary: None,
                        currency: None,
                    },
                )
                .await
                .unwrap();
            offers.push((owner, offer));
        }

        // ana: accepted at Backend, rejected at Frontend, accepted at Data.
        // beto: pending at Backend.
        let plan = [
            (&ana, 0usize, Some(Decision::Accept)),
            (&ana, 1, Some(Decision::Reject)),
            (&beto, 0, None),
            (&ana, 2, Some(Decision::Accept)),
        ];
        for (candidate, idx, decision) in plan {
            let (owner, offer) = &offers[idx];
            let application = state
                .application_service
                .submit(candidate, offer.id)
                .await
                .unwrap();
            if let Some(decision) = decision {
                state
                    .application_service
                    .decide(owner, application.id, decision)
                    .await
                    .unwrap();
            }
        }

        let ana_matches = state.match_service.matches_for(&ana).await.unwrap();
        let titles: Vec<&str> = ana_matches.iter().map(|m| m.offer_title.as_str()).collect();
        assert_eq!(titles, vec!["Data", "Backend"]);
        assert!(ana_matches.iter().all(|m| m.my_side == MatchSide::Candidate));
        assert_eq!(ana_matches[0].counterpart_id, globex.user_id);
        assert_eq!(ana_matches[0].counterpart_name, "GLOBEX Test");

        let acme_matches = state.match_service.matches_for(&acme).await.unwrap();
        assert_eq!(acme_matches.len(), 1);
        assert_eq!(acme_matches[0].candidate_id, ana.user_id);
        assert_eq!(acme_matches[0].my_side, MatchSide::Employer);

        assert!(state.match_service.matches_for(&beto).await.unwrap().is_empty());
    }
}
