use crate::dto::home_dto::HomeView;
use crate::dto::offer_dto::{FeedResponse, OfferResponse};
use crate::error::Result;
use crate::middleware::auth::Identity;
use crate::models::offer::Offer;
use crate::models::profile::ProfileRole;
use crate::services::indicator_service::IndicatorService;
use crate::services::offer_query::{OfferFilter, OfferOrdering};
use crate::services::offer_service::OfferService;
use crate::services::profile_service::ProfileService;

#[derive(Clone)]
pub struct FeedService {
    profiles: ProfileService,
    offers: OfferService,
    indicators: IndicatorService,
}

impl FeedService {
    pub fn new(profiles: ProfileService, offers: OfferService, indicators: IndicatorService) -> Self {
        Self {
            profiles,
            offers,
            indicators,
        }
    }

    /// Active offers the candidate has not applied to yet. Candidates who
    /// flagged themselves for inclusion see inclusion offers first.
    pub async fn feed_for(&self, identity: &Identity) -> Result<Vec<Offer>> {
        let profile = self
            .profiles
            .require_role(identity, ProfileRole::Candidate, "browse the feed")
            .await?;

        let ordering = if profile.is_inclusion {
            OfferOrdering::InclusionFirst
        } else {
            OfferOrdering::Newest
        };
        let filter = OfferFilter::active()
            .excluding_applied_by(identity.user_id)
            .ordered(ordering);
        self.offers.query(&filter).await
    }

    pub async fn feed(&self, identity: &Identity) -> Result<FeedResponse> {
        let offers = self.feed_for(identity).await?;
        let indicators = self.indicators.latest().await;
        Ok(FeedResponse::new(offers, indicators))
    }

    pub async fn home(&self, identity: &Identity) -> Result<HomeView> {
        if identity.is_staff {
            return Ok(HomeView::Admin {
                message: "Welcome to the administration panel".into(),
            });
        }

        let Some(profile) = self.profiles.lookup_profile(identity.user_id).await? else {
            return Ok(HomeView::MissingProfile {
                message: "Your account has no profile. Please contact support.".into(),
            });
        };

        match profile.role {
            ProfileRole::Pending => Ok(HomeView::ChooseRole {
                message: "Choose whether you are a candidate or an employer to continue".into(),
            }),
            ProfileRole::Candidate => Ok(HomeView::Candidate {
                feed: self.feed(identity).await?,
            }),
            ProfileRole::Employer => {
                let offers = self.offers.list_own(identity).await?;
                Ok(HomeView::Employer {
                    offers: offers
                        .into_iter()
                        .map(|offer| OfferResponse::from_offer(offer, None))
                        .collect(),
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dto::offer_dto::CreateOfferPayload;
    use crate::error::Error;
    use crate::models::offer::OfferStatus;
    use crate::services::test_support::{insert_staff, insert_user, set_inclusion, TestApp};

    async fn publish(app: &TestApp, employer: &Identity, title: &str, is_inclusion: bool) -> Offer {
        app.state
            .offer_service
            .create(
                employer,
                CreateOfferPayload {
                    title: title.into(),
                    description: None,
                    category_id: None,
                    is_inclusion,
                    salary: None,
                    currency: None,
                },
            )
            .await
            .unwrap()
    }

    fn ids(offers: &[Offer]) -> Vec<i64> {
        offers.iter().map(|o| o.id).collect()
    }

    #[tokio::test]
    async fn inclusion_candidates_see_inclusion_offers_first() {
        let app = TestApp::new().await;
        let employer = insert_user(&app.pool, "acme", ProfileRole::Employer).await;
        let candidate = insert_user(&app.pool, "ana", ProfileRole::Candidate).await;

        let o1 = publish(&app, &employer, "One", true).await;
        let o2 = publish(&app, &employer, "Two", false).await;
        let o3 = publish(&app, &employer, "Three", true).await;
        let feed = &app.state.feed_service;

        let plain = feed.feed_for(&candidate).await.unwrap();
        assert_eq!(ids(&plain), vec![o3.id, o2.id, o1.id]);

        set_inclusion(&app.pool, &candidate, true).await;
        let inclusive = feed.feed_for(&candidate).await.unwrap();
        assert_eq!(ids(&inclusive), vec![o3.id, o1.id, o2.id]);
    }

    #[tokio::test]
    async fn feed_hides_applied_and_inactive_offers() {
        let app = TestApp::new().await;
        let employer = insert_user(&app.pool, "acme", ProfileRole::Employer).await;
        let candidate = insert_user(&app.pool, "ana", ProfileRole::Candidate).await;

        let applied = publish(&app, &employer, "Applied", false).await;
        let paused = publish(&app, &employer, "Paused", false).await;
        let open = publish(&app, &employer, "Open", false).await;

        app.state
            .application_service
            .submit(&candidate, applied.id)
            .await
            .unwrap();
        app.state
            .offer_service
            .set_status(&employer, paused.id, OfferStatus::Paused)
            .await
            .unwrap();

        let offers = app.state.feed_service.feed_for(&candidate).await.unwrap();
        assert_eq!(ids(&offers), vec![open.id]);
    }

    #[tokio::test]
    async fn feed_is_for_candidates_only() {
        let app = TestApp::new().await;
        let employer = insert_user(&app.pool, "acme", ProfileRole::Employer).await;
        let pending = insert_user(&app.pool, "new", ProfileRole::Pending).await;

        for identity in [&employer, &pending] {
            let err = app.state.feed_service.feed_for(identity).await.unwrap_err();
            assert!(matches!(err, Error::Unauthorized(_)));
        }
    }

    #[tokio::test]
    async fn home_depends_on_who_is_asking() {
        let app = TestApp::new().await;
        let feed = &app.state.feed_service;
        let staff = insert_staff(&app.pool, "admin").await;
        let pending = insert_user(&app.pool, "new", ProfileRole::Pending).await;
        let employer = insert_user(&app.pool, "acme", ProfileRole::Employer).await;
        let candidate = insert_user(&app.pool, "ana", ProfileRole::Candidate).await;
        publish(&app, &employer, "Backend", false).await;

        assert!(matches!(feed.home(&staff).await.unwrap(), HomeView::Admin { .. }));
        assert!(matches!(
            feed.home(&Identity::new(uuid::Uuid::new_v4(), false)).await.unwrap(),
            HomeView::MissingProfile { .. }
        ));
        assert!(matches!(feed.home(&pending).await.unwrap(), HomeView::ChooseRole { .. }));

        match feed.home(&employer).await.unwrap() {
            HomeView::Employer { offers } => assert_eq!(offers.len(), 1),
            other => panic!("unexpected home view: {:?}", other),
        }
        match feed.home(&candidate).await.unwrap() {
            HomeView::Candidate { feed } => {
                assert_eq!(feed.offers.len(), 1);
                assert!(feed.indicators.is_none());
            }
            other => panic!("unexpected home view: {:?}", other),
        }
    }
}
