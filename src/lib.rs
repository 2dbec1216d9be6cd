pub mod config;
pub mod database;
pub mod dto;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod utils;

use std::time::Duration;

use sqlx::SqlitePool;

use crate::config::Config;
use crate::services::{
    application_service::ApplicationService, auth_service::AuthService,
    category_service::CategoryService, chat_service::ChatService, feed_service::FeedService,
    indicator_service::IndicatorService, match_service::MatchService,
    offer_service::OfferService, profile_service::ProfileService,
};
use crate::utils::time::{system_clock, SharedClock};

#[derive(Clone)]
pub struct AppState {
    pub pool: SqlitePool,
    pub jwt_secret: String,
    pub auth_service: AuthService,
    pub profile_service: ProfileService,
    pub category_service: CategoryService,
    pub offer_service: OfferService,
    pub application_service: ApplicationService,
    pub match_service: MatchService,
    pub chat_service: ChatService,
    pub feed_service: FeedService,
    pub indicator_service: IndicatorService,
}

impl AppState {
    pub fn new(pool: SqlitePool, config: &Config) -> Self {
        Self::with_clock(pool, config, system_clock())
    }

    pub fn with_clock(pool: SqlitePool, config: &Config, clock: SharedClock) -> Self {
        let auth_service = AuthService::new(
            pool.clone(),
            clock.clone(),
            config.jwt_secret.clone(),
            config.jwt_ttl_hours,
        );
        let profile_service = ProfileService::new(pool.clone(), clock.clone());
        let category_service = CategoryService::new(pool.clone());
        let offer_service = OfferService::new(
            pool.clone(),
            clock.clone(),
            profile_service.clone(),
            category_service.clone(),
        );
        let application_service = ApplicationService::new(
            pool.clone(),
            clock.clone(),
            profile_service.clone(),
            offer_service.clone(),
        );
        let match_service = MatchService::new(pool.clone());
        let chat_service = ChatService::new(pool.clone(), clock, application_service.clone());
        let indicator_service = IndicatorService::new(
            config.indicators_url.clone(),
            Duration::from_secs(config.indicators_timeout_secs),
        );
        let feed_service = FeedService::new(
            profile_service.clone(),
            offer_service.clone(),
            indicator_service.clone(),
        );

        Self {
            pool,
            jwt_secret: config.jwt_secret.clone(),
            auth_service,
            profile_service,
            category_service,
            offer_service,
            application_service,
            match_service,
            chat_service,
            feed_service,
            indicator_service,
        }
    }
}
