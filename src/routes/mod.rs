pub mod applications;
pub mod auth;
pub mod categories;
pub mod chat;
pub mod feed;
pub mod health;
pub mod indicators;
pub mod matches;
pub mod offers;
pub mod profile;
pub mod public;

use axum::{
    middleware::from_fn_with_state,
    routing::{get, patch, post},
    Router,
};
use tower_http::trace::TraceLayer;

use crate::{
    config::Config,
    middleware::{
        auth::require_bearer_auth,
        cors::cors_layer,
        rate_limit::{rps_middleware, RateLimiter},
    },
    AppState,
};

/// Full HTTP surface: open routes under the public rate limit, everything
/// else behind bearer auth and the API rate limit.
pub fn router(state: AppState, config: &Config) -> Router {
    let open_api: Router<AppState> = Router::new()
        .route("/api/auth/register", post(auth::register))
        .route("/api/auth/login", post(auth::login))
        .route("/api/public/offers", get(public::list_public_offers))
        .route("/api/public/offers/:id", get(public::get_public_offer))
        .route("/api/categories", get(categories::list_categories))
        .route("/api/indicators", get(indicators::indicators))
        .route_layer(from_fn_with_state(
            RateLimiter::new(config.public_rps),
            rps_middleware,
        ));

    let protected_api: Router<AppState> = Router::new()
        .route("/api/me", get(auth::me))
        .route("/api/home", get(feed::home))
        .route("/api/feed", get(feed::feed))
        .route("/api/profile", patch(profile::update_profile))
        .route("/api/profile/role", post(profile::choose_role))
        .route(
            "/api/offers",
            get(offers::list_own_offers).post(offers::create_offer),
        )
        .route(
            "/api/offers/:id",
            get(offers::get_offer).delete(offers::delete_offer),
        )
        .route("/api/offers/:id/status", post(offers::set_offer_status))
        .route("/api/offers/:id/apply", post(offers::apply))
        .route("/api/offers/:id/review", get(offers::review_next))
        .route("/api/applications/:id/accept", post(applications::accept))
        .route("/api/applications/:id/reject", post(applications::reject))
        .route("/api/matches", get(matches::list_matches))
        .route(
            "/api/chat/:application_id/messages",
            get(chat::list_messages).post(chat::post_message),
        )
        .route("/api/chat/:application_id/read", post(chat::mark_read))
        .route("/api/chat/unread", get(chat::unread_count))
        .route("/api/categories", post(categories::create_category))
        .route_layer(from_fn_with_state(state.clone(), require_bearer_auth))
        .route_layer(from_fn_with_state(
            RateLimiter::new(config.api_rps),
            rps_middleware,
        ));

    Router::new()
        .route("/health", get(health::health))
        .merge(open_api)
        .merge(protected_api)
        .layer(cors_layer(&config.cors_origins))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
