use axum::{extract::State, response::IntoResponse, Json};

use crate::{
    error::Result,
    middleware::auth::Identity,
    AppState,
};

#[utoipa::path(
    get,
    path = "/api/feed",
    responses(
        (status = 200, description = "Offers the candidate can still apply to", body = crate::dto::offer_dto::FeedResponse),
        (status = 403, description = "Not a candidate")
    )
)]
#[axum::debug_handler]
pub async fn feed(State(state): State<AppState>, identity: Identity) -> Result<impl IntoResponse> {
    Ok(Json(state.feed_service.feed(&identity).await?))
}

#[utoipa::path(
    get,
    path = "/api/home",
    responses(
        (status = 200, description = "Landing view for the caller", body = crate::dto::home_dto::HomeView)
    )
)]
#[axum::debug_handler]
pub async fn home(State(state): State<AppState>, identity: Identity) -> Result<impl IntoResponse> {
    Ok(Json(state.feed_service.home(&identity).await?))
}
