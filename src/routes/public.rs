use axum::{
    extract::{Path, Query, State},
    response::IntoResponse,
    Json,
};

use crate::{
    dto::offer_dto::{PublicOfferListResponse, PublicOfferQuery, PublicOfferSummary},
    error::Result,
    AppState,
};

#[utoipa::path(
    get,
    path = "/api/public/offers",
    params(
        ("limit" = Option<i64>, Query, description = "Maximum offers returned (1-100, default 20)"),
        ("category" = Option<i64>, Query, description = "Only offers in this category"),
        ("q" = Option<String>, Query, description = "Text searched in title and description"),
        ("inclusion" = Option<bool>, Query, description = "Only inclusion offers")
    ),
    responses(
        (status = 200, description = "Active offers, newest first", body = PublicOfferListResponse)
    )
)]
#[axum::debug_handler]
pub async fn list_public_offers(
    State(state): State<AppState>,
    Query(query): Query<PublicOfferQuery>,
) -> Result<impl IntoResponse> {
    let offers = state.offer_service.list_public(&query).await?;
    Ok(Json(PublicOfferListResponse::from(offers)))
}

#[utoipa::path(
    get,
    path = "/api/public/offers/{id}",
    params(("id" = i64, Path, description = "Offer id")),
    responses(
        (status = 200, description = "Active offer", body = PublicOfferSummary),
        (status = 404, description = "No active offer with that id")
    )
)]
#[axum::debug_handler]
pub async fn get_public_offer(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse> {
    let offer = state.offer_service.get_public(id).await?;
    Ok(Json(PublicOfferSummary::from(offer)))
}
