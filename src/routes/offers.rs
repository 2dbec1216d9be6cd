use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use validator::Validate;

use crate::{
    dto::{
        application_dto::{ApplicationResponse, ReviewCandidate, ReviewResponse},
        offer_dto::{CreateOfferPayload, OfferResponse, UpdateOfferStatusPayload},
    },
    error::Result,
    middleware::auth::Identity,
    AppState,
};

#[utoipa::path(
    get,
    path = "/api/offers",
    responses(
        (status = 200, description = "Offers published by the employer", body = Vec<OfferResponse>),
        (status = 403, description = "Not an employer")
    )
)]
#[axum::debug_handler]
pub async fn list_own_offers(
    State(state): State<AppState>,
    identity: Identity,
) -> Result<impl IntoResponse> {
    let offers = state.offer_service.list_own(&identity).await?;
    Ok(Json(
        offers.into_iter().map(OfferResponse::from).collect::<Vec<_>>(),
    ))
}

#[utoipa::path(
    post,
    path = "/api/offers",
    request_body = CreateOfferPayload,
    responses(
        (status = 201, description = "Offer published", body = OfferResponse),
        (status = 400, description = "Invalid payload"),
        (status = 403, description = "Not an employer")
    )
)]
#[axum::debug_handler]
pub async fn create_offer(
    State(state): State<AppState>,
    identity: Identity,
    Json(payload): Json<CreateOfferPayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let offer = state.offer_service.create(&identity, payload).await?;
    Ok((StatusCode::CREATED, Json(OfferResponse::from(offer))))
}

#[utoipa::path(
    get,
    path = "/api/offers/{id}",
    params(
        ("id" = i64, Path, description = "Offer ID")
    ),
    responses(
        (status = 200, description = "Offer found", body = OfferResponse),
        (status = 404, description = "Offer not found")
    )
)]
#[axum::debug_handler]
pub async fn get_offer(
    State(state): State<AppState>,
    _identity: Identity,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse> {
    let offer = state.offer_service.get_by_id(id).await?;
    let indicators = state.indicator_service.latest().await;
    Ok(Json(OfferResponse::from_offer(offer, indicators.as_ref())))
}

#[utoipa::path(
    delete,
    path = "/api/offers/{id}",
    params(
        ("id" = i64, Path, description = "Offer ID")
    ),
    responses(
        (status = 204, description = "Offer deleted with its applications"),
        (status = 403, description = "Not the owner"),
        (status = 404, description = "Offer not found")
    )
)]
#[axum::debug_handler]
pub async fn delete_offer(
    State(state): State<AppState>,
    identity: Identity,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse> {
    state.offer_service.delete(&identity, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    post,
    path = "/api/offers/{id}/status",
    params(
        ("id" = i64, Path, description = "Offer ID")
    ),
    request_body = UpdateOfferStatusPayload,
    responses(
        (status = 200, description = "Status changed", body = OfferResponse),
        (status = 403, description = "Not the owner")
    )
)]
#[axum::debug_handler]
pub async fn set_offer_status(
    State(state): State<AppState>,
    identity: Identity,
    Path(id): Path<i64>,
    Json(payload): Json<UpdateOfferStatusPayload>,
) -> Result<impl IntoResponse> {
    let offer = state
        .offer_service
        .set_status(&identity, id, payload.status)
        .await?;
    Ok(Json(OfferResponse::from(offer)))
}

#[utoipa::path(
    post,
    path = "/api/offers/{id}/apply",
    params(
        ("id" = i64, Path, description = "Offer ID")
    ),
    responses(
        (status = 201, description = "Application submitted", body = ApplicationResponse),
        (status = 403, description = "Not a candidate"),
        (status = 409, description = "Already applied or offer not active")
    )
)]
#[axum::debug_handler]
pub async fn apply(
    State(state): State<AppState>,
    identity: Identity,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse> {
    let application = state.application_service.submit(&identity, id).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApplicationResponse::from(application)),
    ))
}

#[utoipa::path(
    get,
    path = "/api/offers/{id}/review",
    params(
        ("id" = i64, Path, description = "Offer ID")
    ),
    responses(
        (status = 200, description = "Next pending application, if any", body = ReviewResponse),
        (status = 403, description = "Not the owner")
    )
)]
#[axum::debug_handler]
pub async fn review_next(
    State(state): State<AppState>,
    identity: Identity,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse> {
    let next = state.application_service.next_pending(&identity, id).await?;
    let pending = state.application_service.pending_count(id).await?;

    let candidate = match &next {
        Some(application) => state
            .profile_service
            .candidate_card(application.candidate_id)
            .await?
            .map(ReviewCandidate::from),
        None => None,
    };

    Ok(Json(ReviewResponse {
        offer_id: id,
        pending,
        application: next.map(ApplicationResponse::from),
        candidate,
    }))
}
