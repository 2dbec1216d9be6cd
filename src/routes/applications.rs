use axum::{
    extract::{Path, State},
    response::IntoResponse,
    Json,
};

use crate::{
    dto::application_dto::ApplicationResponse,
    error::Result,
    middleware::auth::Identity,
    models::application::Decision,
    AppState,
};

async fn decide(state: &AppState, identity: &Identity, id: i64, decision: Decision) -> Result<Json<ApplicationResponse>> {
    let application = state.application_service.decide(identity, id, decision).await?;
    Ok(Json(ApplicationResponse::from(application)))
}

#[utoipa::path(
    post,
    path = "/api/applications/{id}/accept",
    params(
        ("id" = i64, Path, description = "Application ID")
    ),
    responses(
        (status = 200, description = "Application accepted; a match now exists", body = ApplicationResponse),
        (status = 403, description = "Not the offer owner"),
        (status = 409, description = "Application already decided")
    )
)]
#[axum::debug_handler]
pub async fn accept(
    State(state): State<AppState>,
    identity: Identity,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse> {
    decide(&state, &identity, id, Decision::Accept).await
}

#[utoipa::path(
    post,
    path = "/api/applications/{id}/reject",
    params(
        ("id" = i64, Path, description = "Application ID")
    ),
    responses(
        (status = 200, description = "Application rejected", body = ApplicationResponse),
        (status = 403, description = "Not the offer owner"),
        (status = 409, description = "Application already decided")
    )
)]
#[axum::debug_handler]
pub async fn reject(
    State(state): State<AppState>,
    identity: Identity,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse> {
    decide(&state, &identity, id, Decision::Reject).await
}
