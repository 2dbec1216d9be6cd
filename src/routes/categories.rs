use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde::Deserialize;
use validator::Validate;

use crate::{error::Result, middleware::auth::Identity, AppState};

#[derive(Debug, Deserialize, Validate)]
pub struct CreateCategoryPayload {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
}

#[utoipa::path(
    get,
    path = "/api/categories",
    responses(
        (status = 200, description = "All categories by name")
    )
)]
#[axum::debug_handler]
pub async fn list_categories(State(state): State<AppState>) -> Result<impl IntoResponse> {
    Ok(Json(state.category_service.list().await?))
}

#[utoipa::path(
    post,
    path = "/api/categories",
    request_body = CreateCategoryPayload,
    responses(
        (status = 201, description = "Category created"),
        (status = 403, description = "Staff only"),
        (status = 409, description = "Name already exists")
    )
)]
#[axum::debug_handler]
pub async fn create_category(
    State(state): State<AppState>,
    identity: Identity,
    Json(payload): Json<CreateCategoryPayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let category = state.category_service.create(&identity, &payload.name).await?;
    Ok((StatusCode::CREATED, Json(category)))
}
