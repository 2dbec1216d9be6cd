use axum::{extract::State, response::IntoResponse, Json};
use validator::Validate;

use crate::{
    dto::profile_dto::{ChooseRolePayload, ProfileResponse, UpdateProfilePayload},
    error::Result,
    middleware::auth::Identity,
    AppState,
};

#[utoipa::path(
    post,
    path = "/api/profile/role",
    request_body = ChooseRolePayload,
    responses(
        (status = 200, description = "Role recorded", body = ProfileResponse),
        (status = 400, description = "Role must be candidate or employer"),
        (status = 409, description = "Role already chosen")
    )
)]
#[axum::debug_handler]
pub async fn choose_role(
    State(state): State<AppState>,
    identity: Identity,
    Json(payload): Json<ChooseRolePayload>,
) -> Result<impl IntoResponse> {
    let profile = state.profile_service.choose_role(&identity, payload.role).await?;
    Ok(Json(ProfileResponse::from(profile)))
}

#[utoipa::path(
    patch,
    path = "/api/profile",
    request_body = UpdateProfilePayload,
    responses(
        (status = 200, description = "Profile updated", body = ProfileResponse),
        (status = 404, description = "No profile for this account")
    )
)]
#[axum::debug_handler]
pub async fn update_profile(
    State(state): State<AppState>,
    identity: Identity,
    Json(payload): Json<UpdateProfilePayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let profile = state.profile_service.update(&identity, payload).await?;
    Ok(Json(ProfileResponse::from(profile)))
}
