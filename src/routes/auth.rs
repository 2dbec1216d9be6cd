use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use validator::Validate;

use crate::{
    dto::{
        auth_dto::{AuthResponse, LoginPayload, MeResponse, RegisterPayload, RegisterResponse, UserResponse},
        profile_dto::ProfileResponse,
    },
    error::Result,
    middleware::auth::Identity,
    AppState,
};

#[utoipa::path(
    post,
    path = "/api/auth/register",
    request_body = RegisterPayload,
    responses(
        (status = 201, description = "Account created with a pending profile", body = RegisterResponse),
        (status = 400, description = "Invalid payload"),
        (status = 409, description = "Username already taken")
    )
)]
#[axum::debug_handler]
pub async fn register(
    State(state): State<AppState>,
    Json(payload): Json<RegisterPayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let (user, profile) = state.auth_service.register(payload).await?;
    Ok((
        StatusCode::CREATED,
        Json(RegisterResponse {
            user: UserResponse::from(user),
            profile: ProfileResponse::from(profile),
        }),
    ))
}

#[utoipa::path(
    post,
    path = "/api/auth/login",
    request_body = LoginPayload,
    responses(
        (status = 200, description = "Bearer token issued", body = AuthResponse),
        (status = 401, description = "Invalid credentials")
    )
)]
#[axum::debug_handler]
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginPayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let issued = state.auth_service.login(payload).await?;
    Ok(Json(AuthResponse::bearer(issued.token, issued.user)))
}

#[utoipa::path(
    get,
    path = "/api/me",
    responses(
        (status = 200, description = "Current user and profile", body = MeResponse),
        (status = 401, description = "Missing or invalid token")
    )
)]
#[axum::debug_handler]
pub async fn me(State(state): State<AppState>, identity: Identity) -> Result<impl IntoResponse> {
    let user = state.auth_service.get_user(identity.user_id).await?;
    let profile = state.profile_service.lookup_profile(identity.user_id).await?;
    let applied_offer_ids = state.application_service.applied_offer_ids(&identity).await?;
    Ok(Json(MeResponse {
        user: UserResponse::from(user),
        profile: profile.map(ProfileResponse::from),
        applied_offer_ids,
    }))
}
