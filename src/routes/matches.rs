use axum::{extract::State, response::IntoResponse, Json};

use crate::{error::Result, middleware::auth::Identity, AppState};

#[utoipa::path(
    get,
    path = "/api/matches",
    responses(
        (status = 200, description = "Accepted applications involving the caller")
    )
)]
#[axum::debug_handler]
pub async fn list_matches(
    State(state): State<AppState>,
    identity: Identity,
) -> Result<impl IntoResponse> {
    let matches = state.match_service.matches_for(&identity).await?;
    Ok(Json(matches))
}
