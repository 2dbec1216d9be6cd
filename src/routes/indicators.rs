use axum::{extract::State, response::IntoResponse, Json};

use crate::AppState;

/// Always 200; the body is `null` when the source could not be reached.
#[utoipa::path(
    get,
    path = "/api/indicators",
    responses(
        (status = 200, description = "Dollar, euro and UF values in CLP, or null")
    )
)]
#[axum::debug_handler]
pub async fn indicators(State(state): State<AppState>) -> impl IntoResponse {
    Json(state.indicator_service.latest().await)
}
