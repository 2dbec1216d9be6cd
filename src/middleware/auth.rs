use axum::{
    async_trait,
    extract::{FromRequestParts, Request, State},
    http::request::Parts,
    middleware::Next,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{error::Error, utils::token::decode_token, AppState};

/// Who is acting. Decoded from the bearer token and handed explicitly to
/// every service call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub user_id: Uuid,
    pub is_staff: bool,
}

impl Identity {
    pub fn new(user_id: Uuid, is_staff: bool) -> Self {
        Self { user_id, is_staff }
    }
}

fn reject(reason: &str) -> Response {
    Error::Unauthenticated(reason.to_string()).into_response()
}

pub async fn require_bearer_auth(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Response {
    let Some(auth_header) = req.headers().get(axum::http::header::AUTHORIZATION) else {
        return reject("missing authorization header");
    };
    let Ok(auth_str) = auth_header.to_str() else {
        return reject("malformed authorization header");
    };
    let Some(token) = auth_str.strip_prefix("Bearer ") else {
        return reject("expected a Bearer token");
    };

    match decode_token(token.trim(), &state.jwt_secret) {
        Ok(claims) => {
            req.extensions_mut()
                .insert(Identity::new(claims.sub, claims.staff));
            next.run(req).await
        }
        Err(e) => {
            tracing::debug!(error = %e, "rejected bearer token");
            reject("invalid or expired token")
        }
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for Identity
where
    S: Send + Sync,
{
    type Rejection = Error;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<Identity>()
            .copied()
            .ok_or_else(|| Error::Unauthenticated("Authentication required".into()))
    }
}
