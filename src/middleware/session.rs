use axum::{
    extract::{FromRequestParts, OptionalFromRequestParts},
    http::request::Parts,
};

use crate::error::AppError;

pub const SESSION_HEADER: &str = "x-session-id";
const MAX_SESSION_LEN: usize = 128;

/// Caller-supplied session key that scopes the cart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartSession(pub String);

impl CartSession {
    pub fn id(&self) -> &str {
        &self.0
    }
}

fn read_session(parts: &Parts) -> Result<Option<CartSession>, AppError> {
    let Some(value) = parts.headers.get(SESSION_HEADER) else {
        return Ok(None);
    };
    let value = value
        .to_str()
        .map_err(|_| AppError::BadRequest("Invalid x-session-id header".into()))?
        .trim();
    if value.is_empty() || value.len() > MAX_SESSION_LEN {
        return Err(AppError::BadRequest(format!(
            "x-session-id must be 1 to {MAX_SESSION_LEN} characters"
        )));
    }
    Ok(Some(CartSession(value.to_string())))
}

impl<S> FromRequestParts<S> for CartSession
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        read_session(parts)?
            .ok_or_else(|| AppError::BadRequest("Missing x-session-id header".into()))
    }
}

impl<S> OptionalFromRequestParts<S> for CartSession
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        _state: &S,
    ) -> Result<Option<Self>, Self::Rejection> {
        read_session(parts)
    }
}
