//! Caller identity.
//!
//! Authentication happens upstream; the gateway forwards the signed-in user
//! as `x-user-id` and their marketplace role as `x-user-role`.

use super::response::ApiError;
use crate::application::engine::Actor;
use crate::domain::lifecycle::Party;
use crate::error::DealError;
use async_trait::async_trait;
use axum::extract::FromRequestParts;
use axum::http::request::Parts;

pub const USER_ID_HEADER: &str = "x-user-id";
pub const USER_ROLE_HEADER: &str = "x-user-role";

fn header<'a>(parts: &'a Parts, name: &str) -> Result<&'a str, ApiError> {
    let value = parts
        .headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .ok_or_else(|| DealError::Unauthenticated(format!("missing {name} header")))?;
    Ok(value)
}

#[async_trait]
impl<S> FromRequestParts<S> for Actor
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let user_id = header(parts, USER_ID_HEADER)?;
        let party = match header(parts, USER_ROLE_HEADER)? {
            "brand" => Party::Brand,
            "influencer" => Party::Influencer,
            other => {
                return Err(DealError::Unauthenticated(format!("unknown role {other:?}")).into());
            }
        };
        Ok(Actor {
            user_id: user_id.to_string(),
            party,
        })
    }
}
