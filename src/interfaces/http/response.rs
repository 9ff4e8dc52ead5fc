//! JSON envelopes shared by every handler.

use crate::domain::deal::Deal;
use crate::error::DealError;
use axum::Json;
use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use tracing::error;

#[derive(Serialize)]
pub struct DealResponse {
    pub success: bool,
    pub deal: Deal,
}

impl From<Deal> for DealResponse {
    fn from(deal: Deal) -> Self {
        Self {
            success: true,
            deal,
        }
    }
}

#[derive(Serialize)]
pub struct DealsResponse {
    pub success: bool,
    pub count: usize,
    pub deals: Vec<Deal>,
}

impl From<Vec<Deal>> for DealsResponse {
    fn from(deals: Vec<Deal>) -> Self {
        Self {
            success: true,
            count: deals.len(),
            deals,
        }
    }
}

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
}

#[derive(Serialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub error: String,
}

/// A `DealError` on its way out as an HTTP response.
#[derive(Debug)]
pub struct ApiError(pub DealError);

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match &self.0 {
            DealError::ValidationError(_) => StatusCode::BAD_REQUEST,
            DealError::Unauthenticated(_) => StatusCode::UNAUTHORIZED,
            DealError::Forbidden(_) => StatusCode::FORBIDDEN,
            DealError::NotFound(_) => StatusCode::NOT_FOUND,
            DealError::InvalidTransition { .. } | DealError::ConcurrentModification(_) => {
                StatusCode::CONFLICT
            }
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<DealError> for ApiError {
    fn from(err: DealError) -> Self {
        Self(err)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self(DealError::ValidationError(rejection.body_text()))
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        Self(DealError::ValidationError(rejection.body_text()))
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        Self(DealError::ValidationError(rejection.body_text()))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!(error = %self.0, "request failed");
        }
        (
            status,
            Json(ErrorResponse {
                success: false,
                error: self.0.to_string(),
            }),
        )
            .into_response()
    }
}
