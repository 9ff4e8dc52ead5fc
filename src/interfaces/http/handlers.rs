//! Axum REST API handlers.

use super::response::{ApiError, DealResponse, DealsResponse, HealthResponse};
use crate::application::engine::{Actor, ContentReview, DealEngine};
use crate::domain::deal::{DealRequest, DealStatus};
use crate::domain::pricing::{ContentType, OfferAmount};
use axum::Json;
use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use rust_decimal::Decimal;
use serde::Deserialize;
use std::sync::Arc;
use uuid::Uuid;

pub type AppState = Arc<DealEngine>;

type ApiResult<T> = Result<T, ApiError>;

#[derive(Debug, Deserialize)]
pub struct ListParams {
    pub status: Option<DealStatus>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CounterOfferBody {
    pub counter_offer: Decimal,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitContentBody {
    pub content_type: ContentType,
    #[serde(default)]
    pub content_url: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct RejectContentBody {
    #[serde(default)]
    pub comment: String,
}

/// `GET /health`
pub async fn health() -> impl IntoResponse {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// `POST /deals`
///
/// Creates a deal from a brand's connect request.
pub async fn create_deal(
    State(engine): State<AppState>,
    actor: Actor,
    body: Result<Json<DealRequest>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<DealResponse>)> {
    let Json(request) = body?;
    let deal = engine.create_deal(&actor, request).await?;
    Ok((StatusCode::CREATED, Json(deal.into())))
}

/// `GET /deals?status=`
///
/// Brands see the deals they created, influencers the deals naming them.
pub async fn list_deals(
    State(engine): State<AppState>,
    actor: Actor,
    params: Result<Query<ListParams>, QueryRejection>,
) -> ApiResult<Json<DealsResponse>> {
    let Query(params) = params?;
    let deals = engine.list_deals(&actor, params.status).await?;
    Ok(Json(deals.into()))
}

/// `GET /deals/:id`
pub async fn get_deal(
    State(engine): State<AppState>,
    actor: Actor,
    id: Result<Path<Uuid>, PathRejection>,
) -> ApiResult<Json<DealResponse>> {
    let Path(id) = id?;
    Ok(Json(engine.get_deal(&actor, id).await?.into()))
}

/// `POST /deals/:id/accept`
pub async fn accept(
    State(engine): State<AppState>,
    actor: Actor,
    id: Result<Path<Uuid>, PathRejection>,
) -> ApiResult<Json<DealResponse>> {
    let Path(id) = id?;
    Ok(Json(engine.accept(&actor, id).await?.into()))
}

/// `POST /deals/:id/reject`
pub async fn reject(
    State(engine): State<AppState>,
    actor: Actor,
    id: Result<Path<Uuid>, PathRejection>,
) -> ApiResult<Json<DealResponse>> {
    let Path(id) = id?;
    Ok(Json(engine.reject(&actor, id).await?.into()))
}

/// `POST /deals/:id/counter-offer`
pub async fn counter_offer(
    State(engine): State<AppState>,
    actor: Actor,
    id: Result<Path<Uuid>, PathRejection>,
    body: Result<Json<CounterOfferBody>, JsonRejection>,
) -> ApiResult<Json<DealResponse>> {
    let Path(id) = id?;
    let Json(body) = body?;
    let amount = OfferAmount::new(body.counter_offer)?;
    Ok(Json(engine.counter_offer(&actor, id, amount).await?.into()))
}

/// `POST /deals/:id/cancel`
pub async fn cancel(
    State(engine): State<AppState>,
    actor: Actor,
    id: Result<Path<Uuid>, PathRejection>,
) -> ApiResult<Json<DealResponse>> {
    let Path(id) = id?;
    Ok(Json(engine.cancel(&actor, id).await?.into()))
}

/// `POST /deals/:id/pay`
pub async fn pay(
    State(engine): State<AppState>,
    actor: Actor,
    id: Result<Path<Uuid>, PathRejection>,
) -> ApiResult<Json<DealResponse>> {
    let Path(id) = id?;
    Ok(Json(engine.pay(&actor, id).await?.into()))
}

/// `POST /deals/:id/submit`
pub async fn submit_content(
    State(engine): State<AppState>,
    actor: Actor,
    id: Result<Path<Uuid>, PathRejection>,
    body: Result<Json<SubmitContentBody>, JsonRejection>,
) -> ApiResult<Json<DealResponse>> {
    let Path(id) = id?;
    let Json(body) = body?;
    let deal = engine
        .submit_content(&actor, id, body.content_type, body.content_url)
        .await?;
    Ok(Json(deal.into()))
}

/// `POST /deals/:id/content/:content_id/approve`
pub async fn approve_content(
    State(engine): State<AppState>,
    actor: Actor,
    ids: Result<Path<(Uuid, Uuid)>, PathRejection>,
) -> ApiResult<Json<DealResponse>> {
    let Path((id, content_id)) = ids?;
    let deal = engine
        .review_content(&actor, id, content_id, ContentReview::Approve)
        .await?;
    Ok(Json(deal.into()))
}

/// `POST /deals/:id/content/:content_id/reject`
pub async fn reject_content(
    State(engine): State<AppState>,
    actor: Actor,
    ids: Result<Path<(Uuid, Uuid)>, PathRejection>,
    body: Result<Json<RejectContentBody>, JsonRejection>,
) -> ApiResult<Json<DealResponse>> {
    let Path((id, content_id)) = ids?;
    let Json(body) = body?;
    let review = ContentReview::Reject {
        comment: body.comment,
    };
    let deal = engine.review_content(&actor, id, content_id, review).await?;
    Ok(Json(deal.into()))
}

/// `POST /deals/:id/release-payment`
pub async fn release_payment(
    State(engine): State<AppState>,
    actor: Actor,
    id: Result<Path<Uuid>, PathRejection>,
) -> ApiResult<Json<DealResponse>> {
    let Path(id) = id?;
    Ok(Json(engine.release_payment(&actor, id).await?.into()))
}
