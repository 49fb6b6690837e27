use axum::{
    Json,
    extract::{Path, Query, State},
    response::{IntoResponse, Response},
};
use storage::{
    dto::{
        common::PaginatedResponse,
        funding::{FundingListQuery, OpportunityInvestorsResponse},
    },
    models::FundingOpportunity,
    services::classification::CategoryCount,
};

use crate::{error::WebError, state::AppState};

use super::services;

#[utoipa::path(
    get,
    path = "/api/funding",
    params(FundingListQuery),
    responses(
        (status = 200, description = "Funding opportunities", body = PaginatedResponse<FundingOpportunity>),
        (status = 400, description = "Invalid query parameters")
    ),
    tag = "funding"
)]
pub async fn list_opportunities(
    State(state): State<AppState>,
    Query(query): Query<FundingListQuery>,
) -> Result<Response, WebError> {
    let pagination = query.pagination();
    pagination.validate().map_err(WebError::BadRequest)?;

    let opportunities =
        services::list_opportunities(state.store.as_ref(), query.category, query.secondary).await;

    Ok(Json(pagination.paginate(opportunities)).into_response())
}

#[utoipa::path(
    get,
    path = "/api/funding/categories",
    responses(
        (status = 200, description = "Number of opportunities per category", body = Vec<CategoryCount>)
    ),
    tag = "funding"
)]
pub async fn category_counts(State(state): State<AppState>) -> Result<Response, WebError> {
    let counts = services::category_counts(state.store.as_ref()).await;

    Ok(Json(counts).into_response())
}

#[utoipa::path(
    get,
    path = "/api/funding/early-stage",
    responses(
        (status = 200, description = "Early-stage opportunities", body = Vec<FundingOpportunity>)
    ),
    tag = "funding"
)]
pub async fn early_stage(State(state): State<AppState>) -> Result<Response, WebError> {
    let opportunities = services::early_stage(state.store.as_ref()).await;

    Ok(Json(opportunities).into_response())
}

#[utoipa::path(
    get,
    path = "/api/funding/impact",
    responses(
        (status = 200, description = "Impact-focused opportunities", body = Vec<FundingOpportunity>)
    ),
    tag = "funding"
)]
pub async fn impact_focused(State(state): State<AppState>) -> Result<Response, WebError> {
    let opportunities = services::impact_focused(state.store.as_ref()).await;

    Ok(Json(opportunities).into_response())
}

#[utoipa::path(
    get,
    path = "/api/funding/{id}",
    params(
        ("id" = String, Path, description = "Opportunity id")
    ),
    responses(
        (status = 200, description = "Opportunity found", body = FundingOpportunity),
        (status = 404, description = "Opportunity not found")
    ),
    tag = "funding"
)]
pub async fn get_opportunity(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Response, WebError> {
    let opportunity = services::get_opportunity(state.store.as_ref(), &id).await?;

    Ok(Json(opportunity).into_response())
}

#[utoipa::path(
    get,
    path = "/api/funding/{id}/investors",
    params(
        ("id" = String, Path, description = "Opportunity id")
    ),
    responses(
        (status = 200, description = "Investors ordered by match strength", body = OpportunityInvestorsResponse),
        (status = 404, description = "Opportunity not found")
    ),
    tag = "funding"
)]
pub async fn opportunity_investors(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Response, WebError> {
    let investors = services::investors_for(state.store.as_ref(), &id).await?;

    Ok(Json(OpportunityInvestorsResponse {
        opportunity_id: id,
        investors,
    })
    .into_response())
}
