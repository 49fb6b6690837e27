use axum::{
    Json,
    extract::{Path, Query, State},
    response::{IntoResponse, Response},
};
use storage::{
    dto::funding::{InvestorOpportunitiesResponse, InvestorQuery},
    models::{FundingStage, Investor},
};

use crate::{error::WebError, state::AppState};

use super::services;

#[utoipa::path(
    get,
    path = "/api/investors",
    params(InvestorQuery),
    responses(
        (status = 200, description = "Investors", body = Vec<Investor>),
        (status = 400, description = "Invalid stage")
    ),
    tag = "investors"
)]
pub async fn list_investors(
    State(state): State<AppState>,
    Query(query): Query<InvestorQuery>,
) -> Result<Response, WebError> {
    let stage = query
        .stage
        .map(FundingStage::try_from)
        .transpose()
        .map_err(WebError::BadRequest)?;

    let investors =
        services::list_investors(state.store.as_ref(), stage, query.investor_type.as_deref())
            .await;

    Ok(Json(investors).into_response())
}

#[utoipa::path(
    get,
    path = "/api/investors/{id}",
    params(
        ("id" = String, Path, description = "Investor id")
    ),
    responses(
        (status = 200, description = "Investor found", body = Investor),
        (status = 404, description = "Investor not found")
    ),
    tag = "investors"
)]
pub async fn get_investor(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Response, WebError> {
    let investor = services::get_investor(state.store.as_ref(), &id).await?;

    Ok(Json(investor).into_response())
}

#[utoipa::path(
    get,
    path = "/api/investors/{id}/opportunities",
    params(
        ("id" = String, Path, description = "Investor id")
    ),
    responses(
        (status = 200, description = "Opportunities ordered by match strength", body = InvestorOpportunitiesResponse),
        (status = 404, description = "Investor not found")
    ),
    tag = "investors"
)]
pub async fn investor_opportunities(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Response, WebError> {
    let opportunities = services::opportunities_for(state.store.as_ref(), &id).await?;

    Ok(Json(InvestorOpportunitiesResponse {
        investor_id: id,
        opportunities,
    })
    .into_response())
}
