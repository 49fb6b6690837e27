use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::models::{FundingOpportunity, SavedOpportunity};

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct SaveOpportunityRequest {
    #[validate(length(min = 1, max = 255, message = "Opportunity id is required"))]
    pub opportunity_id: String,

    #[validate(length(max = 5000))]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdateNotesRequest {
    #[validate(length(max = 5000))]
    pub notes: Option<String>,
}

/// A saved entry together with the opportunity it points to
#[derive(Debug, Serialize, ToSchema)]
pub struct SavedOpportunityResponse {
    #[serde(flatten)]
    pub saved: SavedOpportunity,
    pub opportunity: Option<FundingOpportunity>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct IsSavedResponse {
    pub saved: bool,
    pub id: Option<Uuid>,
}
