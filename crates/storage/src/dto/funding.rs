use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use super::common::PaginationParams;
use crate::models::{FundingOpportunity, Investor};
use crate::services::classification::{FundingCategory, SecondaryFilter};

#[derive(Debug, Deserialize, IntoParams)]
pub struct FundingListQuery {
    pub category: Option<FundingCategory>,
    pub secondary: Option<SecondaryFilter>,
    pub page: Option<u32>,
    pub page_size: Option<u32>,
}

impl FundingListQuery {
    pub fn pagination(&self) -> PaginationParams {
        let defaults = PaginationParams::default();
        PaginationParams {
            page: self.page.unwrap_or(defaults.page),
            page_size: self.page_size.unwrap_or(defaults.page_size),
        }
    }
}

/// An opportunity with the investors associated to it
#[derive(Debug, Serialize, ToSchema)]
pub struct OpportunityInvestorsResponse {
    pub opportunity_id: String,
    pub investors: Vec<Investor>,
}

/// An investor with the opportunities matched to it
#[derive(Debug, Serialize, ToSchema)]
pub struct InvestorOpportunitiesResponse {
    pub investor_id: String,
    pub opportunities: Vec<FundingOpportunity>,
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct InvestorQuery {
    /// Funding stage 0-4
    pub stage: Option<u8>,
    /// Case-insensitive substring of the investor type
    pub investor_type: Option<String>,
}
