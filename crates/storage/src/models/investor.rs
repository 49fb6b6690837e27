use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::FundingStage;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Investor {
    pub id: String,
    pub name: String,
    pub investor_type: String,
    #[schema(value_type = Vec<u8>)]
    pub stages: Vec<FundingStage>,
    pub description: String,
    #[serde(default)]
    pub focus_sectors: Vec<String>,
    pub investment_range: Option<String>,
    pub location: Option<String>,
    pub website: Option<String>,
    pub logo_url: Option<String>,
}

impl Investor {
    pub fn invests_in(&self, stage: FundingStage) -> bool {
        self.stages.contains(&stage)
    }
}
