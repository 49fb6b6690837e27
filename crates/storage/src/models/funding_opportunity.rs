use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};
use utoipa::ToSchema;

/// Card layout hint for a funding opportunity.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum DisplayType {
    #[default]
    Default,
    Table,
    Pyramid,
    Stats,
    List,
}

impl DisplayType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::Table => "table",
            Self::Pyramid => "pyramid",
            Self::Stats => "stats",
            Self::List => "list",
        }
    }

    /// Unknown layout names fall back to `Default`.
    pub fn parse(value: &str) -> Self {
        match value.to_lowercase().as_str() {
            "table" => Self::Table,
            "pyramid" => Self::Pyramid,
            "stats" => Self::Stats,
            "list" => Self::List,
            _ => Self::Default,
        }
    }
}

impl<'de> Deserialize<'de> for DisplayType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = String::deserialize(deserializer)?;
        Ok(Self::parse(&value))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetailEntry {
    pub key: String,
    pub value: String,
}

/// Structured details: either an ordered table of rows or a free-form map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OpportunityDetails {
    Entries(Vec<DetailEntry>),
    Fields(BTreeMap<String, serde_json::Value>),
}

impl OpportunityDetails {
    /// `Some` only when the details map carries an explicit `equityRequired` flag.
    pub fn equity_required(&self) -> Option<bool> {
        match self {
            Self::Entries(_) => None,
            Self::Fields(fields) => fields.get("equityRequired").and_then(|v| v.as_bool()),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct FundingOpportunity {
    pub id: String,
    pub title: String,
    pub fund_provider: String,
    pub sector: String,
    pub amount_description: String,
    pub amount_min: Option<Decimal>,
    pub amount_max: Option<Decimal>,
    pub location: String,
    pub description: String,
    #[serde(default)]
    pub relevant_links: Vec<String>,
    #[serde(default)]
    pub display_type: DisplayType,
    pub image_url: Option<String>,
    pub equity: Option<String>,
    #[serde(default)]
    pub program_support: bool,
    pub funding_type: Option<String>,
    #[serde(default)]
    pub is_early_stage: bool,
    #[serde(default)]
    pub is_impact_focused: bool,
    #[schema(value_type = Option<Object>)]
    pub details: Option<OpportunityDetails>,
}
