//! Reference data bundled with the crate, used by mock mode and as the
//! seeder's default input.

use crate::error::Result;
use crate::models::{FundingOpportunity, Investor};

pub const OPPORTUNITIES_JSON: &str = include_str!("../seed/funding_opportunities.json");
pub const INVESTORS_JSON: &str = include_str!("../seed/investors.json");

pub fn opportunities() -> Result<Vec<FundingOpportunity>> {
    Ok(serde_json::from_str(OPPORTUNITIES_JSON)?)
}

pub fn investors() -> Result<Vec<Investor>> {
    Ok(serde_json::from_str(INVESTORS_JSON)?)
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn test_bundled_data_parses_with_unique_ids() {
        let opportunities = opportunities().unwrap();
        let ids: HashSet<&str> = opportunities.iter().map(|o| o.id.as_str()).collect();
        assert_eq!(ids.len(), opportunities.len());

        let investors = investors().unwrap();
        assert!(investors.iter().all(|i| !i.stages.is_empty()));
    }
}
