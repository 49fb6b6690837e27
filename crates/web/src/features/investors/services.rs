use storage::{
    DataStore,
    error::Result,
    models::{FundingOpportunity, FundingStage, Investor},
    services::{degrade, matching},
};

/// List investors, optionally restricted to a stage and an investor type
pub async fn list_investors(
    store: &dyn DataStore,
    stage: Option<FundingStage>,
    investor_type: Option<&str>,
) -> Vec<Investor> {
    degrade::or_empty(store.list_investors().await, "list_investors")
        .into_iter()
        .filter(|i| stage.is_none_or(|s| i.invests_in(s)))
        .filter(|i| investor_type.is_none_or(|t| i.investor_type.eq_ignore_ascii_case(t)))
        .collect()
}

/// Get investor by id
pub async fn get_investor(store: &dyn DataStore, id: &str) -> Result<Investor> {
    store.find_investor(id).await
}

/// Opportunities matched to an investor, best matches first
pub async fn opportunities_for(store: &dyn DataStore, id: &str) -> Result<Vec<FundingOpportunity>> {
    let investor = store.find_investor(id).await?;
    let opportunities = degrade::or_empty(store.list_opportunities().await, "list_opportunities");

    Ok(matching::opportunities_for(&investor, &opportunities)
        .into_iter()
        .cloned()
        .collect())
}
