use storage::{
    DataStore,
    error::Result,
    models::{FundingOpportunity, Investor},
    services::{
        classification::{self, CategoryCount, FundingCategory, SecondaryFilter},
        degrade, matching,
    },
};

/// List opportunities, narrowed by category and secondary filter
pub async fn list_opportunities(
    store: &dyn DataStore,
    category: Option<FundingCategory>,
    secondary: Option<SecondaryFilter>,
) -> Vec<FundingOpportunity> {
    let all = degrade::or_empty(store.list_opportunities().await, "list_opportunities");
    classification::filter(&all, category, secondary)
        .into_iter()
        .cloned()
        .collect()
}

/// Count opportunities per category
pub async fn category_counts(store: &dyn DataStore) -> Vec<CategoryCount> {
    let all = degrade::or_empty(store.list_opportunities().await, "category_counts");
    classification::category_counts(&all)
}

/// Opportunities suited to early-stage startups
pub async fn early_stage(store: &dyn DataStore) -> Vec<FundingOpportunity> {
    degrade::or_empty(store.list_opportunities().await, "early_stage_opportunities")
        .into_iter()
        .filter(|o| o.is_early_stage || classification::is_early_stage(&o.sector, &o.description))
        .collect()
}

/// Opportunities with a social or environmental focus
pub async fn impact_focused(store: &dyn DataStore) -> Vec<FundingOpportunity> {
    degrade::or_empty(store.list_opportunities().await, "impact_opportunities")
        .into_iter()
        .filter(|o| {
            o.is_impact_focused || classification::is_impact_focused(&o.sector, &o.description)
        })
        .collect()
}

/// Get opportunity by id
pub async fn get_opportunity(store: &dyn DataStore, id: &str) -> Result<FundingOpportunity> {
    store.find_opportunity(id).await
}

/// Investors associated with an opportunity, best matches first
pub async fn investors_for(store: &dyn DataStore, id: &str) -> Result<Vec<Investor>> {
    let opportunity = store.find_opportunity(id).await?;
    let investors = degrade::or_empty(store.list_investors().await, "list_investors");

    Ok(matching::investors_for(&opportunity, &investors)
        .into_iter()
        .cloned()
        .collect())
}
