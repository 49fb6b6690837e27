use std::collections::HashMap;

use storage::{
    DataStore,
    dto::saved::SavedOpportunityResponse,
    error::Result,
    models::SavedOpportunity,
    services::degrade,
};
use uuid::Uuid;

/// Saved opportunities with their opportunity attached, newest first
pub async fn list_saved(store: &dyn DataStore, user_id: &str) -> Vec<SavedOpportunityResponse> {
    let saved = degrade::or_empty(store.list_saved(user_id).await, "list_saved");
    if saved.is_empty() {
        return Vec::new();
    }

    let ids: Vec<String> = saved.iter().map(|s| s.opportunity_id.clone()).collect();
    let mut opportunities: HashMap<String, _> =
        degrade::or_empty(store.find_opportunities(&ids).await, "find_opportunities")
            .into_iter()
            .map(|o| (o.id.clone(), o))
            .collect();

    saved
        .into_iter()
        .map(|saved| {
            let opportunity = opportunities.remove(&saved.opportunity_id);
            SavedOpportunityResponse { saved, opportunity }
        })
        .collect()
}

/// Whether the user saved the opportunity
pub async fn find_saved(
    store: &dyn DataStore,
    user_id: &str,
    opportunity_id: &str,
) -> Result<Option<SavedOpportunity>> {
    store.find_saved(user_id, opportunity_id).await
}

/// Save an opportunity for later
pub async fn save(
    store: &dyn DataStore,
    user_id: &str,
    opportunity_id: &str,
    notes: Option<&str>,
) -> Result<SavedOpportunity> {
    store.find_opportunity(opportunity_id).await?;
    let saved = store.save_opportunity(user_id, opportunity_id, notes).await?;
    tracing::info!(user_id, opportunity_id, "opportunity saved");
    Ok(saved)
}

/// Replace the notes on a saved opportunity
pub async fn update_notes(
    store: &dyn DataStore,
    id: Uuid,
    notes: Option<&str>,
) -> Result<SavedOpportunity> {
    store.update_saved_notes(id, notes).await
}

/// Remove a saved opportunity
pub async fn delete(store: &dyn DataStore, id: Uuid) -> Result<()> {
    store.delete_saved(id).await
}
