use utoipa::OpenApi;

use crate::features::{connections, funding, investors, journey, notifications, saved};

#[derive(OpenApi)]
#[openapi(
    paths(
        funding::handlers::list_opportunities,
        funding::handlers::category_counts,
        funding::handlers::early_stage,
        funding::handlers::impact_focused,
        funding::handlers::get_opportunity,
        funding::handlers::opportunity_investors,
        investors::handlers::list_investors,
        investors::handlers::get_investor,
        investors::handlers::investor_opportunities,
        journey::handlers::get_progress,
        journey::handlers::get_journey,
        journey::handlers::submit_pitch,
        journey::handlers::list_pitches,
        journey::handlers::get_pitch,
        journey::handlers::list_feedback,
        journey::handlers::add_feedback,
        journey::handlers::list_achievements,
        journey::handlers::unlock_achievement,
        journey::handlers::record_discovery,
        saved::handlers::list_saved,
        saved::handlers::save_opportunity,
        saved::handlers::is_saved,
        saved::handlers::update_notes,
        saved::handlers::delete_saved,
        notifications::handlers::list_notifications,
        notifications::handlers::mark_all_read,
        notifications::handlers::mark_read,
        connections::handlers::list_connections,
        connections::handlers::list_pending,
        connections::handlers::send_request,
        connections::handlers::connection_status,
        connections::handlers::respond_to_request,
        connections::handlers::delete_connection,
    ),
    components(
        schemas(
            storage::dto::common::PaginationMeta,
            storage::dto::funding::OpportunityInvestorsResponse,
            storage::dto::funding::InvestorOpportunitiesResponse,
            storage::dto::journey::SubmitPitchRequest,
            storage::dto::journey::SubmitPitchResponse,
            storage::dto::journey::ProgressResponse,
            storage::dto::journey::StageState,
            storage::dto::journey::AchievementStatus,
            storage::dto::journey::UnlockResponse,
            storage::dto::journey::DiscoveryResponse,
            storage::dto::journey::CreateFeedbackRequest,
            storage::dto::saved::SaveOpportunityRequest,
            storage::dto::saved::UpdateNotesRequest,
            storage::dto::saved::SavedOpportunityResponse,
            storage::dto::saved::IsSavedResponse,
            storage::dto::notification::MarkAllReadResponse,
            storage::dto::connection::SendConnectionRequest,
            storage::dto::connection::RespondConnectionRequest,
            storage::dto::connection::ConnectionDecision,
            storage::dto::connection::ConnectionView,
            storage::dto::connection::ConnectionStatusResponse,
            storage::models::FundingOpportunity,
            storage::models::DisplayType,
            storage::models::Investor,
            storage::models::Pitch,
            storage::models::Feedback,
            storage::models::UserProgress,
            storage::models::AchievementCategory,
            storage::models::SavedOpportunity,
            storage::models::Notification,
            storage::models::Connection,
            storage::models::ConnectionStatus,
            storage::services::classification::FundingCategory,
            storage::services::classification::SecondaryFilter,
            storage::services::classification::CategoryCount,
            storage::services::progress::StageStatus,
        )
    ),
    tags(
        (name = "funding", description = "Funding opportunity browsing and filtering"),
        (name = "investors", description = "Investor directory and matching"),
        (name = "journey", description = "Pitches, feedback, progress and achievements"),
        (name = "saved", description = "Saved opportunities"),
        (name = "notifications", description = "User notifications"),
        (name = "connections", description = "Connection requests between users"),
    ),
    modifiers(&SecurityAddon)
)]
pub struct ApiDoc;

struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                utoipa::openapi::security::SecurityScheme::Http(
                    utoipa::openapi::security::HttpBuilder::new()
                        .scheme(utoipa::openapi::security::HttpAuthScheme::Bearer)
                        .bearer_format("API Key")
                        .build(),
                ),
            )
        }
    }
}
