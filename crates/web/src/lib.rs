pub mod config;
pub mod error;
pub mod features;
pub mod middleware;
pub mod openapi;
pub mod state;

use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use middleware::auth::ApiKeys;
use openapi::ApiDoc;
use state::AppState;

pub fn build_router(state: AppState, api_keys: ApiKeys) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api = Router::new()
        .merge(features::funding::routes::routes())
        .merge(features::investors::routes::routes())
        .merge(features::journey::routes::routes(api_keys))
        .merge(features::saved::routes::routes())
        .merge(features::notifications::routes::routes())
        .merge(features::connections::routes::routes());

    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .nest("/api", api)
        .layer(cors)
        .with_state(state)
}
