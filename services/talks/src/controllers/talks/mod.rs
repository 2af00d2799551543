mod api;

use crate::app_state::AppState;
use axum::http::Method;
use skillshare_infra::web::routing::{PatternError, RouteTable};
use utoipa::{openapi::OpenApi as OpenApiDoc, OpenApi};

#[derive(OpenApi)]
#[openapi(
    paths(
        api::list_talks,
        api::get_talk,
        api::put_talk,
        api::delete_talk,
        api::post_comment
    ),
    tags((name = "talks", description = "Talks and their comments"))
)]
struct TalksApiDoc;

/// The talk resources. They are served from the root, thus the routes are not nested under the
/// feature like the other endpoints.
pub struct TalksController();

impl TalksController {
    pub fn new() -> Self {
        Self()
    }

    pub fn into_route_table(self) -> Result<RouteTable<AppState>, PatternError> {
        RouteTable::new()
            .route(Method::GET, "/talks", api::list_talks)?
            .route(Method::GET, "/talks/{title}", api::get_talk)?
            .route(Method::PUT, "/talks/{title}", api::put_talk)?
            .route(Method::DELETE, "/talks/{title}", api::delete_talk)?
            .route(Method::POST, "/talks/{title}/comments", api::post_comment)
    }

    pub fn api_doc(&self) -> OpenApiDoc {
        TalksApiDoc::openapi()
    }
}
