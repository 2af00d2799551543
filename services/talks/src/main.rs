mod app_config;
mod app_state;
mod controllers;
mod repositories;
mod services;

use self::{app_config::AppConfig, app_state::AppState};
use anyhow::Error as AnyError;
use controllers::{health::HealthController, talks::TalksController};
use skillshare_infra::web::{routing::RouteTable, WebAppConfig, WebApplication};
use utoipa::openapi::OpenApi as OpenApiDoc;
use utoipa_axum::router::OpenApiRouter;

struct Application;

impl WebApplication for Application {
    type AppConfig = AppConfig;
    type AppState = AppState;

    async fn create_state(&self, config: &WebAppConfig<Self::AppConfig>) -> Result<Self::AppState, AnyError> {
        AppState::new(config).await
    }

    async fn create_routes(
        &self,
        _config: &WebAppConfig<Self::AppConfig>,
    ) -> Result<OpenApiRouter<Self::AppState>, AnyError> {
        Ok(HealthController::new().into_router())
    }

    fn create_resources(&self, _config: &WebAppConfig<Self::AppConfig>) -> Result<RouteTable<Self::AppState>, AnyError> {
        Ok(TalksController::new().into_route_table()?)
    }

    fn api_doc(&self) -> Option<OpenApiDoc> {
        Some(TalksController::new().api_doc())
    }

    async fn on_shutdown(&self, state: &Self::AppState) {
        log::info!("Storing the pending changes of the talks...");
        state.talks().flush().await;
    }
}

pub fn main() {
    let app = Application;
    skillshare_infra::web::run_web_app(app);
}
