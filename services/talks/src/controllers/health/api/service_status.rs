use crate::app_state::AppState;
use axum::{extract::State, Json};
use serde::Serialize;
use utoipa::ToSchema;

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ServiceStatus {
    pub version: u64,
    pub talk_count: usize,
    pub pending_waiters: usize,
}

#[utoipa::path(
    get,
    path = "/api/status",
    tag = "health",
    description = "Current version of the talks and the number of pending long-polls.",
    responses(
        (status = OK, body = ServiceStatus)
    )
)]
pub async fn get_service_status(State(state): State<AppState>) -> Json<ServiceStatus> {
    let status = state.talks().status();
    Json(ServiceStatus {
        version: status.version,
        talk_count: status.talk_count,
        pending_waiters: status.pending_waiters,
    })
}
