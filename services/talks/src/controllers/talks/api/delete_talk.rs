use crate::app_state::AppState;
use axum::{extract::Request, http::StatusCode};
use skillshare_infra::web::{responses::ProblemResponse, routing::RouteParams};

#[utoipa::path(
    delete,
    path = "/talks/{title}",
    tag = "talks",
    description = "Delete a talk. Deleting a missing talk is not an error.",
    params(
        ("title" = String, Path, description = "Title of the talk")
    ),
    responses(
        (status = NO_CONTENT, description = "The talk is not present.")
    )
)]
pub async fn delete_talk(state: AppState, params: RouteParams, request: Request) -> Result<StatusCode, ProblemResponse> {
    let problem_config = super::problem_config(&request);
    let title = super::title_param(&params, &problem_config)?;

    state.talks().delete_talk(title);
    Ok(StatusCode::NO_CONTENT)
}
