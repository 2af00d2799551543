use crate::app_state::AppState;
use axum::{extract::Request, http::StatusCode, RequestExt};
use serde::Deserialize;
use skillshare_infra::web::{
    extracts::InputJson,
    responses::{IntoProblemResponse, ProblemResponse},
    routing::RouteParams,
};
use utoipa::ToSchema;

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PutTalk {
    presenter: String,
    summary: String,
}

#[utoipa::path(
    put,
    path = "/talks/{title}",
    tag = "talks",
    description = "Create or replace a talk. The comments of a replaced talk are removed.",
    params(
        ("title" = String, Path, description = "Title of the talk")
    ),
    request_body = PutTalk,
    responses(
        (status = NO_CONTENT, description = "The talk is stored."),
        (status = BAD_REQUEST, description = "The body is not a valid talk.")
    )
)]
pub async fn put_talk(state: AppState, params: RouteParams, request: Request) -> Result<StatusCode, ProblemResponse> {
    let problem_config = super::problem_config(&request);
    let title = super::title_param(&params, &problem_config)?;

    let InputJson(body) = request
        .extract::<InputJson<PutTalk>, _>()
        .await
        .map_err(|err| err.problem.into_response(&problem_config))?;

    if !state.talks().put_talk(title, &body.presenter, &body.summary) {
        log::debug!("Talk {title:?} is unchanged");
    }
    Ok(StatusCode::NO_CONTENT)
}
