use crate::{app_state::AppState, services::talks::Comment};
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
pub struct NewComment {
    author: String,
    message: String,
}

#[utoipa::path(
    post,
    path = "/talks/{title}/comments",
    tag = "talks",
    description = "Add a comment to a talk.",
    params(
        ("title" = String, Path, description = "Title of the talk")
    ),
    request_body = NewComment,
    responses(
        (status = NO_CONTENT, description = "The comment is added."),
        (status = BAD_REQUEST, description = "The body is not a valid comment."),
        (status = NOT_FOUND, description = "There is no talk with the title.")
    )
)]
pub async fn post_comment(
    state: AppState,
    params: RouteParams,
    request: Request,
) -> Result<StatusCode, ProblemResponse> {
    let problem_config = super::problem_config(&request);
    let title = super::title_param(&params, &problem_config)?;
    let instance = request.uri().path().to_owned();

    let InputJson(body) = request
        .extract::<InputJson<NewComment>, _>()
        .await
        .map_err(|err| err.problem.into_response(&problem_config))?;

    let comment = Comment {
        author: body.author,
        message: body.message,
    };
    state
        .talks()
        .add_comment(title, comment)
        .map_err(|err| super::talk_problem(err, &instance, &problem_config))?;
    Ok(StatusCode::NO_CONTENT)
}
