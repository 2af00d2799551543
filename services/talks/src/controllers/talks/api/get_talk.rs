use crate::{
    app_state::AppState,
    services::talks::{Talk, TalkError},
};
use axum::{extract::Request, Json};
use skillshare_infra::web::{responses::ProblemResponse, routing::RouteParams};

#[utoipa::path(
    get,
    path = "/talks/{title}",
    tag = "talks",
    description = "Get a talk.",
    params(
        ("title" = String, Path, description = "Title of the talk")
    ),
    responses(
        (status = OK, body = Talk),
        (status = NOT_FOUND, description = "There is no talk with the title.")
    )
)]
pub async fn get_talk(state: AppState, params: RouteParams, request: Request) -> Result<Json<Talk>, ProblemResponse> {
    let problem_config = super::problem_config(&request);
    let title = super::title_param(&params, &problem_config)?;

    match state.talks().get_talk(title) {
        Some(talk) => Ok(Json(talk)),
        None => Err(super::talk_problem(
            TalkError::TalkNotFound(title.to_owned()),
            request.uri().path(),
            &problem_config,
        )),
    }
}
