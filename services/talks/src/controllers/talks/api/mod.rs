mod list_talks;
pub use self::list_talks::*;
mod get_talk;
pub use self::get_talk::*;
mod put_talk;
pub use self::put_talk::*;
mod delete_talk;
pub use self::delete_talk::*;
mod post_comment;
pub use self::post_comment::*;

use crate::services::talks::TalkError;
use axum::extract::Request;
use skillshare_infra::web::{
    responses::{IntoProblemResponse, Problem, ProblemConfig, ProblemResponse},
    routing::RouteParams,
};

fn problem_config(request: &Request) -> ProblemConfig {
    request.extensions().get::<ProblemConfig>().cloned().unwrap_or_default()
}

fn title_param<'a>(params: &'a RouteParams, problem_config: &ProblemConfig) -> Result<&'a str, ProblemResponse> {
    params.get("title").ok_or_else(|| {
        Problem::internal_error()
            .with_detail("Missing title")
            .into_response(problem_config)
    })
}

/// Problem of a failed talk operation reported at the requested path.
fn talk_problem(err: TalkError, instance: &str, problem_config: &ProblemConfig) -> ProblemResponse {
    Problem::from(err).with_instance(instance).into_response(problem_config)
}
