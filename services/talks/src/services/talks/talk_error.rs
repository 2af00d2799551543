use skillshare_infra::web::responses::Problem;
use thiserror::Error as ThisError;

#[derive(Debug, ThisError)]
pub enum TalkError {
    #[error("No talk '{0}' found")]
    TalkNotFound(String),
}

impl From<TalkError> for Problem {
    fn from(value: TalkError) -> Self {
        match value {
            TalkError::TalkNotFound(_) => Problem::not_found().with_detail(value.to_string()),
        }
    }
}
