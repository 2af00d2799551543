use crate::web::responses::{problems, ErrorResponse, Problem, ProblemConfig};
use axum::{
    body::Bytes,
    extract::{rejection::BytesRejection, FromRequest, Request},
    Extension, RequestExt,
};
use serde::de::DeserializeOwned;
use serde_json::error::Category;
use thiserror::Error as ThisError;

#[derive(Debug, ThisError)]
pub enum InputError {
    #[error("Body could not be read")]
    BodyRead(#[from] BytesRejection),
    #[error("Body is not a valid json: {0}")]
    BodyFormat(serde_json::Error),
    #[error("Body does not have the expected shape: {0}")]
    BodyShape(serde_json::Error),
}

impl From<serde_json::Error> for InputError {
    fn from(err: serde_json::Error) -> Self {
        match err.classify() {
            Category::Data => InputError::BodyShape(err),
            Category::Syntax | Category::Eof | Category::Io => InputError::BodyFormat(err),
        }
    }
}

impl From<InputError> for Problem {
    fn from(value: InputError) -> Self {
        match value {
            InputError::BodyRead(err) => Problem::bad_request(problems::INPUT_BODY)
                .with_detail(err.body_text())
                .with_sensitive_dbg(err),
            InputError::BodyFormat(err) => Problem::bad_request(problems::INPUT_BODY).with_detail(err),
            InputError::BodyShape(err) => Problem::bad_request(problems::INPUT_BODY_SHAPE).with_detail(err),
        }
    }
}

/// Parse the request body as json independent of the declared content type.
pub fn parse_json_body<T>(body: &[u8]) -> Result<T, InputError>
where
    T: DeserializeOwned,
{
    Ok(serde_json::from_slice(body)?)
}

/// Extract a typed json body. The content type is not checked, every body is parsed as json and
/// both malformed json and unexpected shapes are rejected with a `400` problem.
pub struct InputJson<T>(pub T);

impl<S, T> FromRequest<S> for InputJson<T>
where
    S: Send + Sync,
    T: DeserializeOwned,
{
    type Rejection = ErrorResponse<InputError>;

    async fn from_request(mut req: Request, _state: &S) -> Result<Self, Self::Rejection> {
        let problem_config = req
            .extract_parts::<Extension<ProblemConfig>>()
            .await
            .map(|Extension(config)| config)
            .unwrap_or_default();

        let body = req
            .extract::<Bytes, _>()
            .await
            .map_err(|err| ErrorResponse::new(&problem_config, InputError::from(err)))?;
        let data = parse_json_body(&body).map_err(|err| ErrorResponse::new(&problem_config, err))?;
        Ok(Self(data))
    }
}
