use axum::{
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Extension, Json,
};
use serde::{Serialize, Serializer};
use serde_json::Value as JsonValue;
use std::fmt;

pub mod problems {
    pub const NOT_FOUND: &str = "not-found";
    pub const FORBIDDEN: &str = "forbidden";
    pub const SERVER_ERROR: &str = "server-error";
    pub const INPUT_BODY: &str = "input-body-format";
    pub const INPUT_BODY_SHAPE: &str = "input-body-shape";
}

fn serialize_status<S>(value: &StatusCode, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_u16(value.as_u16())
}

/// Implementation of a Problem Details response for HTTP APIs as of
/// the specification [RFC-7807](https://datatracker.ietf.org/doc/html/rfc7807).
#[derive(Debug, Serialize)]
pub struct Problem {
    #[serde(rename = "status", serialize_with = "serialize_status")]
    pub status: StatusCode,
    #[serde(rename = "type")]
    pub ty: &'static str,
    #[serde(rename = "instance", skip_serializing_if = "Option::is_none")]
    pub instance: Option<String>,
    #[serde(rename = "detail")]
    pub detail: String,
    // This property is returned only if service configuration allows it
    #[serde(rename = "sensitive", skip_serializing_if = "JsonValue::is_null")]
    pub sensitive: JsonValue,
}

impl Problem {
    pub fn new(status: StatusCode, ty: &'static str) -> Self {
        Problem {
            status,
            ty,
            instance: None,
            detail: String::new(),
            sensitive: JsonValue::Null,
        }
    }

    pub fn not_found() -> Self {
        Self::new(StatusCode::NOT_FOUND, problems::NOT_FOUND)
    }

    pub fn forbidden() -> Self {
        Self::new(StatusCode::FORBIDDEN, problems::FORBIDDEN)
    }

    pub fn internal_error() -> Self {
        Problem::new(StatusCode::INTERNAL_SERVER_ERROR, problems::SERVER_ERROR)
    }

    pub fn bad_request(ty: &'static str) -> Self {
        Self::new(StatusCode::BAD_REQUEST, ty)
    }

    pub fn with_detail<S: ToString>(self, detail: S) -> Self {
        Self {
            detail: detail.to_string(),
            ..self
        }
    }

    /// Set the path of the resource the problem relates to.
    pub fn with_instance<S: Into<String>>(self, instance: S) -> Self {
        Self {
            instance: Some(instance.into()),
            ..self
        }
    }

    pub fn with_sensitive<S>(self, sensitive: S) -> Self
    where
        S: Serialize,
    {
        Self {
            sensitive: serde_json::to_value(sensitive).unwrap_or(JsonValue::Null),
            ..self
        }
    }

    pub fn with_sensitive_dbg<S>(self, sensitive: S) -> Self
    where
        S: fmt::Debug,
    {
        self.with_sensitive(format!("{:#?}", sensitive))
    }
}

#[derive(Clone, Debug, Default)]
pub struct ProblemConfig {
    include_internal: bool,
}

impl ProblemConfig {
    pub fn new(include_internal: bool) -> Self {
        Self { include_internal }
    }

    pub fn into_layer(self) -> Extension<Self> {
        Extension(self)
    }

    pub fn transform<P>(&self, problem: P) -> Problem
    where
        P: Into<Problem>,
    {
        let problem = problem.into();
        if !self.include_internal {
            Problem {
                sensitive: Default::default(),
                ..problem
            }
        } else {
            problem
        }
    }
}

pub trait IntoProblemResponse {
    fn into_response(self, config: &ProblemConfig) -> ProblemResponse;
}

impl<T> IntoProblemResponse for T
where
    T: Into<Problem>,
{
    fn into_response(self, config: &ProblemConfig) -> ProblemResponse {
        ProblemResponse::new(config, self)
    }
}

/// Problem response
#[derive(Debug)]
pub struct ProblemResponse {
    pub config: ProblemConfig,
    pub problem: Problem,
}

impl ProblemResponse {
    pub fn new<P>(config: &ProblemConfig, problem: P) -> Self
    where
        P: Into<Problem>,
    {
        Self {
            config: config.clone(),
            problem: problem.into(),
        }
    }
}

impl IntoResponse for ProblemResponse {
    fn into_response(self) -> Response {
        let ProblemResponse { problem, config } = self;
        if problem.status.is_server_error() {
            log::error!("problem response: {:#?}", problem);
        } else {
            log::info!("problem response: {:#?}", problem);
        }
        let problem = config.transform(problem);
        let mut response = (problem.status, Json(problem)).into_response();
        response.headers_mut().insert(
            header::CONTENT_TYPE,
            HeaderValue::from_static("application/problem+json"),
        );
        response
    }
}

/// Error response that is converted into a problem with the captured configuration.
#[derive(Debug)]
pub struct ErrorResponse<E>
where
    E: Into<Problem>,
{
    pub config: ProblemConfig,
    pub problem: E,
}

impl<E> ErrorResponse<E>
where
    E: Into<Problem>,
{
    pub fn new(config: &ProblemConfig, problem: E) -> Self {
        Self {
            config: config.clone(),
            problem,
        }
    }
}

impl<E> IntoResponse for ErrorResponse<E>
where
    E: Into<Problem>,
{
    fn into_response(self) -> Response {
        let ErrorResponse { config, problem } = self;
        ProblemResponse::new(&config, problem).into_response()
    }
}
