use crate::web::responses::Problem;
use thiserror::Error as ThisError;
use tracing::subscriber::SetGlobalDefaultError;
use tracing_subscriber::filter::ParseError;

#[derive(Debug, ThisError)]
pub enum TelemetryBuildError {
    #[error(transparent)]
    SetGlobalTracing(#[from] SetGlobalDefaultError),
    #[error("Default log format could not be parsed")]
    DefaultLogError(#[from] ParseError),
}

#[derive(Debug, ThisError)]
pub enum TelemetryError {
    #[error("Failed to update trace configuration")]
    TraceUpdateConfig(String),
    #[error("Reconfigure is not enabled")]
    TraceNoReconfigure,
}

impl From<TelemetryError> for Problem {
    fn from(value: TelemetryError) -> Self {
        match value {
            TelemetryError::TraceNoReconfigure => Problem::forbidden().with_detail(value.to_string()),
            TelemetryError::TraceUpdateConfig(_) => Problem::bad_request("telemetry-config")
                .with_detail(value.to_string())
                .with_sensitive_dbg(value),
        }
    }
}
