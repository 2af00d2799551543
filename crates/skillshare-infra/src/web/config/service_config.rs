use serde::{Deserialize, Serialize};

/// The service (host) configuration shared by all the features.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceConfig {
    pub port: u16,
    /// Regular expressions for the allowed origins.
    pub allowed_origins: Vec<String>,
    /// Indicates if the full problem response should be returned. In production, it should be `false`.
    pub full_problem_response: bool,
    /// Directory of the static assets served for the requests not handled by any route.
    pub static_root: Option<String>,
}
