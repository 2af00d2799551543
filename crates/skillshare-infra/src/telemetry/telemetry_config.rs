use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum LogFormat {
    #[default]
    Compact,
    Pretty,
    Json,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TelemetryConfig {
    pub enable_console_log: bool,
    /// Filter directives in the `RUST_LOG` syntax, `warn` if not given.
    pub default_level: Option<String>,
    /// Allow to update the log filter through the health api. The api is not authenticated.
    #[serde(default)]
    pub allow_reconfigure: bool,
    #[serde(default)]
    pub format: LogFormat,
}
