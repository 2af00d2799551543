use serde::{Deserialize, Serialize};
use skillshare_infra::web::FeatureConfig;
use std::time::Duration;

/// The application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppConfig {
    /// Path of the json file storing the talks. Talks are kept in memory only if not given.
    pub storage_path: Option<String>,
    /// Upper limit of the long-poll waits.
    pub max_wait_seconds: Option<u64>,
}

impl FeatureConfig for AppConfig {
    const NAME: &'static str = "talks";
}

impl AppConfig {
    pub fn max_wait(&self) -> Option<Duration> {
        self.max_wait_seconds.map(Duration::from_secs)
    }
}
