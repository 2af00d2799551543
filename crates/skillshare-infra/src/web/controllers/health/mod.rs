mod api;
pub use self::api::{ServiceVersion, TraceConfig};

use crate::web::{FeatureConfig, WebAppConfig};
use axum::Extension;
use utoipa_axum::{router::OpenApiRouter, routes};

/// Common endpoints of the services: readiness, version and log filter management.
pub struct HealthController {
    version: ServiceVersion,
}

impl HealthController {
    pub fn new<F>(feature_name: &'static str, config: &WebAppConfig<F>) -> Self
    where
        F: FeatureConfig,
    {
        let version = ServiceVersion {
            app_name: feature_name.to_string(),
            version: config.core.version.clone(),
        };
        Self { version }
    }

    pub fn into_routes<S>(self) -> OpenApiRouter<S>
    where
        S: Clone + Send + Sync + 'static,
    {
        let api = OpenApiRouter::new()
            .routes(routes!(api::get_ready))
            .routes(routes!(api::get_telemetry_config, api::put_telemetry_config));

        let version_api = {
            OpenApiRouter::new()
                .routes(routes!(api::get_version))
                .layer(Extension(self.version))
        };

        api.merge(version_api)
    }
}
