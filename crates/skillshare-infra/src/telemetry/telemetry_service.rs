use std::sync::{Arc, PoisonError, RwLock};
use tracing::{Dispatch, Subscriber};
use tracing_subscriber::{
    filter::EnvFilter,
    fmt,
    layer::SubscriberExt,
    registry::{LookupSpan, Registry},
    reload, Layer,
};

use super::{LogFormat, TelemetryBuildError, TelemetryConfig, TelemetryError};

#[derive(Debug, Clone)]
pub struct DynConfig {
    pub filter: String,
}

struct FilterReload {
    handle: reload::Handle<EnvFilter, Registry>,
    config: DynConfig,
}

impl FilterReload {
    fn set_configuration(&mut self, mut new_config: DynConfig) -> Result<(), String> {
        new_config.filter.retain(|c| !c.is_whitespace());
        let new_filter = new_config.filter.parse::<EnvFilter>().map_err(|e| format!("{e}"))?;
        self.handle.reload(new_filter).map_err(|e| format!("{e}"))?;
        self.config = new_config;
        Ok(())
    }
}

/// Telemetry service.
///
/// Logs
///  - The log::trace,debug,info,warn,error! macros are used by the services and channelled to the tracing layer
///  - The tracing::trace,debug,info,warn,error! macros and spans (ex. the http trace layer) share the same pipeline
///  - The filter is behind a reload layer, it can be altered at runtime if the configuration allows it
#[derive(Clone)]
pub struct TelemetryService {
    reconfigure: Option<Arc<RwLock<FilterReload>>>,
}

impl TelemetryService {
    pub fn new(service_name: &'static str, config: &TelemetryConfig) -> Result<Self, TelemetryBuildError> {
        log::debug!("Installing telemetry for {service_name}...");

        let (service, pipeline) = Self::scoped(config)?;
        //Note: SubscriberInitExt::init cannot be used as the LogTracer is already installed
        // for the pre-init phase. Calling init would result in a double install error from the LogTracer.
        tracing::dispatcher::set_global_default(pipeline)?;

        Ok(service)
    }

    /// Create the service with a pipeline that is not installed. The filter can be reconfigured as long
    /// as the returned dispatcher is alive.
    pub fn scoped(config: &TelemetryConfig) -> Result<(Self, Dispatch), TelemetryBuildError> {
        let filter = config.default_level.as_deref().unwrap_or("warn");
        let env_filter = EnvFilter::builder().parse(filter)?;
        let (filter_layer, handle) = reload::Layer::new(env_filter);

        let console_layer = if config.enable_console_log {
            Some(Self::console_layer(config.format))
        } else {
            log::warn!("Service is configured for silent mode");
            None
        };

        let pipeline = tracing_subscriber::registry().with(filter_layer).with(console_layer);

        let reconfigure = if config.allow_reconfigure {
            Some(Arc::new(RwLock::new(FilterReload {
                handle,
                config: DynConfig {
                    filter: filter.to_string(),
                },
            })))
        } else {
            None
        };

        Ok((Self { reconfigure }, Dispatch::new(pipeline)))
    }

    /// Create a service without installing a global subscriber. The configuration can not be altered.
    pub fn detached() -> Self {
        Self { reconfigure: None }
    }

    fn console_layer<S>(format: LogFormat) -> Box<dyn Layer<S> + Send + Sync>
    where
        S: Subscriber + for<'a> LookupSpan<'a> + Send + Sync + 'static,
    {
        log::debug!("Registering {format:?} console log tracing layer...");
        match format {
            LogFormat::Compact => fmt::layer().compact().boxed(),
            LogFormat::Pretty => fmt::layer().pretty().boxed(),
            LogFormat::Json => fmt::layer().json().boxed(),
        }
    }

    pub fn set_configuration(&self, config: DynConfig) -> Result<(), TelemetryError> {
        let reconfigure = self.reconfigure.as_ref().ok_or(TelemetryError::TraceNoReconfigure)?;
        reconfigure
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .set_configuration(config)
            .map_err(TelemetryError::TraceUpdateConfig)
    }

    pub fn get_configuration(&self) -> Result<DynConfig, TelemetryError> {
        let reconfigure = self.reconfigure.as_ref().ok_or(TelemetryError::TraceNoReconfigure)?;
        let reconfigure = reconfigure.read().unwrap_or_else(PoisonError::into_inner);
        Ok(reconfigure.config.clone())
    }
}
