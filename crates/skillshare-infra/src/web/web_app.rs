use crate::{
    telemetry::TelemetryService,
    web::{
        controllers,
        responses::{IntoProblemResponse, Problem, ProblemConfig, ProblemResponse},
        routing::{RouteLayer, RouteTable},
        FeatureConfig, WebAppConfig,
    },
};
use anyhow::{anyhow, Error as AnyError};
use axum::{
    handler::HandlerWithoutStateExt,
    http::{header, HeaderName, Method, Uri},
    response::{IntoResponse, Response},
    routing::{get, Router},
    Extension, Json,
};
use regex::bytes::Regex;
use serde::de::DeserializeOwned;
use std::{any::Any, env, fmt::Debug, future::Future, net::SocketAddr};
use tokio::{net::TcpListener, runtime::Runtime, signal};
use tower::Layer;
use tower_http::{
    catch_panic::CatchPanicLayer,
    cors::{AllowOrigin, CorsLayer},
    services::ServeDir,
    trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer},
};
use tracing::{level_filters::LevelFilter, Level};
use tracing_log::LogTracer;
use tracing_subscriber::EnvFilter;
use utoipa::{
    openapi::{ComponentsBuilder, OpenApi as OpenApiDoc, OpenApiBuilder},
    OpenApi, ToResponse,
};
use utoipa_axum::router::OpenApiRouter;

const PREFER: HeaderName = HeaderName::from_static("prefer");

#[derive(OpenApi)]
#[openapi(paths(), components(), tags())]
struct ApiDoc;

impl ApiDoc {
    pub fn with_default_components() -> OpenApiDoc {
        #[derive(ToResponse)]
        #[allow(dead_code)]
        struct Problem {
            r#type: String,
            status: u16,
            detail: String,
            instance: Option<String>,
        }

        let mut doc = ApiDoc::openapi();

        let components = ComponentsBuilder::new().response_from::<Problem>().build();
        let comp_doc = OpenApiBuilder::new().components(Some(components)).build();
        doc.merge(comp_doc);

        doc
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        match signal::ctrl_c().await {
            Ok(()) => log::warn!("Received ctrl-c, shutting down the server..."),
            Err(err) => {
                log::error!("Failed to install Ctrl+C handler: {err}");
                std::future::pending::<()>().await
            }
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut terminate) => {
                terminate.recv().await;
                log::warn!("Received SIGTERM, shutting down the server...")
            }
            Err(err) => {
                log::error!("Failed to install signal handler: {err}");
                std::future::pending::<()>().await
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}

async fn not_found(Extension(problem_config): Extension<ProblemConfig>, uri: Uri) -> ProblemResponse {
    Problem::not_found()
        .with_detail("Resource not found")
        .with_instance(uri.path())
        .into_response(&problem_config)
}

fn panic_response(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "Unknown panic message".to_string()
    };
    log::error!("Request handler panicked: {detail}");

    // the request extensions are not available here, the sensitive part is never shown
    Problem::internal_error()
        .with_detail("Internal server error")
        .with_sensitive(detail)
        .into_response(&ProblemConfig::default())
        .into_response()
}

pub trait WebApplication {
    type AppConfig: FeatureConfig + DeserializeOwned + Debug + Send + Sync + 'static;
    type AppState: Clone + Send + Sync + 'static;

    fn feature_name(&self) -> &'static str {
        Self::AppConfig::NAME
    }

    fn create_state(
        &self,
        config: &WebAppConfig<Self::AppConfig>,
    ) -> impl Future<Output = Result<Self::AppState, AnyError>> + Send;

    /// Routes nested under `/{feature}`, they are part of the generated api documentation.
    fn create_routes(
        &self,
        config: &WebAppConfig<Self::AppConfig>,
    ) -> impl Future<Output = Result<OpenApiRouter<Self::AppState>, AnyError>> + Send;

    /// Resource routes served from the root. These are tested in order before the static files.
    fn create_resources(
        &self,
        config: &WebAppConfig<Self::AppConfig>,
    ) -> Result<RouteTable<Self::AppState>, AnyError>;

    /// Documentation of the resource routes.
    fn api_doc(&self) -> Option<OpenApiDoc> {
        None
    }

    /// Called after the server has stopped accepting requests and the in-flight ones are completed.
    fn on_shutdown(&self, _state: &Self::AppState) -> impl Future<Output = ()> + Send {
        async {}
    }
}

fn prepare_web_app<A: WebApplication>(app: &A) -> Result<(WebAppConfig<A::AppConfig>, TelemetryService), AnyError> {
    let args: Vec<String> = env::args().collect();
    let stage = args.get(1).ok_or(anyhow!("Missing config stage parameter"))?.clone();

    // initialize a pre-init logger
    LogTracer::init()?;
    let _pre_init_log_guard = {
        let env_filter = EnvFilter::builder()
            .with_default_directive(LevelFilter::INFO.into())
            .from_env_lossy();
        let pre_init_log = tracing_subscriber::fmt().with_env_filter(env_filter).compact().finish();
        tracing::dispatcher::set_default(&pre_init_log.into())
    };

    log::debug!("init-debug - ok");
    tracing::debug!("init-debug - tracing:ok");

    let config = WebAppConfig::<A::AppConfig>::load(&stage, None)?;
    let telemetry_service = TelemetryService::new(app.feature_name(), &config.telemetry)?;
    log::info!("pre-init completed");

    Ok((config, telemetry_service))
}

/// Assemble the application router.
pub async fn create_web_app<A: WebApplication>(
    config: &WebAppConfig<A::AppConfig>,
    telemetry_service: TelemetryService,
    app: &A,
) -> Result<Router<()>, AnyError> {
    log::info!("Creating application state...");
    let app_state = app.create_state(config).await?;
    create_web_router(config, telemetry_service, app, app_state).await
}

/// Assemble the application router around an existing state.
pub async fn create_web_router<A: WebApplication>(
    config: &WebAppConfig<A::AppConfig>,
    telemetry_service: TelemetryService,
    app: &A,
    app_state: A::AppState,
) -> Result<Router<()>, AnyError> {
    log::trace!("Creating services...");
    let feature_name = app.feature_name();

    let cors_layer = {
        let allowed_origins = {
            let allowed_origins = config
                .service
                .allowed_origins
                .iter()
                .map(|r| Regex::new(r))
                .collect::<Result<Vec<_>, _>>()
                .map_err(|err| anyhow!("Cors config error: {err}"))?;
            AllowOrigin::predicate(move |origin, _| {
                let origin = origin.as_bytes();
                allowed_origins.iter().any(|r| r.is_match(origin))
            })
        };
        CorsLayer::default()
            .allow_origin(allowed_origins)
            .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE, Method::OPTIONS])
            .allow_headers([header::CONTENT_TYPE, header::ACCEPT, header::IF_NONE_MATCH, PREFER])
            .expose_headers([header::ETAG])
    };

    let mut doc = ApiDoc::with_default_components();

    let log_layer = TraceLayer::new_for_http()
        .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
        .on_response(DefaultOnResponse::new().level(Level::INFO));
    let problem_detail_layer = {
        let problem_config = ProblemConfig::new(config.service.full_problem_response);
        problem_config.into_layer()
    };

    let mut router = OpenApiRouter::new();

    log::info!("Creating common routes...");
    let health_controller = controllers::HealthController::new(feature_name, config).into_routes();
    router = router.nest(&format!("/{feature_name}"), health_controller);

    log::info!("Creating application routes...");
    let app_controller = app.create_routes(config).await?;
    router = router.nest(&format!("/{feature_name}"), app_controller);

    let (router, router_api) = router.split_for_parts();
    doc.merge(router_api);
    if let Some(resource_api) = app.api_doc() {
        doc.merge(resource_api);
    }

    log::info!("Creating resource routes...");
    let resources = RouteLayer::new(app.create_resources(config)?, app_state.clone());
    let router = match &config.service.static_root {
        Some(static_root) => {
            log::info!("Serving static files from {static_root}");
            let static_files = ServeDir::new(static_root).fallback(not_found.into_service());
            router.fallback_service(resources.layer(static_files))
        }
        None => router.fallback_service(resources.layer(not_found.into_service())),
    };

    let router = router.route(
        &format!("/{feature_name}/doc/openapi.json"),
        get(move || {
            let doc = doc.clone();
            async move { Json(doc) }
        }),
    );

    Ok(router
        .layer(CatchPanicLayer::custom(panic_response))
        .layer(problem_detail_layer)
        .layer(cors_layer)
        .layer(Extension(telemetry_service))
        .layer(log_layer)
        .with_state(app_state))
}

async fn start_web_app<A: WebApplication>(app: A) -> Result<(), AnyError> {
    let (config, telemetry_service) = prepare_web_app(&app)?;
    log::info!("Creating application state...");
    let app_state = app.create_state(&config).await?;
    let router = create_web_router(&config, telemetry_service, &app, app_state.clone()).await?;

    let addr = SocketAddr::from(([0, 0, 0, 0], config.service.port));
    log::info!("Starting service on http://{addr:?} ...");
    let listener = TcpListener::bind(&addr).await?;
    let served = axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| anyhow!(e));

    log::info!("Service stopped, shutting down the application...");
    app.on_shutdown(&app_state).await;
    served
}

pub fn run_web_app<A: WebApplication>(app: A) {
    let result = Runtime::new()
        .map_err(AnyError::from)
        .and_then(|rt| rt.block_on(start_web_app(app)));

    if let Err(err) = result {
        eprintln!("[ERROR] {err}");
        let mut causes = err.chain().skip(1).peekable();
        if causes.peek().is_some() {
            eprintln!();
            eprintln!("Caused by:");
            for (i, cause) in causes.enumerate() {
                eprintln!("   {i}: {cause}");
            }
        }
        std::process::exit(1);
    }
}
