use serde::Deserialize;
use skillshare_infra::{
    telemetry::LogFormat,
    web::{Environment, FeatureConfig, WebAppConfig},
};
use skillshare_test::test;
use std::env;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Data {
    file_value: String,
    env_value: Option<String>,
    override_value: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Feature {
    some_data: Data,
}

impl FeatureConfig for Feature {
    const NAME: &'static str = "feature";
}

const CONFIG_ROOT: &str = "./tests/web_configs";

#[test]
fn environment_key_mapping() {
    let environment = Environment::new();
    assert_eq!(
        environment.config_key("SKILLSHARE--SERVICE--FULL_PROBLEM_RESPONSE").as_deref(),
        Some("service.fullProblemResponse")
    );
    assert_eq!(
        environment.config_key("skillshare--talks--MAX_WAIT_SECONDS").as_deref(),
        Some("talks.maxWaitSeconds")
    );
    assert_eq!(environment.config_key("SKILLSHARE--"), None);
    assert_eq!(environment.config_key("PATH"), None);

    let environment = Environment::with_prefix("APP--");
    assert_eq!(environment.config_key("APP--PORT").as_deref(), Some("port"));
    assert_eq!(environment.config_key("SKILLSHARE--PORT"), None);
}

#[test]
fn config_with_env() {
    env::set_var("SKILLSHARE--OVERRIDE_VALUE", "from env");
    env::set_var("SKILLSHARE--ENV_VALUE", "from env");

    let cfg = config::Config::builder()
        .add_source(config::File::from_str(
            r#"{"fileValue": "from file", "overrideValue": "from file"}"#,
            config::FileFormat::Json,
        ))
        .add_source(Environment::new())
        .build()
        .unwrap();
    log::info!("{cfg:#?}");
    let cfg = cfg.try_deserialize::<Data>().unwrap();
    log::debug!("{cfg:#?}");

    assert_eq!(cfg.file_value, "from file");
    assert_eq!(cfg.env_value.as_deref(), Some("from env"));
    assert_eq!(cfg.override_value, "from env");
}

#[test]
fn web_config_with_env() {
    env::set_var("SKILLSHARE--SERVICE--PORT", "9090");
    env::set_var("SKILLSHARE--SERVICE--FULL_PROBLEM_RESPONSE", "true");
    env::set_var("SKILLSHARE--FEATURE--SOME_DATA--OVERRIDE_VALUE", "from env");
    env::set_var("SKILLSHARE--FEATURE--SOME_DATA--ENV_VALUE", "from env");

    let config = WebAppConfig::<Feature>::load("dev", Some(format!("{CONFIG_ROOT}/env.json").into())).unwrap();
    assert_eq!(config.core.stage, "dev");
    assert_eq!(config.core.version, "custom");
    assert_eq!(config.service.port, 9090);
    assert!(config.service.full_problem_response);
    assert!(config.service.static_root.is_none());
    assert!(config.telemetry.enable_console_log);
    assert_eq!(config.telemetry.format, LogFormat::Compact);
    assert!(!config.telemetry.allow_reconfigure);
    assert_eq!(config.feature.some_data.file_value, "from file");
    assert_eq!(config.feature.some_data.override_value, "from env");
    assert_eq!(config.feature.some_data.env_value.as_deref(), Some("from env"));
}

#[test]
fn web_config_missing_file() {
    let config = WebAppConfig::<Feature>::load("dev", Some(format!("{CONFIG_ROOT}/not_there.json").into()));
    assert!(config.is_err());
}
