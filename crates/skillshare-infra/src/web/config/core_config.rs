use crate::web::Environment;
use config::{builder::DefaultState, Config, ConfigBuilder, ConfigError, File};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const DEFAULT_VERSION_CONFIG_FILE: &str = "server_version.json";

/// Partial configuration required for early setup.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CoreConfig {
    pub stage: String,
    pub version: String,
    pub before_layers: Vec<String>,
    pub after_layers: Vec<String>,
    pub root_file: String,
}

#[derive(Debug)]
enum Layer<'a> {
    Base,
    Environment,
    File(&'a str),
    OptionalFile(&'a str),
}

impl<'a> Layer<'a> {
    fn from_layer(layer: &'a str) -> Result<Self, ConfigError> {
        if layer == "environment" {
            return Ok(Layer::Environment);
        }

        let invalid = |cause: &str| ConfigError::FileParse {
            uri: Some(layer.to_owned()),
            cause: cause.to_owned().into(),
        };

        let (schema, path) = layer.split_once("://").ok_or_else(|| invalid("Invalid config layer"))?;
        if path.is_empty() {
            return Err(invalid("Missing file path"));
        }
        match schema {
            "file" => Ok(Layer::File(path)),
            "file?" => Ok(Layer::OptionalFile(path)),
            schema => Err(invalid(&format!("Unsupported schema, {schema}"))),
        }
    }
}

impl CoreConfig {
    pub fn new(stage: &str, config_file: Option<PathBuf>) -> Result<Self, ConfigError> {
        log::info!("Loading configuration for {}", stage);

        let root_file = config_file.unwrap_or_else(|| PathBuf::from(format!("server_config.{}.json", stage)));
        let root_file_str = root_file.to_str().ok_or_else(|| ConfigError::FileParse {
            uri: None,
            cause: "Config path is not a valid utf-8 string".into(),
        })?;
        let mut builder = Config::builder().add_source(File::from(root_file.as_path()));

        let version_path = Path::new(DEFAULT_VERSION_CONFIG_FILE);
        if version_path.exists() {
            builder = builder.add_source(File::from(version_path));
        } else {
            log::warn!("No version file found at {}", version_path.display());
            builder = builder.set_override("version", "custom")?;
        }

        builder = builder
            .set_override("stage", stage)?
            .set_override("rootFile", root_file_str.to_string())?;

        let cfg: CoreConfig = builder.build()?.try_deserialize()?;

        log::debug!("pre-init configuration: {:#?}", cfg);
        Ok(cfg)
    }

    /// Create the builder of the full configuration. The layers are added in the order of
    /// `beforeLayers`, root file, `afterLayers`, later layers override the earlier ones.
    pub fn create_config_builder(&self) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
        log::debug!("Setting up configuration builder...");
        let mut builder = Config::builder();

        let mut layers = Vec::with_capacity(self.before_layers.len() + self.after_layers.len() + 1);
        for layer in &self.before_layers {
            layers.push(Layer::from_layer(layer)?);
        }
        layers.push(Layer::Base);
        for layer in &self.after_layers {
            layers.push(Layer::from_layer(layer)?);
        }

        for layer in layers {
            log::debug!("Adding layer: {:?}", layer);
            match layer {
                Layer::Base => {
                    builder = builder.add_source(File::from(Path::new(&self.root_file)));
                }
                Layer::Environment => {
                    builder = builder.add_source(Environment::new());
                }
                Layer::File(path) => {
                    builder = builder.add_source(File::from(Path::new(path)));
                }
                Layer::OptionalFile(path) => {
                    if Path::new(path).exists() {
                        log::info!("Adding optional config file {}...", path);
                        builder = builder.add_source(File::from(Path::new(path)));
                    }
                }
            }
        }

        // these properties cannot be altered wrt the core config
        builder = builder
            .set_override("stage", self.stage.clone())?
            .set_override("version", self.version.clone())?
            .set_override("rootFile", self.root_file.clone())?;

        Ok(builder)
    }
}
