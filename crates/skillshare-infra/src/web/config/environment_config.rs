use config::{ConfigError, Map, Source, Value, ValueKind};
use std::env;

pub const ENVIRONMENT_PREFIX: &str = "skillshare--";
pub const ENVIRONMENT_SEPARATOR: &str = "--";

/// Configuration source reading the `SKILLSHARE--` prefixed environment variables.
///
/// The sections of the key are separated by `--` and each section is converted from `SNAKE_CASE` into
/// `camelCase`, thus `SKILLSHARE--SERVICE--FULL_PROBLEM_RESPONSE` overrides `service.fullProblemResponse`.
/// All values are strings, the conversion is left for the deserialization.
#[derive(Debug, Clone, Default)]
pub struct Environment {
    prefix: Option<String>,
}

impl Environment {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a custom (lowercase) prefix instead of the default one.
    pub fn with_prefix<S: Into<String>>(prefix: S) -> Self {
        Self {
            prefix: Some(prefix.into().to_lowercase()),
        }
    }

    fn convert_key_case(key: &str) -> String {
        key.split('_')
            .enumerate()
            .map(|(i, s)| {
                if i == 0 {
                    s.to_lowercase()
                } else {
                    let mut chars = s.chars();
                    chars
                        .next()
                        .map(|c| c.to_uppercase().collect::<String>())
                        .unwrap_or_default()
                        + &chars.as_str().to_lowercase()
                }
            })
            .collect()
    }

    /// Map an environment variable name to a configuration key, None if the variable is not a configuration.
    pub fn config_key(&self, env_key: &str) -> Option<String> {
        let prefix = self.prefix.as_deref().unwrap_or(ENVIRONMENT_PREFIX);
        let key = env_key.to_lowercase();
        let key = key.strip_prefix(prefix)?;
        if key.is_empty() {
            return None;
        }

        Some(
            key.split(ENVIRONMENT_SEPARATOR)
                .map(Self::convert_key_case)
                .collect::<Vec<_>>()
                .join("."),
        )
    }
}

impl Source for Environment {
    fn clone_into_box(&self) -> Box<dyn Source + Send + Sync> {
        Box::new((*self).clone())
    }

    fn collect(&self) -> Result<Map<String, Value>, ConfigError> {
        let uri: String = "environment".into();

        let mut m = Map::new();
        for (env_key, value) in env::vars() {
            if let Some(key) = self.config_key(&env_key) {
                log::debug!("Reading env {} as {}...", env_key, key);
                m.insert(key, Value::new(Some(&uri), ValueKind::String(value)));
            }
        }

        log::trace!("Environment: {:#?}", m);
        Ok(m)
    }
}
