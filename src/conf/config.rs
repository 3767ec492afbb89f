use std::path::Path;

use crate::{
    conf::{AuthConfig, MediaConfig, ServerConfig},
    core::MediaError::{self, ConfigParsingError},
};
use config::{Config as CConfig, ConfigBuilder, Map, builder::DefaultState};
use serde::{Deserialize, Serialize};

const ENV_PREFIX: &str = "VM";

/// Flat variable names kept from earlier deployments, with the nested
/// variable each one stands for.
const LEGACY_ENV: [(&str, &str); 3] = [
    ("VM_ADMIN_TOKEN", "VM_AUTH__ADMIN_TOKEN"),
    ("VM_LOG_LEVEL", "VM_SERVER__LOG_LEVEL"),
    ("VM_PORT", "VM_SERVER__PORT"),
];

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub media: MediaConfig,
    #[serde(default)]
    pub auth: AuthConfig,
}

impl Config {
    pub fn from_str(toml_str: &str) -> Result<Config, MediaError> {
        Self::build(
            CConfig::builder()
                .add_source(config::File::from_str(toml_str, config::FileFormat::Toml)),
        )
    }

    /// Load from an optional TOML file, then apply `VM_*` environment
    /// overrides (`VM_SERVER__PORT=9000`, `VM_MEDIA__ROOT=/srv/media`).
    ///
    /// The flat names `VM_ADMIN_TOKEN`, `VM_LOG_LEVEL` and `VM_PORT` are also
    /// accepted; the nested form wins when both are set. Other `VM_*`
    /// variables without a `__` section separator are ignored.
    pub fn load(path: Option<&Path>) -> Result<Config, MediaError> {
        Self::load_with_env(path, std::env::vars())
    }

    pub fn load_with_env(
        path: Option<&Path>,
        vars: impl IntoIterator<Item = (String, String)>,
    ) -> Result<Config, MediaError> {
        let mut builder = CConfig::builder();
        if let Some(path) = path {
            builder = builder.add_source(config::File::from(path).required(true));
        }
        Self::build(
            builder.add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .list_separator(",")
                    .with_list_parse_key("media.sensitive_categories")
                    .try_parsing(true)
                    .source(Some(env_overrides(vars))),
            ),
        )
    }

    fn build(builder: ConfigBuilder<DefaultState>) -> Result<Config, MediaError> {
        let config = builder
            .build()
            .map_err(|e| ConfigParsingError(e.to_string()))?
            .try_deserialize::<Config>()
            .map_err(|e| ConfigParsingError(e.to_string()))?;
        Ok(config)
    }
}

/// Keep only sectioned `VM_*` variables and fold in the legacy flat names.
fn env_overrides(vars: impl IntoIterator<Item = (String, String)>) -> Map<String, String> {
    let mut nested = Map::new();
    let mut legacy = Vec::new();
    for (key, value) in vars {
        if let Some((_, target)) = LEGACY_ENV.iter().find(|(name, _)| *name == key) {
            legacy.push((target.to_string(), value));
            continue;
        }
        let sectioned = key
            .strip_prefix(ENV_PREFIX)
            .and_then(|rest| rest.strip_prefix('_'))
            .is_some_and(|rest| rest.contains("__"));
        if sectioned {
            nested.insert(key, value);
        }
    }
    for (target, value) in legacy {
        nested.entry(target).or_insert(value);
    }
    nested
}
