use std::path::Path;

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

pub const DEFAULT_CONFIG_FILE: &str = "default_config.toml";
pub const LOCAL_CONFIG_FILE: &str = "config.toml";
pub const ENV_PREFIX: &str = "CLICKSTREAM";

#[derive(Debug, Deserialize, Clone)]
pub struct ClickstreamConfig {
    pub service: ServiceConfig,
    #[serde(default)]
    pub http: HttpConfig,
    pub dataset: DatasetConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServiceConfig {
    pub log_level: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct HttpConfig {
    pub host: String,
    pub port: u16,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 5000,
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatasetConfig {
    pub sources_path: String,
    pub targets_path: String,
}

impl DatasetConfig {
    /// Rebase relative dataset paths onto `dir`. Absolute paths are kept.
    pub fn relative_to(self, dir: &Path) -> Self {
        let rebase = |p: String| {
            if Path::new(&p).is_absolute() {
                p
            } else {
                dir.join(&p).to_string_lossy().into_owned()
            }
        };
        Self {
            sources_path: rebase(self.sources_path),
            targets_path: rebase(self.targets_path),
        }
    }
}

impl ClickstreamConfig {
    /// Load `default_config.toml` from `dir`, overlaid by an optional
    /// `config.toml` next to it and then by `CLICKSTREAM__*` env vars.
    /// Relative dataset paths are resolved against `dir`.
    pub fn load(dir: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let dir = dir.as_ref();
        let s = Config::builder()
            .add_source(File::from(dir.join(DEFAULT_CONFIG_FILE)))
            .add_source(File::from(dir.join(LOCAL_CONFIG_FILE)).required(false))
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;
        let mut config: Self = s.try_deserialize()?;
        config.dataset = config.dataset.relative_to(dir);
        Ok(config)
    }
}
