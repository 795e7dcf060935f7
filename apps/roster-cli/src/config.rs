//! Layered application configuration.
//!
//! Precedence, lowest first: built-in defaults, the YAML file given with
//! `--config`, `ROSTER__*` environment variables (`__` separates nesting
//! levels), command-line overrides.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use figment::Figment;
use figment::providers::{Env, Format, Serialized, Yaml};
use serde::{Deserialize, Serialize};
use student_records::StudentRecordsConfig;

use crate::logging::LoggingConfig;

pub const ENV_PREFIX: &str = "ROSTER__";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    pub logging: LoggingConfig,
    pub records: StudentRecordsConfig,
    pub data: DataConfig,
}

/// Where the data snapshot comes from.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DataConfig {
    /// JSON document with `student_records` and `upcoming_quizzes` arrays.
    /// Relative paths resolve against the configuration file's directory.
    pub snapshot: Option<PathBuf>,
}

impl AppConfig {
    /// Merge defaults, `path` (if any) and the environment.
    ///
    /// # Errors
    /// Returns an error if the file does not exist or any layer fails to
    /// deserialize.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));
        if let Some(path) = path {
            if !path.is_file() {
                anyhow::bail!("config file does not exist: {}", path.display());
            }
            figment = figment.merge(Yaml::file(path));
        }
        figment = figment.merge(Env::prefixed(ENV_PREFIX).split("__"));

        let mut config: Self = figment
            .extract()
            .context("failed to load configuration")?;

        if let Some(dir) = path.and_then(Path::parent)
            && let Some(relative) = config.data.snapshot.take_if(|p| p.is_relative())
        {
            config.data.snapshot = Some(dir.join(relative));
        }
        Ok(config)
    }

    /// # Errors
    /// Returns an error if serialization fails.
    pub fn to_yaml(&self) -> Result<String> {
        serde_saphyr::to_string(self).context("failed to render configuration")
    }
}
