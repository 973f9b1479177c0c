use serde::{Deserialize, Serialize};
use std::{
    fs::{self, File},
    io::Write,
    path::{Path, PathBuf},
};
use tracing::debug;

use crate::{
    errors::FinanceError,
    simulation::ProjectionSettings,
    utils::{config_file_in, ensure_dir},
};

const TMP_SUFFIX: &str = "tmp";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub currency: String,
    /// Storage slot the CLI reads and writes.
    pub storage_slot: String,
    pub backup_retention: usize,
    pub projection: ProjectionSettings,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            currency: "USD".into(),
            storage_slot: "financeData".into(),
            backup_retention: 5,
            projection: ProjectionSettings::default(),
        }
    }
}

impl Config {
    pub fn validate(&self) -> Result<(), FinanceError> {
        if self.storage_slot.trim().is_empty() {
            return Err(FinanceError::Config("storage_slot must not be empty".into()));
        }
        if self.currency.trim().is_empty() {
            return Err(FinanceError::Config("currency must not be empty".into()));
        }
        self.projection
            .validate()
            .map_err(|err| FinanceError::Config(err.to_string()))
    }
}

pub struct ConfigManager {
    base: PathBuf,
    path: PathBuf,
}

impl ConfigManager {
    pub fn with_base_dir(base: PathBuf) -> Result<Self, FinanceError> {
        ensure_dir(&base)?;
        Ok(Self {
            path: config_file_in(&base),
            base,
        })
    }

    /// Reads the config file, or returns defaults when none exists.
    pub fn load(&self) -> Result<Config, FinanceError> {
        if !self.path.exists() {
            debug!(path = %self.path.display(), "no config file, using defaults");
            return Ok(Config::default());
        }
        let data = fs::read_to_string(&self.path)?;
        let config: Config = serde_json::from_str(&data)
            .map_err(|err| FinanceError::Config(format!("{}: {err}", self.path.display())))?;
        config.validate()?;
        Ok(config)
    }

    pub fn save(&self, config: &Config) -> Result<(), FinanceError> {
        config.validate()?;
        let json = serde_json::to_string_pretty(config)?;
        let tmp = self.path.with_extension(format!("json.{TMP_SUFFIX}"));
        let mut file = File::create(&tmp)?;
        file.write_all(json.as_bytes())?;
        file.flush()?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn base_dir(&self) -> &Path {
        &self.base
    }
}
