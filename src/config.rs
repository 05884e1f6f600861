// src/config.rs
use anyhow::{Context, Result};
use serde::Deserialize;
use std::{
    env, fs,
    path::{Path, PathBuf},
};
use tracing::{debug, warn};

use crate::{fares::RouteRequest, fetch::query::ApiParams};

pub const DEFAULT_SETTINGS_PATH: &str = "settings.json";
pub const DEFAULT_DATA_DIR: &str = "data";

/// Env var naming the settings file.
pub const SETTINGS_ENV: &str = "FARES_SETTINGS";
/// Env var overriding `data_dir` from the settings file.
pub const DATA_DIR_ENV: &str = "FARES_DATA_DIR";

/// Contents of `settings.json`.
///
/// Routes are given as three parallel lists; index `i` of each list makes up
/// route `i`.
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub from_airport: Vec<String>,
    pub to_airport: Vec<String>,
    pub num_months: Vec<u32>,
    #[serde(default)]
    pub api: ApiParams,
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
}

fn default_data_dir() -> PathBuf {
    PathBuf::from(DEFAULT_DATA_DIR)
}

impl Settings {
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path)
            .with_context(|| format!("reading settings file {}", path.display()))?;
        let settings: Settings = serde_json::from_str(&raw)
            .with_context(|| format!("parsing settings file {}", path.display()))?;
        debug!(path = %path.display(), routes = settings.from_airport.len(), "loaded settings");
        Ok(settings)
    }

    /// Load from `$FARES_SETTINGS` (or `settings.json`) and apply `$FARES_DATA_DIR`.
    pub fn from_env() -> Result<Self> {
        let path = env::var(SETTINGS_ENV).unwrap_or_else(|_| DEFAULT_SETTINGS_PATH.to_string());
        let data_dir = env::var_os(DATA_DIR_ENV).map(PathBuf::from);
        Ok(Self::load(path)?.with_data_dir(data_dir))
    }

    pub fn with_data_dir(mut self, data_dir: Option<PathBuf>) -> Self {
        if let Some(dir) = data_dir {
            self.data_dir = dir;
        }
        self
    }

    /// Zip the three lists into routes. Surplus entries of longer lists are
    /// dropped with a warning.
    pub fn routes(&self) -> Vec<RouteRequest> {
        let (n_from, n_to, n_months) = (
            self.from_airport.len(),
            self.to_airport.len(),
            self.num_months.len(),
        );
        if n_from != n_to || n_to != n_months {
            warn!(n_from, n_to, n_months, "route lists differ in length; extra entries ignored");
        }

        self.from_airport
            .iter()
            .zip(&self.to_airport)
            .zip(&self.num_months)
            .map(|((from, to), &months)| RouteRequest::new(from.as_str(), to.as_str(), months))
            .collect()
    }
}
