// Copyright 2025 Fernando Borretti
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use std::fs::create_dir_all;
use std::fs::read_to_string;
use std::fs::write;
use std::path::Path;
use std::path::PathBuf;

use serde::Deserialize;
use serde::Serialize;

use crate::error::ErrorReport;
use crate::error::Fallible;
use crate::error::fail;
use crate::fsrs::DEFAULT_MAXIMUM_INTERVAL;
use crate::fsrs::DEFAULT_REQUEST_RETENTION;
use crate::fsrs::DEFAULT_WEIGHTS;
use crate::fsrs::Parameters;
use crate::fsrs::Weights;

/// The user's configuration, stored as TOML.
#[derive(Serialize, Deserialize, Default, Debug, PartialEq)]
pub struct Config {
    pub wiki_path: Option<PathBuf>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scheduler: Option<SchedulerConfig>,
}

/// Optional overrides for the scheduler parameters.
#[derive(Serialize, Deserialize, Default, Debug, PartialEq)]
pub struct SchedulerConfig {
    pub request_retention: Option<f64>,
    pub maximum_interval: Option<u32>,
    pub weights: Option<Vec<f64>>,
}

impl Config {
    /// `~/.config/recall/config.toml`, or the platform equivalent.
    pub fn default_path() -> Fallible<PathBuf> {
        let dir = dirs::config_dir()
            .ok_or_else(|| ErrorReport::new("unable to determine configuration directory"))?;
        Ok(dir.join("recall").join("config.toml"))
    }

    /// Load the configuration. A missing file is an empty configuration.
    pub fn load(path: &Path) -> Fallible<Self> {
        if !path.exists() {
            log::debug!("No configuration at {}.", path.display());
            return Ok(Self::default());
        }
        let content = read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    pub fn save(&self, path: &Path) -> Fallible<()> {
        if let Some(dir) = path.parent() {
            create_dir_all(dir)?;
        }
        let content = toml::to_string_pretty(self)?;
        write(path, content)?;
        Ok(())
    }

    pub fn wiki_path(&self) -> Fallible<PathBuf> {
        match &self.wiki_path {
            Some(path) => Ok(path.clone()),
            None => fail("wiki path not configured. Run: recall init <path>"),
        }
    }

    /// Build the scheduler parameters, applying any overrides.
    pub fn parameters(&self) -> Fallible<Parameters> {
        let Some(scheduler) = &self.scheduler else {
            return Ok(Parameters::default());
        };
        let weights = match &scheduler.weights {
            Some(values) => Weights::from_slice(values)?,
            None => DEFAULT_WEIGHTS,
        };
        Parameters::new(
            scheduler
                .request_retention
                .unwrap_or(DEFAULT_REQUEST_RETENTION),
            scheduler.maximum_interval.unwrap_or(DEFAULT_MAXIMUM_INTERVAL),
            weights,
        )
    }
}

/// Expand a leading `~` to the user's home directory.
pub fn expand_home(path: &str) -> PathBuf {
    if let Some(rest) = path.strip_prefix('~') {
        if let Some(home) = dirs::home_dir() {
            return home.join(rest.trim_start_matches('/'));
        }
    }
    PathBuf::from(path)
}
