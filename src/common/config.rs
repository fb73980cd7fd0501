// Copyright 2022 The summatrans Authors
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//     http://www.apache.org/licenses/LICENSE-2.0
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use crate::common::error::DemoError;
use crate::pipelines::demo::UnitErrorPolicy;
use crate::pipelines::splitting::SplitMode;
use crate::pipelines::summarization::SummarizerConfig;
use crate::pipelines::translation::TranslatorConfig;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use tch::Device;

/// # Utility to deserialize JSON config files
pub trait Config
where
    for<'de> Self: Deserialize<'de>,
{
    /// Loads a `Config` object from a JSON file. The format is expected to be aligned with the
    /// struct definition, missing fields falling back to their defaults where the struct allows.
    ///
    /// # Arguments
    ///
    /// * `path` - `Path` to the configuration JSON file.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use summatrans::common::config::AppConfig;
    /// use summatrans::Config;
    ///
    /// let config = AppConfig::from_file("path/to/config.json")?;
    /// # Ok::<(), summatrans::DemoError>(())
    /// ```
    fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, DemoError> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            DemoError::IOError(format!("could not open {}: {}", path.display(), e))
        })?;
        let br = BufReader::new(f);
        let config: Self = serde_json::from_reader(br)?;
        Ok(config)
    }
}

/// # Device selection for both models
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeviceSetting {
    /// CUDA when available, CPU otherwise
    #[default]
    Auto,
    Cpu,
    /// First CUDA device
    Cuda,
}

impl From<DeviceSetting> for Device {
    fn from(setting: DeviceSetting) -> Self {
        match setting {
            DeviceSetting::Auto => Device::cuda_if_available(),
            DeviceSetting::Cpu => Device::Cpu,
            DeviceSetting::Cuda => Device::Cuda(0),
        }
    }
}

/// # Web server settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Interface to bind to (default: 127.0.0.1)
    pub host: String,
    /// Port to bind to (default: 8080)
    pub port: u16,
    /// Number of HTTP workers (default: 1)
    pub workers: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 8080,
            workers: 1,
        }
    }
}

/// # Orchestration settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DemoConfig {
    /// Split mode preselected in the text box form (default: Paragraph)
    pub default_split_mode: SplitMode,
    /// Handling of units whose inference failed (default: drop)
    pub unit_error_policy: UnitErrorPolicy,
    /// JSON file holding the canned examples (default: resources/canned_text.json)
    pub canned_text_path: PathBuf,
}

impl Default for DemoConfig {
    fn default() -> Self {
        DemoConfig {
            default_split_mode: SplitMode::default(),
            unit_error_policy: UnitErrorPolicy::default(),
            canned_text_path: PathBuf::from("resources/canned_text.json"),
        }
    }
}

/// # Application configuration
/// Every section is optional in the JSON file, an empty object `{}` yields the defaults.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub device: DeviceSetting,
    pub summarizer: SummarizerConfig,
    pub translator: TranslatorConfig,
    pub demo: DemoConfig,
}

impl Config for AppConfig {}

impl AppConfig {
    /// Location of the user configuration file, `$XDG_CONFIG_HOME/summatrans/config.json` or the
    /// corresponding directory for the current system.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|mut path| {
            path.push("summatrans");
            path.push("config.json");
            path
        })
    }

    /// Loads the configuration from `path` if given, otherwise from the default location if that
    /// file exists, otherwise returns the default configuration.
    pub fn load(path: Option<&Path>) -> Result<AppConfig, DemoError> {
        match path {
            Some(path) => AppConfig::from_file(path),
            None => match AppConfig::default_path() {
                Some(default_path) if default_path.is_file() => {
                    AppConfig::from_file(default_path)
                }
                _ => Ok(AppConfig::default()),
            },
        }
    }
}
