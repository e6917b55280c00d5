// Copyright (C) 2024 Tristan Gerritsen <tristan@thewoosh.org>
// All Rights Reserved.

use std::{collections::BTreeMap, path::{Path, PathBuf}, time::Duration};

use serde::Deserialize;
use snek::Value;
use thiserror::Error;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
#[serde(rename_all = "kebab-case")]
pub struct ConfigRoot {
    pub log: ConfigSectionLog,
    pub run: ConfigSectionRun,

    /// Start variables of the program.
    pub variables: BTreeMap<String, toml::Value>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
#[serde(rename_all = "kebab-case")]
pub struct ConfigSectionLog {
    pub debug: bool,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
#[serde(rename_all = "kebab-case")]
pub struct ConfigSectionRun {
    pub step_delay_ms: u64,
    pub name: Option<String>,
}

impl Default for ConfigSectionRun {
    fn default() -> Self {
        Self {
            step_delay_ms: 16,
            name: None,
        }
    }
}

impl ConfigRoot {
    pub const FILE_NAME: &'static str = "snek.toml";

    pub fn parse(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|error| ConfigError::Io {
            path: path.to_path_buf(),
            error,
        })?;

        Self::parse(&text)
    }

    /// Loads the `snek.toml` next to the script, if there is one.
    pub fn discover(script: &Path) -> Result<Self, ConfigError> {
        let Some(path) = script.parent().map(|dir| dir.join(Self::FILE_NAME)) else {
            return Ok(Self::default());
        };

        if !path.is_file() {
            return Ok(Self::default());
        }

        Self::load(&path)
    }

    #[must_use]
    pub fn step_delay(&self) -> Duration {
        Duration::from_millis(self.run.step_delay_ms)
    }

    pub fn start_variables(&self) -> Result<Vec<(String, Value)>, ConfigError> {
        self.variables.iter()
            .map(|(name, value)| {
                let value = match value {
                    toml::Value::String(str) => Value::String(str.clone()),
                    toml::Value::Integer(int) => Value::Integer(*int),
                    toml::Value::Float(float) => Value::Float(*float),
                    toml::Value::Boolean(b) => Value::Bool(*b),
                    _ => return Err(ConfigError::UnsupportedVariable { name: name.clone() }),
                };

                Ok((name.clone(), value))
            })
            .collect()
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read {}: {error}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        error: std::io::Error,
    },

    #[error("invalid configuration: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("unsupported value for variable `{name}`, only strings, integers, floats and booleans are allowed")]
    UnsupportedVariable { name: String },
}
