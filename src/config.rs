/*
 * OrbitalModulator - Professional Modular Synthesizer
 * Copyright (c) 2025 MACHIKO LAB
 *
 * This program is free software: you can redistribute it and/or modify
 * it under the terms of the GNU Affero General Public License as published by
 * the Free Software Foundation, either version 3 of the License, or
 * (at your option) any later version.
 *
 * This program is distributed in the hope that it will be useful,
 * but WITHOUT ANY WARRANTY; without even the implied warranty of
 * MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
 * GNU Affero General Public License for more details.
 *
 * You should have received a copy of the GNU Affero General Public License
 * along with this program. If not, see <https://www.gnu.org/licenses/>.
 */

//! Generator configuration
//!
//! Read from `config.toml`. Every key is optional:
//!
//! ```toml
//! prelude = 'import("stdlib.lib");'
//! filter_order = 2
//! strict_references = false
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const DEFAULT_PRELUDE: &str = "import(\"stdlib.lib\");";
pub const DEFAULT_FILTER_ORDER: u32 = 2;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config format: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid config value for '{key}': {reason}")]
    Invalid { key: &'static str, reason: String },
}

/// 生成設定
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// First line of every generated program.
    pub prelude: String,
    /// Filter order used when a filter module has no `order` param.
    pub filter_order: u32,
    /// Reject connections naming modules that do not exist.
    pub strict_references: bool,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            prelude: DEFAULT_PRELUDE.to_string(),
            filter_order: DEFAULT_FILTER_ORDER,
            strict_references: false,
        }
    }
}

impl GeneratorConfig {
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::load_from_str(&content)
    }

    pub fn load_from_str(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// ユーザー設定ファイルの場所
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("orbital-faustgen").join("config.toml"))
    }

    /// Explicit path if given, else the user config when it exists, else defaults.
    pub fn discover(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = explicit {
            return Self::load_from_file(path);
        }
        match Self::default_path() {
            Some(path) if path.is_file() => {
                tracing::debug!("using config {}", path.display());
                Self::load_from_file(path)
            }
            _ => Ok(Self::default()),
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.prelude.trim().is_empty() {
            return Err(ConfigError::Invalid {
                key: "prelude",
                reason: "must not be empty".to_string(),
            });
        }
        if self.filter_order == 0 {
            return Err(ConfigError::Invalid {
                key: "filter_order",
                reason: "must be at least 1".to_string(),
            });
        }
        Ok(())
    }
}
