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

//! Patch file loading and generated source output.

use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::graph::Patch;

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("Failed to read file {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse patch JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Failed to write file {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl Patch {
    pub fn from_json_str(json: &str) -> Result<Self, LoadError> {
        Ok(serde_json::from_str(json)?)
    }

    /// パッチファイルを読み込む
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, LoadError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| LoadError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let patch = Self::from_json_str(&json)?;
        tracing::debug!(
            "loaded {}: {} modules, {} connections",
            path.display(),
            patch.modules.len(),
            patch.connections.len()
        );
        Ok(patch)
    }
}

/// 生成したソースを書き出す
pub fn write_source<P: AsRef<Path>>(path: P, source: &str) -> Result<(), LoadError> {
    let path = path.as_ref();
    std::fs::write(path, source).map_err(|source| LoadError::Write {
        path: path.to_path_buf(),
        source,
    })
}
