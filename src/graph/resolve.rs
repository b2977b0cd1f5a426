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

//! Connection resolution
//!
//! Splits the raw connection list into ordinary signal inputs and parameter
//! modulations, keyed by target module. Reserved sinks are left to the
//! output router.

use std::collections::HashMap;

use super::{Connection, Target};

/// 接続解決結果 - 1回の生成でのみ有効
#[derive(Debug, Default)]
pub struct ResolvedConnections {
    inputs: HashMap<String, Vec<String>>,
    modulations: HashMap<String, Vec<(String, String)>>,
}

impl ResolvedConnections {
    /// Ordinary inputs of a module, in connection order.
    pub fn inputs(&self, module: &str) -> &[String] {
        self.inputs.get(module).map(|v| v.as_slice()).unwrap_or(&[])
    }

    /// All `(param, source)` modulations of a module, in connection order.
    pub fn modulations(&self, module: &str) -> &[(String, String)] {
        self.modulations.get(module).map(|v| v.as_slice()).unwrap_or(&[])
    }

    /// Sources modulating one parameter, in connection order.
    pub fn modulators(&self, module: &str, param: &str) -> Vec<String> {
        self.modulations(module)
            .iter()
            .filter(|(name, _)| name == param)
            .map(|(_, source)| source.clone())
            .collect()
    }
}

pub fn resolve_connections(connections: &[Connection]) -> ResolvedConnections {
    let mut resolved = ResolvedConnections::default();

    for connection in connections {
        match connection.target() {
            Target::Param { module, param } => {
                resolved
                    .modulations
                    .entry(module.to_string())
                    .or_default()
                    .push((param.to_string(), connection.from.clone()));
            }
            Target::Module(module) => {
                resolved
                    .inputs
                    .entry(module.to_string())
                    .or_default()
                    .push(connection.from.clone());
            }
            Target::Sink(_) => {}
        }
    }

    resolved
}
