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

pub mod resolve;

use std::collections::{BTreeMap, HashSet};
use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::errors::{GenerationError, GenerationResult};

pub use resolve::{resolve_connections, ResolvedConnections};

/// Separator between a module id and a parameter name in a connection target.
pub const PARAM_SEPARATOR: char = '.';

/// 予約済みの出力先
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sink {
    Left,
    Right,
    Output,
}

impl Sink {
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "left" => Some(Sink::Left),
            "right" => Some(Sink::Right),
            "output" => Some(Sink::Output),
            _ => None,
        }
    }
}

/// Where a connection lands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target<'a> {
    /// The main signal input of a module.
    Module(&'a str),
    /// A named parameter of a module (`"<module>.<param>"`).
    Param { module: &'a str, param: &'a str },
    Sink(Sink),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Connection {
    pub from: String,
    pub to: String,
}

impl Connection {
    pub fn new(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
        }
    }

    pub fn target(&self) -> Target<'_> {
        if let Some(sink) = Sink::parse(&self.to) {
            return Target::Sink(sink);
        }
        match self.to.split_once(PARAM_SEPARATOR) {
            Some((module, param)) => Target::Param { module, param },
            None => Target::Module(&self.to),
        }
    }
}

impl fmt::Display for Connection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.from, self.to)
    }
}

/// パッチ内の1モジュール
///
/// Parameters sit flat beside `id` and `type` in the patch document. A nested
/// `"params"` object is merged in as well; flat keys win on conflict.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "ModuleRecord", into = "ModuleRecord")]
pub struct Module {
    pub id: String,
    pub kind: String,
    pub params: BTreeMap<String, Value>,
}

impl Module {
    pub fn new(id: impl Into<String>, kind: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            kind: kind.into(),
            params: BTreeMap::new(),
        }
    }

    pub fn with_param(mut self, name: &str, value: impl Into<Value>) -> Self {
        self.params.insert(name.to_string(), value.into());
        self
    }

    pub fn param(&self, name: &str) -> Option<&Value> {
        self.params.get(name)
    }

    /// `true`, or any non-zero number, enables a flag.
    pub fn flag(&self, name: &str) -> bool {
        match self.params.get(name) {
            Some(Value::Bool(b)) => *b,
            Some(Value::Number(n)) => n.as_f64().map(|v| v != 0.0).unwrap_or(false),
            _ => false,
        }
    }
}

#[derive(Serialize, Deserialize)]
struct ModuleRecord {
    id: String,
    #[serde(rename = "type")]
    kind: String,
    #[serde(flatten)]
    fields: BTreeMap<String, Value>,
}

impl From<ModuleRecord> for Module {
    fn from(record: ModuleRecord) -> Self {
        let mut params = BTreeMap::new();
        let mut flat = record.fields;

        if let Some(Value::Object(nested)) = flat.remove("params") {
            params.extend(nested);
        }
        params.extend(flat);

        Self {
            id: record.id,
            kind: record.kind,
            params,
        }
    }
}

impl From<Module> for ModuleRecord {
    fn from(module: Module) -> Self {
        Self {
            id: module.id,
            kind: module.kind,
            fields: module.params,
        }
    }
}

/// モジュールと接続から成るパッチ
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Patch {
    pub modules: Vec<Module>,
    #[serde(default)]
    pub connections: Vec<Connection>,
}

impl Patch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_module(&mut self, module: Module) -> &mut Self {
        self.modules.push(module);
        self
    }

    pub fn connect(&mut self, from: &str, to: &str) -> &mut Self {
        self.connections.push(Connection::new(from, to));
        self
    }

    pub fn check_unique_ids(&self) -> GenerationResult<()> {
        let mut seen = HashSet::new();
        for module in &self.modules {
            if !seen.insert(module.id.as_str()) {
                return Err(GenerationError::DuplicateModule {
                    module: module.id.clone(),
                });
            }
        }
        Ok(())
    }

    /// Referential integrity of every connection endpoint.
    pub fn validate_references(&self) -> GenerationResult<()> {
        let ids: HashSet<&str> = self.modules.iter().map(|m| m.id.as_str()).collect();
        let dangling = |reference: &str, connection: &Connection| GenerationError::UnknownReference {
            reference: reference.to_string(),
            connection: connection.to_string(),
        };

        for connection in &self.connections {
            if !ids.contains(connection.from.as_str()) {
                return Err(dangling(connection.from.as_str(), connection));
            }
            let module = match connection.target() {
                Target::Sink(_) => continue,
                Target::Module(module) => module,
                Target::Param { module, .. } => module,
            };
            if !ids.contains(module) {
                return Err(dangling(module, connection));
            }
        }
        Ok(())
    }
}
