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

//! Output routing
//!
//! Collects everything sent to the reserved `left`, `right` and `output`
//! sinks and builds the trailing `process` statement.

use crate::errors::{GenerationError, GenerationResult};
use crate::graph::{Connection, Sink, Target};

use super::combine;

/// ステレオ出力バス
#[derive(Debug, Default, Clone, PartialEq)]
pub struct OutputBus {
    left: Vec<String>,
    right: Vec<String>,
    stereo_connections: usize,
    output_connections: usize,
}

impl OutputBus {
    /// Scan the sink connections. `left`/`right` and `output` are mutually
    /// exclusive.
    pub fn from_connections(connections: &[Connection]) -> GenerationResult<Self> {
        let mut bus = OutputBus::default();

        for connection in connections {
            let sink = match connection.target() {
                Target::Sink(sink) => sink,
                _ => continue,
            };
            match sink {
                Sink::Left => {
                    bus.stereo_connections += 1;
                    bus.left.push(connection.from.clone());
                }
                Sink::Right => {
                    bus.stereo_connections += 1;
                    bus.right.push(connection.from.clone());
                }
                Sink::Output => {
                    bus.output_connections += 1;
                    bus.left.push(connection.from.clone());
                    bus.right.push(connection.from.clone());
                }
            }
        }

        if bus.stereo_connections > 0 && bus.output_connections > 0 {
            return Err(GenerationError::InvalidRouting {
                stereo: bus.stereo_connections,
                output: bus.output_connections,
            });
        }
        Ok(bus)
    }

    pub fn is_routed(&self) -> bool {
        self.stereo_connections + self.output_connections > 0
    }

    /// Append pan-stage outputs after the sink connections.
    pub fn add_contributors(&mut self, left: &[String], right: &[String]) {
        self.left.extend_from_slice(left);
        self.right.extend_from_slice(right);
    }
}

/// `process` 文を組み立てる
///
/// Stereo when anything reached the bus (sink connections or pan stages).
/// Otherwise mono; an empty mono bus plays `fallback`, normally the last
/// declared module, and is silent when there is none.
pub fn route_output(bus: &OutputBus, fallback: Option<&str>) -> String {
    let stereo = bus.is_routed() || !bus.left.is_empty() || !bus.right.is_empty();

    if stereo {
        format!("process = {}, {};", combine(bus.left.as_slice()), combine(bus.right.as_slice()))
    } else {
        let mono = match fallback {
            Some(id) => id.to_string(),
            None => combine(bus.left.as_slice()),
        };
        format!("process = {};", mono)
    }
}
