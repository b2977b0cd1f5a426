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

use std::fmt;

use crate::config::GeneratorConfig;

/// Name of the shared velocity control.
pub const VELOCITY: &str = "velocity";

/// 共有ベロシティ制御の宣言
pub const VELOCITY_DECLARATION: &str =
    "velocity = hslider(\"velocity[midi:vel]\", 1, 0, 1, 0.01);";

/// コード生成のコンテキスト - 1回の生成でのみ有効
///
/// Holds everything module emission is allowed to mutate: the module lines,
/// the velocity singleton and the stereo contributors registered by pan
/// stages.
#[derive(Debug)]
pub struct EmitContext<'a> {
    pub config: &'a GeneratorConfig,
    lines: Vec<String>,
    velocity_declared: bool,
    stereo_left: Vec<String>,
    stereo_right: Vec<String>,
}

impl<'a> EmitContext<'a> {
    pub fn new(config: &'a GeneratorConfig) -> Self {
        Self {
            config,
            lines: Vec::new(),
            velocity_declared: false,
            stereo_left: Vec::new(),
            stereo_right: Vec::new(),
        }
    }

    /// Emit one `name = expr;` declaration.
    pub fn declare(&mut self, name: &str, expression: &str) {
        self.lines.push(format!("{} = {};", name, expression));
    }

    /// Request the shared velocity control; declared at most once.
    pub fn velocity(&mut self) -> &'static str {
        if !self.velocity_declared {
            tracing::debug!("declaring shared velocity control");
            self.velocity_declared = true;
        }
        VELOCITY
    }

    pub fn velocity_declared(&self) -> bool {
        self.velocity_declared
    }

    /// Register a left/right pair feeding the stereo bus.
    pub fn add_stereo_pair(&mut self, left: String, right: String) {
        self.stereo_left.push(left);
        self.stereo_right.push(right);
    }

    pub fn stereo_contributors(&self) -> (&[String], &[String]) {
        (&self.stereo_left, &self.stereo_right)
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Assemble the program: prelude, optional velocity, module lines, process.
    pub fn finish(self, process: String) -> GeneratedProgram {
        let mut lines = Vec::with_capacity(self.lines.len() + 3);
        lines.push(self.config.prelude.clone());
        if self.velocity_declared {
            lines.push(VELOCITY_DECLARATION.to_string());
        }
        lines.extend(self.lines);
        lines.push(process);
        GeneratedProgram { lines }
    }
}

/// 生成されたFaustプログラム
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedProgram {
    lines: Vec<String>,
}

impl GeneratedProgram {
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// The trailing `process` statement.
    pub fn process_statement(&self) -> &str {
        self.lines.last().map(|s| s.as_str()).unwrap_or_default()
    }

    pub fn to_source(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for GeneratedProgram {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for line in &self.lines {
            writeln!(f, "{}", line)?;
        }
        Ok(())
    }
}
