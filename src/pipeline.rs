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

//! Generation pipeline
//!
//! One synchronous pass: validate, resolve connections, emit every module in
//! declaration order, then route the output. The first error aborts the pass
//! and nothing is returned but the error.

use crate::config::GeneratorConfig;
use crate::errors::GenerationResult;
use crate::graph::{resolve_connections, Patch};
use crate::nodes::{check_declared_names, emit_module, route_output, OutputBus};
use crate::processing::{EmitContext, GeneratedProgram};

/// Faustコードジェネレーター
#[derive(Debug, Clone, Default)]
pub struct Generator {
    config: GeneratorConfig,
}

impl Generator {
    pub fn new(config: GeneratorConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    pub fn generate(&self, patch: &Patch) -> GenerationResult<GeneratedProgram> {
        patch.check_unique_ids()?;
        check_declared_names(&patch.modules)?;
        if self.config.strict_references {
            patch.validate_references()?;
        }
        let mut bus = OutputBus::from_connections(&patch.connections)?;

        let resolved = resolve_connections(&patch.connections);
        let mut ctx = EmitContext::new(&self.config);
        for module in &patch.modules {
            emit_module(module, &resolved, &mut ctx)?;
        }

        let (left, right) = ctx.stereo_contributors();
        bus.add_contributors(left, right);
        let fallback = patch.modules.last().map(|module| module.id.as_str());
        let process = route_output(&bus, fallback);

        let program = ctx.finish(process);
        tracing::info!(
            modules = patch.modules.len(),
            connections = patch.connections.len(),
            lines = program.lines().len(),
            "generated Faust program"
        );
        Ok(program)
    }
}

/// Generate with the default configuration.
pub fn generate(patch: &Patch) -> GenerationResult<String> {
    Generator::default().generate(patch).map(|program| program.to_source())
}
