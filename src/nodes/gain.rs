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

use crate::errors::GenerationResult;
use crate::graph::{Module, ResolvedConnections};
use crate::processing::EmitContext;

use super::{resolve_param, signal_input};

/// VCA
pub fn emit(module: &Module, resolved: &ResolvedConnections, ctx: &mut EmitContext<'_>) -> GenerationResult<()> {
    let input = signal_input(module, resolved);
    let gain = resolve_param(module, resolved, "gain")?;

    let mut expression = format!("{} * {}", input, gain);
    if module.flag("velocity") {
        expression = format!("{} * {}", expression, ctx.velocity());
    }
    ctx.declare(&module.id, &expression);
    Ok(())
}
