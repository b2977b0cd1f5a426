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
use crate::parameters::optional_param;
use crate::processing::EmitContext;

use super::{resolve_param, signal_input};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterType {
    Lowpass,
    Highpass,
}

impl FilterType {
    /// Faust library function.
    pub fn function(&self) -> &'static str {
        match self {
            FilterType::Lowpass => "fi.lowpass",
            FilterType::Highpass => "fi.highpass",
        }
    }
}

/// VCF - `<input> : fi.lowpass(<order>, <cutoff>)`
pub fn emit(
    filter_type: FilterType,
    module: &Module,
    resolved: &ResolvedConnections,
    ctx: &mut EmitContext<'_>,
) -> GenerationResult<()> {
    let input = signal_input(module, resolved);
    let cutoff = resolve_param(module, resolved, "cutoff")?;
    let order = optional_param(module, "order")?.unwrap_or_else(|| ctx.config.filter_order.to_string());

    let expression = format!("{} : {}({}, {})", input, filter_type.function(), order, cutoff);
    ctx.declare(&module.id, &expression);
    Ok(())
}
