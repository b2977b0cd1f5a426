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

//! Equal-power panner
//!
//! `pan` runs from 0 (hard left) to 1 (hard right). The two channel gains are
//! `sqrt(1 - pan)` and `sqrt(pan)`, so `l² + r²` stays at 1 and the perceived
//! loudness does not dip in the centre.

use crate::errors::GenerationResult;
use crate::graph::{Module, ResolvedConnections};
use crate::parameters::{format_number, require_param};
use crate::processing::EmitContext;

use super::{modulated_param, signal_input};

/// Left/right gain factors (the arguments of `sqrt`) for a pan position.
pub fn pan_factors(module: &Module, resolved: &ResolvedConnections) -> GenerationResult<(String, String)> {
    let modulated = !resolved.modulators(&module.id, "pan").is_empty();
    let literal = module.param("pan").and_then(|value| value.as_f64());

    match literal {
        Some(pan) if !modulated => {
            if !(0.0..=1.0).contains(&pan) {
                tracing::warn!("pan {} on '{}' is outside 0..1", pan, module.id);
            }
            Ok((format_number(1.0 - pan), format_number(pan)))
        }
        _ => {
            let base = require_param(module, "pan")?;
            let pan = modulated_param(module, resolved, "pan", base);
            Ok((format!("1 - {}", pan), pan))
        }
    }
}

pub fn emit(module: &Module, resolved: &ResolvedConnections, ctx: &mut EmitContext<'_>) -> GenerationResult<()> {
    let input = signal_input(module, resolved);
    let (left_factor, right_factor) = pan_factors(module, resolved)?;

    let left = format!("{}_l", module.id);
    let right = format!("{}_r", module.id);
    ctx.declare(&left, &format!("{} * sqrt({})", input, left_factor));
    ctx.declare(&right, &format!("{} * sqrt({})", input, right_factor));
    ctx.add_stereo_pair(left, right);
    Ok(())
}
