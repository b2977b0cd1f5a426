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
use crate::parameters::require_param;
use crate::processing::EmitContext;

use super::combine;

pub const MIDI_GATE: &str = "button(\"gate[midi:on]\")";
pub const MANUAL_GATE: &str = "button(\"gate\")";

/// ゲート信号の解決: 入力接続 > MIDI > 手動ボタン
pub fn resolve_gate(module: &Module, resolved: &ResolvedConnections) -> String {
    let inputs = resolved.inputs(&module.id);
    if !inputs.is_empty() {
        combine(inputs)
    } else if module.flag("midi") {
        MIDI_GATE.to_string()
    } else {
        MANUAL_GATE.to_string()
    }
}

/// ADSR Envelope
///
/// Always two lines: `<id>_base` is the raw envelope and `<id>` the signal
/// other modules should read, velocity-scaled when requested.
pub fn emit(module: &Module, resolved: &ResolvedConnections, ctx: &mut EmitContext<'_>) -> GenerationResult<()> {
    let attack = require_param(module, "attack")?;
    let decay = require_param(module, "decay")?;
    let sustain = require_param(module, "sustain")?;
    let release = require_param(module, "release")?;
    let gate = resolve_gate(module, resolved);

    let base = format!("{}_base", module.id);
    ctx.declare(
        &base,
        &format!("en.adsr({}, {}, {}, {}, {})", attack, decay, sustain, release, gate),
    );

    let output = if module.flag("velocity") {
        format!("{} * {}", base, ctx.velocity())
    } else {
        base
    };
    ctx.declare(&module.id, &output);
    Ok(())
}
