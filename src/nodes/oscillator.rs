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

use std::collections::HashMap;

use lazy_static::lazy_static;

use crate::errors::GenerationResult;
use crate::graph::{Module, ResolvedConnections};
use crate::parameters::{optional_param, require_param};
use crate::processing::EmitContext;

use super::modulated_param;

/// Waveform used when a module has no `wave` param.
pub const DEFAULT_WAVEFORM: &str = "sine";
/// Pitch a MIDI-driven oscillator starts at when `freq` is absent.
pub const DEFAULT_MIDI_FREQ: &str = "440";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WaveformType {
    Sine,
    Sawtooth,
    Triangle,
    Square,
    Noise,
}

impl WaveformType {
    pub const ALL: [WaveformType; 5] = [
        WaveformType::Sine,
        WaveformType::Sawtooth,
        WaveformType::Triangle,
        WaveformType::Square,
        WaveformType::Noise,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            WaveformType::Sine => "sine",
            WaveformType::Sawtooth => "sawtooth",
            WaveformType::Triangle => "triangle",
            WaveformType::Square => "square",
            WaveformType::Noise => "noise",
        }
    }

    /// Faust generator for this waveform.
    pub fn generator(&self) -> &'static str {
        match self {
            WaveformType::Sine => "os.osc",
            WaveformType::Sawtooth => "os.sawtooth",
            WaveformType::Triangle => "os.triangle",
            WaveformType::Square => "os.square",
            WaveformType::Noise => "no.noise",
        }
    }
}

lazy_static! {
    static ref WAVEFORMS: HashMap<&'static str, WaveformType> = WaveformType::ALL
        .iter()
        .map(|waveform| (waveform.name(), *waveform))
        .collect();
}

/// 波形名をジェネレーターに変換
///
/// Unknown names are returned unchanged so a raw Faust generator can be
/// written straight into the patch.
pub fn resolve_waveform(name: &str) -> String {
    match WAVEFORMS.get(name.to_lowercase().as_str()) {
        Some(waveform) => waveform.generator().to_string(),
        None => {
            tracing::warn!("unknown waveform '{}', using it as a raw generator", name);
            name.to_string()
        }
    }
}

/// Oscillator Node
pub fn emit(module: &Module, resolved: &ResolvedConnections, ctx: &mut EmitContext<'_>) -> GenerationResult<()> {
    let wave = optional_param(module, "wave")?.unwrap_or_else(|| DEFAULT_WAVEFORM.to_string());
    let generator = resolve_waveform(&wave);

    // ノイズにはピッチがない
    let signal = if generator == WaveformType::Noise.generator() {
        generator
    } else {
        let frequency = if module.flag("midi") {
            let initial = optional_param(module, "freq")?.unwrap_or_else(|| DEFAULT_MIDI_FREQ.to_string());
            format!("hslider(\"freq[midi:note]\", {}, 20, 20000, 0.01)", initial)
        } else {
            require_param(module, "freq")?
        };
        let frequency = modulated_param(module, resolved, "freq", frequency);
        format!("{}({})", generator, frequency)
    };

    let expression = if module.flag("velocity") {
        format!("{} * {}", signal, ctx.velocity())
    } else {
        signal
    };
    ctx.declare(&module.id, &expression);
    Ok(())
}
