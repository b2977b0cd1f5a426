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

pub mod envelope;
pub mod filter;
pub mod gain;
pub mod mixer;
pub mod oscillator;
pub mod output;
pub mod pan;

pub use filter::FilterType;
pub use mixer::combine;
pub use oscillator::{resolve_waveform, WaveformType};
pub use output::{route_output, OutputBus};

use std::collections::HashMap;
use std::fmt;

use crate::errors::{GenerationError, GenerationResult};
use crate::graph::{Module, ResolvedConnections, Sink, PARAM_SEPARATOR};
use crate::parameters::{modulate, require_param};
use crate::processing::{EmitContext, VELOCITY};

/// Names the generated program defines itself.
pub const RESERVED_NAMES: [&str; 2] = [VELOCITY, "process"];

/// モジュールタイプ
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModuleKind {
    Oscillator,
    Lowpass,
    Highpass,
    Gain,
    Pan,
    Mixer,
    Adsr,
}

impl ModuleKind {
    pub const ALL: [ModuleKind; 7] = [
        ModuleKind::Oscillator,
        ModuleKind::Lowpass,
        ModuleKind::Highpass,
        ModuleKind::Gain,
        ModuleKind::Pan,
        ModuleKind::Mixer,
        ModuleKind::Adsr,
    ];

    pub fn parse(kind: &str) -> Option<Self> {
        match kind {
            "oscillator" => Some(ModuleKind::Oscillator),
            "lowpass" => Some(ModuleKind::Lowpass),
            "highpass" => Some(ModuleKind::Highpass),
            "gain" => Some(ModuleKind::Gain),
            "pan" => Some(ModuleKind::Pan),
            "mixer" => Some(ModuleKind::Mixer),
            "adsr" => Some(ModuleKind::Adsr),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ModuleKind::Oscillator => "oscillator",
            ModuleKind::Lowpass => "lowpass",
            ModuleKind::Highpass => "highpass",
            ModuleKind::Gain => "gain",
            ModuleKind::Pan => "pan",
            ModuleKind::Mixer => "mixer",
            ModuleKind::Adsr => "adsr",
        }
    }

    /// Parameters the template always needs.
    ///
    /// The oscillator's `freq` is conditional (not needed for noise or MIDI
    /// pitch) and is checked by its emitter.
    pub fn required_params(&self) -> &'static [&'static str] {
        match self {
            ModuleKind::Oscillator | ModuleKind::Mixer => &[],
            ModuleKind::Lowpass | ModuleKind::Highpass => &["cutoff"],
            ModuleKind::Gain => &["gain"],
            ModuleKind::Pan => &["pan"],
            ModuleKind::Adsr => &["attack", "decay", "sustain", "release"],
        }
    }

    /// Parameters that accept modulation connections.
    pub fn modulatable_params(&self) -> &'static [&'static str] {
        match self {
            ModuleKind::Oscillator => &["freq"],
            ModuleKind::Lowpass | ModuleKind::Highpass => &["cutoff"],
            ModuleKind::Gain => &["gain"],
            ModuleKind::Pan => &["pan"],
            ModuleKind::Mixer | ModuleKind::Adsr => &[],
        }
    }

    /// Extra definitions the template emits besides `<id>` itself.
    pub fn generated_names(&self, id: &str) -> Vec<String> {
        match self {
            ModuleKind::Pan => vec![format!("{}_l", id), format!("{}_r", id)],
            ModuleKind::Adsr => vec![format!("{}_base", id)],
            _ => Vec::new(),
        }
    }
}

impl fmt::Display for ModuleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 定義名の衝突チェック
///
/// Every module id, plus the names its template generates, must be a fresh
/// definition in the program. Ids are also kept clear of sink names and the
/// parameter separator so connections stay unambiguous. Unknown kinds only
/// contribute their id; they fail later during emission.
pub fn check_declared_names(modules: &[Module]) -> GenerationResult<()> {
    let mut owners: HashMap<String, &str> = HashMap::new();

    for module in modules {
        let id = module.id.as_str();
        if id.is_empty() {
            return Err(GenerationError::invalid_id(id, "empty id"));
        }
        if id.contains(PARAM_SEPARATOR) {
            return Err(GenerationError::invalid_id(
                id,
                format!("'{}' separates module and parameter in connections", PARAM_SEPARATOR),
            ));
        }
        if Sink::parse(id).is_some() {
            return Err(GenerationError::invalid_id(id, "reserved output sink name"));
        }
        if RESERVED_NAMES.contains(&id) {
            return Err(GenerationError::invalid_id(id, "reserved by the generated program"));
        }
        owners.insert(module.id.clone(), id);
    }

    for module in modules {
        let kind = match ModuleKind::parse(&module.kind) {
            Some(kind) => kind,
            None => continue,
        };
        for name in kind.generated_names(&module.id) {
            if let Some(owner) = owners.get(name.as_str()) {
                return Err(GenerationError::invalid_id(
                    owner,
                    format!("collides with '{}' generated for {} '{}'", name, kind, module.id),
                ));
            }
            owners.insert(name, &module.id);
        }
    }
    Ok(())
}

/// 1モジュール分のソース行を生成
pub fn emit_module(
    module: &Module,
    resolved: &ResolvedConnections,
    ctx: &mut EmitContext<'_>,
) -> GenerationResult<()> {
    let kind = ModuleKind::parse(&module.kind)
        .ok_or_else(|| GenerationError::unknown_type(&module.id, &module.kind))?;

    for param in kind.required_params() {
        if module.param(param).is_none() {
            return Err(GenerationError::missing(&module.id, param));
        }
    }
    warn_ignored_modulations(kind, module, resolved);

    tracing::debug!(module = %module.id, kind = %kind, "emitting module");

    match kind {
        ModuleKind::Oscillator => oscillator::emit(module, resolved, ctx),
        ModuleKind::Lowpass => filter::emit(FilterType::Lowpass, module, resolved, ctx),
        ModuleKind::Highpass => filter::emit(FilterType::Highpass, module, resolved, ctx),
        ModuleKind::Gain => gain::emit(module, resolved, ctx),
        ModuleKind::Pan => pan::emit(module, resolved, ctx),
        ModuleKind::Mixer => mixer::emit(module, resolved, ctx),
        ModuleKind::Adsr => envelope::emit(module, resolved, ctx),
    }
}

/// Combined signal input of a module (`0` when nothing is connected).
pub(crate) fn signal_input(module: &Module, resolved: &ResolvedConnections) -> String {
    combine(resolved.inputs(&module.id))
}

/// Modulated form of `base` if anything modulates `param`, else `base`.
pub(crate) fn modulated_param(
    module: &Module,
    resolved: &ResolvedConnections,
    param: &str,
    base: String,
) -> String {
    let modulators = resolved.modulators(&module.id, param);
    if modulators.is_empty() {
        base
    } else {
        modulate(&base, &combine(modulators.as_slice()), param)
    }
}

/// Literal parameter value, replaced by its modulated form when modulated.
pub(crate) fn resolve_param(
    module: &Module,
    resolved: &ResolvedConnections,
    param: &str,
) -> GenerationResult<String> {
    let base = require_param(module, param)?;
    Ok(modulated_param(module, resolved, param, base))
}

fn warn_ignored_modulations(kind: ModuleKind, module: &Module, resolved: &ResolvedConnections) {
    for (param, source) in resolved.modulations(&module.id) {
        if !kind.modulatable_params().contains(&param.as_str()) {
            tracing::warn!(
                "modulation {} -> {}.{} ignored: {} does not modulate '{}'",
                source,
                module.id,
                param,
                kind,
                param
            );
        }
    }
}
