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

use super::signal_input;

/// Silent signal used for an unconnected sink.
pub const SILENCE: &str = "0";

/// 複数の信号を1つに合成する
///
/// Two or more signals are averaged, in order, so converging signals cannot
/// clip: `((a + b + c) / 3)`. A single signal is returned untouched and an
/// empty list is silence.
pub fn combine<S: AsRef<str>>(expressions: &[S]) -> String {
    match expressions {
        [] => SILENCE.to_string(),
        [single] => single.as_ref().to_string(),
        _ => {
            let sum = expressions
                .iter()
                .map(|e| e.as_ref())
                .collect::<Vec<_>>()
                .join(" + ");
            format!("(({}) / {})", sum, expressions.len())
        }
    }
}

/// Mixer Node - 名前付きの合流点
pub fn emit(module: &Module, resolved: &ResolvedConnections, ctx: &mut EmitContext<'_>) -> GenerationResult<()> {
    let input = signal_input(module, resolved);
    ctx.declare(&module.id, &input);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GeneratorConfig;
    use crate::graph::{resolve_connections, Connection};

    #[test]
    fn test_combine_empty_is_silence() {
        assert_eq!(combine::<&str>(&[]), "0");
    }

    #[test]
    fn test_combine_single_is_unwrapped() {
        assert_eq!(combine(&["o1"]), "o1");
        assert_eq!(combine(&["((a + b) / 2)"]), "((a + b) / 2)");
    }

    #[test]
    fn test_combine_averages_in_order() {
        assert_eq!(combine(&["a", "b"]), "((a + b) / 2)");
        assert_eq!(combine(&["c", "a", "b"]), "((c + a + b) / 3)");
        let many: Vec<String> = (1..=5).map(|i| format!("o{}", i)).collect();
        assert_eq!(combine(many.as_slice()), "((o1 + o2 + o3 + o4 + o5) / 5)");
    }

    #[test]
    fn test_mixer_is_an_alias() {
        let config = GeneratorConfig::default();
        let mut ctx = EmitContext::new(&config);
        let module = Module::new("bus", "mixer");

        let resolved = resolve_connections(&[Connection::new("o1", "bus"), Connection::new("o2", "bus")]);
        emit(&module, &resolved, &mut ctx).unwrap();

        let resolved = resolve_connections(&[]);
        emit(&Module::new("empty", "mixer"), &resolved, &mut ctx).unwrap();

        assert_eq!(ctx.lines(), ["bus = ((o1 + o2) / 2);", "empty = 0;"]);
    }
}
