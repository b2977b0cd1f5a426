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

use serde_json::Value;

use crate::errors::{GenerationError, GenerationResult};
use crate::graph::Module;

/// CV変調の深さ（パラメーター名で決定）
pub const CUTOFF_DEPTH: u32 = 200;
pub const FREQ_DEPTH: u32 = 5;
pub const DEFAULT_DEPTH: u32 = 1;

/// Modulation depth for a parameter name.
///
/// Case-insensitive substring match; `cutoff` is checked before `freq` so a
/// name like `cutoff_freq` gets the filter depth.
pub fn modulation_depth(param: &str) -> u32 {
    let name = param.to_lowercase();
    if name.contains("cutoff") {
        CUTOFF_DEPTH
    } else if name.contains("freq") {
        FREQ_DEPTH
    } else {
        DEFAULT_DEPTH
    }
}

/// 変調済みパラメーター式 - 常に非負
pub fn modulate(base: &str, modulator: &str, param: &str) -> String {
    format!("abs({} + {} * {})", base, modulator, modulation_depth(param))
}

/// Render a JSON parameter value as a Faust expression.
///
/// String values are spliced into products and differences, so a compound
/// expression comes back parenthesized.
pub fn render_value(module: &str, param: &str, value: &Value) -> GenerationResult<String> {
    match value {
        Value::Number(n) => Ok(n.to_string()),
        Value::String(s) if s.trim().is_empty() => {
            Err(GenerationError::invalid(module, param, "empty expression"))
        }
        Value::String(s) => Ok(group(s.trim())),
        Value::Bool(b) => Ok(if *b { "1" } else { "0" }.to_string()),
        Value::Null => Err(GenerationError::invalid(module, param, "null value")),
        Value::Array(_) => Err(GenerationError::invalid(module, param, "arrays cannot be rendered")),
        Value::Object(_) => Err(GenerationError::invalid(module, param, "objects cannot be rendered")),
    }
}

/// 式を1つのオペランドにまとめる
///
/// Names, numbers and calls such as `hslider(...)` are left alone; anything
/// with an operator outside parentheses or quotes is wrapped.
pub fn group(expression: &str) -> String {
    if is_operand(expression) {
        expression.to_string()
    } else {
        format!("({})", expression)
    }
}

fn is_operand(expression: &str) -> bool {
    let mut depth = 0i32;
    let mut quoted = false;
    for c in expression.chars() {
        match c {
            '"' => quoted = !quoted,
            _ if quoted => {}
            '(' => depth += 1,
            ')' => {
                depth -= 1;
                if depth < 0 {
                    return false;
                }
            }
            _ if depth > 0 => {}
            c if c.is_alphanumeric() || c == '_' || c == '.' => {}
            _ => return false,
        }
    }
    depth == 0 && !quoted
}

/// 必須パラメーターを取得
pub fn require_param(module: &Module, param: &str) -> GenerationResult<String> {
    match module.param(param) {
        Some(value) => render_value(&module.id, param, value),
        None => Err(GenerationError::missing(&module.id, param)),
    }
}

pub fn optional_param(module: &Module, param: &str) -> GenerationResult<Option<String>> {
    module
        .param(param)
        .map(|value| render_value(&module.id, param, value))
        .transpose()
}

/// Format a computed coefficient with at most six decimals.
pub fn format_number(value: f64) -> String {
    let text = format!("{:.6}", value);
    let text = text.trim_end_matches('0').trim_end_matches('.');
    match text {
        "" | "-0" => "0".to_string(),
        _ => text.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_depth_precedence() {
        assert_eq!(modulation_depth("cutoff"), 200);
        assert_eq!(modulation_depth("CutOff"), 200);
        assert_eq!(modulation_depth("cutoff_freq"), 200);
        assert_eq!(modulation_depth("freq"), 5);
        assert_eq!(modulation_depth("FREQUENCY"), 5);
        assert_eq!(modulation_depth("gain"), 1);
        assert_eq!(modulation_depth(""), 1);
    }

    #[test]
    fn test_modulate_is_abs_wrapped() {
        assert_eq!(modulate("1000", "lfo", "cutoff"), "abs(1000 + lfo * 200)");
        assert_eq!(modulate("440", "vib", "freq"), "abs(440 + vib * 5)");
        assert_eq!(modulate("0.5", "trem", "gain"), "abs(0.5 + trem * 1)");
    }

    #[test]
    fn test_render_value() {
        assert_eq!(render_value("m", "p", &Value::from(440)).unwrap(), "440");
        assert_eq!(render_value("m", "p", &Value::from(0.25)).unwrap(), "0.25");
        assert_eq!(render_value("m", "p", &Value::from("hslider(\"x\",1,0,2,0.1)")).unwrap(), "hslider(\"x\",1,0,2,0.1)");
        assert_eq!(render_value("m", "p", &Value::from(true)).unwrap(), "1");
        assert!(matches!(
            render_value("m", "p", &Value::Null),
            Err(GenerationError::InvalidParameter { .. })
        ));
        assert!(render_value("m", "p", &Value::from("  ")).is_err());
    }

    #[test]
    fn test_compound_strings_are_grouped() {
        assert_eq!(render_value("g", "gain", &Value::from("0.5 + lfo")).unwrap(), "(0.5 + lfo)");
        assert_eq!(render_value("p", "pan", &Value::from(" a*b ")).unwrap(), "(a*b)");
        assert_eq!(render_value("o", "wave", &Value::from("os.lf_squarewave")).unwrap(), "os.lf_squarewave");
        assert_eq!(group("(a) + (b)"), "((a) + (b))");
        assert_eq!(group("(a + b)"), "(a + b)");
        assert_eq!(group("-0.5"), "(-0.5)");
    }

    #[test]
    fn test_require_param() {
        let module = Module::new("f1", "lowpass").with_param("cutoff", 800);
        assert_eq!(require_param(&module, "cutoff").unwrap(), "800");
        assert_eq!(
            require_param(&module, "order"),
            Err(GenerationError::missing("f1", "order"))
        );
        assert_eq!(optional_param(&module, "order").unwrap(), None);
    }

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(0.75), "0.75");
        assert_eq!(format_number(1.0 - 0.7), "0.3");
        assert_eq!(format_number(1.0), "1");
        assert_eq!(format_number(0.0), "0");
        assert_eq!(format_number(0.1234567), "0.123457");
    }
}
