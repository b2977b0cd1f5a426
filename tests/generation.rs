use std::path::PathBuf;
use std::process::Command;

use orbital_faustgen::{generate, GenerationError, Generator, GeneratorConfig, Patch};
use tempfile::TempDir;

fn patch(json: &str) -> Patch {
    Patch::from_json_str(json).unwrap()
}

fn write_patch(dir: &TempDir, name: &str, json: &str) -> PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, json).unwrap();
    path
}

const SYNTH_VOICE: &str = r#"{
    "modules": [
        {"id": "osc", "type": "oscillator", "wave": "sawtooth", "midi": true, "velocity": true},
        {"id": "sub", "type": "oscillator", "wave": "square", "freq": 55},
        {"id": "lfo", "type": "oscillator", "wave": "sine", "freq": 0.5},
        {"id": "mix", "type": "mixer"},
        {"id": "vcf", "type": "lowpass", "cutoff": 1200},
        {"id": "env", "type": "adsr", "attack": 0.01, "decay": 0.3, "sustain": 0.5, "release": 0.8, "midi": true, "velocity": true},
        {"id": "vca", "type": "gain", "gain": 0.7},
        {"id": "pan", "type": "pan", "pan": 0.5}
    ],
    "connections": [
        {"from": "osc", "to": "mix"},
        {"from": "sub", "to": "mix"},
        {"from": "mix", "to": "vcf"},
        {"from": "lfo", "to": "vcf.cutoff"},
        {"from": "vcf", "to": "vca"},
        {"from": "env", "to": "vca.gain"},
        {"from": "vca", "to": "pan"}
    ]
}"#;

#[test]
fn scenario_a_single_oscillator() {
    let source = generate(&patch(
        r#"{"modules": [{"id": "o1", "type": "oscillator", "wave": "sine", "freq": 440}], "connections": []}"#,
    ))
    .unwrap();

    assert!(source.lines().any(|line| line == "o1 = os.osc(440);"));
    assert_eq!(source.lines().last(), Some("process = o1;"));
}

#[test]
fn scenario_b_two_sources_into_gain() {
    let source = generate(&patch(
        r#"{
            "modules": [
                {"id": "a", "type": "oscillator", "wave": "sine", "freq": 220},
                {"id": "b", "type": "oscillator", "wave": "triangle", "freq": 330},
                {"id": "g", "type": "gain", "gain": 0.5}
            ],
            "connections": [{"from": "a", "to": "g"}, {"from": "b", "to": "g"}]
        }"#,
    ))
    .unwrap();

    assert!(source.contains("g = ((a + b) / 2) * 0.5;"));
}

#[test]
fn scenario_c_pan_is_stereo() {
    let source = generate(&patch(
        r#"{
            "modules": [
                {"id": "o1", "type": "oscillator", "wave": "sine", "freq": 440},
                {"id": "p", "type": "pan", "pan": 0.25}
            ],
            "connections": [{"from": "o1", "to": "p"}]
        }"#,
    ))
    .unwrap();

    assert!(source.contains("p_l = o1 * sqrt(0.75);"));
    assert!(source.contains("p_r = o1 * sqrt(0.25);"));
    assert_eq!(source.lines().last(), Some("process = p_l, p_r;"));
}

#[test]
fn scenario_d_left_and_output_conflict() {
    let result = generate(&patch(
        r#"{
            "modules": [{"id": "o1", "type": "oscillator", "wave": "sine", "freq": 440}],
            "connections": [{"from": "o1", "to": "left"}, {"from": "o1", "to": "output"}]
        }"#,
    ));
    assert_eq!(result, Err(GenerationError::InvalidRouting { stereo: 1, output: 1 }));
}

#[test]
fn unknown_module_type_produces_no_text() {
    let result = generate(&patch(
        r#"{"modules": [
            {"id": "o1", "type": "oscillator", "freq": 440},
            {"id": "v", "type": "vocoder"}
        ]}"#,
    ));
    assert_eq!(
        result,
        Err(GenerationError::UnknownModuleType { module: "v".into(), kind: "vocoder".into() })
    );
}

#[test]
fn full_voice_program() {
    let source = generate(&patch(SYNTH_VOICE)).unwrap();
    let expected = [
        "import(\"stdlib.lib\");",
        "velocity = hslider(\"velocity[midi:vel]\", 1, 0, 1, 0.01);",
        "osc = os.sawtooth(hslider(\"freq[midi:note]\", 440, 20, 20000, 0.01)) * velocity;",
        "sub = os.square(55);",
        "lfo = os.osc(0.5);",
        "mix = ((osc + sub) / 2);",
        "vcf = mix : fi.lowpass(2, abs(1200 + lfo * 200));",
        "env_base = en.adsr(0.01, 0.3, 0.5, 0.8, button(\"gate[midi:on]\"));",
        "env = env_base * velocity;",
        "vca = vcf * abs(0.7 + env * 1);",
        "pan_l = vca * sqrt(0.5);",
        "pan_r = vca * sqrt(0.5);",
        "process = pan_l, pan_r;",
    ];
    assert_eq!(source.lines().collect::<Vec<_>>(), expected);
}

#[test]
fn generation_is_deterministic() {
    let voice = patch(SYNTH_VOICE);
    let first = generate(&voice).unwrap();
    for _ in 0..10 {
        assert_eq!(generate(&voice).unwrap(), first);
    }
}

#[test]
fn velocity_declared_exactly_once() {
    let source = generate(&patch(SYNTH_VOICE)).unwrap();
    let declarations = source.lines().filter(|line| line.starts_with("velocity = ")).count();
    assert_eq!(declarations, 1);

    let declared_at = source.lines().position(|line| line.starts_with("velocity = ")).unwrap();
    let first_use = source.lines().position(|line| line.contains("* velocity")).unwrap();
    assert!(declared_at < first_use);
}

#[test]
fn missing_parameter_aborts() {
    let result = generate(&patch(
        r#"{"modules": [{"id": "hp", "type": "highpass"}], "connections": []}"#,
    ));
    assert_eq!(
        result,
        Err(GenerationError::MissingParameter { module: "hp".into(), param: "cutoff".into() })
    );
}

#[test]
fn string_expressions_keep_their_grouping() {
    let source = generate(&patch(
        r#"{
            "modules": [
                {"id": "o1", "type": "oscillator", "freq": 440},
                {"id": "lfo", "type": "oscillator", "freq": 2},
                {"id": "g", "type": "gain", "gain": "0.5 + lfo"},
                {"id": "p", "type": "pan", "pan": "0.3 + lfo"}
            ],
            "connections": [{"from": "o1", "to": "g"}, {"from": "g", "to": "p"}]
        }"#,
    ))
    .unwrap();

    assert!(source.contains("g = o1 * (0.5 + lfo);"));
    assert!(source.contains("p_l = g * sqrt(1 - (0.3 + lfo));"));
    assert!(source.contains("p_r = g * sqrt((0.3 + lfo));"));
}

#[test]
fn module_named_velocity_is_rejected() {
    let result = generate(&patch(
        r#"{
            "modules": [
                {"id": "o1", "type": "oscillator", "freq": 440, "velocity": true},
                {"id": "velocity", "type": "oscillator", "freq": 5}
            ]
        }"#,
    ));
    assert!(matches!(
        result,
        Err(GenerationError::InvalidModuleId { ref module, .. }) if module == "velocity"
    ));
}

#[test]
fn module_shadowing_pan_channel_is_rejected() {
    let result = generate(&patch(
        r#"{
            "modules": [
                {"id": "o1", "type": "oscillator", "freq": 440},
                {"id": "p", "type": "pan", "pan": 0.5},
                {"id": "p_l", "type": "mixer"}
            ],
            "connections": [{"from": "o1", "to": "p"}]
        }"#,
    ));
    assert!(matches!(
        result,
        Err(GenerationError::InvalidModuleId { ref module, .. }) if module == "p_l"
    ));
}

#[test]
fn output_sink_duplicates_to_both_channels() {
    let source = generate(&patch(
        r#"{
            "modules": [
                {"id": "a", "type": "oscillator", "freq": 100},
                {"id": "b", "type": "oscillator", "freq": 200}
            ],
            "connections": [{"from": "a", "to": "output"}, {"from": "b", "to": "output"}]
        }"#,
    ))
    .unwrap();
    assert_eq!(source.lines().last(), Some("process = ((a + b) / 2), ((a + b) / 2);"));
}

#[test]
fn strict_mode_from_config_file() {
    let dir = tempfile::tempdir().unwrap();
    let config_path = dir.path().join("config.toml");
    std::fs::write(&config_path, "strict_references = true\nfilter_order = 4\n").unwrap();
    let config = GeneratorConfig::discover(Some(config_path.as_path())).unwrap();
    let generator = Generator::new(config);

    let dangling = patch(
        r#"{"modules": [{"id": "f", "type": "lowpass", "cutoff": 500}], "connections": [{"from": "o9", "to": "f"}]}"#,
    );
    assert!(matches!(
        generator.generate(&dangling),
        Err(GenerationError::UnknownReference { .. })
    ));

    let fine = patch(r#"{"modules": [{"id": "f", "type": "lowpass", "cutoff": 500}]}"#);
    let program = generator.generate(&fine).unwrap();
    assert_eq!(program.lines()[1], "f = 0 : fi.lowpass(4, 500);");
}

#[test]
fn cli_writes_generated_file() {
    let dir = tempfile::tempdir().unwrap();
    let patch_path = write_patch(&dir, "voice.json", SYNTH_VOICE);
    let out_path = dir.path().join("voice.dsp");

    let status = Command::new(env!("CARGO_BIN_EXE_orbital-faustgen"))
        .arg("generate")
        .arg(&patch_path)
        .arg("-o")
        .arg(&out_path)
        .status()
        .unwrap();
    assert!(status.success());

    let written = std::fs::read_to_string(&out_path).unwrap();
    assert_eq!(written, generate(&patch(SYNTH_VOICE)).unwrap());
}

#[test]
fn cli_reports_routing_error_with_exit_code() {
    let dir = tempfile::tempdir().unwrap();
    let patch_path = write_patch(
        &dir,
        "bad.json",
        r#"{"modules": [{"id": "o", "type": "oscillator", "freq": 1}],
            "connections": [{"from": "o", "to": "right"}, {"from": "o", "to": "output"}]}"#,
    );
    let out_path = dir.path().join("bad.dsp");

    let output = Command::new(env!("CARGO_BIN_EXE_orbital-faustgen"))
        .arg("generate")
        .arg(&patch_path)
        .arg("-o")
        .arg(&out_path)
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(4));
    assert!(String::from_utf8_lossy(&output.stderr).contains("output"));
    assert!(!out_path.exists());
}

#[test]
fn cli_rejects_malformed_json() {
    let dir = tempfile::tempdir().unwrap();
    let patch_path = write_patch(&dir, "broken.json", "{ not json");

    let output = Command::new(env!("CARGO_BIN_EXE_orbital-faustgen"))
        .arg("check")
        .arg(&patch_path)
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(1));
}
