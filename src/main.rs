mod cli;

use std::path::Path;
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use cli::{log_level, Cli, Commands};
use orbital_faustgen::{write_source, GenerationError, Generator, GeneratorConfig, Patch, WaveformType};

struct Application {
    generator: Generator,
}

impl Application {
    fn new(config: GeneratorConfig) -> Self {
        Self {
            generator: Generator::new(config),
        }
    }

    fn with_strict(&mut self, strict: bool) {
        if strict {
            let mut config = self.generator.config().clone();
            config.strict_references = true;
            self.generator = Generator::new(config);
        }
    }

    fn generate(&self, patch_path: &Path) -> anyhow::Result<String> {
        let patch = Patch::load_from_file(patch_path)
            .with_context(|| format!("Failed to load patch {}", patch_path.display()))?;
        let program = self.generator.generate(&patch)?;
        Ok(program.to_source())
    }

    fn handle_command(&mut self, command: Commands) -> anyhow::Result<()> {
        match command {
            Commands::Generate { patch, output, strict } => {
                self.with_strict(strict);
                let source = self.generate(&patch)?;
                match output {
                    Some(path) => {
                        write_source(&path, &source)?;
                        println!("Generated {} from {}", path.display(), patch.display());
                    }
                    None => print!("{}", source),
                }
            }

            Commands::Check { patch, strict } => {
                self.with_strict(strict);
                let source = self.generate(&patch)?;
                println!("{}: OK ({} lines)", patch.display(), source.lines().count());
            }

            Commands::Waveforms => {
                println!("Waveforms:");
                for waveform in WaveformType::ALL {
                    println!("  {:<10} {}", waveform.name(), waveform.generator());
                }
                println!("Any other name is used as a raw Faust generator.");
            }
        }
        Ok(())
    }
}

fn exit_code(error: &anyhow::Error) -> u8 {
    error
        .downcast_ref::<GenerationError>()
        .map(|e| e.exit_code() as u8)
        .unwrap_or(1)
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let config = GeneratorConfig::discover(cli.config.as_deref()).context("Failed to load configuration")?;
    let mut app = Application::new(config);
    app.handle_command(cli.command)
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_max_level(log_level(cli.verbose))
        .with_writer(std::io::stderr)
        .init();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::from(exit_code(&e))
        }
    }
}
