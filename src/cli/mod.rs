use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "orbital-faustgen")]
#[command(about = "Generate Faust source from a modular synthesizer patch")]
pub struct Cli {
    /// Configuration file (defaults to the user config when present)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Generate a .dsp file from a patch
    Generate {
        /// Patch file (JSON)
        patch: PathBuf,
        /// Output file; stdout when omitted
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Reject connections that name unknown modules
        #[arg(long)]
        strict: bool,
    },
    /// Run generation and report, without writing anything
    Check {
        /// Patch file (JSON)
        patch: PathBuf,
        /// Reject connections that name unknown modules
        #[arg(long)]
        strict: bool,
    },
    /// List oscillator waveforms and their generators
    Waveforms,
}

pub fn log_level(verbose: u8) -> tracing::Level {
    match verbose {
        0 => tracing::Level::WARN,
        1 => tracing::Level::INFO,
        2 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    }
}
