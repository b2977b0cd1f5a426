pub mod config;
pub mod errors;
pub mod graph;
pub mod loading;
pub mod nodes;
pub mod parameters;
pub mod pipeline;
pub mod processing;

pub use config::{ConfigError, GeneratorConfig};
pub use errors::{GenerationError, GenerationResult};
pub use graph::{Connection, Module, Patch, ResolvedConnections, Sink};
pub use loading::{write_source, LoadError};
pub use nodes::{combine, resolve_waveform, ModuleKind, WaveformType};
pub use parameters::modulate;
pub use pipeline::{generate, Generator};
pub use processing::GeneratedProgram;
