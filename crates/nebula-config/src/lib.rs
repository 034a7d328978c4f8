//! Configuration for the biome tools.
//!
//! Settings persist to disk as RON and accept CLI overrides via clap. Every
//! section uses `#[serde(default)]`, so older or partial files keep loading.

mod cli;
mod config;
mod error;

pub use cli::CliArgs;
pub use config::{Config, DataConfig, DebugConfig, GenerationConfig, HeightmapConfig};
pub use error::ConfigError;
