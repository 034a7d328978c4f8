//! Command-line overrides shared by the biome tools.

use std::path::PathBuf;

use clap::Args;

use crate::Config;

/// Global command-line arguments.
///
/// CLI values override settings loaded from `config.ron`. Binaries embed
/// this with `#[command(flatten)]`.
#[derive(Args, Debug, Clone, Default, PartialEq)]
pub struct CliArgs {
    /// World seed for the reference heightmap.
    #[arg(long, global = true)]
    pub seed: Option<u64>,

    /// Nearest-neighbor grid resolution.
    #[arg(long, global = true)]
    pub resolution: Option<usize>,

    /// Normalized water level.
    #[arg(long, global = true)]
    pub water_level: Option<f32>,

    /// Log level (error, warn, info, debug, trace).
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Path to config directory (overrides default location).
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
}

impl Config {
    /// Apply CLI overrides to a loaded config.
    pub fn apply_cli_overrides(&mut self, args: &CliArgs) {
        if let Some(seed) = args.seed {
            self.heightmap.seed = seed;
        }
        if let Some(resolution) = args.resolution {
            self.generation.grid_resolution = resolution;
        }
        if let Some(level) = args.water_level {
            self.generation.water_level = level;
        }
        if let Some(ref level) = args.log_level {
            self.debug.log_level = level.clone();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[derive(Parser)]
    struct Harness {
        #[command(flatten)]
        args: CliArgs,
    }

    #[test]
    fn test_cli_override() {
        let mut config = Config::default();
        let args = CliArgs {
            seed: Some(7),
            water_level: Some(0.3),
            ..Default::default()
        };
        config.apply_cli_overrides(&args);
        assert_eq!(config.heightmap.seed, 7);
        assert_eq!(config.generation.water_level, 0.3);
        // Non-overridden fields retain defaults
        assert_eq!(config.generation.grid_resolution, 5);
        assert_eq!(config.debug.log_level, "info");
    }

    #[test]
    fn test_cli_no_override() {
        let mut config = Config::default();
        config.apply_cli_overrides(&CliArgs::default());
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_parse_flags() {
        let harness = Harness::try_parse_from([
            "nebula-biomes",
            "--resolution",
            "8",
            "--log-level",
            "debug",
            "--config",
            "/tmp/biomes",
        ])
        .unwrap();
        assert_eq!(harness.args.resolution, Some(8));
        assert_eq!(harness.args.log_level.as_deref(), Some("debug"));
        assert_eq!(harness.args.config, Some(PathBuf::from("/tmp/biomes")));
        assert_eq!(harness.args.seed, None);
    }
}
