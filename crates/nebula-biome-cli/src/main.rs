//! Command-line biome queries over the reference heightmap.
//!
//! Configuration is loaded from `config.ron` and can be overridden via CLI flags.
//! Run with `cargo run -p nebula-biome-cli -- point 120 -40`.

mod world;

use std::process::ExitCode;

use clap::{Parser, Subcommand};
use nebula_biome::{BiomeId, StructureKind};
use nebula_config::{CliArgs, Config};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::{error, info, warn};

use crate::world::World;

#[derive(Parser, Debug)]
#[command(name = "nebula-biomes", about = "Biome classification queries")]
struct Cli {
    #[command(flatten)]
    args: CliArgs,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug, PartialEq)]
enum Command {
    /// Biome at one coordinate.
    Point {
        #[arg(allow_negative_numbers = true)]
        x: i32,
        #[arg(allow_negative_numbers = true)]
        z: i32,
    },
    /// Distinct biomes in a square around a center.
    Area {
        #[arg(allow_negative_numbers = true)]
        x: i32,
        #[arg(allow_negative_numbers = true)]
        z: i32,
        /// Side length; the scan covers `center ± (size >> 2)`.
        #[arg(long, default_value_t = 64)]
        size: u32,
    },
    /// Random position whose biome is one of the named biomes.
    Find {
        #[arg(allow_negative_numbers = true)]
        x: i32,
        #[arg(allow_negative_numbers = true)]
        z: i32,
        /// Search range; the scan covers `center ± (range >> 2)`.
        #[arg(long, default_value_t = 256)]
        range: u32,
        /// Target biome names.
        #[arg(long = "biome", required = true)]
        biomes: Vec<String>,
        /// Seed for the position choice.
        #[arg(long, default_value_t = 0)]
        rng_seed: u64,
    },
    /// Whether any default biome allows a structure kind.
    Structure { kind: u32 },
    /// Surface blocks of the default biomes.
    Surface,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Resolve config directory
    let Some(config_dir) = cli
        .args
        .config
        .clone()
        .or_else(|| dirs::config_dir().map(|dir| dir.join("nebula-biome")))
    else {
        eprintln!("could not resolve a config directory, pass --config");
        return ExitCode::FAILURE;
    };

    let (mut config, config_error) = match Config::load_or_create(&config_dir) {
        Ok(config) => (config, None),
        Err(e) => (Config::default(), Some(e)),
    };
    config.apply_cli_overrides(&cli.args);

    let log_dir = config_dir.join("logs");
    nebula_log::init_logging(Some(&log_dir), cfg!(debug_assertions), Some(&config));
    if let Some(e) = config_error {
        warn!(error = %e, "failed to load config, using defaults");
    }

    let world = match world::build(&config) {
        Ok(world) => world,
        Err(e) => {
            error!(error = %e, "failed to build biome provider");
            return ExitCode::FAILURE;
        }
    };

    match run(&world, cli.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}

fn run(world: &World, command: Command) -> Result<(), String> {
    let registry = world.catalog();
    match command {
        Command::Point { x, z } => {
            println!("{}", registry.name(world.biome_at(x, z)));
        }
        Command::Area { x, z, size } => {
            let mut names: Vec<&str> = world
                .biomes_in_square(x, z, size)
                .into_iter()
                .map(|biome| registry.name(biome))
                .collect();
            names.sort_unstable();
            info!(count = names.len(), "distinct biomes in area");
            for name in names {
                println!("{name}");
            }
        }
        Command::Find {
            x,
            z,
            range,
            biomes,
            rng_seed,
        } => {
            let targets = biomes
                .iter()
                .map(|name| registry.require(name).map_err(|e| e.to_string()))
                .collect::<Result<Vec<BiomeId>, _>>()?;
            let mut rng = ChaCha8Rng::seed_from_u64(rng_seed);
            let outcome = world.find_biome_position(x, z, range, &targets, &mut rng);
            info!(matches = outcome.matches, "search finished");
            match outcome.position {
                Some(position) => println!("{} {}", position.x, position.z),
                None => return Err(format!("no matching biome within range {range}")),
            }
        }
        Command::Structure { kind } => {
            println!("{}", world.has_structure(StructureKind(kind)));
        }
        Command::Surface => {
            let mut blocks: Vec<u16> = world.surface_blocks().iter().map(|b| b.0).collect();
            blocks.sort_unstable();
            for block in blocks {
                println!("{block}");
            }
        }
    }
    Ok(())
}
