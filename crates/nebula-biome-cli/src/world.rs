//! Builds a biome provider from the loaded configuration.

use nebula_biome::{
    BiomeProvider, BiomeRegistry, BiomeTables, CoastModifier, HeightmapParams, LoadError,
    ModifierChain, NoiseHeightmap,
};
use nebula_config::Config;
use tracing::{debug, info};

pub type World = BiomeProvider<NoiseHeightmap, BiomeRegistry>;

/// Loads the biome tables named by `config` and wires them to the reference
/// heightmap.
///
/// Configured table files that fail to load degrade to empty tables, leaving
/// only the fallback biome. Without configured files the bundled tables
/// apply.
pub fn build(config: &Config) -> Result<World, LoadError> {
    let generation = &config.generation;
    let mut registry = BiomeRegistry::new();

    let tables = match config.data.table_paths() {
        Some((data, groups)) => BiomeTables::load_or_empty(data, groups, &mut registry),
        None => {
            debug!("no biome table paths configured, using bundled tables");
            BiomeTables::builtin(&mut registry)?
        }
    };

    let fallback = registry.intern(&generation.fallback_biome)?;
    let mut modifiers = ModifierChain::new();
    if let Some(ref name) = generation.beach_biome {
        modifiers.push(CoastModifier {
            beach: registry.intern(name)?,
            water_level: generation.water_level,
            band: generation.beach_band,
        });
    }

    let assigner = tables
        .assigner(generation.grid_resolution, generation.water_level, fallback)
        .with_modifiers(modifiers);
    let heightmap = NoiseHeightmap::new(heightmap_params(config));

    info!(
        biomes = registry.len(),
        resolution = generation.grid_resolution,
        seed = config.heightmap.seed,
        "biome provider ready"
    );
    Ok(BiomeProvider::new(heightmap, assigner, registry))
}

fn heightmap_params(config: &Config) -> HeightmapParams {
    let cfg = &config.heightmap;
    HeightmapParams {
        seed: cfg.seed,
        octaves: cfg.octaves,
        base_frequency: cfg.base_frequency,
        climate_frequency: cfg.climate_frequency,
        water_level: config.generation.water_level,
        beach_band: config.generation.beach_band,
        ..Default::default()
    }
}
