//! Post-classification rewrite stages.
//!
//! A [`ModifierChain`] runs its stages in registration order, each stage
//! receiving the previous stage's output. The assigner only runs the chain
//! for land and river results.

use hashbrown::HashMap;

use crate::biome::BiomeId;
use crate::cell::{Cell, TerrainTag};

/// A single rewrite stage.
pub trait BiomeModifier: Send + Sync {
    /// Returns `biome` unchanged or a substitute for it.
    fn modify(&self, biome: BiomeId, cell: &Cell, x: i32, z: i32) -> BiomeId;
}

impl<F> BiomeModifier for F
where
    F: Fn(BiomeId, &Cell, i32, i32) -> BiomeId + Send + Sync,
{
    fn modify(&self, biome: BiomeId, cell: &Cell, x: i32, z: i32) -> BiomeId {
        self(biome, cell, x, z)
    }
}

/// Ordered list of rewrite stages.
#[derive(Default)]
pub struct ModifierChain {
    stages: Vec<Box<dyn BiomeModifier>>,
}

impl ModifierChain {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a stage; it runs after every stage registered before it.
    pub fn push(&mut self, modifier: impl BiomeModifier + 'static) {
        self.stages.push(Box::new(modifier));
    }

    /// Builder form of [`push`](Self::push).
    pub fn with(mut self, modifier: impl BiomeModifier + 'static) -> Self {
        self.push(modifier);
        self
    }

    /// Runs every stage over `biome`.
    pub fn modify(&self, biome: BiomeId, cell: &Cell, x: i32, z: i32) -> BiomeId {
        self.stages
            .iter()
            .fold(biome, |current, stage| stage.modify(current, cell, x, z))
    }

    pub fn len(&self) -> usize {
        self.stages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }
}

impl std::fmt::Debug for ModifierChain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ModifierChain")
            .field("stages", &self.stages.len())
            .finish()
    }
}

/// Replaces biomes through a fixed substitution map.
#[derive(Clone, Debug, Default)]
pub struct BiomeSwap {
    replacements: HashMap<BiomeId, BiomeId>,
}

impl BiomeSwap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Substitutes `to` wherever `from` is produced.
    pub fn replace(mut self, from: BiomeId, to: BiomeId) -> Self {
        self.replacements.insert(from, to);
        self
    }
}

impl BiomeModifier for BiomeSwap {
    fn modify(&self, biome: BiomeId, _cell: &Cell, _x: i32, _z: i32) -> BiomeId {
        self.replacements.get(&biome).copied().unwrap_or(biome)
    }
}

/// Turns shoreline land into a beach biome.
///
/// Applies to cells tagged [`TerrainTag::Beach`] or [`TerrainTag::Coast`]
/// whose value lies in `(water_level, water_level + band]`.
#[derive(Clone, Debug)]
pub struct CoastModifier {
    pub beach: BiomeId,
    pub water_level: f32,
    pub band: f32,
}

impl BiomeModifier for CoastModifier {
    fn modify(&self, biome: BiomeId, cell: &Cell, _x: i32, _z: i32) -> BiomeId {
        let shoreline = matches!(cell.tag, TerrainTag::Beach | TerrainTag::Coast);
        let height = cell.value - self.water_level;
        if shoreline && height > 0.0 && height <= self.band {
            self.beach
        } else {
            biome
        }
    }
}
