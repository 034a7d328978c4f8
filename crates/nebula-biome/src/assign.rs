//! Biome assignment: routes a cell to the grid that serves it and applies the
//! modifier chain.

use std::sync::Arc;

use crate::biome::BiomeId;
use crate::cell::{Cell, TerrainCategory, TerrainTag};
use crate::modifier::ModifierChain;
use crate::table::{ClassificationTable, WaterGrids};

/// Which lookup serves a cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Route {
    /// Submerged river or river bank.
    River,
    /// Submerged ocean.
    Ocean,
    /// Submerged deep ocean.
    DeepOcean,
    /// Everything else: the generic table for the cell's category.
    Land(TerrainCategory),
}

impl Route {
    /// Selects the route for `cell`. Cells exactly at `water_level` count
    /// as submerged.
    pub fn for_cell(cell: &Cell, water_level: f32) -> Self {
        if cell.value <= water_level {
            match cell.tag {
                tag if tag.is_river() => return Self::River,
                TerrainTag::Ocean => return Self::Ocean,
                TerrainTag::DeepOcean => return Self::DeepOcean,
                _ => {}
            }
        }
        Self::Land(cell.category)
    }

    /// Ocean results are final; land and river results go through the chain.
    pub fn is_modified(self) -> bool {
        matches!(self, Self::River | Self::Land(_))
    }
}

/// Classifies cells into biomes.
///
/// Cheap to share: the table is behind an [`Arc`] and nothing is mutated
/// after construction.
#[derive(Debug)]
pub struct BiomeAssigner {
    table: Arc<ClassificationTable>,
    water: WaterGrids,
    modifiers: ModifierChain,
    water_level: f32,
    fallback: BiomeId,
}

impl BiomeAssigner {
    /// Creates an assigner. `fallback` is returned whenever a lookup resolves
    /// nothing (missing grid, empty group).
    pub fn new(
        table: Arc<ClassificationTable>,
        water: WaterGrids,
        water_level: f32,
        fallback: BiomeId,
    ) -> Self {
        Self {
            table,
            water,
            modifiers: ModifierChain::new(),
            water_level,
            fallback,
        }
    }

    /// Replaces the modifier chain.
    pub fn with_modifiers(mut self, modifiers: ModifierChain) -> Self {
        self.modifiers = modifiers;
        self
    }

    /// Biome for `cell` at world coordinate `(x, z)`.
    pub fn classify(&self, cell: &Cell, x: i32, z: i32) -> BiomeId {
        let route = Route::for_cell(cell, self.water_level);
        let biome = self.resolve(route, cell);
        if route.is_modified() {
            self.modifiers.modify(biome, cell, x, z)
        } else {
            biome
        }
    }

    /// Unmodified grid result for `cell` along `route`.
    pub fn resolve(&self, route: Route, cell: &Cell) -> BiomeId {
        let (t, m, n) = (cell.temperature, cell.moisture, cell.biome_noise);
        let found = match route {
            Route::River => self.water.river(t, m, n),
            Route::Ocean => self.water.ocean(t, m, n),
            Route::DeepOcean => self.water.deep_ocean(t, m, n),
            Route::Land(category) => self.table.lookup(category, t, m, n).map(|p| p.biome),
        };
        found.unwrap_or(self.fallback)
    }

    pub fn table(&self) -> &ClassificationTable {
        &self.table
    }

    pub fn water(&self) -> &WaterGrids {
        &self.water
    }

    pub fn water_level(&self) -> f32 {
        self.water_level
    }

    pub fn fallback(&self) -> BiomeId {
        self.fallback
    }
}
