//! Per-category classification grids built once from the loaded point tables.

use hashbrown::HashMap;

use crate::biome::BiomeId;
use crate::cell::TerrainCategory;
use crate::grid::NearestNeighborGrid;

/// A biome candidate placed in moisture/temperature space.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ClimatePoint {
    pub biome: BiomeId,
    /// Moisture in `[0.0, 1.0]`.
    pub moisture: f32,
    /// Temperature in `[0.0, 1.0]`.
    pub temperature: f32,
}

/// Ordered candidate lists per terrain category.
pub type CategoryGroups = HashMap<TerrainCategory, Vec<ClimatePoint>>;

type ClimateGrid = NearestNeighborGrid<ClimatePoint>;

fn climate_grid(resolution: usize, points: &[ClimatePoint]) -> ClimateGrid {
    NearestNeighborGrid::generate(resolution, points, |p| p.moisture, |p| p.temperature)
}

/// One nearest-neighbor grid per land category.
///
/// Water features never get an entry here; see [`WaterGrids`]. The table is
/// immutable after [`build`](Self::build) and is shared freely across threads.
#[derive(Clone, Debug)]
pub struct ClassificationTable {
    grids: Vec<Option<ClimateGrid>>,
    resolution: usize,
}

impl ClassificationTable {
    /// Builds a grid for every land category. Categories missing from
    /// `groups` get an empty grid; water-feature entries in `groups` are ignored.
    pub fn build(groups: &CategoryGroups, resolution: usize) -> Self {
        let grids = TerrainCategory::ALL
            .iter()
            .map(|&category| {
                if category.is_water_feature() {
                    return None;
                }
                let points = groups.get(&category).map(Vec::as_slice).unwrap_or(&[]);
                Some(climate_grid(resolution, points))
            })
            .collect();

        let table = Self { grids, resolution };
        tracing::debug!(
            resolution,
            populated = table.populated_categories().count(),
            "built biome classification table"
        );
        table
    }

    /// A table with no grids; every lookup is unresolved.
    pub fn empty() -> Self {
        Self {
            grids: vec![None; TerrainCategory::COUNT],
            resolution: 0,
        }
    }

    /// Resolves the climate point for a category, or `None` if the category
    /// has no grid or its grid is empty.
    pub fn lookup(
        &self,
        category: TerrainCategory,
        temperature: f32,
        moisture: f32,
        noise: f32,
    ) -> Option<&ClimatePoint> {
        self.grid(category)?.get(moisture, temperature, noise)
    }

    /// The grid for `category`, if one was built.
    pub fn grid(&self, category: TerrainCategory) -> Option<&ClimateGrid> {
        self.grids[category.index()].as_ref()
    }

    /// Categories whose grid resolves at least one biome.
    pub fn populated_categories(&self) -> impl Iterator<Item = TerrainCategory> + '_ {
        TerrainCategory::ALL
            .into_iter()
            .filter(|&category| self.grid(category).is_some_and(|grid| !grid.is_empty()))
    }

    /// Grid resolution the table was built with; zero for [`empty`](Self::empty).
    pub fn resolution(&self) -> usize {
        self.resolution
    }

    /// Every biome stored in any grid, first-seen order, without duplicates.
    pub fn biomes(&self) -> Vec<BiomeId> {
        distinct_biomes(self.grids.iter().flatten())
    }
}

/// Dedicated grids for the water features excluded from the generic table.
#[derive(Clone, Debug)]
pub struct WaterGrids {
    river: ClimateGrid,
    ocean: ClimateGrid,
    deep_ocean: ClimateGrid,
}

impl WaterGrids {
    /// Builds the river, ocean and deep-ocean grids from their groups.
    pub fn build(groups: &CategoryGroups, resolution: usize) -> Self {
        let group = |category: TerrainCategory| {
            groups.get(&category).map(Vec::as_slice).unwrap_or(&[])
        };
        Self {
            river: climate_grid(resolution, group(TerrainCategory::River)),
            ocean: climate_grid(resolution, group(TerrainCategory::Ocean)),
            deep_ocean: climate_grid(resolution, group(TerrainCategory::DeepOcean)),
        }
    }

    /// Grids that resolve nothing.
    pub fn empty() -> Self {
        Self::build(&CategoryGroups::new(), 1)
    }

    pub fn river(&self, temperature: f32, moisture: f32, noise: f32) -> Option<BiomeId> {
        self.river.get(moisture, temperature, noise).map(|p| p.biome)
    }

    pub fn ocean(&self, temperature: f32, moisture: f32, noise: f32) -> Option<BiomeId> {
        self.ocean.get(moisture, temperature, noise).map(|p| p.biome)
    }

    pub fn deep_ocean(&self, temperature: f32, moisture: f32, noise: f32) -> Option<BiomeId> {
        self.deep_ocean.get(moisture, temperature, noise).map(|p| p.biome)
    }

    /// Every biome stored in the three grids, first-seen order.
    pub fn biomes(&self) -> Vec<BiomeId> {
        distinct_biomes([&self.river, &self.ocean, &self.deep_ocean])
    }
}

fn distinct_biomes<'a>(grids: impl IntoIterator<Item = &'a ClimateGrid>) -> Vec<BiomeId> {
    let mut seen = hashbrown::HashSet::new();
    grids
        .into_iter()
        .flat_map(|grid| grid.entries())
        .map(|point| point.biome)
        .filter(|&biome| seen.insert(biome))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn climate(biome: u16, moisture: f32, temperature: f32) -> ClimatePoint {
        ClimatePoint {
            biome: BiomeId(biome),
            moisture,
            temperature,
        }
    }

    #[test]
    fn test_two_point_lookup() {
        let mut groups = CategoryGroups::new();
        groups.insert(
            TerrainCategory::Grassland,
            vec![climate(0, 0.1, 0.1), climate(1, 0.9, 0.9)],
        );
        let table = ClassificationTable::build(&groups, 2);

        let low = table
            .lookup(TerrainCategory::Grassland, 0.05, 0.05, 0.0)
            .unwrap();
        let high = table
            .lookup(TerrainCategory::Grassland, 0.95, 0.95, 0.0)
            .unwrap();
        assert_eq!(low.biome, BiomeId(0));
        assert_eq!(high.biome, BiomeId(1));
    }

    #[test]
    fn test_axes_are_moisture_then_temperature() {
        // Hot and dry vs. cold and wet: swapping the axes would swap the answers.
        let mut groups = CategoryGroups::new();
        groups.insert(
            TerrainCategory::Desert,
            vec![climate(7, 0.0, 1.0), climate(8, 1.0, 0.0)],
        );
        let table = ClassificationTable::build(&groups, 4);
        let hot_dry = table.lookup(TerrainCategory::Desert, 0.95, 0.05, 0.0).unwrap();
        assert_eq!(hot_dry.biome, BiomeId(7));
    }

    #[test]
    fn test_missing_category_unresolved() {
        let table = ClassificationTable::build(&CategoryGroups::new(), 5);
        assert!(table.grid(TerrainCategory::Taiga).is_some());
        assert!(table.lookup(TerrainCategory::Taiga, 0.5, 0.5, 0.0).is_none());
        assert_eq!(table.populated_categories().count(), 0);
    }

    #[test]
    fn test_water_features_excluded() {
        let mut groups = CategoryGroups::new();
        groups.insert(TerrainCategory::River, vec![climate(3, 0.5, 0.5)]);
        groups.insert(TerrainCategory::Ocean, vec![climate(4, 0.5, 0.5)]);
        let table = ClassificationTable::build(&groups, 3);
        assert!(table.grid(TerrainCategory::River).is_none());
        assert!(table.lookup(TerrainCategory::Ocean, 0.5, 0.5, 0.0).is_none());

        let water = WaterGrids::build(&groups, 3);
        assert_eq!(water.river(0.5, 0.5, 0.0), Some(BiomeId(3)));
        assert_eq!(water.ocean(0.5, 0.5, 0.0), Some(BiomeId(4)));
        assert_eq!(water.deep_ocean(0.5, 0.5, 0.0), None);
    }

    #[test]
    fn test_empty_table_resolves_nothing() {
        let table = ClassificationTable::empty();
        for category in TerrainCategory::ALL {
            assert!(table.lookup(category, 0.5, 0.5, 0.5).is_none());
        }
        assert!(table.biomes().is_empty());
    }

    #[test]
    fn test_biomes_are_distinct() {
        let mut groups = CategoryGroups::new();
        groups.insert(
            TerrainCategory::Taiga,
            vec![climate(1, 0.2, 0.2), climate(2, 0.8, 0.8)],
        );
        groups.insert(TerrainCategory::Tundra, vec![climate(1, 0.5, 0.5)]);
        let table = ClassificationTable::build(&groups, 4);
        let mut biomes = table.biomes();
        biomes.sort();
        assert_eq!(biomes, vec![BiomeId(1), BiomeId(2)]);
    }
}
