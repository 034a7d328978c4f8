//! Per-coordinate terrain cell produced by the heightmap and consumed by the
//! biome assigner.

/// Coarse terrain kind used to select which classification grid applies.
///
/// The three water features (`River`, `Ocean`, `DeepOcean`) are served by
/// dedicated grids and never receive a generic per-category grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TerrainCategory {
    TropicalRainforest,
    Savanna,
    Desert,
    TemperateRainforest,
    TemperateForest,
    Grassland,
    ColdSteppe,
    Steppe,
    Taiga,
    Tundra,
    Alpine,
    River,
    Ocean,
    DeepOcean,
}

impl TerrainCategory {
    /// Every category, in declaration order.
    pub const ALL: [TerrainCategory; 14] = [
        Self::TropicalRainforest,
        Self::Savanna,
        Self::Desert,
        Self::TemperateRainforest,
        Self::TemperateForest,
        Self::Grassland,
        Self::ColdSteppe,
        Self::Steppe,
        Self::Taiga,
        Self::Tundra,
        Self::Alpine,
        Self::River,
        Self::Ocean,
        Self::DeepOcean,
    ];

    /// Number of declared categories.
    pub const COUNT: usize = Self::ALL.len();

    /// Dense index of this category, suitable for indexing per-category tables.
    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    /// Returns `true` for the categories handled by dedicated water grids.
    pub fn is_water_feature(self) -> bool {
        matches!(self, Self::River | Self::Ocean | Self::DeepOcean)
    }

    /// Canonical group name as it appears in `biome_groups.json`.
    pub fn name(self) -> &'static str {
        match self {
            Self::TropicalRainforest => "tropical_rainforest",
            Self::Savanna => "savanna",
            Self::Desert => "desert",
            Self::TemperateRainforest => "temperate_rainforest",
            Self::TemperateForest => "temperate_forest",
            Self::Grassland => "grassland",
            Self::ColdSteppe => "cold_steppe",
            Self::Steppe => "steppe",
            Self::Taiga => "taiga",
            Self::Tundra => "tundra",
            Self::Alpine => "alpine",
            Self::River => "rivers",
            Self::Ocean => "oceans",
            Self::DeepOcean => "deep_oceans",
        }
    }

    /// Resolves a group name from the persisted tables.
    ///
    /// Names are matched case-insensitively. Any key mentioning `rivers` is a
    /// river group, `deep_oceans` is the deep-ocean group and any other key
    /// mentioning `oceans` is the ocean group.
    pub fn from_group_name(name: &str) -> Option<Self> {
        let key = name.to_ascii_lowercase();
        if key.contains("rivers") {
            return Some(Self::River);
        }
        if key.contains("deep_oceans") {
            return Some(Self::DeepOcean);
        }
        if key.contains("oceans") {
            return Some(Self::Ocean);
        }
        Self::ALL
            .iter()
            .copied()
            .find(|category| !category.is_water_feature() && category.name() == key)
    }
}

/// Surface tag attached to a cell by the terrain generator.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum TerrainTag {
    Ocean,
    DeepOcean,
    Coast,
    Beach,
    Lake,
    River,
    RiverBanks,
    Wetlands,
    #[default]
    Plains,
    Hills,
    Plateau,
    Badlands,
    Mountains,
    Volcano,
}

impl TerrainTag {
    /// Rivers and their banks share the river classification path.
    pub fn is_river(self) -> bool {
        matches!(self, Self::River | Self::RiverBanks)
    }
}

/// Terrain and climate signals for a single world coordinate.
///
/// All climate channels are normalized to `[0.0, 1.0]`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Cell {
    /// Height/density signal, compared against the water level.
    pub value: f32,
    pub tag: TerrainTag,
    pub category: TerrainCategory,
    pub temperature: f32,
    pub moisture: f32,
    /// Per-cell biome noise, forwarded to every grid lookup.
    pub biome_noise: f32,
}

impl Default for Cell {
    fn default() -> Self {
        Self {
            value: 0.0,
            tag: TerrainTag::default(),
            category: TerrainCategory::Grassland,
            temperature: 0.5,
            moisture: 0.5,
            biome_noise: 0.0,
        }
    }
}
