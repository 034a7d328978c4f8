//! Biome classification and spatial biome queries.
//!
//! Climate signals from a [`Heightmap`] are classified through per-category
//! nearest-neighbor grids ([`ClassificationTable`]), with dedicated grids for
//! rivers and oceans ([`WaterGrids`]) and a pluggable [`ModifierChain`].
//! [`BiomeProvider`] builds point, area and search queries on top.

mod assign;
mod cell;
mod grid;
mod heightmap;
mod loader;
mod modifier;
mod provider;
mod region;
mod search;
mod table;

pub mod biome;

pub use assign::{BiomeAssigner, Route};
pub use biome::{
    BiomeCatalog, BiomeDef, BiomeId, BiomeRegistry, BiomeRegistryError, BlockId, StructureKind,
};
pub use cell::{Cell, TerrainCategory, TerrainTag};
pub use grid::NearestNeighborGrid;
pub use heightmap::{Cells, Heightmap, HeightmapParams, NoiseHeightmap};
pub use loader::{BiomeTables, LoadError};
pub use modifier::{BiomeModifier, BiomeSwap, CoastModifier, ModifierChain};
pub use provider::{BiomeProvider, SearchOutcome};
pub use region::{Coordinate, Region, RegionPoints};
pub use search::{SearchState, sample_one};
pub use table::{CategoryGroups, ClassificationTable, ClimatePoint, WaterGrids};
