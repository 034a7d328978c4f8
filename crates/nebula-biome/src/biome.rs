//! Biome identities: registry, definitions and the property catalog the
//! provider consults for structure and surface-block queries.

mod def;
mod registry;

pub use def::{BiomeDef, BlockId, StructureKind};
pub use registry::{BiomeCatalog, BiomeId, BiomeRegistry, BiomeRegistryError};
