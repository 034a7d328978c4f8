//! Biome definition: describes the host-facing properties of a single biome.

use hashbrown::HashSet;

/// Identifier for a host block type (surface cover, filler, etc.).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BlockId(pub u16);

/// Identifier for a kind of structure the host can place.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StructureKind(pub u32);

/// Full descriptor for a biome type.
#[derive(Clone, Debug)]
pub struct BiomeDef {
    /// Identifier as used by the persisted tables (e.g., "temperate_forest").
    pub name: String,
    /// Block placed on the terrain surface (e.g., grass, sand, snow).
    pub surface_block: BlockId,
    /// Structure kinds allowed to generate in this biome.
    pub structures: HashSet<StructureKind>,
}

impl BiomeDef {
    /// A definition with no structures and the default surface block.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            surface_block: BlockId::default(),
            structures: HashSet::new(),
        }
    }

    /// Sets the surface block.
    pub fn with_surface(mut self, block: BlockId) -> Self {
        self.surface_block = block;
        self
    }

    /// Adds an allowed structure kind.
    pub fn with_structure(mut self, kind: StructureKind) -> Self {
        self.structures.insert(kind);
        self
    }
}
