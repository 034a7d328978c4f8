//! Biome registry: maps [`BiomeId`] to [`BiomeDef`] with name-based lookup.

use hashbrown::HashMap;

use super::{BiomeDef, BlockId, StructureKind};

/// Unique identifier for a biome.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BiomeId(pub u16);

/// Errors that can occur when registering biomes.
#[derive(Debug, thiserror::Error)]
pub enum BiomeRegistryError {
    /// A biome with this name is already registered.
    #[error("duplicate biome name: {0}")]
    DuplicateName(String),
    /// No biome with this name has been registered or interned.
    #[error("unknown biome: {0}")]
    UnknownName(String),
    /// The id space is exhausted.
    #[error("biome registry is full ({0} entries)")]
    Full(usize),
}

/// Read-only biome properties consulted by the provider's derived queries.
pub trait BiomeCatalog: Send + Sync {
    /// Whether `structure` may generate in `biome`.
    fn has_structure(&self, biome: BiomeId, structure: StructureKind) -> bool;

    /// The top-layer block of `biome`.
    fn surface_block(&self, biome: BiomeId) -> BlockId;
}

/// Stores all registered biome definitions with O(1) lookup by ID.
#[derive(Clone, Debug)]
pub struct BiomeRegistry {
    biomes: Vec<BiomeDef>,
    name_to_id: HashMap<String, BiomeId>,
}

impl BiomeRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self {
            biomes: Vec::new(),
            name_to_id: HashMap::new(),
        }
    }

    /// Registers a new biome definition, returning its assigned [`BiomeId`].
    ///
    /// # Errors
    ///
    /// Returns [`BiomeRegistryError::DuplicateName`] if a biome with the same name exists.
    pub fn register(&mut self, def: BiomeDef) -> Result<BiomeId, BiomeRegistryError> {
        if self.name_to_id.contains_key(&def.name) {
            return Err(BiomeRegistryError::DuplicateName(def.name.clone()));
        }
        self.push(def)
    }

    /// Returns the id for `name`, registering a placeholder definition if the
    /// name has not been seen before.
    pub fn intern(&mut self, name: &str) -> Result<BiomeId, BiomeRegistryError> {
        match self.name_to_id.get(name) {
            Some(&id) => Ok(id),
            None => self.push(BiomeDef::named(name)),
        }
    }

    /// Replaces the definition registered under `def.name`, or registers it.
    pub fn define(&mut self, def: BiomeDef) -> Result<BiomeId, BiomeRegistryError> {
        match self.name_to_id.get(&def.name) {
            Some(&id) => {
                self.biomes[id.0 as usize] = def;
                Ok(id)
            }
            None => self.push(def),
        }
    }

    fn push(&mut self, def: BiomeDef) -> Result<BiomeId, BiomeRegistryError> {
        let index = u16::try_from(self.biomes.len())
            .map_err(|_| BiomeRegistryError::Full(self.biomes.len()))?;
        let id = BiomeId(index);
        self.name_to_id.insert(def.name.clone(), id);
        self.biomes.push(def);
        Ok(id)
    }

    /// Returns the definition for the given biome ID.
    ///
    /// # Panics
    ///
    /// Panics if `id` was not issued by this registry.
    pub fn get(&self, id: BiomeId) -> &BiomeDef {
        &self.biomes[id.0 as usize]
    }

    /// Looks up a biome ID by name.
    pub fn lookup_by_name(&self, name: &str) -> Option<BiomeId> {
        self.name_to_id.get(name).copied()
    }

    /// Looks up a biome ID by name, failing with [`BiomeRegistryError::UnknownName`].
    pub fn require(&self, name: &str) -> Result<BiomeId, BiomeRegistryError> {
        self.lookup_by_name(name)
            .ok_or_else(|| BiomeRegistryError::UnknownName(name.to_string()))
    }

    /// Name of a biome, for display.
    pub fn name(&self, id: BiomeId) -> &str {
        &self.get(id).name
    }

    /// Returns the number of registered biomes.
    pub fn len(&self) -> usize {
        self.biomes.len()
    }

    /// Returns `true` if no biomes are registered.
    pub fn is_empty(&self) -> bool {
        self.biomes.is_empty()
    }
}

impl Default for BiomeRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl BiomeCatalog for BiomeRegistry {
    fn has_structure(&self, biome: BiomeId, structure: StructureKind) -> bool {
        self.biomes
            .get(biome.0 as usize)
            .is_some_and(|def| def.structures.contains(&structure))
    }

    fn surface_block(&self, biome: BiomeId) -> BlockId {
        self.biomes
            .get(biome.0 as usize)
            .map(|def| def.surface_block)
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_assigns_sequential_ids() {
        let mut reg = BiomeRegistry::new();
        let a = reg.register(BiomeDef::named("desert")).unwrap();
        let b = reg.register(BiomeDef::named("tundra")).unwrap();
        assert_eq!(a, BiomeId(0));
        assert_eq!(b, BiomeId(1));
        assert_eq!(reg.len(), 2);
        assert_eq!(reg.name(b), "tundra");
    }

    #[test]
    fn test_duplicate_rejected() {
        let mut reg = BiomeRegistry::new();
        reg.register(BiomeDef::named("desert")).unwrap();
        let result = reg.register(BiomeDef::named("desert"));
        assert!(matches!(result, Err(BiomeRegistryError::DuplicateName(_))));
    }

    #[test]
    fn test_intern_reuses_existing_id() {
        let mut reg = BiomeRegistry::new();
        let first = reg.intern("plains").unwrap();
        let second = reg.intern("plains").unwrap();
        assert_eq!(first, second);
        assert_eq!(reg.len(), 1);
    }

    #[test]
    fn test_define_overwrites_placeholder() {
        let mut reg = BiomeRegistry::new();
        let id = reg.intern("desert").unwrap();
        assert_eq!(reg.surface_block(id), BlockId(0));

        let redefined = reg
            .define(
                BiomeDef::named("desert")
                    .with_surface(BlockId(12))
                    .with_structure(StructureKind(3)),
            )
            .unwrap();
        assert_eq!(redefined, id);
        assert_eq!(reg.surface_block(id), BlockId(12));
        assert!(reg.has_structure(id, StructureKind(3)));
        assert!(!reg.has_structure(id, StructureKind(4)));
    }

    #[test]
    fn test_require_unknown_name() {
        let reg = BiomeRegistry::new();
        assert!(matches!(
            reg.require("nowhere"),
            Err(BiomeRegistryError::UnknownName(_))
        ));
    }

    #[test]
    fn test_catalog_unknown_id_is_inert() {
        let reg = BiomeRegistry::new();
        assert!(!reg.has_structure(BiomeId(9), StructureKind(0)));
        assert_eq!(reg.surface_block(BiomeId(9)), BlockId::default());
    }
}
