//! Spatial biome queries over a heightmap.
//!
//! [`BiomeProvider`] composes a [`Heightmap`] and a [`BiomeAssigner`] into the
//! queries a world generator needs: point lookups, area enumeration, random
//! search for a matching position, and two memoized properties of the
//! provider's default biomes.

use std::sync::OnceLock;

use dashmap::DashMap;
use hashbrown::HashSet;
use rand::Rng;

use crate::assign::BiomeAssigner;
use crate::biome::{BiomeCatalog, BiomeId, BlockId, StructureKind};
use crate::cell::Cell;
use crate::heightmap::Heightmap;
use crate::region::{Coordinate, Region};
use crate::search::{SearchState, sample_one};

/// Outcome of [`BiomeProvider::find_biome_position`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SearchOutcome {
    /// Uniformly chosen matching coordinate, `None` if nothing matched.
    pub position: Option<Coordinate>,
    /// Number of matching coordinates in the scanned region.
    pub matches: u64,
}

impl From<SearchState> for SearchOutcome {
    fn from(state: SearchState) -> Self {
        Self {
            position: state.chosen(),
            matches: state.matches(),
        }
    }
}

/// Answers biome queries for a world.
///
/// All queries take `&self`; the provider can be shared across worker
/// threads once constructed.
pub struct BiomeProvider<H, C> {
    heightmap: H,
    assigner: BiomeAssigner,
    catalog: C,
    default_biomes: Vec<BiomeId>,
    structure_cache: DashMap<StructureKind, bool>,
    surface_cache: OnceLock<HashSet<BlockId>>,
}

impl<H: Heightmap, C: BiomeCatalog> BiomeProvider<H, C> {
    /// Creates a provider whose default biomes are every biome the assigner
    /// can produce from its grids, in first-seen order.
    pub fn new(heightmap: H, assigner: BiomeAssigner, catalog: C) -> Self {
        let mut seen = HashSet::new();
        let default_biomes = assigner
            .table()
            .biomes()
            .into_iter()
            .chain(assigner.water().biomes())
            .filter(|&biome| seen.insert(biome))
            .collect();
        Self {
            heightmap,
            assigner,
            catalog,
            default_biomes,
            structure_cache: DashMap::new(),
            surface_cache: OnceLock::new(),
        }
    }

    /// Overrides the default biome set used by the memoized queries.
    pub fn with_default_biomes(mut self, biomes: Vec<BiomeId>) -> Self {
        self.default_biomes = biomes;
        self.structure_cache.clear();
        self.surface_cache = OnceLock::new();
        self
    }

    /// Biome at a single coordinate.
    pub fn biome_at(&self, x: i32, z: i32) -> BiomeId {
        let mut cell = Cell::default();
        self.heightmap.apply(&mut cell, x, z);
        self.assigner.classify(&cell, x, z)
    }

    /// Distinct biomes on the lattice `center ± (side_length >> 2)`.
    pub fn biomes_in_square(
        &self,
        center_x: i32,
        center_z: i32,
        side_length: u32,
    ) -> HashSet<BiomeId> {
        let region = Region::around(center_x, center_z, side_length);
        let mut biomes = HashSet::new();
        self.heightmap.visit(region, &mut |cell, dx, dz| {
            let (x, z) = (region.min_x.wrapping_add(dx), region.min_z.wrapping_add(dz));
            biomes.insert(self.assigner.classify(cell, x, z));
        });
        biomes
    }

    /// Uniformly random coordinate on the lattice `center ± (range >> 2)`
    /// whose biome is one of `targets`.
    pub fn find_biome_position<R: Rng + ?Sized>(
        &self,
        center_x: i32,
        center_z: i32,
        range: u32,
        targets: &[BiomeId],
        rng: &mut R,
    ) -> SearchOutcome {
        let wanted: HashSet<BiomeId> = targets.iter().copied().collect();
        let region = Region::around(center_x, center_z, range);
        let matches = self
            .heightmap
            .cells(region)
            .filter(|(point, cell)| {
                wanted.contains(&self.assigner.classify(cell, point.x, point.z))
            })
            .map(|(point, _)| point);
        sample_one(matches, rng).into()
    }

    /// Whether any default biome allows `structure`. Computed once per kind.
    pub fn has_structure(&self, structure: StructureKind) -> bool {
        if let Some(cached) = self.structure_cache.get(&structure) {
            return *cached;
        }
        *self
            .structure_cache
            .entry(structure)
            .or_insert_with(|| {
                self.default_biomes
                    .iter()
                    .any(|&biome| self.catalog.has_structure(biome, structure))
            })
    }

    /// Surface blocks of every default biome. Computed on first call.
    pub fn surface_blocks(&self) -> &HashSet<BlockId> {
        self.surface_cache.get_or_init(|| {
            self.default_biomes
                .iter()
                .map(|&biome| self.catalog.surface_block(biome))
                .collect()
        })
    }

    pub fn default_biomes(&self) -> &[BiomeId] {
        &self.default_biomes
    }

    pub fn assigner(&self) -> &BiomeAssigner {
        &self.assigner
    }

    pub fn heightmap(&self) -> &H {
        &self.heightmap
    }

    pub fn catalog(&self) -> &C {
        &self.catalog
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cell::{TerrainCategory, TerrainTag};
    use crate::table::{CategoryGroups, ClassificationTable, ClimatePoint, WaterGrids};
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    const FALLBACK: BiomeId = BiomeId(0);
    const COLD: BiomeId = BiomeId(1);
    const WARM: BiomeId = BiomeId(2);

    /// Temperature rises with `x`: cold for `x < 0`, warm otherwise.
    struct Gradient;

    impl Heightmap for Gradient {
        fn apply(&self, cell: &mut Cell, x: i32, _z: i32) {
            *cell = Cell {
                value: 0.5,
                tag: TerrainTag::Plains,
                category: TerrainCategory::Grassland,
                temperature: if x < 0 { 0.1 } else { 0.9 },
                moisture: 0.5,
                biome_noise: 0.0,
            };
        }
    }

    /// Counts every catalog query.
    #[derive(Default)]
    struct CountingCatalog {
        structure_calls: AtomicUsize,
        surface_calls: AtomicUsize,
    }

    impl BiomeCatalog for CountingCatalog {
        fn has_structure(&self, biome: BiomeId, structure: StructureKind) -> bool {
            self.structure_calls.fetch_add(1, Ordering::SeqCst);
            biome == WARM && structure == StructureKind(1)
        }

        fn surface_block(&self, biome: BiomeId) -> BlockId {
            self.surface_calls.fetch_add(1, Ordering::SeqCst);
            BlockId(biome.0 * 10)
        }
    }

    fn set<T: std::hash::Hash + Eq, const N: usize>(items: [T; N]) -> HashSet<T> {
        items.into_iter().collect()
    }

    fn provider() -> BiomeProvider<Gradient, CountingCatalog> {
        let mut groups = CategoryGroups::new();
        groups.insert(
            TerrainCategory::Grassland,
            vec![
                ClimatePoint {
                    biome: COLD,
                    moisture: 0.5,
                    temperature: 0.1,
                },
                ClimatePoint {
                    biome: WARM,
                    moisture: 0.5,
                    temperature: 0.9,
                },
            ],
        );
        let assigner = BiomeAssigner::new(
            Arc::new(ClassificationTable::build(&groups, 4)),
            WaterGrids::build(&groups, 4),
            0.25,
            FALLBACK,
        );
        BiomeProvider::new(Gradient, assigner, CountingCatalog::default())
    }

    #[test]
    fn test_biome_at() {
        let p = provider();
        assert_eq!(p.biome_at(-10, 3), COLD);
        assert_eq!(p.biome_at(10, 3), WARM);
    }

    #[test]
    fn test_single_point_square_matches_point_query() {
        let p = provider();
        for x in [-7, 0, 7] {
            let biomes = p.biomes_in_square(x, 2, 3);
            assert_eq!(biomes.len(), 1);
            assert!(biomes.contains(&p.biome_at(x, 2)));
        }
    }

    #[test]
    fn test_square_spanning_both_halves() {
        let p = provider();
        assert_eq!(p.biomes_in_square(0, 0, 16), set([COLD, WARM]));
        assert_eq!(p.biomes_in_square(100, 0, 16), set([WARM]));
    }

    #[test]
    fn test_find_no_match_is_none() {
        let p = provider();
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let outcome = p.find_biome_position(100, 0, 16, &[COLD], &mut rng);
        assert_eq!(outcome.position, None);
        assert_eq!(outcome.matches, 0);
    }

    #[test]
    fn test_find_returns_matching_position() {
        let p = provider();
        let mut rng = ChaCha8Rng::seed_from_u64(2);
        // Region x in [-4, 4]; cold half is x in [-4, -1], 4 columns of 9 rows.
        let outcome = p.find_biome_position(0, 0, 16, &[COLD], &mut rng);
        assert_eq!(outcome.matches, 36);
        let position = outcome.position.unwrap();
        assert!(position.x < 0);
        assert_eq!(p.biome_at(position.x, position.z), COLD);
    }

    #[test]
    fn test_find_is_uniform_over_matches() {
        let p = provider();
        // Region x in [-1, 1], z in [-1, 1]: the cold column x = -1 holds 3 matches.
        let mut rng = ChaCha8Rng::seed_from_u64(0xACE);
        let mut counts = [0usize; 3];
        let trials = 9_000;
        for _ in 0..trials {
            let outcome = p.find_biome_position(0, 0, 4, &[COLD], &mut rng);
            assert_eq!(outcome.matches, 3);
            let position = outcome.position.unwrap();
            assert_eq!(position.x, -1);
            counts[(position.z + 1) as usize] += 1;
        }
        for count in counts {
            let share = count as f64 / trials as f64;
            assert!((share - 1.0 / 3.0).abs() < 0.03, "share {share} not near 1/3");
        }
    }

    #[test]
    fn test_has_structure_memoized() {
        let p = provider();
        assert!(p.has_structure(StructureKind(1)));
        let after_first = p.catalog().structure_calls.load(Ordering::SeqCst);
        assert!(after_first > 0);

        assert!(p.has_structure(StructureKind(1)));
        assert_eq!(p.catalog().structure_calls.load(Ordering::SeqCst), after_first);

        assert!(!p.has_structure(StructureKind(2)));
        assert!(!p.has_structure(StructureKind(2)));
        assert_eq!(
            p.catalog().structure_calls.load(Ordering::SeqCst),
            after_first + p.default_biomes().len()
        );
    }

    #[test]
    fn test_surface_blocks_memoized() {
        let p = provider();
        let blocks = p.surface_blocks().clone();
        assert_eq!(blocks, set([BlockId(10), BlockId(20)]));
        let calls = p.catalog().surface_calls.load(Ordering::SeqCst);
        assert_eq!(calls, 2);
        p.surface_blocks();
        assert_eq!(p.catalog().surface_calls.load(Ordering::SeqCst), calls);
    }

    #[test]
    fn test_concurrent_first_access_computes_once() {
        let p = provider();
        std::thread::scope(|scope| {
            for _ in 0..8 {
                scope.spawn(|| {
                    for _ in 0..100 {
                        assert!(!p.has_structure(StructureKind(7)));
                        assert_eq!(p.surface_blocks().len(), 2);
                    }
                });
            }
        });
        assert_eq!(
            p.catalog().structure_calls.load(Ordering::SeqCst),
            p.default_biomes().len()
        );
        assert_eq!(
            p.catalog().surface_calls.load(Ordering::SeqCst),
            p.default_biomes().len()
        );
    }

    #[test]
    fn test_default_biomes_override_resets_caches() {
        let p = provider().with_default_biomes(vec![COLD]);
        assert!(!p.has_structure(StructureKind(1)));
        assert_eq!(p.surface_blocks(), &set([BlockId(10)]));
    }
}
