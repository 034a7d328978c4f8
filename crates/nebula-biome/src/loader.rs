//! Loading of the persisted biome point and group tables.
//!
//! Two JSON documents describe the classification inputs:
//! - `biome_data.json`: an array of `{ "id", "moisture", "temperature" }` records;
//! - `biome_groups.json`: an object mapping category names to ordered id lists.
//!
//! Loading is all-or-nothing. Callers that must keep running on bad data use
//! [`BiomeTables::load_or_empty`], which degrades to empty tables.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use hashbrown::HashMap;
use serde::Deserialize;

use crate::assign::BiomeAssigner;
use crate::biome::{BiomeId, BiomeRegistry, BiomeRegistryError};
use crate::cell::TerrainCategory;
use crate::table::{CategoryGroups, ClassificationTable, ClimatePoint, WaterGrids};

const BUILTIN_DATA: &str = include_str!("../assets/biome_data.json");
const BUILTIN_GROUPS: &str = include_str!("../assets/biome_groups.json");

/// Errors that can occur while loading biome tables.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    /// A table file could not be read.
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A table document is not valid JSON of the expected shape.
    #[error("failed to parse biome table: {0}")]
    Parse(#[from] serde_json::Error),

    /// A group key does not name any terrain category.
    #[error("unknown terrain category in biome groups: {0}")]
    UnknownCategory(String),

    /// A biome id could not be interned.
    #[error(transparent)]
    Registry(#[from] BiomeRegistryError),
}

#[derive(Debug, Deserialize)]
struct ClimateRecord {
    id: String,
    moisture: f32,
    temperature: f32,
}

/// Loaded candidate lists for every category, water features included.
#[derive(Clone, Debug, Default)]
pub struct BiomeTables {
    groups: CategoryGroups,
}

impl BiomeTables {
    /// Parses the two table documents, interning every biome id into `registry`.
    ///
    /// Duplicate ids in `data` overwrite earlier records. Ids listed in a
    /// group but absent from `data` are skipped. On error `registry` is left
    /// untouched.
    pub fn from_json(
        data: &str,
        groups: &str,
        registry: &mut BiomeRegistry,
    ) -> Result<Self, LoadError> {
        let records: Vec<ClimateRecord> = serde_json::from_str(data)?;
        let raw_groups: BTreeMap<String, Vec<String>> = serde_json::from_str(groups)?;
        let keyed = raw_groups
            .into_iter()
            .map(|(key, ids)| match TerrainCategory::from_group_name(&key) {
                Some(category) => Ok((key, category, ids)),
                None => Err(LoadError::UnknownCategory(key)),
            })
            .collect::<Result<Vec<_>, _>>()?;

        // Interning can still fail on a full registry; commit only on success.
        let mut staged = registry.clone();
        let mut points: HashMap<String, ClimatePoint> = HashMap::with_capacity(records.len());
        for record in records {
            let biome = staged.intern(&record.id)?;
            points.insert(
                record.id,
                ClimatePoint {
                    biome,
                    moisture: record.moisture,
                    temperature: record.temperature,
                },
            );
        }

        let mut resolved = CategoryGroups::new();
        for (key, category, ids) in keyed {
            let list = resolved.entry(category).or_default();
            for id in ids {
                match points.get(&id) {
                    Some(point) => list.push(*point),
                    None => tracing::debug!(group = %key, biome = %id, "skipping unknown biome"),
                }
            }
        }

        *registry = staged;
        Ok(Self { groups: resolved })
    }

    /// Reads and parses the two table files.
    pub fn load(
        data_path: &Path,
        groups_path: &Path,
        registry: &mut BiomeRegistry,
    ) -> Result<Self, LoadError> {
        let data = read(data_path)?;
        let groups = read(groups_path)?;
        let tables = Self::from_json(&data, &groups, registry)?;
        tracing::info!(
            data = %data_path.display(),
            groups = %groups_path.display(),
            categories = tables.groups.len(),
            "loaded biome tables"
        );
        Ok(tables)
    }

    /// Like [`load`](Self::load), but any failure is logged and yields empty
    /// tables, so every classification resolves to the fallback biome.
    pub fn load_or_empty(
        data_path: &Path,
        groups_path: &Path,
        registry: &mut BiomeRegistry,
    ) -> Self {
        Self::load(data_path, groups_path, registry).unwrap_or_else(|err| {
            tracing::warn!(error = %err, "biome tables unavailable, using empty tables");
            Self::default()
        })
    }

    /// The tables bundled with this crate.
    pub fn builtin(registry: &mut BiomeRegistry) -> Result<Self, LoadError> {
        Self::from_json(BUILTIN_DATA, BUILTIN_GROUPS, registry)
    }

    /// Tables built from already resolved groups.
    pub fn from_groups(groups: CategoryGroups) -> Self {
        Self { groups }
    }

    /// Candidate list for a category, in table order.
    pub fn group(&self, category: TerrainCategory) -> &[ClimatePoint] {
        self.groups.get(&category).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Returns `true` if no category has any candidate.
    pub fn is_empty(&self) -> bool {
        self.groups.values().all(Vec::is_empty)
    }

    /// Builds the generic per-category table.
    pub fn classification_table(&self, resolution: usize) -> ClassificationTable {
        ClassificationTable::build(&self.groups, resolution)
    }

    /// Builds the dedicated water-feature grids.
    pub fn water_grids(&self, resolution: usize) -> WaterGrids {
        WaterGrids::build(&self.groups, resolution)
    }

    /// Builds both grid sets and wraps them in an assigner with an empty
    /// modifier chain.
    pub fn assigner(
        &self,
        resolution: usize,
        water_level: f32,
        fallback: BiomeId,
    ) -> BiomeAssigner {
        BiomeAssigner::new(
            Arc::new(self.classification_table(resolution)),
            self.water_grids(resolution),
            water_level,
            fallback,
        )
    }
}

fn read(path: &Path) -> Result<String, LoadError> {
    std::fs::read_to_string(path).map_err(|source| LoadError::Read {
        path: path.to_path_buf(),
        source,
    })
}
