//! Configuration structs with sensible defaults and RON persistence.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

const CONFIG_FILE: &str = "config.ron";

/// Top-level biome generation configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Classification settings.
    pub generation: GenerationConfig,
    /// Biome table locations.
    pub data: DataConfig,
    /// Reference heightmap settings.
    pub heightmap: HeightmapConfig,
    /// Debug/development settings.
    pub debug: DebugConfig,
}

/// Biome classification configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct GenerationConfig {
    /// Cells per axis of every nearest-neighbor grid.
    pub grid_resolution: usize,
    /// Normalized height at or below which a cell counts as submerged.
    pub water_level: f32,
    /// Biome returned when no table entry applies.
    pub fallback_biome: String,
    /// Biome painted on beaches near the water line. `None` disables it.
    pub beach_biome: Option<String>,
    /// Height band above `water_level` treated as shoreline.
    pub beach_band: f32,
}

/// Locations of the persisted biome tables.
///
/// Both paths must be set for the files to be used; otherwise the tables
/// bundled with the library apply.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DataConfig {
    /// Path to `biome_data.json`.
    pub biome_data: Option<PathBuf>,
    /// Path to `biome_groups.json`.
    pub biome_groups: Option<PathBuf>,
}

/// Reference heightmap configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct HeightmapConfig {
    /// World seed.
    pub seed: u64,
    /// Number of height octaves.
    pub octaves: u32,
    /// Frequency of the lowest height octave.
    pub base_frequency: f64,
    /// Frequency of the temperature and moisture channels.
    pub climate_frequency: f64,
}

/// Debug/development configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DebugConfig {
    /// Log level override (e.g., "debug", "info", "warn").
    pub log_level: String,
}

impl DataConfig {
    /// Both table paths, if configured.
    pub fn table_paths(&self) -> Option<(&Path, &Path)> {
        Some((self.biome_data.as_deref()?, self.biome_groups.as_deref()?))
    }
}

// --- Default implementations ---

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            grid_resolution: 5,
            water_level: 0.25,
            fallback_biome: "plains".to_string(),
            beach_biome: Some("beach".to_string()),
            beach_band: 0.02,
        }
    }
}

impl Default for HeightmapConfig {
    fn default() -> Self {
        Self {
            seed: 0,
            octaves: 6,
            base_frequency: 0.004,
            climate_frequency: 0.0015,
        }
    }
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}

// --- Load / Save / Reload ---

impl Config {
    /// Load config from the given directory, or create a default config file.
    pub fn load_or_create(config_dir: &Path) -> Result<Self, ConfigError> {
        let config_path = config_dir.join(CONFIG_FILE);

        if config_path.exists() {
            let config = read_config(&config_path)?;
            log::info!("Loaded config from {}", config_path.display());
            Ok(config)
        } else {
            let config = Config::default();
            config.save(config_dir)?;
            log::info!("Created default config at {}", config_path.display());
            Ok(config)
        }
    }

    /// Save config to the given directory as `config.ron`.
    pub fn save(&self, config_dir: &Path) -> Result<(), ConfigError> {
        std::fs::create_dir_all(config_dir).map_err(ConfigError::WriteError)?;

        let pretty = ron::ser::PrettyConfig::new()
            .depth_limit(2)
            .enumerate_arrays(false);
        let serialized =
            ron::ser::to_string_pretty(self, pretty).map_err(ConfigError::SerializeError)?;

        std::fs::write(config_dir.join(CONFIG_FILE), serialized).map_err(ConfigError::WriteError)
    }

    /// Re-reads `config.ron`: `Some(new_config)` if it differs from `self`.
    pub fn reload(&self, config_dir: &Path) -> Result<Option<Self>, ConfigError> {
        let new_config = read_config(&config_dir.join(CONFIG_FILE))?;
        if &new_config != self {
            log::info!("Config reloaded with changes");
            Ok(Some(new_config))
        } else {
            Ok(None)
        }
    }
}

fn read_config(path: &Path) -> Result<Config, ConfigError> {
    let contents = std::fs::read_to_string(path).map_err(ConfigError::ReadError)?;
    ron::from_str(&contents).map_err(ConfigError::ParseError)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.generation.grid_resolution, 5);
        assert_eq!(config.generation.water_level, 0.25);
        assert_eq!(config.generation.fallback_biome, "plains");
        assert_eq!(config.generation.beach_biome.as_deref(), Some("beach"));
        assert_eq!(config.data.table_paths(), None);
        assert_eq!(config.debug.log_level, "info");
    }

    #[test]
    fn test_default_config_serializes() {
        let ron_str =
            ron::ser::to_string_pretty(&Config::default(), ron::ser::PrettyConfig::new()).unwrap();
        assert!(ron_str.contains("grid_resolution: 5"));
        assert!(ron_str.contains("fallback_biome: \"plains\""));
    }

    #[test]
    fn test_partial_section_uses_defaults() {
        let config: Config = ron::from_str("(generation: (water_level: 0.4))").unwrap();
        assert_eq!(config.generation.water_level, 0.4);
        assert_eq!(config.generation.grid_resolution, 5);
        assert_eq!(config.heightmap, HeightmapConfig::default());
    }

    #[test]
    fn test_extra_field_ignored() {
        let result: Result<Config, _> = ron::from_str("(render: (vsync: true))");
        assert!(result.is_ok());
    }

    #[test]
    fn test_table_paths_need_both_files() {
        let mut data = DataConfig {
            biome_data: Some(PathBuf::from("data.json")),
            biome_groups: None,
        };
        assert_eq!(data.table_paths(), None);
        data.biome_groups = Some(PathBuf::from("groups.json"));
        assert_eq!(
            data.table_paths(),
            Some((Path::new("data.json"), Path::new("groups.json")))
        );
    }

    #[test]
    fn test_load_creates_default_file() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_or_create(dir.path()).unwrap();
        assert_eq!(config, Config::default());
        assert!(dir.path().join(CONFIG_FILE).exists());
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = Config::default();
        config.heightmap.seed = 99;
        config.generation.beach_biome = None;
        config.data.biome_data = Some(PathBuf::from("/srv/biomes/data.json"));

        config.save(dir.path()).unwrap();
        let loaded = Config::load_or_create(dir.path()).unwrap();
        assert_eq!(config, loaded);
    }

    #[test]
    fn test_reload_detects_changes() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::default();
        config.save(dir.path()).unwrap();
        assert!(config.reload(dir.path()).unwrap().is_none());

        let mut modified = config.clone();
        modified.generation.grid_resolution = 12;
        modified.save(dir.path()).unwrap();

        let reloaded = config.reload(dir.path()).unwrap().unwrap();
        assert_eq!(reloaded.generation.grid_resolution, 12);
    }

    #[test]
    fn test_invalid_ron_produces_error() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(CONFIG_FILE), "{{not valid}}").unwrap();
        let result = Config::load_or_create(dir.path());
        assert!(matches!(result, Err(ConfigError::ParseError(_))));
    }
}
