//! Heightmap boundary: the source of [`Cell`]s for world coordinates.
//!
//! [`Heightmap`] is the only shape the biome provider consumes. Hosts plug in
//! their own terrain generator; [`NoiseHeightmap`] is a self-contained
//! fractal-noise implementation used by the CLI and tests.

use noise::{NoiseFn, Simplex};

use crate::cell::{Cell, TerrainCategory, TerrainTag};
use crate::region::{Coordinate, Region, RegionPoints};

/// Produces terrain cells for world coordinates.
pub trait Heightmap: Send + Sync {
    /// Fills `cell` for the coordinate `(x, z)`.
    fn apply(&self, cell: &mut Cell, x: i32, z: i32);

    /// Calls `visitor` once per coordinate of `region` with the filled cell
    /// and its offset from `(region.min_x, region.min_z)`.
    ///
    /// Offsets wrap for regions wider than `i32::MAX`, so
    /// `region.min_x.wrapping_add(dx)` always recovers the coordinate.
    fn visit(&self, region: Region, visitor: &mut dyn FnMut(&Cell, i32, i32)) {
        let mut cell = Cell::default();
        for point in region.points() {
            self.apply(&mut cell, point.x, point.z);
            visitor(
                &cell,
                point.x.wrapping_sub(region.min_x),
                point.z.wrapping_sub(region.min_z),
            );
        }
    }

    /// Lazily yields every coordinate of `region` with its cell.
    fn cells(&self, region: Region) -> Cells<'_, Self> {
        Cells {
            heightmap: self,
            points: region.points(),
            cell: Cell::default(),
        }
    }
}

/// Iterator returned by [`Heightmap::cells`].
pub struct Cells<'a, H: Heightmap + ?Sized> {
    heightmap: &'a H,
    points: RegionPoints,
    cell: Cell,
}

impl<H: Heightmap + ?Sized> Iterator for Cells<'_, H> {
    type Item = (Coordinate, Cell);

    fn next(&mut self) -> Option<Self::Item> {
        let point = self.points.next()?;
        self.heightmap.apply(&mut self.cell, point.x, point.z);
        Some((point, self.cell))
    }
}

impl<H: Heightmap + ?Sized> Heightmap for &H {
    fn apply(&self, cell: &mut Cell, x: i32, z: i32) {
        (**self).apply(cell, x, z);
    }

    fn visit(&self, region: Region, visitor: &mut dyn FnMut(&Cell, i32, i32)) {
        (**self).visit(region, visitor);
    }
}

/// Configuration for [`NoiseHeightmap`].
#[derive(Clone, Debug)]
pub struct HeightmapParams {
    /// World seed for deterministic generation.
    pub seed: u64,
    /// Number of noise octaves composited into the height value.
    pub octaves: u32,
    /// Frequency multiplier between successive octaves. Default: 2.0.
    pub lacunarity: f64,
    /// Amplitude multiplier between successive octaves. Default: 0.5.
    pub persistence: f64,
    /// Frequency of the lowest height octave.
    pub base_frequency: f64,
    /// Frequency of the temperature, moisture and biome-noise channels.
    pub climate_frequency: f64,
    /// Frequency of the river network noise.
    pub river_frequency: f64,
    /// Half-width of river channels in river-noise units.
    pub river_width: f64,
    /// Normalized height of the water surface.
    pub water_level: f32,
    /// Normalized height below which open water becomes deep ocean.
    pub deep_ocean_level: f32,
    /// Height band above the water surface tagged as beach.
    pub beach_band: f32,
}

impl Default for HeightmapParams {
    fn default() -> Self {
        Self {
            seed: 0,
            octaves: 6,
            lacunarity: 2.0,
            persistence: 0.5,
            base_frequency: 0.004,
            climate_frequency: 0.0015,
            river_frequency: 0.003,
            river_width: 0.03,
            water_level: 0.25,
            deep_ocean_level: 0.15,
            beach_band: 0.02,
        }
    }
}

/// Fractal Brownian motion heightmap with independent climate channels.
pub struct NoiseHeightmap {
    height: Simplex,
    temperature: Simplex,
    moisture: Simplex,
    biome: Simplex,
    river: Simplex,
    params: HeightmapParams,
    max_amplitude: f64,
}

impl NoiseHeightmap {
    pub fn new(params: HeightmapParams) -> Self {
        // Distinct seeds keep the channels decorrelated.
        let seed = params.seed;
        let max_amplitude = (0..params.octaves)
            .map(|octave| params.persistence.powi(octave as i32))
            .sum::<f64>()
            .max(f64::EPSILON);
        Self {
            height: Simplex::new(seed as u32),
            temperature: Simplex::new(seed.wrapping_add(0xDEAD_BEEF) as u32),
            moisture: Simplex::new(seed.wrapping_add(0xFEED_FACE) as u32),
            biome: Simplex::new(seed.wrapping_add(0xB10E_0001) as u32),
            river: Simplex::new(seed.wrapping_add(0x0517_EA11) as u32),
            params,
            max_amplitude,
        }
    }

    pub fn params(&self) -> &HeightmapParams {
        &self.params
    }

    /// Height in `[0.0, 1.0]`.
    fn height(&self, x: f64, z: f64) -> f32 {
        let mut total = 0.0;
        let mut frequency = self.params.base_frequency;
        let mut amplitude = 1.0;
        for _ in 0..self.params.octaves {
            total += self.height.get([x * frequency, z * frequency]) * amplitude;
            frequency *= self.params.lacunarity;
            amplitude *= self.params.persistence;
        }
        unit(total / self.max_amplitude)
    }

    fn channel(&self, noise: &Simplex, x: f64, z: f64) -> f32 {
        let f = self.params.climate_frequency;
        unit(noise.get([x * f, z * f]))
    }

    fn tag(&self, value: f32, river: f64) -> TerrainTag {
        let p = &self.params;
        if value <= p.deep_ocean_level {
            TerrainTag::DeepOcean
        } else if value <= p.water_level {
            TerrainTag::Ocean
        } else if river < p.river_width {
            TerrainTag::River
        } else if river < p.river_width * 2.0 {
            TerrainTag::RiverBanks
        } else if value <= p.water_level + p.beach_band {
            TerrainTag::Beach
        } else if value > 0.8 {
            TerrainTag::Mountains
        } else if value > 0.6 {
            TerrainTag::Hills
        } else {
            TerrainTag::Plains
        }
    }
}

impl Heightmap for NoiseHeightmap {
    fn apply(&self, cell: &mut Cell, x: i32, z: i32) {
        let (x, z) = (f64::from(x), f64::from(z));
        let rf = self.params.river_frequency;
        let river = self.river.get([x * rf, z * rf]).abs();

        cell.temperature = self.channel(&self.temperature, x, z);
        cell.moisture = self.channel(&self.moisture, x, z);
        cell.biome_noise = self.channel(&self.biome, x, z);
        cell.value = self.height(x, z);
        cell.tag = self.tag(cell.value, river);
        if cell.tag == TerrainTag::River {
            // Carve the channel down to the water surface.
            cell.value = cell.value.min(self.params.water_level);
        }
        cell.category = categorize(cell.tag, cell.temperature, cell.moisture);
    }
}

/// Maps `[-1, 1]` noise into `[0, 1]`.
fn unit(raw: f64) -> f32 {
    ((raw + 1.0) * 0.5).clamp(0.0, 1.0) as f32
}

/// Whittaker-style land category from climate, with mountains forced alpine.
fn categorize(tag: TerrainTag, temperature: f32, moisture: f32) -> TerrainCategory {
    match tag {
        TerrainTag::Ocean => return TerrainCategory::Ocean,
        TerrainTag::DeepOcean => return TerrainCategory::DeepOcean,
        TerrainTag::River => return TerrainCategory::River,
        TerrainTag::Mountains => return TerrainCategory::Alpine,
        _ => {}
    }
    match (temperature, moisture) {
        (t, _) if t < 0.15 => TerrainCategory::Tundra,
        (t, m) if t < 0.35 && m >= 0.5 => TerrainCategory::Taiga,
        (t, _) if t < 0.35 => TerrainCategory::ColdSteppe,
        (t, m) if t < 0.65 && m >= 0.66 => TerrainCategory::TemperateRainforest,
        (t, m) if t < 0.65 && m >= 0.33 => TerrainCategory::TemperateForest,
        (t, m) if t < 0.65 && m >= 0.15 => TerrainCategory::Grassland,
        (t, _) if t < 0.65 => TerrainCategory::Steppe,
        (_, m) if m >= 0.66 => TerrainCategory::TropicalRainforest,
        (_, m) if m >= 0.3 => TerrainCategory::Savanna,
        _ => TerrainCategory::Desert,
    }
}
