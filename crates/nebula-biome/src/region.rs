//! Integer lattice coordinates and inclusive rectangular regions.

/// A lattice coordinate in biome (quarter-resolution) units.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Coordinate {
    pub x: i32,
    pub z: i32,
}

impl Coordinate {
    pub const fn new(x: i32, z: i32) -> Self {
        Self { x, z }
    }
}

/// Inclusive rectangle of lattice coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Region {
    pub min_x: i32,
    pub min_z: i32,
    pub max_x: i32,
    pub max_z: i32,
}

impl Region {
    pub const fn new(min_x: i32, min_z: i32, max_x: i32, max_z: i32) -> Self {
        Self {
            min_x,
            min_z,
            max_x,
            max_z,
        }
    }

    /// The square `center ± (extent >> 2)` on both axes.
    ///
    /// Any `extent` below 4 yields the single coordinate `(center_x, center_z)`.
    pub fn around(center_x: i32, center_z: i32, extent: u32) -> Self {
        let radius = i32::try_from(extent >> 2).unwrap_or(i32::MAX);
        Self {
            min_x: center_x.saturating_sub(radius),
            min_z: center_z.saturating_sub(radius),
            max_x: center_x.saturating_add(radius),
            max_z: center_z.saturating_add(radius),
        }
    }

    /// Returns `true` if the region contains no coordinates.
    pub fn is_empty(&self) -> bool {
        self.min_x > self.max_x || self.min_z > self.max_z
    }

    /// Number of coordinates in the region, saturating at `u64::MAX` for the
    /// full `i32` plane.
    pub fn len(&self) -> u64 {
        if self.is_empty() {
            return 0;
        }
        let width = (i64::from(self.max_x) - i64::from(self.min_x) + 1) as u64;
        let depth = (i64::from(self.max_z) - i64::from(self.min_z) + 1) as u64;
        width.saturating_mul(depth)
    }

    pub fn contains(&self, c: Coordinate) -> bool {
        (self.min_x..=self.max_x).contains(&c.x) && (self.min_z..=self.max_z).contains(&c.z)
    }

    /// Lazily walks the region row by row (`x` fastest).
    pub fn points(&self) -> RegionPoints {
        RegionPoints {
            region: *self,
            next: (!self.is_empty()).then_some(Coordinate::new(self.min_x, self.min_z)),
        }
    }
}

/// Iterator returned by [`Region::points`].
#[derive(Clone, Debug)]
pub struct RegionPoints {
    region: Region,
    next: Option<Coordinate>,
}

impl Iterator for RegionPoints {
    type Item = Coordinate;

    fn next(&mut self) -> Option<Coordinate> {
        let current = self.next?;
        self.next = if current.x < self.region.max_x {
            Some(Coordinate::new(current.x + 1, current.z))
        } else if current.z < self.region.max_z {
            Some(Coordinate::new(self.region.min_x, current.z + 1))
        } else {
            None
        };
        Some(current)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_around_small_extent_is_single_point() {
        for extent in 0..4 {
            let region = Region::around(10, -3, extent);
            assert_eq!(region.len(), 1);
            assert_eq!(region.points().collect::<Vec<_>>(), vec![Coordinate::new(10, -3)]);
        }
    }

    #[test]
    fn test_around_quarter_extent() {
        let region = Region::around(0, 0, 16);
        assert_eq!(region, Region::new(-4, -4, 4, 4));
        assert_eq!(region.len(), 81);
        assert_eq!(region.points().count(), 81);
    }

    #[test]
    fn test_points_row_major_and_unique() {
        let region = Region::new(-1, 5, 1, 6);
        let points: Vec<_> = region.points().collect();
        assert_eq!(
            points,
            vec![
                Coordinate::new(-1, 5),
                Coordinate::new(0, 5),
                Coordinate::new(1, 5),
                Coordinate::new(-1, 6),
                Coordinate::new(0, 6),
                Coordinate::new(1, 6),
            ]
        );
        assert!(points.iter().all(|&p| region.contains(p)));
    }

    #[test]
    fn test_empty_region() {
        let region = Region::new(3, 0, 2, 0);
        assert!(region.is_empty());
        assert_eq!(region.len(), 0);
        assert_eq!(region.points().next(), None);
    }

    #[test]
    fn test_region_at_i32_edge_terminates() {
        let region = Region::around(i32::MAX, i32::MIN, 8);
        assert_eq!(region.max_x, i32::MAX);
        assert_eq!(region.min_z, i32::MIN);
        assert_eq!(region.points().count() as u64, region.len());
    }

    #[test]
    fn test_len_of_full_plane_saturates() {
        let region = Region::new(i32::MIN, i32::MIN, i32::MAX, i32::MAX);
        assert_eq!(region.len(), u64::MAX);
        let strip = Region::new(i32::MIN, 0, i32::MAX, 0);
        assert_eq!(strip.len(), 1 << 32);
    }
}
