//! Fixed-resolution nearest-neighbor lookup table over the unit square.
//!
//! Each cell stores the labeled point closest to the cell center, so a
//! continuous `(a, b)` pair resolves in O(1) by quantizing into cell indices.

/// A `resolution × resolution` table of precomputed nearest entries.
///
/// A grid generated from an empty point set has no cells and every lookup
/// yields `None`.
#[derive(Clone, Debug)]
pub struct NearestNeighborGrid<T> {
    resolution: usize,
    /// Row-major by the first axis: `cells[a_index * resolution + b_index]`.
    cells: Vec<Option<T>>,
}

impl<T: Clone> NearestNeighborGrid<T> {
    /// Builds a grid by snapshotting, for every cell center, the point in
    /// `points` with the smallest squared distance on `(axis_a, axis_b)`.
    ///
    /// Ties go to the point that appears first in `points`. A `resolution`
    /// of zero is treated as one.
    pub fn generate<A, B>(resolution: usize, points: &[T], axis_a: A, axis_b: B) -> Self
    where
        A: Fn(&T) -> f32,
        B: Fn(&T) -> f32,
    {
        let resolution = resolution.max(1);
        if points.is_empty() {
            return Self {
                resolution,
                cells: Vec::new(),
            };
        }

        let coords: Vec<(f32, f32)> = points.iter().map(|p| (axis_a(p), axis_b(p))).collect();
        let size = resolution as f32;
        let mut cells = Vec::with_capacity(resolution * resolution);

        for i in 0..resolution {
            let center_a = (i as f32 + 0.5) / size;
            for j in 0..resolution {
                let center_b = (j as f32 + 0.5) / size;
                let nearest = nearest_index(&coords, center_a, center_b);
                cells.push(Some(points[nearest].clone()));
            }
        }

        Self { resolution, cells }
    }
}

impl<T> NearestNeighborGrid<T> {
    /// Looks up the entry for a continuous `(a, b)` pair.
    ///
    /// Both values are clamped to `[0.0, 1.0]` before quantization.
    /// `_noise` is carried through every lookup so that co-located candidates
    /// can later be separated by per-cell noise; the current layout stores a
    /// single entry per cell and does not consult it.
    pub fn get(&self, a: f32, b: f32, _noise: f32) -> Option<&T> {
        if self.cells.is_empty() {
            return None;
        }
        let i = self.quantize(a);
        let j = self.quantize(b);
        self.cells[i * self.resolution + j].as_ref()
    }

    /// Cell index for a single axis value.
    fn quantize(&self, value: f32) -> usize {
        let scaled = value.clamp(0.0, 1.0) * self.resolution as f32;
        // `as` saturates, so NaN lands on cell zero.
        (scaled.floor() as usize).min(self.resolution - 1)
    }

    /// Number of cells along each axis.
    pub fn resolution(&self) -> usize {
        self.resolution
    }

    /// Returns `true` if the grid was generated from an empty point set.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Iterates over every populated cell in row-major order.
    pub fn entries(&self) -> impl Iterator<Item = &T> {
        self.cells.iter().flatten()
    }
}

/// Index of the coordinate closest to `(a, b)`, first one wins on ties.
fn nearest_index(coords: &[(f32, f32)], a: f32, b: f32) -> usize {
    let mut best = 0;
    let mut best_dist = f32::INFINITY;
    for (index, &(pa, pb)) in coords.iter().enumerate() {
        let da = pa - a;
        let db = pb - b;
        let dist = da * da + db * db;
        if dist < best_dist {
            best = index;
            best_dist = dist;
        }
    }
    best
}
