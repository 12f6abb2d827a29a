//! Per-octave pixel geometry, shared by every chunk of that octave.

use crate::influence::Corner;
use crate::vector::Vec2;

use super::interpolate::smoothstep;

/// Precomputed distance vectors for one octave level.
///
/// Pixels are sampled at their centres: pixel `(x, y)` of a chunk `size`
/// pixels wide sits at `((x + 0.5) / size, (y + 0.5) / size)` in the chunk's
/// unit square. Depends only on `(level, pixel_size)`.
#[derive(Debug, Clone, PartialEq)]
pub struct OctaveGeometry {
    pub level: usize,
    pub pixel_size: usize,
    /// Corner position minus pixel position, per corner, row-major.
    distances: [Vec<Vec2>; 4],
    /// Smoothed blend weight for each row/column index.
    weights: Vec<f32>,
}

impl OctaveGeometry {
    pub fn new(level: usize, pixel_size: usize) -> Self {
        let centre = |i: usize| (i as f32 + 0.5) / pixel_size as f32;
        let distances = Corner::ALL.map(|corner| {
            let at = corner.position();
            let mut d = Vec::with_capacity(pixel_size * pixel_size);
            for y in 0..pixel_size {
                for x in 0..pixel_size {
                    d.push(at.sub(Vec2::new(centre(x), centre(y))));
                }
            }
            d
        });
        let weights = (0..pixel_size).map(|i| smoothstep(centre(i))).collect();
        Self { level, pixel_size, distances, weights }
    }

    /// Distance vector from pixel `(x, y)` to `corner`.
    #[inline]
    pub fn distance(&self, corner: Corner, x: usize, y: usize) -> Vec2 {
        self.distances[corner.index()][y * self.pixel_size + x]
    }

    /// Smoothed blend weight for column (or row) `i`.
    #[inline]
    pub fn weight(&self, i: usize) -> f32 {
        self.weights[i]
    }
}
