//! Stitching neighbouring main chunks into one field.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::NoiseError;
use crate::generator::{normalize, ChunkNoise, NoiseChunk};
use crate::grid::Grid;
use crate::influence::InfluenceOverride;
use crate::stream::IndexStream;
use crate::vector::VectorSpace;

#[cfg(feature = "threading")]
use rayon::prelude::*;

/// Upper limit on the pixels of one stitched region.
pub const MAX_REGION_PIXELS: usize = 1 << 28;

/// `cols × rows` main chunks starting at chunk `(x0, y0)`, stitched row-major.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NoiseRegion<E> {
    pub x0: i64,
    pub y0: i64,
    pub cols: usize,
    pub rows: usize,
    pub chunk_size: usize,
    pub field: Grid<E>,
    pub min: f32,
    pub max: f32,
}

impl<E: VectorSpace> NoiseRegion<E> {
    /// Tile `chunks` (row-major, `cols` per row) into one grid.
    fn stitch(x0: i64, y0: i64, cols: usize, rows: usize, chunk_size: usize, chunks: Vec<NoiseChunk<E>>) -> Self {
        let (min, max) = chunks
            .iter()
            .fold((f32::INFINITY, f32::NEG_INFINITY), |(lo, hi), c| (lo.min(c.min), hi.max(c.max)));
        let field = Grid::from_fn(cols * chunk_size, rows * chunk_size, |x, y| {
            let chunk = &chunks[(y / chunk_size) * cols + x / chunk_size];
            chunk.field.get(x % chunk_size, y % chunk_size).clone()
        });
        Self { x0, y0, cols, rows, chunk_size, field, min, max }
    }

    /// Value at region pixel `(x, y)` mapped onto `[0, 1]` against the region's range.
    pub fn normalized(&self, x: usize, y: usize) -> E {
        normalize(self.field.get(x, y), self.min, self.max)
    }

    /// Chunk coordinate covering region pixel `(x, y)`.
    pub fn chunk_of(&self, x: usize, y: usize) -> (i64, i64) {
        (self.x0 + (x / self.chunk_size) as i64, self.y0 + (y / self.chunk_size) as i64)
    }
}

/// Row-major chunk coordinates of a region, after checking that it fits.
fn region_coords(x0: i64, y0: i64, cols: usize, rows: usize, pixel_size: usize) -> Result<Vec<(i64, i64)>, NoiseError> {
    if cols == 0 || rows == 0 {
        return Err(NoiseError::config(format!("region of {cols}x{rows} chunks is empty")));
    }
    let too_large = || NoiseError::RegionTooLarge { cols, rows, pixel_size };
    let pixels = cols
        .checked_mul(pixel_size)
        .zip(rows.checked_mul(pixel_size))
        .and_then(|(w, h)| w.checked_mul(h))
        .filter(|&n| n <= MAX_REGION_PIXELS)
        .ok_or_else(too_large)?;
    let last_x = i64::try_from(cols - 1).ok().and_then(|c| x0.checked_add(c));
    let last_y = i64::try_from(rows - 1).ok().and_then(|r| y0.checked_add(r));
    if last_x.is_none() || last_y.is_none() {
        return Err(too_large());
    }
    debug!(cols, rows, pixels, "region layout");

    Ok((0..rows as i64)
        .flat_map(|j| (0..cols as i64).map(move |i| (x0 + i, y0 + j)))
        .collect())
}

impl<E, O, S> ChunkNoise<E, O, S>
where
    E: VectorSpace,
    O: InfluenceOverride<E>,
    S: IndexStream,
{
    /// Generate `cols × rows` neighbouring chunks from `(x0, y0)` and stitch
    /// them. `min`/`max` span the whole region.
    #[tracing::instrument(level = "debug", skip(self))]
    pub fn generate_region(
        &self,
        seed: i64,
        x0: i64,
        y0: i64,
        cols: usize,
        rows: usize,
    ) -> Result<NoiseRegion<E>, NoiseError> {
        let coords = region_coords(x0, y0, cols, rows, self.pixel_size())?;
        let chunks = coords
            .into_iter()
            .map(|(cx, cy)| self.generate(seed, cx, cy))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(NoiseRegion::stitch(x0, y0, cols, rows, self.pixel_size(), chunks))
    }
}

#[cfg(feature = "threading")]
impl<E, O, S> ChunkNoise<E, O, S>
where
    E: VectorSpace + Send + Sync,
    O: InfluenceOverride<E> + Sync,
    S: IndexStream + Sync,
{
    /// Generate independent chunks on the rayon pool, in input order.
    pub fn generate_chunks_par(&self, seed: i64, coords: &[(i64, i64)]) -> Result<Vec<NoiseChunk<E>>, NoiseError> {
        coords.par_iter().map(|&(cx, cy)| self.generate(seed, cx, cy)).collect()
    }

    /// [`Self::generate_region`] with chunks generated in parallel.
    #[tracing::instrument(level = "debug", skip(self))]
    pub fn generate_region_par(
        &self,
        seed: i64,
        x0: i64,
        y0: i64,
        cols: usize,
        rows: usize,
    ) -> Result<NoiseRegion<E>, NoiseError> {
        let coords = region_coords(x0, y0, cols, rows, self.pixel_size())?;
        let chunks = self.generate_chunks_par(seed, &coords)?;
        Ok(NoiseRegion::stitch(x0, y0, cols, rows, self.pixel_size(), chunks))
    }
}
