//! Corner masks and the influence vector hook.
//!
//! By default every lattice corner picks one entry of the possibility set
//! through the index stream. An [`InfluenceOverride`] can pin individual
//! corners instead; it must stay a pure function of its inputs or chunk seams
//! stop matching.

use serde::{Deserialize, Serialize};

use crate::perlin::octave::OctaveChunk;
use crate::vector::{Vec2, VectorSpace};

/// The four corners of a unit chunk. The order only fixes array indexing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Corner {
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

impl Corner {
    pub const ALL: [Corner; 4] = [Corner::TopLeft, Corner::TopRight, Corner::BottomLeft, Corner::BottomRight];

    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    /// Lattice offset from the chunk's top-left point.
    pub fn offset(self) -> (i64, i64) {
        match self {
            Corner::TopLeft     => (0, 0),
            Corner::TopRight    => (1, 0),
            Corner::BottomLeft  => (0, 1),
            Corner::BottomRight => (1, 1),
        }
    }

    /// Location in the chunk's unit square (y grows downwards).
    pub fn position(self) -> Vec2 {
        let (dx, dy) = self.offset();
        Vec2::new(dx as f32, dy as f32)
    }

    pub fn is_left(self) -> bool {
        matches!(self, Corner::TopLeft | Corner::BottomLeft)
    }

    pub fn is_top(self) -> bool {
        matches!(self, Corner::TopLeft | Corner::TopRight)
    }
}

/// The resolved data for one chunk corner: a unit direction and the
/// influence vector it carries.
#[derive(Debug, Clone, PartialEq)]
pub struct CornerInfluence<E> {
    pub direction: Vec2,
    pub influence: E,
}

impl<E: VectorSpace> CornerInfluence<E> {
    pub fn new(direction: Vec2, influence: E) -> Self {
        Self { direction, influence }
    }

    /// Contribution of this corner at distance vector `offset`:
    /// `influence · (direction ⋅ offset)`.
    #[inline]
    pub fn contribution(&self, offset: Vec2) -> E {
        self.influence.scale(self.direction.dot(offset))
    }
}

/// Optional per-corner replacement of the default possibility draw.
///
/// Returning `None` falls back to the default. Answers must depend only on
/// the arguments, and two calls with the same `(seed, spiral_index)` must agree.
pub trait InfluenceOverride<E> {
    /// Corner of a level-0 chunk `(cx, cy)`.
    fn main_influence(&self, seed: i64, spiral_index: u64, cx: i64, cy: i64, corner: Corner) -> Option<E> {
        let _ = (seed, spiral_index, cx, cy, corner);
        None
    }

    /// Corner of a sub-octave chunk.
    fn octave_influence(&self, seed: i64, spiral_index: u64, corner: Corner, chunk: &OctaveChunk<'_>) -> Option<E> {
        let _ = (seed, spiral_index, corner, chunk);
        None
    }

    /// Entry point used by the generator for a corner of any level.
    fn chunk_influence(&self, seed: i64, spiral_index: u64, corner: Corner, chunk: &OctaveChunk<'_>) -> Option<E> {
        if chunk.is_main() {
            self.main_influence(seed, spiral_index, chunk.abs_x, chunk.abs_y, corner)
        } else {
            self.octave_influence(seed, spiral_index, corner, chunk)
        }
    }

    /// Dimension of every vector this override returns, when known up front.
    fn fixed_dim(&self) -> Option<usize> {
        None
    }
}

/// Always defers to the possibility set.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoOverride;

impl<E> InfluenceOverride<E> for NoOverride {}

/// Adapts a closure `(seed, spiral_index, corner, chunk) -> Option<E>` into an
/// override used at every level, including the main one.
///
/// Inside a generator the closure sees the configured lacunarity at every
/// level. A direct `main_influence` call has no generator to ask, so the
/// chunk it passes reports a lacunarity of 1.
pub struct OverrideFn<F>(pub F);

impl<E, F> InfluenceOverride<E> for OverrideFn<F>
where
    F: Fn(i64, u64, Corner, &OctaveChunk<'_>) -> Option<E>,
{
    fn main_influence(&self, seed: i64, spiral_index: u64, cx: i64, cy: i64, corner: Corner) -> Option<E> {
        let chunk = OctaveChunk::main(cx, cy, 1);
        (self.0)(seed, spiral_index, corner, &chunk)
    }

    fn octave_influence(&self, seed: i64, spiral_index: u64, corner: Corner, chunk: &OctaveChunk<'_>) -> Option<E> {
        (self.0)(seed, spiral_index, corner, chunk)
    }

    fn chunk_influence(&self, seed: i64, spiral_index: u64, corner: Corner, chunk: &OctaveChunk<'_>) -> Option<E> {
        (self.0)(seed, spiral_index, corner, chunk)
    }
}

/// Pins every lattice corner on a main-chunk seam to the zero vector, so
/// each main chunk's selected borders evaluate to exactly zero.
///
/// At level 0 every corner sits on both kinds of seam; deeper levels only
/// touch a seam along the parent chain's outermost sub-chunks.
#[derive(Debug, Clone)]
pub struct ZeroSeams<E> {
    /// Pin the lines `x = cx` between horizontally adjacent chunks.
    pub vertical: bool,
    /// Pin the lines `y = cy` between vertically adjacent chunks.
    pub horizontal: bool,
    zero: E,
}

impl<E: VectorSpace> ZeroSeams<E> {
    /// `like` only provides the shape of the zero vector; it must match the
    /// generator's dimension or `ChunkNoise::with_override` rejects it.
    pub fn new(like: &E, vertical: bool, horizontal: bool) -> Self {
        Self { vertical, horizontal, zero: like.zero_like() }
    }

    fn on_seam(&self, corner: Corner, chunk: &OctaveChunk<'_>) -> bool {
        let last = i64::from(chunk.lacunarity()) - 1;
        let edge_x = if corner.is_left() { 0 } else { last };
        let edge_y = if corner.is_top() { 0 } else { last };
        let vertical = self.vertical && chunk.all_levels(|c| c.is_main() || c.rel_x == edge_x);
        let horizontal = self.horizontal && chunk.all_levels(|c| c.is_main() || c.rel_y == edge_y);
        vertical || horizontal
    }
}

impl<E: VectorSpace> InfluenceOverride<E> for ZeroSeams<E> {
    fn main_influence(&self, _seed: i64, _spiral_index: u64, _cx: i64, _cy: i64, _corner: Corner) -> Option<E> {
        (self.vertical || self.horizontal).then(|| self.zero.clone())
    }

    fn octave_influence(&self, _seed: i64, _spiral_index: u64, corner: Corner, chunk: &OctaveChunk<'_>) -> Option<E> {
        self.on_seam(corner, chunk).then(|| self.zero.clone())
    }

    fn fixed_dim(&self) -> Option<usize> {
        Some(self.zero.dim())
    }
}
