//! Single-octave chunk interpolation.
//!
//! Each corner contributes `influence · (direction ⋅ (corner − pixel))`; the
//! four contributions are blended horizontally (top pair, bottom pair) and
//! then vertically, both with the quintic fade curve.

use crate::grid::Grid;
use crate::influence::{Corner, CornerInfluence};
use crate::vector::{Vec2, VectorSpace};

use super::geometry::OctaveGeometry;

/// Quintic fade `6t⁵ − 15t⁴ + 10t³`; first and second derivatives vanish at 0 and 1.
#[inline]
pub fn smoothstep(t: f32) -> f32 {
    t * t * t * (t * (t * 6.0 - 15.0) + 10.0)
}

/// Blend the four corner contributions at one point.
///
/// `offsets[c]` is the corner-minus-point vector for corner `c`; `wx`/`wy`
/// are the already-smoothed blend weights.
#[inline]
fn blend<E: VectorSpace>(corners: &[CornerInfluence<E>; 4], offsets: [Vec2; 4], wx: f32, wy: f32) -> E {
    let [tl, tr, bl, br] = Corner::ALL.map(|c| corners[c.index()].contribution(offsets[c.index()]));
    let top = tl.lerp(&tr, wx);
    let bottom = bl.lerp(&br, wx);
    top.lerp(&bottom, wy)
}

/// Run one octave over one chunk: a `pixel_size × pixel_size` grid of `E`.
pub fn interpolate_chunk<E: VectorSpace>(corners: &[CornerInfluence<E>; 4], geometry: &OctaveGeometry) -> Grid<E> {
    let n = geometry.pixel_size;
    Grid::from_fn(n, n, |x, y| {
        let offsets = Corner::ALL.map(|c| geometry.distance(c, x, y));
        blend(corners, offsets, geometry.weight(x), geometry.weight(y))
    })
}

/// Evaluate the same surface at one point `(u, v)` of the chunk's unit square.
pub fn interpolate_point<E: VectorSpace>(corners: &[CornerInfluence<E>; 4], u: f32, v: f32) -> E {
    let at = Vec2::new(u, v);
    let offsets = Corner::ALL.map(|c| c.position().sub(at));
    blend(corners, offsets, smoothstep(u), smoothstep(v))
}
