//! Position of a chunk inside the octave hierarchy.
//!
//! The hierarchy is walked depth-first on the stack: each child borrows its
//! parent, so the chain from any chunk back to the main chunk is a plain
//! linked list of shared references that lives exactly as long as one
//! generation call.

use crate::influence::Corner;
use crate::stream::spiral_index;

/// One chunk of one octave level.
///
/// `abs_x/abs_y` are lattice coordinates in the level's own units and key
/// the corner identities; `rel_x/rel_y` locate the chunk inside its parent
/// (`0..lacunarity`). At the main level both pairs are the chunk coordinate.
#[derive(Debug, Clone, Copy)]
pub struct OctaveChunk<'a> {
    pub level: usize,
    pub rel_x: i64,
    pub rel_y: i64,
    pub abs_x: i64,
    pub abs_y: i64,
    lacunarity: u32,
    parent: Option<&'a OctaveChunk<'a>>,
}

impl<'a> OctaveChunk<'a> {
    /// The level-0 chunk at `(cx, cy)`.
    pub fn main(cx: i64, cy: i64, lacunarity: u32) -> Self {
        Self { level: 0, rel_x: cx, rel_y: cy, abs_x: cx, abs_y: cy, lacunarity, parent: None }
    }

    /// Sub-chunk `(i, j)` of this chunk on the next octave level.
    pub fn child<'s>(&'s self, i: u32, j: u32) -> OctaveChunk<'s> {
        let l = i64::from(self.lacunarity);
        OctaveChunk {
            level: self.level + 1,
            rel_x: i64::from(i),
            rel_y: i64::from(j),
            abs_x: self.abs_x * l + i64::from(i),
            abs_y: self.abs_y * l + i64::from(j),
            lacunarity: self.lacunarity,
            parent: Some(self),
        }
    }

    pub fn parent(&self) -> Option<&'a OctaveChunk<'a>> {
        self.parent
    }

    pub fn is_main(&self) -> bool {
        self.parent.is_none()
    }

    pub fn lacunarity(&self) -> u32 {
        self.lacunarity
    }

    /// Coordinates of the level-0 chunk this chunk descends from.
    pub fn main_coords(&self) -> (i64, i64) {
        self.ancestors()
            .last()
            .map_or((self.abs_x, self.abs_y), |m| (m.abs_x, m.abs_y))
    }

    /// `self`, then its parent, up to and including the main chunk.
    pub fn ancestors(&self) -> impl Iterator<Item = &OctaveChunk<'a>> + '_ {
        std::iter::successors(Some(self), |c| c.parent)
    }

    /// True when `pred` holds for this chunk and every ancestor.
    pub fn all_levels<F>(&self, pred: F) -> bool
    where
        F: FnMut(&OctaveChunk<'a>) -> bool,
    {
        self.ancestors().all(pred)
    }

    /// Lattice point (in this level's units) of one of the chunk's corners.
    pub fn corner_lattice(&self, corner: Corner) -> (i64, i64) {
        let (dx, dy) = corner.offset();
        (self.abs_x + dx, self.abs_y + dy)
    }

    /// Spiral index of one corner; shared by every chunk touching that point.
    pub fn corner_index(&self, corner: Corner) -> u64 {
        let (x, y) = self.corner_lattice(corner);
        spiral_index(x, y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn children_extend_absolute_coordinates() {
        let main = OctaveChunk::main(3, -2, 2);
        let c = main.child(1, 0);
        assert_eq!((c.abs_x, c.abs_y), (7, -4));
        assert_eq!((c.rel_x, c.rel_y), (1, 0));
        let g = c.child(0, 1);
        assert_eq!((g.abs_x, g.abs_y), (14, -7));
        assert_eq!(g.level, 2);
        assert_eq!(g.main_coords(), (3, -2));
        assert!(main.is_main() && !g.is_main());
    }

    #[test]
    fn ancestor_chain_ends_at_main() {
        let main = OctaveChunk::main(0, 0, 3);
        let a = main.child(2, 2);
        let b = a.child(2, 0);
        let levels: Vec<usize> = b.ancestors().map(|c| c.level).collect();
        assert_eq!(levels, vec![2, 1, 0]);
        assert!(b.all_levels(|c| c.is_main() || c.rel_x == 2));
        assert!(!b.all_levels(|c| c.is_main() || c.rel_y == 2));
    }

    #[test]
    fn neighbours_share_corner_indices() {
        let left = OctaveChunk::main(4, 9, 1);
        let right = OctaveChunk::main(5, 9, 1);
        assert_eq!(left.corner_index(Corner::TopRight), right.corner_index(Corner::TopLeft));
        assert_eq!(left.corner_index(Corner::BottomRight), right.corner_index(Corner::BottomLeft));

        let main = OctaveChunk::main(0, 0, 2);
        let a = main.child(0, 0);
        let b = main.child(0, 1);
        assert_eq!(a.corner_index(Corner::BottomLeft), b.corner_index(Corner::TopLeft));
    }
}
