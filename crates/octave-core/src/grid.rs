use serde::{Deserialize, Serialize};

use crate::vector::VectorSpace;

/// A 2D array of field values, row-major, indexed `(x, y)` with `y` growing
/// downwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Grid<E> {
    pub width: usize,
    pub height: usize,
    data: Vec<E>,
}

impl<E> Grid<E> {
    /// Build a grid by evaluating `f(x, y)` for every cell in row-major order.
    pub fn from_fn(width: usize, height: usize, mut f: impl FnMut(usize, usize) -> E) -> Self {
        let mut data = Vec::with_capacity(width * height);
        for y in 0..height {
            for x in 0..width {
                data.push(f(x, y));
            }
        }
        Self { width, height, data }
    }

    #[inline]
    pub fn get(&self, x: usize, y: usize) -> &E {
        &self.data[y * self.width + x]
    }

    #[inline]
    pub fn set(&mut self, x: usize, y: usize, val: E) {
        self.data[y * self.width + x] = val;
    }

    /// Values of row `y`, left to right.
    pub fn row(&self, y: usize) -> &[E] {
        &self.data[y * self.width..(y + 1) * self.width]
    }

    pub fn values(&self) -> impl Iterator<Item = &E> {
        self.data.iter()
    }

    pub fn into_values(self) -> Vec<E> {
        self.data
    }

    /// Apply `f` to every cell, keeping the layout.
    pub fn map<T>(&self, f: impl FnMut(&E) -> T) -> Grid<T> {
        Grid { width: self.width, height: self.height, data: self.data.iter().map(f).collect() }
    }
}

impl<E: VectorSpace> Grid<E> {
    /// `self[i] += weight * other[i]` for every cell.
    ///
    /// # Panics
    /// When the two grids differ in size.
    pub fn add_scaled(&mut self, other: &Grid<E>, weight: f32) {
        assert_eq!((self.width, self.height), (other.width, other.height), "grid size mismatch");
        for (v, o) in self.data.iter_mut().zip(&other.data) {
            *v = v.add(&o.scale(weight));
        }
    }

    /// Smallest and largest component over every value, `(min, max)`.
    ///
    /// `(INFINITY, NEG_INFINITY)` for an empty grid.
    pub fn component_range(&self) -> (f32, f32) {
        self.data
            .iter()
            .flat_map(|v| v.components().iter().copied())
            .fold((f32::INFINITY, f32::NEG_INFINITY), |(lo, hi), c| (lo.min(c), hi.max(c)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_fn_is_row_major() {
        let g = Grid::from_fn(3, 2, |x, y| (x + 10 * y) as f32);
        assert_eq!(g.row(1), &[10.0, 11.0, 12.0]);
        assert_eq!(*g.get(2, 0), 2.0);
    }

    #[test]
    fn component_range_spans_all_components() {
        let g = Grid::from_fn(2, 2, |x, y| [x as f32 - 1.0, y as f32 * 3.0]);
        assert_eq!(g.component_range(), (-1.0, 3.0));
    }

    #[test]
    fn add_scaled_accumulates_detail() {
        let mut base = Grid::from_fn(2, 2, |x, _| x as f32);
        let detail = Grid::from_fn(2, 2, |_, y| y as f32);
        base.add_scaled(&detail, 0.5);
        assert_eq!(base.into_values(), vec![0.0, 1.0, 0.5, 1.5]);
    }
}
