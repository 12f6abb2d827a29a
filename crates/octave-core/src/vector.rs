//! Inner-product vector spaces over `f32`.
//!
//! The generator is generic over the value it produces per pixel: a scalar,
//! a colour, or an arbitrary n-dimensional influence vector. All arithmetic
//! is value-semantic; nothing here mutates in place.

use std::fmt::Debug;

use serde::{Deserialize, Serialize};

use crate::error::NoiseError;

/// An element of an inner-product space over `f32`.
///
/// `lerp(a, b, 0.0) == a` and `lerp(a, b, 1.0) == b` exactly for finite values.
pub trait VectorSpace: Clone + Debug {
    fn add(&self, other: &Self) -> Self;

    fn scale(&self, factor: f32) -> Self;

    fn dot(&self, other: &Self) -> f32;

    /// Coordinates in the underlying basis.
    fn components(&self) -> &[f32];

    /// Apply `f` to every coordinate.
    fn map_components(&self, f: impl FnMut(f32) -> f32) -> Self;

    fn dim(&self) -> usize {
        self.components().len()
    }

    fn sub(&self, other: &Self) -> Self {
        self.add(&other.scale(-1.0))
    }

    /// Linear interpolation; `t` is expected in `[0, 1]`.
    fn lerp(&self, other: &Self, t: f32) -> Self {
        other.scale(t).add(&self.scale(1.0 - t))
    }

    /// The zero vector of the same shape as `self`.
    fn zero_like(&self) -> Self {
        self.scale(0.0)
    }

    fn norm(&self) -> f32 {
        self.dot(self).sqrt()
    }
}

// ── Scalars ───────────────────────────────────────────────────────────────────

impl VectorSpace for f32 {
    #[inline]
    fn add(&self, other: &Self) -> Self {
        self + other
    }

    #[inline]
    fn scale(&self, factor: f32) -> Self {
        self * factor
    }

    #[inline]
    fn dot(&self, other: &Self) -> f32 {
        self * other
    }

    fn components(&self) -> &[f32] {
        std::slice::from_ref(self)
    }

    fn map_components(&self, mut f: impl FnMut(f32) -> f32) -> Self {
        f(*self)
    }

    fn norm(&self) -> f32 {
        self.abs()
    }
}

// ── Fixed-size arrays (colours, small directions) ────────────────────────────

impl<const N: usize> VectorSpace for [f32; N] {
    #[inline]
    fn add(&self, other: &Self) -> Self {
        std::array::from_fn(|i| self[i] + other[i])
    }

    #[inline]
    fn scale(&self, factor: f32) -> Self {
        std::array::from_fn(|i| self[i] * factor)
    }

    #[inline]
    fn dot(&self, other: &Self) -> f32 {
        self.iter().zip(other).map(|(a, b)| a * b).sum()
    }

    fn components(&self) -> &[f32] {
        self.as_slice()
    }

    fn map_components(&self, mut f: impl FnMut(f32) -> f32) -> Self {
        std::array::from_fn(|i| f(self[i]))
    }
}

/// The `N` standard basis vectors of `[f32; N]`, the i-th at index i.
pub fn standard_basis<const N: usize>() -> Vec<[f32; N]> {
    (0..N)
        .map(|i| std::array::from_fn(|j| if i == j { 1.0 } else { 0.0 }))
        .collect()
}

// ── Runtime-dimension vectors ─────────────────────────────────────────────────

/// A vector whose dimension is only known at runtime.
///
/// Arithmetic between two `VecN` of different lengths panics; use
/// [`VecN::try_add`] / [`VecN::check_same_dim`] where a `Result` is wanted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VecN(Vec<f32>);

impl VecN {
    pub fn new(components: Vec<f32>) -> Self {
        Self(components)
    }

    /// A vector of dimension `dim` with every component equal to `value`.
    pub fn splat(dim: usize, value: f32) -> Self {
        Self(vec![value; dim])
    }

    /// A 3-component colour vector.
    pub fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self(vec![r, g, b])
    }

    /// The `dim` standard basis vectors, the i-th at index i.
    pub fn standard_basis(dim: usize) -> Vec<Self> {
        (0..dim)
            .map(|i| {
                let mut v = Self::splat(dim, 0.0);
                v.0[i] = 1.0;
                v
            })
            .collect()
    }

    #[inline]
    pub fn get(&self, i: usize) -> f32 {
        self.0[i]
    }

    pub fn into_inner(self) -> Vec<f32> {
        self.0
    }

    pub fn check_same_dim(&self, other: &Self) -> Result<(), NoiseError> {
        if self.0.len() == other.0.len() {
            Ok(())
        } else {
            Err(NoiseError::dimension_mismatch(self.0.len(), other.0.len()))
        }
    }

    pub fn try_add(&self, other: &Self) -> Result<Self, NoiseError> {
        self.check_same_dim(other)?;
        Ok(self.add(other))
    }

    fn assert_same_dim(&self, other: &Self, op: &str) {
        assert!(
            self.0.len() == other.0.len(),
            "VecN::{op} on mismatched dimensions {} and {}",
            self.0.len(),
            other.0.len()
        );
    }
}

impl From<Vec<f32>> for VecN {
    fn from(v: Vec<f32>) -> Self {
        Self(v)
    }
}

impl VectorSpace for VecN {
    fn add(&self, other: &Self) -> Self {
        self.assert_same_dim(other, "add");
        Self(self.0.iter().zip(&other.0).map(|(a, b)| a + b).collect())
    }

    fn scale(&self, factor: f32) -> Self {
        Self(self.0.iter().map(|a| a * factor).collect())
    }

    fn dot(&self, other: &Self) -> f32 {
        self.assert_same_dim(other, "dot");
        self.0.iter().zip(&other.0).map(|(a, b)| a * b).sum()
    }

    fn components(&self) -> &[f32] {
        &self.0
    }

    fn map_components(&self, f: impl FnMut(f32) -> f32) -> Self {
        Self(self.0.iter().copied().map(f).collect())
    }

    fn lerp(&self, other: &Self, t: f32) -> Self {
        self.assert_same_dim(other, "lerp");
        Self(self.0.iter().zip(&other.0).map(|(a, b)| t * b + (1.0 - t) * a).collect())
    }
}

// ── 2D geometry ───────────────────────────────────────────────────────────────

/// A plain 2D vector used for pixel/corner geometry and corner directions.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Unit-radius vector at angle `theta` (radians).
    pub fn from_angle(theta: f32) -> Self {
        let (sin, cos) = theta.sin_cos();
        Self { x: cos, y: sin }
    }

    #[inline]
    pub fn sub(self, other: Self) -> Self {
        Self { x: self.x - other.x, y: self.y - other.y }
    }

    #[inline]
    pub fn dot(self, other: Self) -> f32 {
        self.x * other.x + self.y * other.y
    }

    pub fn length(self) -> f32 {
        self.dot(self).sqrt()
    }
}
