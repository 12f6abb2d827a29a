//! Octave recursion: the noise orchestrator.
//!
//! Level 0 interpolates the main chunk from its four corner vectors. Every
//! deeper level splits its parent into `lacunarity²` sub-chunks, interpolates
//! each one from its own corners and adds the tiled result back, weighted by
//! `persistence`. Level `n` draws from the stream seeded with `seed + n`.

use std::f32::consts::{FRAC_1_SQRT_2, TAU};

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::config::NoiseConfig;
use crate::error::NoiseError;
use crate::grid::Grid;
use crate::influence::{Corner, CornerInfluence, InfluenceOverride, NoOverride};
use crate::perlin::{interpolate_chunk, interpolate_point, OctaveChunk, OctaveGeometry};
use crate::stream::{DrawCache, IndexStream, ReplayStream, MAX_LATTICE_COORD};
use crate::vector::{Vec2, VectorSpace};

// ── Output ────────────────────────────────────────────────────────────────────

/// One generated main chunk plus the component range over all its values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NoiseChunk<E> {
    pub field: Grid<E>,
    pub max: f32,
    pub min: f32,
}

impl<E: VectorSpace> NoiseChunk<E> {
    /// Value at `(x, y)` with every component mapped from `[min, max]` onto `[0, 1]`.
    pub fn normalized(&self, x: usize, y: usize) -> E {
        self.normalized_with(x, y, self.min, self.max)
    }

    /// Like [`Self::normalized`] against an external range, e.g. the range of a
    /// whole region. A degenerate range maps to the zero vector.
    pub fn normalized_with(&self, x: usize, y: usize, min: f32, max: f32) -> E {
        normalize(self.field.get(x, y), min, max)
    }
}

/// Map every component of `value` from `[min, max]` onto `[0, 1]`.
pub(crate) fn normalize<E: VectorSpace>(value: &E, min: f32, max: f32) -> E {
    let range = max - min;
    if !(range.is_finite() && range > 0.0) {
        return value.zero_like();
    }
    value.map_components(|c| (c - min) / range)
}

// ── Generator ─────────────────────────────────────────────────────────────────

/// Deterministic chunked gradient noise over the vector space `E`.
///
/// `O` may pin individual corner vectors, `S` supplies the seeded draws.
/// The geometry tables are rebuilt only by the configuration methods, so one
/// generator can serve any number of `generate` calls, from any thread when
/// `O` and `S` allow it.
#[derive(Debug, Clone)]
pub struct ChunkNoise<E, O = NoOverride, S = ReplayStream> {
    config: NoiseConfig,
    possibilities: Vec<E>,
    geometries: Vec<OctaveGeometry>,
    influence: O,
    stream: S,
}

impl<E: VectorSpace> ChunkNoise<E> {
    /// Single-octave generator over `pixel_size × pixel_size` chunks.
    ///
    /// Every possibility must share the dimension of the first.
    pub fn new(pixel_size: usize, possibilities: Vec<E>) -> Result<Self, NoiseError> {
        Self::from_config(NoiseConfig { pixel_size, ..NoiseConfig::default() }, possibilities)
    }

    pub fn from_config(config: NoiseConfig, possibilities: Vec<E>) -> Result<Self, NoiseError> {
        let first = possibilities.first().ok_or(NoiseError::EmptyPossibilities)?;
        let dim = first.dim();
        if let Some(odd) = possibilities.iter().find(|p| p.dim() != dim) {
            return Err(NoiseError::config(format!(
                "possibility of dimension {} in a set of dimension {}",
                odd.dim(),
                dim
            )));
        }
        if u32::try_from(possibilities.len()).is_err() {
            return Err(NoiseError::config(format!(
                "{} possibilities exceed the index stream's u32 range",
                possibilities.len()
            )));
        }
        let mut noise = Self {
            config: config.clone(),
            possibilities,
            geometries: Vec::new(),
            influence: NoOverride,
            stream: ReplayStream,
        };
        noise.configure(&config)?;
        Ok(noise)
    }
}

impl<E, O, S> ChunkNoise<E, O, S>
where
    E: VectorSpace,
    O: InfluenceOverride<E>,
    S: IndexStream,
{
    /// Replace the influence override, keeping configuration and stream.
    ///
    /// Fails when the override declares a vector dimension other than the
    /// possibility set's.
    pub fn with_override<O2: InfluenceOverride<E>>(self, influence: O2) -> Result<ChunkNoise<E, O2, S>, NoiseError> {
        if let Some(dim) = influence.fixed_dim().filter(|&d| d != self.dim()) {
            return Err(NoiseError::config(format!(
                "override vectors of dimension {dim} for a generator of dimension {}",
                self.dim()
            )));
        }
        Ok(ChunkNoise {
            config: self.config,
            possibilities: self.possibilities,
            geometries: self.geometries,
            influence,
            stream: self.stream,
        })
    }

    /// Replace the index stream, keeping configuration and override.
    pub fn with_stream<S2: IndexStream>(self, stream: S2) -> ChunkNoise<E, O, S2> {
        ChunkNoise {
            config: self.config,
            possibilities: self.possibilities,
            geometries: self.geometries,
            influence: self.influence,
            stream,
        }
    }

    pub fn config(&self) -> &NoiseConfig {
        &self.config
    }

    pub fn possibilities(&self) -> &[E] {
        &self.possibilities
    }

    /// Dimension of every value this generator produces.
    pub fn dim(&self) -> usize {
        self.possibilities.first().map_or(0, VectorSpace::dim)
    }

    pub fn pixel_size(&self) -> usize {
        self.config.pixel_size
    }

    /// Geometry of octave `level`, if configured.
    pub fn geometry(&self, level: usize) -> Option<&OctaveGeometry> {
        self.geometries.get(level)
    }

    pub fn influence(&self) -> &O {
        &self.influence
    }

    // ── Configuration ─────────────────────────────────────────────────────────

    /// Set octave count, lacunarity and persistence together.
    ///
    /// Fails when the pixel size is not divisible by `lacunarity^(octaves-1)`;
    /// the generator is left untouched on error.
    pub fn set_octaves(&mut self, octaves: usize, lacunarity: u32, persistence: f32) -> Result<(), NoiseError> {
        let config = NoiseConfig::new(self.config.pixel_size, octaves, lacunarity, persistence);
        self.configure(&config)
    }

    pub fn set_lacunarity(&mut self, lacunarity: u32) -> Result<(), NoiseError> {
        let config = NoiseConfig { lacunarity, ..self.config.clone() };
        self.configure(&config)
    }

    pub fn set_persistence(&mut self, persistence: f32) -> Result<(), NoiseError> {
        let config = NoiseConfig { persistence, ..self.config.clone() };
        self.configure(&config)
    }

    /// Validate `config` and rebuild the per-level geometry tables.
    pub fn configure(&mut self, config: &NoiseConfig) -> Result<(), NoiseError> {
        config.validate()?;
        let geometries: Vec<OctaveGeometry> = config
            .level_sizes()
            .into_iter()
            .enumerate()
            .map(|(level, size)| OctaveGeometry::new(level, size))
            .collect();
        debug!(
            pixel_size = config.pixel_size,
            octaves = config.octaves,
            lacunarity = config.lacunarity,
            persistence = config.persistence,
            "rebuilt octave geometry"
        );
        self.config = config.clone();
        self.geometries = geometries;
        Ok(())
    }

    // ── Bounds ────────────────────────────────────────────────────────────────

    /// Largest norm in the possibility set.
    pub fn max_influence_norm(&self) -> f32 {
        self.possibilities.iter().map(VectorSpace::norm).fold(0.0, f32::max)
    }

    /// `√½ · Σ_{n<octaves} |p|ⁿ · max‖possibility‖`: no component of any
    /// generated value exceeds this while overrides stay within the
    /// possibility norms.
    pub fn weak_bound(&self) -> f32 {
        FRAC_1_SQRT_2 * self.config.amplitude_sum() * self.max_influence_norm()
    }

    /// The same bound over infinitely many octaves; infinite when `|p| ≥ 1`.
    pub fn strict_bound(&self) -> f32 {
        let p = self.config.persistence.abs();
        if p >= 1.0 {
            return f32::INFINITY;
        }
        FRAC_1_SQRT_2 * self.max_influence_norm() / (1.0 - p)
    }

    // ── Generation ────────────────────────────────────────────────────────────

    /// Generate main chunk `(cx, cy)` for `seed`.
    ///
    /// The result depends only on the arguments and the configuration, never
    /// on which chunks were generated before.
    #[tracing::instrument(level = "trace", skip(self))]
    pub fn generate(&self, seed: i64, cx: i64, cy: i64) -> Result<NoiseChunk<E>, NoiseError> {
        self.check_chunk(cx, cy)?;
        let mut cache = DrawCache::new();
        let main = OctaveChunk::main(cx, cy, self.config.lacunarity);
        let field = self.chunk_field(seed, &main, &mut cache)?;
        let (min, max) = field.component_range();
        trace!(draws = cache.len(), min, max, "chunk generated");
        Ok(NoiseChunk { field, max, min })
    }

    /// Evaluate the field at one point `(u, v) ∈ [0, 1]²` of main chunk `(cx, cy)`.
    ///
    /// `u = 1` and `u = 0` of the right-hand neighbour give identical values.
    pub fn sample_in_chunk(&self, seed: i64, cx: i64, cy: i64, u: f64, v: f64) -> Result<E, NoiseError> {
        if !((0.0..=1.0).contains(&u) && (0.0..=1.0).contains(&v)) {
            return Err(NoiseError::PointOutsideChunk { u, v });
        }
        self.check_chunk(cx, cy)?;
        let mut cache = DrawCache::new();
        let main = OctaveChunk::main(cx, cy, self.config.lacunarity);
        self.sample_level(seed, &main, u, v, &mut cache)
    }

    /// Evaluate the field at a continuous position in main-chunk units.
    ///
    /// Pixel `(px, py)` of `generate(seed, cx, cy)` sits at
    /// `(cx + (px + 0.5) / pixel_size, cy + (py + 0.5) / pixel_size)`.
    pub fn sample_at(&self, seed: i64, x: f64, y: f64) -> Result<E, NoiseError> {
        if !(x.is_finite() && y.is_finite()) {
            return Err(NoiseError::PointOutsideChunk { u: x, v: y });
        }
        let (fx, fy) = (x.floor(), y.floor());
        self.sample_in_chunk(seed, fx as i64, fy as i64, x - fx, y - fy)
    }

    /// Reject chunks whose deepest-level lattice corners leave the spiral's range.
    fn check_chunk(&self, cx: i64, cy: i64) -> Result<(), NoiseError> {
        let depth = u32::try_from(self.config.octaves.saturating_sub(1)).unwrap_or(u32::MAX);
        let reach = cx.unsigned_abs().max(cy.unsigned_abs()).saturating_add(1);
        let fits = u64::from(self.config.lacunarity)
            .checked_pow(depth)
            .and_then(|span| reach.checked_mul(span))
            .is_some_and(|extent| extent <= MAX_LATTICE_COORD as u64);
        if fits {
            Ok(())
        } else {
            Err(NoiseError::config(format!(
                "chunk ({cx}, {cy}) lies outside the supported lattice range ±{MAX_LATTICE_COORD}"
            )))
        }
    }

    fn chunk_field(&self, seed: i64, chunk: &OctaveChunk<'_>, cache: &mut DrawCache) -> Result<Grid<E>, NoiseError> {
        let corners = self.corner_influences(seed, chunk, cache)?;
        let mut field = interpolate_chunk(&corners, &self.geometries[chunk.level]);
        if chunk.level + 1 < self.geometries.len() {
            let detail = self.subdivide(seed, chunk, cache)?;
            field.add_scaled(&detail, self.config.persistence);
        }
        Ok(field)
    }

    /// Generate every child of `chunk` and tile them into the parent's grid.
    fn subdivide(&self, seed: i64, chunk: &OctaveChunk<'_>, cache: &mut DrawCache) -> Result<Grid<E>, NoiseError> {
        let lac = self.config.lacunarity;
        let mut tiles = Vec::with_capacity((lac * lac) as usize);
        for j in 0..lac {
            for i in 0..lac {
                let child = chunk.child(i, j);
                tiles.push(self.chunk_field(seed, &child, cache)?);
            }
        }

        let size = self.geometries[chunk.level].pixel_size;
        let tile = self.geometries[chunk.level + 1].pixel_size;
        let per_row = lac as usize;
        Ok(Grid::from_fn(size, size, |x, y| {
            tiles[(y / tile) * per_row + x / tile].get(x % tile, y % tile).clone()
        }))
    }

    fn sample_level(
        &self,
        seed: i64,
        chunk: &OctaveChunk<'_>,
        u: f64,
        v: f64,
        cache: &mut DrawCache,
    ) -> Result<E, NoiseError> {
        let corners = self.corner_influences(seed, chunk, cache)?;
        let value = interpolate_point(&corners, u as f32, v as f32);
        if chunk.level + 1 >= self.geometries.len() {
            return Ok(value);
        }
        let lac = self.config.lacunarity;
        let (i, su) = subcell(u, lac);
        let (j, sv) = subcell(v, lac);
        let child = chunk.child(i, j);
        let detail = self.sample_level(seed, &child, su, sv, cache)?;
        Ok(value.add(&detail.scale(self.config.persistence)))
    }

    // ── Corner vectors ────────────────────────────────────────────────────────

    fn corner_influences(
        &self,
        seed: i64,
        chunk: &OctaveChunk<'_>,
        cache: &mut DrawCache,
    ) -> Result<[CornerInfluence<E>; 4], NoiseError> {
        let level_seed = seed.wrapping_add(chunk.level as i64);
        let [tl, tr, bl, br] = Corner::ALL.map(|corner| self.corner_influence(level_seed, chunk, corner, cache));
        Ok([tl?, tr?, bl?, br?])
    }

    fn corner_influence(
        &self,
        level_seed: i64,
        chunk: &OctaveChunk<'_>,
        corner: Corner,
        cache: &mut DrawCache,
    ) -> Result<CornerInfluence<E>, NoiseError> {
        let index = chunk.corner_index(corner);
        let angle = cache.float_at(&self.stream, level_seed, index, TAU);

        let influence = match self.influence.chunk_influence(level_seed, index, corner, chunk) {
            Some(v) if v.dim() != self.dim() => return Err(NoiseError::dimension_mismatch(self.dim(), v.dim())),
            Some(v) => v,
            None => self.default_influence(level_seed, index, cache),
        };
        Ok(CornerInfluence::new(Vec2::from_angle(angle), influence))
    }

    /// Uniform pick from the possibility set; a single possibility never touches the stream.
    fn default_influence(&self, level_seed: i64, index: u64, cache: &mut DrawCache) -> E {
        let n = self.possibilities.len();
        let pick = if n > 1 { cache.int_at(&self.stream, level_seed, index, n) } else { 0 };
        self.possibilities[pick].clone()
    }
}

/// Split `t ∈ [0, 1]` into a sub-cell index in `0..lac` and the position
/// inside that cell. `t = 1` stays in the last cell at position 1.
fn subcell(t: f64, lac: u32) -> (u32, f64) {
    let scaled = t * f64::from(lac);
    let cell = (scaled.floor() as u32).min(lac - 1);
    (cell, scaled - f64::from(cell))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::influence::{OverrideFn, ZeroSeams};
    use crate::vector::VecN;
    use approx::assert_abs_diff_eq;
    use std::cell::Cell;

    fn rgb_noise(pixel_size: usize) -> ChunkNoise<[f32; 3]> {
        ChunkNoise::new(pixel_size, crate::vector::standard_basis::<3>()).unwrap()
    }

    /// Replays like the default stream but counts integer draws.
    #[derive(Default)]
    struct CountingStream {
        ints: Cell<usize>,
    }

    impl IndexStream for CountingStream {
        fn float_at(&self, seed: i64, index: u64, bound: f32) -> f32 {
            ReplayStream.float_at(seed, index, bound)
        }

        fn int_at(&self, seed: i64, index: u64, bound: usize) -> usize {
            self.ints.set(self.ints.get() + 1);
            ReplayStream.int_at(seed, index, bound)
        }
    }

    #[test]
    fn generation_is_deterministic_and_order_independent() {
        let mut a = rgb_noise(16);
        a.set_octaves(3, 2, 0.5).unwrap();
        let b = a.clone();

        let first = a.generate(7, 2, -3).unwrap();
        for (cx, cy) in [(0, 0), (5, 5), (-9, 1)] {
            b.generate(7, cx, cy).unwrap();
        }
        assert_eq!(b.generate(7, 2, -3).unwrap(), first);
        assert_ne!(a.generate(8, 2, -3).unwrap().field, first.field);
    }

    #[test]
    fn set_octaves_is_idempotent() {
        let mut noise = rgb_noise(32);
        noise.set_octaves(3, 2, 0.5).unwrap();
        let once = noise.generate(1, 0, 0).unwrap();
        noise.set_octaves(3, 2, 0.5).unwrap();
        assert_eq!(noise.generate(1, 0, 0).unwrap(), once);
        assert_eq!(noise.geometry(2).map(|g| g.pixel_size), Some(8));
        assert!(noise.geometry(3).is_none());
    }

    #[test]
    fn rejected_configuration_leaves_generator_untouched() {
        let mut noise = rgb_noise(10);
        let before = noise.config().clone();
        let err = noise.set_octaves(3, 3, 0.5).unwrap_err();
        assert!(matches!(err, NoiseError::Config { .. }));
        assert_eq!(noise.config(), &before);
        assert!(noise.set_lacunarity(0).is_err());
        assert!(noise.set_persistence(f32::INFINITY).is_err());
        assert!(noise.generate(0, 0, 0).is_ok());
    }

    #[test]
    fn possibility_set_is_validated() {
        assert_eq!(ChunkNoise::<f32>::new(4, vec![]).unwrap_err(), NoiseError::EmptyPossibilities);
        let mixed = vec![VecN::new(vec![1.0, 0.0]), VecN::new(vec![1.0])];
        assert!(matches!(ChunkNoise::new(4, mixed), Err(NoiseError::Config { .. })));
    }

    #[test]
    fn single_possibility_never_draws_an_index() {
        let mut noise = ChunkNoise::new(8, vec![[1.0f32, 0.0, 0.0]])
            .unwrap()
            .with_stream(CountingStream::default());
        noise.set_octaves(3, 2, 0.5).unwrap();
        noise.generate(3, 1, 1).unwrap();
        noise.sample_at(3, 0.25, 0.75).unwrap();
        assert_eq!(noise.stream.ints.get(), 0);

        let mut multi = rgb_noise(8).with_stream(CountingStream::default());
        multi.set_octaves(2, 2, 0.5).unwrap();
        multi.generate(3, 1, 1).unwrap();
        assert!(multi.stream.ints.get() > 0);
    }

    #[test]
    fn known_chunk_matches_recorded_values() {
        // Corners of chunk (0, 0) sit at spiral indices TL 0, TR 1, BL 3, BR 2.
        let angles = [0.838_238_1f32, 3.308_457_6, 3.410_043_2, 1.562_869_2];
        for (index, angle) in [0, 1, 3, 2].into_iter().zip(angles) {
            assert_abs_diff_eq!(ReplayStream.float_at(42, index, TAU), angle, epsilon = 1e-6);
        }

        let expected: [[f32; 4]; 4] = [
            [-0.185_743_23, -0.401_006_22, -0.375_413_12, -0.095_955_364],
            [-0.277_221_92, -0.301_953_05, -0.142_184_36, 0.118_961_41],
            [-0.132_355_53, 0.031_948_224, 0.179_007_92, 0.266_884_36],
            [0.074_889_42, 0.256_833_08, 0.238_133_89, 0.134_806_36],
        ];
        let noise = ChunkNoise::new(4, vec![[1.0f32, 0.0, 0.0]]).unwrap();
        let chunk = noise.generate(42, 0, 0).unwrap();
        for (py, row) in expected.iter().enumerate() {
            for (px, want) in row.iter().enumerate() {
                let got = chunk.field.get(px, py);
                assert_abs_diff_eq!(got[0], *want, epsilon = 1e-5);
                assert_eq!((got[1], got[2]), (0.0, 0.0));
            }
        }
        assert_abs_diff_eq!(chunk.min, -0.401_006_22, epsilon = 1e-5);
        assert_abs_diff_eq!(chunk.max, 0.266_884_36, epsilon = 1e-5);
    }

    #[test]
    fn two_octave_chunk_matches_recorded_values() {
        let expected: [[f32; 4]; 4] = [
            [-0.087_405_89, -0.150_583_85, -0.086_036_68, -0.133_940_38],
            [-0.107_770_37, -0.121_831_73, -0.192_904_59, -0.275_435_75],
            [0.058_136_06, -0.301_427_42, -0.330_803_8, -0.187_839_33],
            [0.069_621_13, -0.254_854_6, -0.193_282_13, 0.071_825_46],
        ];
        let mut noise = ChunkNoise::new(4, vec![1.0f32, -0.5]).unwrap();
        noise.set_octaves(2, 2, 0.5).unwrap();
        let chunk = noise.generate(7, 1, -1).unwrap();
        for (py, row) in expected.iter().enumerate() {
            for (px, want) in row.iter().enumerate() {
                assert_abs_diff_eq!(*chunk.field.get(px, py), *want, epsilon = 1e-5);
            }
        }
    }

    #[test]
    fn min_max_track_the_field() {
        let mut noise = rgb_noise(8);
        noise.set_octaves(2, 2, 0.5).unwrap();
        let chunk = noise.generate(42, -3, 4).unwrap();
        let (min, max) = chunk.field.component_range();
        assert_eq!((chunk.min, chunk.max), (min, max));
    }

    #[test]
    fn grid_agrees_with_point_sampling() {
        let mut noise = ChunkNoise::new(8, vec![1.0f32, -0.5, 0.25]).unwrap();
        noise.set_octaves(3, 2, 0.6).unwrap();
        for (cx, cy) in [(0, 0), (-1, 2), (3, -4)] {
            let chunk = noise.generate(11, cx, cy).unwrap();
            for py in 0..8 {
                for px in 0..8 {
                    let x = cx as f64 + (px as f64 + 0.5) / 8.0;
                    let y = cy as f64 + (py as f64 + 0.5) / 8.0;
                    let point = noise.sample_at(11, x, y).unwrap();
                    assert_abs_diff_eq!(*chunk.field.get(px, py), point, epsilon = 1e-5);
                }
            }
        }
    }

    #[test]
    fn values_stay_within_weak_bound() {
        let mut noise = rgb_noise(16);
        noise.set_octaves(3, 2, 0.5).unwrap();
        let bound = noise.weak_bound();
        assert_abs_diff_eq!(bound, FRAC_1_SQRT_2 * 1.75, epsilon = 1e-6);
        assert!(bound < noise.strict_bound());
        for seed in 0..24 {
            let chunk = noise.generate(seed, seed % 5 - 2, 3 - seed % 7).unwrap();
            assert!(chunk.max <= bound + 1e-5, "seed {seed}: max {} > {bound}", chunk.max);
            assert!(chunk.min >= -bound - 1e-5, "seed {seed}: min {} < -{bound}", chunk.min);
        }
    }

    #[test]
    fn strict_bound_diverges_without_decay() {
        let mut noise = rgb_noise(4);
        noise.set_persistence(1.0).unwrap();
        assert_eq!(noise.strict_bound(), f32::INFINITY);
        assert!(noise.weak_bound().is_finite());
    }

    #[test]
    fn zero_seams_pin_chunk_borders() {
        let mut noise = ChunkNoise::new(9, vec![1.0f32, -1.0]).unwrap();
        noise.set_octaves(3, 3, 0.5).unwrap();
        let noise = noise.with_override(ZeroSeams::new(&0.0f32, true, true)).unwrap();
        for k in 0..=8 {
            let t = k as f64 / 8.0;
            for (u, v) in [(0.0, t), (1.0, t), (t, 0.0), (t, 1.0)] {
                assert_eq!(noise.sample_in_chunk(5, 2, -1, u, v).unwrap(), 0.0, "at ({u}, {v})");
            }
        }
        let inner = noise.sample_in_chunk(5, 2, -1, 0.4, 0.55).unwrap();
        assert_ne!(inner, 0.0);
    }

    #[test]
    fn override_with_wrong_dimension_fails() {
        let noise = ChunkNoise::new(4, VecN::standard_basis(3))
            .unwrap()
            .with_override(OverrideFn(|_, _, _, _: &OctaveChunk<'_>| Some(VecN::new(vec![1.0, 2.0]))))
            .unwrap();
        assert_eq!(noise.generate(0, 0, 0).unwrap_err(), NoiseError::dimension_mismatch(3, 2));
    }

    #[test]
    fn zero_seams_of_wrong_dimension_rejected_up_front() {
        let noise = ChunkNoise::new(4, VecN::standard_basis(3)).unwrap();
        let err = noise.with_override(ZeroSeams::new(&VecN::splat(2, 0.0), true, true)).unwrap_err();
        assert!(matches!(err, NoiseError::Config { .. }), "{err}");

        let noise = ChunkNoise::new(4, VecN::standard_basis(3)).unwrap();
        assert!(noise.with_override(ZeroSeams::new(&VecN::splat(3, 0.0), true, true)).is_ok());
    }

    #[test]
    fn override_closure_sees_configured_lacunarity() {
        let mut noise = ChunkNoise::new(9, vec![1.0f32, -1.0]).unwrap();
        noise.set_octaves(2, 3, 0.5).unwrap();
        let mismatched = Cell::new(0usize);
        let calls = Cell::new(0usize);
        let noise = noise
            .with_override(OverrideFn(|_, _, _, chunk: &OctaveChunk<'_>| {
                calls.set(calls.get() + 1);
                if chunk.lacunarity() != 3 {
                    mismatched.set(mismatched.get() + 1);
                }
                None::<f32>
            }))
            .unwrap();
        noise.generate(1, 0, 0).unwrap();
        // Four main corners plus four per sub-chunk.
        assert_eq!(calls.get(), 4 + 9 * 4);
        assert_eq!(mismatched.get(), 0);
    }

    #[test]
    fn far_chunks_rejected_instead_of_overflowing() {
        let mut noise = rgb_noise(8);
        assert!(matches!(noise.generate(0, 2_000_000_000, 0), Err(NoiseError::Config { .. })));
        assert!(matches!(noise.generate(0, 0, i64::MIN), Err(NoiseError::Config { .. })));
        assert!(noise.sample_at(0, 1e300, 0.5).is_err());

        assert!(noise.check_chunk(MAX_LATTICE_COORD - 1, 0).is_ok());
        assert!(noise.check_chunk(MAX_LATTICE_COORD, 0).is_err());
        // Deeper octaves reach further out on the lattice.
        noise.set_octaves(3, 2, 0.5).unwrap();
        assert!(noise.check_chunk(MAX_LATTICE_COORD / 4 - 1, 0).is_ok());
        assert!(noise.check_chunk(MAX_LATTICE_COORD / 4, 0).is_err());
    }

    #[test]
    fn points_outside_the_unit_square_are_rejected() {
        let noise = rgb_noise(4);
        assert!(matches!(
            noise.sample_in_chunk(0, 0, 0, 1.5, 0.0),
            Err(NoiseError::PointOutsideChunk { .. })
        ));
        assert!(noise.sample_at(0, f64::NAN, 0.0).is_err());
    }

    #[test]
    fn normalization_maps_range_onto_unit_interval() {
        let noise = ChunkNoise::new(6, vec![1.0f32, -1.0]).unwrap();
        let chunk = noise.generate(2, 0, 0).unwrap();
        for y in 0..6 {
            for x in 0..6 {
                let n = chunk.normalized(x, y);
                assert!((-1e-6..=1.0 + 1e-6).contains(&n), "normalized {n}");
            }
        }
        assert_eq!(chunk.normalized_with(0, 0, 1.0, 1.0), 0.0);
    }

    #[test]
    fn subcell_keeps_upper_edge_in_last_cell() {
        assert_eq!(subcell(1.0, 3), (2, 1.0));
        assert_eq!(subcell(0.0, 3), (0, 0.0));
        let (cell, frac) = subcell(0.5, 2);
        assert_eq!(cell, 1);
        assert_abs_diff_eq!(frac, 0.0);
    }
}
