//! Deterministic, chunked, multi-octave gradient noise over arbitrary vector spaces.
//!
//! A [`ChunkNoise`] produces one `pixel_size × pixel_size` chunk of an
//! infinite field per call. Corner vectors are keyed by the spiral index of
//! their lattice point and drawn from a replayed seeded stream, so any chunk
//! can be generated in any order and neighbouring chunks always meet without
//! seams.

pub mod config;
pub mod error;
pub mod generator;
pub mod grid;
pub mod influence;
pub mod perlin;
pub mod region;
pub mod stream;
pub mod vector;

pub use config::NoiseConfig;
pub use error::NoiseError;
pub use generator::{ChunkNoise, NoiseChunk};
pub use grid::Grid;
pub use influence::{Corner, CornerInfluence, InfluenceOverride, NoOverride, OverrideFn, ZeroSeams};
pub use region::NoiseRegion;
pub use stream::{spiral_index, DrawCache, IndexStream, ReplayStream, MAX_LATTICE_COORD};
pub use vector::{standard_basis, Vec2, VecN, VectorSpace};
