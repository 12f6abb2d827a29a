//! Error taxonomy for the chunk noise engine.
//!
//! Every failure here is a programming or configuration defect; nothing is
//! retryable, and no partial field is ever returned alongside an error.

use thiserror::Error;

/// Errors raised while configuring or running a [`crate::generator::ChunkNoise`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum NoiseError {
    /// Octave/lacunarity/pixel-size combination rejected at configure time.
    #[error("Invalid configuration: {message}")]
    Config {
        /// What is wrong with the configuration
        message: String,
    },

    /// Two vector values of different shape met in one operation.
    #[error("Dimension mismatch: expected {expected}, actual {actual}")]
    DimensionMismatch {
        /// Dimension of the generator's vector space
        expected: usize,
        /// Dimension of the offending value
        actual: usize,
    },

    /// The possibility set handed to the generator was empty.
    #[error("Possibility set must contain at least one influence vector")]
    EmptyPossibilities,

    /// A chunk-local sample position outside the unit square.
    #[error("Point ({u}, {v}) lies outside the chunk's unit square")]
    PointOutsideChunk {
        /// Horizontal position within the chunk
        u: f64,
        /// Vertical position within the chunk
        v: f64,
    },

    /// A region request whose stitched grid would not fit in memory indices.
    #[error("Region of {cols}x{rows} chunks at {pixel_size}px is too large")]
    RegionTooLarge {
        /// Requested chunk columns
        cols: usize,
        /// Requested chunk rows
        rows: usize,
        /// Pixel size of a single chunk
        pixel_size: usize,
    },
}

impl NoiseError {
    /// Create a `Config` error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config { message: message.into() }
    }

    /// Create a `DimensionMismatch` error.
    pub fn dimension_mismatch(expected: usize, actual: usize) -> Self {
        Self::DimensionMismatch { expected, actual }
    }
}
