//! Octave configuration for [`crate::generator::ChunkNoise`].

use serde::{Deserialize, Serialize};

use crate::error::NoiseError;

/// Pixel size, octave count, lacunarity and persistence of a generator.
///
/// Defaults: a 256 px chunk with a single octave.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NoiseConfig {
    /// Width and height of a main chunk in pixels.
    pub pixel_size: usize,
    /// Number of octave levels, including the main one. At least 1.
    pub octaves: usize,
    /// Sub-chunks per axis when descending one level. At least 1.
    pub lacunarity: u32,
    /// Weight of each level relative to its parent, typically in (0, 1).
    pub persistence: f32,
}

impl Default for NoiseConfig {
    fn default() -> Self {
        Self { pixel_size: 256, octaves: 1, lacunarity: 1, persistence: 0.5 }
    }
}

impl NoiseConfig {
    pub fn new(pixel_size: usize, octaves: usize, lacunarity: u32, persistence: f32) -> Self {
        Self { pixel_size, octaves, lacunarity, persistence }
    }

    /// Parse a JSON object; missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, NoiseError> {
        let config: Self = serde_json::from_str(json)
            .map_err(|e| NoiseError::config(format!("unreadable config JSON: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json(&self) -> String {
        // A struct of plain numbers always serialises.
        serde_json::to_string_pretty(self).unwrap_or_default()
    }

    /// Check every precondition the octave recursion relies on.
    ///
    /// The deepest level's pixel size, `pixel_size / lacunarity^(octaves-1)`,
    /// must be a whole, non-zero number of pixels.
    pub fn validate(&self) -> Result<(), NoiseError> {
        if self.pixel_size == 0 {
            return Err(NoiseError::config("pixel size must be at least 1"));
        }
        if self.octaves == 0 {
            return Err(NoiseError::config("octave count must be at least 1"));
        }
        if self.lacunarity == 0 {
            return Err(NoiseError::config("lacunarity must be at least 1"));
        }
        if !self.persistence.is_finite() {
            return Err(NoiseError::config(format!("persistence must be finite, got {}", self.persistence)));
        }
        let depth = u32::try_from(self.octaves - 1)
            .map_err(|_| NoiseError::config(format!("octave count {} is too large", self.octaves)))?;
        let divisor = (self.lacunarity as usize)
            .checked_pow(depth)
            .filter(|&d| d <= self.pixel_size)
            .ok_or_else(|| {
                NoiseError::config(format!(
                    "lacunarity {}^{} exceeds pixel size {}",
                    self.lacunarity, depth, self.pixel_size
                ))
            })?;
        if self.pixel_size % divisor != 0 {
            return Err(NoiseError::config(format!(
                "pixel size {} is not divisible by lacunarity {}^{} = {}",
                self.pixel_size, self.lacunarity, depth, divisor
            )));
        }
        Ok(())
    }

    /// Pixel size of every octave level, main level first.
    pub fn level_sizes(&self) -> Vec<usize> {
        let l = self.lacunarity.max(1) as usize;
        std::iter::successors(Some(self.pixel_size), |&s| Some(s / l))
            .take(self.octaves)
            .collect()
    }

    /// `Σ |p|^n` over the configured levels.
    pub fn amplitude_sum(&self) -> f32 {
        let p = self.persistence.abs();
        std::iter::successors(Some(1.0f32), |a| Some(a * p))
            .take(self.octaves)
            .sum()
    }
}
