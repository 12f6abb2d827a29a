pub mod geometry;
pub mod interpolate;
pub mod octave;

pub use geometry::OctaveGeometry;
pub use interpolate::{interpolate_chunk, interpolate_point, smoothstep};
pub use octave::OctaveChunk;
