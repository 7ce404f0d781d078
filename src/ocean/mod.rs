//! Ocean height field and the wave amplitude that drives it.

mod mesh;
mod system;

pub use mesh::{OceanGrid, Vertex};
pub use system::WaveField;
