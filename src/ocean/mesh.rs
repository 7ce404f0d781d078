//! Ocean grid mesh evaluated per sample index.

use bytemuck::{Pod, Zeroable};

use crate::params::OceanPhysics;

/// Vertex data shared by every mesh in the scene (position + UV coordinates)
#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    pub uv: [f32; 2],
}

/// Height-field mesh: a flat XZ grid whose Y values are rewritten every tick
pub struct OceanGrid {
    pub vertices: Vec<Vertex>,
    pub indices: Vec<u32>,
}

impl OceanGrid {
    /// Create a flat grid centred on the origin
    ///
    /// Samples are stored row by row along Z with X varying fastest, so the
    /// sample index matches the order of a subdivided plane lying in XZ.
    pub fn new(physics: &OceanPhysics) -> Self {
        let resolution = physics.resolution();
        let spacing = physics.grid_spacing();
        let half_size = physics.extent / 2.0;
        let last = (resolution - 1) as f32;

        let mut vertices = Vec::with_capacity(resolution * resolution);
        let mut indices = Vec::with_capacity((resolution - 1).pow(2) * 6);

        for z in 0..resolution {
            for x in 0..resolution {
                let x_pos = x as f32 * spacing - half_size;
                let z_pos = z as f32 * spacing - half_size;

                vertices.push(Vertex {
                    position: [x_pos, 0.0, z_pos],
                    uv: [x as f32 / last, z as f32 / last],
                });
            }
        }

        // Counter-clockwise winding seen from above
        for z in 0..resolution - 1 {
            for x in 0..resolution - 1 {
                let top_left = (z * resolution + x) as u32;
                let top_right = top_left + 1;
                let bottom_left = ((z + 1) * resolution + x) as u32;
                let bottom_right = bottom_left + 1;

                indices.extend_from_slice(&[
                    top_left,
                    bottom_left,
                    top_right,
                    top_right,
                    bottom_left,
                    bottom_right,
                ]);
            }
        }

        Self { vertices, indices }
    }

    /// Total number of height samples
    pub fn sample_count(&self) -> usize {
        self.vertices.len()
    }

    /// Height of the sample at `index`
    pub fn height(&self, index: usize) -> Option<f32> {
        self.vertices.get(index).map(|v| v.position[1])
    }

    /// Heights of every sample in index order
    pub fn heights(&self) -> impl Iterator<Item = f32> + '_ {
        self.vertices.iter().map(|v| v.position[1])
    }

    /// Rewrite every sample height for the given amplitude and simulated time
    ///
    /// `height[i] = amplitude * sin(i / spatial + (time + i) / temporal)`.
    /// The phase uses the sample index, not the sample position, so this is
    /// a different surface from [`super::WaveField::height_at`].
    pub fn update(&mut self, amplitude: f32, sim_time: f32, physics: &OceanPhysics) {
        for (i, vertex) in self.vertices.iter_mut().enumerate() {
            vertex.position[1] = index_wave(i, amplitude, sim_time, physics);
        }
    }
}

fn index_wave(index: usize, amplitude: f32, sim_time: f32, physics: &OceanPhysics) -> f32 {
    let i = index as f64;
    let t = sim_time as f64;
    let phase = i / physics.spatial_divisor as f64 + (t + i) / physics.temporal_divisor as f64;
    (amplitude as f64 * phase.sin()) as f32
}
