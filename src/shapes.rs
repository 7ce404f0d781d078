//! Procedural raft geometry: parallel logs and a mast.

use std::f32::consts::TAU;

use glam::Vec3;

use crate::ocean::Vertex;
use crate::params::RaftGeometry;

/// Indexed triangle mesh
#[derive(Debug, Clone, Default)]
pub struct MeshData {
    pub vertices: Vec<Vertex>,
    pub indices: Vec<u32>,
}

impl MeshData {
    /// Append another mesh, rebasing its indices
    pub fn append(&mut self, other: MeshData) {
        let base = self.vertices.len() as u32;
        self.vertices.extend(other.vertices);
        self.indices.extend(other.indices.into_iter().map(|i| i + base));
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }
}

/// Build the raft in its local frame (origin at the raft centre)
pub fn raft_mesh(geometry: &RaftGeometry) -> MeshData {
    let mut mesh = MeshData::default();
    let spacing = 2.0 * geometry.log_radius;
    let half_count = geometry.log_count as f32 / 2.0;

    for i in 0..geometry.log_count {
        let x = (i as f32 - half_count) * spacing;
        mesh.append(log_mesh(
            Vec3::new(x, geometry.log_lift, 0.0),
            geometry.log_radius,
            geometry.log_length,
            geometry.log_segments.max(3),
        ));
    }

    mesh.append(box_mesh(
        Vec3::from_array(geometry.mast_offset),
        Vec3::from_array(geometry.mast_size),
    ));
    mesh
}

/// Capped cylinder lying along Z
fn log_mesh(center: Vec3, radius: f32, length: f32, segments: u32) -> MeshData {
    let mut vertices = Vec::with_capacity((segments as usize + 1) * 2 + 2);
    let mut indices = Vec::with_capacity(segments as usize * 12);
    let half = length / 2.0;

    for s in 0..=segments {
        let u = s as f32 / segments as f32;
        let angle = u * TAU;
        let (sin, cos) = angle.sin_cos();
        for (v, z) in [(0.0, -half), (1.0, half)] {
            let p = center + Vec3::new(cos * radius, sin * radius, z);
            vertices.push(Vertex {
                position: p.to_array(),
                uv: [u, v],
            });
        }
    }

    for s in 0..segments {
        let a = s * 2;
        let b = a + 1;
        let c = a + 2;
        let d = a + 3;
        indices.extend_from_slice(&[a, c, b, b, c, d]);
    }

    // End caps as fans around a centre vertex
    for (cap, z) in [(0u32, -half), (1u32, half)] {
        let centre = vertices.len() as u32;
        vertices.push(Vertex {
            position: (center + Vec3::new(0.0, 0.0, z)).to_array(),
            uv: [0.5, 0.5],
        });
        for s in 0..segments {
            let a = s * 2 + cap;
            let b = (s + 1) * 2 + cap;
            indices.extend_from_slice(&[centre, a, b]);
        }
    }

    MeshData { vertices, indices }
}

/// Axis-aligned box with its own vertices per face
fn box_mesh(center: Vec3, size: Vec3) -> MeshData {
    let h = size / 2.0;
    let faces: [[Vec3; 4]; 6] = [
        // +X, -X, +Y, -Y, +Z, -Z
        [
            Vec3::new(h.x, -h.y, -h.z),
            Vec3::new(h.x, h.y, -h.z),
            Vec3::new(h.x, h.y, h.z),
            Vec3::new(h.x, -h.y, h.z),
        ],
        [
            Vec3::new(-h.x, -h.y, h.z),
            Vec3::new(-h.x, h.y, h.z),
            Vec3::new(-h.x, h.y, -h.z),
            Vec3::new(-h.x, -h.y, -h.z),
        ],
        [
            Vec3::new(-h.x, h.y, -h.z),
            Vec3::new(-h.x, h.y, h.z),
            Vec3::new(h.x, h.y, h.z),
            Vec3::new(h.x, h.y, -h.z),
        ],
        [
            Vec3::new(-h.x, -h.y, h.z),
            Vec3::new(-h.x, -h.y, -h.z),
            Vec3::new(h.x, -h.y, -h.z),
            Vec3::new(h.x, -h.y, h.z),
        ],
        [
            Vec3::new(h.x, -h.y, h.z),
            Vec3::new(h.x, h.y, h.z),
            Vec3::new(-h.x, h.y, h.z),
            Vec3::new(-h.x, -h.y, h.z),
        ],
        [
            Vec3::new(-h.x, -h.y, -h.z),
            Vec3::new(-h.x, h.y, -h.z),
            Vec3::new(h.x, h.y, -h.z),
            Vec3::new(h.x, -h.y, -h.z),
        ],
    ];
    let uvs = [[0.0, 0.0], [0.0, 1.0], [1.0, 1.0], [1.0, 0.0]];

    let mut mesh = MeshData::default();
    for corners in faces {
        let base = mesh.vertices.len() as u32;
        for (corner, uv) in corners.iter().zip(uvs) {
            mesh.vertices.push(Vertex {
                position: (center + *corner).to_array(),
                uv,
            });
        }
        mesh.indices
            .extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
    }
    mesh
}
