//! Robot avatar: glTF geometry with morph-target facial expressions.
//!
//! The avatar is optional. When the model fails to load the rig stays
//! inert and every avatar call becomes a no-op.

use std::path::Path;

use glam::{Mat4, Vec3};
use serde::Deserialize;
use thiserror::Error;

use crate::ocean::Vertex;

/// Facial expressions the avatar can show
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Expression {
    Neutral,
    Angry,
    Surprised,
    Sad,
}

/// Morph target name and fallback index for each non-neutral expression
///
/// The fallback index is used when the model carries no `targetNames`.
const EXPRESSION_TARGETS: [(Expression, &str, usize); 3] = [
    (Expression::Angry, "Angry", 0),
    (Expression::Surprised, "Surprised", 1),
    (Expression::Sad, "Sad", 2),
];

impl Expression {
    fn target(self) -> Option<(&'static str, usize)> {
        EXPRESSION_TARGETS
            .iter()
            .find(|(expression, _, _)| *expression == self)
            .map(|(_, name, index)| (*name, *index))
    }
}

#[derive(Debug, Error)]
pub enum AvatarError {
    #[error("failed to import glTF {path}: {source}")]
    Import {
        path: String,
        #[source]
        source: gltf::Error,
    },

    #[error("glTF {0} contains no triangle meshes")]
    NoMeshes(String),

    #[error("mesh primitive {0} has no positions")]
    MissingPositions(usize),
}

#[derive(Debug, Default, Deserialize)]
struct MeshExtras {
    #[serde(rename = "targetNames", default)]
    target_names: Vec<String>,
}

/// Morph targets of one primitive, as position deltas in model space
#[derive(Debug, Clone)]
struct MorphSet {
    first_vertex: usize,
    target_names: Vec<String>,
    deltas: Vec<Vec<Vec3>>,
}

impl MorphSet {
    fn target_index(&self, expression: Expression) -> Option<usize> {
        let (name, fallback) = expression.target()?;
        let index = if self.target_names.is_empty() {
            fallback
        } else {
            self.target_names.iter().position(|n| n == name)?
        };
        (index < self.deltas.len()).then_some(index)
    }
}

/// Flattened avatar mesh with its morph targets
#[derive(Debug, Clone)]
pub struct AvatarModel {
    base: Vec<Vertex>,
    indices: Vec<u32>,
    morphs: Vec<MorphSet>,
}

impl AvatarModel {
    /// Import a glTF/GLB file, baking node transforms into the vertices
    pub fn load(path: &Path) -> Result<Self, AvatarError> {
        let (document, buffers, _images) =
            gltf::import(path).map_err(|source| AvatarError::Import {
                path: path.display().to_string(),
                source,
            })?;

        let mut model = Self {
            base: Vec::new(),
            indices: Vec::new(),
            morphs: Vec::new(),
        };

        let scene = document
            .default_scene()
            .or_else(|| document.scenes().next());
        if let Some(scene) = scene {
            for node in scene.nodes() {
                model.append_node(&node, Mat4::IDENTITY, &buffers)?;
            }
        }

        if model.indices.is_empty() {
            return Err(AvatarError::NoMeshes(path.display().to_string()));
        }

        log::info!(
            "loaded avatar {}: {} vertices, {} triangles, {} morph sets",
            path.display(),
            model.base.len(),
            model.indices.len() / 3,
            model.morphs.len()
        );
        Ok(model)
    }

    fn append_node(
        &mut self,
        node: &gltf::Node,
        parent: Mat4,
        buffers: &[gltf::buffer::Data],
    ) -> Result<(), AvatarError> {
        let world = parent * Mat4::from_cols_array_2d(&node.transform().matrix());

        if let Some(mesh) = node.mesh() {
            let extras = mesh
                .extras()
                .as_ref()
                .and_then(|raw| serde_json::from_str::<MeshExtras>(raw.get()).ok())
                .unwrap_or_default();

            for primitive in mesh.primitives() {
                if primitive.mode() != gltf::mesh::Mode::Triangles {
                    continue;
                }
                self.append_primitive(&primitive, world, &extras.target_names, buffers)?;
            }
        }

        for child in node.children() {
            self.append_node(&child, world, buffers)?;
        }
        Ok(())
    }

    fn append_primitive(
        &mut self,
        primitive: &gltf::Primitive,
        world: Mat4,
        target_names: &[String],
        buffers: &[gltf::buffer::Data],
    ) -> Result<(), AvatarError> {
        let reader = primitive.reader(|buffer| buffers.get(buffer.index()).map(|d| &d.0[..]));

        let positions: Vec<[f32; 3]> = reader
            .read_positions()
            .ok_or(AvatarError::MissingPositions(primitive.index()))?
            .collect();
        let uvs: Vec<[f32; 2]> = reader
            .read_tex_coords(0)
            .map(|iter| iter.into_f32().collect())
            .unwrap_or_default();

        let first_vertex = self.base.len();
        for (i, position) in positions.iter().enumerate() {
            let world_position = world.transform_point3(Vec3::from_array(*position));
            self.base.push(Vertex {
                position: world_position.to_array(),
                uv: uvs.get(i).copied().unwrap_or_default(),
            });
        }

        let base_index = first_vertex as u32;
        match reader.read_indices() {
            Some(indices) => self
                .indices
                .extend(indices.into_u32().map(|i| i + base_index)),
            None => self
                .indices
                .extend((0..positions.len() as u32).map(|i| i + base_index)),
        }

        let deltas: Vec<Vec<Vec3>> = reader
            .read_morph_targets()
            .map(|(target_positions, _, _)| {
                target_positions
                    .map(|iter| {
                        iter.map(|d| world.transform_vector3(Vec3::from_array(d)))
                            .collect()
                    })
                    .unwrap_or_else(|| vec![Vec3::ZERO; positions.len()])
            })
            .collect();

        if !deltas.is_empty() {
            self.morphs.push(MorphSet {
                first_vertex,
                target_names: target_names.to_vec(),
                deltas,
            });
        }
        Ok(())
    }

    /// Vertices with the expression's morph target fully applied
    pub fn posed(&self, expression: Expression) -> Vec<Vertex> {
        let mut vertices = self.base.clone();
        for set in &self.morphs {
            let Some(target) = set.target_index(expression) else {
                continue;
            };
            for (offset, delta) in set.deltas[target].iter().enumerate() {
                if let Some(vertex) = vertices.get_mut(set.first_vertex + offset) {
                    let moved = Vec3::from_array(vertex.position) + *delta;
                    vertex.position = moved.to_array();
                }
            }
        }
        vertices
    }

    pub fn indices(&self) -> &[u32] {
        &self.indices
    }
}

/// Loaded-or-inert avatar with its current expression
#[derive(Debug)]
pub struct AvatarRig {
    model: Option<AvatarModel>,
    expression: Expression,
    posed: Vec<Vertex>,
}

impl AvatarRig {
    /// Rig without a model; every call is a no-op
    pub fn inert() -> Self {
        Self {
            model: None,
            expression: Expression::Neutral,
            posed: Vec::new(),
        }
    }

    pub fn with_model(model: AvatarModel) -> Self {
        let posed = model.posed(Expression::Neutral);
        Self {
            model: Some(model),
            expression: Expression::Neutral,
            posed,
        }
    }

    /// Load the avatar, falling back to an inert rig on failure
    pub fn load_or_inert(path: &Path) -> Self {
        match AvatarModel::load(path) {
            Ok(model) => Self::with_model(model),
            Err(e) => {
                log::warn!("avatar unavailable, continuing without it: {}", e);
                Self::inert()
            }
        }
    }

    pub fn is_loaded(&self) -> bool {
        self.model.is_some()
    }

    /// Switch expression; returns true when the posed mesh changed
    pub fn set_expression(&mut self, expression: Expression) -> bool {
        let Some(model) = &self.model else {
            return false;
        };
        if expression == self.expression {
            return false;
        }

        log::debug!("avatar expression {:?} -> {:?}", self.expression, expression);
        self.expression = expression;
        self.posed = model.posed(expression);
        true
    }

    /// Current expression, or `None` when no model is loaded
    pub fn expression(&self) -> Option<Expression> {
        self.model.as_ref().map(|_| self.expression)
    }

    pub fn vertices(&self) -> Option<&[Vertex]> {
        self.model.as_ref().map(|_| self.posed.as_slice())
    }

    pub fn indices(&self) -> Option<&[u32]> {
        self.model.as_ref().map(AvatarModel::indices)
    }
}
