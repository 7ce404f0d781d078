//! Parameter definitions with units and documented semantics.
//!
//! All tuned constants live here so the simulation code reads them by name.

mod camera;
mod controls;
mod ocean;
mod render;
mod scene;

pub use camera::CameraParams;
pub use controls::ControlTiming;
pub use ocean::{AmplitudeLimits, OceanPhysics};
pub use render::{FogSettings, RenderConfig};
pub use scene::{FollowerRig, MoodPresentation, MoodTable, RaftGeometry};

/// Everything needed to assemble a [`crate::scene::Scene`]
#[derive(Debug, Clone, Default)]
pub struct SceneConfig {
    pub physics: OceanPhysics,
    pub limits: AmplitudeLimits,
    pub timing: ControlTiming,
    pub rig: FollowerRig,
    pub raft: RaftGeometry,
    pub moods: MoodTable,
    pub camera: CameraParams,
    pub render: RenderConfig,
    pub fog: FogSettings,
}
