//! Objects posed from the ocean surface: raft, avatar and caption.

use glam::{EulerRot, Mat4, Quat, Vec3};

use crate::ocean::WaveField;
use crate::params::FollowerRig;

/// Position and orientation of a follower
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FollowerPose {
    pub position: Vec3,
    /// Rotation about X (radians)
    pub pitch: f32,
    /// Rotation about Z (radians)
    pub roll: f32,
}

impl FollowerPose {
    pub fn rotation(&self) -> Quat {
        Quat::from_euler(EulerRot::XYZ, self.pitch, 0.0, self.roll)
    }

    pub fn model_matrix(&self) -> Mat4 {
        Mat4::from_rotation_translation(self.rotation(), self.position)
    }

    /// Model matrix with an additional uniform scale
    pub fn scaled_model_matrix(&self, scale: f32) -> Mat4 {
        Mat4::from_scale_rotation_translation(Vec3::splat(scale), self.rotation(), self.position)
    }
}

/// Pose the raft on the continuous wave surface
///
/// Height is sampled at the anchor; pitch and roll come from a finite
/// difference against probes `slope_probe` units along +Z and +X.
pub fn raft_pose(wave: &WaveField, rig: &FollowerRig, sim_time: f32) -> FollowerPose {
    let [x, z] = rig.raft_anchor;
    let delta = rig.slope_probe;

    let here = wave.height_at(x, z, sim_time);
    let along_x = wave.height_at(x + delta, z, sim_time);
    let along_z = wave.height_at(x, z + delta, sim_time);

    FollowerPose {
        position: Vec3::new(x, here + rig.raft_lift, z),
        pitch: (here - along_z).atan2(delta),
        roll: (here - along_x).atan2(delta),
    }
}

/// The avatar stands on the raft and rocks with it
pub fn avatar_pose(raft: &FollowerPose, rig: &FollowerRig) -> FollowerPose {
    FollowerPose {
        position: raft.position + Vec3::Y * rig.avatar_lift,
        ..*raft
    }
}

/// The caption floats above the raft, always upright
pub fn caption_position(raft: &FollowerPose, rig: &FollowerRig) -> Vec3 {
    raft.position + Vec3::Y * rig.caption_lift
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::{AmplitudeLimits, OceanPhysics};

    fn wave() -> WaveField {
        let physics = OceanPhysics {
            grid_resolution: 4,
            ..OceanPhysics::default()
        };
        WaveField::new(physics, AmplitudeLimits::default())
    }

    #[test]
    fn test_raft_rides_surface_with_lift() {
        let wave = wave();
        let rig = FollowerRig::default();
        let pose = raft_pose(&wave, &rig, 30.0);

        let surface = wave.height_at(0.0, 0.0, 30.0);
        assert!((pose.position.y - (surface + 15.0)).abs() < 1e-4);
        assert_eq!(pose.position.x, 0.0);
        assert_eq!(pose.position.z, 0.0);
    }

    #[test]
    fn test_raft_tilt_uses_finite_difference() {
        let wave = wave();
        let rig = FollowerRig::default();
        let t = 12.0;
        let pose = raft_pose(&wave, &rig, t);

        let here = wave.height_at(0.0, 0.0, t);
        let along_x = wave.height_at(500.0, 0.0, t);
        let along_z = wave.height_at(0.0, 500.0, t);

        assert!((pose.pitch - (here - along_z).atan2(500.0)).abs() < 1e-6);
        assert!((pose.roll - (here - along_x).atan2(500.0)).abs() < 1e-6);
        // Heights are bounded by the amplitude, so tilt stays gentle
        assert!(pose.pitch.abs() < (90.0_f32 / 500.0).atan() + 1e-6);
    }

    #[test]
    fn test_avatar_and_caption_follow_raft() {
        let rig = FollowerRig::default();
        let raft = FollowerPose {
            position: Vec3::new(3.0, 40.0, -2.0),
            pitch: 0.1,
            roll: -0.05,
        };

        let avatar = avatar_pose(&raft, &rig);
        assert_eq!(avatar.position, Vec3::new(3.0, 55.0, -2.0));
        assert_eq!(avatar.pitch, raft.pitch);
        assert_eq!(avatar.roll, raft.roll);

        assert_eq!(caption_position(&raft, &rig), Vec3::new(3.0, 60.0, -2.0));
    }

    #[test]
    fn test_flat_pose_has_identity_rotation() {
        let pose = FollowerPose {
            position: Vec3::new(1.0, 2.0, 3.0),
            pitch: 0.0,
            roll: 0.0,
        };
        let matrix = pose.model_matrix();
        assert_eq!(matrix.transform_point3(Vec3::ZERO), Vec3::new(1.0, 2.0, 3.0));
        assert!(pose.rotation().abs_diff_eq(Quat::IDENTITY, 1e-6));
    }
}
