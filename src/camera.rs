//! Keyboard-driven camera that keeps looking at its orbit target.

use glam::{Mat4, Vec3};

use crate::input::MoveState;
use crate::params::{CameraParams, RenderConfig};

/// Camera system with an eye that slides in the XZ plane
pub struct CameraSystem {
    eye: Vec3,
    target: Vec3,
    move_speed: f32,
}

impl CameraSystem {
    /// Create new camera system from its start pose
    pub fn new(params: &CameraParams) -> Self {
        Self {
            eye: Vec3::from_array(params.eye),
            target: Vec3::from_array(params.target),
            move_speed: params.move_speed,
        }
    }

    /// Slide the eye for one tick of held movement keys
    ///
    /// Forward is -Z and right is +X; the look-at target does not move, so
    /// the view turns to keep it centred.
    pub fn apply_movement(&mut self, moves: &MoveState) {
        if moves.forward {
            self.eye.z -= self.move_speed;
        }
        if moves.back {
            self.eye.z += self.move_speed;
        }
        if moves.left {
            self.eye.x -= self.move_speed;
        }
        if moves.right {
            self.eye.x += self.move_speed;
        }
    }

    pub fn eye(&self) -> Vec3 {
        self.eye
    }

    pub fn target(&self) -> Vec3 {
        self.target
    }

    /// Create view-projection matrix for rendering
    ///
    /// `aspect_ratio` is width over height of the current surface.
    ///
    /// # Returns
    /// Tuple of (view_proj_matrix, camera_position)
    pub fn create_view_proj_matrix(
        &self,
        render_config: &RenderConfig,
        aspect_ratio: f32,
    ) -> (Mat4, Vec3) {
        // Always keep Y as up vector (camera never rolls)
        let view = Mat4::look_at_rh(self.eye, self.target, Vec3::Y);
        let proj = Mat4::perspective_rh(
            render_config.fov_degrees.to_radians(),
            aspect_ratio,
            render_config.near_plane,
            render_config.far_plane,
        );

        (proj * view, self.eye)
    }
}
