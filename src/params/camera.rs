//! Camera start pose and movement.

/// Keyboard-driven camera parameters
#[derive(Debug, Clone)]
pub struct CameraParams {
    /// Initial eye position (world units)
    pub eye: [f32; 3],

    /// Point the camera keeps looking at
    pub target: [f32; 3],

    /// Eye displacement per tick while a movement key is held
    pub move_speed: f32,
}

impl Default for CameraParams {
    fn default() -> Self {
        Self {
            eye: [0.0, 100.0, 200.0],
            target: [0.0, 0.0, 0.0],
            move_speed: 1.0,
        }
    }
}
