//! Rendering configuration: window, projection, fog and light.

/// Rendering configuration
#[derive(Debug, Clone)]
pub struct RenderConfig {
    /// Window width (pixels)
    pub window_width: u32,

    /// Window height (pixels)
    pub window_height: u32,

    /// Field of view (degrees)
    pub fov_degrees: f32,

    /// Near clipping plane (world units)
    pub near_plane: f32,

    /// Far clipping plane (world units)
    pub far_plane: f32,

    /// Sky and fog colour (linear RGB)
    pub sky_color: [f32; 3],

    /// Direction towards the sun (need not be normalized)
    pub light_direction: [f32; 3],

    pub ocean_color: [f32; 3],
    pub raft_color: [f32; 3],
    pub avatar_color: [f32; 3],
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            window_width: 1280,
            window_height: 720,
            fov_degrees: 75.0,
            near_plane: 0.1,
            far_plane: 1000.0,
            // 0xaaccff
            sky_color: [0.402, 0.604, 1.0],
            light_direction: [0.0, 1.0, 0.0],
            // 0x0044ff
            ocean_color: [0.0, 0.058, 1.0],
            // 0x8b4513
            raft_color: [0.258, 0.060, 0.007],
            avatar_color: [0.6, 0.6, 0.65],
        }
    }
}

/// Exponential-squared fog density and its runtime adjustment range
#[derive(Debug, Clone)]
pub struct FogSettings {
    pub density: f32,
    pub max_density: f32,
    /// Change per adjustment key press
    pub step: f32,
}

impl Default for FogSettings {
    fn default() -> Self {
        Self {
            density: 0.0007,
            max_density: 0.002,
            step: 0.0001,
        }
    }
}

impl FogSettings {
    /// Adjust density by `steps` increments, staying within `[0, max_density]`
    pub fn nudge(&mut self, steps: i32) {
        self.density = (self.density + steps as f32 * self.step).clamp(0.0, self.max_density);
    }
}
