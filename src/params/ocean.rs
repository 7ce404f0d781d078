//! Ocean height-field parameters and amplitude limits.

/// Ocean simulation physics parameters
#[derive(Debug, Clone)]
pub struct OceanPhysics {
    /// Grid resolution (vertices per side, e.g., 256 = 65,536 samples)
    pub grid_resolution: usize,

    /// Edge length of the square ocean plane in world units
    pub extent: f32,

    /// Multiplier from wall-clock seconds to simulated time
    pub time_scale: f32,

    /// Divisor applied to the spatial term (sample index or world X)
    pub spatial_divisor: f32,

    /// Divisor applied to the travelling term (time plus sample index or world Z)
    pub temporal_divisor: f32,
}

impl Default for OceanPhysics {
    fn default() -> Self {
        Self {
            grid_resolution: 256,
            extent: 20_000.0,
            time_scale: 10.0,
            spatial_divisor: 5.0,
            temporal_divisor: 7.0,
        }
    }
}

impl OceanPhysics {
    /// Largest grid side length; keeps vertex indices well inside `u32`
    pub const MAX_GRID_RESOLUTION: usize = 4096;

    /// Grid resolution limited to `2..=MAX_GRID_RESOLUTION`
    pub fn resolution(&self) -> usize {
        self.grid_resolution.clamp(2, Self::MAX_GRID_RESOLUTION)
    }

    /// Spacing between neighbouring grid vertices in world units
    pub fn grid_spacing(&self) -> f32 {
        self.extent / (self.resolution() - 1) as f32
    }
}

/// Bounds and step size for the wave amplitude
#[derive(Debug, Clone)]
pub struct AmplitudeLimits {
    /// Amplitude at startup (both current and target)
    pub initial: f32,

    /// Lower bound for current and target amplitude
    pub min: f32,

    /// Upper bound for current and target amplitude
    pub max: f32,

    /// Change applied to the target per button press or decay firing
    pub step: f32,

    /// Largest change of the current amplitude per tick
    pub slew_per_tick: f32,
}

impl Default for AmplitudeLimits {
    fn default() -> Self {
        Self {
            initial: 45.0,
            min: 10.0,
            max: 100.0,
            step: 5.0,
            slew_per_tick: 1.0,
        }
    }
}

impl AmplitudeLimits {
    /// Clamp a requested amplitude into `[min, max]`
    ///
    /// NaN maps to `min`.
    pub fn clamp(&self, value: f32) -> f32 {
        if value.is_nan() {
            return self.min;
        }
        value.clamp(self.min, self.max)
    }
}
