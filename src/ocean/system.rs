//! Wave field: amplitude convergence plus the two height evaluators.

use super::mesh::OceanGrid;
use crate::params::{AmplitudeLimits, OceanPhysics};

/// Current and target wave amplitude
///
/// Both values always lie within the configured [`AmplitudeLimits`].
#[derive(Debug, Clone, Copy, PartialEq)]
struct AmplitudeState {
    current: f32,
    target: f32,
}

impl AmplitudeState {
    fn new(limits: &AmplitudeLimits) -> Self {
        let initial = limits.clamp(limits.initial);
        Self {
            current: initial,
            target: initial,
        }
    }

    /// Move `current` towards `target` by at most `slew`, never overshooting
    fn advance(&mut self, slew: f32) {
        if self.current < self.target {
            self.current = (self.current + slew).min(self.target);
        } else if self.current > self.target {
            self.current = (self.current - slew).max(self.target);
        }
    }
}

/// Ocean height field with a target-seeking amplitude
pub struct WaveField {
    pub grid: OceanGrid,
    physics: OceanPhysics,
    limits: AmplitudeLimits,
    amplitude: AmplitudeState,
}

impl WaveField {
    /// Create a wave field at the initial amplitude
    pub fn new(physics: OceanPhysics, limits: AmplitudeLimits) -> Self {
        let grid = OceanGrid::new(&physics);
        let amplitude = AmplitudeState::new(&limits);
        Self {
            grid,
            physics,
            limits,
            amplitude,
        }
    }

    /// Advance the simulation by one tick
    ///
    /// Steps the current amplitude towards the target, then recomputes every
    /// sample of the grid for `sim_time`.
    pub fn tick(&mut self, sim_time: f32) {
        let before = self.amplitude.current;
        self.amplitude.advance(self.limits.slew_per_tick);
        if before != self.amplitude.current {
            log::trace!("amplitude {} -> {}", before, self.amplitude.current);
        }

        self.grid.update(self.amplitude.current, sim_time, &self.physics);
    }

    /// Continuous surface height at world `(x, z)` for the current amplitude
    ///
    /// Independent of the discretised grid; followers sample this one.
    pub fn height_at(&self, x: f32, z: f32, sim_time: f32) -> f32 {
        let phase = x as f64 / self.physics.spatial_divisor as f64
            + (sim_time as f64 + z as f64) / self.physics.temporal_divisor as f64;
        (self.amplitude.current as f64 * phase.sin()) as f32
    }

    /// Set the amplitude the field converges to, clamped into the limits
    ///
    /// The current amplitude only moves on the next [`WaveField::tick`].
    pub fn set_target_amplitude(&mut self, value: f32) {
        if value.is_nan() {
            log::warn!("ignoring NaN target amplitude");
            return;
        }
        let target = self.limits.clamp(value);
        log::trace!("target amplitude {} (requested {})", target, value);
        self.amplitude.target = target;
    }

    /// Raise the target by one step
    pub fn increase_target(&mut self) {
        self.set_target_amplitude(self.amplitude.target + self.limits.step);
    }

    /// Lower the target by one step
    pub fn decrease_target(&mut self) {
        self.set_target_amplitude(self.amplitude.target - self.limits.step);
    }

    /// Drop the target straight to the minimum amplitude
    pub fn reset_target(&mut self) {
        self.set_target_amplitude(self.limits.min);
    }

    /// Current amplitude
    pub fn amplitude(&self) -> f32 {
        self.amplitude.current
    }

    pub fn target(&self) -> f32 {
        self.amplitude.target
    }

    /// True once the current amplitude has reached the lower bound
    pub fn at_minimum(&self) -> bool {
        self.amplitude.current <= self.limits.min
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small_field() -> WaveField {
        let physics = OceanPhysics {
            grid_resolution: 16,
            extent: 150.0,
            ..OceanPhysics::default()
        };
        WaveField::new(physics, AmplitudeLimits::default())
    }

    #[test]
    fn test_starts_at_initial_amplitude() {
        let field = small_field();
        assert_eq!(field.amplitude(), 45.0);
        assert_eq!(field.target(), 45.0);
    }

    #[test]
    fn test_initial_amplitude_is_clamped() {
        let limits = AmplitudeLimits {
            initial: 500.0,
            ..AmplitudeLimits::default()
        };
        let field = WaveField::new(OceanPhysics::default(), limits);
        assert_eq!(field.amplitude(), 100.0);
        assert_eq!(field.target(), 100.0);
    }

    #[test]
    fn test_nan_initial_amplitude_starts_at_minimum() {
        let limits = AmplitudeLimits {
            initial: f32::NAN,
            ..AmplitudeLimits::default()
        };
        let mut field = WaveField::new(OceanPhysics::default(), limits);
        assert_eq!(field.amplitude(), 10.0);
        assert_eq!(field.target(), 10.0);

        // The field still answers to the button afterwards
        field.increase_target();
        field.tick(0.0);
        assert_eq!(field.target(), 15.0);
        assert_eq!(field.amplitude(), 11.0);
    }

    #[test]
    fn test_fixed_point_when_current_equals_target() {
        let mut field = small_field();
        field.tick(0.0);
        assert_eq!(field.amplitude(), 45.0);
        field.tick(1.0);
        assert_eq!(field.amplitude(), 45.0);
    }

    #[test]
    fn test_set_target_clamps_to_limits() {
        let mut field = small_field();

        field.set_target_amplitude(999.0);
        assert_eq!(field.target(), 100.0);

        field.set_target_amplitude(-5.0);
        assert_eq!(field.target(), 10.0);

        field.set_target_amplitude(f32::INFINITY);
        assert_eq!(field.target(), 100.0);
    }

    #[test]
    fn test_nan_target_is_ignored() {
        let mut field = small_field();
        field.set_target_amplitude(f32::NAN);
        assert_eq!(field.target(), 45.0);
    }

    #[test]
    fn test_set_target_does_not_touch_current() {
        let mut field = small_field();
        field.set_target_amplitude(90.0);
        assert_eq!(field.amplitude(), 45.0);
    }

    #[test]
    fn test_current_converges_one_unit_per_tick_without_overshoot() {
        let mut field = small_field();
        field.set_target_amplitude(48.5);

        let mut previous = field.amplitude();
        for tick in 0..10 {
            field.tick(tick as f32);
            let current = field.amplitude();
            assert!((current - previous).abs() <= 1.0);
            assert!(current <= 48.5);
            previous = current;
        }
        assert_eq!(field.amplitude(), 48.5);

        field.set_target_amplitude(10.0);
        for tick in 0..100 {
            field.tick(tick as f32);
            assert!(field.amplitude() >= 10.0);
        }
        assert_eq!(field.amplitude(), 10.0);
        assert!(field.at_minimum());
    }

    #[test]
    fn test_step_helpers() {
        let mut field = small_field();
        field.increase_target();
        assert_eq!(field.target(), 50.0);
        field.decrease_target();
        field.decrease_target();
        assert_eq!(field.target(), 40.0);
        field.reset_target();
        assert_eq!(field.target(), 10.0);
        field.decrease_target();
        assert_eq!(field.target(), 10.0);
    }

    #[test]
    fn test_height_at_matches_position_formula() {
        let field = small_field();
        let (x, z, t) = (12.0_f32, -40.0_f32, 3.5_f32);
        let expected = 45.0 * (x / 5.0 + (t + z) / 7.0).sin();
        assert!((field.height_at(x, z, t) - expected).abs() < 1e-4);
    }

    #[test]
    fn test_height_at_is_deterministic_and_continuous() {
        let field = small_field();
        assert_eq!(field.height_at(3.0, 4.0, 5.0), field.height_at(3.0, 4.0, 5.0));

        let base = field.height_at(3.0, 4.0, 5.0);
        let eps = 1e-3;
        assert!((field.height_at(3.0 + eps, 4.0, 5.0) - base).abs() < 0.05);
        assert!((field.height_at(3.0, 4.0 + eps, 5.0) - base).abs() < 0.05);
        assert!((field.height_at(3.0, 4.0, 5.0 + eps) - base).abs() < 0.05);
    }

    #[test]
    fn test_grid_and_position_evaluators_differ() {
        let mut field = small_field();
        field.tick(2.0);

        // Sample 1 sits at a world position unrelated to its index phase
        let vertex = field.grid.vertices[1].position;
        let by_index = field.grid.height(1).unwrap();
        let by_position = field.height_at(vertex[0], vertex[2], 2.0);
        assert!((by_index - by_position).abs() > 1e-3);
    }

    #[test]
    fn test_tick_recomputes_full_grid() {
        let mut field = small_field();
        field.tick(7.0);
        let first: Vec<f32> = field.grid.heights().collect();
        field.tick(7.0);
        let second: Vec<f32> = field.grid.heights().collect();
        assert_eq!(first, second);
        assert_eq!(first.len(), 16 * 16);
    }
}
