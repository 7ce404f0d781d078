//! Amplitude button state machine with debounced decay.

use std::time::Duration;

use crate::ocean::WaveField;
use crate::params::ControlTiming;
use crate::timer::TimerSlot;

/// Observable phase of the controller, derived from which timers are live
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControllerPhase {
    /// No live timers
    Idle,
    /// Button pressed recently; waiting for the debounce delay
    ArmedDebounce,
    /// Periodically lowering the target amplitude
    Decaying,
}

/// Turns amplitude button edges into target-amplitude changes
///
/// A press raises the target one step and restarts the debounce. When the
/// debounce elapses without another press, a repeating decay lowers the
/// target one step per interval until the current amplitude reaches the
/// minimum. A release lowers the target one step and leaves the timers alone.
#[derive(Debug)]
pub struct AmplitudeController {
    timing: ControlTiming,
    debounce: TimerSlot,
    decay: TimerSlot,
}

impl AmplitudeController {
    pub fn new(timing: ControlTiming) -> Self {
        Self {
            timing,
            debounce: TimerSlot::new(),
            decay: TimerSlot::new(),
        }
    }

    /// Button-down at session time `now`
    pub fn press(&mut self, now: Duration, wave: &mut WaveField) {
        wave.increase_target();

        self.debounce.cancel();
        if self.decay.cancel().is_some() {
            log::debug!("decay interrupted by button press");
        }
        self.debounce.arm_once(now, self.timing.debounce);

        log::debug!(
            "amplitude button down: target {}, decay in {:?}",
            wave.target(),
            self.timing.debounce
        );
    }

    /// Button-up; a single step down, timers untouched
    pub fn release(&mut self, wave: &mut WaveField) {
        wave.decrease_target();
        log::debug!("amplitude button up: target {}", wave.target());
    }

    /// Fire every timer due at `now`, oldest deadline first
    pub fn poll(&mut self, now: Duration, wave: &mut WaveField) {
        loop {
            let debounce_due = self.debounce.deadline().filter(|d| *d <= now);
            let decay_due = self.decay.deadline().filter(|d| *d <= now);

            match (debounce_due, decay_due) {
                (None, None) => break,
                (Some(debounce), Some(decay)) if decay < debounce => self.fire_decay(now, wave),
                (Some(_), _) => self.fire_debounce(now),
                (None, Some(_)) => self.fire_decay(now, wave),
            }
        }
    }

    fn fire_debounce(&mut self, now: Duration) {
        if let Some(fired_at) = self.debounce.take_due(now) {
            self.decay.arm_repeating(fired_at, self.timing.decay_interval);
            log::debug!(
                "debounce elapsed, decaying every {:?}",
                self.timing.decay_interval
            );
        }
    }

    fn fire_decay(&mut self, now: Duration, wave: &mut WaveField) {
        if self.decay.take_due(now).is_none() {
            return;
        }

        wave.decrease_target();
        if wave.at_minimum() {
            self.decay.cancel();
            log::debug!("amplitude at minimum, decay stopped");
        }
    }

    pub fn phase(&self) -> ControllerPhase {
        if self.decay.is_armed() {
            ControllerPhase::Decaying
        } else if self.debounce.is_armed() {
            ControllerPhase::ArmedDebounce
        } else {
            ControllerPhase::Idle
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::{AmplitudeLimits, OceanPhysics};

    fn ms(millis: u64) -> Duration {
        Duration::from_millis(millis)
    }

    fn setup() -> (AmplitudeController, WaveField) {
        let physics = OceanPhysics {
            grid_resolution: 4,
            ..OceanPhysics::default()
        };
        let wave = WaveField::new(physics, AmplitudeLimits::default());
        (AmplitudeController::new(ControlTiming::default()), wave)
    }

    #[test]
    fn test_starts_idle() {
        let (controller, _) = setup();
        assert_eq!(controller.phase(), ControllerPhase::Idle);
    }

    #[test]
    fn test_press_raises_target_and_arms_debounce() {
        let (mut controller, mut wave) = setup();
        controller.press(ms(0), &mut wave);

        assert_eq!(wave.target(), 50.0);
        assert_eq!(wave.amplitude(), 45.0);
        assert_eq!(controller.phase(), ControllerPhase::ArmedDebounce);
    }

    #[test]
    fn test_release_lowers_target_regardless_of_timers() {
        let (mut controller, mut wave) = setup();
        controller.press(ms(0), &mut wave);
        controller.release(&mut wave);

        assert_eq!(wave.target(), 45.0);
        assert_eq!(controller.phase(), ControllerPhase::ArmedDebounce);
    }

    #[test]
    fn test_debounce_elapses_into_decay() {
        let (mut controller, mut wave) = setup();
        controller.press(ms(0), &mut wave);

        controller.poll(ms(1999), &mut wave);
        assert_eq!(controller.phase(), ControllerPhase::ArmedDebounce);

        controller.poll(ms(2000), &mut wave);
        assert_eq!(controller.phase(), ControllerPhase::Decaying);
        assert_eq!(wave.target(), 50.0);

        controller.poll(ms(4000), &mut wave);
        assert_eq!(wave.target(), 45.0);
    }

    #[test]
    fn test_press_during_decay_restarts_debounce() {
        let (mut controller, mut wave) = setup();
        controller.press(ms(0), &mut wave);
        controller.poll(ms(4000), &mut wave);
        assert_eq!(controller.phase(), ControllerPhase::Decaying);
        assert_eq!(wave.target(), 45.0);

        controller.press(ms(4500), &mut wave);
        assert_eq!(controller.phase(), ControllerPhase::ArmedDebounce);
        assert_eq!(wave.target(), 50.0);

        // The old interval would have fired at 6000
        controller.poll(ms(6000), &mut wave);
        assert_eq!(wave.target(), 50.0);
        assert_eq!(controller.phase(), ControllerPhase::ArmedDebounce);

        controller.poll(ms(6500), &mut wave);
        assert_eq!(controller.phase(), ControllerPhase::Decaying);
    }

    #[test]
    fn test_repeated_presses_keep_single_debounce() {
        let (mut controller, mut wave) = setup();
        controller.press(ms(0), &mut wave);
        controller.press(ms(1000), &mut wave);
        controller.press(ms(1900), &mut wave);
        assert_eq!(wave.target(), 60.0);

        controller.poll(ms(2100), &mut wave);
        assert_eq!(controller.phase(), ControllerPhase::ArmedDebounce);

        controller.poll(ms(3900), &mut wave);
        assert_eq!(controller.phase(), ControllerPhase::Decaying);
    }

    #[test]
    fn test_decay_stops_once_current_reaches_minimum() {
        let (mut controller, mut wave) = setup();
        controller.press(ms(0), &mut wave);
        controller.release(&mut wave);

        // One tick per 100ms keeps current close behind target
        let mut now = ms(0);
        while now < ms(60_000) {
            now += ms(100);
            controller.poll(now, &mut wave);
            wave.tick(now.as_secs_f32() * 10.0);
        }

        assert_eq!(wave.target(), 10.0);
        assert_eq!(wave.amplitude(), 10.0);
        assert_eq!(controller.phase(), ControllerPhase::Idle);
    }

    #[test]
    fn test_decay_waits_for_current_not_target() {
        let (mut controller, mut wave) = setup();
        wave.set_target_amplitude(10.0);
        controller.press(ms(0), &mut wave);
        assert_eq!(wave.target(), 15.0);

        // No ticks: current stays at 45, so decay keeps firing at the floor
        controller.poll(ms(10_000), &mut wave);
        assert_eq!(wave.target(), 10.0);
        assert_eq!(controller.phase(), ControllerPhase::Decaying);
    }
}
