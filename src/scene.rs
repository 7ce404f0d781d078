//! Scene assembly: one session's simulation state and its per-frame update.

use std::time::Duration;

use glam::Vec3;

use crate::avatar::{AvatarRig, Expression};
use crate::camera::CameraSystem;
use crate::caption::Mood;
use crate::controller::{AmplitudeController, ControllerPhase};
use crate::followers::{avatar_pose, caption_position, raft_pose, FollowerPose};
use crate::input::{InputAction, MoveState};
use crate::ocean::WaveField;
use crate::params::SceneConfig;
use crate::timer::TimerSlot;

/// Everything the presentation layer needs for one frame
#[derive(Debug, Clone, PartialEq)]
pub struct FrameState {
    /// Simulated time the frame was evaluated at
    pub sim_time: f32,
    pub amplitude: f32,
    pub target_amplitude: f32,
    pub phase: ControllerPhase,
    pub raft: FollowerPose,
    pub avatar: FollowerPose,
    pub caption_position: Vec3,
    pub mood: Mood,
    pub light_intensity: f32,
    /// True when the avatar mesh changed and must be re-uploaded
    pub avatar_changed: bool,
    pub fog_density: f32,
}

/// Result of feeding a key edge to the scene
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyOutcome {
    Handled,
    Ignored,
    Quit,
}

/// Owns the whole simulation for the lifetime of the session
pub struct Scene {
    pub wave: WaveField,
    controller: AmplitudeController,
    camera: CameraSystem,
    moves: MoveState,
    avatar: AvatarRig,
    interaction: TimerSlot,
    config: SceneConfig,
    mood: Option<Mood>,
}

impl Scene {
    pub fn new(config: SceneConfig, avatar: AvatarRig) -> Self {
        let wave = WaveField::new(config.physics.clone(), config.limits.clone());
        let controller = AmplitudeController::new(config.timing.clone());
        let camera = CameraSystem::new(&config.camera);

        Self {
            wave,
            controller,
            camera,
            moves: MoveState::default(),
            avatar,
            interaction: TimerSlot::new(),
            config,
            mood: None,
        }
    }

    /// Feed a key edge at session time `now`
    ///
    /// `repeat` marks keyboard auto-repeat; only the amplitude button reacts
    /// to it, as a further press.
    pub fn handle_key(
        &mut self,
        action: InputAction,
        pressed: bool,
        repeat: bool,
        now: Duration,
    ) -> KeyOutcome {
        if self.moves.apply(action, pressed) {
            return KeyOutcome::Handled;
        }

        match (action, pressed) {
            (InputAction::AmplitudeButton, true) => {
                self.controller.press(now, &mut self.wave);
            }
            (InputAction::AmplitudeButton, false) => {
                self.controller.release(&mut self.wave);
            }
            _ if repeat => return KeyOutcome::Ignored,
            (InputAction::Interact, true) => self.interact(now),
            (InputAction::FogDenser, true) => self.nudge_fog(1),
            (InputAction::FogThinner, true) => self.nudge_fog(-1),
            (InputAction::Quit, true) => return KeyOutcome::Quit,
            _ => return KeyOutcome::Ignored,
        }
        KeyOutcome::Handled
    }

    fn interact(&mut self, now: Duration) {
        if !self.avatar.is_loaded() {
            log::debug!("interaction ignored, no avatar loaded");
            return;
        }
        self.interaction
            .arm_once(now, self.config.timing.interaction_hold);
        log::info!("avatar waves back");
    }

    fn nudge_fog(&mut self, steps: i32) {
        self.config.fog.nudge(steps);
        log::info!("fog density {:.4}", self.config.fog.density);
    }

    /// Advance one frame at session time `now`
    pub fn update(&mut self, now: Duration) -> FrameState {
        let sim_time = now.as_secs_f32() * self.config.physics.time_scale;

        self.controller.poll(now, &mut self.wave);
        self.wave.tick(sim_time);
        self.camera.apply_movement(&self.moves);

        let rig = &self.config.rig;
        let raft = raft_pose(&self.wave, rig, sim_time);
        let avatar = avatar_pose(&raft, rig);
        let caption = caption_position(&raft, rig);

        let mood = Mood::from_amplitude(self.wave.amplitude(), &self.config.moods);
        if self.mood != Some(mood) {
            log::info!(
                "sea mood {:?}: {}",
                mood,
                mood.presentation(&self.config.moods).caption
            );
            self.mood = Some(mood);
        }
        let presentation = mood.presentation(&self.config.moods);

        while self.interaction.take_due(now).is_some() {}
        let expression = if self.interaction.is_armed() {
            Expression::Surprised
        } else {
            presentation.expression
        };
        let avatar_changed = self.avatar.set_expression(expression);

        FrameState {
            sim_time,
            amplitude: self.wave.amplitude(),
            target_amplitude: self.wave.target(),
            phase: self.controller.phase(),
            raft,
            avatar,
            caption_position: caption,
            mood,
            light_intensity: presentation.light_intensity,
            avatar_changed,
            fog_density: self.config.fog.density,
        }
    }

    /// Caption text for the most recent frame's mood
    pub fn caption(&self) -> &str {
        let mood = self.mood.unwrap_or_else(|| {
            Mood::from_amplitude(self.wave.amplitude(), &self.config.moods)
        });
        &mood.presentation(&self.config.moods).caption
    }

    pub fn camera(&self) -> &CameraSystem {
        &self.camera
    }

    pub fn avatar(&self) -> &AvatarRig {
        &self.avatar
    }

    pub fn config(&self) -> &SceneConfig {
        &self.config
    }

    pub fn controller_phase(&self) -> ControllerPhase {
        self.controller.phase()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::avatar::tests::triangle_model;
    use crate::params::OceanPhysics;

    fn ms(millis: u64) -> Duration {
        Duration::from_millis(millis)
    }

    fn config() -> SceneConfig {
        SceneConfig {
            physics: OceanPhysics {
                grid_resolution: 8,
                ..OceanPhysics::default()
            },
            ..SceneConfig::default()
        }
    }

    #[test]
    fn test_first_frame_at_initial_amplitude() {
        let mut scene = Scene::new(config(), AvatarRig::inert());
        let frame = scene.update(ms(0));

        assert_eq!(frame.amplitude, 45.0);
        assert_eq!(frame.mood, Mood::Prompt);
        assert_eq!(frame.phase, ControllerPhase::Idle);
        assert!(!frame.avatar_changed);
        assert!(scene.caption().starts_with("You have the power"));
    }

    #[test]
    fn test_sim_time_is_scaled_wall_time() {
        let mut scene = Scene::new(config(), AvatarRig::inert());
        let frame = scene.update(ms(1500));
        assert!((frame.sim_time - 15.0).abs() < 1e-5);
    }

    #[test]
    fn test_space_press_and_release() {
        let mut scene = Scene::new(config(), AvatarRig::inert());
        let outcome = scene.handle_key(InputAction::AmplitudeButton, true, false, ms(0));
        assert_eq!(outcome, KeyOutcome::Handled);
        assert_eq!(scene.wave.target(), 50.0);

        scene.handle_key(InputAction::AmplitudeButton, false, false, ms(100));
        assert_eq!(scene.wave.target(), 45.0);
        assert_eq!(scene.controller_phase(), ControllerPhase::ArmedDebounce);
    }

    #[test]
    fn test_auto_repeat_counts_as_presses() {
        let mut scene = Scene::new(config(), AvatarRig::inert());
        scene.handle_key(InputAction::AmplitudeButton, true, false, ms(0));
        scene.handle_key(InputAction::AmplitudeButton, true, true, ms(500));
        scene.handle_key(InputAction::AmplitudeButton, true, true, ms(530));
        assert_eq!(scene.wave.target(), 60.0);
    }

    #[test]
    fn test_movement_keys_move_camera_each_frame() {
        let mut scene = Scene::new(config(), AvatarRig::inert());
        scene.handle_key(InputAction::MoveForward, true, false, ms(0));
        scene.update(ms(16));
        scene.update(ms(32));
        scene.handle_key(InputAction::MoveForward, false, false, ms(40));
        scene.update(ms(48));

        assert_eq!(scene.camera().eye(), Vec3::new(0.0, 100.0, 198.0));
    }

    #[test]
    fn test_stormy_sea_changes_mood_and_light() {
        let mut scene = Scene::new(config(), AvatarRig::inert());
        scene.wave.set_target_amplitude(100.0);

        let mut frame = scene.update(ms(0));
        for i in 1..=60 {
            frame = scene.update(ms(i * 16));
        }

        assert_eq!(frame.amplitude, 100.0);
        assert_eq!(frame.mood, Mood::Stormy);
        assert_eq!(frame.light_intensity, 0.45);
    }

    #[test]
    fn test_avatar_expression_follows_mood() {
        let avatar = AvatarRig::with_model(triangle_model(Vec::new()));
        let mut scene = Scene::new(config(), avatar);
        scene.wave.set_target_amplitude(100.0);

        let mut changes = 0;
        for i in 0..=60 {
            if scene.update(ms(i * 16)).avatar_changed {
                changes += 1;
            }
        }
        assert_eq!(changes, 1);
        assert_eq!(scene.avatar().expression(), Some(Expression::Surprised));
    }

    #[test]
    fn test_interaction_holds_gesture_then_reverts() {
        let avatar = AvatarRig::with_model(triangle_model(Vec::new()));
        let mut scene = Scene::new(config(), avatar);

        scene.handle_key(InputAction::Interact, true, false, ms(0));
        assert!(scene.update(ms(10)).avatar_changed);
        assert_eq!(scene.avatar().expression(), Some(Expression::Surprised));

        scene.update(ms(1400));
        assert_eq!(scene.avatar().expression(), Some(Expression::Surprised));

        assert!(scene.update(ms(1500)).avatar_changed);
        assert_eq!(scene.avatar().expression(), Some(Expression::Neutral));
    }

    #[test]
    fn test_interaction_without_avatar_is_inert() {
        let mut scene = Scene::new(config(), AvatarRig::inert());
        scene.handle_key(InputAction::Interact, true, false, ms(0));
        let frame = scene.update(ms(10));
        assert!(!frame.avatar_changed);
        assert_eq!(scene.avatar().expression(), None);
    }

    #[test]
    fn test_fog_keys_adjust_density() {
        let mut scene = Scene::new(config(), AvatarRig::inert());
        scene.handle_key(InputAction::FogDenser, true, false, ms(0));
        let frame = scene.update(ms(0));
        assert!((frame.fog_density - 0.0008).abs() < 1e-7);

        scene.handle_key(InputAction::FogThinner, true, false, ms(0));
        scene.handle_key(InputAction::FogThinner, true, false, ms(0));
        let frame = scene.update(ms(0));
        assert!((frame.fog_density - 0.0006).abs() < 1e-7);
    }

    #[test]
    fn test_escape_requests_quit() {
        let mut scene = Scene::new(config(), AvatarRig::inert());
        assert_eq!(
            scene.handle_key(InputAction::Quit, true, false, ms(0)),
            KeyOutcome::Quit
        );
        assert_eq!(
            scene.handle_key(InputAction::Quit, false, false, ms(0)),
            KeyOutcome::Ignored
        );
    }
}
