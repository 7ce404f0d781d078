//! Keyboard bindings and held-key movement state.

use winit::keyboard::KeyCode;

/// Logical actions bound to keys
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputAction {
    /// Raises the sea while pressed, lowers it on release
    AmplitudeButton,
    MoveForward,
    MoveBack,
    MoveLeft,
    MoveRight,
    /// Makes the avatar react
    Interact,
    FogDenser,
    FogThinner,
    Quit,
}

/// Map a physical key to its action
pub fn action_for_key(key: KeyCode) -> Option<InputAction> {
    let action = match key {
        KeyCode::Space => InputAction::AmplitudeButton,
        KeyCode::ArrowUp | KeyCode::KeyW => InputAction::MoveForward,
        KeyCode::ArrowDown | KeyCode::KeyS => InputAction::MoveBack,
        KeyCode::ArrowLeft | KeyCode::KeyA => InputAction::MoveLeft,
        KeyCode::ArrowRight | KeyCode::KeyD => InputAction::MoveRight,
        KeyCode::KeyE => InputAction::Interact,
        KeyCode::BracketRight => InputAction::FogDenser,
        KeyCode::BracketLeft => InputAction::FogThinner,
        KeyCode::Escape => InputAction::Quit,
        _ => return None,
    };
    Some(action)
}

/// Which movement keys are currently held
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MoveState {
    pub forward: bool,
    pub back: bool,
    pub left: bool,
    pub right: bool,
}

impl MoveState {
    /// Record a movement key edge; returns false for non-movement actions
    pub fn apply(&mut self, action: InputAction, pressed: bool) -> bool {
        let flag = match action {
            InputAction::MoveForward => &mut self.forward,
            InputAction::MoveBack => &mut self.back,
            InputAction::MoveLeft => &mut self.left,
            InputAction::MoveRight => &mut self.right,
            _ => return false,
        };
        *flag = pressed;
        true
    }
}
