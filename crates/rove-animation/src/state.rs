//! Animation state selection

use serde::Serialize;

/// Which procedural animation drives the pose this tick.
///
/// Derived fresh every tick from the movement flags; no transition history
/// is kept.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AnimationState {
    #[default]
    Idle,
    Walking,
    Jumping,
}

impl AnimationState {
    /// Jumping wins over any horizontal motion
    pub fn select(is_moving: bool, is_jumping: bool) -> Self {
        if is_jumping {
            AnimationState::Jumping
        } else if is_moving {
            AnimationState::Walking
        } else {
            AnimationState::Idle
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            AnimationState::Idle => "idle",
            AnimationState::Walking => "walking",
            AnimationState::Jumping => "jumping",
        }
    }
}
