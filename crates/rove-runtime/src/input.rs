//! Input state management

use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use winit::keyboard::KeyCode;

/// Action names understood by the locomotion core
pub mod actions {
    pub const MOVE_FORWARD: &str = "move_forward";
    pub const MOVE_BACKWARD: &str = "move_backward";
    pub const MOVE_LEFT: &str = "move_left";
    pub const MOVE_RIGHT: &str = "move_right";
    pub const JUMP: &str = "jump";
}

/// Action name -> keys bound to it. Deserializes from a TOML table such as
/// `move_forward = ["KeyW", "ArrowUp"]`; actions left out keep their defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InputBindings {
    pub actions: HashMap<String, Vec<KeyCode>>,
}

impl Default for InputBindings {
    fn default() -> Self {
        let mut map = HashMap::new();
        map.insert(
            actions::MOVE_FORWARD.into(),
            vec![KeyCode::KeyW, KeyCode::ArrowUp],
        );
        map.insert(
            actions::MOVE_BACKWARD.into(),
            vec![KeyCode::KeyS, KeyCode::ArrowDown],
        );
        map.insert(
            actions::MOVE_LEFT.into(),
            vec![KeyCode::KeyA, KeyCode::ArrowLeft],
        );
        map.insert(
            actions::MOVE_RIGHT.into(),
            vec![KeyCode::KeyD, KeyCode::ArrowRight],
        );
        map.insert(actions::JUMP.into(), vec![KeyCode::Space]);
        Self { actions: map }
    }
}

impl InputBindings {
    /// Defaults with the given overrides applied on top
    pub fn with_overrides(overrides: &InputBindings) -> Self {
        let mut bindings = Self::default();
        for (action, keys) in &overrides.actions {
            bindings.actions.insert(action.clone(), keys.clone());
        }
        bindings
    }
}

/// The five movement flags sampled for one tick. Flags mean "currently held",
/// not "pressed this frame".
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MovementIntent {
    pub forward: bool,
    pub backward: bool,
    pub left: bool,
    pub right: bool,
    pub jump: bool,
}

impl MovementIntent {
    /// Is any of the four directional flags held?
    pub fn any_direction(&self) -> bool {
        self.forward || self.backward || self.left || self.right
    }
}

/// Tracks held keys and pointer motion between ticks
pub struct InputState {
    /// Keys currently held down
    keys_down: HashSet<KeyCode>,

    /// Whether the pointer is captured (locked to the window)
    pointer_captured: bool,
    /// Latest pointer delta since the last tick
    pointer_delta: (f64, f64),

    /// Action map: action name -> list of key bindings
    action_map: HashMap<String, Vec<KeyCode>>,
}

impl Default for InputState {
    fn default() -> Self {
        Self::new()
    }
}

impl InputState {
    pub fn new() -> Self {
        Self::with_bindings(InputBindings::default())
    }

    pub fn with_bindings(bindings: InputBindings) -> Self {
        Self {
            keys_down: HashSet::new(),
            pointer_captured: false,
            pointer_delta: (0.0, 0.0),
            action_map: bindings.actions,
        }
    }

    /// Process a key press event
    pub fn process_key_down(&mut self, key: KeyCode) {
        self.keys_down.insert(key);
    }

    /// Process a key release event
    pub fn process_key_up(&mut self, key: KeyCode) {
        self.keys_down.remove(&key);
    }

    /// Enter or leave pointer capture. Leaving drops any pending delta.
    pub fn set_pointer_captured(&mut self, captured: bool) {
        self.pointer_captured = captured;
        if !captured {
            self.pointer_delta = (0.0, 0.0);
        }
    }

    pub fn is_pointer_captured(&self) -> bool {
        self.pointer_captured
    }

    /// Record raw pointer motion. Only the latest sample before a tick is
    /// kept, and motion outside capture mode is ignored.
    pub fn process_pointer_delta(&mut self, dx: f64, dy: f64) {
        if self.pointer_captured {
            self.pointer_delta = (dx, dy);
        }
    }

    /// Return the pending pointer delta and clear it so it is never applied
    /// on two ticks
    pub fn take_pointer_delta(&mut self) -> (f64, f64) {
        std::mem::take(&mut self.pointer_delta)
    }

    // --- Query methods ---

    /// Is an action currently held? (any bound key is down)
    pub fn is_action_pressed(&self, action: &str) -> bool {
        self.action_map
            .get(action)
            .map(|keys| keys.iter().any(|k| self.keys_down.contains(k)))
            .unwrap_or(false)
    }

    /// Sample the movement flags for this tick
    pub fn movement_intent(&self) -> MovementIntent {
        MovementIntent {
            forward: self.is_action_pressed(actions::MOVE_FORWARD),
            backward: self.is_action_pressed(actions::MOVE_BACKWARD),
            left: self.is_action_pressed(actions::MOVE_LEFT),
            right: self.is_action_pressed(actions::MOVE_RIGHT),
            jump: self.is_action_pressed(actions::JUMP),
        }
    }
}
