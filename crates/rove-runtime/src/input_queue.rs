//! Bounded input event queue
//!
//! The window layer pushes events as they arrive; the game loop drains the
//! queue exactly once at the start of each tick. Nothing reaches the input
//! state in the middle of a tick.

use crate::input::InputState;
use tracing::warn;
use winit::keyboard::KeyCode;

/// Default number of pending events before new ones are dropped
const DEFAULT_CAPACITY: usize = 64;

/// A raw input event captured between ticks
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    KeyDown(KeyCode),
    KeyUp(KeyCode),
    /// Raw device motion in pixels
    PointerMotion { dx: f64, dy: f64 },
    /// Pointer capture was acquired (`true`) or released (`false`)
    CaptureChanged(bool),
}

impl InputEvent {
    fn key(&self) -> Option<KeyCode> {
        match self {
            InputEvent::KeyDown(k) | InputEvent::KeyUp(k) => Some(*k),
            _ => None,
        }
    }
}

/// Bounded queue of pending input events.
///
/// Events that describe the same thing coalesce: a newer pointer sample
/// replaces the pending one, a newer capture change replaces the pending one,
/// and a newer key event replaces the pending event for that key. Only held
/// state survives to the tick, so a key pressed and released between two
/// ticks is never observed.
pub struct InputQueue {
    events: Vec<InputEvent>,
    capacity: usize,
    dropped: u64,
}

impl Default for InputQueue {
    fn default() -> Self {
        Self::new()
    }
}

impl InputQueue {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            events: Vec::with_capacity(capacity),
            capacity,
            dropped: 0,
        }
    }

    /// Push an event. Returns `false` if the queue was full and the event
    /// was dropped.
    ///
    /// Key releases are never dropped: a lost release would leave the key
    /// held. Releases coalesce per key, so they can overrun the capacity by
    /// at most one entry per distinct key.
    pub fn push(&mut self, event: InputEvent) -> bool {
        match event {
            InputEvent::PointerMotion { .. } => {
                // Motion must land after any capture change queued since
                self.events
                    .retain(|e| !matches!(e, InputEvent::PointerMotion { .. }));
            }
            InputEvent::CaptureChanged(_) => {
                // The latest capture state wins and supersedes earlier motion
                self.events.retain(|e| {
                    !matches!(
                        e,
                        InputEvent::CaptureChanged(_) | InputEvent::PointerMotion { .. }
                    )
                });
            }
            InputEvent::KeyDown(key) | InputEvent::KeyUp(key) => {
                if let Some(slot) = self.events.iter().position(|e| e.key() == Some(key)) {
                    self.events[slot] = event;
                    return true;
                }
            }
        }

        let is_release = matches!(event, InputEvent::KeyUp(_));
        if self.events.len() >= self.capacity && !is_release {
            self.dropped += 1;
            warn!(?event, capacity = self.capacity, "input queue full, dropping event");
            return false;
        }

        self.events.push(event);
        true
    }

    /// Drain all events into the input state
    pub fn drain_into(&mut self, input: &mut InputState) {
        for event in self.events.drain(..) {
            match event {
                InputEvent::KeyDown(key) => input.process_key_down(key),
                InputEvent::KeyUp(key) => input.process_key_up(key),
                InputEvent::PointerMotion { dx, dy } => input.process_pointer_delta(dx, dy),
                InputEvent::CaptureChanged(captured) => input.set_pointer_captured(captured),
            }
        }
    }

    /// Check if there are pending events
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Number of pending events
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Total events dropped because the queue was full
    pub fn dropped(&self) -> u64 {
        self.dropped
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pending(queue: &mut InputQueue) -> Vec<InputEvent> {
        std::mem::take(&mut queue.events)
    }

    #[test]
    fn test_push_and_drain() {
        let mut queue = InputQueue::new();
        assert!(queue.is_empty());

        queue.push(InputEvent::KeyDown(KeyCode::KeyW));
        queue.push(InputEvent::CaptureChanged(true));
        assert_eq!(queue.len(), 2);

        let mut input = InputState::new();
        queue.drain_into(&mut input);
        assert!(queue.is_empty());
        assert!(input.movement_intent().forward);
        assert!(input.is_pointer_captured());
    }

    #[test]
    fn test_pointer_motion_last_write_wins() {
        let mut queue = InputQueue::new();
        queue.push(InputEvent::PointerMotion { dx: 1.0, dy: 1.0 });
        queue.push(InputEvent::PointerMotion { dx: 4.0, dy: -2.0 });

        assert_eq!(
            pending(&mut queue),
            vec![InputEvent::PointerMotion { dx: 4.0, dy: -2.0 }]
        );
    }

    #[test]
    fn test_coalesced_motion_moves_behind_capture() {
        let mut queue = InputQueue::new();
        let mut input = InputState::new();

        queue.push(InputEvent::PointerMotion { dx: 1.0, dy: 0.0 });
        queue.push(InputEvent::CaptureChanged(true));
        queue.push(InputEvent::PointerMotion { dx: 6.0, dy: 0.0 });
        queue.drain_into(&mut input);

        assert_eq!(input.take_pointer_delta(), (6.0, 0.0));
    }

    #[test]
    fn test_key_events_coalesce_per_key() {
        let mut queue = InputQueue::new();
        queue.push(InputEvent::KeyDown(KeyCode::KeyW));
        queue.push(InputEvent::KeyDown(KeyCode::KeyA));
        queue.push(InputEvent::KeyUp(KeyCode::KeyW));

        assert_eq!(
            pending(&mut queue),
            vec![
                InputEvent::KeyUp(KeyCode::KeyW),
                InputEvent::KeyDown(KeyCode::KeyA)
            ]
        );
    }

    #[test]
    fn test_overflow_drops_new_event() {
        let mut queue = InputQueue::with_capacity(2);
        assert!(queue.push(InputEvent::KeyDown(KeyCode::KeyW)));
        assert!(queue.push(InputEvent::KeyDown(KeyCode::KeyA)));
        assert!(!queue.push(InputEvent::KeyDown(KeyCode::KeyD)));
        assert!(!queue.push(InputEvent::PointerMotion { dx: 1.0, dy: 0.0 }));
        assert_eq!(queue.dropped(), 2);

        // Coalescing still works when full
        assert!(queue.push(InputEvent::KeyUp(KeyCode::KeyW)));
        assert_eq!(queue.len(), 2);
    }

    #[test]
    fn test_release_is_kept_when_full() {
        let mut queue = InputQueue::with_capacity(2);
        let mut input = InputState::new();

        queue.push(InputEvent::KeyDown(KeyCode::KeyW));
        queue.drain_into(&mut input);
        assert!(input.movement_intent().forward);

        queue.push(InputEvent::CaptureChanged(true));
        queue.push(InputEvent::CaptureChanged(false));
        assert!(queue.push(InputEvent::KeyDown(KeyCode::KeyA)));
        assert_eq!(queue.len(), 2);

        assert!(queue.push(InputEvent::KeyUp(KeyCode::KeyW)));
        assert_eq!(queue.len(), 3);
        assert_eq!(queue.dropped(), 0);

        queue.drain_into(&mut input);
        assert!(!input.movement_intent().forward);
        assert!(input.movement_intent().left);
        assert!(!input.is_pointer_captured());
    }

    #[test]
    fn test_capture_changes_coalesce() {
        let mut queue = InputQueue::new();
        queue.push(InputEvent::CaptureChanged(true));
        queue.push(InputEvent::PointerMotion { dx: 3.0, dy: 1.0 });
        queue.push(InputEvent::KeyDown(KeyCode::Space));
        queue.push(InputEvent::CaptureChanged(false));

        assert_eq!(
            pending(&mut queue),
            vec![
                InputEvent::KeyDown(KeyCode::Space),
                InputEvent::CaptureChanged(false)
            ]
        );
    }

    #[test]
    fn test_drain_into_applies_capture_before_motion() {
        let mut queue = InputQueue::new();
        let mut input = InputState::new();

        queue.push(InputEvent::CaptureChanged(true));
        queue.push(InputEvent::PointerMotion { dx: 12.0, dy: 3.0 });
        queue.push(InputEvent::KeyDown(KeyCode::KeyD));
        queue.drain_into(&mut input);

        assert!(queue.is_empty());
        assert!(input.is_pointer_captured());
        assert!(input.movement_intent().right);
        assert_eq!(input.take_pointer_delta(), (12.0, 3.0));
    }
}
