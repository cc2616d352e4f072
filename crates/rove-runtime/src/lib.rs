//! Rove Runtime - Frame loop building blocks
//!
//! Provides the pieces the per-frame locomotion tick is driven by:
//! - `GameClock` — clamped frame delta, or manual fixed steps for headless runs
//! - `InputState` — held-key actions and pointer capture with last-sample deltas
//! - `InputEvent` / `InputQueue` — bounded queue filled by the window layer
//!   and drained once per tick

mod clock;
mod input;
mod input_queue;

pub use clock::GameClock;
pub use input::{actions, InputBindings, InputState, MovementIntent};
pub use input_queue::{InputEvent, InputQueue};
