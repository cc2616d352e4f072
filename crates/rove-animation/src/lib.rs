//! Procedural character animation for Rove
//!
//! Poses are computed every tick from a formula instead of sampled from
//! authored clips:
//! - **Walking**: sinusoidal limb swing driven by a phase clock, plus a body bounce
//! - **Idle**: limbs settle toward rest by a fixed factor per tick
//! - **Jumping**: a fixed tucked pose that overrides both

pub mod animator;
pub mod pose;
pub mod state;

pub use animator::CharacterAnimator;
pub use pose::CharacterPose;
pub use state::AnimationState;
