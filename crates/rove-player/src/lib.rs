//! Rove Player - third-person locomotion on top of the Rove crates
//!
//! `LocomotionSystem` ties the pieces together once per tick: the
//! `PlayerController` turns held keys into a camera-relative velocity, the
//! physics world integrates it, and the `CameraRig` and animator are derived
//! from where the body ended up. Frames can be driven by a window
//! (`PlayerApp`) or by a scripted input run (`simulate`).

pub mod camera;
pub mod config;
pub mod controller;
pub mod frame;
pub mod locomotion;
pub mod map;
pub mod player_app;
pub mod script;

pub use camera::{CameraRig, CameraTransform};
pub use config::PlayerConfig;
pub use controller::{MovementCommand, PlayerController, PlayerSnapshot};
pub use frame::{CharacterTransform, FrameOutput, FrameSink, JsonLinesSink};
pub use locomotion::LocomotionSystem;
pub use map::GameMap;
pub use player_app::PlayerApp;
pub use script::{simulate, InputScript, SimulationSummary};
