//! Third-person camera rig
//!
//! Orbits the player at a fixed radius. Pointer motion turns the rig; the eye
//! position is recomputed from scratch every tick with no smoothing.

use rove_core::config::CameraConfig;
use rove_core::Vec3;
use serde::Serialize;

/// Eye position and look target for one frame
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CameraTransform {
    pub position: Vec3,
    pub target: Vec3,
}

/// Yaw/pitch orbit camera that trails the player
pub struct CameraRig {
    config: CameraConfig,
    /// Horizontal angle in radians, unbounded
    yaw: f32,
    /// Vertical angle in radians, always within the pitch limit
    pitch: f32,
}

impl CameraRig {
    pub fn new(config: CameraConfig) -> Self {
        Self {
            config,
            yaw: 0.0,
            pitch: 0.0,
        }
    }

    /// Turn the rig by a raw pointer delta in pixels
    pub fn apply_pointer_delta(&mut self, dx: f64, dy: f64) {
        let sensitivity = self.config.sensitivity as f64;
        self.yaw -= (dx * sensitivity) as f32;
        self.pitch -= (dy * sensitivity) as f32;
        self.pitch = self
            .pitch
            .clamp(-self.config.pitch_limit, self.config.pitch_limit);
    }

    /// Eye position and look target for a player at `player_position`
    pub fn transform(&self, player_position: Vec3) -> CameraTransform {
        let distance = self.config.distance;
        let offset = Vec3::new(
            distance * self.pitch.cos() * self.yaw.sin(),
            self.config.height + distance * self.pitch.sin(),
            distance * self.pitch.cos() * self.yaw.cos(),
        );

        CameraTransform {
            position: player_position + offset,
            target: player_position + Vec3::new(0.0, self.config.look_height, 0.0),
        }
    }

    pub fn yaw(&self) -> f32 {
        self.yaw
    }

    pub fn pitch(&self) -> f32 {
        self.pitch
    }
}
