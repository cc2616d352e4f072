//! Tuning configuration
//!
//! Every constant the locomotion core uses lives here so a game can retune
//! movement, camera and animation from a TOML file. Sections and fields that
//! are missing from the file keep their defaults.

use crate::{Result, RoveError};
use serde::{Deserialize, Serialize};
use std::f32::consts::{FRAC_PI_2, FRAC_PI_3};
use std::path::Path;

/// Player movement constants
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MovementConfig {
    /// Horizontal speed while any direction is held (units/s)
    pub speed: f32,
    /// Vertical speed set when a jump is honored (units/s)
    pub jump_speed: f32,
    /// A jump is honored only while |vy| is below this
    pub grounded_epsilon: f32,
    /// |vy| above this classifies the player as jumping
    pub jump_threshold: f32,
}

impl Default for MovementConfig {
    fn default() -> Self {
        Self {
            speed: 15.0,
            jump_speed: 12.0,
            grounded_epsilon: 0.1,
            jump_threshold: 0.5,
        }
    }
}

/// Third-person camera constants
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    /// Radius of the orbit around the player
    pub distance: f32,
    /// Fixed height added on top of the orbit offset
    pub height: f32,
    /// Height above the player origin the camera looks at
    pub look_height: f32,
    /// Radians of rotation per pointer pixel
    pub sensitivity: f32,
    /// Pitch is clamped to [-pitch_limit, pitch_limit]
    pub pitch_limit: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            distance: 5.0,
            height: 2.0,
            look_height: 1.0,
            sensitivity: 0.002,
            pitch_limit: FRAC_PI_3,
        }
    }
}

/// Player collider description
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BodyConfig {
    pub mass: f32,
    pub radius: f32,
    pub linear_damping: f32,
    pub fixed_rotation: bool,
    pub spawn_position: [f32; 3],
}

impl Default for BodyConfig {
    fn default() -> Self {
        Self {
            mass: 1.0,
            radius: 0.5,
            linear_damping: 0.9,
            fixed_rotation: true,
            spawn_position: [0.0, 5.0, 0.0],
        }
    }
}

/// Procedural animation constants
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnimationConfig {
    /// Phase advance per second while walking
    pub speed: f32,
    pub arm_swing: f32,
    pub leg_swing: f32,
    pub bounce_amplitude: f32,
    /// Per-tick multiplier applied to limb rotations while idle
    pub idle_decay: f32,
    pub jump_arm_angle: f32,
    pub jump_leg_angle: f32,
    pub body_rest_height: f32,
    pub head_rest_height: f32,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            speed: 8.0,
            arm_swing: 0.6,
            leg_swing: 0.5,
            bounce_amplitude: 0.05,
            idle_decay: 0.9,
            jump_arm_angle: -0.5,
            jump_leg_angle: -0.3,
            body_rest_height: 0.9,
            head_rest_height: 1.7,
        }
    }
}

/// Physics world settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicsConfig {
    pub gravity: [f32; 3],
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            gravity: [0.0, -30.0, 0.0],
        }
    }
}

/// Complete tuning set for one player
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RoveConfig {
    pub movement: MovementConfig,
    pub camera: CameraConfig,
    pub body: BodyConfig,
    pub animation: AnimationConfig,
    pub physics: PhysicsConfig,
}

impl RoveConfig {
    /// Read, parse and validate a config file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Parse and validate config from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: RoveConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values the per-tick algorithms cannot work with
    pub fn validate(&self) -> Result<()> {
        self.check_finite()?;

        positive("movement.speed", self.movement.speed)?;
        positive("movement.jump_speed", self.movement.jump_speed)?;
        positive("movement.grounded_epsilon", self.movement.grounded_epsilon)?;
        if !(self.movement.jump_threshold > self.movement.grounded_epsilon) {
            return Err(RoveError::ValidationError(format!(
                "movement.jump_threshold ({}) must be larger than movement.grounded_epsilon ({})",
                self.movement.jump_threshold, self.movement.grounded_epsilon
            )));
        }

        positive("camera.distance", self.camera.distance)?;
        positive("camera.sensitivity", self.camera.sensitivity)?;
        open_range("camera.pitch_limit", self.camera.pitch_limit, 0.0, FRAC_PI_2)?;

        positive("body.mass", self.body.mass)?;
        positive("body.radius", self.body.radius)?;
        if self.body.linear_damping < 0.0 {
            return Err(out_of_range(
                "body.linear_damping",
                self.body.linear_damping,
                0.0,
                f64::MAX,
            ));
        }

        positive("animation.speed", self.animation.speed)?;
        open_range("animation.idle_decay", self.animation.idle_decay, 0.0, 1.0)?;

        Ok(())
    }

    /// Every float must be finite
    fn check_finite(&self) -> Result<()> {
        let m = &self.movement;
        let c = &self.camera;
        let b = &self.body;
        let a = &self.animation;
        let fields = [
            ("movement.speed", m.speed),
            ("movement.jump_speed", m.jump_speed),
            ("movement.grounded_epsilon", m.grounded_epsilon),
            ("movement.jump_threshold", m.jump_threshold),
            ("camera.distance", c.distance),
            ("camera.height", c.height),
            ("camera.look_height", c.look_height),
            ("camera.sensitivity", c.sensitivity),
            ("camera.pitch_limit", c.pitch_limit),
            ("body.mass", b.mass),
            ("body.radius", b.radius),
            ("body.linear_damping", b.linear_damping),
            ("body.spawn_position.x", b.spawn_position[0]),
            ("body.spawn_position.y", b.spawn_position[1]),
            ("body.spawn_position.z", b.spawn_position[2]),
            ("animation.speed", a.speed),
            ("animation.arm_swing", a.arm_swing),
            ("animation.leg_swing", a.leg_swing),
            ("animation.bounce_amplitude", a.bounce_amplitude),
            ("animation.idle_decay", a.idle_decay),
            ("animation.jump_arm_angle", a.jump_arm_angle),
            ("animation.jump_leg_angle", a.jump_leg_angle),
            ("animation.body_rest_height", a.body_rest_height),
            ("animation.head_rest_height", a.head_rest_height),
            ("physics.gravity.x", self.physics.gravity[0]),
            ("physics.gravity.y", self.physics.gravity[1]),
            ("physics.gravity.z", self.physics.gravity[2]),
        ];

        match fields.iter().find(|(_, value)| !value.is_finite()) {
            Some((field, value)) => Err(RoveError::ValidationError(format!(
                "{} must be a finite number, got {}",
                field, value
            ))),
            None => Ok(()),
        }
    }
}

fn positive(field: &str, value: f32) -> Result<()> {
    if value > 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(out_of_range(field, value, 0.0, f64::MAX))
    }
}

fn open_range(field: &str, value: f32, min: f32, max: f32) -> Result<()> {
    if value > min && value < max {
        Ok(())
    } else {
        Err(out_of_range(field, value, min as f64, max as f64))
    }
}

fn out_of_range(field: &str, value: f32, min: f64, max: f64) -> RoveError {
    RoveError::ValueOutOfRange {
        field: field.to_string(),
        min,
        max,
        value: value as f64,
    }
}
