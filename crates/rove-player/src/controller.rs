//! Player movement controller
//!
//! Turns the held movement flags into a velocity override on the player's
//! physics body. Movement is camera-relative: local -Z is "forward" (away
//! from the camera) and local +X is screen-right, rotated into world space by
//! the camera yaw. There is no acceleration ramp; the commanded horizontal
//! speed is either the configured speed or zero.

use rove_core::config::MovementConfig;
use rove_core::Vec3;
use rove_physics::PhysicsBody;
use rove_runtime::MovementIntent;

/// Movement direction in camera space, unnormalized.
///
/// Forward axis component is `backward - forward`; the side component is
/// `right - left`.
pub fn camera_relative_direction(intent: &MovementIntent) -> Vec3 {
    let side = intent.right as i8 - intent.left as i8;
    let front = intent.backward as i8 - intent.forward as i8;
    Vec3::new(side as f32, 0.0, front as f32)
}

/// World-space horizontal velocity for the given flags and camera yaw.
/// Exactly zero when no direction is held or opposite keys cancel.
pub fn desired_horizontal_velocity(intent: &MovementIntent, camera_yaw: f32, speed: f32) -> Vec3 {
    // normalized() leaves a zero vector at zero instead of dividing by it
    let local = camera_relative_direction(intent).normalized() * speed;
    local.rotate_y(camera_yaw)
}

/// What the controller asked of the body this tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MovementCommand {
    /// Full velocity written to the body
    pub velocity: Vec3,
    /// Whether the jump speed replaced the vertical component
    pub jumped: bool,
}

/// Player state published to the camera and animator after the physics step
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlayerSnapshot {
    pub position: Vec3,
    pub velocity: Vec3,
    pub facing_yaw: f32,
    pub is_moving: bool,
    pub is_jumping: bool,
}

/// Per-tick movement controller. Facing is the only state it owns.
pub struct PlayerController {
    config: MovementConfig,
    facing_yaw: f32,
}

impl PlayerController {
    pub fn new(config: MovementConfig) -> Self {
        Self {
            config,
            facing_yaw: 0.0,
        }
    }

    /// Compute and write this tick's velocity override.
    ///
    /// Vertical velocity is carried over from the body so gravity and jump
    /// arcs continue. A held jump replaces it with the jump speed only while
    /// the body is grounded, i.e. |vy| is below the grounded epsilon.
    pub fn command(
        &mut self,
        intent: &MovementIntent,
        camera_yaw: f32,
        body: &mut dyn PhysicsBody,
    ) -> MovementCommand {
        let current = body.velocity();
        let horizontal = desired_horizontal_velocity(intent, camera_yaw, self.config.speed);

        let jumped = intent.jump && current.y.abs() < self.config.grounded_epsilon;
        let vertical = if jumped {
            self.config.jump_speed
        } else {
            current.y
        };

        let velocity = horizontal.with_y(vertical);
        body.set_velocity(velocity);

        // Keep the old facing when stopped so the character doesn't snap
        if intent.any_direction() && horizontal.horizontal_length() > 0.0 {
            self.facing_yaw = horizontal.x.atan2(horizontal.z);
        }

        MovementCommand { velocity, jumped }
    }

    /// Read the post-step body state and classify it
    pub fn observe(&self, intent: &MovementIntent, body: &dyn PhysicsBody) -> PlayerSnapshot {
        let velocity = body.velocity();
        PlayerSnapshot {
            position: body.position(),
            velocity,
            facing_yaw: self.facing_yaw,
            is_moving: intent.any_direction(),
            is_jumping: velocity.y.abs() > self.config.jump_threshold,
        }
    }

    pub fn facing_yaw(&self) -> f32 {
        self.facing_yaw
    }
}
