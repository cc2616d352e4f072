//! Per-tick locomotion orchestration
//!
//! One tick runs in a fixed order: pointer input turns the camera, the
//! controller commands a velocity, physics integrates, then the controller
//! reads the post-step body so the camera and pose never lag collision
//! response by a frame.

use crate::camera::CameraRig;
use crate::controller::{PlayerController, PlayerSnapshot};
use crate::frame::{CharacterTransform, FrameOutput};
use rove_animation::CharacterAnimator;
use rove_core::{Result, RoveConfig, RoveError};
use rove_physics::{PhysicsWorld, SphereBody, SphereDesc};
use rove_runtime::InputState;
use tracing::info;

/// The player entity: its physics body plus all per-tick state
pub struct LocomotionSystem {
    body: SphereBody,
    controller: PlayerController,
    camera: CameraRig,
    animator: CharacterAnimator,
    tick: u64,
    last_snapshot: Option<PlayerSnapshot>,
}

impl LocomotionSystem {
    /// Create the player's sphere in `world` and set up its controller state
    pub fn spawn(config: &RoveConfig, world: &mut PhysicsWorld) -> Self {
        let desc = SphereDesc::from(&config.body);
        let body = world.create_dynamic_sphere(&desc);
        info!(
            position = ?desc.initial_position,
            radius = desc.radius,
            "player spawned"
        );

        Self {
            body,
            controller: PlayerController::new(config.movement.clone()),
            camera: CameraRig::new(config.camera.clone()),
            animator: CharacterAnimator::new(config.animation.clone()),
            tick: 0,
            last_snapshot: None,
        }
    }

    /// Run one simulation tick of `dt` seconds
    pub fn tick(
        &mut self,
        input: &mut InputState,
        world: &mut PhysicsWorld,
        dt: f32,
    ) -> Result<FrameOutput> {
        let (dx, dy) = input.take_pointer_delta();
        if dx != 0.0 || dy != 0.0 {
            self.camera.apply_pointer_delta(dx, dy);
        }

        let intent = input.movement_intent();
        let body = world
            .body_mut(&self.body)
            .ok_or_else(|| missing_body(&self.body))?;
        self.controller.command(&intent, self.camera.yaw(), body);

        world.step(dt);

        let body = world
            .body(&self.body)
            .ok_or_else(|| missing_body(&self.body))?;
        let snapshot = self.controller.observe(&intent, body);

        let camera = self.camera.transform(snapshot.position);
        let pose = self
            .animator
            .update(snapshot.is_moving, snapshot.is_jumping, dt);

        self.tick += 1;
        self.last_snapshot = Some(snapshot);

        Ok(FrameOutput {
            tick: self.tick,
            camera,
            character: CharacterTransform {
                position: snapshot.position,
                facing_yaw: snapshot.facing_yaw,
            },
            pose,
            state: self.animator.state(),
        })
    }

    /// Ticks run so far
    pub fn ticks(&self) -> u64 {
        self.tick
    }

    /// Player state observed at the end of the last tick
    pub fn last_snapshot(&self) -> Option<&PlayerSnapshot> {
        self.last_snapshot.as_ref()
    }

    pub fn camera(&self) -> &CameraRig {
        &self.camera
    }

    pub fn animator(&self) -> &CharacterAnimator {
        &self.animator
    }

    /// Tear the player down. The body leaves the world on its next step.
    pub fn despawn(self) {
        info!(ticks = self.tick, "player despawned");
    }
}

fn missing_body(body: &SphereBody) -> RoveError {
    RoveError::PhysicsError(format!("player body {:?} is not in the world", body.handle()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rove_animation::AnimationState;
    use rove_runtime::actions;
    use winit::keyboard::KeyCode;

    const DT: f32 = 1.0 / 60.0;

    fn setup() -> (PhysicsWorld, LocomotionSystem, InputState) {
        let config = RoveConfig::default();
        let mut world = PhysicsWorld::with_gravity(rove_core::Vec3::from_array(
            config.physics.gravity,
        ));
        world.add_ground_plane(0.0);
        let player = LocomotionSystem::spawn(&config, &mut world);
        (world, player, InputState::new())
    }

    fn settle(player: &mut LocomotionSystem, world: &mut PhysicsWorld, input: &mut InputState) {
        for _ in 0..120 {
            player.tick(input, world, DT).unwrap();
        }
    }

    #[test]
    fn test_player_falls_and_settles_idle() {
        let (mut world, mut player, mut input) = setup();
        settle(&mut player, &mut world, &mut input);

        let snap = *player.last_snapshot().unwrap();
        assert!((snap.position.y - 0.5).abs() < 0.1, "rest height {}", snap.position.y);
        assert!(!snap.is_jumping);
        assert_eq!(player.animator().state(), AnimationState::Idle);
        assert_eq!(player.ticks(), 120);
    }

    #[test]
    fn test_forward_moves_along_negative_z() {
        let (mut world, mut player, mut input) = setup();
        settle(&mut player, &mut world, &mut input);

        input.process_key_down(KeyCode::KeyW);
        let mut frame = None;
        for _ in 0..30 {
            frame = Some(player.tick(&mut input, &mut world, DT).unwrap());
        }
        let frame = frame.unwrap();

        assert!(frame.character.position.z < -3.0, "z {}", frame.character.position.z);
        assert!(frame.character.position.x.abs() < 0.1);
        assert_eq!(frame.state, AnimationState::Walking);
        // Camera trails behind the player along +Z
        assert!(frame.camera.position.z > frame.character.position.z);
    }

    #[test]
    fn test_jump_enters_jumping_state() {
        let (mut world, mut player, mut input) = setup();
        settle(&mut player, &mut world, &mut input);

        assert!(!input.is_action_pressed(actions::JUMP));
        input.process_key_down(KeyCode::Space);
        let frame = player.tick(&mut input, &mut world, DT).unwrap();
        input.process_key_up(KeyCode::Space);

        assert_eq!(frame.state, AnimationState::Jumping);
        assert!(player.last_snapshot().unwrap().velocity.y > 5.0);
        assert_eq!(frame.pose.limbs(), [-0.5, -0.5, -0.3, -0.3]);

        // Lands again and settles back to idle
        for _ in 0..120 {
            player.tick(&mut input, &mut world, DT).unwrap();
        }
        assert_eq!(player.animator().state(), AnimationState::Idle);
    }

    #[test]
    fn test_pointer_turns_camera_only_when_captured() {
        let (mut world, mut player, mut input) = setup();

        input.process_pointer_delta(100.0, 0.0);
        player.tick(&mut input, &mut world, DT).unwrap();
        assert_eq!(player.camera().yaw(), 0.0);

        input.set_pointer_captured(true);
        input.process_pointer_delta(100.0, 0.0);
        player.tick(&mut input, &mut world, DT).unwrap();
        assert!((player.camera().yaw() + 0.2).abs() < 1e-6);

        // The delta is consumed once
        player.tick(&mut input, &mut world, DT).unwrap();
        assert!((player.camera().yaw() + 0.2).abs() < 1e-6);
    }

    #[test]
    fn test_despawn_releases_body() {
        let (mut world, player, _input) = setup();
        assert_eq!(world.rigid_body_set.len(), 1);

        player.despawn();
        world.step(DT);
        assert_eq!(world.rigid_body_set.len(), 0);
        assert_eq!(world.collider_set.len(), 1);
    }

    #[test]
    fn test_tick_without_body_is_physics_error() {
        let (_world, mut player, mut input) = setup();
        let mut other = PhysicsWorld::new();

        let err = player.tick(&mut input, &mut other, DT).unwrap_err();
        assert!(matches!(err, RoveError::PhysicsError(_)));
    }
}
