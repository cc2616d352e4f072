//! Player body contract and scoped handle

use crossbeam::channel::Sender;
use rapier3d::prelude::*;
use rove_core::config::BodyConfig;
use rove_core::Vec3;

/// What the player controller needs from a physics body.
///
/// Position and velocity are owned by the simulation. The controller only
/// ever overwrites the whole velocity vector; it never writes position.
pub trait PhysicsBody {
    /// Current world position
    fn position(&self) -> Vec3;
    /// Current linear velocity
    fn velocity(&self) -> Vec3;
    /// Replace the linear velocity. Damping then acts on it until the next
    /// call, so sustained motion needs a call every tick.
    fn set_velocity(&mut self, velocity: Vec3);
}

impl PhysicsBody for RigidBody {
    fn position(&self) -> Vec3 {
        let t = self.translation();
        Vec3::new(t.x, t.y, t.z)
    }

    fn velocity(&self) -> Vec3 {
        let v = self.linvel();
        Vec3::new(v.x, v.y, v.z)
    }

    fn set_velocity(&mut self, velocity: Vec3) {
        self.set_linvel(vector![velocity.x, velocity.y, velocity.z], true);
    }
}

/// Parameters for a dynamic sphere collider
#[derive(Debug, Clone, PartialEq)]
pub struct SphereDesc {
    pub mass: f32,
    pub radius: f32,
    pub linear_damping: f32,
    /// Lock all rotations so contacts never tumble the body
    pub fixed_rotation: bool,
    pub initial_position: Vec3,
}

impl From<&BodyConfig> for SphereDesc {
    fn from(config: &BodyConfig) -> Self {
        Self {
            mass: config.mass,
            radius: config.radius,
            linear_damping: config.linear_damping,
            fixed_rotation: config.fixed_rotation,
            initial_position: Vec3::from_array(config.spawn_position),
        }
    }
}

/// Owning handle to a dynamic sphere in a `PhysicsWorld`.
///
/// Dropping the handle queues the body for removal; the world removes it
/// before its next step. Removal happens on every path that drops the
/// handle, unwinding included.
#[derive(Debug)]
pub struct SphereBody {
    handle: RigidBodyHandle,
    release: Sender<RigidBodyHandle>,
}

impl SphereBody {
    pub(crate) fn new(handle: RigidBodyHandle, release: Sender<RigidBodyHandle>) -> Self {
        Self { handle, release }
    }

    /// The underlying Rapier handle
    pub fn handle(&self) -> RigidBodyHandle {
        self.handle
    }
}

impl Drop for SphereBody {
    fn drop(&mut self) {
        // Fails only if the world is already gone, taking the body with it
        let _ = self.release.send(self.handle);
    }
}
