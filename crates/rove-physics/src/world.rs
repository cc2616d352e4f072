//! Physics world wrapping Rapier 3D

use crate::body::{SphereBody, SphereDesc};
use crossbeam::channel::{Receiver, Sender};
use rapier3d::prelude::*;
use rove_core::Vec3;
use tracing::debug;

/// Wraps Rapier's physics pipeline and body/collider sets
pub struct PhysicsWorld {
    pub rigid_body_set: RigidBodySet,
    pub collider_set: ColliderSet,
    pub gravity: Vector<Real>,
    pub integration_parameters: IntegrationParameters,
    pub physics_pipeline: PhysicsPipeline,
    pub island_manager: IslandManager,
    pub broad_phase: DefaultBroadPhase,
    pub narrow_phase: NarrowPhase,
    pub impulse_joint_set: ImpulseJointSet,
    pub multibody_joint_set: MultibodyJointSet,
    pub ccd_solver: CCDSolver,

    /// Bodies whose `SphereBody` handle was dropped
    release_send: Sender<RigidBodyHandle>,
    release_recv: Receiver<RigidBodyHandle>,
}

impl PhysicsWorld {
    /// Create a new physics world with standard gravity
    pub fn new() -> Self {
        Self::with_gravity(Vec3::new(0.0, -9.81, 0.0))
    }

    pub fn with_gravity(gravity: Vec3) -> Self {
        let (release_send, release_recv) = crossbeam::channel::unbounded();

        Self {
            rigid_body_set: RigidBodySet::new(),
            collider_set: ColliderSet::new(),
            gravity: vector![gravity.x, gravity.y, gravity.z],
            integration_parameters: IntegrationParameters::default(),
            physics_pipeline: PhysicsPipeline::new(),
            island_manager: IslandManager::new(),
            broad_phase: DefaultBroadPhase::new(),
            narrow_phase: NarrowPhase::new(),
            impulse_joint_set: ImpulseJointSet::new(),
            multibody_joint_set: MultibodyJointSet::new(),
            ccd_solver: CCDSolver::new(),
            release_send,
            release_recv,
        }
    }

    /// Step the physics simulation by dt seconds
    pub fn step(&mut self, dt: f32) {
        self.flush_released();
        self.integration_parameters.dt = dt;

        self.physics_pipeline.step(
            &self.gravity,
            &self.integration_parameters,
            &mut self.island_manager,
            &mut self.broad_phase,
            &mut self.narrow_phase,
            &mut self.rigid_body_set,
            &mut self.collider_set,
            &mut self.impulse_joint_set,
            &mut self.multibody_joint_set,
            &mut self.ccd_solver,
            None,
            &(),
            &(),
        );
    }

    /// Create a dynamic sphere and return its owning handle
    pub fn create_dynamic_sphere(&mut self, desc: &SphereDesc) -> SphereBody {
        let p = desc.initial_position;
        let mut builder = RigidBodyBuilder::dynamic()
            .translation(vector![p.x, p.y, p.z])
            .linear_damping(desc.linear_damping);
        if desc.fixed_rotation {
            builder = builder.lock_rotations();
        }
        let handle = self.rigid_body_set.insert(builder.build());

        let collider = ColliderBuilder::ball(desc.radius).mass(desc.mass).build();
        self.collider_set
            .insert_with_parent(collider, handle, &mut self.rigid_body_set);

        debug!(?handle, radius = desc.radius, mass = desc.mass, "created dynamic sphere");
        SphereBody::new(handle, self.release_send.clone())
    }

    /// Add an infinite static ground plane facing +Y at height `y`
    pub fn add_ground_plane(&mut self, y: f32) -> ColliderHandle {
        let collider = ColliderBuilder::halfspace(Vector::y_axis())
            .translation(vector![0.0, y, 0.0])
            .build();
        self.collider_set.insert(collider)
    }

    /// Add a static axis-aligned box with the given center and full size
    pub fn add_static_box(&mut self, center: Vec3, size: Vec3) -> ColliderHandle {
        let collider = ColliderBuilder::cuboid(size.x * 0.5, size.y * 0.5, size.z * 0.5)
            .translation(vector![center.x, center.y, center.z])
            .build();
        self.collider_set.insert(collider)
    }

    /// Remove every body whose handle has been dropped. Returns how many
    /// were removed.
    pub fn flush_released(&mut self) -> usize {
        let mut removed = 0;
        while let Ok(handle) = self.release_recv.try_recv() {
            self.remove_rigid_body(handle);
            debug!(?handle, "released rigid body");
            removed += 1;
        }
        removed
    }

    /// Remove a rigid body and its attached colliders
    fn remove_rigid_body(&mut self, handle: RigidBodyHandle) {
        self.rigid_body_set.remove(
            handle,
            &mut self.island_manager,
            &mut self.collider_set,
            &mut self.impulse_joint_set,
            &mut self.multibody_joint_set,
            true,
        );
    }

    /// Get the rigid body behind a sphere handle
    pub fn body(&self, sphere: &SphereBody) -> Option<&RigidBody> {
        self.rigid_body_set.get(sphere.handle())
    }

    /// Get the mutable rigid body behind a sphere handle
    pub fn body_mut(&mut self, sphere: &SphereBody) -> Option<&mut RigidBody> {
        self.rigid_body_set.get_mut(sphere.handle())
    }
}

impl Default for PhysicsWorld {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::body::PhysicsBody;

    fn sphere_at(y: f32) -> SphereDesc {
        SphereDesc {
            mass: 1.0,
            radius: 0.5,
            linear_damping: 0.9,
            fixed_rotation: true,
            initial_position: Vec3::new(0.0, y, 0.0),
        }
    }

    #[test]
    fn test_create_physics_world() {
        let world = PhysicsWorld::new();
        assert_eq!(world.rigid_body_set.len(), 0);
        assert_eq!(world.collider_set.len(), 0);
    }

    #[test]
    fn test_create_dynamic_sphere() {
        let mut world = PhysicsWorld::new();
        let sphere = world.create_dynamic_sphere(&sphere_at(5.0));

        assert_eq!(world.rigid_body_set.len(), 1);
        assert_eq!(world.collider_set.len(), 1);

        let body = world.body(&sphere).unwrap();
        assert!(body.is_dynamic());
        assert_eq!(PhysicsBody::position(body), Vec3::new(0.0, 5.0, 0.0));
    }

    #[test]
    fn test_sphere_falls_and_rests_on_ground() {
        let mut world = PhysicsWorld::with_gravity(Vec3::new(0.0, -30.0, 0.0));
        world.add_ground_plane(0.0);
        let sphere = world.create_dynamic_sphere(&sphere_at(5.0));

        for _ in 0..240 {
            world.step(1.0 / 60.0);
        }

        let body = world.body(&sphere).unwrap();
        let pos = PhysicsBody::position(body);
        let vel = PhysicsBody::velocity(body);
        assert!((pos.y - 0.5).abs() < 0.05, "resting height {}", pos.y);
        assert!(vel.y.abs() < 0.1, "resting vy {}", vel.y);
    }

    #[test]
    fn test_set_velocity_replaces_vector() {
        let mut world = PhysicsWorld::new();
        let sphere = world.create_dynamic_sphere(&sphere_at(5.0));

        let body = world.body_mut(&sphere).unwrap();
        body.set_velocity(Vec3::new(3.0, 1.0, -2.0));
        assert_eq!(PhysicsBody::velocity(body), Vec3::new(3.0, 1.0, -2.0));
    }

    #[test]
    fn test_damping_decays_unasserted_velocity() {
        let mut world = PhysicsWorld::with_gravity(Vec3::ZERO);
        let sphere = world.create_dynamic_sphere(&sphere_at(5.0));
        world
            .body_mut(&sphere)
            .unwrap()
            .set_velocity(Vec3::new(10.0, 0.0, 0.0));

        for _ in 0..60 {
            world.step(1.0 / 60.0);
        }

        let vx = PhysicsBody::velocity(world.body(&sphere).unwrap()).x;
        assert!(vx > 0.0 && vx < 10.0, "damped vx {}", vx);
    }

    #[test]
    fn test_fixed_rotation_locks_all_axes() {
        let mut world = PhysicsWorld::new();
        let sphere = world.create_dynamic_sphere(&sphere_at(5.0));
        let locked = world.body(&sphere).unwrap().locked_axes();
        assert!(locked.contains(LockedAxes::ROTATION_LOCKED));

        let mut free = sphere_at(5.0);
        free.fixed_rotation = false;
        let tumbling = world.create_dynamic_sphere(&free);
        assert!(world.body(&tumbling).unwrap().locked_axes().is_empty());
    }

    #[test]
    fn test_dropping_handle_releases_body() {
        let mut world = PhysicsWorld::new();
        let sphere = world.create_dynamic_sphere(&sphere_at(5.0));
        assert_eq!(world.rigid_body_set.len(), 1);

        drop(sphere);
        assert_eq!(world.flush_released(), 1);
        assert_eq!(world.rigid_body_set.len(), 0);
        assert_eq!(world.collider_set.len(), 0);
    }

    #[test]
    fn test_step_releases_dropped_bodies() {
        let mut world = PhysicsWorld::new();
        {
            let _sphere = world.create_dynamic_sphere(&sphere_at(2.0));
        }
        world.step(1.0 / 60.0);
        assert_eq!(world.rigid_body_set.len(), 0);
    }

    #[test]
    fn test_static_geometry_is_bodiless() {
        let mut world = PhysicsWorld::new();
        world.add_ground_plane(0.0);
        world.add_static_box(Vec3::new(0.0, 1.0, -10.0), Vec3::new(20.0, 2.0, 0.5));

        assert_eq!(world.rigid_body_set.len(), 0);
        assert_eq!(world.collider_set.len(), 2);
    }
}
