//! Rove Physics - Rapier 3D service
//!
//! The locomotion core consumes physics as a service; this crate is that
//! service:
//! - `PhysicsWorld` — wraps the Rapier pipeline, body/collider sets and static geometry
//! - `PhysicsBody` — the position/velocity contract the player controller talks to
//! - `SphereBody` — scoped handle to the player's dynamic sphere, released on drop

pub mod body;
pub mod world;

pub use body::{PhysicsBody, SphereBody, SphereDesc};
pub use world::PhysicsWorld;
