//! Rove Core - Foundational types for the Rove locomotion core
//!
//! This crate provides the types that all other Rove crates depend on:
//! - `Vec3` - Spatial vector with the yaw rotation used for camera-relative movement
//! - `RoveConfig` - Tuning constants for movement, camera, body, animation and physics
//! - Error types and Result alias

pub mod config;
mod error;
mod types;

pub use config::RoveConfig;
pub use error::{Result, RoveError};
pub use types::Vec3;
