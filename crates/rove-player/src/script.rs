//! Scripted input for headless runs
//!
//! A script is a list of steps, each holding a set of movement keys for a
//! number of ticks:
//!
//! ```toml
//! [[steps]]
//! ticks = 60
//!
//! [[steps]]
//! ticks = 90
//! forward = true
//! pointer = [-200.0, 0.0]
//! ```

use crate::frame::FrameSink;
use crate::locomotion::LocomotionSystem;
use crate::map::GameMap;
use rove_core::{Result, RoveConfig, RoveError, Vec3};
use rove_physics::PhysicsWorld;
use rove_runtime::{GameClock, InputState};
use serde::Deserialize;
use std::path::Path;
use tracing::info;
use winit::keyboard::KeyCode;

/// Movement keys held for a run of ticks
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct ScriptStep {
    pub ticks: u32,
    pub forward: bool,
    pub backward: bool,
    pub left: bool,
    pub right: bool,
    pub jump: bool,
    /// Pointer delta in pixels, delivered on the first tick of the step
    pub pointer: [f64; 2],
}

/// A sequence of input steps
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct InputScript {
    #[serde(default)]
    pub steps: Vec<ScriptStep>,
}

impl InputScript {
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let script: InputScript = toml::from_str(content)?;
        script.validate()?;
        Ok(script)
    }

    pub fn validate(&self) -> Result<()> {
        if let Some(i) = self.steps.iter().position(|s| s.ticks == 0) {
            return Err(RoveError::ScriptError(format!(
                "step {} must run for at least one tick",
                i
            )));
        }
        Ok(())
    }

    /// Total ticks the script runs for
    pub fn total_ticks(&self) -> u64 {
        self.steps.iter().map(|s| s.ticks as u64).sum()
    }
}

/// Where a headless run ended up
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimulationSummary {
    pub ticks: u64,
    pub elapsed: f64,
    pub final_position: Vec3,
}

fn apply_step(input: &mut InputState, step: &ScriptStep) {
    let held = [
        (KeyCode::KeyW, step.forward),
        (KeyCode::KeyS, step.backward),
        (KeyCode::KeyA, step.left),
        (KeyCode::KeyD, step.right),
        (KeyCode::Space, step.jump),
    ];
    for (key, down) in held {
        if down {
            input.process_key_down(key);
        } else {
            input.process_key_up(key);
        }
    }
    input.process_pointer_delta(step.pointer[0], step.pointer[1]);
}

/// Run a script against a fresh world with a fixed timestep, submitting one
/// frame per tick to `sink`
pub fn simulate(
    config: &RoveConfig,
    map: &GameMap,
    script: &InputScript,
    dt: f64,
    sink: &mut dyn FrameSink,
) -> Result<SimulationSummary> {
    script.validate()?;

    let mut world = PhysicsWorld::with_gravity(Vec3::from_array(config.physics.gravity));
    map.build(&mut world);
    let mut player = LocomotionSystem::spawn(config, &mut world);

    // Default bindings so the scripted keys always map to their actions
    let mut input = InputState::new();
    input.set_pointer_captured(true);
    let mut clock = GameClock::new();
    let mut final_position = Vec3::from_array(config.body.spawn_position);

    info!(
        steps = script.steps.len(),
        ticks = script.total_ticks(),
        dt,
        "starting simulation"
    );

    for step in &script.steps {
        apply_step(&mut input, step);
        for _ in 0..step.ticks {
            let dt = clock.advance(dt);
            let frame = player.tick(&mut input, &mut world, dt as f32)?;
            final_position = frame.character.position;
            sink.submit(&frame)?;
        }
    }

    let summary = SimulationSummary {
        ticks: player.ticks(),
        elapsed: clock.total_time,
        final_position,
    };
    player.despawn();
    world.flush_released();
    Ok(summary)
}
