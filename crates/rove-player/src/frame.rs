//! Per-tick output handed to the render collaborator

use crate::camera::CameraTransform;
use rove_animation::{AnimationState, CharacterPose};
use rove_core::{Result, RoveError, Vec3};
use serde::Serialize;
use std::io::Write;

/// Where the character is and which way it faces
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CharacterTransform {
    pub position: Vec3,
    /// Rotation about +Y in radians
    pub facing_yaw: f32,
}

/// Everything a renderer needs to draw one tick
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FrameOutput {
    pub tick: u64,
    pub camera: CameraTransform,
    pub character: CharacterTransform,
    pub pose: CharacterPose,
    pub state: AnimationState,
}

/// Consumer of frame output
pub trait FrameSink {
    fn submit(&mut self, frame: &FrameOutput) -> Result<()>;
}

/// Collects frames in memory
impl FrameSink for Vec<FrameOutput> {
    fn submit(&mut self, frame: &FrameOutput) -> Result<()> {
        self.push(*frame);
        Ok(())
    }
}

/// Writes one JSON object per line
pub struct JsonLinesSink<W: Write> {
    writer: W,
}

impl<W: Write> JsonLinesSink<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn flush(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}

impl<W: Write> FrameSink for JsonLinesSink<W> {
    fn submit(&mut self, frame: &FrameOutput) -> Result<()> {
        serde_json::to_writer(&mut self.writer, frame)
            .map_err(|e| RoveError::OutputError(format!("frame {}: {}", frame.tick, e)))?;
        self.writer.write_all(b"\n")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frame(tick: u64) -> FrameOutput {
        FrameOutput {
            tick,
            camera: CameraTransform {
                position: Vec3::new(0.0, 2.5, 5.0),
                target: Vec3::new(0.0, 1.5, 0.0),
            },
            character: CharacterTransform {
                position: Vec3::new(0.0, 0.5, 0.0),
                facing_yaw: 0.0,
            },
            pose: CharacterPose::default(),
            state: AnimationState::Walking,
        }
    }

    #[test]
    fn test_json_lines_one_object_per_tick() {
        let mut buf = Vec::new();
        {
            let mut sink = JsonLinesSink::new(&mut buf);
            sink.submit(&frame(1)).unwrap();
            sink.submit(&frame(2)).unwrap();
        }

        let text = String::from_utf8(buf).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 2);

        let first: serde_json::Value = serde_json::from_str(lines[0]).unwrap();
        assert_eq!(first["tick"], 1);
        assert_eq!(first["state"], "walking");
        assert_eq!(first["camera"]["position"]["z"], 5.0);
        assert!(first["pose"]["arm_left"].is_number());
    }

    #[test]
    fn test_vec_sink_collects() {
        let mut frames: Vec<FrameOutput> = Vec::new();
        frames.submit(&frame(7)).unwrap();
        assert_eq!(frames[0].tick, 7);
    }
}
