//! Per-tick character pose

use serde::Serialize;

/// Limb rotations (radians about the limb's lateral axis, pivoting at the
/// shoulder or hip) and vertical offsets for the blocky character rig.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct CharacterPose {
    pub arm_left: f32,
    pub arm_right: f32,
    pub leg_left: f32,
    pub leg_right: f32,
    /// Vertical bounce added to the body and head rest heights
    pub body_bounce: f32,
    /// Body center height above the character origin
    pub body_height: f32,
    /// Head center height above the character origin
    pub head_height: f32,
}

impl CharacterPose {
    /// Limb rotations in a fixed order: left arm, right arm, left leg, right leg
    pub fn limbs(&self) -> [f32; 4] {
        [self.arm_left, self.arm_right, self.leg_left, self.leg_right]
    }

    pub(crate) fn scale_limbs(&mut self, factor: f32) {
        self.arm_left *= factor;
        self.arm_right *= factor;
        self.leg_left *= factor;
        self.leg_right *= factor;
    }
}
