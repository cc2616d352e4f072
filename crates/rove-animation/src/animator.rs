//! Procedural animator state machine

use crate::pose::CharacterPose;
use crate::state::AnimationState;
use rove_core::config::AnimationConfig;
use std::f32::consts::PI;
use tracing::debug;

/// Drives a `CharacterPose` from movement flags.
///
/// The walk phase only advances while walking and is never reset, so
/// resuming a walk continues the gait where it stopped. The only pose state
/// kept between ticks is what the idle settle decays from.
pub struct CharacterAnimator {
    config: AnimationConfig,
    phase: f32,
    state: AnimationState,
    pose: CharacterPose,
}

impl CharacterAnimator {
    pub fn new(config: AnimationConfig) -> Self {
        let pose = CharacterPose {
            body_height: config.body_rest_height,
            head_height: config.head_rest_height,
            ..Default::default()
        };
        Self {
            config,
            phase: 0.0,
            state: AnimationState::Idle,
            pose,
        }
    }

    /// Advance one tick and return the new pose
    pub fn update(&mut self, is_moving: bool, is_jumping: bool, dt: f32) -> CharacterPose {
        let state = AnimationState::select(is_moving, is_jumping);
        if state != self.state {
            debug!(from = self.state.name(), to = state.name(), "animation state change");
            self.state = state;
        }

        match state {
            AnimationState::Walking => self.walk(dt),
            AnimationState::Idle => self.settle(),
            AnimationState::Jumping => self.tuck(),
        }

        self.pose.body_height = self.config.body_rest_height + self.pose.body_bounce;
        self.pose.head_height = self.config.head_rest_height + self.pose.body_bounce;
        self.pose
    }

    fn walk(&mut self, dt: f32) {
        self.phase += dt * self.config.speed;
        let t = self.phase;
        let arm = self.config.arm_swing;
        let leg = self.config.leg_swing;

        // Opposite arm and leg swing together
        self.pose.arm_left = t.sin() * arm;
        self.pose.arm_right = (t + PI).sin() * arm;
        self.pose.leg_left = (t + PI).sin() * leg;
        self.pose.leg_right = t.sin() * leg;
        self.pose.body_bounce = (t * 2.0).sin().abs() * self.config.bounce_amplitude;
    }

    fn settle(&mut self) {
        self.pose.scale_limbs(self.config.idle_decay);
        self.pose.body_bounce = 0.0;
    }

    fn tuck(&mut self) {
        self.pose.arm_left = self.config.jump_arm_angle;
        self.pose.arm_right = self.config.jump_arm_angle;
        self.pose.leg_left = self.config.jump_leg_angle;
        self.pose.leg_right = self.config.jump_leg_angle;
        self.pose.body_bounce = 0.0;
    }

    pub fn state(&self) -> AnimationState {
        self.state
    }

    /// Current walk phase
    pub fn phase(&self) -> f32 {
        self.phase
    }

    pub fn pose(&self) -> CharacterPose {
        self.pose
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DT: f32 = 1.0 / 60.0;

    fn animator() -> CharacterAnimator {
        CharacterAnimator::new(AnimationConfig::default())
    }

    #[test]
    fn starts_idle_at_rest() {
        let anim = animator();
        assert_eq!(anim.state(), AnimationState::Idle);
        assert_eq!(anim.pose().limbs(), [0.0; 4]);
        assert!((anim.pose().body_height - 0.9).abs() < 1e-6);
        assert!((anim.pose().head_height - 1.7).abs() < 1e-6);
    }

    #[test]
    fn walking_swings_limbs_in_antiphase() {
        let mut anim = animator();
        let pose = anim.update(true, false, 0.1);

        assert_eq!(anim.state(), AnimationState::Walking);
        assert!((anim.phase() - 0.8).abs() < 1e-6);
        assert!((pose.arm_left - 0.8f32.sin() * 0.6).abs() < 1e-5);
        assert!((pose.arm_left + pose.arm_right).abs() < 1e-5);
        assert!((pose.leg_left + pose.leg_right).abs() < 1e-5);
        // Left arm swings with the right leg
        assert!((pose.arm_left / 0.6 - pose.leg_right / 0.5).abs() < 1e-5);
    }

    #[test]
    fn walking_bounces_body_and_head_together() {
        let mut anim = animator();
        let pose = anim.update(true, false, 0.1);
        let expected = (1.6f32).sin().abs() * 0.05;

        assert!((pose.body_bounce - expected).abs() < 1e-6);
        assert!((pose.body_height - (0.9 + expected)).abs() < 1e-6);
        assert!((pose.head_height - (1.7 + expected)).abs() < 1e-6);
    }

    #[test]
    fn idle_decay_is_monotonic_and_keeps_sign() {
        let mut anim = animator();
        // Pick a phase where all limbs are clearly non-zero
        anim.update(true, false, 0.1);
        let start = anim.pose().limbs();
        assert!(start.iter().all(|v| v.abs() > 0.1));

        let mut previous = start;
        for _ in 0..200 {
            let pose = anim.update(false, false, DT);
            let limbs = pose.limbs();
            for i in 0..4 {
                assert!(limbs[i].abs() <= previous[i].abs());
                assert!(limbs[i] == 0.0 || limbs[i].signum() == start[i].signum());
            }
            assert_eq!(pose.body_bounce, 0.0);
            previous = limbs;
        }
        assert!(previous.iter().all(|v| v.abs() < 1e-6));
    }

    #[test]
    fn idle_decay_uses_fixed_factor_per_tick() {
        let mut anim = animator();
        let walked = anim.update(true, false, 0.1);
        let settled = anim.update(false, false, DT);
        assert!((settled.arm_left - walked.arm_left * 0.9).abs() < 1e-6);
    }

    #[test]
    fn phase_holds_while_not_walking() {
        let mut anim = animator();
        anim.update(true, false, 0.1);
        let phase = anim.phase();

        anim.update(false, false, 0.1);
        anim.update(true, true, 0.1);
        assert_eq!(anim.phase(), phase);

        // Walking resumes from the held phase
        anim.update(true, false, 0.1);
        assert!((anim.phase() - (phase + 0.8)).abs() < 1e-5);
    }

    #[test]
    fn jumping_overrides_walk_pose() {
        let mut anim = animator();
        anim.update(true, false, 0.1);

        let pose = anim.update(true, true, 0.1);
        assert_eq!(anim.state(), AnimationState::Jumping);
        assert_eq!(pose.limbs(), [-0.5, -0.5, -0.3, -0.3]);
        assert_eq!(pose.body_bounce, 0.0);
        assert!((pose.body_height - 0.9).abs() < 1e-6);
    }

    #[test]
    fn landing_idle_settles_from_jump_pose() {
        let mut anim = animator();
        anim.update(false, true, DT);
        let pose = anim.update(false, false, DT);
        assert!((pose.arm_left - (-0.45)).abs() < 1e-6);
        assert!((pose.leg_right - (-0.27)).abs() < 1e-6);
    }

    #[test]
    fn idle_to_walking_is_immediate() {
        let mut anim = animator();
        anim.update(false, false, DT);
        assert_eq!(anim.state(), AnimationState::Idle);
        anim.update(true, false, DT);
        assert_eq!(anim.state(), AnimationState::Walking);
    }
}
