use teleop_arci::{Twist, Vector3};

use crate::{MotionVector, SpeedFactors};

/// Upper bounds for `speed` and `turn`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpeedLimits {
    pub speed: f64,
    pub turn: f64,
}

impl SpeedLimits {
    pub fn new(speed: f64, turn: f64) -> Self {
        Self { speed, turn }
    }
}

/// Operator intent shared between the input loop and the publisher.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CommandState {
    pub motion: MotionVector,
    pub speed: f64,
    pub turn: f64,
}

impl CommandState {
    /// Creates a state that is not moving.
    pub fn new(speed: f64, turn: f64) -> Self {
        Self {
            motion: MotionVector::ZERO,
            speed,
            turn,
        }
    }

    /// All fields zero, used to stop the robot on shutdown.
    pub fn zero() -> Self {
        Self::default()
    }

    pub fn set_motion(&mut self, motion: MotionVector) {
        self.motion = motion;
    }

    pub fn stop_motion(&mut self) {
        self.motion = MotionVector::ZERO;
    }

    /// Multiplies `speed` and `turn` by `factors`, then clamps them to `limits`.
    pub fn scale(&mut self, factors: SpeedFactors, limits: &SpeedLimits) {
        self.speed = (self.speed * factors.speed).min(limits.speed);
        self.turn = (self.turn * factors.turn).min(limits.turn);
    }

    pub fn to_twist(&self) -> Twist {
        let m = self.motion;
        Twist::new(
            Vector3::new(m.x as f64, m.y as f64, m.z as f64) * self.speed,
            Vector3::new(0.0, 0.0, m.th as f64 * self.turn),
        )
    }
}
