use std::time::SystemTime;

use nalgebra::{Isometry3, Vector3};

/// Linear and angular velocity of the robot base.
#[derive(Clone, Debug, Default, Copy, PartialEq)]
pub struct Twist {
    pub linear: Vector3<f64>,
    pub angular: Vector3<f64>,
}

impl Twist {
    pub fn new(linear: Vector3<f64>, angular: Vector3<f64>) -> Self {
        Self { linear, angular }
    }

    pub fn is_zero(&self) -> bool {
        self.linear == Vector3::zeros() && self.angular == Vector3::zeros()
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Header {
    pub stamp: SystemTime,
    pub frame_id: String,
}

impl Header {
    /// Creates a header stamped with the current time.
    pub fn now(frame_id: impl Into<String>) -> Self {
        Self {
            stamp: SystemTime::now(),
            frame_id: frame_id.into(),
        }
    }
}

/// Velocity command sent to the motion controller.
///
/// `header` is only present for stamped commands.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TwistCommand {
    pub header: Option<Header>,
    pub twist: Twist,
}

impl TwistCommand {
    pub fn unstamped(twist: Twist) -> Self {
        Self {
            header: None,
            twist,
        }
    }

    pub fn stamped(twist: Twist, frame_id: impl Into<String>) -> Self {
        Self {
            header: Some(Header::now(frame_id)),
            twist,
        }
    }
}

/// Pose in a reference frame, used both for bookmarked poses and navigation goals.
#[derive(Clone, Debug, PartialEq)]
pub struct PoseStamped {
    pub header: Header,
    pub pose: Isometry3<f64>,
}

impl PoseStamped {
    pub fn new(header: Header, pose: Isometry3<f64>) -> Self {
        Self { header, pose }
    }
}

/// Navigation status code reported to the status topic.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct NavStatus(pub i32);

impl NavStatus {
    pub const COSTMAPS_CLEARED: Self = Self(4);
    pub const POSE_STORED: Self = Self(5);

    pub fn code(self) -> i32 {
        self.0
    }
}
