use std::time::Duration;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::{CommandState, Error, PublisherConfig, SpeedLimits};

fn default_speed() -> f64 {
    0.5
}
fn default_turn() -> f64 {
    1.0
}
fn default_limit() -> f64 {
    1000.0
}
fn default_key_timeout() -> f64 {
    5.0
}
fn default_reference_frame() -> String {
    "map".to_owned()
}
fn default_robot_frame() -> String {
    "base_link".to_owned()
}
fn default_lookup_timeout() -> f64 {
    1.0
}

/// Settings of the keyboard teleoperation node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct TeleopConfig {
    /// Initial linear speed.
    #[serde(default = "default_speed")]
    pub speed: f64,
    /// Initial angular speed.
    #[serde(default = "default_turn")]
    pub turn: f64,
    #[serde(default = "default_limit")]
    pub speed_limit: f64,
    #[serde(default = "default_limit")]
    pub turn_limit: f64,
    /// Rate in Hz at which the latest command is re-sent.
    /// 0 sends a command only when it changes.
    #[serde(default)]
    pub repeat_rate: f64,
    /// Seconds without a keystroke after which motion stops.
    #[serde(default = "default_key_timeout")]
    pub key_timeout: f64,
    /// Whether commands carry a header.
    #[serde(default)]
    pub stamped: bool,
    /// Frame of stamped commands.
    #[serde(default)]
    pub frame_id: String,
    /// Frame in which poses are bookmarked and goals are sent.
    #[serde(default = "default_reference_frame")]
    pub reference_frame: String,
    #[serde(default = "default_robot_frame")]
    pub robot_frame: String,
    /// Seconds to wait for a pose lookup.
    #[serde(default = "default_lookup_timeout")]
    pub lookup_timeout: f64,
}

impl Default for TeleopConfig {
    fn default() -> Self {
        Self {
            speed: default_speed(),
            turn: default_turn(),
            speed_limit: default_limit(),
            turn_limit: default_limit(),
            repeat_rate: 0.0,
            key_timeout: default_key_timeout(),
            stamped: false,
            frame_id: String::new(),
            reference_frame: default_reference_frame(),
            robot_frame: default_robot_frame(),
            lookup_timeout: default_lookup_timeout(),
        }
    }
}

impl TeleopConfig {
    pub fn validate(&self) -> Result<(), Error> {
        for (name, value) in [
            ("speed", self.speed),
            ("turn", self.turn),
            ("speed_limit", self.speed_limit),
            ("turn_limit", self.turn_limit),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(Error::InvalidConfig(format!(
                    "{name} must be positive, but got {value}"
                )));
            }
        }
        for (name, value) in [
            ("repeat_rate", self.repeat_rate),
            ("key_timeout", self.key_timeout),
            ("lookup_timeout", self.lookup_timeout),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(Error::InvalidConfig(format!(
                    "{name} must not be negative, but got {value}"
                )));
            }
        }
        let mut durations = vec![
            ("key_timeout", self.key_timeout),
            ("lookup_timeout", self.lookup_timeout),
        ];
        if self.repeat_rate > 0.0 {
            durations.push(("1 / repeat_rate", 1.0 / self.repeat_rate));
        }
        for (name, secs) in durations {
            if let Err(e) = Duration::try_from_secs_f64(secs) {
                return Err(Error::InvalidConfig(format!(
                    "{name} is out of range ({secs} s): {e}"
                )));
            }
        }
        Ok(())
    }

    pub fn initial_state(&self) -> CommandState {
        CommandState::new(self.speed, self.turn)
    }

    pub fn speed_limits(&self) -> SpeedLimits {
        SpeedLimits::new(self.speed_limit, self.turn_limit)
    }

    pub fn key_timeout(&self) -> Duration {
        Duration::from_secs_f64(self.key_timeout)
    }

    pub fn lookup_timeout(&self) -> Duration {
        Duration::from_secs_f64(self.lookup_timeout)
    }

    pub fn publisher_config(&self) -> PublisherConfig {
        PublisherConfig {
            repeat_rate: self.repeat_rate,
            stamped: self.stamped,
            frame_id: self.frame_id.clone(),
        }
    }
}
