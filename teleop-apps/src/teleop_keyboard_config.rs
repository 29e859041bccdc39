use std::path::Path;

use clap::Args;
use teleop::TeleopConfig;
use tracing::debug;

use crate::Error;

/// Command line settings that take priority over the setting file.
#[derive(Args, Debug, Default, Clone)]
pub struct TeleopOverrides {
    /// Initial linear speed.
    #[clap(long)]
    pub speed: Option<f64>,
    /// Initial angular speed.
    #[clap(long)]
    pub turn: Option<f64>,
    /// Rate in Hz at which the latest command is re-sent (0: only on change).
    #[clap(long)]
    pub repeat_rate: Option<f64>,
    /// Seconds without a keystroke after which motion stops.
    #[clap(long)]
    pub key_timeout: Option<f64>,
    /// Send commands with a header.
    #[clap(long)]
    pub stamped: bool,
    /// Frame of stamped commands.
    #[clap(long)]
    pub frame_id: Option<String>,
}

impl TeleopOverrides {
    pub fn apply(&self, config: &mut TeleopConfig) {
        if let Some(speed) = self.speed {
            config.speed = speed;
        }
        if let Some(turn) = self.turn {
            config.turn = turn;
        }
        if let Some(repeat_rate) = self.repeat_rate {
            config.repeat_rate = repeat_rate;
        }
        if let Some(key_timeout) = self.key_timeout {
            config.key_timeout = key_timeout;
        }
        if self.stamped {
            config.stamped = true;
        }
        if let Some(frame_id) = &self.frame_id {
            config.frame_id = frame_id.clone();
        }
    }
}

pub fn config_from_str<P: AsRef<Path>>(s: &str, path: P) -> Result<TeleopConfig, Error> {
    toml::from_str(s).map_err(|e| Error::TomlParseFailure(path.as_ref().to_owned(), e))
}

/// Loads the setting file (or the defaults if `path` is `None`), applies
/// `overrides` and validates the result.
pub fn load_config(
    path: Option<&Path>,
    overrides: &TeleopOverrides,
) -> Result<TeleopConfig, Error> {
    let mut config = match path {
        Some(path) => config_from_str(
            &std::fs::read_to_string(path).map_err(|e| Error::NoFile(path.to_owned(), e))?,
            path,
        )?,
        None => TeleopConfig::default(),
    };
    overrides.apply(&mut config);
    config.validate()?;
    debug!(?config, "loaded config");
    Ok(config)
}
