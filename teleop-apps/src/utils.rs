use std::path::PathBuf;

use tracing::warn;
use tracing_subscriber::EnvFilter;

const TELEOP_CONFIG_ENV_NAME: &str = "TELEOP_KEYBOARD_CONFIG_PATH";

/// Get teleop config path from input or env TELEOP_KEYBOARD_CONFIG_PATH
pub fn get_config_path(config: Option<PathBuf>) -> Option<PathBuf> {
    if config.is_some() {
        config
    } else {
        std::env::var(TELEOP_CONFIG_ENV_NAME)
            .map(|s| {
                warn!("### ENV VAR {s} is used ###");
                PathBuf::from(s)
            })
            .ok()
    }
}

/// Logs go to stderr so that the operator-facing help on stdout stays readable.
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();
}
