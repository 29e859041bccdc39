use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    #[error("teleop-apps: Failed to parse {:?} as toml ({}).", .0, .1)]
    TomlParseFailure(PathBuf, #[source] toml::de::Error),
    #[error("teleop-apps: No File {:?} is found ({}).", .0, .1)]
    NoFile(PathBuf, #[source] std::io::Error),
    #[error("teleop-apps: teleop: {}", .0)]
    Teleop(#[from] teleop::Error),
    #[error("teleop-apps: teleop-arci: {}", .0)]
    Arci(#[from] teleop_arci::Error),
}
