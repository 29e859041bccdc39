use std::time::Duration;

use thiserror::Error;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    #[error("teleop-arci: Connection error : {}", message)]
    Connection { message: String },
    #[error("teleop-arci: Failed to lookup transform {} -> {} : {}", from, to, message)]
    Lookup {
        from: String,
        to: String,
        message: String,
    },
    #[error("teleop-arci: Timeout {:?}", .0)]
    Timeout(Duration),
    #[error("teleop-arci: Input closed")]
    InputClosed,
    #[error("teleop-arci: Other: {:?}", .0)]
    Other(#[from] anyhow::Error),
}
