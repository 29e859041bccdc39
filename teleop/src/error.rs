use thiserror::Error;

use crate::PoseSlot;

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    #[error("teleop: Got shutdown request before subscribers connected to {}", topic)]
    NoSubscriber { topic: String },
    #[error("teleop: Failed to store {}: {}", slot, source)]
    PoseLookup {
        slot: PoseSlot,
        #[source]
        source: teleop_arci::Error,
    },
    #[error("teleop: Failed to send velocity command: {}", .0)]
    SendFailure(#[source] teleop_arci::Error),
    #[error("teleop: Publisher task terminated unexpectedly")]
    PublisherTerminated,
    #[error("teleop: Invalid config: {}", .0)]
    InvalidConfig(String),
    #[error("teleop: {}", .0)]
    Arci(#[from] teleop_arci::Error),
}
