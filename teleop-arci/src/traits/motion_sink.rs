use auto_impl::auto_impl;

use crate::{error::Result, TwistCommand};

/// Destination of velocity commands (e.g. a `cmd_vel` topic).
#[auto_impl(Box, Arc)]
pub trait MotionSink: Send + Sync {
    /// Name of the destination, used in diagnostics.
    fn topic(&self) -> &str;

    /// Number of consumers currently attached.
    fn subscriber_count(&self) -> usize;

    fn send_command(&self, command: &TwistCommand) -> Result<()>;
}
