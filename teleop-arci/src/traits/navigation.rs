use auto_impl::auto_impl;

use crate::{error::Result, NavStatus, PoseStamped};

#[auto_impl(Box, Arc)]
pub trait GoalSink: Send + Sync {
    fn send_goal(&self, goal: &PoseStamped) -> Result<()>;
}

#[auto_impl(Box, Arc)]
pub trait CancelSink: Send + Sync {
    fn cancel_goal(&self) -> Result<()>;
}

#[auto_impl(Box, Arc)]
pub trait CostmapClearer: Send + Sync {
    fn clear_costmaps(&self) -> Result<()>;
}

#[auto_impl(Box, Arc)]
pub trait StatusSink: Send + Sync {
    fn send_status(&self, status: NavStatus) -> Result<()>;
}
