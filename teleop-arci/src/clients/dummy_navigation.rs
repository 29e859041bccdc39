use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Mutex,
};

use tracing::info;

use crate::{
    error::Error,
    traits::{CancelSink, CostmapClearer, GoalSink, StatusSink},
    NavStatus, PoseStamped,
};

/// Dummy GoalSink for debug or tests.
#[derive(Debug, Default)]
pub struct DummyGoalSink {
    goals: Mutex<Vec<PoseStamped>>,
}

impl DummyGoalSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn goals(&self) -> Vec<PoseStamped> {
        self.goals.lock().unwrap().clone()
    }

    pub fn last_goal(&self) -> Option<PoseStamped> {
        self.goals.lock().unwrap().last().cloned()
    }
}

impl GoalSink for DummyGoalSink {
    fn send_goal(&self, goal: &PoseStamped) -> Result<(), Error> {
        let t = goal.pose.translation.vector;
        info!(
            frame_id = %goal.header.frame_id,
            x = t.x,
            y = t.y,
            z = t.z,
            "send_goal"
        );
        self.goals.lock().unwrap().push(goal.clone());
        Ok(())
    }
}

/// Dummy CancelSink for debug or tests.
#[derive(Debug, Default)]
pub struct DummyCancelSink {
    count: AtomicUsize,
}

impl DummyCancelSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of cancel requests received.
    pub fn count(&self) -> usize {
        self.count.load(Ordering::Relaxed)
    }
}

impl CancelSink for DummyCancelSink {
    fn cancel_goal(&self) -> Result<(), Error> {
        info!("cancel_goal");
        self.count.fetch_add(1, Ordering::Relaxed);
        Ok(())
    }
}

/// Dummy CostmapClearer for debug or tests.
#[derive(Debug, Default)]
pub struct DummyCostmapClearer {
    count: AtomicUsize,
}

impl DummyCostmapClearer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn count(&self) -> usize {
        self.count.load(Ordering::Relaxed)
    }
}

impl CostmapClearer for DummyCostmapClearer {
    fn clear_costmaps(&self) -> Result<(), Error> {
        info!("clear_costmaps");
        self.count.fetch_add(1, Ordering::Relaxed);
        Ok(())
    }
}

/// Dummy StatusSink for debug or tests.
#[derive(Debug, Default)]
pub struct DummyStatusSink {
    statuses: Mutex<Vec<NavStatus>>,
}

impl DummyStatusSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn statuses(&self) -> Vec<NavStatus> {
        self.statuses.lock().unwrap().clone()
    }
}

impl StatusSink for DummyStatusSink {
    fn send_status(&self, status: NavStatus) -> Result<(), Error> {
        info!(code = status.code(), "send_status");
        self.statuses.lock().unwrap().push(status);
        Ok(())
    }
}
