use std::time::{Duration, SystemTime};

use teleop_arci::{GoalSink, Header, Isometry3, PoseStamped, TransformResolver};
use tracing::{debug, info};

use crate::{Error, PoseSlot};

/// Bookmarks of robot poses, one per [`PoseSlot`].
///
/// Slots start empty and are only ever overwritten by a successful lookup.
#[derive(Debug)]
pub struct PoseCache<R> {
    resolver: R,
    reference_frame: String,
    robot_frame: String,
    lookup_timeout: Duration,
    slots: [Option<PoseStamped>; 3],
}

impl<R> PoseCache<R>
where
    R: TransformResolver,
{
    /// Creates a cache that bookmarks `robot_frame` in `reference_frame`.
    pub fn new(
        resolver: R,
        reference_frame: impl Into<String>,
        robot_frame: impl Into<String>,
        lookup_timeout: Duration,
    ) -> Self {
        Self {
            resolver,
            reference_frame: reference_frame.into(),
            robot_frame: robot_frame.into(),
            lookup_timeout,
            slots: Default::default(),
        }
    }

    pub fn get(&self, slot: PoseSlot) -> Option<&PoseStamped> {
        self.slots[slot.index()].as_ref()
    }

    /// Looks up the current robot pose and stores it in `slot`.
    ///
    /// On failure the slot keeps its previous contents.
    pub async fn store(&mut self, slot: PoseSlot) -> Result<&PoseStamped, Error> {
        let now = SystemTime::now();
        let lookup = self
            .resolver
            .resolve_transformation(&self.reference_frame, &self.robot_frame, now);
        let pose = match tokio::time::timeout(self.lookup_timeout, lookup).await {
            Ok(Ok(pose)) => pose,
            Ok(Err(source)) => return Err(Error::PoseLookup { slot, source }),
            Err(_) => {
                return Err(Error::PoseLookup {
                    slot,
                    source: teleop_arci::Error::Timeout(self.lookup_timeout),
                })
            }
        };
        info!("{slot} stored");
        let stored: &PoseStamped = self.slots[slot.index()].insert(PoseStamped::new(
            Header {
                stamp: now,
                frame_id: self.reference_frame.clone(),
            },
            pose,
        ));
        Ok(stored)
    }

    /// Sends the pose stored in `slot` as a goal.
    ///
    /// Returns `Ok(false)` without sending anything if the slot is empty.
    pub fn recall<G>(&self, slot: PoseSlot, goal_sink: &G) -> Result<bool, Error>
    where
        G: GoalSink + ?Sized,
    {
        let Some(pose) = self.get(slot) else {
            debug!("{slot} is not stored yet");
            return Ok(false);
        };
        goal_sink.send_goal(pose)?;
        info!("Navigating to {slot}");
        Ok(true)
    }

    /// Origin of the reference frame, stamped now.
    pub fn home_pose(&self) -> PoseStamped {
        PoseStamped::new(Header::now(&self.reference_frame), Isometry3::identity())
    }
}
