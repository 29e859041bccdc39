use std::{
    io::Write,
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc,
    },
    time::Duration,
};

use teleop_arci::{
    CancelSink, CostmapClearer, GoalSink, KeySource, MotionSink, NavStatus, StatusSink,
    TransformResolver,
};
use tracing::{debug, error, info, warn};

use crate::{
    key_to_intent, velocities_line, CommandPublisher, CommandState, Error, Intent, PoseCache,
    PoseSlot, SpeedLimits, TeleopConfig, HELP,
};

/// The help banner is shown again after this many speed changes.
const HELP_EVERY_SPEED_CHANGES: usize = 15;

/// One-shot navigation collaborators driven by the command keys.
#[derive(Clone)]
pub struct NavigationClients {
    pub goal: Arc<dyn GoalSink>,
    pub cancel: Arc<dyn CancelSink>,
    pub costmaps: Arc<dyn CostmapClearer>,
    pub status: Arc<dyn StatusSink>,
}

impl std::fmt::Debug for NavigationClients {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NavigationClients").finish_non_exhaustive()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LoopControl {
    Continue,
    Exit,
}

/// Reads keys and dispatches them until interrupted.
pub struct InputLoop<M, R, W>
where
    M: MotionSink + 'static,
{
    publisher: CommandPublisher<M>,
    pose_cache: PoseCache<R>,
    clients: NavigationClients,
    state: CommandState,
    limits: SpeedLimits,
    key_timeout: Duration,
    console: W,
    speed_changes: usize,
    is_running: Arc<AtomicBool>,
}

impl<M, R, W> std::fmt::Debug for InputLoop<M, R, W>
where
    M: MotionSink + 'static,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InputLoop")
            .field("publisher", &self.publisher)
            .field("state", &self.state)
            .field("limits", &self.limits)
            .field("key_timeout", &self.key_timeout)
            .finish_non_exhaustive()
    }
}

impl<M, R, W> InputLoop<M, R, W>
where
    M: MotionSink + 'static,
    R: TransformResolver,
    W: Write,
{
    /// Creates an input loop. `console` receives the operator-facing help
    /// and speed lines.
    pub fn new(
        config: &TeleopConfig,
        publisher: CommandPublisher<M>,
        pose_cache: PoseCache<R>,
        clients: NavigationClients,
        console: W,
    ) -> Self {
        Self {
            publisher,
            pose_cache,
            clients,
            state: config.initial_state(),
            limits: config.speed_limits(),
            key_timeout: config.key_timeout(),
            console,
            speed_changes: 0,
            is_running: Arc::new(AtomicBool::new(true)),
        }
    }

    /// Flag that stops the loop at its next cycle when cleared.
    pub fn shutdown_handle(&self) -> Arc<AtomicBool> {
        self.is_running.clone()
    }

    /// Runs until Ctrl-C, end of input, external shutdown or a publisher failure.
    ///
    /// The publisher is stopped on every exit path, so the last command sent
    /// is always a zero command.
    pub async fn run<K>(mut self, keys: &K) -> Result<(), Error>
    where
        K: KeySource + ?Sized,
    {
        let result = self.read_keys(keys).await;
        let stopped = self.publisher.stop().await;
        if let Err(e) = &result {
            error!("{e}");
        }
        result.and(stopped)
    }

    async fn read_keys<K>(&mut self, keys: &K) -> Result<(), Error>
    where
        K: KeySource + ?Sized,
    {
        self.publisher.wait_for_subscribers(&self.is_running).await?;
        self.publisher.update(self.state);

        self.print(HELP);
        self.print(&velocities_line(self.state.speed, self.state.turn));

        while self.is_running.load(Ordering::Relaxed) {
            if self.publisher.is_finished() {
                warn!("publisher stopped, leaving input loop");
                break;
            }
            let key = match tokio::time::timeout(self.key_timeout, keys.next_key()).await {
                Ok(Ok(key)) => Some(key),
                Ok(Err(teleop_arci::Error::InputClosed)) => {
                    info!("input closed");
                    break;
                }
                Ok(Err(e)) => return Err(e.into()),
                Err(_) => None,
            };
            debug!(?key, "key");
            if self.dispatch(key_to_intent(key)).await == LoopControl::Exit {
                break;
            }
        }
        Ok(())
    }

    async fn dispatch(&mut self, intent: Intent) -> LoopControl {
        match intent {
            Intent::Move(motion) => {
                self.state.set_motion(motion);
                self.publisher.update(self.state);
            }
            Intent::ScaleSpeed(factors) => {
                self.state.scale(factors, &self.limits);
                self.publisher.update(self.state);
                self.print(&velocities_line(self.state.speed, self.state.turn));
                if self.speed_changes == HELP_EVERY_SPEED_CHANGES - 1 {
                    self.print(HELP);
                }
                self.speed_changes = (self.speed_changes + 1) % HELP_EVERY_SPEED_CHANGES;
            }
            Intent::StorePose(slot) => self.store_pose(slot).await,
            Intent::RecallPose(slot) => {
                if let Err(e) = self.pose_cache.recall(slot, &*self.clients.goal) {
                    error!("Failed to navigate to {slot}: {e}");
                }
            }
            Intent::GoHome => {
                let home = self.pose_cache.home_pose();
                match self.clients.goal.send_goal(&home) {
                    Ok(()) => info!("Going home"),
                    Err(e) => error!("Failed to go home: {e}"),
                }
            }
            Intent::ClearCostmaps => match self.clients.costmaps.clear_costmaps() {
                Ok(()) => {
                    info!("Costmaps cleared");
                    self.send_status(NavStatus::COSTMAPS_CLEARED);
                }
                Err(e) => error!("Failed to clear costmaps: {e}"),
            },
            Intent::CancelGoal => match self.clients.cancel.cancel_goal() {
                Ok(()) => info!("Current goal canceled"),
                Err(e) => error!("Failed to cancel current goal: {e}"),
            },
            Intent::Interrupt => return LoopControl::Exit,
            Intent::Unknown => {
                self.state.stop_motion();
                self.publisher.update(self.state);
            }
        }
        LoopControl::Continue
    }

    async fn store_pose(&mut self, slot: PoseSlot) {
        match self.pose_cache.store(slot).await {
            Ok(_) => self.send_status(NavStatus::POSE_STORED),
            Err(e) => error!("{e}"),
        }
    }

    fn send_status(&self, status: NavStatus) {
        if let Err(e) = self.clients.status.send_status(status) {
            warn!("Failed to send status {}: {e}", status.code());
        }
    }

    fn print(&mut self, text: &str) {
        if let Err(e) = writeln!(self.console, "{text}").and_then(|()| self.console.flush()) {
            warn!("failed to write to console: {e}");
        }
    }
}

#[cfg(test)]
mod tests {
    use assert_approx_eq::assert_approx_eq;
    use teleop_arci::{
        DummyCancelSink, DummyCostmapClearer, DummyGoalSink, DummyMotionSink, DummyStatusSink,
        DummyTransformResolver, Isometry3,
    };

    use super::*;
    use crate::MotionVector;

    struct Fixture {
        sink: Arc<DummyMotionSink>,
        goal: Arc<DummyGoalSink>,
        cancel: Arc<DummyCancelSink>,
        costmaps: Arc<DummyCostmapClearer>,
        status: Arc<DummyStatusSink>,
        resolver: Arc<DummyTransformResolver>,
    }

    impl Fixture {
        fn new() -> Self {
            Self {
                sink: Arc::new(DummyMotionSink::default()),
                goal: Arc::new(DummyGoalSink::new()),
                cancel: Arc::new(DummyCancelSink::new()),
                costmaps: Arc::new(DummyCostmapClearer::new()),
                status: Arc::new(DummyStatusSink::new()),
                resolver: Arc::new(DummyTransformResolver::new()),
            }
        }

        fn input_loop(
            &self,
            config: &TeleopConfig,
        ) -> InputLoop<DummyMotionSink, Arc<DummyTransformResolver>, Vec<u8>> {
            let publisher =
                CommandPublisher::spawn(self.sink.clone(), config.publisher_config());
            let pose_cache = PoseCache::new(
                self.resolver.clone(),
                &config.reference_frame,
                &config.robot_frame,
                config.lookup_timeout(),
            );
            let clients = NavigationClients {
                goal: self.goal.clone(),
                cancel: self.cancel.clone(),
                costmaps: self.costmaps.clone(),
                status: self.status.clone(),
            };
            InputLoop::new(config, publisher, pose_cache, clients, Vec::new())
        }
    }

    async fn press<M, R, W>(input_loop: &mut InputLoop<M, R, W>, key: Option<char>) -> LoopControl
    where
        M: MotionSink + 'static,
        R: TransformResolver,
        W: Write,
    {
        input_loop.dispatch(key_to_intent(key)).await
    }

    #[tokio::test]
    async fn test_move_scale_release() {
        let fixture = Fixture::new();
        let mut input_loop = fixture.input_loop(&TeleopConfig::default());

        press(&mut input_loop, Some('i')).await;
        assert_eq!(input_loop.state.motion, MotionVector::new(1, 0, 0, 0));
        assert_approx_eq!(input_loop.state.speed, 0.5);
        assert_approx_eq!(input_loop.state.turn, 1.0);

        press(&mut input_loop, Some('q')).await;
        assert_eq!(input_loop.state.motion, MotionVector::new(1, 0, 0, 0));
        assert_approx_eq!(input_loop.state.speed, 0.55);
        assert_approx_eq!(input_loop.state.turn, 1.1);

        press(&mut input_loop, None).await;
        assert!(input_loop.state.motion.is_zero());
        assert_approx_eq!(input_loop.state.speed, 0.55);
        assert_approx_eq!(input_loop.state.turn, 1.1);

        input_loop.publisher.stop().await.unwrap();
    }

    #[tokio::test]
    async fn test_unbound_key_stops_motion() {
        let fixture = Fixture::new();
        let mut input_loop = fixture.input_loop(&TeleopConfig::default());
        press(&mut input_loop, Some('U')).await;
        assert_eq!(input_loop.state.motion, MotionVector::new(1, 1, 0, 0));
        press(&mut input_loop, Some('k')).await;
        assert!(input_loop.state.motion.is_zero());
        input_loop.publisher.stop().await.unwrap();
    }

    #[tokio::test]
    async fn test_store_and_recall_pose() {
        let fixture = Fixture::new();
        fixture
            .resolver
            .set_transformation(Some(Isometry3::translation(1.0, 2.0, 0.0)));
        let mut input_loop = fixture.input_loop(&TeleopConfig::default());

        press(&mut input_loop, Some('i')).await;
        press(&mut input_loop, Some('2')).await;
        // one-shot keys leave the motion alone
        assert_eq!(input_loop.state.motion, MotionVector::new(1, 0, 0, 0));
        assert_eq!(fixture.status.statuses(), vec![NavStatus::POSE_STORED]);

        press(&mut input_loop, Some('@')).await;
        let goal = fixture.goal.last_goal().unwrap();
        assert_eq!(goal.header.frame_id, "map");
        assert_approx_eq!(goal.pose.translation.x, 1.0);
        assert_approx_eq!(goal.pose.translation.y, 2.0);
        assert_approx_eq!(goal.pose.translation.z, 0.0);
        assert_approx_eq!(goal.pose.rotation.quaternion().w, 1.0);
        assert_eq!(fixture.goal.goals().len(), 1);

        input_loop.publisher.stop().await.unwrap();
    }

    #[tokio::test]
    async fn test_recall_empty_slot_is_noop() {
        let fixture = Fixture::new();
        let mut input_loop = fixture.input_loop(&TeleopConfig::default());
        press(&mut input_loop, Some('i')).await;
        let before = input_loop.state;
        for key in ['!', '@', '#'] {
            assert_eq!(press(&mut input_loop, Some(key)).await, LoopControl::Continue);
        }
        assert_eq!(input_loop.state, before);
        assert!(fixture.goal.goals().is_empty());
        input_loop.publisher.stop().await.unwrap();
    }

    #[tokio::test]
    async fn test_failed_store_is_not_fatal() {
        let fixture = Fixture::new();
        fixture.resolver.set_transformation(None);
        let mut input_loop = fixture.input_loop(&TeleopConfig::default());
        assert_eq!(press(&mut input_loop, Some('1')).await, LoopControl::Continue);
        assert!(input_loop.pose_cache.get(PoseSlot::One).is_none());
        assert!(fixture.status.statuses().is_empty());
        input_loop.publisher.stop().await.unwrap();
    }

    #[tokio::test]
    async fn test_one_shot_commands() {
        let fixture = Fixture::new();
        let mut input_loop = fixture.input_loop(&TeleopConfig::default());

        press(&mut input_loop, Some('H')).await;
        let home = fixture.goal.last_goal().unwrap();
        assert_eq!(home.pose, Isometry3::identity());
        assert_eq!(home.header.frame_id, "map");

        press(&mut input_loop, Some('\t')).await;
        assert_eq!(fixture.costmaps.count(), 1);
        assert_eq!(fixture.status.statuses(), vec![NavStatus::COSTMAPS_CLEARED]);

        press(&mut input_loop, Some('\r')).await;
        assert_eq!(fixture.cancel.count(), 1);

        assert_eq!(press(&mut input_loop, Some('\x03')).await, LoopControl::Exit);
        input_loop.publisher.stop().await.unwrap();
    }

    #[tokio::test]
    async fn test_help_every_fifteen_speed_changes() {
        let fixture = Fixture::new();
        let config = TeleopConfig {
            speed_limit: 2.0,
            ..Default::default()
        };
        let mut input_loop = fixture.input_loop(&config);
        let count_help = |console: &[u8]| {
            String::from_utf8_lossy(console)
                .matches("Reading from the keyboard")
                .count()
        };

        for _ in 0..14 {
            press(&mut input_loop, Some('w')).await;
        }
        assert_eq!(count_help(&input_loop.console), 0);
        assert!(input_loop.state.speed <= 2.0);
        press(&mut input_loop, Some('w')).await;
        assert_eq!(count_help(&input_loop.console), 1);
        for _ in 0..15 {
            press(&mut input_loop, Some('x')).await;
        }
        assert_eq!(count_help(&input_loop.console), 2);
        let console = String::from_utf8_lossy(&input_loop.console).into_owned();
        assert_eq!(console.matches("currently:").count(), 30);

        input_loop.publisher.stop().await.unwrap();
    }
}
