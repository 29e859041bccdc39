use std::{
    sync::{atomic::Ordering, Arc},
    time::Duration,
};

use assert_approx_eq::assert_approx_eq;
use teleop::{
    CommandPublisher, Error, InputLoop, NavigationClients, PoseCache, TeleopConfig,
};
use teleop_arci::{
    DummyCancelSink, DummyCostmapClearer, DummyGoalSink, DummyKeySource, DummyMotionSink,
    DummyStatusSink, DummyTransformResolver, Isometry3,
};

struct Robot {
    sink: Arc<DummyMotionSink>,
    goal: Arc<DummyGoalSink>,
    resolver: Arc<DummyTransformResolver>,
}

impl Robot {
    fn new() -> Self {
        Self {
            sink: Arc::new(DummyMotionSink::default()),
            goal: Arc::new(DummyGoalSink::new()),
            resolver: Arc::new(DummyTransformResolver::new()),
        }
    }

    fn input_loop(
        &self,
        config: &TeleopConfig,
    ) -> InputLoop<DummyMotionSink, Arc<DummyTransformResolver>, Vec<u8>> {
        let publisher = CommandPublisher::spawn(self.sink.clone(), config.publisher_config());
        let pose_cache = PoseCache::new(
            self.resolver.clone(),
            &config.reference_frame,
            &config.robot_frame,
            config.lookup_timeout(),
        );
        let clients = NavigationClients {
            goal: self.goal.clone(),
            cancel: Arc::new(DummyCancelSink::new()),
            costmaps: Arc::new(DummyCostmapClearer::new()),
            status: Arc::new(DummyStatusSink::new()),
        };
        InputLoop::new(config, publisher, pose_cache, clients, Vec::new())
    }
}

#[tokio::test(start_paused = true)]
async fn test_drive_and_release() {
    let robot = Robot::new();
    let keys = Arc::new(DummyKeySource::from_keys("iq".chars()));
    let keys_cloned = keys.clone();
    tokio::spawn(async move {
        // longer than the key timeout
        tokio::time::sleep(Duration::from_secs(6)).await;
        keys_cloned.push('\x03');
    });

    robot
        .input_loop(&TeleopConfig::default())
        .run(&*keys)
        .await
        .unwrap();

    let commands = robot.sink.commands();
    let driving = commands
        .iter()
        .position(|c| (c.twist.linear.x - 0.55).abs() < 1e-9)
        .expect("no command after pressing i and q");
    assert_approx_eq!(commands[driving].twist.angular.z, 0.0);
    // released by the key timeout, before Ctrl-C
    assert!(commands.len() >= driving + 2);
    assert!(commands[driving + 1].twist.is_zero());
    assert!(commands.last().unwrap().twist.is_zero());
}

#[tokio::test(start_paused = true)]
async fn test_end_of_input_stops_robot() {
    let robot = Robot::new();
    let keys = DummyKeySource::from_keys("u".chars());
    keys.close();
    robot
        .input_loop(&TeleopConfig::default())
        .run(&keys)
        .await
        .unwrap();
    assert!(robot.sink.last_command().unwrap().twist.is_zero());
}

#[tokio::test(start_paused = true)]
async fn test_store_and_navigate() {
    let robot = Robot::new();
    robot
        .resolver
        .set_transformation(Some(Isometry3::translation(1.0, 2.0, 0.0)));
    let keys = DummyKeySource::from_keys("2@".chars());
    keys.close();
    robot
        .input_loop(&TeleopConfig::default())
        .run(&keys)
        .await
        .unwrap();
    let goals = robot.goal.goals();
    assert_eq!(goals.len(), 1);
    assert_approx_eq!(goals[0].pose.translation.x, 1.0);
    assert_approx_eq!(goals[0].pose.translation.y, 2.0);
}

#[tokio::test(start_paused = true)]
async fn test_no_subscriber() {
    let robot = Robot::new();
    robot.sink.set_subscriber_count(0);
    let keys = DummyKeySource::new();
    let input_loop = robot.input_loop(&TeleopConfig::default());
    let is_running = input_loop.shutdown_handle();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_secs(5)).await;
        is_running.store(false, Ordering::Relaxed);
    });
    let err = input_loop.run(&keys).await.unwrap_err();
    assert!(matches!(err, Error::NoSubscriber { .. }));
    assert!(robot
        .sink
        .commands()
        .iter()
        .all(|command| command.twist.is_zero()));
}

#[tokio::test(start_paused = true)]
async fn test_external_shutdown() {
    let robot = Robot::new();
    let keys = DummyKeySource::new();
    let input_loop = robot.input_loop(&TeleopConfig {
        key_timeout: 0.5,
        ..Default::default()
    });
    let is_running = input_loop.shutdown_handle();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_secs(2)).await;
        is_running.store(false, Ordering::Relaxed);
    });
    input_loop.run(&keys).await.unwrap();
    assert!(robot.sink.last_command().unwrap().twist.is_zero());
}

#[tokio::test(start_paused = true)]
async fn test_send_failure_ends_loop() {
    let robot = Robot::new();
    robot.sink.set_fail_on_send(true);
    let keys = DummyKeySource::from_keys("i".chars());
    let err = robot
        .input_loop(&TeleopConfig::default())
        .run(&keys)
        .await
        .unwrap_err();
    assert!(matches!(err, Error::SendFailure(_)));
}

#[tokio::test(start_paused = true)]
async fn test_repeat_rate_keeps_publishing() {
    let robot = Robot::new();
    let keys = Arc::new(DummyKeySource::from_keys("l".chars()));
    let keys_cloned = keys.clone();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_secs(1)).await;
        keys_cloned.push('\x03');
    });
    let config = TeleopConfig {
        repeat_rate: 20.0,
        ..Default::default()
    };
    robot.input_loop(&config).run(&*keys).await.unwrap();

    let turning = robot
        .sink
        .commands()
        .iter()
        .filter(|c| (c.twist.angular.z + 1.0).abs() < 1e-9)
        .count();
    assert!(turning >= 15, "{turning}");
    assert!(robot.sink.last_command().unwrap().twist.is_zero());
}
