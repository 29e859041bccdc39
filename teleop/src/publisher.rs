use std::{
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc,
    },
    time::Duration,
};

use teleop_arci::{MotionSink, TwistCommand};
use tokio::{sync::watch, task::JoinHandle};
use tracing::{debug, error, info};

use crate::{CommandState, Error};

const SUBSCRIBER_CHECK_INTERVAL: Duration = Duration::from_millis(500);
const SUBSCRIBER_NOTICE_EVERY: usize = 5;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PublisherConfig {
    /// 0 publishes only when the state changes.
    pub repeat_rate: f64,
    pub stamped: bool,
    pub frame_id: String,
}

impl PublisherConfig {
    /// Maximum time between two commands, `None` in publish-on-change mode.
    pub fn period(&self) -> Option<Duration> {
        (self.repeat_rate > 0.0).then(|| Duration::from_secs_f64(1.0 / self.repeat_rate))
    }

    fn command(&self, state: &CommandState) -> TwistCommand {
        let twist = state.to_twist();
        if self.stamped {
            TwistCommand::stamped(twist, self.frame_id.clone())
        } else {
            TwistCommand::unstamped(twist)
        }
    }
}

/// Sends the latest [`CommandState`] to a [`MotionSink`] from a background task.
///
/// Updates are coalesced: the task only ever sees the most recent state, and
/// sends it when woken by an update or, if `repeat_rate` is positive, when the
/// repeat period elapses. The last command sent is always a zero command.
pub struct CommandPublisher<M>
where
    M: MotionSink + 'static,
{
    sink: Arc<M>,
    sender: watch::Sender<CommandState>,
    done: Arc<AtomicBool>,
    handle: JoinHandle<Result<(), Error>>,
}

impl<M> std::fmt::Debug for CommandPublisher<M>
where
    M: MotionSink + 'static,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CommandPublisher")
            .field("topic", &self.sink.topic())
            .field("state", &*self.sender.borrow())
            .field("done", &self.done.load(Ordering::Relaxed))
            .finish()
    }
}

impl<M> CommandPublisher<M>
where
    M: MotionSink + 'static,
{
    /// Starts the publishing task. Must be called within a tokio runtime.
    pub fn spawn(sink: Arc<M>, config: PublisherConfig) -> Self {
        let (sender, receiver) = watch::channel(CommandState::zero());
        let done = Arc::new(AtomicBool::new(false));
        let handle = tokio::spawn(publish_loop(sink.clone(), receiver, done.clone(), config));
        Self {
            sink,
            sender,
            done,
            handle,
        }
    }

    /// Replaces the state and wakes the publishing task. Never blocks.
    pub fn update(&self, state: CommandState) {
        self.sender.send_replace(state);
    }

    /// Waits until at least one consumer is attached to the sink.
    ///
    /// Fails with [`Error::NoSubscriber`] if `is_running` is cleared first.
    pub async fn wait_for_subscribers(&self, is_running: &AtomicBool) -> Result<(), Error> {
        let mut i = 0;
        while is_running.load(Ordering::Relaxed) && self.sink.subscriber_count() == 0 {
            if i == SUBSCRIBER_NOTICE_EVERY - 1 {
                info!(
                    "Waiting for subscriber to connect to {}",
                    self.sink.topic()
                );
            }
            tokio::time::sleep(SUBSCRIBER_CHECK_INTERVAL).await;
            i = (i + 1) % SUBSCRIBER_NOTICE_EVERY;
        }
        if !is_running.load(Ordering::Relaxed) {
            return Err(Error::NoSubscriber {
                topic: self.sink.topic().to_owned(),
            });
        }
        Ok(())
    }

    /// Returns true if the task has exited, which only happens before
    /// [`CommandPublisher::stop`] when a send failed.
    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }

    /// Stops the task after it has sent a final zero command.
    pub async fn stop(self) -> Result<(), Error> {
        self.done.store(true, Ordering::Release);
        self.update(CommandState::zero());
        match self.handle.await {
            Ok(result) => result,
            Err(e) => {
                error!("publisher task failed: {e}");
                Err(Error::PublisherTerminated)
            }
        }
    }
}

async fn wait_for_update(
    receiver: &mut watch::Receiver<CommandState>,
    period: Option<Duration>,
) -> bool {
    match period {
        Some(period) => tokio::select! {
            changed = receiver.changed() => changed.is_ok(),
            _ = tokio::time::sleep(period) => true,
        },
        None => receiver.changed().await.is_ok(),
    }
}

async fn publish_loop<M>(
    sink: Arc<M>,
    mut receiver: watch::Receiver<CommandState>,
    done: Arc<AtomicBool>,
    config: PublisherConfig,
) -> Result<(), Error>
where
    M: MotionSink,
{
    let period = config.period();
    let mut result = Ok(());
    while !done.load(Ordering::Acquire) {
        if !wait_for_update(&mut receiver, period).await {
            debug!("command sender dropped");
            break;
        }
        let state = *receiver.borrow_and_update();
        debug!(?state, "publish");
        if let Err(e) = sink.send_command(&config.command(&state)) {
            error!("failed to send command to {}: {e}", sink.topic());
            result = Err(Error::SendFailure(e));
            break;
        }
    }

    let stop = config.command(&CommandState::zero());
    if let Err(e) = sink.send_command(&stop) {
        error!("failed to send stop command to {}: {e}", sink.topic());
        if result.is_ok() {
            result = Err(Error::SendFailure(e));
        }
    }
    result
}
