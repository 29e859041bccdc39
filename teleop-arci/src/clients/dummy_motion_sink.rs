use std::sync::{
    atomic::{AtomicBool, AtomicUsize, Ordering},
    Mutex,
};

use tracing::debug;

use crate::{error::Error, traits::MotionSink, TwistCommand};

/// Dummy MotionSink for debug or tests.
///
/// Every command sent is recorded and can be inspected with [`DummyMotionSink::commands`].
#[derive(Debug)]
pub struct DummyMotionSink {
    topic: String,
    subscribers: AtomicUsize,
    fail_on_send: AtomicBool,
    commands: Mutex<Vec<TwistCommand>>,
}

impl DummyMotionSink {
    /// Creates a new `DummyMotionSink` with a single attached subscriber.
    pub fn new(topic: impl Into<String>) -> Self {
        Self {
            topic: topic.into(),
            subscribers: AtomicUsize::new(1),
            fail_on_send: AtomicBool::new(false),
            commands: Mutex::new(Vec::new()),
        }
    }

    pub fn set_subscriber_count(&self, count: usize) {
        self.subscribers.store(count, Ordering::Relaxed);
    }

    /// Makes every following `send_command` fail with a connection error.
    pub fn set_fail_on_send(&self, fail: bool) {
        self.fail_on_send.store(fail, Ordering::Relaxed);
    }

    pub fn commands(&self) -> Vec<TwistCommand> {
        self.commands.lock().unwrap().clone()
    }

    pub fn last_command(&self) -> Option<TwistCommand> {
        self.commands.lock().unwrap().last().cloned()
    }

    pub fn num_commands(&self) -> usize {
        self.commands.lock().unwrap().len()
    }
}

impl Default for DummyMotionSink {
    fn default() -> Self {
        Self::new("cmd_vel")
    }
}

impl MotionSink for DummyMotionSink {
    fn topic(&self) -> &str {
        &self.topic
    }

    fn subscriber_count(&self) -> usize {
        self.subscribers.load(Ordering::Relaxed)
    }

    fn send_command(&self, command: &TwistCommand) -> Result<(), Error> {
        if self.fail_on_send.load(Ordering::Relaxed) {
            return Err(Error::Connection {
                message: format!("{} is not connected", self.topic),
            });
        }
        debug!(
            topic = %self.topic,
            linear = ?command.twist.linear,
            angular = ?command.twist.angular,
            "send_command"
        );
        self.commands.lock().unwrap().push(command.clone());
        Ok(())
    }
}
