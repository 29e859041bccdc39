use std::sync::Mutex;

use async_trait::async_trait;
use tracing::debug;

use crate::{error::Error, traits::KeySource};

/// Dummy KeySource for debug or tests.
///
/// Keys pushed with [`DummyKeySource::push`] are returned in order. Once the
/// source is [closed](DummyKeySource::close) and drained, `next_key` returns
/// [`Error::InputClosed`]; until then it waits for more keys.
#[derive(Debug)]
pub struct DummyKeySource {
    sender: Mutex<Option<flume::Sender<char>>>,
    receiver: flume::Receiver<char>,
}

impl DummyKeySource {
    pub fn new() -> Self {
        let (sender, receiver) = flume::unbounded();
        Self {
            sender: Mutex::new(Some(sender)),
            receiver,
        }
    }

    pub fn from_keys(keys: impl IntoIterator<Item = char>) -> Self {
        let source = Self::new();
        for key in keys {
            source.push(key);
        }
        source
    }

    pub fn push(&self, key: char) {
        if let Some(sender) = &*self.sender.lock().unwrap() {
            // the receiver is owned by self, so this never fails
            let _ = sender.send(key);
        }
    }

    pub fn close(&self) {
        self.sender.lock().unwrap().take();
    }
}

impl Default for DummyKeySource {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl KeySource for DummyKeySource {
    async fn next_key(&self) -> Result<char, Error> {
        match self.receiver.recv_async().await {
            Ok(key) => {
                debug!("key {key:?}");
                Ok(key)
            }
            Err(flume::RecvError::Disconnected) => Err(Error::InputClosed),
        }
    }
}
