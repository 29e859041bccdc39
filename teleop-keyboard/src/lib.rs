#![doc = include_str!("../README.md")]
#![cfg(unix)]
#![warn(missing_docs, rust_2018_idioms)]

use std::{
    io::{self, Read, Write},
    sync::{
        atomic::{AtomicBool, Ordering::Relaxed},
        Arc,
    },
};

use teleop_arci::{async_trait, Error, KeySource};
use termios::{tcsetattr, Termios};
use tracing::{debug, error, warn};

const STDIN_FD: i32 = 0;

fn decode_byte(b: u8) -> Option<char> {
    b.is_ascii().then_some(b as char)
}

fn raw_mode(termios: &Termios) -> Termios {
    let mut raw = *termios;
    raw.c_lflag &= !(termios::ICANON | termios::ECHO | termios::ISIG);
    raw.c_iflag &= !termios::ICRNL;
    raw.c_cc[termios::VMIN] = 1;
    raw.c_cc[termios::VTIME] = 0;
    raw
}

/// [`teleop_arci::KeySource`] implementation for the terminal.
pub struct KeyboardReader {
    receiver: flume::Receiver<char>,
    is_running: Arc<AtomicBool>,
    original: Termios,
}

impl std::fmt::Debug for KeyboardReader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KeyboardReader")
            .field("is_running", &self.is_running.load(Relaxed))
            .finish_non_exhaustive()
    }
}

impl KeyboardReader {
    /// Switches the terminal to key-at-a-time input and starts reading stdin.
    pub fn new() -> Result<Self, Error> {
        let original = Termios::from_fd(STDIN_FD)
            .map_err(|e| anyhow::anyhow!("failed to get terminal settings: {e}"))?;
        tcsetattr(STDIN_FD, termios::TCSANOW, &raw_mode(&original))
            .map_err(|e| anyhow::anyhow!("failed to set terminal settings: {e}"))?;
        io::stdout().lock().flush().map_err(anyhow::Error::from)?;

        let (sender, receiver) = flume::unbounded();
        let is_running = Arc::new(AtomicBool::new(true));
        let is_running_cloned = is_running.clone();
        // The thread stays blocked in `read` until the next byte arrives, so it
        // is detached rather than joined.
        std::thread::spawn(move || {
            let mut reader = io::stdin();
            while is_running_cloned.load(Relaxed) {
                let mut buffer = [0; 1];
                if let Err(e) = reader.read_exact(&mut buffer) {
                    error!("failed to read stdin: {e}");
                    break;
                }
                let Some(key) = decode_byte(buffer[0]) else {
                    debug!("non-ascii input: {}", buffer[0]);
                    continue;
                };
                if sender.send(key).is_err() {
                    break;
                }
            }
        });

        Ok(Self {
            receiver,
            is_running,
            original,
        })
    }

    /// Stops reading and restores the terminal settings.
    pub fn stop(&self) {
        if self.is_running.swap(false, Relaxed) {
            if let Err(e) = tcsetattr(STDIN_FD, termios::TCSANOW, &self.original) {
                warn!("failed to restore terminal settings: {e}");
            }
        }
    }
}

#[async_trait]
impl KeySource for KeyboardReader {
    async fn next_key(&self) -> Result<char, Error> {
        self.receiver
            .recv_async()
            .await
            .map_err(|_| Error::InputClosed)
    }
}

impl Drop for KeyboardReader {
    fn drop(&mut self) {
        self.stop();
    }
}
