//! RecordingTransport - テスト用の transport
//!
//! Keeps every message it is handed. Can be switched to fail so callers can
//! observe how local transport failures propagate.

use crate::domain::CommMessage;
use crate::ports::{CommTransport, TransportError};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

#[derive(Debug, Clone, Default)]
pub struct RecordingTransport {
    sent: Arc<Mutex<Vec<CommMessage>>>,
    closed: Arc<AtomicBool>,
}

impl RecordingTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every later `send` fails with `TransportError::Closed`.
    pub fn close(&self) {
        self.closed.store(true, Ordering::SeqCst);
    }

    pub fn sent(&self) -> Vec<CommMessage> {
        self.sent.lock().map(|sent| sent.clone()).unwrap_or_default()
    }

    pub fn texts(&self) -> Vec<String> {
        self.sent().into_iter().map(|m| m.data.text).collect()
    }
}

impl CommTransport for RecordingTransport {
    fn send(&self, message: CommMessage) -> Result<(), TransportError> {
        if self.closed.load(Ordering::SeqCst) {
            return Err(TransportError::Closed);
        }
        self.sent
            .lock()
            .map_err(|_| TransportError::Closed)?
            .push(message);
        Ok(())
    }
}
