//! JsonLinesTransport - 1 メッセージ = 1 行の JSON

use crate::domain::CommMessage;
use crate::ports::{CommTransport, TransportError};
use std::io::Write;
use std::sync::Mutex;

/// Writes each message as one JSON line and flushes it right away.
pub struct JsonLinesTransport<W> {
    out: Mutex<W>,
}

impl<W: Write + Send> JsonLinesTransport<W> {
    pub fn new(out: W) -> Self {
        Self {
            out: Mutex::new(out),
        }
    }

    pub fn into_inner(self) -> W {
        match self.out.into_inner() {
            Ok(out) => out,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}

impl<W: Write + Send> CommTransport for JsonLinesTransport<W> {
    fn send(&self, message: CommMessage) -> Result<(), TransportError> {
        let mut line = serde_json::to_vec(&message)?;
        line.push(b'\n');
        let mut out = self.out.lock().map_err(|_| TransportError::Closed)?;
        out.write_all(&line)?;
        out.flush()?;
        Ok(())
    }
}
