//! CommandChannel - 命令のエンコードと送信
//!
//! One-way: `send` hands exactly one message to the transport and returns.
//! The only error it can report is a local transport or validation failure;
//! whatever the runtime does with the command is never observed here.

use std::fmt::Display;
use std::sync::Arc;

use crate::domain::{CommData, CommMessage, Command, SharedPath, StageError, WireFormat};
use crate::ports::{Clock, CommTransport, IdGenerator};

pub struct CommandChannel {
    transport: Box<dyn CommTransport>,
    wire: WireFormat,
    target_name: String,
    ids: Arc<dyn IdGenerator>,
    clock: Arc<dyn Clock>,
}

impl CommandChannel {
    pub fn new(
        transport: Box<dyn CommTransport>,
        wire: WireFormat,
        target_name: impl Into<String>,
        ids: Arc<dyn IdGenerator>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            transport,
            wire,
            target_name: target_name.into(),
            ids,
            clock,
        }
    }

    pub fn wire(&self) -> &WireFormat {
        &self.wire
    }

    /// Encode `command` and emit it. Ambiguous commands are never sent.
    pub fn send(&self, command: &Command) -> Result<(), StageError> {
        self.wire.validate(command)?;
        let message = CommMessage {
            comm_id: self.ids.generate_comm_id(),
            target_name: self.target_name.clone(),
            data: CommData {
                text: self.wire.encode(command),
            },
            sent_at: self.clock.now(),
        };
        tracing::debug!(
            operation = command.operation(),
            comm_id = %message.comm_id,
            target = %self.target_name,
            "sending command"
        );
        self.transport.send(message)?;
        Ok(())
    }

    /// `send` with keyword parameters, kept in the given order.
    pub fn send_op<K, V>(
        &self,
        operation: &str,
        params: impl IntoIterator<Item = (K, V)>,
    ) -> Result<(), StageError>
    where
        K: Into<String>,
        V: Display,
    {
        let command = params
            .into_iter()
            .fold(Command::new(operation), |cmd, (k, v)| cmd.param(k, v));
        self.send(&command)
    }

    pub fn run_notebook(&self, path: &SharedPath) -> Result<(), StageError> {
        self.send(&Command::run_notebook(path))
    }
}
