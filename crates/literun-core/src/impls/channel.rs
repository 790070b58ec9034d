//! ChannelTransport - tokio mpsc を使った一方向チャネル
//!
//! # 学習ポイント
//! - `UnboundedSender::send` は async ではないので同期コードから呼べる
//! - 受信側（ホストへの転送タスク）を待たない = fire-and-forget

use crate::domain::CommMessage;
use crate::ports::{CommTransport, TransportError};
use tokio::sync::mpsc;

pub struct ChannelTransport {
    tx: mpsc::UnboundedSender<CommMessage>,
}

impl ChannelTransport {
    /// Transport plus the receiving end for whoever forwards to the host.
    pub fn new() -> (Self, mpsc::UnboundedReceiver<CommMessage>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }
}

impl CommTransport for ChannelTransport {
    fn send(&self, message: CommMessage) -> Result<(), TransportError> {
        self.tx.send(message).map_err(|_| TransportError::Closed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::CommData;
    use chrono::Utc;
    use ulid::Ulid;

    fn message(text: &str) -> CommMessage {
        CommMessage {
            comm_id: Ulid::new(),
            target_name: "notebook-runner".into(),
            data: CommData { text: text.into() },
            sent_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn delivers_in_fifo_order() {
        let (transport, mut rx) = ChannelTransport::new();
        transport.send(message("a")).unwrap();
        transport.send(message("b")).unwrap();

        assert_eq!(rx.recv().await.unwrap().data.text, "a");
        assert_eq!(rx.recv().await.unwrap().data.text, "b");
    }

    #[tokio::test]
    async fn send_does_not_wait_for_receiver() {
        let (transport, mut rx) = ChannelTransport::new();
        for i in 0..100 {
            transport.send(message(&i.to_string())).unwrap();
        }
        drop(transport);

        let mut count = 0;
        while rx.recv().await.is_some() {
            count += 1;
        }
        assert_eq!(count, 100);
    }

    #[test]
    fn dropped_receiver_is_closed() {
        let (transport, rx) = ChannelTransport::new();
        drop(rx);
        let err = transport.send(message("x")).unwrap_err();
        assert!(matches!(err, TransportError::Closed));
    }
}
