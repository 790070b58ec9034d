//! CommTransport port - ホストランタイムへの一方向チャネル
//!
//! # 実装
//! - **RecordingTransport**: テスト用（送信内容を保持）
//! - **ChannelTransport**: tokio mpsc（CLI が stdout へ転送）
//! - **JsonLinesTransport**: 任意の `Write` へ JSON Lines で書き出し

use crate::domain::CommMessage;

/// Local failure to hand a message over. Remote outcomes never show up here.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("comm channel is closed")]
    Closed,

    #[error("comm write failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("comm encode failed: {0}")]
    Encode(#[from] serde_json::Error),
}

/// CommTransport は fire-and-forget の送信口
///
/// # 契約
/// - `send` は受信側を待たない（ブロックしない）
/// - 1 回の呼び出しで 1 メッセージ、リトライなし
pub trait CommTransport: Send + Sync {
    fn send(&self, message: CommMessage) -> Result<(), TransportError>;
}

impl<T: CommTransport + ?Sized> CommTransport for std::sync::Arc<T> {
    fn send(&self, message: CommMessage) -> Result<(), TransportError> {
        (**self).send(message)
    }
}

impl<T: CommTransport + ?Sized> CommTransport for Box<T> {
    fn send(&self, message: CommMessage) -> Result<(), TransportError> {
        (**self).send(message)
    }
}
