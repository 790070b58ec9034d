//! Impls - ports の実装
//!
//! # 含まれる実装
//! - **ChannelTransport**: tokio mpsc（本番用、CLI が stdout へ転送）
//! - **JsonLinesTransport**: 任意の Write へ 1 行ずつ（CLI の stdout 出力）
//! - **RecordingTransport**: テスト用
//! - **LocalArtifactStore**: std::fs
//! - **SequentialIdGenerator**: 決定的な ID（テスト用）

pub mod channel;
pub mod json_lines;
pub mod local_store;
pub mod recording;
pub mod sequential_ids;

pub use self::channel::ChannelTransport;
pub use self::json_lines::JsonLinesTransport;
pub use self::local_store::LocalArtifactStore;
pub use self::recording::RecordingTransport;
pub use self::sequential_ids::SequentialIdGenerator;
