//! App - アプリケーション層
//!
//! ports を組み合わせて staging パイプラインを実装します。
//!
//! # 主要コンポーネント
//! - **StagerBuilder**: 構築とワイヤリング（起動時検証）
//! - **NotebookStager**: セル注入 → 書き込み → 実行依頼
//! - **CommandChannel**: 命令のエンコードと一方向送信

pub mod builder;
pub mod command_channel;
pub mod stager;

pub use self::builder::{BuildError, StagerBuilder};
pub use self::command_channel::CommandChannel;
pub use self::stager::{NotebookStager, StagedNotebook};
