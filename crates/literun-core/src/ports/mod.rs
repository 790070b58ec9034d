//! Ports - 抽象化レイヤー
//!
//! 外部（ファイルシステム、ホストランタイムへのチャネル、時刻、ID）への
//! インターフェースを trait として定義し、テストで差し替え可能にします。

pub mod artifact_store;
pub mod clock;
pub mod id_generator;
pub mod transport;

pub use self::artifact_store::ArtifactStore;
pub use self::clock::{Clock, FixedClock, SystemClock};
pub use self::id_generator::{IdGenerator, UlidGenerator};
pub use self::transport::{CommTransport, TransportError};
