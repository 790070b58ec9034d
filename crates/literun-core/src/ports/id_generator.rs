//! IdGenerator port - ID 生成の抽象化
//!
//! テスト容易性のために、trait として抽象化しています。
//!
//! # 実装
//! - **UlidGenerator**: ULID ベース（本番用）
//! - **SequentialIdGenerator**: 連番（impls、テスト用）

use crate::ports::Clock;
use ulid::Ulid;

/// IdGenerator は comm メッセージとセルの ID を生成
///
/// Cell ids must match `^[a-zA-Z0-9-_]+$` and be at most 64 chars; ULID
/// text (26 chars, Crockford base32) qualifies.
pub trait IdGenerator: Send + Sync {
    fn generate_comm_id(&self) -> Ulid;

    fn generate_cell_id(&self) -> String {
        self.generate_comm_id().to_string()
    }
}

/// UlidGenerator は ULID ベースの ID 生成器
///
/// Clock を使って現在時刻ベースの ULID を生成します。
pub struct UlidGenerator<C> {
    clock: C,
}

impl<C: Clock> UlidGenerator<C> {
    pub fn new(clock: C) -> Self {
        Self { clock }
    }
}

impl<C: Clock> IdGenerator for UlidGenerator<C> {
    fn generate_comm_id(&self) -> Ulid {
        let timestamp_ms = self.clock.now().timestamp_millis() as u64;
        Ulid::from_parts(timestamp_ms, rand::random())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::{FixedClock, SystemClock};
    use chrono::{TimeZone, Utc};

    #[test]
    fn ulid_generator_generates_unique_ids() {
        let id_gen = UlidGenerator::new(SystemClock);

        let id1 = id_gen.generate_comm_id();
        let id2 = id_gen.generate_comm_id();

        assert_ne!(id1, id2);
    }

    #[test]
    fn fixed_clock_pins_the_timestamp() {
        let fixed_time = Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap();
        let id_gen = UlidGenerator::new(FixedClock::new(fixed_time));

        let id1 = id_gen.generate_comm_id();
        let id2 = id_gen.generate_comm_id();

        // ランダム部分があるので ID は異なるが、timestamp 部分は同じ
        assert_ne!(id1, id2);
        assert_eq!(id1.timestamp_ms(), id2.timestamp_ms());
        assert_eq!(id1.timestamp_ms(), fixed_time.timestamp_millis() as u64);
    }

    #[test]
    fn cell_ids_fit_nbformat_pattern() {
        let id = UlidGenerator::new(SystemClock).generate_cell_id();
        assert!(!id.is_empty() && id.len() <= 64);
        assert!(id.chars().all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_'));
    }
}
