//! SequentialIdGenerator - 決定的な ID（テスト用）

use crate::ports::IdGenerator;
use std::sync::atomic::{AtomicU64, Ordering};
use ulid::Ulid;

#[derive(Debug, Default)]
pub struct SequentialIdGenerator {
    next: AtomicU64,
}

impl SequentialIdGenerator {
    pub fn new() -> Self {
        Self::default()
    }
}

impl IdGenerator for SequentialIdGenerator {
    fn generate_comm_id(&self) -> Ulid {
        let n = self.next.fetch_add(1, Ordering::Relaxed);
        Ulid::from_parts(0, u128::from(n))
    }

    fn generate_cell_id(&self) -> String {
        format!("cell-{}", self.next.fetch_add(1, Ordering::Relaxed))
    }
}
