//! CommMessage - transport に渡すエンベロープ

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ulid::Ulid;

/// Default comm target the runtime extension listens on.
pub const DEFAULT_TARGET_NAME: &str = "notebook-runner";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommData {
    pub text: String,
}

/// One message on the one-way channel. Nothing ever comes back for it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommMessage {
    pub comm_id: Ulid,
    pub target_name: String,
    pub data: CommData,
    pub sent_at: DateTime<Utc>,
}
