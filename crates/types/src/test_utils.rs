//! Deterministic fixtures for tests.

use crate::{AccountId, MessageId, TaskId, TxHash};

/// Account `rTest<n>`.
pub fn test_account(n: u32) -> AccountId {
    AccountId::new(format!("rTest{n}"))
}

/// Task `task-<n>`.
pub fn test_task(n: u32) -> TaskId {
    TaskId::new(format!("task-{n}"))
}

/// Log message id `log-<n>`.
pub fn test_message_id(n: u32) -> MessageId {
    MessageId::new(format!("log-{n}"))
}

/// Hash with `n` in the leading bytes, so distinct `n` give distinct hashes.
pub fn test_hash(n: u64) -> TxHash {
    let mut bytes = [0u8; 32];
    bytes[..8].copy_from_slice(&n.to_be_bytes());
    TxHash(bytes)
}
