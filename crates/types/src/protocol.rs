//! Protocol-level classifiers shared by messages and state.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Direction of a message relative to the observer.
///
/// A node sees user messages as inbound and its own as outbound; a user
/// sees the reverse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    /// Sent by the counterparty to the observer.
    Inbound,
    /// Sent by the observer.
    Outbound,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Inbound => f.write_str("inbound"),
            Direction::Outbound => f.write_str("outbound"),
        }
    }
}

/// Whether a message pertains to a whole account or one task within it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Scope {
    /// Addressed to a single task.
    Task,
    /// Addressed to the account itself (including logs).
    Account,
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scope::Task => f.write_str("TASK"),
            Scope::Account => f.write_str("ACCOUNT"),
        }
    }
}
