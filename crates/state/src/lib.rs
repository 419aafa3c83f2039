//! Deterministic state projection for the task node protocol.
//!
//! Two roots fold an ordered stream of ledger messages into derived state:
//!
//! - [`NodeState`]: a node's view of every counterparty account
//! - [`UserState`]: a user's view of its single node counterparty
//!
//! Each root guards its input with a [`Watermark`] and routes accepted
//! messages to an [`AccountState`], which in turn owns per-task
//! [`TaskState`]s and per-log [`LogState`]s.
//!
//! ```text
//! Message ──→ Watermark ──→ AccountState ──┬──→ TaskState
//!               │                          └──→ LogState
//!               └── Dropped(Diagnostic)
//! ```
//!
//! All state is plain owned data. There is no I/O, no async, and no
//! interior mutability; replaying the same messages always yields the same
//! state.

mod account;
mod history;
mod log;
mod node;
mod replay;
mod task;
mod user;
mod watermark;

pub use account::{AccountState, AccountStatus, RiteStatus};
pub use history::{History, HistoryEntry};
pub use log::{LogState, LogStatus};
pub use node::NodeState;
pub use replay::{replay_into, replay_node, replay_user, ReplayReport};
pub use task::{TaskState, TaskStatus};
pub use user::UserState;
pub use watermark::Watermark;

// Re-exported so callers can drive roots without naming the core crate.
pub use tasknode_core::{Diagnostic, Projection, ProjectionConfig, UpdateOutcome};
