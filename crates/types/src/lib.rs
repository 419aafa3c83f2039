//! Core types for the task node ledger projection.
//!
//! Identifiers, ledger ordering, and the protocol classifiers that every
//! other crate in the workspace builds on.

mod identifiers;
mod ledger;
mod protocol;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use identifiers::{AccountId, IdentifierError, MessageId, TaskId, TxHash};
pub use ledger::{LedgerPosition, LedgerSeq, TxnSeq};
pub use protocol::{Direction, Scope};

/// PFT token amount as recorded in messages.
///
/// Amounts are carried verbatim; the projection never does arithmetic on them.
pub type PftAmount = rust_decimal::Decimal;
