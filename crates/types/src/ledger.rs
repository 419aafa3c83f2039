//! Ledger ordering types.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Ledger sequence number (ledger index).
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct LedgerSeq(pub u64);

impl LedgerSeq {
    /// Get the previous ledger (returns None at zero).
    pub fn prev(self) -> Option<Self> {
        self.0.checked_sub(1).map(LedgerSeq)
    }
}

impl fmt::Display for LedgerSeq {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Ledger({})", self.0)
    }
}

/// Position of a transaction inside its ledger.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct TxnSeq(pub u64);

impl TxnSeq {
    /// Highest possible transaction position.
    pub const MAX: Self = TxnSeq(u64::MAX);
}

impl fmt::Display for TxnSeq {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Txn({})", self.0)
    }
}

/// A (ledger, transaction) pair that totally orders messages.
///
/// Ordering is lexicographic: ledger first, then transaction within the
/// ledger. The derived `Ord` relies on field declaration order.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct LedgerPosition {
    /// Ledger the transaction was included in.
    pub ledger_seq: LedgerSeq,
    /// Index of the transaction within that ledger.
    pub transaction_seq: TxnSeq,
}

impl LedgerPosition {
    /// Position before any real transaction.
    pub const GENESIS: Self = LedgerPosition {
        ledger_seq: LedgerSeq(0),
        transaction_seq: TxnSeq(0),
    };

    /// Create a position from raw sequence numbers.
    pub fn new(ledger_seq: u64, transaction_seq: u64) -> Self {
        Self {
            ledger_seq: LedgerSeq(ledger_seq),
            transaction_seq: TxnSeq(transaction_seq),
        }
    }

    /// The last position strictly before `ledger`.
    ///
    /// Saturates to `GENESIS` when `ledger` is zero.
    pub fn before_ledger(ledger: LedgerSeq) -> Self {
        match ledger.prev() {
            Some(prev) => Self {
                ledger_seq: prev,
                transaction_seq: TxnSeq::MAX,
            },
            None => Self::GENESIS,
        }
    }
}

impl fmt::Display for LedgerPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.ledger_seq.0, self.transaction_seq.0)
    }
}
