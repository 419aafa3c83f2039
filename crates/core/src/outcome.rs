//! Outcomes and diagnostics returned by root projections.

use serde::{Deserialize, Serialize};
use std::fmt;
use tasknode_types::{LedgerPosition, TxHash};

/// Why a root projection refused a message.
///
/// These are the only observable drops. Illegal transitions inside an
/// account are absorbed into history, and messages for blacklisted accounts
/// vanish without a diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Diagnostic {
    /// Message position equals the watermark.
    DuplicatePosition {
        hash: TxHash,
        position: LedgerPosition,
    },

    /// Message position is below the watermark.
    OutOfOrder {
        hash: TxHash,
        position: LedgerPosition,
        watermark: LedgerPosition,
    },
}

impl Diagnostic {
    /// Hash of the refused message.
    pub fn hash(&self) -> TxHash {
        match self {
            Diagnostic::DuplicatePosition { hash, .. } | Diagnostic::OutOfOrder { hash, .. } => {
                *hash
            }
        }
    }

    /// Position of the refused message.
    pub fn position(&self) -> LedgerPosition {
        match self {
            Diagnostic::DuplicatePosition { position, .. }
            | Diagnostic::OutOfOrder { position, .. } => *position,
        }
    }

    /// Check if this is a duplicate delivery.
    pub fn is_duplicate(&self) -> bool {
        matches!(self, Diagnostic::DuplicatePosition { .. })
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::DuplicatePosition { hash, position } => {
                write!(f, "duplicate ledger seq {position} for msg {hash}")
            }
            Diagnostic::OutOfOrder {
                hash,
                position,
                watermark,
            } => write!(
                f,
                "out of order ledger seq {position} (latest {watermark}) for msg {hash}"
            ),
        }
    }
}

/// Result of folding one message into a root projection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UpdateOutcome {
    /// Watermark advanced and the message was routed to its account.
    ///
    /// The account may still have ignored it (blacklisted account, illegal
    /// transition); that is not observable here.
    Accepted,

    /// Refused at the root; no account saw the message.
    Dropped(Diagnostic),
}

impl UpdateOutcome {
    /// Check if the message passed the ordering check.
    pub fn is_accepted(&self) -> bool {
        matches!(self, UpdateOutcome::Accepted)
    }

    /// Get the diagnostic, for dropped messages.
    pub fn diagnostic(&self) -> Option<&Diagnostic> {
        match self {
            UpdateOutcome::Accepted => None,
            UpdateOutcome::Dropped(d) => Some(d),
        }
    }
}
