//! Ledger-position watermark for root projections.
//!
//! The watermark is the coarse ordering guard: it admits only messages
//! strictly after everything accepted so far. Per-entity transition guards
//! live further down in the account, task, and rite state machines.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::VecDeque;
use tasknode_core::{Diagnostic, ProjectionConfig, UpdateOutcome};
use tasknode_messages::Message;
use tasknode_types::LedgerPosition;
use tracing::{debug, warn};

/// Tracks the latest accepted position and refuses anything not after it.
///
/// Refusals are returned to the caller as [`Diagnostic`]s, logged at `warn`,
/// and optionally kept in a bounded audit trail.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Watermark {
    /// Highest accepted (ledger, transaction) position.
    latest: LedgerPosition,
    /// Most recent refusals, oldest first.
    audit: VecDeque<Diagnostic>,
    /// Audit trail bound; zero disables it.
    audit_capacity: usize,
}

impl Default for Watermark {
    fn default() -> Self {
        Self::new(&ProjectionConfig::default())
    }
}

impl Watermark {
    /// Create a watermark from projection config.
    pub fn new(config: &ProjectionConfig) -> Self {
        let audit_capacity = if config.audit_dropped {
            config.audit_capacity
        } else {
            0
        };
        Self {
            latest: config.initial_watermark,
            audit: VecDeque::with_capacity(audit_capacity.min(64)),
            audit_capacity,
        }
    }

    /// Get the highest accepted position.
    pub fn latest(&self) -> LedgerPosition {
        self.latest
    }

    /// Admit or refuse a message.
    ///
    /// Admission advances the watermark to the message position.
    pub fn admit(&mut self, message: &Message) -> UpdateOutcome {
        let position = message.position();

        match position.cmp(&self.latest) {
            Ordering::Greater => {
                debug!(
                    hash = %message.hash(),
                    from = %self.latest,
                    to = %position,
                    "Advancing ledger watermark"
                );
                self.latest = position;
                UpdateOutcome::Accepted
            }
            Ordering::Equal => self.refuse(Diagnostic::DuplicatePosition {
                hash: message.hash(),
                position,
            }),
            Ordering::Less => self.refuse(Diagnostic::OutOfOrder {
                hash: message.hash(),
                position,
                watermark: self.latest,
            }),
        }
    }

    fn refuse(&mut self, diagnostic: Diagnostic) -> UpdateOutcome {
        match &diagnostic {
            Diagnostic::DuplicatePosition { hash, position } => {
                warn!(hash = %hash, position = %position, "Duplicate ledger seq, dropping message");
            }
            Diagnostic::OutOfOrder {
                hash,
                position,
                watermark,
            } => {
                warn!(
                    hash = %hash,
                    position = %position,
                    watermark = %watermark,
                    "Out of order ledger seq, dropping message"
                );
            }
        }

        if self.audit_capacity > 0 {
            // A restored snapshot may hold more than the current capacity
            while self.audit.len() >= self.audit_capacity {
                self.audit.pop_front();
            }
            self.audit.push_back(diagnostic);
        }

        UpdateOutcome::Dropped(diagnostic)
    }

    /// Recent refusals, oldest first.
    pub fn recent_diagnostics(&self) -> impl Iterator<Item = &Diagnostic> {
        self.audit.iter()
    }
}
