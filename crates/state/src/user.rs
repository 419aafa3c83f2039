//! User-side root: a single node counterparty.

use crate::account::AccountState;
use crate::watermark::Watermark;
use serde::{Deserialize, Serialize};
use std::fmt;
use tasknode_core::{Diagnostic, Projection, ProjectionConfig, UpdateOutcome};
use tasknode_messages::Message;
use tasknode_types::LedgerPosition;

/// A user's view of the one node it works with.
///
/// Every accepted message lands on the single held account regardless of
/// the account id it carries.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserState {
    node_account: AccountState,
    watermark: Watermark,
}

impl UserState {
    /// Create an empty user projection with default config.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty user projection.
    pub fn with_config(config: &ProjectionConfig) -> Self {
        Self {
            node_account: AccountState::new(),
            watermark: Watermark::new(config),
        }
    }

    /// The node counterparty account.
    pub fn account(&self) -> &AccountState {
        &self.node_account
    }

    /// Recently refused messages, oldest first.
    pub fn recent_diagnostics(&self) -> impl Iterator<Item = &Diagnostic> {
        self.watermark.recent_diagnostics()
    }
}

impl Projection for UserState {
    fn update(&mut self, message: &Message) -> UpdateOutcome {
        let outcome = self.watermark.admit(message);
        if outcome.is_accepted() {
            self.node_account.update(message);
        }
        outcome
    }

    fn latest_position(&self) -> LedgerPosition {
        self.watermark.latest()
    }
}

impl fmt::Display for UserState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "UserState(status={}, latest={})",
            self.node_account.status(),
            self.watermark.latest()
        )
    }
}
