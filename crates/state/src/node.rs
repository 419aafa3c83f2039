//! Node-side root: every counterparty account the node has seen.

use crate::account::AccountState;
use crate::watermark::Watermark;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;
use tasknode_core::{Diagnostic, Projection, ProjectionConfig, UpdateOutcome};
use tasknode_messages::Message;
use tasknode_types::{AccountId, LedgerPosition};
use tracing::debug;

/// A node's view of all its counterparty accounts.
///
/// Accounts are created on the first accepted message that names them and
/// kept in first-reference order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeState {
    accounts: IndexMap<AccountId, AccountState>,
    watermark: Watermark,
}

impl NodeState {
    /// Create an empty node projection with default config.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty node projection.
    pub fn with_config(config: &ProjectionConfig) -> Self {
        Self {
            accounts: IndexMap::new(),
            watermark: Watermark::new(config),
        }
    }

    /// Look up an account without creating it.
    pub fn account(&self, account: &AccountId) -> Option<&AccountState> {
        self.accounts.get(account)
    }

    /// Accounts in first-reference order.
    pub fn accounts(&self) -> impl Iterator<Item = (&AccountId, &AccountState)> {
        self.accounts.iter()
    }

    /// Get the number of accounts.
    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    /// Check if no account has been referenced.
    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }

    /// Recently refused messages, oldest first.
    pub fn recent_diagnostics(&self) -> impl Iterator<Item = &Diagnostic> {
        self.watermark.recent_diagnostics()
    }

    fn account_entry(&mut self, account: &AccountId) -> &mut AccountState {
        self.accounts.entry(account.clone()).or_insert_with(|| {
            debug!(account = %account, "Tracking new account");
            AccountState::new()
        })
    }
}

impl Projection for NodeState {
    fn update(&mut self, message: &Message) -> UpdateOutcome {
        let outcome = self.watermark.admit(message);
        if outcome.is_accepted() {
            self.account_entry(message.account()).update(message);
        }
        outcome
    }

    fn latest_position(&self) -> LedgerPosition {
        self.watermark.latest()
    }
}

impl fmt::Display for NodeState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "NodeState(accounts={}, latest={})",
            self.accounts.len(),
            self.watermark.latest()
        )
    }
}
