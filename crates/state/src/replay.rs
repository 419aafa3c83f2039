//! Batch replay of decoded message streams.

use crate::node::NodeState;
use crate::user::UserState;
use serde::{Deserialize, Serialize};
use std::fmt;
use tasknode_core::{Diagnostic, Projection, UpdateOutcome};
use tasknode_messages::Message;
use tracing::info;

/// Counts of what a replay did with each message.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReplayReport {
    pub accepted: usize,
    pub duplicates: usize,
    pub out_of_order: usize,
}

impl ReplayReport {
    /// Tally one outcome.
    pub fn record(&mut self, outcome: &UpdateOutcome) {
        match outcome {
            UpdateOutcome::Accepted => self.accepted += 1,
            UpdateOutcome::Dropped(Diagnostic::DuplicatePosition { .. }) => self.duplicates += 1,
            UpdateOutcome::Dropped(Diagnostic::OutOfOrder { .. }) => self.out_of_order += 1,
        }
    }

    /// Total messages seen.
    pub fn total(&self) -> usize {
        self.accepted + self.duplicates + self.out_of_order
    }

    /// Messages refused at the root.
    pub fn dropped(&self) -> usize {
        self.duplicates + self.out_of_order
    }
}

impl fmt::Display for ReplayReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "accepted={}, duplicates={}, out_of_order={}",
            self.accepted, self.duplicates, self.out_of_order
        )
    }
}

/// Fold every message into an existing projection.
pub fn replay_into<'a, P, I>(projection: &mut P, messages: I) -> ReplayReport
where
    P: Projection,
    I: IntoIterator<Item = &'a Message>,
{
    let mut report = ReplayReport::default();
    for message in messages {
        report.record(&projection.update(message));
    }

    info!(
        accepted = report.accepted,
        duplicates = report.duplicates,
        out_of_order = report.out_of_order,
        latest = %projection.latest_position(),
        "Replay complete"
    );
    report
}

/// Build a node projection from scratch.
pub fn replay_node<'a>(messages: impl IntoIterator<Item = &'a Message>) -> (NodeState, ReplayReport) {
    let mut node = NodeState::new();
    let report = replay_into(&mut node, messages);
    (node, report)
}

/// Build a user projection from scratch.
pub fn replay_user<'a>(messages: impl IntoIterator<Item = &'a Message>) -> (UserState, ReplayReport) {
    let mut user = UserState::new();
    let report = replay_into(&mut user, messages);
    (user, report)
}
