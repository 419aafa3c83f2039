//! Per-task lifecycle state machine.

use crate::history::History;
use serde::{Deserialize, Serialize};
use std::fmt;
use tasknode_messages::{Message, MessageBody, TaskMessage};
use tasknode_types::PftAmount;
use tracing::debug;

/// Lifecycle status of a task.
///
/// ```text
/// INVALID → REQUESTED → PROPOSED → ACCEPTED → COMPLETED → CHALLENGED → RESPONDED → REWARDED
///                           │          │          │            │
///                           └──────────┴──────────┴────────────┴──→ REFUSED
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TaskStatus {
    #[default]
    Invalid,
    Requested,
    Proposed,
    Accepted,
    Refused,
    Completed,
    Challenged,
    Responded,
    Rewarded,
}

impl TaskStatus {
    /// Every status, in declaration order.
    pub const ALL: [TaskStatus; 9] = [
        TaskStatus::Invalid,
        TaskStatus::Requested,
        TaskStatus::Proposed,
        TaskStatus::Accepted,
        TaskStatus::Refused,
        TaskStatus::Completed,
        TaskStatus::Challenged,
        TaskStatus::Responded,
        TaskStatus::Rewarded,
    ];

    /// Status a message moves this task to, or `None` if the message is not
    /// legal from the current status.
    pub fn transition(self, message: &TaskMessage) -> Option<TaskStatus> {
        use TaskStatus::*;

        let (legal, target) = match message {
            TaskMessage::Request(_) => (self == Invalid, Requested),
            TaskMessage::Proposal(_) => (self == Requested, Proposed),
            TaskMessage::Acceptance(_) => (self == Proposed, Accepted),
            TaskMessage::Refusal(_) => (
                matches!(self, Proposed | Accepted | Completed | Challenged),
                Refused,
            ),
            TaskMessage::Completion(_) => (self == Accepted, Completed),
            TaskMessage::Challenge(_) => (self == Completed, Challenged),
            TaskMessage::ChallengeResponse(_) => (self == Challenged, Responded),
            TaskMessage::Reward(_) => (self == Responded, Rewarded),
        };

        legal.then_some(target)
    }

    /// Check if no further transition is possible.
    pub fn is_terminal(self) -> bool {
        matches!(self, TaskStatus::Refused | TaskStatus::Rewarded)
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TaskStatus::Invalid => "INVALID",
            TaskStatus::Requested => "REQUESTED",
            TaskStatus::Proposed => "PROPOSED",
            TaskStatus::Accepted => "ACCEPTED",
            TaskStatus::Refused => "REFUSED",
            TaskStatus::Completed => "COMPLETED",
            TaskStatus::Challenged => "CHALLENGED",
            TaskStatus::Responded => "RESPONDED",
            TaskStatus::Rewarded => "REWARDED",
        };
        f.write_str(name)
    }
}

/// Derived state of one task.
///
/// Amounts are written only by the transition that introduces them, so each
/// is set at most once.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskState {
    status: TaskStatus,
    pft_offered: Option<PftAmount>,
    pft_rewarded: Option<PftAmount>,
    history: History,
}

impl TaskState {
    /// Create a task in the `INVALID` status.
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold a message routed to this task.
    ///
    /// The message is always recorded. The status only changes when the
    /// message is legal from the current status; anything else, including an
    /// account-scoped message, is absorbed.
    pub fn update(&mut self, message: &Message) {
        self.history.record(message);

        let MessageBody::Task {
            task_id,
            message: task_message,
        } = message.body()
        else {
            return;
        };

        let Some(next) = self.status.transition(task_message) else {
            debug!(
                task = %task_id,
                status = %self.status,
                message = task_message.type_name(),
                "Ignoring illegal task transition"
            );
            return;
        };

        match task_message {
            TaskMessage::Proposal(p) => self.pft_offered = Some(p.pft_offer),
            TaskMessage::Reward(r) => self.pft_rewarded = Some(r.amount_pft),
            _ => {}
        }
        self.status = next;
    }

    /// Get the current status.
    pub fn status(&self) -> TaskStatus {
        self.status
    }

    /// PFT offered by the accepted proposal.
    pub fn pft_offered(&self) -> Option<PftAmount> {
        self.pft_offered
    }

    /// PFT paid by the reward.
    pub fn pft_rewarded(&self) -> Option<PftAmount> {
        self.pft_rewarded
    }

    /// Every message routed to this task.
    pub fn history(&self) -> &History {
        &self.history
    }

    /// Render the task history.
    pub fn data(&self) -> String {
        self.history.render()
    }
}

impl fmt::Display for TaskState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TaskState(status={}", self.status)?;
        if let Some(offered) = self.pft_offered {
            write!(f, ", pft_offered={offered}")?;
        }
        if let Some(rewarded) = self.pft_rewarded {
            write!(f, ", pft_rewarded={rewarded}")?;
        }
        write!(f, ")")
    }
}
