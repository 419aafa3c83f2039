//! Task-scoped message payloads.
//!
//! These drive a single task through its lifecycle:
//! request, proposal, acceptance or refusal, completion, challenge,
//! challenge response, and reward.

use serde::{Deserialize, Serialize};
use tasknode_types::PftAmount;

/// User asks the node for a new task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRequest {
    /// Free-form request text.
    pub request: String,
}

/// Node proposes a task with an offered reward.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeProposal {
    /// Proposed task description.
    pub proposal: String,
    /// PFT the node offers for completion.
    pub pft_offer: PftAmount,
}

/// User accepts a proposed task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserAcceptance {
    pub message: String,
}

/// User refuses a task at any point before the reward.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRefusal {
    pub reason: String,
}

/// User reports the task complete.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserCompletion {
    /// Completion justification or evidence.
    pub completion: String,
}

/// Node challenges a completion for verification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeChallenge {
    pub challenge: String,
}

/// User answers a challenge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserChallengeResponse {
    pub response: String,
}

/// Node pays out the task reward.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeReward {
    /// Reward note.
    pub message: String,
    /// PFT actually paid.
    pub amount_pft: PftAmount,
}

/// All task-scoped message variants.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TaskMessage {
    Request(UserRequest),
    Proposal(NodeProposal),
    Acceptance(UserAcceptance),
    Refusal(UserRefusal),
    Completion(UserCompletion),
    Challenge(NodeChallenge),
    ChallengeResponse(UserChallengeResponse),
    Reward(NodeReward),
}

impl TaskMessage {
    /// Get a human-readable name for this message type.
    pub fn type_name(&self) -> &'static str {
        match self {
            TaskMessage::Request(_) => "UserRequest",
            TaskMessage::Proposal(_) => "NodeProposal",
            TaskMessage::Acceptance(_) => "UserAcceptance",
            TaskMessage::Refusal(_) => "UserRefusal",
            TaskMessage::Completion(_) => "UserCompletion",
            TaskMessage::Challenge(_) => "NodeChallenge",
            TaskMessage::ChallengeResponse(_) => "UserChallengeResponse",
            TaskMessage::Reward(_) => "NodeReward",
        }
    }

    /// Check if this message is sent by the node (as opposed to the user).
    pub fn is_from_node(&self) -> bool {
        matches!(
            self,
            TaskMessage::Proposal(_) | TaskMessage::Challenge(_) | TaskMessage::Reward(_)
        )
    }
}

impl From<UserRequest> for TaskMessage {
    fn from(m: UserRequest) -> Self {
        TaskMessage::Request(m)
    }
}

impl From<NodeProposal> for TaskMessage {
    fn from(m: NodeProposal) -> Self {
        TaskMessage::Proposal(m)
    }
}

impl From<UserAcceptance> for TaskMessage {
    fn from(m: UserAcceptance) -> Self {
        TaskMessage::Acceptance(m)
    }
}

impl From<UserRefusal> for TaskMessage {
    fn from(m: UserRefusal) -> Self {
        TaskMessage::Refusal(m)
    }
}

impl From<UserCompletion> for TaskMessage {
    fn from(m: UserCompletion) -> Self {
        TaskMessage::Completion(m)
    }
}

impl From<NodeChallenge> for TaskMessage {
    fn from(m: NodeChallenge) -> Self {
        TaskMessage::Challenge(m)
    }
}

impl From<UserChallengeResponse> for TaskMessage {
    fn from(m: UserChallengeResponse) -> Self {
        TaskMessage::ChallengeResponse(m)
    }
}

impl From<NodeReward> for TaskMessage {
    fn from(m: NodeReward) -> Self {
        TaskMessage::Reward(m)
    }
}
