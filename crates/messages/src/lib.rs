//! Typed protocol messages for the task node.
//!
//! Decoding from ledger transactions happens upstream; this crate defines the
//! shape the projection consumes:
//!
//! - [`Message`]: envelope with hash, direction, ledger position, owning account
//! - [`MessageBody`]: task-scoped or account-scoped payload
//! - [`TaskMessage`] / [`AccountMessage`]: the closed set of protocol variants

mod account;
mod envelope;
mod task;

pub use account::{
    AccountMessage, NodeBlacklist, NodeInitiationReward, NodeLogResponse, NodeWalletFunding,
    UserGDocContext, UserInitiationRite, UserLog, UserSweepAddress,
};
pub use envelope::{Message, MessageBody, MessageBuilder, MessageError};
pub use task::{
    NodeChallenge, NodeProposal, NodeReward, TaskMessage, UserAcceptance, UserChallengeResponse,
    UserCompletion, UserRefusal, UserRequest,
};
