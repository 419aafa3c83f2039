//! Account-scoped message payloads.

use serde::{Deserialize, Serialize};
use tasknode_types::{MessageId, PftAmount};

/// User links the context document describing their goals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserGDocContext {
    pub gdoc_context_link: String,
}

/// User starts the initiation rite.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserInitiationRite {
    pub rite_text: String,
}

/// User writes a log entry for the node to answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserLog {
    pub message_id: MessageId,
    pub message: String,
}

/// Node answers a user log entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeLogResponse {
    pub message_id: MessageId,
    pub message: String,
}

/// Node funds the user's wallet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeWalletFunding {
    pub amount_pft: PftAmount,
}

/// Node rewards a finished initiation rite.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeInitiationReward {
    pub message: String,
    pub amount_pft: PftAmount,
}

/// User designates where rewards are swept to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserSweepAddress {
    pub sweep_address: String,
}

/// Node blacklists the user's account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeBlacklist {
    pub reason: String,
}

/// All account-scoped message variants.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AccountMessage {
    GDocContext(UserGDocContext),
    InitiationRite(UserInitiationRite),
    Log(UserLog),
    LogResponse(NodeLogResponse),
    WalletFunding(NodeWalletFunding),
    InitiationReward(NodeInitiationReward),
    SweepAddress(UserSweepAddress),
    Blacklist(NodeBlacklist),
}

impl AccountMessage {
    /// Get a human-readable name for this message type.
    pub fn type_name(&self) -> &'static str {
        match self {
            AccountMessage::GDocContext(_) => "UserGDocContext",
            AccountMessage::InitiationRite(_) => "UserInitiationRite",
            AccountMessage::Log(_) => "UserLog",
            AccountMessage::LogResponse(_) => "NodeLogResponse",
            AccountMessage::WalletFunding(_) => "NodeWalletFunding",
            AccountMessage::InitiationReward(_) => "NodeInitiationReward",
            AccountMessage::SweepAddress(_) => "UserSweepAddress",
            AccountMessage::Blacklist(_) => "NodeBlacklist",
        }
    }

    /// Check if this is a log request or response.
    pub fn is_log(&self) -> bool {
        matches!(self, AccountMessage::Log(_) | AccountMessage::LogResponse(_))
    }

    /// The log identifier, for log requests and responses.
    pub fn message_id(&self) -> Option<&MessageId> {
        match self {
            AccountMessage::Log(m) => Some(&m.message_id),
            AccountMessage::LogResponse(m) => Some(&m.message_id),
            _ => None,
        }
    }
}

impl From<UserGDocContext> for AccountMessage {
    fn from(m: UserGDocContext) -> Self {
        AccountMessage::GDocContext(m)
    }
}

impl From<UserInitiationRite> for AccountMessage {
    fn from(m: UserInitiationRite) -> Self {
        AccountMessage::InitiationRite(m)
    }
}

impl From<UserLog> for AccountMessage {
    fn from(m: UserLog) -> Self {
        AccountMessage::Log(m)
    }
}

impl From<NodeLogResponse> for AccountMessage {
    fn from(m: NodeLogResponse) -> Self {
        AccountMessage::LogResponse(m)
    }
}

impl From<NodeWalletFunding> for AccountMessage {
    fn from(m: NodeWalletFunding) -> Self {
        AccountMessage::WalletFunding(m)
    }
}

impl From<NodeInitiationReward> for AccountMessage {
    fn from(m: NodeInitiationReward) -> Self {
        AccountMessage::InitiationReward(m)
    }
}

impl From<UserSweepAddress> for AccountMessage {
    fn from(m: UserSweepAddress) -> Self {
        AccountMessage::SweepAddress(m)
    }
}

impl From<NodeBlacklist> for AccountMessage {
    fn from(m: NodeBlacklist) -> Self {
        AccountMessage::Blacklist(m)
    }
}
