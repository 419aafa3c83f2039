//! Message envelope: protocol metadata plus a typed payload.

use crate::{AccountMessage, TaskMessage};
use serde::{Deserialize, Serialize};
use tasknode_types::{AccountId, Direction, LedgerPosition, Scope, TaskId, TxHash};
use thiserror::Error;

/// Errors when assembling a message from decoded parts.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MessageError {
    #[error("Message is missing its direction")]
    MissingDirection,

    #[error("Message is missing its ledger position")]
    MissingPosition,

    #[error("Message is missing its owning account")]
    MissingAccount,

    #[error("Message has no payload")]
    MissingPayload,

    #[error("Message has both a task and an account payload")]
    ConflictingPayload,

    /// Task-scoped payloads must name their task.
    #[error("{0} requires a task id")]
    MissingTaskId(&'static str),

    /// Account-scoped payloads must not name a task.
    #[error("{0} is account-scoped but a task id was given")]
    UnexpectedTaskId(&'static str),

    /// Log payloads must carry a non-empty message id.
    #[error("{0} has an empty message id")]
    EmptyMessageId(&'static str),
}

/// Payload of a message, split by scope.
///
/// The split makes "task id iff task scope" a property of the type rather
/// than a runtime check downstream.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "scope", rename_all = "snake_case")]
pub enum MessageBody {
    /// Addressed to one task of the account.
    Task {
        task_id: TaskId,
        message: TaskMessage,
    },
    /// Addressed to the account itself.
    Account { message: AccountMessage },
}

impl MessageBody {
    /// Get the scope of this payload.
    pub fn scope(&self) -> Scope {
        match self {
            MessageBody::Task { .. } => Scope::Task,
            MessageBody::Account { .. } => Scope::Account,
        }
    }

    /// Get a human-readable name for the payload variant.
    pub fn type_name(&self) -> &'static str {
        match self {
            MessageBody::Task { message, .. } => message.type_name(),
            MessageBody::Account { message } => message.type_name(),
        }
    }
}

/// A decoded protocol message.
///
/// Immutable once built; the projection only ever borrows it. Deserializing
/// runs the same validation as [`MessageBuilder::build`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawMessage")]
pub struct Message {
    hash: TxHash,
    direction: Direction,
    position: LedgerPosition,
    account: AccountId,
    raw_data: String,
    body: MessageBody,
}

/// Unvalidated wire shape of a [`Message`].
#[derive(Deserialize)]
struct RawMessage {
    #[serde(default)]
    hash: Option<TxHash>,
    direction: Direction,
    position: LedgerPosition,
    account: AccountId,
    #[serde(default)]
    raw_data: Option<String>,
    body: MessageBody,
}

impl TryFrom<RawMessage> for Message {
    type Error = MessageError;

    fn try_from(raw: RawMessage) -> Result<Self, Self::Error> {
        let mut builder = Message::builder()
            .direction(raw.direction)
            .position(raw.position)
            .account(raw.account);
        if let Some(hash) = raw.hash {
            builder = builder.hash(hash);
        }
        if let Some(raw_data) = raw.raw_data {
            builder = builder.raw_data(raw_data);
        }
        match raw.body {
            MessageBody::Task { task_id, message } => {
                builder.task_id(task_id).task_message(message).build()
            }
            MessageBody::Account { message } => builder.account_message(message).build(),
        }
    }
}

impl Message {
    /// Start building a message.
    pub fn builder() -> MessageBuilder {
        MessageBuilder::default()
    }

    /// Hash of the source transaction.
    pub fn hash(&self) -> TxHash {
        self.hash
    }

    /// Direction relative to the observer.
    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Ledger position of the source transaction.
    pub fn position(&self) -> LedgerPosition {
        self.position
    }

    /// The user wallet this message belongs to.
    pub fn account(&self) -> &AccountId {
        &self.account
    }

    /// Raw memo text, kept verbatim in history.
    pub fn raw_data(&self) -> &str {
        &self.raw_data
    }

    /// Typed payload.
    pub fn body(&self) -> &MessageBody {
        &self.body
    }

    /// Get the scope of this message.
    pub fn scope(&self) -> Scope {
        self.body.scope()
    }

    /// Task id, for task-scoped messages.
    pub fn task_id(&self) -> Option<&TaskId> {
        match &self.body {
            MessageBody::Task { task_id, .. } => Some(task_id),
            MessageBody::Account { .. } => None,
        }
    }

    /// Get a human-readable name for the payload variant.
    pub fn type_name(&self) -> &'static str {
        self.body.type_name()
    }
}

/// Builder assembling a [`Message`] from decoded ledger fields.
///
/// The transaction hash defaults to [`TxHash::ZERO`] and raw data to the
/// empty string; every other field is required.
#[derive(Debug, Default, Clone)]
pub struct MessageBuilder {
    hash: Option<TxHash>,
    direction: Option<Direction>,
    position: Option<LedgerPosition>,
    account: Option<AccountId>,
    raw_data: Option<String>,
    task_id: Option<TaskId>,
    task_message: Option<TaskMessage>,
    account_message: Option<AccountMessage>,
}

impl MessageBuilder {
    pub fn hash(mut self, hash: TxHash) -> Self {
        self.hash = Some(hash);
        self
    }

    pub fn direction(mut self, direction: Direction) -> Self {
        self.direction = Some(direction);
        self
    }

    pub fn position(mut self, position: LedgerPosition) -> Self {
        self.position = Some(position);
        self
    }

    pub fn account(mut self, account: AccountId) -> Self {
        self.account = Some(account);
        self
    }

    pub fn raw_data(mut self, raw_data: impl Into<String>) -> Self {
        self.raw_data = Some(raw_data.into());
        self
    }

    pub fn task_id(mut self, task_id: TaskId) -> Self {
        self.task_id = Some(task_id);
        self
    }

    pub fn task_message(mut self, message: impl Into<TaskMessage>) -> Self {
        self.task_message = Some(message.into());
        self
    }

    pub fn account_message(mut self, message: impl Into<AccountMessage>) -> Self {
        self.account_message = Some(message.into());
        self
    }

    /// Validate and assemble the message.
    pub fn build(self) -> Result<Message, MessageError> {
        let direction = self.direction.ok_or(MessageError::MissingDirection)?;
        let position = self.position.ok_or(MessageError::MissingPosition)?;
        let account = self.account.ok_or(MessageError::MissingAccount)?;

        let body = match (self.task_message, self.account_message) {
            (Some(_), Some(_)) => return Err(MessageError::ConflictingPayload),
            (None, None) => return Err(MessageError::MissingPayload),
            (Some(message), None) => {
                let task_id = self
                    .task_id
                    .ok_or(MessageError::MissingTaskId(message.type_name()))?;
                MessageBody::Task { task_id, message }
            }
            (None, Some(message)) => {
                if self.task_id.is_some() {
                    return Err(MessageError::UnexpectedTaskId(message.type_name()));
                }
                if let Some(id) = message.message_id() {
                    if id.as_str().trim().is_empty() {
                        return Err(MessageError::EmptyMessageId(message.type_name()));
                    }
                }
                MessageBody::Account { message }
            }
        };

        Ok(Message {
            hash: self.hash.unwrap_or(TxHash::ZERO),
            direction,
            position,
            account,
            raw_data: self.raw_data.unwrap_or_default(),
            body,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{NodeLogResponse, UserRequest, UserSweepAddress};
    use tasknode_types::test_utils::{test_account, test_hash, test_task};
    use tasknode_types::MessageId;

    fn base() -> MessageBuilder {
        Message::builder()
            .hash(test_hash(1))
            .direction(Direction::Inbound)
            .position(LedgerPosition::new(10, 3))
            .account(test_account(1))
            .raw_data("REQUEST_POST_FIAT ___ any task")
    }

    fn request() -> UserRequest {
        UserRequest {
            request: "any task".into(),
        }
    }

    #[test]
    fn test_build_task_message() {
        let msg = base()
            .task_id(test_task(1))
            .task_message(request())
            .build()
            .unwrap();

        assert_eq!(msg.scope(), Scope::Task);
        assert_eq!(msg.task_id(), Some(&test_task(1)));
        assert_eq!(msg.position(), LedgerPosition::new(10, 3));
        assert_eq!(msg.type_name(), "UserRequest");
        assert_eq!(msg.raw_data(), "REQUEST_POST_FIAT ___ any task");
    }

    #[test]
    fn test_build_account_message() {
        let msg = base()
            .account_message(UserSweepAddress {
                sweep_address: "rSweep".into(),
            })
            .build()
            .unwrap();

        assert_eq!(msg.scope(), Scope::Account);
        assert_eq!(msg.task_id(), None);
        assert_eq!(msg.hash(), test_hash(1));
    }

    #[test]
    fn test_task_message_requires_task_id() {
        let err = base().task_message(request()).build().unwrap_err();
        assert_eq!(err, MessageError::MissingTaskId("UserRequest"));
    }

    #[test]
    fn test_account_message_rejects_task_id() {
        let err = base()
            .task_id(test_task(1))
            .account_message(UserSweepAddress {
                sweep_address: "rSweep".into(),
            })
            .build()
            .unwrap_err();
        assert_eq!(err, MessageError::UnexpectedTaskId("UserSweepAddress"));
    }

    #[test]
    fn test_log_message_requires_message_id() {
        let err = base()
            .account_message(NodeLogResponse {
                message_id: MessageId::new(" "),
                message: "noted".into(),
            })
            .build()
            .unwrap_err();
        assert_eq!(err, MessageError::EmptyMessageId("NodeLogResponse"));
    }

    #[test]
    fn test_missing_fields() {
        assert_eq!(
            Message::builder().build().unwrap_err(),
            MessageError::MissingDirection
        );
        assert_eq!(
            Message::builder()
                .direction(Direction::Outbound)
                .build()
                .unwrap_err(),
            MessageError::MissingPosition
        );
        assert_eq!(base().build().unwrap_err(), MessageError::MissingPayload);
        assert_eq!(
            base()
                .task_id(test_task(1))
                .task_message(request())
                .account_message(UserSweepAddress {
                    sweep_address: "rSweep".into(),
                })
                .build()
                .unwrap_err(),
            MessageError::ConflictingPayload
        );
    }

    #[test]
    fn test_defaults() {
        let msg = Message::builder()
            .direction(Direction::Outbound)
            .position(LedgerPosition::new(1, 0))
            .account(test_account(2))
            .task_id(test_task(2))
            .task_message(request())
            .build()
            .unwrap();
        assert_eq!(msg.hash(), TxHash::ZERO);
        assert_eq!(msg.raw_data(), "");
    }

    #[test]
    fn test_message_json_round_trip_preserves_body() {
        let msg = base()
            .task_id(test_task(7))
            .task_message(request())
            .build()
            .unwrap();
        let json = serde_json::to_value(&msg).unwrap();
        assert_eq!(json["body"]["scope"], "task");
        assert_eq!(json["body"]["task_id"], "task-7");
        assert_eq!(json["body"]["message"]["type"], "request");

        let back: Message = serde_json::from_value(json).unwrap();
        assert_eq!(back, msg);
    }

    #[test]
    fn test_decoding_validates_like_builder() {
        let decoded: Result<Message, _> = serde_json::from_value(serde_json::json!({
            "direction": "inbound",
            "position": { "ledger_seq": 3, "transaction_seq": 1 },
            "account": "rUser1",
            "body": {
                "scope": "account",
                "message": { "type": "log", "message_id": "", "message": "hi" }
            }
        }));
        let err = decoded.unwrap_err();
        assert!(err.to_string().contains("UserLog has an empty message id"));

        // Hash and raw data take the builder defaults when absent
        let msg: Message = serde_json::from_value(serde_json::json!({
            "direction": "inbound",
            "position": { "ledger_seq": 3, "transaction_seq": 1 },
            "account": "rUser1",
            "body": {
                "scope": "account",
                "message": { "type": "log", "message_id": "log-1", "message": "hi" }
            }
        }))
        .unwrap();
        assert_eq!(msg.hash(), TxHash::ZERO);
        assert_eq!(msg.raw_data(), "");
    }
}
