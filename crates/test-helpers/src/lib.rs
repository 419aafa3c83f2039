//! Test helpers for the task node projection.
//!
//! [`MessageFactory`] builds fully-formed [`Message`]s with strictly
//! increasing ledger positions, so tests only spell out what they care about.
//! The payload constructors below give every protocol variant a short name.

use rust_decimal::Decimal;
use tasknode_messages::{
    AccountMessage, Message, NodeBlacklist, NodeChallenge, NodeInitiationReward,
    NodeLogResponse, NodeProposal, NodeReward, NodeWalletFunding, TaskMessage, UserAcceptance,
    UserChallengeResponse, UserCompletion, UserGDocContext, UserInitiationRite, UserLog,
    UserRefusal, UserRequest, UserSweepAddress,
};
use tasknode_types::test_utils::{test_account, test_hash};
use tasknode_types::{AccountId, Direction, LedgerPosition, MessageId, TaskId};

/// Builds messages for one account with auto-advancing ledger positions.
///
/// Positions start at ledger 1, transaction 1 and advance by one transaction
/// per message. Every message gets a distinct hash. Directions follow the
/// node's point of view: user messages inbound, node messages outbound.
#[derive(Debug, Clone)]
pub struct MessageFactory {
    account: AccountId,
    next: LedgerPosition,
    counter: u64,
}

impl MessageFactory {
    /// Create a factory for `account`.
    pub fn new(account: AccountId) -> Self {
        Self {
            account,
            next: LedgerPosition::new(1, 1),
            counter: 0,
        }
    }

    /// Create a factory for fixture account `n`.
    pub fn for_account(n: u32) -> Self {
        Self::new(test_account(n))
    }

    /// The account this factory builds for.
    pub fn account(&self) -> &AccountId {
        &self.account
    }

    /// Force the position of the next message.
    pub fn at(&mut self, position: LedgerPosition) -> &mut Self {
        self.next = position;
        self
    }

    /// Move the next message to the start of a later ledger.
    pub fn next_ledger(&mut self) -> &mut Self {
        self.next = LedgerPosition::new(self.next.ledger_seq.0 + 1, 0);
        self
    }

    /// Share the position sequence with another factory's account.
    ///
    /// Useful when interleaving several accounts into one node stream.
    pub fn switch_account(&mut self, account: AccountId) -> &mut Self {
        self.account = account;
        self
    }

    fn advance(&mut self) -> (LedgerPosition, u64) {
        let position = self.next;
        self.next = LedgerPosition::new(position.ledger_seq.0, position.transaction_seq.0 + 1);
        self.counter += 1;
        (position, self.counter)
    }

    /// Build a task-scoped message.
    pub fn task(&mut self, task_id: &TaskId, message: impl Into<TaskMessage>) -> Message {
        let message = message.into();
        let direction = if message.is_from_node() {
            Direction::Outbound
        } else {
            Direction::Inbound
        };
        let (position, n) = self.advance();
        Message::builder()
            .hash(test_hash(n))
            .direction(direction)
            .position(position)
            .account(self.account.clone())
            .raw_data(format!("{} {} #{}", task_id, message.type_name(), n))
            .task_id(task_id.clone())
            .task_message(message)
            .build()
            .expect("task fixture is complete")
    }

    /// Build an account-scoped message.
    pub fn account_message(&mut self, message: impl Into<AccountMessage>) -> Message {
        let message = message.into();
        let direction = match message {
            AccountMessage::LogResponse(_)
            | AccountMessage::WalletFunding(_)
            | AccountMessage::InitiationReward(_)
            | AccountMessage::Blacklist(_) => Direction::Outbound,
            _ => Direction::Inbound,
        };
        let (position, n) = self.advance();
        Message::builder()
            .hash(test_hash(n))
            .direction(direction)
            .position(position)
            .account(self.account.clone())
            .raw_data(format!("{} #{}", message.type_name(), n))
            .account_message(message)
            .build()
            .expect("account fixture is complete")
    }

    /// The three messages that take a fresh account to active:
    /// rite start, context link, initiation reward.
    pub fn activation(&mut self) -> Vec<Message> {
        vec![
            self.account_message(initiation_rite()),
            self.account_message(gdoc_context("https://docs.example/context")),
            self.account_message(initiation_reward(100)),
        ]
    }
}

/// Rebuild `message` at a different ledger position, keeping everything else.
pub fn reposition(message: &Message, position: LedgerPosition) -> Message {
    let builder = Message::builder()
        .hash(message.hash())
        .direction(message.direction())
        .position(position)
        .account(message.account().clone())
        .raw_data(message.raw_data());
    let builder = match message.body() {
        tasknode_messages::MessageBody::Task { task_id, message } => builder
            .task_id(task_id.clone())
            .task_message(message.clone()),
        tasknode_messages::MessageBody::Account { message } => {
            builder.account_message(message.clone())
        }
    };
    builder.build().expect("repositioned fixture is complete")
}

// Task payloads

pub fn request() -> TaskMessage {
    UserRequest {
        request: "please give me a task".into(),
    }
    .into()
}

pub fn proposal(offer: i64) -> TaskMessage {
    NodeProposal {
        proposal: "write the integration guide".into(),
        pft_offer: Decimal::from(offer),
    }
    .into()
}

pub fn acceptance() -> TaskMessage {
    UserAcceptance {
        message: "on it".into(),
    }
    .into()
}

pub fn refusal() -> TaskMessage {
    UserRefusal {
        reason: "not my area".into(),
    }
    .into()
}

pub fn completion() -> TaskMessage {
    UserCompletion {
        completion: "guide merged".into(),
    }
    .into()
}

pub fn challenge() -> TaskMessage {
    NodeChallenge {
        challenge: "link the merge commit".into(),
    }
    .into()
}

pub fn challenge_response() -> TaskMessage {
    UserChallengeResponse {
        response: "commit abc123".into(),
    }
    .into()
}

pub fn reward(amount: i64) -> TaskMessage {
    NodeReward {
        message: "good work".into(),
        amount_pft: Decimal::from(amount),
    }
    .into()
}

/// One instance of every task variant, in lifecycle order.
pub fn all_task_messages() -> Vec<TaskMessage> {
    vec![
        request(),
        proposal(10),
        acceptance(),
        refusal(),
        completion(),
        challenge(),
        challenge_response(),
        reward(10),
    ]
}

// Account payloads

pub fn gdoc_context(link: &str) -> AccountMessage {
    UserGDocContext {
        gdoc_context_link: link.into(),
    }
    .into()
}

pub fn initiation_rite() -> AccountMessage {
    UserInitiationRite {
        rite_text: "I commit to the network".into(),
    }
    .into()
}

pub fn user_log(id: &str, text: &str) -> AccountMessage {
    UserLog {
        message_id: MessageId::new(id),
        message: text.into(),
    }
    .into()
}

pub fn log_response(id: &str, text: &str) -> AccountMessage {
    NodeLogResponse {
        message_id: MessageId::new(id),
        message: text.into(),
    }
    .into()
}

pub fn wallet_funding(amount: i64) -> AccountMessage {
    NodeWalletFunding {
        amount_pft: Decimal::from(amount),
    }
    .into()
}

pub fn initiation_reward(amount: i64) -> AccountMessage {
    NodeInitiationReward {
        message: "welcome aboard".into(),
        amount_pft: Decimal::from(amount),
    }
    .into()
}

pub fn sweep_address(address: &str) -> AccountMessage {
    UserSweepAddress {
        sweep_address: address.into(),
    }
    .into()
}

pub fn blacklist() -> AccountMessage {
    NodeBlacklist {
        reason: "spam".into(),
    }
    .into()
}

/// One instance of every account variant.
pub fn all_account_messages() -> Vec<AccountMessage> {
    vec![
        gdoc_context("https://docs.example/context"),
        initiation_rite(),
        user_log("log-1", "worked on docs"),
        log_response("log-1", "nice"),
        wallet_funding(5),
        initiation_reward(100),
        sweep_address("rSweep"),
        blacklist(),
    ]
}
