//! Account state: account-level fields plus the tasks and logs it owns.

use crate::history::{join_sections, History};
use crate::log::LogState;
use crate::task::TaskState;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;
use tasknode_messages::{AccountMessage, Message, MessageBody};
use tasknode_types::{MessageId, TaskId};
use tracing::debug;

/// Progress of the initiation rite.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RiteStatus {
    #[default]
    Unstarted,
    Underway,
    Complete,
}

impl fmt::Display for RiteStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RiteStatus::Unstarted => f.write_str("UNSTARTED"),
            RiteStatus::Underway => f.write_str("UNDERWAY"),
            RiteStatus::Complete => f.write_str("COMPLETE"),
        }
    }
}

/// Derived status of an account. Computed on demand, never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AccountStatus {
    /// Reserved for consumers that track accounts outside this projection;
    /// [`AccountState::status`] never returns it.
    Invalid,
    Pending,
    Active,
    Blacklisted,
}

impl fmt::Display for AccountStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AccountStatus::Invalid => f.write_str("INVALID"),
            AccountStatus::Pending => f.write_str("PENDING"),
            AccountStatus::Active => f.write_str("ACTIVE"),
            AccountStatus::Blacklisted => f.write_str("BLACKLISTED"),
        }
    }
}

/// Derived state of one account.
///
/// Tasks and logs are created on the first message that references them and
/// kept in first-reference order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountState {
    init_rite_status: RiteStatus,
    context_doc_link: Option<String>,
    sweep_address: Option<String>,
    is_blacklisted: bool,
    tasks: IndexMap<TaskId, TaskState>,
    logs: IndexMap<MessageId, LogState>,
    history: History,
}

impl AccountState {
    /// Create an account with no history.
    pub fn new() -> Self {
        Self::default()
    }

    /// Derive the account status from the current fields.
    pub fn status(&self) -> AccountStatus {
        if self.is_blacklisted {
            AccountStatus::Blacklisted
        } else if self.init_rite_status != RiteStatus::Complete || self.context_doc_link.is_none()
        {
            AccountStatus::Pending
        } else {
            AccountStatus::Active
        }
    }

    /// Fold a message owned by this account.
    ///
    /// Gating uses the status from before the message is applied. A
    /// blacklisted account discards the message without recording it.
    pub fn update(&mut self, message: &Message) {
        let status = self.status();
        if status == AccountStatus::Blacklisted {
            return;
        }

        self.history.record(message);

        match message.body() {
            MessageBody::Task { task_id, .. } => {
                if status == AccountStatus::Active {
                    self.task_entry(task_id).update(message);
                } else {
                    debug!(
                        account = %message.account(),
                        task = %task_id,
                        status = %status,
                        "Task message on inactive account, recorded only"
                    );
                }
            }
            MessageBody::Account { message: body } if body.is_log() => {
                self.route_log(status, message, body)
            }
            MessageBody::Account { message: body } => self.apply_account(body),
        }
    }

    fn route_log(&mut self, status: AccountStatus, message: &Message, body: &AccountMessage) {
        let Some(message_id) = body.message_id() else {
            return;
        };
        if status == AccountStatus::Active {
            self.log_entry(message_id).update(message);
        } else {
            debug!(
                account = %message.account(),
                log = %message_id,
                status = %status,
                "Log message on inactive account, recorded only"
            );
        }
    }

    fn apply_account(&mut self, body: &AccountMessage) {
        match body {
            AccountMessage::GDocContext(ctx) => {
                self.context_doc_link = Some(ctx.gdoc_context_link.clone());
            }
            // Routed to the log map by `route_log`
            AccountMessage::Log(_) | AccountMessage::LogResponse(_) => {}
            AccountMessage::InitiationRite(_) => {
                self.advance_rite(RiteStatus::Unstarted, RiteStatus::Underway);
            }
            AccountMessage::WalletFunding(_) => {}
            AccountMessage::InitiationReward(_) => {
                self.advance_rite(RiteStatus::Underway, RiteStatus::Complete);
            }
            AccountMessage::SweepAddress(sweep) => {
                self.sweep_address = Some(sweep.sweep_address.clone());
            }
            AccountMessage::Blacklist(_) => {
                self.is_blacklisted = true;
            }
        }
    }

    fn advance_rite(&mut self, from: RiteStatus, to: RiteStatus) {
        if self.init_rite_status == from {
            self.init_rite_status = to;
        } else {
            debug!(
                current = %self.init_rite_status,
                expected = %from,
                "Ignoring out-of-phase initiation rite message"
            );
        }
    }

    fn task_entry(&mut self, task_id: &TaskId) -> &mut TaskState {
        self.tasks.entry(task_id.clone()).or_insert_with(|| {
            debug!(task = %task_id, "Tracking new task");
            TaskState::new()
        })
    }

    fn log_entry(&mut self, message_id: &MessageId) -> &mut LogState {
        self.logs.entry(message_id.clone()).or_insert_with(|| {
            debug!(log = %message_id, "Tracking new log");
            LogState::new()
        })
    }

    // ═══════════════════════════════════════════════════════════════════════
    // Read accessors (never create children)
    // ═══════════════════════════════════════════════════════════════════════

    pub fn init_rite_status(&self) -> RiteStatus {
        self.init_rite_status
    }

    pub fn context_doc_link(&self) -> Option<&str> {
        self.context_doc_link.as_deref()
    }

    pub fn sweep_address(&self) -> Option<&str> {
        self.sweep_address.as_deref()
    }

    pub fn is_blacklisted(&self) -> bool {
        self.is_blacklisted
    }

    /// Look up a task without creating it.
    pub fn task(&self, task_id: &TaskId) -> Option<&TaskState> {
        self.tasks.get(task_id)
    }

    /// Tasks in first-reference order.
    pub fn tasks(&self) -> impl Iterator<Item = (&TaskId, &TaskState)> {
        self.tasks.iter()
    }

    /// Look up a log without creating it.
    pub fn log(&self, message_id: &MessageId) -> Option<&LogState> {
        self.logs.get(message_id)
    }

    /// Logs in first-reference order.
    pub fn logs(&self) -> impl Iterator<Item = (&MessageId, &LogState)> {
        self.logs.iter()
    }

    /// Every message this account recorded.
    pub fn history(&self) -> &History {
        &self.history
    }

    /// Render the account-level history.
    pub fn data(&self) -> String {
        self.history.render()
    }

    /// Render account history, then each task's history, then each log.
    ///
    /// Empty sections are skipped.
    pub fn all_data(&self) -> String {
        join_sections(
            std::iter::once(self.data())
                .chain(self.tasks.values().map(TaskState::data))
                .chain(self.logs.values().map(LogState::data)),
        )
    }
}

impl fmt::Display for AccountState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "AccountState(status={}, init_rite_status={}, context_doc_link={}, sweep_address={}, tasks={}, logs={})",
            self.status(),
            self.init_rite_status,
            self.context_doc_link.as_deref().unwrap_or("-"),
            self.sweep_address.as_deref().unwrap_or("-"),
            self.tasks.len(),
            self.logs.len()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::log::LogStatus;
    use crate::task::TaskStatus;
    use tasknode_test_helpers::{
        all_account_messages, all_task_messages, blacklist, gdoc_context, initiation_reward,
        initiation_rite, log_response, proposal, request, sweep_address, user_log,
        wallet_funding, MessageFactory,
    };
    use tasknode_types::test_utils::{test_message_id, test_task};
    use tracing_test::traced_test;

    fn active_account(factory: &mut MessageFactory) -> AccountState {
        let mut account = AccountState::new();
        for m in factory.activation() {
            account.update(&m);
        }
        assert_eq!(account.status(), AccountStatus::Active);
        account
    }

    #[test]
    fn test_activation_sequence() {
        let mut factory = MessageFactory::for_account(1);
        let mut account = AccountState::new();
        assert_eq!(account.status(), AccountStatus::Pending);
        assert_eq!(account.init_rite_status(), RiteStatus::Unstarted);

        account.update(&factory.account_message(initiation_rite()));
        assert_eq!(account.init_rite_status(), RiteStatus::Underway);
        assert_eq!(account.status(), AccountStatus::Pending);

        account.update(&factory.account_message(gdoc_context("doc://x")));
        assert_eq!(account.context_doc_link(), Some("doc://x"));
        assert_eq!(account.status(), AccountStatus::Pending);

        account.update(&factory.account_message(initiation_reward(100)));
        assert_eq!(account.init_rite_status(), RiteStatus::Complete);
        assert_eq!(account.status(), AccountStatus::Active);
        assert_eq!(account.history().len(), 3);
    }

    #[test]
    fn test_context_without_rite_stays_pending() {
        let mut factory = MessageFactory::for_account(1);
        let mut account = AccountState::new();
        account.update(&factory.account_message(gdoc_context("doc://x")));
        assert_eq!(account.status(), AccountStatus::Pending);
    }

    #[traced_test]
    #[test]
    fn test_rite_guards() {
        let mut factory = MessageFactory::for_account(1);
        let mut account = AccountState::new();

        // Reward before the rite starts is absorbed
        account.update(&factory.account_message(initiation_reward(100)));
        assert_eq!(account.init_rite_status(), RiteStatus::Unstarted);
        assert!(logs_contain("Ignoring out-of-phase initiation rite message"));

        account.update(&factory.account_message(initiation_rite()));
        account.update(&factory.account_message(initiation_rite()));
        assert_eq!(account.init_rite_status(), RiteStatus::Underway);

        account.update(&factory.account_message(initiation_reward(100)));
        account.update(&factory.account_message(initiation_rite()));
        assert_eq!(account.init_rite_status(), RiteStatus::Complete);
        assert_eq!(account.history().len(), 5);
    }

    #[traced_test]
    #[test]
    fn test_pending_account_records_but_does_not_route() {
        let mut factory = MessageFactory::for_account(1);
        let mut account = AccountState::new();

        account.update(&factory.task(&test_task(1), request()));
        account.update(&factory.account_message(user_log("log-1", "hi")));

        assert_eq!(account.history().len(), 2);
        assert!(account.task(&test_task(1)).is_none());
        assert!(account.log(&test_message_id(1)).is_none());
        assert!(logs_contain("Task message on inactive account, recorded only"));
        assert!(logs_contain("Log message on inactive account, recorded only"));
    }

    #[test]
    fn test_active_account_routes_tasks_and_logs() {
        let mut factory = MessageFactory::for_account(1);
        let mut account = active_account(&mut factory);

        account.update(&factory.task(&test_task(1), request()));
        account.update(&factory.task(&test_task(1), proposal(42)));
        account.update(&factory.task(&test_task(2), request()));
        account.update(&factory.account_message(user_log("log-1", "hi")));
        account.update(&factory.account_message(log_response("log-1", "hello")));

        let t1 = account.task(&test_task(1)).unwrap();
        assert_eq!(t1.status(), TaskStatus::Proposed);
        assert_eq!(t1.history().len(), 2);
        assert_eq!(
            account.task(&test_task(2)).unwrap().status(),
            TaskStatus::Requested
        );

        let log = account.log(&test_message_id(1)).unwrap();
        assert_eq!(log.status(), LogStatus::Responded);

        // 3 activation + 5 routed
        assert_eq!(account.history().len(), 8);
        let task_order: Vec<&TaskId> = account.tasks().map(|(id, _)| id).collect();
        assert_eq!(task_order, vec![&test_task(1), &test_task(2)]);
    }

    #[test]
    fn test_gating_uses_status_before_message() {
        let mut factory = MessageFactory::for_account(1);
        let mut account = active_account(&mut factory);

        account.update(&factory.account_message(blacklist()));
        assert_eq!(account.status(), AccountStatus::Blacklisted);
        // The blacklist message itself was recorded
        assert_eq!(account.history().len(), 4);
    }

    #[test]
    fn test_sweep_address_and_funding() {
        let mut factory = MessageFactory::for_account(1);
        let mut account = AccountState::new();

        // Funding only lands in history
        account.update(&factory.account_message(wallet_funding(15)));
        assert_eq!(account.history().len(), 1);
        assert_eq!(account.init_rite_status(), RiteStatus::Unstarted);
        assert_eq!(account.sweep_address(), None);
        assert_eq!(account.status(), AccountStatus::Pending);

        account.update(&factory.account_message(sweep_address("rFirst")));
        account.update(&factory.account_message(sweep_address("rSecond")));
        assert_eq!(account.sweep_address(), Some("rSecond"));
    }

    #[test]
    fn test_blacklist_is_irreversible_and_silencing() {
        let mut factory = MessageFactory::for_account(1);
        let mut account = active_account(&mut factory);
        account.update(&factory.task(&test_task(1), request()));
        account.update(&factory.account_message(blacklist()));

        let frozen = account.clone();
        for m in all_account_messages() {
            account.update(&factory.account_message(m));
        }
        for m in all_task_messages() {
            account.update(&factory.task(&test_task(1), m.clone()));
            account.update(&factory.task(&test_task(9), m));
        }

        assert_eq!(account, frozen);
        assert!(account.is_blacklisted());
        assert_eq!(account.status(), AccountStatus::Blacklisted);
    }

    #[test]
    fn test_all_data_concatenates_children() {
        let mut factory = MessageFactory::for_account(1);
        let mut account = active_account(&mut factory);
        account.update(&factory.task(&test_task(1), request()));
        account.update(&factory.account_message(user_log("log-1", "hi")));

        let all = account.all_data();
        let lines: Vec<&str> = all.lines().collect();

        // 5 account lines, 1 task line, 1 log line
        assert_eq!(lines.len(), 7);
        assert_eq!(account.data().lines().count(), 5);
        assert!(lines[5].starts_with("inbound: task-1 UserRequest"));
        assert_eq!(lines[6], "REQUESTED: hi -> -");
    }

    #[test]
    fn test_reads_do_not_create_children() {
        let account = AccountState::new();
        assert!(account.task(&test_task(1)).is_none());
        assert!(account.log(&test_message_id(1)).is_none());
        assert_eq!(account.tasks().count(), 0);
        assert_eq!(account.logs().count(), 0);
        assert_eq!(account.all_data(), "");
    }
}
