//! Append-only message history shared by accounts and tasks.

use serde::{Deserialize, Serialize};
use tasknode_messages::Message;
use tasknode_types::Direction;

/// One recorded message: who sent it and its raw text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub direction: Direction,
    pub raw_data: String,
}

/// Ordered, append-only record of the messages an entity has seen.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct History {
    entries: Vec<HistoryEntry>,
}

impl History {
    /// Create an empty history.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a message's direction and raw text.
    pub fn record(&mut self, message: &Message) {
        self.entries.push(HistoryEntry {
            direction: message.direction(),
            raw_data: message.raw_data().to_string(),
        });
    }

    /// Get the number of recorded messages.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if nothing has been recorded.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate entries oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &HistoryEntry> {
        self.entries.iter()
    }

    /// Render one `direction: raw` line per entry.
    pub fn render(&self) -> String {
        self.entries
            .iter()
            .map(|e| format!("{}: {}", e.direction, e.raw_data))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Join non-empty rendered sections with newlines.
pub(crate) fn join_sections<I>(sections: I) -> String
where
    I: IntoIterator<Item = String>,
{
    sections
        .into_iter()
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use tasknode_messages::{UserRequest, UserSweepAddress};
    use tasknode_types::test_utils::{test_account, test_task};
    use tasknode_types::LedgerPosition;

    fn message(direction: Direction, raw: &str) -> Message {
        Message::builder()
            .direction(direction)
            .position(LedgerPosition::new(1, 1))
            .account(test_account(1))
            .raw_data(raw)
            .account_message(UserSweepAddress {
                sweep_address: "rSweep".into(),
            })
            .build()
            .unwrap()
    }

    #[test]
    fn test_history_render() {
        let mut history = History::new();
        assert!(history.is_empty());
        assert_eq!(history.render(), "");

        history.record(&message(Direction::Inbound, "hello"));
        history.record(&message(Direction::Outbound, "welcome"));

        assert_eq!(history.len(), 2);
        assert_eq!(history.render(), "inbound: hello\noutbound: welcome");
    }

    #[test]
    fn test_history_keeps_raw_text_verbatim() {
        let raw = "  REQUEST_POST_FIAT ___ spaces\tand tabs  ";
        let msg = Message::builder()
            .direction(Direction::Inbound)
            .position(LedgerPosition::new(1, 1))
            .account(test_account(1))
            .raw_data(raw)
            .task_id(test_task(1))
            .task_message(UserRequest {
                request: "x".into(),
            })
            .build()
            .unwrap();

        let mut history = History::new();
        history.record(&msg);
        assert_eq!(history.iter().next().unwrap().raw_data, raw);
    }

    #[test]
    fn test_join_sections_skips_empty() {
        let joined = join_sections(vec![
            "a".to_string(),
            String::new(),
            "b\nc".to_string(),
        ]);
        assert_eq!(joined, "a\nb\nc");
        assert_eq!(join_sections(Vec::<String>::new()), "");
    }
}
