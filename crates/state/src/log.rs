//! Log request/response pairing.

use serde::{Deserialize, Serialize};
use std::fmt;
use tasknode_messages::{AccountMessage, Message, MessageBody};

/// Status of a log entry.
///
/// Not terminal: a new request re-enters `REQUESTED` at any time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LogStatus {
    #[default]
    Invalid,
    Requested,
    Responded,
}

impl fmt::Display for LogStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogStatus::Invalid => f.write_str("INVALID"),
            LogStatus::Requested => f.write_str("REQUESTED"),
            LogStatus::Responded => f.write_str("RESPONDED"),
        }
    }
}

/// A user log entry and the node's answer.
///
/// Unlike tasks there is no source-status guard: a response arriving before
/// its request is applied, and later messages overwrite earlier text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogState {
    status: LogStatus,
    request: Option<String>,
    response: Option<String>,
}

impl LogState {
    /// Create an empty log entry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold a log request or response. Other messages are ignored.
    pub fn update(&mut self, message: &Message) {
        match message.body() {
            MessageBody::Account {
                message: AccountMessage::Log(log),
            } => {
                self.status = LogStatus::Requested;
                self.request = Some(log.message.clone());
            }
            MessageBody::Account {
                message: AccountMessage::LogResponse(response),
            } => {
                self.status = LogStatus::Responded;
                self.response = Some(response.message.clone());
            }
            _ => {}
        }
    }

    /// Get the current status.
    pub fn status(&self) -> LogStatus {
        self.status
    }

    /// The user's log text.
    pub fn request(&self) -> Option<&str> {
        self.request.as_deref()
    }

    /// The node's answer.
    pub fn response(&self) -> Option<&str> {
        self.response.as_deref()
    }

    /// Render as `STATUS: request -> response`, with `-` for missing text.
    pub fn data(&self) -> String {
        format!(
            "{}: {} -> {}",
            self.status,
            self.request.as_deref().unwrap_or("-"),
            self.response.as_deref().unwrap_or("-")
        )
    }
}

impl fmt::Display for LogState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "LogState({})", self.data())
    }
}
