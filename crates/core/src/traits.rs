//! Core traits for root projections.

use crate::UpdateOutcome;
use tasknode_messages::Message;
use tasknode_types::LedgerPosition;

/// A root projection that folds ledger messages into derived state.
///
/// Both the node-side and user-side roots implement this. Every
/// implementation is:
///
/// - **Synchronous**: No async, no `.await`
/// - **Deterministic**: Same state + message = same state and outcome
/// - **Total**: `update` never fails; it only differs in how much it mutates
///
/// # Example
///
/// ```ignore
/// let mut node = NodeState::new();
/// for message in decoded_messages {
///     if let UpdateOutcome::Dropped(diagnostic) = node.update(&message) {
///         report(diagnostic);
///     }
/// }
/// ```
pub trait Projection {
    /// Fold one message into the projection.
    ///
    /// # Guarantees
    ///
    /// - Messages at or below the watermark are dropped before reaching any
    ///   account, and reported as a [`crate::Diagnostic`]
    /// - Accepted messages advance the watermark to their position
    fn update(&mut self, message: &Message) -> UpdateOutcome;

    /// The highest ledger position accepted so far.
    fn latest_position(&self) -> LedgerPosition;
}
