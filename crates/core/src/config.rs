//! Configuration for root projections.

use tasknode_types::{LedgerPosition, LedgerSeq};

/// Configuration for a node or user projection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectionConfig {
    /// Watermark the projection starts from.
    ///
    /// Messages at or below this position are refused as duplicate or
    /// out of order.
    pub initial_watermark: LedgerPosition,

    /// Whether refused messages are kept in an in-memory audit trail.
    pub audit_dropped: bool,

    /// Maximum diagnostics held in the audit trail (oldest evicted first).
    pub audit_capacity: usize,
}

impl Default for ProjectionConfig {
    fn default() -> Self {
        Self {
            initial_watermark: LedgerPosition::GENESIS,
            audit_dropped: true,
            audit_capacity: 256,
        }
    }
}

impl ProjectionConfig {
    /// Create a config admitting every message from `ledger` onward.
    pub fn from_earliest_ledger(ledger: LedgerSeq) -> Self {
        Self {
            initial_watermark: LedgerPosition::before_ledger(ledger),
            ..Default::default()
        }
    }

    /// Set the initial watermark.
    pub fn with_initial_watermark(mut self, watermark: LedgerPosition) -> Self {
        self.initial_watermark = watermark;
        self
    }

    /// Set the audit trail capacity.
    pub fn with_audit_capacity(mut self, capacity: usize) -> Self {
        self.audit_capacity = capacity;
        self
    }

    /// Create a config with the audit trail disabled.
    pub fn without_audit(self) -> Self {
        Self {
            audit_dropped: false,
            ..self
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ProjectionConfig::default();
        assert_eq!(config.initial_watermark, LedgerPosition::GENESIS);
        assert!(config.audit_dropped);
        assert_eq!(config.audit_capacity, 256);
    }

    #[test]
    fn test_from_earliest_ledger_admits_first_txn() {
        let config = ProjectionConfig::from_earliest_ledger(LedgerSeq(91_000_000));
        assert!(config.initial_watermark < LedgerPosition::new(91_000_000, 0));
        assert!(config.initial_watermark > LedgerPosition::new(90_999_999, 500));
    }

    #[test]
    fn test_builders() {
        let config = ProjectionConfig::default()
            .with_initial_watermark(LedgerPosition::new(3, 4))
            .with_audit_capacity(8)
            .without_audit();
        assert_eq!(config.initial_watermark, LedgerPosition::new(3, 4));
        assert_eq!(config.audit_capacity, 8);
        assert!(!config.audit_dropped);
    }
}
