//! Domain-specific identifier types.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Errors when parsing identifiers from their textual form.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IdentifierError {
    /// Identifier was empty or whitespace only.
    #[error("{kind} identifier must not be empty")]
    Empty {
        /// Which identifier kind was being parsed.
        kind: &'static str,
    },

    /// Transaction hash was not valid hex.
    #[error("Invalid transaction hash hex: {0}")]
    InvalidHex(String),

    /// Transaction hash decoded to the wrong number of bytes.
    #[error("Transaction hash must be 32 bytes, got {0}")]
    InvalidLength(usize),
}

macro_rules! string_identifier {
    ($(#[$meta:meta])* $name:ident, $kind:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Create from any string-like value.
            ///
            /// Does not reject empty values; use `FromStr` at decoding boundaries.
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Get the identifier as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl FromStr for $name {
            type Err = IdentifierError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let trimmed = s.trim();
                if trimmed.is_empty() {
                    return Err(IdentifierError::Empty { kind: $kind });
                }
                Ok(Self(trimmed.to_string()))
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                Self::new(s)
            }
        }
    };
}

string_identifier!(
    /// Ledger account (wallet address) that owns a message.
    ///
    /// For a node this is the counterparty user's wallet; for a user it is
    /// the user's own wallet.
    AccountId,
    "account"
);

string_identifier!(
    /// Identifier of a single task within an account.
    TaskId,
    "task"
);

string_identifier!(
    /// Identifier pairing a log request with its response.
    MessageId,
    "message"
);

/// Hash of the ledger transaction a message was decoded from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TxHash(pub [u8; 32]);

impl TxHash {
    /// All-zero hash, used where no transaction exists.
    pub const ZERO: Self = TxHash([0u8; 32]);

    /// Parse from hex, accepting either case.
    pub fn from_hex(s: &str) -> Result<Self, IdentifierError> {
        let bytes = hex::decode(s.trim()).map_err(|e| IdentifierError::InvalidHex(e.to_string()))?;
        let arr: [u8; 32] = bytes
            .as_slice()
            .try_into()
            .map_err(|_| IdentifierError::InvalidLength(bytes.len()))?;
        Ok(Self(arr))
    }

    /// Get the bytes as a slice.
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Upper-case hex, the ledger's canonical rendering.
    pub fn to_hex(&self) -> String {
        hex::encode_upper(self.0)
    }
}

impl FromStr for TxHash {
    type Err = IdentifierError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}

impl fmt::Display for TxHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..", &hex::encode_upper(&self.0[..4]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identifier_parse_trims() {
        let account: AccountId = "  rUser1  ".parse().unwrap();
        assert_eq!(account.as_str(), "rUser1");
        assert_eq!(account.to_string(), "rUser1");
    }

    #[test]
    fn test_identifier_parse_rejects_empty() {
        assert_eq!(
            "   ".parse::<TaskId>(),
            Err(IdentifierError::Empty { kind: "task" })
        );
        assert_eq!(
            "".parse::<MessageId>(),
            Err(IdentifierError::Empty { kind: "message" })
        );
    }

    #[test]
    fn test_tx_hash_hex() {
        let hex_str = "AB".repeat(32);
        let hash = TxHash::from_hex(&hex_str).unwrap();
        assert_eq!(hash.as_bytes(), &[0xAB; 32]);
        assert_eq!(hash.to_hex(), hex_str);
        assert_eq!(hash.to_string(), "ABABABAB..");

        // Lower case accepted
        assert_eq!(TxHash::from_hex(&"ab".repeat(32)).unwrap(), hash);
    }

    #[test]
    fn test_tx_hash_rejects_bad_input() {
        assert!(matches!(
            TxHash::from_hex("zz"),
            Err(IdentifierError::InvalidHex(_))
        ));
        assert_eq!(
            TxHash::from_hex("abcd"),
            Err(IdentifierError::InvalidLength(2))
        );
    }

    #[test]
    fn test_identifier_serde_transparent() {
        let task = TaskId::new("2024-05-01_10:00__AB12");
        let json = serde_json::to_string(&task).unwrap();
        assert_eq!(json, "\"2024-05-01_10:00__AB12\"");
        let back: TaskId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, task);
    }
}
