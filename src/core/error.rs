//! Error taxonomy for the duel core.
//!
//! Every fallible operation in the crate returns [`Result`]. None of these
//! errors is retried: configuration errors mean a corrupt card or file,
//! invariant violations mean the caller broke a contract, and an empty tree
//! means a search was started on a finished match.

use thiserror::Error;

/// Errors raised by the rules core and the search engine.
#[derive(Debug, Error)]
pub enum DuelError {
    /// A card, catalog, deck or config definition cannot be interpreted.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// A caller contract was broken (unaffordable play, card not in hand,
    /// unknown contender id, move on a finished match).
    #[error("invariant violation: {0}")]
    InvariantViolation(String),

    /// A best child was requested from a node without children.
    #[error("search tree has no children to choose from")]
    EmptyTree,

    /// Snapshot byte encoding failed.
    #[error("snapshot codec error: {0}")]
    Codec(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl DuelError {
    pub(crate) fn config(msg: impl Into<String>) -> Self {
        Self::Configuration(msg.into())
    }

    pub(crate) fn invariant(msg: impl Into<String>) -> Self {
        Self::InvariantViolation(msg.into())
    }
}

impl From<serde_json::Error> for DuelError {
    fn from(err: serde_json::Error) -> Self {
        Self::Configuration(err.to_string())
    }
}

impl From<toml::de::Error> for DuelError {
    fn from(err: toml::de::Error) -> Self {
        Self::Configuration(err.to_string())
    }
}

impl From<bincode::Error> for DuelError {
    fn from(err: bincode::Error) -> Self {
        Self::Codec(err.to_string())
    }
}

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, DuelError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = DuelError::config("unknown keyword 'gold'");
        assert_eq!(err.to_string(), "configuration error: unknown keyword 'gold'");

        let err = DuelError::invariant("card 0:3 not in hand");
        assert!(err.to_string().contains("0:3"));

        assert!(DuelError::EmptyTree.to_string().contains("no children"));
    }

    #[test]
    fn test_json_error_is_configuration() {
        let parse: std::result::Result<u32, _> = serde_json::from_str("not json");
        let err: DuelError = parse.unwrap_err().into();
        assert!(matches!(err, DuelError::Configuration(_)));
    }
}
