//! Error types for the Subspace Kernel core.

use thiserror::Error;

/// Core errors that can occur while decoding or registering primitives.
///
/// All failures are terminal and synchronous: they describe malformed data
/// that is already fully available, so nothing is retried internally.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CoreError {
    /// The auth tag text deviates from the `action=..,key=..,exp=..` grammar.
    #[error("malformed auth tag: {0}")]
    MalformedAuthTag(String),

    /// The subspace ID is not `0x` followed by 64 hex characters.
    #[error("invalid subspace ID format: {0}")]
    InvalidSubspaceId(String),

    /// Two operations were registered under the same kind number.
    #[error("kind {kind} already registered as {existing}, refusing {proposed}")]
    RegistryConflict {
        kind: u32,
        existing: String,
        proposed: String,
    },
}
