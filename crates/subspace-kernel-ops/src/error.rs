//! Error types for the operations layer.

use thiserror::Error;

use subspace_kernel_core::CoreError;

/// Errors returned while decoding, building, or validating operations.
///
/// Every failure rejects the whole envelope: a decode either yields a fully
/// populated record or one of these, never a partially filled record.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum OpsError {
    /// A core primitive rejected its input (auth tag grammar, subspace id
    /// format, registry conflict).
    #[error(transparent)]
    Core(#[from] CoreError),

    /// The envelope kind is not in the registry.
    #[error("unknown kind value: {0}")]
    UnknownKind(u32),

    /// The kind resolved to an operation this module has no decoder for.
    #[error("unknown operation type: {0}")]
    UnknownOperation(String),

    /// The envelope kind does not match the operation being validated.
    #[error("invalid event kind: expected {expected}, got {got}")]
    KindMismatch { expected: u32, got: u32 },

    /// A tag the operation requires is absent.
    #[error("missing required tag: {0}")]
    MissingRequiredTag(String),

    /// The declared subspace id does not recompute from the declared
    /// configuration strings.
    #[error("invalid subspace ID: expected {expected}, got {got}")]
    SubspaceIdMismatch { expected: String, got: String },

    /// The envelope content is not in the structure the operation requires.
    #[error("invalid content format: {0}")]
    InvalidContent(String),

    /// A required field inside structured content is absent or empty.
    #[error("missing {0} in content")]
    MissingRequiredContentField(String),

    /// The subspace `ops` declaration is not `key=value,...`-shaped.
    #[error("invalid ops format: {0}")]
    InvalidOpsFormat(String),
}
