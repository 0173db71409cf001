//! # Subspace Kernel Core
//!
//! Pure primitives for the subspace operation layer: capability tokens,
//! causality tracking, subspace identity, and the kind registry.
//!
//! This crate contains no I/O, no storage, no networking. Every operation
//! is a synchronous, non-blocking computation over data that is already in
//! memory.
//!
//! ## Key Types
//!
//! - [`Envelope`] - The signed-event substrate, consumed as a given shape
//! - [`AuthTag`] - Capability token binding permissions to a logical clock
//! - [`SubspaceKeys`] - Per-subspace map of independent Lamport counters
//! - [`KindRegistry`] - Bidirectional kind↔operation-name table
//!
//! ## Shared state
//!
//! [`SubspaceKeys`] assumes sequential mutation; the registry is read-only
//! after startup and freely shareable.

pub mod auth;
pub mod causality;
pub mod envelope;
pub mod error;
pub mod identity;
pub mod registry;
pub mod schema;

pub use auth::{Action, AuthTag};
pub use causality::{CausalityKey, SubspaceKeys};
pub use envelope::{Envelope, Tag};
pub use error::CoreError;
pub use identity::{calculate_subspace_id, validate_subspace_id};
pub use registry::{get_kind, get_operation, KindRegistry};
pub use schema::{FieldSchema, ModuleSchema, OperationSchema};
