//! # Subspace Kernel Testkit
//!
//! Shared testing utilities for the Subspace Kernel workspace:
//!
//! - [`fixtures`] - declared subspaces and operation builders for tests
//! - [`generators`] - proptest strategies over core types
//! - [`vectors`] - golden vectors every implementation must reproduce

pub mod fixtures;
pub mod generators;
pub mod vectors;

pub use fixtures::{random_hex_id, stamp_identity, SubspaceFixture};
