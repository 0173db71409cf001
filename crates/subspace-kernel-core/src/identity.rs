//! Subspace identity: deterministic, content-addressed namespace ids.
//!
//! A subspace id is the SHA-256 of the declared name, operations string,
//! and rules, rendered as `0x` + 64 lowercase hex characters. Recomputing
//! the hash from the declared strings must reproduce the stored id; that
//! recomputation is the tamper-evidence binding between a subspace's
//! configuration and its identifier.

use sha2::{Digest, Sha256};

use crate::error::CoreError;

/// Compute a subspace id from its declared name, ops, and rules.
///
/// The three strings are concatenated directly, with no delimiter. Distinct
/// triples whose concatenations coincide (`("ab","c","")` vs `("a","bc","")`)
/// therefore share an id; callers that need field separation must encode it
/// into the strings themselves.
pub fn calculate_subspace_id(name: &str, ops: &str, rules: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(name.as_bytes());
    hasher.update(ops.as_bytes());
    hasher.update(rules.as_bytes());
    format!("0x{}", hex::encode(hasher.finalize()))
}

/// Validate the format of a subspace id.
pub fn validate_subspace_id(sid: &str) -> Result<(), CoreError> {
    if !is_valid_subspace_id(sid) {
        return Err(CoreError::InvalidSubspaceId(sid.to_string()));
    }
    Ok(())
}

/// `0x` followed by exactly 64 hex digits, either case.
fn is_valid_subspace_id(sid: &str) -> bool {
    sid.len() == 66
        && sid.starts_with("0x")
        && sid[2..].bytes().all(|b| b.is_ascii_hexdigit())
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn calculated_ids_are_valid_and_deterministic() {
        let sid = calculate_subspace_id("test-subspace", "post=30300", "energy>1000");
        assert_eq!(sid.len(), 66);
        assert!(validate_subspace_id(&sid).is_ok());
        assert_eq!(
            sid,
            calculate_subspace_id("test-subspace", "post=30300", "energy>1000")
        );
    }

    #[test]
    fn changing_any_input_changes_the_id() {
        let base = calculate_subspace_id("s", "o", "r");
        assert_ne!(base, calculate_subspace_id("s2", "o", "r"));
        assert_ne!(base, calculate_subspace_id("s", "o2", "r"));
        assert_ne!(base, calculate_subspace_id("s", "o", "r2"));
    }

    #[test]
    fn concatenation_collision_across_fields() {
        // No delimiter between fields: these distinct triples hash alike.
        assert_eq!(
            calculate_subspace_id("ab", "c", ""),
            calculate_subspace_id("a", "bc", "")
        );
        assert_eq!(
            calculate_subspace_id("a", "b", "c"),
            calculate_subspace_id("abc", "", "")
        );
    }

    #[test]
    fn validate_accepts_well_formed_ids() {
        for sid in [
            "0x1234567890abcdef1234567890abcdef1234567890abcdef1234567890abcdef",
            "0x0000000000000000000000000000000000000000000000000000000000000000",
            "0xffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffff",
            "0xFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFF",
        ] {
            assert!(validate_subspace_id(sid).is_ok(), "rejected {sid}");
        }
    }

    #[test]
    fn validate_rejects_malformed_ids() {
        for sid in [
            "",
            "0x",
            "0x123",
            // 65 chars: one hex digit short
            "0x234567890abcdef1234567890abcdef1234567890abcdef1234567890abcdef",
            // 67 chars: one hex digit long
            "0x11234567890abcdef1234567890abcdef1234567890abcdef1234567890abcdef",
            // missing prefix
            "1234567890abcdef1234567890abcdef1234567890abcdef1234567890abcdef",
            // invalid hex char
            "0x1234567890abcdef1234567890abcdef1234567890abcdef1234567890abcdeg",
        ] {
            assert!(validate_subspace_id(sid).is_err(), "accepted {sid:?}");
        }
    }

    proptest! {
        #[test]
        fn calculated_ids_always_validate(
            name in ".{0,32}",
            ops in ".{0,32}",
            rules in ".{0,32}",
        ) {
            let sid = calculate_subspace_id(&name, &ops, &rules);
            prop_assert!(validate_subspace_id(&sid).is_ok());
        }
    }
}
