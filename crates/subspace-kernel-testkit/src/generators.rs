//! Proptest generators for property-based testing.

use proptest::prelude::*;

use subspace_kernel_core::{calculate_subspace_id, Action, AuthTag, CausalityKey, Envelope, Tag};

/// Generate an arbitrary permission mask, unknown bits included.
pub fn action() -> impl Strategy<Value = Action> {
    any::<u8>().prop_map(Action::from_bits_retain)
}

/// Generate an arbitrary auth tag.
pub fn auth_tag() -> impl Strategy<Value = AuthTag> {
    (action(), any::<u32>(), any::<u64>()).prop_map(|(action, key, exp)| AuthTag::new(action, key, exp))
}

/// Generate an arbitrary causality key.
pub fn causality_key() -> impl Strategy<Value = CausalityKey> {
    (any::<u32>(), any::<u64>()).prop_map(|(key, counter)| CausalityKey::new(key, counter))
}

/// Generate a valid subspace id by hashing arbitrary declarations.
pub fn subspace_id() -> impl Strategy<Value = String> {
    (".{0,16}", ".{0,16}", ".{0,16}")
        .prop_map(|(name, ops, rules)| calculate_subspace_id(&name, &ops, &rules))
}

/// Generate a tag name drawn from the vocabulary the core consumes.
pub fn tag_name() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("sid".to_string()),
        Just("auth".to_string()),
        Just("parent".to_string()),
        Just("d".to_string()),
        Just("op".to_string()),
        "[a-z_]{1,12}",
    ]
}

/// Generate an envelope of the given kind with arbitrary well-formed tags.
pub fn envelope(kind: u32) -> impl Strategy<Value = Envelope> {
    prop::collection::vec((tag_name(), ".{0,16}"), 0..8).prop_map(move |tags| {
        let mut env = Envelope::skeleton(kind, 0);
        for (name, value) in tags {
            // `auth` carries a value that always parses; everything else is
            // free-form.
            if name == "auth" {
                env.push_tag(Tag::pair(name, "action=1,key=1,exp=1"));
            } else {
                env.push_tag(Tag::pair(name, value));
            }
        }
        env
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use subspace_kernel_core::validate_subspace_id;
    use subspace_kernel_ops::parse_governance_event;

    proptest! {
        #[test]
        fn generated_subspace_ids_validate(sid in subspace_id()) {
            prop_assert!(validate_subspace_id(&sid).is_ok());
        }

        #[test]
        fn generated_auth_tags_round_trip(tag in auth_tag()) {
            let parsed: AuthTag = tag.to_string().parse().unwrap();
            prop_assert_eq!(parsed, tag);
        }

        #[test]
        fn governance_decode_is_total_over_well_formed_tags(
            env in envelope(subspace_kernel_core::registry::KIND_GOVERNANCE_POST)
        ) {
            // Decoding either succeeds or fails; it never panics, and the
            // input is untouched.
            let before = env.clone();
            let _ = parse_governance_event(env.clone());
            prop_assert_eq!(env, before);
        }
    }
}
