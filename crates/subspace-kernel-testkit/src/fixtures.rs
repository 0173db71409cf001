//! Test fixtures and helpers.
//!
//! Common setup code for integration tests: a declared subspace plus
//! builders for operations inside it, and a stand-in for the external
//! signing layer that stamps identity fields onto envelopes.

use rand::RngCore;

use subspace_kernel_core::registry::DEFAULT_SUBSPACE_OPS;
use subspace_kernel_core::{Action, Envelope};
use subspace_kernel_ops::{PostEvent, ProposeEvent, SubspaceCreateEvent, SubspaceJoinEvent, VoteEvent};

/// A test fixture with one declared subspace.
pub struct SubspaceFixture {
    pub create: SubspaceCreateEvent,
}

impl SubspaceFixture {
    /// Create a governance subspace with the default operations.
    pub fn new(name: &str) -> Self {
        Self {
            create: SubspaceCreateEvent::new(
                name,
                DEFAULT_SUBSPACE_OPS,
                "energy>1000",
                "Fixture subspace",
                "",
            ),
        }
    }

    /// The derived subspace id.
    pub fn subspace_id(&self) -> &str {
        &self.create.subspace_id
    }

    /// A join envelope for this subspace.
    pub fn join(&self) -> SubspaceJoinEvent {
        SubspaceJoinEvent::new(self.subspace_id())
    }

    /// A post carrying a write capability.
    pub fn post(&self, content_type: &str, key: u32, exp: u64) -> PostEvent {
        let mut post = PostEvent::new(self.subspace_id()).expect("governance kind is registered");
        post.set_content_type(content_type);
        post.op.set_auth(Action::WRITE, key, exp);
        post
    }

    /// A proposal with the given id and rules.
    pub fn propose(&self, proposal_id: &str, rules: &str) -> ProposeEvent {
        let mut propose =
            ProposeEvent::new(self.subspace_id()).expect("governance kind is registered");
        propose.set_proposal(proposal_id, rules);
        propose
    }

    /// A vote on a proposal.
    pub fn vote(&self, proposal_id: &str, vote: &str) -> VoteEvent {
        let mut event = VoteEvent::new(self.subspace_id()).expect("governance kind is registered");
        event.set_vote(proposal_id, vote);
        event
    }
}

impl Default for SubspaceFixture {
    fn default() -> Self {
        Self::new("fixture-subspace")
    }
}

/// A random 32-byte identifier rendered as 64 hex characters.
pub fn random_hex_id() -> String {
    let mut bytes = [0u8; 32];
    rand::thread_rng().fill_bytes(&mut bytes);
    hex::encode(bytes)
}

/// Stamp identity fields onto an envelope, standing in for the external
/// signing layer. The values are random, not real signatures.
pub fn stamp_identity(envelope: &mut Envelope) {
    envelope.id = random_hex_id();
    envelope.pubkey = random_hex_id();
    envelope.sig = format!("{}{}", random_hex_id(), random_hex_id());
}

#[cfg(test)]
mod tests {
    use super::*;
    use subspace_kernel::{parse_subspace_event, SubspaceEvent};
    use subspace_kernel_core::validate_subspace_id;

    #[test]
    fn fixture_subspace_validates() {
        let fixture = SubspaceFixture::default();
        assert!(fixture.create.validate().is_ok());
        assert!(validate_subspace_id(fixture.subspace_id()).is_ok());
    }

    #[test]
    fn fixture_operations_decode() {
        let fixture = SubspaceFixture::new("decode-me");
        let mut post = fixture.post("markdown", 30300, 100);
        stamp_identity(&mut post.op.envelope);

        let event = parse_subspace_event(post.op.envelope.clone()).unwrap();
        assert!(matches!(event, SubspaceEvent::Governance(_)));
        assert_eq!(event.subspace_id(), fixture.subspace_id());
        assert_eq!(event.header().unwrap().envelope.id, post.op.envelope.id);
    }

    #[test]
    fn random_ids_are_distinct() {
        assert_ne!(random_hex_id(), random_hex_id());
    }
}
