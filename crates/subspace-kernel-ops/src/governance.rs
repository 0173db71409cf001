//! Governance operations: post, propose, vote, invite, mint.

use subspace_kernel_core::registry::{
    KIND_GOVERNANCE_INVITE, KIND_GOVERNANCE_MINT, KIND_GOVERNANCE_POST, KIND_GOVERNANCE_PROPOSE,
    KIND_GOVERNANCE_VOTE, OP_INVITE, OP_MINT, OP_POST, OP_PROPOSE, OP_VOTE,
};
use subspace_kernel_core::{Envelope, Tag};

use crate::error::OpsError;
use crate::op::{extract_common, impl_subspace_op, resolve_operation, CommonTags, SubspaceOpEnvelope};

/// A post in a governance subspace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostEvent {
    pub op: SubspaceOpEnvelope,
    pub content_type: String,
}

impl PostEvent {
    pub fn new(subspace_id: &str) -> Result<Self, OpsError> {
        Ok(Self {
            op: SubspaceOpEnvelope::new(subspace_id, KIND_GOVERNANCE_POST)?,
            content_type: String::new(),
        })
    }

    /// Set the content type of the post.
    pub fn set_content_type(&mut self, content_type: &str) {
        self.op
            .envelope
            .push_tag(Tag::pair("content_type", content_type));
        self.content_type = content_type.to_string();
    }

    fn decode(envelope: Envelope, operation: &str, common: CommonTags) -> Self {
        let mut content_type = String::new();
        for tag in &envelope.tags {
            let Some(value) = tag.value() else { continue };
            if tag.name() == Some("content_type") {
                content_type = value.to_string();
            }
        }
        Self {
            op: SubspaceOpEnvelope::from_parts(envelope, operation, common),
            content_type,
        }
    }
}

/// A rule-change proposal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProposeEvent {
    pub op: SubspaceOpEnvelope,
    pub proposal_id: String,
    pub rules: String,
}

impl ProposeEvent {
    pub fn new(subspace_id: &str) -> Result<Self, OpsError> {
        Ok(Self {
            op: SubspaceOpEnvelope::new(subspace_id, KIND_GOVERNANCE_PROPOSE)?,
            proposal_id: String::new(),
            rules: String::new(),
        })
    }

    /// Set the proposal id and the proposed rules.
    pub fn set_proposal(&mut self, proposal_id: &str, rules: &str) {
        self.op.envelope.push_tag(Tag::pair("proposal_id", proposal_id));
        if !rules.is_empty() {
            self.op.envelope.push_tag(Tag::pair("rules", rules));
        }
        self.proposal_id = proposal_id.to_string();
        self.rules = rules.to_string();
    }

    fn decode(envelope: Envelope, operation: &str, common: CommonTags) -> Self {
        let mut proposal_id = String::new();
        let mut rules = String::new();
        for tag in &envelope.tags {
            let Some(value) = tag.value() else { continue };
            match tag.name() {
                Some("proposal_id") => proposal_id = value.to_string(),
                Some("rules") => rules = value.to_string(),
                _ => {}
            }
        }
        Self {
            op: SubspaceOpEnvelope::from_parts(envelope, operation, common),
            proposal_id,
            rules,
        }
    }
}

/// A vote on a proposal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VoteEvent {
    pub op: SubspaceOpEnvelope,
    pub proposal_id: String,
    pub vote: String,
}

impl VoteEvent {
    pub fn new(subspace_id: &str) -> Result<Self, OpsError> {
        Ok(Self {
            op: SubspaceOpEnvelope::new(subspace_id, KIND_GOVERNANCE_VOTE)?,
            proposal_id: String::new(),
            vote: String::new(),
        })
    }

    /// Set the vote for a proposal.
    pub fn set_vote(&mut self, proposal_id: &str, vote: &str) {
        self.op.envelope.push_tag(Tag::pair("proposal_id", proposal_id));
        self.op.envelope.push_tag(Tag::pair("vote", vote));
        self.proposal_id = proposal_id.to_string();
        self.vote = vote.to_string();
    }

    fn decode(envelope: Envelope, operation: &str, common: CommonTags) -> Self {
        let mut proposal_id = String::new();
        let mut vote = String::new();
        for tag in &envelope.tags {
            let Some(value) = tag.value() else { continue };
            match tag.name() {
                Some("proposal_id") => proposal_id = value.to_string(),
                Some("vote") => vote = value.to_string(),
                _ => {}
            }
        }
        Self {
            op: SubspaceOpEnvelope::from_parts(envelope, operation, common),
            proposal_id,
            vote,
        }
    }
}

/// An invitation into the subspace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InviteEvent {
    pub op: SubspaceOpEnvelope,
    pub inviter_addr: String,
    pub rules: String,
}

impl InviteEvent {
    pub fn new(subspace_id: &str) -> Result<Self, OpsError> {
        Ok(Self {
            op: SubspaceOpEnvelope::new(subspace_id, KIND_GOVERNANCE_INVITE)?,
            inviter_addr: String::new(),
            rules: String::new(),
        })
    }

    /// Set the inviter address and the admission rules.
    pub fn set_inviter(&mut self, inviter_addr: &str, rules: &str) {
        self.op.envelope.push_tag(Tag::pair("inviter_addr", inviter_addr));
        if !rules.is_empty() {
            self.op.envelope.push_tag(Tag::pair("rules", rules));
        }
        self.inviter_addr = inviter_addr.to_string();
        self.rules = rules.to_string();
    }

    fn decode(envelope: Envelope, operation: &str, common: CommonTags) -> Self {
        let mut inviter_addr = String::new();
        let mut rules = String::new();
        for tag in &envelope.tags {
            let Some(value) = tag.value() else { continue };
            match tag.name() {
                Some("inviter_addr") => inviter_addr = value.to_string(),
                Some("rules") => rules = value.to_string(),
                _ => {}
            }
        }
        Self {
            op: SubspaceOpEnvelope::from_parts(envelope, operation, common),
            inviter_addr,
            rules,
        }
    }
}

/// A token mint declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MintEvent {
    pub op: SubspaceOpEnvelope,
    pub token_name: String,
    pub token_symbol: String,
    pub token_decimals: String,
    pub initial_supply: String,
    pub drop_ratio: String,
}

impl MintEvent {
    pub fn new(subspace_id: &str) -> Result<Self, OpsError> {
        Ok(Self {
            op: SubspaceOpEnvelope::new(subspace_id, KIND_GOVERNANCE_MINT)?,
            token_name: String::new(),
            token_symbol: String::new(),
            token_decimals: String::new(),
            initial_supply: String::new(),
            drop_ratio: String::new(),
        })
    }

    /// Set the token metadata for the mint.
    pub fn set_token_info(
        &mut self,
        name: &str,
        symbol: &str,
        decimals: &str,
        initial_supply: &str,
        drop_ratio: &str,
    ) {
        self.op.envelope.push_tag(Tag::pair("token_name", name));
        self.op.envelope.push_tag(Tag::pair("token_symbol", symbol));
        self.op.envelope.push_tag(Tag::pair("token_decimals", decimals));
        self.op.envelope.push_tag(Tag::pair("initial_supply", initial_supply));
        self.op.envelope.push_tag(Tag::pair("drop_ratio", drop_ratio));
        self.token_name = name.to_string();
        self.token_symbol = symbol.to_string();
        self.token_decimals = decimals.to_string();
        self.initial_supply = initial_supply.to_string();
        self.drop_ratio = drop_ratio.to_string();
    }

    /// Parse the drop ratio as `actionId:points,...` reward rules.
    ///
    /// Segments that are not a `number:number` pair are skipped.
    pub fn parse_reward_rules(&self) -> std::collections::HashMap<u32, u32> {
        let mut rules = std::collections::HashMap::new();
        for segment in self.drop_ratio.split(',') {
            let Some((action, points)) = segment.split_once(':') else {
                continue;
            };
            if let (Ok(action), Ok(points)) = (action.parse(), points.parse()) {
                rules.insert(action, points);
            }
        }
        rules
    }

    fn decode(envelope: Envelope, operation: &str, common: CommonTags) -> Self {
        let mut token_name = String::new();
        let mut token_symbol = String::new();
        let mut token_decimals = String::new();
        let mut initial_supply = String::new();
        let mut drop_ratio = String::new();
        for tag in &envelope.tags {
            let Some(value) = tag.value() else { continue };
            match tag.name() {
                Some("token_name") => token_name = value.to_string(),
                Some("token_symbol") => token_symbol = value.to_string(),
                Some("token_decimals") => token_decimals = value.to_string(),
                Some("initial_supply") => initial_supply = value.to_string(),
                Some("drop_ratio") => drop_ratio = value.to_string(),
                _ => {}
            }
        }
        Self {
            op: SubspaceOpEnvelope::from_parts(envelope, operation, common),
            token_name,
            token_symbol,
            token_decimals,
            initial_supply,
            drop_ratio,
        }
    }
}

impl_subspace_op!(PostEvent, ProposeEvent, VoteEvent, InviteEvent, MintEvent);

/// A decoded governance operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GovernanceEvent {
    Post(PostEvent),
    Propose(ProposeEvent),
    Vote(VoteEvent),
    Invite(InviteEvent),
    Mint(MintEvent),
}

impl crate::op::SubspaceOp for GovernanceEvent {
    fn header(&self) -> &SubspaceOpEnvelope {
        match self {
            Self::Post(e) => &e.op,
            Self::Propose(e) => &e.op,
            Self::Vote(e) => &e.op,
            Self::Invite(e) => &e.op,
            Self::Mint(e) => &e.op,
        }
    }
}

/// Decode a raw envelope into a governance operation.
pub fn parse_governance_event(envelope: Envelope) -> Result<GovernanceEvent, OpsError> {
    let common = extract_common(&envelope)?;
    let operation = resolve_operation(&envelope)?;

    match operation {
        OP_POST => Ok(GovernanceEvent::Post(PostEvent::decode(
            envelope, operation, common,
        ))),
        OP_PROPOSE => Ok(GovernanceEvent::Propose(ProposeEvent::decode(
            envelope, operation, common,
        ))),
        OP_VOTE => Ok(GovernanceEvent::Vote(VoteEvent::decode(
            envelope, operation, common,
        ))),
        OP_INVITE => Ok(GovernanceEvent::Invite(InviteEvent::decode(
            envelope, operation, common,
        ))),
        OP_MINT => Ok(GovernanceEvent::Mint(MintEvent::decode(
            envelope, operation, common,
        ))),
        other => Err(OpsError::UnknownOperation(other.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::op::SubspaceOp;
    use subspace_kernel_core::Action;

    const SID: &str = "0x1234567890abcdef1234567890abcdef1234567890abcdef1234567890abcdef";

    #[test]
    fn post_round_trip() {
        let mut post = PostEvent::new(SID).unwrap();
        post.set_content_type("markdown");
        post.op.set_auth(Action::WRITE, 30300, 100);
        post.op.set_parents(vec!["deadbeef".into()]);

        let parsed = parse_governance_event(post.op.envelope.clone()).unwrap();
        let GovernanceEvent::Post(parsed) = parsed else {
            panic!("expected post");
        };
        assert_eq!(parsed.subspace_id(), SID);
        assert_eq!(parsed.operation(), OP_POST);
        assert_eq!(parsed.content_type, "markdown");
        assert_eq!(parsed.parents(), ["deadbeef".to_string()]);
        assert!(parsed.auth().unwrap().has_permission(Action::WRITE));
    }

    #[test]
    fn vote_round_trip() {
        let mut vote = VoteEvent::new(SID).unwrap();
        vote.set_vote("prop-1", "yes");

        let parsed = parse_governance_event(vote.op.envelope.clone()).unwrap();
        let GovernanceEvent::Vote(parsed) = parsed else {
            panic!("expected vote");
        };
        assert_eq!(parsed.proposal_id, "prop-1");
        assert_eq!(parsed.vote, "yes");
    }

    #[test]
    fn propose_omits_empty_rules() {
        let mut propose = ProposeEvent::new(SID).unwrap();
        propose.set_proposal("prop-2", "");
        assert!(!propose.op.envelope.has_tag("rules"));

        propose.set_proposal("prop-2", "quorum>10");
        assert!(propose.op.envelope.has_tag("rules"));
    }

    #[test]
    fn mint_reward_rules() {
        let mut mint = MintEvent::new(SID).unwrap();
        mint.set_token_info("Token", "TKN", "18", "1000000", "30300:10,30302:5,bad,1:x");

        let rules = mint.parse_reward_rules();
        assert_eq!(rules.len(), 2);
        assert_eq!(rules[&30300], 10);
        assert_eq!(rules[&30302], 5);
    }

    #[test]
    fn unknown_kind_is_rejected() {
        let envelope = Envelope::skeleton(99999, 0);
        assert_eq!(
            parse_governance_event(envelope),
            Err(OpsError::UnknownKind(99999))
        );
    }

    #[test]
    fn known_kind_outside_module_is_unknown_operation() {
        // A social kind resolves in the registry, but governance has no
        // decoder for it.
        let envelope = Envelope::skeleton(30600, 0);
        assert_eq!(
            parse_governance_event(envelope),
            Err(OpsError::UnknownOperation("like".into()))
        );
    }

    #[test]
    fn duplicate_setter_calls_accumulate_tags() {
        let mut post = PostEvent::new(SID).unwrap();
        post.set_content_type("markdown");
        post.set_content_type("html");

        let count = post
            .op
            .envelope
            .tags
            .iter()
            .filter(|t| t.is_named("content_type"))
            .count();
        assert_eq!(count, 2);

        // Decoders resolve the last occurrence.
        let parsed = parse_governance_event(post.op.envelope.clone()).unwrap();
        let GovernanceEvent::Post(parsed) = parsed else {
            panic!("expected post");
        };
        assert_eq!(parsed.content_type, "html");
    }
}
