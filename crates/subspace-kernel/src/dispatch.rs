//! Cross-module dispatch: route an arbitrary envelope to the module that
//! owns its kind block.

use subspace_kernel_core::registry::{
    KIND_COMMON_GRAPH_OBSERVATION, KIND_COMMON_GRAPH_PROJECT, KIND_COMMUNITY_CHANNEL_MESSAGE,
    KIND_COMMUNITY_CREATE, KIND_GOVERNANCE_MINT, KIND_GOVERNANCE_POST, KIND_MODEL_GRAPH_MODEL,
    KIND_MODEL_GRAPH_SESSION, KIND_OPEN_RESEARCH_CO_CREATE, KIND_OPEN_RESEARCH_PAPER,
    KIND_SOCIAL_LIKE, KIND_SOCIAL_MESSAGE, KIND_SUBSPACE_CREATE, KIND_SUBSPACE_JOIN,
};
use subspace_kernel_core::Envelope;
use subspace_kernel_ops::{
    parse_common_graph_event, parse_community_event, parse_governance_event,
    parse_model_graph_event, parse_open_research_event, parse_social_event, CommonGraphEvent,
    CommunityEvent, GovernanceEvent, ModelGraphEvent, OpenResearchEvent, OpsError, SocialEvent,
    SubspaceCreateEvent, SubspaceJoinEvent, SubspaceOp, SubspaceOpEnvelope,
};

/// Any decoded subspace event, across every builtin module.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubspaceEvent {
    SubspaceCreate(SubspaceCreateEvent),
    SubspaceJoin(SubspaceJoinEvent),
    Governance(GovernanceEvent),
    CommonGraph(CommonGraphEvent),
    ModelGraph(ModelGraphEvent),
    OpenResearch(OpenResearchEvent),
    Social(SocialEvent),
    Community(CommunityEvent),
}

impl SubspaceEvent {
    /// The common operation header, for events that carry one.
    ///
    /// Subspace creation and join are lifecycle envelopes, not subspace
    /// operations, so they have no header.
    pub fn header(&self) -> Option<&SubspaceOpEnvelope> {
        match self {
            Self::SubspaceCreate(_) | Self::SubspaceJoin(_) => None,
            Self::Governance(e) => Some(e.header()),
            Self::CommonGraph(e) => Some(e.header()),
            Self::ModelGraph(e) => Some(e.header()),
            Self::OpenResearch(e) => Some(e.header()),
            Self::Social(e) => Some(e.header()),
            Self::Community(e) => Some(e.header()),
        }
    }

    /// The subspace id the event targets.
    pub fn subspace_id(&self) -> &str {
        match self {
            Self::SubspaceCreate(e) => e.subspace_id.as_str(),
            Self::SubspaceJoin(e) => e.subspace_id.as_str(),
            other => other
                .header()
                .map(|h| h.subspace_id.as_str())
                .unwrap_or_default(),
        }
    }
}

/// Decode a raw envelope into whichever typed event its kind block owns.
///
/// A kind outside every reserved block fails with `UnknownKind`; everything
/// else follows the owning module's decode rules.
pub fn parse_subspace_event(envelope: Envelope) -> Result<SubspaceEvent, OpsError> {
    tracing::debug!(kind = envelope.kind, "dispatching envelope");

    match envelope.kind {
        KIND_SUBSPACE_CREATE => Ok(SubspaceEvent::SubspaceCreate(SubspaceCreateEvent::parse(
            envelope,
        )?)),
        KIND_SUBSPACE_JOIN => Ok(SubspaceEvent::SubspaceJoin(SubspaceJoinEvent::parse(
            envelope,
        )?)),
        KIND_COMMON_GRAPH_PROJECT..=KIND_COMMON_GRAPH_OBSERVATION => Ok(SubspaceEvent::CommonGraph(
            parse_common_graph_event(envelope)?,
        )),
        KIND_GOVERNANCE_POST..=KIND_GOVERNANCE_MINT => {
            Ok(SubspaceEvent::Governance(parse_governance_event(envelope)?))
        }
        KIND_MODEL_GRAPH_MODEL..=KIND_MODEL_GRAPH_SESSION => {
            Ok(SubspaceEvent::ModelGraph(parse_model_graph_event(envelope)?))
        }
        KIND_OPEN_RESEARCH_PAPER..=KIND_OPEN_RESEARCH_CO_CREATE => Ok(SubspaceEvent::OpenResearch(
            parse_open_research_event(envelope)?,
        )),
        KIND_SOCIAL_LIKE..=KIND_SOCIAL_MESSAGE => {
            Ok(SubspaceEvent::Social(parse_social_event(envelope)?))
        }
        KIND_COMMUNITY_CREATE..=KIND_COMMUNITY_CHANNEL_MESSAGE => {
            Ok(SubspaceEvent::Community(parse_community_event(envelope)?))
        }
        kind => Err(OpsError::UnknownKind(kind)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use subspace_kernel_ops::{LikeEvent, PostEvent};

    const SID: &str = "0x1234567890abcdef1234567890abcdef1234567890abcdef1234567890abcdef";

    #[test]
    fn routes_by_kind_block() {
        let post = PostEvent::new(SID).unwrap();
        let like = LikeEvent::new(SID).unwrap();

        assert!(matches!(
            parse_subspace_event(post.op.envelope.clone()),
            Ok(SubspaceEvent::Governance(GovernanceEvent::Post(_)))
        ));
        assert!(matches!(
            parse_subspace_event(like.op.envelope.clone()),
            Ok(SubspaceEvent::Social(SocialEvent::Like(_)))
        ));
    }

    #[test]
    fn unreserved_kind_is_unknown() {
        let envelope = Envelope::skeleton(1, 0);
        assert_eq!(
            parse_subspace_event(envelope),
            Err(OpsError::UnknownKind(1))
        );
    }

    #[test]
    fn subspace_id_accessor_spans_variants() {
        let post = PostEvent::new(SID).unwrap();
        let event = parse_subspace_event(post.op.envelope.clone()).unwrap();
        assert_eq!(event.subspace_id(), SID);
        assert!(event.header().is_some());
    }
}
