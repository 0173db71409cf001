//! Community operations: community creation, invitations, channels, and
//! channel messages.

use subspace_kernel_core::registry::{
    KIND_COMMUNITY_CHANNEL_CREATE, KIND_COMMUNITY_CHANNEL_MESSAGE, KIND_COMMUNITY_CREATE,
    KIND_COMMUNITY_INVITE, OP_CHANNEL_CREATE, OP_CHANNEL_MESSAGE, OP_COMMUNITY_CREATE,
    OP_COMMUNITY_INVITE,
};
use subspace_kernel_core::{Envelope, Tag};

use crate::error::OpsError;
use crate::op::{extract_common, impl_subspace_op, resolve_operation, CommonTags, SubspaceOpEnvelope};

/// A community creation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommunityCreateEvent {
    pub op: SubspaceOpEnvelope,
    pub community_id: String,
    pub name: String,
    pub community_type: String,
}

impl CommunityCreateEvent {
    pub fn new(subspace_id: &str) -> Result<Self, OpsError> {
        Ok(Self {
            op: SubspaceOpEnvelope::new(subspace_id, KIND_COMMUNITY_CREATE)?,
            community_id: String::new(),
            name: String::new(),
            community_type: String::new(),
        })
    }

    /// Set the community id, display name, and type.
    pub fn set_community_create_info(&mut self, community_id: &str, name: &str, community_type: &str) {
        self.op.envelope.push_tag(Tag::pair("community_id", community_id));
        self.op.envelope.push_tag(Tag::pair("name", name));
        self.op.envelope.push_tag(Tag::pair("type", community_type));
        self.community_id = community_id.to_string();
        self.name = name.to_string();
        self.community_type = community_type.to_string();
    }

    fn decode(envelope: Envelope, operation: &str, common: CommonTags) -> Self {
        let mut community_id = String::new();
        let mut name = String::new();
        let mut community_type = String::new();
        for tag in &envelope.tags {
            let Some(value) = tag.value() else { continue };
            match tag.name() {
                Some("community_id") => community_id = value.to_string(),
                Some("name") => name = value.to_string(),
                Some("type") => community_type = value.to_string(),
                _ => {}
            }
        }
        Self {
            op: SubspaceOpEnvelope::from_parts(envelope, operation, common),
            community_id,
            name,
            community_type,
        }
    }
}

/// An invitation into a community.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommunityInviteEvent {
    pub op: SubspaceOpEnvelope,
    pub community_id: String,
    pub inviter_id: String,
    pub invitee_id: String,
    pub method: String,
}

impl CommunityInviteEvent {
    pub fn new(subspace_id: &str) -> Result<Self, OpsError> {
        Ok(Self {
            op: SubspaceOpEnvelope::new(subspace_id, KIND_COMMUNITY_INVITE)?,
            community_id: String::new(),
            inviter_id: String::new(),
            invitee_id: String::new(),
            method: String::new(),
        })
    }

    /// Set the invitation parties and delivery method.
    pub fn set_community_invite_info(
        &mut self,
        community_id: &str,
        inviter_id: &str,
        invitee_id: &str,
        method: &str,
    ) {
        self.op.envelope.push_tag(Tag::pair("community_id", community_id));
        self.op.envelope.push_tag(Tag::pair("inviter_id", inviter_id));
        self.op.envelope.push_tag(Tag::pair("invitee_id", invitee_id));
        self.op.envelope.push_tag(Tag::pair("method", method));
        self.community_id = community_id.to_string();
        self.inviter_id = inviter_id.to_string();
        self.invitee_id = invitee_id.to_string();
        self.method = method.to_string();
    }

    fn decode(envelope: Envelope, operation: &str, common: CommonTags) -> Self {
        let mut community_id = String::new();
        let mut inviter_id = String::new();
        let mut invitee_id = String::new();
        let mut method = String::new();
        for tag in &envelope.tags {
            let Some(value) = tag.value() else { continue };
            match tag.name() {
                Some("community_id") => community_id = value.to_string(),
                Some("inviter_id") => inviter_id = value.to_string(),
                Some("invitee_id") => invitee_id = value.to_string(),
                Some("method") => method = value.to_string(),
                _ => {}
            }
        }
        Self {
            op: SubspaceOpEnvelope::from_parts(envelope, operation, common),
            community_id,
            inviter_id,
            invitee_id,
            method,
        }
    }
}

/// A channel creation within a community.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChannelCreateEvent {
    pub op: SubspaceOpEnvelope,
    pub community_id: String,
    pub channel_id: String,
    pub name: String,
    pub channel_type: String,
}

impl ChannelCreateEvent {
    pub fn new(subspace_id: &str) -> Result<Self, OpsError> {
        Ok(Self {
            op: SubspaceOpEnvelope::new(subspace_id, KIND_COMMUNITY_CHANNEL_CREATE)?,
            community_id: String::new(),
            channel_id: String::new(),
            name: String::new(),
            channel_type: String::new(),
        })
    }

    /// Set the channel identity and type.
    pub fn set_channel_create_info(
        &mut self,
        community_id: &str,
        channel_id: &str,
        name: &str,
        channel_type: &str,
    ) {
        self.op.envelope.push_tag(Tag::pair("community_id", community_id));
        self.op.envelope.push_tag(Tag::pair("channel_id", channel_id));
        self.op.envelope.push_tag(Tag::pair("name", name));
        self.op.envelope.push_tag(Tag::pair("type", channel_type));
        self.community_id = community_id.to_string();
        self.channel_id = channel_id.to_string();
        self.name = name.to_string();
        self.channel_type = channel_type.to_string();
    }

    fn decode(envelope: Envelope, operation: &str, common: CommonTags) -> Self {
        let mut community_id = String::new();
        let mut channel_id = String::new();
        let mut name = String::new();
        let mut channel_type = String::new();
        for tag in &envelope.tags {
            let Some(value) = tag.value() else { continue };
            match tag.name() {
                Some("community_id") => community_id = value.to_string(),
                Some("channel_id") => channel_id = value.to_string(),
                Some("name") => name = value.to_string(),
                Some("type") => channel_type = value.to_string(),
                _ => {}
            }
        }
        Self {
            op: SubspaceOpEnvelope::from_parts(envelope, operation, common),
            community_id,
            channel_id,
            name,
            channel_type,
        }
    }
}

/// A message posted to a channel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChannelMessageEvent {
    pub op: SubspaceOpEnvelope,
    pub channel_id: String,
    pub user_id: String,
    pub reply_to: String,
}

impl ChannelMessageEvent {
    pub fn new(subspace_id: &str) -> Result<Self, OpsError> {
        Ok(Self {
            op: SubspaceOpEnvelope::new(subspace_id, KIND_COMMUNITY_CHANNEL_MESSAGE)?,
            channel_id: String::new(),
            user_id: String::new(),
            reply_to: String::new(),
        })
    }

    /// Set the target channel, author, and optional reply target.
    pub fn set_channel_message_info(&mut self, channel_id: &str, user_id: &str, reply_to: &str) {
        self.op.envelope.push_tag(Tag::pair("channel_id", channel_id));
        self.op.envelope.push_tag(Tag::pair("user_id", user_id));
        if !reply_to.is_empty() {
            self.op.envelope.push_tag(Tag::pair("reply_to", reply_to));
        }
        self.channel_id = channel_id.to_string();
        self.user_id = user_id.to_string();
        self.reply_to = reply_to.to_string();
    }

    fn decode(envelope: Envelope, operation: &str, common: CommonTags) -> Self {
        let mut channel_id = String::new();
        let mut user_id = String::new();
        let mut reply_to = String::new();
        for tag in &envelope.tags {
            let Some(value) = tag.value() else { continue };
            match tag.name() {
                Some("channel_id") => channel_id = value.to_string(),
                Some("user_id") => user_id = value.to_string(),
                Some("reply_to") => reply_to = value.to_string(),
                _ => {}
            }
        }
        Self {
            op: SubspaceOpEnvelope::from_parts(envelope, operation, common),
            channel_id,
            user_id,
            reply_to,
        }
    }
}

impl_subspace_op!(
    CommunityCreateEvent,
    CommunityInviteEvent,
    ChannelCreateEvent,
    ChannelMessageEvent,
);

/// A decoded community operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommunityEvent {
    Create(CommunityCreateEvent),
    Invite(CommunityInviteEvent),
    ChannelCreate(ChannelCreateEvent),
    ChannelMessage(ChannelMessageEvent),
}

impl crate::op::SubspaceOp for CommunityEvent {
    fn header(&self) -> &SubspaceOpEnvelope {
        match self {
            Self::Create(e) => &e.op,
            Self::Invite(e) => &e.op,
            Self::ChannelCreate(e) => &e.op,
            Self::ChannelMessage(e) => &e.op,
        }
    }
}

/// Decode a raw envelope into a community operation.
pub fn parse_community_event(envelope: Envelope) -> Result<CommunityEvent, OpsError> {
    let common = extract_common(&envelope)?;
    let operation = resolve_operation(&envelope)?;

    match operation {
        OP_COMMUNITY_CREATE => Ok(CommunityEvent::Create(CommunityCreateEvent::decode(
            envelope, operation, common,
        ))),
        OP_COMMUNITY_INVITE => Ok(CommunityEvent::Invite(CommunityInviteEvent::decode(
            envelope, operation, common,
        ))),
        OP_CHANNEL_CREATE => Ok(CommunityEvent::ChannelCreate(ChannelCreateEvent::decode(
            envelope, operation, common,
        ))),
        OP_CHANNEL_MESSAGE => Ok(CommunityEvent::ChannelMessage(ChannelMessageEvent::decode(
            envelope, operation, common,
        ))),
        other => Err(OpsError::UnknownOperation(other.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::op::SubspaceOp;

    const SID: &str = "0x1234567890abcdef1234567890abcdef1234567890abcdef1234567890abcdef";

    #[test]
    fn community_create_round_trip() {
        let mut create = CommunityCreateEvent::new(SID).unwrap();
        create.set_community_create_info("comm-1", "Rustaceans", "public");

        let parsed = parse_community_event(create.op.envelope.clone()).unwrap();
        let CommunityEvent::Create(parsed) = parsed else {
            panic!("expected create");
        };
        assert_eq!(parsed.community_id, "comm-1");
        assert_eq!(parsed.community_type, "public");
        assert_eq!(parsed.subspace_id(), SID);
    }

    #[test]
    fn invite_round_trip() {
        let mut invite = CommunityInviteEvent::new(SID).unwrap();
        invite.set_community_invite_info("comm-1", "alice", "bob", "direct");

        let parsed = parse_community_event(invite.op.envelope.clone()).unwrap();
        let CommunityEvent::Invite(parsed) = parsed else {
            panic!("expected invite");
        };
        assert_eq!(parsed.inviter_id, "alice");
        assert_eq!(parsed.invitee_id, "bob");
        assert_eq!(parsed.method, "direct");
    }

    #[test]
    fn channel_message_reply_is_optional() {
        let mut message = ChannelMessageEvent::new(SID).unwrap();
        message.set_channel_message_info("chan-1", "carol", "");
        assert!(!message.op.envelope.has_tag("reply_to"));

        let parsed = parse_community_event(message.op.envelope.clone()).unwrap();
        let CommunityEvent::ChannelMessage(parsed) = parsed else {
            panic!("expected channel message");
        };
        assert_eq!(parsed.channel_id, "chan-1");
        assert!(parsed.reply_to.is_empty());
    }

    #[test]
    fn social_kind_is_unknown_operation_here() {
        let envelope = Envelope::skeleton(30608, 0);
        assert_eq!(
            parse_community_event(envelope),
            Err(OpsError::UnknownOperation("room".into()))
        );
    }
}
