//! Social operations: likes, collects, shares, comments, tags, follows,
//! questions, rooms, and messages.

use subspace_kernel_core::registry::{
    KIND_SOCIAL_COLLECT, KIND_SOCIAL_COMMENT, KIND_SOCIAL_FOLLOW, KIND_SOCIAL_LIKE,
    KIND_SOCIAL_MESSAGE, KIND_SOCIAL_QUESTION, KIND_SOCIAL_ROOM, KIND_SOCIAL_SHARE,
    KIND_SOCIAL_TAG, KIND_SOCIAL_UNFOLLOW, OP_COLLECT, OP_COMMENT, OP_FOLLOW, OP_LIKE, OP_MESSAGE,
    OP_QUESTION, OP_ROOM, OP_SHARE, OP_TAG, OP_UNFOLLOW,
};
use subspace_kernel_core::{Envelope, Tag};

use crate::error::OpsError;
use crate::op::{extract_common, impl_subspace_op, resolve_operation, CommonTags, SubspaceOpEnvelope};

/// A like on an object.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LikeEvent {
    pub op: SubspaceOpEnvelope,
    pub object_id: String,
    pub user_id: String,
}

impl LikeEvent {
    pub fn new(subspace_id: &str) -> Result<Self, OpsError> {
        Ok(Self {
            op: SubspaceOpEnvelope::new(subspace_id, KIND_SOCIAL_LIKE)?,
            object_id: String::new(),
            user_id: String::new(),
        })
    }

    /// Set the liked object and the acting user.
    pub fn set_like_info(&mut self, object_id: &str, user_id: &str) {
        self.op.envelope.push_tag(Tag::pair("object_id", object_id));
        self.op.envelope.push_tag(Tag::pair("user_id", user_id));
        self.object_id = object_id.to_string();
        self.user_id = user_id.to_string();
    }

    fn decode(envelope: Envelope, operation: &str, common: CommonTags) -> Self {
        let (object_id, user_id) = scan_object_user(&envelope);
        Self {
            op: SubspaceOpEnvelope::from_parts(envelope, operation, common),
            object_id,
            user_id,
        }
    }
}

/// A collect (bookmark) of an object.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollectEvent {
    pub op: SubspaceOpEnvelope,
    pub object_id: String,
    pub user_id: String,
}

impl CollectEvent {
    pub fn new(subspace_id: &str) -> Result<Self, OpsError> {
        Ok(Self {
            op: SubspaceOpEnvelope::new(subspace_id, KIND_SOCIAL_COLLECT)?,
            object_id: String::new(),
            user_id: String::new(),
        })
    }

    /// Set the collected object and the acting user.
    pub fn set_collect_info(&mut self, object_id: &str, user_id: &str) {
        self.op.envelope.push_tag(Tag::pair("object_id", object_id));
        self.op.envelope.push_tag(Tag::pair("user_id", user_id));
        self.object_id = object_id.to_string();
        self.user_id = user_id.to_string();
    }

    fn decode(envelope: Envelope, operation: &str, common: CommonTags) -> Self {
        let (object_id, user_id) = scan_object_user(&envelope);
        Self {
            op: SubspaceOpEnvelope::from_parts(envelope, operation, common),
            object_id,
            user_id,
        }
    }
}

/// A share of an object to a platform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShareEvent {
    pub op: SubspaceOpEnvelope,
    pub object_id: String,
    pub user_id: String,
    pub platform: String,
    pub clicks: String,
}

impl ShareEvent {
    pub fn new(subspace_id: &str) -> Result<Self, OpsError> {
        Ok(Self {
            op: SubspaceOpEnvelope::new(subspace_id, KIND_SOCIAL_SHARE)?,
            object_id: String::new(),
            user_id: String::new(),
            platform: String::new(),
            clicks: String::new(),
        })
    }

    /// Set the shared object, the acting user, and the share target.
    pub fn set_share_info(&mut self, object_id: &str, user_id: &str, platform: &str, clicks: &str) {
        self.op.envelope.push_tag(Tag::pair("object_id", object_id));
        self.op.envelope.push_tag(Tag::pair("user_id", user_id));
        self.op.envelope.push_tag(Tag::pair("platform", platform));
        self.op.envelope.push_tag(Tag::pair("clicks", clicks));
        self.object_id = object_id.to_string();
        self.user_id = user_id.to_string();
        self.platform = platform.to_string();
        self.clicks = clicks.to_string();
    }

    fn decode(envelope: Envelope, operation: &str, common: CommonTags) -> Self {
        let mut object_id = String::new();
        let mut user_id = String::new();
        let mut platform = String::new();
        let mut clicks = String::new();
        for tag in &envelope.tags {
            let Some(value) = tag.value() else { continue };
            match tag.name() {
                Some("object_id") => object_id = value.to_string(),
                Some("user_id") => user_id = value.to_string(),
                Some("platform") => platform = value.to_string(),
                Some("clicks") => clicks = value.to_string(),
                _ => {}
            }
        }
        Self {
            op: SubspaceOpEnvelope::from_parts(envelope, operation, common),
            object_id,
            user_id,
            platform,
            clicks,
        }
    }
}

/// A comment on an object, optionally threaded under a parent comment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommentEvent {
    pub op: SubspaceOpEnvelope,
    pub object_id: String,
    pub user_id: String,
    pub parent: String,
}

impl CommentEvent {
    pub fn new(subspace_id: &str) -> Result<Self, OpsError> {
        Ok(Self {
            op: SubspaceOpEnvelope::new(subspace_id, KIND_SOCIAL_COMMENT)?,
            object_id: String::new(),
            user_id: String::new(),
            parent: String::new(),
        })
    }

    /// Set the commented object, the acting user, and an optional parent
    /// comment.
    pub fn set_comment_info(&mut self, object_id: &str, user_id: &str, parent: &str) {
        self.op.envelope.push_tag(Tag::pair("object_id", object_id));
        self.op.envelope.push_tag(Tag::pair("user_id", user_id));
        if !parent.is_empty() {
            self.op.envelope.push_tag(Tag::pair("parent", parent));
        }
        self.object_id = object_id.to_string();
        self.user_id = user_id.to_string();
        self.parent = parent.to_string();
    }

    fn decode(envelope: Envelope, operation: &str, common: CommonTags) -> Self {
        let mut object_id = String::new();
        let mut user_id = String::new();
        let mut parent = String::new();
        for tag in &envelope.tags {
            let Some(value) = tag.value() else { continue };
            match tag.name() {
                Some("object_id") => object_id = value.to_string(),
                Some("user_id") => user_id = value.to_string(),
                Some("parent") => parent = value.to_string(),
                _ => {}
            }
        }
        Self {
            op: SubspaceOpEnvelope::from_parts(envelope, operation, common),
            object_id,
            user_id,
            parent,
        }
    }
}

/// A label attached to an object.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagEvent {
    pub op: SubspaceOpEnvelope,
    pub object_id: String,
    pub tag: String,
}

impl TagEvent {
    pub fn new(subspace_id: &str) -> Result<Self, OpsError> {
        Ok(Self {
            op: SubspaceOpEnvelope::new(subspace_id, KIND_SOCIAL_TAG)?,
            object_id: String::new(),
            tag: String::new(),
        })
    }

    /// Set the tagged object and the label.
    pub fn set_tag_info(&mut self, object_id: &str, tag: &str) {
        self.op.envelope.push_tag(Tag::pair("object_id", object_id));
        self.op.envelope.push_tag(Tag::pair("tag", tag));
        self.object_id = object_id.to_string();
        self.tag = tag.to_string();
    }

    fn decode(envelope: Envelope, operation: &str, common: CommonTags) -> Self {
        let mut object_id = String::new();
        let mut tag_value = String::new();
        for tag in &envelope.tags {
            let Some(value) = tag.value() else { continue };
            match tag.name() {
                Some("object_id") => object_id = value.to_string(),
                Some("tag") => tag_value = value.to_string(),
                _ => {}
            }
        }
        Self {
            op: SubspaceOpEnvelope::from_parts(envelope, operation, common),
            object_id,
            tag: tag_value,
        }
    }
}

/// A follow of another user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FollowEvent {
    pub op: SubspaceOpEnvelope,
    pub user_id: String,
    pub target_id: String,
}

impl FollowEvent {
    pub fn new(subspace_id: &str) -> Result<Self, OpsError> {
        Ok(Self {
            op: SubspaceOpEnvelope::new(subspace_id, KIND_SOCIAL_FOLLOW)?,
            user_id: String::new(),
            target_id: String::new(),
        })
    }

    /// Set the follower and the followed user.
    pub fn set_follow_info(&mut self, user_id: &str, target_id: &str) {
        self.op.envelope.push_tag(Tag::pair("user_id", user_id));
        self.op.envelope.push_tag(Tag::pair("target_id", target_id));
        self.user_id = user_id.to_string();
        self.target_id = target_id.to_string();
    }

    fn decode(envelope: Envelope, operation: &str, common: CommonTags) -> Self {
        let (user_id, target_id) = scan_user_target(&envelope);
        Self {
            op: SubspaceOpEnvelope::from_parts(envelope, operation, common),
            user_id,
            target_id,
        }
    }
}

/// An unfollow of another user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnfollowEvent {
    pub op: SubspaceOpEnvelope,
    pub user_id: String,
    pub target_id: String,
}

impl UnfollowEvent {
    pub fn new(subspace_id: &str) -> Result<Self, OpsError> {
        Ok(Self {
            op: SubspaceOpEnvelope::new(subspace_id, KIND_SOCIAL_UNFOLLOW)?,
            user_id: String::new(),
            target_id: String::new(),
        })
    }

    /// Set the unfollower and the unfollowed user.
    pub fn set_unfollow_info(&mut self, user_id: &str, target_id: &str) {
        self.op.envelope.push_tag(Tag::pair("user_id", user_id));
        self.op.envelope.push_tag(Tag::pair("target_id", target_id));
        self.user_id = user_id.to_string();
        self.target_id = target_id.to_string();
    }

    fn decode(envelope: Envelope, operation: &str, common: CommonTags) -> Self {
        let (user_id, target_id) = scan_user_target(&envelope);
        Self {
            op: SubspaceOpEnvelope::from_parts(envelope, operation, common),
            user_id,
            target_id,
        }
    }
}

/// A quality question raised against an object.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionEvent {
    pub op: SubspaceOpEnvelope,
    pub object_id: String,
    pub user_id: String,
    pub quality: String,
}

impl QuestionEvent {
    pub fn new(subspace_id: &str) -> Result<Self, OpsError> {
        Ok(Self {
            op: SubspaceOpEnvelope::new(subspace_id, KIND_SOCIAL_QUESTION)?,
            object_id: String::new(),
            user_id: String::new(),
            quality: String::new(),
        })
    }

    /// Set the questioned object, the acting user, and the quality score.
    pub fn set_question_info(&mut self, object_id: &str, user_id: &str, quality: &str) {
        self.op.envelope.push_tag(Tag::pair("object_id", object_id));
        self.op.envelope.push_tag(Tag::pair("user_id", user_id));
        self.op.envelope.push_tag(Tag::pair("quality", quality));
        self.object_id = object_id.to_string();
        self.user_id = user_id.to_string();
        self.quality = quality.to_string();
    }

    fn decode(envelope: Envelope, operation: &str, common: CommonTags) -> Self {
        let mut object_id = String::new();
        let mut user_id = String::new();
        let mut quality = String::new();
        for tag in &envelope.tags {
            let Some(value) = tag.value() else { continue };
            match tag.name() {
                Some("object_id") => object_id = value.to_string(),
                Some("user_id") => user_id = value.to_string(),
                Some("quality") => quality = value.to_string(),
                _ => {}
            }
        }
        Self {
            op: SubspaceOpEnvelope::from_parts(envelope, operation, common),
            object_id,
            user_id,
            quality,
        }
    }
}

/// A chat room declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoomEvent {
    pub op: SubspaceOpEnvelope,
    pub name: String,
    pub description: String,
    pub members: Vec<String>,
}

impl RoomEvent {
    pub fn new(subspace_id: &str) -> Result<Self, OpsError> {
        Ok(Self {
            op: SubspaceOpEnvelope::new(subspace_id, KIND_SOCIAL_ROOM)?,
            name: String::new(),
            description: String::new(),
            members: Vec::new(),
        })
    }

    /// Set the room metadata and initial member list.
    pub fn set_room_info(&mut self, name: &str, description: &str, members: Vec<String>) {
        self.op.envelope.push_tag(Tag::pair("name", name));
        self.op.envelope.push_tag(Tag::pair("description", description));
        if !members.is_empty() {
            self.op
                .envelope
                .push_tag(Tag::list("members", members.iter().cloned()));
        }
        self.name = name.to_string();
        self.description = description.to_string();
        self.members = members;
    }

    fn decode(envelope: Envelope, operation: &str, common: CommonTags) -> Self {
        let mut name = String::new();
        let mut description = String::new();
        let mut members = Vec::new();
        for tag in &envelope.tags {
            let Some(value) = tag.value() else { continue };
            match tag.name() {
                Some("name") => name = value.to_string(),
                Some("description") => description = value.to_string(),
                Some("members") => members = tag.values().to_vec(),
                _ => {}
            }
        }
        Self {
            op: SubspaceOpEnvelope::from_parts(envelope, operation, common),
            name,
            description,
            members,
        }
    }
}

/// A message in a room, optionally replying to another message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageEvent {
    pub op: SubspaceOpEnvelope,
    pub room_id: String,
    pub reply_to: String,
    pub mentions: Vec<String>,
}

impl MessageEvent {
    pub fn new(subspace_id: &str) -> Result<Self, OpsError> {
        Ok(Self {
            op: SubspaceOpEnvelope::new(subspace_id, KIND_SOCIAL_MESSAGE)?,
            room_id: String::new(),
            reply_to: String::new(),
            mentions: Vec::new(),
        })
    }

    /// Set the target room, optional reply target, and mentions.
    pub fn set_message_info(&mut self, room_id: &str, reply_to: &str, mentions: Vec<String>) {
        self.op.envelope.push_tag(Tag::pair("room_id", room_id));
        if !reply_to.is_empty() {
            self.op.envelope.push_tag(Tag::pair("reply_to", reply_to));
        }
        if !mentions.is_empty() {
            self.op
                .envelope
                .push_tag(Tag::list("mentions", mentions.iter().cloned()));
        }
        self.room_id = room_id.to_string();
        self.reply_to = reply_to.to_string();
        self.mentions = mentions;
    }

    fn decode(envelope: Envelope, operation: &str, common: CommonTags) -> Self {
        let mut room_id = String::new();
        let mut reply_to = String::new();
        let mut mentions = Vec::new();
        for tag in &envelope.tags {
            let Some(value) = tag.value() else { continue };
            match tag.name() {
                Some("room_id") => room_id = value.to_string(),
                Some("reply_to") => reply_to = value.to_string(),
                Some("mentions") => mentions = tag.values().to_vec(),
                _ => {}
            }
        }
        Self {
            op: SubspaceOpEnvelope::from_parts(envelope, operation, common),
            room_id,
            reply_to,
            mentions,
        }
    }
}

fn scan_object_user(envelope: &Envelope) -> (String, String) {
    let mut object_id = String::new();
    let mut user_id = String::new();
    for tag in &envelope.tags {
        let Some(value) = tag.value() else { continue };
        match tag.name() {
            Some("object_id") => object_id = value.to_string(),
            Some("user_id") => user_id = value.to_string(),
            _ => {}
        }
    }
    (object_id, user_id)
}

fn scan_user_target(envelope: &Envelope) -> (String, String) {
    let mut user_id = String::new();
    let mut target_id = String::new();
    for tag in &envelope.tags {
        let Some(value) = tag.value() else { continue };
        match tag.name() {
            Some("user_id") => user_id = value.to_string(),
            Some("target_id") => target_id = value.to_string(),
            _ => {}
        }
    }
    (user_id, target_id)
}

impl_subspace_op!(
    LikeEvent,
    CollectEvent,
    ShareEvent,
    CommentEvent,
    TagEvent,
    FollowEvent,
    UnfollowEvent,
    QuestionEvent,
    RoomEvent,
    MessageEvent,
);

/// A decoded social operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SocialEvent {
    Like(LikeEvent),
    Collect(CollectEvent),
    Share(ShareEvent),
    Comment(CommentEvent),
    Tag(TagEvent),
    Follow(FollowEvent),
    Unfollow(UnfollowEvent),
    Question(QuestionEvent),
    Room(RoomEvent),
    Message(MessageEvent),
}

impl crate::op::SubspaceOp for SocialEvent {
    fn header(&self) -> &SubspaceOpEnvelope {
        match self {
            Self::Like(e) => &e.op,
            Self::Collect(e) => &e.op,
            Self::Share(e) => &e.op,
            Self::Comment(e) => &e.op,
            Self::Tag(e) => &e.op,
            Self::Follow(e) => &e.op,
            Self::Unfollow(e) => &e.op,
            Self::Question(e) => &e.op,
            Self::Room(e) => &e.op,
            Self::Message(e) => &e.op,
        }
    }
}

/// Decode a raw envelope into a social operation.
pub fn parse_social_event(envelope: Envelope) -> Result<SocialEvent, OpsError> {
    let common = extract_common(&envelope)?;
    let operation = resolve_operation(&envelope)?;

    match operation {
        OP_LIKE => Ok(SocialEvent::Like(LikeEvent::decode(
            envelope, operation, common,
        ))),
        OP_COLLECT => Ok(SocialEvent::Collect(CollectEvent::decode(
            envelope, operation, common,
        ))),
        OP_SHARE => Ok(SocialEvent::Share(ShareEvent::decode(
            envelope, operation, common,
        ))),
        OP_COMMENT => Ok(SocialEvent::Comment(CommentEvent::decode(
            envelope, operation, common,
        ))),
        OP_TAG => Ok(SocialEvent::Tag(TagEvent::decode(
            envelope, operation, common,
        ))),
        OP_FOLLOW => Ok(SocialEvent::Follow(FollowEvent::decode(
            envelope, operation, common,
        ))),
        OP_UNFOLLOW => Ok(SocialEvent::Unfollow(UnfollowEvent::decode(
            envelope, operation, common,
        ))),
        OP_QUESTION => Ok(SocialEvent::Question(QuestionEvent::decode(
            envelope, operation, common,
        ))),
        OP_ROOM => Ok(SocialEvent::Room(RoomEvent::decode(
            envelope, operation, common,
        ))),
        OP_MESSAGE => Ok(SocialEvent::Message(MessageEvent::decode(
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
    fn like_round_trip() {
        let mut like = LikeEvent::new(SID).unwrap();
        like.set_like_info("obj-1", "alice");
        like.op.set_auth(Action::EXECUTE, 30600, 500);

        let parsed = parse_social_event(like.op.envelope.clone()).unwrap();
        let SocialEvent::Like(parsed) = parsed else {
            panic!("expected like");
        };
        assert_eq!(parsed.object_id, "obj-1");
        assert_eq!(parsed.user_id, "alice");
        assert!(parsed.auth().unwrap().has_permission(Action::EXECUTE));
    }

    #[test]
    fn comment_parent_lands_in_payload_and_header() {
        let mut comment = CommentEvent::new(SID).unwrap();
        comment.set_comment_info("obj-1", "bob", "comment-0");

        let parsed = parse_social_event(comment.op.envelope.clone()).unwrap();
        let SocialEvent::Comment(parsed) = parsed else {
            panic!("expected comment");
        };
        assert_eq!(parsed.parent, "comment-0");
        assert_eq!(parsed.parents(), ["comment-0".to_string()]);
    }

    #[test]
    fn room_members_round_trip() {
        let mut room = RoomEvent::new(SID).unwrap();
        room.set_room_info("lobby", "general chat", vec!["alice".into(), "bob".into()]);

        let parsed = parse_social_event(room.op.envelope.clone()).unwrap();
        let SocialEvent::Room(parsed) = parsed else {
            panic!("expected room");
        };
        assert_eq!(parsed.members, vec!["alice", "bob"]);
    }

    #[test]
    fn message_reply_and_mentions_are_optional() {
        let mut message = MessageEvent::new(SID).unwrap();
        message.set_message_info("room-1", "", Vec::new());
        assert!(!message.op.envelope.has_tag("reply_to"));
        assert!(!message.op.envelope.has_tag("mentions"));

        let parsed = parse_social_event(message.op.envelope.clone()).unwrap();
        let SocialEvent::Message(parsed) = parsed else {
            panic!("expected message");
        };
        assert_eq!(parsed.room_id, "room-1");
        assert!(parsed.reply_to.is_empty());
        assert!(parsed.mentions.is_empty());
    }

    #[test]
    fn share_round_trip() {
        let mut share = ShareEvent::new(SID).unwrap();
        share.set_share_info("obj-1", "carol", "web", "12");

        let parsed = parse_social_event(share.op.envelope.clone()).unwrap();
        let SocialEvent::Share(parsed) = parsed else {
            panic!("expected share");
        };
        assert_eq!(parsed.platform, "web");
        assert_eq!(parsed.clicks, "12");
    }

    #[test]
    fn governance_kind_is_unknown_operation_here() {
        let envelope = Envelope::skeleton(30302, 0);
        assert_eq!(
            parse_social_event(envelope),
            Err(OpsError::UnknownOperation("vote".into()))
        );
    }
}
