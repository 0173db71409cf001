//! Subspace lifecycle operations: creation and join.
//!
//! Creation is the one operation whose `content` is structured: a JSON
//! object carrying the description and image URL. Everywhere else in this
//! crate `content` stays opaque.

use serde::{Deserialize, Serialize};

use subspace_kernel_core::registry::{
    KIND_SUBSPACE_CREATE, KIND_SUBSPACE_JOIN, OP_SUBSPACE_CREATE, OP_SUBSPACE_JOIN,
};
use subspace_kernel_core::{calculate_subspace_id, validate_subspace_id, Envelope, Tag};

use crate::error::OpsError;
use crate::op::{TAG_D, TAG_SID};

pub const TAG_SUBSPACE_NAME: &str = "subspace_name";
pub const TAG_OPS: &str = "ops";
pub const TAG_RULES: &str = "rules";

/// Structured content of a subspace creation envelope.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct CreateContent {
    #[serde(default)]
    desc: String,
    #[serde(default)]
    img_url: String,
}

/// A subspace creation operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubspaceCreateEvent {
    pub envelope: Envelope,
    pub subspace_id: String,
    pub subspace_name: String,
    pub ops: String,
    pub rules: String,
    pub description: String,
    pub image_url: String,
}

impl SubspaceCreateEvent {
    /// Build a creation envelope for a new subspace.
    ///
    /// The subspace id is derived from `(name, ops, rules)`; the envelope
    /// carries the declared strings as tags and the description/image URL
    /// as JSON content.
    pub fn new(
        subspace_name: &str,
        ops: &str,
        rules: &str,
        description: &str,
        image_url: &str,
    ) -> Self {
        let subspace_id = calculate_subspace_id(subspace_name, ops, rules);

        let mut envelope = Envelope::skeleton(KIND_SUBSPACE_CREATE, crate::op::unix_now());
        envelope.push_tag(Tag::pair(TAG_D, OP_SUBSPACE_CREATE));
        envelope.push_tag(Tag::pair(TAG_SID, subspace_id.clone()));
        envelope.push_tag(Tag::pair(TAG_SUBSPACE_NAME, subspace_name));
        envelope.push_tag(Tag::pair(TAG_OPS, ops));
        if !rules.is_empty() {
            envelope.push_tag(Tag::pair(TAG_RULES, rules));
        }

        envelope.content = serde_json::to_string(&CreateContent {
            desc: description.to_string(),
            img_url: image_url.to_string(),
        })
        .unwrap_or_default();

        Self {
            envelope,
            subspace_id,
            subspace_name: subspace_name.to_string(),
            ops: ops.to_string(),
            rules: rules.to_string(),
            description: description.to_string(),
            image_url: image_url.to_string(),
        }
    }

    /// Validate a creation operation.
    ///
    /// Checks the kind, the presence of the required tags, that the declared
    /// subspace id recomputes from the declared strings (tamper evidence),
    /// that the content carries a description, and that the `ops` string is
    /// `key=value,...`-shaped.
    pub fn validate(&self) -> Result<(), OpsError> {
        if self.envelope.kind != KIND_SUBSPACE_CREATE {
            return Err(OpsError::KindMismatch {
                expected: KIND_SUBSPACE_CREATE,
                got: self.envelope.kind,
            });
        }

        for required in [TAG_D, TAG_SID, TAG_SUBSPACE_NAME, TAG_OPS] {
            if !self.envelope.has_tag(required) {
                return Err(OpsError::MissingRequiredTag(required.to_string()));
            }
        }

        let expected = calculate_subspace_id(&self.subspace_name, &self.ops, &self.rules);
        if self.subspace_id != expected {
            return Err(OpsError::SubspaceIdMismatch {
                expected,
                got: self.subspace_id.clone(),
            });
        }

        let content: CreateContent = serde_json::from_str(&self.envelope.content)
            .map_err(|e| OpsError::InvalidContent(e.to_string()))?;
        if content.desc.is_empty() {
            return Err(OpsError::MissingRequiredContentField("description".into()));
        }

        validate_ops_format(&self.ops)?;

        Ok(())
    }

    /// Decode a raw envelope into a creation operation and validate it.
    pub fn parse(envelope: Envelope) -> Result<Self, OpsError> {
        let mut subspace_id = String::new();
        let mut subspace_name = String::new();
        let mut ops = String::new();
        let mut rules = String::new();

        for tag in &envelope.tags {
            let Some(value) = tag.value() else { continue };
            match tag.name() {
                Some(TAG_SID) => subspace_id = value.to_string(),
                Some(TAG_SUBSPACE_NAME) => subspace_name = value.to_string(),
                Some(TAG_OPS) => ops = value.to_string(),
                Some(TAG_RULES) => rules = value.to_string(),
                _ => {}
            }
        }

        let content: CreateContent = serde_json::from_str(&envelope.content)
            .map_err(|e| OpsError::InvalidContent(e.to_string()))?;

        let event = Self {
            envelope,
            subspace_id,
            subspace_name,
            ops,
            rules,
            description: content.desc,
            image_url: content.img_url,
        };
        event.validate()?;
        Ok(event)
    }
}

/// A subspace join operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubspaceJoinEvent {
    pub envelope: Envelope,
    pub subspace_id: String,
}

impl SubspaceJoinEvent {
    /// Build a join envelope for an existing subspace.
    pub fn new(subspace_id: &str) -> Self {
        let mut envelope = Envelope::skeleton(KIND_SUBSPACE_JOIN, crate::op::unix_now());
        envelope.push_tag(Tag::pair(TAG_D, OP_SUBSPACE_JOIN));
        envelope.push_tag(Tag::pair(TAG_SID, subspace_id));

        Self {
            envelope,
            subspace_id: subspace_id.to_string(),
        }
    }

    /// Validate a join operation: kind, required tags, and id format.
    pub fn validate(&self) -> Result<(), OpsError> {
        if self.envelope.kind != KIND_SUBSPACE_JOIN {
            return Err(OpsError::KindMismatch {
                expected: KIND_SUBSPACE_JOIN,
                got: self.envelope.kind,
            });
        }

        for required in [TAG_D, TAG_SID] {
            if !self.envelope.has_tag(required) {
                return Err(OpsError::MissingRequiredTag(required.to_string()));
            }
        }

        validate_subspace_id(&self.subspace_id)?;
        Ok(())
    }

    /// Decode a raw envelope into a join operation and validate it.
    pub fn parse(envelope: Envelope) -> Result<Self, OpsError> {
        let subspace_id = envelope
            .last_tag_value(TAG_SID)
            .unwrap_or_default()
            .to_string();

        let event = Self {
            envelope,
            subspace_id,
        };
        event.validate()?;
        Ok(event)
    }
}

/// Check that an `ops` declaration is `key=value,...`-shaped.
fn validate_ops_format(ops: &str) -> Result<(), OpsError> {
    for part in ops.split(',') {
        if !part.contains('=') {
            return Err(OpsError::InvalidOpsFormat(ops.to_string()));
        }
    }
    Ok(())
}
