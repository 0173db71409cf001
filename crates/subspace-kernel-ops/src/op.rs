//! The common operation header shared by every subspace operation.
//!
//! Reading: one pass over the envelope tags collects the subspace id, the
//! auth tag, and the parent references; the kind then resolves through the
//! registry and the module decoder takes over.
//!
//! Writing: a skeleton envelope carries the namespace and operation marker
//! tags; `set_auth`, `set_parents`, and every module setter append their
//! tag. Setters never replace a prior tag, so calling one twice leaves two
//! occurrences on the envelope. Decoders resolve repeats to the last
//! occurrence.

use std::time::{SystemTime, UNIX_EPOCH};

use subspace_kernel_core::{get_operation, Action, AuthTag, Envelope, Tag};

use crate::error::OpsError;

/// Tag names consumed by the operations layer.
pub const TAG_D: &str = "d";
pub const TAG_SID: &str = "sid";
pub const TAG_OP: &str = "op";
pub const TAG_AUTH: &str = "auth";
pub const TAG_PARENT: &str = "parent";

/// Marker value of the `d` tag on every subspace operation envelope.
pub const SUBSPACE_OP_MARKER: &str = "subspace_op";

/// The decoded common header of a subspace operation, together with the
/// raw envelope it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubspaceOpEnvelope {
    /// The underlying raw envelope.
    pub envelope: Envelope,
    /// The subspace this operation belongs to.
    pub subspace_id: String,
    /// The operation name resolved from the envelope kind.
    pub operation: String,
    /// The capability token, when an `auth` tag is present.
    pub auth: Option<AuthTag>,
    /// Parent envelope ids, in encounter order across all `parent` tags.
    pub parents: Vec<String>,
}

impl SubspaceOpEnvelope {
    /// Start a new operation envelope for a subspace.
    ///
    /// Resolves the operation name for `kind` from the builtin registry and
    /// emits a skeleton envelope carrying the `d`/`sid`/`op` marker tags.
    /// Payload fields are appended afterwards through the typed setters.
    pub fn new(subspace_id: &str, kind: u32) -> Result<Self, OpsError> {
        let operation = get_operation(kind).ok_or(OpsError::UnknownKind(kind))?;

        let mut envelope = Envelope::skeleton(kind, unix_now());
        envelope.push_tag(Tag::pair(TAG_D, SUBSPACE_OP_MARKER));
        envelope.push_tag(Tag::pair(TAG_SID, subspace_id));
        envelope.push_tag(Tag::pair(TAG_OP, operation));

        Ok(Self {
            envelope,
            subspace_id: subspace_id.to_string(),
            operation: operation.to_string(),
            auth: None,
            parents: Vec::new(),
        })
    }

    /// Attach a capability token and append its `auth` tag.
    pub fn set_auth(&mut self, action: Action, key: u32, exp: u64) {
        let auth = AuthTag::new(action, key, exp);
        self.envelope.push_tag(Tag::pair(TAG_AUTH, auth.to_string()));
        self.auth = Some(auth);
    }

    /// Record the parent envelope ids and append one `parent` tag carrying
    /// all of them.
    pub fn set_parents(&mut self, parents: Vec<String>) {
        self.envelope
            .push_tag(Tag::list(TAG_PARENT, parents.iter().cloned()));
        self.parents = parents;
    }

    /// Assemble a header from a received envelope and its extracted common
    /// tags. Used by module decoders after kind resolution.
    pub(crate) fn from_parts(envelope: Envelope, operation: &str, common: CommonTags) -> Self {
        Self {
            envelope,
            subspace_id: common.subspace_id,
            operation: operation.to_string(),
            auth: common.auth,
            parents: common.parents,
        }
    }
}

/// Accessor behavior every typed operation record exposes through its
/// embedded header.
pub trait SubspaceOp {
    /// The common header of this operation.
    fn header(&self) -> &SubspaceOpEnvelope;

    /// The subspace this operation belongs to.
    fn subspace_id(&self) -> &str {
        &self.header().subspace_id
    }

    /// The operation name.
    fn operation(&self) -> &str {
        &self.header().operation
    }

    /// The capability token, if one was attached.
    fn auth(&self) -> Option<&AuthTag> {
        self.header().auth.as_ref()
    }

    /// Parent envelope ids.
    fn parents(&self) -> &[String] {
        &self.header().parents
    }

    /// The underlying raw envelope.
    fn envelope(&self) -> &Envelope {
        &self.header().envelope
    }

    /// The envelope content, carried verbatim as an opaque string.
    ///
    /// Its internal structure (embedded JSON and the like) is owned by the
    /// operation that produced it and never validated here.
    fn content(&self) -> &str {
        &self.header().envelope.content
    }
}

impl SubspaceOp for SubspaceOpEnvelope {
    fn header(&self) -> &SubspaceOpEnvelope {
        self
    }
}

/// Implement [`SubspaceOp`] for records that hold their header in `self.op`.
macro_rules! impl_subspace_op {
    ($($record:ty),+ $(,)?) => {
        $(impl $crate::op::SubspaceOp for $record {
            fn header(&self) -> &$crate::op::SubspaceOpEnvelope {
                &self.op
            }
        })+
    };
}
pub(crate) use impl_subspace_op;

/// Common tags collected from one scan of an envelope.
#[derive(Debug, Clone, Default)]
pub(crate) struct CommonTags {
    pub subspace_id: String,
    pub auth: Option<AuthTag>,
    pub parents: Vec<String>,
}

/// Single-pass extraction of the common tags.
///
/// A repeated `sid` resolves to its last occurrence; every `parent` tag
/// contributes all of its trailing values in encounter order. A present but
/// malformed `auth` tag fails the whole decode.
pub(crate) fn extract_common(envelope: &Envelope) -> Result<CommonTags, OpsError> {
    let mut common = CommonTags::default();

    for tag in &envelope.tags {
        let Some(value) = tag.value() else { continue };
        match tag.name() {
            Some(TAG_SID) => common.subspace_id = value.to_string(),
            Some(TAG_AUTH) => common.auth = Some(value.parse::<AuthTag>()?),
            Some(TAG_PARENT) => common.parents.extend(tag.values().iter().cloned()),
            _ => {}
        }
    }

    Ok(common)
}

/// Resolve the envelope kind through the builtin registry.
pub(crate) fn resolve_operation(envelope: &Envelope) -> Result<&'static str, OpsError> {
    match get_operation(envelope.kind) {
        Some(operation) => {
            tracing::debug!(kind = envelope.kind, operation, "resolved envelope kind");
            Ok(operation)
        }
        None => Err(OpsError::UnknownKind(envelope.kind)),
    }
}

pub(crate) fn unix_now() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs() as i64)
        .unwrap_or(0)
}
