//! Kind numbering and the bidirectional kind↔operation registry.
//!
//! Every operation module reserves a disjoint block of kind numbers. The
//! registry is the union of all modules' `kind → operation name` entries,
//! built once at startup and read-only afterwards, so it may be shared
//! across threads without locking.

use std::collections::BTreeMap;
use std::sync::OnceLock;

use crate::error::CoreError;
use crate::schema::ModuleSchema;

// Subspace lifecycle kinds
pub const KIND_SUBSPACE_CREATE: u32 = 30100;
pub const KIND_SUBSPACE_JOIN: u32 = 30200;

// Governance kinds
pub const KIND_GOVERNANCE_POST: u32 = 30300;
pub const KIND_GOVERNANCE_PROPOSE: u32 = 30301;
pub const KIND_GOVERNANCE_VOTE: u32 = 30302;
pub const KIND_GOVERNANCE_INVITE: u32 = 30303;
pub const KIND_GOVERNANCE_MINT: u32 = 30304;

// Common graph kinds
pub const KIND_COMMON_GRAPH_PROJECT: u32 = 30101;
pub const KIND_COMMON_GRAPH_TASK: u32 = 30102;
pub const KIND_COMMON_GRAPH_ENTITY: u32 = 30103;
pub const KIND_COMMON_GRAPH_RELATION: u32 = 30104;
pub const KIND_COMMON_GRAPH_OBSERVATION: u32 = 30105;

// Model graph kinds
pub const KIND_MODEL_GRAPH_MODEL: u32 = 30404;
pub const KIND_MODEL_GRAPH_DATASET: u32 = 30405;
pub const KIND_MODEL_GRAPH_COMPUTE: u32 = 30406;
pub const KIND_MODEL_GRAPH_ALGO: u32 = 30407;
pub const KIND_MODEL_GRAPH_VALID: u32 = 30408;
pub const KIND_MODEL_GRAPH_FINETUNE: u32 = 30409;
pub const KIND_MODEL_GRAPH_CONVERSATION: u32 = 30410;
pub const KIND_MODEL_GRAPH_SESSION: u32 = 30411;

// Open research kinds
pub const KIND_OPEN_RESEARCH_PAPER: u32 = 30501;
pub const KIND_OPEN_RESEARCH_ANNOTATION: u32 = 30502;
pub const KIND_OPEN_RESEARCH_REVIEW: u32 = 30503;
pub const KIND_OPEN_RESEARCH_AI_ANALYSIS: u32 = 30504;
pub const KIND_OPEN_RESEARCH_DISCUSSION: u32 = 30505;
pub const KIND_OPEN_RESEARCH_READ_PAPER: u32 = 30506;
pub const KIND_OPEN_RESEARCH_CO_CREATE: u32 = 30507;

// Social kinds
pub const KIND_SOCIAL_LIKE: u32 = 30600;
pub const KIND_SOCIAL_COLLECT: u32 = 30601;
pub const KIND_SOCIAL_SHARE: u32 = 30602;
pub const KIND_SOCIAL_COMMENT: u32 = 30603;
pub const KIND_SOCIAL_TAG: u32 = 30604;
pub const KIND_SOCIAL_FOLLOW: u32 = 30605;
pub const KIND_SOCIAL_UNFOLLOW: u32 = 30606;
pub const KIND_SOCIAL_QUESTION: u32 = 30607;
pub const KIND_SOCIAL_ROOM: u32 = 30608;
pub const KIND_SOCIAL_MESSAGE: u32 = 30609;

// Community kinds
pub const KIND_COMMUNITY_CREATE: u32 = 30700;
pub const KIND_COMMUNITY_INVITE: u32 = 30701;
pub const KIND_COMMUNITY_CHANNEL_CREATE: u32 = 30702;
pub const KIND_COMMUNITY_CHANNEL_MESSAGE: u32 = 30703;

// Operation names
pub const OP_SUBSPACE_CREATE: &str = "subspace_create";
pub const OP_SUBSPACE_JOIN: &str = "subspace_join";

pub const OP_POST: &str = "post";
pub const OP_PROPOSE: &str = "propose";
pub const OP_VOTE: &str = "vote";
pub const OP_INVITE: &str = "invite";
pub const OP_MINT: &str = "mint";

pub const OP_PROJECT: &str = "project";
pub const OP_TASK: &str = "task";
pub const OP_ENTITY: &str = "entity";
pub const OP_RELATION: &str = "relation";
pub const OP_OBSERVATION: &str = "observation";

pub const OP_MODEL: &str = "model";
pub const OP_DATASET: &str = "dataset";
pub const OP_COMPUTE: &str = "compute";
pub const OP_ALGO: &str = "algo";
pub const OP_VALID: &str = "valid";
pub const OP_FINETUNE: &str = "finetune";
pub const OP_CONVERSATION: &str = "conversation";
pub const OP_SESSION: &str = "session";

pub const OP_PAPER: &str = "paper";
pub const OP_ANNOTATION: &str = "annotation";
pub const OP_REVIEW: &str = "review";
pub const OP_AI_ANALYSIS: &str = "ai_analysis";
pub const OP_DISCUSSION: &str = "discussion";
pub const OP_READ_PAPER: &str = "read_paper";
pub const OP_CO_CREATE: &str = "co_create_paper";

pub const OP_LIKE: &str = "like";
pub const OP_COLLECT: &str = "collect";
pub const OP_SHARE: &str = "share";
pub const OP_COMMENT: &str = "comment";
pub const OP_TAG: &str = "tag";
pub const OP_FOLLOW: &str = "follow";
pub const OP_UNFOLLOW: &str = "unfollow";
pub const OP_QUESTION: &str = "question";
pub const OP_ROOM: &str = "room";
pub const OP_MESSAGE: &str = "message";

pub const OP_COMMUNITY_CREATE: &str = "community_create";
pub const OP_COMMUNITY_INVITE: &str = "community_invite";
pub const OP_CHANNEL_CREATE: &str = "channel_create";
pub const OP_CHANNEL_MESSAGE: &str = "channel_message";

// Default `ops` declaration strings for new subspaces.
pub const COMMON_PRJ_OPS: &str = "project=30101,task=30102";
pub const COMMON_GRAPH_OPS: &str = "entity=30103,relation=30104,observation=30105";
pub const DEFAULT_SUBSPACE_OPS: &str =
    "post=30300,propose=30301,vote=30302,invite=30303,mint=30304";
pub const MODEL_GRAPH_SUBSPACE_OPS: &str =
    "dataset=30405,finetune=30409,conversation=30410,session=30411";
pub const OPEN_RESEARCH_SUBSPACE_OPS: &str =
    "paper=30501,annotation=30502,review=30503,ai_analysis=30504,discussion=30505,read_paper=30506,co_create_paper=30507";
pub const SOCIAL_SUBSPACE_OPS: &str =
    "like=30600,collect=30601,share=30602,comment=30603,tag=30604,follow=30605,unfollow=30606,question=30607,room=30608,message=30609";
pub const COMMUNITY_SUBSPACE_OPS: &str =
    "community_create=30700,community_invite=30701,channel_create=30702,channel_message=30703";

const BUILTIN_ENTRIES: &[(u32, &str)] = &[
    (KIND_SUBSPACE_CREATE, OP_SUBSPACE_CREATE),
    (KIND_SUBSPACE_JOIN, OP_SUBSPACE_JOIN),
    (KIND_GOVERNANCE_POST, OP_POST),
    (KIND_GOVERNANCE_PROPOSE, OP_PROPOSE),
    (KIND_GOVERNANCE_VOTE, OP_VOTE),
    (KIND_GOVERNANCE_INVITE, OP_INVITE),
    (KIND_GOVERNANCE_MINT, OP_MINT),
    (KIND_COMMON_GRAPH_PROJECT, OP_PROJECT),
    (KIND_COMMON_GRAPH_TASK, OP_TASK),
    (KIND_COMMON_GRAPH_ENTITY, OP_ENTITY),
    (KIND_COMMON_GRAPH_RELATION, OP_RELATION),
    (KIND_COMMON_GRAPH_OBSERVATION, OP_OBSERVATION),
    (KIND_MODEL_GRAPH_MODEL, OP_MODEL),
    (KIND_MODEL_GRAPH_DATASET, OP_DATASET),
    (KIND_MODEL_GRAPH_COMPUTE, OP_COMPUTE),
    (KIND_MODEL_GRAPH_ALGO, OP_ALGO),
    (KIND_MODEL_GRAPH_VALID, OP_VALID),
    (KIND_MODEL_GRAPH_FINETUNE, OP_FINETUNE),
    (KIND_MODEL_GRAPH_CONVERSATION, OP_CONVERSATION),
    (KIND_MODEL_GRAPH_SESSION, OP_SESSION),
    (KIND_OPEN_RESEARCH_PAPER, OP_PAPER),
    (KIND_OPEN_RESEARCH_ANNOTATION, OP_ANNOTATION),
    (KIND_OPEN_RESEARCH_REVIEW, OP_REVIEW),
    (KIND_OPEN_RESEARCH_AI_ANALYSIS, OP_AI_ANALYSIS),
    (KIND_OPEN_RESEARCH_DISCUSSION, OP_DISCUSSION),
    (KIND_OPEN_RESEARCH_READ_PAPER, OP_READ_PAPER),
    (KIND_OPEN_RESEARCH_CO_CREATE, OP_CO_CREATE),
    (KIND_SOCIAL_LIKE, OP_LIKE),
    (KIND_SOCIAL_COLLECT, OP_COLLECT),
    (KIND_SOCIAL_SHARE, OP_SHARE),
    (KIND_SOCIAL_COMMENT, OP_COMMENT),
    (KIND_SOCIAL_TAG, OP_TAG),
    (KIND_SOCIAL_FOLLOW, OP_FOLLOW),
    (KIND_SOCIAL_UNFOLLOW, OP_UNFOLLOW),
    (KIND_SOCIAL_QUESTION, OP_QUESTION),
    (KIND_SOCIAL_ROOM, OP_ROOM),
    (KIND_SOCIAL_MESSAGE, OP_MESSAGE),
    (KIND_COMMUNITY_CREATE, OP_COMMUNITY_CREATE),
    (KIND_COMMUNITY_INVITE, OP_COMMUNITY_INVITE),
    (KIND_COMMUNITY_CHANNEL_CREATE, OP_CHANNEL_CREATE),
    (KIND_COMMUNITY_CHANNEL_MESSAGE, OP_CHANNEL_MESSAGE),
];

/// Bidirectional kind↔operation-name table.
///
/// The forward table is ordered by kind, so the reverse lookup's tie-break
/// is deterministic: when two kinds carry the same operation name, the
/// smallest kind wins.
#[derive(Debug, Clone, Default)]
pub struct KindRegistry {
    forward: BTreeMap<u32, String>,
}

impl KindRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// The registry of all builtin modules, built on first use.
    pub fn builtin() -> &'static KindRegistry {
        static BUILTIN: OnceLock<KindRegistry> = OnceLock::new();
        BUILTIN.get_or_init(|| {
            let mut registry = KindRegistry::new();
            for &(kind, op) in BUILTIN_ENTRIES {
                // Builtin entries are known disjoint.
                registry
                    .insert(kind, op)
                    .expect("builtin kind table is conflict-free");
            }
            registry
        })
    }

    /// Build a registry from module declarations.
    ///
    /// Duplicate kinds across declarations are a configuration error.
    pub fn from_modules<'a>(
        modules: impl IntoIterator<Item = &'a ModuleSchema>,
    ) -> Result<Self, CoreError> {
        let mut registry = Self::new();
        for module in modules {
            for event in &module.events {
                registry.insert(event.kind, &event.operation)?;
            }
        }
        Ok(registry)
    }

    /// Register one kind → operation-name entry.
    pub fn insert(&mut self, kind: u32, operation: &str) -> Result<(), CoreError> {
        if let Some(existing) = self.forward.get(&kind) {
            return Err(CoreError::RegistryConflict {
                kind,
                existing: existing.clone(),
                proposed: operation.to_string(),
            });
        }
        self.forward.insert(kind, operation.to_string());
        Ok(())
    }

    /// Resolve a kind to its operation name.
    pub fn operation_for(&self, kind: u32) -> Option<&str> {
        self.forward.get(&kind).map(String::as_str)
    }

    /// Resolve an operation name to its kind.
    ///
    /// Linear scan of the forward table in ascending kind order.
    pub fn kind_for(&self, operation: &str) -> Option<u32> {
        self.forward
            .iter()
            .find(|(_, op)| op.as_str() == operation)
            .map(|(&kind, _)| kind)
    }

    /// Number of registered kinds.
    pub fn len(&self) -> usize {
        self.forward.len()
    }

    /// Whether the registry has no entries.
    pub fn is_empty(&self) -> bool {
        self.forward.is_empty()
    }
}

/// Resolve a kind against the builtin registry.
pub fn get_operation(kind: u32) -> Option<&'static str> {
    KindRegistry::builtin().operation_for(kind)
}

/// Resolve an operation name against the builtin registry.
pub fn get_kind(operation: &str) -> Option<u32> {
    KindRegistry::builtin().kind_for(operation)
}
