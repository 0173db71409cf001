//! Model graph operations: models, datasets, compute, algorithms,
//! validation, finetuning, conversations, and sessions.

use subspace_kernel_core::registry::{
    KIND_MODEL_GRAPH_ALGO, KIND_MODEL_GRAPH_COMPUTE, KIND_MODEL_GRAPH_CONVERSATION,
    KIND_MODEL_GRAPH_DATASET, KIND_MODEL_GRAPH_FINETUNE, KIND_MODEL_GRAPH_MODEL,
    KIND_MODEL_GRAPH_SESSION, KIND_MODEL_GRAPH_VALID, OP_ALGO, OP_COMPUTE, OP_CONVERSATION,
    OP_DATASET, OP_FINETUNE, OP_MODEL, OP_SESSION, OP_VALID,
};
use subspace_kernel_core::{Envelope, Tag};

use crate::error::OpsError;
use crate::op::{extract_common, impl_subspace_op, resolve_operation, CommonTags, SubspaceOpEnvelope};

/// A model publication.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelEvent {
    pub op: SubspaceOpEnvelope,
    pub parent_hash: String,
    pub contributions: String,
}

impl ModelEvent {
    pub fn new(subspace_id: &str) -> Result<Self, OpsError> {
        Ok(Self {
            op: SubspaceOpEnvelope::new(subspace_id, KIND_MODEL_GRAPH_MODEL)?,
            parent_hash: String::new(),
            contributions: String::new(),
        })
    }

    /// Set the contribution weights.
    pub fn set_contributions(&mut self, contributions: &str) {
        self.op.envelope.push_tag(Tag::pair("contrib", contributions));
        self.contributions = contributions.to_string();
    }

    /// Set the parent model hash.
    pub fn set_parent(&mut self, parent_hash: &str) {
        self.op.envelope.push_tag(Tag::pair("parent", parent_hash));
        self.parent_hash = parent_hash.to_string();
    }

    fn decode(envelope: Envelope, operation: &str, common: CommonTags) -> Self {
        let mut parent_hash = String::new();
        let mut contributions = String::new();
        for tag in &envelope.tags {
            let Some(value) = tag.value() else { continue };
            match tag.name() {
                Some("parent") => parent_hash = value.to_string(),
                Some("contrib") => contributions = value.to_string(),
                _ => {}
            }
        }
        Self {
            op: SubspaceOpEnvelope::from_parts(envelope, operation, common),
            parent_hash,
            contributions,
        }
    }
}

/// A compute contribution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComputeEvent {
    pub op: SubspaceOpEnvelope,
    pub compute_type: String,
}

impl ComputeEvent {
    pub fn new(subspace_id: &str) -> Result<Self, OpsError> {
        Ok(Self {
            op: SubspaceOpEnvelope::new(subspace_id, KIND_MODEL_GRAPH_COMPUTE)?,
            compute_type: String::new(),
        })
    }

    fn decode(envelope: Envelope, operation: &str, common: CommonTags) -> Self {
        let mut compute_type = String::new();
        for tag in &envelope.tags {
            let Some(value) = tag.value() else { continue };
            if tag.name() == Some("compute_type") {
                compute_type = value.to_string();
            }
        }
        Self {
            op: SubspaceOpEnvelope::from_parts(envelope, operation, common),
            compute_type,
        }
    }
}

/// An algorithm contribution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlgoEvent {
    pub op: SubspaceOpEnvelope,
    pub algo_type: String,
}

impl AlgoEvent {
    pub fn new(subspace_id: &str) -> Result<Self, OpsError> {
        Ok(Self {
            op: SubspaceOpEnvelope::new(subspace_id, KIND_MODEL_GRAPH_ALGO)?,
            algo_type: String::new(),
        })
    }

    fn decode(envelope: Envelope, operation: &str, common: CommonTags) -> Self {
        let mut algo_type = String::new();
        for tag in &envelope.tags {
            let Some(value) = tag.value() else { continue };
            if tag.name() == Some("algo_type") {
                algo_type = value.to_string();
            }
        }
        Self {
            op: SubspaceOpEnvelope::from_parts(envelope, operation, common),
            algo_type,
        }
    }
}

/// A validation result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidEvent {
    pub op: SubspaceOpEnvelope,
    pub valid_result: String,
}

impl ValidEvent {
    pub fn new(subspace_id: &str) -> Result<Self, OpsError> {
        Ok(Self {
            op: SubspaceOpEnvelope::new(subspace_id, KIND_MODEL_GRAPH_VALID)?,
            valid_result: String::new(),
        })
    }

    fn decode(envelope: Envelope, operation: &str, common: CommonTags) -> Self {
        let mut valid_result = String::new();
        for tag in &envelope.tags {
            let Some(value) = tag.value() else { continue };
            if tag.name() == Some("valid_result") {
                valid_result = value.to_string();
            }
        }
        Self {
            op: SubspaceOpEnvelope::from_parts(envelope, operation, common),
            valid_result,
        }
    }
}

/// A dataset publication.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatasetEvent {
    pub op: SubspaceOpEnvelope,
    pub project_id: String,
    pub task_id: String,
    pub category: String,
    pub format: String,
    pub contributors: Vec<String>,
}

impl DatasetEvent {
    pub fn new(subspace_id: &str) -> Result<Self, OpsError> {
        Ok(Self {
            op: SubspaceOpEnvelope::new(subspace_id, KIND_MODEL_GRAPH_DATASET)?,
            project_id: String::new(),
            task_id: String::new(),
            category: String::new(),
            format: String::new(),
            contributors: Vec::new(),
        })
    }

    /// Set the dataset metadata.
    pub fn set_dataset_info(
        &mut self,
        project_id: &str,
        task_id: &str,
        category: &str,
        format: &str,
        contributors: Vec<String>,
    ) {
        self.op.envelope.push_tag(Tag::pair("project_id", project_id));
        self.op.envelope.push_tag(Tag::pair("task_id", task_id));
        self.op.envelope.push_tag(Tag::pair("category", category));
        self.op.envelope.push_tag(Tag::pair("format", format));
        if !contributors.is_empty() {
            self.op
                .envelope
                .push_tag(Tag::list("contributors", contributors.iter().cloned()));
        }
        self.project_id = project_id.to_string();
        self.task_id = task_id.to_string();
        self.category = category.to_string();
        self.format = format.to_string();
        self.contributors = contributors;
    }

    fn decode(envelope: Envelope, operation: &str, common: CommonTags) -> Self {
        let mut project_id = String::new();
        let mut task_id = String::new();
        let mut category = String::new();
        let mut format = String::new();
        let mut contributors = Vec::new();
        for tag in &envelope.tags {
            let Some(value) = tag.value() else { continue };
            match tag.name() {
                Some("project_id") => project_id = value.to_string(),
                Some("task_id") => task_id = value.to_string(),
                Some("category") => category = value.to_string(),
                Some("format") => format = value.to_string(),
                Some("contributors") => contributors = tag.values().to_vec(),
                _ => {}
            }
        }
        Self {
            op: SubspaceOpEnvelope::from_parts(envelope, operation, common),
            project_id,
            task_id,
            category,
            format,
            contributors,
        }
    }
}

/// A finetuning run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FinetuneEvent {
    pub op: SubspaceOpEnvelope,
    pub project_id: String,
    pub task_id: String,
    pub dataset_id: String,
    pub provider_id: String,
    pub model_name: String,
}

impl FinetuneEvent {
    pub fn new(subspace_id: &str) -> Result<Self, OpsError> {
        Ok(Self {
            op: SubspaceOpEnvelope::new(subspace_id, KIND_MODEL_GRAPH_FINETUNE)?,
            project_id: String::new(),
            task_id: String::new(),
            dataset_id: String::new(),
            provider_id: String::new(),
            model_name: String::new(),
        })
    }

    /// Set the finetune run metadata.
    pub fn set_finetune_info(
        &mut self,
        project_id: &str,
        task_id: &str,
        dataset_id: &str,
        provider_id: &str,
        model_name: &str,
    ) {
        self.op.envelope.push_tag(Tag::pair("project_id", project_id));
        self.op.envelope.push_tag(Tag::pair("task_id", task_id));
        self.op.envelope.push_tag(Tag::pair("dataset_id", dataset_id));
        self.op.envelope.push_tag(Tag::pair("provider_id", provider_id));
        self.op.envelope.push_tag(Tag::pair("model_name", model_name));
        self.project_id = project_id.to_string();
        self.task_id = task_id.to_string();
        self.dataset_id = dataset_id.to_string();
        self.provider_id = provider_id.to_string();
        self.model_name = model_name.to_string();
    }

    fn decode(envelope: Envelope, operation: &str, common: CommonTags) -> Self {
        let mut project_id = String::new();
        let mut task_id = String::new();
        let mut dataset_id = String::new();
        let mut provider_id = String::new();
        let mut model_name = String::new();
        for tag in &envelope.tags {
            let Some(value) = tag.value() else { continue };
            match tag.name() {
                Some("project_id") => project_id = value.to_string(),
                Some("task_id") => task_id = value.to_string(),
                Some("dataset_id") => dataset_id = value.to_string(),
                Some("provider_id") => provider_id = value.to_string(),
                Some("model_name") => model_name = value.to_string(),
                _ => {}
            }
        }
        Self {
            op: SubspaceOpEnvelope::from_parts(envelope, operation, common),
            project_id,
            task_id,
            dataset_id,
            provider_id,
            model_name,
        }
    }
}

/// One model interaction within a session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversationEvent {
    pub op: SubspaceOpEnvelope,
    pub session_id: String,
    pub user_id: String,
    pub model_id: String,
    pub timestamp: String,
    pub interaction_hash: String,
}

impl ConversationEvent {
    pub fn new(subspace_id: &str) -> Result<Self, OpsError> {
        Ok(Self {
            op: SubspaceOpEnvelope::new(subspace_id, KIND_MODEL_GRAPH_CONVERSATION)?,
            session_id: String::new(),
            user_id: String::new(),
            model_id: String::new(),
            timestamp: String::new(),
            interaction_hash: String::new(),
        })
    }

    /// Set the interaction metadata.
    pub fn set_conversation_info(
        &mut self,
        session_id: &str,
        user_id: &str,
        model_id: &str,
        timestamp: &str,
        interaction_hash: &str,
    ) {
        self.op.envelope.push_tag(Tag::pair("session_id", session_id));
        self.op.envelope.push_tag(Tag::pair("user_id", user_id));
        self.op.envelope.push_tag(Tag::pair("model_id", model_id));
        self.op.envelope.push_tag(Tag::pair("timestamp", timestamp));
        self.op
            .envelope
            .push_tag(Tag::pair("interaction_hash", interaction_hash));
        self.session_id = session_id.to_string();
        self.user_id = user_id.to_string();
        self.model_id = model_id.to_string();
        self.timestamp = timestamp.to_string();
        self.interaction_hash = interaction_hash.to_string();
    }

    fn decode(envelope: Envelope, operation: &str, common: CommonTags) -> Self {
        let mut session_id = String::new();
        let mut user_id = String::new();
        let mut model_id = String::new();
        let mut timestamp = String::new();
        let mut interaction_hash = String::new();
        for tag in &envelope.tags {
            let Some(value) = tag.value() else { continue };
            match tag.name() {
                Some("session_id") => session_id = value.to_string(),
                Some("user_id") => user_id = value.to_string(),
                Some("model_id") => model_id = value.to_string(),
                Some("timestamp") => timestamp = value.to_string(),
                Some("interaction_hash") => interaction_hash = value.to_string(),
                _ => {}
            }
        }
        Self {
            op: SubspaceOpEnvelope::from_parts(envelope, operation, common),
            session_id,
            user_id,
            model_id,
            timestamp,
            interaction_hash,
        }
    }
}

/// A session lifecycle marker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionEvent {
    pub op: SubspaceOpEnvelope,
    pub session_id: String,
    pub action: String,
    pub user_id: String,
    pub start_time: String,
    pub end_time: String,
}

impl SessionEvent {
    pub fn new(subspace_id: &str) -> Result<Self, OpsError> {
        Ok(Self {
            op: SubspaceOpEnvelope::new(subspace_id, KIND_MODEL_GRAPH_SESSION)?,
            session_id: String::new(),
            action: String::new(),
            user_id: String::new(),
            start_time: String::new(),
            end_time: String::new(),
        })
    }

    /// Set the session metadata. The end time is omitted while a session is
    /// still open.
    pub fn set_session_info(
        &mut self,
        session_id: &str,
        action: &str,
        user_id: &str,
        start_time: &str,
        end_time: &str,
    ) {
        self.op.envelope.push_tag(Tag::pair("session_id", session_id));
        self.op.envelope.push_tag(Tag::pair("action", action));
        self.op.envelope.push_tag(Tag::pair("user_id", user_id));
        self.op.envelope.push_tag(Tag::pair("start_time", start_time));
        if !end_time.is_empty() {
            self.op.envelope.push_tag(Tag::pair("end_time", end_time));
        }
        self.session_id = session_id.to_string();
        self.action = action.to_string();
        self.user_id = user_id.to_string();
        self.start_time = start_time.to_string();
        self.end_time = end_time.to_string();
    }

    fn decode(envelope: Envelope, operation: &str, common: CommonTags) -> Self {
        let mut session_id = String::new();
        let mut action = String::new();
        let mut user_id = String::new();
        let mut start_time = String::new();
        let mut end_time = String::new();
        for tag in &envelope.tags {
            let Some(value) = tag.value() else { continue };
            match tag.name() {
                Some("session_id") => session_id = value.to_string(),
                Some("action") => action = value.to_string(),
                Some("user_id") => user_id = value.to_string(),
                Some("start_time") => start_time = value.to_string(),
                Some("end_time") => end_time = value.to_string(),
                _ => {}
            }
        }
        Self {
            op: SubspaceOpEnvelope::from_parts(envelope, operation, common),
            session_id,
            action,
            user_id,
            start_time,
            end_time,
        }
    }
}

impl_subspace_op!(
    ModelEvent,
    ComputeEvent,
    AlgoEvent,
    ValidEvent,
    DatasetEvent,
    FinetuneEvent,
    ConversationEvent,
    SessionEvent,
);

/// A decoded model-graph operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModelGraphEvent {
    Model(ModelEvent),
    Compute(ComputeEvent),
    Algo(AlgoEvent),
    Valid(ValidEvent),
    Dataset(DatasetEvent),
    Finetune(FinetuneEvent),
    Conversation(ConversationEvent),
    Session(SessionEvent),
}

impl crate::op::SubspaceOp for ModelGraphEvent {
    fn header(&self) -> &SubspaceOpEnvelope {
        match self {
            Self::Model(e) => &e.op,
            Self::Compute(e) => &e.op,
            Self::Algo(e) => &e.op,
            Self::Valid(e) => &e.op,
            Self::Dataset(e) => &e.op,
            Self::Finetune(e) => &e.op,
            Self::Conversation(e) => &e.op,
            Self::Session(e) => &e.op,
        }
    }
}

/// Decode a raw envelope into a model-graph operation.
pub fn parse_model_graph_event(envelope: Envelope) -> Result<ModelGraphEvent, OpsError> {
    let common = extract_common(&envelope)?;
    let operation = resolve_operation(&envelope)?;

    match operation {
        OP_MODEL => Ok(ModelGraphEvent::Model(ModelEvent::decode(
            envelope, operation, common,
        ))),
        OP_COMPUTE => Ok(ModelGraphEvent::Compute(ComputeEvent::decode(
            envelope, operation, common,
        ))),
        OP_ALGO => Ok(ModelGraphEvent::Algo(AlgoEvent::decode(
            envelope, operation, common,
        ))),
        OP_VALID => Ok(ModelGraphEvent::Valid(ValidEvent::decode(
            envelope, operation, common,
        ))),
        OP_DATASET => Ok(ModelGraphEvent::Dataset(DatasetEvent::decode(
            envelope, operation, common,
        ))),
        OP_FINETUNE => Ok(ModelGraphEvent::Finetune(FinetuneEvent::decode(
            envelope, operation, common,
        ))),
        OP_CONVERSATION => Ok(ModelGraphEvent::Conversation(ConversationEvent::decode(
            envelope, operation, common,
        ))),
        OP_SESSION => Ok(ModelGraphEvent::Session(SessionEvent::decode(
            envelope, operation, common,
        ))),
        other => Err(OpsError::UnknownOperation(other.to_string())),
    }
}
