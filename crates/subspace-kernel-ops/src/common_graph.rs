//! Common graph operations: projects, tasks, entities, relations,
//! observations.

use subspace_kernel_core::registry::{
    KIND_COMMON_GRAPH_ENTITY, KIND_COMMON_GRAPH_OBSERVATION, KIND_COMMON_GRAPH_PROJECT,
    KIND_COMMON_GRAPH_RELATION, KIND_COMMON_GRAPH_TASK, OP_ENTITY, OP_OBSERVATION, OP_PROJECT,
    OP_RELATION, OP_TASK,
};
use subspace_kernel_core::{Envelope, Tag};

use crate::error::OpsError;
use crate::op::{extract_common, impl_subspace_op, resolve_operation, CommonTags, SubspaceOpEnvelope};

/// A project declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectEvent {
    pub op: SubspaceOpEnvelope,
    pub project_id: String,
    pub name: String,
    pub desc: String,
    pub members: Vec<String>,
    pub status: String,
}

impl ProjectEvent {
    pub fn new(subspace_id: &str) -> Result<Self, OpsError> {
        Ok(Self {
            op: SubspaceOpEnvelope::new(subspace_id, KIND_COMMON_GRAPH_PROJECT)?,
            project_id: String::new(),
            name: String::new(),
            desc: String::new(),
            members: Vec::new(),
            status: String::new(),
        })
    }

    /// Set the project metadata.
    pub fn set_project_info(
        &mut self,
        project_id: &str,
        name: &str,
        desc: &str,
        members: Vec<String>,
        status: &str,
    ) {
        self.op.envelope.push_tag(Tag::pair("project_id", project_id));
        self.op.envelope.push_tag(Tag::pair("name", name));
        self.op.envelope.push_tag(Tag::pair("desc", desc));
        self.op.envelope.push_tag(Tag::pair("status", status));
        if !members.is_empty() {
            self.op
                .envelope
                .push_tag(Tag::list("members", members.iter().cloned()));
        }
        self.project_id = project_id.to_string();
        self.name = name.to_string();
        self.desc = desc.to_string();
        self.members = members;
        self.status = status.to_string();
    }

    fn decode(envelope: Envelope, operation: &str, common: CommonTags) -> Self {
        let mut project_id = String::new();
        let mut name = String::new();
        let mut desc = String::new();
        let mut members = Vec::new();
        let mut status = String::new();
        for tag in &envelope.tags {
            let Some(value) = tag.value() else { continue };
            match tag.name() {
                Some("project_id") => project_id = value.to_string(),
                Some("name") => name = value.to_string(),
                Some("desc") => desc = value.to_string(),
                Some("status") => status = value.to_string(),
                Some("members") => members = tag.values().to_vec(),
                _ => {}
            }
        }
        Self {
            op: SubspaceOpEnvelope::from_parts(envelope, operation, common),
            project_id,
            name,
            desc,
            members,
            status,
        }
    }
}

/// A task within a project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskEvent {
    pub op: SubspaceOpEnvelope,
    pub project_id: String,
    pub task_id: String,
    pub title: String,
    pub assignee: String,
    pub status: String,
    pub deadline: String,
}

impl TaskEvent {
    pub fn new(subspace_id: &str) -> Result<Self, OpsError> {
        Ok(Self {
            op: SubspaceOpEnvelope::new(subspace_id, KIND_COMMON_GRAPH_TASK)?,
            project_id: String::new(),
            task_id: String::new(),
            title: String::new(),
            assignee: String::new(),
            status: String::new(),
            deadline: String::new(),
        })
    }

    /// Set the task metadata.
    pub fn set_task_info(
        &mut self,
        project_id: &str,
        task_id: &str,
        title: &str,
        assignee: &str,
        status: &str,
        deadline: &str,
    ) {
        self.op.envelope.push_tag(Tag::pair("project_id", project_id));
        self.op.envelope.push_tag(Tag::pair("task_id", task_id));
        self.op.envelope.push_tag(Tag::pair("title", title));
        self.op.envelope.push_tag(Tag::pair("assignee", assignee));
        self.op.envelope.push_tag(Tag::pair("status", status));
        self.op.envelope.push_tag(Tag::pair("deadline", deadline));
        self.project_id = project_id.to_string();
        self.task_id = task_id.to_string();
        self.title = title.to_string();
        self.assignee = assignee.to_string();
        self.status = status.to_string();
        self.deadline = deadline.to_string();
    }

    fn decode(envelope: Envelope, operation: &str, common: CommonTags) -> Self {
        let mut project_id = String::new();
        let mut task_id = String::new();
        let mut title = String::new();
        let mut assignee = String::new();
        let mut status = String::new();
        let mut deadline = String::new();
        for tag in &envelope.tags {
            let Some(value) = tag.value() else { continue };
            match tag.name() {
                Some("project_id") => project_id = value.to_string(),
                Some("task_id") => task_id = value.to_string(),
                Some("title") => title = value.to_string(),
                Some("assignee") => assignee = value.to_string(),
                Some("status") => status = value.to_string(),
                Some("deadline") => deadline = value.to_string(),
                _ => {}
            }
        }
        Self {
            op: SubspaceOpEnvelope::from_parts(envelope, operation, common),
            project_id,
            task_id,
            title,
            assignee,
            status,
            deadline,
        }
    }
}

/// An entity node in the graph.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntityEvent {
    pub op: SubspaceOpEnvelope,
    pub entity_name: String,
    pub entity_type: String,
}

impl EntityEvent {
    pub fn new(subspace_id: &str) -> Result<Self, OpsError> {
        Ok(Self {
            op: SubspaceOpEnvelope::new(subspace_id, KIND_COMMON_GRAPH_ENTITY)?,
            entity_name: String::new(),
            entity_type: String::new(),
        })
    }

    /// Set the entity name and type.
    pub fn set_entity_info(&mut self, entity_name: &str, entity_type: &str) {
        self.op.envelope.push_tag(Tag::pair("entity_name", entity_name));
        self.op.envelope.push_tag(Tag::pair("entity_type", entity_type));
        self.entity_name = entity_name.to_string();
        self.entity_type = entity_type.to_string();
    }

    fn decode(envelope: Envelope, operation: &str, common: CommonTags) -> Self {
        let mut entity_name = String::new();
        let mut entity_type = String::new();
        for tag in &envelope.tags {
            let Some(value) = tag.value() else { continue };
            match tag.name() {
                Some("entity_name") => entity_name = value.to_string(),
                Some("entity_type") => entity_type = value.to_string(),
                _ => {}
            }
        }
        Self {
            op: SubspaceOpEnvelope::from_parts(envelope, operation, common),
            entity_name,
            entity_type,
        }
    }
}

/// A directed relation between two entities.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelationEvent {
    pub op: SubspaceOpEnvelope,
    pub from: String,
    pub to: String,
    pub relation_type: String,
    pub context: String,
}

impl RelationEvent {
    pub fn new(subspace_id: &str) -> Result<Self, OpsError> {
        Ok(Self {
            op: SubspaceOpEnvelope::new(subspace_id, KIND_COMMON_GRAPH_RELATION)?,
            from: String::new(),
            to: String::new(),
            relation_type: String::new(),
            context: String::new(),
        })
    }

    /// Set the relation endpoints, type, and optional context.
    pub fn set_relation_info(&mut self, from: &str, to: &str, relation_type: &str, context: &str) {
        self.op.envelope.push_tag(Tag::pair("from", from));
        self.op.envelope.push_tag(Tag::pair("to", to));
        self.op.envelope.push_tag(Tag::pair("relation_type", relation_type));
        if !context.is_empty() {
            self.op.envelope.push_tag(Tag::pair("context", context));
        }
        self.from = from.to_string();
        self.to = to.to_string();
        self.relation_type = relation_type.to_string();
        self.context = context.to_string();
    }

    fn decode(envelope: Envelope, operation: &str, common: CommonTags) -> Self {
        let mut from = String::new();
        let mut to = String::new();
        let mut relation_type = String::new();
        let mut context = String::new();
        for tag in &envelope.tags {
            let Some(value) = tag.value() else { continue };
            match tag.name() {
                Some("from") => from = value.to_string(),
                Some("to") => to = value.to_string(),
                Some("relation_type") => relation_type = value.to_string(),
                Some("context") => context = value.to_string(),
                _ => {}
            }
        }
        Self {
            op: SubspaceOpEnvelope::from_parts(envelope, operation, common),
            from,
            to,
            relation_type,
            context,
        }
    }
}

/// An observation attached to an entity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObservationEvent {
    pub op: SubspaceOpEnvelope,
    pub entity_name: String,
    pub observation: String,
}

impl ObservationEvent {
    pub fn new(subspace_id: &str) -> Result<Self, OpsError> {
        Ok(Self {
            op: SubspaceOpEnvelope::new(subspace_id, KIND_COMMON_GRAPH_OBSERVATION)?,
            entity_name: String::new(),
            observation: String::new(),
        })
    }

    /// Set the observed entity and the observation text.
    pub fn set_observation_info(&mut self, entity_name: &str, observation: &str) {
        self.op.envelope.push_tag(Tag::pair("entity_name", entity_name));
        self.op.envelope.push_tag(Tag::pair("observation", observation));
        self.entity_name = entity_name.to_string();
        self.observation = observation.to_string();
    }

    fn decode(envelope: Envelope, operation: &str, common: CommonTags) -> Self {
        let mut entity_name = String::new();
        let mut observation = String::new();
        for tag in &envelope.tags {
            let Some(value) = tag.value() else { continue };
            match tag.name() {
                Some("entity_name") => entity_name = value.to_string(),
                Some("observation") => observation = value.to_string(),
                _ => {}
            }
        }
        Self {
            op: SubspaceOpEnvelope::from_parts(envelope, operation, common),
            entity_name,
            observation,
        }
    }
}

impl_subspace_op!(
    ProjectEvent,
    TaskEvent,
    EntityEvent,
    RelationEvent,
    ObservationEvent,
);

/// A decoded common-graph operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommonGraphEvent {
    Project(ProjectEvent),
    Task(TaskEvent),
    Entity(EntityEvent),
    Relation(RelationEvent),
    Observation(ObservationEvent),
}

impl crate::op::SubspaceOp for CommonGraphEvent {
    fn header(&self) -> &SubspaceOpEnvelope {
        match self {
            Self::Project(e) => &e.op,
            Self::Task(e) => &e.op,
            Self::Entity(e) => &e.op,
            Self::Relation(e) => &e.op,
            Self::Observation(e) => &e.op,
        }
    }
}

/// Decode a raw envelope into a common-graph operation.
pub fn parse_common_graph_event(envelope: Envelope) -> Result<CommonGraphEvent, OpsError> {
    let common = extract_common(&envelope)?;
    let operation = resolve_operation(&envelope)?;

    match operation {
        OP_PROJECT => Ok(CommonGraphEvent::Project(ProjectEvent::decode(
            envelope, operation, common,
        ))),
        OP_TASK => Ok(CommonGraphEvent::Task(TaskEvent::decode(
            envelope, operation, common,
        ))),
        OP_ENTITY => Ok(CommonGraphEvent::Entity(EntityEvent::decode(
            envelope, operation, common,
        ))),
        OP_RELATION => Ok(CommonGraphEvent::Relation(RelationEvent::decode(
            envelope, operation, common,
        ))),
        OP_OBSERVATION => Ok(CommonGraphEvent::Observation(ObservationEvent::decode(
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
    fn project_round_trip_with_members() {
        let mut project = ProjectEvent::new(SID).unwrap();
        project.set_project_info(
            "prj-1",
            "Atlas",
            "Mapping effort",
            vec!["alice".into(), "bob".into()],
            "active",
        );

        let parsed = parse_common_graph_event(project.op.envelope.clone()).unwrap();
        let CommonGraphEvent::Project(parsed) = parsed else {
            panic!("expected project");
        };
        assert_eq!(parsed.project_id, "prj-1");
        assert_eq!(parsed.members, vec!["alice", "bob"]);
        assert_eq!(parsed.status, "active");
        assert_eq!(parsed.subspace_id(), SID);
    }

    #[test]
    fn empty_members_emit_no_tag() {
        let mut project = ProjectEvent::new(SID).unwrap();
        project.set_project_info("prj-1", "Atlas", "d", Vec::new(), "active");
        assert!(!project.op.envelope.has_tag("members"));
    }

    #[test]
    fn relation_context_is_optional() {
        let mut relation = RelationEvent::new(SID).unwrap();
        relation.set_relation_info("a", "b", "depends_on", "");
        assert!(!relation.op.envelope.has_tag("context"));

        let parsed = parse_common_graph_event(relation.op.envelope.clone()).unwrap();
        let CommonGraphEvent::Relation(parsed) = parsed else {
            panic!("expected relation");
        };
        assert_eq!(parsed.relation_type, "depends_on");
        assert!(parsed.context.is_empty());
    }

    #[test]
    fn task_round_trip() {
        let mut task = TaskEvent::new(SID).unwrap();
        task.set_task_info("prj-1", "t-9", "Write docs", "carol", "open", "2026-09-01");

        let parsed = parse_common_graph_event(task.op.envelope.clone()).unwrap();
        let CommonGraphEvent::Task(parsed) = parsed else {
            panic!("expected task");
        };
        assert_eq!(parsed.task_id, "t-9");
        assert_eq!(parsed.assignee, "carol");
        assert_eq!(parsed.deadline, "2026-09-01");
    }

    #[test]
    fn governance_kind_is_unknown_operation_here() {
        let envelope = Envelope::skeleton(30300, 0);
        assert_eq!(
            parse_common_graph_event(envelope),
            Err(OpsError::UnknownOperation("post".into()))
        );
    }
}
