//! Open research operations: papers, annotations, reviews, AI analyses,
//! and discussions.
//!
//! The kind block also reserves `read_paper` (30506) and `co_create_paper`
//! (30507). Those kinds resolve in the registry but this module ships no
//! decoder for them, so dispatching one fails with `UnknownOperation`.

use std::collections::BTreeMap;

use subspace_kernel_core::registry::{
    KIND_OPEN_RESEARCH_AI_ANALYSIS, KIND_OPEN_RESEARCH_ANNOTATION, KIND_OPEN_RESEARCH_DISCUSSION,
    KIND_OPEN_RESEARCH_PAPER, KIND_OPEN_RESEARCH_REVIEW, OP_AI_ANALYSIS, OP_ANNOTATION,
    OP_DISCUSSION, OP_PAPER, OP_REVIEW,
};
use subspace_kernel_core::{Envelope, Tag};

use crate::error::OpsError;
use crate::op::{extract_common, impl_subspace_op, resolve_operation, CommonTags, SubspaceOpEnvelope};

/// A paper registration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaperEvent {
    pub op: SubspaceOpEnvelope,
    pub doi: String,
    pub paper_type: String,
    pub authors: Vec<String>,
    pub keywords: Vec<String>,
    pub year: String,
    pub journal: String,
}

impl PaperEvent {
    pub fn new(subspace_id: &str) -> Result<Self, OpsError> {
        Ok(Self {
            op: SubspaceOpEnvelope::new(subspace_id, KIND_OPEN_RESEARCH_PAPER)?,
            doi: String::new(),
            paper_type: String::new(),
            authors: Vec::new(),
            keywords: Vec::new(),
            year: String::new(),
            journal: String::new(),
        })
    }

    /// Set the paper metadata.
    pub fn set_paper_info(
        &mut self,
        doi: &str,
        paper_type: &str,
        authors: Vec<String>,
        keywords: Vec<String>,
        year: &str,
        journal: &str,
    ) {
        self.op.envelope.push_tag(Tag::pair("doi", doi));
        self.op.envelope.push_tag(Tag::pair("paper_type", paper_type));
        self.op.envelope.push_tag(Tag::pair("year", year));
        self.op.envelope.push_tag(Tag::pair("journal", journal));
        if !authors.is_empty() {
            self.op
                .envelope
                .push_tag(Tag::list("authors", authors.iter().cloned()));
        }
        if !keywords.is_empty() {
            self.op
                .envelope
                .push_tag(Tag::list("keywords", keywords.iter().cloned()));
        }
        self.doi = doi.to_string();
        self.paper_type = paper_type.to_string();
        self.authors = authors;
        self.keywords = keywords;
        self.year = year.to_string();
        self.journal = journal.to_string();
    }

    fn decode(envelope: Envelope, operation: &str, common: CommonTags) -> Self {
        let mut doi = String::new();
        let mut paper_type = String::new();
        let mut authors = Vec::new();
        let mut keywords = Vec::new();
        let mut year = String::new();
        let mut journal = String::new();
        for tag in &envelope.tags {
            let Some(value) = tag.value() else { continue };
            match tag.name() {
                Some("doi") => doi = value.to_string(),
                Some("paper_type") => paper_type = value.to_string(),
                Some("authors") => authors = tag.values().to_vec(),
                Some("keywords") => keywords = tag.values().to_vec(),
                Some("year") => year = value.to_string(),
                Some("journal") => journal = value.to_string(),
                _ => {}
            }
        }
        Self {
            op: SubspaceOpEnvelope::from_parts(envelope, operation, common),
            doi,
            paper_type,
            authors,
            keywords,
            year,
            journal,
        }
    }
}

/// An annotation anchored to a position within a paper.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnnotationEvent {
    pub op: SubspaceOpEnvelope,
    pub paper_id: String,
    pub position: String,
    pub annotation_type: String,
    pub parent_id: String,
}

impl AnnotationEvent {
    pub fn new(subspace_id: &str) -> Result<Self, OpsError> {
        Ok(Self {
            op: SubspaceOpEnvelope::new(subspace_id, KIND_OPEN_RESEARCH_ANNOTATION)?,
            paper_id: String::new(),
            position: String::new(),
            annotation_type: String::new(),
            parent_id: String::new(),
        })
    }

    /// Set the annotation anchor and optional parent annotation.
    pub fn set_annotation_info(
        &mut self,
        paper_id: &str,
        position: &str,
        annotation_type: &str,
        parent_id: &str,
    ) {
        self.op.envelope.push_tag(Tag::pair("paper_id", paper_id));
        self.op.envelope.push_tag(Tag::pair("position", position));
        self.op.envelope.push_tag(Tag::pair("type", annotation_type));
        if !parent_id.is_empty() {
            self.op.envelope.push_tag(Tag::pair("parent", parent_id));
        }
        self.paper_id = paper_id.to_string();
        self.position = position.to_string();
        self.annotation_type = annotation_type.to_string();
        self.parent_id = parent_id.to_string();
    }

    fn decode(envelope: Envelope, operation: &str, common: CommonTags) -> Self {
        let mut paper_id = String::new();
        let mut position = String::new();
        let mut annotation_type = String::new();
        let mut parent_id = String::new();
        for tag in &envelope.tags {
            let Some(value) = tag.value() else { continue };
            match tag.name() {
                Some("paper_id") => paper_id = value.to_string(),
                Some("position") => position = value.to_string(),
                Some("type") => annotation_type = value.to_string(),
                Some("parent") => parent_id = value.to_string(),
                _ => {}
            }
        }
        Self {
            op: SubspaceOpEnvelope::from_parts(envelope, operation, common),
            paper_id,
            position,
            annotation_type,
            parent_id,
        }
    }
}

/// A structured review of a paper.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewEvent {
    pub op: SubspaceOpEnvelope,
    pub paper_id: String,
    pub rating: String,
    pub aspects: BTreeMap<String, String>,
}

impl ReviewEvent {
    pub fn new(subspace_id: &str) -> Result<Self, OpsError> {
        Ok(Self {
            op: SubspaceOpEnvelope::new(subspace_id, KIND_OPEN_RESEARCH_REVIEW)?,
            paper_id: String::new(),
            rating: String::new(),
            aspects: BTreeMap::new(),
        })
    }

    /// Set the review rating and per-aspect scores.
    ///
    /// Aspects serialize into one `aspects` tag as `key:value,...` in key
    /// order; an empty map emits no tag.
    pub fn set_review_info(
        &mut self,
        paper_id: &str,
        rating: &str,
        aspects: BTreeMap<String, String>,
    ) {
        self.op.envelope.push_tag(Tag::pair("paper_id", paper_id));
        self.op.envelope.push_tag(Tag::pair("rating", rating));
        if !aspects.is_empty() {
            let serialized = aspects
                .iter()
                .map(|(k, v)| format!("{k}:{v}"))
                .collect::<Vec<_>>()
                .join(",");
            self.op.envelope.push_tag(Tag::pair("aspects", serialized));
        }
        self.paper_id = paper_id.to_string();
        self.rating = rating.to_string();
        self.aspects = aspects;
    }

    fn decode(envelope: Envelope, operation: &str, common: CommonTags) -> Self {
        let mut paper_id = String::new();
        let mut rating = String::new();
        let mut aspects = BTreeMap::new();
        for tag in &envelope.tags {
            let Some(value) = tag.value() else { continue };
            match tag.name() {
                Some("paper_id") => paper_id = value.to_string(),
                Some("rating") => rating = value.to_string(),
                Some("aspects") => {
                    aspects = value
                        .split(',')
                        .filter_map(|pair| pair.split_once(':'))
                        .map(|(k, v)| (k.to_string(), v.to_string()))
                        .collect();
                }
                _ => {}
            }
        }
        Self {
            op: SubspaceOpEnvelope::from_parts(envelope, operation, common),
            paper_id,
            rating,
            aspects,
        }
    }
}

/// An AI analysis over one or more papers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AiAnalysisEvent {
    pub op: SubspaceOpEnvelope,
    pub analysis_type: String,
    pub paper_ids: Vec<String>,
    pub prompt: String,
}

impl AiAnalysisEvent {
    pub fn new(subspace_id: &str) -> Result<Self, OpsError> {
        Ok(Self {
            op: SubspaceOpEnvelope::new(subspace_id, KIND_OPEN_RESEARCH_AI_ANALYSIS)?,
            analysis_type: String::new(),
            paper_ids: Vec::new(),
            prompt: String::new(),
        })
    }

    /// Set the analysis type, target papers, and prompt.
    pub fn set_ai_analysis_info(
        &mut self,
        analysis_type: &str,
        paper_ids: Vec<String>,
        prompt: &str,
    ) {
        self.op.envelope.push_tag(Tag::pair("analysis_type", analysis_type));
        self.op.envelope.push_tag(Tag::pair("prompt", prompt));
        if !paper_ids.is_empty() {
            self.op
                .envelope
                .push_tag(Tag::list("paper_ids", paper_ids.iter().cloned()));
        }
        self.analysis_type = analysis_type.to_string();
        self.paper_ids = paper_ids;
        self.prompt = prompt.to_string();
    }

    fn decode(envelope: Envelope, operation: &str, common: CommonTags) -> Self {
        let mut analysis_type = String::new();
        let mut paper_ids = Vec::new();
        let mut prompt = String::new();
        for tag in &envelope.tags {
            let Some(value) = tag.value() else { continue };
            match tag.name() {
                Some("analysis_type") => analysis_type = value.to_string(),
                Some("paper_ids") => paper_ids = tag.values().to_vec(),
                Some("prompt") => prompt = value.to_string(),
                _ => {}
            }
        }
        Self {
            op: SubspaceOpEnvelope::from_parts(envelope, operation, common),
            analysis_type,
            paper_ids,
            prompt,
        }
    }
}

/// A threaded discussion entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscussionEvent {
    pub op: SubspaceOpEnvelope,
    pub topic: String,
    pub parent_id: String,
    pub references: Vec<String>,
}

impl DiscussionEvent {
    pub fn new(subspace_id: &str) -> Result<Self, OpsError> {
        Ok(Self {
            op: SubspaceOpEnvelope::new(subspace_id, KIND_OPEN_RESEARCH_DISCUSSION)?,
            topic: String::new(),
            parent_id: String::new(),
            references: Vec::new(),
        })
    }

    /// Set the discussion topic, optional parent entry, and references.
    pub fn set_discussion_info(&mut self, topic: &str, parent_id: &str, references: Vec<String>) {
        self.op.envelope.push_tag(Tag::pair("topic", topic));
        if !parent_id.is_empty() {
            self.op.envelope.push_tag(Tag::pair("parent", parent_id));
        }
        if !references.is_empty() {
            self.op
                .envelope
                .push_tag(Tag::list("references", references.iter().cloned()));
        }
        self.topic = topic.to_string();
        self.parent_id = parent_id.to_string();
        self.references = references;
    }

    fn decode(envelope: Envelope, operation: &str, common: CommonTags) -> Self {
        let mut topic = String::new();
        let mut parent_id = String::new();
        let mut references = Vec::new();
        for tag in &envelope.tags {
            let Some(value) = tag.value() else { continue };
            match tag.name() {
                Some("topic") => topic = value.to_string(),
                Some("parent") => parent_id = value.to_string(),
                Some("references") => references = tag.values().to_vec(),
                _ => {}
            }
        }
        Self {
            op: SubspaceOpEnvelope::from_parts(envelope, operation, common),
            topic,
            parent_id,
            references,
        }
    }
}

impl_subspace_op!(
    PaperEvent,
    AnnotationEvent,
    ReviewEvent,
    AiAnalysisEvent,
    DiscussionEvent,
);

/// A decoded open-research operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OpenResearchEvent {
    Paper(PaperEvent),
    Annotation(AnnotationEvent),
    Review(ReviewEvent),
    AiAnalysis(AiAnalysisEvent),
    Discussion(DiscussionEvent),
}

impl crate::op::SubspaceOp for OpenResearchEvent {
    fn header(&self) -> &SubspaceOpEnvelope {
        match self {
            Self::Paper(e) => &e.op,
            Self::Annotation(e) => &e.op,
            Self::Review(e) => &e.op,
            Self::AiAnalysis(e) => &e.op,
            Self::Discussion(e) => &e.op,
        }
    }
}

/// Decode a raw envelope into an open-research operation.
pub fn parse_open_research_event(envelope: Envelope) -> Result<OpenResearchEvent, OpsError> {
    let common = extract_common(&envelope)?;
    let operation = resolve_operation(&envelope)?;

    match operation {
        OP_PAPER => Ok(OpenResearchEvent::Paper(PaperEvent::decode(
            envelope, operation, common,
        ))),
        OP_ANNOTATION => Ok(OpenResearchEvent::Annotation(AnnotationEvent::decode(
            envelope, operation, common,
        ))),
        OP_REVIEW => Ok(OpenResearchEvent::Review(ReviewEvent::decode(
            envelope, operation, common,
        ))),
        OP_AI_ANALYSIS => Ok(OpenResearchEvent::AiAnalysis(AiAnalysisEvent::decode(
            envelope, operation, common,
        ))),
        OP_DISCUSSION => Ok(OpenResearchEvent::Discussion(DiscussionEvent::decode(
            envelope, operation, common,
        ))),
        other => Err(OpsError::UnknownOperation(other.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use subspace_kernel_core::registry::{
        KIND_OPEN_RESEARCH_CO_CREATE, KIND_OPEN_RESEARCH_READ_PAPER,
    };

    const SID: &str = "0x1234567890abcdef1234567890abcdef1234567890abcdef1234567890abcdef";

    #[test]
    fn paper_round_trip_with_value_lists() {
        let mut paper = PaperEvent::new(SID).unwrap();
        paper.set_paper_info(
            "10.1000/xyz",
            "preprint",
            vec!["alice".into(), "bob".into()],
            vec!["causality".into()],
            "2026",
            "ArXiv",
        );

        let parsed = parse_open_research_event(paper.op.envelope.clone()).unwrap();
        let OpenResearchEvent::Paper(parsed) = parsed else {
            panic!("expected paper");
        };
        assert_eq!(parsed.doi, "10.1000/xyz");
        assert_eq!(parsed.authors, vec!["alice", "bob"]);
        assert_eq!(parsed.keywords, vec!["causality"]);
    }

    #[test]
    fn review_aspects_round_trip() {
        let mut review = ReviewEvent::new(SID).unwrap();
        let aspects: BTreeMap<String, String> = [
            ("novelty".to_string(), "4".to_string()),
            ("rigor".to_string(), "5".to_string()),
        ]
        .into();
        review.set_review_info("paper-1", "4.5", aspects.clone());

        assert_eq!(
            review.op.envelope.last_tag_value("aspects"),
            Some("novelty:4,rigor:5")
        );

        let parsed = parse_open_research_event(review.op.envelope.clone()).unwrap();
        let OpenResearchEvent::Review(parsed) = parsed else {
            panic!("expected review");
        };
        assert_eq!(parsed.aspects, aspects);
    }

    #[test]
    fn registered_kind_without_decoder_is_unknown_operation() {
        for (kind, op) in [
            (KIND_OPEN_RESEARCH_READ_PAPER, "read_paper"),
            (KIND_OPEN_RESEARCH_CO_CREATE, "co_create_paper"),
        ] {
            let envelope = Envelope::skeleton(kind, 0);
            assert_eq!(
                parse_open_research_event(envelope),
                Err(OpsError::UnknownOperation(op.into()))
            );
        }
    }

    #[test]
    fn discussion_parent_is_optional() {
        let mut discussion = DiscussionEvent::new(SID).unwrap();
        discussion.set_discussion_info("scaling laws", "", vec!["paper-1".into()]);
        assert!(!discussion.op.envelope.has_tag("parent"));

        let parsed = parse_open_research_event(discussion.op.envelope.clone()).unwrap();
        let OpenResearchEvent::Discussion(parsed) = parsed else {
            panic!("expected discussion");
        };
        assert_eq!(parsed.references, vec!["paper-1"]);
        assert!(parsed.parent_id.is_empty());
    }
}
