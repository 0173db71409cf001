//! Envelope: the signed-event substrate consumed by this crate.
//!
//! The envelope is produced, signed, and transported by an external layer.
//! This crate treats it as a given, immutable data shape: decoding never
//! mutates a received envelope, and the write path only appends tags to
//! envelopes it created itself, before they are handed off for signing.

use serde::{Deserialize, Serialize};

/// One tag on an envelope: a name followed by zero or more values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Tag(pub Vec<String>);

impl Tag {
    /// Build a `[name, value]` pair tag.
    pub fn pair(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self(vec![name.into(), value.into()])
    }

    /// Build a tag with a name and a list of trailing values.
    pub fn list(name: impl Into<String>, values: impl IntoIterator<Item = String>) -> Self {
        let mut items = vec![name.into()];
        items.extend(values);
        Self(items)
    }

    /// The tag name, if the tag is non-empty.
    pub fn name(&self) -> Option<&str> {
        self.0.first().map(String::as_str)
    }

    /// The first value after the name, if present.
    pub fn value(&self) -> Option<&str> {
        self.0.get(1).map(String::as_str)
    }

    /// All values after the name.
    pub fn values(&self) -> &[String] {
        if self.0.is_empty() {
            &[]
        } else {
            &self.0[1..]
        }
    }

    /// Whether this tag has the given name and at least one value.
    ///
    /// Tags with a bare name and no value are skipped by every scan,
    /// matching the substrate's convention.
    pub fn is_named(&self, name: &str) -> bool {
        self.0.len() >= 2 && self.0[0] == name
    }
}

impl From<Vec<String>> for Tag {
    fn from(items: Vec<String>) -> Self {
        Self(items)
    }
}

/// A signed event envelope as delivered by the substrate.
///
/// `id`, `pubkey`, and `sig` are opaque hex strings owned by the signing
/// layer. `content` is an opaque string whose internal structure belongs to
/// the operation that produced it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Envelope {
    pub id: String,
    pub pubkey: String,
    pub created_at: i64,
    pub kind: u32,
    pub tags: Vec<Tag>,
    pub content: String,
    pub sig: String,
}

impl Envelope {
    /// A skeleton envelope of the given kind, ready for tag appends.
    ///
    /// Identity and signature fields stay empty until the external signing
    /// layer fills them in.
    pub fn skeleton(kind: u32, created_at: i64) -> Self {
        Self {
            id: String::new(),
            pubkey: String::new(),
            created_at,
            kind,
            tags: Vec::new(),
            content: String::new(),
            sig: String::new(),
        }
    }

    /// Append a tag.
    pub fn push_tag(&mut self, tag: Tag) {
        self.tags.push(tag);
    }

    /// The value of the last occurrence of a named tag.
    ///
    /// Scans assign per encounter, so a repeated tag resolves to its last
    /// occurrence.
    pub fn last_tag_value(&self, name: &str) -> Option<&str> {
        self.tags
            .iter()
            .rev()
            .find(|t| t.is_named(name))
            .and_then(Tag::value)
    }

    /// The trailing values of the last occurrence of a named tag.
    pub fn last_tag_values(&self, name: &str) -> Option<&[String]> {
        self.tags
            .iter()
            .rev()
            .find(|t| t.is_named(name))
            .map(Tag::values)
    }

    /// All trailing values across every occurrence of a named tag,
    /// concatenated in encounter order.
    pub fn collect_tag_values(&self, name: &str) -> Vec<String> {
        self.tags
            .iter()
            .filter(|t| t.is_named(name))
            .flat_map(|t| t.values().iter().cloned())
            .collect()
    }

    /// Whether a named tag with at least one value is present.
    pub fn has_tag(&self, name: &str) -> bool {
        self.tags.iter().any(|t| t.is_named(name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn envelope_with_tags(tags: Vec<Tag>) -> Envelope {
        let mut env = Envelope::skeleton(30300, 1_700_000_000);
        env.tags = tags;
        env
    }

    #[test]
    fn last_occurrence_wins() {
        let env = envelope_with_tags(vec![
            Tag::pair("sid", "0xaaa"),
            Tag::pair("other", "x"),
            Tag::pair("sid", "0xbbb"),
        ]);
        assert_eq!(env.last_tag_value("sid"), Some("0xbbb"));
    }

    #[test]
    fn collect_concatenates_in_encounter_order() {
        let env = envelope_with_tags(vec![
            Tag::list("parent", vec!["a".into(), "b".into()]),
            Tag::pair("sid", "0xaaa"),
            Tag::list("parent", vec!["c".into()]),
        ]);
        assert_eq!(env.collect_tag_values("parent"), vec!["a", "b", "c"]);
    }

    #[test]
    fn bare_name_tags_are_skipped() {
        let env = envelope_with_tags(vec![Tag(vec!["sid".into()])]);
        assert_eq!(env.last_tag_value("sid"), None);
        assert!(!env.has_tag("sid"));
    }

    #[test]
    fn skeleton_leaves_identity_empty() {
        let env = Envelope::skeleton(30100, 42);
        assert_eq!(env.kind, 30100);
        assert_eq!(env.created_at, 42);
        assert!(env.id.is_empty());
        assert!(env.sig.is_empty());
        assert!(env.tags.is_empty());
    }
}
