use serde::Serialize;
use unicode_segmentation::UnicodeSegmentation;

pub const PREDEFINED_TAGS: [&str; 16] = [
    "AI",
    "Machine Learning",
    "JavaScript",
    "TypeScript",
    "React",
    "Node.js",
    "Cloud & AWS",
    "DevOps",
    "MLOps",
    "Generative AI",
    "Data Engineering",
    "System Design",
    "Open Source",
    "Tech Career",
    "Finance & Markets",
    "History & Culture",
];

pub const MAX_TAGS: usize = 10;
pub const CUSTOM_TAG_MAX_LEN: usize = 30;

/// A topic label, either one of [`PREDEFINED_TAGS`] or typed by the subscriber.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Tag(String);

impl Tag {
    /// Trims the input and keeps at most [`CUSTOM_TAG_MAX_LEN`] graphemes.
    pub fn parse(raw: &str) -> Result<Self, String> {
        let tag: String = raw.trim().graphemes(true).take(CUSTOM_TAG_MAX_LEN).collect();
        // Truncation can leave whitespace at the new end.
        let tag = tag.trim_end();
        if tag.is_empty() {
            Err(format!("{:?} is not a valid tag.", raw))
        } else {
            Ok(Self(tag.to_string()))
        }
    }

    pub fn is_predefined(&self) -> bool {
        PREDEFINED_TAGS.contains(&self.0.as_str())
    }

    fn same_label(&self, other: &str) -> bool {
        self.0.to_lowercase() == other.to_lowercase()
    }
}

impl AsRef<str> for Tag {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Tag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Outcome of an attempt to change the selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TagChange {
    Added(Tag),
    Removed(Tag),
    Unchanged,
}

/// Selected tags in the order they were picked, capped at [`MAX_TAGS`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct TagSelection(Vec<Tag>);

impl TagSelection {
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.0.len() >= MAX_TAGS
    }

    pub fn contains(&self, label: &str) -> bool {
        self.0.iter().any(|t| t.as_ref() == label)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Tag> {
        self.0.iter()
    }

    pub fn custom_tags(&self) -> impl Iterator<Item = &Tag> {
        self.0.iter().filter(|t| !t.is_predefined())
    }

    /// Deselects `label` if it is selected. Otherwise selects it, provided it
    /// is a predefined tag and there is room left.
    pub fn toggle(&mut self, label: &str) -> TagChange {
        if self.contains(label) {
            return self.remove(label);
        }
        if self.is_full() || !PREDEFINED_TAGS.contains(&label) {
            return TagChange::Unchanged;
        }
        let tag = Tag(label.to_string());
        self.0.push(tag.clone());
        TagChange::Added(tag)
    }

    /// Adds a subscriber-typed tag. Blank input, a full selection, or a
    /// case-insensitive clash with any predefined or selected tag is a no-op.
    pub fn add_custom(&mut self, raw: &str) -> TagChange {
        let Ok(tag) = Tag::parse(raw) else {
            return TagChange::Unchanged;
        };
        if self.is_full() {
            return TagChange::Unchanged;
        }
        let exists = PREDEFINED_TAGS.iter().any(|label| tag.same_label(label))
            || self.0.iter().any(|t| tag.same_label(t.as_ref()));
        if exists {
            return TagChange::Unchanged;
        }
        self.0.push(tag.clone());
        TagChange::Added(tag)
    }

    pub fn remove(&mut self, label: &str) -> TagChange {
        match self.0.iter().position(|t| t.as_ref() == label) {
            Some(index) => TagChange::Removed(self.0.remove(index)),
            None => TagChange::Unchanged,
        }
    }
}
