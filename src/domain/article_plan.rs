use serde::Serialize;
use serde::ser::SerializeMap;

use crate::domain::Tag;

pub const SIMPLE_COUNTS: [u32; 5] = [5, 10, 15, 20, 25];
pub const DEFAULT_SIMPLE_COUNT: u32 = 10;
/// Per-topic counts are picked from `0..=MAX_PER_TOPIC`.
pub const MAX_PER_TOPIC: u32 = 5;
/// Per-topic totals must be a positive multiple of this.
pub const TOTAL_STEP: u32 = 5;
/// Per-topic mode needs at least this many selected tags.
pub const MIN_TAGS_FOR_PER_TOPIC: usize = 2;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ArticleMode {
    /// One article count for the whole newsletter.
    #[default]
    Simple,
    /// An article count for every selected tag.
    PerTopic,
}

impl ArticleMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ArticleMode::Simple => "simple",
            ArticleMode::PerTopic => "perTopic",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct SimpleCount(u32);

impl SimpleCount {
    pub fn parse(count: u32) -> Result<Self, String> {
        if SIMPLE_COUNTS.contains(&count) {
            Ok(Self(count))
        } else {
            Err(format!("{} is not an offered article count.", count))
        }
    }

    pub fn get(&self) -> u32 {
        self.0
    }
}

/// Article counts per tag, kept in selection order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TopicDistribution(Vec<(Tag, u32)>);

impl TopicDistribution {
    pub fn get(&self, tag: &str) -> Option<u32> {
        self.0
            .iter()
            .find(|(t, _)| t.as_ref() == tag)
            .map(|(_, count)| *count)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Tag, u32)> {
        self.0.iter().map(|(t, count)| (t, *count))
    }

    pub fn total(&self) -> u32 {
        self.0.iter().map(|(_, count)| count).sum()
    }

    pub fn is_valid_total(&self) -> bool {
        let total = self.total();
        total > 0 && total % TOTAL_STEP == 0
    }

    /// Sets the count for `tag`, appending the tag if it has no entry yet.
    pub fn set(&mut self, tag: Tag, count: u32) -> Result<(), String> {
        if count > MAX_PER_TOPIC {
            return Err(format!(
                "{} articles for {} is more than the allowed {}.",
                count, tag, MAX_PER_TOPIC
            ));
        }
        match self.0.iter_mut().find(|(t, _)| *t == tag) {
            Some((_, existing)) => *existing = count,
            None => self.0.push((tag, count)),
        }
        Ok(())
    }

    /// Adds `tag` with a zero count unless it already has an entry.
    pub fn seed(&mut self, tag: Tag) {
        if self.get(tag.as_ref()).is_none() {
            self.0.push((tag, 0));
        }
    }

    pub fn remove(&mut self, tag: &str) {
        self.0.retain(|(t, _)| t.as_ref() != tag);
    }
}

impl Serialize for TopicDistribution {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (tag, count) in &self.0 {
            map.serialize_entry(tag.as_ref(), count)?;
        }
        map.end()
    }
}

/// A validated article configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArticlePlan {
    Simple(SimpleCount),
    PerTopic(TopicDistribution),
}

impl ArticlePlan {
    pub fn mode(&self) -> ArticleMode {
        match self {
            ArticlePlan::Simple(_) => ArticleMode::Simple,
            ArticlePlan::PerTopic(_) => ArticleMode::PerTopic,
        }
    }

    pub fn total_count(&self) -> u32 {
        match self {
            ArticlePlan::Simple(count) => count.get(),
            ArticlePlan::PerTopic(distribution) => distribution.total(),
        }
    }

    pub fn topic_distribution(&self) -> Option<&TopicDistribution> {
        match self {
            ArticlePlan::Simple(_) => None,
            ArticlePlan::PerTopic(distribution) => Some(distribution),
        }
    }
}
