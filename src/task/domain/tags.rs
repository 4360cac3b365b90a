//! Validated tag set.

use super::TaskDomainError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Set of trimmed, non-empty tags attached to a task.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<String>", into = "Vec<String>")]
pub struct TaskTags(BTreeSet<String>);

impl TaskTags {
    /// Creates a tag set, trimming and de-duplicating the input.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::EmptyTag`] when any tag is blank.
    pub fn new<I, S>(tags: I) -> Result<Self, TaskDomainError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        tags.into_iter()
            .map(|tag| {
                let raw = tag.into();
                let trimmed = raw.trim();
                if trimmed.is_empty() {
                    Err(TaskDomainError::EmptyTag)
                } else {
                    Ok(trimmed.to_owned())
                }
            })
            .collect::<Result<BTreeSet<_>, _>>()
            .map(Self)
    }

    /// Returns `true` when the set contains `tag`.
    #[must_use]
    pub fn contains(&self, tag: &str) -> bool {
        self.0.contains(tag)
    }

    /// Iterates over the tags in sorted order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    /// Returns the number of tags.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` when no tags are set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl TryFrom<Vec<String>> for TaskTags {
    type Error = TaskDomainError;

    fn try_from(value: Vec<String>) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<TaskTags> for Vec<String> {
    fn from(value: TaskTags) -> Self {
        value.0.into_iter().collect()
    }
}
