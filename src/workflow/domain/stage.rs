//! Stage names and ordered stage lists.

use super::WorkflowDomainError;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

/// Maximum length for a stage name, matching the `VARCHAR(100)` status column.
const MAX_STAGE_NAME_LENGTH: usize = 100;

/// Stage names used when a project has no workflow bound.
const DEFAULT_BOARD_STAGES: [&str; 3] = ["To Do", "In Progress", "Done"];

/// Validated name of a single workflow stage.
///
/// Stage names are trimmed but otherwise compared by exact value, so
/// `"Done"` and `"done"` are distinct stages.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct StageName(String);

impl StageName {
    /// Creates a validated stage name.
    ///
    /// # Errors
    ///
    /// Returns [`WorkflowDomainError::EmptyStageName`] when the value is empty
    /// after trimming, or [`WorkflowDomainError::StageNameTooLong`] when it
    /// exceeds 100 characters.
    pub fn new(value: impl Into<String>) -> Result<Self, WorkflowDomainError> {
        let raw = value.into();
        let normalized = raw.trim();
        if normalized.is_empty() {
            return Err(WorkflowDomainError::EmptyStageName);
        }
        if normalized.chars().count() > MAX_STAGE_NAME_LENGTH {
            return Err(WorkflowDomainError::StageNameTooLong(raw));
        }
        Ok(Self(normalized.to_owned()))
    }

    /// Returns the stage name as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for StageName {
    type Error = WorkflowDomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<StageName> for String {
    fn from(value: StageName) -> Self {
        value.0
    }
}

impl AsRef<str> for StageName {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl PartialEq<str> for StageName {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for StageName {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

impl fmt::Display for StageName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Ordered, non-empty list of unique stage names.
///
/// The position of a stage in the list is its column position on the board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<String>", into = "Vec<String>")]
pub struct StageList {
    first: StageName,
    rest: Vec<StageName>,
}

impl StageList {
    /// Creates a validated stage list from raw stage names.
    ///
    /// # Errors
    ///
    /// Returns [`WorkflowDomainError::EmptyStageList`] when no stages are
    /// supplied, [`WorkflowDomainError::DuplicateStage`] when a name repeats,
    /// or a stage-name validation error for any invalid entry.
    pub fn new<I, S>(stages: I) -> Result<Self, WorkflowDomainError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut seen = HashSet::new();
        let mut names = Vec::new();
        for raw in stages {
            let name = StageName::new(raw)?;
            if !seen.insert(name.clone()) {
                return Err(WorkflowDomainError::DuplicateStage(name.0));
            }
            names.push(name);
        }

        let mut iter = names.into_iter();
        let first = iter.next().ok_or(WorkflowDomainError::EmptyStageList)?;
        Ok(Self {
            first,
            rest: iter.collect(),
        })
    }

    /// Returns the stage list used for projects without a bound workflow:
    /// `To Do`, `In Progress`, `Done`.
    #[must_use]
    pub fn default_board() -> Self {
        let [first, rest @ ..] = DEFAULT_BOARD_STAGES;
        Self {
            first: StageName(first.to_owned()),
            rest: rest.iter().map(|name| StageName((*name).to_owned())).collect(),
        }
    }

    /// Returns the first stage of the list.
    #[must_use]
    pub const fn first(&self) -> &StageName {
        &self.first
    }

    /// Iterates over the stages in board order.
    pub fn iter(&self) -> impl Iterator<Item = &StageName> {
        std::iter::once(&self.first).chain(self.rest.iter())
    }

    /// Returns the number of stages.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rest.len() + 1
    }

    /// Always `false`; a stage list holds at least one stage.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        false
    }

    /// Returns `true` when `stage` is one of the listed stages.
    #[must_use]
    pub fn contains(&self, stage: &str) -> bool {
        self.iter().any(|candidate| candidate.as_str() == stage)
    }

    /// Returns the board position of `stage`, if listed.
    #[must_use]
    pub fn position(&self, stage: &str) -> Option<usize> {
        self.iter().position(|candidate| candidate.as_str() == stage)
    }

    /// Returns the stage names as owned strings in board order.
    #[must_use]
    pub fn to_strings(&self) -> Vec<String> {
        self.iter().map(ToString::to_string).collect()
    }
}

impl Default for StageList {
    fn default() -> Self {
        Self::default_board()
    }
}

impl TryFrom<Vec<String>> for StageList {
    type Error = WorkflowDomainError;

    fn try_from(value: Vec<String>) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<StageList> for Vec<String> {
    fn from(value: StageList) -> Self {
        std::iter::once(value.first)
            .chain(value.rest)
            .map(String::from)
            .collect()
    }
}

impl<'a> IntoIterator for &'a StageList {
    type Item = &'a StageName;
    type IntoIter =
        std::iter::Chain<std::iter::Once<&'a StageName>, std::slice::Iter<'a, StageName>>;

    fn into_iter(self) -> Self::IntoIter {
        std::iter::once(&self.first).chain(self.rest.iter())
    }
}
