//! Label sets and per-position match codes.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::ScanError;
use crate::role::Role;
use crate::timeline::Timeline;

/// A set of labels that share one semantic role.
///
/// Each distinct label keeps the index of its first occurrence, which becomes
/// its type code in scan output.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<String>", into = "Vec<String>")]
pub struct LabelSet {
    labels: Vec<String>,
    index: HashMap<String, usize>,
}

impl LabelSet {
    pub fn new<I, S>(labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut set = Self::default();
        for label in labels {
            let label = label.into();
            if !set.index.contains_key(&label) {
                set.index.insert(label.clone(), set.labels.len());
                set.labels.push(label);
            }
        }
        set
    }

    /// A set holding exactly one label.
    pub fn single(label: impl Into<String>) -> Self {
        Self::new([label])
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    /// Index of `label` in this set.
    pub fn position(&self, label: &str) -> Option<usize> {
        self.index.get(label).copied()
    }

    pub fn contains(&self, label: &str) -> bool {
        self.index.contains_key(label)
    }

    /// Fails when the set has no members but `role` needs at least one.
    pub fn require_members(&self, role: Role) -> Result<(), ScanError> {
        if self.is_empty() {
            Err(ScanError::EmptyLabelSet { role })
        } else {
            Ok(())
        }
    }

    /// Resolves every timeline position against this set.
    ///
    /// Membership is looked up once per vocabulary entry; positions then index
    /// into that table.
    pub fn matches(&self, timeline: &Timeline) -> MatchCodes {
        let by_symbol: Vec<Option<usize>> = timeline
            .vocabulary()
            .iter()
            .map(|label| self.position(label))
            .collect();

        MatchCodes(
            timeline
                .symbols()
                .iter()
                .map(|&symbol| by_symbol[symbol])
                .collect(),
        )
    }
}

impl From<Vec<String>> for LabelSet {
    fn from(labels: Vec<String>) -> Self {
        Self::new(labels)
    }
}

impl From<LabelSet> for Vec<String> {
    fn from(set: LabelSet) -> Self {
        set.labels
    }
}

/// Match annotation for every position of a timeline.
///
/// `None` means the position's label is not in the set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchCodes(Vec<Option<usize>>);

impl MatchCodes {
    /// Match code at `position`; `None` when out of bounds or unmatched.
    pub fn get(&self, position: usize) -> Option<usize> {
        self.0.get(position).copied().flatten()
    }

    pub fn is_match(&self, position: usize) -> bool {
        self.get(position).is_some()
    }

    pub fn as_slice(&self) -> &[Option<usize>] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of matching positions.
    pub fn count(&self) -> usize {
        self.0.iter().filter(|code| code.is_some()).count()
    }
}

/// Match codes for an optional set; an absent set matches nothing.
pub(crate) fn matches_or_none(set: Option<&LabelSet>, timeline: &Timeline) -> MatchCodes {
    set.map_or_else(
        || MatchCodes(vec![None; timeline.len()]),
        |set| set.matches(timeline),
    )
}

/// Rejects an empty single label for the given role.
pub(crate) fn require_label(label: &str, role: Role) -> Result<LabelSet, ScanError> {
    if label.is_empty() {
        return Err(ScanError::EmptyLabelSet { role });
    }
    Ok(LabelSet::single(label))
}
