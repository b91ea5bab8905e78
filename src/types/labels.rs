//! An insertion-ordered set of label names.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A set of label names that remembers insertion order.
///
/// Membership ignores order, but iteration (and therefore what gets sent to
/// the replace-labels endpoint and what shows up in logs) follows the order
/// labels were first added. Duplicates are dropped on insert.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<String>", into = "Vec<String>")]
pub struct LabelSet(Vec<String>);

impl LabelSet {
    pub fn new() -> Self {
        LabelSet(Vec::new())
    }

    /// Adds a label, returning false if it was already present.
    pub fn insert(&mut self, label: impl Into<String>) -> bool {
        let label = label.into();
        if self.contains(&label) {
            return false;
        }
        self.0.push(label);
        true
    }

    pub fn contains(&self, label: &str) -> bool {
        self.0.iter().any(|l| l == label)
    }

    /// Returns true if any label in `self` is also in `other`.
    pub fn intersects(&self, other: &LabelSet) -> bool {
        self.0.iter().any(|l| other.contains(l))
    }

    /// Labels of `self` followed by the labels of `other` not already present.
    pub fn union(&self, other: &LabelSet) -> LabelSet {
        let mut merged = self.clone();
        for label in other.iter() {
            merged.insert(label.as_str());
        }
        merged
    }

    pub fn iter(&self) -> std::slice::Iter<'_, String> {
        self.0.iter()
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Membership comparison that ignores order.
    pub fn same_members(&self, other: &LabelSet) -> bool {
        self.len() == other.len() && self.iter().all(|l| other.contains(l))
    }
}

impl From<Vec<String>> for LabelSet {
    fn from(labels: Vec<String>) -> Self {
        labels.into_iter().collect()
    }
}

impl From<LabelSet> for Vec<String> {
    fn from(set: LabelSet) -> Self {
        set.0
    }
}

impl<S: Into<String>> FromIterator<S> for LabelSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut set = LabelSet::new();
        for label in iter {
            set.insert(label);
        }
        set
    }
}

impl<'a> IntoIterator for &'a LabelSet {
    type Item = &'a String;
    type IntoIter = std::slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl fmt::Display for LabelSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}]", self.0.join(", "))
    }
}
