//! Ordered, de-duplicating collections used by the topic chain.

use std::collections::HashSet;
use std::sync::Arc;

use crate::models::build::Build;

/// Insertion-ordered set of builds, keyed by build id.
///
/// Each topic node owns one of these; a build added to the same node more
/// than once is only counted once.
#[derive(Debug, Clone, Default)]
pub struct BuildCollection {
    builds: Vec<Arc<Build>>,
    ids: HashSet<i64>,
}

impl BuildCollection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a build. Returns `false` if a build with the same id is already
    /// present.
    pub fn add(&mut self, build: Arc<Build>) -> bool {
        if !self.ids.insert(build.id) {
            return false;
        }
        self.builds.push(build);
        true
    }

    pub fn has(&self, id: i64) -> bool {
        self.ids.contains(&id)
    }

    pub fn len(&self) -> usize {
        self.builds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.builds.is_empty()
    }

    pub fn first(&self) -> Option<&Arc<Build>> {
        self.builds.first()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Arc<Build>> {
        self.builds.iter()
    }
}

impl<'a> IntoIterator for &'a BuildCollection {
    type Item = &'a Arc<Build>;
    type IntoIter = std::slice::Iter<'a, Arc<Build>>;

    fn into_iter(self) -> Self::IntoIter {
        self.builds.iter()
    }
}

/// First-seen-ordered set of label strings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LabelCollection {
    labels: Vec<String>,
}

impl LabelCollection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a label. Returns `false` if already present.
    pub fn add(&mut self, label: &str) -> bool {
        if self.labels.iter().any(|l| l == label) {
            return false;
        }
        self.labels.push(label.to_string());
        true
    }

    pub fn has(&self, label: &str) -> bool {
        self.labels.iter().any(|l| l == label)
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn to_vec(&self) -> Vec<String> {
        self.labels.clone()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, String> {
        self.labels.iter()
    }
}
