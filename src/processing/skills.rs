//! Skill sets and the extractor that derives them from free text

use crate::processing::catalog::SkillsCatalog;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Canonical skill names found in one text.
///
/// Iteration order is the catalog order the names were found in; equality
/// only compares membership.
#[derive(Debug, Clone, Default, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SkillSet(Vec<String>);

impl SkillSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, skill: &str) -> bool {
        self.0.iter().any(|s| s == skill)
    }

    /// Skills of `self` that are also in `other`, in `self` order
    pub fn intersection(&self, other: &SkillSet) -> SkillSet {
        SkillSet(self.0.iter().filter(|s| other.contains(s)).cloned().collect())
    }

    /// Skills of `self` missing from `other`, in `self` order
    pub fn difference(&self, other: &SkillSet) -> SkillSet {
        SkillSet(self.0.iter().filter(|s| !other.contains(s)).cloned().collect())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }
}

impl PartialEq for SkillSet {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().all(|s| other.contains(s))
    }
}

impl FromIterator<String> for SkillSet {
    fn from_iter<I: IntoIterator<Item = String>>(iter: I) -> Self {
        let mut set = SkillSet::new();
        for skill in iter {
            if !set.contains(&skill) {
                set.0.push(skill);
            }
        }
        set
    }
}

impl<'a> FromIterator<&'a str> for SkillSet {
    fn from_iter<I: IntoIterator<Item = &'a str>>(iter: I) -> Self {
        iter.into_iter().map(str::to_string).collect()
    }
}

/// Derives skill sets for jobs and candidates from one shared catalog
#[derive(Debug, Clone)]
pub struct SkillExtractor {
    catalog: Arc<SkillsCatalog>,
}

impl SkillExtractor {
    pub fn new(catalog: Arc<SkillsCatalog>) -> Self {
        Self { catalog }
    }

    pub fn extract(&self, text: &str) -> SkillSet {
        self.catalog.matches(text)
    }

    pub fn catalog(&self) -> &SkillsCatalog {
        &self.catalog
    }
}

impl Default for SkillExtractor {
    fn default() -> Self {
        Self::new(Arc::new(SkillsCatalog::default()))
    }
}
