//! Skill catalog: canonical skill names and the surface forms that signal them

use crate::error::{Result, ScreenerError};
use crate::processing::skills::SkillSet;
use aho_corasick::AhoCorasick;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

/// One canonical skill and its lowercase variants
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillCatalogEntry {
    pub name: String,
    pub variants: Vec<String>,
}

/// How a variant has to sit in the text to count as a hit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchMode {
    /// Any case-insensitive occurrence, even inside a longer word
    #[default]
    Substring,
    /// The occurrence must not touch an alphanumeric character on either side
    WordBoundary,
}

#[derive(Debug, Deserialize)]
struct CatalogFile {
    skills: Vec<SkillCatalogEntry>,
}

/// Immutable skill catalog with a single multi-pattern matcher over every variant.
///
/// Nothing is written after construction, so a catalog can be shared across
/// threads behind an `Arc` without locking.
#[derive(Debug, Clone)]
pub struct SkillsCatalog {
    entries: Vec<SkillCatalogEntry>,
    matcher: AhoCorasick,
    /// Entry index for each matcher pattern
    pattern_owner: Vec<usize>,
    mode: MatchMode,
}

impl SkillsCatalog {
    /// Build a catalog from entries, validating names and variants
    pub fn new(entries: Vec<SkillCatalogEntry>, mode: MatchMode) -> Result<Self> {
        let mut seen = HashSet::new();
        let mut normalized = Vec::with_capacity(entries.len());

        for entry in entries {
            let name = entry.name.trim().to_string();
            if name.is_empty() {
                return Err(ScreenerError::Catalog("Skill name cannot be empty".to_string()));
            }
            if !seen.insert(name.clone()) {
                return Err(ScreenerError::Catalog(format!("Duplicate skill: {}", name)));
            }
            if entry.variants.is_empty() {
                return Err(ScreenerError::Catalog(format!("Skill '{}' has no variants", name)));
            }

            let mut variants = Vec::with_capacity(entry.variants.len());
            for variant in &entry.variants {
                let variant = variant.to_lowercase();
                if variant.trim().is_empty() {
                    return Err(ScreenerError::Catalog(format!(
                        "Skill '{}' has an empty variant",
                        name
                    )));
                }
                variants.push(variant);
            }

            normalized.push(SkillCatalogEntry { name, variants });
        }

        let mut patterns = Vec::new();
        let mut pattern_owner = Vec::new();
        for (index, entry) in normalized.iter().enumerate() {
            for variant in &entry.variants {
                patterns.push(variant.as_str());
                pattern_owner.push(index);
            }
        }

        // Standard match kind so overlapping search reports every variant
        let matcher = AhoCorasick::new(&patterns)
            .map_err(|e| ScreenerError::Catalog(format!("Failed to build skill matcher: {}", e)))?;

        Ok(Self {
            entries: normalized,
            matcher,
            pattern_owner,
            mode,
        })
    }

    /// Parse a TOML catalog made of `[[skills]]` tables
    pub fn from_toml_str(content: &str, mode: MatchMode) -> Result<Self> {
        let file: CatalogFile = toml::from_str(content)
            .map_err(|e| ScreenerError::Catalog(format!("Failed to parse catalog: {}", e)))?;
        Self::new(file.skills, mode)
    }

    pub fn from_file(path: &Path, mode: MatchMode) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let catalog = Self::from_toml_str(&content, mode)?;
        log::info!("Loaded {} skills from {}", catalog.len(), path.display());
        Ok(catalog)
    }

    /// Same entries matched under a different mode
    pub fn with_mode(mut self, mode: MatchMode) -> Self {
        self.mode = mode;
        self
    }

    /// Append entries after the existing ones
    pub fn extended(self, extra: Vec<SkillCatalogEntry>) -> Result<Self> {
        if extra.is_empty() {
            return Ok(self);
        }
        let mode = self.mode;
        let mut entries = self.entries;
        entries.extend(extra);
        Self::new(entries, mode)
    }

    /// Skills present in `text`, in catalog order. Never fails.
    pub fn matches(&self, text: &str) -> SkillSet {
        if text.is_empty() || self.entries.is_empty() {
            return SkillSet::default();
        }

        let haystack = text.to_lowercase();
        let mut present = vec![false; self.entries.len()];
        let mut remaining = self.entries.len();

        for mat in self.matcher.find_overlapping_iter(&haystack) {
            let owner = self.pattern_owner[mat.pattern().as_usize()];
            if present[owner] {
                continue;
            }
            if self.mode == MatchMode::WordBoundary
                && !is_word_bounded(&haystack, mat.start(), mat.end())
            {
                continue;
            }

            present[owner] = true;
            remaining -= 1;
            if remaining == 0 {
                break;
            }
        }

        self.entries
            .iter()
            .zip(present)
            .filter(|(_, hit)| *hit)
            .map(|(entry, _)| entry.name.clone())
            .collect()
    }

    pub fn entries(&self) -> &[SkillCatalogEntry] {
        &self.entries
    }

    pub fn mode(&self) -> MatchMode {
        self.mode
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Built-in technology catalog
    pub fn default_entries() -> Vec<SkillCatalogEntry> {
        const SKILLS: &[(&str, &[&str])] = &[
            ("Python", &["python", "py", "python3"]),
            ("JavaScript", &["javascript", "js", "es6", "typescript", "ts"]),
            ("Java", &["java", "jdk", "jre"]),
            ("C++", &["c++", "cpp", "c plus plus"]),
            ("React", &["react", "reactjs", "react.js"]),
            ("Angular", &["angular", "angularjs", "angular.js"]),
            ("Vue", &["vue", "vuejs", "vue.js"]),
            ("Node.js", &["node", "nodejs", "node.js"]),
            ("MySQL", &["mysql", "my sql"]),
            ("MongoDB", &["mongodb", "mongo"]),
            ("PostgreSQL", &["postgresql", "postgres"]),
            ("AWS", &["aws", "amazon web services"]),
            ("Azure", &["azure", "microsoft azure"]),
            ("GCP", &["gcp", "google cloud platform"]),
            ("Docker", &["docker", "container"]),
            ("Kubernetes", &["kubernetes", "k8s"]),
            ("Jenkins", &["jenkins", "ci/cd"]),
            ("TensorFlow", &["tensorflow", "tf"]),
            ("PyTorch", &["pytorch", "torch"]),
            ("Pandas", &["pandas", "python pandas"]),
            ("iOS", &["ios", "swift", "objective-c"]),
            ("Android", &["android", "kotlin", "android studio"]),
            ("React Native", &["react native", "react-native"]),
        ];

        SKILLS
            .iter()
            .map(|(name, variants)| SkillCatalogEntry {
                name: name.to_string(),
                variants: variants.iter().map(|v| v.to_string()).collect(),
            })
            .collect()
    }
}

impl Default for SkillsCatalog {
    fn default() -> Self {
        Self::new(Self::default_entries(), MatchMode::Substring)
            .expect("built-in skill catalog is valid")
    }
}

fn is_word_bounded(haystack: &str, start: usize, end: usize) -> bool {
    let before = haystack[..start].chars().next_back();
    let after = haystack[end..].chars().next();
    !before.is_some_and(char::is_alphanumeric) && !after.is_some_and(char::is_alphanumeric)
}
