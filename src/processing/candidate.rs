//! Job and candidate records flowing through screening

use crate::processing::contact::ContactInfo;
use crate::processing::scoring::ScoreBreakdown;
use crate::processing::skills::SkillSet;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobProfile {
    pub text: String,
    pub skills: SkillSet,
}

/// A candidate whose text has been read but not yet scored
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CandidateRecord {
    pub id: String,
    pub name: String,
    pub text: String,
    pub contact: ContactInfo,
    pub skills: SkillSet,
}

/// A candidate with its score and summary fixed.
///
/// Only built from a [`CandidateRecord`] by the screener; fields are
/// read through accessors so the score cannot be changed afterwards.
#[derive(Debug, Clone, Serialize)]
pub struct ScoredCandidate {
    record: CandidateRecord,
    breakdown: ScoreBreakdown,
    summary: String,
}

impl ScoredCandidate {
    pub(crate) fn new(record: CandidateRecord, breakdown: ScoreBreakdown, summary: String) -> Self {
        Self {
            record,
            breakdown,
            summary,
        }
    }

    pub fn id(&self) -> &str {
        &self.record.id
    }

    pub fn name(&self) -> &str {
        &self.record.name
    }

    pub fn contact(&self) -> &ContactInfo {
        &self.record.contact
    }

    pub fn skills(&self) -> &SkillSet {
        &self.record.skills
    }

    pub fn score(&self) -> f64 {
        self.breakdown.score
    }

    pub fn breakdown(&self) -> &ScoreBreakdown {
        &self.breakdown
    }

    pub fn summary(&self) -> &str {
        &self.summary
    }

    pub fn tier(&self) -> ScoreTier {
        ScoreTier::from_score(self.score())
    }
}

/// Display band of a score on the 0-10 scale
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScoreTier {
    High,
    Medium,
    Low,
}

impl ScoreTier {
    pub fn from_score(score: f64) -> Self {
        if score >= 7.0 {
            ScoreTier::High
        } else if score >= 5.0 {
            ScoreTier::Medium
        } else {
            ScoreTier::Low
        }
    }
}

impl fmt::Display for ScoreTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScoreTier::High => write!(f, "High"),
            ScoreTier::Medium => write!(f, "Medium"),
            ScoreTier::Low => write!(f, "Low"),
        }
    }
}
