//! Score composition: skill overlap plus thematic similarity

use crate::config::ScoringConfig;
use crate::processing::similarity::SimilarityEngine;
use crate::processing::skills::SkillSet;
use serde::{Deserialize, Serialize};

/// Scale applied to both ratios and upper bound of every score
pub const MAX_SCORE: f64 = 10.0;

/// Component weights
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreWeights {
    pub skill_weight: f64,
    pub thematic_weight: f64,
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self {
            skill_weight: 0.6,
            thematic_weight: 0.4,
        }
    }
}

impl From<&ScoringConfig> for ScoreWeights {
    fn from(config: &ScoringConfig) -> Self {
        Self {
            skill_weight: config.skill_weight,
            thematic_weight: config.thematic_weight,
        }
    }
}

/// Every intermediate value behind one score
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub skill_match_ratio: f64,
    pub similarity: f64,
    pub skill_component: f64,
    pub thematic_component: f64,
    pub score: f64,
}

#[derive(Debug, Clone, Default)]
pub struct ScoringEngine {
    weights: ScoreWeights,
    similarity: SimilarityEngine,
}

impl ScoringEngine {
    pub fn new(weights: ScoreWeights) -> Self {
        Self {
            weights,
            similarity: SimilarityEngine::new(),
        }
    }

    pub fn weights(&self) -> ScoreWeights {
        self.weights
    }

    /// Final score in [0, MAX_SCORE]
    pub fn score(
        &self,
        candidate_skills: &SkillSet,
        job_skills: &SkillSet,
        candidate_text: &str,
        job_text: &str,
    ) -> f64 {
        self.breakdown(candidate_skills, job_skills, candidate_text, job_text)
            .score
    }

    pub fn breakdown(
        &self,
        candidate_skills: &SkillSet,
        job_skills: &SkillSet,
        candidate_text: &str,
        job_text: &str,
    ) -> ScoreBreakdown {
        let skill_match_ratio = Self::skill_match_ratio(candidate_skills, job_skills);
        let similarity = self.similarity.similarity(job_text, candidate_text);

        let skill_component = skill_match_ratio * MAX_SCORE * self.weights.skill_weight;
        let thematic_component = similarity * MAX_SCORE * self.weights.thematic_weight;
        let score = (skill_component + thematic_component).min(MAX_SCORE);

        ScoreBreakdown {
            skill_match_ratio,
            similarity,
            skill_component,
            thematic_component,
            score,
        }
    }

    /// Share of job skills the candidate has; 0 when the job lists none
    pub fn skill_match_ratio(candidate_skills: &SkillSet, job_skills: &SkillSet) -> f64 {
        if job_skills.is_empty() {
            return 0.0;
        }
        let matched = job_skills.intersection(candidate_skills).len();
        matched as f64 / job_skills.len() as f64
    }
}
