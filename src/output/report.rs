//! Ranking report assembled from screened candidates

use crate::output::export::{ExportRow, Exporter};
use crate::processing::candidate::{JobProfile, ScoreTier, ScoredCandidate};
use crate::processing::catalog::MatchMode;
use crate::processing::contact::ContactInfo;
use crate::processing::scoring::{ScoreBreakdown, ScoreWeights};
use crate::processing::skills::SkillSet;
use chrono::{DateTime, Utc};
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct RankingReport {
    pub metadata: ReportMetadata,
    pub job: JobOverview,
    pub candidates: Vec<RankedEntry>,
    /// Same candidates as flat export rows
    #[serde(skip)]
    pub rows: Vec<ExportRow>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ReportMetadata {
    pub generated_at: DateTime<Utc>,
    pub tool_version: String,
    pub job_source: String,
    pub candidate_count: usize,
    /// Inputs that could not be read
    pub skipped: Vec<String>,
    pub processing_time_ms: u64,
    pub match_mode: MatchMode,
    pub weights: ScoreWeights,
}

#[derive(Debug, Clone, Serialize)]
pub struct JobOverview {
    pub skills: SkillSet,
    pub word_count: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct RankedEntry {
    pub rank: usize,
    pub id: String,
    pub name: String,
    pub score: f64,
    pub score_display: String,
    pub tier: ScoreTier,
    pub contact: ContactInfo,
    pub skills: SkillSet,
    pub matched_skills: SkillSet,
    pub missing_skills: SkillSet,
    pub breakdown: ScoreBreakdown,
    pub summary: String,
}

/// Inputs describing the run rather than the candidates
#[derive(Debug, Clone)]
pub struct RunContext {
    pub job_source: String,
    pub skipped: Vec<String>,
    pub processing_time_ms: u64,
    pub match_mode: MatchMode,
    pub weights: ScoreWeights,
}

impl RankingReport {
    /// Build from candidates already in display order
    pub fn build(job: &JobProfile, ranked: &[ScoredCandidate], context: RunContext) -> Self {
        let candidates = ranked
            .iter()
            .enumerate()
            .map(|(index, candidate)| RankedEntry {
                rank: index + 1,
                id: candidate.id().to_string(),
                name: candidate.name().to_string(),
                score: candidate.score(),
                score_display: Exporter::format_score(candidate.score()),
                tier: candidate.tier(),
                contact: candidate.contact().clone(),
                skills: candidate.skills().clone(),
                matched_skills: job.skills.intersection(candidate.skills()),
                missing_skills: job.skills.difference(candidate.skills()),
                breakdown: *candidate.breakdown(),
                summary: candidate.summary().to_string(),
            })
            .collect();

        Self {
            metadata: ReportMetadata {
                generated_at: Utc::now(),
                tool_version: env!("CARGO_PKG_VERSION").to_string(),
                job_source: context.job_source,
                candidate_count: ranked.len(),
                skipped: context.skipped,
                processing_time_ms: context.processing_time_ms,
                match_mode: context.match_mode,
                weights: context.weights,
            },
            job: JobOverview {
                skills: job.skills.clone(),
                word_count: job.text.split_whitespace().count(),
            },
            candidates,
            rows: Exporter::to_rows(ranked),
        }
    }
}
