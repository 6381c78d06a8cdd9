//! Screening pipeline: profile a job, score candidates, rank the results

use crate::config::{Config, MatchingConfig};
use crate::error::Result;
use crate::processing::candidate::{CandidateRecord, JobProfile, ScoreTier, ScoredCandidate};
use crate::processing::catalog::SkillsCatalog;
use crate::processing::contact::ContactExtractor;
use crate::processing::scoring::{ScoreWeights, ScoringEngine};
use crate::processing::skills::SkillExtractor;
use crate::processing::summary::SummaryGenerator;
use std::sync::Arc;
use std::time::Instant;
use tokio::task::JoinSet;

/// Raw text of one candidate before screening
#[derive(Debug, Clone)]
pub struct CandidateDocument {
    pub id: String,
    pub text: String,
}

/// Coordinates extraction, scoring and summaries for a batch of candidates
pub struct Screener {
    extractor: SkillExtractor,
    contacts: ContactExtractor,
    scoring: ScoringEngine,
    summaries: SummaryGenerator,
}

impl Screener {
    pub fn new(catalog: Arc<SkillsCatalog>, weights: ScoreWeights, summary_threshold: f64) -> Self {
        Self {
            extractor: SkillExtractor::new(catalog),
            contacts: ContactExtractor::new(),
            scoring: ScoringEngine::new(weights),
            summaries: SummaryGenerator::new(summary_threshold),
        }
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        config.validate()?;
        let catalog = Self::load_catalog(&config.matching)?;
        log::debug!(
            "Screener ready: {} skills, {:?} matching",
            catalog.len(),
            catalog.mode()
        );

        Ok(Self::new(
            Arc::new(catalog),
            ScoreWeights::from(&config.scoring),
            config.scoring.summary_threshold,
        ))
    }

    /// Catalog selected by the matching settings
    pub fn load_catalog(matching: &MatchingConfig) -> Result<SkillsCatalog> {
        let catalog = match &matching.catalog_path {
            Some(path) => SkillsCatalog::from_file(path, matching.mode)?,
            None => SkillsCatalog::default().with_mode(matching.mode),
        };
        catalog.extended(matching.extra_skills.clone())
    }

    pub fn extractor(&self) -> &SkillExtractor {
        &self.extractor
    }

    pub fn weights(&self) -> ScoreWeights {
        self.scoring.weights()
    }

    pub fn profile_job(&self, text: &str) -> JobProfile {
        let skills = self.extractor.extract(text);
        log::info!("Job description requires {} catalog skills", skills.len());

        JobProfile {
            text: text.to_string(),
            skills,
        }
    }

    /// Derive contact fields, display name and skills for one candidate
    pub fn prepare(&self, document: CandidateDocument) -> CandidateRecord {
        let contact = self.contacts.extract(&document.text);
        let name = self.contacts.extract_name(&document.text);
        let skills = self.extractor.extract(&document.text);

        CandidateRecord {
            id: document.id,
            name,
            text: document.text,
            contact,
            skills,
        }
    }

    pub fn evaluate(&self, job: &JobProfile, candidate: CandidateRecord) -> ScoredCandidate {
        let breakdown = self
            .scoring
            .breakdown(&candidate.skills, &job.skills, &candidate.text, &job.text);
        let summary = self
            .summaries
            .summarize(breakdown.score, &candidate.skills, &job.skills);

        log::debug!(
            "Scored {} ({}): {:.2} [skills {:.2}, thematic {:.2}]",
            candidate.name,
            candidate.id,
            breakdown.score,
            breakdown.skill_component,
            breakdown.thematic_component
        );

        ScoredCandidate::new(candidate, breakdown, summary)
    }

    /// Screen documents concurrently on the blocking pool.
    ///
    /// Results come back in input order whatever order the tasks finish in;
    /// `on_scored` runs once per candidate as it completes.
    pub async fn screen_batch<F>(
        self: Arc<Self>,
        job: Arc<JobProfile>,
        documents: Vec<CandidateDocument>,
        mut on_scored: F,
    ) -> Result<Vec<ScoredCandidate>>
    where
        F: FnMut(&ScoredCandidate),
    {
        let start_time = Instant::now();
        let total = documents.len();
        let mut tasks = JoinSet::new();

        for (index, document) in documents.into_iter().enumerate() {
            let screener = Arc::clone(&self);
            let job = Arc::clone(&job);
            tasks.spawn_blocking(move || {
                let record = screener.prepare(document);
                (index, screener.evaluate(&job, record))
            });
        }

        let mut slots: Vec<Option<ScoredCandidate>> = (0..total).map(|_| None).collect();
        while let Some(joined) = tasks.join_next().await {
            let (index, scored) = joined?;
            on_scored(&scored);
            slots[index] = Some(scored);
        }

        let results: Vec<ScoredCandidate> = slots.into_iter().flatten().collect();
        log::info!(
            "Screened {} candidates in {}ms",
            results.len(),
            start_time.elapsed().as_millis()
        );
        Ok(results)
    }

    /// Highest score first; equal scores keep their input order
    pub fn rank(mut candidates: Vec<ScoredCandidate>) -> Vec<ScoredCandidate> {
        candidates.sort_by(|a, b| b.score().total_cmp(&a.score()));
        candidates
    }

    /// Keep ranked candidates meeting an optional minimum score, tier and
    /// case-insensitive name search
    pub fn filter(
        candidates: Vec<ScoredCandidate>,
        min_score: Option<f64>,
        tier: Option<ScoreTier>,
        name: Option<&str>,
    ) -> Vec<ScoredCandidate> {
        let needle = name.map(str::to_lowercase);
        candidates
            .into_iter()
            .filter(|c| min_score.map_or(true, |min| c.score() >= min))
            .filter(|c| tier.map_or(true, |t| c.tier() == t))
            .filter(|c| {
                needle
                    .as_deref()
                    .map_or(true, |n| c.name().to_lowercase().contains(n))
            })
            .collect()
    }
}

impl Default for Screener {
    fn default() -> Self {
        Self::new(
            Arc::new(SkillsCatalog::default()),
            ScoreWeights::default(),
            5.0,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::processing::catalog::{MatchMode, SkillCatalogEntry};

    const JOB: &str = "Looking for a Python developer with AWS and Docker experience";

    fn document(id: &str, text: &str) -> CandidateDocument {
        CandidateDocument {
            id: id.to_string(),
            text: text.to_string(),
        }
    }

    #[test]
    fn test_evaluate_single_candidate() {
        let screener = Screener::default();
        let job = screener.profile_job(JOB);
        let record = screener.prepare(document(
            "c1",
            "Jane Doe\nExperienced Python developer with Docker experience, looking for growth\n\
             jane@example.com",
        ));
        assert_eq!(record.name, "Jane Doe");
        assert_eq!(record.contact.email, "jane@example.com");

        let scored = screener.evaluate(&job, record);
        assert!(scored.score() > 0.0 && scored.score() <= 10.0);
        assert_eq!(scored.breakdown().skill_match_ratio, 2.0 / 3.0);
        assert!(scored.summary().contains("Could improve in AWS"));
    }

    #[test]
    fn test_rank_is_stable_on_ties() {
        let screener = Screener::default();
        let job = screener.profile_job(JOB);
        let texts = [
            ("a", "Ann\nJava only"),
            ("b", "Bob\nPython AWS Docker expert"),
            ("c", "Cid\nJava only"),
        ];
        let scored: Vec<_> = texts
            .iter()
            .map(|(id, text)| screener.evaluate(&job, screener.prepare(document(id, text))))
            .collect();

        let ranked = Screener::rank(scored);
        let ids: Vec<_> = ranked.iter().map(|c| c.id()).collect();
        assert_eq!(ids, vec!["b", "a", "c"]);
    }

    #[test]
    fn test_filter_by_score_and_tier() {
        let screener = Screener::default();
        let job = screener.profile_job(JOB);
        let scored: Vec<_> = [JOB, "Nothing relevant here at all"]
            .iter()
            .enumerate()
            .map(|(i, text)| screener.evaluate(&job, screener.prepare(document(&i.to_string(), text))))
            .collect();
        let ranked = Screener::rank(scored);

        assert_eq!(Screener::filter(ranked.clone(), Some(5.0), None, None).len(), 1);
        assert_eq!(Screener::filter(ranked.clone(), None, Some(ScoreTier::Low), None).len(), 1);
        assert_eq!(Screener::filter(ranked, None, None, None).len(), 2);
    }

    #[test]
    fn test_filter_by_name_search() {
        let screener = Screener::default();
        let job = screener.profile_job(JOB);
        let scored: Vec<_> = [
            ("a", "Maria Lopez\nPython and Docker"),
            ("b", "Mario Rossi\nJava"),
            ("c", "Ann Lee\nPython AWS Docker"),
        ]
        .iter()
        .map(|(id, text)| screener.evaluate(&job, screener.prepare(document(id, text))))
        .collect();
        let ranked = Screener::rank(scored);

        let names = |found: Vec<ScoredCandidate>| {
            found.iter().map(|c| c.name().to_string()).collect::<Vec<_>>()
        };
        assert_eq!(
            names(Screener::filter(ranked.clone(), None, None, Some("MARI"))),
            vec!["Maria Lopez", "Mario Rossi"]
        );
        assert_eq!(
            names(Screener::filter(ranked.clone(), Some(5.0), None, Some("mari"))),
            vec!["Maria Lopez"]
        );
        assert!(Screener::filter(ranked.clone(), None, None, Some("zed")).is_empty());
        assert_eq!(Screener::filter(ranked, None, None, Some("")).len(), 3);
    }

    #[test]
    fn test_heavy_weights_still_cap_at_ten() {
        let config = Config::from_toml_str(
            "[scoring]\nskill_weight = 1.0\nthematic_weight = 1.0\nmax_score = 100.0\n",
        )
        .unwrap();
        let screener = Screener::from_config(&config).unwrap();
        let job = screener.profile_job(JOB);

        let scored = screener.evaluate(&job, screener.prepare(document("same", JOB)));
        assert_eq!(scored.score(), 10.0);
        assert_eq!(scored.tier(), ScoreTier::High);
        assert_eq!(crate::output::export::Exporter::format_score(scored.score()), "10.0");
    }

    #[test]
    fn test_weights_from_config() {
        let mut config = Config::default();
        config.scoring.skill_weight = 0.8;
        config.scoring.thematic_weight = 0.2;
        let screener = Screener::from_config(&config).unwrap();
        assert_eq!(screener.weights().skill_weight, 0.8);
        assert_eq!(screener.weights().thematic_weight, 0.2);
    }

    #[test]
    fn test_load_catalog_from_matching_config() {
        let matching = MatchingConfig {
            mode: MatchMode::WordBoundary,
            catalog_path: None,
            extra_skills: vec![SkillCatalogEntry {
                name: "Rust".to_string(),
                variants: vec!["rust".to_string()],
            }],
        };
        let catalog = Screener::load_catalog(&matching).unwrap();
        assert_eq!(catalog.len(), 24);
        assert_eq!(catalog.mode(), MatchMode::WordBoundary);
    }

    #[tokio::test]
    async fn test_screen_batch_preserves_input_order() {
        let screener = Arc::new(Screener::default());
        let job = Arc::new(screener.profile_job(JOB));
        let documents: Vec<_> = (0..12)
            .map(|i| {
                let text = if i % 2 == 0 {
                    format!("Candidate {}\nPython and Docker", i)
                } else {
                    format!("Candidate {}\nCOBOL mainframes", i)
                };
                document(&format!("id-{}", i), &text)
            })
            .collect();

        let mut seen = 0;
        let results = Arc::clone(&screener)
            .screen_batch(Arc::clone(&job), documents, |_| seen += 1)
            .await
            .unwrap();

        assert_eq!(seen, 12);
        let ids: Vec<_> = results.iter().map(|c| c.id().to_string()).collect();
        let expected: Vec<_> = (0..12).map(|i| format!("id-{}", i)).collect();
        assert_eq!(ids, expected);

        let sequential = screener.evaluate(&job, screener.prepare(document("id-0", "Candidate 0\nPython and Docker")));
        assert_eq!(results[0].score(), sequential.score());
    }
}
