//! Deterministic explanations of a score

use crate::processing::skills::SkillSet;

/// How many skills a summary names
const LISTED_SKILLS: usize = 3;

#[derive(Debug, Clone, Copy)]
pub struct SummaryGenerator {
    threshold: f64,
}

impl Default for SummaryGenerator {
    fn default() -> Self {
        Self::new(5.0)
    }
}

impl SummaryGenerator {
    /// Scores at or above `threshold` get the positive summary
    pub fn new(threshold: f64) -> Self {
        Self { threshold }
    }

    /// Two-line verdict naming matched or missing skills in job order
    pub fn summarize(&self, score: f64, candidate_skills: &SkillSet, job_skills: &SkillSet) -> String {
        let matched = job_skills.intersection(candidate_skills);
        let missing = job_skills.difference(candidate_skills);

        if score >= self.threshold {
            let mut summary = format!(
                "Why YES: Strong candidate with relevant skills including {}.\n\
                 Demonstrates proficiency in key areas.",
                list_skills(&matched)
            );
            if let Some(first_missing) = missing.iter().next() {
                summary.push_str(&format!(" Could improve in {}.", first_missing));
            }
            summary
        } else {
            format!(
                "Why NO: Candidate lacks critical skills such as {}.\n\
                 Limited relevant experience detected. Consider for other roles.",
                list_skills(&missing)
            )
        }
    }
}

fn list_skills(skills: &SkillSet) -> String {
    if skills.is_empty() {
        return "none detected".to_string();
    }
    skills
        .iter()
        .take(LISTED_SKILLS)
        .collect::<Vec<_>>()
        .join(", ")
}
