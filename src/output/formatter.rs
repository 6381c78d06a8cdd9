//! Output formatters for ranking reports

use crate::config::OutputFormat;
use crate::error::Result;
use crate::output::export::{CsvQuoting, Exporter};
use crate::output::report::{RankedEntry, RankingReport};
use crate::processing::candidate::ScoreTier;
use crate::processing::skills::SkillSet;
use colored::{Color, Colorize};
use std::path::Path;

/// Trait for formatting ranking reports
pub trait OutputFormatter {
    fn format_report(&self, report: &RankingReport) -> Result<String>;
    fn supports_format(&self) -> OutputFormat;
}

/// Console formatter with colored tiers
pub struct ConsoleFormatter {
    use_colors: bool,
    detailed: bool,
}

/// JSON formatter for structured consumers
pub struct JsonFormatter {
    pretty: bool,
}

/// Markdown table for sharing
pub struct MarkdownFormatter {
    include_metadata: bool,
}

pub struct CsvFormatter {
    quoting: CsvQuoting,
}

/// Report generator that coordinates different formatters
pub struct ReportGenerator {
    console_formatter: ConsoleFormatter,
    json_formatter: JsonFormatter,
    markdown_formatter: MarkdownFormatter,
    csv_formatter: CsvFormatter,
}

impl ConsoleFormatter {
    pub fn new(use_colors: bool, detailed: bool) -> Self {
        Self { use_colors, detailed }
    }

    fn colorize(&self, text: &str, color: Color) -> String {
        if self.use_colors {
            text.color(color).to_string()
        } else {
            text.to_string()
        }
    }

    fn format_header(&self, title: &str) -> String {
        if self.use_colors {
            format!("\n{} {}\n", "█".blue().bold(), title.blue().bold())
        } else {
            format!("\n█ {}\n", title)
        }
    }

    fn format_tier_badge(&self, tier: ScoreTier) -> String {
        let (badge, color) = match tier {
            ScoreTier::High => ("HIGH", Color::Green),
            ScoreTier::Medium => ("MEDIUM", Color::Yellow),
            ScoreTier::Low => ("LOW", Color::Red),
        };

        if self.use_colors {
            format!("[{}]", badge.color(color).bold())
        } else {
            format!("[{}]", badge)
        }
    }

    fn format_entry(&self, entry: &RankedEntry) -> String {
        let mut output = format!(
            "{:>3}. {}  {}/10 {}\n",
            entry.rank,
            self.colorize(&entry.name, Color::White),
            entry.score_display,
            self.format_tier_badge(entry.tier)
        );

        for line in entry.summary.lines() {
            output.push_str(&format!("     {}\n", line.trim()));
        }

        if self.detailed {
            let contact = &entry.contact;
            let mut details = Vec::new();
            if !contact.email.is_empty() {
                details.push(format!("Email: {}", contact.email));
            }
            if !contact.phone.is_empty() {
                details.push(format!("Phone: {}", contact.phone));
            }
            if let Some(linkedin) = &contact.linkedin {
                details.push(format!("LinkedIn: {}", linkedin));
            }
            if let Some(github) = &contact.github {
                details.push(format!("GitHub: {}", github));
            }
            if !details.is_empty() {
                output.push_str(&format!("     {}\n", self.colorize(&details.join(" | "), Color::BrightBlack)));
            }

            output.push_str(&format!(
                "     Matched: {}\n",
                self.colorize(&join_skills(&entry.matched_skills), Color::Green)
            ));
            output.push_str(&format!(
                "     Missing: {}\n",
                self.colorize(&join_skills(&entry.missing_skills), Color::Red)
            ));
            output.push_str(&format!(
                "     Skill match {:.0}% -> {:.2} | similarity {:.3} -> {:.2}\n",
                entry.breakdown.skill_match_ratio * 100.0,
                entry.breakdown.skill_component,
                entry.breakdown.similarity,
                entry.breakdown.thematic_component
            ));
        }

        output
    }
}

impl OutputFormatter for ConsoleFormatter {
    fn format_report(&self, report: &RankingReport) -> Result<String> {
        let mut output = String::new();

        output.push_str(&self.format_header("📊 CANDIDATE RANKING"));
        output.push_str(&format!(
            "Generated: {} | Processing time: {}ms\n",
            report.metadata.generated_at.format("%Y-%m-%d %H:%M:%S UTC"),
            report.metadata.processing_time_ms
        ));
        output.push_str(&format!(
            "Job: {} | Required skills: {}\n",
            report.metadata.job_source,
            self.colorize(&join_skills(&report.job.skills), Color::Cyan)
        ));

        if report.job.skills.is_empty() {
            output.push_str(&format!(
                "{}\n",
                self.colorize(
                    "⚠️  No catalog skills found in the job description; ranking uses thematic similarity only",
                    Color::Yellow
                )
            ));
        }

        output.push_str(&self.format_header(&format!("Candidates ({})", report.candidates.len())));
        if report.candidates.is_empty() {
            output.push_str("  No candidates to show.\n");
        }
        for entry in &report.candidates {
            output.push_str(&self.format_entry(entry));
            output.push('\n');
        }

        if !report.metadata.skipped.is_empty() {
            output.push_str(&self.colorize("Skipped inputs:\n", Color::Yellow));
            for skipped in &report.metadata.skipped {
                output.push_str(&format!("  • {}\n", skipped));
            }
        }

        Ok(output)
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Console
    }
}

impl JsonFormatter {
    pub fn new(pretty: bool) -> Self {
        Self { pretty }
    }
}

impl OutputFormatter for JsonFormatter {
    fn format_report(&self, report: &RankingReport) -> Result<String> {
        if self.pretty {
            Ok(serde_json::to_string_pretty(report)?)
        } else {
            Ok(serde_json::to_string(report)?)
        }
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Json
    }
}

impl MarkdownFormatter {
    pub fn new(include_metadata: bool) -> Self {
        Self { include_metadata }
    }

    fn escape_cell(text: &str) -> String {
        text.replace('|', "\\|").replace('\n', "<br>")
    }
}

impl OutputFormatter for MarkdownFormatter {
    fn format_report(&self, report: &RankingReport) -> Result<String> {
        let mut output = String::from("# Candidate Ranking\n\n");

        if self.include_metadata {
            output.push_str(&format!(
                "*Generated {} from `{}` ({} candidates, {:?} matching)*\n\n",
                report.metadata.generated_at.format("%Y-%m-%d %H:%M UTC"),
                report.metadata.job_source,
                report.metadata.candidate_count,
                report.metadata.match_mode
            ));
        }

        output.push_str(&format!("**Required skills:** {}\n\n", join_skills(&report.job.skills)));

        output.push_str("| Rank | Name | Score | Tier | Matched | Missing | Summary |\n");
        output.push_str("|-----:|------|------:|------|---------|---------|---------|\n");
        for entry in &report.candidates {
            output.push_str(&format!(
                "| {} | {} | {} | {} | {} | {} | {} |\n",
                entry.rank,
                Self::escape_cell(&entry.name),
                entry.score_display,
                entry.tier,
                Self::escape_cell(&join_skills(&entry.matched_skills)),
                Self::escape_cell(&join_skills(&entry.missing_skills)),
                Self::escape_cell(&entry.summary)
            ));
        }

        if !report.metadata.skipped.is_empty() {
            output.push_str("\n## Skipped inputs\n\n");
            for skipped in &report.metadata.skipped {
                output.push_str(&format!("- {}\n", skipped));
            }
        }

        Ok(output)
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Markdown
    }
}

impl CsvFormatter {
    pub fn new(quoting: CsvQuoting) -> Self {
        Self { quoting }
    }
}

impl OutputFormatter for CsvFormatter {
    fn format_report(&self, report: &RankingReport) -> Result<String> {
        Exporter::render_csv(&report.rows, self.quoting)
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Csv
    }
}

impl ReportGenerator {
    pub fn with_options(use_colors: bool, detailed: bool, pretty_json: bool, quoting: CsvQuoting) -> Self {
        Self {
            console_formatter: ConsoleFormatter::new(use_colors, detailed),
            json_formatter: JsonFormatter::new(pretty_json),
            markdown_formatter: MarkdownFormatter::new(true),
            csv_formatter: CsvFormatter::new(quoting),
        }
    }

    pub fn generate_report(&self, report: &RankingReport, format: &OutputFormat) -> Result<String> {
        match format {
            OutputFormat::Console => self.console_formatter.format_report(report),
            OutputFormat::Json => self.json_formatter.format_report(report),
            OutputFormat::Markdown => self.markdown_formatter.format_report(report),
            OutputFormat::Csv => self.csv_formatter.format_report(report),
        }
    }
}

fn join_skills(skills: &SkillSet) -> String {
    if skills.is_empty() {
        "none".to_string()
    } else {
        skills.iter().collect::<Vec<_>>().join(", ")
    }
}

// Utility functions for saving reports
pub fn save_report_to_file(content: &str, file_path: &Path) -> Result<()> {
    use std::fs;
    if let Some(parent) = file_path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(file_path, content)?;
    Ok(())
}

pub fn suggest_filename(format: &OutputFormat, job_name: &str, timestamp: bool) -> String {
    let base_name = Path::new(job_name)
        .file_stem()
        .unwrap_or_default()
        .to_string_lossy();

    let timestamp_suffix = if timestamp {
        format!("_{}", chrono::Utc::now().format("%Y%m%d_%H%M%S"))
    } else {
        String::new()
    };

    match format {
        OutputFormat::Console => format!("{}_ranking{}.txt", base_name, timestamp_suffix),
        OutputFormat::Json => format!("{}_ranking{}.json", base_name, timestamp_suffix),
        OutputFormat::Markdown => format!("{}_ranking{}.md", base_name, timestamp_suffix),
        OutputFormat::Csv => format!("{}_ranking{}.csv", base_name, timestamp_suffix),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::report::RunContext;
    use crate::processing::catalog::MatchMode;
    use crate::processing::scoring::ScoreWeights;
    use crate::processing::screener::{CandidateDocument, Screener};

    fn sample_report() -> RankingReport {
        let screener = Screener::default();
        let job = screener.profile_job("Python developer with AWS and Docker");
        let scored: Vec<_> = [
            "Jane Doe\njane@example.com\nPython, AWS and Docker developer",
            "Joe | Smith\nJava",
        ]
        .iter()
        .enumerate()
        .map(|(i, text)| {
            screener.evaluate(
                &job,
                screener.prepare(CandidateDocument {
                    id: i.to_string(),
                    text: text.to_string(),
                }),
            )
        })
        .collect();

        RankingReport::build(
            &job,
            &Screener::rank(scored),
            RunContext {
                job_source: "job.txt".to_string(),
                skipped: Vec::new(),
                processing_time_ms: 1,
                match_mode: MatchMode::Substring,
                weights: ScoreWeights::default(),
            },
        )
    }

    #[test]
    fn test_console_without_colors() {
        let report = sample_report();
        let output = ConsoleFormatter::new(false, true).format_report(&report).unwrap();

        assert!(output.contains("CANDIDATE RANKING"));
        assert!(output.contains("Required skills: Python, AWS, Docker"));
        assert!(output.contains("  1. Jane Doe"));
        assert!(output.contains("[HIGH]"));
        assert!(output.contains("Email: jane@example.com"));
        assert!(!output.contains("\u{1b}["));
    }

    #[test]
    fn test_json_roundtrips_as_value() {
        let report = sample_report();
        let output = JsonFormatter::new(false).format_report(&report).unwrap();
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(value["candidates"].as_array().unwrap().len(), 2);
        assert_eq!(value["job"]["skills"][0], "Python");
    }

    #[test]
    fn test_markdown_escapes_pipes() {
        let report = sample_report();
        let output = MarkdownFormatter::new(false).format_report(&report).unwrap();
        assert!(output.contains("| Rank | Name |"));
        assert!(output.contains("Joe \\| Smith"));
        assert!(!output.contains("Generated"));
    }

    #[test]
    fn test_generator_dispatches_csv() {
        let report = sample_report();
        let generator = ReportGenerator::with_options(false, false, false, CsvQuoting::Necessary);
        let output = generator.generate_report(&report, &OutputFormat::Csv).unwrap();
        let mut lines = output.lines();
        assert_eq!(lines.next(), Some("Rank,Name,Score,Email,Phone,LinkedIn,GitHub,Summary"));
        assert!(lines.next().unwrap().starts_with("1,Jane Doe,"));
    }

    #[test]
    fn test_suggest_filename() {
        assert_eq!(
            suggest_filename(&OutputFormat::Csv, "jobs/backend.txt", false),
            "backend_ranking.csv"
        );
        assert!(suggest_filename(&OutputFormat::Json, "job.md", true).ends_with(".json"));
    }
}
