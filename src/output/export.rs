//! Flat tabular export of ranked candidates

use crate::error::{Result, ScreenerError};
use crate::processing::candidate::ScoredCandidate;
use csv::{QuoteStyle, Terminator, WriterBuilder};
use serde::{Deserialize, Serialize};

pub const HEADER: [&str; 8] = [
    "Rank", "Name", "Score", "Email", "Phone", "LinkedIn", "GitHub", "Summary",
];

/// Field escaping for CSV output
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CsvQuoting {
    /// Quote fields holding a comma, quote or line break (RFC 4180)
    #[default]
    Necessary,
    /// Write every field as-is; commas in names or summaries shift columns
    Verbatim,
}

/// One exported line, every field already formatted
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExportRow {
    pub rank: usize,
    pub name: String,
    pub score: String,
    pub email: String,
    pub phone: String,
    pub linkedin: String,
    pub github: String,
    pub summary: String,
}

impl ExportRow {
    pub fn fields(&self) -> [String; 8] {
        [
            self.rank.to_string(),
            self.name.clone(),
            self.score.clone(),
            self.email.clone(),
            self.phone.clone(),
            self.linkedin.clone(),
            self.github.clone(),
            self.summary.clone(),
        ]
    }
}

pub struct Exporter;

impl Exporter {
    /// Rows in input order; rank is the 1-based position
    pub fn to_rows(ranked: &[ScoredCandidate]) -> Vec<ExportRow> {
        ranked
            .iter()
            .enumerate()
            .map(|(index, candidate)| {
                let contact = candidate.contact();
                ExportRow {
                    rank: index + 1,
                    name: candidate.name().to_string(),
                    score: Self::format_score(candidate.score()),
                    email: contact.email.clone(),
                    phone: contact.phone.clone(),
                    linkedin: contact.linkedin.clone().unwrap_or_default(),
                    github: contact.github.clone().unwrap_or_default(),
                    summary: Self::flatten(candidate.summary()),
                }
            })
            .collect()
    }

    /// One decimal place, halves rounded away from zero
    pub fn format_score(score: f64) -> String {
        let rounded = (score * 10.0).round() / 10.0;
        format!("{:.1}", rounded)
    }

    pub fn render_csv(rows: &[ExportRow], quoting: CsvQuoting) -> Result<String> {
        let quote_style = match quoting {
            CsvQuoting::Necessary => QuoteStyle::Necessary,
            CsvQuoting::Verbatim => QuoteStyle::Never,
        };

        let mut writer = WriterBuilder::new()
            .quote_style(quote_style)
            .terminator(Terminator::Any(b'\n'))
            .from_writer(Vec::new());

        writer.write_record(HEADER)?;
        for row in rows {
            writer.write_record(row.fields())?;
        }

        let bytes = writer
            .into_inner()
            .map_err(|e| ScreenerError::OutputFormatting(format!("Failed to flush CSV: {}", e)))?;
        String::from_utf8(bytes)
            .map_err(|e| ScreenerError::OutputFormatting(format!("CSV is not valid UTF-8: {}", e)))
    }

    fn flatten(summary: &str) -> String {
        summary.replace("\r\n", " ").replace('\n', " ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::processing::candidate::CandidateRecord;
    use crate::processing::contact::ContactInfo;
    use crate::processing::scoring::ScoreBreakdown;
    use crate::processing::skills::SkillSet;

    fn scored(name: &str, score: f64, summary: &str, contact: ContactInfo) -> ScoredCandidate {
        let record = CandidateRecord {
            id: name.to_lowercase(),
            name: name.to_string(),
            text: String::new(),
            contact,
            skills: SkillSet::new(),
        };
        let breakdown = ScoreBreakdown {
            skill_match_ratio: 0.0,
            similarity: 0.0,
            skill_component: 0.0,
            thematic_component: score,
            score,
        };
        ScoredCandidate::new(record, breakdown, summary.to_string())
    }

    #[test]
    fn test_format_score_rounds_half_away_from_zero() {
        assert_eq!(Exporter::format_score(8.25), "8.3");
        assert_eq!(Exporter::format_score(0.25), "0.3");
        assert_eq!(Exporter::format_score(9.96), "10.0");
        assert_eq!(Exporter::format_score(0.0), "0.0");
        assert_eq!(Exporter::format_score(10.0), "10.0");
        assert_eq!(Exporter::format_score(4.04), "4.0");
    }

    #[test]
    fn test_single_row() {
        let contact = ContactInfo {
            email: "jane@example.com".to_string(),
            phone: "555-123-4567".to_string(),
            linkedin: Some("linkedin.com/in/jane".to_string()),
            github: None,
        };
        let candidates = vec![scored("Jane Doe", 8.25, "Line one.\nLine two.", contact)];

        let rows = Exporter::to_rows(&candidates);
        assert_eq!(rows.len(), 1);
        assert_eq!(
            rows[0].fields(),
            [
                "1",
                "Jane Doe",
                "8.3",
                "jane@example.com",
                "555-123-4567",
                "linkedin.com/in/jane",
                "",
                "Line one. Line two.",
            ]
            .map(String::from)
        );
    }

    #[test]
    fn test_rows_keep_input_order() {
        let candidates = vec![
            scored("Low", 1.0, "", ContactInfo::default()),
            scored("High", 9.0, "", ContactInfo::default()),
        ];
        let rows = Exporter::to_rows(&candidates);
        assert_eq!(rows[0].name, "Low");
        assert_eq!(rows[0].rank, 1);
        assert_eq!(rows[1].name, "High");
        assert_eq!(rows[1].rank, 2);
    }

    #[test]
    fn test_render_csv_quoting_modes() {
        let candidates = vec![scored(
            "Doe, Jane",
            6.0,
            "Why YES: skills including Python, Docker.\nMore.",
            ContactInfo::default(),
        )];
        let rows = Exporter::to_rows(&candidates);

        let quoted = Exporter::render_csv(&rows, CsvQuoting::Necessary).unwrap();
        assert_eq!(
            quoted,
            "Rank,Name,Score,Email,Phone,LinkedIn,GitHub,Summary\n\
             1,\"Doe, Jane\",6.0,,,,,\"Why YES: skills including Python, Docker. More.\"\n"
        );

        let verbatim = Exporter::render_csv(&rows, CsvQuoting::Verbatim).unwrap();
        assert_eq!(
            verbatim,
            "Rank,Name,Score,Email,Phone,LinkedIn,GitHub,Summary\n\
             1,Doe, Jane,6.0,,,,,Why YES: skills including Python, Docker. More.\n"
        );
    }

    #[test]
    fn test_render_empty() {
        let csv = Exporter::render_csv(&[], CsvQuoting::Necessary).unwrap();
        assert_eq!(csv, "Rank,Name,Score,Email,Phone,LinkedIn,GitHub,Summary\n");
    }
}
