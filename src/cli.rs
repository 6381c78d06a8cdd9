//! CLI interface for the resume screener

use crate::config::OutputFormat;
use crate::output::export::CsvQuoting;
use crate::processing::candidate::ScoreTier;
use crate::processing::catalog::MatchMode;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "resume-screener")]
#[command(about = "Rank resumes against a job description")]
#[command(long_about = "Score candidate resumes by catalog skill overlap and thematic similarity with a job description, then rank and export them")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Rank resumes against a job description
    Rank {
        /// Path to job description file (TXT, MD)
        #[arg(short, long)]
        job: PathBuf,

        /// Resume files or directories of resumes (TXT, MD)
        #[arg(required = true)]
        resumes: Vec<PathBuf>,

        /// Output format: console, json, markdown, csv
        #[arg(short, long)]
        format: Option<String>,

        /// Save output to a file, or to a generated name inside a directory
        #[arg(short, long)]
        save: Option<PathBuf>,

        /// CSV field escaping: necessary, verbatim
        #[arg(long)]
        csv_quoting: Option<String>,

        /// Skill matching mode: substring, word-boundary
        #[arg(short, long)]
        mode: Option<String>,

        /// TOML skill catalog replacing the built-in one
        #[arg(long)]
        catalog: Option<PathBuf>,

        /// Only show candidates scoring at least this much
        #[arg(long)]
        min_score: Option<f64>,

        /// Only show one score tier: high, medium, low
        #[arg(long)]
        tier: Option<String>,

        /// Only show candidates whose name contains this text (case-insensitive)
        #[arg(long)]
        search: Option<String>,

        /// Show contact details and score breakdown
        #[arg(short, long)]
        detailed: bool,
    },

    /// Show the catalog skills found in a document
    Skills {
        /// Path to resume or job description
        file: PathBuf,

        /// Skill matching mode: substring, word-boundary
        #[arg(short, long)]
        mode: Option<String>,
    },

    /// List the skill catalog
    Catalog {
        /// TOML skill catalog to show instead of the configured one
        #[arg(long)]
        file: Option<PathBuf>,
    },

    /// Show or change configuration
    Config {
        #[command(subcommand)]
        action: Option<ConfigAction>,
    },
}

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Print the configuration file location
    Path,

    /// Reset configuration to defaults
    Reset,

    /// Set a configuration value
    Set {
        /// Configuration key (e.g., "scoring.skill_weight")
        key: String,

        /// Configuration value
        value: String,
    },
}

/// Parse and validate output format
pub fn parse_output_format(format: &str) -> Result<OutputFormat, String> {
    match format.to_lowercase().as_str() {
        "console" => Ok(OutputFormat::Console),
        "json" => Ok(OutputFormat::Json),
        "markdown" | "md" => Ok(OutputFormat::Markdown),
        "csv" => Ok(OutputFormat::Csv),
        _ => Err(format!(
            "Invalid output format: {}. Supported: console, json, markdown, csv",
            format
        )),
    }
}

pub fn parse_match_mode(mode: &str) -> Result<MatchMode, String> {
    match mode.to_lowercase().replace('-', "_").as_str() {
        "substring" => Ok(MatchMode::Substring),
        "word_boundary" | "word" => Ok(MatchMode::WordBoundary),
        _ => Err(format!(
            "Invalid matching mode: {}. Supported: substring, word-boundary",
            mode
        )),
    }
}

pub fn parse_csv_quoting(quoting: &str) -> Result<CsvQuoting, String> {
    match quoting.to_lowercase().as_str() {
        "necessary" | "quoted" => Ok(CsvQuoting::Necessary),
        "verbatim" | "none" => Ok(CsvQuoting::Verbatim),
        _ => Err(format!(
            "Invalid CSV quoting: {}. Supported: necessary, verbatim",
            quoting
        )),
    }
}

pub fn parse_tier(tier: &str) -> Result<ScoreTier, String> {
    match tier.to_lowercase().as_str() {
        "high" => Ok(ScoreTier::High),
        "medium" => Ok(ScoreTier::Medium),
        "low" => Ok(ScoreTier::Low),
        _ => Err(format!("Invalid tier: {}. Supported: high, medium, low", tier)),
    }
}
