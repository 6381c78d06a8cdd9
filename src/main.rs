//! Resume screener: rank resumes against a job description

use anyhow::{bail, Context};
use clap::Parser;
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use log::{error, info, warn};
use resume_screener::cli::{self, Cli, Commands, ConfigAction};
use resume_screener::config::{Config, OutputFormat};
use resume_screener::input::manager::{collect_resume_paths, InputManager};
use resume_screener::output::formatter::{save_report_to_file, suggest_filename, ReportGenerator};
use resume_screener::output::report::{RankingReport, RunContext};
use resume_screener::processing::candidate::ScoreTier;
use resume_screener::processing::catalog::SkillsCatalog;
use resume_screener::processing::screener::{CandidateDocument, Screener};
use std::path::{Path, PathBuf};
use std::process;
use std::sync::Arc;
use std::time::Instant;

#[tokio::main]
async fn main() {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    let config_path = cli.config.clone().unwrap_or_else(Config::config_path);

    // Load configuration
    let config = match Config::load_from(&config_path) {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            process::exit(1);
        }
    };

    // Execute command
    if let Err(e) = run_command(cli.command, config, &config_path).await {
        error!("Command failed: {:#}", e);
        process::exit(1);
    }
}

async fn run_command(command: Commands, mut config: Config, config_path: &Path) -> anyhow::Result<()> {
    match command {
        Commands::Rank {
            job,
            resumes,
            format,
            save,
            csv_quoting,
            mode,
            catalog,
            min_score,
            tier,
            search,
            detailed,
        } => {
            if let Some(format) = format {
                config.output.format = cli::parse_output_format(&format).map_err(anyhow::Error::msg)?;
            }
            if let Some(quoting) = csv_quoting {
                config.output.csv_quoting = cli::parse_csv_quoting(&quoting).map_err(anyhow::Error::msg)?;
            }
            if let Some(mode) = mode {
                config.matching.mode = cli::parse_match_mode(&mode).map_err(anyhow::Error::msg)?;
            }
            if catalog.is_some() {
                config.matching.catalog_path = catalog;
            }
            config.output.detailed |= detailed;
            let tier = tier
                .map(|t| cli::parse_tier(&t))
                .transpose()
                .map_err(anyhow::Error::msg)?;

            let filters = Filters {
                min_score,
                tier,
                search,
            };
            rank(&config, &job, &resumes, save.as_deref(), &filters).await
        }

        Commands::Skills { file, mode } => {
            if let Some(mode) = mode {
                config.matching.mode = cli::parse_match_mode(&mode).map_err(anyhow::Error::msg)?;
            }
            let screener = Screener::from_config(&config)?;
            let text = InputManager::new()
                .extract_text(&file)
                .await
                .with_context(|| format!("Failed to read {}", file.display()))?;

            let skills = screener.extractor().extract(&text);
            println!("{} {}", "🔎 Skills found in".bold(), file.display());
            if skills.is_empty() {
                println!("  (none)");
            }
            for skill in skills.iter() {
                println!("  • {}", skill);
            }
            Ok(())
        }

        Commands::Catalog { file } => {
            let catalog = match file {
                Some(path) => SkillsCatalog::from_file(&path, config.matching.mode)?,
                None => Screener::load_catalog(&config.matching)?,
            };

            println!("{} ({} skills, {:?} matching)", "📚 Skill catalog".bold(), catalog.len(), catalog.mode());
            for entry in catalog.entries() {
                println!("  {:<14} {}", entry.name.green(), entry.variants.join(", "));
            }
            Ok(())
        }

        Commands::Config { action } => match action.unwrap_or(ConfigAction::Show) {
            ConfigAction::Show => {
                let content = toml::to_string_pretty(&config).context("Failed to render configuration")?;
                println!("{}", content);
                Ok(())
            }
            ConfigAction::Path => {
                println!("{}", config_path.display());
                Ok(())
            }
            ConfigAction::Reset => {
                Config::default().save_to(config_path)?;
                println!("✅ Configuration reset: {}", config_path.display());
                Ok(())
            }
            ConfigAction::Set { key, value } => {
                config.set(&key, &value)?;
                config.save_to(config_path)?;
                println!("✅ {} = {}", key, value);
                Ok(())
            }
        },
    }
}

/// Display filters for `rank`
struct Filters {
    min_score: Option<f64>,
    tier: Option<ScoreTier>,
    search: Option<String>,
}

async fn rank(
    config: &Config,
    job: &Path,
    resumes: &[PathBuf],
    save: Option<&Path>,
    filters: &Filters,
) -> anyhow::Result<()> {
    info!("Starting candidate ranking");
    let start_time = Instant::now();

    let screener = Arc::new(Screener::from_config(config)?);
    let mut input_manager = InputManager::new().with_cache(config.processing.enable_caching);

    let job_text = input_manager
        .extract_text(job)
        .await
        .with_context(|| format!("Failed to read job description {}", job.display()))?;
    let job_profile = Arc::new(screener.profile_job(&job_text));
    if job_profile.skills.is_empty() {
        warn!("No catalog skills found in the job description; skill match will be 0 for everyone");
    }

    let paths = collect_resume_paths(resumes)?;
    if paths.len() > config.processing.max_candidates {
        bail!(
            "{} resumes given, at most {} allowed (processing.max_candidates)",
            paths.len(),
            config.processing.max_candidates
        );
    }

    let mut documents = Vec::with_capacity(paths.len());
    let mut skipped = Vec::new();
    for path in &paths {
        match input_manager.extract_text(path).await {
            Ok(text) => documents.push(CandidateDocument {
                id: path.display().to_string(),
                text,
            }),
            Err(e) => {
                warn!("Failed to parse {}: {}", path.display(), e);
                skipped.push(format!("{}: {}", path.display(), e));
            }
        }
    }

    if documents.is_empty() {
        bail!("None of the {} resumes could be read", paths.len());
    }

    let progress = ProgressBar::new(documents.len() as u64);
    progress.set_style(
        ProgressStyle::with_template("{spinner:.green} [{bar:30.cyan/blue}] {pos}/{len} {msg}")?
            .progress_chars("=>-"),
    );
    progress.set_message("scoring");

    let scored = Arc::clone(&screener)
        .screen_batch(Arc::clone(&job_profile), documents, |candidate| {
            progress.set_message(candidate.name().to_string());
            progress.inc(1);
        })
        .await?;
    progress.finish_and_clear();

    let ranked = Screener::filter(
        Screener::rank(scored),
        filters.min_score,
        filters.tier,
        filters.search.as_deref(),
    );

    let report = RankingReport::build(
        &job_profile,
        &ranked,
        RunContext {
            job_source: job.display().to_string(),
            skipped,
            processing_time_ms: start_time.elapsed().as_millis() as u64,
            match_mode: config.matching.mode,
            weights: screener.weights(),
        },
    );

    let use_colors = config.output.color_output && save.is_none();
    let generator = ReportGenerator::with_options(
        use_colors,
        config.output.detailed,
        true,
        config.output.csv_quoting,
    );
    let content = generator.generate_report(&report, &config.output.format)?;

    match save {
        Some(path) => {
            let path = if path.is_dir() {
                path.join(suggest_filename(&config.output.format, &report.metadata.job_source, true))
            } else {
                path.to_path_buf()
            };
            save_report_to_file(&content, &path)?;
            println!("💾 Saved {} candidates to {}", report.candidates.len(), path.display());
        }
        None => {
            print!("{}", content);
            if config.output.format != OutputFormat::Console && !content.ends_with('\n') {
                println!();
            }
        }
    }

    Ok(())
}
