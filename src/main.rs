mod archive;
mod error;
mod scraper;
mod settings;
mod text;

use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::info;

use archive::table::Table;
use archive::{RawArchive, COL_REVIEW_TEXT, OUTPUT_DELIMITER};
use scraper::reddit::RedditClient;
use settings::Settings;

#[derive(Parser)]
#[command(name = "whisky_archive", about = "Whisky review archive cleaner and text normalizer")]
struct Cli {
    /// Settings file (TOML, JSON, ...)
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Clean the raw archive into a pipe-separated table
    Clean {
        input: PathBuf,
        output: PathBuf,
        /// Drop styles with fewer rows than this
        #[arg(long)]
        min_style_count: Option<usize>,
        /// Fetch each reviewer's comment from Reddit
        #[arg(long)]
        scrape: bool,
        /// JSON file with client_id, client_secret, username, password
        #[arg(long)]
        credentials: Option<PathBuf>,
    },
    /// Add a lemmatized column to a cleaned table
    Normalize {
        input: PathBuf,
        output: PathBuf,
        #[arg(long, default_value = COL_REVIEW_TEXT)]
        column: String,
        #[arg(long, default_value = "processed_review")]
        output_column: String,
    },
    /// Style counts of the raw archive
    Styles {
        input: PathBuf,
        #[arg(long)]
        min_style_count: Option<usize>,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let t0 = Instant::now();
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Clean {
            input,
            output,
            min_style_count,
            scrape,
            credentials,
        } => {
            let settings = Settings::load(cli.config.as_deref(), credentials.as_deref())?;
            let min = min_style_count.unwrap_or(settings.min_style_count);

            // Log in before touching the input so bad credentials fail fast.
            let mut client = if scrape {
                let creds = settings.credentials()?;
                Some(RedditClient::login(creds, settings.client_options())?)
            } else {
                None
            };

            let raw = RawArchive::load(&input)?;
            let read = raw.rows.len();
            let mut cleaned = archive::clean(raw, min);

            if let Some(client) = client.as_mut() {
                println!("Scraping {} threads...", cleaned.records.len());
                let (texts, stats) = scraper::scrape_reviews(client, &cleaned.records);
                cleaned = cleaned.with_review_texts(texts);
                println!(
                    "Scraped {} threads ({} with review, {} without, {} errors).",
                    stats.total, stats.found, stats.empty, stats.failed
                );
            }

            cleaned.write(&output)?;
            println!(
                "Kept {} of {} rows (min style count {}) -> {}",
                cleaned.records.len(),
                read,
                min,
                output.display()
            );
            Ok(())
        }
        Commands::Normalize {
            input,
            output,
            column,
            output_column,
        } => normalize(&input, &output, &column, &output_column),
        Commands::Styles {
            input,
            min_style_count,
        } => {
            let settings = Settings::load(cli.config.as_deref(), None)?;
            let min = min_style_count.unwrap_or(settings.min_style_count);
            let raw = RawArchive::load(&input)?;
            let styles = archive::style_table(&raw);
            if styles.is_empty() {
                println!("No styles found.");
                return Ok(());
            }

            println!("{:>3} | {:<32} | {:>6} | {:<4}", "#", "Style", "Rows", "Keep");
            println!("{}", "-".repeat(54));
            for (i, (style, count)) in styles.iter().enumerate() {
                let keep = if *count >= min { "yes" } else { "-" };
                println!(
                    "{:>3} | {:<32} | {:>6} | {:<4}",
                    i + 1,
                    truncate(style, 32),
                    count,
                    keep
                );
            }
            let kept = styles.iter().filter(|(_, n)| *n >= min).count();
            println!("\n{} styles, {} with at least {} rows", styles.len(), kept, min);
            Ok(())
        }
    };

    let elapsed = t0.elapsed();
    if elapsed.as_secs() >= 1 {
        println!("\nDone in {}", format_duration(elapsed));
    }

    result
}

fn normalize(input: &Path, output: &Path, column: &str, output_column: &str) -> Result<()> {
    let table = Table::read(input, OUTPUT_DELIMITER)?;
    let idx = table.column(column)?;
    // Empty cells count as missing.
    let cells: Vec<Option<&str>> = table
        .values(idx)
        .into_iter()
        .map(|v| Some(v).filter(|s| !s.trim().is_empty()))
        .collect();
    info!("Normalizing column {:?} of {} rows", column, cells.len());

    let processed = text::normalize_reviews(&cells);
    let non_empty = processed.iter().filter(|s| !s.is_empty()).count();
    let rows = processed.len();
    table
        .with_column(output_column, processed)
        .write(output, OUTPUT_DELIMITER)
        .with_context(|| format!("Failed to write {}", output.display()))?;

    println!(
        "Normalized {} rows ({} non-empty) -> {}",
        rows,
        non_empty,
        output.display()
    );
    Ok(())
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let truncated: String = s.chars().take(max).collect();
        format!("{}...", truncated)
    }
}

fn format_duration(d: std::time::Duration) -> String {
    let secs = d.as_secs();
    if secs < 60 {
        format!("{:.1}s", d.as_secs_f64())
    } else if secs < 3600 {
        format!("{}m {}s", secs / 60, secs % 60)
    } else {
        format!("{}h {}m {}s", secs / 3600, (secs % 3600) / 60, secs % 60)
    }
}
