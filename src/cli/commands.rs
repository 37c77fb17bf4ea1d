use std::io::{self, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use crate::batch::parse_transcript_dir;
use crate::filters::{FilterExpr, Selection, apply_filters, parse_filter};
use crate::models::{MessageRecord, Period};
use crate::parsers::parse_transcript_file;
use crate::stats::{
    StopWords, activity_heatmap, daily_timeline, emoji_counts, fetch_stats, month_activity_map,
    monthly_timeline, most_busy_users, most_common_words, week_activity_map,
};
use crate::utils::resolve_stop_words_path;

const NO_MESSAGES: &str = "No messages found in transcript";

#[derive(Parser)]
#[command(name = "chat-history-explorer")]
#[command(version = "0.1.0")]
#[command(about = "Parse and analyze exported chat transcripts", long_about = None)]
pub struct Cli {
    /// Increase log verbosity (-v info, -vv debug); RUST_LOG takes precedence
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print parsed records as JSON lines
    Parse {
        file: PathBuf,
        /// Print one pretty JSON array instead
        #[arg(long)]
        pretty: bool,
    },
    /// Show message statistics
    Stats {
        file: PathBuf,
        #[command(flatten)]
        scope: Scope,
        /// Stop-word file (one word per line)
        #[arg(long)]
        stop_words: Option<PathBuf>,
    },
    /// Show message counts per month (or per day)
    Timeline {
        file: PathBuf,
        #[command(flatten)]
        scope: Scope,
        #[arg(long)]
        daily: bool,
    },
    /// Show a weekday by hour-period activity table
    Heatmap {
        file: PathBuf,
        #[command(flatten)]
        scope: Scope,
    },
    /// Parse every .txt transcript below a directory
    Batch { dir: PathBuf },
}

/// Which records a command looks at
#[derive(clap::Args, Debug, Default)]
pub struct Scope {
    /// Filter expression, e.g. "user:alice since:2024-01-01"
    #[arg(long)]
    pub filter: Option<String>,
    /// Participant to analyze ("Overall" for everyone)
    #[arg(long)]
    pub user: Option<String>,
}

impl Scope {
    fn to_filter(&self) -> Result<FilterExpr> {
        let expr = match self.filter.as_deref() {
            Some(query) => parse_filter(query)?,
            None => FilterExpr::new(),
        };
        let selection = self.user.as_deref().map(Selection::from_name).unwrap_or_default();
        Ok(selection.narrow(expr))
    }
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match &cli.command {
        Some(Commands::Parse { file, pretty }) => {
            print_records(file, *pretty)?;
        }
        Some(Commands::Stats { file, scope, stop_words }) => {
            show_stats(file, scope, stop_words.as_deref())?;
        }
        Some(Commands::Timeline { file, scope, daily }) => {
            show_timeline(file, scope, *daily)?;
        }
        Some(Commands::Heatmap { file, scope }) => {
            show_heatmap(file, scope)?;
        }
        Some(Commands::Batch { dir }) => {
            show_batch(dir)?;
        }
        None => {
            println!("Use --help for usage information");
        }
    }

    Ok(())
}

fn default_log_level(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    }
}

/// Log to stderr, warnings by default
fn init_logging(verbose: u8) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_log_level(verbose)));

    // Ignored when a subscriber is already installed
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .try_init();
}

fn load_records(file: &Path, scope: &Scope) -> Result<Vec<MessageRecord>> {
    let filter = scope.to_filter()?;
    let table = parse_transcript_file(file)?;
    Ok(apply_filters(table.into_records(), &filter))
}

fn print_records(file: &Path, pretty: bool) -> Result<()> {
    let table = parse_transcript_file(file)?;
    let mut out = io::stdout().lock();

    if pretty {
        serde_json::to_writer_pretty(&mut out, table.records())?;
        writeln!(out)?;
    } else {
        for record in &table {
            serde_json::to_writer(&mut out, record)?;
            writeln!(out)?;
        }
    }

    if table.is_empty() {
        eprintln!("{}", NO_MESSAGES);
    } else if table.placeholder_dates() {
        eprintln!("Warning: no parseable dates, calendar fields use a placeholder date");
    }
    Ok(())
}

fn show_stats(file: &Path, scope: &Scope, stop_words: Option<&Path>) -> Result<()> {
    let records = load_records(file, scope)?;
    if records.is_empty() {
        println!("{}", NO_MESSAGES);
        return Ok(());
    }

    let loaded;
    let stop_words = match resolve_stop_words_path(stop_words) {
        Some(path) => {
            loaded = StopWords::load(&path)?;
            &loaded
        }
        None => StopWords::builtin(),
    };

    let stats = fetch_stats(&records);
    println!("Chat Statistics");
    println!("================================");
    println!("Total messages: {}", stats.messages);
    println!("Total words: {}", stats.words);
    println!("Media shared: {}", stats.media_messages);
    println!("Links shared: {}", stats.links);

    let busy = most_busy_users(&records);
    println!();
    println!("Most busy users:");
    for user in &busy.top {
        let percent =
            busy.shares.iter().find(|s| s.name == user.name).map_or(0.0, |s| s.percent);
        println!("  {:<24} {:>6} ({:.2}%)", user.name, user.count, percent);
    }

    println!();
    println!("Most common words:");
    for word in most_common_words(&records, stop_words) {
        println!("  {:<24} {:>6}", word.word, word.count);
    }

    let emojis = emoji_counts(&records);
    if !emojis.is_empty() {
        println!();
        println!("Emoji:");
        for emoji in emojis.iter().take(10) {
            println!("  {}  {}", emoji.emoji, emoji.count);
        }
    }

    println!();
    println!("Busiest days:");
    for day in week_activity_map(&records) {
        println!("  {:<24} {:>6}", day.name, day.count);
    }

    println!();
    println!("Busiest months:");
    for month in month_activity_map(&records) {
        println!("  {:<24} {:>6}", month.name, month.count);
    }

    Ok(())
}

fn show_timeline(file: &Path, scope: &Scope, daily: bool) -> Result<()> {
    let records = load_records(file, scope)?;
    if records.is_empty() {
        println!("{}", NO_MESSAGES);
        return Ok(());
    }

    if daily {
        for day in daily_timeline(&records) {
            println!("{}  {}", day.only_date.format("%Y-%m-%d"), day.count);
        }
    } else {
        for month in monthly_timeline(&records) {
            println!("{:<16} {}", month.time, month.count);
        }
    }
    Ok(())
}

fn show_heatmap(file: &Path, scope: &Scope) -> Result<()> {
    let records = load_records(file, scope)?;
    let heatmap = activity_heatmap(&records);
    if heatmap.is_empty() {
        println!("{}", NO_MESSAGES);
        return Ok(());
    }

    let header: Vec<String> = heatmap.periods.iter().map(Period::label).collect();
    println!("{:<10} {}", "", header.iter().map(|h| format!("{:>6}", h)).collect::<String>());
    for (day, row) in heatmap.days.iter().zip(&heatmap.counts) {
        let cells: String = row.iter().map(|count| format!("{:>6}", count)).collect();
        println!("{:<10} {}", day, cells);
    }
    Ok(())
}

fn show_batch(dir: &Path) -> Result<()> {
    let report = parse_transcript_dir(dir)
        .with_context(|| format!("Failed to parse transcripts in {}", dir.display()))?;

    for parsed in &report.parsed {
        println!("{}\t{} records", parsed.path.display(), parsed.table.len());
    }
    for (path, error) in &report.failed {
        println!("{}\tfailed: {}", path.display(), error);
    }
    println!();
    println!(
        "Parsed {} of {} files ({} records)",
        report.parsed.len(),
        report.total_files(),
        report.total_records()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filters::FilterTerm;

    #[test]
    fn test_default_log_level() {
        assert_eq!(default_log_level(0), "warn");
        assert_eq!(default_log_level(1), "info");
        assert_eq!(default_log_level(2), "debug");
        assert_eq!(default_log_level(5), "debug");
    }

    #[test]
    fn test_cli_verbosity_flags() {
        assert_eq!(Cli::parse_from(["chat-history-explorer"]).verbose, 0);
        assert_eq!(Cli::parse_from(["chat-history-explorer", "-v", "batch", "."]).verbose, 1);
        assert_eq!(Cli::parse_from(["chat-history-explorer", "batch", ".", "-vv"]).verbose, 2);
    }

    #[test]
    fn test_scope_combines_user_and_filter() {
        let scope = Scope { filter: Some("kind:message".into()), user: Some("Bob".into()) };
        assert_eq!(scope.to_filter().unwrap().groups().len(), 2);

        let overall = Scope { filter: None, user: Some("overall".into()) };
        assert!(overall.to_filter().unwrap().is_empty());

        let bad = Scope { filter: Some("project:x".into()), user: None };
        assert!(bad.to_filter().is_err());
    }

    #[test]
    fn test_scope_user_only() {
        let scope = Scope { filter: None, user: Some("Alice".into()) };
        assert_eq!(scope.to_filter().unwrap().groups(), &[vec![FilterTerm::User("Alice".into())]]);
    }
}
