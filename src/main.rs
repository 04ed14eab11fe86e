// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{generate, Shell};
use log::{info, Level, LevelFilter, Log, Metadata, Record, SetLoggerError};
use std::io::Write;
use std::path::PathBuf;

use vocabtrain::app_config::{Config, LogLevel};
use vocabtrain::{AppError, PracticeResult, SettingsStore, WordRecord, WordStore};

/// CLI Wrapper for LogLevel to implement ValueEnum
#[derive(Debug, Clone, Copy, ValueEnum)]
enum CliLogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<CliLogLevel> for LogLevel {
    fn from(cli_level: CliLogLevel) -> Self {
        match cli_level {
            CliLogLevel::Error => LogLevel::Error,
            CliLogLevel::Warn => LogLevel::Warn,
            CliLogLevel::Info => LogLevel::Info,
            CliLogLevel::Debug => LogLevel::Debug,
            CliLogLevel::Trace => LogLevel::Trace,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Store a new word pair
    Add {
        /// Word in the source language
        source: String,
        /// Word in the target language
        target: String,
        /// Optional description
        #[arg(short, long)]
        meaning: Option<String>,
    },

    /// Find a word pair by either of its texts
    Lookup {
        text: String,
    },

    /// Delete every word pair matching a text on either side
    Delete {
        text: String,
    },

    /// List all stored word pairs
    List,

    /// Draw a practice batch
    Sample {
        /// Batch size (defaults to the training_length setting)
        count: Option<usize>,
    },

    /// Record practice outcomes as one batch
    Answer {
        /// Ids answered correctly
        #[arg(long, num_args = 1..)]
        correct: Vec<i64>,
        /// Ids answered wrongly
        #[arg(long, num_args = 1..)]
        wrong: Vec<i64>,
    },

    /// Clear the practice counters of a word
    Reset {
        id: i64,
    },

    /// Show progress ordered by success rate
    Stats,

    /// Read or change training settings
    #[command(subcommand)]
    Settings(SettingsCommand),

    /// Write all word pairs to a JSON file
    Export {
        /// Output file path
        output: PathBuf,
    },

    /// Generate shell completions for vocabtrain
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Subcommand, Debug)]
enum SettingsCommand {
    /// Print one setting
    Get { name: String },
    /// Insert or replace a setting
    Set { name: String, value: String },
    /// Print every setting
    List,
}

/// vocabtrain - adaptive vocabulary trainer
///
/// Stores bilingual word pairs and draws practice batches that favor
/// the words you get wrong.
#[derive(Parser, Debug)]
#[command(name = "vocabtrain")]
#[command(version)]
#[command(about = "Adaptive vocabulary trainer")]
#[command(long_about = "vocabtrain stores word pairs and draws practice batches weighted toward difficult words.

EXAMPLES:
    vocabtrain add word слово -m \"unit of language\"
    vocabtrain sample 5
    vocabtrain answer --correct 1 3 --wrong 2
    vocabtrain stats
    vocabtrain settings set training_length 20
    vocabtrain completions bash > vocabtrain.bash

CONFIGURATION:
    Configuration is stored in conf.json by default. If the config file doesn't
    exist, a default one will be created automatically.")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file path
    #[arg(short, long, default_value = "conf.json")]
    config_path: PathBuf,

    /// Database file path (overrides config)
    #[arg(long, env = "VOCABTRAIN_DB")]
    db: Option<PathBuf>,

    /// Keep all data in memory for this run only
    #[arg(long, conflicts_with = "db")]
    in_memory: bool,

    /// Set logging level
    #[arg(short, long, value_enum)]
    log_level: Option<CliLogLevel>,
}

// @struct: Custom logger implementation
struct CustomLogger {
    level: LevelFilter,
}

impl CustomLogger {
    // @creates: New logger with specified level
    fn new(level: LevelFilter) -> Self {
        CustomLogger { level }
    }

    // @initializes: Global logger
    fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
        let logger = Box::new(CustomLogger::new(level));
        log::set_boxed_logger(logger)?;
        log::set_max_level(level);
        Ok(())
    }

    // @returns: ANSI color and tag for log level
    fn style_for_level(level: Level) -> (&'static str, &'static str) {
        match level {
            Level::Error => ("\x1B[1;31m", "ERROR"),
            Level::Warn => ("\x1B[1;33m", "WARN "),
            Level::Info => ("\x1B[1;32m", "INFO "),
            Level::Debug => ("\x1B[1;36m", "DEBUG"),
            Level::Trace => ("\x1B[1;35m", "TRACE"),
        }
    }
}

impl Log for CustomLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let now = chrono::Local::now().format("%H:%M:%S.%3f");
            let (color, tag) = Self::style_for_level(record.level());

            let mut stderr = std::io::stderr();
            let _ = writeln!(stderr, "{}{} {} {}\x1B[0m", color, now, tag, record.args());
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Accept everything here; the effective level is narrowed with set_max_level
    CustomLogger::init(LevelFilter::Trace)?;
    log::set_max_level(LevelFilter::Info);

    let cli = CommandLineOptions::parse();

    if let Commands::Completions { shell } = cli.command {
        let mut cmd = CommandLineOptions::command();
        generate(shell, &mut cmd, "vocabtrain", &mut std::io::stdout());
        return Ok(());
    }

    run(cli).await?;
    Ok(())
}

async fn run(cli: CommandLineOptions) -> Result<(), AppError> {
    if let Some(level) = cli.log_level {
        log::set_max_level(LogLevel::from(level).to_level_filter());
    }

    let mut config = Config::load_or_create(&cli.config_path)?;

    if let Some(db_path) = cli.db {
        config.database.path = Some(db_path);
        config.database.in_memory = false;
    }
    if cli.in_memory {
        config.database.in_memory = true;
    }
    if let Some(level) = cli.log_level {
        config.log_level = level.into();
    }

    config
        .validate()
        .map_err(|e| AppError::Config(e.to_string()))?;

    if cli.log_level.is_none() {
        log::set_max_level(config.log_level.to_level_filter());
    }

    let db = config.database.open()?;
    let words = WordStore::new(db.clone());
    let settings = SettingsStore::new(db)?;

    match cli.command {
        Commands::Add {
            source,
            target,
            meaning,
        } => {
            let id = words
                .store_async(&source, &target, meaning.as_deref())
                .await?;
            println!("Stored word {}", id);
        }
        Commands::Lookup { text } => match words.lookup_async(&text).await? {
            Some(record) => println!("{}", format_record(&record)),
            None => println!("No word matches '{}'", text),
        },
        Commands::Delete { text } => {
            let deleted = words.delete_async(&text).await?;
            println!("Deleted {} word(s)", deleted);
        }
        Commands::List => {
            for record in words.all_async().await? {
                println!("{}", format_record(&record));
            }
        }
        Commands::Sample { count } => {
            let count = match count {
                Some(count) => count,
                None => settings.training_parameters()?.training_length,
            };
            for record in words.sample_async(count).await? {
                println!("{}", format_record(&record));
            }
        }
        Commands::Answer { correct, wrong } => {
            let results: Vec<PracticeResult> = correct
                .into_iter()
                .map(|id| PracticeResult::new(id, true))
                .chain(wrong.into_iter().map(|id| PracticeResult::new(id, false)))
                .collect();
            let total = results.len();
            let applied = words.record_results_async(results).await?;
            println!("Recorded {} of {} result(s)", applied, total);
        }
        Commands::Reset { id } => {
            if words.reset_async(id).await? {
                println!("Reset word {}", id);
            } else {
                println!("No word with id {}", id);
            }
        }
        Commands::Stats => {
            for line in words.statistics_async().await? {
                println!(
                    "{:>5}  {} - {}  {}/{} ({:.0}%)",
                    line.id,
                    line.source_text,
                    line.target_text,
                    line.successes,
                    line.attempts,
                    line.success_rate() * 100.0
                );
            }
        }
        Commands::Settings(SettingsCommand::Get { name }) => match settings.get(&name)? {
            Some(value) => println!("{}", value),
            None => println!("Setting '{}' is not set", name),
        },
        Commands::Settings(SettingsCommand::Set { name, value }) => {
            settings.set(&name, &value)?;
            println!("{} = {}", name, value);
        }
        Commands::Settings(SettingsCommand::List) => {
            for entry in settings.all()? {
                println!("{} = {}", entry.name, entry.value);
            }
        }
        Commands::Export { output } => {
            let records = words.all_async().await?;
            let json = serde_json::to_string_pretty(&records)
                .map_err(|e| AppError::File(e.to_string()))?;
            std::fs::write(&output, json)?;
            info!("Exported {} word(s) to {:?}", records.len(), output);
        }
        Commands::Completions { .. } => {}
    }

    Ok(())
}

// @returns: One-line description of a stored word
fn format_record(record: &WordRecord) -> String {
    let meaning = record
        .meaning
        .as_deref()
        .map(|m| format!(" ({})", m))
        .unwrap_or_default();

    format!(
        "{:>5}  {} - {}{}  [{}/{}, weight {:.3}]",
        record.id,
        record.source_text,
        record.target_text,
        meaning,
        record.successes,
        record.attempts,
        record.weight
    )
}
