// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{generate, Shell};
use log::{warn, Level, LevelFilter, Log, Metadata, Record, SetLoggerError};
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::app_config::Config;
use app_controller::Controller;

mod app_config;
mod app_controller;
mod errors;
mod file_utils;
mod question_processor;
mod translation;
mod validation;

/// CLI Wrapper for LogLevel to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliLogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<CliLogLevel> for app_config::LogLevel {
    fn from(cli_level: CliLogLevel) -> Self {
        match cli_level {
            CliLogLevel::Error => app_config::LogLevel::Error,
            CliLogLevel::Warn => app_config::LogLevel::Warn,
            CliLogLevel::Info => app_config::LogLevel::Info,
            CliLogLevel::Debug => app_config::LogLevel::Debug,
            CliLogLevel::Trace => app_config::LogLevel::Trace,
        }
    }
}

fn level_filter(level: &app_config::LogLevel) -> LevelFilter {
    match level {
        app_config::LogLevel::Error => LevelFilter::Error,
        app_config::LogLevel::Warn => LevelFilter::Warn,
        app_config::LogLevel::Info => LevelFilter::Info,
        app_config::LogLevel::Debug => LevelFilter::Debug,
        app_config::LogLevel::Trace => LevelFilter::Trace,
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Regenerate the question bank from the upstream exam documents
    Regenerate(RunArgs),

    /// Patch untranslated translation blocks in the existing bank in place
    Patch(RunArgs),

    /// Cross-check the bank against the upstream exam documents
    Verify(RunArgs),

    /// Generate shell completions for qbank
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Parser, Debug)]
struct RunArgs {
    /// Configuration file path
    #[arg(short, long, default_value = "conf.json")]
    config_path: String,

    /// Directory of upstream exam documents
    #[arg(short, long)]
    exam_dir: Option<PathBuf>,

    /// Question bank file
    #[arg(short, long)]
    bank_file: Option<PathBuf>,

    /// Translation table file (JSON)
    #[arg(short, long)]
    table_file: Option<PathBuf>,

    /// Set logging level
    #[arg(short, long, value_enum)]
    log_level: Option<CliLogLevel>,
}

/// qbank - Question bank regeneration and translation patching
///
/// Parses dialogue-based multiple-choice exam documents, resolves
/// fill-in-the-blank slots, patches in translations from a static table and
/// verifies the regenerated bank against its sources.
#[derive(Parser, Debug)]
#[command(name = "qbank")]
#[command(version = "1.0.0")]
#[command(about = "Exam question bank maintenance tool")]
#[command(long_about = "qbank maintains a bilingual question bank built from \
dialogue-based multiple-choice exam documents.

EXAMPLES:
    qbank regenerate                     # Rebuild the bank from configured exam documents
    qbank regenerate -e ./exams          # Rebuild from a specific exam directory
    qbank patch                          # Fill in missing translations in place
    qbank verify                         # Cross-check the bank against its sources
    qbank completions bash > qbank.bash  # Generate bash completions

CONFIGURATION:
    Configuration is stored in conf.json by default. You can specify a
    different config file with --config-path. If the config file doesn't
    exist, a default one will be created automatically.")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Commands,
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

    // @returns: ANSI color for log level
    fn color_for_level(level: Level) -> &'static str {
        match level {
            Level::Error => "\x1B[1;31m",
            Level::Warn => "\x1B[1;33m",
            Level::Info => "\x1B[1;32m",
            Level::Debug => "\x1B[1;36m",
            Level::Trace => "\x1B[1;35m",
        }
    }

    // @returns: Emoji for log level
    fn emoji_for_level(level: Level) -> &'static str {
        match level {
            Level::Error => "❌ ",
            Level::Warn => "🚧 ",
            Level::Info => " ",
            Level::Debug => "🔍 ",
            Level::Trace => "📋 ",
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
            let color = Self::color_for_level(record.level());
            let emoji = Self::emoji_for_level(record.level());

            let mut stderr = std::io::stderr();
            let _ = writeln!(stderr, "{}{} {}{}\x1B[0m", color, now, emoji, record.args());
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

fn main() -> Result<()> {
    // Initialize the logger once with info level by default
    // We'll update the level after loading the config if needed
    CustomLogger::init(LevelFilter::Info)?;

    let cli = CommandLineOptions::parse();

    match cli.command {
        Commands::Completions { shell } => {
            let mut cmd = CommandLineOptions::command();
            generate(shell, &mut cmd, "qbank", &mut std::io::stdout());
            Ok(())
        }
        Commands::Regenerate(args) => {
            let controller = build_controller(&args)?;
            controller.run_regenerate()?;
            Ok(())
        }
        Commands::Patch(args) => {
            let controller = build_controller(&args)?;
            controller.run_patch()?;
            Ok(())
        }
        Commands::Verify(args) => {
            let controller = build_controller(&args)?;
            controller.run_verify()?;
            Ok(())
        }
    }
}

/// Load (or bootstrap) the configuration, apply CLI overrides and build the
/// controller
fn build_controller(args: &RunArgs) -> Result<Controller> {
    // If log level is set via command line, apply it immediately
    if let Some(cmd_log_level) = &args.log_level {
        let config_level: app_config::LogLevel = cmd_log_level.clone().into();
        log::set_max_level(level_filter(&config_level));
    }

    let config_path = &args.config_path;
    let mut config = if Path::new(config_path).exists() {
        Config::from_file(config_path)
            .with_context(|| format!("Failed to load config: {}", config_path))?
    } else {
        // Create default configuration if not exists
        warn!(
            "Config file not found at '{}', creating default config.",
            config_path
        );
        let config = Config::default();
        config.save(config_path)?;
        config
    };

    // Override config with CLI options if provided
    if let Some(exam_dir) = &args.exam_dir {
        config.exam_dir = exam_dir.clone();
        config.exam_files.clear();
    }
    if let Some(bank_file) = &args.bank_file {
        config.bank_file = bank_file.clone();
    }
    if let Some(table_file) = &args.table_file {
        config.table_file = table_file.clone();
    }
    if let Some(log_level) = &args.log_level {
        config.log_level = log_level.clone().into();
    }

    log::set_max_level(level_filter(&config.log_level));

    Controller::with_config(config)
}
