// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::{anyhow, Context, Result};
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{generate, Shell};
use log::{info, warn, Level, LevelFilter, Log, Metadata, Record, SetLoggerError};
use std::fs::File;
use std::io::BufReader;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::app_config::Config;
use crate::app_controller::SourceKind;
use app_controller::Controller;

mod app_config;
mod app_controller;
mod bang_detector;
mod errors;
mod file_utils;
mod keyword_matcher;
mod subtitle_processor;
mod text_sanitizer;

/// CLI Wrapper for SourceKind to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliSourceKind {
    Video,
    Vod,
}

impl From<CliSourceKind> for SourceKind {
    fn from(cli_kind: CliSourceKind) -> Self {
        match cli_kind {
            CliSourceKind::Video => SourceKind::Video,
            CliSourceKind::Vod => SourceKind::Vod,
        }
    }
}

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

#[derive(Subcommand, Debug)]
enum Commands {
    /// Scan caption tracks for keyword mentions (default command)
    Scan(ScanArgs),

    /// Re-sanitize and re-deduplicate existing bang reports
    Repair(RepairArgs),

    /// Generate shell completions for bangscan
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Parser, Debug)]
struct ScanArgs {
    /// Caption file or directory to process
    #[arg(value_name = "INPUT_PATH")]
    input_path: PathBuf,

    /// Force overwrite of existing report files
    #[arg(short, long)]
    force_overwrite: bool,

    /// Keyword stem to scan for
    #[arg(short, long)]
    keyword: Option<String>,

    /// Kind of recording the track(s) came from
    #[arg(short, long, value_enum)]
    source: Option<CliSourceKind>,

    /// Deduplication window in seconds
    #[arg(short = 'w', long)]
    dedup_window: Option<u64>,

    /// Word-overlap ratio above which two transcripts are duplicates
    #[arg(short = 't', long)]
    overlap_threshold: Option<f64>,

    /// Configuration file path
    #[arg(short, long, default_value = "conf.json")]
    config_path: String,

    /// Set logging level
    #[arg(short, long, value_enum)]
    log_level: Option<CliLogLevel>,
}

#[derive(Parser, Debug)]
struct RepairArgs {
    /// Bang report file or directory of reports to repair
    #[arg(value_name = "INPUT_PATH")]
    input_path: PathBuf,

    /// Keyword stem to scan for
    #[arg(short, long)]
    keyword: Option<String>,

    /// Deduplication window in seconds
    #[arg(short = 'w', long)]
    dedup_window: Option<u64>,

    /// Word-overlap ratio above which two transcripts are duplicates
    #[arg(short = 't', long)]
    overlap_threshold: Option<f64>,

    /// Configuration file path
    #[arg(short, long, default_value = "conf.json")]
    config_path: String,

    /// Set logging level
    #[arg(short, long, value_enum)]
    log_level: Option<CliLogLevel>,
}

/// bangscan - caption keyword mention scanner
///
/// Extracts timestamped keyword mentions from closed-caption subtitle
/// tracks, collapses the near-duplicates rolling auto-captions produce and
/// writes one JSON bang report per track.
#[derive(Parser, Debug)]
#[command(name = "bangscan")]
#[command(author = "bangscan contributors")]
#[command(version = "1.0.0")]
#[command(about = "Caption keyword mention scanner")]
#[command(long_about = "bangscan parses closed-caption subtitle tracks, counts keyword \
mentions and writes a deduplicated, timestamped event list per track.

EXAMPLES:
    bangscan captions/video1.en.vtt             # Scan using default config
    bangscan -f captions/video1.en.vtt          # Force overwrite existing report
    bangscan -k bang --source vod captions/     # Scan a VOD caption directory
    bangscan scan -w 5 -t 0.5 captions/         # Explicit dedup window and threshold
    bangscan repair reports/                    # Re-clean previously written reports
    bangscan --log-level debug captions/        # Scan with debug logging
    bangscan completions bash > bangscan.bash   # Generate bash completions

CONFIGURATION:
    Configuration is stored in conf.json by default. You can specify a
    different config file with --config. If the config file doesn't exist,
    a default one will be created automatically.")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Caption file or directory to process
    #[arg(value_name = "INPUT_PATH")]
    input_path: Option<PathBuf>,

    /// Force overwrite of existing report files
    #[arg(short, long)]
    force_overwrite: bool,

    /// Keyword stem to scan for
    #[arg(short, long)]
    keyword: Option<String>,

    /// Kind of recording the track(s) came from
    #[arg(short, long, value_enum)]
    source: Option<CliSourceKind>,

    /// Deduplication window in seconds
    #[arg(short = 'w', long)]
    dedup_window: Option<u64>,

    /// Word-overlap ratio above which two transcripts are duplicates
    #[arg(short = 't', long)]
    overlap_threshold: Option<f64>,

    /// Configuration file path
    #[arg(short, long, default_value = "conf.json")]
    config_path: String,

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

    // @returns: Emoji for log level
    fn get_emoji_for_level(level: Level) -> &'static str {
        match level {
            Level::Error => "❌ ",
            Level::Warn => "🚧 ",
            Level::Info => " ",
            Level::Debug => "🔍 ",
            Level::Trace => "📋 ",
        }
    }

    // @returns: ANSI color code for log level
    fn get_color_for_level(level: Level) -> &'static str {
        match level {
            Level::Error => "\x1B[1;31m",
            Level::Warn => "\x1B[1;33m",
            Level::Info => "\x1B[1;32m",
            Level::Debug => "\x1B[1;36m",
            Level::Trace => "\x1B[1;35m",
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
            let emoji = Self::get_emoji_for_level(record.level());
            let color = Self::get_color_for_level(record.level());

            let mut stderr = std::io::stderr();
            let _ = writeln!(
                stderr,
                "{}{} {} {}\x1B[0m",
                color,
                now,
                emoji,
                record.args()
            );
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize the logger once with info level by default
    // We'll update the level after loading the config if needed
    CustomLogger::init(LevelFilter::Info)?;

    // Parse command line arguments using clap
    let cli = CommandLineOptions::parse();

    // Handle subcommands
    match cli.command {
        Some(Commands::Completions { shell }) => {
            let mut cmd = CommandLineOptions::command();
            generate(shell, &mut cmd, "bangscan", &mut std::io::stdout());
            Ok(())
        }
        Some(Commands::Scan(args)) => run_scan(args).await,
        Some(Commands::Repair(args)) => run_repair(args).await,
        None => {
            // Default behavior - use top-level args for backwards compatibility
            let input_path = cli
                .input_path
                .ok_or_else(|| anyhow!("INPUT_PATH is required when no subcommand is specified"))?;

            let scan_args = ScanArgs {
                input_path,
                force_overwrite: cli.force_overwrite,
                keyword: cli.keyword,
                source: cli.source,
                dedup_window: cli.dedup_window,
                overlap_threshold: cli.overlap_threshold,
                config_path: cli.config_path,
                log_level: cli.log_level,
            };
            run_scan(scan_args).await
        }
    }
}

async fn run_scan(options: ScanArgs) -> Result<()> {
    let config = load_config(
        &options.config_path,
        options.keyword.as_deref(),
        options.dedup_window,
        options.overlap_threshold,
        options.log_level.as_ref(),
    )?;

    let source = options
        .source
        .map(SourceKind::from)
        .unwrap_or_default();

    // Create controller
    let controller = Controller::with_config(config)?;

    // Run the controller with the input file or directory
    if options.input_path.is_file() {
        let output_dir = options
            .input_path
            .parent()
            .unwrap_or(Path::new("."))
            .to_path_buf();
        controller
            .scan(&options.input_path, &output_dir, source, options.force_overwrite)
            .await?;
    } else if options.input_path.is_dir() {
        controller
            .scan_folder(&options.input_path, source, options.force_overwrite)
            .await?;
    } else {
        return Err(anyhow!("Input path does not exist: {:?}", options.input_path));
    }

    Ok(())
}

async fn run_repair(options: RepairArgs) -> Result<()> {
    let config = load_config(
        &options.config_path,
        options.keyword.as_deref(),
        options.dedup_window,
        options.overlap_threshold,
        options.log_level.as_ref(),
    )?;

    let controller = Controller::with_config(config)?;

    if options.input_path.is_file() {
        let outcome = controller.repair(&options.input_path).await?;
        info!(
            "Repair complete: {} event(s) before, {} after{}",
            outcome.events_before,
            outcome.events_after,
            if outcome.changed { "" } else { " (no changes)" }
        );
    } else if options.input_path.is_dir() {
        controller.repair_folder(&options.input_path).await?;
    } else {
        return Err(anyhow!("Input path does not exist: {:?}", options.input_path));
    }

    Ok(())
}

/// Load or create the configuration, apply CLI overrides, then validate.
fn load_config(
    config_path: &str,
    keyword: Option<&str>,
    dedup_window: Option<u64>,
    overlap_threshold: Option<f64>,
    log_level: Option<&CliLogLevel>,
) -> Result<Config> {
    // If log level is set via command line, apply it immediately
    if let Some(cmd_log_level) = log_level {
        log::set_max_level(level_filter_for(&cmd_log_level.clone().into()));
    }

    let config = if Path::new(config_path).exists() {
        // Load existing configuration
        let file = File::open(config_path)
            .context(format!("Failed to open config file: {}", config_path))?;

        let reader = BufReader::new(file);
        let mut config: Config = serde_json::from_reader(reader)
            .context(format!("Failed to parse config file: {}", config_path))?;

        // Override config with CLI options if provided
        if let Some(keyword) = keyword {
            config.keyword = keyword.to_string();
        }

        if let Some(window) = dedup_window {
            config.dedup_window_secs = window;
        }

        if let Some(threshold) = overlap_threshold {
            config.overlap_threshold = threshold;
        }

        if let Some(log_level) = log_level {
            config.log_level = log_level.clone().into();
        }

        config
    } else {
        // Create default configuration if not exists
        warn!(
            "Config file not found at '{}', creating default config.",
            config_path
        );

        let mut config = Config::default();

        if let Some(keyword) = keyword {
            config.keyword = keyword.to_string();
        }

        if let Some(window) = dedup_window {
            config.dedup_window_secs = window;
        }

        if let Some(threshold) = overlap_threshold {
            config.overlap_threshold = threshold;
        }

        if let Some(log_level) = log_level {
            config.log_level = log_level.clone().into();
        }

        // Save default config
        let config_json = serde_json::to_string_pretty(&config)
            .context("Failed to serialize default config to JSON")?;

        std::fs::write(config_path, config_json)
            .context(format!("Failed to write default config to file: {}", config_path))?;

        config
    };

    // Validate the configuration after loading and overriding
    config
        .validate()
        .context("Configuration validation failed")?;

    // If log level was not set via command line, update it from config now
    if log_level.is_none() {
        log::set_max_level(level_filter_for(&config.log_level));
    }

    Ok(config)
}

fn level_filter_for(level: &app_config::LogLevel) -> LevelFilter {
    match level {
        app_config::LogLevel::Error => LevelFilter::Error,
        app_config::LogLevel::Warn => LevelFilter::Warn,
        app_config::LogLevel::Info => LevelFilter::Info,
        app_config::LogLevel::Debug => LevelFilter::Debug,
        app_config::LogLevel::Trace => LevelFilter::Trace,
    }
}
