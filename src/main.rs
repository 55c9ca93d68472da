#![allow(clippy::uninlined_format_args)]

use anyhow::{Result, anyhow};
use clap::{Args, CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{Shell, generate};
use log::{Level, LevelFilter, Log, Metadata, Record, SetLoggerError, info, warn};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use xliffsync::app_config::{self, Config};
use xliffsync::app_controller::Controller;
use xliffsync::export::XcodebuildExporter;
use xliffsync::sync::{LogReporter, SyncReport};

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
    /// Update existing exported documents from the UI node list
    Sync(SyncArgs),

    /// Export documents with xcodebuild, then update them
    Export(ExportArgs),

    /// Generate shell completions for xliffsync
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Args, Debug)]
struct SyncArgs {
    /// Target languages, comma separated (e.g. 'en,de,pt-BR')
    #[arg(short, long, value_delimiter = ',')]
    languages: Option<Vec<String>>,

    /// Directory containing one document per language
    #[arg(short, long)]
    path: Option<PathBuf>,

    /// JSON file with the UI node list
    #[arg(short, long)]
    nodes: Option<PathBuf>,

    /// Document file extension
    #[arg(short, long)]
    extension: Option<String>,

    /// Process languages concurrently
    #[arg(long)]
    concurrent: bool,
}

#[derive(Args, Debug)]
struct ExportArgs {
    /// Xcode project to export from
    #[arg(long)]
    project: Option<PathBuf>,

    #[command(flatten)]
    sync: SyncArgs,
}

/// xliffsync - keep exported XLIFF files in line with UI localization settings
#[derive(Parser, Debug)]
#[command(name = "xliffsync")]
#[command(version)]
#[command(about = "Synchronize exported XLIFF files with UI localization settings")]
#[command(long_about = "xliffsync annotates exported translation units with context taken from the UI and removes units whose UI element is not meant to be translated.

EXAMPLES:
    xliffsync sync -n nodes.json -p out -l en,de     # Update out/en.xliff and out/de.xliff
    xliffsync export --project App.xcodeproj -n nodes.json
    xliffsync --log-level debug sync                 # Use config values with debug logging
    xliffsync completions bash > xliffsync.bash      # Generate bash completions

CONFIGURATION:
    Configuration is stored in xliffsync.json by default. You can specify a different
    config file with --config. If the config file doesn't exist, a default one
    will be created automatically.")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file path
    #[arg(short, long = "config", global = true, default_value = "xliffsync.json")]
    config_path: PathBuf,

    /// Set logging level
    #[arg(long, global = true, value_enum)]
    log_level: Option<CliLogLevel>,
}

// @struct: Custom logger implementation
struct CustomLogger {
    level: LevelFilter,
}

impl CustomLogger {
    // @initializes: Global logger
    fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
        log::set_boxed_logger(Box::new(CustomLogger { level: LevelFilter::Trace }))?;
        log::set_max_level(level);
        Ok(())
    }

    // @returns: ANSI color for log level
    fn color_for_level(level: Level) -> &'static str {
        match level {
            Level::Error => "1;31",
            Level::Warn => "1;33",
            Level::Info => "1;32",
            Level::Debug => "1;36",
            Level::Trace => "1;35",
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
            let mut stderr = std::io::stderr();
            let _ = writeln!(
                stderr,
                "\x1B[{}m{} {}\x1B[0m",
                Self::color_for_level(record.level()),
                now,
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
    CustomLogger::init(LevelFilter::Info)?;

    let cli = CommandLineOptions::parse();
    if let Some(level) = &cli.log_level {
        let level: app_config::LogLevel = level.clone().into();
        log::set_max_level(level.to_level_filter());
    }

    match cli.command {
        Commands::Completions { shell } => {
            let mut cmd = CommandLineOptions::command();
            generate(shell, &mut cmd, "xliffsync", &mut std::io::stdout());
            Ok(())
        }
        Commands::Sync(args) => {
            let config = load_config(&cli.config_path, cli.log_level.clone(), &args)?;
            run_sync(config).await
        }
        Commands::Export(args) => {
            let mut config = load_config(&cli.config_path, cli.log_level.clone(), &args.sync)?;
            if let Some(project) = args.project {
                config.project_path = Some(project);
            }
            run_export(config).await
        }
    }
}

// Load or create configuration and apply command line overrides
fn load_config(
    config_path: &Path,
    log_level: Option<CliLogLevel>,
    args: &SyncArgs,
) -> Result<Config> {
    let mut config = Config::load_or_create(config_path)?;

    if let Some(languages) = &args.languages {
        config.languages = languages.clone();
    }
    if let Some(path) = &args.path {
        config.localization_path = path.clone();
    }
    if let Some(nodes) = &args.nodes {
        config.nodes_path = Some(nodes.clone());
    }
    if let Some(extension) = &args.extension {
        config.extension = extension.clone();
    }
    if args.concurrent {
        config.concurrent_languages = true;
    }
    match log_level {
        Some(level) => config.log_level = level.into(),
        None => log::set_max_level(config.log_level.to_level_filter()),
    }

    Ok(config)
}

async fn run_sync(config: Config) -> Result<()> {
    let controller = Controller::with_config(config)?;
    let nodes = controller.load_nodes()?;
    let report = controller.sync(nodes, Arc::new(LogReporter)).await?;
    finish(report)
}

async fn run_export(config: Config) -> Result<()> {
    let project = config
        .project_path
        .clone()
        .ok_or_else(|| anyhow!("No project configured (set project_path or pass --project)"))?;
    let controller = Controller::with_config(config)?;
    let nodes = controller.load_nodes()?;
    let exporter = XcodebuildExporter::new(project);
    let report = controller
        .export_and_sync(&exporter, nodes, Arc::new(LogReporter))
        .await?;
    finish(report)
}

fn finish(report: SyncReport) -> Result<()> {
    for (language, e) in report.malformed_units() {
        warn!("[{}] {}", language, e);
    }
    if report.is_success() {
        info!("Success: {}", report.summary());
        Ok(())
    } else {
        Err(anyhow!("Synchronization incomplete: {}", report.summary()))
    }
}
