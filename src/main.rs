//! Entry point for the locale reconciler command-line tool.

use std::path::{
    Path,
    PathBuf,
};
use std::process::ExitCode;

use clap::{
    ArgAction,
    Args,
    Parser,
    Subcommand,
};
use locale_reconciler::config::{
    ConfigManager,
    ReconcilerSettings,
};
use locale_reconciler::{
    EqualValuePolicy,
    LocaleReconciler,
    ReconcilerError,
    RunReport,
    SyncMode,
};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{
    InitError,
    Rotation,
};
use tracing_subscriber::prelude::*;
use tracing_subscriber::{
    EnvFilter,
    fmt,
};

/// Command-line arguments.
#[derive(Debug, Parser)]
#[command(
    name = "locale-reconciler",
    version,
    about = "Reconcile translated locale files against the reference locale."
)]
struct Cli {
    /// Config file (default: `.locale-reconciler.json` in the root directory, if present).
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Directory holding one subdirectory per locale.
    #[arg(long, global = true, value_name = "DIR")]
    root: Option<PathBuf>,

    /// Also write logs to this file.
    #[arg(long, global = true, value_name = "FILE")]
    log_file: Option<PathBuf>,

    /// Increase log verbosity (-v debug, -vv trace). `RUST_LOG` takes precedence.
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Write reconciled copies of every locale for a translation-management import.
    Export(ExportArgs),
    /// Back-fill target namespace files with the reference key set, in place.
    Sync(SyncArgs),
}

#[derive(Debug, Args)]
struct ExportArgs {
    /// What to do with values still equal to the reference.
    #[arg(long, value_enum)]
    policy: Option<EqualValuePolicy>,

    /// Output directory (relative paths are resolved against the root directory).
    #[arg(long, value_name = "DIR")]
    output: Option<PathBuf>,

    /// Do not write `all_<locale>.json` aggregates.
    #[arg(long)]
    no_aggregate: bool,

    /// Remove existing aggregates before merging.
    #[arg(long, conflicts_with = "no_aggregate")]
    reset_aggregate: bool,

    /// Treat target-only keys whose value is the key itself as untranslated.
    #[arg(long)]
    prune_self_keyed_extras: bool,

    /// Target locale (repeatable). Default: configured or discovered locales.
    #[arg(long = "locale", value_name = "CODE")]
    locales: Vec<String>,
}

#[derive(Debug, Args)]
struct SyncArgs {
    /// Report out-of-date files without writing them; exits with 2 if any.
    #[arg(long)]
    check: bool,

    /// Target locale (repeatable). Default: configured or discovered locales.
    #[arg(long = "locale", value_name = "CODE")]
    locales: Vec<String>,
}

impl ExportArgs {
    fn apply(&self, settings: &mut ReconcilerSettings) {
        if let Some(policy) = self.policy {
            settings.export.policy = policy;
        }
        if let Some(output) = &self.output {
            settings.export.output_directory.clone_from(output);
        }
        if self.no_aggregate {
            settings.export.aggregate = false;
        }
        if self.reset_aggregate {
            settings.export.reset_aggregate = true;
        }
        if self.prune_self_keyed_extras {
            settings.export.prune_self_keyed_extras = true;
        }
        apply_locales(&self.locales, settings);
    }
}

fn apply_locales(locales: &[String], settings: &mut ReconcilerSettings) {
    if !locales.is_empty() {
        settings.locales = Some(locales.to_vec());
    }
}

/// How a successful run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Outcome {
    Done,
    /// `sync --check` found files to update.
    OutOfDate,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let _guard = match init_tracing(cli.verbose, cli.log_file.as_deref()) {
        Ok(guard) => guard,
        Err(error) => {
            report_error(&error);
            return ExitCode::FAILURE;
        }
    };

    match run(cli) {
        Ok(Outcome::Done) => ExitCode::SUCCESS,
        Ok(Outcome::OutOfDate) => ExitCode::from(2),
        Err(error) => {
            report_error(&error);
            ExitCode::FAILURE
        }
    }
}

/// Installs the stderr subscriber, plus a non-blocking file writer when requested.
///
/// The returned guard flushes the file writer on drop.
fn init_tracing(verbose: u8, log_file: Option<&Path>) -> Result<Option<WorkerGuard>, InitError> {
    let default_level = match verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let (file_layer, guard) = match log_file {
        Some(path) => {
            let directory =
                path.parent().filter(|p| !p.as_os_str().is_empty()).unwrap_or(Path::new("."));
            let file_name = path
                .file_name()
                .map_or_else(|| "locale-reconciler.log".to_string(), |n| n.to_string_lossy().into_owned());
            let appender = tracing_appender::rolling::Builder::new()
                .rotation(Rotation::NEVER)
                .filename_prefix(file_name)
                .build(directory)?;
            let (writer, guard) = tracing_appender::non_blocking(appender);
            (Some(fmt::layer().with_ansi(false).with_writer(writer)), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(file_layer)
        .init();

    Ok(guard)
}

fn run(cli: Cli) -> Result<Outcome, ReconcilerError> {
    let mut config_manager = ConfigManager::new();
    config_manager.load_settings(cli.root, cli.config)?;
    if let Some(path) = config_manager.config_path() {
        tracing::debug!(path = %path.display(), "Using configuration file");
    }

    let mut settings = config_manager.get_settings().clone();
    match cli.command {
        Command::Export(args) => {
            args.apply(&mut settings);
            config_manager.update_settings(settings)?;

            let reconciler = LocaleReconciler::new(config_manager.get_settings().clone())?;
            let report = reconciler.export()?;
            print_summary("export", &report);
            Ok(Outcome::Done)
        }
        Command::Sync(args) => {
            apply_locales(&args.locales, &mut settings);
            config_manager.update_settings(settings)?;

            let mode = if args.check { SyncMode::Check } else { SyncMode::Write };
            let reconciler = LocaleReconciler::new(config_manager.get_settings().clone())?;
            let report = reconciler.sync(mode)?;
            print_summary("sync", &report);

            if mode == SyncMode::Check && !report.out_of_date.is_empty() {
                Ok(Outcome::OutOfDate)
            } else {
                Ok(Outcome::Done)
            }
        }
    }
}

#[allow(clippy::print_stdout)]
fn print_summary(command: &str, report: &RunReport) {
    println!(
        "{command}: {} written, {} missing, {} out of date, {} unchanged",
        report.written.len(),
        report.missing.len(),
        report.out_of_date.len(),
        report.unchanged
    );
    for missing in &report.missing {
        println!("  missing: {}/{}", missing.locale, missing.file_name);
    }
    for path in &report.out_of_date {
        println!("  out of date: {}", path.display());
    }
}

#[allow(clippy::print_stderr)]
fn report_error(error: &dyn std::error::Error) {
    eprintln!("error: {error}");
    let mut source = error.source();
    while let Some(cause) = source {
        eprintln!("  caused by: {cause}");
        source = cause.source();
    }
}
