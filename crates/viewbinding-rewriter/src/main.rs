use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::Parser;
use similar::TextDiff;
use tracing::{error, info, warn};
use tracing_subscriber::{EnvFilter, Layer, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use viewbinding_rewriter::{Pipeline, RunReport, Settings, Workspace, WriteMode};

#[derive(Parser, Debug)]
#[command(name = "viewbinding-rewriter", version, about)]
struct Args {
    /// Root of the Gradle project to migrate.
    root: PathBuf,

    /// Configuration file; defaults to the nearest viewbinding.toml at or above ROOT.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Variant to run (repeatable); overrides `variants` from the configuration.
    #[arg(long = "variant")]
    variants: Vec<String>,

    /// Rewrite in memory and print unified diffs instead of writing files.
    #[arg(long)]
    dry_run: bool,

    /// Write the run report as JSON to this path.
    #[arg(long)]
    report_json: Option<PathBuf>,

    #[arg(long, short)]
    verbose: bool,

    #[arg(long)]
    log_file: Option<String>,
}

fn default_log_path() -> PathBuf {
    let dir = dirs_or_tmp();
    dir.join("viewbinding-rewriter.log")
}

fn dirs_or_tmp() -> PathBuf {
    if let Some(home) = std::env::var_os("HOME") {
        let dir = PathBuf::from(home).join(".viewbinding-rewriter");
        if std::fs::create_dir_all(&dir).is_ok() {
            return dir;
        }
    }
    std::env::temp_dir()
}

fn init_logging(
    args: &Args,
    settings: &Settings,
) -> PathBuf {
    let level = if args.verbose {
        "debug"
    } else {
        settings.logging.level.as_filter()
    };
    let stderr_filter = EnvFilter::new(format!("viewbinding_rewriter={level}"));
    let file_filter = EnvFilter::new(format!("viewbinding_rewriter={level}"));

    let log_path = args.log_file.as_ref().map(PathBuf::from).unwrap_or_else(default_log_path);

    let file_appender = tracing_appender::rolling::never(
        log_path.parent().unwrap_or(Path::new(".")),
        log_path.file_name().unwrap_or(std::ffi::OsStr::new("viewbinding-rewriter.log")),
    );

    let file_layer = fmt::layer().with_writer(file_appender).with_ansi(false).with_target(false).with_filter(file_filter);

    let stderr_layer =
        fmt::layer().with_writer(std::io::stderr).with_ansi(false).with_target(false).with_filter(stderr_filter);

    tracing_subscriber::registry().with(file_layer).with(stderr_layer).init();
    log_path
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();

    let mut settings = match Settings::discover(&args.root, args.config.as_deref()) {
        Ok(settings) => settings,
        Err(error) => {
            eprintln!("viewbinding-rewriter: {error}");
            return ExitCode::from(2);
        },
    };
    if !args.variants.is_empty() {
        settings.variants = args.variants.clone();
    }

    let log_path = init_logging(&args, &settings);
    info!("Starting viewbinding-rewriter v{}", env!("CARGO_PKG_VERSION"));
    info!("Log file: {}", log_path.display());

    let mode = if args.dry_run {
        WriteMode::DryRun
    } else {
        WriteMode::Write
    };
    let workspace = match Workspace::open(&args.root, settings.clone(), mode).await {
        Ok(workspace) => workspace,
        Err(error) => {
            error!("{error}");
            return ExitCode::from(2);
        },
    };
    let pipeline = match Pipeline::new(&workspace, &settings) {
        Ok(pipeline) => pipeline,
        Err(error) => {
            error!("{error}");
            return ExitCode::from(2);
        },
    };

    let report = tokio::select! {
        result = pipeline.run() => match result {
            Ok(report) => report,
            Err(error) => {
                error!("run aborted: {error}");
                return ExitCode::FAILURE;
            },
        },
        _ = tokio::signal::ctrl_c() => {
            warn!("interrupted between transactions; unfinished files were not written");
            return ExitCode::from(130);
        },
    };

    if args.dry_run {
        print_diffs(&workspace);
    }
    if let Some(path) = &args.report_json
        && let Err(error) = write_report(path, &report)
    {
        error!("could not write report to {}: {error}", path.display());
    }
    eprint!("{}", report.summary());

    if report.is_clean() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

fn print_diffs(workspace: &Workspace) {
    for change in workspace.changes() {
        let name = change.path.display().to_string();
        let diff = TextDiff::from_lines(&change.original, &change.current);
        print!("{}", diff.unified_diff().context_radius(3).header(&name, &name));
    }
}

fn write_report(
    path: &Path,
    report: &RunReport,
) -> std::io::Result<()> {
    let json = report.to_json().map_err(std::io::Error::other)?;
    std::fs::write(path, json)
}
