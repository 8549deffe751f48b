use anyhow::Context;
use clap::Parser;
use spanish_core::app::{self, QueryRequest, Status};
use spanish_core::config::Config;
use spanish_core::persistence::CacheFormat;
use spanish_core::Direction;
use std::io::{self, IsTerminal};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Translate a single english word into spanish,
/// or use a regex pattern to find english words and translate them.
#[derive(Parser)]
#[command(name = "spanish", version, disable_version_flag = true)]
struct Cli {
    /// Word or regex pattern to translate.
    #[arg(
        required_unless_present_any = ["create", "json"],
        conflicts_with_all = ["create", "json"]
    )]
    query: Option<String>,

    /// Create new binary cache data from the original text file.
    #[arg(short = 'c', long, conflicts_with = "json")]
    create: bool,

    /// Create new JSON data from the original text file.
    #[arg(short = 'j', long)]
    json: bool,

    /// Debug mode, logs extra information to stderr.
    #[arg(short = 'D', long)]
    debug: bool,

    /// Translate a spanish word instead.
    #[arg(short = 'r', long, conflicts_with = "text")]
    reverse: bool,

    /// Force using the original text file.
    #[arg(short = 't', long)]
    text: bool,

    /// Don't sort the results (faster).
    #[arg(short = 's', long)]
    nosort: bool,

    /// Directory holding the glossary text and caches.
    #[arg(long, value_name = "DIR")]
    data_dir: Option<PathBuf>,

    /// Print version.
    #[arg(short = 'v', long, action = clap::ArgAction::Version)]
    version: Option<bool>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if cli.debug {
        tracing_subscriber::fmt()
            .with_writer(io::stderr)
            .with_file(true)
            .with_line_number(true)
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_env("RUST_LOG")
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("debug")),
            )
            .init();
        tracing::info!("debug logging enabled");
    }

    match run(cli) {
        Ok(status) => status.into(),
        Err(e) => {
            eprintln!("\nError: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> anyhow::Result<Status> {
    let config = Config::load()
        .context("loading configuration")?
        .with_data_dir(cli.data_dir);
    let paths = config.data_paths()?;
    let layout = config.layout(io::stdout().is_terminal());
    let mut stdout = io::stdout().lock();

    if cli.create || cli.json {
        let format = if cli.json {
            CacheFormat::Json
        } else {
            CacheFormat::Binary
        };
        return app::regenerate(&paths, format, &mut stdout);
    }

    let query = cli.query.context("a query is required")?;

    let cancel = Arc::new(AtomicBool::new(false));
    let flag = Arc::clone(&cancel);
    if let Err(e) = ctrlc::set_handler(move || flag.store(true, Ordering::SeqCst)) {
        tracing::warn!("Failed to set Ctrl+C handler: {}", e);
    }

    let request = QueryRequest {
        query,
        direction: if cli.reverse {
            Direction::ToEnglish
        } else {
            Direction::ToSpanish
        },
        force_text: cli.text,
        sorted: !cli.nosort,
    };
    let report = app::run_query(&paths, &layout, &request, &cancel, &mut stdout)?;
    Ok(report.status)
}
