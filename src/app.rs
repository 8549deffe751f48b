//! The two things the command line can do: look a word up, or rebuild the
//! caches from the glossary text.
//!
//! Both write a human-readable report to `out` and return a [`Status`] for
//! recognized failures. Only unexpected problems (a broken stdout, say) come
//! back as `Err`.

use crate::config::DataPaths;
use crate::core::format::Layout;
use crate::core::parser;
use crate::core::search::{self, Direction, Source};
use crate::core::types::Glossary;
use crate::error::LookupError;
use crate::persistence::{self, CacheFormat};
use anyhow::Context;
use std::io::{self, Write};
use std::path::Path;
use std::process::ExitCode;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Instant;
use tracing::{debug, info};

/// Outcome of a command, mapped to the process exit code.
#[must_use]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Success,
    Failure,
}

impl From<Status> for ExitCode {
    fn from(status: Status) -> Self {
        match status {
            Status::Success => ExitCode::SUCCESS,
            Status::Failure => ExitCode::FAILURE,
        }
    }
}

/// A lookup as requested on the command line.
#[derive(Debug, Clone)]
pub struct QueryRequest {
    pub query: String,
    pub direction: Direction,
    /// Read the glossary text even if a cache exists.
    pub force_text: bool,
    pub sorted: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Report {
    pub found: usize,
    pub status: Status,
}

/// Why the match loop stopped early.
enum Abort {
    Lookup(LookupError),
    Cancelled,
    Output(io::Error),
}

impl From<LookupError> for Abort {
    fn from(err: LookupError) -> Self {
        Abort::Lookup(err)
    }
}

/// Runs one lookup and prints the report.
///
/// Once the banner is out, the summary line and elapsed time are always
/// printed, even when the search fails or `cancel` is raised part way
/// through.
pub fn run_query<W: Write>(
    paths: &DataPaths,
    layout: &Layout,
    request: &QueryRequest,
    cancel: &AtomicBool,
    out: &mut W,
) -> anyhow::Result<Report> {
    let source = match search::select_source(paths, request.direction, request.force_text) {
        Ok(source) => source,
        Err(err) => {
            writeln!(out, "\n{err}")?;
            return Ok(Report {
                found: 0,
                status: Status::Failure,
            });
        }
    };
    debug!(?source, sorted = request.sorted, "selected source");

    writeln!(out, "Searching for: {}", request.query.to_lowercase())?;
    writeln!(out, "...{}\n", request.direction)?;

    let started = Instant::now();
    let mut found = 0;
    let status = match print_hits(&source, request, layout, cancel, out, &mut found) {
        Ok(()) => Status::Success,
        Err(Abort::Lookup(err)) => {
            writeln!(out, "\n{err}")?;
            Status::Failure
        }
        Err(Abort::Cancelled) => {
            writeln!(out, "\nUser cancelled.\n")?;
            Status::Failure
        }
        Err(Abort::Output(err)) => {
            writeln!(out, "\nError during search:\n{err}")?;
            Status::Failure
        }
    };

    let label = if found == 1 { "translation" } else { "translations" };
    writeln!(out, "\nFound {found} {label} for: {}", request.query)?;
    writeln!(out, "({:.2}s)", started.elapsed().as_secs_f64())?;
    Ok(Report { found, status })
}

fn print_hits<W: Write>(
    source: &Source,
    request: &QueryRequest,
    layout: &Layout,
    cancel: &AtomicBool,
    out: &mut W,
    found: &mut usize,
) -> Result<(), Abort> {
    let cancelled = || {
        if cancel.load(Ordering::SeqCst) {
            Err(Abort::Cancelled)
        } else {
            Ok(())
        }
    };
    let hits = search::search(source, &request.query, request.sorted)?;
    for hit in hits {
        cancelled()?;
        let (word, entry) = hit?;
        *found += 1;
        writeln!(out, "{}", layout.render(&word, &entry)).map_err(Abort::Output)?;
    }
    // An interrupt during the scan may not be followed by another hit.
    cancelled()
}

/// Rebuilds both caches in `format` from the English glossary text.
///
/// English is written first; if the Spanish write then fails the English
/// cache stays in place.
pub fn regenerate<W: Write>(
    paths: &DataPaths,
    format: CacheFormat,
    out: &mut W,
) -> anyhow::Result<Status> {
    debug!("creating english data");
    let forward = match parser::parse_glossary(&paths.english_text()) {
        Ok(glossary) => glossary,
        Err(err) => {
            writeln!(out, "\nUnable to read english data:\n{err}")?;
            return Ok(Status::Failure);
        }
    };
    let english = paths.cache(Direction::ToSpanish, format);
    if !write_cache(&forward, &english, format, "english", out)? {
        return Ok(Status::Failure);
    }

    debug!("creating spanish data");
    let reverse = persistence::build_reverse(&forward);
    let spanish = paths.cache(Direction::ToEnglish, format);
    if !write_cache(&reverse, &spanish, format, "spanish", out)? {
        return Ok(Status::Failure);
    }
    Ok(Status::Success)
}

fn write_cache<W: Write>(
    glossary: &Glossary,
    path: &Path,
    format: CacheFormat,
    language: &str,
    out: &mut W,
) -> anyhow::Result<bool> {
    debug!(path = %path.display(), "writing {language} file");
    let written = persistence::dump(glossary, path, format)
        .with_context(|| format!("writing {}", path.display()));
    match written {
        Ok(written) => {
            info!(path = %written.display(), "created {language} data");
            writeln!(out, "\nCreated {language} data: {}", written.display())?;
            Ok(true)
        }
        Err(err) => {
            writeln!(out, "\nFailed to create {language} {} data: {err:#}", format.label())?;
            Ok(false)
        }
    }
}
