//! Regex search over a glossary, from either the text source or a cache.

use crate::config::DataPaths;
use crate::core::parser;
use crate::core::query::Query;
use crate::core::types::{Entry, Glossary};
use crate::error::{LookupError, Result};
use crate::persistence::{self, CacheFormat};
use std::fmt;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Which way a lookup translates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// English headwords, Spanish translations.
    ToSpanish,
    /// Spanish headwords, English translations.
    ToEnglish,
}

impl Direction {
    /// Language of the headwords.
    pub fn source_language(self) -> &'static str {
        match self {
            Direction::ToSpanish => "english",
            Direction::ToEnglish => "spanish",
        }
    }

    /// Language of the translations.
    pub fn target_language(self) -> &'static str {
        match self {
            Direction::ToSpanish => "spanish",
            Direction::ToEnglish => "english",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} to {}", self.source_language(), self.target_language())
    }
}

/// Where a lookup reads its glossary from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    /// The original glossary text, parsed on the fly.
    Text(PathBuf),
    /// A binary cache built with `--create`.
    Cache(PathBuf),
}

impl Source {
    pub fn path(&self) -> &Path {
        match self {
            Source::Text(path) | Source::Cache(path) => path,
        }
    }
}

/// Picks the data source for `direction` from what exists on disk.
///
/// The decision is made once, before anything is read: a cache that exists
/// but fails to load is reported as an error, not silently replaced by the
/// text source.
pub fn select_source(paths: &DataPaths, direction: Direction, force_text: bool) -> Result<Source> {
    let cache = paths.cache(direction, CacheFormat::Binary);
    match direction {
        Direction::ToEnglish => {
            if cache.exists() {
                Ok(Source::Cache(cache))
            } else {
                Err(LookupError::MissingData {
                    language: "Spanish",
                    paths: vec![cache],
                })
            }
        }
        Direction::ToSpanish => {
            let text = paths.english_text();
            if !force_text && cache.exists() {
                Ok(Source::Cache(cache))
            } else if text.exists() {
                Ok(Source::Text(text))
            } else {
                Err(LookupError::MissingData {
                    language: "English",
                    paths: vec![cache, text],
                })
            }
        }
    }
}

/// Search results, yielded lazily where the source allows it.
pub struct Hits {
    inner: Box<dyn Iterator<Item = Result<(String, Entry)>>>,
}

impl Hits {
    fn new(inner: impl Iterator<Item = Result<(String, Entry)>> + 'static) -> Self {
        Self {
            inner: Box::new(inner),
        }
    }
}

impl Iterator for Hits {
    type Item = Result<(String, Entry)>;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }
}

/// Searches `source` for headwords matching the regex `pattern`.
///
/// The pattern is compiled before any file is opened, so an invalid query is
/// reported the same way for every source. With `sorted` the hits come back
/// in lexicographic headword order; otherwise in whatever order the source
/// stores them.
pub fn search(source: &Source, pattern: &str, sorted: bool) -> Result<Hits> {
    let query = Query::new(pattern)?;
    match source {
        Source::Text(path) => {
            let entries = parser::open(path, query)?;
            if sorted {
                let mut hits = entries.collect::<Result<Vec<_>>>()?;
                hits.sort_by(|a, b| a.0.cmp(&b.0));
                Ok(Hits::new(hits.into_iter().map(Ok)))
            } else {
                Ok(Hits::new(entries))
            }
        }
        Source::Cache(path) => {
            debug!(path = %path.display(), "cache mode");
            let glossary = persistence::load(path, CacheFormat::Binary)
                .map_err(|e| LookupError::invalid_file(path, e))?;
            debug!(entries = glossary.len(), "loaded cache");
            if sorted {
                let mut all: Vec<(String, Entry)> = glossary.into_iter().collect();
                all.sort_unstable_by(|a, b| a.0.cmp(&b.0));
                Ok(Hits::new(
                    all.into_iter()
                        .filter(move |(word, _)| query.is_match(word))
                        .map(Ok),
                ))
            } else {
                Ok(Hits::new(
                    glossary
                        .into_iter()
                        .filter(move |(word, _)| query.is_match(word))
                        .map(Ok),
                ))
            }
        }
    }
}

/// Borrowing search over a glossary already in memory.
pub fn matching<'g>(
    glossary: &'g Glossary,
    query: &'g Query,
    sorted: bool,
) -> Box<dyn Iterator<Item = (&'g str, &'g Entry)> + 'g> {
    if sorted {
        Box::new(
            glossary
                .sorted_headwords()
                .into_iter()
                .filter(move |word| query.is_match(word))
                .filter_map(move |word| glossary.get(word).map(|entry| (word, entry))),
        )
    } else {
        Box::new(
            glossary
                .iter()
                .filter(move |(word, _)| query.is_match(word))
                .map(|(word, entry)| (word.as_str(), entry)),
        )
    }
}
