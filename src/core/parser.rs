//! Parser for the plain-text glossary.
//!
//! The format is line oriented:
//!
//! ```text
//! cat [kat]
//!     1.gato, 2.minino
//!
//! dog
//!     perro
//! ```
//!
//! A line starting in column zero opens a headword, optionally followed by a
//! bracketed pronunciation guide. Indented lines list comma-separated
//! translations for the most recent headword. Blank lines are ignored.

use crate::core::query::Query;
use crate::core::types::{Entry, Glossary};
use crate::error::{LookupError, Result};
use regex::Regex;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;
use std::sync::LazyLock;
use tracing::{debug, trace};

static HEADWORD_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(.+)\[(.+)\]").expect("headword pattern compiles"));

static ORDINAL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{1,3}\.").expect("ordinal pattern compiles"));

/// Lazily yields `(headword, entry)` pairs whose headword matches the query.
///
/// Only one entry is held in flight; it is emitted when the next headword
/// line (or end of input) is reached. Headwords that don't match are still
/// tracked so their translation lines are skipped rather than attached to the
/// previous entry.
pub struct Entries<R> {
    lines: io::Lines<R>,
    query: Query,
    current: Option<(String, Entry)>,
    failed: bool,
}

impl<R: BufRead> Entries<R> {
    pub fn new(reader: R, query: Query) -> Self {
        Self {
            lines: reader.lines(),
            query,
            current: None,
            failed: false,
        }
    }

    fn start_definition(&mut self, line: &str) -> Option<(String, Entry)> {
        let (headword, pronunciation) = split_headword(line);
        let next = if self.query.is_match(&headword) {
            trace!(%headword, "matched headword");
            Some((headword, Entry::new(pronunciation)))
        } else {
            None
        };
        std::mem::replace(&mut self.current, next)
    }
}

impl<R: BufRead> Iterator for Entries<R> {
    type Item = io::Result<(String, Entry)>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }
        loop {
            let line = match self.lines.next() {
                Some(Ok(line)) => line,
                Some(Err(e)) => {
                    self.failed = true;
                    self.current = None;
                    return Some(Err(e));
                }
                None => return self.current.take().map(Ok),
            };

            if line.trim().is_empty() {
                continue;
            }

            if line.starts_with(char::is_whitespace) {
                if let Some((_, entry)) = self.current.as_mut() {
                    entry
                        .translations
                        .extend(line.split(',').filter_map(clean_translation));
                }
                continue;
            }

            if let Some(finished) = self.start_definition(&line) {
                return Some(Ok(finished));
            }
        }
    }
}

/// Splits a headword line into the lower-cased word and its pronunciation.
fn split_headword(line: &str) -> (String, Option<String>) {
    match HEADWORD_LINE.captures(line) {
        Some(caps) => {
            let word = caps[1].trim().to_lowercase();
            let guide = caps[2].trim();
            let pronunciation = (!guide.is_empty()).then(|| guide.to_string());
            (word, pronunciation)
        }
        None => (line.trim().to_lowercase(), None),
    }
}

/// Normalizes one translation token: trims it, strips a leading ordinal such
/// as `12.` and lower-cases it. Empty tokens yield `None`.
pub fn clean_translation(token: &str) -> Option<String> {
    let stripped = ORDINAL.replace(token.trim(), "");
    let cleaned = stripped.trim();
    (!cleaned.is_empty()).then(|| cleaned.to_lowercase())
}

/// Parses glossary text held in memory.
pub fn parse_str(text: &str, query: Query) -> Entries<&[u8]> {
    Entries::new(text.as_bytes(), query)
}

/// Opens the glossary text at `path` and parses it lazily.
pub fn open(
    path: &Path,
    query: Query,
) -> Result<impl Iterator<Item = Result<(String, Entry)>>> {
    debug!(path = %path.display(), query = query.as_str(), "text mode");
    let file = File::open(path).map_err(|e| LookupError::invalid_file(path, e))?;
    let path = path.to_path_buf();
    Ok(Entries::new(BufReader::new(file), query)
        .map(move |item| item.map_err(|e| LookupError::invalid_file(&path, e))))
}

/// Parses every headword in the glossary text at `path`.
pub fn parse_glossary(path: &Path) -> Result<Glossary> {
    let glossary: Glossary = open(path, Query::match_all())?.collect::<Result<_>>()?;
    debug!(path = %path.display(), entries = glossary.len(), "parsed glossary text");
    Ok(glossary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    fn all(text: &str) -> Vec<(String, Entry)> {
        parse_str(text, Query::match_all())
            .collect::<io::Result<Vec<_>>>()
            .unwrap()
    }

    fn set(items: &[&str]) -> BTreeSet<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn headword_with_pronunciation() {
        let parsed = all("Hello [heh-LOH]\n    hola\n");
        assert_eq!(parsed.len(), 1);
        let (word, entry) = &parsed[0];
        assert_eq!(word, "hello");
        assert_eq!(entry.pronunciation.as_deref(), Some("heh-LOH"));
        assert_eq!(entry.translations, set(&["hola"]));
    }

    #[test]
    fn headword_without_pronunciation() {
        let parsed = all("dog\n    perro\n");
        assert_eq!(parsed[0].0, "dog");
        assert_eq!(parsed[0].1.pronunciation, None);
    }

    #[test]
    fn last_entry_is_flushed_at_eof() {
        let parsed = all("cat\n    gato\ndog\n    perro");
        let words: Vec<&str> = parsed.iter().map(|(w, _)| w.as_str()).collect();
        assert_eq!(words, vec!["cat", "dog"]);
    }

    #[test]
    fn blank_lines_do_not_end_an_entry() {
        let parsed = all("cat\n    gato\n\n   \n    minino\n");
        assert_eq!(parsed.len(), 1);
        assert_eq!(parsed[0].1.translations, set(&["gato", "minino"]));
    }

    #[test]
    fn ordinals_are_stripped() {
        let parsed = all("cat\n    3.gato, 12. Minino\n");
        assert_eq!(parsed[0].1.translations, set(&["gato", "minino"]));
    }

    #[test]
    fn duplicates_collapse() {
        let parsed = all("dog\n    perro, perro\n");
        assert_eq!(parsed[0].1.translations.len(), 1);
    }

    #[test]
    fn non_matching_headwords_drop_their_translations() {
        let parsed = parse_str(
            "cat\n    gato\ndog\n    perro\n",
            Query::new("^dog$").unwrap(),
        )
        .collect::<io::Result<Vec<_>>>()
        .unwrap();
        assert_eq!(parsed.len(), 1);
        assert_eq!(parsed[0].0, "dog");
        assert_eq!(parsed[0].1.translations, set(&["perro"]));
    }

    #[test]
    fn tab_indented_lines_are_translations() {
        let parsed = all("cat\n\tgato\n");
        assert_eq!(parsed[0].1.translations, set(&["gato"]));
    }

    #[test]
    fn empty_tokens_are_dropped() {
        let parsed = all("cat\n    gato, ,\n");
        assert_eq!(parsed[0].1.translations, set(&["gato"]));
    }

    #[test]
    fn clean_translation_examples() {
        assert_eq!(clean_translation("3.gato").as_deref(), Some("gato"));
        assert_eq!(clean_translation("  Perro ").as_deref(), Some("perro"));
        assert_eq!(clean_translation("1234.x").as_deref(), Some("1234.x"));
        assert_eq!(clean_translation(" 7. "), None);
    }

    #[test]
    fn invalid_utf8_is_an_error() {
        let bytes: &[u8] = b"cat\n    \xff\xfe\n";
        let mut entries = Entries::new(bytes, Query::match_all());
        assert!(matches!(entries.next(), Some(Err(_))));
        assert!(entries.next().is_none());
    }
}
