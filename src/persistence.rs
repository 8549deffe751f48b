// File: src/persistence.rs
use crate::core::types::Glossary;
use std::ffi::OsString;
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Error, ErrorKind, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::{debug, info};

/// On-disk encodings for a glossary cache.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheFormat {
    /// bincode. Compact and fast; the only format read during lookups.
    Binary,
    /// serde_json. Translation sets become arrays; for inspection and
    /// hand-editing.
    Json,
}

impl CacheFormat {
    pub fn extension(self) -> &'static str {
        match self {
            CacheFormat::Binary => "bin",
            CacheFormat::Json => "json",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            CacheFormat::Binary => "binary",
            CacheFormat::Json => "JSON",
        }
    }
}

/// Writes `glossary` to `path`, or to `<path>.new` when `path` already
/// exists so curated data is never clobbered. Returns the path written.
pub fn dump(glossary: &Glossary, path: &Path, format: CacheFormat) -> Result<PathBuf, Error> {
    let target = if path.exists() {
        sibling_new(path)
    } else {
        path.to_path_buf()
    };

    let parent_dir = match target.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    };
    fs::create_dir_all(parent_dir)?;

    let mut temp_file = NamedTempFile::new_in(parent_dir)?;
    {
        let mut writer = BufWriter::new(temp_file.as_file_mut());
        match format {
            CacheFormat::Binary => bincode::serialize_into(&mut writer, glossary)
                .map_err(|e| Error::new(ErrorKind::Other, e))?,
            CacheFormat::Json => serde_json::to_writer(&mut writer, glossary)?,
        }
        writer.flush()?;
    }

    temp_file.persist(&target)?;
    info!(path = %target.display(), entries = glossary.len(), format = format.label(), "wrote cache");
    Ok(target)
}

/// Reads a glossary written by [`dump`]. Corrupt data is reported as
/// `ErrorKind::InvalidData`.
pub fn load(path: &Path, format: CacheFormat) -> Result<Glossary, Error> {
    let file = File::open(path)?;
    let reader = BufReader::new(file);
    let glossary: Glossary = match format {
        CacheFormat::Binary => bincode::deserialize_from(reader)
            .map_err(|e| Error::new(ErrorKind::InvalidData, e))?,
        CacheFormat::Json => serde_json::from_reader(reader)?,
    };
    debug!(path = %path.display(), entries = glossary.len(), "read cache");
    Ok(glossary)
}

/// Inverts a glossary: every translation becomes a headword whose
/// translations are the words it came from.
///
/// A new reverse entry takes the pronunciation of the first forward word
/// (in lexicographic order) that created it.
pub fn build_reverse(forward: &Glossary) -> Glossary {
    let mut reverse = Glossary::new();
    for word in forward.sorted_headwords() {
        let Some(entry) = forward.get(word) else {
            continue;
        };
        for translation in &entry.translations {
            reverse.add_translation(translation, word, entry.pronunciation.as_ref());
        }
    }
    debug!(forward = forward.len(), reverse = reverse.len(), "built reverse glossary");
    reverse
}

fn sibling_new(path: &Path) -> PathBuf {
    let mut name = OsString::from(path.as_os_str());
    name.push(".new");
    PathBuf::from(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::Entry;
    use pretty_assertions::assert_eq;

    fn forward() -> Glossary {
        let mut g = Glossary::new();
        g.insert(
            "cat".into(),
            Entry {
                pronunciation: Some("kat".into()),
                translations: ["gato".to_string(), "minino".to_string()].into(),
            },
        );
        g.insert(
            "kitten".into(),
            Entry {
                pronunciation: None,
                translations: ["gatito".to_string(), "minino".to_string()].into(),
            },
        );
        g
    }

    #[test]
    fn reverse_contains_every_source_word() {
        let fwd = forward();
        let rev = build_reverse(&fwd);
        for (word, entry) in fwd.iter() {
            for t in &entry.translations {
                assert!(rev.get(t).unwrap().translations.contains(word));
            }
        }
        assert_eq!(rev.len(), 3);
    }

    #[test]
    fn reverse_carries_first_pronunciation() {
        let rev = build_reverse(&forward());
        assert_eq!(rev.get("minino").unwrap().pronunciation.as_deref(), Some("kat"));
        assert_eq!(rev.get("gatito").unwrap().pronunciation, None);
    }

    #[test]
    fn existing_destination_gets_new_sibling() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cache.bin");
        let first = dump(&forward(), &path, CacheFormat::Binary).unwrap();
        assert_eq!(first, path);
        let second = dump(&Glossary::new(), &path, CacheFormat::Binary).unwrap();
        assert_eq!(second, dir.path().join("cache.bin.new"));
        // original left untouched
        assert_eq!(load(&path, CacheFormat::Binary).unwrap(), forward());
    }

    #[test]
    fn corrupt_cache_is_invalid_data() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cache.json");
        fs::write(&path, b"{not json").unwrap();
        let err = load(&path, CacheFormat::Json).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidData);
    }

    #[test]
    fn json_writes_sets_as_arrays() {
        let dir = tempfile::tempdir().unwrap();
        let path = dump(&forward(), &dir.path().join("c.json"), CacheFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_reader(File::open(path).unwrap()).unwrap();
        assert!(value["cat"]["translations"].is_array());
        assert_eq!(value["cat"]["pronunciation"], "kat");
    }
}
