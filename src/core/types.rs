// src/core/types.rs
use serde::{Deserialize, Serialize};
use std::collections::hash_map;
use std::collections::{BTreeSet, HashMap};

/// Everything the glossary knows about one headword.
/// The headword itself is the key it is stored under.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    /// Pronunciation guide from the headword line, without the brackets.
    pub pronunciation: Option<String>,
    /// Normalized translations. A set, so ordering carries no meaning.
    pub translations: BTreeSet<String>,
}

impl Entry {
    pub fn new(pronunciation: Option<String>) -> Self {
        Self {
            pronunciation,
            translations: BTreeSet::new(),
        }
    }

    /// Translations joined for display, e.g. `"gato, minino"`.
    pub fn joined(&self, separator: &str) -> String {
        self.translations
            .iter()
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(separator)
    }

    /// Folds another definition of the same headword into this one.
    fn merge(&mut self, other: Entry) {
        if self.pronunciation.is_none() {
            self.pronunciation = other.pronunciation;
        }
        self.translations.extend(other.translations);
    }
}

/// A one-directional headword -> entry mapping.
///
/// Serialized as a plain map so both cache formats stay readable by other
/// tools.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Glossary {
    entries: HashMap<String, Entry>,
}

impl Glossary {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, headword: &str) -> Option<&Entry> {
        self.entries.get(headword)
    }

    /// Inserts an entry, merging into an existing headword instead of
    /// replacing it.
    pub fn insert(&mut self, headword: String, entry: Entry) {
        match self.entries.entry(headword) {
            hash_map::Entry::Occupied(mut slot) => slot.get_mut().merge(entry),
            hash_map::Entry::Vacant(slot) => {
                slot.insert(entry);
            }
        }
    }

    /// Adds `translation` under `headword`, creating the entry with
    /// `pronunciation` when the headword is new.
    pub fn add_translation(
        &mut self,
        headword: &str,
        translation: &str,
        pronunciation: Option<&String>,
    ) {
        self.entries
            .entry(headword.to_string())
            .or_insert_with(|| Entry::new(pronunciation.cloned()))
            .translations
            .insert(translation.to_string());
    }

    /// Natural (hash map) iteration order.
    pub fn iter(&self) -> hash_map::Iter<'_, String, Entry> {
        self.entries.iter()
    }

    /// All headwords in lexicographic order.
    pub fn sorted_headwords(&self) -> Vec<&str> {
        let mut words: Vec<&str> = self.entries.keys().map(String::as_str).collect();
        words.sort_unstable();
        words
    }
}

impl FromIterator<(String, Entry)> for Glossary {
    fn from_iter<I: IntoIterator<Item = (String, Entry)>>(iter: I) -> Self {
        let mut glossary = Glossary::new();
        glossary.extend(iter);
        glossary
    }
}

impl Extend<(String, Entry)> for Glossary {
    fn extend<I: IntoIterator<Item = (String, Entry)>>(&mut self, iter: I) {
        for (headword, entry) in iter {
            self.insert(headword, entry);
        }
    }
}

impl IntoIterator for Glossary {
    type Item = (String, Entry);
    type IntoIter = hash_map::IntoIter<String, Entry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(pron: Option<&str>, translations: &[&str]) -> Entry {
        Entry {
            pronunciation: pron.map(str::to_string),
            translations: translations.iter().map(|t| t.to_string()).collect(),
        }
    }

    #[test]
    fn duplicate_headwords_merge() {
        let glossary: Glossary = vec![
            ("cat".to_string(), entry(None, &["gato"])),
            ("cat".to_string(), entry(Some("kat"), &["minino", "gato"])),
        ]
        .into_iter()
        .collect();

        assert_eq!(glossary.len(), 1);
        assert_eq!(glossary.get("cat"), Some(&entry(Some("kat"), &["gato", "minino"])));
    }

    #[test]
    fn first_pronunciation_wins() {
        let mut glossary = Glossary::new();
        glossary.insert("dog".into(), entry(Some("dawg"), &["perro"]));
        glossary.insert("dog".into(), entry(Some("dog"), &[]));
        assert_eq!(glossary.get("dog").unwrap().pronunciation.as_deref(), Some("dawg"));
    }

    #[test]
    fn sorted_headwords_are_ordered() {
        let glossary: Glossary = ["pear", "apple", "fig"]
            .iter()
            .map(|w| (w.to_string(), Entry::default()))
            .collect();
        assert_eq!(glossary.sorted_headwords(), vec!["apple", "fig", "pear"]);
    }

    #[test]
    fn joined_uses_set_order() {
        assert_eq!(entry(None, &["b", "a"]).joined(", "), "a, b");
    }
}
