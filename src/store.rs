//! Persistence for the user's vocabulary.
//!
//! The store only knows how to read and write the whole collection; editing
//! helpers sit on top of the trait so every backend gets them for free.

use include_dir::{include_dir, Dir};
use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::collections::HashSet;
use std::fs;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use crate::app_dirs::AppDirs;
use crate::error::StoreError;
use crate::language::find_language;
use crate::vocabulary::{Translation, VocabularyEntry};

static SEED_DIR: Dir = include_dir!("$CARGO_MANIFEST_DIR/src/seed");

const SEED_FILE: &str = "words.json";

pub trait VocabularyStore {
    fn read_all(&self) -> Result<Vec<VocabularyEntry>, StoreError>;
    fn write_all(&self, entries: &[VocabularyEntry]) -> Result<(), StoreError>;
}

/// The built-in vocabulary a fresh install starts with
pub fn seed_vocabulary() -> Vec<VocabularyEntry> {
    SEED_DIR
        .get_file(SEED_FILE)
        .and_then(|file| file.contents_utf8())
        .and_then(|json| match serde_json::from_str(json) {
            Ok(entries) => Some(entries),
            Err(e) => {
                tracing::error!(error = %e, "embedded seed vocabulary is malformed");
                None
            }
        })
        .unwrap_or_default()
}

/// JSON file store; the first read of a missing file writes the seed vocabulary
#[derive(Debug, Clone)]
pub struct FileVocabularyStore {
    path: PathBuf,
}

impl Default for FileVocabularyStore {
    fn default() -> Self {
        Self::new()
    }
}

impl FileVocabularyStore {
    pub fn new() -> Self {
        Self {
            path: AppDirs::vocabulary_path(),
        }
    }

    pub fn with_path<P: AsRef<Path>>(p: P) -> Self {
        Self {
            path: p.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl VocabularyStore for FileVocabularyStore {
    fn read_all(&self) -> Result<Vec<VocabularyEntry>, StoreError> {
        if !self.path.exists() {
            let seed = seed_vocabulary();
            tracing::info!(path = %self.path.display(), words = seed.len(), "seeding vocabulary");
            self.write_all(&seed)?;
            return Ok(seed);
        }
        let data = fs::read_to_string(&self.path)?;
        Ok(serde_json::from_str(&data)?)
    }

    fn write_all(&self, entries: &[VocabularyEntry]) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let data = serde_json::to_string_pretty(entries)?;
        fs::write(&self.path, data)?;
        Ok(())
    }
}

/// In-process store, seeded like the file store unless built from entries
#[derive(Debug, Default)]
pub struct MemoryVocabularyStore {
    entries: RefCell<Option<Vec<VocabularyEntry>>>,
}

impl MemoryVocabularyStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entries(entries: Vec<VocabularyEntry>) -> Self {
        Self {
            entries: RefCell::new(Some(entries)),
        }
    }
}

impl VocabularyStore for MemoryVocabularyStore {
    fn read_all(&self) -> Result<Vec<VocabularyEntry>, StoreError> {
        let mut slot = self.entries.borrow_mut();
        Ok(slot.get_or_insert_with(seed_vocabulary).clone())
    }

    fn write_all(&self, entries: &[VocabularyEntry]) -> Result<(), StoreError> {
        *self.entries.borrow_mut() = Some(entries.to_vec());
        Ok(())
    }
}

/// Parses `es=Hola` into a translation, checking the language code
pub fn parse_translation(raw: &str) -> Result<Translation, StoreError> {
    let (code, value) = raw
        .split_once('=')
        .ok_or_else(|| StoreError::MalformedTranslation(raw.to_string()))?;
    let code = code.trim().to_lowercase();
    let value = value.trim();
    if code.is_empty() || value.is_empty() {
        return Err(StoreError::MalformedTranslation(raw.to_string()));
    }
    if find_language(&code).is_none() {
        return Err(StoreError::UnknownLanguage(code));
    }
    Ok(Translation::new(code, value))
}

/// One past the largest numeric id, so ids stay unique after removals.
///
/// When the largest id is `u64::MAX` the lowest free numeric id is used.
pub fn next_id(entries: &[VocabularyEntry]) -> String {
    let taken: HashSet<u64> = entries
        .iter()
        .filter_map(|e| e.id.parse::<u64>().ok())
        .collect();
    let next = match taken.iter().max() {
        None => 1,
        Some(max) => max
            .checked_add(1)
            .or_else(|| (1..).find(|n| !taken.contains(n)))
            .unwrap_or_default(),
    };
    next.to_string()
}

pub fn add_entry<S: VocabularyStore + ?Sized>(
    store: &S,
    word: &str,
    translations: Vec<Translation>,
) -> Result<VocabularyEntry, StoreError> {
    let word = word.trim();
    if word.is_empty() {
        return Err(StoreError::EmptyWord);
    }
    if let Some(bad) = translations
        .iter()
        .find(|t| find_language(&t.language).is_none())
    {
        return Err(StoreError::UnknownLanguage(bad.language.clone()));
    }

    let mut entries = store.read_all()?;
    let entry = VocabularyEntry::new(next_id(&entries), word, translations);
    if entries.iter().any(|e| e.id == entry.id) {
        return Err(StoreError::DuplicateId(entry.id));
    }
    entries.push(entry.clone());
    store.write_all(&entries)?;
    tracing::info!(id = %entry.id, word = %entry.word, "added word");
    Ok(entry)
}

pub fn remove_entry<S: VocabularyStore + ?Sized>(
    store: &S,
    id: &str,
) -> Result<VocabularyEntry, StoreError> {
    let mut entries = store.read_all()?;
    let position = entries
        .iter()
        .position(|e| e.id == id)
        .ok_or_else(|| StoreError::NotFound(id.to_string()))?;
    let removed = entries.remove(position);
    store.write_all(&entries)?;
    tracing::info!(id, word = %removed.word, "removed word");
    Ok(removed)
}

/// One row per translation; words without translations get a bare row
#[derive(Debug, Serialize, Deserialize)]
struct CsvRow {
    word: String,
    #[serde(default)]
    language: String,
    #[serde(default)]
    translation: String,
}

pub fn export_csv<W: Write>(entries: &[VocabularyEntry], writer: W) -> Result<usize, StoreError> {
    let mut wtr = csv::Writer::from_writer(writer);
    let mut rows = 0;
    for entry in entries {
        if entry.translations.is_empty() {
            wtr.serialize(CsvRow {
                word: entry.word.clone(),
                language: String::new(),
                translation: String::new(),
            })?;
            rows += 1;
        }
        for t in &entry.translations {
            wtr.serialize(CsvRow {
                word: entry.word.clone(),
                language: t.language.clone(),
                translation: t.value.clone(),
            })?;
            rows += 1;
        }
    }
    wtr.flush()?;
    Ok(rows)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ImportReport {
    pub added_words: usize,
    pub added_translations: usize,
    pub skipped: usize,
}

/// Merges CSV rows into the store; words match case-insensitively
pub fn import_csv<S: VocabularyStore + ?Sized, R: Read>(
    store: &S,
    reader: R,
) -> Result<ImportReport, StoreError> {
    let mut entries = store.read_all()?;
    let mut report = ImportReport::default();
    let mut rdr = csv::Reader::from_reader(reader);

    for row in rdr.deserialize() {
        let row: CsvRow = row?;
        let word = row.word.trim();
        if word.is_empty() {
            report.skipped += 1;
            continue;
        }

        let translation = if row.language.trim().is_empty() && row.translation.trim().is_empty() {
            None
        } else {
            match parse_translation(&format!("{}={}", row.language, row.translation)) {
                Ok(t) => Some(t),
                Err(e) => {
                    tracing::warn!(word, error = %e, "skipping csv row");
                    report.skipped += 1;
                    continue;
                }
            }
        };

        let existing = entries
            .iter()
            .position(|e| e.word.to_lowercase() == word.to_lowercase());
        let index = match existing {
            Some(index) => index,
            None => {
                let id = next_id(&entries);
                entries.push(VocabularyEntry::new(id, word, Vec::new()));
                report.added_words += 1;
                entries.len() - 1
            }
        };

        if let Some(t) = translation {
            let entry = &mut entries[index];
            if entry.translations.contains(&t) {
                report.skipped += 1;
            } else {
                entry.translations.push(t);
                report.added_translations += 1;
            }
        }
    }

    store.write_all(&entries)?;
    tracing::info!(?report, "imported csv");
    Ok(report)
}
