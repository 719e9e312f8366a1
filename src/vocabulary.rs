use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A word's rendering in one language
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Translation {
    pub language: String,
    pub value: String,
}

impl Translation {
    pub fn new(language: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            language: language.into(),
            value: value.into(),
        }
    }
}

/// A word the user keeps, with every translation recorded for it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VocabularyEntry {
    pub id: String,
    pub word: String,
    #[serde(default)]
    pub translations: Vec<Translation>,
    pub created_at: DateTime<Utc>,
}

impl VocabularyEntry {
    pub fn new(id: impl Into<String>, word: impl Into<String>, translations: Vec<Translation>) -> Self {
        Self {
            id: id.into(),
            word: word.into(),
            translations,
            created_at: Utc::now(),
        }
    }

    /// Translations into `language`, in stored order
    pub fn translations_in<'a>(&'a self, language: &'a str) -> impl Iterator<Item = &'a Translation> + 'a {
        self.translations
            .iter()
            .filter(move |t| t.language == language)
    }

    pub fn has_translation_in(&self, language: &str) -> bool {
        self.translations_in(language).next().is_some()
    }

    /// Case-insensitive substring match on the word and every translation value
    pub fn matches_query(&self, query: &str) -> bool {
        let query = query.trim().to_lowercase();
        if query.is_empty() {
            return true;
        }
        self.word.to_lowercase().contains(&query)
            || self
                .translations
                .iter()
                .any(|t| t.value.to_lowercase().contains(&query))
    }
}

/// Entries with at least one translation in any language
pub fn translated_entries(entries: &[VocabularyEntry]) -> Vec<VocabularyEntry> {
    entries
        .iter()
        .filter(|e| !e.translations.is_empty())
        .cloned()
        .collect()
}

pub fn search<'a>(entries: &'a [VocabularyEntry], query: &str) -> Vec<&'a VocabularyEntry> {
    entries.iter().filter(|e| e.matches_query(query)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hello() -> VocabularyEntry {
        VocabularyEntry::new(
            "1",
            "Hello",
            vec![Translation::new("es", "Hola"), Translation::new("fr", "Bonjour")],
        )
    }

    #[test]
    fn test_deserialize_store_format() {
        let json = r#"{
            "id": "1",
            "word": "Hello",
            "translations": [{ "language": "es", "value": "Hola" }],
            "createdAt": "2026-02-01T12:00:00Z"
        }"#;
        let entry: VocabularyEntry = serde_json::from_str(json).unwrap();

        assert_eq!(entry.word, "Hello");
        assert_eq!(entry.translations, vec![Translation::new("es", "Hola")]);
        assert_eq!(entry.created_at.to_rfc3339(), "2026-02-01T12:00:00+00:00");
    }

    #[test]
    fn test_missing_translations_default_to_empty() {
        let json = r#"{ "id": "9", "word": "Lonely", "createdAt": "2026-02-01T12:00:00Z" }"#;
        let entry: VocabularyEntry = serde_json::from_str(json).unwrap();
        assert!(entry.translations.is_empty());
    }

    #[test]
    fn test_translations_in_language() {
        let entry = hello();
        let es: Vec<_> = entry.translations_in("es").map(|t| t.value.as_str()).collect();
        assert_eq!(es, vec!["Hola"]);
        assert!(entry.has_translation_in("fr"));
        assert!(!entry.has_translation_in("de"));
    }

    #[test]
    fn test_matches_query() {
        let entry = hello();
        assert!(entry.matches_query("hel"));
        assert!(entry.matches_query("BONJ"));
        assert!(entry.matches_query("  "));
        assert!(!entry.matches_query("casa"));
    }

    #[test]
    fn test_translated_entries_and_search() {
        let entries = vec![
            hello(),
            VocabularyEntry::new("2", "Dog", vec![Translation::new("de", "Hund")]),
            VocabularyEntry::new("3", "Cat", vec![]),
        ];

        assert!(entries[0].has_translation_in("es"));
        assert!(!entries[1].has_translation_in("es"));
        assert_eq!(translated_entries(&entries).len(), 2);
        assert_eq!(search(&entries, "hund").len(), 1);
    }
}
