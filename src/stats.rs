use chrono::{DateTime, Duration, Utc};
use itertools::Itertools;

use crate::vocabulary::VocabularyEntry;

/// Headline numbers for the vocabulary dashboard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct VocabularyStats {
    pub total_words: usize,
    pub languages: usize,
    pub translations: usize,
    pub added_this_week: usize,
}

impl VocabularyStats {
    pub fn from_entries(entries: &[VocabularyEntry], now: DateTime<Utc>) -> Self {
        let week_ago = now - Duration::days(7);
        Self {
            total_words: entries.len(),
            languages: entries
                .iter()
                .flat_map(|e| e.translations.iter().map(|t| t.language.as_str()))
                .unique()
                .count(),
            translations: entries.iter().map(|e| e.translations.len()).sum(),
            added_this_week: entries
                .iter()
                .filter(|e| e.created_at > week_ago && e.created_at <= now)
                .count(),
        }
    }
}

/// Translation count per language, most used first (ties by code)
pub fn language_counts(entries: &[VocabularyEntry]) -> Vec<(String, usize)> {
    entries
        .iter()
        .flat_map(|e| e.translations.iter().map(|t| t.language.clone()))
        .counts()
        .into_iter()
        .sorted_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)))
        .collect()
}

pub fn top_languages(entries: &[VocabularyEntry], limit: usize) -> Vec<(String, usize)> {
    let mut counts = language_counts(entries);
    counts.truncate(limit);
    counts
}
