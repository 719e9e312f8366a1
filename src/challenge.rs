use rand::Rng;

use crate::error::GameError;
use crate::game::GameKind;
use crate::random::{pick, shuffle};
use crate::vocabulary::{Translation, VocabularyEntry};

/// One round's prompt: a word and the translation shown to the player
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Challenge {
    pub entry: VocabularyEntry,
    pub translation: Translation,
}

impl Challenge {
    /// The word the player has to produce, lowercased
    pub fn answer(&self) -> String {
        self.entry.word.to_lowercase()
    }
}

/// Draws a challenge from arbitrary entries.
///
/// The chosen entry must carry a translation into `language`; when it does
/// not, the caller skipped eligibility filtering and the error says so.
pub fn pick_random_challenge<R: Rng + ?Sized>(
    entries: &[VocabularyEntry],
    language: &str,
    rng: &mut R,
) -> Result<Challenge, GameError> {
    let entry = pick(entries, rng).ok_or(GameError::EmptyPool)?;
    match Candidate::new(entry, language) {
        Some(candidate) => Ok(candidate.challenge(rng)),
        None => {
            tracing::error!(
                word = %entry.word,
                language,
                "entry without a translation reached the challenge picker"
            );
            Err(GameError::MissingTranslation {
                word: entry.word.clone(),
                language: language.to_string(),
            })
        }
    }
}

/// An entry paired with its translations into one language, never empty
#[derive(Debug, Clone)]
struct Candidate {
    entry: VocabularyEntry,
    matches: Vec<Translation>,
}

impl Candidate {
    fn new(entry: &VocabularyEntry, language: &str) -> Option<Self> {
        let matches: Vec<Translation> = entry.translations_in(language).cloned().collect();
        (!matches.is_empty()).then(|| Self {
            entry: entry.clone(),
            matches,
        })
    }

    fn challenge<R: Rng + ?Sized>(&self, rng: &mut R) -> Challenge {
        Challenge {
            entry: self.entry.clone(),
            translation: self.matches[rng.gen_range(0..self.matches.len())].clone(),
        }
    }
}

/// The eligible set for one practice language.
///
/// Only entries with a translation into the language are admitted and the
/// pool is never empty, so drawing from it cannot fail.
#[derive(Debug, Clone)]
pub struct ChallengePool {
    language: String,
    candidates: Vec<Candidate>,
}

impl ChallengePool {
    pub fn new(entries: &[VocabularyEntry], language: &str) -> Result<Self, GameError> {
        let candidates: Vec<Candidate> = entries
            .iter()
            .filter_map(|entry| Candidate::new(entry, language))
            .collect();

        if candidates.is_empty() {
            return Err(GameError::EmptyPool);
        }

        Ok(Self {
            language: language.to_string(),
            candidates,
        })
    }

    /// Builds the pool and checks it meets the game's minimum size
    pub fn for_game(
        entries: &[VocabularyEntry],
        language: &str,
        game: GameKind,
    ) -> Result<Self, GameError> {
        let required = game.min_words();
        let insufficient = |available| GameError::InsufficientContent {
            game,
            language: language.to_string(),
            required,
            available,
        };

        let pool = Self::new(entries, language).map_err(|_| insufficient(0))?;
        if pool.len() < required {
            return Err(insufficient(pool.len()));
        }
        Ok(pool)
    }

    pub fn language(&self) -> &str {
        &self.language
    }

    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }

    pub fn entries(&self) -> impl Iterator<Item = &VocabularyEntry> {
        self.candidates.iter().map(|c| &c.entry)
    }

    pub fn draw<R: Rng + ?Sized>(&self, rng: &mut R) -> Challenge {
        self.candidates[rng.gen_range(0..self.candidates.len())].challenge(rng)
    }

    /// Up to `count` challenges, each from a different entry
    pub fn draw_distinct<R: Rng + ?Sized>(&self, count: usize, rng: &mut R) -> Vec<Challenge> {
        shuffle(&self.candidates, rng)
            .iter()
            .take(count)
            .map(|c| c.challenge(rng))
            .collect()
    }
}
