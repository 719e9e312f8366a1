//! The choose-game / choose-language / play wizard.

use crate::error::GameError;
use crate::game::{GameDescriptor, GameKind, GAMES};
use crate::language::{find_language, LanguageInfo, LANGUAGES};
use crate::vocabulary::{translated_entries, VocabularyEntry};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectionStep {
    Menu,
    Language { game: GameKind },
    Playing { game: GameKind, language: String },
}

/// A game on the menu and whether the vocabulary is large enough for it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameAvailability {
    pub descriptor: &'static GameDescriptor,
    pub available: bool,
}

/// A practice language offered for the selected game
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LanguageOption {
    pub info: &'static LanguageInfo,
    pub word_count: usize,
    pub has_enough: bool,
}

/// Words translatable into `language`
pub fn word_count(entries: &[VocabularyEntry], language: &str) -> usize {
    entries
        .iter()
        .filter(|e| e.has_translation_in(language))
        .count()
}

/// Menu gating: a game opens once enough words carry any translation
pub fn available_games(entries: &[VocabularyEntry]) -> Vec<GameAvailability> {
    let translated = translated_entries(entries).len();
    GAMES
        .iter()
        .map(|descriptor| GameAvailability {
            descriptor,
            available: translated >= descriptor.min_words,
        })
        .collect()
}

/// Registry languages present in the vocabulary, in registry order
pub fn language_options(entries: &[VocabularyEntry], game: GameKind) -> Vec<LanguageOption> {
    LANGUAGES
        .iter()
        .filter_map(|info| {
            let count = word_count(entries, info.code);
            (count > 0).then_some(LanguageOption {
                info,
                word_count: count,
                has_enough: count >= game.min_words(),
            })
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionFlow {
    step: SelectionStep,
}

impl Default for SelectionFlow {
    fn default() -> Self {
        Self::new()
    }
}

impl SelectionFlow {
    pub fn new() -> Self {
        Self {
            step: SelectionStep::Menu,
        }
    }

    pub fn step(&self) -> &SelectionStep {
        &self.step
    }

    pub fn select_game(
        &mut self,
        entries: &[VocabularyEntry],
        game: GameKind,
    ) -> Result<(), GameError> {
        let available = translated_entries(entries).len();
        if available < game.min_words() {
            return Err(GameError::InsufficientContent {
                game,
                language: "any".to_string(),
                required: game.min_words(),
                available,
            });
        }
        self.step = SelectionStep::Language { game };
        Ok(())
    }

    /// Moves to `Playing`; only valid from the language step
    pub fn select_language(
        &mut self,
        entries: &[VocabularyEntry],
        language: &str,
    ) -> Result<(), GameError> {
        let SelectionStep::Language { game } = self.step else {
            return Err(GameError::UnknownGame("no game selected".to_string()));
        };
        if find_language(language).is_none() {
            return Err(GameError::UnknownLanguage(language.to_string()));
        }
        let available = word_count(entries, language);
        if available < game.min_words() {
            return Err(GameError::InsufficientContent {
                game,
                language: language.to_string(),
                required: game.min_words(),
                available,
            });
        }
        self.step = SelectionStep::Playing {
            game,
            language: language.to_string(),
        };
        Ok(())
    }

    pub fn back_to_menu(&mut self) {
        self.step = SelectionStep::Menu;
    }

    /// From `Playing`, returns to choosing a language for the same game
    pub fn back_to_language(&mut self) {
        self.step = match &self.step {
            SelectionStep::Playing { game, .. } | SelectionStep::Language { game } => {
                SelectionStep::Language { game: *game }
            }
            SelectionStep::Menu => SelectionStep::Menu,
        };
    }
}
