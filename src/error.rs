//! Error types shared by the game engines and the vocabulary store.

use thiserror::Error;

use crate::game::GameKind;

/// Reasons a practice session cannot be set up or a challenge cannot be drawn.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GameError {
    /// Fewer eligible words than the game needs.
    #[error("{game} needs at least {required} words translated into '{language}', found {available}")]
    InsufficientContent {
        game: GameKind,
        language: String,
        required: usize,
        available: usize,
    },

    /// Nothing to draw a challenge from.
    #[error("no vocabulary to pick from")]
    EmptyPool,

    /// An entry reached the picker without a translation in the target language.
    #[error("'{word}' has no translation into '{language}'")]
    MissingTranslation { word: String, language: String },

    #[error("unknown game: {0}")]
    UnknownGame(String),

    #[error("unknown language: {0}")]
    UnknownLanguage(String),
}

/// Failures reading, writing or editing the vocabulary.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed vocabulary file: {0}")]
    Json(#[from] serde_json::Error),

    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    #[error("a word with id '{0}' already exists")]
    DuplicateId(String),

    #[error("no word with id '{0}'")]
    NotFound(String),

    #[error("word must not be empty")]
    EmptyWord,

    #[error("unknown language: {0}")]
    UnknownLanguage(String),

    #[error("malformed translation '{0}', expected <code>=<value>")]
    MalformedTranslation(String),
}
