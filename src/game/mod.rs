pub mod hangman;
pub mod memory_match;
pub mod multiple_choice;
pub mod scramble;
pub mod speed_round;

pub use hangman::{GuessOutcome, HangmanGame, HangmanStatus};
pub use memory_match::{Card, CardSide, FlipOutcome, MemoryMatchGame, MemoryPhase};
pub use multiple_choice::{AnswerRecord, MultipleChoiceGame, MultipleChoicePhase, Question};
pub use scramble::{Hint, ScrambleGame, ScrambleStatus};
pub use speed_round::{Feedback, SpeedRoundGame, SpeedRoundPhase};

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::error::GameError;

/// The closed set of practice games
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum, Serialize, Deserialize, strum_macros::Display,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum GameKind {
    Hangman,
    MultipleChoice,
    Scramble,
    SpeedRound,
    MemoryMatch,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, strum_macros::Display)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

/// Registry entry used for menus and gating
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameDescriptor {
    pub kind: GameKind,
    pub title: &'static str,
    pub description: &'static str,
    pub min_words: usize,
    pub difficulty: Difficulty,
}

pub const GAMES: [GameDescriptor; 5] = [
    GameDescriptor {
        kind: GameKind::Hangman,
        title: "Hangman",
        description: "You are shown the translation and must guess the original word letter by letter. You have 6 attempts.",
        min_words: 1,
        difficulty: Difficulty::Medium,
    },
    GameDescriptor {
        kind: GameKind::MultipleChoice,
        title: "Multiple Choice",
        description: "You are shown a translation and must choose the correct word from four options.",
        min_words: 4,
        difficulty: Difficulty::Easy,
    },
    GameDescriptor {
        kind: GameKind::Scramble,
        title: "Word Scramble",
        description: "The letters of the word are scrambled. Rearrange them to form the correct word.",
        min_words: 1,
        difficulty: Difficulty::Medium,
    },
    GameDescriptor {
        kind: GameKind::SpeedRound,
        title: "Speed Round",
        description: "Answer as many translations as you can in 60 seconds. Type the correct word as quickly as possible.",
        min_words: 3,
        difficulty: Difficulty::Hard,
    },
    GameDescriptor {
        kind: GameKind::MemoryMatch,
        title: "Memory Match",
        description: "Flip the cards to match words with their translations. Find all the pairs.",
        min_words: 4,
        difficulty: Difficulty::Easy,
    },
];

impl GameKind {
    pub const ALL: [GameKind; 5] = [
        GameKind::Hangman,
        GameKind::MultipleChoice,
        GameKind::Scramble,
        GameKind::SpeedRound,
        GameKind::MemoryMatch,
    ];

    pub fn descriptor(self) -> &'static GameDescriptor {
        let idx = match self {
            GameKind::Hangman => 0,
            GameKind::MultipleChoice => 1,
            GameKind::Scramble => 2,
            GameKind::SpeedRound => 3,
            GameKind::MemoryMatch => 4,
        };
        &GAMES[idx]
    }

    pub fn title(self) -> &'static str {
        self.descriptor().title
    }

    pub fn min_words(self) -> usize {
        self.descriptor().min_words
    }

    /// Parses the kebab-case id used on the command line and in history rows
    pub fn from_id(id: &str) -> Result<Self, GameError> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.to_string() == id)
            .ok_or_else(|| GameError::UnknownGame(id.to_string()))
    }
}
