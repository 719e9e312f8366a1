use std::time::Duration;

use chrono::{DateTime, Local};
use rand::Rng;

use crate::challenge::ChallengePool;
use crate::config::GameSettings;
use crate::error::GameError;
use crate::game::{
    GameKind, HangmanGame, MemoryMatchGame, MultipleChoiceGame, MultipleChoicePhase, ScrambleGame,
    SpeedRoundGame, SpeedRoundPhase,
};
use crate::util::percentage;
use crate::vocabulary::VocabularyEntry;

/// What a session amounted to, for the results screen and the history log
#[derive(Debug, Clone, PartialEq)]
pub struct SessionSummary {
    pub game: GameKind,
    pub language: String,
    pub score: u32,
    pub attempts: u32,
    pub percent: u32,
    pub best_streak: Option<u32>,
    pub finished_at: DateTime<Local>,
}

/// The engine for whichever game is being played
#[derive(Debug, Clone)]
pub enum GameSession {
    Hangman(HangmanGame),
    MultipleChoice(MultipleChoiceGame),
    Scramble(ScrambleGame),
    SpeedRound(SpeedRoundGame),
    MemoryMatch(MemoryMatchGame),
}

impl GameSession {
    /// Builds the engine for `kind`, refusing when `language` has too few words
    pub fn start<R: Rng + ?Sized>(
        kind: GameKind,
        entries: &[VocabularyEntry],
        language: &str,
        settings: &GameSettings,
        rng: &mut R,
    ) -> Result<Self, GameError> {
        let pool = ChallengePool::for_game(entries, language, kind)?;
        tracing::info!(game = %kind, language, words = pool.len(), "starting session");

        Ok(match kind {
            GameKind::Hangman => Self::Hangman(HangmanGame::new(pool, settings, rng)),
            GameKind::MultipleChoice => {
                Self::MultipleChoice(MultipleChoiceGame::new(pool, settings, rng))
            }
            GameKind::Scramble => Self::Scramble(ScrambleGame::new(pool, rng)),
            GameKind::SpeedRound => Self::SpeedRound(SpeedRoundGame::new(pool, settings, rng)),
            GameKind::MemoryMatch => Self::MemoryMatch(MemoryMatchGame::new(pool, settings, rng)),
        })
    }

    pub fn kind(&self) -> GameKind {
        match self {
            Self::Hangman(_) => GameKind::Hangman,
            Self::MultipleChoice(_) => GameKind::MultipleChoice,
            Self::Scramble(_) => GameKind::Scramble,
            Self::SpeedRound(_) => GameKind::SpeedRound,
            Self::MemoryMatch(_) => GameKind::MemoryMatch,
        }
    }

    /// Forwards elapsed time to the games that keep timers
    pub fn on_tick(&mut self, elapsed: Duration) {
        match self {
            Self::SpeedRound(game) => game.on_tick(elapsed),
            Self::MemoryMatch(game) => game.on_tick(elapsed),
            Self::Hangman(_) | Self::MultipleChoice(_) | Self::Scramble(_) => {}
        }
    }

    pub fn restart<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        match self {
            Self::Hangman(game) => game.restart(rng),
            Self::MultipleChoice(game) => game.restart(rng),
            Self::Scramble(game) => game.restart(rng),
            Self::SpeedRound(game) => game.restart(rng),
            Self::MemoryMatch(game) => game.restart(rng),
        }
    }

    /// Cancels pending timers before the session is dropped
    pub fn teardown(&mut self) {
        match self {
            Self::SpeedRound(game) => game.teardown(),
            Self::MemoryMatch(game) => game.teardown(),
            Self::Hangman(_) | Self::MultipleChoice(_) | Self::Scramble(_) => {}
        }
    }

    /// True for games with a fixed end that has been reached
    pub fn is_finished(&self) -> bool {
        match self {
            Self::MultipleChoice(game) => game.phase() == MultipleChoicePhase::Finished,
            Self::SpeedRound(game) => game.phase() == SpeedRoundPhase::Finished,
            Self::MemoryMatch(game) => game.is_finished(),
            Self::Hangman(_) | Self::Scramble(_) => false,
        }
    }

    /// Scores so far, or `None` if nothing has been played yet
    pub fn summary(&self, language: &str) -> Option<SessionSummary> {
        let (score, attempts, percent, best_streak) = match self {
            Self::Hangman(game) => (
                game.rounds_won(),
                game.rounds_played(),
                percentage(game.rounds_won(), game.rounds_played()),
                None,
            ),
            Self::Scramble(game) => (
                game.score(),
                game.rounds(),
                percentage(game.score(), game.rounds()),
                None,
            ),
            Self::MultipleChoice(game) => {
                if game.phase() != MultipleChoicePhase::Finished {
                    return None;
                }
                (game.score(), game.total_rounds(), game.percentage(), None)
            }
            Self::SpeedRound(game) => {
                if game.phase() != SpeedRoundPhase::Finished {
                    return None;
                }
                (
                    game.score(),
                    game.attempts(),
                    game.accuracy_percent(),
                    Some(game.best_streak()),
                )
            }
            Self::MemoryMatch(game) => {
                if !game.is_finished() {
                    return None;
                }
                (game.total_pairs() as u32, game.moves(), game.efficiency(), None)
            }
        };

        if attempts == 0 && !self.is_finished() {
            return None;
        }

        Some(SessionSummary {
            game: self.kind(),
            language: language.to_string(),
            score,
            attempts,
            percent,
            best_streak,
            finished_at: Local::now(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vocabulary::Translation;
    use assert_matches::assert_matches;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn entries(n: usize) -> Vec<VocabularyEntry> {
        (0..n)
            .map(|i| {
                VocabularyEntry::new(
                    i.to_string(),
                    format!("word{i}"),
                    vec![Translation::new("es", format!("palabra{i}"))],
                )
            })
            .collect()
    }

    #[test]
    fn test_start_dispatches_on_kind() {
        let mut rng = StdRng::seed_from_u64(0);
        let words = entries(6);
        for kind in GameKind::ALL {
            let session =
                GameSession::start(kind, &words, "es", &GameSettings::default(), &mut rng).unwrap();
            assert_eq!(session.kind(), kind);
            assert!(!session.is_finished());
        }
    }

    #[test]
    fn test_start_refuses_small_vocabulary() {
        let mut rng = StdRng::seed_from_u64(1);
        let words = entries(3);
        assert_matches!(
            GameSession::start(GameKind::MemoryMatch, &words, "es", &GameSettings::default(), &mut rng),
            Err(GameError::InsufficientContent { required: 4, available: 3, .. })
        );
        assert_matches!(
            GameSession::start(GameKind::Hangman, &words, "fr", &GameSettings::default(), &mut rng),
            Err(GameError::InsufficientContent { available: 0, .. })
        );
    }

    #[test]
    fn test_summary_requires_progress() {
        let mut rng = StdRng::seed_from_u64(2);
        let words = entries(4);
        let mut session =
            GameSession::start(GameKind::Scramble, &words, "es", &GameSettings::default(), &mut rng)
                .unwrap();
        assert!(session.summary("es").is_none());

        if let GameSession::Scramble(game) = &mut session {
            let answer = game.answer().to_string();
            game.submit(&answer);
        }
        let summary = session.summary("es").unwrap();
        assert_eq!(summary.game, GameKind::Scramble);
        assert_eq!((summary.score, summary.attempts, summary.percent), (1, 1, 100));
    }

    #[test]
    fn test_speed_round_summary_after_timeout() {
        let mut rng = StdRng::seed_from_u64(3);
        let words = entries(4);
        let mut session =
            GameSession::start(GameKind::SpeedRound, &words, "es", &GameSettings::default(), &mut rng)
                .unwrap();
        if let GameSession::SpeedRound(game) = &mut session {
            game.start(&mut rng);
        }
        assert!(session.summary("es").is_none());

        session.on_tick(Duration::from_secs(60));
        assert!(session.is_finished());
        let summary = session.summary("es").unwrap();
        assert_eq!(summary.attempts, 0);
        assert_eq!(summary.percent, 0);
        assert_eq!(summary.best_streak, Some(0));
    }
}
