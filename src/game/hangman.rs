use std::collections::BTreeSet;

use rand::Rng;

use crate::challenge::{Challenge, ChallengePool};
use crate::config::GameSettings;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HangmanStatus {
    Playing,
    Won,
    Lost,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuessOutcome {
    Hit,
    Miss,
    /// Letter was already guessed this round
    Repeated,
    /// Round is over, or the key is not a guessable letter
    Ignored,
}

/// Guess the word letter by letter from its translation.
#[derive(Debug, Clone)]
pub struct HangmanGame {
    pool: ChallengePool,
    max_errors: usize,
    challenge: Challenge,
    answer: String,
    guessed: BTreeSet<char>,
    status: HangmanStatus,
    rounds_played: u32,
    rounds_won: u32,
}

impl HangmanGame {
    pub fn new<R: Rng + ?Sized>(pool: ChallengePool, settings: &GameSettings, rng: &mut R) -> Self {
        let challenge = pool.draw(rng);
        let answer = challenge.answer();
        Self {
            pool,
            max_errors: settings.hangman_max_errors,
            challenge,
            answer,
            guessed: BTreeSet::new(),
            status: HangmanStatus::Playing,
            rounds_played: 0,
            rounds_won: 0,
        }
    }

    pub fn guess(&mut self, letter: char) -> GuessOutcome {
        if self.status != HangmanStatus::Playing || letter.is_whitespace() || letter.is_control() {
            return GuessOutcome::Ignored;
        }
        let mut lower = letter.to_lowercase();
        let letter = match (lower.next(), lower.next()) {
            (Some(l), None) => l,
            _ => return GuessOutcome::Ignored,
        };
        if !self.guessed.insert(letter) {
            return GuessOutcome::Repeated;
        }

        let outcome = if self.answer.contains(letter) {
            GuessOutcome::Hit
        } else {
            GuessOutcome::Miss
        };

        if self.is_solved() {
            self.status = HangmanStatus::Won;
            self.rounds_won += 1;
            self.rounds_played += 1;
        } else if self.errors() >= self.max_errors {
            self.status = HangmanStatus::Lost;
            self.rounds_played += 1;
        }
        outcome
    }

    /// Draws a fresh word; the tally is kept
    pub fn next_round<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.challenge = self.pool.draw(rng);
        self.answer = self.challenge.answer();
        self.guessed.clear();
        self.status = HangmanStatus::Playing;
    }

    pub fn restart<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.rounds_played = 0;
        self.rounds_won = 0;
        self.next_round(rng);
    }

    fn is_solved(&self) -> bool {
        self.answer
            .chars()
            .all(|c| c == ' ' || self.guessed.contains(&c))
    }

    /// Distinct guessed letters absent from the answer
    pub fn errors(&self) -> usize {
        self.guessed
            .iter()
            .filter(|c| !self.answer.contains(**c))
            .count()
    }

    pub fn remaining_attempts(&self) -> usize {
        self.max_errors.saturating_sub(self.errors())
    }

    pub fn max_errors(&self) -> usize {
        self.max_errors
    }

    /// The answer with unguessed letters as `_`, fully shown once the round is over
    pub fn masked_answer(&self) -> String {
        self.answer
            .chars()
            .map(|c| {
                if c == ' ' || self.guessed.contains(&c) || self.status != HangmanStatus::Playing {
                    c
                } else {
                    '_'
                }
            })
            .collect()
    }

    /// The answer, available once the round is decided
    pub fn revealed_answer(&self) -> Option<&str> {
        (self.status != HangmanStatus::Playing).then_some(self.challenge.entry.word.as_str())
    }

    pub fn challenge(&self) -> &Challenge {
        &self.challenge
    }

    pub fn guessed(&self) -> &BTreeSet<char> {
        &self.guessed
    }

    pub fn status(&self) -> HangmanStatus {
        self.status
    }

    pub fn rounds_played(&self) -> u32 {
        self.rounds_played
    }

    pub fn rounds_won(&self) -> u32 {
        self.rounds_won
    }
}
