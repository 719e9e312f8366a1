use rand::Rng;

use crate::challenge::{Challenge, ChallengePool};
use crate::random::scramble_letters;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrambleStatus {
    Playing,
    Correct,
    Wrong,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hint {
    pub first_letter: char,
    pub length: usize,
}

/// Unscramble the letters of the word behind the shown translation.
#[derive(Debug, Clone)]
pub struct ScrambleGame {
    pool: ChallengePool,
    challenge: Challenge,
    answer: String,
    scrambled: String,
    status: ScrambleStatus,
    hint_shown: bool,
    score: u32,
    rounds: u32,
}

impl ScrambleGame {
    pub fn new<R: Rng + ?Sized>(pool: ChallengePool, rng: &mut R) -> Self {
        let challenge = pool.draw(rng);
        let answer = challenge.answer();
        let scrambled = scramble_letters(&answer, rng);
        Self {
            pool,
            challenge,
            answer,
            scrambled,
            status: ScrambleStatus::Playing,
            hint_shown: false,
            score: 0,
            rounds: 0,
        }
    }

    /// Checks a typed answer. Blank input and submissions outside `Playing`
    /// return `None`.
    pub fn submit(&mut self, input: &str) -> Option<bool> {
        let guess = input.trim();
        if self.status != ScrambleStatus::Playing || guess.is_empty() {
            return None;
        }
        let correct = guess.to_lowercase() == self.answer;
        self.rounds += 1;
        if correct {
            self.score += 1;
            self.status = ScrambleStatus::Correct;
        } else {
            self.status = ScrambleStatus::Wrong;
        }
        Some(correct)
    }

    pub fn reveal_hint(&mut self) -> Option<Hint> {
        if self.status != ScrambleStatus::Playing {
            return None;
        }
        self.hint_shown = true;
        self.hint()
    }

    /// The hint, once it has been asked for this round
    pub fn hint(&self) -> Option<Hint> {
        if !self.hint_shown {
            return None;
        }
        self.answer.chars().next().map(|first_letter| Hint {
            first_letter,
            length: self.answer.chars().count(),
        })
    }

    pub fn next_round<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.challenge = self.pool.draw(rng);
        self.answer = self.challenge.answer();
        self.scrambled = scramble_letters(&self.answer, rng);
        self.status = ScrambleStatus::Playing;
        self.hint_shown = false;
    }

    pub fn restart<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.score = 0;
        self.rounds = 0;
        self.next_round(rng);
    }

    pub fn scrambled(&self) -> &str {
        &self.scrambled
    }

    /// The lowercased answer, shown after a wrong submission
    pub fn answer(&self) -> &str {
        &self.answer
    }

    pub fn challenge(&self) -> &Challenge {
        &self.challenge
    }

    pub fn status(&self) -> ScrambleStatus {
        self.status
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn rounds(&self) -> u32 {
        self.rounds
    }
}
