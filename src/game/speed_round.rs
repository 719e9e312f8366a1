use std::time::Duration;

use rand::Rng;

use crate::challenge::{Challenge, ChallengePool};
use crate::config::GameSettings;
use crate::timer::{Countdown, Delay};
use crate::util::percentage;

const SECOND: Duration = Duration::from_secs(1);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpeedRoundPhase {
    Idle,
    Playing,
    Finished,
}

/// Flash shown after each attempt until the clear delay runs out
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Feedback {
    Correct,
    Wrong,
}

/// Type as many words as possible before the clock runs out.
///
/// Every attempt moves on to a new challenge whether or not it was right.
#[derive(Debug, Clone)]
pub struct SpeedRoundGame {
    pool: ChallengePool,
    duration_secs: u32,
    feedback_delay: Duration,
    phase: SpeedRoundPhase,
    challenge: Challenge,
    countdown: Countdown,
    score: u32,
    streak: u32,
    best_streak: u32,
    attempts: u32,
    feedback: Option<Feedback>,
    feedback_clear: Delay,
}

impl SpeedRoundGame {
    pub fn new<R: Rng + ?Sized>(pool: ChallengePool, settings: &GameSettings, rng: &mut R) -> Self {
        let challenge = pool.draw(rng);
        Self {
            pool,
            duration_secs: settings.speed_round_secs,
            feedback_delay: settings.feedback_clear(),
            phase: SpeedRoundPhase::Idle,
            challenge,
            countdown: Countdown::new(settings.speed_round_secs, SECOND),
            score: 0,
            streak: 0,
            best_streak: 0,
            attempts: 0,
            feedback: None,
            feedback_clear: Delay::new(),
        }
    }

    pub fn start<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.feedback_clear.cancel();
        self.feedback = None;
        self.countdown = Countdown::new(self.duration_secs, SECOND);
        self.score = 0;
        self.streak = 0;
        self.best_streak = 0;
        self.attempts = 0;
        self.challenge = self.pool.draw(rng);
        self.phase = if self.countdown.is_expired() {
            SpeedRoundPhase::Finished
        } else {
            SpeedRoundPhase::Playing
        };
    }

    pub fn restart<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.start(rng);
    }

    /// Records one attempt and moves to the next challenge.
    /// `None` when not playing or the input is blank.
    pub fn submit<R: Rng + ?Sized>(&mut self, input: &str, rng: &mut R) -> Option<bool> {
        let guess = input.trim();
        if self.phase != SpeedRoundPhase::Playing || guess.is_empty() {
            return None;
        }

        self.attempts += 1;
        let correct = guess.to_lowercase() == self.challenge.answer();
        if correct {
            self.score += 1;
            self.streak += 1;
            self.best_streak = self.best_streak.max(self.streak);
            self.feedback = Some(Feedback::Correct);
        } else {
            self.streak = 0;
            self.feedback = Some(Feedback::Wrong);
        }
        // replaces any clear still pending from the previous attempt
        self.feedback_clear.schedule(self.feedback_delay);

        self.challenge = self.pool.draw(rng);
        Some(correct)
    }

    pub fn on_tick(&mut self, elapsed: Duration) {
        if self.feedback_clear.advance(elapsed) {
            self.feedback = None;
        }
        if self.phase == SpeedRoundPhase::Playing {
            self.countdown.advance(elapsed);
            if self.countdown.is_expired() {
                tracing::debug!(score = self.score, attempts = self.attempts, "speed round finished");
                self.phase = SpeedRoundPhase::Finished;
            }
        }
    }

    /// Drops pending timers, e.g. when the player leaves the game
    pub fn teardown(&mut self) {
        self.feedback_clear.cancel();
    }

    /// Correct attempts over all attempts, 0.0 without attempts
    pub fn accuracy(&self) -> f64 {
        if self.attempts == 0 {
            0.0
        } else {
            self.score as f64 / self.attempts as f64
        }
    }

    pub fn accuracy_percent(&self) -> u32 {
        percentage(self.score, self.attempts)
    }

    pub fn phase(&self) -> SpeedRoundPhase {
        self.phase
    }

    pub fn challenge(&self) -> &Challenge {
        &self.challenge
    }

    pub fn time_left(&self) -> u32 {
        self.countdown.remaining()
    }

    pub fn duration_secs(&self) -> u32 {
        self.duration_secs
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn streak(&self) -> u32 {
        self.streak
    }

    pub fn best_streak(&self) -> u32 {
        self.best_streak
    }

    pub fn attempts(&self) -> u32 {
        self.attempts
    }

    pub fn feedback(&self) -> Option<Feedback> {
        self.feedback
    }
}
