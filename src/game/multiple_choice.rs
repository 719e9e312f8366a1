use rand::Rng;

use crate::challenge::{Challenge, ChallengePool};
use crate::config::GameSettings;
use crate::random::shuffle;
use crate::util::percentage;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MultipleChoicePhase {
    Answering,
    Answered,
    Finished,
}

/// One round: the prompt and its options in display order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    pub challenge: Challenge,
    pub options: Vec<String>,
}

impl Question {
    fn generate<R: Rng + ?Sized>(pool: &ChallengePool, option_count: usize, rng: &mut R) -> Self {
        let challenge = pool.draw(rng);
        let correct = challenge.entry.word.clone();

        let mut options = vec![correct.clone()];
        let others: Vec<_> = pool
            .entries()
            .filter(|e| e.id != challenge.entry.id)
            .cloned()
            .collect();
        for entry in shuffle(&others, rng) {
            if options.len() >= option_count {
                break;
            }
            // options stay unique even when two entries share a spelling
            if !options.iter().any(|o| o.eq_ignore_ascii_case(&entry.word)) {
                options.push(entry.word);
            }
        }

        Self {
            options: shuffle(&options, rng),
            challenge,
        }
    }

    pub fn correct_word(&self) -> &str {
        &self.challenge.entry.word
    }

    pub fn correct_index(&self) -> Option<usize> {
        self.options.iter().position(|o| o == self.correct_word())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnswerRecord {
    pub selected: usize,
    pub correct: bool,
}

/// Pick the word matching the shown translation, over a fixed number of rounds.
#[derive(Debug, Clone)]
pub struct MultipleChoiceGame {
    pool: ChallengePool,
    total_rounds: u32,
    option_count: usize,
    question: Question,
    round: u32,
    score: u32,
    phase: MultipleChoicePhase,
    last_answer: Option<AnswerRecord>,
}

impl MultipleChoiceGame {
    pub fn new<R: Rng + ?Sized>(pool: ChallengePool, settings: &GameSettings, rng: &mut R) -> Self {
        let option_count = settings.multiple_choice_options.max(1);
        let question = Question::generate(&pool, option_count, rng);
        Self {
            pool,
            total_rounds: settings.multiple_choice_rounds.max(1),
            option_count,
            question,
            round: 1,
            score: 0,
            phase: MultipleChoicePhase::Answering,
            last_answer: None,
        }
    }

    /// Locks in an option. Returns whether it was correct, or `None` when no
    /// answer is expected right now or the index is out of range.
    pub fn select_option(&mut self, index: usize) -> Option<bool> {
        if self.phase != MultipleChoicePhase::Answering {
            return None;
        }
        let chosen = self.question.options.get(index)?;
        let correct = chosen == self.question.correct_word();
        if correct {
            self.score += 1;
        }
        self.last_answer = Some(AnswerRecord {
            selected: index,
            correct,
        });
        self.phase = if self.round >= self.total_rounds {
            MultipleChoicePhase::Finished
        } else {
            MultipleChoicePhase::Answered
        };
        Some(correct)
    }

    /// Advances past an answered question; false when not in `Answered`
    pub fn next_question<R: Rng + ?Sized>(&mut self, rng: &mut R) -> bool {
        if self.phase != MultipleChoicePhase::Answered {
            return false;
        }
        self.question = Question::generate(&self.pool, self.option_count, rng);
        self.round += 1;
        self.last_answer = None;
        self.phase = MultipleChoicePhase::Answering;
        true
    }

    pub fn restart<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.question = Question::generate(&self.pool, self.option_count, rng);
        self.round = 1;
        self.score = 0;
        self.last_answer = None;
        self.phase = MultipleChoicePhase::Answering;
    }

    pub fn question(&self) -> &Question {
        &self.question
    }

    pub fn phase(&self) -> MultipleChoicePhase {
        self.phase
    }

    pub fn last_answer(&self) -> Option<AnswerRecord> {
        self.last_answer
    }

    /// 1-based
    pub fn round(&self) -> u32 {
        self.round
    }

    pub fn total_rounds(&self) -> u32 {
        self.total_rounds
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn percentage(&self) -> u32 {
        percentage(self.score, self.total_rounds)
    }
}
