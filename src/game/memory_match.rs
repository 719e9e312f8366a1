use std::time::Duration;

use rand::Rng;

use crate::challenge::ChallengePool;
use crate::config::GameSettings;
use crate::random::shuffle;
use crate::timer::Delay;
use crate::util::percentage;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CardSide {
    Word,
    Translation { language: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Card {
    pub id: String,
    pub content: String,
    pub side: CardSide,
    pub pair_id: String,
    pub is_flipped: bool,
    pub is_matched: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MemoryPhase {
    Flipping,
    /// Two cards are face-up and the reveal delay is running
    Checking { matched: bool },
    Finished,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlipOutcome {
    Rejected,
    Revealed,
    /// Second card of a move turned over
    Checking { matched: bool },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct PendingCheck {
    first: usize,
    second: usize,
    matched: bool,
}

/// Pair every word with its translation on a shuffled board.
#[derive(Debug, Clone)]
pub struct MemoryMatchGame {
    pool: ChallengePool,
    max_pairs: usize,
    match_reveal: Duration,
    mismatch_reveal: Duration,
    cards: Vec<Card>,
    face_up: Vec<usize>,
    pending: Option<PendingCheck>,
    check_timer: Delay,
    moves: u32,
    matches: usize,
}

impl MemoryMatchGame {
    pub fn new<R: Rng + ?Sized>(pool: ChallengePool, settings: &GameSettings, rng: &mut R) -> Self {
        let cards = deal(&pool, settings.memory_pairs, rng);
        Self {
            pool,
            max_pairs: settings.memory_pairs,
            match_reveal: settings.match_reveal(),
            mismatch_reveal: settings.mismatch_reveal(),
            cards,
            face_up: Vec::with_capacity(2),
            pending: None,
            check_timer: Delay::new(),
            moves: 0,
            matches: 0,
        }
    }

    /// Turns the card at `position` face-up if the board allows it
    pub fn flip(&mut self, position: usize) -> FlipOutcome {
        if self.pending.is_some() || self.face_up.len() >= 2 {
            return FlipOutcome::Rejected;
        }
        let Some(card) = self.cards.get_mut(position) else {
            return FlipOutcome::Rejected;
        };
        if card.is_flipped || card.is_matched {
            return FlipOutcome::Rejected;
        }
        card.is_flipped = true;
        self.face_up.push(position);

        if let [first, second] = self.face_up[..] {
            let matched = self.cards[first].pair_id == self.cards[second].pair_id;
            self.moves += 1;
            self.pending = Some(PendingCheck {
                first,
                second,
                matched,
            });
            self.check_timer.schedule(if matched {
                self.match_reveal
            } else {
                self.mismatch_reveal
            });
            FlipOutcome::Checking { matched }
        } else {
            FlipOutcome::Revealed
        }
    }

    /// Flips by card id rather than board position
    pub fn flip_card(&mut self, id: &str) -> FlipOutcome {
        match self.cards.iter().position(|c| c.id == id) {
            Some(position) => self.flip(position),
            None => FlipOutcome::Rejected,
        }
    }

    pub fn on_tick(&mut self, elapsed: Duration) {
        if self.check_timer.advance(elapsed) {
            self.resolve_check();
        }
    }

    fn resolve_check(&mut self) {
        let Some(check) = self.pending.take() else {
            return;
        };
        for idx in [check.first, check.second] {
            let card = &mut self.cards[idx];
            if check.matched {
                card.is_matched = true;
            } else {
                card.is_flipped = false;
            }
        }
        if check.matched {
            self.matches += 1;
        }
        self.face_up.clear();
        if self.is_finished() {
            tracing::debug!(moves = self.moves, pairs = self.total_pairs(), "memory match finished");
        }
    }

    /// Deals a new board and forgets any check in flight
    pub fn restart<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.check_timer.cancel();
        self.pending = None;
        self.face_up.clear();
        self.moves = 0;
        self.matches = 0;
        self.cards = deal(&self.pool, self.max_pairs, rng);
    }

    pub fn teardown(&mut self) {
        self.check_timer.cancel();
    }

    pub fn phase(&self) -> MemoryPhase {
        if self.is_finished() {
            MemoryPhase::Finished
        } else if let Some(check) = self.pending {
            MemoryPhase::Checking {
                matched: check.matched,
            }
        } else {
            MemoryPhase::Flipping
        }
    }

    pub fn is_finished(&self) -> bool {
        self.total_pairs() > 0 && self.matches == self.total_pairs()
    }

    /// round(pairs / moves * 100)
    pub fn efficiency(&self) -> u32 {
        percentage(self.total_pairs() as u32, self.moves)
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn total_pairs(&self) -> usize {
        self.cards.len() / 2
    }

    pub fn matches(&self) -> usize {
        self.matches
    }

    pub fn moves(&self) -> u32 {
        self.moves
    }
}

fn deal<R: Rng + ?Sized>(pool: &ChallengePool, pairs: usize, rng: &mut R) -> Vec<Card> {
    let mut cards = Vec::with_capacity(pairs * 2);
    for challenge in pool.draw_distinct(pairs, rng) {
        let pair_id = challenge.entry.id.clone();
        cards.push(Card {
            id: format!("word-{pair_id}"),
            content: challenge.entry.word.clone(),
            side: CardSide::Word,
            pair_id: pair_id.clone(),
            is_flipped: false,
            is_matched: false,
        });
        cards.push(Card {
            id: format!("trans-{pair_id}"),
            content: challenge.translation.value,
            side: CardSide::Translation {
                language: challenge.translation.language,
            },
            pair_id,
            is_flipped: false,
            is_matched: false,
        });
    }
    shuffle(&cards, rng)
}
