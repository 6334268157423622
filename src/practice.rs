//! Flashcard practice sessions.
//!
//! A session is an in-memory quiz over a dictionary's word pairs: the
//! cards are shuffled once at start, each card is shown from one side,
//! revealed on demand, and judged as remembered or not. Sessions never
//! touch the dictionary they were started from and are never persisted;
//! exiting a session is dropping the value.

use crate::dictionary::WordPair;
use rand::Rng;
use rand::seq::SliceRandom;

/// Which side of a card is shown first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PracticeDirection {
    /// Show `original`, reveal `translation`
    Forward,
    /// Show `translation`, reveal `original`
    Reverse,
}

/// A running (or finished) flashcard quiz.
#[derive(Debug, Clone)]
pub struct PracticeSession {
    cards: Vec<WordPair>,
    direction: PracticeDirection,
    current: usize,
    revealed: bool,
    remembered: Vec<WordPair>,
    not_remembered: Vec<WordPair>,
}

impl PracticeSession {
    /// Start a session over a uniformly shuffled copy of `words`.
    ///
    /// An empty word list produces a session that is already finished,
    /// reporting 0/0 progress.
    pub fn start(words: &[WordPair], direction: PracticeDirection) -> Self {
        Self::start_with_rng(words, direction, &mut rand::rng())
    }

    /// Start with a caller-supplied RNG, for deterministic tests.
    pub fn start_with_rng<R: Rng + ?Sized>(
        words: &[WordPair],
        direction: PracticeDirection,
        rng: &mut R,
    ) -> Self {
        let mut cards = words.to_vec();
        // Fisher–Yates via rand; unbiased, unlike comparator tricks.
        cards.shuffle(rng);
        PracticeSession {
            cards,
            direction,
            current: 0,
            revealed: false,
            remembered: Vec::new(),
            not_remembered: Vec::new(),
        }
    }

    pub fn direction(&self) -> PracticeDirection {
        self.direction
    }

    pub fn is_finished(&self) -> bool {
        self.current >= self.cards.len()
    }

    pub fn current_card(&self) -> Option<&WordPair> {
        self.cards.get(self.current)
    }

    /// The side of the current card shown before reveal.
    pub fn prompt(&self) -> Option<&str> {
        self.current_card().map(|card| match self.direction {
            PracticeDirection::Forward => card.original.as_str(),
            PracticeDirection::Reverse => card.translation.as_str(),
        })
    }

    /// The side of the current card shown on reveal.
    pub fn answer(&self) -> Option<&str> {
        self.current_card().map(|card| match self.direction {
            PracticeDirection::Forward => card.translation.as_str(),
            PracticeDirection::Reverse => card.original.as_str(),
        })
    }

    pub fn revealed(&self) -> bool {
        self.revealed
    }

    /// Toggle the reveal flag for the current card; does not advance.
    pub fn toggle_reveal(&mut self) {
        if !self.is_finished() {
            self.revealed = !self.revealed;
        }
    }

    /// Judge the current card and advance.
    ///
    /// The card lands in the remembered or not-remembered list, the index
    /// moves forward by one and the reveal flag resets. Judging the last
    /// card finishes the session; judging a finished session is a no-op.
    ///
    /// Deliberately permissive about the reveal flag: callers gate the
    /// action in their UI, the engine does not reject an early judge.
    ///
    /// Returns `true` when a card was consumed.
    pub fn judge(&mut self, remembered: bool) -> bool {
        let Some(card) = self.cards.get(self.current).cloned() else {
            return false;
        };
        if remembered {
            self.remembered.push(card);
        } else {
            self.not_remembered.push(card);
        }
        self.current += 1;
        self.revealed = false;
        true
    }

    /// Progress as `(position, total)`, where position is 1-based for the
    /// card currently shown. An empty session reports `(0, 0)`.
    pub fn progress(&self) -> (usize, usize) {
        let total = self.cards.len();
        if total == 0 {
            (0, 0)
        } else {
            ((self.current + 1).min(total), total)
        }
    }

    pub fn total(&self) -> usize {
        self.cards.len()
    }

    pub fn remembered(&self) -> &[WordPair] {
        &self.remembered
    }

    pub fn not_remembered(&self) -> &[WordPair] {
        &self.not_remembered
    }
}
