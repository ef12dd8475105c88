use smallvec::SmallVec;
use std::fmt;

use crate::card::Card;
use crate::deck::{Board, Tally, Tier, SLOTS};
use crate::twister::Twister;

// Longest move sequence the search will build
pub const MAX_MOVES: usize = 31;

// Mutations draw fresh codes from 0..MUTATION_DOMAIN. That covers both tiers
// that get replenished but only the first two slots of the top tier.
pub const MUTATION_DOMAIN: u32 = 10;

// Codes are read mod 16; 0-3 pick tier 1, 4-7 tier 2, 8-11 tier 3.
// Anything else selects nothing.
pub fn decode(code: u8) -> Option<(Tier, usize)> {
    let code = (code % 16) as usize;
    let tier = match code / SLOTS {
        0 => Tier::One,
        1 => Tier::Two,
        2 => Tier::Three,
        _ => return None,
    };
    Some((tier, code % SLOTS))
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[error("move sequence already holds {0} moves")]
pub struct CapacityExceeded(pub usize);

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Mutation {
    Change,
    Insert,
    Swap,
}

// An ordered list of move codes, at most MAX_MOVES long
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct MoveSeq(SmallVec<[u8; MAX_MOVES]>);

impl MoveSeq {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_codes(codes: &[u8]) -> Result<Self, CapacityExceeded> {
        let mut seq = Self::new();
        for &code in codes {
            seq.push(code)?;
        }
        Ok(seq)
    }

    pub fn codes(&self) -> &[u8] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.0.len() >= MAX_MOVES
    }

    pub fn push(&mut self, code: u8) -> Result<(), CapacityExceeded> {
        self.insert(self.len(), code)
    }

    pub fn insert(&mut self, index: usize, code: u8) -> Result<(), CapacityExceeded> {
        if self.is_full() {
            return Err(CapacityExceeded(MAX_MOVES));
        }
        self.0.insert(index, code);
        Ok(())
    }

    // Applies one random edit. Returns None, leaving the sequence untouched,
    // when the chosen operator has nothing useful to do.
    pub fn mutate(&mut self, rng: &mut Twister) -> Option<Mutation> {
        match rng.next_below(3) {
            0 => {
                if self.is_empty() {
                    return None;
                }
                let pos = rng.next_index(self.len());
                let old = self.0[pos];
                let new = loop {
                    let code = rng.next_below(MUTATION_DOMAIN) as u8;
                    if code != old {
                        break code;
                    }
                };
                self.0[pos] = new;
                Some(Mutation::Change)
            }
            1 => {
                if self.is_full() {
                    return None;
                }
                let pos = rng.next_index(self.len() + 1);
                let code = rng.next_below(MUTATION_DOMAIN) as u8;
                self.insert(pos, code).ok()?;
                Some(Mutation::Insert)
            }
            _ => {
                if self.len() < 3 {
                    return None;
                }
                let a = rng.next_index(self.len());
                let b = rng.next_index(self.len());
                if a == b || self.0[a] == self.0[b] {
                    return None;
                }
                self.0.swap(a, b);
                Some(Mutation::Swap)
            }
        }
    }

    // A copy with exactly one edit applied
    pub fn neighbor(&self, rng: &mut Twister) -> MoveSeq {
        loop {
            let mut candidate = self.clone();
            if candidate.mutate(rng).is_some() {
                return candidate;
            }
        }
    }
}

// An accepted move and the card it bought
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct Step {
    pub code: u8,
    pub card: Card,
}

// What a move sequence achieves against a particular board
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Outcome {
    steps: SmallVec<[Step; MAX_MOVES]>,
    tally: Tally,
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(
            f,
            "points: {}, rounds: {}, tokens_cost: {}, cc {}",
            self.points(),
            self.rounds(),
            self.tokens(),
            self.turns()
        )?;
        for step in &self.steps {
            writeln!(f, "{}: {}", step.code, step.card)?;
        }
        Ok(())
    }
}

impl Outcome {
    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    // Only the moves that were accepted
    pub fn moves(&self) -> MoveSeq {
        MoveSeq(self.steps.iter().map(|s| s.code).collect())
    }

    pub fn tally(&self) -> &Tally {
        &self.tally
    }

    pub fn points(&self) -> u32 {
        self.tally.points
    }

    pub fn tokens(&self) -> u32 {
        self.tally.tokens
    }

    pub fn rounds(&self) -> u32 {
        self.tally.rounds
    }

    pub fn turns(&self) -> u32 {
        self.tally.turns()
    }
}

// Plays the moves in order against a private copy of the board.
// Moves the rules reject are dropped.
pub fn replay(board: &Board, moves: &MoveSeq) -> Outcome {
    let mut board = board.clone();
    let mut outcome = Outcome::default();
    for &code in moves.codes() {
        let (tier, slot) = match decode(code) {
            Some(target) => target,
            None => continue,
        };
        if let Ok(card) = board.deck_mut(tier).attempt_acquire(slot, &mut outcome.tally) {
            outcome.steps.push(Step {
                code: code % 16,
                card,
            });
        }
    }
    outcome
}
