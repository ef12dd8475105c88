use enum_iterator::{all, Sequence};
use smallvec::SmallVec;
use std::collections::BTreeSet;
use std::fmt;

use crate::card::{Bonuses, Card};
use crate::error::Error;
use crate::twister::Twister;

pub const SLOTS: usize = 4;
pub const BACKLOG_CAPACITY: usize = 30;

// No acquisition may push the implied turn count past this
pub const TURN_LIMIT: u32 = 28;

// Turns needed to gather the given number of tokens
pub fn gather_turns(tokens: u32) -> u32 {
    (tokens + 3) / 4
}

#[derive(Copy, Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd, Sequence)]
pub enum Tier {
    One,
    Two,
    Three,
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "tier {}", self.index() + 1)
    }
}

impl Tier {
    // Tiers are told apart by point value
    pub fn of(card: &Card) -> Self {
        match card.value() {
            0 => Tier::One,
            10 => Tier::Three,
            _ => Tier::Two,
        }
    }

    pub fn index(self) -> usize {
        self as usize
    }
}

// Running totals for one playout
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub struct Tally {
    pub points: u32,
    pub tokens: u32,
    pub rounds: u32,
    pub bonuses: Bonuses,
}

impl Tally {
    // Rounds spent buying plus rounds spent gathering tokens
    pub fn turns(&self) -> u32 {
        self.rounds + gather_turns(self.tokens)
    }
}

// Why a move was dropped during a playout
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Rejection {
    EmptySlot,
    Unaffordable,
    OverBudget,
}

// One tier: the face-up slots plus the face-down backlog.
// The backlog is drawn from the back.
#[derive(Clone, Debug, Default)]
pub struct Deck {
    slots: [Option<Card>; SLOTS],
    backlog: SmallVec<[Card; BACKLOG_CAPACITY]>,
}

impl Deck {
    pub fn new() -> Self {
        Self::default()
    }

    // Fills the first empty slot, otherwise goes to the backlog
    pub fn add_card(&mut self, card: Card) -> Result<(), Error> {
        if let Some(slot) = self.slots.iter_mut().find(|s| s.is_none()) {
            *slot = Some(card);
            return Ok(());
        }
        if self.backlog.len() >= BACKLOG_CAPACITY {
            return Err(Error::BacklogFull {
                tier: Tier::of(&card),
                capacity: BACKLOG_CAPACITY,
            });
        }
        self.backlog.push(card);
        Ok(())
    }

    pub fn slot(&self, index: usize) -> Option<&Card> {
        self.slots.get(index).and_then(|s| s.as_ref())
    }

    pub fn slot_occupied(&self, index: usize) -> bool {
        self.slot(index).is_some()
    }

    pub fn visible(&self) -> usize {
        self.slots.iter().filter(|s| s.is_some()).count()
    }

    pub fn backlog(&self) -> &[Card] {
        &self.backlog
    }

    pub fn cards(&self) -> BTreeSet<Card> {
        self.slots
            .iter()
            .flatten()
            .chain(self.backlog.iter())
            .copied()
            .collect()
    }

    // Buys the card in the given slot, if the rules allow it.
    // On rejection nothing changes.
    pub fn attempt_acquire(&mut self, index: usize, tally: &mut Tally) -> Result<Card, Rejection> {
        let card = *self.slot(index).ok_or(Rejection::EmptySlot)?;
        let cost = card
            .token_cost(&tally.bonuses)
            .ok_or(Rejection::Unaffordable)?;
        if tally.rounds + 1 + gather_turns(tally.tokens + cost) > TURN_LIMIT {
            return Err(Rejection::OverBudget);
        }

        tally.points += card.value() as u32;
        tally.tokens += cost;
        tally.rounds += 1;
        tally.bonuses.add(card.color());
        self.slots[index] = self.backlog.pop();
        Ok(card)
    }

    // Deals unknown cards out of the pool: empty slots first, then the
    // backlog up to the desired size.
    pub fn fill_randomly(&mut self, desired: usize, mut pool: Vec<Card>, rng: &mut Twister) {
        let desired = desired.min(BACKLOG_CAPACITY);
        for slot in self.slots.iter_mut().filter(|s| s.is_none()) {
            if pool.is_empty() {
                return;
            }
            *slot = Some(draw(&mut pool, rng));
        }
        while self.backlog.len() < desired && !pool.is_empty() {
            self.backlog.push(draw(&mut pool, rng));
        }
    }

    pub fn reverse_backlog(&mut self) {
        self.backlog.reverse();
    }
}

fn draw(pool: &mut Vec<Card>, rng: &mut Twister) -> Card {
    let i = rng.next_index(pool.len());
    pool.swap_remove(i)
}

// All three tiers
#[derive(Clone, Debug, Default)]
pub struct Board {
    decks: [Deck; 3],
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for tier in all::<Tier>() {
            let deck = self.deck(tier);
            writeln!(
                f,
                "{}: {} | backlog {}",
                tier,
                (0..SLOTS)
                    .map(|i| match deck.slot(i) {
                        Some(c) => c.to_string(),
                        None => "-".to_string(),
                    })
                    .collect::<Vec<String>>()
                    .join(" / "),
                deck.backlog().len()
            )?;
        }
        Ok(())
    }
}

impl Board {
    pub fn new() -> Self {
        Self::default()
    }

    // Deals known cards to their tiers in the order given
    pub fn from_cards(cards: impl IntoIterator<Item = Card>) -> Result<Self, Error> {
        let mut board = Self::new();
        for card in cards {
            board.deck_mut(Tier::of(&card)).add_card(card)?;
        }
        Ok(board)
    }

    pub fn deck(&self, tier: Tier) -> &Deck {
        &self.decks[tier.index()]
    }

    pub fn deck_mut(&mut self, tier: Tier) -> &mut Deck {
        &mut self.decks[tier.index()]
    }

    pub fn len(&self) -> usize {
        self.decks
            .iter()
            .map(|d| d.visible() + d.backlog().len())
            .sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::card::Color;

    fn cheap(color: Color) -> Card {
        let mut cost = [0; 5];
        cost[color.index()] = 1;
        Card::new(cost, color, 0)
    }

    #[test]
    fn add_fills_slots_then_backlog() {
        let mut deck = Deck::new();
        for color in all::<Color>() {
            deck.add_card(cheap(color)).unwrap();
        }
        assert_eq!(deck.visible(), 4);
        assert_eq!(deck.backlog(), &[cheap(Color::White)]);
        assert!(deck.slot_occupied(3));
        assert!(!deck.slot_occupied(4));
    }

    #[test]
    fn backlog_is_bounded() {
        let mut deck = Deck::new();
        let card = cheap(Color::Red);
        for _ in 0..SLOTS + BACKLOG_CAPACITY {
            deck.add_card(card).unwrap();
        }
        assert_matches!(
            deck.add_card(card),
            Err(Error::BacklogFull { tier: Tier::One, .. })
        );
    }

    #[test]
    fn acquire_single_card() {
        let card = Card::new([0, 0, 0, 0, 1], Color::White, 1);
        let mut deck = Deck::new();
        deck.add_card(card).unwrap();
        let mut tally = Tally::default();
        assert_eq!(card.token_cost(&tally.bonuses), Some(1));
        assert_eq!(deck.attempt_acquire(0, &mut tally), Ok(card));
        assert_eq!(tally.bonuses, Bonuses::new([0, 0, 0, 0, 1]));
        assert_eq!(tally.points, 1);
        assert_eq!(tally.rounds, 1);
        assert_eq!(tally.tokens, 1);
        assert!(!deck.slot_occupied(0));
        assert_eq!(deck.attempt_acquire(0, &mut tally), Err(Rejection::EmptySlot));
        assert_eq!(tally.rounds, 1);
    }

    #[test]
    fn refill_from_most_recent() {
        let mut deck = Deck::new();
        let cards: Vec<Card> = all::<Color>().map(cheap).collect();
        for c in &cards {
            deck.add_card(*c).unwrap();
        }
        deck.add_card(Card::new([0, 0, 0, 0, 2], Color::Black, 0)).unwrap();
        let mut tally = Tally::default();
        deck.attempt_acquire(2, &mut tally).unwrap();
        assert_eq!(deck.visible(), 4);
        assert_eq!(
            deck.slot(2),
            Some(&Card::new([0, 0, 0, 0, 2], Color::Black, 0))
        );
        assert_eq!(deck.backlog(), &[cards[4]]);
    }

    #[test]
    fn unaffordable_changes_nothing() {
        let card = Card::new([5, 0, 0, 0, 0], Color::Red, 2);
        let mut deck = Deck::new();
        deck.add_card(card).unwrap();
        let mut tally = Tally::default();
        assert_eq!(deck.attempt_acquire(0, &mut tally), Err(Rejection::Unaffordable));
        assert_eq!(tally, Tally::default());
        assert!(deck.slot_occupied(0));
    }

    #[test]
    fn turn_limit() {
        let card = Card::new([0, 0, 0, 0, 4], Color::Red, 2);
        let mut deck = Deck::new();
        deck.add_card(card).unwrap();

        // 23 rounds and 16 tokens is 27 turns. Buying adds a round and a turn.
        let mut tally = Tally {
            rounds: 23,
            tokens: 16,
            ..Tally::default()
        };
        let before = tally;
        assert_eq!(deck.attempt_acquire(0, &mut tally), Err(Rejection::OverBudget));
        assert_eq!(tally, before);

        tally.rounds = 22;
        assert_eq!(deck.attempt_acquire(0, &mut tally), Ok(card));
        assert_eq!(tally.turns(), TURN_LIMIT);
    }

    #[test]
    fn fill_randomly_slots_first() {
        let pool: Vec<Card> = all::<Color>().map(cheap).collect();
        let mut deck = Deck::new();
        deck.add_card(pool[0]).unwrap();
        let rest = pool[1..].to_vec();
        deck.fill_randomly(25, rest, &mut Twister::new(5));
        assert_eq!(deck.visible(), 4);
        assert_eq!(deck.slot(0), Some(&pool[0]));
        assert_eq!(deck.backlog().len(), 1);
        assert_eq!(deck.cards().len(), 5);
    }

    #[test]
    fn fill_randomly_respects_desired_size() {
        let pool: Vec<Card> = crate::catalog::ALL_CARDS
            .iter()
            .filter(|c| Tier::of(c) == Tier::One)
            .copied()
            .collect();
        let mut deck = Deck::new();
        deck.fill_randomly(25, pool.clone(), &mut Twister::new(5));
        assert_eq!(deck.visible(), 4);
        assert_eq!(deck.backlog().len(), 25);

        let mut again = Deck::new();
        again.fill_randomly(25, pool, &mut Twister::new(5));
        assert_eq!(deck.backlog(), again.backlog());
    }

    #[test]
    fn board_deals_by_value() {
        let board = Board::from_cards(vec![
            Card::new([0, 2, 0, 2, 0], Color::Green, 0),
            Card::new([0, 6, 0, 0, 0], Color::Red, 3),
            Card::new([6, 8, 6, 6, 0], Color::White, 10),
        ])
        .unwrap();
        assert_eq!(board.deck(Tier::One).visible(), 1);
        assert_eq!(board.deck(Tier::Two).visible(), 1);
        assert_eq!(board.deck(Tier::Three).visible(), 1);
        assert_eq!(board.len(), 3);
    }
}
