use lazy_static::lazy_static;
use std::collections::BTreeSet;

use crate::card::Card;
use crate::card::Color::{self, *};

const fn card(cost: [u8; 5], color: Color, value: u8) -> Card {
    Card::new(cost, color, value)
}

// Every card in the game. Costs are in black, red, green, blue, white order.
// The first tier is worth nothing and the last tier is worth 10 apiece.
pub const ALL_CARDS: &[Card] = &[
    // Tier 1
    card([0, 1, 1, 1, 1], Black, 0),
    card([0, 1, 1, 2, 1], Black, 0),
    card([0, 1, 0, 2, 2], Black, 0),
    card([1, 3, 1, 0, 0], Black, 0),
    card([0, 1, 2, 0, 0], Black, 0),
    card([0, 0, 2, 0, 2], Black, 0),
    card([0, 0, 3, 0, 0], Black, 0),
    card([0, 0, 0, 4, 0], Black, 0),
    card([1, 1, 1, 0, 1], Blue, 0),
    card([1, 2, 1, 0, 1], Blue, 0),
    card([0, 2, 2, 0, 1], Blue, 0),
    card([0, 1, 3, 1, 0], Blue, 0),
    card([2, 0, 0, 0, 1], Blue, 0),
    card([2, 0, 2, 0, 0], Blue, 0),
    card([3, 0, 0, 0, 0], Blue, 0),
    card([0, 4, 0, 0, 0], Blue, 0),
    card([1, 1, 1, 1, 0], White, 0),
    card([1, 1, 2, 1, 0], White, 0),
    card([1, 0, 2, 2, 0], White, 0),
    card([1, 0, 0, 1, 3], White, 0),
    card([1, 2, 0, 0, 0], White, 0),
    card([2, 0, 0, 2, 0], White, 0),
    card([0, 0, 0, 3, 0], White, 0),
    card([0, 0, 4, 0, 0], White, 0),
    card([1, 1, 0, 1, 1], Green, 0),
    card([2, 1, 0, 1, 1], Green, 0),
    card([2, 2, 0, 1, 0], Green, 0),
    card([0, 0, 1, 3, 1], Green, 0),
    card([0, 0, 0, 1, 2], Green, 0),
    card([0, 2, 0, 2, 0], Green, 0),
    card([0, 3, 0, 0, 0], Green, 0),
    card([4, 0, 0, 0, 0], Green, 0),
    card([1, 0, 1, 1, 1], Red, 0),
    card([1, 0, 1, 1, 2], Red, 0),
    card([2, 0, 1, 0, 2], Red, 0),
    card([3, 1, 0, 0, 1], Red, 0),
    card([0, 0, 1, 2, 0], Red, 0),
    card([0, 2, 0, 0, 2], Red, 0),
    card([0, 0, 0, 0, 3], Red, 0),
    card([0, 0, 0, 0, 4], Red, 0),
    // Tier 2
    card([0, 0, 2, 2, 3], Black, 1),
    card([2, 0, 3, 0, 3], Black, 1),
    card([0, 2, 4, 1, 0], Black, 2),
    card([0, 3, 5, 0, 0], Black, 2),
    card([0, 0, 0, 0, 5], Black, 2),
    card([6, 0, 0, 0, 0], Black, 3),
    card([0, 3, 2, 2, 0], Blue, 1),
    card([3, 0, 3, 2, 0], Blue, 1),
    card([0, 0, 0, 3, 5], Blue, 2),
    card([4, 1, 0, 0, 2], Blue, 2),
    card([0, 0, 0, 5, 0], Blue, 2),
    card([0, 0, 0, 6, 0], Blue, 3),
    card([2, 2, 3, 0, 0], White, 1),
    card([0, 3, 0, 3, 2], White, 1),
    card([2, 4, 1, 0, 0], White, 2),
    card([3, 5, 0, 0, 0], White, 2),
    card([0, 5, 0, 0, 0], White, 2),
    card([0, 0, 0, 0, 6], White, 3),
    card([0, 3, 2, 0, 3], Green, 1),
    card([2, 0, 0, 3, 2], Green, 1),
    card([1, 0, 0, 2, 4], Green, 2),
    card([0, 0, 3, 5, 0], Green, 2),
    card([0, 0, 5, 0, 0], Green, 2),
    card([0, 0, 6, 0, 0], Green, 3),
    card([3, 2, 0, 0, 2], Red, 1),
    card([3, 2, 0, 3, 0], Red, 1),
    card([0, 0, 2, 4, 1], Red, 2),
    card([5, 0, 0, 0, 3], Red, 2),
    card([5, 0, 0, 0, 0], Red, 2),
    card([0, 6, 0, 0, 0], Red, 3),
    // Tier 3
    card([0, 8, 6, 6, 6], Black, 10),
    card([0, 6, 8, 6, 6], Black, 10),
    card([0, 6, 6, 8, 6], Black, 10),
    card([0, 6, 6, 6, 8], Black, 10),
    card([8, 0, 6, 6, 6], Red, 10),
    card([6, 0, 8, 6, 6], Red, 10),
    card([6, 0, 6, 8, 6], Red, 10),
    card([6, 0, 6, 6, 8], Red, 10),
    card([8, 6, 0, 6, 6], Green, 10),
    card([6, 8, 0, 6, 6], Green, 10),
    card([6, 6, 0, 8, 6], Green, 10),
    card([6, 6, 0, 6, 8], Green, 10),
    card([8, 6, 6, 0, 6], Blue, 10),
    card([6, 8, 6, 0, 6], Blue, 10),
    card([6, 6, 8, 0, 6], Blue, 10),
    card([6, 6, 6, 0, 8], Blue, 10),
    card([8, 6, 6, 6, 0], White, 10),
    card([6, 8, 6, 6, 0], White, 10),
    card([6, 6, 8, 6, 0], White, 10),
    card([6, 6, 6, 8, 0], White, 10),
];

lazy_static! {
    // Sorted, which fixes the order unknown cards get shuffled in
    pub static ref CANONICAL: BTreeSet<Card> = ALL_CARDS.iter().copied().collect();
}

pub fn is_known_card(card: &Card) -> bool {
    CANONICAL.contains(card)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::deck::Tier;
    use enum_iterator::all;

    #[test]
    fn no_duplicates() {
        assert_eq!(CANONICAL.len(), ALL_CARDS.len());
        assert_eq!(CANONICAL.len(), 90);
    }

    #[test]
    fn tier_sizes() {
        let count = |tier: Tier| ALL_CARDS.iter().filter(|c| Tier::of(c) == tier).count();
        assert_eq!(count(Tier::One), 40);
        assert_eq!(count(Tier::Two), 30);
        assert_eq!(count(Tier::Three), 20);
    }

    #[test]
    fn balanced_colors() {
        for color in all::<Color>() {
            let n = ALL_CARDS.iter().filter(|c| c.color() == color).count();
            assert_eq!(n, 18, "{}", color);
        }
    }

    #[test]
    fn membership() {
        assert!(is_known_card(&Card::new([0, 2, 0, 2, 0], Green, 0)));
        assert!(is_known_card(&Card::new([6, 8, 6, 6, 0], White, 10)));
        assert!(!is_known_card(&Card::new([0, 2, 0, 2, 0], Green, 1)));
    }
}
