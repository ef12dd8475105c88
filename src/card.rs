use enum_iterator::{all, Sequence};
use std::fmt;

use crate::error::Error;

// The most of a single color you can gather towards one card
pub const MAX_COLOR_GAP: u8 = 4;

// The most tokens you can hold at once
pub const MAX_TOKEN_COST: u32 = 12;

// Declaration order is the column order of the input format
#[derive(Copy, Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd, Sequence)]
pub enum Color {
    Black,
    Red,
    Green,
    Blue,
    White,
}

pub const NUM_COLORS: usize = 5;

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(match *self {
            Color::Black => "black",
            Color::Red => "red",
            Color::Green => "green",
            Color::Blue => "blue",
            Color::White => "white",
        })
    }
}

impl Color {
    pub fn from_name(s: &str) -> Result<Self, Error> {
        all::<Color>()
            .find(|c| c.to_string() == s)
            .ok_or_else(|| Error::UnknownColor(s.to_string()))
    }

    pub fn index(self) -> usize {
        self as usize
    }
}

// Per-color count of permanent discounts from acquired cards
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub struct Bonuses([u8; NUM_COLORS]);

impl Bonuses {
    pub fn new(counts: [u8; NUM_COLORS]) -> Self {
        Self(counts)
    }

    pub fn get(&self, color: Color) -> u8 {
        self.0[color.index()]
    }

    pub fn add(&mut self, color: Color) {
        self.0[color.index()] += 1;
    }
}

// Field order gives the ordering used for set membership
#[derive(Copy, Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Card {
    cost: [u8; NUM_COLORS],
    color: Color,
    value: u8,
}

// Color, value, then the nonzero costs, e.g. "green (0) red 2, blue 2"
impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} ({})", self.color, self.value)?;
        let mut first = true;
        for color in all::<Color>() {
            let n = self.cost(color);
            if n == 0 {
                continue;
            }
            write!(f, "{} {} {}", if first { "" } else { "," }, color, n)?;
            first = false;
        }
        Ok(())
    }
}

impl Card {
    pub const fn new(cost: [u8; NUM_COLORS], color: Color, value: u8) -> Self {
        Self { cost, color, value }
    }

    pub fn cost(&self, color: Color) -> u8 {
        self.cost[color.index()]
    }

    // The bonus this card grants once acquired
    pub fn color(&self) -> Color {
        self.color
    }

    pub fn value(&self) -> u8 {
        self.value
    }

    // Tokens still needed to buy this card given the bonuses so far.
    // None if no amount of turns would make it affordable.
    pub fn token_cost(&self, bonuses: &Bonuses) -> Option<u32> {
        let mut total = 0;
        for color in all::<Color>() {
            let have = bonuses.get(color);
            let need = self.cost(color);
            if have >= need {
                continue;
            }
            if have + MAX_COLOR_GAP < need {
                return None;
            }
            total += (need - have) as u32;
        }
        if total > MAX_TOKEN_COST {
            return None;
        }
        Some(total)
    }
}
