use std::io;

use crate::card::Card;
use crate::deck::Tier;

// Problems that end a run. Rejected moves and mutations are not errors.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("io error: {0}")]
    Io(#[from] io::Error),
    #[error("unrecognized color {0:?}")]
    UnknownColor(String),
    #[error("unrecognized card {0}")]
    UnknownCard(Card),
    #[error("unrecognized card {0:?}")]
    UnknownCardLine(String),
    #[error("{tier} backlog is full ({capacity} cards)")]
    BacklogFull { tier: Tier, capacity: usize },
    #[error("invalid config: {0}")]
    InvalidConfig(String),
}
