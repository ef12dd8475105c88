#[cfg(test)]
#[macro_use]
extern crate assert_matches;

pub mod anneal;
pub mod card;
pub mod catalog;
pub mod config;
pub mod deck;
pub mod error;
pub mod input;
pub mod report;
pub mod state;
pub mod trial;
pub mod twister;
