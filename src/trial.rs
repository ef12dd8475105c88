use tracing::{debug, info};

use crate::anneal::{anneal, TrialBest};
use crate::catalog::CANONICAL;
use crate::card::Card;
use crate::config::SearchConfig;
use crate::deck::{Board, Tier};
use crate::error::Error;
use crate::report::{Estimate, Report};
use crate::state::Outcome;
use crate::twister::Twister;

// Cards of the tier that are neither on the board nor already known to come
fn remaining(board: &Board, tier: Tier) -> Vec<Card> {
    let known = board.deck(tier).cards();
    CANONICAL
        .iter()
        .filter(|c| Tier::of(c) == tier && !known.contains(*c))
        .copied()
        .collect()
}

// Deals random unknown cards into tiers 1 and 2. The top tier is fully
// known and never replenished.
pub fn randomize(board: &Board, config: &SearchConfig, rng: &mut Twister) -> Board {
    let mut dealt = board.clone();
    for tier in [Tier::One, Tier::Two] {
        let pool = remaining(board, tier);
        dealt
            .deck_mut(tier)
            .fill_randomly(config.backlog_size, pool, rng);
    }
    dealt
}

// The board every restart of a trial plays against
pub fn deal(board: &Board, config: &SearchConfig, setup: &mut Twister) -> Board {
    let mut dealt = randomize(board, config, setup);

    // Known cards were listed in the order they show up, so they have to come
    // off the back of the backlog first.
    dealt.deck_mut(Tier::One).reverse_backlog();
    dealt.deck_mut(Tier::Two).reverse_backlog();
    dealt
}

// One deal followed by independent anneal restarts against it.
// Returns the best outcome of the trial.
pub fn run_trial(
    board: &Board,
    config: &SearchConfig,
    setup: &mut Twister,
    annealing: &mut Twister,
    report: &mut dyn Report,
) -> Outcome {
    let dealt = deal(board, config, setup);
    let mut best = TrialBest::new();
    for _ in 0..config.restarts {
        anneal(&dealt, config, annealing, &mut best, report);
    }
    best.into_outcome()
}

// Runs every trial and reports the share that reached the target
pub fn estimate(
    board: &Board,
    config: &SearchConfig,
    report: &mut dyn Report,
) -> Result<Estimate, Error> {
    config.validate()?;
    info!(cards = board.len(), trials = config.trials, "estimating");

    let mut setup = Twister::new(config.setup_seed);
    let mut annealing = Twister::new(config.anneal_seed);
    let mut estimate = Estimate::new(config.baseline);
    for i in 0..config.trials {
        let best = run_trial(board, config, &mut setup, &mut annealing, report);
        debug!(trial = i + 1, points = best.points(), "trial done");
        estimate.record(best.points(), config.target);
        report.on_trial(&estimate);
    }

    info!(
        hits = estimate.hits,
        likelihood = estimate.likelihood(),
        "estimate done"
    );
    Ok(estimate)
}
