use tracing::{debug, trace};

use crate::config::SearchConfig;
use crate::deck::Board;
use crate::report::Report;
use crate::state::{replay, MoveSeq, Outcome};
use crate::twister::Twister;

// The best outcome seen during one trial, across all of its anneal runs
#[derive(Clone, Debug, Default)]
pub struct TrialBest {
    best: Outcome,
}

impl TrialBest {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reset(&mut self) {
        self.best = Outcome::default();
    }

    pub fn outcome(&self) -> &Outcome {
        &self.best
    }

    pub fn points(&self) -> u32 {
        self.best.points()
    }

    // Keeps the outcome only if it scores strictly more.
    // Returns whether it was kept.
    pub fn offer(&mut self, outcome: &Outcome) -> bool {
        if outcome.points() <= self.best.points() {
            return false;
        }
        self.best = outcome.clone();
        true
    }

    pub fn into_outcome(self) -> Outcome {
        self.best
    }
}

// One simulated annealing run from an empty move sequence.
// Returns where the run ended up.
pub fn anneal(
    board: &Board,
    config: &SearchConfig,
    rng: &mut Twister,
    best: &mut TrialBest,
    report: &mut dyn Report,
) -> Outcome {
    let cooling = config.cooling();
    let mut temp = config.start_temp;
    let mut anchor = Outcome::default();
    let mut accepted = 0u32;

    while temp > config.final_temp {
        let candidate: MoveSeq = anchor.moves().neighbor(rng);
        let refined = replay(board, &candidate);

        if best.offer(&refined) {
            debug!(points = refined.points(), turns = refined.turns(), "new best");
            if refined.points() >= config.target {
                report.on_solution(&refined);
            }
        }
        report.on_step(best.points());

        // Metropolis: always take improvements, sometimes take losses
        let delta = refined.points() as f64 - anchor.points() as f64;
        if (delta / temp).exp() > rng.next_float() {
            anchor = refined;
            accepted += 1;
        }
        temp *= cooling;
    }

    trace!(accepted, points = anchor.points(), "anneal run finished");
    anchor
}
