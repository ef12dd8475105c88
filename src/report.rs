use indicatif::ProgressBar;
use std::fmt;
use std::io::Write;

use crate::state::Outcome;

// The running result of an estimation
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Estimate {
    pub trials: u32,
    pub hits: u32,       // trials that reached the target
    pub max_points: u32, // best score over all trials
    pub baseline: f64,   // likelihood percentage of a random board
}

impl fmt::Display for Estimate {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "Iter {}, Maximum: {}, Solvability likelihood: {:.2} %, lift vs random board {:.2}",
            self.trials,
            self.max_points,
            self.likelihood(),
            self.lift()
        )
    }
}

impl Estimate {
    pub fn new(baseline: f64) -> Self {
        Self {
            trials: 0,
            hits: 0,
            max_points: 0,
            baseline,
        }
    }

    // Percentage of trials that reached the target
    pub fn likelihood(&self) -> f64 {
        if self.trials == 0 {
            return 0.0;
        }
        100.0 * self.hits as f64 / self.trials as f64
    }

    pub fn lift(&self) -> f64 {
        self.likelihood() / self.baseline
    }

    pub fn record(&mut self, points: u32, target: u32) {
        self.trials += 1;
        if points >= target {
            self.hits += 1;
        }
        self.max_points = self.max_points.max(points);
    }
}

// Receives results as the search finds them
pub trait Report {
    // A new best line that reaches the target
    fn on_solution(&mut self, _outcome: &Outcome) {}

    // After every trial
    fn on_trial(&mut self, _estimate: &Estimate) {}

    // After every anneal step, with the trial's best score so far
    fn on_step(&mut self, _best_points: u32) {}
}

pub struct Quiet;

impl Report for Quiet {}

// Solution traces above a progress line that is rewritten after every trial.
// When the bar can't draw (not a terminal, or hidden) everything goes to `out`
// line by line instead.
pub struct Terminal<W: Write> {
    bar: ProgressBar,
    out: W,
    quiet: bool,
}

impl<W: Write> Terminal<W> {
    pub fn new(bar: ProgressBar, out: W, quiet: bool) -> Self {
        Self { bar, out, quiet }
    }

    pub fn bar(&self) -> &ProgressBar {
        &self.bar
    }

    fn emit(&mut self, text: String) {
        if self.bar.is_hidden() {
            // Reporting is best effort, a closed pipe shouldn't stop the search
            let _ = writeln!(self.out, "{}", text);
        } else {
            self.bar.println(text);
        }
    }
}

impl<W: Write> Report for Terminal<W> {
    fn on_solution(&mut self, outcome: &Outcome) {
        if !self.quiet {
            self.emit(format!("\n{}", outcome));
        }
    }

    fn on_trial(&mut self, estimate: &Estimate) {
        self.bar.inc(1);
        if self.bar.is_hidden() {
            if !self.quiet {
                self.emit(estimate.to_string());
            }
        } else {
            self.bar.set_message(estimate.to_string());
        }
    }
}
