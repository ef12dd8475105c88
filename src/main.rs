use clap::Parser;
use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use std::fs::File;
use std::io::{self, BufReader};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

use kohinoor::config::SearchConfig;
use kohinoor::deck::Board;
use kohinoor::input::read_cards;
use kohinoor::report::Terminal;
use kohinoor::trial::estimate;

#[derive(Debug, Parser)]
#[command(
    name = "kohinoor",
    about = "Estimates how likely a Splendor board is to reach the target score"
)]
struct Args {
    /// File of known cards, one "costs color value" line each. Defaults to stdin.
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Randomized deals to try
    #[arg(long)]
    trials: Option<u32>,

    /// Anneal runs per deal
    #[arg(long)]
    restarts: Option<u32>,

    /// Cooling steps per anneal run
    #[arg(long)]
    steps: Option<u32>,

    #[arg(long)]
    start_temp: Option<f64>,

    #[arg(long)]
    final_temp: Option<f64>,

    /// Points that count as a win
    #[arg(long)]
    target: Option<u32>,

    /// Unknown cards dealt into the backlogs of tiers 1 and 2
    #[arg(long)]
    backlog_size: Option<usize>,

    #[arg(long)]
    setup_seed: Option<u32>,

    #[arg(long)]
    anneal_seed: Option<u32>,

    /// Draw both seeds at random
    #[arg(long, conflicts_with_all = ["setup_seed", "anneal_seed"])]
    random_seeds: bool,

    /// Win percentage of a random board, for the lift figure
    #[arg(long)]
    baseline: Option<f64>,

    /// Only print the final estimate
    #[arg(short, long)]
    quiet: bool,
}

impl Args {
    fn config(&self) -> SearchConfig {
        let mut config = SearchConfig::default();
        if let Some(v) = self.trials {
            config.trials = v;
        }
        if let Some(v) = self.restarts {
            config.restarts = v;
        }
        if let Some(v) = self.steps {
            config.steps = v;
        }
        if let Some(v) = self.start_temp {
            config.start_temp = v;
        }
        if let Some(v) = self.final_temp {
            config.final_temp = v;
        }
        if let Some(v) = self.target {
            config.target = v;
        }
        if let Some(v) = self.backlog_size {
            config.backlog_size = v;
        }
        if let Some(v) = self.setup_seed {
            config.setup_seed = v;
        }
        if let Some(v) = self.anneal_seed {
            config.anneal_seed = v;
        }
        if self.random_seeds {
            config.setup_seed = rand::random();
            config.anneal_seed = rand::random();
        }
        if let Some(v) = self.baseline {
            config.baseline = v;
        }
        config
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();
    let config = args.config();
    config.validate()?;

    let cards = match &args.input {
        Some(path) => read_cards(BufReader::new(File::open(path)?))?,
        None => read_cards(io::stdin().lock())?,
    };
    let board = Board::from_cards(cards)?;
    info!(
        setup_seed = config.setup_seed,
        anneal_seed = config.anneal_seed,
        "board:\n{}",
        board
    );

    let bar = if args.quiet {
        ProgressBar::hidden()
    } else {
        ProgressBar::with_draw_target(Some(config.trials as u64), ProgressDrawTarget::stdout())
    };
    bar.set_style(ProgressStyle::with_template("{msg}")?);
    // A hidden bar has already written every progress line to stdout
    let lines_written = bar.is_hidden() && !args.quiet;
    let mut terminal = Terminal::new(bar, io::stdout(), args.quiet);

    let result = estimate(&board, &config, &mut terminal)?;
    terminal.bar().finish_and_clear();
    if !lines_written {
        println!("{}", result);
    }
    Ok(())
}
