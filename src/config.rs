use crate::deck::BACKLOG_CAPACITY;
use crate::error::Error;

// Knobs for a whole estimation run
#[derive(Clone, Debug, PartialEq)]
pub struct SearchConfig {
    pub trials: u32,         // randomized deals to try
    pub restarts: u32,       // anneal runs per deal
    pub steps: u32,          // cooling steps per anneal run
    pub start_temp: f64,     // initial temperature
    pub final_temp: f64,     // a run stops once it cools to this
    pub target: u32,         // points that count as a win
    pub backlog_size: usize, // unknown cards dealt into tiers 1 and 2
    pub setup_seed: u32,     // seeds the dealing generator
    pub anneal_seed: u32,    // seeds the search generator
    pub baseline: f64,       // win percentage of a random board
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            trials: 50,
            restarts: 10,
            steps: 200_000,
            start_temp: 2.0,
            final_temp: 0.1,
            target: 31,
            backlog_size: 25,
            setup_seed: 23_590_421,
            anneal_seed: 549_120_939,
            baseline: 3.7,
        }
    }
}

impl SearchConfig {
    pub fn validate(&self) -> Result<(), Error> {
        let fail = |msg: String| Err(Error::InvalidConfig(msg));
        if self.trials == 0 || self.restarts == 0 || self.steps == 0 {
            return fail("trials, restarts and steps must be positive".to_string());
        }
        if !(self.final_temp > 0.0) {
            return fail(format!("final temperature {} must be positive", self.final_temp));
        }
        if !(self.final_temp < self.start_temp) {
            return fail(format!(
                "final temperature {} must be below start temperature {}",
                self.final_temp, self.start_temp
            ));
        }
        if self.backlog_size > BACKLOG_CAPACITY {
            return fail(format!(
                "backlog size {} exceeds capacity {}",
                self.backlog_size, BACKLOG_CAPACITY
            ));
        }
        if !(self.baseline > 0.0) {
            return fail(format!("baseline {} must be positive", self.baseline));
        }
        Ok(())
    }

    // Per-step cooling ratio that takes start_temp to final_temp in `steps` steps
    pub fn cooling(&self) -> f64 {
        (self.final_temp / self.start_temp).powf(1.0 / self.steps as f64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let config = SearchConfig::default();
        assert!(config.validate().is_ok());
        let r = config.cooling();
        assert!(r < 1.0 && r > 0.99998);
    }

    #[test]
    fn cooling_reaches_floor() {
        let config = SearchConfig {
            steps: 1_000,
            ..SearchConfig::default()
        };
        let t = config.start_temp * config.cooling().powi(1_000);
        assert!((t - config.final_temp).abs() < 1e-9);
    }

    #[test]
    fn rejects_bad_values() {
        let bad = [
            SearchConfig {
                trials: 0,
                ..SearchConfig::default()
            },
            SearchConfig {
                final_temp: 3.0,
                ..SearchConfig::default()
            },
            SearchConfig {
                final_temp: 0.0,
                ..SearchConfig::default()
            },
            SearchConfig {
                backlog_size: BACKLOG_CAPACITY + 1,
                ..SearchConfig::default()
            },
        ];
        for config in bad {
            assert_matches!(config.validate(), Err(Error::InvalidConfig(_)));
        }
    }
}
