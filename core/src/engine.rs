//! Monte Carlo driver.
//!
//! Each replication is one call to simulate() followed by aggregate(),
//! using the replication's own RNG stream from the RngBank.
//!
//! RULES:
//!   - The ballot table is borrowed read-only by every replication.
//!   - Replications share no mutable state; a generator is never shared.
//!   - Parameters are validated before the first random draw.
//!   - Any replication failure aborts the whole run. There are no
//!     partial results.

use crate::{
    aggregator::aggregate,
    ballot::BallotTable,
    error::{SimError, SimResult},
    rng::RngBank,
    simulator::VoteShareSimulator,
    types::{Electors, ReplicationIndex},
};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReplicationResult {
    pub index:          ReplicationIndex,
    pub electors_won:   Electors,
    pub national_error: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationReport {
    pub variant:            String,
    pub seed:               u64,
    pub replications:       u64,
    pub total_electors:     Electors,
    pub majority_threshold: Electors,
    pub wins:               u64,
    pub win_probability:    f64,
    pub results:            Vec<ReplicationResult>,
}

impl SimulationReport {
    pub fn electors_won(&self) -> Vec<Electors> {
        self.results.iter().map(|r| r.electors_won).collect()
    }

    pub fn national_errors(&self) -> Vec<f64> {
        self.results.iter().filter_map(|r| r.national_error).collect()
    }
}

/// Count replications reaching `threshold` electors.
pub fn count_wins(results: &[ReplicationResult], threshold: Electors) -> u64 {
    results.iter().filter(|r| r.electors_won >= threshold).count() as u64
}

/// Empirical win frequency. Empty input yields 0.
pub fn win_probability(results: &[ReplicationResult], threshold: Electors) -> f64 {
    if results.is_empty() {
        return 0.0;
    }
    count_wins(results, threshold) as f64 / results.len() as f64
}

pub struct MonteCarloEngine {
    rng_bank: RngBank,
    parallel: bool,
}

impl MonteCarloEngine {
    pub fn new(seed: u64) -> Self {
        Self {
            rng_bank: RngBank::new(seed),
            parallel: false,
        }
    }

    /// Fan replications out across the rayon pool. Results are identical
    /// to a sequential run with the same seed.
    pub fn parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    pub fn seed(&self) -> u64 {
        self.rng_bank.master_seed()
    }

    /// Run one replication: simulate, then aggregate.
    pub fn replicate(
        &self,
        states: &BallotTable,
        simulator: &dyn VoteShareSimulator,
        index: ReplicationIndex,
    ) -> SimResult<ReplicationResult> {
        let mut rng = self.rng_bank.for_replication(index);
        let run = simulator.simulate(states, &mut rng)?;
        let electors_won = aggregate(&run.outcomes);

        log::debug!(
            "replication={index} variant={} electors={electors_won} national_error={:?}",
            simulator.name(),
            run.national_error
        );

        Ok(ReplicationResult {
            index,
            electors_won,
            national_error: run.national_error,
        })
    }

    /// Run `replications` independent replications against the
    /// threshold derived from the table.
    pub fn run(
        &self,
        states: &BallotTable,
        simulator: &dyn VoteShareSimulator,
        replications: u64,
    ) -> SimResult<SimulationReport> {
        self.run_with_threshold(states, simulator, replications, states.majority_threshold())
    }

    pub fn run_with_threshold(
        &self,
        states: &BallotTable,
        simulator: &dyn VoteShareSimulator,
        replications: u64,
        majority_threshold: Electors,
    ) -> SimResult<SimulationReport> {
        if replications == 0 {
            return Err(SimError::invalid("replications", "must be at least 1"));
        }
        let n = usize::try_from(replications)
            .map_err(|_| SimError::invalid("replications", format!("{replications} exceeds usize")))?;

        log::info!(
            "Monte Carlo start: variant={} replications={replications} threshold={majority_threshold} parallel={}",
            simulator.name(),
            self.parallel
        );

        let results: Vec<ReplicationResult> = if self.parallel {
            (0..n)
                .into_par_iter()
                .map(|i| self.replicate(states, simulator, i as ReplicationIndex))
                .collect::<SimResult<Vec<_>>>()?
        } else {
            (0..n)
                .map(|i| self.replicate(states, simulator, i as ReplicationIndex))
                .collect::<SimResult<Vec<_>>>()?
        };

        let wins = count_wins(&results, majority_threshold);
        let probability = win_probability(&results, majority_threshold);

        log::info!(
            "Monte Carlo done: variant={} wins={wins}/{replications} p={probability:.4}",
            simulator.name()
        );

        Ok(SimulationReport {
            variant: simulator.name().to_string(),
            seed: self.seed(),
            replications,
            total_electors: states.total_electors(),
            majority_threshold,
            wins,
            win_probability: probability,
            results,
        })
    }

    /// Probability that candidate A reaches the table's majority threshold.
    pub fn estimate_win_probability(
        &self,
        states: &BallotTable,
        simulator: &dyn VoteShareSimulator,
        replications: u64,
    ) -> SimResult<f64> {
        Ok(self.run(states, simulator, replications)?.win_probability)
    }

    pub fn estimate_win_probability_with_threshold(
        &self,
        states: &BallotTable,
        simulator: &dyn VoteShareSimulator,
        replications: u64,
        majority_threshold: Electors,
    ) -> SimResult<f64> {
        Ok(self
            .run_with_threshold(states, simulator, replications, majority_threshold)?
            .win_probability)
    }
}
