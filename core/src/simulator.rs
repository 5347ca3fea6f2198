//! Vote-share simulators: three interchangeable error models.
//!
//! RULE: Every variant centres each state on its baseline share and
//! produces exactly one simulated share per state per call. Variants
//! never touch the ballot table and draw only from the RNG they are
//! handed.
//!
//!   IndependentStateError     one N(0, sigma) draw per state
//!   NationalError             one N(0, sigma) draw shared by all states
//!   HeavyTailedNationalError  one scale * t(df) draw shared by all states

use crate::{
    ballot::BallotTable,
    config::SimConfig,
    error::{SimError, SimResult},
    outcome::{SimulatedOutcome, SimulatedRun},
    rng::ReplicationRng,
};
use serde::{Deserialize, Serialize};

/// The contract every error model must fulfill.
pub trait VoteShareSimulator: Send + Sync {
    /// Unique stable name for this variant.
    fn name(&self) -> &'static str;

    /// Produce one simulated outcome for every state in `states`.
    fn simulate(&self, states: &BallotTable, rng: &mut ReplicationRng) -> SimResult<SimulatedRun>;
}

fn check_sigma(name: &'static str, sigma: f64) -> SimResult<()> {
    if sigma.is_finite() && sigma >= 0.0 {
        Ok(())
    } else {
        Err(SimError::invalid(name, format!("{sigma} must be finite and non-negative")))
    }
}

fn check_positive(name: &'static str, value: f64) -> SimResult<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(SimError::invalid(name, format!("{value} must be finite and positive")))
    }
}

/// Apply one shared shift to every state's baseline.
fn shift_all(states: &BallotTable, error: f64) -> Vec<SimulatedOutcome> {
    states
        .records()
        .iter()
        .map(|r| SimulatedOutcome {
            state_id:        r.state_id.clone(),
            electors:        r.electors,
            simulated_share: r.baseline_share + error,
        })
        .collect()
}

/// Uncorrelated state-level polling error.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IndependentStateError {
    sigma: f64,
}

impl IndependentStateError {
    pub fn new(sigma: f64) -> SimResult<Self> {
        check_sigma("sigma", sigma)?;
        Ok(Self { sigma })
    }

    pub fn sigma(&self) -> f64 {
        self.sigma
    }
}

impl VoteShareSimulator for IndependentStateError {
    fn name(&self) -> &'static str { "independent" }

    fn simulate(&self, states: &BallotTable, rng: &mut ReplicationRng) -> SimResult<SimulatedRun> {
        let outcomes = states
            .records()
            .iter()
            .map(|r| {
                Ok(SimulatedOutcome {
                    state_id:        r.state_id.clone(),
                    electors:        r.electors,
                    simulated_share: rng.normal(r.baseline_share, self.sigma)?,
                })
            })
            .collect::<SimResult<Vec<_>>>()?;
        Ok(SimulatedRun { outcomes, national_error: None })
    }
}

/// A single systematic nationwide polling miss, normally distributed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NationalError {
    sigma: f64,
}

impl NationalError {
    pub fn new(sigma: f64) -> SimResult<Self> {
        check_sigma("sigma", sigma)?;
        Ok(Self { sigma })
    }

    pub fn sigma(&self) -> f64 {
        self.sigma
    }
}

impl VoteShareSimulator for NationalError {
    fn name(&self) -> &'static str { "national" }

    fn simulate(&self, states: &BallotTable, rng: &mut ReplicationRng) -> SimResult<SimulatedRun> {
        let error = rng.normal(0.0, self.sigma)?;
        Ok(SimulatedRun {
            outcomes:       shift_all(states, error),
            national_error: Some(error),
        })
    }
}

/// A single nationwide polling miss drawn as `scale * t(df)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HeavyTailedNationalError {
    scale: f64,
    df:    f64,
}

impl HeavyTailedNationalError {
    pub fn new(scale: f64, df: f64) -> SimResult<Self> {
        check_positive("scale", scale)?;
        check_positive("df", df)?;
        Ok(Self { scale, df })
    }

    pub fn scale(&self) -> f64 {
        self.scale
    }

    pub fn df(&self) -> f64 {
        self.df
    }
}

impl VoteShareSimulator for HeavyTailedNationalError {
    fn name(&self) -> &'static str { "heavy_tailed" }

    fn simulate(&self, states: &BallotTable, rng: &mut ReplicationRng) -> SimResult<SimulatedRun> {
        let error = self.scale * rng.student_t(self.df)?;
        Ok(SimulatedRun {
            outcomes:       shift_all(states, error),
            national_error: Some(error),
        })
    }
}

/// Selector for the three error models.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorModel {
    Independent,
    National,
    HeavyTailed,
}

impl ErrorModel {
    /// All variants in study order.
    pub const ALL: [ErrorModel; 3] = [Self::Independent, Self::National, Self::HeavyTailed];

    pub fn name(&self) -> &'static str {
        match self {
            Self::Independent => "independent",
            Self::National    => "national",
            Self::HeavyTailed => "heavy_tailed",
        }
    }

    pub fn parse(s: &str) -> SimResult<Self> {
        match s {
            "independent"  => Ok(Self::Independent),
            "national"     => Ok(Self::National),
            "heavy_tailed" => Ok(Self::HeavyTailed),
            other => Err(SimError::invalid(
                "variant",
                format!("unknown error model '{other}' (expected independent, national or heavy_tailed)"),
            )),
        }
    }

    /// Construct the configured simulator for this variant.
    pub fn build(&self, config: &SimConfig) -> SimResult<Box<dyn VoteShareSimulator>> {
        Ok(match self {
            Self::Independent => Box::new(IndependentStateError::new(config.state_sigma)?),
            Self::National    => Box::new(NationalError::new(config.national_sigma)?),
            Self::HeavyTailed => Box::new(HeavyTailedNationalError::new(
                config.heavy_tail_scale,
                config.heavy_tail_df,
            )?),
        })
    }
}
