//! Per-replication simulated results. Created by a simulator, consumed by
//! the aggregator, then dropped.

use crate::types::{Electors, StateId};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulatedOutcome {
    pub state_id:        StateId,
    pub electors:        Electors,
    pub simulated_share: f64,
}

/// One nationwide simulated outcome.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulatedRun {
    pub outcomes:       Vec<SimulatedOutcome>,
    /// The shared error term, for variants that draw one per replication.
    pub national_error: Option<f64>,
}
