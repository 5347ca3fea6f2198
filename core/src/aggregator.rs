//! Winner-take-all elector aggregation.

use crate::{
    outcome::SimulatedOutcome,
    types::{Electors, MAJORITY_SHARE},
};

/// Sum the electors of every state candidate A carries outright.
///
/// A state counts only when its simulated share is strictly above 50;
/// a share of exactly 50 is a loss. Row order does not matter.
pub fn aggregate(outcomes: &[SimulatedOutcome]) -> Electors {
    outcomes
        .iter()
        .filter(|o| o.simulated_share > MAJORITY_SHARE)
        .map(|o| o.electors)
        .sum()
}
