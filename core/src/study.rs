//! The three-variant comparison study: same table, same seed, same
//! replication count, one report per error model.

use crate::{
    ballot::BallotTable,
    config::SimConfig,
    engine::{MonteCarloEngine, SimulationReport},
    error::SimResult,
    simulator::ErrorModel,
    summary::DistributionSummary,
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VariantReport {
    pub model:   ErrorModel,
    pub report:  SimulationReport,
    pub summary: DistributionSummary,
}

/// Run a single variant as configured.
pub fn run_variant(
    config: &SimConfig,
    states: &BallotTable,
    model: ErrorModel,
) -> SimResult<VariantReport> {
    config.validate()?;
    let simulator = model.build(config)?;
    let engine = MonteCarloEngine::new(config.seed).parallel(config.parallel);
    let report = engine.run(states, simulator.as_ref(), config.replications)?;
    let summary = DistributionSummary::from_results(&report.results, config.histogram_bin_width);
    Ok(VariantReport { model, report, summary })
}

/// Run every variant. All simulators are built before any replication
/// starts, so a bad parameter fails the study without drawing anything.
pub fn run_study(config: &SimConfig, states: &BallotTable) -> SimResult<Vec<VariantReport>> {
    config.validate()?;
    for model in ErrorModel::ALL {
        model.build(config)?;
    }
    ErrorModel::ALL
        .into_iter()
        .map(|model| run_variant(config, states, model))
        .collect()
}
