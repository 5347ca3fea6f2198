//! State Ballot Table: static per-state reference data.
//!
//! Loaded once before the Monte Carlo loop begins and never mutated
//! afterwards. Every replication borrows the same table.

use crate::{
    error::{SimError, SimResult},
    types::{Electors, StateId, MAJORITY_SHARE},
};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StateRecord {
    pub state_id:       StateId,
    pub electors:       Electors,
    /// Candidate A's polling percentage on the eve of the election.
    pub baseline_share: f64,
}

/// One row as it appears in the ballot file, before validation.
/// Electors are read signed so a negative count is reported as malformed
/// input rather than a parse failure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BallotRow {
    pub state:          String,
    pub electors:       i64,
    pub baseline_share: f64,
}

#[derive(Debug, Clone, Deserialize)]
struct BallotFile {
    states: Vec<BallotRow>,
}

/// Immutable, ordered collection of validated state records.
#[derive(Debug, Clone, PartialEq)]
pub struct BallotTable {
    records: Vec<StateRecord>,
    total_electors: Electors,
}

impl BallotTable {
    /// Load and validate a ballot file (`{"states": [...]}`).
    pub fn load(path: &str) -> SimResult<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("Cannot read {path}: {e}"))?;
        let table = Self::from_json(&content)?;
        log::info!(
            "Loaded ballot table from {path}: {} states, {} electors",
            table.len(),
            table.total_electors()
        );
        Ok(table)
    }

    pub fn from_json(content: &str) -> SimResult<Self> {
        let file: BallotFile = serde_json::from_str(content)?;
        Self::from_rows(file.states)
    }

    /// Validate raw rows. Fails on the first offending row.
    pub fn from_rows(rows: Vec<BallotRow>) -> SimResult<Self> {
        if rows.is_empty() {
            return Err(SimError::malformed(0, "ballot table has no states"));
        }

        let mut seen: HashSet<String> = HashSet::with_capacity(rows.len());
        let mut records = Vec::with_capacity(rows.len());
        let mut total: u64 = 0;

        for (i, row) in rows.into_iter().enumerate() {
            let line = i + 1;
            let id = row.state.trim().to_string();
            if id.is_empty() {
                return Err(SimError::malformed(line, "empty state identifier"));
            }
            if row.electors <= 0 {
                return Err(SimError::malformed(
                    line,
                    format!("state {id} has non-positive elector count {}", row.electors),
                ));
            }
            let electors = Electors::try_from(row.electors).map_err(|_| {
                SimError::malformed(line, format!("state {id} elector count {} too large", row.electors))
            })?;
            if !row.baseline_share.is_finite() || !(0.0..=100.0).contains(&row.baseline_share) {
                return Err(SimError::malformed(
                    line,
                    format!("state {id} baseline share {} outside [0, 100]", row.baseline_share),
                ));
            }
            if !seen.insert(id.clone()) {
                return Err(SimError::malformed(line, format!("duplicate state identifier {id}")));
            }
            if row.baseline_share == MAJORITY_SHARE {
                log::warn!("state {id} baseline share is exactly {MAJORITY_SHARE}; counts as a loss at baseline");
            }

            total += u64::from(electors);
            records.push(StateRecord {
                state_id: id,
                electors,
                baseline_share: row.baseline_share,
            });
        }

        let total_electors = Electors::try_from(total)
            .map_err(|_| SimError::malformed(0, format!("total electors {total} too large")))?;

        Ok(Self { records, total_electors })
    }

    /// Build from already-typed records, applying the same validation.
    pub fn from_records(records: Vec<StateRecord>) -> SimResult<Self> {
        Self::from_rows(
            records
                .into_iter()
                .map(|r| BallotRow {
                    state: r.state_id,
                    electors: i64::from(r.electors),
                    baseline_share: r.baseline_share,
                })
                .collect(),
        )
    }

    pub fn records(&self) -> &[StateRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, state_id: &str) -> Option<&StateRecord> {
        self.records.iter().find(|r| r.state_id == state_id)
    }

    pub fn total_electors(&self) -> Electors {
        self.total_electors
    }

    /// Minimum elector total that wins the contest: floor(total / 2) + 1.
    pub fn majority_threshold(&self) -> Electors {
        self.total_electors / 2 + 1
    }

    /// Electors candidate A wins if every state lands exactly on its baseline.
    pub fn baseline_electors(&self) -> Electors {
        self.records
            .iter()
            .filter(|r| r.baseline_share > MAJORITY_SHARE)
            .map(|r| r.electors)
            .sum()
    }

    /// Whether candidate A wins the contest on baseline polling alone.
    pub fn baseline_winner_is_candidate(&self) -> bool {
        self.baseline_electors() >= self.majority_threshold()
    }
}
