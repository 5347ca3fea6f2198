use crate::error::{SimError, SimResult};
use serde::{Deserialize, Serialize};

pub const DEFAULT_BALLOT_PATH: &str = "data/ballot/states_2016.json";

/// Run configuration. Every field has a default, so a config file only
/// needs to name what it overrides.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    pub seed:                u64,
    pub replications:        u64,
    pub parallel:            bool,
    /// Per-state standard deviation for the independent variant.
    pub state_sigma:         f64,
    /// Standard deviation of the shared national error.
    pub national_sigma:      f64,
    pub heavy_tail_scale:    f64,
    pub heavy_tail_df:       f64,
    pub ballot_path:         String,
    pub histogram_bin_width: u32,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed:                42,
            replications:        1000,
            parallel:            false,
            state_sigma:         2.0,
            national_sigma:      2.0,
            heavy_tail_scale:    2.0,
            heavy_tail_df:       2.0,
            ballot_path:         DEFAULT_BALLOT_PATH.into(),
            histogram_bin_width: 10,
        }
    }
}

impl SimConfig {
    /// Load from a JSON config file and validate it.
    /// In tests, use SimConfig::default_test().
    pub fn load(path: &str) -> SimResult<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("Cannot read {path}: {e}"))?;
        let config: SimConfig = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Config with a small replication count for unit tests.
    pub fn default_test() -> Self {
        Self {
            seed: 0xDEAD_BEEF,
            replications: 200,
            ..Self::default()
        }
    }

    /// Reject parameters that would make the run meaningless.
    /// Zero sigma is allowed: it degenerates to the baseline.
    pub fn validate(&self) -> SimResult<()> {
        if self.replications == 0 {
            return Err(SimError::invalid("replications", "must be at least 1"));
        }
        for (name, sigma) in [("state_sigma", self.state_sigma), ("national_sigma", self.national_sigma)] {
            if !(sigma.is_finite() && sigma >= 0.0) {
                return Err(SimError::invalid(name, format!("{sigma} must be finite and non-negative")));
            }
        }
        for (name, value) in [("heavy_tail_scale", self.heavy_tail_scale), ("heavy_tail_df", self.heavy_tail_df)] {
            if !(value.is_finite() && value > 0.0) {
                return Err(SimError::invalid(name, format!("{value} must be finite and positive")));
            }
        }
        if self.histogram_bin_width == 0 {
            return Err(SimError::invalid("histogram_bin_width", "must be at least 1"));
        }
        Ok(())
    }
}
