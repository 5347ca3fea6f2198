//! electoral-core: Monte Carlo electoral-college simulation.
//!
//! Data flow (linear, no feedback):
//!   BallotTable -> VoteShareSimulator -> aggregate() -> MonteCarloEngine
//!
//! The ballot table is loaded once and shared read-only by every
//! replication. All randomness lives in ReplicationRng streams handed
//! out by the engine's RngBank, one stream per replication.

pub mod aggregator;
pub mod ballot;
pub mod config;
pub mod engine;
pub mod error;
pub mod outcome;
pub mod rng;
pub mod simulator;
pub mod study;
pub mod summary;
pub mod types;
