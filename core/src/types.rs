//! Shared primitive types used across the simulator.

/// A state (or district) identifier, e.g. "FL" or "DC".
pub type StateId = String;

/// An electoral-vote count.
pub type Electors = u32;

/// Zero-based replication index within one Monte Carlo run.
pub type ReplicationIndex = u64;

/// Share of the vote in percent. A strict majority is anything above this.
pub const MAJORITY_SHARE: f64 = 50.0;
