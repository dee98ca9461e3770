//! Stability module - temporal smoothing and output debounce
//!
//! Re-exports only. All logic in submodules.

mod aggregator;
mod transmission_gate;
mod vote;

pub use aggregator::TemporalAggregator;
pub use transmission_gate::{TransmissionGate, GATE_WINDOW};
pub use vote::majority_vote;
