#![deny(clippy::pedantic, unsafe_code)]
#![allow(clippy::module_name_repetitions)]

//! Rate-limited batch hash analysis
//!
//! [`HashAnalyzer::analyze`] fans a list of hashes out over a fixed number of
//! lanes. Each lane claims one hash at a time from a shared queue, serves it
//! from the [`History`] cache when possible, otherwise asks the provider, and
//! then waits out the rest of its quota cycle before claiming the next one.
//! Results come back as an unordered [`AnalysisStream`] the caller can stop at
//! any time.

mod batch;
mod classify;
mod history;
mod routine;
mod scheduler;
mod settings;

pub use batch::{BatchHandle, BatchSlot, BatchTally};
pub use classify::classify;
pub use history::History;
pub use routine::{Resolution, ResolutionSource};
pub use scheduler::{AnalysisStream, HashAnalyzer};
pub use settings::AnalyzerSettings;
