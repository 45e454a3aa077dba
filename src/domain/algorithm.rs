//! Execution strategy for sweeps.
//!
//! Both strategies produce the same generation for any rule that does not
//! draw random numbers.

use serde::{Deserialize, Serialize};

/// How a sweep walks the grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Execution {
    /// One cell after another on the calling thread
    #[default]
    Serial,
    /// Cell chunks spread across the rayon thread pool. Custom rules draw
    /// from a per-chunk `StdRng` seeded from the automaton's random source
    /// rather than from the source itself.
    Parallel,
}

impl Execution {
    /// Get all available strategies
    pub fn all() -> Vec<Execution> {
        vec![Execution::Serial, Execution::Parallel]
    }

    /// Display name
    pub fn name(&self) -> &'static str {
        match self {
            Execution::Serial => "Serial",
            Execution::Parallel => "Parallel",
        }
    }

    /// Short description
    pub fn description(&self) -> &'static str {
        match self {
            Execution::Serial => "Single thread, shared random source",
            Execution::Parallel => "Rayon chunks, one seeded random stream per chunk",
        }
    }
}
