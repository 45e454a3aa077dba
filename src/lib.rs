// Domain layer - Grids, neighborhoods, rules
pub mod domain;

// Application layer - The automaton and its configuration
pub mod application;

pub mod error;

// Re-exports for convenience
pub use domain::{
    BoundaryPolicy, CustomRule, Execution, GridBuffer, NeighborhoodTable, ParsedRule,
    RandomSource, RngSource, Rule, RuleSpec, Shape, Topology, Transition,
};
pub use application::{Automaton, AutomatonConfig};
pub use error::{Error, Result};
