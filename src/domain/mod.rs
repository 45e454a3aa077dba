mod shape;
mod grid;
mod boundary;
mod neighborhood;
mod random;
mod rule;
mod algorithm;
pub mod geometry;
pub mod rules;
pub mod rulestring;
pub mod sampler;

pub use shape::Shape;
pub use grid::GridBuffer;
pub use boundary::BoundaryPolicy;
pub use neighborhood::{NeighborhoodTable, Topology};
pub use random::RandomSource;
pub use random::RngSource;
pub(crate) use random::draw_seed;
pub use rule::{CustomRule, ParsedRule, Rule, RuleFn, RuleSpec};
pub use rules::Transition;
pub use algorithm::Execution;
