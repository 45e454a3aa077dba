//! Error types for the automaton engine.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("the rule string {rule:?} could not be parsed")]
    RuleParse { rule: String },

    #[error("invalid rule, neither a rule string nor a function: {0}")]
    InvalidRule(String),

    #[error("no rule has been set")]
    RuleNotSet,

    #[error("configuration describes a {found}D grid, expected {expected}D")]
    DimensionMismatch { expected: usize, found: usize },

    #[error("configuration error: {0}")]
    Config(#[from] serde_json::Error),
}
