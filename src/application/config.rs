//! Declarative description of a whole simulation.
//!
//! ```json
//! {
//!   "shape": [64, 64],
//!   "out_of_bound": "wrap",
//!   "rule": "B3/S23",
//!   "seed": 42,
//!   "distribution": [[0, 70], [1, 30]],
//!   "iterations": 100
//! }
//! ```

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::Automaton;
use crate::domain::{BoundaryPolicy, Execution, RngSource, RuleSpec};
use crate::error::{Error, Result};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AutomatonConfig {
    /// Grid extents, one per dimension
    pub shape: Vec<usize>,
    /// Initial value of every cell
    pub default_value: u8,
    /// Integer, `"wrap"` or `"clamp"`
    pub out_of_bound: BoundaryPolicy,
    /// Rule string. Kept as a raw value so that a non-string can be reported.
    pub rule: Option<Value>,
    /// Seed for a deterministic random source; OS entropy otherwise
    pub seed: Option<u64>,
    pub execution: Execution,
    /// Weighted initial values, applied after the default value
    pub distribution: Option<Vec<(Option<u8>, f64)>>,
    /// Sweeps performed by [`run`](Self::run)
    pub iterations: usize,
}

impl Default for AutomatonConfig {
    fn default() -> Self {
        Self {
            shape: Vec::new(),
            default_value: 0,
            out_of_bound: BoundaryPolicy::default(),
            rule: None,
            seed: None,
            execution: Execution::default(),
            distribution: None,
            iterations: 1,
        }
    }
}

impl AutomatonConfig {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// The configured rule, if any. Only strings name a rule.
    pub fn rule_spec(&self) -> Result<Option<RuleSpec>> {
        match &self.rule {
            None | Some(Value::Null) => Ok(None),
            Some(Value::String(source)) => Ok(Some(RuleSpec::from(source.as_str()))),
            Some(other) => Err(Error::InvalidRule(other.to_string())),
        }
    }

    /// Build a configured, filled and (when a rule is given) armed automaton.
    pub fn build<const D: usize>(&self) -> Result<Automaton<D>> {
        let dims = <[usize; D]>::try_from(self.shape.as_slice()).map_err(|_| {
            Error::DimensionMismatch {
                expected: D,
                found: self.shape.len(),
            }
        })?;

        let mut automaton = Automaton::new(dims, self.default_value);
        automaton
            .set_out_of_bound_value(self.out_of_bound)
            .set_execution(self.execution);

        if let Some(seed) = self.seed {
            automaton.set_random_source(RngSource::seeded(seed));
        }
        if let Some(distribution) = &self.distribution {
            automaton.fill_with_distribution(distribution);
        }
        if let Some(rule) = self.rule_spec()? {
            automaton.set_rule(rule)?;
        }

        Ok(automaton)
    }

    /// Build the automaton and run the configured number of iterations.
    pub fn run<const D: usize>(&self) -> Result<Automaton<D>> {
        let mut automaton = self.build::<D>()?;
        automaton.iterate(self.iterations)?;
        Ok(automaton)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AutomatonConfig::from_json(r#"{ "shape": [3, 3] }"#).unwrap();
        assert_eq!(config.shape, vec![3, 3]);
        assert_eq!(config.out_of_bound, BoundaryPolicy::Fixed(0));
        assert_eq!(config.execution, Execution::Serial);
        assert_eq!(config.iterations, 1);
        assert!(config.rule_spec().unwrap().is_none());
    }

    #[test]
    fn test_run_rule_string() {
        let config = AutomatonConfig {
            shape: vec![3],
            rule: Some(Value::from("1/1V")),
            ..Default::default()
        };
        let mut automaton = config.build::<1>().unwrap();
        automaton.set([1], 1).iterate(1).unwrap();
        assert_eq!(automaton.cells(), &[1, 0, 1]);
    }

    #[test]
    fn test_full_json() {
        let json = r#"{
            "shape": [8, 8],
            "default_value": 0,
            "out_of_bound": "wrap",
            "rule": "B3/S23",
            "seed": 42,
            "execution": "parallel",
            "distribution": [[0, 70], [1, 30]],
            "iterations": 4
        }"#;
        let config = AutomatonConfig::from_json(json).unwrap();
        assert_eq!(config.out_of_bound, BoundaryPolicy::Wrap);
        assert_eq!(config.execution, Execution::Parallel);

        let first = config.run::<2>().unwrap();
        let second = config.run::<2>().unwrap();
        assert_eq!(first.generation(), 4);
        assert_eq!(first.cells(), second.cells());
    }

    #[test]
    fn test_null_distribution_entries() {
        let json = r#"{ "shape": [2, 2], "default_value": 3, "distribution": [[null, 100]] }"#;
        let automaton = AutomatonConfig::from_json(json).unwrap().build::<2>().unwrap();
        assert_eq!(automaton.cells(), &[3, 3, 3, 3]);
    }

    #[test]
    fn test_non_string_rule_is_invalid() {
        let config = AutomatonConfig::from_json(r#"{ "shape": [3], "rule": 23 }"#).unwrap();
        assert!(matches!(config.build::<1>(), Err(Error::InvalidRule(v)) if v == "23"));
    }

    #[test]
    fn test_unparseable_rule() {
        let config = AutomatonConfig::from_json(r#"{ "shape": [3], "rule": "xyz" }"#).unwrap();
        assert!(matches!(config.build::<1>(), Err(Error::RuleParse { .. })));
    }

    #[test]
    fn test_dimension_mismatch() {
        let config = AutomatonConfig::from_json(r#"{ "shape": [3, 3, 3] }"#).unwrap();
        assert!(matches!(
            config.build::<2>(),
            Err(Error::DimensionMismatch { expected: 2, found: 3 })
        ));
    }

    #[test]
    fn test_run_without_rule() {
        let config = AutomatonConfig::from_json(r#"{ "shape": [3] }"#).unwrap();
        assert!(matches!(config.run::<1>(), Err(Error::RuleNotSet)));
    }

    #[test]
    fn test_malformed_json() {
        assert!(matches!(
            AutomatonConfig::from_json("{ shape: }"),
            Err(Error::Config(_))
        ));
    }

    #[test]
    fn test_json_roundtrip() {
        let config = AutomatonConfig {
            shape: vec![4, 4],
            out_of_bound: BoundaryPolicy::Clamp,
            rule: Some(Value::from("23/3/8")),
            ..Default::default()
        };
        let back = AutomatonConfig::from_json(&config.to_json().unwrap()).unwrap();
        assert_eq!(back, config);
    }
}
