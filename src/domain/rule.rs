use std::fmt;
use std::sync::Arc;

use super::rules::{CyclicRule, GenerationsRule, LifeRule, Transition, WolframRule};
use super::{RandomSource, Topology, rulestring};
use crate::error::{Error, Result};

/// Signature of a caller-supplied transition function.
pub type RuleFn = dyn Fn(u8, &[u8], &mut dyn RandomSource) -> u8 + Send + Sync;

/// A rule produced from a rule string or a declarative preset.
#[derive(Clone, Debug)]
pub struct ParsedRule {
    source: String,
    transition: Arc<dyn Transition>,
}

impl ParsedRule {
    /// Parse `source` once; failure is reported, never defaulted.
    pub fn parse(source: &str) -> Result<Self> {
        let transition = rulestring::parse(source).ok_or_else(|| Error::RuleParse {
            rule: source.to_owned(),
        })?;
        Ok(Self {
            source: source.to_owned(),
            transition: Arc::from(transition),
        })
    }

    /// Arm a transition built in code, named after its family
    pub fn from_transition(transition: Arc<dyn Transition>) -> Self {
        Self {
            source: transition.name().to_owned(),
            transition,
        }
    }

    /// The rule string this rule was parsed from, or the family name
    pub fn source(&self) -> &str {
        &self.source
    }

    /// The declarative transition evaluated for every cell
    pub fn transition(&self) -> &dyn Transition {
        self.transition.as_ref()
    }
}

/// A rule backed by an arbitrary closure.
#[derive(Clone)]
pub struct CustomRule {
    func: Arc<RuleFn>,
    topology: Topology,
    range: usize,
}

impl CustomRule {
    /// Wrap `func` with the default Moore range-1 neighborhood.
    pub fn new<F>(func: F) -> Self
    where
        F: Fn(u8, &[u8], &mut dyn RandomSource) -> u8 + Send + Sync + 'static,
    {
        Self {
            func: Arc::new(func),
            topology: Topology::Moore,
            range: 1,
        }
    }

    /// Override the neighborhood the closure is evaluated over
    pub fn with_neighborhood(mut self, topology: impl Into<Topology>, range: usize) -> Self {
        self.topology = topology.into();
        self.range = range.max(1);
        self
    }
}

impl fmt::Debug for CustomRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CustomRule")
            .field("topology", &self.topology)
            .field("range", &self.range)
            .finish_non_exhaustive()
    }
}

/// An armed transition rule.
#[derive(Debug)]
pub enum Rule {
    Parsed(ParsedRule),
    Custom(CustomRule),
}

impl Rule {
    /// Neighborhood this rule is evaluated over
    pub fn neighborhood(&self) -> (Topology, usize) {
        match self {
            Rule::Parsed(rule) => rule.transition.neighborhood(),
            Rule::Custom(rule) => (rule.topology, rule.range),
        }
    }

    /// Whether evaluation may draw from the random source
    pub fn uses_randomness(&self) -> bool {
        matches!(self, Rule::Custom(_))
    }

    /// Compute the next state of one cell
    #[inline]
    pub fn evaluate(&self, current: u8, neighbors: &[u8], rng: &mut dyn RandomSource) -> u8 {
        match self {
            Rule::Parsed(rule) => rule.transition.evolve(current, neighbors),
            Rule::Custom(rule) => (rule.func)(current, neighbors, rng),
        }
    }
}

/// What a caller may hand to `set_rule`: a rule string, a declarative
/// transition such as [`rules::conway`](super::rules::conway), or a closure rule.
#[derive(Clone, Debug)]
pub enum RuleSpec {
    Text(String),
    Transition(Arc<dyn Transition>),
    Custom(CustomRule),
}

impl RuleSpec {
    /// Turn the specification into an armed rule, parsing text exactly once.
    pub fn into_rule(self) -> Result<Rule> {
        match self {
            RuleSpec::Text(source) => ParsedRule::parse(&source).map(Rule::Parsed),
            RuleSpec::Transition(transition) => {
                Ok(Rule::Parsed(ParsedRule::from_transition(transition)))
            }
            RuleSpec::Custom(rule) => Ok(Rule::Custom(rule)),
        }
    }
}

impl From<&str> for RuleSpec {
    fn from(source: &str) -> Self {
        RuleSpec::Text(source.to_owned())
    }
}

impl From<String> for RuleSpec {
    fn from(source: String) -> Self {
        RuleSpec::Text(source)
    }
}

impl From<Box<dyn Transition>> for RuleSpec {
    fn from(transition: Box<dyn Transition>) -> Self {
        RuleSpec::Transition(Arc::from(transition))
    }
}

macro_rules! transition_spec {
    ($($family:ty),*) => {
        $(
            impl From<$family> for RuleSpec {
                fn from(rule: $family) -> Self {
                    RuleSpec::Transition(Arc::new(rule))
                }
            }
        )*
    };
}

transition_spec!(LifeRule, GenerationsRule, CyclicRule, WolframRule);

impl From<CustomRule> for RuleSpec {
    fn from(rule: CustomRule) -> Self {
        RuleSpec::Custom(rule)
    }
}
