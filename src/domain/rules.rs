use std::fmt;

use super::Topology;

/// Trait for declarative cellular automaton rules.
/// Implemented by every family the rule-string parser understands.
pub trait Transition: fmt::Debug + Send + Sync {
    /// Name of the rule family
    fn name(&self) -> &'static str;

    /// Neighborhood the rule is defined over
    fn neighborhood(&self) -> (Topology, usize);

    /// Compute the next cell state from the current one and the ordered
    /// neighbor values
    fn evolve(&self, current: u8, neighbors: &[u8]) -> u8;
}

/// Totalistic two-state rule (S/B or B/S notation).
/// Neighbor values are summed, so multi-state inputs count by value.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LifeRule {
    pub survival: Vec<usize>,
    pub birth: Vec<usize>,
    pub topology: Topology,
    pub range: usize,
}

impl Transition for LifeRule {
    fn name(&self) -> &'static str {
        "life"
    }

    fn neighborhood(&self) -> (Topology, usize) {
        (self.topology, self.range)
    }

    fn evolve(&self, current: u8, neighbors: &[u8]) -> u8 {
        let sum: usize = neighbors.iter().map(|&n| n as usize).sum();
        match current {
            0 if self.birth.contains(&sum) => 1,
            1 if self.survival.contains(&sum) => 1,
            _ => 0,
        }
    }
}

/// Generations rule (S/B/C): dying cells age through `states - 2`
/// intermediate values before becoming dead.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GenerationsRule {
    pub survival: Vec<usize>,
    pub birth: Vec<usize>,
    pub states: u8,
    pub topology: Topology,
    pub range: usize,
}

impl Transition for GenerationsRule {
    fn name(&self) -> &'static str {
        "generations"
    }

    fn neighborhood(&self) -> (Topology, usize) {
        (self.topology, self.range)
    }

    fn evolve(&self, current: u8, neighbors: &[u8]) -> u8 {
        let alive = neighbors.iter().filter(|&&n| n == 1).count();
        match current {
            0 if self.birth.contains(&alive) => 1,
            0 => 0,
            1 if self.survival.contains(&alive) => 1,
            _ => ((current as u16 + 1) % self.states as u16) as u8,
        }
    }
}

/// Cyclic rule (R/T/C/N): a cell advances to the next state when at least
/// `threshold` neighbors already hold it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CyclicRule {
    pub threshold: usize,
    pub states: u8,
    /// Greenberg-Hastings model: excited cells always advance
    pub greenberg_hastings: bool,
    pub topology: Topology,
    pub range: usize,
}

impl Transition for CyclicRule {
    fn name(&self) -> &'static str {
        "cyclic"
    }

    fn neighborhood(&self) -> (Topology, usize) {
        (self.topology, self.range)
    }

    fn evolve(&self, current: u8, neighbors: &[u8]) -> u8 {
        let next = ((current as u16 + 1) % self.states as u16) as u8;
        let ready = neighbors.iter().filter(|&&n| n == next).count();
        if ready >= self.threshold || (self.greenberg_hastings && current != 0) {
            next
        } else {
            current
        }
    }
}

/// Elementary one-dimensional rule (Wolfram code 0-255).
/// Expects the canonical range-1 neighbor order: left, then right.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WolframRule {
    pub code: u8,
}

impl Transition for WolframRule {
    fn name(&self) -> &'static str {
        "wolfram"
    }

    fn neighborhood(&self) -> (Topology, usize) {
        (Topology::Moore, 1)
    }

    fn evolve(&self, current: u8, neighbors: &[u8]) -> u8 {
        let bit = |v: Option<&u8>| (v.copied().unwrap_or(0) != 0) as u8;
        let index = bit(neighbors.first()) << 2 | ((current != 0) as u8) << 1 | bit(neighbors.get(1));
        (self.code >> index) & 1
    }
}

/// Conway's Game of Life (B3/S23)
pub fn conway() -> LifeRule {
    LifeRule {
        survival: vec![2, 3],
        birth: vec![3],
        topology: Topology::Moore,
        range: 1,
    }
}

/// HighLife (B36/S23), known for its replicators
pub fn highlife() -> LifeRule {
    LifeRule {
        birth: vec![3, 6],
        ..conway()
    }
}

/// Seeds (B2/S): every live cell dies each generation
pub fn seeds() -> LifeRule {
    LifeRule {
        survival: vec![],
        birth: vec![2],
        topology: Topology::Moore,
        range: 1,
    }
}

/// Day & Night (B3678/S34678), symmetric under inversion
pub fn day_and_night() -> LifeRule {
    LifeRule {
        survival: vec![3, 4, 6, 7, 8],
        birth: vec![3, 6, 7, 8],
        topology: Topology::Moore,
        range: 1,
    }
}

/// Get all preset rules with their rule strings
pub fn all_rules() -> Vec<(&'static str, Box<dyn Transition>)> {
    vec![
        ("B3/S23", Box::new(conway()) as Box<dyn Transition>),
        ("B36/S23", Box::new(highlife())),
        ("B2/S", Box::new(seeds())),
        ("B3678/S34678", Box::new(day_and_night())),
    ]
}
