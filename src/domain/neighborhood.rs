use std::fmt;

use itertools::Itertools;
use log::{debug, warn};
use serde::{Deserialize, Serialize};

use super::geometry;

/// Named neighbor topologies understood by the geometry provider.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Topology {
    /// Chebyshev distance within range
    #[default]
    Moore,
    /// Manhattan distance within range
    VonNeumann,
    Axis,
    Corner,
    Edge,
    Face,
}

impl Topology {
    pub fn all() -> Vec<Topology> {
        vec![
            Topology::Moore,
            Topology::VonNeumann,
            Topology::Axis,
            Topology::Corner,
            Topology::Edge,
            Topology::Face,
        ]
    }

    pub fn name(&self) -> &'static str {
        match self {
            Topology::Moore => "moore",
            Topology::VonNeumann => "von-neumann",
            Topology::Axis => "axis",
            Topology::Corner => "corner",
            Topology::Edge => "edge",
            Topology::Face => "face",
        }
    }

    /// Look up a topology by name, falling back to Moore for unknown names.
    pub fn from_name(name: &str) -> Self {
        Self::all()
            .into_iter()
            .find(|t| t.name().eq_ignore_ascii_case(name.trim()))
            .unwrap_or_else(|| {
                warn!("unknown neighborhood type {:?}, falling back to moore", name);
                Topology::Moore
            })
    }
}

impl fmt::Display for Topology {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl From<&str> for Topology {
    fn from(name: &str) -> Self {
        Self::from_name(name)
    }
}

impl From<String> for Topology {
    fn from(name: String) -> Self {
        Self::from_name(&name)
    }
}

impl From<Topology> for String {
    fn from(topology: Topology) -> Self {
        topology.name().to_owned()
    }
}

/// Canonically ordered relative offsets for one (topology, range, dimension).
///
/// Offsets are sorted by comparing their comma-joined textual form, so the
/// neighbor values handed to a rule always come in the same order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NeighborhoodTable<const D: usize> {
    topology: Topology,
    range: usize,
    offsets: Vec<[isize; D]>,
}

impl<const D: usize> NeighborhoodTable<D> {
    /// Build the table. A range of 0 is treated as 1.
    pub fn build(topology: Topology, range: usize) -> Self {
        let range = range.max(1);
        let mut offsets = geometry::offsets::<D>(topology, range);
        offsets.sort_by_cached_key(|offset| offset.iter().join(","));

        debug!(
            "built {} neighborhood (range {}, {}D) with {} neighbors",
            topology,
            range,
            D,
            offsets.len()
        );

        Self { topology, range, offsets }
    }

    /// Family the offsets were generated from
    pub fn topology(&self) -> Topology {
        self.topology
    }

    /// Effective range, never below 1
    pub fn range(&self) -> usize {
        self.range
    }

    /// Relative offsets in canonical order
    pub fn offsets(&self) -> &[[isize; D]] {
        &self.offsets
    }

    /// Number of neighbors per cell
    pub fn len(&self) -> usize {
        self.offsets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.offsets.is_empty()
    }

    /// Scratch buffer sized to receive one cell's neighbor values
    pub fn value_buffer(&self) -> Vec<u8> {
        vec![0; self.offsets.len()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_von_neumann_canonical_order() {
        let table = NeighborhoodTable::<2>::build(Topology::VonNeumann, 1);
        assert_eq!(table.offsets(), &[[-1, 0], [0, -1], [0, 1], [1, 0]]);
    }

    #[test]
    fn test_order_is_textual_not_numeric() {
        // "-1" sorts before "-2" because '1' < '2'
        let table = NeighborhoodTable::<1>::build(Topology::Moore, 2);
        assert_eq!(table.offsets(), &[[-1], [-2], [1], [2]]);
    }

    #[test]
    fn test_builds_are_stable() {
        for topology in Topology::all() {
            let a = NeighborhoodTable::<3>::build(topology, 2);
            let b = NeighborhoodTable::<3>::build(topology, 2);
            assert_eq!(a, b);
        }
    }

    #[test]
    fn test_zero_range_is_range_one() {
        let table = NeighborhoodTable::<2>::build(Topology::Moore, 0);
        assert_eq!(table.range(), 1);
        assert_eq!(table.len(), 8);
    }

    #[test]
    fn test_value_buffer_matches_len() {
        let table = NeighborhoodTable::<3>::build(Topology::Moore, 1);
        assert_eq!(table.value_buffer().len(), 26);
    }

    #[test]
    fn test_topology_names() {
        assert_eq!(Topology::from_name("von-neumann"), Topology::VonNeumann);
        assert_eq!(Topology::from_name("FACE"), Topology::Face);
        assert_eq!(Topology::from_name("hexagonal"), Topology::Moore);
        assert_eq!(Topology::Edge.to_string(), "edge");
    }

    #[test]
    fn test_topology_serde_falls_back() {
        let t: Topology = serde_json::from_str("\"corner\"").unwrap();
        assert_eq!(t, Topology::Corner);
        let t: Topology = serde_json::from_str("\"unknown\"").unwrap();
        assert_eq!(t, Topology::Moore);
        assert_eq!(serde_json::to_string(&Topology::VonNeumann).unwrap(), "\"von-neumann\"");
    }
}
