//! Raw relative-offset generation for the named neighborhood topologies.
//!
//! Offsets are produced in generation order; canonical ordering is the
//! job of [`NeighborhoodTable`](super::NeighborhoodTable).

use itertools::Itertools;

use super::Topology;

/// All offsets of `topology` at `range` in `D` dimensions, zero vector excluded.
///
/// Every topology is a subset of the Moore hypercube `[-range, range]^D`:
/// - `Moore`: the whole hypercube
/// - `VonNeumann`: Manhattan distance at most `range`
/// - `Axis`: exactly one non-zero component
/// - `Corner`: every component on the hypercube boundary
/// - `Edge`: `max(D - 1, 1)` components on the boundary
/// - `Face`: exactly one component on the boundary
pub fn offsets<const D: usize>(topology: Topology, range: usize) -> Vec<[isize; D]> {
    let r = range as isize;
    let edge_rank = D.saturating_sub(1).max(1);

    (0..D)
        .map(|_| -r..=r)
        .multi_cartesian_product()
        .filter_map(|components| <[isize; D]>::try_from(components).ok())
        .filter(|offset| offset.iter().any(|&c| c != 0))
        .filter(|offset| {
            let on_boundary = offset.iter().filter(|c| c.abs() == r).count();
            match topology {
                Topology::Moore => true,
                Topology::VonNeumann => offset.iter().map(|c| c.abs()).sum::<isize>() <= r,
                Topology::Axis => offset.iter().filter(|&&c| c != 0).count() == 1,
                Topology::Corner => on_boundary == D,
                Topology::Edge => on_boundary == edge_rank,
                Topology::Face => on_boundary == 1,
            }
        })
        .collect()
}
