use std::fmt;

use log::{debug, trace};
use rayon::prelude::*;

use crate::domain::{
    BoundaryPolicy, Execution, GridBuffer, NeighborhoodTable, RandomSource, RngSource, Rule,
    RuleSpec, Shape, Topology, draw_seed, sampler,
};
use crate::error::{Error, Result};

/// Cells per rayon work item in parallel sweeps
const PARALLEL_CHUNK: usize = 4096;

/// Automaton orchestrates the simulation.
///
/// Two buffers are owned at all times. A sweep reads only the active one and
/// writes only the staging one; the roles flip once every cell is written,
/// so each cell sees the same generation.
pub struct Automaton<const D: usize> {
    shape: Shape<D>,
    buffers: [GridBuffer<D>; 2],
    active: usize,
    boundary: BoundaryPolicy,
    rule: Option<Rule>,
    neighborhood: Option<NeighborhoodTable<D>>,
    neighbor_values: Vec<u8>,
    rng: Box<dyn RandomSource>,
    execution: Execution,
    generation: u64,
}

impl<const D: usize> Automaton<D> {
    /// Create an automaton with both buffers filled with `default_value`
    pub fn new(shape: [usize; D], default_value: u8) -> Self {
        let shape = Shape::new(shape);
        Self {
            shape,
            buffers: [
                GridBuffer::new(shape, default_value),
                GridBuffer::new(shape, default_value),
            ],
            active: 0,
            boundary: BoundaryPolicy::default(),
            rule: None,
            neighborhood: None,
            neighbor_values: Vec::new(),
            rng: Box::new(RngSource::from_os_rng()),
            execution: Execution::default(),
            generation: 0,
        }
    }

    /// Extents and strides of the grid
    pub const fn shape(&self) -> &Shape<D> {
        &self.shape
    }

    /// Number of axes
    pub const fn dimension(&self) -> usize {
        D
    }

    /// Completed sweeps since construction
    pub const fn generation(&self) -> u64 {
        self.generation
    }

    /// Policy applied to out-of-range neighbor lookups
    pub fn boundary(&self) -> BoundaryPolicy {
        self.boundary
    }

    /// Strategy used by sweeps
    pub fn execution(&self) -> Execution {
        self.execution
    }

    /// The armed rule, if any
    pub fn rule(&self) -> Option<&Rule> {
        self.rule.as_ref()
    }

    /// The precomputed neighbor offsets, once a rule or neighborhood is set
    pub fn neighborhood(&self) -> Option<&NeighborhoodTable<D>> {
        self.neighborhood.as_ref()
    }

    /// The current generation
    pub fn grid(&self) -> &GridBuffer<D> {
        &self.buffers[self.active]
    }

    /// Flat cell values of the current generation
    pub fn cells(&self) -> &[u8] {
        self.grid().cells()
    }

    /// Mutable view of the current generation.
    /// The borrow ends before any sweep can flip the buffers.
    pub fn cells_mut(&mut self) -> &mut [u8] {
        self.buffers[self.active].cells_mut()
    }

    /// Get one cell of the current generation (with bounds checking)
    pub fn get(&self, coord: [usize; D]) -> Option<u8> {
        self.grid().get(coord)
    }

    /// Set one cell of the current generation (ignored when out of range)
    pub fn set(&mut self, coord: [usize; D], value: u8) -> &mut Self {
        self.buffers[self.active].set(coord, value);
        self
    }

    /// Replace the random source used by rules and distribution fills.
    ///
    /// Serial sweeps hand this source to custom rules directly. Parallel
    /// sweeps draw one seed per chunk from it and give custom rules a
    /// seeded `StdRng` per chunk instead, so results stay reproducible but
    /// differ from a serial run.
    pub fn set_random_source(&mut self, rng: impl RandomSource + 'static) -> &mut Self {
        self.rng = Box::new(rng);
        self
    }

    /// Define how out-of-range neighbors are read: a fixed integer value
    /// (truncated to a cell value), `"wrap"` or `"clamp"`
    pub fn set_out_of_bound_value(&mut self, policy: impl Into<BoundaryPolicy>) -> &mut Self {
        self.boundary = policy.into();
        self
    }

    /// Choose between serial and parallel sweeps
    pub fn set_execution(&mut self, execution: Execution) -> &mut Self {
        self.execution = execution;
        self
    }

    /// Precompute the ordered neighbor offsets used by every sweep.
    pub fn set_neighborhood(&mut self, topology: impl Into<Topology>, range: usize) -> &mut Self {
        let table = NeighborhoodTable::build(topology.into(), range);
        self.neighbor_values = table.value_buffer();
        self.neighborhood = Some(table);
        self
    }

    /// Arm a rule: either a rule string, parsed once here, or a [`CustomRule`].
    ///
    /// On a parse failure the previously armed rule stays in place.
    ///
    /// [`CustomRule`]: crate::CustomRule
    pub fn set_rule(&mut self, rule: impl Into<RuleSpec>) -> Result<&mut Self> {
        let rule = rule.into().into_rule()?;
        let (topology, range) = rule.neighborhood();
        debug!("armed rule {:?} over {} range {}", rule, topology, range);
        self.rule = Some(rule);
        Ok(self.set_neighborhood(topology, range))
    }

    /// Fill the current generation from a weighted distribution of values,
    /// drawing from the automaton's random source.
    /// `None` values never overwrite a cell.
    pub fn fill_with_distribution(&mut self, distribution: &[(Option<u8>, f64)]) -> &mut Self {
        let active = self.active;
        sampler::fill(self.buffers[active].cells_mut(), distribution, &mut *self.rng);
        self
    }

    /// Same as [`fill_with_distribution`](Self::fill_with_distribution) with an explicit random source
    pub fn fill_with_distribution_using(
        &mut self,
        distribution: &[(Option<u8>, f64)],
        rng: &mut dyn RandomSource,
    ) -> &mut Self {
        sampler::fill(self.cells_mut(), distribution, rng);
        self
    }

    /// Resolved neighbor values of one cell, in canonical order.
    /// `None` until a neighborhood has been set.
    pub fn neighbors(&self, coord: [usize; D]) -> Option<Vec<u8>> {
        let table = self.neighborhood.as_ref()?;
        let mut values = table.value_buffer();
        gather(self.grid(), table, self.boundary, &coord, &mut values);
        Some(values)
    }

    /// Apply the armed rule `iterations` times
    pub fn iterate(&mut self, iterations: usize) -> Result<&mut Self> {
        if self.rule.is_none() {
            return Err(Error::RuleNotSet);
        }

        for _ in 0..iterations {
            match self.execution {
                Execution::Serial => self.sweep_serial(),
                Execution::Parallel => self.sweep_parallel(),
            }
            self.active ^= 1;
            self.generation += 1;
            trace!("generation {} complete", self.generation);
        }

        Ok(self)
    }

    /// Shortcut for [`set_rule`](Self::set_rule) followed by [`iterate`](Self::iterate)
    pub fn apply(&mut self, rule: impl Into<RuleSpec>, iterations: usize) -> Result<&mut Self> {
        self.set_rule(rule)?.iterate(iterations)
    }

    fn sweep_serial(&mut self) {
        let Self {
            shape,
            buffers,
            active,
            boundary,
            rule,
            neighborhood,
            neighbor_values,
            rng,
            ..
        } = self;
        let (Some(rule), Some(table)) = (rule.as_ref(), neighborhood.as_ref()) else {
            return;
        };
        let (current, next) = split_buffers(buffers, *active);

        for (index, out) in next.cells_mut().iter_mut().enumerate() {
            let coord = shape.coordinate_of(index);
            gather(current, table, *boundary, &coord, neighbor_values);
            *out = rule.evaluate(current.at(index), neighbor_values, &mut **rng);
        }
    }

    fn sweep_parallel(&mut self) {
        let Self {
            shape,
            buffers,
            active,
            boundary,
            rule,
            neighborhood,
            rng,
            ..
        } = self;
        let (Some(rule), Some(table)) = (rule.as_ref(), neighborhood.as_ref()) else {
            return;
        };
        let shape = *shape;
        let boundary = *boundary;
        let (current, next) = split_buffers(buffers, *active);

        // One sub-stream per chunk, drawn up front so the result does not
        // depend on thread scheduling
        let chunks = next.len().div_ceil(PARALLEL_CHUNK);
        let seeds: Vec<u64> = if rule.uses_randomness() {
            (0..chunks).map(|_| draw_seed(&mut **rng)).collect()
        } else {
            vec![0; chunks]
        };

        next.cells_mut()
            .par_chunks_mut(PARALLEL_CHUNK)
            .zip(seeds.par_iter())
            .enumerate()
            .for_each(|(chunk, (cells, &seed))| {
                let mut local = RngSource::seeded(seed);
                let mut values = table.value_buffer();
                let start = chunk * PARALLEL_CHUNK;

                for (offset, out) in cells.iter_mut().enumerate() {
                    let index = start + offset;
                    let coord = shape.coordinate_of(index);
                    gather(current, table, boundary, &coord, &mut values);
                    *out = rule.evaluate(current.at(index), &values, &mut local);
                }
            });
    }
}

impl<const D: usize> fmt::Debug for Automaton<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Automaton")
            .field("shape", self.shape.dims())
            .field("generation", &self.generation)
            .field("boundary", &self.boundary)
            .field("rule", &self.rule)
            .field("execution", &self.execution)
            .finish_non_exhaustive()
    }
}

/// Borrow the active buffer for reading and the staging one for writing
fn split_buffers<const D: usize>(
    buffers: &mut [GridBuffer<D>; 2],
    active: usize,
) -> (&GridBuffer<D>, &mut GridBuffer<D>) {
    let [first, second] = buffers;
    if active == 0 {
        (&*first, second)
    } else {
        (&*second, first)
    }
}

/// Read the neighbor values of `coord` into `values`, in table order
#[inline]
fn gather<const D: usize>(
    grid: &GridBuffer<D>,
    table: &NeighborhoodTable<D>,
    boundary: BoundaryPolicy,
    coord: &[usize; D],
    values: &mut [u8],
) {
    let shape = grid.shape();
    for (value, offset) in values.iter_mut().zip(table.offsets()) {
        *value = match boundary.resolve_coord(coord, offset, shape.dims()) {
            Some(resolved) => grid.at(shape.linear_index(&resolved)),
            None => boundary.fixed_value(),
        };
    }
}
