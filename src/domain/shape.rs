/// Extents of an N-dimensional grid together with its stride vector.
///
/// Axis 0 is the fastest varying one: `stride[0] = 1` and
/// `stride[d] = stride[d - 1] * dims[d - 1]`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Shape<const D: usize> {
    dims: [usize; D],
    strides: [usize; D],
    size: usize,
}

impl<const D: usize> Shape<D> {
    /// Build a shape and precompute its strides.
    /// Extents are not validated; zero-sized axes simply yield an empty grid.
    pub fn new(dims: [usize; D]) -> Self {
        let mut strides = [0; D];
        let mut size = 1;
        for d in 0..D {
            strides[d] = size;
            size *= dims[d];
        }
        Self { dims, strides, size }
    }

    pub const fn dimension(&self) -> usize {
        D
    }

    pub const fn dims(&self) -> &[usize; D] {
        &self.dims
    }

    pub const fn strides(&self) -> &[usize; D] {
        &self.strides
    }

    /// Number of cells in the grid
    pub const fn size(&self) -> usize {
        self.size
    }

    /// Linear buffer offset of `coord`. No bounds checking.
    #[inline]
    pub fn linear_index(&self, coord: &[usize; D]) -> usize {
        coord
            .iter()
            .zip(&self.strides)
            .map(|(c, s)| c * s)
            .sum()
    }

    /// Coordinate of the cell stored at `index`.
    #[inline]
    pub fn coordinate_of(&self, index: usize) -> [usize; D] {
        let mut coord = [0; D];
        for d in 0..D {
            coord[d] = (index / self.strides[d]) % self.dims[d];
        }
        coord
    }

    /// Whether every component of `coord` lies inside the grid
    pub fn contains(&self, coord: &[usize; D]) -> bool {
        coord.iter().zip(&self.dims).all(|(c, n)| c < n)
    }

    /// Iterate over all coordinates in buffer order
    pub fn coordinates(&self) -> impl Iterator<Item = [usize; D]> + '_ {
        (0..self.size).map(move |i| self.coordinate_of(i))
    }
}
