use super::Shape;

/// GridBuffer owns one generation of cell states.
/// A contiguous `u8` array laid out according to its [`Shape`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GridBuffer<const D: usize> {
    shape: Shape<D>,
    cells: Vec<u8>,
}

impl<const D: usize> GridBuffer<D> {
    /// Create a new buffer with every cell set to `value`
    pub fn new(shape: Shape<D>, value: u8) -> Self {
        Self {
            shape,
            cells: vec![value; shape.size()],
        }
    }

    /// Layout of the buffer
    pub const fn shape(&self) -> &Shape<D> {
        &self.shape
    }

    /// Total number of cells
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// True only for a grid with a zero-length axis
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Get cell at coordinate (with bounds checking)
    pub fn get(&self, coord: [usize; D]) -> Option<u8> {
        self.shape
            .contains(&coord)
            .then(|| self.cells[self.shape.linear_index(&coord)])
    }

    /// Set cell at coordinate; out-of-range coordinates are ignored
    pub fn set(&mut self, coord: [usize; D], value: u8) {
        if self.shape.contains(&coord) {
            let idx = self.shape.linear_index(&coord);
            self.cells[idx] = value;
        }
    }

    /// Cell at a linear index
    #[inline]
    pub fn at(&self, index: usize) -> u8 {
        self.cells[index]
    }

    /// All cells in linear order
    pub fn cells(&self) -> &[u8] {
        &self.cells
    }

    /// Mutable access to all cells in linear order
    pub fn cells_mut(&mut self) -> &mut [u8] {
        &mut self.cells
    }

    /// Set every cell to `value`
    pub fn fill(&mut self, value: u8) {
        self.cells.fill(value);
    }

    /// Iterate over all cells with their coordinates
    pub fn iter_cells(&self) -> impl Iterator<Item = ([usize; D], u8)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .map(|(i, &v)| (self.shape.coordinate_of(i), v))
    }

    /// Number of cells holding `value`
    pub fn count(&self, value: u8) -> usize {
        self.cells.iter().filter(|&&c| c == value).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_length_is_product_of_shape() {
        assert_eq!(GridBuffer::new(Shape::new([4]), 0).len(), 4);
        assert_eq!(GridBuffer::new(Shape::new([4, 3]), 0).len(), 12);
        assert_eq!(GridBuffer::new(Shape::new([4, 3, 2]), 0).len(), 24);
    }

    #[test]
    fn test_default_value() {
        let grid = GridBuffer::new(Shape::new([2, 2]), 5);
        assert!(grid.cells().iter().all(|&c| c == 5));
        assert_eq!(grid.count(5), 4);
    }

    #[test]
    fn test_get_set() {
        let mut grid = GridBuffer::new(Shape::new([3, 3]), 0);
        grid.set([1, 2], 7);
        assert_eq!(grid.get([1, 2]), Some(7));
        assert_eq!(grid.at(7), 7);
        assert_eq!(grid.get([2, 1]), Some(0));
    }

    #[test]
    fn test_bounds() {
        let mut grid = GridBuffer::new(Shape::new([3, 3]), 0);
        assert_eq!(grid.get([3, 0]), None);
        grid.set([0, 3], 1);
        assert_eq!(grid.count(1), 0);
    }

    #[test]
    fn test_iter_cells() {
        let mut grid = GridBuffer::new(Shape::new([2, 2]), 0);
        grid.set([1, 1], 1);
        let live: Vec<_> = grid.iter_cells().filter(|&(_, v)| v == 1).collect();
        assert_eq!(live, vec![([1, 1], 1)]);
    }
}
