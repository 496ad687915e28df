//! Generic 2D storage.

/// Owned, row-major 2D array.
///
/// Cloning copies every cell; no storage is ever shared between two grids.
#[derive(Debug, Clone, PartialEq)]
pub struct Grid<T> {
    rows: usize,
    cols: usize,
    cells: Vec<T>,
}

impl<T: Clone + Default> Grid<T> {
    /// Grid of `rows × cols` default cells.
    pub fn new(rows: usize, cols: usize) -> Self {
        Grid {
            rows,
            cols,
            cells: vec![T::default(); rows * cols],
        }
    }

    /// Copy of this grid at a new size: the overlapping top-left region is kept,
    /// everything else is `T::default()`.
    pub fn resized(&self, rows: usize, cols: usize) -> Self {
        let mut out = Grid::new(rows, cols);
        for r in 0..self.rows.min(rows) {
            for c in 0..self.cols.min(cols) {
                out.cells[r * cols + c] = self.cells[r * self.cols + c].clone();
            }
        }
        out
    }

    /// Reset every cell to `T::default()`.
    pub fn clear(&mut self) {
        self.cells.iter_mut().for_each(|c| *c = T::default());
    }
}

impl<T> Grid<T> {
    /// Number of rows.
    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns.
    #[inline]
    pub fn cols(&self) -> usize {
        self.cols
    }

    #[inline]
    fn index(&self, row: usize, col: usize) -> Option<usize> {
        (row < self.rows && col < self.cols).then(|| row * self.cols + col)
    }

    /// Cell at `(row, col)`; `None` outside the grid.
    pub fn get(&self, row: usize, col: usize) -> Option<&T> {
        self.index(row, col).map(|i| &self.cells[i])
    }

    /// Mutable cell at `(row, col)`; `None` outside the grid.
    pub fn get_mut(&mut self, row: usize, col: usize) -> Option<&mut T> {
        self.index(row, col).map(move |i| &mut self.cells[i])
    }

    /// Cells in row-major order (left to right, top to bottom).
    pub fn as_slice(&self) -> &[T] {
        &self.cells
    }

    /// `(row, col, cell)` in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize, &T)> {
        let cols = self.cols;
        self.cells
            .iter()
            .enumerate()
            .map(move |(i, v)| (i / cols, i % cols, v))
    }

    /// Mutable `(row, col, cell)` in row-major order.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (usize, usize, &mut T)> {
        let cols = self.cols;
        self.cells
            .iter_mut()
            .enumerate()
            .map(move |(i, v)| (i / cols, i % cols, v))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resize_keeps_overlap() {
        let mut g: Grid<u32> = Grid::new(3, 4);
        *g.get_mut(1, 3).unwrap() = 7;
        *g.get_mut(2, 0).unwrap() = 9;

        let small = g.resized(2, 5);
        assert_eq!(small.get(1, 3), Some(&7));
        assert_eq!(small.get(1, 4), Some(&0));
        assert_eq!(small.get(2, 0), None);

        let back = small.resized(3, 4);
        assert_eq!(back.get(1, 3), Some(&7));
        assert_eq!(back.get(2, 0), Some(&0));
    }

    #[test]
    fn iter_is_row_major() {
        let g: Grid<u8> = Grid::new(2, 3);
        let order: Vec<_> = g.iter().map(|(r, c, _)| (r, c)).collect();
        assert_eq!(order, [(0, 0), (0, 1), (0, 2), (1, 0), (1, 1), (1, 2)]);
    }

    #[test]
    fn clone_is_deep() {
        let mut a: Grid<Option<String>> = Grid::new(2, 2);
        *a.get_mut(0, 0).unwrap() = Some("x".into());
        let b = a.clone();
        *a.get_mut(0, 0).unwrap() = None;
        assert_eq!(b.get(0, 0), Some(&Some("x".to_string())));
    }
}
