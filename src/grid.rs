//! Owned row-major 2-D buffer.

use std::fmt;
use std::ops::{Index, IndexMut};

use crate::extent::Extent2D;
use crate::index::{Index2D, Size2D};
use crate::view::{GridView, GridViewMut, Rows, RowsMut};
use crate::{GridError, Result};

// ============================================================================
// Grid
// ============================================================================

/// Owned 2-D grid with back-to-back rows.
///
/// The backing `Vec` always holds exactly `rows * columns` elements.
pub struct Grid<T> {
    data: Vec<T>,
    shape: Size2D,
}

impl<T> Default for Grid<T> {
    fn default() -> Self {
        Self {
            data: Vec::new(),
            shape: Size2D::default(),
        }
    }
}

impl<T: Clone> Clone for Grid<T> {
    fn clone(&self) -> Self {
        Self {
            data: self.data.clone(),
            shape: self.shape,
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for Grid<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Grid")
            .field("shape", &self.shape)
            .field("data", &self.data)
            .finish()
    }
}

impl<T: PartialEq> PartialEq for Grid<T> {
    fn eq(&self, other: &Self) -> bool {
        self.shape == other.shape && self.data == other.data
    }
}

impl<T: Eq> Eq for Grid<T> {}

impl<T: Clone + Default> Grid<T> {
    /// Create a grid filled with `T::default()`.
    pub fn new(shape: Size2D) -> Self {
        Self {
            data: vec![T::default(); shape.count()],
            shape,
        }
    }

    /// Change the shape of the grid.
    ///
    /// Rows and columns present in both the old and the new shape keep their
    /// values and positions. Everything else is `T::default()`.
    pub fn resize(&mut self, shape: Size2D) {
        if shape == self.shape {
            return;
        }
        tracing::trace!(from = %self.shape, to = %shape, "resizing grid");
        let mut data = vec![T::default(); shape.count()];
        if !self.data.is_empty() && shape.columns > 0 {
            let kept = self.shape.columns.min(shape.columns);
            for (old, new) in self
                .data
                .chunks_exact_mut(self.shape.columns)
                .zip(data.chunks_exact_mut(shape.columns))
            {
                for (dst, src) in new[..kept].iter_mut().zip(&mut old[..kept]) {
                    *dst = std::mem::take(src);
                }
            }
        }
        self.data = data;
        self.shape = shape;
    }
}

impl<T: Clone> Grid<T> {
    /// Copy `values` into a new grid.
    ///
    /// # Errors
    /// Returns [`GridError::SizeMismatch`] unless `values.len() == rows * columns`.
    pub fn from_slice(values: &[T], shape: Size2D) -> Result<Self> {
        check_len(values.len(), shape)?;
        Ok(Self::from_parts(values.to_vec(), shape))
    }

    /// Set every element to `value`.
    pub fn fill(&mut self, value: T) {
        self.data.fill(value);
    }
}

#[inline]
fn check_len(len: usize, shape: Size2D) -> Result<()> {
    let expected = shape.count();
    if len != expected {
        tracing::debug!(%shape, expected, actual = len, "grid storage has the wrong length");
        return Err(GridError::SizeMismatch {
            expected,
            actual: len,
        });
    }
    Ok(())
}

impl<T> Grid<T> {
    /// Take ownership of `values` as a grid of the given shape.
    ///
    /// # Errors
    /// Returns [`GridError::SizeMismatch`] unless `values.len() == rows * columns`.
    pub fn from_vec(values: Vec<T>, shape: Size2D) -> Result<Self> {
        check_len(values.len(), shape)?;
        Ok(Self::from_parts(values, shape))
    }

    /// Create a grid with values produced by a function.
    ///
    /// The function is called with indices in row-major order.
    pub fn from_fn(shape: Size2D, mut f: impl FnMut(Index2D) -> T) -> Self {
        let mut data = Vec::with_capacity(shape.count());
        for row in 0..shape.rows {
            for column in 0..shape.columns {
                data.push(f(Index2D::new(row, column)));
            }
        }
        Self::from_parts(data, shape)
    }

    #[inline]
    pub(crate) fn from_parts(data: Vec<T>, shape: Size2D) -> Self {
        debug_assert_eq!(data.len(), shape.count());
        Self { data, shape }
    }

    #[inline]
    pub fn shape(&self) -> Size2D {
        self.shape
    }

    #[inline]
    pub fn row_count(&self) -> usize {
        self.shape.rows
    }

    #[inline]
    pub fn col_count(&self) -> usize {
        self.shape.columns
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    #[inline]
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        &mut self.data
    }

    /// Hand the backing storage to the caller, leaving an empty 0x0 grid.
    pub fn release(&mut self) -> Vec<T> {
        tracing::trace!(shape = %self.shape, "releasing grid storage");
        self.shape = Size2D::default();
        std::mem::take(&mut self.data)
    }

    /// # Panics
    /// Panics if the position is outside the grid.
    #[inline]
    #[track_caller]
    pub fn at(&self, row: usize, column: usize) -> &T {
        self.view().at(row, column)
    }

    /// # Panics
    /// Panics if the position is outside the grid.
    #[inline]
    #[track_caller]
    pub fn at_mut(&mut self, row: usize, column: usize) -> &mut T {
        let shape = self.shape;
        assert!(
            row < shape.rows && column < shape.columns,
            "index ({row}, {column}) out of bounds for shape {shape}"
        );
        &mut self.data[row * shape.columns + column]
    }

    /// # Panics
    /// Panics if the position is outside the grid.
    #[inline]
    #[track_caller]
    pub fn set(&mut self, row: usize, column: usize, value: T) {
        *self.at_mut(row, column) = value;
    }

    #[inline]
    pub fn get(&self, row: usize, column: usize) -> Option<&T> {
        self.view().get(row, column)
    }

    #[inline]
    pub fn get_mut(&mut self, row: usize, column: usize) -> Option<&mut T> {
        if row < self.shape.rows && column < self.shape.columns {
            Some(&mut self.data[row * self.shape.columns + column])
        } else {
            None
        }
    }

    /// # Panics
    /// Panics if `i` is not a row of the grid.
    #[inline]
    #[track_caller]
    pub fn row(&self, i: usize) -> &[T] {
        self.view().row(i)
    }

    /// # Panics
    /// Panics if `i` is not a row of the grid.
    #[inline]
    #[track_caller]
    pub fn row_mut(&mut self, i: usize) -> &mut [T] {
        assert!(
            i < self.shape.rows,
            "row {i} out of bounds for shape {}",
            self.shape
        );
        let columns = self.shape.columns;
        &mut self.data[i * columns..(i + 1) * columns]
    }

    #[inline]
    pub fn get_row(&self, i: usize) -> Option<&[T]> {
        self.view().get_row(i)
    }

    /// Read-only view of the whole grid.
    pub fn view(&self) -> GridView<'_, T> {
        GridView::new(&self.data, self.shape)
    }

    /// Mutable view of the whole grid.
    pub fn view_mut(&mut self) -> GridViewMut<'_, T> {
        GridViewMut::new(&mut self.data, self.shape)
    }

    /// Read-only view of the part inside `extent`, clamped to the grid.
    pub fn sub_view(&self, extent: Extent2D) -> GridView<'_, T> {
        self.view().sub_view(extent)
    }

    /// Mutable view of the part inside `extent`, clamped to the grid.
    pub fn sub_view_mut(&mut self, extent: Extent2D) -> GridViewMut<'_, T> {
        self.view_mut().into_sub_view(extent)
    }

    pub fn rows(&self) -> Rows<'_, T> {
        self.view().rows()
    }

    pub fn rows_mut(&mut self) -> RowsMut<'_, T> {
        self.view_mut().into_rows()
    }
}

impl<T> Index<(usize, usize)> for Grid<T> {
    type Output = T;

    #[track_caller]
    fn index(&self, (row, column): (usize, usize)) -> &T {
        self.at(row, column)
    }
}

impl<T> IndexMut<(usize, usize)> for Grid<T> {
    #[track_caller]
    fn index_mut(&mut self, (row, column): (usize, usize)) -> &mut T {
        self.at_mut(row, column)
    }
}

impl<T> Index<Index2D> for Grid<T> {
    type Output = T;

    #[track_caller]
    fn index(&self, index: Index2D) -> &T {
        self.at(index.row, index.column)
    }
}

impl<T> IndexMut<Index2D> for Grid<T> {
    #[track_caller]
    fn index_mut(&mut self, index: Index2D) -> &mut T {
        self.at_mut(index.row, index.column)
    }
}

impl<'a, T> IntoIterator for &'a Grid<T> {
    type Item = &'a [T];
    type IntoIter = Rows<'a, T>;

    fn into_iter(self) -> Rows<'a, T> {
        self.rows()
    }
}

impl<'a, T> IntoIterator for &'a mut Grid<T> {
    type Item = &'a mut [T];
    type IntoIter = RowsMut<'a, T>;

    fn into_iter(self) -> RowsMut<'a, T> {
        self.rows_mut()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid(values: &[i32], rows: usize, columns: usize) -> Grid<i32> {
        Grid::from_slice(values, Size2D::new(rows, columns)).unwrap()
    }

    #[test]
    fn test_add_rows() {
        let mut g = grid(&[1, 2, 3, 4, 5, 6, 7, 8, 9], 3, 3);
        g.resize(Size2D::new(5, 3));
        assert_eq!(g.row_count(), 5);
        assert_eq!(g.col_count(), 3);
        assert_eq!(g[(0, 0)], 1);
        assert_eq!(g[(0, 2)], 3);
        assert_eq!(g[(2, 0)], 7);
        assert_eq!(g[(2, 2)], 9);
        assert_eq!(g[(3, 0)], 0);
        assert_eq!(g[(4, 2)], 0);
    }

    #[test]
    fn test_remove_columns() {
        let values = [1, 2, 3, 4, 5, 6, 7, 8, 9, 0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 0];
        let mut g = Grid::from_vec(values.to_vec(), Size2D::new(4, 5)).unwrap();
        g.resize(Size2D::new(3, 3));
        assert_eq!(g.shape(), Size2D::new(3, 3));
        assert_eq!(g.as_slice(), &[1, 2, 3, 6, 7, 8, 1, 2, 3]);
    }

    #[test]
    fn test_resize_drops_columns() {
        let mut g = grid(&[1, 2, 3, 4, 5, 6, 7, 8, 9], 3, 3);
        g.resize(Size2D::new(3, 2));
        assert_eq!(g.as_slice(), &[1, 2, 4, 5, 7, 8]);
    }

    #[test]
    fn test_resize_adds_columns_and_rows() {
        let mut g = grid(&[1, 2, 3, 4], 2, 2);
        g.resize(Size2D::new(3, 3));
        assert_eq!(g.as_slice(), &[1, 2, 0, 3, 4, 0, 0, 0, 0]);
        g.resize(Size2D::new(1, 4));
        assert_eq!(g.as_slice(), &[1, 2, 0, 0]);
    }

    #[test]
    fn test_resize_empty() {
        let mut g = Grid::<i32>::default();
        g.resize(Size2D::new(3, 3));
        assert_eq!(g.row_count(), 3);
        assert_eq!(g.col_count(), 3);
        assert!(g.as_slice().iter().all(|&v| v == 0));

        g.resize(Size2D::new(0, 3));
        assert!(g.is_empty());
        g.resize(Size2D::new(2, 0));
        assert!(g.is_empty());
        g.resize(Size2D::new(2, 2));
        assert_eq!(g.as_slice(), &[0; 4]);
    }

    #[test]
    fn test_resize_moves_values() {
        let mut g = Grid::from_fn(Size2D::new(2, 2), |idx| idx.to_string());
        g.resize(Size2D::new(2, 3));
        assert_eq!(g[(1, 1)], "(1, 1)");
        assert_eq!(g[(1, 2)], "");
    }

    #[test]
    fn test_iterate_rows() {
        let values = [0, 2, 0, 3, 4, 3, 0, 2, 0];
        let g = grid(&values, 3, 3);
        let mut it = values.iter();
        for row in &g {
            for value in row {
                assert_eq!(Some(value), it.next());
            }
        }
        assert!(it.next().is_none());
    }

    #[test]
    fn test_iterate_rows_mut() {
        let mut g = Grid::<i32>::new(Size2D::new(2, 3));
        for (i, row) in (&mut g).into_iter().enumerate() {
            row.fill(i as i32 + 1);
        }
        assert_eq!(g.as_slice(), &[1, 1, 1, 2, 2, 2]);
    }

    #[test]
    fn test_from_vec_wrong_length() {
        let err = Grid::from_vec(vec![1, 2, 3], Size2D::new(2, 2)).unwrap_err();
        assert!(matches!(
            err,
            GridError::SizeMismatch {
                expected: 4,
                actual: 3
            }
        ));
        assert!(Grid::from_slice(&[1, 2, 3, 4, 5], Size2D::new(2, 2)).is_err());
        assert!(Grid::<i32>::from_vec(Vec::new(), Size2D::new(0, 7)).is_ok());
    }

    #[test]
    fn test_from_fn_row_major() {
        let g = Grid::from_fn(Size2D::new(2, 3), |idx| idx.row * 10 + idx.column);
        assert_eq!(g.as_slice(), &[0, 1, 2, 10, 11, 12]);
    }

    #[test]
    fn test_release() {
        let mut g = grid(&[1, 2, 3, 4], 2, 2);
        let data = g.release();
        assert_eq!(data, vec![1, 2, 3, 4]);
        assert_eq!(g.shape(), Size2D::new(0, 0));
        assert!(g.is_empty());
        assert_eq!(g, Grid::default());
    }

    #[test]
    fn test_access() {
        let mut g = Grid::<i32>::new(Size2D::new(2, 3));
        g.set(1, 2, 5);
        g[(0, 1)] = 3;
        *g.at_mut(1, 0) = 4;
        *g.get_mut(0, 0).unwrap() = 1;
        assert!(g.get_mut(2, 0).is_none());
        assert_eq!(g.get(1, 2), Some(&5));
        assert_eq!(g.get(1, 3), None);
        assert_eq!(*g.at(0, 1), 3);
        assert_eq!(g[Index2D::new(1, 0)], 4);
        assert_eq!(g.row(1), &[4, 0, 5]);
        assert_eq!(g.get_row(2), None);
        g.row_mut(0).copy_from_slice(&[7, 8, 9]);
        assert_eq!(g.as_slice(), &[7, 8, 9, 4, 0, 5]);
    }

    #[test]
    #[should_panic(expected = "out of bounds")]
    fn test_at_out_of_bounds() {
        let g = Grid::<i32>::new(Size2D::new(2, 3));
        let _ = g[(0, 3)];
    }

    #[test]
    fn test_sub_view_mut_aliases_grid() {
        let mut g = Grid::<i32>::new(Size2D::new(4, 4));
        let mut sub = g.sub_view_mut(Extent2D::new(Index2D::new(2, 2), Size2D::new(2, 2)));
        sub[(1, 1)] = 7;
        sub[(0, 0)] = 5;
        assert_eq!(g[(3, 3)], 7);
        assert_eq!(g[(2, 2)], 5);
        assert_eq!(g.as_slice().iter().filter(|&&v| v != 0).count(), 2);
    }

    #[test]
    fn test_fill() {
        let mut g = Grid::<u8>::new(Size2D::new(3, 2));
        g.fill(9);
        assert!(g.as_slice().iter().all(|&v| v == 9));
        g.sub_view_mut(Extent2D::new(Index2D::new(1, 1), Size2D::new(5, 5)))
            .fill(1);
        assert_eq!(g.as_slice(), &[9, 9, 9, 1, 9, 1]);
    }

    #[test]
    fn test_views_cover_grid() {
        let g = Grid::from_fn(Size2D::new(3, 4), |idx| idx.row * 4 + idx.column);
        let v = g.view();
        assert_eq!(v.shape(), g.shape());
        assert!(v.contiguous());
        assert_eq!(v.as_flat().unwrap(), g.as_slice());
        assert_eq!(g.sub_view(Extent2D::from(g.shape())), v);
        assert_eq!(v.to_grid(), g);
    }

    #[test]
    fn test_clone_and_eq() {
        let g = grid(&[1, 2, 3, 4, 5, 6], 2, 3);
        let h = g.clone();
        assert_eq!(g, h);
        assert_ne!(g, grid(&[1, 2, 3, 4, 5, 6], 3, 2));
    }
}
