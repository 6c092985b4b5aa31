//! Borrowed 2-D views with a row gap.
//!
//! A view describes `rows x columns` elements laid out row by row in a slice,
//! where consecutive rows are separated by `row_gap` elements that do not
//! belong to the view. A row gap of zero means the rows are back to back.
//!
//! ```text
//!   columns   row_gap
//! |---------|.........|
//! | row 0   | skipped |
//! | row 1   | skipped |
//! | row 2   |
//! ```
//!
//! Views only hold the slice span from the first element of the first row to
//! the last element of the last row, so the trailing gap after the last row
//! is never borrowed. This is what lets a mutable sub-view and the rest of
//! the owner be borrowed safely in sequence.
//!
//! # Coordinate checks
//!
//! Element and row accessors (`at`, `at_mut`, `row`, `row_mut`, and the
//! `Index`/`IndexMut` impls) panic on coordinates outside the view's shape,
//! including columns that would fall inside the gap. `get`, `get_mut` and
//! `get_row` are the checked counterparts returning `Option`.

use std::fmt;
use std::iter::FusedIterator;
use std::ops::{Index, IndexMut};

use crate::extent::Extent2D;
use crate::grid::Grid;
use crate::index::{Index2D, Size2D};
use crate::{GridError, Result};

/// Number of slice elements spanned by a view of `shape` with `row_gap`,
/// or `None` if that does not fit in `usize`.
///
/// The gap only counts between rows, so a single row spans `columns`
/// elements whatever the gap.
#[inline]
pub(crate) fn span(shape: Size2D, row_gap: usize) -> Option<usize> {
    match shape.rows {
        0 => Some(0),
        1 => Some(shape.columns),
        rows => (rows - 1)
            .checked_mul(shape.columns.checked_add(row_gap)?)?
            .checked_add(shape.columns),
    }
}

/// True if both slices start at the same address and have the same length.
#[inline]
pub fn are_identical<T>(a: &[T], b: &[T]) -> bool {
    std::ptr::eq(a.as_ptr(), b.as_ptr()) && a.len() == b.len()
}

/// Compare two gapped sequences of `rows` runs of `row_len` elements each.
///
/// After every run, `gap_a` elements are skipped in `a` and `gap_b` in `b`.
/// Both slices must cover their `rows` runs.
pub(crate) fn equal_with_gaps<T: PartialEq>(
    a: &[T],
    gap_a: usize,
    b: &[T],
    gap_b: usize,
    row_len: usize,
    rows: usize,
) -> bool {
    if rows == 0 || row_len == 0 {
        return true;
    }
    if gap_a == 0 && gap_b == 0 {
        let len = rows * row_len;
        return a[..len] == b[..len];
    }
    let stride_a = row_len.saturating_add(gap_a);
    let stride_b = row_len.saturating_add(gap_b);
    (0..rows).all(|r| {
        let start_a = r * stride_a;
        let start_b = r * stride_b;
        a[start_a..start_a + row_len] == b[start_b..start_b + row_len]
    })
}

/// Validate a caller-supplied slice and cut it down to the view's span.
#[inline]
#[track_caller]
fn checked_span(len: usize, shape: Size2D, row_gap: usize) -> usize {
    match span(shape, row_gap) {
        Some(needed) if len >= needed => needed,
        Some(needed) => panic!(
            "slice of length {len} too short for a {shape} view with row gap {row_gap} (needs {needed})"
        ),
        None => panic!(
            "slice of length {len} too short for a {shape} view with row gap {row_gap} (span overflows usize)"
        ),
    }
}

#[inline]
#[track_caller]
fn check_index(shape: Size2D, row: usize, column: usize) {
    assert!(
        row < shape.rows && column < shape.columns,
        "index ({row}, {column}) out of bounds for shape {shape}"
    );
}

#[inline]
#[track_caller]
fn check_row(shape: Size2D, row: usize) {
    assert!(
        row < shape.rows,
        "row {row} out of bounds for shape {shape}"
    );
}

/// Offset and span of the clamped sub-region `extent` of a view.
#[inline]
fn sub_region(
    shape: Size2D,
    row_gap: usize,
    len: usize,
    extent: Extent2D,
) -> (usize, Size2D, usize, usize) {
    let extent = extent.clamp(shape);
    let stride = shape.columns.saturating_add(row_gap);
    let new_gap = row_gap.saturating_add(shape.columns - extent.size.columns);
    // A region inside a valid view never spans more than the view itself.
    let new_span = span(extent.size, new_gap).unwrap_or(len).min(len);
    // An empty region may start past the retained span; pin it to the end.
    let start = extent
        .origin
        .row
        .saturating_mul(stride)
        .saturating_add(extent.origin.column)
        .min(len - new_span);
    (start, extent.size, new_gap, new_span)
}

// ============================================================================
// GridView
// ============================================================================

/// Read-only 2-D view.
pub struct GridView<'a, T> {
    data: &'a [T],
    shape: Size2D,
    row_gap: usize,
}

impl<T> Clone for GridView<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for GridView<'_, T> {}

impl<T: fmt::Debug> fmt::Debug for GridView<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GridView")
            .field("shape", &self.shape)
            .field("row_gap", &self.row_gap)
            .field("rows", &DebugRows(self.rows()))
            .finish()
    }
}

struct DebugRows<'a, T>(Rows<'a, T>);

impl<T: fmt::Debug> fmt::Debug for DebugRows<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.0.clone()).finish()
    }
}

impl<'a, T> GridView<'a, T> {
    /// View `data` as a grid with back-to-back rows.
    ///
    /// # Panics
    /// Panics if `data` holds fewer than `rows * columns` elements.
    #[track_caller]
    pub fn new(data: &'a [T], shape: Size2D) -> Self {
        Self::with_row_gap(data, shape, 0)
    }

    /// View `data` as a grid whose rows are `row_gap` elements apart.
    ///
    /// # Panics
    /// Panics if `data` is shorter than the span of the view,
    /// `(rows - 1) * (columns + row_gap) + columns` elements.
    #[track_caller]
    pub fn with_row_gap(data: &'a [T], shape: Size2D, row_gap: usize) -> Self {
        let len = checked_span(data.len(), shape, row_gap);
        Self {
            data: &data[..len],
            shape,
            row_gap,
        }
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
    pub fn row_gap(&self) -> usize {
        self.row_gap
    }

    /// Number of logical elements, `rows * columns`.
    #[inline]
    pub fn len(&self) -> usize {
        self.shape.rows * self.shape.columns
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.shape.is_empty()
    }

    /// True if there is no gap between rows, or at most one row.
    #[inline]
    pub fn contiguous(&self) -> bool {
        self.row_gap == 0 || self.shape.rows <= 1
    }

    /// Pointer to the first element.
    #[inline]
    pub fn as_ptr(&self) -> *const T {
        self.data.as_ptr()
    }

    /// Distance between row starts. Saturates for single-row views with a
    /// huge gap, where only row 0 is ever addressed.
    #[inline]
    fn stride(&self) -> usize {
        self.shape.columns.saturating_add(self.row_gap)
    }

    /// The element at `(row, column)`.
    ///
    /// # Panics
    /// Panics if the position is outside the view.
    #[inline]
    #[track_caller]
    pub fn at(&self, row: usize, column: usize) -> &'a T {
        check_index(self.shape, row, column);
        &self.data[row * self.stride() + column]
    }

    /// The element at `(row, column)`, or `None` if it is outside the view.
    #[inline]
    pub fn get(&self, row: usize, column: usize) -> Option<&'a T> {
        if row < self.shape.rows && column < self.shape.columns {
            Some(&self.data[row * self.stride() + column])
        } else {
            None
        }
    }

    /// Row `i` as a slice of `columns` elements, not including the gap.
    ///
    /// # Panics
    /// Panics if `i` is not a row of the view.
    #[inline]
    #[track_caller]
    pub fn row(&self, i: usize) -> &'a [T] {
        check_row(self.shape, i);
        let start = i * self.stride();
        &self.data[start..start + self.shape.columns]
    }

    #[inline]
    pub fn get_row(&self, i: usize) -> Option<&'a [T]> {
        (i < self.shape.rows).then(|| {
            let start = i * self.stride();
            &self.data[start..start + self.shape.columns]
        })
    }

    /// All elements as one slice.
    ///
    /// # Errors
    /// Returns [`GridError::NonContiguousView`] if the rows are not back to back.
    pub fn as_flat(&self) -> Result<&'a [T]> {
        if !self.contiguous() {
            tracing::debug!(shape = %self.shape, row_gap = self.row_gap, "refusing to flatten gapped view");
            return Err(GridError::NonContiguousView {
                rows: self.shape.rows,
                row_gap: self.row_gap,
            });
        }
        Ok(self.data)
    }

    /// The part of this view inside `extent`, clamped to the view's shape.
    ///
    /// The result shares memory with this view; its row gap grows by the
    /// number of columns cut away.
    pub fn sub_view(&self, extent: Extent2D) -> GridView<'a, T> {
        let (start, shape, row_gap, len) =
            sub_region(self.shape, self.row_gap, self.data.len(), extent);
        GridView {
            data: &self.data[start..start + len],
            shape,
            row_gap,
        }
    }

    /// Iterate over the rows.
    pub fn rows(&self) -> Rows<'a, T> {
        Rows {
            data: self.data,
            columns: self.shape.columns,
            row_gap: self.row_gap,
            remaining: self.shape.rows,
        }
    }

    /// Iterate over all elements in row-major order, skipping the gaps.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &'a T> + 'a {
        self.rows().flatten()
    }

    /// Copy the view into a new owned grid.
    pub fn to_grid(&self) -> Grid<T>
    where
        T: Clone,
    {
        let mut values = Vec::with_capacity(self.len());
        for row in self.rows() {
            values.extend_from_slice(row);
        }
        Grid::from_parts(values, self.shape)
    }
}

impl<'a, T> Index<(usize, usize)> for GridView<'a, T> {
    type Output = T;

    #[track_caller]
    fn index(&self, (row, column): (usize, usize)) -> &T {
        self.at(row, column)
    }
}

impl<'a, T> Index<Index2D> for GridView<'a, T> {
    type Output = T;

    #[track_caller]
    fn index(&self, index: Index2D) -> &T {
        self.at(index.row, index.column)
    }
}

/// Views are equal if they have the same shape and the same elements.
///
/// The gaps are not compared.
impl<T: PartialEq> PartialEq for GridView<'_, T> {
    fn eq(&self, other: &Self) -> bool {
        if self.shape != other.shape {
            return false;
        }
        if self.row_gap == other.row_gap && std::ptr::eq(self.as_ptr(), other.as_ptr()) {
            return true;
        }
        equal_with_gaps(
            self.data,
            self.row_gap,
            other.data,
            other.row_gap,
            self.shape.columns,
            self.shape.rows,
        )
    }
}

impl<T: Eq> Eq for GridView<'_, T> {}

impl<'a, T> IntoIterator for GridView<'a, T> {
    type Item = &'a [T];
    type IntoIter = Rows<'a, T>;

    fn into_iter(self) -> Rows<'a, T> {
        self.rows()
    }
}

// ============================================================================
// GridViewMut
// ============================================================================

/// Mutable 2-D view.
///
/// Writes through the view are visible in the memory it borrows, so writing
/// into a sub-view of a [`Grid`] changes the grid.
pub struct GridViewMut<'a, T> {
    data: &'a mut [T],
    shape: Size2D,
    row_gap: usize,
}

impl<T: fmt::Debug> fmt::Debug for GridViewMut<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GridViewMut")
            .field("shape", &self.shape)
            .field("row_gap", &self.row_gap)
            .field("rows", &DebugRows(self.view().rows()))
            .finish()
    }
}

impl<'a, T> GridViewMut<'a, T> {
    /// Mutable view of `data` with back-to-back rows.
    ///
    /// # Panics
    /// Panics if `data` holds fewer than `rows * columns` elements.
    #[track_caller]
    pub fn new(data: &'a mut [T], shape: Size2D) -> Self {
        Self::with_row_gap(data, shape, 0)
    }

    /// Mutable view of `data` whose rows are `row_gap` elements apart.
    ///
    /// # Panics
    /// Panics if `data` is shorter than the span of the view.
    #[track_caller]
    pub fn with_row_gap(data: &'a mut [T], shape: Size2D, row_gap: usize) -> Self {
        let len = checked_span(data.len(), shape, row_gap);
        Self {
            data: &mut data[..len],
            shape,
            row_gap,
        }
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
    pub fn row_gap(&self) -> usize {
        self.row_gap
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.shape.rows * self.shape.columns
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.shape.is_empty()
    }

    #[inline]
    pub fn contiguous(&self) -> bool {
        self.row_gap == 0 || self.shape.rows <= 1
    }

    #[inline]
    pub fn as_ptr(&self) -> *const T {
        self.data.as_ptr()
    }

    /// Distance between row starts. Saturates for single-row views with a
    /// huge gap, where only row 0 is ever addressed.
    #[inline]
    fn stride(&self) -> usize {
        self.shape.columns.saturating_add(self.row_gap)
    }

    /// Reborrow as a read-only view.
    pub fn view(&self) -> GridView<'_, T> {
        GridView {
            data: &*self.data,
            shape: self.shape,
            row_gap: self.row_gap,
        }
    }

    /// Reborrow as a shorter-lived mutable view.
    pub fn reborrow(&mut self) -> GridViewMut<'_, T> {
        GridViewMut {
            data: &mut *self.data,
            shape: self.shape,
            row_gap: self.row_gap,
        }
    }

    /// # Panics
    /// Panics if the position is outside the view.
    #[inline]
    #[track_caller]
    pub fn at(&self, row: usize, column: usize) -> &T {
        check_index(self.shape, row, column);
        &self.data[row * self.stride() + column]
    }

    /// # Panics
    /// Panics if the position is outside the view.
    #[inline]
    #[track_caller]
    pub fn at_mut(&mut self, row: usize, column: usize) -> &mut T {
        check_index(self.shape, row, column);
        let stride = self.stride();
        &mut self.data[row * stride + column]
    }

    #[inline]
    pub fn get(&self, row: usize, column: usize) -> Option<&T> {
        self.view().get(row, column)
    }

    #[inline]
    pub fn get_mut(&mut self, row: usize, column: usize) -> Option<&mut T> {
        if row < self.shape.rows && column < self.shape.columns {
            let stride = self.stride();
            Some(&mut self.data[row * stride + column])
        } else {
            None
        }
    }

    /// # Panics
    /// Panics if `i` is not a row of the view.
    #[inline]
    #[track_caller]
    pub fn row(&self, i: usize) -> &[T] {
        check_row(self.shape, i);
        let start = i * self.stride();
        &self.data[start..start + self.shape.columns]
    }

    /// # Panics
    /// Panics if `i` is not a row of the view.
    #[inline]
    #[track_caller]
    pub fn row_mut(&mut self, i: usize) -> &mut [T] {
        check_row(self.shape, i);
        let start = i * self.stride();
        let columns = self.shape.columns;
        &mut self.data[start..start + columns]
    }

    #[inline]
    pub fn get_row(&self, i: usize) -> Option<&[T]> {
        self.view().get_row(i)
    }

    /// # Errors
    /// Returns [`GridError::NonContiguousView`] if the rows are not back to back.
    pub fn as_flat(&self) -> Result<&[T]> {
        self.view().as_flat()
    }

    /// # Errors
    /// Returns [`GridError::NonContiguousView`] if the rows are not back to back.
    pub fn as_flat_mut(&mut self) -> Result<&mut [T]> {
        self.reborrow().into_flat()
    }

    /// Turn the view into one mutable slice.
    ///
    /// # Errors
    /// Returns [`GridError::NonContiguousView`] if the rows are not back to back.
    pub fn into_flat(self) -> Result<&'a mut [T]> {
        if !self.contiguous() {
            tracing::debug!(shape = %self.shape, row_gap = self.row_gap, "refusing to flatten gapped view");
            return Err(GridError::NonContiguousView {
                rows: self.shape.rows,
                row_gap: self.row_gap,
            });
        }
        Ok(self.data)
    }

    /// Read-only view of the part inside `extent`, clamped to the view's shape.
    pub fn sub_view(&self, extent: Extent2D) -> GridView<'_, T> {
        self.view().sub_view(extent)
    }

    /// Mutable view of the part inside `extent`, clamped to the view's shape.
    pub fn sub_view_mut(&mut self, extent: Extent2D) -> GridViewMut<'_, T> {
        self.reborrow().into_sub_view(extent)
    }

    /// Narrow this view to `extent`, clamped to the view's shape.
    pub fn into_sub_view(self, extent: Extent2D) -> GridViewMut<'a, T> {
        let (start, shape, row_gap, len) =
            sub_region(self.shape, self.row_gap, self.data.len(), extent);
        GridViewMut {
            data: &mut self.data[start..start + len],
            shape,
            row_gap,
        }
    }

    /// Overwrite every element of the view; the gaps are left alone.
    pub fn fill(&mut self, value: T)
    where
        T: Clone,
    {
        for row in self.rows_mut() {
            row.fill(value.clone());
        }
    }

    pub fn rows(&self) -> Rows<'_, T> {
        self.view().rows()
    }

    pub fn rows_mut(&mut self) -> RowsMut<'_, T> {
        self.reborrow().into_rows()
    }

    /// Turn the view into an iterator over its mutable rows.
    pub fn into_rows(self) -> RowsMut<'a, T> {
        RowsMut {
            data: self.data,
            columns: self.shape.columns,
            row_gap: self.row_gap,
            remaining: self.shape.rows,
        }
    }

    pub fn to_grid(&self) -> Grid<T>
    where
        T: Clone,
    {
        self.view().to_grid()
    }
}

impl<T> Index<(usize, usize)> for GridViewMut<'_, T> {
    type Output = T;

    #[track_caller]
    fn index(&self, (row, column): (usize, usize)) -> &T {
        self.at(row, column)
    }
}

impl<T> IndexMut<(usize, usize)> for GridViewMut<'_, T> {
    #[track_caller]
    fn index_mut(&mut self, (row, column): (usize, usize)) -> &mut T {
        self.at_mut(row, column)
    }
}

impl<T> Index<Index2D> for GridViewMut<'_, T> {
    type Output = T;

    #[track_caller]
    fn index(&self, index: Index2D) -> &T {
        self.at(index.row, index.column)
    }
}

impl<T> IndexMut<Index2D> for GridViewMut<'_, T> {
    #[track_caller]
    fn index_mut(&mut self, index: Index2D) -> &mut T {
        self.at_mut(index.row, index.column)
    }
}

impl<T: PartialEq> PartialEq for GridViewMut<'_, T> {
    fn eq(&self, other: &Self) -> bool {
        self.view() == other.view()
    }
}

impl<T: Eq> Eq for GridViewMut<'_, T> {}

impl<'a, T> IntoIterator for GridViewMut<'a, T> {
    type Item = &'a mut [T];
    type IntoIter = RowsMut<'a, T>;

    fn into_iter(self) -> RowsMut<'a, T> {
        self.into_rows()
    }
}

// ============================================================================
// Row iterators
// ============================================================================

/// Iterator over the rows of a [`GridView`].
///
/// Two iterators compare equal when they are at the same position of the
/// same memory with the same row length and row gap; element values are not
/// compared.
pub struct Rows<'a, T> {
    data: &'a [T],
    columns: usize,
    row_gap: usize,
    remaining: usize,
}

impl<T> Clone for Rows<'_, T> {
    fn clone(&self) -> Self {
        Self {
            data: self.data,
            columns: self.columns,
            row_gap: self.row_gap,
            remaining: self.remaining,
        }
    }
}

impl<T> fmt::Debug for Rows<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Rows")
            .field("ptr", &self.data.as_ptr())
            .field("columns", &self.columns)
            .field("row_gap", &self.row_gap)
            .field("remaining", &self.remaining)
            .finish()
    }
}

impl<T> PartialEq for Rows<'_, T> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.data.as_ptr(), other.data.as_ptr())
            && self.columns == other.columns
            && self.row_gap == other.row_gap
    }
}

impl<T> Eq for Rows<'_, T> {}

impl<'a, T> Iterator for Rows<'a, T> {
    type Item = &'a [T];

    fn next(&mut self) -> Option<&'a [T]> {
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;
        let row = &self.data[..self.columns];
        let step = if self.remaining == 0 {
            self.data.len()
        } else {
            self.columns + self.row_gap
        };
        self.data = &self.data[step..];
        Some(row)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }

    fn nth(&mut self, n: usize) -> Option<&'a [T]> {
        if n >= self.remaining {
            self.data = &self.data[self.data.len()..];
            self.remaining = 0;
            return None;
        }
        self.data = &self.data[n * self.columns.saturating_add(self.row_gap)..];
        self.remaining -= n;
        self.next()
    }
}

impl<T> DoubleEndedIterator for Rows<'_, T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;
        let len = self.data.len();
        let row = &self.data[len - self.columns..];
        let keep = if self.remaining == 0 {
            0
        } else {
            len - self.columns - self.row_gap
        };
        self.data = &self.data[..keep];
        Some(row)
    }
}

impl<T> ExactSizeIterator for Rows<'_, T> {}

impl<T> FusedIterator for Rows<'_, T> {}

/// Iterator over the rows of a [`GridViewMut`].
pub struct RowsMut<'a, T> {
    data: &'a mut [T],
    columns: usize,
    row_gap: usize,
    remaining: usize,
}

impl<T> fmt::Debug for RowsMut<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RowsMut")
            .field("ptr", &self.data.as_ptr())
            .field("columns", &self.columns)
            .field("row_gap", &self.row_gap)
            .field("remaining", &self.remaining)
            .finish()
    }
}

impl<'a, T> Iterator for RowsMut<'a, T> {
    type Item = &'a mut [T];

    fn next(&mut self) -> Option<&'a mut [T]> {
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;
        let data = std::mem::take(&mut self.data);
        let step = if self.remaining == 0 {
            data.len()
        } else {
            self.columns + self.row_gap
        };
        let (head, tail) = data.split_at_mut(step);
        self.data = tail;
        Some(&mut head[..self.columns])
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> DoubleEndedIterator for RowsMut<'_, T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;
        let data = std::mem::take(&mut self.data);
        let len = data.len();
        let (head, row) = data.split_at_mut(len - self.columns);
        self.data = if self.remaining == 0 {
            &mut head[..0]
        } else {
            let keep = head.len() - self.row_gap;
            &mut head[..keep]
        };
        Some(row)
    }
}

impl<T> ExactSizeIterator for RowsMut<'_, T> {}

impl<T> FusedIterator for RowsMut<'_, T> {}
