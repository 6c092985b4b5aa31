//! Two-dimensional integer coordinates and sizes with saturating arithmetic.
//!
//! [`Index2D`] names a position `(row, column)`; [`Size2D`] names an extent
//! `(rows, columns)`. Both are generic over any primitive integer and never
//! wrap: every operator clamps at the bounds of the element type.

use std::fmt;
use std::ops::{Add, AddAssign, Sub};

use num_traits::{NumCast, PrimInt, SaturatingAdd, SaturatingMul, SaturatingSub};

/// Integer types usable as grid coordinates.
pub trait Coordinate: PrimInt + SaturatingAdd + SaturatingSub + SaturatingMul {}

impl<T: PrimInt + SaturatingAdd + SaturatingSub + SaturatingMul> Coordinate for T {}

#[inline]
fn sat_add<T: Coordinate>(a: T, b: T) -> T {
    SaturatingAdd::saturating_add(&a, &b)
}

#[inline]
fn sat_sub<T: Coordinate>(a: T, b: T) -> T {
    SaturatingSub::saturating_sub(&a, &b)
}

// ============================================================================
// Index2D
// ============================================================================

/// A `(row, column)` position.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Index2D<T = usize> {
    pub row: T,
    pub column: T,
}

impl<T: Coordinate> Index2D<T> {
    #[inline]
    pub const fn new(row: T, column: T) -> Self {
        Self { row, column }
    }

    /// The largest representable index.
    #[inline]
    pub fn max_value() -> Self {
        Self::new(T::max_value(), T::max_value())
    }

    /// Swap row and column.
    #[inline]
    pub fn transposed(self) -> Self {
        Self::new(self.column, self.row)
    }

    /// Component-wise minimum.
    #[inline]
    pub fn component_min(self, other: Self) -> Self {
        Self::new(self.row.min(other.row), self.column.min(other.column))
    }

    /// Component-wise maximum.
    #[inline]
    pub fn component_max(self, other: Self) -> Self {
        Self::new(self.row.max(other.row), self.column.max(other.column))
    }

    /// Convert to another integer type, or `None` if either component does not fit.
    pub fn cast<U: Coordinate>(self) -> Option<Index2D<U>> {
        Some(Index2D::new(
            <U as NumCast>::from(self.row)?,
            <U as NumCast>::from(self.column)?,
        ))
    }
}

impl<T: Coordinate> From<(T, T)> for Index2D<T> {
    fn from((row, column): (T, T)) -> Self {
        Self::new(row, column)
    }
}

impl<T> From<Index2D<T>> for (T, T) {
    fn from(index: Index2D<T>) -> Self {
        (index.row, index.column)
    }
}

impl<T: Coordinate> From<Size2D<T>> for Index2D<T> {
    fn from(size: Size2D<T>) -> Self {
        Self::new(size.rows, size.columns)
    }
}

impl<T: Coordinate> Add<Size2D<T>> for Index2D<T> {
    type Output = Index2D<T>;

    #[inline]
    fn add(self, rhs: Size2D<T>) -> Index2D<T> {
        Index2D::new(sat_add(self.row, rhs.rows), sat_add(self.column, rhs.columns))
    }
}

impl<T: Coordinate> AddAssign<Size2D<T>> for Index2D<T> {
    #[inline]
    fn add_assign(&mut self, rhs: Size2D<T>) {
        *self = *self + rhs;
    }
}

/// The distance between two indices, saturating at zero for unsigned types.
impl<T: Coordinate> Sub for Index2D<T> {
    type Output = Size2D<T>;

    #[inline]
    fn sub(self, rhs: Index2D<T>) -> Size2D<T> {
        Size2D::new(sat_sub(self.row, rhs.row), sat_sub(self.column, rhs.column))
    }
}

impl<T: fmt::Display> fmt::Display for Index2D<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.column)
    }
}

// ============================================================================
// Size2D
// ============================================================================

/// A `(rows, columns)` extent.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Size2D<T = usize> {
    pub rows: T,
    pub columns: T,
}

impl<T: Coordinate> Size2D<T> {
    #[inline]
    pub const fn new(rows: T, columns: T) -> Self {
        Self { rows, columns }
    }

    /// The largest representable size.
    #[inline]
    pub fn max_value() -> Self {
        Self::new(T::max_value(), T::max_value())
    }

    /// True if either dimension is zero (or negative for signed types).
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.rows <= T::zero() || self.columns <= T::zero()
    }

    /// Number of elements, saturating on overflow.
    #[inline]
    pub fn count(&self) -> T {
        SaturatingMul::saturating_mul(&self.rows, &self.columns)
    }

    #[inline]
    pub fn transposed(self) -> Self {
        Self::new(self.columns, self.rows)
    }

    #[inline]
    pub fn component_min(self, other: Self) -> Self {
        Self::new(self.rows.min(other.rows), self.columns.min(other.columns))
    }

    #[inline]
    pub fn component_max(self, other: Self) -> Self {
        Self::new(self.rows.max(other.rows), self.columns.max(other.columns))
    }

    /// Convert to another integer type, or `None` if either component does not fit.
    pub fn cast<U: Coordinate>(self) -> Option<Size2D<U>> {
        Some(Size2D::new(
            <U as NumCast>::from(self.rows)?,
            <U as NumCast>::from(self.columns)?,
        ))
    }
}

impl<T: Coordinate> From<(T, T)> for Size2D<T> {
    fn from((rows, columns): (T, T)) -> Self {
        Self::new(rows, columns)
    }
}

impl<T> From<Size2D<T>> for (T, T) {
    fn from(size: Size2D<T>) -> Self {
        (size.rows, size.columns)
    }
}

impl<T: Coordinate> Add for Size2D<T> {
    type Output = Size2D<T>;

    #[inline]
    fn add(self, rhs: Size2D<T>) -> Size2D<T> {
        Size2D::new(sat_add(self.rows, rhs.rows), sat_add(self.columns, rhs.columns))
    }
}

/// The part of a size that remains past `rhs`.
impl<T: Coordinate> Sub<Index2D<T>> for Size2D<T> {
    type Output = Size2D<T>;

    #[inline]
    fn sub(self, rhs: Index2D<T>) -> Size2D<T> {
        Size2D::new(sat_sub(self.rows, rhs.row), sat_sub(self.columns, rhs.column))
    }
}

impl<T: fmt::Display> fmt::Display for Size2D<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.rows, self.columns)
    }
}
