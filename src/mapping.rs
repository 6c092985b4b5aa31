//! Coordinate translation between a grid and its image under an [`Orientation`].
//!
//! An [`IndexMapping`] relates a source grid of a given shape to the
//! destination grid obtained by reading the source in some orientation and
//! writing the elements out row by row. It is a pure function of
//! `(source shape, orientation)` and is cheap to rebuild.
//!
//! ```
//! use strided_grid::{Index2D, IndexMapping, Orientation, Size2D};
//!
//! // Rotate a 2x3 grid a quarter turn counter-clockwise.
//! let mapping = IndexMapping::new(Size2D::new(2, 3), Orientation::Rows.rotate(1));
//! assert_eq!(mapping.destination_shape(), Size2D::new(3, 2));
//!
//! // The top-right source element ends up in the top-left corner.
//! assert_eq!(mapping.to_destination(Index2D::new(0, 2)), Index2D::new(0, 0));
//! assert_eq!(mapping.to_source(Index2D::new(0, 0)), Index2D::new(0, 2));
//! ```

use std::iter::FusedIterator;

use crate::index::{Index2D, Size2D};
use crate::orientation::Orientation;

/// Apply the coordinate formula of `orientation` to `(i, j)`.
///
/// `outer` and `inner` are the extents that the reversed coordinates are
/// reflected against: the first and second source dimensions for the
/// untransposed half, and the ones the transposed half reads from.
#[inline]
fn apply(orientation: Orientation, outer: usize, inner: usize, i: usize, j: usize) -> Index2D {
    let u = orientation.code();
    if orientation.is_row_major() {
        Index2D::new(
            if u & 0b10 != 0 { outer - 1 - i } else { i },
            if u & 0b01 != 0 { inner - 1 - j } else { j },
        )
    } else {
        Index2D::new(
            if u & 0b01 != 0 { inner - 1 - j } else { j },
            if u & 0b10 != 0 { outer - 1 - i } else { i },
        )
    }
}

/// Bidirectional coordinate mapping for one source shape and orientation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct IndexMapping {
    source_shape: Size2D,
    orientation: Orientation,
    inverse: Orientation,
}

impl IndexMapping {
    pub fn new(source_shape: Size2D, orientation: Orientation) -> Self {
        Self {
            source_shape,
            orientation,
            inverse: orientation.invert(),
        }
    }

    #[inline]
    pub fn source_shape(&self) -> Size2D {
        self.source_shape
    }

    #[inline]
    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    /// Shape of the destination grid: the source shape, transposed when the
    /// orientation reads columns.
    #[inline]
    pub fn destination_shape(&self) -> Size2D {
        if self.orientation.is_row_major() {
            self.source_shape
        } else {
            self.source_shape.transposed()
        }
    }

    /// Where the source element at `index` lands in the destination.
    ///
    /// # Panics
    /// Panics if `index` is outside the source shape.
    pub fn to_destination(&self, index: Index2D) -> Index2D {
        let shape = self.source_shape;
        assert!(
            index.row < shape.rows && index.column < shape.columns,
            "source index {index} out of bounds for shape {shape}"
        );
        apply(
            self.orientation,
            shape.rows,
            shape.columns,
            index.row,
            index.column,
        )
    }

    /// Which source element lands at `index` in the destination.
    ///
    /// # Panics
    /// Panics if `index` is outside the destination shape.
    pub fn to_source(&self, index: Index2D) -> Index2D {
        let shape = self.destination_shape();
        assert!(
            index.row < shape.rows && index.column < shape.columns,
            "destination index {index} out of bounds for shape {shape}"
        );
        self.to_source_unchecked(index)
    }

    #[inline]
    fn to_source_unchecked(&self, index: Index2D) -> Index2D {
        let shape = self.source_shape;
        if self.inverse.is_row_major() {
            apply(self.inverse, shape.rows, shape.columns, index.row, index.column)
        } else {
            // Destination rows run along source columns, so the reflection
            // extents swap relative to the forward direction.
            apply(self.inverse, shape.columns, shape.rows, index.row, index.column)
        }
    }

    /// Source coordinates in destination row-major order.
    pub fn traverse(&self) -> Traversal {
        Traversal {
            mapping: *self,
            columns: self.destination_shape().columns,
            front: 0,
            back: self.source_shape.count(),
        }
    }
}

/// Source coordinates of a grid read in the given orientation.
///
/// ```
/// use strided_grid::{traverse, Index2D, Orientation, Size2D};
///
/// let order: Vec<_> = traverse(Size2D::new(2, 2), Orientation::Columns).collect();
/// assert_eq!(
///     order,
///     [Index2D::new(0, 0), Index2D::new(1, 0), Index2D::new(0, 1), Index2D::new(1, 1)]
/// );
/// ```
pub fn traverse(shape: Size2D, orientation: Orientation) -> Traversal {
    IndexMapping::new(shape, orientation).traverse()
}

/// Iterator returned by [`traverse`] and [`IndexMapping::traverse`].
#[derive(Debug, Clone)]
pub struct Traversal {
    mapping: IndexMapping,
    columns: usize,
    front: usize,
    back: usize,
}

impl Traversal {
    #[inline]
    fn source_at(&self, position: usize) -> Index2D {
        let destination = Index2D::new(position / self.columns, position % self.columns);
        self.mapping.to_source_unchecked(destination)
    }
}

impl Iterator for Traversal {
    type Item = Index2D;

    fn next(&mut self) -> Option<Index2D> {
        if self.front == self.back {
            return None;
        }
        let index = self.source_at(self.front);
        self.front += 1;
        Some(index)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.back - self.front;
        (n, Some(n))
    }
}

impl DoubleEndedIterator for Traversal {
    fn next_back(&mut self) -> Option<Index2D> {
        if self.front == self.back {
            return None;
        }
        self.back -= 1;
        Some(self.source_at(self.back))
    }
}

impl ExactSizeIterator for Traversal {}

impl FusedIterator for Traversal {}
