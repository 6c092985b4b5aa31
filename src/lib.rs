//! Strided 2-D grids and the eight orientations of a rectangle.
//!
//! This crate provides an owned row-major buffer, borrowed views whose rows
//! may be separated by a gap, and an index-mapping engine that reads a grid
//! in any of the eight rectangle symmetries (identity, three rotations and
//! four reflections) without an intermediate buffer.
//!
//! # Core Types
//!
//! - [`Grid`]: owned `rows x columns` buffer
//! - [`GridView`] / [`GridViewMut`]: zero-copy views with a row gap
//! - [`Extent2D`]: rectangular sub-region, clamped when taking sub-views
//! - [`Orientation`]: traversal order, with [`transpose`](Orientation::transpose),
//!   [`invert`](Orientation::invert) and [`rotate`](Orientation::rotate)
//! - [`IndexMapping`]: coordinate translation between a grid and its oriented image
//!
//! # Operations
//!
//! - [`copy_into`]: copy a view into another in a given orientation
//! - [`copy_oriented`]: allocating variant of [`copy_into`]
//! - [`for_each_oriented`]: visit elements in a given orientation
//! - [`min_max`]: first minimum and maximum of a view
//! - [`traverse`]: source coordinates in oriented order
//!
//! # Example
//!
//! ```rust
//! use strided_grid::{copy_oriented, Extent2D, Grid, Index2D, Orientation, Size2D};
//!
//! let mut grid = Grid::from_vec((1..=12).collect(), Size2D::new(3, 4)).unwrap();
//!
//! // A 2x2 window in the bottom-right corner; rows are 2 elements apart.
//! let window = grid.sub_view(Extent2D::new(Index2D::new(1, 2), Size2D::new(2, 2)));
//! assert_eq!(window.row_gap(), 2);
//! assert!(window.as_flat().is_err());
//!
//! // Rotate it a quarter turn counter-clockwise.
//! let rotated = copy_oriented(&window, Orientation::Rows.rotate(1));
//! assert_eq!(rotated.as_slice(), &[8, 12, 7, 11]);
//!
//! // Writes through a mutable sub-view land in the grid.
//! grid.sub_view_mut(Extent2D::from_origin(Index2D::new(2, 3))).fill(0);
//! assert_eq!(grid[(2, 3)], 0);
//! ```
//!
//! # Logging
//!
//! Storage operations emit `tracing` events at `trace` level, and failing
//! operations log the reason at `debug` level before returning an error.
//! Install a subscriber to see them.

mod extent;
mod grid;
mod index;
mod mapping;
mod ops;
mod orientation;
mod view;

// ============================================================================
// Coordinates
// ============================================================================
pub use extent::Extent2D;
pub use index::{Coordinate, Index2D, Size2D};

// ============================================================================
// Buffers and views
// ============================================================================
pub use grid::Grid;
pub use view::{are_identical, GridView, GridViewMut, Rows, RowsMut};

// ============================================================================
// Orientation and index mapping
// ============================================================================
pub use mapping::{traverse, IndexMapping, Traversal};
pub use orientation::Orientation;

// ============================================================================
// Operations
// ============================================================================
pub use ops::{copy_into, copy_oriented, for_each_oriented, min_max};

/// Errors that can occur in grid operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GridError {
    /// Storage length does not match `rows * columns`.
    #[error("size mismatch: expected {expected} elements, got {actual}")]
    SizeMismatch { expected: usize, actual: usize },

    /// A view with a row gap cannot be flattened into one slice.
    #[error("view with {rows} rows and row gap {row_gap} is not contiguous")]
    NonContiguousView { rows: usize, row_gap: usize },

    /// Destination shape differs from the oriented source shape.
    #[error("shape mismatch: {0} vs {1}")]
    ShapeMismatch(Size2D, Size2D),
}

/// Result type for grid operations.
pub type Result<T> = std::result::Result<T, GridError>;
