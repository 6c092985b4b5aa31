//! Orientation-driven copies and whole-view algorithms.

use crate::grid::Grid;
use crate::mapping::IndexMapping;
use crate::orientation::Orientation;
use crate::view::{GridView, GridViewMut};
use crate::{GridError, Result};

/// Copy `src`, read in `orientation`, into `dest` row by row.
///
/// `dest` must have the shape the orientation gives `src`: the same shape
/// for row-major orientations, the transposed shape otherwise.
///
/// # Errors
/// Returns [`GridError::ShapeMismatch`] with `(dest shape, expected shape)`
/// if the shapes disagree.
pub fn copy_into<T: Clone>(
    dest: &mut GridViewMut<'_, T>,
    src: &GridView<'_, T>,
    orientation: Orientation,
) -> Result<()> {
    let mapping = IndexMapping::new(src.shape(), orientation);
    let expected = mapping.destination_shape();
    if dest.shape() != expected {
        tracing::debug!(
            dest = %dest.shape(),
            %expected,
            %orientation,
            "destination shape does not match oriented source"
        );
        return Err(GridError::ShapeMismatch(dest.shape(), expected));
    }

    // Fast path: plain row-major copy
    if orientation == Orientation::Rows {
        for (d, s) in dest.rows_mut().zip(src.rows()) {
            d.clone_from_slice(s);
        }
        return Ok(());
    }

    let mut sources = mapping.traverse();
    for row in dest.rows_mut() {
        for (d, idx) in row.iter_mut().zip(sources.by_ref()) {
            *d = src.at(idx.row, idx.column).clone();
        }
    }
    Ok(())
}

/// Allocate a new grid holding `src` read in `orientation`.
pub fn copy_oriented<T: Clone>(src: &GridView<'_, T>, orientation: Orientation) -> Grid<T> {
    let mapping = IndexMapping::new(src.shape(), orientation);
    let data = mapping
        .traverse()
        .map(|idx| src.at(idx.row, idx.column).clone())
        .collect();
    Grid::from_parts(data, mapping.destination_shape())
}

/// Call `f` on every element of `src` in the order given by `orientation`.
///
/// Returns `f` so that stateful visitors can be inspected afterwards.
pub fn for_each_oriented<'a, T, F>(src: &GridView<'a, T>, orientation: Orientation, mut f: F) -> F
where
    F: FnMut(&'a T),
{
    if orientation == Orientation::Rows {
        src.iter().for_each(&mut f);
        return f;
    }
    for idx in IndexMapping::new(src.shape(), orientation).traverse() {
        f(src.at(idx.row, idx.column));
    }
    f
}

/// The first smallest and the first largest element in row-major order.
///
/// Returns `None` for an empty view. Elements in the row gaps are ignored.
/// Ties go to the earliest element for both results, unlike C++
/// `std::minmax_element`, which reports the last maximum.
pub fn min_max<'a, T: PartialOrd>(view: &GridView<'a, T>) -> Option<(&'a T, &'a T)> {
    let mut it = view.iter();
    let first = it.next()?;
    Some(it.fold((first, first), |(lo, hi), v| {
        (if v < lo { v } else { lo }, if v > hi { v } else { hi })
    }))
}
