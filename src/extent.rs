//! Rectangular sub-regions: an origin plus a size.

use std::fmt;

use crate::index::{Coordinate, Index2D, Size2D};

/// A rectangle given by its top-left corner and its size.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Extent2D<T = usize> {
    pub origin: Index2D<T>,
    pub size: Size2D<T>,
}

impl<T: Coordinate> Extent2D<T> {
    #[inline]
    pub fn new(origin: Index2D<T>, size: Size2D<T>) -> Self {
        Self { origin, size }
    }

    /// An extent starting at `origin` and reaching to the end of whatever it is clamped to.
    #[inline]
    pub fn from_origin(origin: Index2D<T>) -> Self {
        Self::new(origin, Size2D::max_value())
    }

    #[inline]
    pub fn min_index(&self) -> Index2D<T> {
        self.origin
    }

    /// One past the bottom-right corner. Saturates instead of overflowing.
    #[inline]
    pub fn max_index(&self) -> Index2D<T> {
        self.origin + self.size
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.size.is_empty()
    }

    /// Shrink the extent so that it lies inside a region of the given size.
    ///
    /// The origin is pulled back onto the region first, then the size is cut
    /// to what remains past the origin. Never panics.
    pub fn clamp(&self, size: Size2D<T>) -> Self {
        let origin = self.origin.component_min(size.into());
        Self::new(origin, self.size.component_min(size - origin))
    }

    /// The overlap of two extents, or `None` if they do not overlap.
    pub fn intersection(&self, other: &Self) -> Option<Self> {
        let min = self.min_index().component_max(other.min_index());
        let max = self.max_index().component_min(other.max_index());
        if min.row >= max.row || min.column >= max.column {
            return None;
        }
        Some(Self::new(min, max - min))
    }

    /// The smallest extent containing both.
    pub fn union(&self, other: &Self) -> Self {
        let min = self.min_index().component_min(other.min_index());
        let max = self.max_index().component_max(other.max_index());
        Self::new(min, max - min)
    }
}

impl<T: Coordinate> From<Size2D<T>> for Extent2D<T> {
    /// The extent covering a whole region of the given size.
    fn from(size: Size2D<T>) -> Self {
        Self::new(Index2D::new(T::zero(), T::zero()), size)
    }
}

impl<T: fmt::Display> fmt::Display for Extent2D<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{{}, {}}}", self.origin, self.size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extent(r: i32, c: i32, nr: i32, nc: i32) -> Extent2D<i32> {
        Extent2D::new(Index2D::new(r, c), Size2D::new(nr, nc))
    }

    #[test]
    fn test_intersection() {
        let a = extent(2, 2, 4, 4);

        let c = a.intersection(&extent(4, 4, 4, 4)).unwrap();
        assert_eq!(c.origin, Index2D::new(4, 4));
        assert_eq!(c.size, Size2D::new(2, 2));

        assert!(a.intersection(&extent(6, 6, 4, 4)).is_none());

        let c = a.intersection(&extent(0, 0, 3, 3)).unwrap();
        assert_eq!(c, extent(2, 2, 1, 1));

        // Touching edges do not overlap.
        assert!(a.intersection(&extent(0, 0, 2, 2)).is_none());
    }

    #[test]
    fn test_union() {
        let a = extent(2, 2, 4, 4);
        assert_eq!(a.union(&extent(0, 5, 1, 4)), extent(0, 2, 6, 7));
        assert_eq!(a.union(&a), a);
    }

    #[test]
    fn test_max_index_saturates() {
        let mut a = Extent2D::<u32>::from_origin(Index2D::new(1000, 1000));
        assert_eq!(a.size, Size2D::max_value());
        assert_eq!(a.max_index(), Index2D::max_value());
        a.origin += Size2D::new(500, 500);
        assert_eq!(a.max_index(), Index2D::max_value());
    }

    #[test]
    fn test_clamp() {
        let a = extent(20, 50, 100, 200);
        assert_eq!(a.clamp(Size2D::new(1000, 1000)), a);
        assert_eq!(a.clamp(Size2D::new(120, 250)), a);
        assert_eq!(a.clamp(Size2D::new(119, 249)), extent(20, 50, 99, 199));
        assert_eq!(a.clamp(Size2D::new(80, 90)), extent(20, 50, 60, 40));
        assert_eq!(a.clamp(Size2D::new(10, 10)), extent(10, 10, 0, 0));
    }

    #[test]
    fn test_clamp_from_origin() {
        let a = Extent2D::<usize>::from_origin(Index2D::new(1, 2));
        let c = a.clamp(Size2D::new(4, 4));
        assert_eq!(c.origin, Index2D::new(1, 2));
        assert_eq!(c.size, Size2D::new(3, 2));
    }

    #[test]
    fn test_display() {
        assert_eq!(extent(1, 2, 3, 4).to_string(), "{(1, 2), (3, 4)}");
    }

    #[test]
    fn test_from_size() {
        let e = Extent2D::from(Size2D::<usize>::new(3, 2));
        assert_eq!(e.origin, Index2D::new(0, 0));
        assert!(!e.is_empty());
        assert!(Extent2D::from(Size2D::<usize>::new(0, 2)).is_empty());
    }
}
