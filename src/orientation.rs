//! The eight symmetries of a rectangle, viewed as traversal orders.
//!
//! An [`Orientation`] describes the order in which a grid is read: which axis
//! is traversed first, whether lines are visited in reverse, and whether the
//! elements inside each line are reversed. Together the eight orientations
//! form the dihedral group of the rectangle, with [`Orientation::Rows`] as
//! the identity.
//!
//! # Encoding
//!
//! Each orientation has a 3-bit code. Bit 2 is the transposed flag: lines
//! run along the columns of the source instead of its rows. The two low bits
//! select which of "visit lines in reverse order" and "reverse the elements
//! inside each line" apply. In the untransposed half bit 1 reverses the line
//! order and bit 0 the elements; in the transposed half the two swap, so
//! that a counter-clockwise quarter turn of [`Orientation::Rows`] lands on
//! [`Orientation::ColumnsReversedOrder`]. This is also why
//! [`invert`](Orientation::invert) exchanges codes 5 and 6.
//!
//! All operations are constant-time bit manipulation.

use std::fmt;

/// One of the eight rectangle symmetries.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Orientation {
    /// Ordinary row-major traversal: top to bottom, left to right.
    #[default]
    Rows = 0,
    /// Rows top to bottom, each row right to left.
    ReversedRows = 1,
    /// Rows bottom to top, each row left to right.
    RowsReversedOrder = 2,
    /// Rows bottom to top, each row right to left.
    ReversedRowsReversedOrder = 3,
    /// Columns left to right, each column top to bottom.
    Columns = 4,
    /// Columns right to left, each column top to bottom.
    ColumnsReversedOrder = 5,
    /// Columns left to right, each column bottom to top.
    ReversedColumns = 6,
    /// Columns right to left, each column bottom to top.
    ReversedColumnsReversedOrder = 7,
}

const TRANSPOSED_BIT: u8 = 0b100;

/// XOR masks applied by a counter-clockwise rotation, indexed by
/// `[transposed][turns mod 4]`.
const ROTATION_MASKS: [[u8; 4]; 2] = [[0b000, 0b101, 0b011, 0b110], [0b000, 0b110, 0b011, 0b101]];

/// Codes 1, 2, 4 and 7 are the mirror images (determinant -1).
const REFLECTIONS: u8 = 0b1001_0110;

impl Orientation {
    /// All orientations in code order.
    pub const ALL: [Orientation; 8] = [
        Orientation::Rows,
        Orientation::ReversedRows,
        Orientation::RowsReversedOrder,
        Orientation::ReversedRowsReversedOrder,
        Orientation::Columns,
        Orientation::ColumnsReversedOrder,
        Orientation::ReversedColumns,
        Orientation::ReversedColumnsReversedOrder,
    ];

    #[inline]
    pub const fn code(self) -> u8 {
        self as u8
    }

    /// The orientation with the given code. Only the low three bits are used.
    #[inline]
    pub const fn from_code(code: u8) -> Self {
        Self::ALL[(code & 0b111) as usize]
    }

    /// True if lines run along the columns of the source.
    #[inline]
    pub const fn is_transposed(self) -> bool {
        self.code() & TRANSPOSED_BIT != 0
    }

    /// True if the destination has the same shape as the source.
    #[inline]
    pub const fn is_row_major(self) -> bool {
        self.code() < 4
    }

    /// True for the four mirror-image symmetries, false for the identity and
    /// the three proper rotations.
    #[inline]
    pub const fn is_reflection(self) -> bool {
        REFLECTIONS & (1 << self.code()) != 0
    }

    /// Swap the roles of rows and columns. Involutive.
    #[inline]
    pub const fn transpose(self) -> Self {
        Self::from_code(self.code() ^ TRANSPOSED_BIT)
    }

    /// The orientation that undoes this one.
    ///
    /// Only the quarter turns (codes 5 and 6) differ from their inverse;
    /// everything else is its own inverse.
    #[inline]
    pub const fn invert(self) -> Self {
        let u = self.code();
        let quarter_turn = (u >> 2) & (u ^ (u >> 1)) & 1;
        Self::from_code(u ^ (quarter_turn * 0b11))
    }

    /// Rotate counter-clockwise by `turns` quarter turns. Negative turns rotate clockwise.
    #[inline]
    pub const fn rotate(self, turns: i32) -> Self {
        let u = self.code();
        let half = (u >> 2) as usize;
        let turns = turns.rem_euclid(4) as usize;
        Self::from_code(u ^ ROTATION_MASKS[half][turns])
    }

    const fn name(self) -> &'static str {
        match self {
            Orientation::Rows => "Rows",
            Orientation::ReversedRows => "ReversedRows",
            Orientation::RowsReversedOrder => "RowsReversedOrder",
            Orientation::ReversedRowsReversedOrder => "ReversedRowsReversedOrder",
            Orientation::Columns => "Columns",
            Orientation::ColumnsReversedOrder => "ColumnsReversedOrder",
            Orientation::ReversedColumns => "ReversedColumns",
            Orientation::ReversedColumnsReversedOrder => "ReversedColumnsReversedOrder",
        }
    }
}

impl fmt::Display for Orientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
