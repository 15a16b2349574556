//! Strongly typed identifier wrappers.
//!
//! A `CellId` is the flat index `row * cols + col` of a grid cell.  Every
//! grid-shaped buffer in the workspace (occupancy, distance, predecessor,
//! heuristic, stamps) is a single contiguous `Vec` indexed by `CellId`.

use std::fmt;

/// Generate a typed ID wrapper around a primitive integer.
macro_rules! typed_id {
    ($(#[$attr:meta])* $vis:vis struct $name:ident($inner:ty);) => {
        $(#[$attr])*
        #[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        $vis struct $name(pub $inner);

        impl $name {
            /// Sentinel meaning "none": predecessor chains end here.
            pub const NONE: $name = $name(<$inner>::MAX);

            /// Cast to `usize` for direct use as a `Vec` index.
            #[inline(always)]
            pub fn index(self) -> usize {
                self.0 as usize
            }

            #[inline(always)]
            pub fn is_none(self) -> bool {
                self == Self::NONE
            }
        }

        impl Default for $name {
            /// Returns the `NONE` sentinel so unset IDs are visibly unset.
            #[inline(always)]
            fn default() -> Self {
                Self::NONE
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self.0)
            }
        }

        impl TryFrom<usize> for $name {
            type Error = std::num::TryFromIntError;
            fn try_from(n: usize) -> Result<$name, Self::Error> {
                <$inner>::try_from(n).map($name)
            }
        }
    };
}

typed_id! {
    /// Flat index of a grid cell (`row * cols + col`).  Grids are limited to
    /// `u32::MAX - 1` cells, far beyond any downscaled floor plan.
    pub struct CellId(u32);
}

typed_id! {
    /// Position of a movement request in input order.
    pub struct RequestId(u32);
}
