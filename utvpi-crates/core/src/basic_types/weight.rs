use std::fmt::Debug;
use std::fmt::Display;

use num::PrimInt;
use num::Signed;

/// The numeric type of edge weights and shortest-path distances.
///
/// Any signed primitive integer qualifies. The maximum representable value doubles as the
/// "unreached" distance, which is why [`Weight::combine`] never moves away from it. The minimum is
/// not a sentinel: a path length below it has no representation at all.
pub trait Weight: PrimInt + Signed + Debug + Display {
    /// Addition for path lengths. Saturates at [`num::Bounded::max_value`], and a distance that
    /// is already there stays there regardless of `other`.
    ///
    /// Returns `None` if the sum falls below [`num::Bounded::min_value`]. Saturating there would
    /// pin a distance that can still decrease.
    fn combine(self, other: Self) -> Option<Self> {
        if self == Self::max_value() {
            return Some(self);
        }

        match self.checked_add(&other) {
            Some(sum) => Some(sum),
            None if other > Self::zero() => Some(Self::max_value()),
            None => None,
        }
    }

    /// Whether the value is odd. Correct for negative values as well.
    fn is_odd(self) -> bool {
        self & Self::one() == Self::one()
    }

    /// Whether `self - other` is odd, without computing the difference.
    fn has_odd_difference(self, other: Self) -> bool {
        self.is_odd() != other.is_odd()
    }

    /// `self - other`, or `None` if the difference is not representable.
    fn difference(self, other: Self) -> Option<Self> {
        self.checked_sub(&other)
    }

    /// Twice `self`, or `None` on overflow.
    fn doubled(self) -> Option<Self> {
        self.checked_add(&self)
    }
}

impl<T: PrimInt + Signed + Debug + Display> Weight for T {}
