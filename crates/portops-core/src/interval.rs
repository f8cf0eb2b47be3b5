// Copyright (c) 2025 Felix Kahle.
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the
// "Software"), to deal in the Software without restriction, including
// without limitation the rights to use, copy, modify, merge, publish,
// distribute, sublicense, and/or sell copies of the Software, and to
// permit persons to whom the Software is furnished to do so, subject to
// the following conditions:
//
// The above copyright notice and this permission notice shall be
// included in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF
// MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
// NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE
// LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION
// WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

//! Half-open intervals.

use num_traits::Zero;
use serde::{Deserialize, Serialize};
use std::{cmp::Ordering, fmt, ops::Sub};

/// A half-open interval `[start, end)`.
///
/// The start is inclusive and the end is exclusive. Bounds given in the wrong
/// order are swapped on construction, so `start() <= end()` always holds.
///
/// # Examples
///
/// ```
/// use portops_core::interval::Interval;
///
/// let iv = Interval::new(1, 5);
/// assert!(iv.contains(1));
/// assert!(!iv.contains(5));
/// assert_eq!(iv.length::<i32>(), 4);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Interval<T> {
    start: T,
    end: T,
}

impl<T> Interval<T> {
    /// Creates `[min(a, b), max(a, b))`.
    ///
    /// # Panics
    ///
    /// Panics if `a` and `b` are not comparable.
    #[inline]
    pub fn new(a: T, b: T) -> Self
    where
        T: PartialOrd + Copy,
    {
        let ord = a
            .partial_cmp(&b)
            .expect("Interval::new: non-comparable bounds");
        match ord {
            Ordering::Greater => Self { start: b, end: a },
            _ => Self { start: a, end: b },
        }
    }

    /// Creates `[start, end)` only if `start <= end`.
    #[inline]
    pub fn try_new(start: T, end: T) -> Option<Self>
    where
        T: PartialOrd,
    {
        (start <= end).then_some(Self { start, end })
    }

    #[inline]
    pub fn start(&self) -> T
    where
        T: Copy,
    {
        self.start
    }

    #[inline]
    pub fn end(&self) -> T
    where
        T: Copy,
    {
        self.end
    }

    #[inline]
    pub fn is_empty(&self) -> bool
    where
        T: PartialEq,
    {
        self.start == self.end
    }

    #[inline]
    pub fn contains(&self, x: T) -> bool
    where
        T: PartialOrd,
    {
        x >= self.start && x < self.end
    }

    /// Returns `true` if both intervals share at least one point.
    #[inline]
    pub fn intersects(&self, other: &Self) -> bool
    where
        T: PartialOrd,
    {
        self.start < other.end && other.start < self.end
    }

    /// The overlapping part of both intervals, `None` when they are disjoint.
    ///
    /// ```
    /// use portops_core::interval::Interval;
    ///
    /// let a = Interval::new(0, 10);
    /// assert_eq!(a.intersection(&Interval::new(5, 20)), Some(Interval::new(5, 10)));
    /// assert_eq!(a.intersection(&Interval::new(10, 20)), None);
    /// ```
    #[inline]
    pub fn intersection(&self, other: &Self) -> Option<Self>
    where
        T: PartialOrd + Copy,
    {
        let start = if self.start > other.start {
            self.start
        } else {
            other.start
        };
        let end = if self.end < other.end {
            self.end
        } else {
            other.end
        };
        (start < end).then_some(Self { start, end })
    }

    /// Clamps `x` into `[start, end]`.
    #[inline]
    pub fn clamp_point(&self, x: T) -> T
    where
        T: PartialOrd + Copy,
    {
        if x < self.start {
            self.start
        } else if x > self.end {
            self.end
        } else {
            x
        }
    }

    #[inline]
    pub fn length<D>(&self) -> D
    where
        T: Copy + Sub<T, Output = D>,
    {
        self.end - self.start
    }

    /// Like [`Interval::length`] but returns zero for empty intervals
    /// without performing the subtraction.
    #[inline]
    pub fn measure<D>(&self) -> D
    where
        T: Copy + PartialEq + Sub<T, Output = D>,
        D: Zero,
    {
        if self.is_empty() {
            D::zero()
        } else {
            self.length()
        }
    }
}

impl<T: fmt::Display> fmt::Display for Interval<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {})", self.start, self.end)
    }
}

impl<T: Copy + PartialOrd> From<std::ops::Range<T>> for Interval<T> {
    #[inline]
    fn from(range: std::ops::Range<T>) -> Self {
        Interval::new(range.start, range.end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_swaps_bounds() {
        let iv = Interval::new(7, 3);
        assert_eq!(iv.start(), 3);
        assert_eq!(iv.end(), 7);
    }

    #[test]
    fn test_try_new_rejects_inverted() {
        assert!(Interval::try_new(7, 3).is_none());
        assert_eq!(Interval::try_new(3, 3), Some(Interval::new(3, 3)));
    }

    #[test]
    fn test_contains_is_half_open() {
        let iv = Interval::new(1, 5);
        assert!(iv.contains(1));
        assert!(iv.contains(4));
        assert!(!iv.contains(5));
        assert!(!iv.contains(0));
    }

    #[test]
    fn test_intersects_excludes_touching() {
        let a = Interval::new(0, 5);
        assert!(a.intersects(&Interval::new(4, 9)));
        assert!(!a.intersects(&Interval::new(5, 9)));
    }

    #[test]
    fn test_intersection() {
        let a = Interval::new(0, 10);
        assert_eq!(a.intersection(&Interval::new(-5, 3)), Some(Interval::new(0, 3)));
        assert_eq!(a.intersection(&Interval::new(12, 20)), None);
    }

    #[test]
    fn test_clamp_point() {
        let a = Interval::new(10, 20);
        assert_eq!(a.clamp_point(5), 10);
        assert_eq!(a.clamp_point(15), 15);
        assert_eq!(a.clamp_point(25), 20);
    }

    #[test]
    fn test_measure_of_empty_is_zero() {
        let a = Interval::new(4, 4);
        assert_eq!(a.measure::<i32>(), 0);
        assert_eq!(Interval::new(2, 9).measure::<i32>(), 7);
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", Interval::new(1, 2)), "[1, 2)");
    }
}
