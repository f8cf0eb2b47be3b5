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

use num_traits::Zero;
use serde::{Deserialize, Serialize};
use std::{
    fmt::Display,
    ops::{Add, Sub},
};

/// A length in metres (vessel length or draft, berth limits).
///
/// Backed by `f64`; the ordering is partial, but every value produced by
/// this crate is finite.
#[repr(transparent)]
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Meters(f64);

impl Meters {
    #[inline]
    pub const fn new(value: f64) -> Self {
        Meters(value)
    }

    #[inline]
    pub const fn value(self) -> f64 {
        self.0
    }

    #[inline]
    pub fn is_finite(self) -> bool {
        self.0.is_finite()
    }

    /// `true` for finite values strictly greater than zero.
    #[inline]
    pub fn is_positive(self) -> bool {
        self.0.is_finite() && self.0 > 0.0
    }
}

impl Display for Meters {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}m", self.0)
    }
}

impl From<f64> for Meters {
    #[inline]
    fn from(v: f64) -> Self {
        Meters(v)
    }
}

impl Add for Meters {
    type Output = Meters;

    #[inline]
    fn add(self, rhs: Self) -> Self::Output {
        Meters(self.0 + rhs.0)
    }
}

impl Sub for Meters {
    type Output = Meters;

    #[inline]
    fn sub(self, rhs: Self) -> Self::Output {
        Meters(self.0 - rhs.0)
    }
}

impl Zero for Meters {
    #[inline]
    fn zero() -> Self {
        Meters(0.0)
    }

    #[inline]
    fn is_zero(&self) -> bool {
        self.0 == 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", Meters::new(8.5)), "8.5m");
        assert_eq!(format!("{}", Meters::new(100.0)), "100m");
    }

    #[test]
    fn test_add_and_compare() {
        let combined = Meters::new(100.0) + Meters::new(80.0);
        assert_eq!(combined, Meters::new(180.0));
        assert!(Meters::new(150.0) <= combined);
    }

    #[test]
    fn test_is_positive() {
        assert!(Meters::new(0.1).is_positive());
        assert!(!Meters::zero().is_positive());
        assert!(!Meters::new(f64::NAN).is_positive());
        assert!(!Meters::new(f64::INFINITY).is_positive());
    }
}
