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

//! # Time
//!
//! - `Timestamp`: a point in time, milliseconds since the Unix epoch.
//! - `Duration`: a signed span of milliseconds, the difference of two timestamps.
//! - `TimeWindow`: a half-open `[start, end)` interval of timestamps.
//!
//! Operator impls panic on overflow, mirroring integer arithmetic in debug
//! builds; the `checked_*`/`saturating_*` methods never panic.

use crate::interval::Interval;
use num_traits::Zero;
use serde::{Deserialize, Serialize};
use std::{
    fmt::Display,
    iter::Sum,
    ops::{Add, AddAssign, Neg, Sub, SubAssign},
};

const MILLIS_PER_SECOND: i64 = 1_000;
const MILLIS_PER_MINUTE: i64 = 60 * MILLIS_PER_SECOND;
const MILLIS_PER_HOUR: i64 = 60 * MILLIS_PER_MINUTE;
const MILLIS_PER_DAY: i64 = 24 * MILLIS_PER_HOUR;

#[repr(transparent)]
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Timestamp(i64);

impl Timestamp {
    #[inline]
    pub const fn from_millis(millis: i64) -> Self {
        Timestamp(millis)
    }

    #[inline]
    pub const fn epoch() -> Self {
        Timestamp(0)
    }

    #[inline]
    pub const fn as_millis(self) -> i64 {
        self.0
    }

    #[inline]
    pub fn checked_add(self, delta: Duration) -> Option<Self> {
        self.0.checked_add(delta.0).map(Timestamp)
    }

    #[inline]
    pub fn checked_sub(self, delta: Duration) -> Option<Self> {
        self.0.checked_sub(delta.0).map(Timestamp)
    }

    #[inline]
    pub fn saturating_add(self, delta: Duration) -> Self {
        Timestamp(self.0.saturating_add(delta.0))
    }

    #[inline]
    pub fn saturating_sub(self, delta: Duration) -> Self {
        Timestamp(self.0.saturating_sub(delta.0))
    }

    /// Elapsed time from `earlier` to `self`; negative if `earlier` is later.
    #[inline]
    pub fn saturating_since(self, earlier: Timestamp) -> Duration {
        Duration(self.0.saturating_sub(earlier.0))
    }
}

impl Display for Timestamp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Timestamp({})", self.0)
    }
}

impl From<i64> for Timestamp {
    #[inline]
    fn from(millis: i64) -> Self {
        Timestamp(millis)
    }
}

#[repr(transparent)]
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Duration(i64);

impl Duration {
    #[inline]
    pub const fn from_millis(millis: i64) -> Self {
        Duration(millis)
    }

    #[inline]
    pub const fn from_secs(secs: i64) -> Self {
        Duration(secs * MILLIS_PER_SECOND)
    }

    #[inline]
    pub const fn from_minutes(minutes: i64) -> Self {
        Duration(minutes * MILLIS_PER_MINUTE)
    }

    #[inline]
    pub const fn from_hours(hours: i64) -> Self {
        Duration(hours * MILLIS_PER_HOUR)
    }

    #[inline]
    pub const fn from_days(days: i64) -> Self {
        Duration(days * MILLIS_PER_DAY)
    }

    #[inline]
    pub const fn as_millis(self) -> i64 {
        self.0
    }

    #[inline]
    pub fn as_hours_f64(self) -> f64 {
        self.0 as f64 / MILLIS_PER_HOUR as f64
    }

    #[inline]
    pub const fn is_negative(self) -> bool {
        self.0 < 0
    }

    #[inline]
    pub const fn is_positive(self) -> bool {
        self.0 > 0
    }

    #[inline]
    pub fn checked_add(self, rhs: Duration) -> Option<Self> {
        self.0.checked_add(rhs.0).map(Duration)
    }

    #[inline]
    pub fn saturating_add(self, rhs: Duration) -> Self {
        Duration(self.0.saturating_add(rhs.0))
    }

    /// Clamps negative spans to zero.
    #[inline]
    pub fn non_negative(self) -> Self {
        Duration(self.0.max(0))
    }
}

impl Display for Duration {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}ms", self.0)
    }
}

impl From<i64> for Duration {
    #[inline]
    fn from(millis: i64) -> Self {
        Duration(millis)
    }
}

impl Add<Duration> for Timestamp {
    type Output = Timestamp;

    #[inline]
    fn add(self, rhs: Duration) -> Self::Output {
        Timestamp(
            self.0
                .checked_add(rhs.0)
                .expect("overflow in Timestamp + Duration"),
        )
    }
}

impl AddAssign<Duration> for Timestamp {
    #[inline]
    fn add_assign(&mut self, rhs: Duration) {
        *self = *self + rhs;
    }
}

impl Sub<Duration> for Timestamp {
    type Output = Timestamp;

    #[inline]
    fn sub(self, rhs: Duration) -> Self::Output {
        Timestamp(
            self.0
                .checked_sub(rhs.0)
                .expect("underflow in Timestamp - Duration"),
        )
    }
}

impl Sub<Timestamp> for Timestamp {
    type Output = Duration;

    #[inline]
    fn sub(self, rhs: Timestamp) -> Self::Output {
        Duration(
            self.0
                .checked_sub(rhs.0)
                .expect("underflow in Timestamp - Timestamp"),
        )
    }
}

impl Add for Duration {
    type Output = Duration;

    #[inline]
    fn add(self, rhs: Self) -> Self::Output {
        Duration(
            self.0
                .checked_add(rhs.0)
                .expect("overflow in Duration + Duration"),
        )
    }
}

impl AddAssign for Duration {
    #[inline]
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl Sub for Duration {
    type Output = Duration;

    #[inline]
    fn sub(self, rhs: Self) -> Self::Output {
        Duration(
            self.0
                .checked_sub(rhs.0)
                .expect("underflow in Duration - Duration"),
        )
    }
}

impl SubAssign for Duration {
    #[inline]
    fn sub_assign(&mut self, rhs: Self) {
        *self = *self - rhs;
    }
}

impl Neg for Duration {
    type Output = Duration;

    #[inline]
    fn neg(self) -> Self::Output {
        Duration(self.0.checked_neg().expect("overflow in -Duration"))
    }
}

impl Zero for Duration {
    #[inline]
    fn zero() -> Self {
        Duration(0)
    }

    #[inline]
    fn is_zero(&self) -> bool {
        self.0 == 0
    }
}

impl Sum for Duration {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Duration::zero(), |acc, d| acc + d)
    }
}

impl<'a> Sum<&'a Duration> for Duration {
    fn sum<I: Iterator<Item = &'a Self>>(iter: I) -> Self {
        iter.fold(Duration::zero(), |acc, d| acc + *d)
    }
}

pub type TimeWindow = Interval<Timestamp>;

impl Interval<Timestamp> {
    /// The rolling window `[end - lookback, end)`.
    #[inline]
    pub fn trailing(end: Timestamp, lookback: Duration) -> Self {
        Interval::new(end.saturating_sub(lookback.non_negative()), end)
    }

    #[inline]
    pub fn duration(&self) -> Duration {
        self.measure()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timestamp_sub_timestamp() {
        let a = Timestamp::from_millis(5_000);
        let b = Timestamp::from_millis(2_000);
        assert_eq!(a - b, Duration::from_secs(3));
        assert_eq!(b - a, Duration::from_secs(-3));
    }

    #[test]
    fn test_timestamp_add_duration() {
        let t = Timestamp::from_millis(1_000) + Duration::from_minutes(1);
        assert_eq!(t.as_millis(), 61_000);
    }

    #[test]
    fn test_duration_units() {
        assert_eq!(Duration::from_hours(2).as_millis(), 7_200_000);
        assert_eq!(Duration::from_days(1), Duration::from_hours(24));
        assert!((Duration::from_minutes(90).as_hours_f64() - 1.5).abs() < 1e-12);
    }

    #[test]
    fn test_duration_sum() {
        let parts = [Duration::from_secs(1), Duration::from_secs(2)];
        assert_eq!(parts.iter().sum::<Duration>(), Duration::from_secs(3));
        assert_eq!(parts.into_iter().sum::<Duration>(), Duration::from_secs(3));
    }

    #[test]
    fn test_duration_non_negative() {
        assert_eq!(Duration::from_millis(-5).non_negative(), Duration::zero());
        assert_eq!(Duration::from_millis(5).non_negative(), Duration::from_millis(5));
    }

    #[test]
    fn test_checked_add_overflow() {
        assert_eq!(
            Timestamp::from_millis(i64::MAX).checked_add(Duration::from_millis(1)),
            None
        );
    }

    #[test]
    #[should_panic(expected = "overflow in Timestamp + Duration")]
    fn test_add_panics_on_overflow() {
        let _ = Timestamp::from_millis(i64::MAX) + Duration::from_millis(1);
    }

    #[test]
    fn test_trailing_window() {
        let w = TimeWindow::trailing(Timestamp::from_millis(10_000), Duration::from_secs(4));
        assert_eq!(w.start(), Timestamp::from_millis(6_000));
        assert_eq!(w.end(), Timestamp::from_millis(10_000));
        assert_eq!(w.duration(), Duration::from_secs(4));
    }

    #[test]
    fn test_serde_is_transparent() {
        let json = serde_json::to_string(&Timestamp::from_millis(42)).unwrap();
        assert_eq!(json, "42");
        let d: Duration = serde_json::from_str("1500").unwrap();
        assert_eq!(d, Duration::from_millis(1_500));
    }
}
