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

//! Geographic positions and great-circle distances.

use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Mean Earth radius expressed in nautical miles.
pub const EARTH_RADIUS_NM: f64 = 3440.065;

#[repr(transparent)]
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NauticalMiles(f64);

impl NauticalMiles {
    #[inline]
    pub const fn new(value: f64) -> Self {
        NauticalMiles(value)
    }

    #[inline]
    pub const fn value(self) -> f64 {
        self.0
    }
}

impl Display for NauticalMiles {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.2} nm", self.0)
    }
}

/// A WGS84 position in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct GeoPoint {
    latitude: f64,
    longitude: f64,
}

impl GeoPoint {
    #[inline]
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    #[inline]
    pub const fn latitude(&self) -> f64 {
        self.latitude
    }

    #[inline]
    pub const fn longitude(&self) -> f64 {
        self.longitude
    }

    /// Haversine distance to `other`.
    ///
    /// ```
    /// use portops_core::geo::GeoPoint;
    ///
    /// let a = GeoPoint::new(0.0, 0.0);
    /// let b = GeoPoint::new(1.0, 0.0);
    /// assert!((a.distance_to(&b).value() - 60.04).abs() < 0.01);
    /// ```
    pub fn distance_to(&self, other: &GeoPoint) -> NauticalMiles {
        let phi1 = self.latitude.to_radians();
        let phi2 = other.latitude.to_radians();
        let d_phi = (other.latitude - self.latitude).to_radians();
        let d_lambda = (other.longitude - self.longitude).to_radians();

        let a = (d_phi / 2.0).sin().powi(2)
            + phi1.cos() * phi2.cos() * (d_lambda / 2.0).sin().powi(2);
        let c = 2.0 * a.sqrt().atan2((1.0 - a).max(0.0).sqrt());
        NauticalMiles(EARTH_RADIUS_NM * c)
    }
}

impl Display for GeoPoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:.5}, {:.5})", self.latitude, self.longitude)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_distance_to_self_is_zero() {
        let p = GeoPoint::new(53.54, 9.98);
        assert!(p.distance_to(&p).value().abs() < 1e-9);
    }

    #[test]
    fn test_distance_is_symmetric() {
        let a = GeoPoint::new(53.54, 9.98);
        let b = GeoPoint::new(51.95, 4.14);
        let ab = a.distance_to(&b).value();
        let ba = b.distance_to(&a).value();
        assert!((ab - ba).abs() < 1e-9);
    }

    #[test]
    fn test_one_arc_minute_of_latitude_is_one_nm() {
        let a = GeoPoint::new(10.0, 20.0);
        let b = GeoPoint::new(10.0 + 1.0 / 60.0, 20.0);
        assert!((a.distance_to(&b).value() - 1.0).abs() < 0.01);
    }

    #[test]
    fn test_antipodal_points() {
        let a = GeoPoint::new(0.0, 0.0);
        let b = GeoPoint::new(0.0, 180.0);
        let half_circumference = std::f64::consts::PI * EARTH_RADIUS_NM;
        assert!((a.distance_to(&b).value() - half_circumference).abs() < 1e-6);
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", NauticalMiles::new(3.14159)), "3.14 nm");
    }
}
