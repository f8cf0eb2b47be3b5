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

//! # Port Operations Core Primitives (`portops-core`)
//!
//! Strongly typed building blocks shared by the model and the engine:
//!
//! - **Time**: `Timestamp` (milliseconds since the Unix epoch), `Duration`
//!   (signed milliseconds) and `TimeWindow`, a half-open `[start, end)`
//!   interval of timestamps.
//! - **Measure**: `Meters`, used for vessel length/draft and berth limits.
//! - **Geo**: `GeoPoint` and great-circle distances in nautical miles.
//!
//! Distinct newtypes keep the units apart at compile time, e.g. two
//! timestamps cannot be added, and a draft cannot be compared with a
//! duration.

pub mod geo;
pub mod interval;
pub mod measure;
pub mod time;

pub mod prelude {
    pub use crate::geo::{GeoPoint, NauticalMiles};
    pub use crate::interval::Interval;
    pub use crate::measure::Meters;
    pub use crate::time::{Duration, TimeWindow, Timestamp};
}
