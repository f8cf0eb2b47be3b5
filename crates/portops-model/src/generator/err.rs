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

use std::fmt::Display;

#[derive(Debug, Clone, PartialEq)]
pub struct InvalidRangeError {
    name: &'static str,
    min: f64,
    max: f64,
}

impl InvalidRangeError {
    pub fn new(name: &'static str, min: f64, max: f64) -> Self {
        Self { name, min, max }
    }
    pub fn name(&self) -> &'static str {
        self.name
    }
    pub fn min(&self) -> f64 {
        self.min
    }
    pub fn max(&self) -> f64 {
        self.max
    }
}

impl Display for InvalidRangeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "InvalidRangeError: {} range [{}, {}] must be positive and ordered",
            self.name, self.min, self.max
        )
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ScenarioGenConfigBuildError {
    InvalidRange(InvalidRangeError),
    MissingQuays,
    MissingBerthsPerQuay,
    MissingShips,
    MissingUpdates,
    NoBerths,
}

impl Display for ScenarioGenConfigBuildError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        use ScenarioGenConfigBuildError::*;
        match self {
            InvalidRange(e) => write!(f, "{}", e),
            MissingQuays => write!(f, "Missing quays"),
            MissingBerthsPerQuay => write!(f, "Missing berths_per_quay"),
            MissingShips => write!(f, "Missing ships"),
            MissingUpdates => write!(f, "Missing updates"),
            NoBerths => write!(f, "quays * berths_per_quay must be at least 1"),
        }
    }
}

impl From<InvalidRangeError> for ScenarioGenConfigBuildError {
    fn from(err: InvalidRangeError) -> Self {
        Self::InvalidRange(err)
    }
}

impl std::error::Error for ScenarioGenConfigBuildError {}
