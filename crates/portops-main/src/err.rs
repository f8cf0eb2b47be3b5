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

use portops_engine::err::{InvalidThresholdError, LedgerError, TopologyError};
use portops_model::generator::ScenarioGenConfigBuildError;
use std::fmt::Display;

#[derive(Debug)]
pub enum PortopsError {
    Io(std::io::Error),
    Json(serde_json::Error),
    Generator(ScenarioGenConfigBuildError),
    Thresholds(InvalidThresholdError),
    Topology(TopologyError),
    Ledger(LedgerError),
}

impl Display for PortopsError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PortopsError::Io(e) => write!(f, "I/O error: {}", e),
            PortopsError::Json(e) => write!(f, "Malformed scenario: {}", e),
            PortopsError::Generator(e) => write!(f, "Invalid generator settings: {}", e),
            PortopsError::Thresholds(e) => write!(f, "Invalid alert thresholds: {}", e),
            PortopsError::Topology(e) => write!(f, "Invalid berth topology: {}", e),
            PortopsError::Ledger(e) => write!(f, "Replay stopped: {}", e),
        }
    }
}

impl std::error::Error for PortopsError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            PortopsError::Io(e) => Some(e),
            PortopsError::Json(e) => Some(e),
            PortopsError::Generator(e) => Some(e),
            PortopsError::Thresholds(e) => Some(e),
            PortopsError::Topology(e) => Some(e),
            PortopsError::Ledger(e) => Some(e),
        }
    }
}

impl From<std::io::Error> for PortopsError {
    fn from(e: std::io::Error) -> Self {
        PortopsError::Io(e)
    }
}

impl From<serde_json::Error> for PortopsError {
    fn from(e: serde_json::Error) -> Self {
        PortopsError::Json(e)
    }
}

impl From<ScenarioGenConfigBuildError> for PortopsError {
    fn from(e: ScenarioGenConfigBuildError) -> Self {
        PortopsError::Generator(e)
    }
}

impl From<InvalidThresholdError> for PortopsError {
    fn from(e: InvalidThresholdError) -> Self {
        PortopsError::Thresholds(e)
    }
}

impl From<TopologyError> for PortopsError {
    fn from(e: TopologyError) -> Self {
        PortopsError::Topology(e)
    }
}

impl From<LedgerError> for PortopsError {
    fn from(e: LedgerError) -> Self {
        PortopsError::Ledger(e)
    }
}
