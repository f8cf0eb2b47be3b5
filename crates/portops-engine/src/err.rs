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

use portops_core::measure::Meters;
use portops_model::{
    err::{ShipInvariantError, StatusTransitionError, TripAlreadyCompletedError},
    id::{BerthId, QuayId, ShipId, TripId},
};
use std::fmt::Display;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DuplicateBerthIdError {
    berth: BerthId,
}

impl DuplicateBerthIdError {
    #[inline]
    pub fn new(berth: BerthId) -> Self {
        Self { berth }
    }

    #[inline]
    pub fn berth(&self) -> BerthId {
        self.berth
    }
}

impl Display for DuplicateBerthIdError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Berth {} is listed more than once", self.berth)
    }
}

impl std::error::Error for DuplicateBerthIdError {}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DuplicateBerthPositionError {
    quay: QuayId,
    position: i64,
    first: BerthId,
    second: BerthId,
}

impl DuplicateBerthPositionError {
    #[inline]
    pub fn new(quay: QuayId, position: i64, first: BerthId, second: BerthId) -> Self {
        Self {
            quay,
            position,
            first,
            second,
        }
    }

    #[inline]
    pub fn quay(&self) -> QuayId {
        self.quay
    }

    #[inline]
    pub fn position(&self) -> i64 {
        self.position
    }

    #[inline]
    pub fn first(&self) -> BerthId {
        self.first
    }

    #[inline]
    pub fn second(&self) -> BerthId {
        self.second
    }
}

impl Display for DuplicateBerthPositionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Berths {} and {} share position {} on {}",
            self.first, self.second, self.position, self.quay
        )
    }
}

impl std::error::Error for DuplicateBerthPositionError {}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InvalidBerthLimitsError {
    berth: BerthId,
    max_length: Meters,
    max_draft: Meters,
}

impl InvalidBerthLimitsError {
    #[inline]
    pub fn new(berth: BerthId, max_length: Meters, max_draft: Meters) -> Self {
        Self {
            berth,
            max_length,
            max_draft,
        }
    }

    #[inline]
    pub fn berth(&self) -> BerthId {
        self.berth
    }

    #[inline]
    pub fn max_length(&self) -> Meters {
        self.max_length
    }

    #[inline]
    pub fn max_draft(&self) -> Meters {
        self.max_draft
    }
}

impl Display for InvalidBerthLimitsError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Berth {} has non-positive limits (max length {}, max draft {})",
            self.berth, self.max_length, self.max_draft
        )
    }
}

impl std::error::Error for InvalidBerthLimitsError {}

#[derive(Debug, Clone, PartialEq)]
pub enum TopologyError {
    DuplicateId(DuplicateBerthIdError),
    DuplicatePosition(DuplicateBerthPositionError),
    InvalidLimits(InvalidBerthLimitsError),
}

impl Display for TopologyError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TopologyError::DuplicateId(e) => write!(f, "{}", e),
            TopologyError::DuplicatePosition(e) => write!(f, "{}", e),
            TopologyError::InvalidLimits(e) => write!(f, "{}", e),
        }
    }
}

impl From<DuplicateBerthIdError> for TopologyError {
    fn from(err: DuplicateBerthIdError) -> Self {
        TopologyError::DuplicateId(err)
    }
}

impl From<DuplicateBerthPositionError> for TopologyError {
    fn from(err: DuplicateBerthPositionError) -> Self {
        TopologyError::DuplicatePosition(err)
    }
}

impl From<InvalidBerthLimitsError> for TopologyError {
    fn from(err: InvalidBerthLimitsError) -> Self {
        TopologyError::InvalidLimits(err)
    }
}

impl std::error::Error for TopologyError {}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NoActiveTripError {
    ship: ShipId,
}

impl NoActiveTripError {
    #[inline]
    pub fn new(ship: ShipId) -> Self {
        Self { ship }
    }

    #[inline]
    pub fn ship(&self) -> ShipId {
        self.ship
    }
}

impl Display for NoActiveTripError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Ship {} has no active trip", self.ship)
    }
}

impl std::error::Error for NoActiveTripError {}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TripAlreadyActiveError {
    ship: ShipId,
    trip: TripId,
}

impl TripAlreadyActiveError {
    #[inline]
    pub fn new(ship: ShipId, trip: TripId) -> Self {
        Self { ship, trip }
    }

    #[inline]
    pub fn ship(&self) -> ShipId {
        self.ship
    }

    #[inline]
    pub fn trip(&self) -> TripId {
        self.trip
    }
}

impl Display for TripAlreadyActiveError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Ship {} is already on active {}", self.ship, self.trip)
    }
}

impl std::error::Error for TripAlreadyActiveError {}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TripLifecycleError {
    NoActiveTrip(NoActiveTripError),
    AlreadyActive(TripAlreadyActiveError),
    AlreadyCompleted(TripAlreadyCompletedError),
}

impl Display for TripLifecycleError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TripLifecycleError::NoActiveTrip(e) => write!(f, "{}", e),
            TripLifecycleError::AlreadyActive(e) => write!(f, "{}", e),
            TripLifecycleError::AlreadyCompleted(e) => write!(f, "{}", e),
        }
    }
}

impl From<NoActiveTripError> for TripLifecycleError {
    fn from(err: NoActiveTripError) -> Self {
        TripLifecycleError::NoActiveTrip(err)
    }
}

impl From<TripAlreadyActiveError> for TripLifecycleError {
    fn from(err: TripAlreadyActiveError) -> Self {
        TripLifecycleError::AlreadyActive(err)
    }
}

impl From<TripAlreadyCompletedError> for TripLifecycleError {
    fn from(err: TripAlreadyCompletedError) -> Self {
        TripLifecycleError::AlreadyCompleted(err)
    }
}

impl std::error::Error for TripLifecycleError {}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct UnknownShipError {
    ship: ShipId,
}

impl UnknownShipError {
    #[inline]
    pub fn new(ship: ShipId) -> Self {
        Self { ship }
    }

    #[inline]
    pub fn ship(&self) -> ShipId {
        self.ship
    }
}

impl Display for UnknownShipError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Ship {} is not registered with the ledger", self.ship)
    }
}

impl std::error::Error for UnknownShipError {}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AlreadyRegisteredError {
    ship: ShipId,
}

impl AlreadyRegisteredError {
    #[inline]
    pub fn new(ship: ShipId) -> Self {
        Self { ship }
    }

    #[inline]
    pub fn ship(&self) -> ShipId {
        self.ship
    }
}

impl Display for AlreadyRegisteredError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Ship {} is already registered", self.ship)
    }
}

impl std::error::Error for AlreadyRegisteredError {}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ShipMismatchError {
    expected: ShipId,
    found: ShipId,
}

impl ShipMismatchError {
    #[inline]
    pub fn new(expected: ShipId, found: ShipId) -> Self {
        Self { expected, found }
    }

    #[inline]
    pub fn expected(&self) -> ShipId {
        self.expected
    }

    #[inline]
    pub fn found(&self) -> ShipId {
        self.found
    }
}

impl Display for ShipMismatchError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Snapshot of {} cannot replace snapshot of {}",
            self.found, self.expected
        )
    }
}

impl std::error::Error for ShipMismatchError {}

/// Everything that can reject a ledger append. A rejected append leaves the
/// ledger untouched.
#[derive(Debug, Clone, PartialEq)]
pub enum LedgerError {
    UnknownShip(UnknownShipError),
    AlreadyRegistered(AlreadyRegisteredError),
    ShipMismatch(ShipMismatchError),
    Invariant(ShipInvariantError),
    Transition(StatusTransitionError),
    Trip(TripLifecycleError),
}

impl Display for LedgerError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LedgerError::UnknownShip(e) => write!(f, "{}", e),
            LedgerError::AlreadyRegistered(e) => write!(f, "{}", e),
            LedgerError::ShipMismatch(e) => write!(f, "{}", e),
            LedgerError::Invariant(e) => write!(f, "{}", e),
            LedgerError::Transition(e) => write!(f, "{}", e),
            LedgerError::Trip(e) => write!(f, "{}", e),
        }
    }
}

impl From<UnknownShipError> for LedgerError {
    fn from(err: UnknownShipError) -> Self {
        LedgerError::UnknownShip(err)
    }
}

impl From<AlreadyRegisteredError> for LedgerError {
    fn from(err: AlreadyRegisteredError) -> Self {
        LedgerError::AlreadyRegistered(err)
    }
}

impl From<ShipMismatchError> for LedgerError {
    fn from(err: ShipMismatchError) -> Self {
        LedgerError::ShipMismatch(err)
    }
}

impl From<ShipInvariantError> for LedgerError {
    fn from(err: ShipInvariantError) -> Self {
        LedgerError::Invariant(err)
    }
}

impl From<StatusTransitionError> for LedgerError {
    fn from(err: StatusTransitionError) -> Self {
        LedgerError::Transition(err)
    }
}

impl From<TripLifecycleError> for LedgerError {
    fn from(err: TripLifecycleError) -> Self {
        LedgerError::Trip(err)
    }
}

impl std::error::Error for LedgerError {}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InvalidThresholdError {
    name: &'static str,
    value: f64,
}

impl InvalidThresholdError {
    #[inline]
    pub fn new(name: &'static str, value: f64) -> Self {
        Self { name, value }
    }

    #[inline]
    pub fn name(&self) -> &'static str {
        self.name
    }

    #[inline]
    pub fn value(&self) -> f64 {
        self.value
    }
}

impl Display for InvalidThresholdError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Threshold {} must be finite and non-negative, got {}",
            self.name, self.value
        )
    }
}

impl std::error::Error for InvalidThresholdError {}

#[cfg(test)]
mod tests {
    use super::*;
    use portops_model::ship::ShipStatus;

    #[test]
    fn test_topology_error_display_forwards() {
        let err: TopologyError = DuplicateBerthPositionError::new(
            QuayId::new(1),
            2,
            BerthId::new(3),
            BerthId::new(4),
        )
        .into();
        assert_eq!(
            err.to_string(),
            "Berths BerthId(3) and BerthId(4) share position 2 on QuayId(1)"
        );
    }

    #[test]
    fn test_ledger_error_from_transition() {
        let err: LedgerError =
            StatusTransitionError::new(ShipId::new(2), ShipStatus::Departing, ShipStatus::Approaching)
                .into();
        assert!(matches!(err, LedgerError::Transition(_)));
    }

    #[test]
    fn test_trip_error_nests_into_ledger_error() {
        let err: LedgerError = TripLifecycleError::from(NoActiveTripError::new(ShipId::new(5))).into();
        assert_eq!(err.to_string(), "Ship ShipId(5) has no active trip");
    }
}
