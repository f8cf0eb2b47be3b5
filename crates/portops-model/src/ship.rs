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

//! Ship snapshots and the ship status state machine.

use crate::{
    err::{
        BerthHeldWhileAwayError, DockedWithoutBerthError, ShipInvariantError,
        StatusTransitionError, TooManyBerthsError,
    },
    id::{AgentId, BerthId, PilotId, PortId, ShipId, TripId},
};
use portops_core::{geo::GeoPoint, measure::Meters, time::Timestamp};
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// A ship may span at most this many adjacent berths.
pub const MAX_BERTHS_PER_SHIP: usize = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ShipStatus {
    Approaching,
    Anchored,
    Docked,
    Departing,
    LeftPort,
}

impl ShipStatus {
    pub const ALL: [ShipStatus; 5] = [
        ShipStatus::Approaching,
        ShipStatus::Anchored,
        ShipStatus::Docked,
        ShipStatus::Departing,
        ShipStatus::LeftPort,
    ];

    /// The statuses reachable from `self` in one update, excluding `self`.
    pub const fn successors(self) -> &'static [ShipStatus] {
        use ShipStatus::*;
        match self {
            Approaching => &[Anchored, Docked, LeftPort],
            Anchored => &[Approaching, Docked, Departing, LeftPort],
            Docked => &[Anchored, Departing, LeftPort],
            Departing => &[Anchored, Docked, LeftPort],
            LeftPort => &[Approaching, Anchored, Docked],
        }
    }

    /// Staying in the same status is always allowed.
    #[inline]
    pub fn can_transition_to(self, next: ShipStatus) -> bool {
        self == next || self.successors().contains(&next)
    }

    #[inline]
    pub fn is_in_port(self) -> bool {
        self != ShipStatus::LeftPort
    }

    /// `Departing` and `LeftPort` ships must not hold a berth.
    #[inline]
    pub fn forbids_berth(self) -> bool {
        matches!(self, ShipStatus::Departing | ShipStatus::LeftPort)
    }

    #[inline]
    pub fn requires_berth(self) -> bool {
        self == ShipStatus::Docked
    }
}

impl Display for ShipStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ShipStatus::Approaching => write!(f, "Approaching"),
            ShipStatus::Anchored => write!(f, "Anchored"),
            ShipStatus::Docked => write!(f, "Docked"),
            ShipStatus::Departing => write!(f, "Departing"),
            ShipStatus::LeftPort => write!(f, "Left Port"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct VesselDimensions {
    length: Meters,
    draft: Meters,
}

impl VesselDimensions {
    #[inline]
    pub const fn new(length: Meters, draft: Meters) -> Self {
        Self { length, draft }
    }

    #[inline]
    pub fn length(&self) -> Meters {
        self.length
    }

    #[inline]
    pub fn draft(&self) -> Meters {
        self.draft
    }
}

impl Display for VesselDimensions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "length {}, draft {}", self.length, self.draft)
    }
}

/// The current state of one vessel as held by the entity store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ship {
    id: ShipId,
    name: String,
    port: PortId,
    dimensions: VesselDimensions,
    status: ShipStatus,
    #[serde(default)]
    berths: Vec<BerthId>,
    #[serde(default)]
    pilot: Option<PilotId>,
    #[serde(default)]
    agent: Option<AgentId>,
    #[serde(default)]
    departure: Option<Timestamp>,
    #[serde(default)]
    trip: Option<TripId>,
    #[serde(default)]
    position: Option<GeoPoint>,
}

impl Ship {
    /// A freshly registered ship, `Approaching` and without assignments.
    pub fn new(
        id: ShipId,
        name: impl Into<String>,
        port: PortId,
        dimensions: VesselDimensions,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            port,
            dimensions,
            status: ShipStatus::Approaching,
            berths: Vec::new(),
            pilot: None,
            agent: None,
            departure: None,
            trip: None,
            position: None,
        }
    }

    #[inline]
    pub fn id(&self) -> ShipId {
        self.id
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn port(&self) -> PortId {
        self.port
    }

    #[inline]
    pub fn dimensions(&self) -> VesselDimensions {
        self.dimensions
    }

    #[inline]
    pub fn status(&self) -> ShipStatus {
        self.status
    }

    #[inline]
    pub fn berths(&self) -> &[BerthId] {
        &self.berths
    }

    #[inline]
    pub fn pilot(&self) -> Option<PilotId> {
        self.pilot
    }

    #[inline]
    pub fn agent(&self) -> Option<AgentId> {
        self.agent
    }

    #[inline]
    pub fn departure(&self) -> Option<Timestamp> {
        self.departure
    }

    #[inline]
    pub fn trip(&self) -> Option<TripId> {
        self.trip
    }

    #[inline]
    pub fn position(&self) -> Option<GeoPoint> {
        self.position
    }

    #[inline]
    pub fn occupies(&self, berth: BerthId) -> bool {
        self.berths.contains(&berth)
    }

    #[inline]
    pub fn with_status(mut self, status: ShipStatus) -> Self {
        self.status = status;
        self
    }

    #[inline]
    pub fn with_berths(mut self, berths: impl Into<Vec<BerthId>>) -> Self {
        self.berths = berths.into();
        self
    }

    #[inline]
    pub fn with_pilot(mut self, pilot: Option<PilotId>) -> Self {
        self.pilot = pilot;
        self
    }

    #[inline]
    pub fn with_agent(mut self, agent: Option<AgentId>) -> Self {
        self.agent = agent;
        self
    }

    #[inline]
    pub fn with_departure(mut self, departure: Option<Timestamp>) -> Self {
        self.departure = departure;
        self
    }

    #[inline]
    pub fn with_trip(mut self, trip: Option<TripId>) -> Self {
        self.trip = trip;
        self
    }

    #[inline]
    pub fn with_position(mut self, position: Option<GeoPoint>) -> Self {
        self.position = position;
        self
    }

    /// Checks the status/berth invariants of this snapshot.
    pub fn validate(&self) -> Result<(), ShipInvariantError> {
        let count = self.berths.len();
        if count > MAX_BERTHS_PER_SHIP {
            return Err(TooManyBerthsError::new(self.id, count).into());
        }
        if self.status.requires_berth() && count == 0 {
            return Err(DockedWithoutBerthError::new(self.id).into());
        }
        if self.status.forbids_berth() && count != 0 {
            return Err(BerthHeldWhileAwayError::new(self.id, self.status, count).into());
        }
        Ok(())
    }

    /// Checks that `next` is a legal successor snapshot of `self`.
    pub fn check_transition(&self, next: &Ship) -> Result<(), StatusTransitionError> {
        if self.status.can_transition_to(next.status) {
            Ok(())
        } else {
            Err(StatusTransitionError::new(self.id, self.status, next.status))
        }
    }
}

impl Display for Ship {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Ship({}, {:?}, {}, {}, berths: {:?})",
            self.id, self.name, self.status, self.dimensions, self.berths
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ship() -> Ship {
        Ship::new(
            ShipId::new(1),
            "Aurora",
            PortId::new(1),
            VesselDimensions::new(Meters::new(120.0), Meters::new(8.0)),
        )
    }

    #[test]
    fn test_new_ship_is_approaching_and_valid() {
        let s = ship();
        assert_eq!(s.status(), ShipStatus::Approaching);
        assert!(s.berths().is_empty());
        assert!(s.validate().is_ok());
    }

    #[test]
    fn test_docked_without_berth_is_invalid() {
        let s = ship().with_status(ShipStatus::Docked);
        assert!(matches!(
            s.validate(),
            Err(ShipInvariantError::DockedWithoutBerth(_))
        ));
    }

    #[test]
    fn test_departing_with_berth_is_invalid() {
        let s = ship()
            .with_status(ShipStatus::Departing)
            .with_berths(vec![BerthId::new(1)]);
        assert!(matches!(
            s.validate(),
            Err(ShipInvariantError::BerthHeldWhileAway(_))
        ));
    }

    #[test]
    fn test_three_berths_is_invalid() {
        let s = ship()
            .with_status(ShipStatus::Docked)
            .with_berths(vec![BerthId::new(1), BerthId::new(2), BerthId::new(3)]);
        assert!(matches!(
            s.validate(),
            Err(ShipInvariantError::TooManyBerths(_))
        ));
    }

    #[test]
    fn test_anchored_may_hold_preassigned_berth() {
        let s = ship()
            .with_status(ShipStatus::Anchored)
            .with_berths(vec![BerthId::new(4)]);
        assert!(s.validate().is_ok());
    }

    #[test]
    fn test_self_transition_always_allowed() {
        for status in ShipStatus::ALL {
            assert!(status.can_transition_to(status));
        }
    }

    #[test]
    fn test_transition_table() {
        use ShipStatus::*;
        assert!(Approaching.can_transition_to(Docked));
        assert!(LeftPort.can_transition_to(Approaching));
        assert!(Departing.can_transition_to(LeftPort));
        assert!(!Approaching.can_transition_to(Departing));
        assert!(!Docked.can_transition_to(Approaching));
        assert!(!Departing.can_transition_to(Approaching));
        assert!(!LeftPort.can_transition_to(Departing));
    }

    #[test]
    fn test_check_transition_reports_both_states() {
        let from = ship().with_status(ShipStatus::Departing);
        let to = ship().with_status(ShipStatus::Approaching);
        let err = from.check_transition(&to).unwrap_err();
        assert_eq!(err.from_status(), ShipStatus::Departing);
        assert_eq!(err.to_status(), ShipStatus::Approaching);
        assert_eq!(
            err.to_string(),
            "Ship ShipId(1) cannot change status from Departing to Approaching"
        );
    }

    #[test]
    fn test_status_display() {
        assert_eq!(ShipStatus::LeftPort.to_string(), "Left Port");
    }
}
