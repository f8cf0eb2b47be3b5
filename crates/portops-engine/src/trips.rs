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

//! Trip lifecycle.
//!
//! Every ship is in one of three trip states: it never had a trip, it is on
//! an active trip, or its latest trip is completed. [`TripBook`] mints fresh
//! trip ids and owns the trip records; [`reconstruct_trips`] recovers trip
//! boundaries read-only from a ledger.

use crate::err::{NoActiveTripError, TripAlreadyActiveError, TripLifecycleError};
use portops_core::time::{Duration, Timestamp};
use portops_model::{
    event::MovementEvent,
    id::{PortId, ShipId, TripId},
    trip::Trip,
};
use serde::{Deserialize, Serialize};
use std::{
    collections::{BTreeMap, HashMap},
    fmt::Display,
};
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TripState {
    NoTrip,
    Active(TripId),
    Completed(TripId),
}

impl TripState {
    #[inline]
    pub fn active(self) -> Option<TripId> {
        match self {
            TripState::Active(id) => Some(id),
            _ => None,
        }
    }
}

impl Display for TripState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TripState::NoTrip => write!(f, "no trip"),
            TripState::Active(id) => write!(f, "active {}", id),
            TripState::Completed(id) => write!(f, "completed {}", id),
        }
    }
}

/// All trips known to the ledger, in the order they were opened.
#[derive(Debug, Clone, PartialEq)]
pub struct TripBook {
    trips: Vec<Trip>,
    index: HashMap<TripId, usize>,
    latest: HashMap<ShipId, TripId>,
    next_id: TripId,
}

impl Default for TripBook {
    fn default() -> Self {
        Self::starting_at(TripId::new(1))
    }
}

impl TripBook {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// A book whose first minted trip id is `first`.
    #[inline]
    pub fn starting_at(first: TripId) -> Self {
        Self {
            trips: Vec::new(),
            index: HashMap::new(),
            latest: HashMap::new(),
            next_id: first,
        }
    }

    pub fn state(&self, ship: ShipId) -> TripState {
        match self.latest.get(&ship).and_then(|id| self.trip(*id)) {
            Some(trip) if trip.is_active() => TripState::Active(trip.id()),
            Some(trip) => TripState::Completed(trip.id()),
            None => TripState::NoTrip,
        }
    }

    #[inline]
    pub fn active_trip(&self, ship: ShipId) -> Option<TripId> {
        self.state(ship).active()
    }

    #[inline]
    pub fn trip(&self, id: TripId) -> Option<&Trip> {
        self.index.get(&id).map(|&i| &self.trips[i])
    }

    #[inline]
    pub fn trips(&self) -> &[Trip] {
        &self.trips
    }

    pub fn trips_for_ship(&self, ship: ShipId) -> impl Iterator<Item = &Trip> + '_ {
        self.trips.iter().filter(move |t| t.ship() == ship)
    }

    /// Opens a fresh trip for `ship`. A ship can hold one active trip at a
    /// time; completed trips are never reopened.
    pub fn open(
        &mut self,
        ship: ShipId,
        port: PortId,
        arrival: Timestamp,
    ) -> Result<TripId, TripLifecycleError> {
        if let TripState::Active(trip) = self.state(ship) {
            return Err(TripAlreadyActiveError::new(ship, trip).into());
        }
        let id = self.next_id;
        self.next_id = id.next();
        self.index.insert(id, self.trips.len());
        self.trips.push(Trip::open(id, ship, port, arrival));
        self.latest.insert(ship, id);
        debug!(%ship, trip = %id, %arrival, "Trip opened");
        Ok(id)
    }

    /// Completes the active trip of `ship` at `departure`.
    pub fn close(
        &mut self,
        ship: ShipId,
        departure: Timestamp,
    ) -> Result<TripId, TripLifecycleError> {
        let id = self
            .active_trip(ship)
            .ok_or_else(|| NoActiveTripError::new(ship))?;
        let slot = self.index[&id];
        self.trips[slot].close(departure)?;
        debug!(%ship, trip = %id, %departure, "Trip completed");
        Ok(id)
    }
}

/// Trip boundaries as recovered from a sequence of events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TripSpan {
    trip: TripId,
    ship: ShipId,
    arrival: Timestamp,
    departure: Option<Timestamp>,
    events: usize,
}

impl TripSpan {
    #[inline]
    pub fn trip(&self) -> TripId {
        self.trip
    }

    #[inline]
    pub fn ship(&self) -> ShipId {
        self.ship
    }

    #[inline]
    pub fn arrival(&self) -> Timestamp {
        self.arrival
    }

    #[inline]
    pub fn departure(&self) -> Option<Timestamp> {
        self.departure
    }

    #[inline]
    pub fn events(&self) -> usize {
        self.events
    }

    #[inline]
    pub fn is_open(&self) -> bool {
        self.departure.is_none()
    }

    /// Length of the span; open spans are measured up to `as_of`.
    #[inline]
    pub fn duration(&self, as_of: Timestamp) -> Duration {
        self.departure
            .unwrap_or(as_of)
            .saturating_since(self.arrival)
            .non_negative()
    }
}

/// Groups `events` by trip id. The arrival is the earliest event of the
/// trip, the departure the first status change into `LeftPort`. Events
/// without a trip are ignored. Spans come out ordered by arrival, then id.
pub fn reconstruct_trips(events: &[MovementEvent]) -> Vec<TripSpan> {
    let mut spans: BTreeMap<TripId, TripSpan> = BTreeMap::new();
    for event in events {
        let Some(trip) = event.trip() else { continue };
        let span = spans.entry(trip).or_insert(TripSpan {
            trip,
            ship: event.ship(),
            arrival: event.timestamp(),
            departure: None,
            events: 0,
        });
        span.events += 1;
        span.arrival = span.arrival.min(event.timestamp());
        if event.is_departure() {
            span.departure = Some(match span.departure {
                Some(d) => d.min(event.timestamp()),
                None => event.timestamp(),
            });
        }
    }
    let mut out: Vec<TripSpan> = spans.into_values().collect();
    out.sort_by_key(|s| (s.arrival, s.trip));
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use portops_model::{
        event::{Change, MovementDetails, MovementKind},
        id::EventId,
        ship::ShipStatus,
    };

    const SHIP: ShipId = ShipId::new(1);
    const PORT: PortId = PortId::new(1);

    fn at(ms: i64) -> Timestamp {
        Timestamp::from_millis(ms)
    }

    #[test]
    fn test_states_follow_lifecycle() {
        let mut book = TripBook::new();
        assert_eq!(book.state(SHIP), TripState::NoTrip);
        let first = book.open(SHIP, PORT, at(0)).unwrap();
        assert_eq!(book.state(SHIP), TripState::Active(first));
        book.close(SHIP, at(100)).unwrap();
        assert_eq!(book.state(SHIP), TripState::Completed(first));
        let second = book.open(SHIP, PORT, at(200)).unwrap();
        assert_ne!(first, second);
        assert_eq!(book.trips_for_ship(SHIP).count(), 2);
        assert_eq!(book.trip(first).unwrap().departure(), Some(at(100)));
    }

    #[test]
    fn test_double_open_rejected() {
        let mut book = TripBook::new();
        book.open(SHIP, PORT, at(0)).unwrap();
        assert!(matches!(
            book.open(SHIP, PORT, at(5)),
            Err(TripLifecycleError::AlreadyActive(_))
        ));
    }

    #[test]
    fn test_close_without_trip_rejected() {
        let mut book = TripBook::new();
        assert!(matches!(
            book.close(SHIP, at(5)),
            Err(TripLifecycleError::NoActiveTrip(_))
        ));
    }

    #[test]
    fn test_ids_are_fresh_across_ships() {
        let mut book = TripBook::starting_at(TripId::new(40));
        let a = book.open(SHIP, PORT, at(0)).unwrap();
        let b = book.open(ShipId::new(2), PORT, at(0)).unwrap();
        assert_eq!(a, TripId::new(40));
        assert_eq!(b, TripId::new(41));
    }

    fn event(
        id: u64,
        trip: Option<u64>,
        ms: i64,
        details: MovementDetails,
        kind: MovementKind,
    ) -> MovementEvent {
        MovementEvent::new(
            EventId::new(id),
            SHIP,
            PORT,
            trip.map(TripId::new),
            kind,
            at(ms),
            details,
        )
    }

    #[test]
    fn test_reconstruct_trips_from_events() {
        let departure =
            MovementDetails::status(Change::new(ShipStatus::Departing, ShipStatus::LeftPort));
        let events = vec![
            event(1, Some(1), 10, MovementDetails::default(), MovementKind::Created),
            event(2, Some(1), 50, departure, MovementKind::StatusChange),
            event(3, None, 60, MovementDetails::message("orphan"), MovementKind::ManualLog),
            event(4, Some(2), 90, MovementDetails::message("back"), MovementKind::ManualLog),
        ];
        let spans = reconstruct_trips(&events);
        assert_eq!(spans.len(), 2);
        assert_eq!(spans[0].trip(), TripId::new(1));
        assert_eq!(spans[0].arrival(), at(10));
        assert_eq!(spans[0].departure(), Some(at(50)));
        assert_eq!(spans[0].events(), 2);
        assert!(spans[1].is_open());
        assert_eq!(spans[1].duration(at(100)), Duration::from_millis(10));
    }
}
